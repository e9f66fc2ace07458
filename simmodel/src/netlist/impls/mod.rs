//! One generator per model class.

pub use behavioral::BehavioralGenerator;
pub use buffer::BufferGenerator;
pub use diode::DiodeGenerator;
pub use ideal::IdealGenerator;
pub use raw_spice::RawSpiceGenerator;
pub use subckt::SubcktGenerator;

pub mod behavioral;
pub mod buffer;
pub mod diode;
pub mod ideal;
pub mod raw_spice;
pub mod subckt;
