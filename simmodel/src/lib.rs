pub mod deps;
pub mod error;
pub mod fields;
pub mod io;
pub mod library;
pub mod model;
pub mod netlist;
pub mod session;
pub mod units;
pub mod value;

pub(crate) mod log;
