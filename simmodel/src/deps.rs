pub use arcstr;
pub use num;
pub use spicelib;
