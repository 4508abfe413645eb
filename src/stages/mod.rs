pub mod aggregate;
pub mod resolve;

pub use aggregate::*;
pub use resolve::*;
