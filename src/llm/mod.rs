pub mod client;
pub mod error;
pub mod prompts;
pub mod validation;

pub use client::*;
pub use error::*;
pub use prompts::*;
pub use validation::*;
