pub mod detection;
pub mod period;
pub mod remote;
pub mod session;
pub mod zone;

pub use detection::*;
pub use period::*;
pub use remote::*;
pub use session::*;
pub use zone::*;
