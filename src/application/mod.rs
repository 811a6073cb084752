pub mod coordinator;
pub mod session;

pub use coordinator::*;
pub use session::*;
