#[cfg(feature = "server")]
pub(crate) mod auth;

mod session;
pub use session::*;

mod reference;
pub use reference::*;

mod upload;
pub use upload::*;

mod business;
pub use business::*;
