pub mod business;
pub mod error;
pub mod feature_flags;
pub mod form;
pub mod location;
pub mod plan;
pub mod upload;
pub mod user;

pub use business::*;
pub use error::*;
pub use feature_flags::*;
pub use form::*;
pub use location::*;
pub use plan::*;
pub use upload::*;
pub use user::*;
