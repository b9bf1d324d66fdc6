pub mod button;
pub mod card;
pub mod checkbox;
pub mod field;
pub mod file_input;
pub mod form;
pub mod form_select;
pub mod input;
pub mod radio_group;
pub mod textarea;
pub mod toast;

pub use button::*;
pub use card::*;
pub use checkbox::*;
pub use field::*;
pub use file_input::*;
pub use form::*;
pub use form_select::*;
pub use input::*;
pub use radio_group::*;
pub use textarea::*;
pub use toast::*;
