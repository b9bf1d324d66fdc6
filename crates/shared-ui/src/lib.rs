//! Themed form building blocks for the listing app.
//!
//! Every component ships its own stylesheet and reads colours from the CSS
//! custom properties defined by the app theme (`--primary`, `--border`, ...).

pub mod components;

pub use components::*;
