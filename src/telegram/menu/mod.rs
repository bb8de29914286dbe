//! Menu screens, keyboards and callback identifiers

pub mod callback;
pub mod keyboards;
pub mod screens;

pub use callback::MenuCallback;
pub use screens::{Screen, GENERIC_FAILURE_TEXT};
