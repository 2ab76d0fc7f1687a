//! Response selection and rendering.

pub mod responder;
pub mod templates;

pub use responder::{ResponseDispatcher, ResponseState};
