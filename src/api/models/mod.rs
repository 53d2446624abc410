pub mod airports;

pub use airports::*;
pub use crate::core::error::ErrorResponse;
