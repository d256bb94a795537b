//! One-stop import for consumers of the generator.

pub use crate::error::FastError;
pub use crate::serialize::message_only;
pub use exgen_macros::{cached, constructor, exception, exgen_module, or_throw};
