//! Serde support for generated error types.
//!
//! Errors cross process boundaries as a message and nothing else:
//! no cause chain, no backtrace. [`FastError`] serializes that way
//! out of the box, and [`message_only`] applies the same shape to
//! any `Display` type via `#[serde(serialize_with = ...)]`.

use std::fmt::Display;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::FastError;

impl Serialize for FastError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("FastError", 1)?;
        state.serialize_field("message", self.message())?;
        state.end()
    }
}

/// Serializes any `Display` value as `{"message": "..."}`.
pub fn message_only<E, S>(error: &E, serializer: S) -> Result<S::Ok, S::Error>
where
    E: Display,
    S: Serializer,
{
    let mut state = serializer.serialize_struct("Error", 1)?;
    state.serialize_field("message", &error.to_string())?;
    state.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fast_error_serializes_to_message_only() {
        let err = FastError::new("queue closed");
        let value = serde_json::to_value(&err).expect("serialization");
        assert_eq!(value, json!({ "message": "queue closed" }));
    }

    #[test]
    fn cause_never_leaks_into_the_wire_shape() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "inner detail");
        let err = FastError::with_cause("outer message", io_err);
        let value = serde_json::to_value(&err).expect("serialization");
        assert_eq!(value, json!({ "message": "outer message" }));
    }

    #[test]
    fn message_only_wraps_arbitrary_display_types() {
        #[derive(Debug)]
        struct Custom;

        impl std::fmt::Display for Custom {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("custom failure")
            }
        }

        #[derive(Serialize)]
        struct Wrapper {
            #[serde(serialize_with = "message_only")]
            error: Custom,
        }

        let value = serde_json::to_value(Wrapper { error: Custom }).expect("serialization");
        assert_eq!(value, json!({ "error": { "message": "custom failure" } }));
    }
}
