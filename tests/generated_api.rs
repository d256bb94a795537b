//! End-to-end checks of the generated surface: a module annotated the
//! way a consumer would write it, with assertions on the accessors,
//! factories, and extensions that come out the other side.

use std::error::Error;
use std::ptr;

use exgen::exgen_module;

#[exgen_module]
pub mod pipeline_errors {
    use exgen::FastError;
    use std::sync::LazyLock;

    #[exception(cache_no_args)]
    #[derive(Debug, Clone)]
    pub struct PipelineStalled {
        pub inner: FastError,
    }

    impl PipelineStalled {
        pub fn new() -> Self {
            PipelineStalled {
                inner: FastError::new("pipeline stalled"),
            }
        }
    }

    #[exception]
    #[derive(Debug, Clone)]
    pub struct StageFailed {
        pub inner: FastError,
        pub stage: u32,
    }

    impl StageFailed {
        pub fn new(stage: u32) -> Self {
            StageFailed {
                inner: FastError::new(format!("stage {stage} failed")),
                stage,
            }
        }

        #[constructor]
        pub fn with_cause(stage: u32, cause: std::io::Error) -> Self {
            StageFailed {
                inner: FastError::with_cause(format!("stage {stage} failed"), cause),
                stage,
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Record {
        pub id: u64,
    }

    #[derive(Debug, Clone)]
    pub struct RecordError {
        pub inner: FastError,
    }

    #[cached]
    pub static RECORD_CORRUPT_EXCEPTION: LazyLock<RecordError> = LazyLock::new(|| RecordError {
        inner: FastError::new("record corrupt"),
    });

    #[or_throw(Record)]
    pub static NO_RECORD: LazyLock<RecordError> = LazyLock::new(|| RecordError {
        inner: FastError::new("no record"),
    });
}

use pipeline_errors::*;

#[test]
fn cached_exception_hands_out_one_instance() {
    let first = PipelineStalled::get();
    let second = PipelineStalled::get();
    assert!(ptr::eq(first, second));
    assert_eq!(first.inner.message(), "pipeline stalled");
}

#[test]
fn factories_forward_arguments_unchanged() {
    let made = StageFailed::make(3);
    let direct = StageFailed::new(3);
    assert_eq!(made.stage, direct.stage);
    assert_eq!(made.inner.message(), direct.inner.message());
}

#[test]
fn each_constructor_gets_its_own_factory() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "socket gone");
    let made = StageFailed::make_with_cause(7, io_err);
    assert_eq!(made.stage, 7);
    let source = made.inner.source().expect("cause should be recorded");
    assert_eq!(source.to_string(), "socket gone");
}

#[test]
fn cached_value_accessor_aliases_the_static() {
    assert!(ptr::eq(
        RecordError::record_corrupt(),
        &*RECORD_CORRUPT_EXCEPTION
    ));
}

#[test]
fn or_throw_returns_the_present_value() {
    let record = Record { id: 9 };
    let unwrapped = Some(record.clone())
        .or_throw_no_record()
        .expect("present value should pass through");
    assert_eq!(unwrapped, record);
}

#[test]
fn or_throw_raises_the_registered_error_on_none() {
    let err = None::<Record>
        .or_throw_no_record()
        .expect_err("absent value should raise");
    assert_eq!(err.inner.message(), "no record");
}

#[test]
fn or_throw_error_serializes_as_message_only() {
    let err = None::<Record>
        .or_throw_no_record()
        .expect_err("absent value should raise");
    let value = serde_json::to_value(&err.inner).expect("serialization");
    assert_eq!(value, serde_json::json!({ "message": "no record" }));
}
