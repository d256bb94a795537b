//! Marker-driven generation of exception boilerplate.
//!
//! Annotate a module with [`macro@exgen_module`] and mark its error
//! types and error values; the macro generates the repetitive
//! surface: constructor-wrapping `make` factories, cached singleton
//! accessors, value accessors that always hand out the same
//! pre-built instance, and `Option` extensions that unwrap or raise.
//!
//! ```
//! use exgen::exgen_module;
//!
//! #[exgen_module]
//! pub mod app_errors {
//!     use exgen::FastError;
//!     use std::sync::LazyLock;
//!
//!     #[exception]
//!     #[derive(Debug, Clone)]
//!     pub struct StorageError {
//!         pub inner: FastError,
//!     }
//!
//!     impl StorageError {
//!         pub fn new(message: &'static str) -> Self {
//!             StorageError {
//!                 inner: FastError::new(message),
//!             }
//!         }
//!     }
//!
//!     #[cached]
//!     pub static DISK_FULL_EXCEPTION: LazyLock<StorageError> =
//!         LazyLock::new(|| StorageError::new("disk full"));
//! }
//!
//! use app_errors::StorageError;
//!
//! let made = StorageError::make("corrupt index");
//! assert_eq!(made.inner.message(), "corrupt index");
//! // The cached accessor aliases the static; nothing is rebuilt.
//! assert!(std::ptr::eq(
//!     StorageError::disk_full(),
//!     &*app_errors::DISK_FULL_EXCEPTION
//! ));
//! ```
//!
//! The generation engine itself lives in `exgen_core` and is
//! host-agnostic; the proc-macro binding lives in `exgen_macros`.

pub mod error;
pub mod prelude;
pub mod serialize;

pub use error::FastError;
pub use exgen_macros::{cached, constructor, exception, exgen_module, or_throw};

/// The host-agnostic generation engine, re-exported for callers that
/// drive planning themselves instead of going through the attribute.
pub use exgen_core as engine;
