//! Small tour of the generated surface. Run with
//! `cargo run --example playground`.

use anyhow::Result;
use exgen::exgen_module;

#[exgen_module]
pub mod demo_errors {
    use exgen::FastError;
    use std::sync::LazyLock;

    #[exception(cache_no_args)]
    #[derive(Debug, Clone)]
    pub struct SomeError {
        pub inner: FastError,
    }

    impl SomeError {
        pub fn new() -> Self {
            SomeError {
                inner: FastError::new("something went wrong"),
            }
        }
    }

    #[exception]
    #[derive(Debug, Clone)]
    pub struct SomeOtherError {
        pub inner: FastError,
    }

    impl SomeOtherError {
        pub fn new(message: String) -> Self {
            SomeOtherError {
                inner: FastError::new(message),
            }
        }
    }

    #[derive(Debug, Clone)]
    pub struct Session {
        pub user: String,
    }

    #[or_throw(Session)]
    pub static NO_SESSION: LazyLock<SomeOtherError> =
        LazyLock::new(|| SomeOtherError::new("no active session".to_owned()));
}

use demo_errors::*;

fn main() -> Result<()> {
    // The no-args exception is built once and shared.
    let stalled = SomeError::get();
    println!("cached:  {}", stalled.inner.message());
    assert!(std::ptr::eq(stalled, SomeError::get()));

    // Factories wrap the declared constructors.
    let other = SomeOtherError::make("hello".to_owned());
    println!("made:    {}", other.inner.message());

    // Present values pass through, absent ones raise the registered error.
    let session = Some(Session {
        user: "ada".to_owned(),
    })
    .or_throw_no_session()
    .map_err(|e| anyhow::anyhow!(e.inner.clone()))?;
    println!("session: {}", session.user);

    match None::<Session>.or_throw_no_session() {
        Ok(_) => unreachable!(),
        Err(e) => println!("raised:  {}", e.inner.message()),
    }

    Ok(())
}
