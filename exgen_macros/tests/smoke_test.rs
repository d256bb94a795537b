use exgen_macros::exgen_module;

#[exgen_module]
pub mod queue_errors {
    #[exception(cache_no_args)]
    #[derive(Debug, Clone, PartialEq)]
    pub struct QueueClosed;

    impl QueueClosed {
        pub fn new() -> Self {
            QueueClosed
        }
    }

    #[exception]
    #[derive(Debug, Clone, PartialEq)]
    pub struct QueueFull {
        pub capacity: usize,
    }

    impl QueueFull {
        pub fn new(capacity: usize) -> Self {
            QueueFull { capacity }
        }

        #[constructor]
        pub fn with_hint(capacity: usize, hint: usize) -> Self {
            QueueFull {
                capacity: capacity + hint,
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Ticket {
        pub id: u32,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct TicketError {
        pub message: &'static str,
    }

    #[cached]
    pub static TICKET_MISSING_EXCEPTION: std::sync::LazyLock<TicketError> =
        std::sync::LazyLock::new(|| TicketError {
            message: "ticket missing",
        });

    #[or_throw(Ticket)]
    pub static NO_TICKET: std::sync::LazyLock<TicketError> =
        std::sync::LazyLock::new(|| TicketError {
            message: "no ticket",
        });
}

use queue_errors::*;

#[test]
fn cached_accessor_returns_one_instance() {
    assert!(std::ptr::eq(QueueClosed::get(), QueueClosed::get()));
}

#[test]
fn factories_mirror_constructors() {
    assert_eq!(QueueFull::make(3), QueueFull::new(3));
    assert_eq!(QueueFull::make_with_hint(3, 2), QueueFull::with_hint(3, 2));
}

#[test]
fn cached_value_accessor_aliases_the_static() {
    // Suffix stripping: TICKET_MISSING_EXCEPTION -> ticket_missing.
    assert!(std::ptr::eq(
        TicketError::ticket_missing(),
        &*TICKET_MISSING_EXCEPTION
    ));
}

#[test]
fn or_throw_unwraps_or_raises() {
    let ticket = Some(Ticket { id: 7 }).or_throw_no_ticket().unwrap();
    assert_eq!(ticket.id, 7);

    let missing: Option<Ticket> = None;
    let err = missing.or_throw_no_ticket().unwrap_err();
    assert_eq!(err.message, "no ticket");
}

#[exgen_module]
pub mod pool_errors {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Conn {
        pub id: u32,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct PoolError {
        pub message: &'static str,
    }

    #[or_throw(Conn, method = "claim")]
    pub static NO_CONN: std::sync::LazyLock<PoolError> =
        std::sync::LazyLock::new(|| PoolError {
            message: "no connection",
        });

    #[or_throw(Conn, method = "claim")]
    pub static POOL_DOWN: std::sync::LazyLock<PoolError> =
        std::sync::LazyLock::new(|| PoolError {
            message: "pool down",
        });
}

#[test]
fn colliding_method_names_on_one_owner_stay_distinct() {
    use pool_errors::*;

    // Both statics asked for `claim`; the second extension takes its
    // raising value's name as a suffix instead of shadowing the first.
    let err = None::<Conn>.claim().unwrap_err();
    assert_eq!(err.message, "no connection");

    let err = None::<Conn>.claim_pool_down().unwrap_err();
    assert_eq!(err.message, "pool down");
}

#[test]
fn markers_share_one_artifact_per_owner() {
    // Both statics target TicketError; landing in one artifact keeps
    // the module free of duplicate symbols, which is what this
    // compiling at all demonstrates. Both members must exist.
    let _ = TicketError::ticket_missing();
    let _ = None::<Ticket>.or_throw_no_ticket();
}
