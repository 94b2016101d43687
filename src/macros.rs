//! Logging macros with call-site capture.
//!
//! Each macro formats its message like `format!`, records `file!()`,
//! `line!()` and `module_path!()` as caller metadata, and skips formatting
//! entirely when the logger's threshold rejects the level. Typed fields go in
//! an optional leading `fields: [...]` list.
//!
//! # Examples
//!
//! ```
//! use realm_bridge::prelude::*;
//! use realm_bridge::{info, warn};
//! use std::sync::Arc;
//!
//! let ctx = Arc::new(MemoryContext::new(BackendLevel::Debug));
//! let logger = Logger::new_static(ctx.clone(), "server");
//!
//! info!(logger, "Server started");
//! let port = 8080;
//! info!(logger, "Listening on port {}", port);
//! warn!(logger, fields: [Field::u32("attempt", 3)], "Retrying");
//!
//! assert_eq!(ctx.records().len(), 3);
//! ```

/// Log a message at the given level.
///
/// # Examples
///
/// ```
/// # use realm_bridge::prelude::*;
/// # use std::sync::Arc;
/// # let logger = Logger::new_static(Arc::new(MemoryContext::default()), "");
/// use realm_bridge::log;
/// log!(logger, Level::Info, "Simple message");
/// log!(logger, Level::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, fields: [$($field:expr),* $(,)?], $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log_with_caller(
                level,
                &format!($($arg)+),
                $crate::core::Caller::new(file!(), line!(), module_path!()),
                &[$($field),*],
            );
        }
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::log!($logger, $level, fields: [], $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use realm_bridge::prelude::*;
/// # use std::sync::Arc;
/// # let logger = Logger::new_static(Arc::new(MemoryContext::default()), "db");
/// use realm_bridge::error;
/// error!(logger, fields: [Field::string("table", "users")], "Query failed: {}", "timeout");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::Error, $($arg)+)
    };
}
