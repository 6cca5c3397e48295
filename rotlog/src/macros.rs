//! Emission macros.
//!
//! Each macro takes `format!`-style arguments and records the call site as
//! the source location. Prefix the arguments with `logger: <expr>,` to target
//! a specific [`Logger`](crate::Logger) instead of the process-wide one.

/// Emits a TRACE record.
#[macro_export]
macro_rules! trace {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.trace(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::default_logger().trace(::std::format_args!($($arg)+))
    };
}

/// Emits a DEBUG record.
#[macro_export]
macro_rules! debug {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.debug(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::default_logger().debug(::std::format_args!($($arg)+))
    };
}

/// Emits an INFO record.
#[macro_export]
macro_rules! info {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.info(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::default_logger().info(::std::format_args!($($arg)+))
    };
}

/// Emits a WARNING record.
#[macro_export]
macro_rules! warn {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.warn(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::default_logger().warn(::std::format_args!($($arg)+))
    };
}

/// Emits an ERROR record.
#[macro_export]
macro_rules! error {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.error(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::default_logger().error(::std::format_args!($($arg)+))
    };
}

/// Emits a FATAL record. The process keeps running.
#[macro_export]
macro_rules! fatal {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.fatal(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::default_logger().fatal(::std::format_args!($($arg)+))
    };
}
