// src/macros.rs
//! Logging macros shared by the library and the binary.

/// Emit a tracing event at the given level: `app_log!(info, "x = {}", x)`.
#[macro_export]
macro_rules! app_log {
    ($level:ident, $($arg:tt)+) => {
        ::tracing::$level!($($arg)+)
    };
}

/// Open an info-level span: `app_span!("upload", file = %name)`.
#[macro_export]
macro_rules! app_span {
    ($name:expr) => {
        ::tracing::info_span!($name)
    };
    ($name:expr, $($fields:tt)+) => {
        ::tracing::info_span!($name, $($fields)+)
    };
}
