// crates/iec61850-coder/src/log.rs

/// Trait for structs that provide metadata for logging
pub trait LogMetadata {
    fn meta(&self) -> String;
}

/// Identifies the entity and generated function a log line belongs to.
pub struct GenerationContext<'a> {
    pub entity: &'a str,
    pub function: &'a str,
}

impl LogMetadata for GenerationContext<'_> {
    fn meta(&self) -> String {
        format!("entity={}, function={}", self.entity, self.function)
    }
}

// =============================================
// Logging Macros (namespaced under crate::log)
// =============================================

// Shared arm: prefixes the message with the context metadata.
macro_rules! log_with_meta {
    ($level:ident, $ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        log::$level!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

macro_rules! my_info {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {
        $crate::log::log_with_meta!(info, $ctx, $fmt $(, $($arg)+)?)
    };
    ($fmt:literal $(, $($arg:tt)+)?) => {
        log::info!($fmt $(, $($arg)+)?)
    };
}

macro_rules! my_warn {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {
        $crate::log::log_with_meta!(warn, $ctx, $fmt $(, $($arg)+)?)
    };
    ($fmt:literal $(, $($arg:tt)+)?) => {
        log::warn!($fmt $(, $($arg)+)?)
    };
}

macro_rules! my_error {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {
        $crate::log::log_with_meta!(error, $ctx, $fmt $(, $($arg)+)?)
    };
    ($fmt:literal $(, $($arg:tt)+)?) => {
        log::error!($fmt $(, $($arg)+)?)
    };
}

macro_rules! my_debug {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {
        $crate::log::log_with_meta!(debug, $ctx, $fmt $(, $($arg)+)?)
    };
    ($fmt:literal $(, $($arg:tt)+)?) => {
        log::debug!($fmt $(, $($arg)+)?)
    };
}

macro_rules! my_trace {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {
        $crate::log::log_with_meta!(trace, $ctx, $fmt $(, $($arg)+)?)
    };
    ($fmt:literal $(, $($arg:tt)+)?) => {
        log::trace!($fmt $(, $($arg)+)?)
    };
}

// Re-export macros for use in other files
pub(crate) use log_with_meta;
pub(crate) use my_debug;
pub(crate) use my_error;
pub(crate) use my_info;
pub(crate) use my_trace;
pub(crate) use my_warn;
