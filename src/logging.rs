/// Conditional console logging for development builds
///
/// The `log!` macro writes informational messages to the browser console in
/// debug builds and is compiled out of release builds unless the
/// `console_logging` feature is enabled. Errors and warnings should keep
/// using `leptos::logging::error!` and `web_sys::console::warn_*` directly.
#[macro_export]
macro_rules! log {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(any(debug_assertions, feature = "console_logging"))]
        {
            web_sys::console::log_1(&format!($($arg),+).into());
        }
    };
}

pub use log;
