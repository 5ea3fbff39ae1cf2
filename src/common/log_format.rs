use crate::common::bit::ModifierValue;

/// # Examples
/// ```
/// use modifier_engine::common::log_format::LogFormat;
///
/// let fn_message = LogFormat::call("Session", "toggle", &["'shift'".to_string()]);
/// assert_eq!(fn_message, "Session::toggle('shift')");
/// ```
pub struct LogFormat;

impl LogFormat {

    pub fn call(class: &str, fn_name: &str, args: &[String]) -> String {
        let args_str = args.join(", ");
        format!("{}::{}({})", class, fn_name, args_str)
    }

    /// # Examples
    /// ```
    /// use modifier_engine::common::log_format::LogFormat;
    ///
    /// let msg = LogFormat::error("Session", "advance", "annotation diverged");
    /// assert_eq!(msg, "Session::advance: annotation diverged");
    /// ```
    pub fn error(class: &str, fn_name: &str, message: &str) -> String {
        format!("{}::{}: {}", class, fn_name, message)
    }

    /// Format a modifier value for log output
    ///
    /// # Examples
    /// ```
    /// use modifier_engine::common::log_format::LogFormat;
    ///
    /// assert_eq!(LogFormat::format_value(0x100), "0x100");
    /// assert_eq!(LogFormat::format_value(0), "0x0");
    /// ```
    pub fn format_value(value: ModifierValue) -> String {
        format!("{:#x}", value)
    }

    /// Format string argument for log output
    ///
    /// # Examples
    /// ```
    /// use modifier_engine::common::log_format::LogFormat;
    ///
    /// assert_eq!(LogFormat::format_str_arg("radix"), "'radix'");
    /// ```
    pub fn format_str_arg(s: &str) -> String {
        if s.chars().count() > 50 {
            let head: String = s.chars().take(47).collect();
            format!("'{}'...", head)
        } else {
            format!("'{}'", s)
        }
    }
}

/// Log macro: fn call
///
/// # Examples
/// ```ignore
/// use crate::fn_log;
///
/// fn_log!("Session", "toggle", "shift");
/// // Logs: Session::toggle('shift')
/// ```
#[macro_export]
macro_rules! fn_log {
    ($class:expr, $fun:expr $(, $arg:expr)*) => {{
        #[cfg(feature = "logging")]
        {
            let args: Vec<String> = vec![
                $(
                    $crate::common::log_format::LogFormat::format_str_arg($arg),
                )*
            ];
            $crate::log::debug!("{}", $crate::common::log_format::LogFormat::call($class, $fun, &args));
        }
        #[cfg(not(feature = "logging"))]
        {
            // type-checked, never evaluated
            let _ = || {
                let _ = ($class, $fun $(, $arg)*);
            };
        }
    }};
}

/// Log macro: warning
///
/// # Examples
/// ```ignore
/// use crate::warn_log;
///
/// warn_log!("Session", "advance", "bits and annotation diverged");
/// // Logs: Session::advance: bits and annotation diverged
/// ```
#[macro_export]
macro_rules! warn_log {
    ($class:expr, $fun:expr, $msg:expr) => {{
        #[cfg(feature = "logging")]
        {
            $crate::log::warn!("{}", $crate::common::log_format::LogFormat::error($class, $fun, $msg));
        }
        #[cfg(not(feature = "logging"))]
        {
            let _ = ($class, $fun, $msg);
        }
    }};
}
