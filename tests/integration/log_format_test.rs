// Log format tests
use modifier_engine::common::log_format::LogFormat;

#[test]
fn test_log_format_usage() {
    let msg = LogFormat::call("Session", "advance", &["'angle-unit'".to_string()]);
    assert_eq!(msg, "Session::advance('angle-unit')");

    let err = LogFormat::error("Session", "advance", "index diverged");
    assert_eq!(err, "Session::advance: index diverged");

    assert_eq!(LogFormat::format_value(0x60A010), "0x60a010");
}

#[test]
fn test_log_format_str_arg() {
    assert_eq!(LogFormat::format_str_arg("short"), "'short'");

    let long = "x".repeat(60);
    let result = LogFormat::format_str_arg(&long);
    assert!(result.starts_with("'xxx"));
    assert!(result.ends_with("'..."));
    assert_eq!(result.len(), 52); // ' + 47 chars + '...
}

// macros must expand with or without the logging feature
#[test]
fn test_macro_compilation() {
    modifier_engine::fn_log!("Test", "method", "arg1", "arg2");
    modifier_engine::warn_log!("Test", "method", "warning message");
}

#[test]
fn test_render_log_line() {
    let args = [
        LogFormat::format_str_arg("pro"),
        LogFormat::format_str_arg(&LogFormat::format_value(0x60A011)),
    ];
    assert_eq!(
        LogFormat::call("TableRenderer", "render", &args),
        "TableRenderer::render('pro', '0x60a011')"
    );
}

#[cfg(not(feature = "logging"))]
#[test]
fn test_fn_log_skips_args_without_logging() {
    let calls = std::cell::Cell::new(0);
    let arg = || {
        calls.set(calls.get() + 1);
        "x"
    };
    modifier_engine::fn_log!("Test", "method", arg());
    assert_eq!(calls.get(), 0);
}
