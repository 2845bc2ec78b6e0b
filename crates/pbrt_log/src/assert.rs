//! Programmer-error assertions.

use std::fmt;

/// Checks that the condition holds in builds with debug assertions enabled.
///
/// A failure is logged as critical with the expression, file and line before
/// panicking. Without debug assertions the condition is type checked but
/// never evaluated.
#[macro_export]
macro_rules! pbrt_assert {
    ($condition:expr $(,)?) => {
        if ::std::cfg!(debug_assertions) && !$condition {
            $crate::assertion_failed(
                ::std::stringify!($condition),
                ::std::file!(),
                ::std::line!(),
                ::std::option::Option::None,
            )
        }
    };
}

/// Like [`pbrt_assert!`], with a formatted message added to the report.
#[macro_export]
macro_rules! pbrt_assert_msg {
    ($condition:expr, $($message:tt)+) => {
        if ::std::cfg!(debug_assertions) && !$condition {
            $crate::assertion_failed(
                ::std::stringify!($condition),
                ::std::file!(),
                ::std::line!(),
                ::std::option::Option::Some(::std::format_args!($($message)+)),
            )
        }
    };
}

/// Reports a failed assertion as a critical log record and panics.
#[doc(hidden)]
#[cold]
#[track_caller]
pub fn assertion_failed(
    expression: &str,
    file: &str,
    line: u32,
    message: Option<fmt::Arguments<'_>>,
) -> ! {
    match message {
        Some(message) => {
            log_critical!("Assertion failed: {expression} ({file}:{line}): {message}");
            panic!("assertion failed: {expression} ({file}:{line}): {message}")
        }
        None => {
            log_critical!("Assertion failed: {expression} ({file}:{line})");
            panic!("assertion failed: {expression} ({file}:{line})")
        }
    }
}
