//! Macros for last-resort debugging.
//!
//! Error reporting of the decoder is deliberately terse: an error kind and
//! the position in the source where it was detected. To make tracking down
//! the code path that produced an error easier, every place that initially
//! creates an error wraps it in the `xerr!()` macro. If the `extra-debug`
//! feature is enabled, the macro prints a backtrace before resolving into
//! whatever the expression it encloses resolves to:
//!
//! ```rust,ignore
//! if count > 4 {
//!     return xerr!(Err(source.err(ErrorKind::MalformedLength)))
//! }
//! ```

#[cfg(feature = "extra-debug")]
pub use backtrace::Backtrace;

#[cfg(feature = "extra-debug")]
#[macro_export]
macro_rules! xerr {
    ($test:expr) => {{
        eprintln!(
            "--- EXTRA DEBUG ---\n{:?}\n--- EXTRA DEBUG ---",
            $crate::debug::Backtrace::new()
        );
        $test
    }}
}

#[cfg(not(feature = "extra-debug"))]
#[macro_export]
macro_rules! xerr {
    ($test:expr) => { $test };
}
