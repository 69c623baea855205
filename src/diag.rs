//! Injected diagnostics.
//!
//! The decoder has no global logger. Anything worth telling the application
//! (byte-order fallbacks, mip skip sizes, lossy legacy paths) goes to the
//! [`Diagnostics`] sink on the request; the default sink drops everything.

use core::fmt;

/// Severity of a diagnostic message.
#[repr(usize)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, PartialOrd, Ord)]
pub enum Level {
    Error = 1,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Receiver of decoder diagnostics.
pub trait Diagnostics {
    fn emit(&self, level: Level, message: fmt::Arguments<'_>);
}

/// Discards all diagnostics.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {
    #[inline]
    fn emit(&self, _level: Level, _message: fmt::Arguments<'_>) {}
}

/// Adapts a closure into a [`Diagnostics`] sink.
///
/// ```
/// use zentex::{FnDiagnostics, Level};
///
/// let sink = FnDiagnostics(|level: Level, msg: core::fmt::Arguments<'_>| {
///     let _ = (level, msg);
/// });
/// # let _ = sink;
/// ```
#[derive(Clone, Copy)]
pub struct FnDiagnostics<F>(pub F);

impl<F: Fn(Level, fmt::Arguments<'_>)> Diagnostics for FnDiagnostics<F> {
    fn emit(&self, level: Level, message: fmt::Arguments<'_>) {
        (self.0)(level, message)
    }
}

impl<F> fmt::Debug for FnDiagnostics<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnDiagnostics")
    }
}

/// Forwards diagnostics to the [`log`] facade under the `zentex` target.
#[cfg(feature = "log")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDiagnostics;

#[cfg(feature = "log")]
impl From<Level> for log::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => log::Level::Error,
            Level::Warn => log::Level::Warn,
            Level::Info => log::Level::Info,
            Level::Debug => log::Level::Debug,
            Level::Trace => log::Level::Trace,
        }
    }
}

#[cfg(feature = "log")]
impl Diagnostics for LogDiagnostics {
    fn emit(&self, level: Level, message: fmt::Arguments<'_>) {
        log::log!(target: "zentex", log::Level::from(level), "{message}");
    }
}
