//! Output module
//! Report formatters and the terminal submit control

pub mod formatter;
pub mod progress;

pub use formatter::{ReportContext, ReportGenerator};
pub use progress::{ConsoleNotifier, SpinnerControl};
