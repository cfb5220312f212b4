mod formatter;
mod report;

pub use formatter::{format_fix_summary, format_report, OutputFormat};
pub use report::{build_report, build_summary, Report};
