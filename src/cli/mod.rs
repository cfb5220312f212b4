mod fix;
mod scan;

pub use fix::run_fix;
pub use scan::{run_rules_list, run_scan, run_stdin};
