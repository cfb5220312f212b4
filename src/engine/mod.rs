pub mod applicator;
pub mod fixer;
pub mod rules;
pub mod scanner;

pub use applicator::{apply_fixes, FixOutcome};
pub use fixer::generate_fix;
pub use rules::{ScanRule, RULES};
pub use scanner::{investigate, is_likely_binary, scan_content, scan_single_file, FileFindings};
