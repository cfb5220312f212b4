mod finding;

pub use finding::{AppliedFix, Category, Finding, FixKind, FixSummary, Severity};
