pub mod issue;
pub mod report;

pub use issue::{CompatInfo, IssueOccurrence, Position, TextSpan};
pub use report::{CompatReport, VersionIssues};
