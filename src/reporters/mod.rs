pub mod json;
pub mod summary;
pub mod text;
pub mod traits;

pub use json::JsonReporter;
pub use summary::ReportSummary;
pub use text::TextReporter;
pub use traits::Reporter;
