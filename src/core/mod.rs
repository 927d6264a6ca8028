pub mod config;
pub mod dispatcher;

pub use config::Config;
pub use dispatcher::{FileAnalyzer, DirectoryResults};
