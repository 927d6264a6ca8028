//! Rule-based review and auto-fixing for TypeScript, Playwright and Cucumber
//! sources.
//!
//! [`core::FileAnalyzer`] routes files to the analyzers and merges their
//! issues; [`fixers::FixManager`] applies the registered line-local fixes and
//! groups everything else into manual suggestions.

pub mod analyzers;
pub mod core;
pub mod error;
pub mod fixers;
pub mod linters;
pub mod reporters;
pub mod standards;
pub mod utils;
