pub mod auto_fixer;
pub mod manager;
pub mod manual;
pub mod registry;
pub mod traits;

pub use auto_fixer::AutoFixer;
pub use manager::{FixManager, FixResult};
pub use manual::ManualFixer;
pub use registry::FixRegistry;
pub use traits::{AppliedFix, FixKind};
