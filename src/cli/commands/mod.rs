pub mod analyze;
pub mod fix;
pub mod init;
pub mod standards;
