pub mod audit_log_files;

pub use audit_log_files::*;
