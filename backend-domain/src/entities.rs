// Domain entities
pub mod anomaly;
pub mod audit_log_entry;
pub mod audit_log_record;
pub mod model;
pub mod report;

pub use anomaly::*;
pub use audit_log_entry::*;
pub use audit_log_record::*;
pub use model::*;
pub use report::*;
