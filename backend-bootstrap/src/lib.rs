pub mod context;
pub mod lifecycle;
pub mod scan;

pub use lifecycle::run_standalone;
pub use scan::{run_scan, ScanOptions};
