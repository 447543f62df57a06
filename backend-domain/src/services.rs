// Domain services
pub mod detector;
pub mod rule_set;
pub mod rules;
pub mod timezone;

pub use detector::*;
pub use rule_set::*;
pub use rules::*;
pub use timezone::*;
