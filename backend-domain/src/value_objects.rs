// Domain value objects
pub mod action_type;
pub mod actor_role;
pub mod anomaly_category;
pub mod identifiers;
pub mod money;
pub mod severity;

pub use action_type::*;
pub use actor_role::*;
pub use anomaly_category::*;
pub use identifiers::*;
pub use money::*;
pub use severity::*;
