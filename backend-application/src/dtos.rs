use serde::{Deserialize, Serialize};

use backend_domain::{AuditLogRecord, RuleDescriptor};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectRequest {
    #[serde(default)]
    pub entries: Vec<AuditLogRecord>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCatalog {
    pub practice_utc_offset: String,
    pub rules: Vec<RuleDescriptor>,
}
