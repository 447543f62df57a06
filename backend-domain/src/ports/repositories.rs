use std::path::Path;

use async_trait::async_trait;

use crate::entities::AuditLogRecord;

/// Supplies batches of raw audit records from outside the service.
#[async_trait]
pub trait AuditLogSource: Send + Sync {
    async fn load_records(&self, path: &Path) -> anyhow::Result<Vec<AuditLogRecord>>;
}
