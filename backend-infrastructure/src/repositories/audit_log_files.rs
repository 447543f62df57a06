use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tokio::fs;

use backend_domain::{AuditLogRecord, AuditLogSource};

/// Reads audit exports from disk. `.yaml`/`.yml` files are parsed as YAML,
/// everything else as JSON. Either a bare array or `{"entries": [...]}`.
#[derive(Debug, Default)]
pub struct AuditLogFileSource;

impl AuditLogFileSource {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AuditLogDocument {
    Bare(Vec<AuditLogRecord>),
    Wrapped { entries: Vec<AuditLogRecord> },
}

impl AuditLogDocument {
    fn into_records(self) -> Vec<AuditLogRecord> {
        match self {
            AuditLogDocument::Bare(records) => records,
            AuditLogDocument::Wrapped { entries } => entries,
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}

#[async_trait]
impl AuditLogSource for AuditLogFileSource {
    async fn load_records(&self, path: &Path) -> anyhow::Result<Vec<AuditLogRecord>> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("reading audit log {}", path.display()))?;
        let document: AuditLogDocument = if is_yaml(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("parsing YAML audit log {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("parsing JSON audit log {}", path.display()))?
        };
        Ok(document.into_records())
    }
}

#[cfg(test)]
mod tests {
    use backend_domain::EntryField;

    use super::*;

    #[tokio::test]
    async fn loads_bare_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs.json");
        std::fs::write(
            &path,
            r#"[{"id":"LOG001","logDateTime":"2023-12-08T16:45:00","userName":"Receptionist Kelly","userRole":"STAFF","permType":"PaymentDelete","amount":150.0}]"#,
        )
        .unwrap();
        let records = AuditLogFileSource::new().load_records(&path).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].action_type, "PaymentDelete");
        assert_eq!(records[0].amount, Some(150.0));
    }

    #[tokio::test]
    async fn loads_wrapped_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs.yml");
        std::fs::write(
            &path,
            "entries:\n  - id: L2\n    timestamp: \"2023-12-06T10:30:00\"\n    actorRole: STAFF\n    actionType: ADJUSTMENT\n    amount: 450.0\n",
        )
        .unwrap();
        let records = AuditLogFileSource::new().load_records(&path).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "L2");
        assert_eq!(records[0].actor_role, "STAFF");
    }

    #[tokio::test]
    async fn badly_typed_entry_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("logs.json");
        std::fs::write(
            &json,
            r#"[{"id":"B1","amount":"150.00"},{"id":7,"permType":"PaymentDelete","amount":150.0}]"#,
        )
        .unwrap();
        let records = AuditLogFileSource::new().load_records(&json).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_flagged(EntryField::Amount));
        assert_eq!(records[1].id, "7");

        let yaml = dir.path().join("logs.yaml");
        std::fs::write(&yaml, "- id: B1\n  actorRole: [STAFF]\n- id: L1\n  actorRole: STAFF\n").unwrap();
        let records = AuditLogFileSource::new().load_records(&yaml).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_flagged(EntryField::ActorRole));
        assert_eq!(records[1].actor_role, "STAFF");
    }

    #[tokio::test]
    async fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = AuditLogFileSource::new().load_records(&path).await.unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }
}
