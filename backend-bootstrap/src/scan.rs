use std::path::PathBuf;

use anyhow::{bail, Result};
use tracing::{info, warn};

use backend_domain::{AuditLogSource, DetectionReport, Detector};
use backend_infrastructure::{AppConfig, AuditLogFileSource};

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub file: PathBuf,
    pub strict: bool,
}

/// One-shot detection over an exported audit log. No webhook delivery.
pub async fn run_scan(options: &ScanOptions) -> Result<()> {
    let config = AppConfig::load().await?;
    let report = scan_file(&config, options).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if options.strict && report.has_rejections() {
        bail!(
            "{} entr{} rejected in {}",
            report.rejected.len(),
            if report.rejected.len() == 1 { "y" } else { "ies" },
            options.file.display()
        );
    }
    Ok(())
}

pub async fn scan_file(config: &AppConfig, options: &ScanOptions) -> Result<DetectionReport> {
    let runtime = config.to_runtime_config()?;
    let detector = Detector::from_settings(&runtime.rules, runtime.practice_timezone);

    let records = AuditLogFileSource::new().load_records(&options.file).await?;
    info!("scanning {} record(s) from {}", records.len(), options.file.display());

    let report = detector.detect_now(&records);
    for rejected in &report.rejected {
        warn!("{}", rejected);
    }
    info!(
        "scan finished: {} evaluated, {} anomal{}",
        report.evaluated,
        report.anomalies.len(),
        if report.anomalies.len() == 1 { "y" } else { "ies" }
    );
    Ok(report)
}
