use std::sync::atomic::{AtomicU64, Ordering};

use backend_domain::DetectionReport;

#[derive(Debug, Default)]
pub struct Metrics {
    detection_runs: AtomicU64,
    entries_evaluated: AtomicU64,
    entries_rejected: AtomicU64,
    anomalies: AtomicU64,
    detection_errors: AtomicU64,
}

impl Metrics {
    pub fn record_run(&self, report: &DetectionReport) {
        self.detection_runs.fetch_add(1, Ordering::Relaxed);
        self.entries_evaluated
            .fetch_add(report.evaluated as u64, Ordering::Relaxed);
        self.entries_rejected
            .fetch_add(report.rejected.len() as u64, Ordering::Relaxed);
        self.anomalies
            .fetch_add(report.anomalies.len() as u64, Ordering::Relaxed);
    }

    pub fn record_detection_error(&self) {
        self.detection_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let runs = self.detection_runs.load(Ordering::Relaxed);
        let evaluated = self.entries_evaluated.load(Ordering::Relaxed);
        let rejected = self.entries_rejected.load(Ordering::Relaxed);
        let anomalies = self.anomalies.load(Ordering::Relaxed);
        let errors = self.detection_errors.load(Ordering::Relaxed);

        format!(
            "# TYPE watchdog_detection_runs_total counter\n\
watchdog_detection_runs_total {}\n\
# TYPE watchdog_entries_evaluated_total counter\n\
watchdog_entries_evaluated_total {}\n\
# TYPE watchdog_entries_rejected_total counter\n\
watchdog_entries_rejected_total {}\n\
# TYPE watchdog_anomalies_total counter\n\
watchdog_anomalies_total {}\n\
# TYPE watchdog_detection_errors_total counter\n\
watchdog_detection_errors_total {}\n",
            runs, evaluated, rejected, anomalies, errors
        )
    }
}
