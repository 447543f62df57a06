use crate::dtos::RuleCatalog;
use crate::AppState;

pub fn list_rules(state: &AppState) -> RuleCatalog {
    RuleCatalog {
        practice_utc_offset: state.detector.timezone().to_string(),
        rules: state.detector.rules().descriptors(),
    }
}
