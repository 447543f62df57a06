pub mod alert_queries;
pub mod rule_queries;
