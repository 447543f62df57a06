use std::fmt;

use crate::entities::{RuleDescriptor, RuleSettings};
use crate::services::rules::{DetectionRule, LateWeekDeletionRule, UnauthorizedHighAdjustmentRule};

/// Ordered rule registry. Registration order is evaluation order.
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn DetectionRule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both built-in rules with their default parameters.
    pub fn standard() -> Self {
        Self::from_settings(&RuleSettings::default())
    }

    pub fn from_settings(settings: &RuleSettings) -> Self {
        let mut rules = Self::new();
        if settings.late_week_delete_enabled {
            rules.register(LateWeekDeletionRule::new(settings.late_week_cutoff_hour));
        }
        if settings.high_adjustment_enabled {
            rules.register(UnauthorizedHighAdjustmentRule::new(
                settings.high_adjustment_threshold,
            ));
        }
        rules
    }

    pub fn register<R>(&mut self, rule: R) -> &mut Self
    where
        R: DetectionRule + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn with_rule<R>(mut self, rule: R) -> Self
    where
        R: DetectionRule + 'static,
    {
        self.register(rule);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &(dyn DetectionRule + 'static)> {
        self.rules.iter().map(|rule| &**rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn descriptors(&self) -> Vec<RuleDescriptor> {
        self.iter().map(|rule| rule.descriptor()).collect()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.name()))
            .finish()
    }
}
