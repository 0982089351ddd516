//! Search configuration for the journey planner.

use chrono::Duration;

/// Tuning knobs for the anchor window loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// How far to move the anchor after a query that returned nothing
    /// (minutes).
    pub probe_step_mins: i64,

    /// How far past the latest departure seen to place the next anchor
    /// (minutes).
    pub advance_step_mins: i64,
}

impl SearchConfig {
    /// Create a new configuration with the given steps.
    pub fn new(probe_step_mins: i64, advance_step_mins: i64) -> Self {
        Self {
            probe_step_mins,
            advance_step_mins,
        }
    }

    /// Set the empty-batch probe step.
    pub fn with_probe_step(mut self, mins: i64) -> Self {
        self.probe_step_mins = mins;
        self
    }

    /// Set the anchor advance step.
    pub fn with_advance_step(mut self, mins: i64) -> Self {
        self.advance_step_mins = mins;
        self
    }

    /// Returns the probe step as a Duration.
    pub fn probe_step(&self) -> Duration {
        Duration::minutes(self.probe_step_mins)
    }

    /// Returns the advance step as a Duration.
    pub fn advance_step(&self) -> Duration {
        Duration::minutes(self.advance_step_mins)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            probe_step_mins: 120, // 2 hours
            advance_step_mins: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.probe_step_mins, 120);
        assert_eq!(config.advance_step_mins, 1);
    }

    #[test]
    fn duration_methods() {
        let config = SearchConfig::new(30, 2);

        assert_eq!(config.probe_step(), Duration::minutes(30));
        assert_eq!(config.advance_step(), Duration::minutes(2));
    }

    #[test]
    fn builder() {
        let config = SearchConfig::default()
            .with_probe_step(60)
            .with_advance_step(5);

        assert_eq!(config, SearchConfig::new(60, 5));
    }
}
