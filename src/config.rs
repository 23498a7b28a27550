//! Knobs shared by both solving strategies.

/// Search settings for [`backtracking_solve_with`] and
/// [`exact_cover_solve_with`].
///
/// [`backtracking_solve_with`]: crate::backtracking_solve_with
/// [`exact_cover_solve_with`]: crate::exact_cover_solve_with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveConfig {
    /// Maximum number of search steps before giving up, or `None` to search
    /// until the space is exhausted.
    ///
    /// A step is one candidate placement tried by the backtracking search, or
    /// one matrix row tried by the dancing links search.
    pub step_limit: Option<u64>,
    /// Whether the backtracking search rejects partial boards containing an
    /// empty region whose size is not a multiple of the shape area.
    pub prune_dead_regions: bool,
}

impl SolveConfig {
    /// Return this config with the given step limit.
    pub fn with_step_limit(self, step_limit: u64) -> Self {
        Self {
            step_limit: Some(step_limit),
            ..self
        }
    }

    /// Return this config with dead region pruning disabled.
    pub fn without_pruning(self) -> Self {
        Self {
            prune_dead_regions: false,
            ..self
        }
    }

    /// Return true if `steps` has reached the configured limit.
    pub(crate) fn limit_reached(&self, steps: u64) -> bool {
        self.step_limit.is_some_and(|limit| steps >= limit)
    }
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            step_limit: None,
            prune_dead_regions: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded_and_pruned() {
        let config = SolveConfig::default();
        assert_eq!(config.step_limit, None);
        assert!(config.prune_dead_regions);
        assert!(!config.limit_reached(u64::MAX));
    }

    #[test]
    fn builders_compose() {
        let config = SolveConfig::default().with_step_limit(10).without_pruning();
        assert_eq!(config.step_limit, Some(10));
        assert!(!config.prune_dead_regions);
        assert!(!config.limit_reached(9));
        assert!(config.limit_reached(10));
    }
}
