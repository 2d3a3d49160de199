//! Quality gate deciding whether another refinement pass runs.

/// Minimum blended score that ends the loop.
pub const SCORE_THRESHOLD: u8 = 75;
/// Maximum number of refinement passes per run.
pub const MAX_REFINEMENTS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefinementPolicy {
    threshold: u8,
    max_refinements: u32,
}

impl Default for RefinementPolicy {
    fn default() -> Self {
        Self {
            threshold: SCORE_THRESHOLD,
            max_refinements: MAX_REFINEMENTS,
        }
    }
}

impl RefinementPolicy {
    pub const fn threshold(&self) -> u8 {
        self.threshold
    }

    pub const fn max_refinements(&self) -> u32 {
        self.max_refinements
    }

    /// True iff the score is below the threshold and refinements remain.
    pub const fn should_refine(&self, score: u8, iteration: u32) -> bool {
        score < self.threshold && iteration < self.max_refinements
    }

    /// Upper bound on generator calls in one run (first draft plus refinements).
    pub const fn max_generations(&self) -> u32 {
        1 + self.max_refinements
    }
}
