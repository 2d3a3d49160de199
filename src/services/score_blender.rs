//! Fixed-weight combination of heuristic and semantic scores.

/// Weight of the heuristic score, in tenths.
pub const HEURISTIC_WEIGHT: u32 = 4;
/// Weight of the semantic score, in tenths.
pub const SEMANTIC_WEIGHT: u32 = 6;

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreBlender;

impl ScoreBlender {
    pub const fn new() -> Self {
        Self
    }

    /// `floor(0.4 * heuristic + 0.6 * semantic)`, computed in integers.
    ///
    /// Inputs above 100 are clamped first.
    pub fn blend(&self, heuristic: u8, semantic: u8) -> u8 {
        let h = u32::from(heuristic.min(100));
        let s = u32::from(semantic.min(100));
        let blended = (HEURISTIC_WEIGHT * h + SEMANTIC_WEIGHT * s) / 10;
        u8::try_from(blended).unwrap_or(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_examples() {
        let blender = ScoreBlender::new();
        assert_eq!(blender.blend(90, 60), 72);
        assert_eq!(blender.blend(100, 100), 100);
        assert_eq!(blender.blend(0, 0), 0);
        // 0.4 * 71 + 0.6 * 80 = 76.4
        assert_eq!(blender.blend(71, 80), 76);
        // 0.4 * 1 + 0.6 * 1 = 1.0 exactly; floating point would give 0.99...
        assert_eq!(blender.blend(1, 1), 1);
    }

    #[test]
    fn test_blend_clamps_inputs() {
        assert_eq!(ScoreBlender::new().blend(250, 250), 100);
    }
}
