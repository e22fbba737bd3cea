//! Scoring module - line-clear points, levels and round length
//!
//! A clear is worth `lines x blocks x 10 x multiplier`. The multiplier grows
//! by one for every consecutive round that clears at least one line and drops
//! back to 1 otherwise. Levels are whole thousands of score.

use crate::types::{
    GameMode, BASE_ROUND_DELAY_MS, BLOCK_POINTS, BONUS_LIFE_MULTIPLIER, MIN_ROUND_DELAY_MS,
    POINTS_PER_LEVEL, ROUND_DELAY_STEP_MS,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResult {
    /// Points to add to the score
    pub delta: u32,
    /// Multiplier to carry into the next round
    pub multiplier: u32,
    /// Whether this clear awards an extra life
    pub bonus_life: bool,
}

/// Score a placement that cleared `lines` full lines made of `blocks`
/// distinct cells, at the current `multiplier`
pub fn calculate_score(lines: u32, blocks: u32, multiplier: u32, mode: GameMode) -> ScoreResult {
    if lines == 0 {
        return ScoreResult {
            delta: 0,
            multiplier: 1,
            bonus_life: false,
        };
    }

    let delta = lines
        .saturating_mul(blocks)
        .saturating_mul(BLOCK_POINTS)
        .saturating_mul(multiplier);
    let next_multiplier = multiplier.saturating_add(1);

    ScoreResult {
        delta,
        multiplier: next_multiplier,
        bonus_life: mode.is_special() && next_multiplier == BONUS_LIFE_MULTIPLIER,
    }
}

/// Level management
/// Level increases every 1000 points
pub fn calculate_level(score: u32) -> u32 {
    score / POINTS_PER_LEVEL
}

/// Round length for a level, in milliseconds
pub fn round_delay_ms(level: u32) -> u32 {
    BASE_ROUND_DELAY_MS
        .saturating_sub(ROUND_DELAY_STEP_MS.saturating_mul(level))
        .max(MIN_ROUND_DELAY_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_lines_resets_multiplier() {
        let result = calculate_score(0, 0, 5, GameMode::Classic);
        assert_eq!(result.delta, 0);
        assert_eq!(result.multiplier, 1);
        assert!(!result.bonus_life);
    }

    #[test]
    fn test_single_row_on_five_wide_board() {
        let result = calculate_score(1, 5, 1, GameMode::Classic);
        assert_eq!(result.delta, 50);
        assert_eq!(result.multiplier, 2);
    }

    #[test]
    fn test_cross_clear_with_multiplier() {
        // A row and a column sharing one cell: 2 lines, 9 blocks
        let result = calculate_score(2, 9, 3, GameMode::Classic);
        assert_eq!(result.delta, 2 * 9 * 10 * 3);
        assert_eq!(result.multiplier, 4);
        assert!(!result.bonus_life);
    }

    #[test]
    fn test_bonus_life_only_in_special_mode_at_four() {
        assert!(calculate_score(1, 5, 3, GameMode::Special).bonus_life);
        assert!(!calculate_score(1, 5, 2, GameMode::Special).bonus_life);
        assert!(!calculate_score(1, 5, 4, GameMode::Special).bonus_life);
        assert!(!calculate_score(1, 5, 3, GameMode::Classic).bonus_life);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 0);
        assert_eq!(calculate_level(999), 0);
        assert_eq!(calculate_level(1000), 1);
        assert_eq!(calculate_level(2999), 2);
        assert_eq!(calculate_level(19_000), 19);
    }

    #[test]
    fn test_round_delays() {
        assert_eq!(round_delay_ms(0), 12_000);
        assert_eq!(round_delay_ms(1), 11_500);
        assert_eq!(round_delay_ms(5), 9_500);
        assert_eq!(round_delay_ms(18), 3_000);
        assert_eq!(round_delay_ms(19), 2_500);
        assert_eq!(round_delay_ms(20), 2_500);
        assert_eq!(round_delay_ms(u32::MAX), 2_500);
    }

    #[test]
    fn test_score_saturates() {
        let result = calculate_score(u32::MAX, 2, 2, GameMode::Classic);
        assert_eq!(result.delta, u32::MAX);
    }
}
