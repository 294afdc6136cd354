//! Score, streak and multiplier bookkeeping

use serde::{Deserialize, Serialize};

use crate::round_tenth;
use crate::settings::Tuning;

/// Running score totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub score: u64,
    /// Best score seen in this process; never decreases
    pub high_score: u64,
    /// Consecutive hits in the current multiplier window
    pub streak: u32,
    /// Always >= 1.0
    pub multiplier: f32,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            score: 0,
            high_score: 0,
            streak: 0,
            multiplier: 1.0,
        }
    }
}

impl Ledger {
    /// Apply one batch of hits and misses
    ///
    /// A miss drops the streak and multiplier back to their floor. Without a
    /// miss, a full streak window bumps the multiplier once and starts a new
    /// window.
    pub fn settle(self, hits: u32, misses: u32, tuning: &Tuning) -> Self {
        let score = self.score + u64::from(hits);
        let mut next = Self {
            score,
            high_score: self.high_score.max(score),
            streak: self.streak + hits,
            multiplier: self.multiplier,
        };

        if misses > 0 {
            next.streak = 0;
            next.multiplier = 1.0;
        } else if next.streak >= tuning.streak_window {
            next.multiplier = round_tenth(next.multiplier + tuning.multiplier_step);
            next.streak = 0;
            log::debug!("Multiplier up to x{}", next.multiplier);
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_raise_score_and_high_score() {
        let ledger = Ledger::default().settle(3, 0, &Tuning::default());
        assert_eq!(ledger.score, 3);
        assert_eq!(ledger.high_score, 3);
        assert_eq!(ledger.streak, 3);
        assert_eq!(ledger.multiplier, 1.0);
    }

    #[test]
    fn test_high_score_survives_lower_score() {
        let ledger = Ledger {
            score: 0,
            high_score: 50,
            ..Default::default()
        };
        let ledger = ledger.settle(2, 0, &Tuning::default());
        assert_eq!(ledger.score, 2);
        assert_eq!(ledger.high_score, 50);
    }

    #[test]
    fn test_tenth_hit_steps_multiplier_once() {
        let tuning = Tuning::default();
        let mut ledger = Ledger::default();
        for _ in 0..9 {
            ledger = ledger.settle(1, 0, &tuning);
        }
        assert_eq!(ledger.multiplier, 1.0);
        ledger = ledger.settle(1, 0, &tuning);
        assert_eq!(ledger.multiplier, 1.2);
        assert_eq!(ledger.streak, 0);
        ledger = ledger.settle(1, 0, &tuning);
        assert_eq!(ledger.multiplier, 1.2);
    }

    #[test]
    fn test_multiplier_rounds_to_tenths() {
        let tuning = Tuning::default();
        let mut ledger = Ledger::default();
        for _ in 0..5 {
            ledger = ledger.settle(10, 0, &tuning);
        }
        assert_eq!(ledger.multiplier, 2.0);
    }

    #[test]
    fn test_miss_resets_multiplier_and_streak() {
        let ledger = Ledger {
            score: 40,
            high_score: 40,
            streak: 7,
            multiplier: 2.6,
        };
        let ledger = ledger.settle(0, 1, &Tuning::default());
        assert_eq!(ledger.multiplier, 1.0);
        assert_eq!(ledger.streak, 0);
        assert_eq!(ledger.score, 40);
    }

    #[test]
    fn test_empty_batch_is_identity() {
        let ledger = Ledger {
            score: 5,
            high_score: 8,
            streak: 5,
            multiplier: 1.4,
        };
        assert_eq!(ledger.settle(0, 0, &Tuning::default()), ledger);
    }
}
