//! Reputation progress across the three progression systems.
//!
//! A faction reports at most one base system (classic standing or renown)
//! and may additionally report paragon progress once the base bar is done.

use serde::{Deserialize, Serialize};

/// Highest classic standing (Exalted).
pub const MAX_STANDING: u8 = 8;

/// Classic standing names, indexed by `standing - 1`.
const STANDING_NAMES: [&str; 8] = [
    "Hated",
    "Hostile",
    "Unfriendly",
    "Neutral",
    "Friendly",
    "Honored",
    "Revered",
    "Exalted",
];

/// Classic Hated..Exalted standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1 (Hated) through 8 (Exalted)
    pub standing: u8,
    /// Progress within the current standing
    pub current: u64,
    /// Size of the current standing's bar
    pub max: u64,
}

impl Standing {
    pub fn name(&self) -> &'static str {
        let idx = usize::from(self.standing.clamp(1, MAX_STANDING)) - 1;
        STANDING_NAMES[idx]
    }
}

/// Renown levels used by major factions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Renown {
    pub level: u32,
    pub max_level: u32,
    pub current: u64,
    pub max: u64,
}

/// Paragon overflow progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragon {
    /// Total paragon value earned
    pub value: u64,
    /// Value per paragon cache
    pub threshold: u64,
    /// A paragon reward is waiting to be collected
    #[serde(default)]
    pub reward_pending: bool,
}

impl Paragon {
    /// Progress towards the next cache.
    pub const fn cycle_progress(&self) -> u64 {
        if self.threshold == 0 {
            0
        } else {
            self.value % self.threshold
        }
    }
}

/// Progress data attached to a reputation entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReputationProgress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standing: Option<Standing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renown: Option<Renown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragon: Option<Paragon>,
}

impl ReputationProgress {
    /// Whether the base bar (standing or renown) is complete.
    ///
    /// Each system decides this on its own terms: any paragon data means the
    /// base bar is done; renown is done at its max level; classic standing is
    /// done at Exalted. These rules are kept separate rather than collapsed
    /// into a single progress-fraction check.
    pub fn is_base_maxed(&self) -> bool {
        if self.paragon.is_some() {
            return true;
        }
        if let Some(renown) = self.renown {
            return renown.level >= renown.max_level;
        }
        self.standing
            .is_some_and(|standing| standing.standing >= MAX_STANDING)
    }

    /// Fraction of the bar to draw, in `0.0..=1.0`.
    ///
    /// Once the base bar is maxed this reports paragon cycle progress if
    /// there is any, otherwise a full bar.
    pub fn progress_fraction(&self) -> f64 {
        if self.is_base_maxed() {
            return self.paragon.map_or(1.0, |p| {
                ratio(p.cycle_progress(), p.threshold)
            });
        }
        if let Some(renown) = self.renown {
            return ratio(renown.current, renown.max);
        }
        self.standing.map_or(0.0, |s| ratio(s.current, s.max))
    }

    /// Short text for the row: `Revered 1200/21000`, `Renown 14`, `Paragon 3200/10000`.
    pub fn progress_label(&self) -> String {
        if let Some(paragon) = self.paragon {
            let mut label = format!(
                "Paragon {}/{}",
                paragon.cycle_progress(),
                paragon.threshold
            );
            if paragon.reward_pending {
                label.push_str(" (reward)");
            }
            return label;
        }
        if let Some(renown) = self.renown {
            if renown.level >= renown.max_level {
                return format!("Renown {} (max)", renown.level);
            }
            return format!("Renown {} {}/{}", renown.level, renown.current, renown.max);
        }
        match self.standing {
            Some(s) if s.standing >= MAX_STANDING => s.name().to_string(),
            Some(s) => format!("{} {}/{}", s.name(), s.current, s.max),
            None => "Unknown".to_string(),
        }
    }
}

fn ratio(current: u64, max: u64) -> f64 {
    if max == 0 {
        0.0
    } else {
        (current as f64 / max as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing(level: u8, current: u64, max: u64) -> ReputationProgress {
        ReputationProgress {
            standing: Some(Standing {
                standing: level,
                current,
                max,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_classic_standing_maxed_only_at_exalted() {
        assert!(!standing(7, 20_999, 21_000).is_base_maxed());
        assert!(standing(8, 0, 999).is_base_maxed());
    }

    #[test]
    fn test_renown_maxed_at_max_level() {
        let mut progress = ReputationProgress {
            renown: Some(Renown {
                level: 19,
                max_level: 20,
                current: 2_400,
                max: 2_500,
            }),
            ..Default::default()
        };
        assert!(!progress.is_base_maxed());

        progress.renown = progress.renown.map(|r| Renown { level: 20, ..r });
        assert!(progress.is_base_maxed());
    }

    #[test]
    fn test_paragon_implies_maxed_regardless_of_base() {
        let mut progress = standing(5, 10, 100);
        progress.paragon = Some(Paragon {
            value: 12_500,
            threshold: 10_000,
            reward_pending: true,
        });

        assert!(progress.is_base_maxed());
        assert!((progress.progress_fraction() - 0.25).abs() < f64::EPSILON);
        assert_eq!(progress.progress_label(), "Paragon 2500/10000 (reward)");
    }

    #[test]
    fn test_progress_labels() {
        assert_eq!(standing(7, 1200, 21000).progress_label(), "Revered 1200/21000");
        assert_eq!(standing(8, 0, 0).progress_label(), "Exalted");
        assert_eq!(ReputationProgress::default().progress_label(), "Unknown");
    }

    #[test]
    fn test_progress_fraction_handles_zero_max() {
        assert!(standing(4, 10, 0).progress_fraction().abs() < f64::EPSILON);
        assert!((standing(8, 0, 0).progress_fraction() - 1.0).abs() < f64::EPSILON);
    }
}
