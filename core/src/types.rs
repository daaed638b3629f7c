use serde::{Deserialize, Serialize};

/// One-based level number.
pub type Level = u32;

/// Length of one side of the square grid.
pub type Side = u8;

/// Count type used for tile and pair counts.
pub type TileCount = u16;

/// Largest even side whose area still fits in [`TileCount`].
pub const MAX_SIDE: Side = 254;

/// Levels played on one grid size before it grows, unless configured otherwise.
pub const DEFAULT_LEVELS_PER_STEP: Level = 3;

pub const fn area(side: Side) -> TileCount {
    let side = side as TileCount;
    side.saturating_mul(side)
}

/// Round `side` down to an even side within `2..=MAX_SIDE`, the only shapes that hold a whole number of pairs.
pub const fn even_side(side: Side) -> Side {
    let side = if side < 2 {
        2
    } else if side > MAX_SIDE {
        MAX_SIDE
    } else {
        side
    };
    side & !1
}

/// Maps a level number to the side of its square grid.
///
/// Implementations must be monotonic and only ever return even sides of at least 2, so that every level has a whole
/// number of pairs. Closures are passed through [`even_side`], and [`crate::RulesEngine`] does the same for any
/// other implementation.
pub trait LevelSchedule {
    fn side(&self, level: Level) -> Side;

    fn pairs(&self, level: Level) -> TileCount {
        area(self.side(level)) / 2
    }

    /// Highest level whose pair count stays within `capacity`, `None` if even level 1 needs more.
    fn max_supported_level(&self, capacity: usize) -> Option<Level> {
        if usize::from(self.pairs(1)) > capacity {
            return None;
        }
        // side only grows, so find the last level before the first one that exceeds capacity
        let (mut low, mut high) = (1, Level::MAX);
        while low < high {
            let mid = low + (high - low).div_ceil(2);
            if usize::from(self.pairs(mid)) <= capacity {
                low = mid;
            } else {
                high = mid - 1;
            }
        }
        Some(low)
    }
}

impl<F> LevelSchedule for F
where
    F: Fn(Level) -> Side,
{
    fn side(&self, level: Level) -> Side {
        even_side(self(level))
    }
}

/// Grid grows by two every `levels_per_step` levels: `side = 2 + 2 * ((level - 1) / levels_per_step)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSchedule {
    levels_per_step: Level,
}

impl StepSchedule {
    pub fn new(levels_per_step: Level) -> Self {
        Self {
            levels_per_step: levels_per_step.max(1),
        }
    }

    pub const fn levels_per_step(&self) -> Level {
        self.levels_per_step
    }
}

impl Default for StepSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_LEVELS_PER_STEP)
    }
}

impl LevelSchedule for StepSchedule {
    fn side(&self, level: Level) -> Side {
        let steps = (level.max(1) - 1) / self.levels_per_step;
        let side = 2u32.saturating_add(steps.saturating_mul(2));
        side.min(MAX_SIDE.into()) as Side
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_step_grows_every_three_levels() {
        let schedule = StepSchedule::default();

        let sides: [Side; 10] = core::array::from_fn(|i| schedule.side(i as Level + 1));

        assert_eq!(sides, [2, 2, 2, 4, 4, 4, 6, 6, 6, 8]);
        assert_eq!(schedule.pairs(1), 2);
        assert_eq!(schedule.pairs(4), 8);
        assert_eq!(schedule.pairs(7), 18);
    }

    #[test]
    fn level_zero_is_treated_as_level_one() {
        let schedule = StepSchedule::default();
        assert_eq!(schedule.side(0), 2);
    }

    #[test]
    fn step_of_zero_is_clamped_to_one() {
        let schedule = StepSchedule::new(0);
        assert_eq!(schedule.levels_per_step(), 1);
        assert_eq!(schedule.side(2), 4);
    }

    #[test]
    fn side_saturates_at_max_even_side() {
        let schedule = StepSchedule::new(1);
        assert_eq!(schedule.side(Level::MAX), MAX_SIDE);
        assert_eq!(schedule.pairs(Level::MAX), area(MAX_SIDE) / 2);
    }

    #[test]
    fn max_supported_level_follows_capacity() {
        let schedule = StepSchedule::default();

        assert_eq!(schedule.max_supported_level(1), None);
        assert_eq!(schedule.max_supported_level(2), Some(3));
        assert_eq!(schedule.max_supported_level(47), Some(12));
    }

    #[test]
    fn odd_or_out_of_range_sides_round_to_even() {
        assert_eq!(even_side(0), 2);
        assert_eq!(even_side(1), 2);
        assert_eq!(even_side(3), 2);
        assert_eq!(even_side(7), 6);
        assert_eq!(even_side(255), MAX_SIDE);

        let odd = |_level: Level| -> Side { 3 };
        assert_eq!(odd.side(1), 2);
        assert_eq!(odd.pairs(1), 2);
    }

    #[test]
    fn closures_act_as_schedules() {
        let fixed = |_level: Level| -> Side { 4 };
        assert_eq!(fixed.pairs(9), 8);
    }
}
