use anchor_lang::prelude::*;

use crate::errors::LaunchpadError;
use crate::state::LaunchConfig;

#[derive(Debug, Clone, Copy, AnchorSerialize, AnchorDeserialize, PartialEq, Eq)]
pub enum Stage {
    Genesis,           // Created, waiting for the first use
    GenesisSucceeded,  // Announcement window before seeding
    Seeding,           // Fixed-price fundraising
    SeedingSucceeded,  // Announcement window before acceleration
    Acceleration,      // Virtual constant-product fundraising
    Thriving,          // Terminal success
    Failed,            // Terminal failure
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Genesis
    }
}

impl Stage {
    pub const COUNT: usize = 7;

    pub const ALL: [Stage; Stage::COUNT] = [
        Stage::Genesis,
        Stage::GenesisSucceeded,
        Stage::Seeding,
        Stage::SeedingSucceeded,
        Stage::Acceleration,
        Stage::Thriving,
        Stage::Failed,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Candidate stages once this stage's window has ended, in priority order.
    /// The first one with a scheduled window wins.
    pub fn successors(self) -> &'static [Stage] {
        match self {
            Stage::Genesis => &[Stage::GenesisSucceeded],
            Stage::GenesisSucceeded => &[Stage::Seeding],
            Stage::Seeding => &[Stage::SeedingSucceeded, Stage::Failed],
            Stage::SeedingSucceeded => &[Stage::Acceleration],
            Stage::Acceleration => &[Stage::Thriving, Stage::Failed],
            Stage::Thriving | Stage::Failed => &[],
        }
    }

    pub fn is_investable(self) -> bool {
        matches!(self, Stage::Seeding | Stage::Acceleration)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Thriving | Stage::Failed)
    }
}

/// `[start, end)` window of a stage. `end == 0` is open-ended, `start == 0` is unreachable.
#[derive(Debug, Clone, Copy, Default, AnchorSerialize, AnchorDeserialize, PartialEq, Eq)]
pub struct StageWindow {
    pub start: i64,
    pub end: i64,
}

impl StageWindow {
    pub const SIZE: usize = 8 + 8;

    pub fn is_scheduled(&self) -> bool {
        self.start != 0
    }

    pub fn contains(&self, now: i64) -> bool {
        self.start != 0 && self.start <= now && (self.end == 0 || now < self.end)
    }

    pub fn has_ended(&self, now: i64) -> bool {
        self.start != 0 && self.end != 0 && now >= self.end
    }
}

/// Stage windows plus the last stage entered explicitly (by launch or by a goal).
///
/// Windows of later stages are fixed when the preceding stage resolves and are never
/// recomputed; the only later edit is clearing the failure window once the pool thrives.
#[derive(Debug, Clone, Copy, Default, AnchorSerialize, AnchorDeserialize, PartialEq, Eq)]
pub struct StageSchedule {
    pub entered: Stage,
    pub windows: [StageWindow; Stage::COUNT],
}

impl StageSchedule {
    pub const SIZE: usize = 1 + StageWindow::SIZE * Stage::COUNT;

    pub fn new(start_time: i64) -> Self {
        let mut schedule = Self::default();
        schedule.windows[Stage::Genesis.index()] = StageWindow {
            start: start_time,
            end: 0,
        };
        schedule
    }

    pub fn window(&self, stage: Stage) -> StageWindow {
        self.windows[stage.index()]
    }

    /// Resolve the stage active at `now`.
    ///
    /// Walks the transition table from genesis, leaving a stage only once its window
    /// has ended. Returns `(Genesis, 0, 0)` before launch.
    pub fn resolve(&self, now: i64) -> (Stage, i64, i64) {
        let mut stage = Stage::Genesis;
        loop {
            let window = self.window(stage);
            if window.contains(now) {
                return (stage, window.start, window.end);
            }
            if !window.has_ended(now) {
                return (Stage::Genesis, 0, 0);
            }
            let next = stage
                .successors()
                .iter()
                .copied()
                .find(|next| self.window(*next).is_scheduled());
            match next {
                Some(next) => stage = next,
                None => return (Stage::Genesis, 0, 0),
            }
        }
    }

    /// Close genesis at `now` and lay out the announcement, seeding and default failure windows.
    pub fn schedule_after_genesis(&mut self, now: i64, config: &LaunchConfig) -> Result<()> {
        require!(
            self.entered == Stage::Genesis,
            LaunchpadError::AlreadyScheduled
        );

        let announcement_end = offset(now, config.genesis_succeeded_duration)?;
        let seeding_end = offset(announcement_end, config.seeding_duration)?;

        self.windows[Stage::Genesis.index()].end = now;
        self.windows[Stage::GenesisSucceeded.index()] = StageWindow {
            start: now,
            end: announcement_end,
        };
        self.windows[Stage::Seeding.index()] = StageWindow {
            start: announcement_end,
            end: seeding_end,
        };
        self.windows[Stage::Failed.index()] = StageWindow {
            start: seeding_end,
            end: 0,
        };
        self.entered = Stage::GenesisSucceeded;

        Ok(())
    }

    /// Close seeding at `now` and lay out the announcement, acceleration and rescheduled failure windows.
    pub fn schedule_after_seeding(&mut self, now: i64, config: &LaunchConfig) -> Result<()> {
        let announcement_end = offset(now, config.seeding_succeeded_duration)?;
        let acceleration_end = offset(announcement_end, config.acceleration_duration)?;

        self.windows[Stage::Seeding.index()].end = now;
        self.windows[Stage::SeedingSucceeded.index()] = StageWindow {
            start: now,
            end: announcement_end,
        };
        self.windows[Stage::Acceleration.index()] = StageWindow {
            start: announcement_end,
            end: acceleration_end,
        };
        self.windows[Stage::Failed.index()] = StageWindow {
            start: acceleration_end,
            end: 0,
        };
        self.entered = Stage::SeedingSucceeded;

        Ok(())
    }

    /// Close acceleration at `now`, open thriving and make failure unreachable.
    pub fn open_thriving(&mut self, now: i64) {
        self.windows[Stage::Acceleration.index()].end = now;
        self.windows[Stage::Thriving.index()] = StageWindow { start: now, end: 0 };
        self.windows[Stage::Failed.index()].start = 0;
        self.entered = Stage::Thriving;
    }
}

fn offset(from: i64, duration: i64) -> Result<i64> {
    from.checked_add(duration)
        .ok_or(error!(LaunchpadError::MathOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LaunchConfig {
        LaunchConfig {
            genesis_succeeded_duration: 100,
            seeding_duration: 1_000,
            seeding_succeeded_duration: 50,
            acceleration_duration: 2_000,
            ..LaunchConfig::default()
        }
    }

    /// First window in enum order containing `now`.
    fn scan(schedule: &StageSchedule, now: i64) -> (Stage, i64, i64) {
        Stage::ALL
            .iter()
            .map(|stage| (*stage, schedule.window(*stage)))
            .find(|(_, window)| window.contains(now))
            .map(|(stage, window)| (stage, window.start, window.end))
            .unwrap_or((Stage::Genesis, 0, 0))
    }

    fn assert_matches_scan(schedule: &StageSchedule, from: i64, to: i64) {
        for now in from..to {
            assert_eq!(schedule.resolve(now), scan(schedule, now), "at {}", now);
        }
    }

    #[test]
    fn test_pre_launch_sentinel() {
        let schedule = StageSchedule::new(1_000);
        assert_eq!(schedule.resolve(999), (Stage::Genesis, 0, 0));
        assert_eq!(schedule.resolve(1_000), (Stage::Genesis, 1_000, 0));
        assert_eq!(schedule.resolve(50_000), (Stage::Genesis, 1_000, 0));
    }

    #[test]
    fn test_schedule_after_genesis_lays_out_windows() {
        let mut schedule = StageSchedule::new(1_000);
        schedule.schedule_after_genesis(1_500, &config()).unwrap();

        assert_eq!(schedule.resolve(1_500), (Stage::GenesisSucceeded, 1_500, 1_600));
        assert_eq!(schedule.resolve(1_600), (Stage::Seeding, 1_600, 2_600));
        assert_eq!(schedule.resolve(2_599), (Stage::Seeding, 1_600, 2_600));
        assert_eq!(schedule.resolve(2_600), (Stage::Failed, 2_600, 0));
        assert_eq!(schedule.resolve(1_000_000), (Stage::Failed, 2_600, 0));
        assert_matches_scan(&schedule, 0, 3_000);
    }

    #[test]
    fn test_genesis_schedules_once() {
        let mut schedule = StageSchedule::new(1_000);
        schedule.schedule_after_genesis(1_500, &config()).unwrap();
        assert!(schedule.schedule_after_genesis(1_501, &config()).is_err());
    }

    #[test]
    fn test_seeding_goal_reschedules_failure() {
        let mut schedule = StageSchedule::new(1_000);
        schedule.schedule_after_genesis(1_000, &config()).unwrap();
        schedule.schedule_after_seeding(1_700, &config()).unwrap();

        assert_eq!(schedule.resolve(1_700), (Stage::SeedingSucceeded, 1_700, 1_750));
        assert_eq!(schedule.resolve(1_750), (Stage::Acceleration, 1_750, 3_750));
        // the old failure start (2_100) no longer applies
        assert_eq!(schedule.resolve(2_100), (Stage::Acceleration, 1_750, 3_750));
        assert_eq!(schedule.resolve(3_750), (Stage::Failed, 3_750, 0));
        assert_matches_scan(&schedule, 0, 4_500);
    }

    #[test]
    fn test_thriving_is_absorbing() {
        let mut schedule = StageSchedule::new(1_000);
        schedule.schedule_after_genesis(1_000, &config()).unwrap();
        schedule.schedule_after_seeding(1_700, &config()).unwrap();
        schedule.open_thriving(2_000);

        assert_eq!(schedule.window(Stage::Failed).start, 0);
        assert_eq!(schedule.resolve(2_000), (Stage::Thriving, 2_000, 0));
        assert_eq!(schedule.resolve(i64::MAX - 1), (Stage::Thriving, 2_000, 0));
        assert_matches_scan(&schedule, 0, 6_000);
    }

    #[test]
    fn test_zero_length_announcement_skips_to_next_window() {
        let mut cfg = config();
        cfg.genesis_succeeded_duration = 0;
        let mut schedule = StageSchedule::new(10);
        schedule.schedule_after_genesis(10, &cfg).unwrap();

        assert_eq!(schedule.resolve(10), (Stage::Seeding, 10, 1_010));
        assert_matches_scan(&schedule, 0, 1_100);
    }
}
