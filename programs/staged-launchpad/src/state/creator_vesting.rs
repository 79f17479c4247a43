use anchor_lang::prelude::*;

use crate::errors::LaunchpadError;

/// Creator allocation released by a cliff lock followed by a linear unlock.
///
/// The schedule stays dormant until `start` is called on the transition into thriving.
#[derive(Debug, Clone, Copy, Default, AnchorSerialize, AnchorDeserialize, PartialEq, Eq)]
pub struct CreatorVesting {
    /// Tokens reserved for the creator
    pub allocation: u64,

    /// Lock duration after vesting starts (in seconds)
    pub lock_duration: i64,

    /// Linear unlock duration after the lock ends (in seconds)
    pub linear_unlock_duration: i64,

    /// Vesting start, 0 until the launch thrives
    pub unlock_start_time: i64,

    /// Tokens already claimed
    pub claimed: u64,
}

impl CreatorVesting {
    pub const SIZE: usize = 8 + 8 + 8 + 8 + 8;

    pub fn is_started(&self) -> bool {
        self.unlock_start_time != 0
    }

    /// Start the schedule; fails if it already started
    pub fn start(&mut self, current_time: i64) -> Result<()> {
        require!(!self.is_started(), LaunchpadError::VestingAlreadyStarted);
        self.unlock_start_time = current_time;
        Ok(())
    }

    fn lock_end_time(&self) -> Result<i64> {
        self.unlock_start_time
            .checked_add(self.lock_duration)
            .ok_or(error!(LaunchpadError::MathOverflow))
    }

    /// Cumulative unlocked amount at `current_time`
    fn total_unlocked(&self, current_time: i64) -> Result<u64> {
        if !self.is_started() {
            return Ok(0);
        }

        let lock_end_time = self.lock_end_time()?;
        if current_time < lock_end_time {
            return Ok(0);
        }

        if self.linear_unlock_duration == 0 {
            return Ok(self.allocation);
        }

        let unlock_end_time = lock_end_time
            .checked_add(self.linear_unlock_duration)
            .ok_or(LaunchpadError::MathOverflow)?;
        if current_time >= unlock_end_time {
            return Ok(self.allocation);
        }

        // Multiply first then divide to maintain precision
        let elapsed = (current_time - lock_end_time) as u128;
        let unlocked = elapsed
            .checked_mul(self.allocation as u128)
            .ok_or(LaunchpadError::MathOverflow)?
            / self.linear_unlock_duration as u128;

        Ok(unlocked.min(self.allocation as u128) as u64)
    }

    /// New claimable amount, excluding what was already claimed
    pub fn claimable(&self, current_time: i64) -> Result<u64> {
        Ok(self.total_unlocked(current_time)?.saturating_sub(self.claimed))
    }

    /// Allocation not yet claimed
    pub fn remaining(&self) -> u64 {
        self.allocation.saturating_sub(self.claimed)
    }

    pub fn is_locked(&self, current_time: i64) -> Result<bool> {
        if !self.is_started() {
            return Ok(true);
        }
        Ok(current_time < self.lock_end_time()?)
    }

    /// Book everything claimable now and return it
    pub fn claim(&mut self, current_time: i64) -> Result<u64> {
        require!(!self.is_locked(current_time)?, LaunchpadError::TokensLocked);

        let amount = self.claimable(current_time)?;
        require!(amount > 0, LaunchpadError::NothingToClaim);

        self.claimed = self.claimed
            .checked_add(amount)
            .ok_or(LaunchpadError::MathOverflow)?;

        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vesting() -> CreatorVesting {
        CreatorVesting {
            allocation: 1_000,
            lock_duration: 100,
            linear_unlock_duration: 1_000,
            ..CreatorVesting::default()
        }
    }

    #[test]
    fn test_nothing_before_start() {
        let schedule = vesting();
        assert_eq!(schedule.claimable(1_000_000).unwrap(), 0);
        assert!(schedule.is_locked(1_000_000).unwrap());
    }

    #[test]
    fn test_starts_once() {
        let mut schedule = vesting();
        schedule.start(500).unwrap();
        assert!(schedule.start(600).is_err());
        assert_eq!(schedule.unlock_start_time, 500);
    }

    #[test]
    fn test_linear_unlock_after_lock() {
        let mut schedule = vesting();
        schedule.start(1_000).unwrap();

        assert_eq!(schedule.claimable(1_099).unwrap(), 0);
        assert!(schedule.is_locked(1_099).unwrap());
        assert_eq!(schedule.claimable(1_100).unwrap(), 0);
        assert_eq!(schedule.claimable(1_600).unwrap(), 500);
        assert_eq!(schedule.claimable(2_100).unwrap(), 1_000);
        assert_eq!(schedule.claimable(9_999).unwrap(), 1_000);
    }

    #[test]
    fn test_claim_rejected_while_locked() {
        let mut schedule = vesting();
        assert!(schedule.claim(1_000_000).is_err());

        schedule.start(1_000).unwrap();
        assert!(schedule.claim(1_099).is_err());
        assert_eq!(schedule.claimed, 0);
        assert!(!schedule.is_locked(1_100).unwrap());
        assert_eq!(schedule.claim(1_200).unwrap(), 100);
    }

    #[test]
    fn test_claims_accumulate() {
        let mut schedule = vesting();
        schedule.start(1_000).unwrap();

        assert_eq!(schedule.claim(1_350).unwrap(), 250);
        assert!(schedule.claim(1_350).is_err());
        assert_eq!(schedule.claim(5_000).unwrap(), 750);
        assert_eq!(schedule.remaining(), 0);
    }

    #[test]
    fn test_zero_linear_duration_unlocks_at_lock_end() {
        let mut schedule = vesting();
        schedule.linear_unlock_duration = 0;
        schedule.start(10).unwrap();
        assert_eq!(schedule.claimable(109).unwrap(), 0);
        assert_eq!(schedule.claimable(110).unwrap(), 1_000);
    }
}
