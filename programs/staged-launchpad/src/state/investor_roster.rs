use anchor_lang::prelude::*;

use crate::constants::MAX_ROSTER_SLICE_LEN;
use crate::errors::LaunchpadError;
use crate::state::Stage;

/// Append-only, de-duplicated investor lists of the investable stages.
///
/// Deduplication relies on the roster flags of each `Investment`; the account
/// grows by one key per first appearance.
#[account]
#[derive(Default)]
pub struct InvestorRoster {
    /// Associated launch pool
    pub pool: Pubkey,

    /// bump seed
    pub bump: u8,

    pub seeding: Vec<Pubkey>,

    pub acceleration: Vec<Pubkey>,
}

impl InvestorRoster {
    pub const BASE_SIZE: usize = 8 + // discriminator
        32 + // pool
        1 + // bump
        4 + // seeding length prefix
        4; // acceleration length prefix

    /// Space needed to hold the current lists
    pub fn required_space(&self) -> usize {
        Self::BASE_SIZE + 32 * (self.seeding.len() + self.acceleration.len())
    }

    pub fn investors(&self, stage: Stage) -> Result<&Vec<Pubkey>> {
        match stage {
            Stage::Seeding => Ok(&self.seeding),
            Stage::Acceleration => Ok(&self.acceleration),
            _ => err!(LaunchpadError::InvalidStage),
        }
    }

    pub fn push(&mut self, stage: Stage, investor: Pubkey) -> Result<()> {
        match stage {
            Stage::Seeding => self.seeding.push(investor),
            Stage::Acceleration => self.acceleration.push(investor),
            _ => return err!(LaunchpadError::InvalidStage),
        }
        Ok(())
    }

    /// Investors `[start, end]` inclusive of the stage roster, at most `MAX_ROSTER_SLICE_LEN` per call
    pub fn slice(&self, stage: Stage, start: u32, end: u32) -> Result<Vec<Pubkey>> {
        let investors = self.investors(stage)?;
        let (start, end) = (start as usize, end as usize);

        require!(
            end >= start && end < investors.len(),
            LaunchpadError::InvalidRosterRange
        );
        require!(
            end - start < MAX_ROSTER_SLICE_LEN,
            LaunchpadError::RosterSliceTooLarge
        );

        Ok(investors[start..=end].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_of(count: u8) -> InvestorRoster {
        let mut roster = InvestorRoster::default();
        for i in 0..count {
            roster.push(Stage::Seeding, Pubkey::new_from_array([i + 1; 32])).unwrap();
        }
        roster
    }

    #[test]
    fn test_slice_is_inclusive() {
        let roster = roster_of(4);
        let slice = roster.slice(Stage::Seeding, 1, 2).unwrap();
        assert_eq!(slice, vec![
            Pubkey::new_from_array([2; 32]),
            Pubkey::new_from_array([3; 32]),
        ]);
        assert_eq!(roster.slice(Stage::Seeding, 3, 3).unwrap().len(), 1);
    }

    #[test]
    fn test_slice_rejects_bad_ranges() {
        let roster = roster_of(4);
        assert!(roster.slice(Stage::Seeding, 2, 1).is_err());
        assert!(roster.slice(Stage::Seeding, 0, 4).is_err());
        assert!(roster.slice(Stage::Acceleration, 0, 0).is_err());
        assert!(roster.slice(Stage::Thriving, 0, 0).is_err());
    }

    #[test]
    fn test_slice_bounded_by_return_data() {
        let roster = roster_of(40);
        let last = (MAX_ROSTER_SLICE_LEN - 1) as u32;

        let page = roster.slice(Stage::Seeding, 0, last).unwrap();
        assert_eq!(page.len(), MAX_ROSTER_SLICE_LEN);
        assert!(4 + 32 * page.len() <= 1024);

        assert!(roster.slice(Stage::Seeding, 0, last + 1).is_err());
        assert!(roster.slice(Stage::Seeding, 0, 39).is_err());
        assert_eq!(roster.slice(Stage::Seeding, 9, 39).unwrap().len(), MAX_ROSTER_SLICE_LEN);
    }

    #[test]
    fn test_required_space_grows_per_investor() {
        let mut roster = roster_of(2);
        assert_eq!(roster.required_space(), InvestorRoster::BASE_SIZE + 64);
        roster.push(Stage::Acceleration, Pubkey::new_unique()).unwrap();
        assert_eq!(roster.required_space(), InvestorRoster::BASE_SIZE + 96);
        assert!(roster.push(Stage::Failed, Pubkey::new_unique()).is_err());
    }
}
