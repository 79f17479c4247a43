use anchor_lang::prelude::*;

use crate::errors::LaunchpadError;

/// Amount must be a positive multiple of the contribution unit
pub fn require_unit_multiple(amount: u64, unit: u64) -> Result<()> {
    require!(unit > 0, LaunchpadError::DivisionByZero);
    require!(
        amount > 0 && amount % unit == 0,
        LaunchpadError::InvalidContributionUnit
    );
    Ok(())
}

/// Recipient and collaborator addresses must be set
pub fn require_non_zero_address(address: &Pubkey) -> Result<()> {
    require!(*address != Pubkey::default(), LaunchpadError::ZeroAddress);
    Ok(())
}
