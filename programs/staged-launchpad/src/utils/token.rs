use anchor_lang::prelude::*;

use crate::constants::PPM_DENOMINATOR;
use crate::errors::LaunchpadError;

/// amount * ppm / 1_000_000, rounded down
pub fn apply_ppm(amount: u64, ppm: u32) -> Result<u64> {
    let value = (amount as u128)
        .checked_mul(ppm as u128)
        .ok_or(LaunchpadError::MathOverflow)?
        .checked_div(PPM_DENOMINATOR as u128)
        .ok_or(LaunchpadError::DivisionByZero)?;

    u64::try_from(value).map_err(|_| error!(LaunchpadError::TypeCastFailed))
}

/// Allocation shares of the total supply, in ppm
#[derive(Debug, Clone, Copy, AnchorSerialize, AnchorDeserialize, PartialEq, Eq)]
pub struct AllocationShares {
    pub seeding_ppm: u32,
    pub acceleration_ppm: u32,
    pub liquidity_ppm: u32,
    pub creator_ppm: u32,
}

/// Token amounts carved out of the total supply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenAllocations {
    pub seeding: u64,
    pub acceleration: u64,
    pub liquidity: u64,
    pub creator: u64,
    /// Left in the vault to pay service fees
    pub service_reserve: u64,
}

/// Calculate token allocations
pub fn calculate_token_allocations(
    total_supply: u64,
    shares: &AllocationShares,
) -> Result<TokenAllocations> {
    let share_total = shares.seeding_ppm as u64
        + shares.acceleration_ppm as u64
        + shares.liquidity_ppm as u64
        + shares.creator_ppm as u64;

    require!(
        share_total <= PPM_DENOMINATOR,
        LaunchpadError::InvalidTokenAllocation
    );

    let seeding = apply_ppm(total_supply, shares.seeding_ppm)?;
    let acceleration = apply_ppm(total_supply, shares.acceleration_ppm)?;
    let liquidity = apply_ppm(total_supply, shares.liquidity_ppm)?;
    let creator = apply_ppm(total_supply, shares.creator_ppm)?;

    let carved = seeding
        .checked_add(acceleration)
        .ok_or(LaunchpadError::MathOverflow)?
        .checked_add(liquidity)
        .ok_or(LaunchpadError::MathOverflow)?
        .checked_add(creator)
        .ok_or(LaunchpadError::MathOverflow)?;

    let service_reserve = total_supply
        .checked_sub(carved)
        .ok_or(LaunchpadError::InvalidTokenAllocation)?;

    Ok(TokenAllocations {
        seeding,
        acceleration,
        liquidity,
        creator,
        service_reserve,
    })
}
