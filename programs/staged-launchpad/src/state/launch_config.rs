use anchor_lang::prelude::*;

use crate::constants::PPM_DENOMINATOR;
use crate::errors::LaunchpadError;
use crate::state::Stage;

/// Per-launch parameters, fixed when the launch pool is created.
#[derive(Debug, Clone, Copy, Default, AnchorSerialize, AnchorDeserialize, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Smallest contribution step; every contribution and goal is a multiple of it
    pub contribution_unit: u64,

    // ===== Goals =====
    pub seeding_goal: u64,
    pub acceleration_goal: u64,

    // ===== Allocations (tokens) =====
    pub seeding_allocation: u64,
    pub acceleration_allocation: u64,

    // ===== Per-investor caps =====
    pub seeding_max_per_investor: u64,
    pub acceleration_max_per_investor: u64,

    // ===== Acceleration curve =====
    pub virtual_quote: u64,
    pub virtual_token: u64,

    // ===== Liquidity seed =====
    pub liquidity_quote_amount: u64,
    pub liquidity_token_amount: u64,

    // ===== Durations (seconds) =====
    pub genesis_succeeded_duration: i64,
    pub seeding_duration: i64,
    pub seeding_succeeded_duration: i64,
    pub acceleration_duration: i64,

    // ===== Fees (ppm) =====
    pub seeding_refund_fee_ppm: u32,
    pub acceleration_refund_fee_ppm: u32,
    pub service_fee_ppm: u32,
    pub service_fee_period: i64,
}

impl LaunchConfig {
    pub const SIZE: usize = 8 + // contribution_unit
        8 + // seeding_goal
        8 + // acceleration_goal
        8 + // seeding_allocation
        8 + // acceleration_allocation
        8 + // seeding_max_per_investor
        8 + // acceleration_max_per_investor
        8 + // virtual_quote
        8 + // virtual_token
        8 + // liquidity_quote_amount
        8 + // liquidity_token_amount
        8 + // genesis_succeeded_duration
        8 + // seeding_duration
        8 + // seeding_succeeded_duration
        8 + // acceleration_duration
        4 + // seeding_refund_fee_ppm
        4 + // acceleration_refund_fee_ppm
        4 + // service_fee_ppm
        8; // service_fee_period

    /// Raise ceiling of the seeding stage
    pub fn seeding_ceiling(&self) -> u64 {
        self.seeding_goal
    }

    /// Raise ceiling of the whole launch
    pub fn total_ceiling(&self) -> Result<u64> {
        self.seeding_goal
            .checked_add(self.acceleration_goal)
            .ok_or(error!(LaunchpadError::MathOverflow))
    }

    pub fn total_sale_allocation(&self) -> Result<u64> {
        self.seeding_allocation
            .checked_add(self.acceleration_allocation)
            .ok_or(error!(LaunchpadError::MathOverflow))
    }

    /// Raise ceiling while `stage` is active
    pub fn stage_ceiling(&self, stage: Stage) -> Result<u64> {
        match stage {
            Stage::Seeding => Ok(self.seeding_ceiling()),
            Stage::Acceleration => self.total_ceiling(),
            _ => err!(LaunchpadError::InvalidStage),
        }
    }

    /// Per-investor contribution cap while `stage` is active
    pub fn investor_cap(&self, stage: Stage) -> Result<u64> {
        match stage {
            Stage::Genesis | Stage::Seeding => Ok(self.seeding_max_per_investor),
            Stage::Acceleration => Ok(self.acceleration_max_per_investor),
            _ => err!(LaunchpadError::InvalidStage),
        }
    }

    /// Virtual token reserve under which the full acceleration goal buys
    /// (at most) the whole acceleration allocation
    pub fn matching_virtual_token(
        acceleration_allocation: u64,
        virtual_quote: u64,
        acceleration_goal: u64,
    ) -> Result<u64> {
        let final_quote = (virtual_quote as u128)
            .checked_add(acceleration_goal as u128)
            .ok_or(LaunchpadError::MathOverflow)?;
        let virtual_token = (acceleration_allocation as u128)
            .checked_mul(final_quote)
            .ok_or(LaunchpadError::MathOverflow)?
            .checked_div(acceleration_goal as u128)
            .ok_or(LaunchpadError::DivisionByZero)?;

        u64::try_from(virtual_token).map_err(|_| error!(LaunchpadError::TypeCastFailed))
    }

    /// Tokens the acceleration curve would sell for its full goal
    pub fn acceleration_curve_capacity(&self) -> Result<u64> {
        let invariant = (self.virtual_quote as u128)
            .checked_mul(self.virtual_token as u128)
            .ok_or(LaunchpadError::MathOverflow)?;
        let final_quote = (self.virtual_quote as u128)
            .checked_add(self.acceleration_goal as u128)
            .ok_or(LaunchpadError::MathOverflow)?;
        let final_token = invariant
            .checked_div(final_quote)
            .ok_or(LaunchpadError::DivisionByZero)?;

        let capacity = (self.virtual_token as u128)
            .checked_sub(final_token)
            .ok_or(LaunchpadError::MathOverflow)?;
        u64::try_from(capacity).map_err(|_| error!(LaunchpadError::TypeCastFailed))
    }

    pub fn validate(&self) -> Result<()> {
        let unit = self.contribution_unit;
        require!(unit > 0, LaunchpadError::InvalidLaunchConfig);

        for amount in [
            self.seeding_goal,
            self.acceleration_goal,
            self.seeding_max_per_investor,
            self.acceleration_max_per_investor,
        ] {
            require!(
                amount > 0 && amount % unit == 0,
                LaunchpadError::InvalidContributionUnit
            );
        }

        require!(
            self.seeding_allocation > 0 && self.acceleration_allocation > 0,
            LaunchpadError::InvalidTokenAllocation
        );

        require!(
            self.virtual_quote > 0 && self.virtual_token > 0,
            LaunchpadError::InvalidLaunchConfig
        );

        require!(
            self.acceleration_curve_capacity()? <= self.acceleration_allocation,
            LaunchpadError::InvalidTokenAllocation
        );

        require!(
            self.liquidity_quote_amount > 0
                && self.liquidity_token_amount > 0
                && self.liquidity_quote_amount <= self.total_ceiling()?,
            LaunchpadError::InvalidLaunchConfig
        );

        require!(
            self.seeding_duration > 0
                && self.acceleration_duration > 0
                && self.genesis_succeeded_duration >= 0
                && self.seeding_succeeded_duration >= 0
                && self.service_fee_period > 0,
            LaunchpadError::InvalidDuration
        );

        for ppm in [
            self.seeding_refund_fee_ppm,
            self.acceleration_refund_fee_ppm,
            self.service_fee_ppm,
        ] {
            require!(
                ppm as u64 <= PPM_DENOMINATOR,
                LaunchpadError::InvalidFeeRate
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> LaunchConfig {
        LaunchConfig {
            contribution_unit: 1,
            seeding_goal: 100,
            acceleration_goal: 100,
            seeding_allocation: 1_000,
            acceleration_allocation: 9_100,
            seeding_max_per_investor: 50,
            acceleration_max_per_investor: 80,
            virtual_quote: 10,
            virtual_token: 10_000,
            liquidity_quote_amount: 150,
            liquidity_token_amount: 2_000,
            genesis_succeeded_duration: 10,
            seeding_duration: 100,
            seeding_succeeded_duration: 10,
            acceleration_duration: 100,
            seeding_refund_fee_ppm: 50_000,
            acceleration_refund_fee_ppm: 20_000,
            service_fee_ppm: 1_000,
            service_fee_period: 30,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_curve_capacity() {
        // 10_000 - 100_000 / 110 = 10_000 - 909
        assert_eq!(valid_config().acceleration_curve_capacity().unwrap(), 9_091);
    }

    #[test]
    fn test_curve_capacity_above_allocation_rejected() {
        let mut config = valid_config();
        config.acceleration_allocation = 9_090;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_goal_not_multiple_of_unit_rejected() {
        let mut config = valid_config();
        config.contribution_unit = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fee_rate_above_one_hundred_percent_rejected() {
        let mut config = valid_config();
        config.seeding_refund_fee_ppm = 1_000_001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_liquidity_quote_above_total_goal_rejected() {
        let mut config = valid_config();
        config.liquidity_quote_amount = 201;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_matching_virtual_token_fits_allocation() {
        let virtual_token = LaunchConfig::matching_virtual_token(9_100, 10, 100).unwrap();
        assert_eq!(virtual_token, 10_010);

        let mut config = valid_config();
        config.virtual_token = virtual_token;
        assert!(config.acceleration_curve_capacity().unwrap() <= 9_100);
        assert!(config.validate().is_ok());

        assert!(LaunchConfig::matching_virtual_token(9_100, 10, 0).is_err());
    }

    #[test]
    fn test_stage_ceilings_and_caps() {
        let config = valid_config();
        assert_eq!(config.stage_ceiling(Stage::Seeding).unwrap(), 100);
        assert_eq!(config.stage_ceiling(Stage::Acceleration).unwrap(), 200);
        assert!(config.stage_ceiling(Stage::Thriving).is_err());
        assert_eq!(config.investor_cap(Stage::Genesis).unwrap(), 50);
        assert_eq!(config.investor_cap(Stage::Acceleration).unwrap(), 80);
        assert!(config.investor_cap(Stage::Failed).is_err());
    }
}
