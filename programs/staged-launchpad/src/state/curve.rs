use anchor_lang::prelude::*;

use crate::errors::LaunchpadError;
use crate::state::{LaunchPool, Stage};
use crate::utils::require_unit_multiple;

/// Accepted part of a proposed contribution and the tokens it buys
#[derive(Debug, Clone, Copy, Default, AnchorSerialize, AnchorDeserialize, PartialEq, Eq)]
pub struct CurveQuote {
    pub accepted: u64,
    pub tokens_out: u64,
}

impl LaunchPool {
    /// Price `proposed` quote in `stage`.
    ///
    /// Seeding sells at a fixed price. Acceleration sells along a virtual
    /// constant-product curve whose token reserve is always re-derived from the
    /// initial virtual invariant. A contribution that lands exactly on a stage
    /// ceiling receives whatever remains of the allocation, so no dust is stranded.
    pub fn quote(&self, stage: Stage, proposed: u64) -> Result<CurveQuote> {
        require_unit_multiple(proposed, self.config.contribution_unit)?;

        let ceiling = self.config.stage_ceiling(stage)?;
        let room = ceiling.saturating_sub(self.raised_amount_total);
        let accepted = proposed.min(room);
        if accepted == 0 {
            return Ok(CurveQuote::default());
        }

        let raised_after = self.raised_amount_total
            .checked_add(accepted)
            .ok_or(LaunchpadError::MathOverflow)?;
        let closes_stage = raised_after == ceiling;

        let tokens_out = match stage {
            Stage::Seeding if closes_stage => self.config.seeding_allocation
                .checked_sub(self.issued_token_total)
                .ok_or(LaunchpadError::MathOverflow)?,
            Stage::Seeding => self.seeding_tokens_out(accepted)?,
            Stage::Acceleration if closes_stage => self.config
                .total_sale_allocation()?
                .checked_sub(self.issued_token_total)
                .ok_or(LaunchpadError::MathOverflow)?,
            Stage::Acceleration => self.acceleration_tokens_out(accepted)?,
            _ => return err!(LaunchpadError::InvalidStage),
        };

        Ok(CurveQuote {
            accepted,
            tokens_out,
        })
    }

    /// tokens = accepted * seeding_allocation / seeding_goal
    fn seeding_tokens_out(&self, accepted: u64) -> Result<u64> {
        let tokens = (accepted as u128)
            .checked_mul(self.config.seeding_allocation as u128)
            .ok_or(LaunchpadError::MathOverflow)?
            .checked_div(self.config.seeding_goal as u128)
            .ok_or(LaunchpadError::DivisionByZero)?;

        u64::try_from(tokens).map_err(|_| error!(LaunchpadError::TypeCastFailed))
    }

    fn acceleration_tokens_out(&self, accepted: u64) -> Result<u64> {
        let config = &self.config;

        let raised_so_far = self.raised_amount_total
            .checked_sub(config.seeding_goal)
            .ok_or(LaunchpadError::MathOverflow)?;
        let issued_so_far = self.issued_token_total
            .checked_sub(config.seeding_allocation)
            .ok_or(LaunchpadError::MathOverflow)?;

        let virtual_quote = (config.virtual_quote as u128)
            .checked_add(raised_so_far as u128)
            .ok_or(LaunchpadError::MathOverflow)?;
        let virtual_token = (config.virtual_token as u128)
            .checked_sub(issued_so_far as u128)
            .ok_or(LaunchpadError::MathOverflow)?;

        let new_virtual_quote = virtual_quote
            .checked_add(accepted as u128)
            .ok_or(LaunchpadError::MathOverflow)?;
        let invariant = (config.virtual_quote as u128)
            .checked_mul(config.virtual_token as u128)
            .ok_or(LaunchpadError::MathOverflow)?;
        let new_virtual_token = invariant
            .checked_div(new_virtual_quote)
            .ok_or(LaunchpadError::DivisionByZero)?;

        let tokens = virtual_token
            .checked_sub(new_virtual_token)
            .ok_or(LaunchpadError::MathOverflow)?;

        u64::try_from(tokens).map_err(|_| error!(LaunchpadError::TypeCastFailed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::launch_pool::tests::{acceleration_pool, seeding_pool, test_config};

    #[test]
    fn test_seeding_fixed_price() {
        let pool = seeding_pool(test_config());
        assert_eq!(
            pool.quote(Stage::Seeding, 1).unwrap(),
            CurveQuote { accepted: 1, tokens_out: 10 }
        );
        assert_eq!(
            pool.quote(Stage::Seeding, 100).unwrap(),
            CurveQuote { accepted: 100, tokens_out: 1_000 }
        );
    }

    #[test]
    fn test_seeding_clamps_to_ceiling() {
        let mut pool = seeding_pool(test_config());
        pool.raised_amount_total = 95;
        pool.issued_token_total = 950;

        let quote = pool.quote(Stage::Seeding, 20).unwrap();
        assert_eq!(quote.accepted, 5);
        assert_eq!(quote.tokens_out, 50);
    }

    #[test]
    fn test_zero_acceptance_at_ceiling() {
        let mut pool = seeding_pool(test_config());
        pool.raised_amount_total = 100;
        pool.issued_token_total = 1_000;
        assert_eq!(pool.quote(Stage::Seeding, 10).unwrap(), CurveQuote::default());
    }

    #[test]
    fn test_acceleration_first_unit() {
        let (pool, _) = acceleration_pool();
        // 10_000 - (10 * 10_000) / 11 = 10_000 - 9_090
        assert_eq!(
            pool.quote(Stage::Acceleration, 1).unwrap(),
            CurveQuote { accepted: 1, tokens_out: 910 }
        );
    }

    #[test]
    fn test_acceleration_uses_initial_invariant() {
        let (mut pool, _) = acceleration_pool();
        // after 10 units sold for 10_000 - 100_000 / 20 = 5_000 tokens
        pool.raised_amount_total = 110;
        pool.issued_token_total = 1_000 + 5_000;

        // reserves (20, 5_000); next 5 units: 5_000 - 100_000 / 25 = 1_000
        assert_eq!(
            pool.quote(Stage::Acceleration, 5).unwrap(),
            CurveQuote { accepted: 5, tokens_out: 1_000 }
        );
    }

    #[test]
    fn test_acceleration_closing_contribution_takes_remainder() {
        let (mut pool, _) = acceleration_pool();
        pool.raised_amount_total = 190;
        pool.issued_token_total = 1_000 + 8_000;

        let quote = pool.quote(Stage::Acceleration, 10).unwrap();
        assert_eq!(quote.accepted, 10);
        assert_eq!(quote.tokens_out, 1_100);
    }

    #[test]
    fn test_quote_rejects_non_investable_stage_and_bad_unit() {
        let mut config = test_config();
        config.contribution_unit = 5;
        let pool = seeding_pool(config);
        assert!(pool.quote(Stage::Genesis, 10).is_err());
        assert!(pool.quote(Stage::Thriving, 10).is_err());
        assert!(pool.quote(Stage::Seeding, 7).is_err());
        assert!(pool.quote(Stage::Seeding, 0).is_err());
        assert_eq!(pool.quote(Stage::Seeding, 10).unwrap().accepted, 10);
    }
}
