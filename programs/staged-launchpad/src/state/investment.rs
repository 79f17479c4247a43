use anchor_lang::prelude::*;

use crate::errors::LaunchpadError;
use crate::state::{LaunchConfig, Stage};
use crate::utils::apply_ppm;

#[account]
#[derive(Default)]
pub struct Investment {
    /// Investor address
    pub investor: Pubkey,

    /// Associated launch pool
    pub pool: Pubkey,

    /// bump seed
    pub bump: u8,

    // ===== Contribution Information =====
    /// Quote contributed during seeding
    pub seeding_contribution: u64,

    /// Tokens bought during seeding
    pub seeding_tokens_out: u64,

    /// Quote contributed during acceleration
    pub acceleration_contribution: u64,

    /// Tokens bought during acceleration
    pub acceleration_tokens_out: u64,

    // ===== Roster Membership =====
    pub in_seeding_roster: bool,
    pub in_acceleration_roster: bool,

    // ===== Claim Status =====
    /// Whether bought tokens have been claimed (success case)
    pub tokens_claimed: bool,

    /// Whether refunded (failure case)
    pub refunded: bool,

    // ===== Time Records =====
    /// First participation time
    pub participated_at: i64,

    /// Last updated time
    pub last_updated: i64,

    /// Reserved space
    pub reserved: [u64; 4],
}

/// Fee-adjusted refund owed to an investor once the launch has failed.
#[derive(Debug, Clone, Copy, Default, AnchorSerialize, AnchorDeserialize, PartialEq, Eq)]
pub struct RefundQuote {
    pub refundable: bool,
    pub seeding_refund: u64,
    pub seeding_fee: u64,
    pub acceleration_refund: u64,
    pub acceleration_fee: u64,
}

impl RefundQuote {
    pub fn total_refund(&self) -> Result<u64> {
        self.seeding_refund
            .checked_add(self.acceleration_refund)
            .ok_or(error!(LaunchpadError::MathOverflow))
    }

    pub fn total_fee(&self) -> Result<u64> {
        self.seeding_fee
            .checked_add(self.acceleration_fee)
            .ok_or(error!(LaunchpadError::MathOverflow))
    }
}

impl Investment {
    pub const SIZE: usize = 8 + // discriminator
        32 + // investor
        32 + // pool
        1 + // bump
        8 + // seeding_contribution
        8 + // seeding_tokens_out
        8 + // acceleration_contribution
        8 + // acceleration_tokens_out
        1 + // in_seeding_roster
        1 + // in_acceleration_roster
        1 + // tokens_claimed
        1 + // refunded
        8 + // participated_at
        8 + // last_updated
        8 * 4; // reserved

    /// Contribution already recorded for the stage whose cap applies
    pub fn contribution_in(&self, stage: Stage) -> u64 {
        match stage {
            Stage::Genesis | Stage::Seeding => self.seeding_contribution,
            Stage::Acceleration => self.acceleration_contribution,
            _ => 0,
        }
    }

    pub fn total_tokens_out(&self) -> Result<u64> {
        self.seeding_tokens_out
            .checked_add(self.acceleration_tokens_out)
            .ok_or(error!(LaunchpadError::MathOverflow))
    }

    /// Accumulate a priced contribution.
    ///
    /// Returns true when this is the investor's first appearance in `stage`.
    pub fn record(
        &mut self,
        stage: Stage,
        contribution: u64,
        tokens_out: u64,
        current_time: i64,
    ) -> Result<bool> {
        let first_appearance = match stage {
            Stage::Seeding => {
                self.seeding_contribution = self.seeding_contribution
                    .checked_add(contribution)
                    .ok_or(LaunchpadError::MathOverflow)?;
                self.seeding_tokens_out = self.seeding_tokens_out
                    .checked_add(tokens_out)
                    .ok_or(LaunchpadError::MathOverflow)?;
                !std::mem::replace(&mut self.in_seeding_roster, true)
            }
            Stage::Acceleration => {
                self.acceleration_contribution = self.acceleration_contribution
                    .checked_add(contribution)
                    .ok_or(LaunchpadError::MathOverflow)?;
                self.acceleration_tokens_out = self.acceleration_tokens_out
                    .checked_add(tokens_out)
                    .ok_or(LaunchpadError::MathOverflow)?;
                !std::mem::replace(&mut self.in_acceleration_roster, true)
            }
            _ => return err!(LaunchpadError::InvalidStage),
        };

        self.last_updated = current_time;
        if self.participated_at == 0 {
            self.participated_at = current_time;
        }

        Ok(first_appearance)
    }

    /// Refund owed for the current record, net of the configured refund fees
    pub fn refund_quote(&self, config: &LaunchConfig) -> Result<RefundQuote> {
        let seeding_fee = apply_ppm(self.seeding_contribution, config.seeding_refund_fee_ppm)?;
        let seeding_refund = self.seeding_contribution
            .checked_sub(seeding_fee)
            .ok_or(LaunchpadError::MathOverflow)?;

        let acceleration_fee =
            apply_ppm(self.acceleration_contribution, config.acceleration_refund_fee_ppm)?;
        let acceleration_refund = self.acceleration_contribution
            .checked_sub(acceleration_fee)
            .ok_or(LaunchpadError::MathOverflow)?;

        Ok(RefundQuote {
            refundable: seeding_refund > 0 || acceleration_refund > 0,
            seeding_refund,
            seeding_fee,
            acceleration_refund,
            acceleration_fee,
        })
    }

    /// Quote the refund and zero the record in one step, so a second claim quotes nothing
    pub fn take_refund(&mut self, config: &LaunchConfig, current_time: i64) -> Result<RefundQuote> {
        let quote = self.refund_quote(config)?;
        require!(quote.refundable, LaunchpadError::NothingToClaim);

        self.seeding_contribution = 0;
        self.seeding_tokens_out = 0;
        self.acceleration_contribution = 0;
        self.acceleration_tokens_out = 0;
        self.refunded = true;
        self.last_updated = current_time;

        Ok(quote)
    }

    /// Mark bought tokens as claimed and return the amount owed
    pub fn take_tokens(&mut self, current_time: i64) -> Result<u64> {
        require!(!self.tokens_claimed, LaunchpadError::AlreadyClaimed);

        let amount = self.total_tokens_out()?;
        require!(amount > 0, LaunchpadError::NothingToClaim);

        self.tokens_claimed = true;
        self.last_updated = current_time;

        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LaunchConfig {
        LaunchConfig {
            seeding_refund_fee_ppm: 50_000,
            acceleration_refund_fee_ppm: 20_000,
            ..LaunchConfig::default()
        }
    }

    #[test]
    fn test_record_tracks_first_appearance_per_stage() {
        let mut investment = Investment::default();

        assert!(investment.record(Stage::Seeding, 30, 300, 10).unwrap());
        assert!(!investment.record(Stage::Seeding, 10, 100, 11).unwrap());
        assert!(investment.record(Stage::Acceleration, 5, 40, 12).unwrap());

        assert_eq!(investment.seeding_contribution, 40);
        assert_eq!(investment.seeding_tokens_out, 400);
        assert_eq!(investment.acceleration_contribution, 5);
        assert_eq!(investment.total_tokens_out().unwrap(), 440);
        assert_eq!(investment.participated_at, 10);
        assert_eq!(investment.last_updated, 12);
    }

    #[test]
    fn test_record_outside_investable_stage_rejected() {
        let mut investment = Investment::default();
        assert!(investment.record(Stage::Thriving, 1, 1, 1).is_err());
        assert!(investment.record(Stage::GenesisSucceeded, 1, 1, 1).is_err());
    }

    #[test]
    fn test_refund_quote_applies_stage_fees() {
        let investment = Investment {
            seeding_contribution: 100,
            acceleration_contribution: 1_000,
            ..Investment::default()
        };

        let quote = investment.refund_quote(&config()).unwrap();
        assert!(quote.refundable);
        assert_eq!(quote.seeding_refund, 95);
        assert_eq!(quote.seeding_fee, 5);
        assert_eq!(quote.acceleration_refund, 980);
        assert_eq!(quote.acceleration_fee, 20);
        assert_eq!(quote.total_refund().unwrap(), 1_075);
        assert_eq!(quote.total_fee().unwrap(), 25);
    }

    #[test]
    fn test_refund_taken_once() {
        let mut investment = Investment {
            seeding_contribution: 100,
            seeding_tokens_out: 1_000,
            ..Investment::default()
        };

        let first = investment.take_refund(&config(), 50).unwrap();
        assert_eq!(first.seeding_refund, 95);
        assert!(investment.refunded);
        assert_eq!(investment.seeding_tokens_out, 0);

        assert!(!investment.refund_quote(&config()).unwrap().refundable);
        assert!(investment.take_refund(&config(), 51).is_err());
    }

    #[test]
    fn test_full_fee_is_not_refundable() {
        let mut cfg = config();
        cfg.seeding_refund_fee_ppm = 1_000_000;
        let investment = Investment {
            seeding_contribution: 100,
            ..Investment::default()
        };

        let quote = investment.refund_quote(&cfg).unwrap();
        assert!(!quote.refundable);
        assert_eq!(quote.seeding_fee, 100);
    }

    #[test]
    fn test_tokens_taken_once() {
        let mut investment = Investment {
            seeding_tokens_out: 10,
            acceleration_tokens_out: 5,
            ..Investment::default()
        };

        assert_eq!(investment.take_tokens(1).unwrap(), 15);
        assert!(investment.take_tokens(2).is_err());
    }
}
