use anchor_lang::prelude::*;

use crate::errors::LaunchpadError;
use crate::state::{LaunchPool, Stage};
use crate::utils::apply_ppm;

/// Whole-period service fee accrual, paid from the token vault once the launch thrives
#[derive(Debug, Clone, Copy, Default, AnchorSerialize, AnchorDeserialize, PartialEq, Eq)]
pub struct ServiceFeeClock {
    /// Fees are paid up to this timestamp; only moves by whole periods
    pub last_paid_through: i64,

    /// Tokens paid so far
    pub total_paid: u64,
}

impl ServiceFeeClock {
    pub const SIZE: usize = 8 + 8;
}

#[derive(Debug, Clone, Copy, Default, AnchorSerialize, AnchorDeserialize, PartialEq, Eq)]
pub struct ServiceFeeQuote {
    /// Whole periods covered
    pub periods: u64,

    /// Tokens owed for those periods
    pub amount: u64,

    /// New paid-through boundary after payment
    pub paid_through: i64,
}

impl LaunchPool {
    /// total_supply * service_fee_ppm / 1_000_000
    pub fn service_fee_per_period(&self) -> Result<u64> {
        apply_ppm(self.total_supply, self.config.service_fee_ppm)
    }

    /// Fee owed for whole periods elapsed since the last payment (or since thriving began).
    ///
    /// With `claimable_only`, the periods are clamped to what `available_balance` covers.
    pub fn quote_service_fee(
        &self,
        current_time: i64,
        available_balance: u64,
        claimable_only: bool,
    ) -> Result<ServiceFeeQuote> {
        let (stage, thriving_start, _) = self.current_stage(current_time);
        require!(stage == Stage::Thriving, LaunchpadError::InvalidStage);

        let period = self.config.service_fee_period;
        require!(period > 0, LaunchpadError::DivisionByZero);

        let baseline = self.service_fee.last_paid_through.max(thriving_start);
        if current_time <= baseline {
            return Ok(ServiceFeeQuote {
                paid_through: baseline,
                ..ServiceFeeQuote::default()
            });
        }

        let per_period = self.service_fee_per_period()?;
        let mut periods = ((current_time - baseline) / period) as u64;
        if claimable_only && per_period > 0 {
            periods = periods.min(available_balance / per_period);
        }

        let amount = periods
            .checked_mul(per_period)
            .ok_or(LaunchpadError::MathOverflow)?;
        let covered = i64::try_from(periods)
            .map_err(|_| error!(LaunchpadError::TypeCastFailed))?
            .checked_mul(period)
            .ok_or(LaunchpadError::MathOverflow)?;
        let paid_through = baseline
            .checked_add(covered)
            .ok_or(LaunchpadError::MathOverflow)?;

        Ok(ServiceFeeQuote {
            periods,
            amount,
            paid_through,
        })
    }

    /// Book the claimable whole periods and return what to pay
    pub fn claim_service_fee(
        &mut self,
        current_time: i64,
        available_balance: u64,
    ) -> Result<ServiceFeeQuote> {
        let quote = self.quote_service_fee(current_time, available_balance, true)?;

        require!(
            quote.periods > 0 && quote.amount > 0,
            LaunchpadError::NothingToClaim
        );
        require!(
            current_time >= quote.paid_through,
            LaunchpadError::PeriodNotComplete
        );
        require!(
            quote.amount <= available_balance,
            LaunchpadError::InsufficientVaultBalance
        );

        self.service_fee.last_paid_through = quote.paid_through;
        self.service_fee.total_paid = self.service_fee.total_paid
            .checked_add(quote.amount)
            .ok_or(LaunchpadError::MathOverflow)?;

        Ok(quote)
    }
}
