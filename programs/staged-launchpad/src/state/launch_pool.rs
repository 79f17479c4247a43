use anchor_lang::prelude::*;

use crate::errors::LaunchpadError;
use crate::state::{
    CreatorVesting, Investment, InvestorRoster, LaunchConfig, RefundQuote, ServiceFeeClock,
    Stage, StageSchedule,
};
use crate::utils::require_unit_multiple;

#[account]
#[derive(Default)]
pub struct LaunchPool {
    /// Project creator
    pub creator: Pubkey,

    pub token_mint: Pubkey,
    pub token_vault: Pubkey,
    pub quote_vault: Pubkey,
    pub quote_mint: Pubkey,

    /// bump seed
    pub bump: u8,

    pub index: u64,

    /// Held for the duration of a mutating instruction
    pub locked: bool,

    /// Total supply
    pub total_supply: u64,

    /// Parameters fixed at creation
    pub config: LaunchConfig,

    /// Stage windows
    pub schedule: StageSchedule,

    // ===== Totals (never decrease) =====
    /// Quote raised across all stages
    pub raised_amount_total: u64,

    /// Tokens sold across all stages
    pub issued_token_total: u64,

    /// Sold tokens already paid out to investors
    pub claimed_token_total: u64,

    // ===== Collaborators =====
    /// Creator allocation schedule, started on success
    pub vesting: CreatorVesting,

    /// Service fee accrual
    pub service_fee: ServiceFeeClock,

    /// Whether the AMM pool has been seeded
    pub liquidity_seeded: bool,

    /// AMM pool (set after seeding)
    pub amm_pool: Option<Pubkey>,

    /// AMM position account (set after seeding)
    pub position: Option<Pubkey>,

    /// AMM position NFT account (set after seeding)
    pub position_nft_account: Option<Pubkey>,

    /// Reserved space
    pub reserved: [u64; 4],
}

/// Result of a single priced and recorded contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvestOutcome {
    /// Stage the contribution was priced in
    pub stage: Stage,
    /// Stage after the goal check
    pub next_stage: Stage,
    pub tokens_out: u64,
    pub first_appearance: bool,
    /// Whether this contribution completed the launch
    pub entered_thriving: bool,
}

impl LaunchPool {
    pub const SIZE: usize = 8 + // discriminator
        32 + // creator
        32 + // token_mint
        32 + // token_vault
        32 + // quote_vault
        32 + // quote_mint
        1 + // bump
        8 + // index
        1 + // locked
        8 + // total_supply
        LaunchConfig::SIZE + // config
        StageSchedule::SIZE + // schedule
        8 + // raised_amount_total
        8 + // issued_token_total
        8 + // claimed_token_total
        CreatorVesting::SIZE + // vesting
        ServiceFeeClock::SIZE + // service_fee
        1 + // liquidity_seeded
        33 + // amm_pool (Option<Pubkey>)
        33 + // position (Option<Pubkey>)
        33 + // position_nft_account (Option<Pubkey>)
        8 * 4; // reserved

    // ===== Guard =====

    pub fn acquire_lock(&mut self) -> Result<()> {
        require!(!self.locked, LaunchpadError::Reentrancy);
        self.locked = true;
        Ok(())
    }

    pub fn release_lock(&mut self) {
        self.locked = false;
    }

    // ===== Stage Clock =====

    /// Stage active at `current_time` with its `[start, end)` window
    pub fn current_stage(&self, current_time: i64) -> (Stage, i64, i64) {
        self.schedule.resolve(current_time)
    }

    /// Open the stage sequence; the first use of the pool
    pub fn start_launch(&mut self, current_time: i64) -> Result<()> {
        let (stage, start, _) = self.current_stage(current_time);
        require!(stage == Stage::Genesis, LaunchpadError::InvalidStage);
        require!(start != 0, LaunchpadError::NotStarted);

        self.advance_on_goal_reached(Stage::Genesis, current_time)?;
        Ok(())
    }

    /// Apply the goal-driven transition out of `from`, if any, and return the resulting stage
    pub fn advance_on_goal_reached(&mut self, from: Stage, current_time: i64) -> Result<Stage> {
        if from.is_terminal() {
            return Ok(from);
        }

        match from {
            Stage::Genesis => {
                self.schedule.schedule_after_genesis(current_time, &self.config)?;
                Ok(Stage::GenesisSucceeded)
            }
            Stage::Seeding if self.raised_amount_total >= self.config.seeding_ceiling() => {
                self.schedule.schedule_after_seeding(current_time, &self.config)?;
                Ok(Stage::SeedingSucceeded)
            }
            Stage::Acceleration if self.raised_amount_total >= self.config.total_ceiling()? => {
                self.schedule.open_thriving(current_time);
                Ok(Stage::Thriving)
            }
            unchanged => Ok(unchanged),
        }
    }

    // ===== Investment Ledger =====

    /// Reject a contribution that would push the investor past the stage cap
    pub fn check_investor_cap(
        &self,
        stage: Stage,
        investment: &Investment,
        amount: u64,
    ) -> Result<()> {
        let cap = self.config.investor_cap(stage)?;
        let total = investment
            .contribution_in(stage)
            .checked_add(amount)
            .ok_or(LaunchpadError::MathOverflow)?;

        require!(total <= cap, LaunchpadError::ContributionCapExceeded);
        Ok(())
    }

    /// Book a priced contribution against the investor record, the roster and the pool totals
    pub fn record_investment(
        &mut self,
        stage: Stage,
        investment: &mut Investment,
        roster: &mut InvestorRoster,
        investor: Pubkey,
        contribution: u64,
        tokens_out: u64,
        current_time: i64,
    ) -> Result<bool> {
        let first_appearance = investment.record(stage, contribution, tokens_out, current_time)?;
        if first_appearance {
            roster.push(stage, investor)?;
        }

        self.raised_amount_total = self.raised_amount_total
            .checked_add(contribution)
            .ok_or(LaunchpadError::MathOverflow)?;
        self.issued_token_total = self.issued_token_total
            .checked_add(tokens_out)
            .ok_or(LaunchpadError::MathOverflow)?;

        Ok(first_appearance)
    }

    // ===== Stage Transition Controller =====

    /// Price, record and settle one contribution as a single unit.
    ///
    /// Any failure leaves the caller to abort the instruction, discarding every write.
    pub fn invest(
        &mut self,
        investment: &mut Investment,
        roster: &mut InvestorRoster,
        investor: Pubkey,
        amount: u64,
        min_tokens_out: u64,
        current_time: i64,
    ) -> Result<InvestOutcome> {
        let (stage, _, _) = self.current_stage(current_time);
        require!(stage.is_investable(), LaunchpadError::InvalidStage);
        require_unit_multiple(amount, self.config.contribution_unit)?;

        self.check_investor_cap(stage, investment, amount)?;

        let quote = self.quote(stage, amount)?;
        require!(quote.accepted == amount, LaunchpadError::PartialFill);
        require!(quote.tokens_out > 0, LaunchpadError::ZeroTokensOut);
        require!(
            quote.tokens_out >= min_tokens_out,
            LaunchpadError::SlippageExceeded
        );

        let first_appearance = self.record_investment(
            stage,
            investment,
            roster,
            investor,
            amount,
            quote.tokens_out,
            current_time,
        )?;

        let next_stage = self.advance_on_goal_reached(stage, current_time)?;
        let entered_thriving = next_stage == Stage::Thriving;
        if entered_thriving {
            self.vesting.start(current_time)?;
        }

        Ok(InvestOutcome {
            stage,
            next_stage,
            tokens_out: quote.tokens_out,
            first_appearance,
            entered_thriving,
        })
    }

    // ===== Refund Calculator =====

    /// Refund owed to `investment`; only a failed launch refunds
    pub fn refund_quote(&self, investment: &Investment, current_time: i64) -> Result<RefundQuote> {
        let (stage, _, _) = self.current_stage(current_time);
        require!(stage == Stage::Failed, LaunchpadError::InvalidStage);

        investment.refund_quote(&self.config)
    }

    /// Quote the refund and zero the record; the caller persists it before moving funds
    pub fn claim_refund(
        &self,
        investment: &mut Investment,
        current_time: i64,
    ) -> Result<RefundQuote> {
        let (stage, _, _) = self.current_stage(current_time);
        require!(stage == Stage::Failed, LaunchpadError::InvalidStage);

        investment.take_refund(&self.config, current_time)
    }

    // ===== Token Obligations =====

    /// Tokens in the vault already promised to investors or the creator
    pub fn token_obligations(&self) -> Result<u64> {
        let unclaimed_sold = self.issued_token_total
            .checked_sub(self.claimed_token_total)
            .ok_or(LaunchpadError::MathOverflow)?;

        unclaimed_sold
            .checked_add(self.vesting.remaining())
            .ok_or(error!(LaunchpadError::MathOverflow))
    }

    /// Vault balance free to pay service fees
    pub fn available_service_balance(&self, vault_balance: u64) -> Result<u64> {
        Ok(vault_balance.saturating_sub(self.token_obligations()?))
    }

    pub fn book_token_claim(&mut self, amount: u64) -> Result<()> {
        self.claimed_token_total = self.claimed_token_total
            .checked_add(amount)
            .ok_or(LaunchpadError::MathOverflow)?;
        Ok(())
    }

    /// Record the seeded AMM position; seeding happens once per pool
    pub fn mark_liquidity_seeded(
        &mut self,
        amm_pool: Pubkey,
        position: Pubkey,
        position_nft_account: Pubkey,
    ) -> Result<()> {
        require!(!self.liquidity_seeded, LaunchpadError::LiquidityAlreadySeeded);

        self.liquidity_seeded = true;
        self.amm_pool = Some(amm_pool);
        self.position = Some(position);
        self.position_nft_account = Some(position_nft_account);

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const START: i64 = 1_000;

    /// Seeding: 100 units for 1_000 tokens. Acceleration: 100 units on a 10/10_000 curve.
    pub(crate) fn test_config() -> LaunchConfig {
        LaunchConfig {
            contribution_unit: 1,
            seeding_goal: 100,
            acceleration_goal: 100,
            seeding_allocation: 1_000,
            acceleration_allocation: 9_100,
            seeding_max_per_investor: 100,
            acceleration_max_per_investor: 100,
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

    pub(crate) fn test_pool(config: LaunchConfig) -> LaunchPool {
        LaunchPool {
            total_supply: 1_000_000,
            config,
            schedule: StageSchedule::new(START),
            vesting: CreatorVesting {
                allocation: 50_000,
                lock_duration: 10,
                linear_unlock_duration: 100,
                ..CreatorVesting::default()
            },
            ..LaunchPool::default()
        }
    }

    /// Pool already in seeding at `START + 10`
    pub(crate) fn seeding_pool(config: LaunchConfig) -> LaunchPool {
        let mut pool = test_pool(config);
        pool.start_launch(START).unwrap();
        pool
    }

    pub(crate) const SEEDING_AT: i64 = START + 10;

    pub(crate) fn invest(
        pool: &mut LaunchPool,
        investment: &mut Investment,
        roster: &mut InvestorRoster,
        amount: u64,
        now: i64,
    ) -> Result<InvestOutcome> {
        let investor = investment.investor;
        pool.invest(investment, roster, investor, amount, 0, now)
    }

    /// Pool in acceleration at `ACCELERATION_AT` with the seeding goal met
    pub(crate) fn acceleration_pool() -> (LaunchPool, InvestorRoster) {
        let mut pool = seeding_pool(test_config());
        let mut roster = InvestorRoster::default();
        let mut whale = Investment::default();
        invest(&mut pool, &mut whale, &mut roster, 100, SEEDING_AT).unwrap();
        (pool, roster)
    }

    pub(crate) const ACCELERATION_AT: i64 = SEEDING_AT + 10;

    /// Pool thriving since `THRIVING_AT`
    pub(crate) fn thriving_pool() -> LaunchPool {
        let (mut pool, mut roster) = acceleration_pool();
        let mut whale = Investment::default();
        let outcome = invest(&mut pool, &mut whale, &mut roster, 100, THRIVING_AT).unwrap();
        assert!(outcome.entered_thriving);
        pool
    }

    pub(crate) const THRIVING_AT: i64 = ACCELERATION_AT + 5;

    #[test]
    fn test_start_launch_requires_start_time() {
        let mut pool = test_pool(test_config());
        assert!(pool.start_launch(START - 1).is_err());

        pool.start_launch(START).unwrap();
        assert_eq!(pool.current_stage(START).0, Stage::GenesisSucceeded);
        assert_eq!(pool.current_stage(SEEDING_AT), (Stage::Seeding, SEEDING_AT, SEEDING_AT + 100));
        assert!(pool.start_launch(START + 1).is_err());
    }

    #[test]
    fn test_invest_rejected_outside_investable_stages() {
        let mut pool = seeding_pool(test_config());
        let mut roster = InvestorRoster::default();
        let mut investment = Investment::default();

        // announcement window
        assert!(invest(&mut pool, &mut investment, &mut roster, 10, START + 5).is_err());
        // after seeding expired the pool has failed
        assert!(invest(&mut pool, &mut investment, &mut roster, 10, SEEDING_AT + 100).is_err());
        assert_eq!(investment.seeding_contribution, 0);
    }

    #[test]
    fn test_full_seeding_contribution_buys_whole_allocation() {
        let mut pool = seeding_pool(test_config());
        let mut roster = InvestorRoster::default();
        let mut investment = Investment::default();

        let outcome = invest(&mut pool, &mut investment, &mut roster, 100, SEEDING_AT).unwrap();

        assert_eq!(outcome.tokens_out, 1_000);
        assert_eq!(outcome.stage, Stage::Seeding);
        assert_eq!(outcome.next_stage, Stage::SeedingSucceeded);
        assert_eq!(pool.current_stage(SEEDING_AT).0, Stage::SeedingSucceeded);
        assert_eq!(pool.current_stage(ACCELERATION_AT).0, Stage::Acceleration);
    }

    #[test]
    fn test_seeding_cap_rejects_whole_contribution() {
        let mut config = test_config();
        config.seeding_max_per_investor = 50;
        let mut pool = seeding_pool(config);
        let mut roster = InvestorRoster::default();
        let mut investment = Investment::default();

        invest(&mut pool, &mut investment, &mut roster, 30, SEEDING_AT).unwrap();
        assert!(invest(&mut pool, &mut investment, &mut roster, 30, SEEDING_AT + 1).is_err());

        assert_eq!(investment.seeding_contribution, 30);
        assert_eq!(pool.raised_amount_total, 30);
    }

    #[test]
    fn test_partial_fill_rejected() {
        let mut pool = seeding_pool(test_config());
        let mut roster = InvestorRoster::default();
        let mut first = Investment::default();
        let mut second = Investment::default();

        invest(&mut pool, &mut first, &mut roster, 90, SEEDING_AT).unwrap();
        assert!(invest(&mut pool, &mut second, &mut roster, 20, SEEDING_AT).is_err());
        assert_eq!(pool.raised_amount_total, 90);
        assert_eq!(second.seeding_contribution, 0);
    }

    #[test]
    fn test_min_tokens_out_enforced() {
        let mut pool = seeding_pool(test_config());
        let mut roster = InvestorRoster::default();
        let mut investment = Investment::default();

        let result = pool.invest(&mut investment, &mut roster, Pubkey::default(), 10, 101, SEEDING_AT);
        assert!(result.is_err());
        pool.invest(&mut investment, &mut roster, Pubkey::default(), 10, 100, SEEDING_AT).unwrap();
    }

    #[test]
    fn test_roster_deduplicates_investors() {
        let mut pool = seeding_pool(test_config());
        let mut roster = InvestorRoster::default();
        let mut alice = Investment {
            investor: Pubkey::new_unique(),
            ..Investment::default()
        };
        let mut bob = Investment {
            investor: Pubkey::new_unique(),
            ..Investment::default()
        };

        invest(&mut pool, &mut alice, &mut roster, 10, SEEDING_AT).unwrap();
        invest(&mut pool, &mut bob, &mut roster, 10, SEEDING_AT).unwrap();
        invest(&mut pool, &mut alice, &mut roster, 10, SEEDING_AT).unwrap();

        assert_eq!(roster.seeding, vec![alice.investor, bob.investor]);
        assert!(roster.acceleration.is_empty());
    }

    #[test]
    fn test_exact_goals_leave_no_dust() {
        let mut config = test_config();
        config.seeding_goal = 99;
        config.seeding_allocation = 1_000;
        let mut pool = seeding_pool(config);
        let mut roster = InvestorRoster::default();

        // 33 * 1000 / 99 = 333 each, the closing contribution takes the remainder
        let mut a = Investment::default();
        let mut b = Investment::default();
        let mut c = Investment::default();
        assert_eq!(invest(&mut pool, &mut a, &mut roster, 33, SEEDING_AT).unwrap().tokens_out, 333);
        assert_eq!(invest(&mut pool, &mut b, &mut roster, 33, SEEDING_AT).unwrap().tokens_out, 333);
        assert_eq!(invest(&mut pool, &mut c, &mut roster, 33, SEEDING_AT).unwrap().tokens_out, 334);
        assert_eq!(pool.issued_token_total, 1_000);

        let mut d = Investment::default();
        let mut e = Investment::default();
        invest(&mut pool, &mut d, &mut roster, 37, ACCELERATION_AT).unwrap();
        invest(&mut pool, &mut e, &mut roster, 63, ACCELERATION_AT).unwrap();
        assert_eq!(pool.raised_amount_total, 199);
        assert_eq!(pool.issued_token_total, 1_000 + 9_100);
        assert_eq!(pool.current_stage(ACCELERATION_AT).0, Stage::Thriving);
    }

    #[test]
    fn test_thriving_starts_vesting_and_blocks_failure() {
        let pool = thriving_pool();

        assert_eq!(pool.vesting.unlock_start_time, THRIVING_AT);
        assert_eq!(pool.schedule.window(Stage::Failed).start, 0);
        assert_eq!(pool.current_stage(THRIVING_AT + 1_000_000).0, Stage::Thriving);
        assert_eq!(pool.raised_amount_total, 200);
        assert_eq!(pool.issued_token_total, 10_100);
    }

    #[test]
    fn test_terminal_stages_are_absorbing() {
        let mut pool = thriving_pool();
        let mut roster = InvestorRoster::default();
        let mut investment = Investment::default();
        assert!(invest(&mut pool, &mut investment, &mut roster, 1, THRIVING_AT + 1).is_err());
        assert!(pool.start_launch(THRIVING_AT + 1).is_err());
        assert_eq!(
            pool.advance_on_goal_reached(Stage::Thriving, THRIVING_AT + 2).unwrap(),
            Stage::Thriving
        );

        let mut failed = seeding_pool(test_config());
        let after = SEEDING_AT + 100;
        assert_eq!(failed.current_stage(after).0, Stage::Failed);
        assert!(invest(&mut failed, &mut investment, &mut roster, 1, after).is_err());
        assert_eq!(failed.advance_on_goal_reached(Stage::Failed, after).unwrap(), Stage::Failed);
        assert_eq!(failed.current_stage(after + 1_000_000).0, Stage::Failed);
    }

    #[test]
    fn test_totals_never_exceed_ceilings() {
        let mut pool = seeding_pool(test_config());
        let mut roster = InvestorRoster::default();
        let amounts = [7u64, 13, 29, 3, 41, 11, 17, 50, 23, 31, 19, 5, 60, 2];
        let mut now = SEEDING_AT;

        for amount in amounts {
            let (stage, _, _) = pool.current_stage(now);
            if stage == Stage::SeedingSucceeded {
                now = ACCELERATION_AT;
            }
            let mut investment = Investment::default();
            let _ = invest(&mut pool, &mut investment, &mut roster, amount, now);

            assert!(pool.raised_amount_total <= 200);
            assert!(pool.issued_token_total <= 10_100);
        }
    }

    #[test]
    fn test_token_obligations() {
        let mut pool = thriving_pool();
        assert_eq!(pool.token_obligations().unwrap(), 10_100 + 50_000);
        pool.book_token_claim(100).unwrap();
        assert_eq!(pool.available_service_balance(70_000).unwrap(), 70_000 - 60_000);
        assert_eq!(pool.available_service_balance(10).unwrap(), 0);
    }

    #[test]
    fn test_liquidity_seeded_once() {
        let mut pool = thriving_pool();
        let (amm, position, nft) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        pool.mark_liquidity_seeded(amm, position, nft).unwrap();
        assert_eq!(pool.amm_pool, Some(amm));
        assert!(pool.mark_liquidity_seeded(amm, position, nft).is_err());
    }

    #[test]
    fn test_refund_rejected_unless_failed() {
        let mut pool = seeding_pool(test_config());
        let mut roster = InvestorRoster::default();
        let mut investment = Investment::default();
        invest(&mut pool, &mut investment, &mut roster, 10, SEEDING_AT).unwrap();

        assert!(pool.refund_quote(&investment, SEEDING_AT).is_err());
        assert!(pool.claim_refund(&mut investment, SEEDING_AT).is_err());
        assert_eq!(investment.seeding_contribution, 10);

        let (mut accelerating, mut roster) = acceleration_pool();
        let mut late = Investment::default();
        invest(&mut accelerating, &mut late, &mut roster, 10, ACCELERATION_AT).unwrap();
        assert!(accelerating.refund_quote(&late, ACCELERATION_AT).is_err());
        assert!(accelerating.claim_refund(&mut late, ACCELERATION_AT).is_err());
        assert_eq!(late.acceleration_contribution, 10);

        let thriving = thriving_pool();
        let mut holder = Investment {
            seeding_contribution: 10,
            ..Investment::default()
        };
        assert!(thriving.refund_quote(&holder, THRIVING_AT + 1_000).is_err());
        assert!(thriving.claim_refund(&mut holder, THRIVING_AT + 1_000).is_err());
        assert_eq!(holder.seeding_contribution, 10);
    }

    #[test]
    fn test_failed_seeding_refunds_once() {
        let mut pool = seeding_pool(test_config());
        let mut roster = InvestorRoster::default();
        let mut investment = Investment::default();
        invest(&mut pool, &mut investment, &mut roster, 20, SEEDING_AT).unwrap();

        let failed_at = SEEDING_AT + 100;
        assert_eq!(pool.current_stage(failed_at).0, Stage::Failed);

        let quote = pool.refund_quote(&investment, failed_at).unwrap();
        assert!(quote.refundable);
        assert_eq!(quote.seeding_fee, 1);
        assert_eq!(quote.seeding_refund, 19);

        assert_eq!(pool.claim_refund(&mut investment, failed_at).unwrap(), quote);
        assert!(!pool.refund_quote(&investment, failed_at + 1).unwrap().refundable);
        assert!(pool.claim_refund(&mut investment, failed_at + 1).is_err());
    }

    #[test]
    fn test_failed_acceleration_refunds_both_stages() {
        let (mut pool, mut roster) = acceleration_pool();
        let mut investment = Investment::default();
        invest(&mut pool, &mut investment, &mut roster, 50, ACCELERATION_AT).unwrap();

        let failed_at = ACCELERATION_AT + 100;
        assert_eq!(pool.current_stage(failed_at).0, Stage::Failed);

        let quote = pool.claim_refund(&mut investment, failed_at).unwrap();
        assert_eq!(quote.acceleration_fee, 1);
        assert_eq!(quote.acceleration_refund, 49);
        assert_eq!(investment.acceleration_contribution, 0);
        assert!(pool.claim_refund(&mut investment, failed_at).is_err());
    }

    #[test]
    fn test_lock_is_exclusive() {
        let mut pool = test_pool(test_config());
        pool.acquire_lock().unwrap();
        assert!(pool.acquire_lock().is_err());
        pool.release_lock();
        pool.acquire_lock().unwrap();
    }
}
