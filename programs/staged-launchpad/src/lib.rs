#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

mod const_pda;
pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;
use state::{CurveQuote, RefundQuote, ServiceFeeQuote, Stage};

declare_id!("9hKhCnHWXsV4WSp2Cj7gs8wryRLLf8cVtrWjCFXLmDEE");

#[program]
pub mod staged_launchpad {
    use super::*;

    /// Initialize global configuration
    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        params: InitializeConfigParams,
    ) -> Result<()> {
        instructions::initialize_config(ctx, params)
    }

    /// Update global configuration (admin only)
    pub fn update_config(
        ctx: Context<UpdateConfig>,
        params: UpdateConfigParams,
    ) -> Result<()> {
        instructions::update_config(ctx, params)
    }

    /// Initialize a new token launch pool
    pub fn initialize_launch(
        ctx: Context<InitializeLaunch>,
        params: InitializeLaunchParams,
    ) -> Result<()> {
        instructions::initialize_launch(ctx, params)
    }

    /// Leave genesis and schedule the seeding stage
    pub fn start_launch(ctx: Context<StartLaunch>) -> Result<()> {
        let mut ctx = ctx;
        utils::non_reentrant(&mut ctx, |ctx| instructions::start_launch(ctx))
    }

    /// Contribute quote in the seeding or acceleration stage
    pub fn invest(ctx: Context<Invest>, params: InvestParams) -> Result<()> {
        let mut ctx = ctx;
        utils::non_reentrant(&mut ctx, |ctx| instructions::invest(ctx, params))
    }

    /// Claim refund of a failed launch
    pub fn claim_refund(ctx: Context<ClaimRefund>) -> Result<()> {
        let mut ctx = ctx;
        utils::non_reentrant(&mut ctx, |ctx| instructions::claim_refund(ctx))
    }

    /// Claim tokens bought in a successful launch
    pub fn claim_tokens(ctx: Context<ClaimTokens>) -> Result<()> {
        let mut ctx = ctx;
        utils::non_reentrant(&mut ctx, |ctx| instructions::claim_tokens(ctx))
    }

    /// Pay accrued service fees to the treasury
    pub fn claim_service_fee(ctx: Context<ClaimServiceFee>) -> Result<()> {
        let mut ctx = ctx;
        utils::non_reentrant(&mut ctx, |ctx| instructions::claim_service_fee(ctx))
    }

    /// Claim creator tokens (with vesting)
    pub fn claim_creator_tokens(ctx: Context<ClaimCreatorTokens>) -> Result<()> {
        let mut ctx = ctx;
        utils::non_reentrant(&mut ctx, |ctx| instructions::claim_creator_tokens(ctx))
    }

    /// Collect AMM position fees and split them with the treasury
    pub fn claim_pool_fees(ctx: Context<ClaimPoolFees>) -> Result<()> {
        let mut ctx = ctx;
        utils::non_reentrant(&mut ctx, |ctx| ctx.accounts.claim_position_fee())
    }

    /// Withdraw quote left after liquidity seeding
    pub fn withdraw_raised_funds(ctx: Context<WithdrawRaisedFunds>) -> Result<()> {
        let mut ctx = ctx;
        utils::non_reentrant(&mut ctx, |ctx| instructions::withdraw_raised_funds(ctx))
    }

    // ===== Views =====

    pub fn current_stage(ctx: Context<ViewLaunchPool>) -> Result<StageInfo> {
        instructions::current_stage(ctx)
    }

    pub fn quote_investment(ctx: Context<ViewLaunchPool>, amount: u64) -> Result<CurveQuote> {
        instructions::quote_investment(ctx, amount)
    }

    pub fn quote_refund(ctx: Context<ViewInvestment>) -> Result<RefundQuote> {
        instructions::quote_refund(ctx)
    }

    pub fn quote_service_fee(
        ctx: Context<ViewServiceFee>,
        claimable_only: bool,
    ) -> Result<ServiceFeeQuote> {
        instructions::quote_service_fee(ctx, claimable_only)
    }

    pub fn roster_slice(
        ctx: Context<ViewRoster>,
        stage: Stage,
        start: u32,
        end: u32,
    ) -> Result<Vec<Pubkey>> {
        instructions::roster_slice(ctx, stage, start, end)
    }
}
