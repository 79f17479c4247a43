use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::*;
use crate::errors::LaunchpadError;
use crate::state::{
    CurveQuote, Investment, InvestorRoster, LaunchPool, RefundQuote, ServiceFeeQuote, Stage,
};

/// Active stage and its `[start, end)` window
#[derive(Debug, Clone, Copy, AnchorSerialize, AnchorDeserialize, PartialEq, Eq)]
pub struct StageInfo {
    pub stage: Stage,
    pub start: i64,
    pub end: i64,
}

#[derive(Accounts)]
pub struct ViewLaunchPool<'info> {
    #[account(
        seeds = [LAUNCH_POOL_SEED, launch_pool.creator.as_ref(), &launch_pool.index.to_le_bytes()],
        bump = launch_pool.bump,
    )]
    pub launch_pool: Box<Account<'info, LaunchPool>>,
}

#[derive(Accounts)]
pub struct ViewInvestment<'info> {
    #[account(
        seeds = [LAUNCH_POOL_SEED, launch_pool.creator.as_ref(), &launch_pool.index.to_le_bytes()],
        bump = launch_pool.bump,
    )]
    pub launch_pool: Box<Account<'info, LaunchPool>>,

    #[account(
        seeds = [INVESTMENT_SEED, launch_pool.key().as_ref(), investment.investor.as_ref()],
        bump = investment.bump,
    )]
    pub investment: Box<Account<'info, Investment>>,
}

#[derive(Accounts)]
pub struct ViewServiceFee<'info> {
    #[account(
        seeds = [LAUNCH_POOL_SEED, launch_pool.creator.as_ref(), &launch_pool.index.to_le_bytes()],
        bump = launch_pool.bump,
    )]
    pub launch_pool: Box<Account<'info, LaunchPool>>,

    #[account(
        address = launch_pool.token_vault @ LaunchpadError::InvalidTokenVault,
    )]
    pub pool_token_vault: Box<Account<'info, TokenAccount>>,
}

#[derive(Accounts)]
pub struct ViewRoster<'info> {
    #[account(
        seeds = [LAUNCH_POOL_SEED, launch_pool.creator.as_ref(), &launch_pool.index.to_le_bytes()],
        bump = launch_pool.bump,
    )]
    pub launch_pool: Box<Account<'info, LaunchPool>>,

    #[account(
        seeds = [INVESTOR_ROSTER_SEED, launch_pool.key().as_ref()],
        bump = investor_roster.bump,
    )]
    pub investor_roster: Box<Account<'info, InvestorRoster>>,
}

pub fn current_stage(ctx: Context<ViewLaunchPool>) -> Result<StageInfo> {
    let current_time = Clock::get()?.unix_timestamp;
    let (stage, start, end) = ctx.accounts.launch_pool.current_stage(current_time);

    Ok(StageInfo { stage, start, end })
}

/// Price a contribution in the active stage without recording it
pub fn quote_investment(ctx: Context<ViewLaunchPool>, amount: u64) -> Result<CurveQuote> {
    let current_time = Clock::get()?.unix_timestamp;
    let launch_pool = &ctx.accounts.launch_pool;

    let (stage, _, _) = launch_pool.current_stage(current_time);
    require!(stage.is_investable(), LaunchpadError::InvalidStage);

    launch_pool.quote(stage, amount)
}

pub fn quote_refund(ctx: Context<ViewInvestment>) -> Result<RefundQuote> {
    let current_time = Clock::get()?.unix_timestamp;
    ctx.accounts
        .launch_pool
        .refund_quote(&ctx.accounts.investment, current_time)
}

/// Service fee owed now; `claimable_only` clamps to what the free vault balance covers
pub fn quote_service_fee(
    ctx: Context<ViewServiceFee>,
    claimable_only: bool,
) -> Result<ServiceFeeQuote> {
    let current_time = Clock::get()?.unix_timestamp;
    let launch_pool = &ctx.accounts.launch_pool;

    let available = launch_pool.available_service_balance(ctx.accounts.pool_token_vault.amount)?;
    launch_pool.quote_service_fee(current_time, available, claimable_only)
}

pub fn roster_slice(
    ctx: Context<ViewRoster>,
    stage: Stage,
    start: u32,
    end: u32,
) -> Result<Vec<Pubkey>> {
    ctx.accounts.investor_roster.slice(stage, start, end)
}
