use anchor_lang::prelude::*;
use anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;
use anchor_spl::token::{self, Mint, Token, TokenAccount};
use anchor_spl::token_interface::TokenInterface;
use cp_amm::state::Config;

use crate::const_pda::const_authority::AMM_POOL_AUTHORITY;
use crate::constants::*;
use crate::errors::LaunchpadError;
use crate::events::{Invested, StageAdvanced, StagesScheduled, VestingStarted};
use crate::state::{GlobalConfig, Investment, InvestorRoster, LaunchPool, Stage};
use crate::utils::GuardedPool;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InvestParams {
    /// Quote to contribute, a multiple of the contribution unit
    pub amount: u64,
    /// Reject if the contribution buys fewer tokens
    pub min_tokens_out: u64,
}

#[derive(Accounts)]
pub struct Invest<'info> {
    #[account(mut)]
    pub investor: Signer<'info>,

    /// Platform router co-signing every contribution
    #[account(
        mut,
        address = global_config.router @ LaunchpadError::NotRouter,
    )]
    pub router: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED],
        bump = global_config.bump,
        constraint = !global_config.paused @ LaunchpadError::PlatformPaused,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        mut,
        seeds = [LAUNCH_POOL_SEED, launch_pool.creator.as_ref(), &launch_pool.index.to_le_bytes()],
        bump = launch_pool.bump,
    )]
    pub launch_pool: Box<Account<'info, LaunchPool>>,

    #[account(
        mut,
        seeds = [INVESTOR_ROSTER_SEED, launch_pool.key().as_ref()],
        bump = investor_roster.bump,
    )]
    pub investor_roster: Box<Account<'info, InvestorRoster>>,

    #[account(
        init_if_needed,
        payer = investor,
        space = Investment::SIZE,
        seeds = [INVESTMENT_SEED, launch_pool.key().as_ref(), investor.key().as_ref()],
        bump,
    )]
    pub investment: Box<Account<'info, Investment>>,

    /// vault authority
    #[account(
        mut,
        seeds = [VAULT_AUTHORITY.as_ref()],
        bump,
    )]
    pub vault_authority: SystemAccount<'info>,

    #[account(
        address = launch_pool.token_mint @ LaunchpadError::InvalidTokenMint,
    )]
    pub token_mint: Box<Account<'info, Mint>>,

    #[account(
        address = launch_pool.quote_mint @ LaunchpadError::InvalidQuoteMint,
    )]
    pub quote_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        address = launch_pool.token_vault @ LaunchpadError::InvalidTokenVault,
        token::mint = token_mint,
        token::authority = vault_authority,
    )]
    pub token_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        address = launch_pool.quote_vault @ LaunchpadError::InvalidQuoteVault,
        token::mint = quote_mint,
        token::authority = vault_authority,
    )]
    pub quote_vault: Box<Account<'info, TokenAccount>>,

    // ===== Liquidity seeding, required only by the contribution that completes the launch =====
    /// CHECK: AMM pool authority
    #[account(address = AMM_POOL_AUTHORITY)]
    pub amm_pool_authority: Option<UncheckedAccount<'info>>,

    pub amm_config: Option<AccountLoader<'info, Config>>,

    /// CHECK: pool created by the AMM, must not exist yet
    #[account(mut)]
    pub amm_pool: Option<UncheckedAccount<'info>>,

    #[account(mut)]
    pub position_nft_mint: Option<Signer<'info>>,

    /// CHECK: created by the AMM
    #[account(mut)]
    pub position_nft_account: Option<UncheckedAccount<'info>>,

    /// CHECK: created by the AMM
    #[account(mut)]
    pub position: Option<UncheckedAccount<'info>>,

    /// CHECK: created by the AMM
    #[account(mut)]
    pub amm_token_a_vault: Option<UncheckedAccount<'info>>,

    /// CHECK: created by the AMM
    #[account(mut)]
    pub amm_token_b_vault: Option<UncheckedAccount<'info>>,

    /// CHECK: AMM program
    #[account(address = cp_amm::ID)]
    pub amm_program: Option<UncheckedAccount<'info>>,

    /// CHECK: AMM event authority
    pub amm_event_authority: Option<UncheckedAccount<'info>>,

    pub token_2022_program: Option<Interface<'info, TokenInterface>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> GuardedPool<'info> for Invest<'info> {
    fn guarded_pool(&mut self) -> &mut Account<'info, LaunchPool> {
        &mut self.launch_pool
    }
}

impl<'info> Invest<'info> {
    /// Make room for the roster entry just appended, topping up rent from the investor
    fn grow_roster(&self) -> Result<()> {
        let roster_info = self.investor_roster.to_account_info();
        let required_space = self.investor_roster.required_space();
        if roster_info.data_len() >= required_space {
            return Ok(());
        }

        let required_lamports = Rent::get()?.minimum_balance(required_space);
        let top_up = required_lamports.saturating_sub(roster_info.lamports());
        if top_up > 0 {
            anchor_lang::system_program::transfer(
                CpiContext::new(
                    self.system_program.to_account_info(),
                    anchor_lang::system_program::Transfer {
                        from: self.investor.to_account_info(),
                        to: roster_info.clone(),
                    },
                ),
                top_up,
            )?;
        }

        roster_info.realloc(required_space, false)?;
        Ok(())
    }

    /// Move the contribution into the quote vault as WSOL
    fn deposit_contribution(&self, amount: u64) -> Result<()> {
        anchor_lang::system_program::transfer(
            CpiContext::new(
                self.system_program.to_account_info(),
                anchor_lang::system_program::Transfer {
                    from: self.investor.to_account_info(),
                    to: self.quote_vault.to_account_info(),
                },
            ),
            amount,
        )?;

        token::sync_native(CpiContext::new(
            self.token_program.to_account_info(),
            token::SyncNative {
                account: self.quote_vault.to_account_info(),
            },
        ))
    }
}

pub fn invest(ctx: &mut Context<Invest>, params: InvestParams) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;
    let investor_key = ctx.accounts.investor.key();
    let pool_key = ctx.accounts.launch_pool.key();

    let investment = &mut ctx.accounts.investment;
    if investment.investor == Pubkey::default() {
        investment.investor = investor_key;
        investment.pool = pool_key;
        investment.bump = ctx.bumps.investment;
    }

    let accounts = &mut *ctx.accounts;
    let outcome = accounts.launch_pool.invest(
        &mut accounts.investment,
        &mut accounts.investor_roster,
        investor_key,
        params.amount,
        params.min_tokens_out,
        current_time,
    )?;

    if outcome.first_appearance {
        accounts.grow_roster()?;
    }
    accounts.deposit_contribution(params.amount)?;

    let launch_pool = &accounts.launch_pool;
    emit!(Invested {
        pool: pool_key,
        investor: investor_key,
        stage: outcome.stage as u8,
        amount: params.amount,
        tokens_out: outcome.tokens_out,
        stage_contribution: accounts.investment.contribution_in(outcome.stage),
        raised_amount_total: launch_pool.raised_amount_total,
        issued_token_total: launch_pool.issued_token_total,
        first_appearance: outcome.first_appearance,
        timestamp: current_time,
    });

    msg!("Investor {} contributed {} in {:?}", investor_key, params.amount, outcome.stage);
    msg!("Tokens out: {}", outcome.tokens_out);
    msg!("Total raised: {} SOL", launch_pool.raised_amount_total / LAMPORTS_PER_SOL);

    if outcome.next_stage == outcome.stage {
        return Ok(());
    }

    emit!(StageAdvanced {
        pool: pool_key,
        from_stage: outcome.stage as u8,
        to_stage: outcome.next_stage as u8,
        raised_amount_total: launch_pool.raised_amount_total,
        issued_token_total: launch_pool.issued_token_total,
        timestamp: current_time,
    });
    msg!("Stage advanced: {:?} -> {:?}", outcome.stage, outcome.next_stage);

    if outcome.next_stage == Stage::SeedingSucceeded {
        let announcement = launch_pool.schedule.window(Stage::SeedingSucceeded);
        let acceleration = launch_pool.schedule.window(Stage::Acceleration);
        emit!(StagesScheduled {
            pool: pool_key,
            stage: Stage::SeedingSucceeded as u8,
            stage_start: announcement.start,
            stage_end: announcement.end,
            next_start: acceleration.start,
            next_end: acceleration.end,
            failed_start: launch_pool.schedule.window(Stage::Failed).start,
        });
    }

    if outcome.entered_thriving {
        let vesting = launch_pool.vesting;
        let creator = launch_pool.creator;

        accounts.seed_liquidity(current_time)?;

        emit!(VestingStarted {
            pool: pool_key,
            creator,
            allocation: vesting.allocation,
            unlock_start_time: vesting.unlock_start_time,
            lock_duration: vesting.lock_duration,
            linear_unlock_duration: vesting.linear_unlock_duration,
        });
        msg!("Creator vesting started at {}", vesting.unlock_start_time);
    }

    Ok(())
}
