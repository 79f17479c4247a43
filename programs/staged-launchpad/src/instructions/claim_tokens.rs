use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::const_pda::const_authority::vault_authority_seeds;
use crate::constants::{INVESTMENT_SEED, LAUNCH_POOL_SEED, VAULT_AUTHORITY};
use crate::errors::LaunchpadError;
use crate::events::TokensClaimed;
use crate::state::{Investment, LaunchPool, Stage};
use crate::utils::GuardedPool;

#[derive(Accounts)]
pub struct ClaimTokens<'info> {
    #[account(mut)]
    pub investor: Signer<'info>,

    /// vault authority
    #[account(
        seeds = [VAULT_AUTHORITY.as_ref()],
        bump,
    )]
    pub vault_authority: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [LAUNCH_POOL_SEED, launch_pool.creator.as_ref(), &launch_pool.index.to_le_bytes()],
        bump = launch_pool.bump,
    )]
    pub launch_pool: Box<Account<'info, LaunchPool>>,

    #[account(
        mut,
        seeds = [INVESTMENT_SEED, launch_pool.key().as_ref(), investor.key().as_ref()],
        bump = investment.bump,
    )]
    pub investment: Box<Account<'info, Investment>>,

    /// Pool's token vault
    #[account(
        mut,
        token::mint = launch_pool.token_mint,
        token::authority = vault_authority,
        address = launch_pool.token_vault @ LaunchpadError::InvalidTokenVault,
    )]
    pub pool_token_vault: Box<Account<'info, TokenAccount>>,

    /// Investor's token account to receive tokens
    #[account(
        mut,
        token::mint = launch_pool.token_mint,
        token::authority = investor,
    )]
    pub investor_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> GuardedPool<'info> for ClaimTokens<'info> {
    fn guarded_pool(&mut self) -> &mut Account<'info, LaunchPool> {
        &mut self.launch_pool
    }
}

/// Pay out the tokens an investor bought, once the launch thrives
pub fn claim_tokens(ctx: &mut Context<ClaimTokens>) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;

    let (stage, _, _) = accounts.launch_pool.current_stage(current_time);
    require!(stage == Stage::Thriving, LaunchpadError::InvalidStage);

    let amount = accounts.investment.take_tokens(current_time)?;
    accounts.launch_pool.book_token_claim(amount)?;
    accounts.investment.exit(&crate::ID)?;
    accounts.launch_pool.exit(&crate::ID)?;

    require!(
        accounts.pool_token_vault.amount >= amount,
        LaunchpadError::InsufficientVaultBalance
    );

    let seeds = vault_authority_seeds();
    let signer_seeds: &[&[&[u8]]] = &[&seeds[..]];
    token::transfer(
        CpiContext::new_with_signer(
            accounts.token_program.to_account_info(),
            Transfer {
                from: accounts.pool_token_vault.to_account_info(),
                to: accounts.investor_token_account.to_account_info(),
                authority: accounts.vault_authority.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(TokensClaimed {
        pool: accounts.launch_pool.key(),
        investor: accounts.investor.key(),
        token_mint: accounts.launch_pool.token_mint,
        amount,
        claimed_token_total: accounts.launch_pool.claimed_token_total,
        timestamp: current_time,
    });

    msg!("Investor {} claimed {} tokens", accounts.investor.key(), amount);

    Ok(())
}
