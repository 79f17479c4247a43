use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::const_pda::const_authority::vault_authority_seeds;
use crate::constants::{GLOBAL_CONFIG_SEED, LAUNCH_POOL_SEED, VAULT_AUTHORITY};
use crate::errors::LaunchpadError;
use crate::events::ServiceFeeClaimed;
use crate::state::{GlobalConfig, LaunchPool};
use crate::utils::GuardedPool;

#[derive(Accounts)]
pub struct ClaimServiceFee<'info> {
    /// Anyone may trigger the payout; it always goes to the treasury
    pub payer: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        mut,
        seeds = [LAUNCH_POOL_SEED, launch_pool.creator.as_ref(), &launch_pool.index.to_le_bytes()],
        bump = launch_pool.bump,
    )]
    pub launch_pool: Box<Account<'info, LaunchPool>>,

    /// vault authority
    #[account(
        seeds = [VAULT_AUTHORITY.as_ref()],
        bump,
    )]
    pub vault_authority: SystemAccount<'info>,

    #[account(
        mut,
        token::mint = launch_pool.token_mint,
        token::authority = vault_authority,
        address = launch_pool.token_vault @ LaunchpadError::InvalidTokenVault,
    )]
    pub pool_token_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = launch_pool.token_mint,
        token::authority = global_config.treasury,
    )]
    pub treasury_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> GuardedPool<'info> for ClaimServiceFee<'info> {
    fn guarded_pool(&mut self) -> &mut Account<'info, LaunchPool> {
        &mut self.launch_pool
    }
}

/// Pay the service fee for every whole period the free vault balance covers
pub fn claim_service_fee(ctx: &mut Context<ClaimServiceFee>) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;

    let available = accounts
        .launch_pool
        .available_service_balance(accounts.pool_token_vault.amount)?;
    let quote = accounts.launch_pool.claim_service_fee(current_time, available)?;
    accounts.launch_pool.exit(&crate::ID)?;

    let seeds = vault_authority_seeds();
    let signer_seeds: &[&[&[u8]]] = &[&seeds[..]];
    token::transfer(
        CpiContext::new_with_signer(
            accounts.token_program.to_account_info(),
            Transfer {
                from: accounts.pool_token_vault.to_account_info(),
                to: accounts.treasury_token_account.to_account_info(),
                authority: accounts.vault_authority.to_account_info(),
            },
            signer_seeds,
        ),
        quote.amount,
    )?;

    emit!(ServiceFeeClaimed {
        pool: accounts.launch_pool.key(),
        treasury: accounts.global_config.treasury,
        periods: quote.periods,
        amount: quote.amount,
        paid_through: quote.paid_through,
        total_paid: accounts.launch_pool.service_fee.total_paid,
    });

    msg!("Service fee paid: {} tokens for {} periods", quote.amount, quote.periods);
    msg!("Paid through: {}", quote.paid_through);

    Ok(())
}
