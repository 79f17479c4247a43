use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::const_pda::const_authority::vault_authority_seeds;
use crate::constants::{LAUNCH_POOL_SEED, VAULT_AUTHORITY};
use crate::errors::LaunchpadError;
use crate::events::RaisedFundsWithdrawn;
use crate::state::{LaunchPool, Stage};
use crate::utils::GuardedPool;

#[derive(Accounts)]
pub struct WithdrawRaisedFunds<'info> {
    pub creator: Signer<'info>,

    #[account(
        mut,
        seeds = [LAUNCH_POOL_SEED, launch_pool.creator.as_ref(), &launch_pool.index.to_le_bytes()],
        bump = launch_pool.bump,
        constraint = launch_pool.creator == creator.key() @ LaunchpadError::NotCreator,
        constraint = launch_pool.liquidity_seeded @ LaunchpadError::InvalidStage,
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
        address = launch_pool.quote_vault @ LaunchpadError::InvalidQuoteVault,
        token::authority = vault_authority,
    )]
    pub quote_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = launch_pool.quote_mint,
        token::authority = creator,
    )]
    pub creator_quote_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> GuardedPool<'info> for WithdrawRaisedFunds<'info> {
    fn guarded_pool(&mut self) -> &mut Account<'info, LaunchPool> {
        &mut self.launch_pool
    }
}

/// Hand the quote not used by the liquidity seed to the creator
pub fn withdraw_raised_funds(ctx: &mut Context<WithdrawRaisedFunds>) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;

    let (stage, _, _) = accounts.launch_pool.current_stage(current_time);
    require!(stage == Stage::Thriving, LaunchpadError::InvalidStage);

    let amount = accounts.quote_vault.amount;
    require!(amount > 0, LaunchpadError::NothingToClaim);

    let seeds = vault_authority_seeds();
    let signer_seeds: &[&[&[u8]]] = &[&seeds[..]];
    token::transfer(
        CpiContext::new_with_signer(
            accounts.token_program.to_account_info(),
            Transfer {
                from: accounts.quote_vault.to_account_info(),
                to: accounts.creator_quote_account.to_account_info(),
                authority: accounts.vault_authority.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(RaisedFundsWithdrawn {
        pool: accounts.launch_pool.key(),
        creator: accounts.creator.key(),
        amount,
        timestamp: current_time,
    });

    msg!("Creator withdrew {} raised quote", amount);

    Ok(())
}
