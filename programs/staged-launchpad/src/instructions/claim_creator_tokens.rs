use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::const_pda::const_authority::vault_authority_seeds;
use crate::constants::{LAUNCH_POOL_SEED, TOKEN_VAULT, VAULT_AUTHORITY};
use crate::errors::LaunchpadError;
use crate::events::CreatorTokensClaimed;
use crate::state::LaunchPool;
use crate::utils::GuardedPool;

#[derive(Accounts)]
pub struct ClaimCreatorTokens<'info> {
    /// Creator account, must be the project creator
    #[account(
        mut,
        constraint = creator.key() == launch_pool.creator @ LaunchpadError::NotCreator
    )]
    pub creator: Signer<'info>,

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

    /// Launch pool token vault
    #[account(
        mut,
        seeds = [TOKEN_VAULT, vault_authority.key().as_ref(), launch_pool.token_mint.as_ref()],
        bump,
        token::mint = launch_pool.token_mint,
        token::authority = vault_authority,
        address = launch_pool.token_vault @ LaunchpadError::InvalidTokenVault,
    )]
    pub pool_token_vault: Box<Account<'info, TokenAccount>>,

    /// Creator token receiving account
    #[account(
        mut,
        token::mint = launch_pool.token_mint,
        token::authority = creator,
    )]
    pub creator_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> GuardedPool<'info> for ClaimCreatorTokens<'info> {
    fn guarded_pool(&mut self) -> &mut Account<'info, LaunchPool> {
        &mut self.launch_pool
    }
}

/// Creator claim tokens (supports batch claiming)
pub fn claim_creator_tokens(ctx: &mut Context<ClaimCreatorTokens>) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;

    // Vesting only starts once the launch thrives, so nothing unlocks before that
    let claimable_amount = accounts.launch_pool.vesting.claim(current_time)?;
    accounts.launch_pool.exit(&crate::ID)?;

    // Verify if token vault has sufficient balance
    require!(
        accounts.pool_token_vault.amount >= claimable_amount,
        LaunchpadError::InsufficientVaultBalance
    );

    msg!("Creator claiming {} tokens", claimable_amount);

    let seeds = vault_authority_seeds();
    let signer_seeds: &[&[&[u8]]] = &[&seeds[..]];
    token::transfer(
        CpiContext::new_with_signer(
            accounts.token_program.to_account_info(),
            Transfer {
                from: accounts.pool_token_vault.to_account_info(),
                to: accounts.creator_token_account.to_account_info(),
                authority: accounts.vault_authority.to_account_info(),
            },
            signer_seeds,
        ),
        claimable_amount,
    )?;

    let vesting = accounts.launch_pool.vesting;
    let remaining_claimable = vesting.remaining();
    let fully_unlocked = remaining_claimable == 0;

    emit!(CreatorTokensClaimed {
        pool: accounts.launch_pool.key(),
        creator: accounts.creator.key(),
        token_mint: accounts.launch_pool.token_mint,
        claimed_amount: claimable_amount,
        total_claimed: vesting.claimed,
        total_allocation: vesting.allocation,
        remaining_claimable,
        fully_unlocked,
        timestamp: current_time,
    });

    msg!("Creator tokens claimed successfully");
    msg!("Total claimed: {} tokens", vesting.claimed);
    msg!("Remaining allocation: {} tokens", remaining_claimable);

    Ok(())
}
