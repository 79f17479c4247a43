use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::const_pda::const_authority::vault_authority_seeds;
use crate::constants::*;
use crate::errors::LaunchpadError;
use crate::events::RefundClaimed;
use crate::state::{GlobalConfig, Investment, LaunchPool};
use crate::utils::GuardedPool;

#[derive(Accounts)]
pub struct ClaimRefund<'info> {
    #[account(mut)]
    pub investor: Signer<'info>,

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

    #[account(
        mut,
        seeds = [INVESTMENT_SEED, launch_pool.key().as_ref(), investor.key().as_ref()],
        bump = investment.bump,
    )]
    pub investment: Box<Account<'info, Investment>>,

    /// vault authority
    #[account(
        seeds = [VAULT_AUTHORITY.as_ref()],
        bump,
    )]
    pub vault_authority: SystemAccount<'info>,

    /// Pool's quote vault (SOL)
    #[account(
        mut,
        address = launch_pool.quote_vault @ LaunchpadError::InvalidQuoteVault,
        token::authority = vault_authority,
    )]
    pub quote_vault: Box<Account<'info, TokenAccount>>,

    /// Investor's quote account receiving the refund
    #[account(
        mut,
        token::mint = launch_pool.quote_mint,
        token::authority = investor,
    )]
    pub investor_quote_account: Box<Account<'info, TokenAccount>>,

    /// Treasury quote account receiving the refund fee
    #[account(
        mut,
        token::mint = launch_pool.quote_mint,
        token::authority = global_config.treasury,
    )]
    pub treasury_quote_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> GuardedPool<'info> for ClaimRefund<'info> {
    fn guarded_pool(&mut self) -> &mut Account<'info, LaunchPool> {
        &mut self.launch_pool
    }
}

/// Return contributions of a failed launch, net of the refund fees
pub fn claim_refund(ctx: &mut Context<ClaimRefund>) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;

    // Zero the record and persist it before any funds move
    let quote = accounts
        .launch_pool
        .claim_refund(&mut accounts.investment, current_time)?;
    accounts.investment.exit(&crate::ID)?;

    let refund = quote.total_refund()?;
    let fee = quote.total_fee()?;
    require!(
        accounts.quote_vault.amount >= refund.checked_add(fee).ok_or(LaunchpadError::MathOverflow)?,
        LaunchpadError::InsufficientVaultBalance
    );

    let seeds = vault_authority_seeds();
    let signer_seeds: &[&[&[u8]]] = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            accounts.token_program.to_account_info(),
            Transfer {
                from: accounts.quote_vault.to_account_info(),
                to: accounts.investor_quote_account.to_account_info(),
                authority: accounts.vault_authority.to_account_info(),
            },
            signer_seeds,
        ),
        refund,
    )?;

    if fee > 0 {
        token::transfer(
            CpiContext::new_with_signer(
                accounts.token_program.to_account_info(),
                Transfer {
                    from: accounts.quote_vault.to_account_info(),
                    to: accounts.treasury_quote_account.to_account_info(),
                    authority: accounts.vault_authority.to_account_info(),
                },
                signer_seeds,
            ),
            fee,
        )?;
    }

    emit!(RefundClaimed {
        pool: accounts.launch_pool.key(),
        investor: accounts.investor.key(),
        seeding_refund: quote.seeding_refund,
        seeding_fee: quote.seeding_fee,
        acceleration_refund: quote.acceleration_refund,
        acceleration_fee: quote.acceleration_fee,
        timestamp: current_time,
    });

    msg!("Refunded {} to {}", refund, accounts.investor.key());
    msg!("Refund fee: {}", fee);

    Ok(())
}
