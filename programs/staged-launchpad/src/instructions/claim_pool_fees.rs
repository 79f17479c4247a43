use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{self, Token, Transfer},
    token_interface::{TokenAccount, TokenInterface},
};

use crate::const_pda::const_authority::{vault_authority_seeds, AMM_POOL_AUTHORITY};
use crate::constants::{GLOBAL_CONFIG_SEED, LAUNCH_POOL_SEED, VAULT_AUTHORITY};
use crate::errors::LaunchpadError;
use crate::events::PoolFeesClaimed;
use crate::state::{GlobalConfig, LaunchPool};
use crate::utils::GuardedPool;

#[derive(Accounts)]
pub struct ClaimPoolFees<'info> {
    /// CHECK: pool authority
    #[account(
        mut,
        address = AMM_POOL_AUTHORITY,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [LAUNCH_POOL_SEED, launch_pool.creator.as_ref(), &launch_pool.index.to_le_bytes()],
        bump = launch_pool.bump,
        constraint = launch_pool.liquidity_seeded @ LaunchpadError::InvalidStage,
    )]
    pub launch_pool: Box<Account<'info, LaunchPool>>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    /// CHECK: vault authority
    #[account(
        mut,
        seeds = [VAULT_AUTHORITY.as_ref()],
        bump,
    )]
    pub vault_authority: SystemAccount<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: fee sink
    #[account(address = global_config.treasury)]
    pub treasury: UncheckedAccount<'info>,

    /// CHECK: verified against launch_pool.creator
    #[account(address = launch_pool.creator @ LaunchpadError::NotCreator)]
    pub creator: UncheckedAccount<'info>,

    /// CHECK: pool address
    #[account(
        constraint = launch_pool.amm_pool == Some(pool.key()) @ LaunchpadError::InvalidPosition,
    )]
    pub pool: UncheckedAccount<'info>,

    /// CHECK: position address
    #[account(
        mut,
        constraint = launch_pool.position == Some(position.key()) @ LaunchpadError::InvalidPosition,
    )]
    pub position: UncheckedAccount<'info>,

    /// CHECK: position NFT account held by the vault authority
    #[account(
        constraint = launch_pool.position_nft_account == Some(position_nft_account.key())
            @ LaunchpadError::InvalidPositionNftAccount,
    )]
    pub position_nft_account: UncheckedAccount<'info>,

    /// Treasury token a account
    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = token_a_mint,
        associated_token::authority = treasury,
        associated_token::token_program = token_a_program,
    )]
    pub treasury_token_a_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Treasury token b account
    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = token_b_mint,
        associated_token::authority = treasury,
        associated_token::token_program = token_b_program,
    )]
    pub treasury_token_b_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Creator token a account
    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = token_a_mint,
        associated_token::authority = creator,
        associated_token::token_program = token_a_program,
    )]
    pub creator_token_a_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Creator token b account
    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = token_b_mint,
        associated_token::authority = creator,
        associated_token::token_program = token_b_program,
    )]
    pub creator_token_b_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Vault authority token a account (receives fees from AMM)
    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = token_a_mint,
        associated_token::authority = vault_authority,
        associated_token::token_program = token_a_program,
    )]
    pub vault_token_a_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Vault authority token b account (receives fees from AMM)
    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = token_b_mint,
        associated_token::authority = vault_authority,
        associated_token::token_program = token_b_program,
    )]
    pub vault_token_b_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// The AMM vault of token a
    #[account(mut, token::token_program = token_a_program, token::mint = token_a_mint)]
    pub token_a_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// The AMM vault of token b
    #[account(mut, token::token_program = token_b_program, token::mint = token_b_mint)]
    pub token_b_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: launch token
    #[account(address = launch_pool.token_mint @ LaunchpadError::InvalidTokenMint)]
    pub token_a_mint: UncheckedAccount<'info>,

    /// CHECK: quote token
    #[account(address = launch_pool.quote_mint @ LaunchpadError::InvalidQuoteMint)]
    pub token_b_mint: UncheckedAccount<'info>,

    pub token_a_program: Interface<'info, TokenInterface>,

    pub token_b_program: Interface<'info, TokenInterface>,

    /// CHECK: amm program address
    #[account(address = cp_amm::ID)]
    pub amm_program: UncheckedAccount<'info>,

    /// CHECK: amm program event authority
    pub event_authority: UncheckedAccount<'info>,
    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

impl<'info> GuardedPool<'info> for ClaimPoolFees<'info> {
    fn guarded_pool(&mut self) -> &mut Account<'info, LaunchPool> {
        &mut self.launch_pool
    }
}

/// Half of each claimed amount for the treasury, the rest (with the odd unit) for the creator
fn split_fee(claimed: u64) -> (u64, u64) {
    let to_treasury = claimed / 2;
    (to_treasury, claimed - to_treasury)
}

impl<'info> ClaimPoolFees<'info> {
    fn pay_out(
        &self,
        from: &InterfaceAccount<'info, TokenAccount>,
        to: &InterfaceAccount<'info, TokenAccount>,
        amount: u64,
    ) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }

        let seeds = vault_authority_seeds();
        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                Transfer {
                    from: from.to_account_info(),
                    to: to.to_account_info(),
                    authority: self.vault_authority.to_account_info(),
                },
                &[&seeds[..]],
            ),
            amount,
        )
    }

    pub fn claim_position_fee(&mut self) -> Result<()> {
        let seeds = vault_authority_seeds();

        // Record the balances before claiming fees
        let token_a_before = self.vault_token_a_account.amount;
        let token_b_before = self.vault_token_b_account.amount;

        // Claim fees from AMM to vault_authority's token accounts
        cp_amm::cpi::claim_position_fee(
            CpiContext::new_with_signer(
                self.amm_program.to_account_info(),
                cp_amm::cpi::accounts::ClaimPositionFeeCtx {
                    pool_authority: self.pool_authority.to_account_info(),
                    pool: self.pool.to_account_info(),
                    position: self.position.to_account_info(),
                    token_a_account: self.vault_token_a_account.to_account_info(),
                    token_b_account: self.vault_token_b_account.to_account_info(),
                    token_a_vault: self.token_a_vault.to_account_info(),
                    token_b_vault: self.token_b_vault.to_account_info(),
                    token_a_mint: self.token_a_mint.to_account_info(),
                    token_b_mint: self.token_b_mint.to_account_info(),
                    position_nft_account: self.position_nft_account.to_account_info(),
                    owner: self.vault_authority.to_account_info(),
                    token_a_program: self.token_a_program.to_account_info(),
                    token_b_program: self.token_b_program.to_account_info(),
                    event_authority: self.event_authority.to_account_info(),
                    program: self.amm_program.to_account_info(),
                },
                &[&seeds[..]],
            )
        )?;

        self.vault_token_a_account.reload()?;
        self.vault_token_b_account.reload()?;

        let token_a_claimed = self.vault_token_a_account.amount.saturating_sub(token_a_before);
        let token_b_claimed = self.vault_token_b_account.amount.saturating_sub(token_b_before);
        let (token_a_to_treasury, token_a_to_creator) = split_fee(token_a_claimed);
        let (token_b_to_treasury, token_b_to_creator) = split_fee(token_b_claimed);

        self.pay_out(&self.vault_token_a_account, &self.treasury_token_a_account, token_a_to_treasury)?;
        self.pay_out(&self.vault_token_a_account, &self.creator_token_a_account, token_a_to_creator)?;
        self.pay_out(&self.vault_token_b_account, &self.treasury_token_b_account, token_b_to_treasury)?;
        self.pay_out(&self.vault_token_b_account, &self.creator_token_b_account, token_b_to_creator)?;

        emit!(PoolFeesClaimed {
            pool: self.launch_pool.key(),
            amm_pool: self.pool.key(),
            token_a_claimed,
            token_b_claimed,
            token_a_to_treasury,
            token_b_to_treasury,
            timestamp: Clock::get()?.unix_timestamp,
        });

        msg!("Fees claimed and distributed successfully");
        msg!("Token A claimed: {}, {} to treasury, {} to creator", token_a_claimed, token_a_to_treasury, token_a_to_creator);
        msg!("Token B claimed: {}, {} to treasury, {} to creator", token_b_claimed, token_b_to_treasury, token_b_to_creator);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fee_gives_odd_unit_to_creator() {
        assert_eq!(split_fee(0), (0, 0));
        assert_eq!(split_fee(1), (0, 1));
        assert_eq!(split_fee(101), (50, 51));
        assert_eq!(split_fee(u64::MAX), (u64::MAX / 2, u64::MAX - u64::MAX / 2));
    }
}
