use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;

use crate::const_pda::const_authority::vault_authority_seeds;
use crate::constants::LIQUIDITY_SEED_RENT_RESERVE;
use crate::errors::LaunchpadError;
use crate::events::LiquiditySeeded;
use crate::instructions::Invest;
use crate::utils::{get_liquidity_for_adding_liquidity, sqrt_price_from_amounts};

/// The seed must open the AMM pool itself so the seed amounts set the opening price.
///
/// An existing pool is rejected rather than topped up: the AMM derives one pool per
/// config and mint pair, and an already initialized one was priced by someone else.
fn require_new_amm_pool(amm_pool: &AccountInfo) -> Result<()> {
    require!(amm_pool.data_is_empty(), LaunchpadError::PoolAlreadyExists);
    Ok(())
}

impl<'info> Invest<'info> {
    /// Create the AMM pool and deposit the configured liquidity seed.
    ///
    /// Runs once, inside the contribution that moves the launch into thriving.
    pub fn seed_liquidity(&mut self, current_time: i64) -> Result<()> {
        // Picks up the contribution deposited in this instruction
        self.quote_vault.reload()?;

        let (
            Some(amm_pool_authority),
            Some(amm_config),
            Some(amm_pool),
            Some(position_nft_mint),
            Some(position_nft_account),
            Some(position),
            Some(amm_token_a_vault),
            Some(amm_token_b_vault),
            Some(amm_program),
            Some(amm_event_authority),
            Some(token_2022_program),
        ) = (
            self.amm_pool_authority.as_ref(),
            self.amm_config.as_ref(),
            self.amm_pool.as_ref(),
            self.position_nft_mint.as_ref(),
            self.position_nft_account.as_ref(),
            self.position.as_ref(),
            self.amm_token_a_vault.as_ref(),
            self.amm_token_b_vault.as_ref(),
            self.amm_program.as_ref(),
            self.amm_event_authority.as_ref(),
            self.token_2022_program.as_ref(),
        )
        else {
            return err!(LaunchpadError::LiquidityAccountsMissing);
        };

        require_new_amm_pool(amm_pool)?;

        let base_amount = self.launch_pool.config.liquidity_token_amount;
        let quote_amount = self.launch_pool.config.liquidity_quote_amount;
        require!(
            self.token_vault.amount >= base_amount && self.quote_vault.amount >= quote_amount,
            LaunchpadError::InsufficientVaultBalance
        );

        let (sqrt_min_price, sqrt_max_price) = {
            let config = amm_config.load()?;
            (config.sqrt_min_price, config.sqrt_max_price)
        };
        let sqrt_price =
            sqrt_price_from_amounts(base_amount, quote_amount, sqrt_min_price, sqrt_max_price)?;
        let liquidity = get_liquidity_for_adding_liquidity(
            base_amount,
            quote_amount,
            sqrt_price,
            sqrt_min_price,
            sqrt_max_price,
        )?;

        self.launch_pool.mark_liquidity_seeded(
            amm_pool.key(),
            position.key(),
            position_nft_account.key(),
        )?;
        self.launch_pool.exit(&crate::ID)?;

        // The vault authority pays for the pool and position accounts
        anchor_lang::system_program::transfer(
            CpiContext::new(
                self.system_program.to_account_info(),
                anchor_lang::system_program::Transfer {
                    from: self.router.to_account_info(),
                    to: self.vault_authority.to_account_info(),
                },
            ),
            LIQUIDITY_SEED_RENT_RESERVE,
        )?;

        let seeds = vault_authority_seeds();
        let signer_seeds: &[&[&[u8]]] = &[&seeds[..]];

        cp_amm::cpi::initialize_pool(
            CpiContext::new_with_signer(
                amm_program.to_account_info(),
                cp_amm::cpi::accounts::InitializePoolCtx {
                    creator: self.vault_authority.to_account_info(),
                    position_nft_mint: position_nft_mint.to_account_info(),
                    position_nft_account: position_nft_account.to_account_info(),
                    payer: self.vault_authority.to_account_info(),
                    config: amm_config.to_account_info(),
                    pool_authority: amm_pool_authority.to_account_info(),
                    pool: amm_pool.to_account_info(),
                    position: position.to_account_info(),
                    token_a_mint: self.token_mint.to_account_info(),
                    token_b_mint: self.quote_mint.to_account_info(),
                    token_a_vault: amm_token_a_vault.to_account_info(),
                    token_b_vault: amm_token_b_vault.to_account_info(),
                    payer_token_a: self.token_vault.to_account_info(),
                    payer_token_b: self.quote_vault.to_account_info(),
                    token_a_program: self.token_program.to_account_info(),
                    token_b_program: self.token_program.to_account_info(),
                    token_2022_program: token_2022_program.to_account_info(),
                    system_program: self.system_program.to_account_info(),
                    event_authority: amm_event_authority.to_account_info(),
                    program: amm_program.to_account_info(),
                },
                signer_seeds,
            ),
            cp_amm::InitializePoolParameters {
                liquidity,
                sqrt_price,
                activation_point: None,
            },
        )?;

        emit!(LiquiditySeeded {
            launch_pool: self.launch_pool.key(),
            amm_pool: amm_pool.key(),
            position: position.key(),
            token_mint: self.launch_pool.token_mint,
            quote_mint: self.launch_pool.quote_mint,
            token_amount: base_amount,
            quote_amount,
            liquidity,
            sqrt_price,
            timestamp: current_time,
        });

        msg!("Liquidity seeded into AMM pool {}", amm_pool.key());
        msg!("Token amount: {}, quote amount: {}", base_amount, quote_amount);

        Ok(())
    }
}
