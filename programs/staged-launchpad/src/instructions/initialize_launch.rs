use anchor_lang::prelude::*;
use anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;
use anchor_spl::token::{self, Mint, Token, TokenAccount};
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::metadata::{
    create_metadata_accounts_v3,
    CreateMetadataAccountsV3,
    Metadata,
};
use mpl_token_metadata::types::DataV2;

use crate::constants::*;
use crate::errors::LaunchpadError;
use crate::events::LaunchPoolInitialized;
use crate::state::{
    CreatorVesting, GlobalConfig, InvestorRoster, LaunchConfig, LaunchPool, StageSchedule,
};
use crate::utils::{calculate_token_allocations, AllocationShares};

#[derive(AnchorSerialize, AnchorDeserialize, Default)]
pub struct InitializeLaunchParams {
    pub token_name: String,
    pub token_symbol: String,
    pub token_uri: String,
    /// Genesis start, defaults to now
    pub start_time: Option<i64>,
    pub contribution_unit: Option<u64>,
    pub seeding_goal: Option<u64>,
    pub acceleration_goal: Option<u64>,
    pub seeding_allocation_ppm: Option<u32>,
    pub acceleration_allocation_ppm: Option<u32>,
    pub liquidity_allocation_ppm: Option<u32>,
    pub creator_allocation_ppm: Option<u32>,
    pub seeding_max_per_investor: Option<u64>,
    pub acceleration_max_per_investor: Option<u64>,
    pub virtual_quote: Option<u64>,
    /// Derived from the acceleration allocation when not provided
    pub virtual_token: Option<u64>,
    pub liquidity_quote_amount: Option<u64>,
    pub genesis_succeeded_duration: Option<i64>,
    pub seeding_duration: Option<i64>,
    pub seeding_succeeded_duration: Option<i64>,
    pub acceleration_duration: Option<i64>,
    pub lock_duration: Option<i64>,  // Creator token lock duration (in seconds)
    pub linear_unlock_duration: Option<i64>,  // Creator token linear unlock duration (in seconds)
}

#[derive(Accounts)]
#[instruction(params: InitializeLaunchParams)]
pub struct InitializeLaunch<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Global configuration account
    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED],
        bump = global_config.bump,
        constraint = !global_config.paused @ LaunchpadError::PlatformPaused,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    /// Launch pool account
    #[account(
        init,
        payer = creator,
        space = LaunchPool::SIZE,
        seeds = [LAUNCH_POOL_SEED, creator.key().as_ref(), &global_config.pool_count.to_le_bytes()],
        bump,
    )]
    pub launch_pool: Box<Account<'info, LaunchPool>>,

    /// Investor lists, grown as investors first appear
    #[account(
        init,
        payer = creator,
        space = InvestorRoster::BASE_SIZE,
        seeds = [INVESTOR_ROSTER_SEED, launch_pool.key().as_ref()],
        bump,
    )]
    pub investor_roster: Box<Account<'info, InvestorRoster>>,

    /// vault authority
    #[account(
        mut,
        seeds = [VAULT_AUTHORITY.as_ref()],
        bump,
    )]
    pub vault_authority: SystemAccount<'info>,

    #[account(
        init,
        payer = creator,
        seeds = [TOKEN_MINT_SEED, launch_pool.key().as_ref()],
        bump,
        mint::decimals = TOKEN_DECIMALS,
        mint::authority = launch_pool.key(),
        mint::freeze_authority = launch_pool.key(),
    )]
    pub token_mint: Box<Account<'info, Mint>>,

    /// Launch pool token vault
    #[account(
        init,
        payer = creator,
        seeds = [TOKEN_VAULT, vault_authority.key().as_ref(), token_mint.key().as_ref()],
        bump,
        token::mint = token_mint,
        token::authority = vault_authority,
    )]
    pub token_vault: Box<Account<'info, TokenAccount>>,

    /// CHECK: WSOL mint (verified by address)
    #[account(
        address = anchor_spl::token::spl_token::native_mint::ID
    )]
    pub wsol_mint: Box<Account<'info, Mint>>,

    /// Launch pool WSOL vault, holds contributions until refund or liquidity seeding
    #[account(
        init,
        payer = creator,
        seeds = [QUOTE_VAULT, launch_pool.key().as_ref()],
        bump,
        token::mint = wsol_mint,
        token::authority = vault_authority,
    )]
    pub quote_vault: Box<Account<'info, TokenAccount>>,

    /// Token metadata account
    /// CHECK: Validated by Metaplex program
    #[account(
        mut,
        seeds = [
            b"metadata",
            metadata_program.key().as_ref(),
            token_mint.key().as_ref(),
        ],
        seeds::program = metadata_program.key(),
        bump,
    )]
    pub metadata: UncheckedAccount<'info>,

    /// Token program
    pub token_program: Program<'info, Token>,

    /// Associated Token program
    pub associated_token_program: Program<'info, AssociatedToken>,

    /// Metadata program
    pub metadata_program: Program<'info, Metadata>,

    /// System program
    pub system_program: Program<'info, System>,

    /// Rent
    pub rent: Sysvar<'info, Rent>,
}

pub fn initialize_launch(
    ctx: Context<InitializeLaunch>,
    params: InitializeLaunchParams,
) -> Result<()> {
    let global_config = &mut ctx.accounts.global_config;
    let launch_pool = &mut ctx.accounts.launch_pool;
    let investor_roster = &mut ctx.accounts.investor_roster;
    let clock = Clock::get()?;

    let start_time = params.start_time.unwrap_or(clock.unix_timestamp);
    require!(start_time >= clock.unix_timestamp, LaunchpadError::InvalidStartTime);

    let lock_duration = params.lock_duration.unwrap_or(DEFAULT_CREATOR_LOCK_DURATION);
    let linear_unlock_duration = params
        .linear_unlock_duration
        .unwrap_or(DEFAULT_CREATOR_LINEAR_UNLOCK_DURATION);
    require!(
        lock_duration >= 0 && linear_unlock_duration >= 0,
        LaunchpadError::InvalidDuration
    );

    // Carve the supply
    let shares = AllocationShares {
        seeding_ppm: params.seeding_allocation_ppm.unwrap_or(DEFAULT_SEEDING_ALLOCATION_PPM),
        acceleration_ppm: params
            .acceleration_allocation_ppm
            .unwrap_or(DEFAULT_ACCELERATION_ALLOCATION_PPM),
        liquidity_ppm: params.liquidity_allocation_ppm.unwrap_or(DEFAULT_LIQUIDITY_ALLOCATION_PPM),
        creator_ppm: params.creator_allocation_ppm.unwrap_or(DEFAULT_CREATOR_ALLOCATION_PPM),
    };
    let allocations = calculate_token_allocations(TOTAL_SUPPLY, &shares)?;

    let acceleration_goal = params.acceleration_goal.unwrap_or(DEFAULT_ACCELERATION_GOAL);
    let virtual_quote = params.virtual_quote.unwrap_or(DEFAULT_VIRTUAL_QUOTE);
    let virtual_token = match params.virtual_token {
        Some(virtual_token) => virtual_token,
        None => LaunchConfig::matching_virtual_token(
            allocations.acceleration,
            virtual_quote,
            acceleration_goal,
        )?,
    };

    let config = LaunchConfig {
        contribution_unit: params.contribution_unit.unwrap_or(DEFAULT_CONTRIBUTION_UNIT),
        seeding_goal: params.seeding_goal.unwrap_or(DEFAULT_SEEDING_GOAL),
        acceleration_goal,
        seeding_allocation: allocations.seeding,
        acceleration_allocation: allocations.acceleration,
        seeding_max_per_investor: params
            .seeding_max_per_investor
            .unwrap_or(DEFAULT_SEEDING_MAX_PER_INVESTOR),
        acceleration_max_per_investor: params
            .acceleration_max_per_investor
            .unwrap_or(DEFAULT_ACCELERATION_MAX_PER_INVESTOR),
        virtual_quote,
        virtual_token,
        liquidity_quote_amount: params
            .liquidity_quote_amount
            .unwrap_or(DEFAULT_LIQUIDITY_QUOTE_AMOUNT),
        liquidity_token_amount: allocations.liquidity,
        genesis_succeeded_duration: params
            .genesis_succeeded_duration
            .unwrap_or(DEFAULT_GENESIS_SUCCEEDED_DURATION),
        seeding_duration: params.seeding_duration.unwrap_or(DEFAULT_SEEDING_DURATION),
        seeding_succeeded_duration: params
            .seeding_succeeded_duration
            .unwrap_or(DEFAULT_SEEDING_SUCCEEDED_DURATION),
        acceleration_duration: params.acceleration_duration.unwrap_or(DEFAULT_ACCELERATION_DURATION),
        seeding_refund_fee_ppm: global_config.seeding_refund_fee_ppm,
        acceleration_refund_fee_ppm: global_config.acceleration_refund_fee_ppm,
        service_fee_ppm: global_config.service_fee_ppm,
        service_fee_period: global_config.service_fee_period,
    };
    config.validate()?;

    // Initialize launch pool
    launch_pool.creator = ctx.accounts.creator.key();
    launch_pool.token_mint = ctx.accounts.token_mint.key();
    launch_pool.token_vault = ctx.accounts.token_vault.key();
    launch_pool.quote_mint = ctx.accounts.wsol_mint.key();
    launch_pool.quote_vault = ctx.accounts.quote_vault.key();
    launch_pool.bump = ctx.bumps.launch_pool;
    launch_pool.index = global_config.pool_count;
    launch_pool.locked = false;
    launch_pool.total_supply = TOTAL_SUPPLY;
    launch_pool.config = config;
    launch_pool.schedule = StageSchedule::new(start_time);
    launch_pool.vesting = CreatorVesting {
        allocation: allocations.creator,
        lock_duration,
        linear_unlock_duration,
        ..CreatorVesting::default()
    };

    investor_roster.pool = launch_pool.key();
    investor_roster.bump = ctx.bumps.investor_roster;

    // Mint all tokens to vault
    let creator_key = ctx.accounts.creator.key();
    let index_bytes = launch_pool.index.to_le_bytes();
    let seeds = &[
        LAUNCH_POOL_SEED,
        creator_key.as_ref(),
        index_bytes.as_ref(),
        &[launch_pool.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::MintTo {
                mint: ctx.accounts.token_mint.to_account_info(),
                to: ctx.accounts.token_vault.to_account_info(),
                authority: launch_pool.to_account_info(),
            },
            signer_seeds,
        ),
        TOTAL_SUPPLY,
    )?;

    // Create metadata
    let metadata_accounts = CreateMetadataAccountsV3 {
        metadata: ctx.accounts.metadata.to_account_info(),
        mint: ctx.accounts.token_mint.to_account_info(),
        mint_authority: launch_pool.to_account_info(),
        payer: ctx.accounts.creator.to_account_info(),
        update_authority: launch_pool.to_account_info(),
        system_program: ctx.accounts.system_program.to_account_info(),
        rent: ctx.accounts.rent.to_account_info(),
    };

    let data = DataV2 {
        name: params.token_name.clone(),
        symbol: params.token_symbol.clone(),
        uri: params.token_uri,
        seller_fee_basis_points: 0,
        creators: None,
        collection: None,
        uses: None,
    };

    create_metadata_accounts_v3(
        CpiContext::new_with_signer(
            ctx.accounts.metadata_program.to_account_info(),
            metadata_accounts,
            signer_seeds,
        ),
        data,
        false,  // is_mutable
        true,  // update_authority_is_signer
        None,  // collection_details
    )?;

    // Revoke mint authority (set to None)
    token::set_authority(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::SetAuthority {
                current_authority: launch_pool.to_account_info(),
                account_or_mint: ctx.accounts.token_mint.to_account_info(),
            },
            signer_seeds,
        ),
        token::spl_token::instruction::AuthorityType::MintTokens,
        None,
    )?;

    global_config.pool_count = global_config.pool_count
        .checked_add(1)
        .ok_or(LaunchpadError::MathOverflow)?;

    emit!(LaunchPoolInitialized {
        pool: launch_pool.key(),
        creator: creator_key,
        token_mint: launch_pool.token_mint,
        token_name: params.token_name,
        token_symbol: params.token_symbol,
        total_supply: TOTAL_SUPPLY,
        seeding_goal: config.seeding_goal,
        acceleration_goal: config.acceleration_goal,
        seeding_allocation: config.seeding_allocation,
        acceleration_allocation: config.acceleration_allocation,
        creator_allocation: allocations.creator,
        start_time,
    });

    msg!("Launch pool initialized successfully");
    msg!("Token: {}", launch_pool.token_mint);
    msg!(
        "Goals: {} SOL seeding, {} SOL acceleration",
        config.seeding_goal / LAMPORTS_PER_SOL,
        config.acceleration_goal / LAMPORTS_PER_SOL
    );
    msg!("Genesis starts at: {}", start_time);
    msg!("Creator lock duration: {} days", lock_duration / (24 * 3600));
    msg!("Creator linear unlock duration: {} days", linear_unlock_duration / (24 * 3600));

    Ok(())
}
