use anchor_lang::prelude::*;

// =============================================================================
// CONFIGURATION EVENTS
// =============================================================================

/// Event emitted when the global configuration is created or changed
#[event]
pub struct GlobalConfigUpdated {
    pub admin: Pubkey,
    pub router: Pubkey,
    pub treasury: Pubkey,
    pub paused: bool,
    pub seeding_refund_fee_ppm: u32,
    pub acceleration_refund_fee_ppm: u32,
    pub service_fee_ppm: u32,
    pub service_fee_period: i64,
}

// =============================================================================
// LAUNCH POOL LIFECYCLE EVENTS
// =============================================================================

/// Event emitted when a new launch pool is initialized
#[event]
pub struct LaunchPoolInitialized {
    /// Launch pool address
    pub pool: Pubkey,
    /// Creator of the launch pool
    pub creator: Pubkey,
    /// Token mint address
    pub token_mint: Pubkey,
    pub token_name: String,
    pub token_symbol: String,
    /// Total token supply
    pub total_supply: u64,
    pub seeding_goal: u64,
    pub acceleration_goal: u64,
    pub seeding_allocation: u64,
    pub acceleration_allocation: u64,
    pub creator_allocation: u64,
    /// Genesis start timestamp
    pub start_time: i64,
}

/// Event emitted when a stage transition lays out the next windows
#[event]
pub struct StagesScheduled {
    pub pool: Pubkey,
    /// Stage entered by the transition
    pub stage: u8,
    pub stage_start: i64,
    pub stage_end: i64,
    /// Next investable window
    pub next_start: i64,
    pub next_end: i64,
    /// Start of the failure window (0 once unreachable)
    pub failed_start: i64,
}

/// Event emitted when a contribution reaches a stage goal
#[event]
pub struct StageAdvanced {
    pub pool: Pubkey,
    pub from_stage: u8,
    pub to_stage: u8,
    pub raised_amount_total: u64,
    pub issued_token_total: u64,
    pub timestamp: i64,
}

// =============================================================================
// INVESTMENT EVENTS
// =============================================================================

/// Event emitted for every accepted contribution
#[event]
pub struct Invested {
    pub pool: Pubkey,
    pub investor: Pubkey,
    /// Stage the contribution was priced in
    pub stage: u8,
    pub amount: u64,
    pub tokens_out: u64,
    /// Investor's contribution in this stage so far
    pub stage_contribution: u64,
    pub raised_amount_total: u64,
    pub issued_token_total: u64,
    /// Whether the investor joined the stage roster
    pub first_appearance: bool,
    pub timestamp: i64,
}

/// Event emitted when liquidity is seeded into the AMM on success
#[event]
pub struct LiquiditySeeded {
    pub launch_pool: Pubkey,
    pub amm_pool: Pubkey,
    pub position: Pubkey,
    pub token_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub token_amount: u64,
    pub quote_amount: u64,
    pub liquidity: u128,
    pub sqrt_price: u128,
    pub timestamp: i64,
}

/// Event emitted when the creator vesting schedule starts
#[event]
pub struct VestingStarted {
    pub pool: Pubkey,
    pub creator: Pubkey,
    pub allocation: u64,
    pub unlock_start_time: i64,
    pub lock_duration: i64,
    pub linear_unlock_duration: i64,
}

// =============================================================================
// CLAIM EVENTS
// =============================================================================

/// Event emitted when a failed launch refunds an investor
#[event]
pub struct RefundClaimed {
    pub pool: Pubkey,
    pub investor: Pubkey,
    pub seeding_refund: u64,
    pub seeding_fee: u64,
    pub acceleration_refund: u64,
    pub acceleration_fee: u64,
    pub timestamp: i64,
}

/// Event emitted when an investor withdraws bought tokens
#[event]
pub struct TokensClaimed {
    pub pool: Pubkey,
    pub investor: Pubkey,
    pub token_mint: Pubkey,
    pub amount: u64,
    pub claimed_token_total: u64,
    pub timestamp: i64,
}

/// Event emitted when service fees are paid to the treasury
#[event]
pub struct ServiceFeeClaimed {
    pub pool: Pubkey,
    pub treasury: Pubkey,
    pub periods: u64,
    pub amount: u64,
    pub paid_through: i64,
    pub total_paid: u64,
}

/// Event emitted when creator claims their tokens
#[event]
pub struct CreatorTokensClaimed {
    /// Launch pool address
    pub pool: Pubkey,
    /// Creator address
    pub creator: Pubkey,
    /// Token mint
    pub token_mint: Pubkey,
    /// Amount of tokens claimed in this transaction
    pub claimed_amount: u64,
    /// Total amount claimed so far
    pub total_claimed: u64,
    /// Total creator allocation
    pub total_allocation: u64,
    /// Remaining claimable amount
    pub remaining_claimable: u64,
    /// Whether fully unlocked
    pub fully_unlocked: bool,
    /// Claim timestamp
    pub timestamp: i64,
}

/// Event emitted when AMM position fees are split between treasury and creator
#[event]
pub struct PoolFeesClaimed {
    pub pool: Pubkey,
    pub amm_pool: Pubkey,
    pub token_a_claimed: u64,
    pub token_b_claimed: u64,
    pub token_a_to_treasury: u64,
    pub token_b_to_treasury: u64,
    pub timestamp: i64,
}

/// Event emitted when the creator withdraws raised quote left after the liquidity seed
#[event]
pub struct RaisedFundsWithdrawn {
    pub pool: Pubkey,
    pub creator: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
