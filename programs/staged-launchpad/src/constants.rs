// ===== Seeds =====
pub const GLOBAL_CONFIG_SEED: &[u8] = b"global_config";
pub const LAUNCH_POOL_SEED: &[u8] = b"launch_pool";
pub const INVESTMENT_SEED: &[u8] = b"investment";
pub const INVESTOR_ROSTER_SEED: &[u8] = b"investor_roster";
pub const VAULT_AUTHORITY: &[u8] = b"vault_authority";
pub const TOKEN_VAULT: &[u8] = b"token_vault";
pub const QUOTE_VAULT: &[u8] = b"quote_vault";
pub const TOKEN_MINT_SEED: &[u8] = b"token_mint";

// ===== Views =====
/// Most keys one roster slice can return: return data is capped at 1024 bytes,
/// a 4-byte length prefix plus 32 bytes per key
pub const MAX_ROSTER_SLICE_LEN: usize = 31;

// ===== Token Configuration =====
/// Token decimals (standard SPL token)
pub const TOKEN_DECIMALS: u8 = 6;

/// Total supply: 1 billion tokens
pub const TOTAL_SUPPLY: u64 = 1_000_000_000 * 10u64.pow(TOKEN_DECIMALS as u32);

// ===== Fixed Point =====
/// Parts-per-million denominator, 1_000_000 = 100%
pub const PPM_DENOMINATOR: u64 = 1_000_000;

// ===== Token Allocation (ppm of total supply) =====
/// Seeding stage allocation: 20%
pub const DEFAULT_SEEDING_ALLOCATION_PPM: u32 = 200_000;

/// Acceleration stage allocation: 30%
pub const DEFAULT_ACCELERATION_ALLOCATION_PPM: u32 = 300_000;

/// Liquidity seed allocation: 20%
pub const DEFAULT_LIQUIDITY_ALLOCATION_PPM: u32 = 200_000;

/// Creator (vested) allocation: 20%
pub const DEFAULT_CREATOR_ALLOCATION_PPM: u32 = 200_000;

// ===== Fundraising Parameters =====
/// Smallest accepted contribution step: 0.01 SOL
pub const DEFAULT_CONTRIBUTION_UNIT: u64 =
    anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL / 100;

/// Default seeding goal: 50 SOL
pub const DEFAULT_SEEDING_GOAL: u64 =
    50 * anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

/// Default acceleration goal: 150 SOL
pub const DEFAULT_ACCELERATION_GOAL: u64 =
    150 * anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

/// Maximum seeding contribution per investor
pub const DEFAULT_SEEDING_MAX_PER_INVESTOR: u64 =
    2 * anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

/// Maximum acceleration contribution per investor
pub const DEFAULT_ACCELERATION_MAX_PER_INVESTOR: u64 =
    5 * anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

/// Virtual SOL reserve of the acceleration curve
pub const DEFAULT_VIRTUAL_QUOTE: u64 =
    100 * anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

/// Liquidity seeded into the AMM at success: 100 SOL
pub const DEFAULT_LIQUIDITY_QUOTE_AMOUNT: u64 =
    100 * anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

// ===== Stage Durations =====
/// Announcement window after genesis: 1 hour
pub const DEFAULT_GENESIS_SUCCEEDED_DURATION: i64 = 60 * 60;

/// Seeding window: 3 days
pub const DEFAULT_SEEDING_DURATION: i64 = 3 * 24 * 60 * 60;

/// Announcement window after seeding: 1 hour
pub const DEFAULT_SEEDING_SUCCEEDED_DURATION: i64 = 60 * 60;

/// Acceleration window: 7 days
pub const DEFAULT_ACCELERATION_DURATION: i64 = 7 * 24 * 60 * 60;

// ===== Creator Lock Configuration =====
/// Default creator lock duration: 30 days (in seconds)
pub const DEFAULT_CREATOR_LOCK_DURATION: i64 = 30 * 24 * 60 * 60;

/// Default creator linear unlock duration: 90 days (in seconds)
pub const DEFAULT_CREATOR_LINEAR_UNLOCK_DURATION: i64 = 90 * 24 * 60 * 60;

// ===== Protocol Fees =====
/// Refund fee kept on seeding contributions: 5%
pub const DEFAULT_SEEDING_REFUND_FEE_PPM: u32 = 50_000;

/// Refund fee kept on acceleration contributions: 2%
pub const DEFAULT_ACCELERATION_REFUND_FEE_PPM: u32 = 20_000;

/// Service fee per period: 0.1% of total supply
pub const DEFAULT_SERVICE_FEE_PPM: u32 = 1_000;

/// Service fee period: 30 days
pub const DEFAULT_SERVICE_FEE_PERIOD: i64 = 30 * 24 * 60 * 60;

// ===== Liquidity Seeding =====
/// Lamports moved to the vault authority to rent the AMM pool and position accounts
pub const LIQUIDITY_SEED_RENT_RESERVE: u64 =
    anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL / 20;
