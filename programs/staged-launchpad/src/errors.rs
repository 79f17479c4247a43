use anchor_lang::prelude::*;

#[error_code]
pub enum LaunchpadError {
    // ===== Permission Errors =====
    #[msg("Unauthorized: Only admin can perform this action")]
    Unauthorized,

    #[msg("Not the creator of this launch pool")]
    NotCreator,

    #[msg("Caller is not the authorized router")]
    NotRouter,

    #[msg("Platform is currently paused")]
    PlatformPaused,

    #[msg("Reentrant call into a guarded operation")]
    Reentrancy,

    // ===== Stage Errors =====
    #[msg("Operation is not allowed in the current stage")]
    InvalidStage,

    #[msg("Launch has not started yet")]
    NotStarted,

    #[msg("Stages are already scheduled")]
    AlreadyScheduled,

    // ===== Validation Errors =====
    #[msg("Address must not be zero")]
    ZeroAddress,

    #[msg("Amount must be a positive multiple of the contribution unit")]
    InvalidContributionUnit,

    #[msg("Per-investor contribution cap exceeded")]
    ContributionCapExceeded,

    #[msg("Invalid roster index range")]
    InvalidRosterRange,

    #[msg("Roster slice too large, request a smaller range")]
    RosterSliceTooLarge,

    #[msg("Invalid launch configuration")]
    InvalidLaunchConfig,

    #[msg("Invalid token allocation")]
    InvalidTokenAllocation,

    #[msg("Invalid fee rate")]
    InvalidFeeRate,

    #[msg("Invalid duration")]
    InvalidDuration,

    #[msg("Start time must not be in the past")]
    InvalidStartTime,

    // ===== Curve Errors =====
    #[msg("Accepted amount does not match the proposed amount")]
    PartialFill,

    #[msg("Contribution buys zero tokens")]
    ZeroTokensOut,

    #[msg("Amount out is smaller than required amount")]
    SlippageExceeded,

    // ===== Claim Errors =====
    #[msg("Nothing to claim")]
    NothingToClaim,

    #[msg("Already claimed")]
    AlreadyClaimed,

    #[msg("Creator tokens are still locked")]
    TokensLocked,

    #[msg("Service fee period has not completed")]
    PeriodNotComplete,

    #[msg("Insufficient vault balance")]
    InsufficientVaultBalance,

    // ===== Math Errors =====
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Division by zero")]
    DivisionByZero,

    #[msg("Type conversion failed")]
    TypeCastFailed,

    // ===== Liquidity Errors =====
    #[msg("Liquidity seeding accounts are required for this contribution")]
    LiquidityAccountsMissing,

    #[msg("Target AMM pool already exists")]
    PoolAlreadyExists,

    #[msg("Liquidity already seeded")]
    LiquidityAlreadySeeded,

    #[msg("Vesting already started")]
    VestingAlreadyStarted,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid quote mint")]
    InvalidQuoteMint,

    #[msg("Invalid token vault")]
    InvalidTokenVault,

    #[msg("Invalid quote vault")]
    InvalidQuoteVault,

    #[msg("Invalid position account")]
    InvalidPosition,

    #[msg("Invalid position NFT account")]
    InvalidPositionNftAccount,
}
