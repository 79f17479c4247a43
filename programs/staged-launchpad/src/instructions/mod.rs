pub mod claim_creator_tokens;
pub mod claim_pool_fees;
pub mod claim_refund;
pub mod claim_service_fee;
pub mod claim_tokens;
pub mod initialize_config;
pub mod initialize_launch;
pub mod invest;
pub mod seed_liquidity;
pub mod start_launch;
pub mod update_config;
pub mod views;
pub mod withdraw_raised_funds;

pub use claim_creator_tokens::*;
pub use claim_pool_fees::*;
pub use claim_refund::*;
pub use claim_service_fee::*;
pub use claim_tokens::*;
pub use initialize_config::*;
pub use initialize_launch::*;
pub use invest::*;
pub use start_launch::*;
pub use update_config::*;
pub use views::*;
pub use withdraw_raised_funds::*;
