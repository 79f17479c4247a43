pub mod creator_vesting;
pub mod curve;
pub mod global_config;
pub mod investment;
pub mod investor_roster;
pub mod launch_config;
pub mod launch_pool;
pub mod service_fee;
pub mod stage;

pub use creator_vesting::*;
pub use curve::*;
pub use global_config::*;
pub use investment::*;
pub use investor_roster::*;
pub use launch_config::*;
pub use launch_pool::*;
pub use service_fee::*;
pub use stage::*;
