pub mod guard;
pub mod pool_liquidity;
pub mod token;
pub mod validation;

pub use guard::*;
pub use pool_liquidity::*;
pub use token::*;
pub use validation::*;
