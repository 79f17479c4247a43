use anchor_lang::prelude::*;
use ruint::aliases::{U256, U512};

use crate::errors::LaunchpadError;

// L = Δx * sqrt(P) * sqrt(P_upper) / (sqrt(P_upper) - sqrt(P))
fn liquidity_from_base(
    base_amount: u64,
    sqrt_max_price: u128,
    sqrt_price: u128,
) -> Result<U512> {
    let delta = sqrt_max_price
        .checked_sub(sqrt_price)
        .ok_or(LaunchpadError::MathOverflow)?;
    require!(delta > 0, LaunchpadError::DivisionByZero);

    let prod = U512::from(base_amount)
        .checked_mul(U512::from(sqrt_price))
        .ok_or(LaunchpadError::MathOverflow)?
        .checked_mul(U512::from(sqrt_max_price))
        .ok_or(LaunchpadError::MathOverflow)?;

    prod.checked_div(U512::from(delta))
        .ok_or(error!(LaunchpadError::DivisionByZero))
}

// L = Δy * 2^128 / (sqrt(P) - sqrt(P_lower))
fn liquidity_from_quote(
    quote_amount: u64,
    sqrt_min_price: u128,
    sqrt_price: u128,
) -> Result<U256> {
    let delta = sqrt_price
        .checked_sub(sqrt_min_price)
        .ok_or(LaunchpadError::MathOverflow)?;
    require!(delta > 0, LaunchpadError::DivisionByZero);

    let quote_shifted = U256::from(quote_amount)
        .checked_shl(128)
        .ok_or(LaunchpadError::MathOverflow)?;

    quote_shifted
        .checked_div(U256::from(delta))
        .ok_or(error!(LaunchpadError::DivisionByZero))
}

/// Largest liquidity both amounts can cover at `sqrt_price` inside the config range
pub fn get_liquidity_for_adding_liquidity(
    base_amount: u64,
    quote_amount: u64,
    sqrt_price: u128,
    min_sqrt_price: u128,
    max_sqrt_price: u128,
) -> Result<u128> {
    let from_base = liquidity_from_base(base_amount, max_sqrt_price, sqrt_price)?;
    let from_quote = U512::from(liquidity_from_quote(quote_amount, min_sqrt_price, sqrt_price)?);

    let liquidity = from_base.min(from_quote);
    u128::try_from(liquidity).map_err(|_| error!(LaunchpadError::TypeCastFailed))
}

/// sqrt(quote / base) in Q64.64, clamped into `[min_sqrt_price, max_sqrt_price]`
pub fn sqrt_price_from_amounts(
    base_amount: u64,
    quote_amount: u64,
    min_sqrt_price: u128,
    max_sqrt_price: u128,
) -> Result<u128> {
    require!(base_amount > 0, LaunchpadError::DivisionByZero);

    let price_x128 = U256::from(quote_amount)
        .checked_shl(128)
        .ok_or(LaunchpadError::MathOverflow)?
        .checked_div(U256::from(base_amount))
        .ok_or(LaunchpadError::DivisionByZero)?;

    let sqrt_price = u128::try_from(isqrt(price_x128))
        .map_err(|_| error!(LaunchpadError::TypeCastFailed))?;

    Ok(sqrt_price.clamp(min_sqrt_price, max_sqrt_price))
}

/// Floor square root by Newton iteration
fn isqrt(value: U256) -> U256 {
    if value < U256::from(2u8) {
        return value;
    }

    let mut x = value;
    let mut y = (x + U256::from(1u8)) >> 1usize;
    while y < x {
        x = y;
        y = (x + value / x) >> 1usize;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_X64: u128 = 1u128 << 64;
    // cp_amm full range bounds
    const MIN_SQRT_PRICE: u128 = 4_295_048_016;
    const MAX_SQRT_PRICE: u128 = 79_226_673_521_066_979_257_578_248_091;

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(U256::from(0u8)), U256::from(0u8));
        assert_eq!(isqrt(U256::from(1u8)), U256::from(1u8));
        assert_eq!(isqrt(U256::from(15u8)), U256::from(3u8));
        assert_eq!(isqrt(U256::from(16u8)), U256::from(4u8));
        assert_eq!(isqrt(U256::from(u128::MAX)), U256::from(u64::MAX));
    }

    #[test]
    fn test_sqrt_price_of_equal_amounts_is_one() {
        let sqrt_price =
            sqrt_price_from_amounts(1_000, 1_000, MIN_SQRT_PRICE, MAX_SQRT_PRICE).unwrap();
        assert_eq!(sqrt_price, ONE_X64);
    }

    #[test]
    fn test_sqrt_price_quarter_price() {
        // 4 base per quote: price 1/4, sqrt 1/2
        let sqrt_price =
            sqrt_price_from_amounts(4_000, 1_000, MIN_SQRT_PRICE, MAX_SQRT_PRICE).unwrap();
        assert_eq!(sqrt_price, ONE_X64 / 2);
    }

    #[test]
    fn test_sqrt_price_is_clamped() {
        let sqrt_price = sqrt_price_from_amounts(1_000, 1_000, ONE_X64 * 2, ONE_X64 * 4).unwrap();
        assert_eq!(sqrt_price, ONE_X64 * 2);
        assert!(sqrt_price_from_amounts(0, 1_000, MIN_SQRT_PRICE, MAX_SQRT_PRICE).is_err());
    }

    #[test]
    fn test_liquidity_limited_by_scarcer_side() {
        let sqrt_price = ONE_X64;
        let balanced = get_liquidity_for_adding_liquidity(
            1_000_000,
            1_000_000,
            sqrt_price,
            MIN_SQRT_PRICE,
            MAX_SQRT_PRICE,
        )
        .unwrap();
        let less_quote = get_liquidity_for_adding_liquidity(
            1_000_000,
            500_000,
            sqrt_price,
            MIN_SQRT_PRICE,
            MAX_SQRT_PRICE,
        )
        .unwrap();

        assert!(balanced > 0);
        assert!(less_quote < balanced);
    }

    #[test]
    fn test_price_on_range_edge_rejected() {
        assert!(get_liquidity_for_adding_liquidity(
            1_000,
            1_000,
            MAX_SQRT_PRICE,
            MIN_SQRT_PRICE,
            MAX_SQRT_PRICE,
        )
        .is_err());
    }
}
