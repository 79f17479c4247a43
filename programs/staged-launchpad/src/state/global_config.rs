use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::LaunchpadError;

#[account]
pub struct GlobalConfig {
    /// Admin address (can update configuration)
    pub admin: Pubkey,

    /// Router allowed to submit contributions
    pub router: Pubkey,

    /// Fee sink for refund fees and service fees
    pub treasury: Pubkey,

    /// Whether new launches and contributions are paused
    pub paused: bool,

    /// pool count
    pub pool_count: u64,

    // ===== Protocol Fees =====
    /// Fee kept on refunded seeding contributions (ppm)
    pub seeding_refund_fee_ppm: u32,

    /// Fee kept on refunded acceleration contributions (ppm)
    pub acceleration_refund_fee_ppm: u32,

    /// Service fee per period, as ppm of total supply
    pub service_fee_ppm: u32,

    /// Service fee period (seconds)
    pub service_fee_period: i64,

    /// bump seed
    pub bump: u8,

    /// Reserved space
    pub reserved: [u64; 8],
}

impl GlobalConfig {
    pub const SIZE: usize = 8 + // discriminator
        32 + // admin
        32 + // router
        32 + // treasury
        1 + // paused
        8 + // pool_count
        4 + // seeding_refund_fee_ppm
        4 + // acceleration_refund_fee_ppm
        4 + // service_fee_ppm
        8 + // service_fee_period
        1 + // bump
        8 * 8; // reserved

    /// Initialize default configuration
    pub fn initialize_defaults(&mut self, admin: Pubkey, router: Pubkey, treasury: Pubkey, bump: u8) {
        self.admin = admin;
        self.router = router;
        self.treasury = treasury;
        self.paused = false;
        self.pool_count = 0;
        self.seeding_refund_fee_ppm = DEFAULT_SEEDING_REFUND_FEE_PPM;
        self.acceleration_refund_fee_ppm = DEFAULT_ACCELERATION_REFUND_FEE_PPM;
        self.service_fee_ppm = DEFAULT_SERVICE_FEE_PPM;
        self.service_fee_period = DEFAULT_SERVICE_FEE_PERIOD;
        self.bump = bump;
    }

    /// Validate protocol fee parameters
    pub fn validate(&self) -> Result<()> {
        for address in [&self.admin, &self.router, &self.treasury] {
            crate::utils::require_non_zero_address(address)?;
        }

        for ppm in [
            self.seeding_refund_fee_ppm,
            self.acceleration_refund_fee_ppm,
            self.service_fee_ppm,
        ] {
            require!(
                ppm as u64 <= PPM_DENOMINATOR,
                LaunchpadError::InvalidFeeRate
            );
        }

        require!(
            self.service_fee_period > 0,
            LaunchpadError::InvalidDuration
        );

        Ok(())
    }

    /// Validate that new launches may be created
    pub fn check_not_paused(&self) -> Result<()> {
        require!(!self.paused, LaunchpadError::PlatformPaused);
        Ok(())
    }
}
