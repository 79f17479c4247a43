use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::LaunchpadError;
use crate::events::GlobalConfigUpdated;
use crate::state::GlobalConfig;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct UpdateConfigParams {
    pub new_admin: Option<Pubkey>,
    pub router: Option<Pubkey>,
    pub treasury: Option<Pubkey>,
    pub paused: Option<bool>,
    pub seeding_refund_fee_ppm: Option<u32>,
    pub acceleration_refund_fee_ppm: Option<u32>,
    pub service_fee_ppm: Option<u32>,
    pub service_fee_period: Option<i64>,
}

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED],
        bump = global_config.bump,
        constraint = global_config.admin == admin.key() @ LaunchpadError::Unauthorized,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,
}

/// Fee rates only reach launches created afterwards; each pool keeps its own snapshot
pub fn update_config(
    ctx: Context<UpdateConfig>,
    params: UpdateConfigParams,
) -> Result<()> {
    let config = &mut ctx.accounts.global_config;

    if let Some(new_admin) = params.new_admin {
        config.admin = new_admin;
    }

    if let Some(router) = params.router {
        config.router = router;
    }

    if let Some(treasury) = params.treasury {
        config.treasury = treasury;
    }

    if let Some(paused) = params.paused {
        config.paused = paused;
    }

    if let Some(seeding_refund_fee_ppm) = params.seeding_refund_fee_ppm {
        config.seeding_refund_fee_ppm = seeding_refund_fee_ppm;
    }

    if let Some(acceleration_refund_fee_ppm) = params.acceleration_refund_fee_ppm {
        config.acceleration_refund_fee_ppm = acceleration_refund_fee_ppm;
    }

    if let Some(service_fee_ppm) = params.service_fee_ppm {
        config.service_fee_ppm = service_fee_ppm;
    }

    if let Some(service_fee_period) = params.service_fee_period {
        config.service_fee_period = service_fee_period;
    }

    config.validate()?;

    emit!(GlobalConfigUpdated {
        admin: config.admin,
        router: config.router,
        treasury: config.treasury,
        paused: config.paused,
        seeding_refund_fee_ppm: config.seeding_refund_fee_ppm,
        acceleration_refund_fee_ppm: config.acceleration_refund_fee_ppm,
        service_fee_ppm: config.service_fee_ppm,
        service_fee_period: config.service_fee_period,
    });

    msg!("Global config updated successfully");

    Ok(())
}
