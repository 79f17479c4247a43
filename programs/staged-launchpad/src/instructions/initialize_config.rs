use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::GlobalConfigUpdated;
use crate::state::GlobalConfig;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeConfigParams {
    pub router: Pubkey,
    pub treasury: Pubkey,
    pub seeding_refund_fee_ppm: Option<u32>,
    pub acceleration_refund_fee_ppm: Option<u32>,
    pub service_fee_ppm: Option<u32>,
    pub service_fee_period: Option<i64>,
}

#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = GlobalConfig::SIZE,
        seeds = [GLOBAL_CONFIG_SEED],
        bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_config(
    ctx: Context<InitializeConfig>,
    params: InitializeConfigParams,
) -> Result<()> {
    let config = &mut ctx.accounts.global_config;

    // First set default values
    config.initialize_defaults(
        ctx.accounts.admin.key(),
        params.router,
        params.treasury,
        ctx.bumps.global_config,
    );

    // Then override default values with parameters
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

    msg!("Global config initialized successfully");
    msg!("Admin: {}", config.admin);
    msg!("Router: {}", config.router);
    msg!("Treasury: {}", config.treasury);

    Ok(())
}
