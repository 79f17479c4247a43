use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::LaunchpadError;
use crate::events::StagesScheduled;
use crate::state::{GlobalConfig, LaunchPool, Stage};
use crate::utils::GuardedPool;

#[derive(Accounts)]
pub struct StartLaunch<'info> {
    /// Creator of the pool or the platform router
    #[account(
        constraint = authority.key() == launch_pool.creator
            || authority.key() == global_config.router @ LaunchpadError::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED],
        bump = global_config.bump,
        constraint = !global_config.paused @ LaunchpadError::PlatformPaused,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        mut,
        seeds = [LAUNCH_POOL_SEED, launch_pool.creator.as_ref(), &launch_pool.index.to_le_bytes()],
        bump = launch_pool.bump,
    )]
    pub launch_pool: Box<Account<'info, LaunchPool>>,
}

impl<'info> GuardedPool<'info> for StartLaunch<'info> {
    fn guarded_pool(&mut self) -> &mut Account<'info, LaunchPool> {
        &mut self.launch_pool
    }
}

/// Leave genesis: lays out the announcement, seeding and default failure windows
pub fn start_launch(ctx: &mut Context<StartLaunch>) -> Result<()> {
    let launch_pool = &mut ctx.accounts.launch_pool;
    let current_time = Clock::get()?.unix_timestamp;

    launch_pool.start_launch(current_time)?;

    let announcement = launch_pool.schedule.window(Stage::GenesisSucceeded);
    let seeding = launch_pool.schedule.window(Stage::Seeding);
    let failed = launch_pool.schedule.window(Stage::Failed);

    emit!(StagesScheduled {
        pool: launch_pool.key(),
        stage: Stage::GenesisSucceeded as u8,
        stage_start: announcement.start,
        stage_end: announcement.end,
        next_start: seeding.start,
        next_end: seeding.end,
        failed_start: failed.start,
    });

    msg!("Launch started by {}", ctx.accounts.authority.key());
    msg!("Seeding window: {} - {}", seeding.start, seeding.end);

    Ok(())
}
