use anchor_lang::prelude::*;
use anchor_lang::{AccountsExit, Bumps};

use crate::state::LaunchPool;

/// Instruction accounts that mutate a launch pool
pub trait GuardedPool<'info> {
    fn guarded_pool(&mut self) -> &mut Account<'info, LaunchPool>;
}

/// Run `op` while holding the pool lock.
///
/// The lock is written back to the account before `op` starts, so a nested entry
/// through a CPI sees it and fails with `Reentrancy`. On error the transaction
/// aborts and the lock write is discarded with everything else.
pub fn non_reentrant<'a, 'b, 'c, 'info, T, R, F>(
    ctx: &mut Context<'a, 'b, 'c, 'info, T>,
    op: F,
) -> Result<R>
where
    T: Bumps + GuardedPool<'info>,
    F: FnOnce(&mut Context<'a, 'b, 'c, 'info, T>) -> Result<R>,
{
    {
        let pool = ctx.accounts.guarded_pool();
        pool.acquire_lock()?;
        pool.exit(&crate::ID)?;
    }

    let result = op(ctx)?;

    ctx.accounts.guarded_pool().release_lock();
    Ok(result)
}
