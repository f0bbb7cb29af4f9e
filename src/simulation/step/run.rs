use std::ops::ControlFlow;

use crate::domain::error::SolverResult;

use super::step::ensure_steppable;
use super::{SolverCore, SolverState};

/// Step until the configured count is reached, a step fails, or the observer
/// breaks. Returns the number of steps executed by this call.
pub(super) fn run<F>(core: &mut SolverCore, mut observer: F) -> SolverResult<u64>
where
    F: FnMut(&SolverCore) -> ControlFlow<()>,
{
    ensure_steppable(core)?;

    let start = core.step;
    while core.state != SolverState::Finished {
        core.step()?;
        if observer(core).is_break() {
            log::debug!("lbm: run stopped by observer at step {}", core.step);
            break;
        }
    }
    Ok(core.step - start)
}

pub(super) fn run_steps(core: &mut SolverCore, n: u64) -> SolverResult<u64> {
    ensure_steppable(core)?;

    let start = core.step;
    for _ in 0..n {
        if core.state == SolverState::Finished {
            break;
        }
        core.step()?;
    }
    Ok(core.step - start)
}
