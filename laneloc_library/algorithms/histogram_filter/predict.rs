//! Motion update: shift the belief by odometry, then blur by process noise

use super::smoothing::gaussian_smooth;
use super::{Belief, GridSpec, ProcessNoise};
use crate::algorithms::differential_drive::RobotSpec;
use crate::messages::WheelTicks;
use laneloc_core::LaneResult;
use ndarray::Zip;

/// Propagate `belief` through one cycle of wheel motion
///
/// Every bin center moves by `(v, w)` from the tick deltas and its mass is
/// accumulated in the destination bin. Mass landing outside the grid is
/// dropped. The shifted histogram is smoothed and renormalized; if smoothing
/// leaves nothing, the input belief is returned unchanged.
///
/// # Errors
/// `ShapeMismatch` if `belief` does not match `grid`, `InvalidConfig` if a
/// smoothing kernel is wider than the grid.
pub fn predict(
    belief: &Belief,
    ticks: WheelTicks,
    grid: &GridSpec,
    robot: &RobotSpec,
    noise: &ProcessNoise,
) -> LaneResult<Belief> {
    grid.check_shape(belief)?;
    noise.validate_for(grid)?;

    let (v, w) = robot.tick_velocities(ticks);
    let d_t = &grid.d + v;
    let phi_t = &grid.phi + w;

    let mut propagated = grid.zeros();
    let mut lost = 0.0;
    Zip::from(belief)
        .and(&d_t)
        .and(&phi_t)
        .for_each(|&mass, &d, &phi| {
            if mass <= 0.0 {
                return;
            }
            match grid.bin_index(d, phi) {
                Some(idx) => propagated[idx] += mass,
                None => lost += mass,
            }
        });

    if lost > 0.0 {
        log::debug!("predict: {lost:.4} probability mass left the grid (v={v:.4}, w={w:.4})");
    }

    let smoothed = gaussian_smooth(&propagated, noise);
    let total = smoothed.sum();
    if total <= 0.0 {
        log::warn!("predict: smoothed belief is empty, keeping previous belief");
        return Ok(belief.clone());
    }

    Ok(smoothed / total)
}
