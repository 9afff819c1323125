//! Bounded, damped fixed-point iteration.
//!
//! Both the Colebrook friction factor and the emitter ΔT balance are solved
//! with the same loop: evaluate a proposal at the current estimate, stop when
//! the residual is inside tolerance, otherwise move a damped fraction of the
//! way toward the proposal and clamp. Running out of iterations is not an
//! error; the last clamped estimate is returned with `converged = false`.

use crate::error::{HsError, HsResult};
use crate::numeric::ensure_finite;

/// Fixed-point iteration configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedPointConfig {
    /// Convergence threshold on |residual|
    pub tolerance: f64,
    /// Hard ceiling on proposal evaluations
    pub max_iterations: usize,
    /// Fraction of each proposed step that is taken (1.0 = undamped)
    pub damping: f64,
}

impl Default for FixedPointConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 50,
            damping: 1.0,
        }
    }
}

impl FixedPointConfig {
    fn validate(&self) -> HsResult<()> {
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(HsError::InvalidArg {
                what: "tolerance must be non-negative",
            });
        }
        if self.max_iterations == 0 {
            return Err(HsError::InvalidArg {
                what: "max_iterations must be positive",
            });
        }
        if self.damping.is_nan() || self.damping <= 0.0 || self.damping > 1.0 {
            return Err(HsError::InvalidArg {
                what: "damping must be in (0, 1]",
            });
        }
        Ok(())
    }
}

/// Outcome of a fixed-point iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedPoint {
    /// Final (clamped) estimate
    pub value: f64,
    /// Residual at the last evaluated estimate
    pub residual: f64,
    /// Number of proposal evaluations
    pub iterations: usize,
    /// Whether |residual| fell inside tolerance
    pub converged: bool,
}

/// Run a damped fixed-point iteration.
///
/// `step` maps the current estimate to `(proposal, residual)`. `clamp` is
/// applied to the starting value and after every update. If clamping pins
/// the estimate (the update does not move it) the loop stops early since
/// further iterations cannot make progress.
pub fn solve_fixed_point<F, C>(
    x0: f64,
    config: &FixedPointConfig,
    mut step: F,
    clamp: C,
) -> HsResult<FixedPoint>
where
    F: FnMut(f64) -> HsResult<(f64, f64)>,
    C: Fn(f64) -> f64,
{
    config.validate()?;

    let mut x = clamp(ensure_finite(x0, "fixed-point initial value")?);
    let mut residual = f64::INFINITY;

    for iter in 0..config.max_iterations {
        let (proposal, r) = step(x)?;
        ensure_finite(proposal, "fixed-point proposal")?;
        residual = ensure_finite(r, "fixed-point residual")?;

        if residual.abs() <= config.tolerance {
            return Ok(FixedPoint {
                value: x,
                residual,
                iterations: iter + 1,
                converged: true,
            });
        }

        let next = clamp(x + config.damping * (proposal - x));
        if next == x {
            return Ok(FixedPoint {
                value: x,
                residual,
                iterations: iter + 1,
                converged: false,
            });
        }
        x = next;
    }

    Ok(FixedPoint {
        value: x,
        residual,
        iterations: config.max_iterations,
        converged: false,
    })
}
