//! Solver parameters and their validation.

use crate::error::ValidationError;
use crate::format::Precision;

/// How many explicit-Euler steps to run.
///
/// `Auto` and an explicit zero are kept distinct: `Auto` resolves from the
/// grid size, while `Fixed(0)` is rejected during validation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum IterationCount {
    /// Resolve from the grid: one step per cell along the longest axis.
    #[default]
    Auto,
    /// Exactly this many steps.
    Fixed(u32),
}

/// Configuration for one GVF solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverParams {
    /// Diffusion regularization weight, `0 < mu <= 0.2`.
    pub mu: f32,
    /// Step count, possibly `Auto`.
    pub iterations: IterationCount,
    /// Preferred working-buffer precision.
    pub precision: Precision,
}

impl SolverParams {
    /// Default regularization weight.
    pub const DEFAULT_MU: f32 = 0.05;

    /// Upper bound on `mu` for a stable explicit step.
    pub const MAX_MU: f32 = 0.2;

    /// Check the parameter invariants.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MuOutOfRange`] if `mu` is NaN, `<= 0`, or `> 0.2`
    /// - [`ValidationError::ZeroIterations`] if iterations is `Fixed(0)`
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.mu > 0.0 && self.mu <= Self::MAX_MU) {
            return Err(ValidationError::MuOutOfRange { mu: self.mu });
        }
        if self.iterations == IterationCount::Fixed(0) {
            return Err(ValidationError::ZeroIterations);
        }
        Ok(())
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            mu: Self::DEFAULT_MU,
            iterations: IterationCount::Auto,
            precision: Precision::Bits16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_mu(mu: f32) -> SolverParams {
        SolverParams {
            mu,
            ..SolverParams::default()
        }
    }

    #[test]
    fn defaults_are_valid() {
        let p = SolverParams::default();
        assert_eq!(p.mu, 0.05);
        assert_eq!(p.iterations, IterationCount::Auto);
        assert_eq!(p.precision, Precision::Bits16);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn mu_bounds() {
        assert!(with_mu(0.2).validate().is_ok());
        assert!(with_mu(0.0001).validate().is_ok());
        assert_eq!(
            with_mu(0.0).validate(),
            Err(ValidationError::MuOutOfRange { mu: 0.0 })
        );
        assert_eq!(
            with_mu(0.25).validate(),
            Err(ValidationError::MuOutOfRange { mu: 0.25 })
        );
        assert!(with_mu(-0.1).validate().is_err());
        assert!(with_mu(f32::NAN).validate().is_err());
        assert!(with_mu(f32::INFINITY).validate().is_err());
    }

    #[test]
    fn explicit_zero_iterations_rejected() {
        let p = SolverParams {
            iterations: IterationCount::Fixed(0),
            ..SolverParams::default()
        };
        assert_eq!(p.validate(), Err(ValidationError::ZeroIterations));
    }

    #[test]
    fn auto_and_positive_iterations_accepted() {
        for iterations in [IterationCount::Auto, IterationCount::Fixed(1), IterationCount::Fixed(500)] {
            let p = SolverParams {
                iterations,
                ..SolverParams::default()
            };
            assert!(p.validate().is_ok());
        }
    }
}
