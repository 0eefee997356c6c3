//! Precondition checks run before any device work.

use gvf_core::{SolverParams, ValidationError, VectorField};

/// Check `field` and `params` against every solver precondition.
///
/// Runs before negotiation and allocation, so a failure here leaves the
/// device untouched.
///
/// # Errors
///
/// - [`ValidationError::ComponentMismatch`] unless a planar field has two
///   components and a volumetric field three
/// - anything [`SolverParams::validate`] reports
pub fn validate(field: &VectorField, params: &SolverParams) -> Result<(), ValidationError> {
    let dims = field.dims();
    if field.components() != dims.components() {
        return Err(ValidationError::ComponentMismatch {
            dims,
            components: field.components(),
        });
    }
    params.validate()
}
