use super::form::FormState;

/// Reason a submission attempt may not proceed.
///
/// The `Display` strings double as the user-facing toast copy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingRequiredField,
    #[error("Please select at least one goal")]
    NoGoalSelected,
}

/// Decide whether a submission attempt may proceed.
///
/// Pure and synchronous. Produces at most one reason: the required-fields
/// check runs before the goal-selection check.
pub fn validate(form: &FormState) -> Result<(), ValidationError> {
    if !form.has_required_fields() {
        return Err(ValidationError::MissingRequiredField);
    }
    if !form.goals.has_any_selected() {
        return Err(ValidationError::NoGoalSelected);
    }
    Ok(())
}
