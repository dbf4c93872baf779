use super::goals::GoalSelection;

/// Pending form state for one submission attempt.
///
/// Created empty when the form mounts, mutated by field edits and goal
/// toggles, and cleared back to the empty value by the post-success reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub goals: GoalSelection,
}

impl FormState {
    /// True when email, first name, and last name all carry non-whitespace
    /// content. Email format beyond that is left to the form-field type.
    pub fn has_required_fields(&self) -> bool {
        !self.email.trim().is_empty()
            && !self.first_name.trim().is_empty()
            && !self.last_name.trim().is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
