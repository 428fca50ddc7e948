//! Required-field validation
//!
//! Runs before any coercion. Only `dict` and `anim` are required; a form with
//! every other field at its default is still invalid if either is blank.

use serde::Serialize;

use crate::form::FormSnapshot;

/// A required field that was absent or empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MissingField {
    /// Field id
    pub id: &'static str,
    /// Human-readable name shown to the user
    pub label: &'static str,
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.id)
    }
}

/// Required fields, in the order they are reported
pub const REQUIRED_FIELDS: [MissingField; 2] = [
    MissingField { id: "dict", label: "Animation Dictionary" },
    MissingField { id: "anim", label: "Animation Name" },
];

/// Required fields missing from `form`, in declaration order.
///
/// A value counts as missing when it is absent or the empty string. No
/// trimming happens, so `" "` is present.
pub fn missing_fields(form: &FormSnapshot) -> Vec<MissingField> {
    REQUIRED_FIELDS.iter().filter(|field| form.raw(field.id).is_empty()).copied().collect()
}

/// Check the required fields of a form.
pub fn validate(form: &FormSnapshot) -> Result<(), Vec<MissingField>> {
    let missing = missing_fields(form);
    if missing.is_empty() {
        Ok(())
    } else {
        tracing::debug!(missing = ?missing.iter().map(|m| m.id).collect::<Vec<_>>(), "form rejected");
        Err(missing)
    }
}
