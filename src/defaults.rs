//! Default pruning for the textual snippet
//!
//! The snippet only spells out what differs from the canonical defaults of
//! the animation call. The options object does not use this table.

use crate::coerce::FieldValue;

/// Canonical rotation order; any other value is written out
pub const DEFAULT_ROT_ORDER: i64 = 1;

/// Fields written to the snippet whatever their value
pub const ALWAYS_EMITTED: [&str; 2] = ["dict", "anim"];

/// Canonical default of a top-level animation field.
///
/// `None` for fields without a default (`dict`, `anim`, unknown ids).
pub fn default_value(id: &str) -> Option<FieldValue> {
    let value = match id {
        "flags" => FieldValue::Integer(49),
        "duration" => FieldValue::Integer(5000),
        "freeze" | "continuous" | "lock_x" | "lock_y" | "lock_z" => FieldValue::Boolean(false),
        "blend_in" | "blend_out" => FieldValue::Float(8.0),
        "playback" => FieldValue::Float(0.0),
        _ => return None,
    };
    Some(value)
}

/// Whether a coerced top-level field belongs in the snippet.
///
/// Floats are compared after rounding to the snippet's precision.
pub fn include_in_snippet(id: &str, value: &FieldValue) -> bool {
    if ALWAYS_EMITTED.contains(&id) {
        return true;
    }
    match default_value(id) {
        Some(default) => value.rounded() != default,
        None => true,
    }
}

/// Per-prop flags are written only when set.
pub fn include_prop_flag(value: bool) -> bool {
    value
}

/// Rotation order is written only when it differs from the canonical one.
pub fn include_rot_order(value: i64) -> bool {
    value != DEFAULT_ROT_ORDER
}
