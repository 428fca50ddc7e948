//! Raw value coercion
//!
//! Turns raw form values into typed values. Coercion never fails: numeric
//! input that does not parse resolves to the field's fallback, and booleans
//! collapse to `true`/`false`.

use serde::Serialize;

use crate::form::{PropSnapshot, RawValue};
use crate::schema::{self, FieldKind};

/// Decimal places kept for floats rendered into the snippet
pub const SNIPPET_DECIMALS: i32 = 3;

/// A coerced field value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl FieldValue {
    /// Same value with floats rounded for the textual snippet.
    pub fn rounded(&self) -> FieldValue {
        match self {
            FieldValue::Float(v) => FieldValue::Float(round_to(*v, SNIPPET_DECIMALS)),
            other => other.clone(),
        }
    }

    pub fn as_bool(&self) -> bool {
        matches!(self, FieldValue::Boolean(true))
    }
}

/// Parse the leading decimal literal of `text`.
///
/// Leading whitespace is skipped and trailing garbage ignored, the way form
/// number inputs are read (`"12px"` is 12). Returns `None` when no digits
/// lead the text or the result is not finite.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let scan_digits = |mut i: usize| {
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_end = scan_digits(end);
    let mut digits = int_end - end;
    end = int_end;

    if end < len && bytes[end] == b'.' {
        let frac_end = scan_digits(end + 1);
        let frac_digits = frac_end - (end + 1);
        if digits + frac_digits > 0 {
            digits += frac_digits;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp = end + 1;
        if exp < len && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        let exp_end = scan_digits(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Round to a fixed number of decimal places.
///
/// Values too large to carry that many places are returned unchanged.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= 2f64.powi(53) {
        return value;
    }
    scaled.round() / factor
}

fn parse_raw_number(raw: &RawValue) -> Option<f64> {
    match raw {
        RawValue::Number(n) if n.is_finite() => Some(*n),
        RawValue::Text(s) => parse_decimal(s),
        _ => None,
    }
}

/// Coerce to a float, falling back when the input does not parse.
pub fn coerce_float(field: &str, raw: &RawValue, fallback: f64) -> f64 {
    match parse_raw_number(raw) {
        Some(v) => v,
        None => {
            tracing::debug!(field, ?raw, fallback, "numeric input did not parse, using fallback");
            fallback
        }
    }
}

/// Coerce to an integer, dropping the fractional part; falls back when the
/// input does not parse.
///
/// Values outside the `i64` range saturate to its bounds.
pub fn coerce_integer(field: &str, raw: &RawValue, fallback: i64) -> i64 {
    match parse_raw_number(raw) {
        Some(v) => {
            let whole = v.trunc();
            if whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
                tracing::debug!(field, value = v, "integer input out of range, clamping");
            }
            whole as i64
        }
        None => {
            tracing::debug!(field, ?raw, fallback, "integer input did not parse, using fallback");
            fallback
        }
    }
}

/// `true` only for a checked box or the exact string `"true"`.
pub fn coerce_bool(raw: &RawValue) -> bool {
    match raw {
        RawValue::Flag(b) => *b,
        RawValue::Text(s) => s == "true",
        _ => false,
    }
}

/// Text passes through verbatim; absent becomes the empty string.
pub fn coerce_text(raw: &RawValue) -> String {
    raw.as_text().into_owned()
}

/// Three-component vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Components rounded for the textual snippet
    pub fn rounded(&self) -> Vec3 {
        Vec3::new(
            round_to(self.x, SNIPPET_DECIMALS),
            round_to(self.y, SNIPPET_DECIMALS),
            round_to(self.z, SNIPPET_DECIMALS),
        )
    }
}

/// A coerced prop block. Floats keep full precision.
#[derive(Debug, Clone, PartialEq)]
pub struct PropEntry {
    pub model: String,
    pub bone: i64,
    pub coords: Vec3,
    pub rotation: Vec3,
    pub use_soft: bool,
    pub is_ped: bool,
    pub rot_order: i64,
    pub sync_rot: bool,
}

impl PropEntry {
    /// Coerce every prop field of a raw block through the prop schema.
    pub fn from_snapshot(prop: &PropSnapshot) -> Self {
        let value = |id: &str| match schema::prop_field(id) {
            Some(spec) => spec.coerce(prop.raw(id)),
            None => FieldValue::Text(String::new()),
        };
        let float = |id: &str| match value(id) {
            FieldValue::Float(v) => v,
            _ => 0.0,
        };
        let integer = |id: &str, default: i64| match value(id) {
            FieldValue::Integer(v) => v,
            _ => default,
        };

        Self {
            model: match value("model") {
                FieldValue::Text(s) => s,
                _ => String::new(),
            },
            bone: integer("bone", fallback_of("bone")),
            coords: Vec3::new(float("coords_x"), float("coords_y"), float("coords_z")),
            rotation: Vec3::new(float("rotation_x"), float("rotation_y"), float("rotation_z")),
            use_soft: value("use_soft").as_bool(),
            is_ped: value("is_ped").as_bool(),
            rot_order: integer("rot_order", fallback_of("rot_order")),
            sync_rot: value("sync_rot").as_bool(),
        }
    }
}

fn fallback_of(prop_id: &str) -> i64 {
    match schema::prop_field(prop_id).map(|spec| spec.kind) {
        Some(FieldKind::Integer { fallback }) => fallback,
        _ => 0,
    }
}
