//! Field schemas for the animation and prop forms
//!
//! Every input the generator understands is declared once here. Prop fields
//! are shared by all prop blocks and instantiated per block with an
//! index-qualified id (`prop_0_model`, `prop_1_model`, ...).

use serde::Serialize;

use crate::coerce::{self, FieldValue};
use crate::form::RawValue;

/// Prefix of index-qualified prop field ids
pub const PROP_ID_PREFIX: &str = "prop_";

/// Form key holding the raw callback body
pub const CALLBACK_FIELD: &str = "callback_code";

/// Declared data type of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Integer,
    Float,
    Boolean,
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::String => write!(f, "string"),
            DataType::Integer => write!(f, "integer"),
            DataType::Float => write!(f, "float"),
            DataType::Boolean => write!(f, "boolean"),
        }
    }
}

/// Coercion rule of a field. Numeric kinds carry the value used when the raw
/// input does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    #[serde(rename = "string")]
    Text,
    Integer {
        fallback: i64,
    },
    Float {
        fallback: f64,
    },
    #[serde(rename = "boolean")]
    Flag,
}

impl FieldKind {
    /// The declared data type this kind coerces to
    pub fn data_type(&self) -> DataType {
        match self {
            FieldKind::Text => DataType::String,
            FieldKind::Integer { .. } => DataType::Integer,
            FieldKind::Float { .. } => DataType::Float,
            FieldKind::Flag => DataType::Boolean,
        }
    }
}

/// A single form input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
}

impl FieldSpec {
    const fn text(id: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self { id, label, kind: FieldKind::Text, placeholder: Some(placeholder) }
    }

    const fn integer(
        id: &'static str,
        label: &'static str,
        fallback: i64,
        placeholder: &'static str,
    ) -> Self {
        Self { id, label, kind: FieldKind::Integer { fallback }, placeholder: Some(placeholder) }
    }

    const fn float(
        id: &'static str,
        label: &'static str,
        fallback: f64,
        placeholder: &'static str,
    ) -> Self {
        Self { id, label, kind: FieldKind::Float { fallback }, placeholder: Some(placeholder) }
    }

    const fn flag(id: &'static str, label: &'static str) -> Self {
        Self { id, label, kind: FieldKind::Flag, placeholder: None }
    }

    pub fn data_type(&self) -> DataType {
        self.kind.data_type()
    }

    /// Coerce a raw form value according to this field's kind.
    pub fn coerce(&self, raw: &RawValue) -> FieldValue {
        match self.kind {
            FieldKind::Text => FieldValue::Text(coerce::coerce_text(raw)),
            FieldKind::Integer { fallback } => {
                FieldValue::Integer(coerce::coerce_integer(self.id, raw, fallback))
            }
            FieldKind::Float { fallback } => {
                FieldValue::Float(coerce::coerce_float(self.id, raw, fallback))
            }
            FieldKind::Flag => FieldValue::Boolean(coerce::coerce_bool(raw)),
        }
    }
}

/// Animation fields, in declaration (and snippet) order
pub const ANIMATION_FIELDS: [FieldSpec; 12] = [
    FieldSpec::text("dict", "Dictionary", "anim_dictionary"),
    FieldSpec::text("anim", "Animation", "anim_name"),
    FieldSpec::integer("flags", "Flags", 49, "49"),
    FieldSpec::integer("duration", "Duration", 5000, "5000"),
    FieldSpec::flag("freeze", "Freeze"),
    FieldSpec::flag("continuous", "Continuous"),
    FieldSpec::float("blend_in", "Blend In Speed", 8.0, "8.0"),
    FieldSpec::float("blend_out", "Blend Out Speed", 8.0, "8.0"),
    FieldSpec::float("playback", "Playback Rate", 0.0, "0"),
    FieldSpec::flag("lock_x", "Lock X"),
    FieldSpec::flag("lock_y", "Lock Y"),
    FieldSpec::flag("lock_z", "Lock Z"),
];

/// Fields of a single prop block, in declaration order
pub const PROP_FIELDS: [FieldSpec; 12] = [
    FieldSpec::text("model", "Model Hash", "prop_model"),
    FieldSpec::integer("bone", "Bone Index", 57005, "57005"),
    FieldSpec::float("coords_x", "X Pos", 0.0, "0.0"),
    FieldSpec::float("coords_y", "Y Pos", 0.0, "0.0"),
    FieldSpec::float("coords_z", "Z Pos", 0.0, "0.0"),
    FieldSpec::float("rotation_x", "X Rot", 0.0, "0.0"),
    FieldSpec::float("rotation_y", "Y Rot", 0.0, "0.0"),
    FieldSpec::float("rotation_z", "Z Rot", 0.0, "0.0"),
    FieldSpec::flag("use_soft", "Use Soft Pinning"),
    FieldSpec::flag("is_ped", "Is Ped Attached"),
    FieldSpec::integer("rot_order", "Rotation Order", 1, "1"),
    FieldSpec::flag("sync_rot", "Sync Rotation"),
];

/// Look up an animation field by id.
pub fn animation_field(id: &str) -> Option<&'static FieldSpec> {
    ANIMATION_FIELDS.iter().find(|spec| spec.id == id)
}

/// Look up a prop field by its unqualified id.
pub fn prop_field(id: &str) -> Option<&'static FieldSpec> {
    PROP_FIELDS.iter().find(|spec| spec.id == id)
}

/// Index-qualified id of a prop field (`prop_2_bone`).
pub fn prop_field_id(index: usize, id: &str) -> String {
    format!("{}{}_{}", PROP_ID_PREFIX, index, id)
}

/// Split an index-qualified prop id into its block index and field spec.
///
/// Returns `None` for anything that is not `prop_<index>_<known field>`.
pub fn parse_prop_field_id(qualified: &str) -> Option<(usize, &'static FieldSpec)> {
    let rest = qualified.strip_prefix(PROP_ID_PREFIX)?;
    let (index, id) = rest.split_once('_')?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = index.parse().ok()?;
    prop_field(id).map(|spec| (index, spec))
}
