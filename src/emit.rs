//! Lua snippet emission
//!
//! Produces the call expression users paste into their scripts:
//!
//! ```text
//! play_animation(PlayerPedId(), {
//!     dict = "amb@world_human_drinking@coffee@male@idle_a",
//!     anim = "idle_c",
//!     props = {
//!         {
//!             model = "p_amb_coffeecup_01",
//!             bone = 28422,
//!             coords = vector3(0, 0, 0),
//!             rotation = vector3(0, 0, 0)
//!         }
//!     },
//! }, function()
//!     print("done")
//! end)
//! ```
//!
//! Top-level fields follow schema order and are pruned against the default
//! table. Indentation is four spaces per level. Strings are quoted verbatim.

use serde::Serialize;

use crate::coerce::{FieldValue, PropEntry, Vec3};
use crate::config::SnippetConfig;
use crate::defaults;
use crate::error::GenerateError;
use crate::form::FormSnapshot;
use crate::schema::ANIMATION_FIELDS;
use crate::validate::{self, MissingField};

const INDENT: &str = "    ";

/// Outcome of a generation pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GenerationResult {
    Valid { code: String },
    Invalid { missing_fields: Vec<MissingField> },
}

impl GenerationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, GenerationResult::Valid { .. })
    }

    /// Snippet text, if valid
    pub fn code(&self) -> Option<&str> {
        match self {
            GenerationResult::Valid { code } => Some(code),
            GenerationResult::Invalid { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<String, GenerateError> {
        match self {
            GenerationResult::Valid { code } => Ok(code),
            GenerationResult::Invalid { missing_fields } => {
                Err(GenerateError::MissingRequiredFields(missing_fields))
            }
        }
    }
}

/// Magnitude from which numbers are written in exponent form
const EXPONENT_THRESHOLD: f64 = 1e21;

/// Format a number the way the snippet spells it: shortest form, no
/// trailing `.0`, negative zero as `0`, exponent form from `1e21` up.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.abs() >= EXPONENT_THRESHOLD {
        tracing::debug!(value, "writing number in exponent form");
        return format!("{:e}", value);
    }
    format!("{}", value)
}

fn format_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) => format!("\"{}\"", s),
        FieldValue::Integer(i) => i.to_string(),
        FieldValue::Float(f) => format_number(*f),
        FieldValue::Boolean(b) => b.to_string(),
    }
}

/// Emits snippets in a given dialect
#[derive(Debug, Clone)]
pub struct CodeEmitter<'a> {
    dialect: &'a SnippetConfig,
}

impl<'a> CodeEmitter<'a> {
    pub fn new(dialect: &'a SnippetConfig) -> Self {
        Self { dialect }
    }

    /// Validate the form and render the snippet.
    #[tracing::instrument(level = "debug", skip_all, fields(props = form.props.len()))]
    pub fn generate(&self, form: &FormSnapshot) -> GenerationResult {
        match validate::validate(form) {
            Ok(()) => GenerationResult::Valid { code: self.emit(form) },
            Err(missing_fields) => GenerationResult::Invalid { missing_fields },
        }
    }

    fn emit(&self, form: &FormSnapshot) -> String {
        let mut lines = self.option_lines(form);

        if !form.props.is_empty() {
            let blocks: Vec<String> = form
                .props
                .iter()
                .map(|prop| self.prop_block(&PropEntry::from_snapshot(prop)))
                .collect();
            lines.push(format!("{INDENT}props = {{\n{}\n{INDENT}}},", blocks.join(",\n")));
        }

        let callback = form.callback_code.trim();
        let callback = if callback.is_empty() {
            String::new()
        } else {
            format!(", function()\n{INDENT}{}\nend", callback)
        };

        format!(
            "{}({}, {{\n{}\n}}{})",
            self.dialect.function,
            self.dialect.target,
            lines.join("\n"),
            callback
        )
    }

    fn option_lines(&self, form: &FormSnapshot) -> Vec<String> {
        ANIMATION_FIELDS
            .iter()
            .filter_map(|spec| {
                let value = spec.coerce(form.raw(spec.id)).rounded();
                if defaults::include_in_snippet(spec.id, &value) {
                    Some(format!("{INDENT}{} = {},", spec.id, format_value(&value)))
                } else {
                    tracing::debug!(field = spec.id, "pruned default value");
                    None
                }
            })
            .collect()
    }

    fn vector(&self, v: &Vec3) -> String {
        let v = v.rounded();
        format!(
            "{}({}, {}, {})",
            self.dialect.vector,
            format_number(v.x),
            format_number(v.y),
            format_number(v.z)
        )
    }

    fn prop_block(&self, prop: &PropEntry) -> String {
        let mut lines = vec![
            format!("model = \"{}\"", prop.model),
            format!("bone = {}", prop.bone),
            format!("coords = {}", self.vector(&prop.coords)),
            format!("rotation = {}", self.vector(&prop.rotation)),
        ];

        if defaults::include_prop_flag(prop.use_soft) {
            lines.push("use_soft = true".to_string());
        }
        if defaults::include_prop_flag(prop.is_ped) {
            lines.push("is_ped = true".to_string());
        }
        if defaults::include_rot_order(prop.rot_order) {
            lines.push(format!("rot_order = {}", prop.rot_order));
        }
        if defaults::include_prop_flag(prop.sync_rot) {
            lines.push("sync_rot = true".to_string());
        }

        let item = INDENT.repeat(2);
        let field = INDENT.repeat(3);
        format!("{item}{{\n{field}{}\n{item}}}", lines.join(&format!(",\n{field}")))
    }
}

/// Generate a snippet in the default dialect.
pub fn build_code(form: &FormSnapshot) -> GenerationResult {
    CodeEmitter::new(&SnippetConfig::default()).generate(form)
}
