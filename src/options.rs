//! Live-preview options object
//!
//! The host plays the animation from a sparse options object rather than the
//! snippet. Its inclusion policy differs from the snippet's: numeric keys
//! appear whenever the user typed something (no default comparison), flags
//! only when set, and floats keep full precision.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::coerce::{FieldValue, PropEntry, Vec3};
use crate::defaults;
use crate::error::GenerateError;
use crate::form::{FormSnapshot, RawValue};
use crate::schema::{DataType, ANIMATION_FIELDS};
use crate::validate;

/// Value stored under an options key
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Field(FieldValue),
    Props(Vec<PropOptions>),
}

/// One prop as the host receives it
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PropOptions {
    pub model: String,
    pub bone: i64,
    pub coords: Vec3,
    pub rotation: Vec3,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_soft: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_ped: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rot_order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_rot: Option<bool>,
}

impl From<PropEntry> for PropOptions {
    fn from(prop: PropEntry) -> Self {
        let flag = |set: bool| defaults::include_prop_flag(set).then_some(true);
        Self {
            use_soft: flag(prop.use_soft),
            is_ped: flag(prop.is_ped),
            rot_order: defaults::include_rot_order(prop.rot_order).then_some(prop.rot_order),
            sync_rot: flag(prop.sync_rot),
            model: prop.model,
            bone: prop.bone,
            coords: prop.coords,
            rotation: prop.rotation,
        }
    }
}

/// Sparse options object; keys keep the order they were added in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsObject {
    entries: Vec<(&'static str, OptionValue)>,
}

impl OptionsObject {
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Props in insertion order (empty when the key is absent)
    pub fn props(&self) -> &[PropOptions] {
        match self.get("props") {
            Some(OptionValue::Props(props)) => props,
            _ => &[],
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl Serialize for OptionsObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Inclusion predicate for numeric keys: the user typed something.
pub fn has_input(raw: &RawValue) -> bool {
    !raw.is_empty()
}

/// Inclusion predicate for flag keys: the flag is set.
pub fn is_set(value: &FieldValue) -> bool {
    value.as_bool()
}

/// Appends keys to an [`OptionsObject`], each guarded by its own predicate
#[derive(Debug, Default)]
pub struct OptionsBuilder {
    entries: Vec<(&'static str, OptionValue)>,
}

impl OptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key unconditionally.
    pub fn insert(mut self, key: &'static str, value: OptionValue) -> Self {
        self.entries.push((key, value));
        self
    }

    /// Append a key when `include` holds; the value is only built then.
    pub fn insert_if(
        self,
        include: bool,
        key: &'static str,
        value: impl FnOnce() -> OptionValue,
    ) -> Self {
        if include {
            self.insert(key, value())
        } else {
            self
        }
    }

    pub fn build(self) -> OptionsObject {
        OptionsObject { entries: self.entries }
    }
}

/// Build the options object for a form, validating required fields first.
pub fn build_options(form: &FormSnapshot) -> Result<OptionsObject, GenerateError> {
    validate::validate(form)?;

    let mut builder = OptionsBuilder::new();
    for spec in ANIMATION_FIELDS.iter() {
        let raw = form.raw(spec.id);
        let value = spec.coerce(raw);
        let include = match spec.data_type() {
            DataType::String => true,
            DataType::Integer | DataType::Float => has_input(raw),
            DataType::Boolean => is_set(&value),
        };
        builder = builder.insert_if(include, spec.id, || OptionValue::Field(value));
    }

    let props: Vec<PropOptions> =
        form.props.iter().map(|p| PropOptions::from(PropEntry::from_snapshot(p))).collect();
    builder = builder.insert_if(!props.is_empty(), "props", || OptionValue::Props(props));

    let options = builder.build();
    tracing::debug!(keys = options.len(), "built options object");
    Ok(options)
}
