//! Raw form snapshots
//!
//! A [`FormSnapshot`] is the read-only state of the form at the instant a
//! generation is triggered: raw field values keyed by id, the prop blocks in
//! display order and the callback body. Nothing here interprets values; that
//! is the job of [`crate::coerce`].

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::schema::{self, CALLBACK_FIELD};

static ABSENT: RawValue = RawValue::Absent;

/// A value as the form produced it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// No value at all (missing key or JSON `null`)
    #[default]
    Absent,
    /// Checkbox state
    Flag(bool),
    /// A number that already arrived typed
    Number(f64),
    /// Text input content
    Text(String),
}

impl RawValue {
    /// True for an absent value or an empty string.
    ///
    /// Whitespace is not trimmed: `" "` is not empty.
    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Absent => true,
            RawValue::Text(s) => s.is_empty(),
            RawValue::Flag(_) | RawValue::Number(_) => false,
        }
    }

    /// Textual form of the value, as an input element would report it.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            RawValue::Absent => Cow::Borrowed(""),
            RawValue::Flag(b) => Cow::Owned(b.to_string()),
            RawValue::Number(n) => Cow::Owned(n.to_string()),
            RawValue::Text(s) => Cow::Borrowed(s),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Flag(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

/// Raw values of one prop block, keyed by unqualified prop field id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropSnapshot {
    pub fields: IndexMap<String, RawValue>,
}

impl PropSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a raw value (builder style)
    pub fn with(mut self, id: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.fields.insert(id.into(), value.into());
        self
    }

    /// Raw value of a field, `Absent` when the block never set it
    pub fn raw(&self, id: &str) -> &RawValue {
        self.fields.get(id).unwrap_or(&ABSENT)
    }
}

/// Complete form state captured for one generation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSnapshot {
    /// Prop blocks in display order
    #[serde(default)]
    pub props: Vec<PropSnapshot>,
    /// Raw callback body, untrimmed
    #[serde(default)]
    pub callback_code: String,
    /// Animation field values keyed by id
    #[serde(flatten)]
    pub fields: IndexMap<String, RawValue>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an animation field (builder style)
    pub fn with_field(mut self, id: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.fields.insert(id.into(), value.into());
        self
    }

    /// Append a prop block (builder style)
    pub fn with_prop(mut self, prop: PropSnapshot) -> Self {
        self.props.push(prop);
        self
    }

    /// Set the callback body (builder style)
    pub fn with_callback(mut self, code: impl Into<String>) -> Self {
        self.callback_code = code.into();
        self
    }

    /// Raw value of an animation field, `Absent` when missing
    pub fn raw(&self, id: &str) -> &RawValue {
        self.fields.get(id).unwrap_or(&ABSENT)
    }

    /// Parse a snapshot from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Overwrite one value addressed by a flat field id.
    ///
    /// A prop index equal to the block count appends a new block; anything
    /// further out is rejected. Returns `Ok(false)` for unknown ids.
    pub fn set_field_id(&mut self, key: &str, value: RawValue) -> Result<bool, GenerateError> {
        if key == CALLBACK_FIELD {
            self.callback_code = value.as_text().into_owned();
        } else if let Some((index, spec)) = schema::parse_prop_field_id(key) {
            match index.cmp(&self.props.len()) {
                Ordering::Less => {}
                Ordering::Equal => self.props.push(PropSnapshot::default()),
                Ordering::Greater => {
                    return Err(GenerateError::PropIndex {
                        id: key.to_string(),
                        props: self.props.len(),
                    })
                }
            }
            self.props[index].fields.insert(spec.id.to_string(), value);
        } else if let Some(spec) = schema::animation_field(key) {
            self.fields.insert(spec.id.to_string(), value);
        } else {
            return Ok(false);
        }
        Ok(true)
    }

    /// Build a snapshot from flat `(id, value)` pairs as a form would submit
    /// them.
    ///
    /// Prop fields use index-qualified ids (`prop_0_model`); blocks are
    /// ordered by index. `callback_code` sets the callback body. Unknown ids
    /// are ignored.
    pub fn from_field_ids<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, RawValue)>,
        K: AsRef<str>,
    {
        let mut snapshot = Self::new();
        let mut props: BTreeMap<usize, PropSnapshot> = BTreeMap::new();

        for (key, value) in pairs {
            let key = key.as_ref();
            if key == CALLBACK_FIELD {
                snapshot.callback_code = value.as_text().into_owned();
            } else if let Some((index, spec)) = schema::parse_prop_field_id(key) {
                props.entry(index).or_default().fields.insert(spec.id.to_string(), value);
            } else if let Some(spec) = schema::animation_field(key) {
                snapshot.fields.insert(spec.id.to_string(), value);
            } else {
                tracing::debug!(field = key, "ignoring unknown form field");
            }
        }

        snapshot.props = props.into_values().collect();
        snapshot
    }
}
