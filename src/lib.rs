//! Propanim - Library for generating animation-with-props snippets
//!
//! This library provides functionality to:
//! - Coerce raw form input into typed animation and prop settings
//! - Emit a `play_animation(...)` Lua snippet with default values pruned
//! - Build the sparse options object a host plays for a live preview
//! - Drive a generator session from host and UI events

pub mod cli;
pub mod coerce;
pub mod config;
pub mod defaults;
pub mod display;
pub mod emit;
pub mod error;
pub mod form;
pub mod options;
pub mod schema;
pub mod session;
pub mod validate;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use emit::{build_code, CodeEmitter, GenerationResult};
pub use error::GenerateError;
pub use form::{FormSnapshot, PropSnapshot, RawValue};
pub use options::{build_options, OptionsObject};
