//! Schema command implementation

use std::process::ExitCode;

use crate::schema::{FieldSpec, ANIMATION_FIELDS, PROP_FIELDS};

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the schema command
pub fn run_schema(json: bool) -> ExitCode {
    if json {
        let value = serde_json::json!({
            "animation": ANIMATION_FIELDS,
            "prop": PROP_FIELDS,
        });
        match serde_json::to_string_pretty(&value) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        print!("{}", format_table("Animation fields", &ANIMATION_FIELDS));
        println!();
        print!("{}", format_table("Prop fields (prop_<index>_<id>)", &PROP_FIELDS));
    }
    ExitCode::from(EXIT_SUCCESS)
}

fn format_table(title: &str, fields: &[FieldSpec]) -> String {
    let mut out = format!("{}\n", title);
    for spec in fields {
        let placeholder = spec.placeholder.map(|p| format!("  [{}]", p)).unwrap_or_default();
        out.push_str(&format!(
            "  {:<12} {:<8} {}{}\n",
            spec.id,
            spec.data_type().to_string(),
            spec.label,
            placeholder
        ));
    }
    out
}
