//! What the output panel shows for a generation result

use serde::Serialize;

use crate::emit::GenerationResult;

/// Heading shown above the missing-field list
pub const MISSING_HEADING: &str = "Missing Required Fields";

/// Heading shown above a generated snippet
pub const OUTPUT_HEADING: &str = "OUTPUT";

/// Action offered next to a generated snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Send the options object to the host for a live preview
    Test,
    /// Copy the snippet
    Copy,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Test => write!(f, "Test Code"),
            Action::Copy => write!(f, "Copy Code"),
        }
    }
}

/// Rendered output panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DisplayView {
    Output { code: String, actions: Vec<Action> },
    MissingFields { heading: String, labels: Vec<String> },
}

impl DisplayView {
    pub fn actions(&self) -> &[Action] {
        match self {
            DisplayView::Output { actions, .. } => actions,
            DisplayView::MissingFields { .. } => &[],
        }
    }

    /// Plain-text rendering for terminals
    pub fn render_text(&self) -> String {
        match self {
            DisplayView::Output { code, actions } => {
                let actions: Vec<String> = actions.iter().map(|a| format!("[{}]", a)).collect();
                format!("{}\n{}\n\n{}\n", OUTPUT_HEADING, code, actions.join(" "))
            }
            DisplayView::MissingFields { heading, labels } => {
                let mut out = format!("{}\n", heading);
                for label in labels {
                    out.push_str(&format!("  - {}\n", label));
                }
                out
            }
        }
    }
}

impl From<&GenerationResult> for DisplayView {
    fn from(result: &GenerationResult) -> Self {
        match result {
            GenerationResult::Valid { code } => {
                DisplayView::Output { code: code.clone(), actions: vec![Action::Test, Action::Copy] }
            }
            GenerationResult::Invalid { missing_fields } => DisplayView::MissingFields {
                heading: MISSING_HEADING.to_string(),
                labels: missing_fields.iter().map(|m| m.to_string()).collect(),
            },
        }
    }
}
