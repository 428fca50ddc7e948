//! Generate and options command implementations

use std::path::Path;
use std::process::ExitCode;

use crate::config::PropanimConfig;
use crate::display::DisplayView;
use crate::emit::CodeEmitter;
use crate::options::build_options;

use super::{form_error, read_form, to_json, FormArgs, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the generate command
pub fn run_generate(
    config: &PropanimConfig,
    form_args: &FormArgs,
    json: bool,
    output: Option<&Path>,
) -> ExitCode {
    let form = match read_form(form_args) {
        Ok(form) => form,
        Err(e) => return form_error(&e),
    };

    let result = CodeEmitter::new(&config.snippet).generate(&form);

    if json {
        match to_json(config, &result) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        print!("{}", DisplayView::from(&result).render_text());
    }

    let Some(code) = result.code() else {
        return ExitCode::from(EXIT_ERROR);
    };

    // Copy action
    if let Some(path) = output {
        if let Err(e) = std::fs::write(path, format!("{}\n", code)) {
            eprintln!("Error: Failed to write '{}': {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
        eprintln!("Snippet written to: {}", path.display());
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the options command
pub fn run_options(config: &PropanimConfig, form_args: &FormArgs, compact: bool) -> ExitCode {
    let form = match read_form(form_args) {
        Ok(form) => form,
        Err(e) => return form_error(&e),
    };

    let options = match build_options(&form) {
        Ok(options) => options,
        Err(e) => return form_error(&e),
    };

    match options.to_json(config.output.pretty && !compact) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
