//! Session command implementation (JSON-lines host bridge)
//!
//! Each stdin line is one [`Event`]. Notifications and display views are
//! written to stdout as they happen, one JSON object per line.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use serde::Serialize;

use crate::config::PropanimConfig;
use crate::session::{Event, Host, HostChannel, Notification};

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Channel writing one JSON object per line
#[derive(Debug)]
pub struct JsonLines<W: Write> {
    writer: W,
}

impl<W: Write> JsonLines<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn send<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, value)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> HostChannel for JsonLines<W> {
    fn notify(&mut self, notification: Notification) {
        if let Err(e) = self.send(&notification) {
            tracing::warn!(error = %e, "failed to deliver notification");
        }
    }
}

/// Feed every line of `input` to a host writing to `output`.
///
/// Malformed lines and rejected events are logged and skipped.
pub fn bridge<R: BufRead, W: Write>(
    config: &PropanimConfig,
    input: R,
    output: W,
) -> io::Result<W> {
    let mut host = Host::new(JsonLines::new(output), config.snippet.clone());

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let event: Event = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed event");
                continue;
            }
        };

        match host.handle(event) {
            Ok(Some(view)) => {
                if let Some(channel) = host.channel_mut() {
                    channel.send(&view)?;
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "event rejected"),
        }
    }

    host.into_channel()
        .map(JsonLines::into_inner)
        .ok_or_else(|| io::Error::other("host lost its channel"))
}

/// Execute the session command
pub fn run_session(config: &PropanimConfig) -> ExitCode {
    let stdin = io::stdin();
    match bridge(config, stdin.lock(), io::stdout()) {
        Ok(_) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
