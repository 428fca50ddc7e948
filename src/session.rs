//! Generator sessions and host messaging
//!
//! A [`Host`] owns the channel to the host process and at most one open
//! [`Session`]. The host opens a session with `{"action": "open"}` and tears
//! it down with `{"action": "close"}`; UI events in between are routed to the
//! session. Events arriving while no session is open are dropped.
//!
//! Everything sent to the host is a one-way [`Notification`]. Delivery is not
//! observed.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::SnippetConfig;
use crate::display::DisplayView;
use crate::emit::{CodeEmitter, GenerationResult};
use crate::error::GenerateError;
use crate::form::FormSnapshot;
use crate::options::{build_options, OptionsObject};

/// Preview rotation requested from the hotbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Flip,
    Reset,
}

/// One-way message to the host process
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    RotatePreview { direction: Direction },
    CloseUi,
    PlayAnimation { options: OptionsObject },
}

/// Sink for notifications. Implementations must not block.
pub trait HostChannel {
    fn notify(&mut self, notification: Notification);
}

impl HostChannel for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Inbound event: `open`/`close` come from the host, the rest from the UI
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Event {
    Open,
    Close,
    Generate { form: FormSnapshot },
    Test { form: FormSnapshot },
    Rotate { direction: Direction },
    Escape,
}

/// State of one open generator
#[derive(Debug)]
pub struct Session<C: HostChannel> {
    dialect: SnippetConfig,
    channel: C,
    last_result: Option<GenerationResult>,
}

impl<C: HostChannel> Session<C> {
    /// Open a session that sends its notifications through `channel`.
    pub fn open(channel: C, dialect: SnippetConfig) -> Self {
        tracing::info!("session opened");
        Self { dialect, channel, last_result: None }
    }

    /// Generate from a fresh snapshot and return what the panel shows.
    pub fn generate(&mut self, form: &FormSnapshot) -> DisplayView {
        let result = CodeEmitter::new(&self.dialect).generate(form);
        let view = DisplayView::from(&result);
        self.last_result = Some(result);
        view
    }

    /// Result of the most recent generation
    pub fn last_result(&self) -> Option<&GenerationResult> {
        self.last_result.as_ref()
    }

    /// Send the options object for `form` to the host for a live preview.
    pub fn test_play(&mut self, form: &FormSnapshot) -> Result<(), GenerateError> {
        let options = build_options(form)?;
        self.channel.notify(Notification::PlayAnimation { options });
        Ok(())
    }

    pub fn rotate(&mut self, direction: Direction) {
        self.channel.notify(Notification::RotatePreview { direction });
    }

    /// Ask the host to close the UI. The session stays open until the host
    /// answers with `close`.
    pub fn request_close(&mut self) {
        self.channel.notify(Notification::CloseUi);
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Tear the session down and hand the channel back.
    pub fn close(self) -> C {
        tracing::info!("session closed");
        self.channel
    }
}

/// Routes host and UI events to the current session
#[derive(Debug)]
pub struct Host<C: HostChannel> {
    dialect: SnippetConfig,
    idle: Option<C>,
    session: Option<Session<C>>,
}

impl<C: HostChannel> Host<C> {
    pub fn new(channel: C, dialect: SnippetConfig) -> Self {
        Self { dialect, idle: Some(channel), session: None }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session<C>> {
        self.session.as_ref()
    }

    /// Open a fresh session, replacing any open one.
    pub fn open(&mut self) {
        self.close();
        if let Some(channel) = self.idle.take() {
            self.session = Some(Session::open(channel, self.dialect.clone()));
        }
    }

    /// Close the open session, if any.
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            self.idle = Some(session.close());
        }
    }

    /// Channel, whether or not a session is open
    pub fn channel(&self) -> Option<&C> {
        match &self.session {
            Some(session) => Some(session.channel()),
            None => self.idle.as_ref(),
        }
    }

    pub fn channel_mut(&mut self) -> Option<&mut C> {
        match &mut self.session {
            Some(session) => Some(&mut session.channel),
            None => self.idle.as_mut(),
        }
    }

    /// Close any open session and hand the channel back.
    pub fn into_channel(mut self) -> Option<C> {
        self.close();
        self.idle
    }

    /// Handle one event. Returns the panel view for `generate`.
    pub fn handle(&mut self, event: Event) -> Result<Option<DisplayView>, GenerateError> {
        match event {
            Event::Open => {
                self.open();
                return Ok(None);
            }
            Event::Close => {
                self.close();
                return Ok(None);
            }
            _ => {}
        }

        let Some(session) = self.session.as_mut() else {
            tracing::warn!(?event, "no open session, dropping event");
            return Ok(None);
        };

        match event {
            Event::Generate { form } => return Ok(Some(session.generate(&form))),
            Event::Test { form } => session.test_play(&form)?,
            Event::Rotate { direction } => session.rotate(direction),
            Event::Escape => session.request_close(),
            Event::Open | Event::Close => {}
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::PropSnapshot;

    fn host() -> Host<Vec<Notification>> {
        Host::new(Vec::new(), SnippetConfig::default())
    }

    fn form() -> FormSnapshot {
        FormSnapshot::new().with_field("dict", "d").with_field("anim", "a")
    }

    fn sent(host: &Host<Vec<Notification>>) -> &[Notification] {
        host.channel().map(|c| c.as_slice()).unwrap_or(&[])
    }

    #[test]
    fn test_events_dropped_until_open() {
        let mut host = host();
        assert!(!host.is_open());
        let view = host.handle(Event::Generate { form: form() }).unwrap();
        assert!(view.is_none());
        host.handle(Event::Rotate { direction: Direction::Left }).unwrap();
        assert!(sent(&host).is_empty());
    }

    #[test]
    fn test_open_generate_close() {
        let mut host = host();
        host.handle(Event::Open).unwrap();
        assert!(host.is_open());

        let view = host.handle(Event::Generate { form: form() }).unwrap().unwrap();
        assert!(matches!(view, DisplayView::Output { .. }));
        assert!(host.session().unwrap().last_result().unwrap().is_valid());

        host.handle(Event::Close).unwrap();
        assert!(!host.is_open());
        assert!(host.session().is_none());
    }

    #[test]
    fn test_reopen_starts_fresh() {
        let mut host = host();
        host.handle(Event::Open).unwrap();
        host.handle(Event::Generate { form: form() }).unwrap();
        host.handle(Event::Open).unwrap();
        assert!(host.session().unwrap().last_result().is_none());
    }

    #[test]
    fn test_notifications() {
        let mut host = host();
        host.handle(Event::Open).unwrap();
        host.handle(Event::Rotate { direction: Direction::Flip }).unwrap();
        host.handle(Event::Test {
            form: form().with_prop(PropSnapshot::new().with("model", "prop_a")),
        })
        .unwrap();
        host.handle(Event::Escape).unwrap();

        let notifications = sent(&host);
        assert_eq!(notifications.len(), 3);
        assert_eq!(notifications[0], Notification::RotatePreview { direction: Direction::Flip });
        match &notifications[1] {
            Notification::PlayAnimation { options } => {
                assert_eq!(options.props().len(), 1);
                assert_eq!(options.props()[0].model, "prop_a");
            }
            other => panic!("unexpected notification: {other:?}"),
        }
        assert_eq!(notifications[2], Notification::CloseUi);
        // close request alone does not tear the session down
        assert!(host.is_open());
    }

    #[test]
    fn test_test_play_invalid_form_sends_nothing() {
        let mut host = host();
        host.handle(Event::Open).unwrap();
        let err = host.handle(Event::Test { form: FormSnapshot::new() }).unwrap_err();
        assert!(matches!(err, GenerateError::MissingRequiredFields(ref m) if m.len() == 2));
        assert!(sent(&host).is_empty());
    }

    #[test]
    fn test_event_json() {
        let event: Event = serde_json::from_str(r#"{"action": "open"}"#).unwrap();
        assert_eq!(event, Event::Open);

        let event: Event =
            serde_json::from_str(r#"{"action": "rotate", "direction": "reset"}"#).unwrap();
        assert_eq!(event, Event::Rotate { direction: Direction::Reset });

        let event: Event = serde_json::from_str(
            r#"{"action": "generate", "form": {"dict": "d", "anim": "a", "props": []}}"#,
        )
        .unwrap();
        assert_eq!(event, Event::Generate { form: form() });
    }

    #[test]
    fn test_notification_json() {
        let json = serde_json::to_value(Notification::RotatePreview { direction: Direction::Left })
            .unwrap();
        assert_eq!(json, serde_json::json!({"event": "rotate_preview", "direction": "left"}));

        let json = serde_json::to_value(Notification::CloseUi).unwrap();
        assert_eq!(json, serde_json::json!({"event": "close_ui"}));
    }
}
