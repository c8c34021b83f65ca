//! Widget shell — the floating chat window's state.
//!
//! Holds the open/closed toggle and the input field, and hands submissions
//! to the turn controller. It keeps no transcript of its own: `render` reads
//! the controller's conversation every time.

use std::sync::Arc;

use folio_agent::{TurnController, TurnOutcome};
use folio_core::message::{Message, Role};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::debug;

/// Label shown while a reply is pending.
pub const TYPING_INDICATOR: &str = "Typing...";

/// Everything a view needs to draw the widget.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetView {
    pub open: bool,
    pub input: String,
    pub messages: Vec<Message>,
    pub composing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator: Option<&'static str>,
}

impl WidgetView {
    /// Plain-text rendering, one line per message.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .messages
            .iter()
            .map(|m| match m.role {
                Role::User => format!("You > {}", m.content),
                Role::Assistant => format!("Assistant > {}", m.content),
            })
            .collect();
        if let Some(indicator) = self.indicator {
            lines.push(indicator.to_string());
        }
        lines
    }
}

pub struct WidgetShell {
    controller: Arc<TurnController>,
    open: bool,
    input: String,
}

impl WidgetShell {
    /// A closed widget over `controller`.
    pub fn new(controller: Arc<TurnController>) -> Self {
        Self {
            controller,
            open: false,
            input: String::new(),
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closing hides the window; pending turns keep running.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn controller(&self) -> &Arc<TurnController> {
        &self.controller
    }

    /// Submit the input field.
    ///
    /// The field is cleared immediately and the turn runs in the background.
    /// Returns `None` for a blank field, which the controller would ignore anyway.
    pub fn submit(&mut self) -> Option<JoinHandle<Option<TurnOutcome>>> {
        let text = std::mem::take(&mut self.input);
        if text.trim().is_empty() {
            debug!("Blank widget submission ignored");
            return None;
        }
        let controller = self.controller.clone();
        Some(tokio::spawn(async move { controller.submit(&text).await }))
    }

    pub async fn render(&self) -> WidgetView {
        let composing = self.controller.is_composing();
        WidgetView {
            open: self.open,
            input: self.input.clone(),
            messages: self.controller.transcript().await,
            composing,
            indicator: composing.then_some(TYPING_INDICATOR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_agent::ScriptedResponder;
    use folio_core::catalog::ResponseCatalog;
    use folio_core::event::EventBus;
    use std::time::Duration;

    fn shell() -> WidgetShell {
        let catalog = Arc::new(ResponseCatalog::default());
        let responder = Arc::new(ScriptedResponder::new(catalog.clone()));
        let controller = TurnController::new(responder, catalog, Arc::new(EventBus::default()))
            .with_reply_delay(Duration::from_millis(1000));
        WidgetShell::new(Arc::new(controller))
    }

    #[test]
    fn toggle_open_close() {
        let mut shell = shell();
        assert!(!shell.is_open());
        shell.toggle();
        assert!(shell.is_open());
        shell.close();
        assert!(!shell.is_open());
        shell.open();
        assert!(shell.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn submit_clears_input_and_shows_indicator() {
        let mut shell = shell();
        shell.open();
        shell.set_input("What projects have you built?");

        let handle = shell.submit().unwrap();
        assert_eq!(shell.input(), "");

        tokio::time::sleep(Duration::from_millis(100)).await;
        let view = shell.render().await;
        assert!(view.composing);
        assert_eq!(view.indicator, Some(TYPING_INDICATOR));
        assert_eq!(view.messages.len(), 2);

        handle.await.unwrap().unwrap();
        let view = shell.render().await;
        assert!(!view.composing);
        assert_eq!(view.messages.len(), 3);
        assert!(view.to_lines()[2].starts_with("Assistant > I've built"));
    }

    #[tokio::test(start_paused = true)]
    async fn blank_input_not_submitted() {
        let mut shell = shell();
        shell.set_input("   ");
        assert!(shell.submit().is_none());
        assert_eq!(shell.input(), "");
        assert_eq!(shell.render().await.messages.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn closing_does_not_cancel_turn() {
        let mut shell = shell();
        shell.open();
        shell.set_input("hi");
        let handle = shell.submit().unwrap();
        shell.close();

        let outcome = handle.await.unwrap().unwrap();
        assert_eq!(outcome.reply.role, Role::Assistant);
        assert!(!shell.render().await.open);
    }
}
