// src/view.rs
use crate::message::Message;

/// Fixed identifiers of the elements the widget is wired to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementIds {
    pub messages: String,
    pub input: String,
    pub send_button: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            messages: "chat-messages".to_string(),
            input: "user-input".to_string(),
            send_button: "send-button".to_string(),
        }
    }
}

/// Events delivered by the surrounding page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Click { target: String },
    KeyPress { target: String, key: String },
    Input { target: String, value: String },
}

impl UiEvent {
    pub fn click(target: impl Into<String>) -> Self {
        Self::Click {
            target: target.into(),
        }
    }

    pub fn key_press(target: impl Into<String>, key: impl Into<String>) -> Self {
        Self::KeyPress {
            target: target.into(),
            key: key.into(),
        }
    }

    pub fn input(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Input {
            target: target.into(),
            value: value.into(),
        }
    }
}

/// The surface messages are rendered into.
///
/// Text is always rendered as plain text, never interpreted as markup.
///
/// `container` is the id of the message-list element the bubble belongs to.
pub trait ChatView {
    fn append_message(&mut self, container: &str, message: &Message);

    fn scroll_to_latest(&mut self, container: &str);

    fn input_value(&self) -> String;

    fn set_input_value(&mut self, value: &str);
}

/// A bubble as a headless view saw it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bubble {
    pub container: String,
    pub classes: &'static str,
    pub message: Message,
}

/// Headless view that keeps everything it was asked to render.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub rendered: Vec<Bubble>,
    pub input: String,
    pub scrolls: Vec<String>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.rendered.iter().map(|b| b.message.text.as_str()).collect()
    }
}

impl ChatView for RecordingView {
    fn append_message(&mut self, container: &str, message: &Message) {
        self.rendered.push(Bubble {
            container: container.to_string(),
            classes: message.css_classes(),
            message: message.clone(),
        });
    }

    fn scroll_to_latest(&mut self, container: &str) {
        self.scrolls.push(container.to_string());
    }

    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn set_input_value(&mut self, value: &str) {
        self.input = value.to_string();
    }
}
