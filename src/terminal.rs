// src/terminal.rs
use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::warn;

use crate::message::{Message, Origin};
use crate::view::{ChatView, ElementIds, UiEvent};

/// Line-oriented stand-in for the chat page.
pub struct TerminalView<W: Write> {
    out: W,
    input: String,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            input: String::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    // one scrollback, so the container id has no effect
    fn append_message(&mut self, _container: &str, message: &Message) {
        let prefix = match message.origin {
            Origin::User => "you>",
            Origin::Bot => "bot>",
        };
        if let Err(e) = writeln!(self.out, "{} {}", prefix, message.text) {
            warn!("failed to write message: {}", e);
        }
    }

    // newest line is always the last one written
    fn scroll_to_latest(&mut self, _container: &str) {
        if let Err(e) = self.out.flush() {
            warn!("failed to flush output: {}", e);
        }
    }

    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn set_input_value(&mut self, value: &str) {
        self.input = value.to_string();
    }
}

/// Turns each line into typing followed by Enter on the input element.
///
/// Invalid UTF-8 is replaced rather than rejected. The returned channel
/// closes once the reader hits EOF or a read fails.
pub fn spawn_line_events<R>(reader: R, ids: &ElementIds) -> mpsc::Receiver<UiEvent>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);
    let input = ids.input.clone();

    tokio::spawn(async move {
        let mut reader = reader;
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = decode_line(&buf);
                    let typed = tx.send(UiEvent::input(input.clone(), line)).await;
                    let entered = tx.send(UiEvent::key_press(input.clone(), "Enter")).await;
                    if typed.is_err() || entered.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("failed to read input: {}", e);
                    break;
                }
            }
        }
    });

    rx
}

fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}
