// src/widget.rs
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::error::{WidgetError, WidgetResult};
use crate::message::{ChatRequest, ChatResponse, Message};
use crate::session::SessionId;
use crate::transport::ChatTransport;
use crate::view::{ChatView, ElementIds, UiEvent};

pub const GREETING_ERROR: &str = "Sorry, there was an error connecting to the server.";
pub const REQUEST_ERROR: &str = "Sorry, there was an error processing your request.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Greeting,
    Submit,
}

impl RequestKind {
    fn fallback(self) -> &'static str {
        match self {
            RequestKind::Greeting => GREETING_ERROR,
            RequestKind::Submit => REQUEST_ERROR,
        }
    }
}

/// A finished request, sent back to the UI task.
#[derive(Debug)]
struct Reply {
    seq: u64,
    kind: RequestKind,
    outcome: WidgetResult<ChatResponse>,
}

enum Step {
    Event(Option<UiEvent>),
    Reply(Reply),
}

pub struct ChatWidget<T, V> {
    session_id: SessionId,
    ids: ElementIds,
    transport: Arc<T>,
    view: V,
    log: Vec<Message>,
    next_seq: u64,
    pending: usize,
    replies_tx: mpsc::UnboundedSender<Reply>,
    replies_rx: mpsc::UnboundedReceiver<Reply>,
}

impl<T, V> ChatWidget<T, V>
where
    T: ChatTransport,
    V: ChatView,
{
    /// Builds the widget and fires the greeting request.
    ///
    /// Requests run on spawned tasks, so this must be called inside a tokio runtime.
    pub fn mount(ids: ElementIds, transport: T, view: V) -> Self {
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();
        let mut widget = Self {
            session_id: SessionId::generate(),
            ids,
            transport: Arc::new(transport),
            view,
            log: Vec::new(),
            next_seq: 0,
            pending: 0,
            replies_tx,
            replies_rx,
        };
        info!(session_id = %widget.session_id, "chat widget mounted");

        let greeting = ChatRequest::greeting(widget.session_id.as_str());
        widget.dispatch(RequestKind::Greeting, greeting);
        widget
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn log(&self) -> &[Message] {
        &self.log
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Requests issued but not yet rendered.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Click { target } if target == self.ids.send_button => self.submit(),
            UiEvent::KeyPress { target, key } if target == self.ids.input && key == "Enter" => {
                self.submit()
            }
            UiEvent::Input { target, value } if target == self.ids.input => {
                self.view.set_input_value(&value)
            }
            _ => {}
        }
    }

    /// Sends the current input. Blank input is ignored.
    pub fn submit(&mut self) {
        let raw = self.view.input_value();
        let text = raw.trim();
        if text.is_empty() {
            return;
        }
        let text = text.to_string();

        self.render(Message::user(text.clone()));
        self.view.set_input_value("");

        let request = ChatRequest {
            message: text,
            session_id: self.session_id.to_string(),
        };
        self.dispatch(RequestKind::Submit, request);
    }

    /// Waits for the next finished request and renders it.
    ///
    /// Returns false when nothing is in flight.
    pub async fn process_next_reply(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        // the widget holds a sender, so the channel never reports closed
        let next = self.replies_rx.recv().await;
        match next {
            Some(reply) => {
                self.apply(reply);
                true
            }
            None => false,
        }
    }

    /// Renders replies until nothing is in flight.
    pub async fn settle(&mut self) {
        while self.process_next_reply().await {}
    }

    /// Drives the widget until the event source closes.
    pub async fn run(mut self, mut events: mpsc::Receiver<UiEvent>) -> Self {
        loop {
            let step = tokio::select! {
                event = events.recv() => Step::Event(event),
                Some(reply) = self.replies_rx.recv() => Step::Reply(reply),
            };
            match step {
                Step::Event(Some(event)) => self.handle_event(event),
                Step::Event(None) => break,
                Step::Reply(reply) => self.apply(reply),
            }
        }
        debug!(session_id = %self.session_id, pending = self.pending, "event source closed");
        self
    }

    fn dispatch(&mut self, kind: RequestKind, request: ChatRequest) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending += 1;
        debug!(session_id = %self.session_id, request = seq, ?kind, "sending chat request");

        let transport = Arc::clone(&self.transport);
        let tx = self.replies_tx.clone();
        tokio::spawn(async move {
            let request_task = tokio::spawn(async move { transport.send(request).await });
            // a panicking transport still has to settle as a failed request
            let outcome = match request_task.await {
                Ok(outcome) => outcome,
                Err(e) => Err(WidgetError::Transport(format!("request task aborted: {e}"))),
            };
            // receiver gone means the widget was dropped
            let _ = tx.send(Reply { seq, kind, outcome });
        });
    }

    fn apply(&mut self, reply: Reply) {
        self.pending = self.pending.saturating_sub(1);
        match reply.outcome {
            Ok(response) => {
                debug!(session_id = %self.session_id, request = reply.seq, "chat reply received");
                self.render(Message::bot(response.response));
            }
            Err(e) => {
                error!(
                    session_id = %self.session_id,
                    request = reply.seq,
                    kind = ?reply.kind,
                    "chat request failed: {}",
                    e
                );
                self.render(Message::bot(reply.kind.fallback()));
            }
        }
    }

    fn render(&mut self, message: Message) {
        self.view.append_message(&self.ids.messages, &message);
        self.log.push(message);
        self.view.scroll_to_latest(&self.ids.messages);
    }
}
