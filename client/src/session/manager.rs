use crate::config::SessionOptions;
use crate::error::ChatError;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::session::state::{ConnectionState, Effect, SessionStatus, transition};
use crate::session::transcript::Transcript;
use crate::transport::{Connector, TransportEvent, TransportHandle};
use tracing::{debug, info, warn};
use url::Url;

/// One logical chat-room session
///
/// Owns at most one live transport handle at a time. All lifecycle events are
/// fed in through [`handle_event`](Self::handle_event) on the host's single
/// event loop; there is no internal locking because nothing here is shared.
///
/// Each handle is tagged with a generation number at creation. Teardown
/// retires the generation, so late events from an old handle can never corrupt
/// the state of a newer one.
pub struct ChatSession<C: Connector> {
    options: SessionOptions,
    endpoint: Url,
    connector: C,
    handle: Option<C::Handle>,
    generation: u64,
    state: ConnectionState,
    transcript: Transcript,
}

impl<C: Connector> ChatSession<C> {
    pub fn new(options: SessionOptions, endpoint: Url, connector: C) -> Self {
        Self {
            options,
            endpoint,
            connector,
            handle: None,
            generation: 0,
            state: ConnectionState::Disconnected,
            transcript: Transcript::new(),
        }
    }

    /// Connection status observable
    pub fn status(&self) -> SessionStatus {
        self.state.status()
    }

    /// Transcript observable, in arrival order
    pub fn transcript(&self) -> &[String] {
        self.transcript.lines()
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Open a connection to the named room.
    ///
    /// A blank room name is rejected with a diagnostic and no state change.
    /// Otherwise any prior handle is torn down first, then a fresh handle is
    /// opened against the room target. Status flips to connected only when the
    /// open event arrives, never at call time.
    pub fn connect(&mut self, room: &str) {
        let room = room.trim();
        if room.is_empty() {
            warn!("Connect rejected: {}", ChatError::EmptyRoom);
            return;
        }

        self.disconnect();

        let url = match self.room_url(room) {
            Ok(url) => url,
            Err(e) => {
                warn!("Connect to room {:?} failed: {}", room, e);
                return;
            }
        };

        match self.connector.connect(&url, self.generation) {
            Ok(handle) => {
                self.handle = Some(handle);
                self.state = ConnectionState::Connecting;
                info!("{} connecting to room {:?}", self.options.username, room);
            }
            Err(e) => {
                warn!("Connect to room {:?} failed: {}", room, e);
            }
        }
    }

    /// Tear down the current handle, if any.
    ///
    /// Idempotent. Always clears the transcript, handle or not, and retires
    /// the current generation so late events from the old handle are ignored.
    pub fn disconnect(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.close();
            debug!("Closed handle (generation {})", self.generation);
        }
        self.generation += 1;
        self.state = ConnectionState::Disconnected;
        self.transcript.clear();
    }

    /// Send a chat line to the room.
    ///
    /// No-op if the text trims to empty or the connection is not open. The
    /// sent line is not appended locally; it shows up in the transcript only
    /// if the server echoes it back.
    pub fn send(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        if self.state != ConnectionState::Open {
            debug!("Dropping send: no open connection");
            return;
        }

        let envelope = ClientMessage::ChatMessage {
            username: self.options.username.clone(),
            user_id: self.options.user_id.clone(),
            message: text.to_string(),
        };
        match serde_json::to_string(&envelope) {
            Ok(json) => {
                if let Some(handle) = self.handle.as_mut()
                    && let Err(e) = handle.send(json)
                {
                    warn!("Send failed: {}", e);
                }
            }
            Err(e) => {
                warn!("Failed to serialize message: {}", e);
            }
        }
    }

    /// Feed one transport event into the session.
    ///
    /// Events tagged with a retired generation are discarded before touching
    /// any state.
    pub fn handle_event(&mut self, generation: u64, event: TransportEvent) {
        if generation != self.generation {
            debug!(
                "Ignoring event from retired handle (generation {}, current {})",
                generation, self.generation
            );
            return;
        }

        let t = transition(self.state, &event);
        self.state = t.next;

        match t.effect {
            Effect::None => match &event {
                TransportEvent::Opened if self.state == ConnectionState::Open => {
                    info!("{} connected to chat server", self.options.username);
                }
                TransportEvent::Error(reason) => {
                    warn!(
                        "{}: {}",
                        self.options.username,
                        ChatError::Transport(reason.clone())
                    );
                }
                _ => {}
            },
            Effect::Teardown => {
                info!("{} disconnected from chat server", self.options.username);
                self.disconnect();
            }
            Effect::Ingest => {
                if let TransportEvent::Frame(text) = event {
                    self.ingest_frame(&text);
                }
            }
        }
    }

    /// Decode and classify one inbound frame
    fn ingest_frame(&mut self, text: &str) {
        match serde_json::from_str::<ServerMessage>(text) {
            Ok(msg) => {
                debug!("Received {} frame", msg.message_type());
                self.transcript.apply(msg);
            }
            Err(e) => {
                warn!(
                    "Invalid message from server: {}",
                    ChatError::MalformedFrame(e)
                );
            }
        }
    }

    /// Connection target: base endpoint + room path segment + identity query
    fn room_url(&self, room: &str) -> Result<Url, ChatError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| ChatError::Transport("endpoint cannot be a base URL".to_string()))?
            .pop_if_empty()
            .push(room);
        url.query_pairs_mut()
            .append_pair("user_id", &self.options.user_id)
            .append_pair("username", &self.options.username);
        Ok(url)
    }
}

impl<C: Connector> Drop for ChatSession<C> {
    fn drop(&mut self) {
        // No leaked connections on widget teardown.
        self.disconnect();
    }
}
