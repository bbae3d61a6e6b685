//! WebSocket transport binding
//!
//! Each opened handle is backed by a spawned task that owns the socket. The
//! task forwards inbound frames and lifecycle transitions to the host's event
//! channel and drains outbound commands from the handle. When the socket
//! errors, an `Error` event is emitted followed by a `Closed` event, matching
//! the two-phase teardown the session manager expects.

use crate::error::ChatError;
use crate::transport::{Connector, SessionEvent, TransportEvent, TransportHandle};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, warn};
use url::Url;

/// Command sent from the handle to the socket task
enum WsCommand {
    Send(String),
    Close,
}

/// Outbound side of a live WebSocket connection
pub struct WsHandle {
    commands: mpsc::UnboundedSender<WsCommand>,
}

impl TransportHandle for WsHandle {
    fn send(&mut self, text: String) -> Result<(), ChatError> {
        self.commands
            .send(WsCommand::Send(text))
            .map_err(|_| ChatError::Transport("connection task is gone".to_string()))
    }

    fn close(&mut self) {
        // The task may already be gone after a server-side close.
        let _ = self.commands.send(WsCommand::Close);
    }
}

/// Opens WebSocket handles and routes their events to a single channel
///
/// The paired receiver is pumped by the host's event loop into
/// [`ChatSession::handle_event`](crate::session::manager::ChatSession::handle_event).
pub struct WsConnector {
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl WsConnector {
    pub fn new(events: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self { events }
    }
}

impl Connector for WsConnector {
    type Handle = WsHandle;

    fn connect(&mut self, url: &Url, generation: u64) -> Result<WsHandle, ChatError> {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let events = self.events.clone();
        let url = url.clone();

        tokio::spawn(async move {
            run_socket(url, generation, events, command_rx).await;
        });

        Ok(WsHandle {
            commands: command_tx,
        })
    }
}

/// Drive one socket for its whole lifetime
async fn run_socket(
    url: Url,
    generation: u64,
    events: mpsc::UnboundedSender<SessionEvent>,
    mut commands: mpsc::UnboundedReceiver<WsCommand>,
) {
    let emit = |event: TransportEvent| {
        // The host dropping its receiver just means nobody is listening.
        let _ = events.send(SessionEvent { generation, event });
    };

    let ws = match connect_async(url.as_str()).await {
        Ok((ws, _response)) => ws,
        Err(e) => {
            warn!("WebSocket connect to {} failed: {}", url, e);
            emit(TransportEvent::Error(e.to_string()));
            emit(TransportEvent::Closed);
            return;
        }
    };

    debug!("WebSocket open: {} (generation {})", url, generation);
    emit(TransportEvent::Opened);

    let (mut sink, mut stream) = ws.split();

    loop {
        tokio::select! {
            cmd = commands.recv() => match cmd {
                Some(WsCommand::Send(text)) => {
                    if let Err(e) = sink.send(Message::text(text)).await {
                        warn!("WebSocket send failed: {}", e);
                        emit(TransportEvent::Error(e.to_string()));
                        emit(TransportEvent::Closed);
                        return;
                    }
                }
                // A dropped handle counts as a close request.
                Some(WsCommand::Close) | None => {
                    let _ = sink.send(Message::Close(None)).await;
                    emit(TransportEvent::Closed);
                    return;
                }
            },
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    emit(TransportEvent::Frame(text.as_str().to_owned()));
                }
                Some(Ok(Message::Close(_))) | None => {
                    debug!("WebSocket closed by peer (generation {})", generation);
                    emit(TransportEvent::Closed);
                    return;
                }
                Some(Ok(_)) => {
                    // Binary/ping/pong frames are not part of the protocol.
                }
                Some(Err(e)) => {
                    warn!("WebSocket stream error: {}", e);
                    emit(TransportEvent::Error(e.to_string()));
                    emit(TransportEvent::Closed);
                    return;
                }
            },
        }
    }
}
