//! Transport abstraction
//!
//! The session manager never touches a socket directly. It opens handles
//! through a [`Connector`] and receives lifecycle events tagged with the
//! generation of the handle that produced them, so late events from a retired
//! handle can be discarded.

pub mod ws;

use crate::error::ChatError;
use url::Url;

pub use ws::{WsConnector, WsHandle};

/// Lifecycle event produced by a transport handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The connection finished opening
    Opened,
    /// A text frame arrived
    Frame(String),
    /// The connection is gone. Authoritative teardown signal.
    Closed,
    /// The transport failed. A `Closed` event follows.
    Error(String),
}

/// A transport event tagged with the generation of the handle it came from
#[derive(Debug, Clone)]
pub struct SessionEvent {
    pub generation: u64,
    pub event: TransportEvent,
}

/// Outbound side of a live connection
pub trait TransportHandle {
    /// Queue a text frame for transmission
    fn send(&mut self, text: String) -> Result<(), ChatError>;
    /// Request a close. Safe to call on an already-dead connection.
    fn close(&mut self);
}

/// Opens transport handles against a connection target
pub trait Connector {
    type Handle: TransportHandle;

    /// Open a new handle. Opening is non-blocking: the handle is returned
    /// immediately and an `Opened` (or `Error`/`Closed`) event arrives later,
    /// tagged with `generation`.
    fn connect(&mut self, url: &Url, generation: u64) -> Result<Self::Handle, ChatError>;
}
