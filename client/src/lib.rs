//! Roomchat Client Library
//!
//! This module exports the chat session components for use in integration
//! tests and hosting surfaces.

pub mod config;
pub mod error;
pub mod protocol;
pub mod session;
pub mod transport;

// Re-export commonly used types
pub use config::{ClientConfig, SessionOptions};
pub use error::ChatError;
pub use protocol::{ClientMessage, ServerMessage};
pub use session::manager::ChatSession;
pub use session::state::SessionStatus;
pub use transport::{Connector, SessionEvent, TransportEvent, TransportHandle, WsConnector};
