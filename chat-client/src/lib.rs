//! Terminal chat client for the study relay.
//!
//! The transcript lives only in memory and is gone when the process exits.

pub mod controller;
pub mod relay_client;
pub mod render;
pub mod session;
pub mod transcript;

pub use controller::ChatController;
pub use relay_client::{ClientError, DEFAULT_RELAY_URL, RelayClient};
pub use session::ChatSession;
