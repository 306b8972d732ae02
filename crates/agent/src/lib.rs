//! Intent dispatch for the solar advisor
//!
//! `IntentDispatcher` maps a webhook request to exactly one tool and wraps
//! the reply; `InMemorySessionStore` keeps per-conversation inputs.

pub mod dispatcher;
pub mod error;
pub mod session_store;

pub use dispatcher::IntentDispatcher;
pub use error::AgentError;
pub use session_store::InMemorySessionStore;
