//! Core types for the solar advisor webhook
//!
//! Everything here is transport- and storage-agnostic:
//! - Tagged parameter values coming from the NLU platform
//! - Session records and the `SessionStore` abstraction
//! - The intent enumeration and webhook envelope
//! - Pure sizing and cost arithmetic

pub mod error;
pub mod intent;
pub mod parameters;
pub mod session;
pub mod sizing;
pub mod webhook;

pub use error::CoreError;
pub use intent::Intent;
pub use parameters::{AreaUnit, EnergyUsage, ParamValue, Parameters, RoofArea};
pub use session::{SessionRecord, SessionStore, SessionUpdate, DEFAULT_SESSION_ID};
pub use sizing::{SizingBasis, SizingConstants};
pub use webhook::{WebhookRequest, WebhookResponse};
