//! Conversation session memory
//!
//! A session remembers the sizing inputs a user gave earlier in the
//! conversation so later turns ("how much would that cost?") can reuse them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session id used when the request carries none
pub const DEFAULT_SESSION_ID: &str = "default";

/// Remembered inputs and the last computed size for one conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Monthly bill in PKR
    pub bill: Option<f64>,
    /// Monthly consumption in kWh
    pub units: Option<f64>,
    /// Roof area normalised to square metres
    pub area: Option<f64>,
    /// Roof area as the user said it, e.g. "5 marla"
    pub area_display: Option<String>,
    /// Last recommended system size in kW
    pub size_kw: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self {
            bill: None,
            units: None,
            area: None,
            area_display: None,
            size_kw: None,
            updated_at: Utc::now(),
        }
    }
}

impl SessionRecord {
    /// Apply an update; fields the update leaves unset keep their value
    pub fn apply(&mut self, update: &SessionUpdate) {
        if let Some(bill) = update.bill {
            tracing::debug!(slot = "bill", value = bill, "Slot updated");
            self.bill = Some(bill);
        }
        if let Some(units) = update.units {
            tracing::debug!(slot = "units", value = units, "Slot updated");
            self.units = Some(units);
        }
        if let Some(area) = update.area {
            tracing::debug!(slot = "area", value = area, "Slot updated");
            self.area = Some(area);
        }
        if let Some(ref display) = update.area_display {
            self.area_display = Some(display.clone());
        }
        if let Some(size_kw) = update.size_kw {
            tracing::debug!(slot = "size_kw", value = size_kw, "Slot updated");
            self.size_kw = Some(size_kw);
        }
        self.updated_at = Utc::now();
    }

    /// True when at least one sizing input is known
    pub fn has_sizing_input(&self) -> bool {
        self.bill.is_some() || self.units.is_some() || self.area.is_some()
    }
}

/// Partial set of values extracted from one turn
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionUpdate {
    pub bill: Option<f64>,
    pub units: Option<f64>,
    pub area: Option<f64>,
    pub area_display: Option<String>,
    pub size_kw: Option<f64>,
}

impl SessionUpdate {
    pub fn is_empty(&self) -> bool {
        self.bill.is_none()
            && self.units.is_none()
            && self.area.is_none()
            && self.area_display.is_none()
            && self.size_kw.is_none()
    }

    /// Combine two updates, preferring values from `other`
    pub fn merge(self, other: SessionUpdate) -> SessionUpdate {
        SessionUpdate {
            bill: other.bill.or(self.bill),
            units: other.units.or(self.units),
            area: other.area.or(self.area),
            area_display: other.area_display.or(self.area_display),
            size_kw: other.size_kw.or(self.size_kw),
        }
    }
}

/// Storage for session records.
///
/// `merge` must be atomic per session id: two concurrent merges into the same
/// session both land and neither loses a field.
pub trait SessionStore: Send + Sync {
    /// Snapshot of a session, if it exists
    fn get(&self, session_id: &str) -> Option<SessionRecord>;

    /// Apply an update, creating the session when needed; returns the result
    fn merge(&self, session_id: &str, update: &SessionUpdate) -> SessionRecord;

    /// Number of live sessions
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remember a computed size
    fn set_size_kw(&self, session_id: &str, size_kw: f64) -> SessionRecord {
        self.merge(
            session_id,
            &SessionUpdate {
                size_kw: Some(size_kw),
                ..Default::default()
            },
        )
    }
}
