//! Webhook envelope
//!
//! Only the fields the advisor reads are modelled; everything else in the
//! NLU platform's request is ignored. Fields are read one by one from the raw
//! JSON so a sparse or partially malformed body still yields a request.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::intent::Intent;
use crate::parameters::Parameters;
use crate::session::DEFAULT_SESSION_ID;

#[derive(Debug, Clone, Default)]
pub struct WebhookRequest {
    pub query_result: QueryResult,
    pub session: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub intent: IntentRef,
    pub parameters: Parameters,
    pub query_text: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct IntentRef {
    pub display_name: Option<String>,
}

/// String field of an object; null, wrong-typed or missing reads as `None`
fn text_field(value: Option<&Value>, key: &str) -> Option<String> {
    value?.get(key)?.as_str().map(str::to_string)
}

impl WebhookRequest {
    /// Read the envelope from any JSON value.
    ///
    /// Each field is picked out on its own; a null or wrong-typed field is
    /// left at its default instead of failing the whole request.
    pub fn from_json(value: &Value) -> Self {
        let query = value.get("queryResult").filter(|q| q.is_object());

        Self {
            query_result: QueryResult {
                intent: IntentRef {
                    display_name: text_field(query.and_then(|q| q.get("intent")), "displayName"),
                },
                parameters: query
                    .and_then(|q| q.get("parameters"))
                    .map(Parameters::from_json)
                    .unwrap_or_default(),
                query_text: text_field(query, "queryText"),
            },
            session: text_field(Some(value), "session"),
        }
    }
}

impl WebhookRequest {
    pub fn intent_name(&self) -> &str {
        self.query_result.intent.display_name.as_deref().unwrap_or("")
    }

    pub fn intent(&self) -> Intent {
        Intent::from_display_name(self.intent_name())
    }

    pub fn parameters(&self) -> &Parameters {
        &self.query_result.parameters
    }

    /// Session id, falling back to the shared default for blank ids
    pub fn session_id(&self) -> &str {
        self.session
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SESSION_ID)
    }
}

impl<'de> Deserialize<'de> for WebhookRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(WebhookRequest::from_json(&value))
    }
}

/// Reply body: a single text message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookResponse {
    #[serde(rename = "fulfillmentText")]
    pub fulfillment_text: String,
}

impl WebhookResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            fulfillment_text: text.into(),
        }
    }
}
