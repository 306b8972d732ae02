//! Intent Dispatcher
//!
//! Routes a webhook request to one tool by intent and always answers with a
//! single text reply. Tool failures are logged and answered with the
//! capability summary; they never reach the caller.

use std::sync::Arc;

use solar_agent_config::ToolsDomainView;
use solar_agent_core::{Intent, Parameters, SessionStore, WebhookRequest, WebhookResponse};
use solar_agent_tools::{
    params, EstimationEngine, FaqLookup, InstallerLookup, NetMeteringExplainer,
};

use crate::AgentError;

pub struct IntentDispatcher {
    estimation: EstimationEngine,
    installers: InstallerLookup,
    faq: FaqLookup,
    net_metering: NetMeteringExplainer,
    store: Arc<dyn SessionStore>,
    view: Arc<ToolsDomainView>,
}

impl IntentDispatcher {
    pub fn new(store: Arc<dyn SessionStore>, view: Arc<ToolsDomainView>) -> Self {
        Self {
            estimation: EstimationEngine::new(Arc::clone(&store), Arc::clone(&view)),
            installers: InstallerLookup::new(Arc::clone(&view)),
            faq: FaqLookup::new(Arc::clone(&view)),
            net_metering: NetMeteringExplainer::new(Arc::clone(&view)),
            store,
            view,
        }
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn capability_summary(&self) -> String {
        self.view.templates().capability_summary.clone()
    }

    pub fn handle_webhook(&self, request: &WebhookRequest) -> WebhookResponse {
        let intent = request.intent();
        let session_id = request.session_id();

        tracing::info!(intent = %intent, session = session_id, "Handling webhook");

        let text = match self.dispatch(&intent, session_id, request.parameters()) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    intent = %intent,
                    session = session_id,
                    error = %e,
                    "Tool failed, replying with capability summary"
                );
                self.capability_summary()
            }
        };

        WebhookResponse::text(text)
    }

    fn dispatch(
        &self,
        intent: &Intent,
        session_id: &str,
        parameters: &Parameters,
    ) -> Result<String, AgentError> {
        match intent {
            Intent::SystemSize => Ok(self.estimation.size_reply(session_id, parameters)),
            Intent::CheckCost => Ok(self.estimation.cost_reply(session_id, parameters)),
            Intent::FindInstaller => {
                let location = params::location(parameters);
                Ok(self.installers.find_installers(location.as_deref())?)
            }
            Intent::NetMetering => Ok(self.net_metering.explain()),
            Intent::SolarFaq => {
                let topic = params::faq_topic(parameters);
                Ok(self.faq.find_faq(topic.as_deref())?)
            }
            Intent::Unknown(name) => {
                tracing::debug!(intent = %name, "Unhandled intent");
                Ok(self.capability_summary())
            }
        }
    }
}
