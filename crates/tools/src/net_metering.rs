//! Net metering explainer

use std::sync::Arc;

use solar_agent_config::ToolsDomainView;

pub struct NetMeteringExplainer {
    view: Arc<ToolsDomainView>,
}

impl NetMeteringExplainer {
    pub fn new(view: Arc<ToolsDomainView>) -> Self {
        Self { view }
    }

    pub fn explain(&self) -> String {
        self.view.templates().net_metering.clone()
    }
}
