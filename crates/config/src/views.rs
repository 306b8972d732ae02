//! Tools Domain View
//!
//! The tools crate reads estimation constants, catalogs and templates through
//! this view rather than the settings struct, so catalog sourcing stays out
//! of the tools.

use std::sync::Arc;

use solar_agent_core::SizingConstants;

use crate::catalog::{normalize_location, Catalog, CostTier, FaqEntry, Installer};
use crate::constants::region;
use crate::prompts::ResponseTemplates;
use crate::settings::Settings;

/// View for the tools crate
#[derive(Debug, Clone)]
pub struct ToolsDomainView {
    constants: SizingConstants,
    catalog: Arc<Catalog>,
    templates: Arc<ResponseTemplates>,
}

impl ToolsDomainView {
    pub fn new(
        constants: SizingConstants,
        catalog: Arc<Catalog>,
        templates: Arc<ResponseTemplates>,
    ) -> Self {
        Self {
            constants,
            catalog,
            templates,
        }
    }

    pub fn from_settings(settings: &Settings, catalog: Arc<Catalog>) -> Self {
        Self::new(
            settings.estimation,
            catalog,
            Arc::new(settings.templates.clone()),
        )
    }

    pub fn sizing(&self) -> &SizingConstants {
        &self.constants
    }

    pub fn templates(&self) -> &ResponseTemplates {
        &self.templates
    }

    pub fn region_name(&self) -> &str {
        region::REGION_NAME
    }

    /// Precomputed breakdown for a standard size
    pub fn cost_tier(&self, size_kw: f64) -> Option<&CostTier> {
        self.catalog.tier_for(size_kw)
    }

    pub fn cost_tiers(&self) -> &[CostTier] {
        &self.catalog.cost_tiers
    }

    /// Installers for a location with the key actually used.
    ///
    /// Absent, blank or unknown locations resolve to the default location.
    pub fn installers_for(&self, location: Option<&str>) -> (String, &[Installer]) {
        let requested = location.map(normalize_location).filter(|l| !l.is_empty());

        if let Some(key) = requested {
            if let Some(list) = self.catalog.installers.get(&key) {
                return (key, list);
            }
            tracing::debug!(location = %key, "Unknown installer location, using default");
        }

        let default = region::DEFAULT_INSTALLER_LOCATION.to_string();
        let list = self.catalog.installers.get(&default).unwrap_or(&[]);
        (default, list)
    }

    pub fn faqs(&self) -> &[FaqEntry] {
        &self.catalog.faqs
    }
}

impl Default for ToolsDomainView {
    fn default() -> Self {
        Self::new(
            SizingConstants::default(),
            Arc::new(Catalog::default()),
            Arc::new(ResponseTemplates::default()),
        )
    }
}
