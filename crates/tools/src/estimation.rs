//! Estimation Engine
//!
//! Session-aware sizing and costing. The arithmetic lives in
//! `solar_agent_core::sizing`; this module decides which inputs to use,
//! keeps the session up to date and renders the replies.
//!
//! Cost policy: a size that exactly matches a catalog tier is quoted with the
//! tier's breakdown, any other size uses the per-kW formula.

use std::sync::Arc;

use solar_agent_config::{render, CostTier, ToolsDomainView};
use solar_agent_core::parameters::display_number;
use solar_agent_core::sizing::{format_size, format_thousands, turnkey_cost};
use solar_agent_core::{Parameters, SessionRecord, SessionStore, SessionUpdate, SizingBasis};

use crate::params;

/// Result of a sizing run
#[derive(Debug, Clone, PartialEq)]
pub struct SizeEstimate {
    /// Recommended size; zero when nothing is known
    pub size_kw: f64,
    pub basis: Option<SizingBasis>,
    /// Session after the run
    pub session: SessionRecord,
}

impl SizeEstimate {
    pub fn is_sufficient(&self) -> bool {
        self.size_kw > 0.0
    }
}

/// How a cost was arrived at
#[derive(Debug, Clone, PartialEq)]
pub enum CostQuote {
    Tier(CostTier),
    Formula { size_kw: f64, cost: f64 },
}

impl CostQuote {
    pub fn total(&self) -> f64 {
        match self {
            CostQuote::Tier(tier) => tier.total,
            CostQuote::Formula { cost, .. } => *cost,
        }
    }
}

pub struct EstimationEngine {
    store: Arc<dyn SessionStore>,
    view: Arc<ToolsDomainView>,
}

impl EstimationEngine {
    pub fn new(store: Arc<dyn SessionStore>, view: Arc<ToolsDomainView>) -> Self {
        Self { store, view }
    }

    /// Normalise the sizing inputs of one turn into a session update
    pub fn extract_update(&self, parameters: &Parameters) -> SessionUpdate {
        let area = params::roof_area(parameters);
        SessionUpdate {
            bill: params::monthly_bill(parameters),
            units: params::monthly_units(parameters),
            area: area.as_ref().map(|a| a.square_meters(self.view.sizing())),
            area_display: area.as_ref().map(|a| a.display()),
            size_kw: None,
        }
    }

    /// Merge supplied inputs into the session, then size from the best known
    /// input. A positive size is written back to the session.
    pub fn estimate_system_size(&self, session_id: &str, update: &SessionUpdate) -> SizeEstimate {
        let record = self.store.merge(session_id, update);

        let Some(basis) = SizingBasis::select(record.units, record.bill, record.area) else {
            tracing::debug!(session = session_id, "No sizing input known");
            return SizeEstimate {
                size_kw: 0.0,
                basis: None,
                session: record,
            };
        };

        let size_kw = basis.size_kw(self.view.sizing());
        let session = self.store.set_size_kw(session_id, size_kw);

        tracing::debug!(
            session = session_id,
            basis = basis.label(),
            size_kw,
            "System size estimated"
        );

        SizeEstimate {
            size_kw,
            basis: Some(basis),
            session,
        }
    }

    /// Formula cost; zero for non-positive sizes
    pub fn estimate_cost(&self, size_kw: f64) -> f64 {
        if !(size_kw.is_finite() && size_kw > 0.0) {
            return 0.0;
        }
        turnkey_cost(size_kw, self.view.sizing())
    }

    /// Tier breakdown when the size is a standard one, formula otherwise
    pub fn quote(&self, size_kw: f64) -> Option<CostQuote> {
        if !(size_kw.is_finite() && size_kw > 0.0) {
            return None;
        }
        Some(match self.view.cost_tier(size_kw) {
            Some(tier) => CostQuote::Tier(tier.clone()),
            None => CostQuote::Formula {
                size_kw,
                cost: self.estimate_cost(size_kw),
            },
        })
    }

    /// Reply for the system size intent
    pub fn size_reply(&self, session_id: &str, parameters: &Parameters) -> String {
        let update = self.extract_update(parameters);
        let estimate = self.estimate_system_size(session_id, &update);
        let templates = self.view.templates();

        if !estimate.is_sufficient() {
            let session = &estimate.session;
            let mut missing = Vec::new();
            if session.units.is_none() && session.bill.is_none() {
                missing.push(templates.missing_consumption.as_str());
            }
            if session.area.is_none() {
                missing.push(templates.missing_area.as_str());
            }
            return render(&templates.size_missing, &[("missing", &missing.join(", "))]);
        }

        let size = format_size(estimate.size_kw);
        let mut reply = render(
            &templates.size_estimate,
            &[("size", &size), ("region", self.view.region_name())],
        );

        let details = self.basis_details(&estimate.session);
        if !details.is_empty() {
            reply.push('\n');
            reply.push_str(&render(&templates.size_basis, &[("details", &details.join(", "))]));
        }
        reply
    }

    fn basis_details(&self, session: &SessionRecord) -> Vec<String> {
        let templates = self.view.templates();
        let mut details = Vec::new();

        if let Some(units) = session.units {
            details.push(render(&templates.basis_units, &[("units", &display_number(units))]));
        }
        if let Some(bill) = session.bill {
            details.push(render(&templates.basis_bill, &[("bill", &format_thousands(bill))]));
        }
        let area = session
            .area_display
            .clone()
            .or_else(|| session.area.map(|m2| format!("{} m²", display_number(m2))));
        if let Some(area) = area {
            details.push(render(&templates.basis_area, &[("area", &area)]));
        }
        details
    }

    /// Size for a cost check: explicit parameter, then the session's last
    /// size, then a fresh estimate from what the session knows
    pub fn resolve_cost_size(&self, session_id: &str, parameters: &Parameters) -> f64 {
        if let Some(size) = params::size_kw(parameters) {
            return size;
        }

        let update = self.extract_update(parameters);
        let record = self.store.merge(session_id, &update);
        if let Some(size) = record.size_kw.filter(|s| *s > 0.0) {
            return size;
        }

        self.estimate_system_size(session_id, &SessionUpdate::default())
            .size_kw
    }

    /// Reply for the cost intent
    pub fn cost_reply(&self, session_id: &str, parameters: &Parameters) -> String {
        let size_kw = self.resolve_cost_size(session_id, parameters);
        let templates = self.view.templates();

        match self.quote(size_kw) {
            None => templates.cost_missing.clone(),
            Some(CostQuote::Tier(tier)) => {
                tracing::debug!(session = session_id, size_kw, "Quoting cost tier");
                let misc = if tier.misc > 0.0 {
                    render(&templates.cost_breakdown_misc, &[("misc", &format_thousands(tier.misc))])
                } else {
                    String::new()
                };
                render(
                    &templates.cost_breakdown,
                    &[
                        ("size", &format_size(tier.size_kw)),
                        ("panels", &format_thousands(tier.panels)),
                        ("inverter", &format_thousands(tier.inverter)),
                        ("installation", &format_thousands(tier.installation)),
                        ("misc", &misc),
                        ("total", &format_thousands(tier.total)),
                    ],
                )
            }
            Some(CostQuote::Formula { size_kw, cost }) => {
                tracing::debug!(session = session_id, size_kw, cost, "Quoting formula cost");
                render(
                    &templates.cost_estimate,
                    &[("size", &format_size(size_kw)), ("cost", &format_thousands(cost))],
                )
            }
        }
    }
}
