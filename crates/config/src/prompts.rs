//! Reply templates
//!
//! Every user-facing string the webhook sends. Placeholders use `{name}`
//! syntax and are filled by [`render`]. The emoji and line breaks are part of
//! the content the assistant platform shows, so defaults are kept verbatim.

use serde::{Deserialize, Serialize};

use crate::constants::helplines;

/// Substitute `{key}` placeholders
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{}}}", key), value);
    }
    result
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseTemplates {
    /// `{size}`, `{region}`
    pub size_estimate: String,
    /// `{details}`: comma-separated list of inputs the estimate used
    pub size_basis: String,
    pub basis_units: String,
    pub basis_bill: String,
    pub basis_area: String,
    /// `{missing}`: comma-separated list of the items below
    pub size_missing: String,
    pub missing_consumption: String,
    pub missing_area: String,

    /// `{size}`, `{cost}`
    pub cost_estimate: String,
    /// `{size}`, `{panels}`, `{inverter}`, `{installation}`, `{misc}`, `{total}`
    pub cost_breakdown: String,
    /// Appended to the breakdown when the tier has a miscellaneous line
    pub cost_breakdown_misc: String,
    pub cost_missing: String,

    /// `{location}`
    pub installers_header: String,
    /// `{index}`, `{name}`, `{contact}`
    pub installer_entry: String,
    /// `{rating}`
    pub installer_rating: String,
    /// `{address}`
    pub installer_address: String,
    pub installer_tips: String,

    pub faq_prompt: String,
    /// `{topic}`
    pub faq_not_found: String,
    /// `{topic}`, `{answer}`
    pub faq_answer: String,

    pub net_metering: String,

    pub capability_summary: String,
    pub unauthorized: String,
}

impl Default for ResponseTemplates {
    fn default() -> Self {
        Self {
            size_estimate: "Estimated system size: ~{size} kW for {region} ☀️".to_string(),
            size_basis: "(Based on {details})".to_string(),
            basis_units: "{units} units/month".to_string(),
            basis_bill: "bill of PKR {bill}".to_string(),
            basis_area: "roof area of {area}".to_string(),
            size_missing: "I need more information to calculate system size. Please provide {missing}.".to_string(),
            missing_consumption: "monthly electricity consumption (in units) or monthly bill amount (in PKR)".to_string(),
            missing_area: "roof area in sq ft or marla".to_string(),

            cost_estimate: "Estimated turnkey cost for {size} kW: ~PKR {cost}".to_string(),
            cost_breakdown: "💡 Cost for {size}kW system:\n• Panels: PKR {panels}\n• Inverter: PKR {inverter}\n• Installation: PKR {installation}\n{misc}👉 Total: PKR {total}".to_string(),
            cost_breakdown_misc: "• Miscellaneous: PKR {misc}\n".to_string(),
            cost_missing: "Please provide monthly bill/units or rooftop area to estimate cost.".to_string(),

            installers_header: "🔧 Top Solar Installers in {location}:\n\n".to_string(),
            installer_entry: "{index}. {name}\n   📞 {contact}\n".to_string(),
            installer_rating: "   ⭐ Rating: {rating}\n".to_string(),
            installer_address: "   🏠 {address}\n\n".to_string(),
            installer_tips: format!(
                "💡 Recommendations:\n\
                 • Get quotes from at least 3 companies\n\
                 • Verify warranty terms (minimum 10 years on panels)\n\
                 • Check if they handle net metering paperwork\n\
                 • Ask about after-sales service response time\n\n\
                 📞 Need help choosing? Call {}",
                helplines::ADVISOR
            ),

            faq_prompt: "I can help with maintenance, warranty, battery, panels, inverter, installation, cost, or savings. What topic would you like to know about?".to_string(),
            faq_not_found: "I don't have information about '{topic}' in my FAQ database. I can help with maintenance, warranty, battery, panels, inverter, installation, cost, or savings.".to_string(),
            faq_answer: "💡 {topic}: {answer}".to_string(),

            net_metering: format!(
                "⚡ Net Metering in Pakistan:\n\
                 Sell excess solar to the grid and get credits.\n\
                 Process: Panels produce electricity → excess sent to grid → credits offset your bill.\n\
                 Rawalpindi application:\n\
                 1) Contact IESCO {}\n\
                 2) Submit CNIC, ownership proof, electricity bill, system details\n\
                 3) Install bi-directional meter PKR 25k–40k\n\
                 4) NEPRA approval, start earning credits\n\
                 Financial benefits: 19–22 PKR/unit, reduce bills 70–100%, ROI 20–25% annually.",
                helplines::IESCO
            ),

            capability_summary: "I can help with system size, cost, installers, net metering, and FAQs.".to_string(),
            unauthorized: "Unauthorized.".to_string(),
        }
    }
}
