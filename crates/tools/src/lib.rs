//! Solar advisor tools
//!
//! Each tool turns normalised inputs into a reply string:
//! - `EstimationEngine`: system size and turnkey cost
//! - `InstallerLookup`: installer directory by location
//! - `FaqLookup`: FAQ answers by topic
//! - `NetMeteringExplainer`: fixed net metering guide

pub mod error;
pub mod estimation;
pub mod faq;
pub mod installers;
pub mod net_metering;
pub mod params;

pub use error::ToolError;
pub use estimation::{CostQuote, EstimationEngine, SizeEstimate};
pub use faq::FaqLookup;
pub use installers::InstallerLookup;
pub use net_metering::NetMeteringExplainer;
