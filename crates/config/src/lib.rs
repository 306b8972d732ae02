//! Configuration for the solar advisor
//!
//! - `Settings`: server and estimation tunables (defaults, TOML file, env)
//! - `catalog`: cost tiers, installers and FAQs, built-in or from JSON files
//! - `prompts`: reply templates
//! - `ToolsDomainView`: what the tools crate reads, in its own terms

pub mod catalog;
pub mod constants;
pub mod error;
pub mod prompts;
pub mod settings;
pub mod views;

pub use catalog::{
    BuiltinCatalog, Catalog, CatalogSource, CostTier, FaqEntry, Installer, InstallerDirectory,
    JsonFileCatalog, LayeredCatalog,
};
pub use error::{CatalogError, ConfigError};
pub use prompts::{render, ResponseTemplates};
pub use settings::{LogFormat, Settings};
pub use views::ToolsDomainView;
