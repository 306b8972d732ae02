//! Static Catalogs
//!
//! Cost tiers, installer directory and FAQ entries. Catalogs come from a
//! [`CatalogSource`]; the built-in tables are always available and JSON files
//! under the data directory can override each table independently:
//!
//! ```text
//! LayeredCatalog
//!   ├── JsonFileCatalog (data/installers.json, faqs.json, cost_tiers.json)
//!   └── BuiltinCatalog  (compiled-in defaults)
//! ```
//!
//! A table that is missing, unreadable or invalid in an overlay falls through
//! to the next layer with a warning.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{data_files, region, TIER_MATCH_TOLERANCE};
use crate::CatalogError;

/// Precomputed cost breakdown for a standard size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostTier {
    pub size_kw: f64,
    pub total: f64,
    pub panels: f64,
    pub inverter: f64,
    pub installation: f64,
    #[serde(default)]
    pub misc: f64,
}

impl CostTier {
    pub fn breakdown_sum(&self) -> f64 {
        self.panels + self.inverter + self.installation + self.misc
    }

    /// Breakdown must add up to the total; all amounts non-negative
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !(self.size_kw.is_finite() && self.size_kw > 0.0) {
            return Err(CatalogError::InvalidTier {
                size_kw: self.size_kw,
                reason: "size must be positive".to_string(),
            });
        }
        let parts = [self.total, self.panels, self.inverter, self.installation, self.misc];
        if parts.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(CatalogError::InvalidTier {
                size_kw: self.size_kw,
                reason: "amounts must be non-negative".to_string(),
            });
        }
        if (self.breakdown_sum() - self.total).abs() > 0.5 {
            return Err(CatalogError::InvalidTier {
                size_kw: self.size_kw,
                reason: format!(
                    "breakdown sums to {} but total is {}",
                    self.breakdown_sum(),
                    self.total
                ),
            });
        }
        Ok(())
    }
}

/// Ratings appear both as "4.8/5" strings and bare numbers
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum RatingValue {
    Text(String),
    Number(f64),
}

fn deserialize_rating<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<RatingValue>::deserialize(deserializer)?;
    Ok(match value {
        Some(RatingValue::Text(text)) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Some(RatingValue::Number(n)) => Some(format!("{}/5", n)),
        _ => None,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installer {
    pub name: String,
    #[serde(alias = "phone")]
    pub contact: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "deserialize_rating")]
    pub rating: Option<String>,
}

impl Installer {
    pub fn new(name: &str, contact: &str, rating: Option<&str>, address: &str) -> Self {
        Self {
            name: name.to_string(),
            contact: contact.to_string(),
            address: address.to_string(),
            rating: rating.map(str::to_string),
        }
    }
}

/// Installers grouped by location key, each list in catalog order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstallerDirectory {
    locations: Vec<(String, Vec<Installer>)>,
}

impl InstallerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys are stored trimmed and lowercased; a repeated key replaces the list
    pub fn insert(&mut self, location: &str, installers: Vec<Installer>) {
        let key = normalize_location(location);
        match self.locations.iter_mut().find(|(k, _)| *k == key) {
            Some((_, list)) => *list = installers,
            None => self.locations.push((key, installers)),
        }
    }

    pub fn get(&self, location: &str) -> Option<&[Installer]> {
        let key = normalize_location(location);
        self.locations
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, list)| list.as_slice())
    }

    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.locations.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.iter().all(|(_, list)| list.is_empty())
    }
}

pub fn normalize_location(location: &str) -> String {
    location.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    #[serde(alias = "q")]
    pub topic: String,
    #[serde(alias = "a")]
    pub answer: String,
}

impl FaqEntry {
    pub fn new(topic: &str, answer: &str) -> Self {
        Self {
            topic: topic.to_string(),
            answer: answer.to_string(),
        }
    }
}

/// All tables the tools read
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub cost_tiers: Vec<CostTier>,
    pub installers: InstallerDirectory,
    pub faqs: Vec<FaqEntry>,
}

impl Catalog {
    /// Tier whose size matches exactly
    pub fn tier_for(&self, size_kw: f64) -> Option<&CostTier> {
        self.cost_tiers
            .iter()
            .find(|t| (t.size_kw - size_kw).abs() < TIER_MATCH_TOLERANCE)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        BuiltinCatalog.catalog()
    }
}

/// A provider of catalog tables.
///
/// `Ok(None)` means the source does not supply that table; `Err` means it
/// tried and failed.
pub trait CatalogSource: Send + Sync {
    fn name(&self) -> &str;

    fn cost_tiers(&self) -> Result<Option<Vec<CostTier>>, CatalogError>;

    fn installers(&self) -> Result<Option<InstallerDirectory>, CatalogError>;

    fn faqs(&self) -> Result<Option<Vec<FaqEntry>>, CatalogError>;
}

/// Compiled-in tables
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    pub fn cost_tier_table() -> Vec<CostTier> {
        [
            (3.0, 650_000.0, 400_000.0, 150_000.0, 100_000.0),
            (5.0, 950_000.0, 600_000.0, 200_000.0, 150_000.0),
            (10.0, 1_750_000.0, 1_200_000.0, 350_000.0, 200_000.0),
            (15.0, 2_500_000.0, 1_800_000.0, 500_000.0, 200_000.0),
            (20.0, 3_200_000.0, 2_300_000.0, 600_000.0, 300_000.0),
        ]
        .into_iter()
        .map(|(size_kw, total, panels, inverter, installation)| CostTier {
            size_kw,
            total,
            panels,
            inverter,
            installation,
            misc: 0.0,
        })
        .collect()
    }

    pub fn installer_table() -> InstallerDirectory {
        let mut directory = InstallerDirectory::new();
        directory.insert(
            region::DEFAULT_INSTALLER_LOCATION,
            vec![
                Installer::new("Premier Solar Solutions", "051-111-123-456", Some("4.8/5"), "6th Road, Rawalpindi"),
                Installer::new("RWP Solar Tech", "051-555-789-012", Some("4.6/5"), "Commercial Market, Saddar"),
                Installer::new("Green Energy Pak", "0333-123-4567", Some("4.7/5"), "Bahria Town Phase 7"),
            ],
        );
        directory.insert(
            "islamabad",
            vec![
                Installer::new("Capital Solar Systems", "051-222-345-678", Some("4.9/5"), "F-10 Markaz"),
                Installer::new("Islamabad Solar", "0331-987-6543", Some("4.5/5"), "Blue Area"),
                Installer::new("Solar Solutions Islamabad", "0333-555-1234", Some("4.7/5"), "G-11 Markaz"),
            ],
        );
        directory.insert(
            "bahria town",
            vec![
                Installer::new("Bahria Solar Experts", "0345-555-1234", Some("4.7/5"), "Bahria Town Phase 8"),
                Installer::new("Green Energy Bahria", "0332-444-5678", Some("4.6/5"), "Bahria Town Phase 4"),
            ],
        );
        directory.insert(
            "taxila",
            vec![Installer::new("Taxila Solar Solutions", "0333-666-7890", Some("4.5/5"), "Taxila City")],
        );
        directory
    }

    pub fn faq_table() -> Vec<FaqEntry> {
        vec![
            FaqEntry::new("Net Metering", "Export excess solar to the grid and get bill credits."),
            FaqEntry::new("Maintenance", "Panels require periodic cleaning and checks."),
            FaqEntry::new("Panel Lifespan", "~25 years; inverters ~10–12 years."),
            FaqEntry::new("Payback Period", "Typically 3–6 years depending on usage and cost."),
        ]
    }

    pub fn catalog(&self) -> Catalog {
        Catalog {
            cost_tiers: Self::cost_tier_table(),
            installers: Self::installer_table(),
            faqs: Self::faq_table(),
        }
    }
}

impl CatalogSource for BuiltinCatalog {
    fn name(&self) -> &str {
        "builtin"
    }

    fn cost_tiers(&self) -> Result<Option<Vec<CostTier>>, CatalogError> {
        Ok(Some(Self::cost_tier_table()))
    }

    fn installers(&self) -> Result<Option<InstallerDirectory>, CatalogError> {
        Ok(Some(Self::installer_table()))
    }

    fn faqs(&self) -> Result<Option<Vec<FaqEntry>>, CatalogError> {
        Ok(Some(Self::faq_table()))
    }
}

/// Installer file: `{"location": [..]}` or a bare list for the default location
#[derive(Deserialize)]
#[serde(untagged)]
enum InstallerFile {
    ByLocation(BTreeMap<String, Vec<Installer>>),
    Flat(Vec<Installer>),
}

/// FAQ file: list of `{q, a}` / `{topic, answer}`, or `{"topic": "answer"}`
#[derive(Deserialize)]
#[serde(untagged)]
enum FaqFile {
    List(Vec<FaqEntry>),
    Map(BTreeMap<String, String>),
}

/// JSON files in one directory
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    dir: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Parse a file if it exists
    fn read<T: serde::de::DeserializeOwned>(&self, file: &str) -> Result<Option<T>, CatalogError> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| CatalogError::Parse { path, source })
    }
}

impl CatalogSource for JsonFileCatalog {
    fn name(&self) -> &str {
        "json"
    }

    fn cost_tiers(&self) -> Result<Option<Vec<CostTier>>, CatalogError> {
        let Some(tiers) = self.read::<Vec<CostTier>>(data_files::COST_TIERS)? else {
            return Ok(None);
        };

        let valid: Vec<CostTier> = tiers
            .into_iter()
            .filter(|tier| match tier.validate() {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "Rejecting cost tier");
                    false
                }
            })
            .collect();

        if valid.is_empty() {
            return Err(CatalogError::Empty("cost tier"));
        }
        Ok(Some(valid))
    }

    fn installers(&self) -> Result<Option<InstallerDirectory>, CatalogError> {
        let Some(file) = self.read::<InstallerFile>(data_files::INSTALLERS)? else {
            return Ok(None);
        };

        let mut directory = InstallerDirectory::new();
        match file {
            InstallerFile::ByLocation(map) => {
                for (location, installers) in map {
                    directory.insert(&location, installers);
                }
            }
            InstallerFile::Flat(installers) => {
                directory.insert(region::DEFAULT_INSTALLER_LOCATION, installers);
            }
        }

        if directory.is_empty() {
            return Err(CatalogError::Empty("installer"));
        }

        let default = region::DEFAULT_INSTALLER_LOCATION;
        if directory.get(default).map_or(true, |list| list.is_empty()) {
            tracing::warn!(
                location = default,
                "Installer file lacks the default location, using built-in list"
            );
            let builtin = BuiltinCatalog::installer_table();
            directory.insert(default, builtin.get(default).unwrap_or(&[]).to_vec());
        }
        Ok(Some(directory))
    }

    fn faqs(&self) -> Result<Option<Vec<FaqEntry>>, CatalogError> {
        let Some(file) = self.read::<FaqFile>(data_files::FAQS)? else {
            return Ok(None);
        };

        let entries: Vec<FaqEntry> = match file {
            FaqFile::List(entries) => entries,
            FaqFile::Map(map) => map
                .into_iter()
                .map(|(topic, answer)| FaqEntry { topic, answer })
                .collect(),
        };

        let entries: Vec<FaqEntry> = entries
            .into_iter()
            .filter(|e| !e.topic.trim().is_empty() && !e.answer.trim().is_empty())
            .collect();

        if entries.is_empty() {
            return Err(CatalogError::Empty("FAQ"));
        }
        Ok(Some(entries))
    }
}

/// Overlays in priority order on top of the built-in tables
pub struct LayeredCatalog {
    overlays: Vec<Box<dyn CatalogSource>>,
    fallback: BuiltinCatalog,
}

impl LayeredCatalog {
    pub fn new() -> Self {
        Self {
            overlays: Vec::new(),
            fallback: BuiltinCatalog,
        }
    }

    /// Add an overlay; earlier overlays win
    pub fn with_overlay(mut self, source: impl CatalogSource + 'static) -> Self {
        self.overlays.push(Box::new(source));
        self
    }

    /// Data directory on top of the built-ins
    pub fn from_data_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new().with_overlay(JsonFileCatalog::new(dir))
    }

    /// Resolve every table; never fails
    pub fn load(&self) -> Catalog {
        let cost_tiers = self.resolve("cost_tiers", |s| s.cost_tiers(), BuiltinCatalog::cost_tier_table);
        let installers = self.resolve("installers", |s| s.installers(), BuiltinCatalog::installer_table);
        let faqs = self.resolve("faqs", |s| s.faqs(), BuiltinCatalog::faq_table);

        Catalog {
            cost_tiers,
            installers,
            faqs,
        }
    }

    fn resolve<T>(
        &self,
        table: &str,
        fetch: impl Fn(&dyn CatalogSource) -> Result<Option<T>, CatalogError>,
        builtin: impl Fn() -> T,
    ) -> T {
        for source in &self.overlays {
            match fetch(source.as_ref()) {
                Ok(Some(value)) => {
                    tracing::info!(table, source = source.name(), "Catalog table loaded");
                    return value;
                }
                Ok(None) => {
                    tracing::debug!(table, source = source.name(), "Catalog table not provided");
                }
                Err(e) => {
                    tracing::warn!(
                        table,
                        source = source.name(),
                        error = %e,
                        "Catalog table unusable, falling back"
                    );
                }
            }
        }

        tracing::info!(table, source = self.fallback.name(), "Using built-in catalog table");
        builtin()
    }
}

impl Default for LayeredCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, file: &str, content: &str) {
        std::fs::write(dir.join(file), content).unwrap();
    }

    #[test]
    fn test_builtin_tiers_are_consistent() {
        let tiers = BuiltinCatalog::cost_tier_table();
        assert_eq!(tiers.len(), 5);
        for tier in &tiers {
            assert!(tier.validate().is_ok(), "tier {} invalid", tier.size_kw);
            assert_eq!(tier.breakdown_sum(), tier.total);
        }
    }

    #[test]
    fn test_tier_lookup() {
        let catalog = Catalog::default();
        assert_eq!(catalog.tier_for(10.0).map(|t| t.total), Some(1_750_000.0));
        assert!(catalog.tier_for(7.0).is_none());
    }

    #[test]
    fn test_invalid_tier() {
        let tier = CostTier {
            size_kw: 3.0,
            total: 700_000.0,
            panels: 400_000.0,
            inverter: 150_000.0,
            installation: 100_000.0,
            misc: 0.0,
        };
        assert!(matches!(tier.validate(), Err(CatalogError::InvalidTier { .. })));
    }

    #[test]
    fn test_directory_keys_normalised() {
        let directory = BuiltinCatalog::installer_table();
        assert_eq!(directory.get("  Bahria   TOWN ").map(|l| l.len()), Some(2));
        assert_eq!(directory.get("Islamabad").map(|l| l[0].name.as_str()), Some("Capital Solar Systems"));
        assert!(directory.get("karachi").is_none());
    }

    #[test]
    fn test_builtin_when_dir_missing() {
        let catalog = LayeredCatalog::from_data_dir("/nonexistent/solar-data").load();
        assert_eq!(catalog, BuiltinCatalog.catalog());
    }

    #[test]
    fn test_data_files_override_builtins() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "installers.json",
            r#"{"Rawalpindi": [{"name": "Sun Co", "phone": "0300-0000000", "rating": 4.9, "address": "Mall Road"}]}"#,
        );
        write(
            dir.path(),
            "faqs.json",
            r#"[{"q": "Warranty", "a": "Panels carry 25 years."}]"#,
        );

        let catalog = LayeredCatalog::from_data_dir(dir.path()).load();

        let rawalpindi = catalog.installers.get("rawalpindi").unwrap();
        assert_eq!(rawalpindi.len(), 1);
        assert_eq!(rawalpindi[0].contact, "0300-0000000");
        assert_eq!(rawalpindi[0].rating.as_deref(), Some("4.9/5"));
        assert!(catalog.installers.get("islamabad").is_none());

        assert_eq!(catalog.faqs, vec![FaqEntry::new("Warranty", "Panels carry 25 years.")]);
        // no tier file: built-ins
        assert_eq!(catalog.cost_tiers, BuiltinCatalog::cost_tier_table());
    }

    #[test]
    fn test_flat_installer_list_goes_to_default_location() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "installers.json",
            r#"[{"name": "A", "contact": "1"}, {"name": "B", "contact": "2"}]"#,
        );

        let directory = JsonFileCatalog::new(dir.path()).installers().unwrap().unwrap();
        let list = directory.get("rawalpindi").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].name, "B");
        assert_eq!(list[0].rating, None);
    }

    #[test]
    fn test_default_location_filled_from_builtins() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            data_files::INSTALLERS,
            r#"{"islamabad": [{"name": "Capital Solar", "phone": "051-111-1111", "address": "F-7"}]}"#,
        );

        let catalog = LayeredCatalog::from_data_dir(dir.path()).load();
        let islamabad = catalog.installers.get("islamabad").unwrap();
        assert_eq!(islamabad[0].name, "Capital Solar");

        let default = catalog.installers.get(region::DEFAULT_INSTALLER_LOCATION).unwrap();
        assert!(!default.is_empty());
        assert_eq!(
            default,
            BuiltinCatalog::installer_table()
                .get(region::DEFAULT_INSTALLER_LOCATION)
                .unwrap()
        );
    }

    #[test]
    fn test_faq_map_format() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "faqs.json", r#"{"Battery": "Lithium lasts longer.", "Cost": "See estimate."}"#);

        let faqs = JsonFileCatalog::new(dir.path()).faqs().unwrap().unwrap();
        assert_eq!(faqs.len(), 2);
        assert_eq!(faqs[0].topic, "Battery");
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "faqs.json", "{ not json");
        write(dir.path(), "installers.json", "[]");

        let source = JsonFileCatalog::new(dir.path());
        assert!(matches!(source.faqs(), Err(CatalogError::Parse { .. })));
        assert!(matches!(source.installers(), Err(CatalogError::Empty(_))));

        let catalog = LayeredCatalog::from_data_dir(dir.path()).load();
        assert_eq!(catalog.faqs, BuiltinCatalog::faq_table());
        assert_eq!(catalog.installers, BuiltinCatalog::installer_table());
    }

    #[test]
    fn test_inconsistent_tiers_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "cost_tiers.json",
            r#"[
                {"size_kw": 4, "total": 800000, "panels": 500000, "inverter": 180000, "installation": 120000},
                {"size_kw": 6, "total": 999999, "panels": 1, "inverter": 1, "installation": 1}
            ]"#,
        );

        let tiers = JsonFileCatalog::new(dir.path()).cost_tiers().unwrap().unwrap();
        assert_eq!(tiers.len(), 1);
        assert_eq!(tiers[0].size_kw, 4.0);
    }
}
