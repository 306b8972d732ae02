//! Installer Lookup
//!
//! Renders the installer directory for a location, in catalog order, followed
//! by the fixed advice block.

use std::sync::Arc;

use solar_agent_config::{render, ToolsDomainView};

use crate::ToolError;

pub struct InstallerLookup {
    view: Arc<ToolsDomainView>,
}

impl InstallerLookup {
    pub fn new(view: Arc<ToolsDomainView>) -> Self {
        Self { view }
    }

    /// Case-insensitive match; absent or unknown locations use the default list
    pub fn find_installers(&self, location: Option<&str>) -> Result<String, ToolError> {
        let (resolved, installers) = self.view.installers_for(location);
        if installers.is_empty() {
            return Err(ToolError::NoInstallers(resolved));
        }

        let templates = self.view.templates();
        let mut reply = render(
            &templates.installers_header,
            &[("location", title_case(&resolved).as_str())],
        );

        for (i, installer) in installers.iter().enumerate() {
            let index = (i + 1).to_string();
            reply.push_str(&render(
                &templates.installer_entry,
                &[
                    ("index", index.as_str()),
                    ("name", installer.name.as_str()),
                    ("contact", installer.contact.as_str()),
                ],
            ));
            if let Some(ref rating) = installer.rating {
                reply.push_str(&render(&templates.installer_rating, &[("rating", rating.as_str())]));
            }
            reply.push_str(&render(
                &templates.installer_address,
                &[("address", installer.address.as_str())],
            ));
        }

        reply.push_str(&templates.installer_tips);

        tracing::debug!(location = %resolved, count = installers.len(), "Installers listed");
        Ok(reply)
    }
}

/// "bahria town" -> "Bahria Town"
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use solar_agent_config::{Catalog, Installer, InstallerDirectory};

    fn lookup() -> InstallerLookup {
        InstallerLookup::new(Arc::new(ToolsDomainView::default()))
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("bahria town"), "Bahria Town");
        assert_eq!(title_case("rawalpindi"), "Rawalpindi");
    }

    #[test]
    fn test_taxila_listing() {
        let reply = lookup().find_installers(Some("TAXILA")).unwrap();
        assert_eq!(
            reply,
            "🔧 Top Solar Installers in Taxila:\n\n\
             1. Taxila Solar Solutions\n   📞 0333-666-7890\n   ⭐ Rating: 4.5/5\n   🏠 Taxila City\n\n\
             💡 Recommendations:\n\
             • Get quotes from at least 3 companies\n\
             • Verify warranty terms (minimum 10 years on panels)\n\
             • Check if they handle net metering paperwork\n\
             • Ask about after-sales service response time\n\n\
             📞 Need help choosing? Call 051-111-000-111"
        );
    }

    #[test]
    fn test_catalog_order_preserved() {
        let reply = lookup().find_installers(Some("islamabad")).unwrap();
        let capital = reply.find("1. Capital Solar Systems").unwrap();
        let blue = reply.find("2. Islamabad Solar").unwrap();
        let g11 = reply.find("3. Solar Solutions Islamabad").unwrap();
        assert!(capital < blue && blue < g11);
    }

    #[test]
    fn test_unknown_location_uses_default() {
        let reply = lookup().find_installers(Some("Lahore")).unwrap();
        assert!(reply.starts_with("🔧 Top Solar Installers in Rawalpindi:"));
        assert!(reply.contains("1. Premier Solar Solutions"));
        assert_eq!(reply, lookup().find_installers(None).unwrap());
    }

    #[test]
    fn test_rating_line_only_when_present() {
        let mut directory = InstallerDirectory::new();
        directory.insert(
            "rawalpindi",
            vec![Installer::new("No Stars Solar", "0300-1111111", None, "Murree Road")],
        );
        let catalog = Catalog {
            installers: directory,
            ..Catalog::default()
        };
        let view = ToolsDomainView::new(
            Default::default(),
            Arc::new(catalog),
            Arc::new(Default::default()),
        );

        let reply = InstallerLookup::new(Arc::new(view)).find_installers(None).unwrap();
        assert!(reply.contains("1. No Stars Solar\n   📞 0300-1111111\n   🏠 Murree Road"));
        assert!(!reply.contains("⭐"));
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let catalog = Catalog {
            installers: InstallerDirectory::new(),
            ..Catalog::default()
        };
        let view = ToolsDomainView::new(Default::default(), Arc::new(catalog), Arc::new(Default::default()));

        let result = InstallerLookup::new(Arc::new(view)).find_installers(Some("taxila"));
        assert_eq!(result, Err(ToolError::NoInstallers("rawalpindi".to_string())));
    }
}
