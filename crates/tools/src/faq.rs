//! FAQ Lookup

use std::sync::Arc;

use solar_agent_config::{render, FaqEntry, ToolsDomainView};

use crate::ToolError;

pub struct FaqLookup {
    view: Arc<ToolsDomainView>,
}

impl FaqLookup {
    pub fn new(view: Arc<ToolsDomainView>) -> Self {
        Self { view }
    }

    /// Case-insensitive exact match first, then containment either way
    pub fn find_entry(&self, topic: &str) -> Option<&FaqEntry> {
        let wanted = topic.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }

        let faqs = self.view.faqs();
        faqs.iter()
            .find(|e| e.topic.to_lowercase() == wanted)
            .or_else(|| {
                faqs.iter().find(|e| {
                    let label = e.topic.to_lowercase();
                    label.contains(&wanted) || wanted.contains(&label)
                })
            })
    }

    pub fn find_faq(&self, topic: Option<&str>) -> Result<String, ToolError> {
        if self.view.faqs().is_empty() {
            return Err(ToolError::EmptyFaqCatalog);
        }

        let templates = self.view.templates();
        let topic = topic.map(str::trim).unwrap_or("");
        if topic.is_empty() {
            return Ok(templates.faq_prompt.clone());
        }

        Ok(match self.find_entry(topic) {
            Some(entry) => render(
                &templates.faq_answer,
                &[("topic", entry.topic.as_str()), ("answer", entry.answer.as_str())],
            ),
            None => {
                tracing::debug!(topic, "FAQ topic not found");
                render(&templates.faq_not_found, &[("topic", topic)])
            }
        })
    }
}
