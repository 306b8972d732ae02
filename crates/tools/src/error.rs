//! Tool errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    #[error("No installers listed for '{0}'")]
    NoInstallers(String),

    #[error("FAQ catalog is empty")]
    EmptyFaqCatalog,
}
