//! Core error type

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid constant '{name}': must be positive, got {value}")]
    InvalidConstant { name: &'static str, value: f64 },
}
