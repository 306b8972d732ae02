use solar_agent_tools::ToolError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("Tool failed: {0}")]
    Tool(#[from] ToolError),
}
