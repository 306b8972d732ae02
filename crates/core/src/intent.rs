//! Intents the webhook understands

use std::fmt;

/// Intent resolved from the NLU display name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Intent {
    SystemSize,
    CheckCost,
    FindInstaller,
    NetMetering,
    SolarFaq,
    /// Any display name we do not handle
    Unknown(String),
}

impl Intent {
    /// Display names are matched exactly, as configured in the agent
    pub fn from_display_name(name: &str) -> Self {
        match name {
            "Get_System_Size" => Intent::SystemSize,
            "Check_Cost" => Intent::CheckCost,
            "Find_Installer" => Intent::FindInstaller,
            "Learn_Net_Metering" => Intent::NetMetering,
            "Solar_FAQ" => Intent::SolarFaq,
            other => Intent::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Intent::SystemSize => "Get_System_Size",
            Intent::CheckCost => "Check_Cost",
            Intent::FindInstaller => "Find_Installer",
            Intent::NetMetering => "Learn_Net_Metering",
            Intent::SolarFaq => "Solar_FAQ",
            Intent::Unknown(name) => name.as_str(),
        }
    }

    /// Bounded label for metrics; unknown names collapse to one bucket
    pub fn metric_label(&self) -> &'static str {
        match self {
            Intent::SystemSize => "Get_System_Size",
            Intent::CheckCost => "Check_Cost",
            Intent::FindInstaller => "Find_Installer",
            Intent::NetMetering => "Learn_Net_Metering",
            Intent::SolarFaq => "Solar_FAQ",
            Intent::Unknown(_) => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Intent::Unknown(_))
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_intents_round_trip() {
        for intent in [
            Intent::SystemSize,
            Intent::CheckCost,
            Intent::FindInstaller,
            Intent::NetMetering,
            Intent::SolarFaq,
        ] {
            assert_eq!(Intent::from_display_name(intent.as_str()), intent);
            assert!(intent.is_known());
        }
    }

    #[test]
    fn test_unknown_intent() {
        let intent = Intent::from_display_name("Default Welcome Intent");
        assert_eq!(intent, Intent::Unknown("Default Welcome Intent".to_string()));
        assert_eq!(intent.metric_label(), "unknown");
        assert_eq!(intent.to_string(), "Default Welcome Intent");
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert!(!Intent::from_display_name("check_cost").is_known());
    }
}
