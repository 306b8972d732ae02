//! NLU Parameter Values
//!
//! The NLU platform sends parameters as a loosely-typed JSON map: a value can
//! be a plain number, a string the user typed ("Rs 5,000"), a unit entity
//! (`{"amount": 300, "unit": "kWh"}`) or an empty string when the slot was not
//! filled. `ParamValue` captures those shapes once, and the normalisers below
//! turn them into domain quantities.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

use crate::sizing::SizingConstants;

/// Currency-prefixed or plain numbers: "5000", "Rs. 5,000", "PKR 12,500.50", "5000/-"
static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:rs\.?|pkr|rupees?)?\s*([0-9][0-9,]*(?:\.[0-9]+)?)\s*(?:rs\.?|pkr|rupees?|/-)?\s*$")
        .unwrap()
});

/// System sizes with an optional unit: "5", "5kW", "7.5 kw", "3 kilowatts"
static KILOWATT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*([0-9]+(?:\.[0-9]+)?)\s*(?:kw|kilowatts?)?\s*$").unwrap()
});

static EMPTY: ParamValue = ParamValue::Empty;

/// A single parameter value as sent by the NLU platform
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ParamValue {
    /// Missing, null, empty string or empty list
    #[default]
    Empty,
    /// Plain JSON number
    Number(f64),
    /// Free text (trimmed, never empty)
    Text(String),
    /// Unit entity: `{"amount": .., "unit": ..}` or `{"amount": .., "currency": ..}`
    Amount { amount: f64, unit: String },
    /// Anything else (booleans, unrecognised objects)
    Other(Value),
}

impl ParamValue {
    /// Classify a raw JSON value
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => ParamValue::Empty,
            Value::Number(n) => n
                .as_f64()
                .map(ParamValue::Number)
                .unwrap_or_else(|| ParamValue::Other(value.clone())),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    ParamValue::Empty
                } else {
                    ParamValue::Text(trimmed.to_string())
                }
            }
            // List-valued slots: the first filled entry wins
            Value::Array(items) => items
                .iter()
                .map(ParamValue::from_json)
                .find(|v| !v.is_empty())
                .unwrap_or_default(),
            Value::Object(map) => {
                let amount = map.get("amount").and_then(|a| match ParamValue::from_json(a) {
                    ParamValue::Number(n) => Some(n),
                    ParamValue::Text(t) => parse_amount(&t),
                    _ => None,
                });
                match amount {
                    Some(amount) => {
                        let unit = map
                            .get("unit")
                            .or_else(|| map.get("currency"))
                            .and_then(|u| u.as_str())
                            .unwrap_or("")
                            .trim()
                            .to_string();
                        ParamValue::Amount { amount, unit }
                    }
                    None => ParamValue::Other(value.clone()),
                }
            }
            Value::Bool(_) => ParamValue::Other(value.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ParamValue::Empty)
    }

    /// Numeric reading of the value regardless of its unit
    pub fn as_number(&self) -> Option<f64> {
        let number = match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Text(t) => parse_amount(t),
            ParamValue::Amount { amount, .. } => Some(*amount),
            ParamValue::Empty | ParamValue::Other(_) => None,
        };
        number.filter(|n| n.is_finite())
    }

    /// Strictly positive numeric reading
    pub fn as_positive(&self) -> Option<f64> {
        self.as_number().filter(|n| *n > 0.0)
    }

    /// Strictly positive system size; text may carry a "kW" suffix
    pub fn as_kilowatts(&self) -> Option<f64> {
        let kw = match self {
            ParamValue::Text(t) => parse_kilowatts(t),
            other => other.as_number(),
        };
        kw.filter(|kw| kw.is_finite() && *kw > 0.0)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for ParamValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(ParamValue::from_json(&value))
    }
}

/// Parse a user-typed amount such as "Rs 5,000"
pub fn parse_amount(text: &str) -> Option<f64> {
    let caps = AMOUNT_PATTERN.captures(text)?;
    caps.get(1)?.as_str().replace(',', "").parse::<f64>().ok()
}

/// Parse a user-typed system size such as "5kW"
pub fn parse_kilowatts(text: &str) -> Option<f64> {
    let caps = KILOWATT_PATTERN.captures(text)?;
    caps.get(1)?.as_str().parse::<f64>().ok()
}

/// Parameter map of one webhook call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    values: HashMap<String, ParamValue>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a raw JSON value; anything but an object yields an empty map
    pub fn from_json(value: &Value) -> Self {
        let values = value
            .as_object()
            .map(|map| {
                map.iter()
                    .map(|(k, v)| (k.clone(), ParamValue::from_json(v)))
                    .collect()
            })
            .unwrap_or_default();
        Self { values }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.values.insert(name.into(), value);
    }

    /// Builder-style insert, handy in tests and fixtures
    pub fn with(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> &ParamValue {
        self.values.get(name).unwrap_or(&EMPTY)
    }

    /// First non-empty value among a canonical name and its aliases
    pub fn first_of(&self, names: &[&str]) -> &ParamValue {
        names
            .iter()
            .map(|n| self.get(n))
            .find(|v| !v.is_empty())
            .unwrap_or(&EMPTY)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'de> Deserialize<'de> for Parameters {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Parameters::from_json(&value))
    }
}

/// Monthly electricity consumption in kWh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyUsage {
    pub monthly_kwh: f64,
}

impl EnergyUsage {
    /// Accepts plain numbers and `units` / `kWh` unit entities.
    /// Any other unit is treated as absent.
    pub fn from_param(value: &ParamValue) -> Option<Self> {
        let kwh = match value {
            ParamValue::Amount { amount, unit } => {
                let unit = unit.to_lowercase();
                if unit.is_empty() || unit == "units" || unit == "unit" || unit == "kwh" {
                    Some(*amount)
                } else {
                    None
                }
            }
            other => other.as_number(),
        }?;

        (kwh.is_finite() && kwh > 0.0).then_some(Self { monthly_kwh: kwh })
    }
}

/// Unit a roof area was given in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AreaUnit {
    SquareFeet,
    Marla,
    SquareMeters,
    Other(String),
}

impl AreaUnit {
    pub fn parse(unit: &str) -> Self {
        let normalized = unit.trim().to_lowercase().replace(['.', '²'], "");
        match normalized.as_str() {
            "sq ft" | "sqft" | "sq feet" | "square feet" | "square foot" | "ft2" | "ft" => {
                AreaUnit::SquareFeet
            }
            "marla" | "marlas" => AreaUnit::Marla,
            "" | "m2" | "m" | "sq m" | "sqm" | "square meter" | "square meters"
            | "square metre" | "square metres" => AreaUnit::SquareMeters,
            _ => AreaUnit::Other(unit.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            AreaUnit::SquareFeet => "sq ft",
            AreaUnit::Marla => "marla",
            AreaUnit::SquareMeters => "m²",
            AreaUnit::Other(label) => label.as_str(),
        }
    }
}

/// Roof area in the unit the user gave it
#[derive(Debug, Clone, PartialEq)]
pub struct RoofArea {
    pub amount: f64,
    pub unit: AreaUnit,
}

impl RoofArea {
    /// Plain numbers are read as square metres; unit entities keep their unit.
    pub fn from_param(value: &ParamValue) -> Option<Self> {
        let area = match value {
            ParamValue::Amount { amount, unit } => Self {
                amount: *amount,
                unit: AreaUnit::parse(unit),
            },
            other => Self {
                amount: other.as_number()?,
                unit: AreaUnit::SquareMeters,
            },
        };

        (area.amount.is_finite() && area.amount > 0.0).then_some(area)
    }

    /// Normalised area in square metres. Unknown units pass through unchanged.
    pub fn square_meters(&self, constants: &SizingConstants) -> f64 {
        match self.unit {
            AreaUnit::SquareFeet => self.amount * constants.sqft_to_m2,
            AreaUnit::Marla => self.amount * constants.marla_to_m2,
            AreaUnit::SquareMeters | AreaUnit::Other(_) => self.amount,
        }
    }

    /// Original-unit rendering for echoing back to the user, e.g. "5 marla"
    pub fn display(&self) -> String {
        format!("{} {}", display_number(self.amount), self.unit.label())
    }
}

/// Render a number without a spurious ".0" and with at most two decimals
pub fn display_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{}", rounded)
    }
}
