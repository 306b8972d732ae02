//! Typed extraction of webhook parameters
//!
//! Malformed values read as absent; callers turn absence into a
//! clarification prompt.

use serde_json::Value;
use solar_agent_config::constants::parameters as names;
use solar_agent_core::{EnergyUsage, ParamValue, Parameters, RoofArea};

/// Keys of a location entity that carry a usable place name, most specific first
const LOCATION_KEYS: &[&str] = &["city", "subadmin-area", "admin-area", "business-name"];

pub fn monthly_units(params: &Parameters) -> Option<f64> {
    EnergyUsage::from_param(params.first_of(names::ENERGY_USAGE)).map(|e| e.monthly_kwh)
}

pub fn monthly_bill(params: &Parameters) -> Option<f64> {
    params.first_of(names::MONTHLY_BILL).as_positive()
}

pub fn roof_area(params: &Parameters) -> Option<RoofArea> {
    RoofArea::from_param(params.first_of(names::ROOF_AREA))
}

pub fn size_kw(params: &Parameters) -> Option<f64> {
    params.first_of(names::SIZE_KW).as_kilowatts()
}

pub fn location(params: &Parameters) -> Option<String> {
    text_of(params.first_of(names::LOCATION))
}

pub fn faq_topic(params: &Parameters) -> Option<String> {
    text_of(params.first_of(names::FAQ_TOPIC))
}

/// Free text, or the place name inside a location entity object
pub fn text_of(value: &ParamValue) -> Option<String> {
    match value {
        ParamValue::Text(text) => Some(text.clone()),
        ParamValue::Other(Value::Object(map)) => LOCATION_KEYS
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Parameters {
        Parameters::from_json(&value)
    }

    #[test]
    fn test_canonical_and_alias_names() {
        let p = params(json!({"units": 300, "bill": "Rs 9,000", "area": {"amount": 5, "unit": "marla"}}));
        assert_eq!(monthly_units(&p), Some(300.0));
        assert_eq!(monthly_bill(&p), Some(9000.0));
        assert_eq!(roof_area(&p).map(|a| a.display()), Some("5 marla".to_string()));
    }

    #[test]
    fn test_malformed_values_are_absent() {
        let p = params(json!({
            "energy_usage": {"amount": 3, "unit": "MW"},
            "monthly_bill": "lots",
            "roof_area": true,
            "size_kw": -2
        }));
        assert_eq!(monthly_units(&p), None);
        assert_eq!(monthly_bill(&p), None);
        assert!(roof_area(&p).is_none());
        assert_eq!(size_kw(&p), None);
    }

    #[test]
    fn test_size_with_unit_suffix() {
        assert_eq!(size_kw(&params(json!({"size_kw": "5kW"}))), Some(5.0));
        assert_eq!(size_kw(&params(json!({"size": "7.5 kw"}))), Some(7.5));
        assert_eq!(size_kw(&params(json!({"size_kw": "big"}))), None);
    }

    #[test]
    fn test_location_entity_object() {
        let p = params(json!({"location": {"city": "Islamabad", "country": "Pakistan"}}));
        assert_eq!(location(&p), Some("Islamabad".to_string()));

        let p = params(json!({"location": {"country": "Pakistan"}}));
        assert_eq!(location(&p), None);
    }

    #[test]
    fn test_faq_topic_text() {
        let p = params(json!({"faq_topic": "  Maintenance "}));
        assert_eq!(faq_topic(&p), Some("Maintenance".to_string()));
        assert_eq!(faq_topic(&params(json!({}))), None);
    }
}
