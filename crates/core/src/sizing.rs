//! Solar Sizing and Cost Arithmetic
//!
//! Pure functions over `SizingConstants`:
//! - System size from monthly consumption, monthly bill or roof area
//! - Formula-based turnkey cost with bulk discount and rounding
//! - PKR formatting with thousands separators
//!
//! All sizes are rounded UP to one decimal place and floored at the minimum
//! installable size.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Guard against float noise pushing an exact tenth to the next one
const ROUNDING_EPSILON: f64 = 1e-9;

/// Physical and commercial constants for one market
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingConstants {
    /// Peak sun hours per day
    pub sun_hours: f64,
    /// System performance ratio (losses from heat, wiring, inverter)
    pub performance_ratio: f64,
    /// Average grid tariff used to back out consumption from a bill
    pub tariff_pkr_per_kwh: f64,
    /// Turnkey price per installed kW
    pub price_per_kw: f64,
    /// Size from which the bulk discount applies
    pub discount_threshold_kw: f64,
    /// Multiplier applied at or above the threshold
    pub discount_factor: f64,
    /// Costs are rounded up to a multiple of this
    pub cost_rounding: f64,
    /// Smallest system ever recommended
    pub min_size_kw: f64,
    /// Usable roof area needed per kW
    pub area_m2_per_kw: f64,
    pub days_per_month: f64,
    pub sqft_to_m2: f64,
    pub marla_to_m2: f64,
}

impl Default for SizingConstants {
    fn default() -> Self {
        Self {
            sun_hours: 5.5,
            performance_ratio: 0.8,
            tariff_pkr_per_kwh: 55.0,
            price_per_kw: 200_000.0,
            discount_threshold_kw: 5.0,
            discount_factor: 0.97,
            cost_rounding: 1_000.0,
            min_size_kw: 0.5,
            area_m2_per_kw: 10.0,
            days_per_month: 30.0,
            sqft_to_m2: 0.092903,
            marla_to_m2: 20.903,
        }
    }
}

impl SizingConstants {
    /// Every constant must be a positive finite number; the discount factor
    /// may not increase the price.
    pub fn validate(&self) -> Result<(), CoreError> {
        let fields: [(&'static str, f64); 12] = [
            ("sun_hours", self.sun_hours),
            ("performance_ratio", self.performance_ratio),
            ("tariff_pkr_per_kwh", self.tariff_pkr_per_kwh),
            ("price_per_kw", self.price_per_kw),
            ("discount_threshold_kw", self.discount_threshold_kw),
            ("discount_factor", self.discount_factor),
            ("cost_rounding", self.cost_rounding),
            ("min_size_kw", self.min_size_kw),
            ("area_m2_per_kw", self.area_m2_per_kw),
            ("days_per_month", self.days_per_month),
            ("sqft_to_m2", self.sqft_to_m2),
            ("marla_to_m2", self.marla_to_m2),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::InvalidConstant { name, value });
            }
        }

        if self.discount_factor > 1.0 {
            return Err(CoreError::InvalidConstant {
                name: "discount_factor",
                value: self.discount_factor,
            });
        }

        Ok(())
    }

    /// Daily energy one installed kW produces
    pub fn daily_yield_per_kw(&self) -> f64 {
        self.sun_hours * self.performance_ratio
    }
}

/// What a size recommendation was derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizingBasis {
    /// Monthly consumption in kWh
    Consumption { monthly_kwh: f64 },
    /// Monthly bill in PKR
    Bill { amount: f64 },
    /// Usable roof area in square metres
    Area { m2: f64 },
}

impl SizingBasis {
    /// Consumption beats bill beats area. Non-positive inputs are ignored.
    pub fn select(units: Option<f64>, bill: Option<f64>, area_m2: Option<f64>) -> Option<Self> {
        let positive = |v: Option<f64>| v.filter(|x| x.is_finite() && *x > 0.0);

        positive(units)
            .map(|monthly_kwh| SizingBasis::Consumption { monthly_kwh })
            .or_else(|| positive(bill).map(|amount| SizingBasis::Bill { amount }))
            .or_else(|| positive(area_m2).map(|m2| SizingBasis::Area { m2 }))
    }

    pub fn size_kw(&self, constants: &SizingConstants) -> f64 {
        match *self {
            SizingBasis::Consumption { monthly_kwh } => size_from_consumption(monthly_kwh, constants),
            SizingBasis::Bill { amount } => size_from_bill(amount, constants),
            SizingBasis::Area { m2 } => size_from_area(m2, constants),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SizingBasis::Consumption { .. } => "consumption",
            SizingBasis::Bill { .. } => "bill",
            SizingBasis::Area { .. } => "area",
        }
    }
}

/// Round up to one decimal place
pub fn round_up_to_tenth(value: f64) -> f64 {
    ((value * 10.0) - ROUNDING_EPSILON).ceil() / 10.0
}

fn finalize_size(raw_kw: f64, constants: &SizingConstants) -> f64 {
    round_up_to_tenth(raw_kw).max(constants.min_size_kw)
}

/// Size needed to cover a monthly consumption
pub fn size_from_consumption(monthly_kwh: f64, constants: &SizingConstants) -> f64 {
    let daily_kwh = monthly_kwh / constants.days_per_month;
    finalize_size(daily_kwh / constants.daily_yield_per_kw(), constants)
}

/// Size needed to cover a monthly bill at the average tariff
pub fn size_from_bill(bill_pkr: f64, constants: &SizingConstants) -> f64 {
    size_from_consumption(bill_pkr / constants.tariff_pkr_per_kwh, constants)
}

/// Largest size a roof can hold
pub fn size_from_area(area_m2: f64, constants: &SizingConstants) -> f64 {
    finalize_size(area_m2 / constants.area_m2_per_kw, constants)
}

/// Formula turnkey cost: per-kW price, bulk discount, rounded up
pub fn turnkey_cost(size_kw: f64, constants: &SizingConstants) -> f64 {
    let mut base = size_kw * constants.price_per_kw;
    if size_kw >= constants.discount_threshold_kw {
        base *= constants.discount_factor;
    }
    ((base / constants.cost_rounding) - ROUNDING_EPSILON).ceil() * constants.cost_rounding
}

/// Format a PKR amount as "1,940,000"
pub fn format_thousands(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render a size as "5" or "2.3"
pub fn format_size(size_kw: f64) -> String {
    let tenth = (size_kw * 10.0).round() / 10.0;
    if tenth.fract() == 0.0 {
        format!("{:.0}", tenth)
    } else {
        format!("{:.1}", tenth)
    }
}
