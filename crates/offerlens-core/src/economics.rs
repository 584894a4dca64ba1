//! Earning projections and sensitivity analysis types

use serde::{Deserialize, Serialize};

/// Monthly earnings band over the assumed click range.
///
/// The high bound deliberately couples more traffic to better commission
/// terms: a wide band that communicates uncertainty rather than false
/// precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningBand {
    pub low: f64,
    pub base: f64,
    pub high: f64,
    pub clicks_low: u32,
    pub clicks_high: u32,
}

/// Named earnings scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Pessimistic,
    Base,
    Optimistic,
}

/// Inputs the sensitivity calculator varies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInputs {
    pub conversion_rate: f64,
    pub avg_order_value: f64,
    pub refund_rate: f64,
    pub commission_rate: f64,
    /// Explicit [low, high] commission range when the program advertises one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_range: Option<(f64, f64)>,
    pub monthly_clicks: f64,
}

/// One fully computed scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningScenario {
    pub kind: ScenarioKind,
    pub conversion_rate: f64,
    pub avg_order_value: f64,
    pub refund_rate: f64,
    pub commission_rate: f64,
    pub orders: f64,
    pub gross_revenue: f64,
    pub gross_commission: f64,
    pub net: f64,
}

/// How wildly net earnings swing between the pessimistic and optimistic case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fragility {
    Stable,
    Moderate,
    Fragile,
}

/// The economic factor driving most of the swing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EconomicsDriver {
    Commission,
    Conversion,
    OrderValue,
    Refund,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    pub scenarios: Vec<EarningScenario>,
    pub fragility: Fragility,
    /// Drivers ranked by the net swing each one alone can cause, descending
    pub key_drivers: Vec<EconomicsDriver>,
    /// Clicks needed for 100 net per month at base terms
    pub breakeven_clicks: f64,
    pub breakeven_unrealistic: bool,
}

impl SensitivityReport {
    pub fn scenario(&self, kind: ScenarioKind) -> Option<&EarningScenario> {
        self.scenarios.iter().find(|s| s.kind == kind)
    }
}
