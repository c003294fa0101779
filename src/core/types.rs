use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRecord {
    pub year: u32,
    pub balance: f64,
    pub cumulative_deposits: f64,
    pub accrued_return: f64,
    pub initial_balance: f64,
    pub year_start_balance: f64,
}

impl YearRecord {
    /// Height of the stacked bar for this year. Negative accrued return is
    /// never drawn below the bar's base.
    pub fn stacked_total(&self) -> f64 {
        self.initial_balance + self.cumulative_deposits + self.accrued_return.max(0.0)
    }

    pub fn own_contribution(&self) -> f64 {
        self.initial_balance + self.cumulative_deposits
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSummary {
    pub expected_final_balance: f64,
    pub worst_final_balance: f64,
    pub best_final_balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRates {
    pub expected_annual_return: f64,
    pub worst_annual_return: f64,
    pub best_annual_return: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartAnchor {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChartMargins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargins {
    pub const STANDARD: Self = Self {
        top: 20.0,
        right: 30.0,
        bottom: 40.0,
        left: 20.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub index: usize,
    pub year: u32,
    pub balance: f64,
    pub own_contribution: f64,
    pub accrued_return: f64,
    pub anchor: ChartAnchor,
}
