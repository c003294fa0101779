mod anchor;
mod engine;
mod error;
mod plan;
mod profiles;
mod types;

pub use anchor::{
    ChartLayout, DEFAULT_AXIS_WIDTH, inspect, resolve_anchor, resolve_anchor_in_layout,
};
pub use engine::{evaluate_profile, evaluate_scenarios, project, project_plan, terminal_balance};
pub use error::{ProjectionError, ProjectionResult};
pub use plan::{ContributionPlan, MAX_INVESTMENT_HORIZON, clamp_deposit_years};
pub use profiles::RiskProfile;
pub use types::{
    ChartAnchor, ChartMargins, Inspection, ScenarioRates, ScenarioSummary, YearRecord,
};
