mod format;

use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum, error::ErrorKind};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    ChartLayout, ContributionPlan, Inspection, RiskProfile, ScenarioRates, ScenarioSummary,
    YearRecord, evaluate_profile, inspect, project_plan,
};

pub use format::{format_currency, format_currency_short};

const MAX_START_AMOUNT: f64 = 1_000_000.0;
const MAX_MONTHLY_DEPOSIT: f64 = 10_000.0;
const MAX_INVESTMENT_HORIZON: f64 = 50.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliRiskProfile {
    #[value(alias = "behouden")]
    Conservative,
    #[value(alias = "gedreven")]
    Balanced,
    #[value(alias = "ambitieus")]
    Ambitious,
}

impl From<CliRiskProfile> for RiskProfile {
    fn from(value: CliRiskProfile) -> Self {
        match value {
            CliRiskProfile::Conservative => RiskProfile::Conservative,
            CliRiskProfile::Balanced => RiskProfile::Balanced,
            CliRiskProfile::Ambitious => RiskProfile::Ambitious,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectionPayload {
    start_amount: Option<f64>,
    monthly_deposit: Option<f64>,
    deposit_years: Option<f64>,
    investment_horizon: Option<f64>,
    profile: Option<String>,
    hovered_index: Option<i64>,
    chart_width: Option<f64>,
    chart_height: Option<f64>,
}

#[derive(Parser, Debug)]
#[command(
    name = "invest-projection",
    about = "Monthly-compounding projection of a lump sum plus recurring deposits"
)]
struct Cli {
    #[arg(long, default_value_t = 25_000.0, help = "Initial lump sum")]
    start_amount: f64,
    #[arg(long, default_value_t = 1_000.0, help = "Deposit added at the end of every month")]
    monthly_deposit: f64,
    #[arg(
        long,
        default_value_t = 10.0,
        help = "Years of monthly deposits; capped at the investment horizon"
    )]
    deposit_years: f64,
    #[arg(long, default_value_t = 25.0, help = "Total years simulated")]
    investment_horizon: f64,
    #[arg(long, value_enum, default_value_t = CliRiskProfile::Balanced)]
    profile: CliRiskProfile,
    #[arg(long, help = "1-based year to inspect on the chart")]
    hovered_year: Option<u32>,
    #[arg(long, default_value_t = 800.0, help = "Chart container width in pixels")]
    chart_width: f64,
    #[arg(long, default_value_t = 450.0, help = "Chart container height in pixels")]
    chart_height: f64,
    #[arg(long, help = "Print the JSON response instead of the text report")]
    json: bool,
}

#[derive(Debug)]
struct ApiRequest {
    plan: ContributionPlan,
    profile: RiskProfile,
    hover: Option<HoverRequest>,
}

#[derive(Debug, Clone, Copy)]
struct HoverRequest {
    index: usize,
    layout: ChartLayout,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FormattedSummary {
    final_balance: String,
    worst_final_balance: String,
    best_final_balance: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse {
    profile: RiskProfile,
    profile_label: &'static str,
    rates: ScenarioRates,
    start_amount: f64,
    monthly_deposit: f64,
    deposit_years: i32,
    investment_horizon: i32,
    final_balance: f64,
    scenarios: ScenarioSummary,
    formatted: FormattedSummary,
    years: Vec<YearRecord>,
    inspection: Option<Inspection>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileEntry {
    profile: RiskProfile,
    label: &'static str,
    rates: ScenarioRates,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_plan(cli: &Cli) -> Result<ContributionPlan, String> {
    if !cli.start_amount.is_finite() || !(0.0..=MAX_START_AMOUNT).contains(&cli.start_amount) {
        return Err(format!(
            "--start-amount must be between 0 and {MAX_START_AMOUNT}"
        ));
    }

    if !cli.monthly_deposit.is_finite()
        || !(0.0..=MAX_MONTHLY_DEPOSIT).contains(&cli.monthly_deposit)
    {
        return Err(format!(
            "--monthly-deposit must be between 0 and {MAX_MONTHLY_DEPOSIT}"
        ));
    }

    if !(1.0..=MAX_INVESTMENT_HORIZON).contains(&cli.investment_horizon) {
        return Err(format!(
            "--investment-horizon must be between 1 and {MAX_INVESTMENT_HORIZON}"
        ));
    }

    if !cli.deposit_years.is_finite() || cli.deposit_years < 0.0 {
        return Err("--deposit-years must be >= 0".to_string());
    }

    Ok(ContributionPlan::new(
        cli.start_amount,
        cli.monthly_deposit,
        cli.deposit_years,
        cli.investment_horizon,
    ))
}

fn hover_from_cli(cli: &Cli) -> Option<HoverRequest> {
    let year = cli.hovered_year?;
    let index = usize::try_from(year).ok()?.checked_sub(1)?;
    Some(HoverRequest {
        index,
        layout: ChartLayout::standard(cli.chart_width, cli.chart_height),
    })
}

pub fn run_cli<I, T>(args: I) -> Result<String, String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return Ok(e.to_string());
        }
        Err(e) => return Err(e.to_string()),
    };
    let request = ApiRequest {
        plan: build_plan(&cli)?,
        profile: cli.profile.into(),
        hover: hover_from_cli(&cli),
    };
    let response = build_projection_response(&request);

    if cli.json {
        return serde_json::to_string_pretty(&response)
            .map_err(|e| format!("Failed to serialize response: {e}"));
    }
    Ok(render_text_report(&response))
}

fn render_text_report(response: &ProjectionResponse) -> String {
    let mut lines = vec![
        format!(
            "Profile {} ({}): expected {:.1}% / worst {:.1}% / best {:.1}% per year",
            response.profile,
            response.profile_label,
            response.rates.expected_annual_return * 100.0,
            response.rates.worst_annual_return * 100.0,
            response.rates.best_annual_return * 100.0
        ),
        format!(
            "{:>4}  {:>14}  {:>14}  {:>14}  {:>14}",
            "Year", "Start", "Deposits", "Return", "Balance"
        ),
    ];
    lines.extend(response.years.iter().map(|record| {
        format!(
            "{:>4}  {:>14}  {:>14}  {:>14}  {:>14}",
            record.year,
            format_currency_short(record.initial_balance),
            format_currency(record.cumulative_deposits),
            format_currency(record.accrued_return),
            format_currency(record.balance)
        )
    }));
    lines.push(format!(
        "Expected result: {} (likely between {} and {})",
        response.formatted.final_balance,
        response.formatted.worst_final_balance,
        response.formatted.best_final_balance
    ));
    lines.push(format!(
        "Deposits run for {} years and stop afterwards.",
        response.deposit_years
    ));
    if let Some(inspection) = &response.inspection {
        lines.push(format!(
            "Year {}: own contribution {}, return {} (anchor x={:.1}, y={:.1})",
            inspection.year,
            format_currency(inspection.own_contribution),
            format_currency(inspection.accrued_return),
            inspection.anchor.x,
            inspection.anchor.y
        ));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/projection",
            get(projection_get_handler).post(projection_post_handler),
        )
        .route("/api/profiles", get(profiles_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    log::info!("projection HTTP API listening on http://{addr}");
    log::info!("local access: http://127.0.0.1:{port}/api/projection");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn profiles_handler() -> Response {
    let profiles = RiskProfile::ALL
        .into_iter()
        .map(|profile| ProfileEntry {
            profile,
            label: profile.local_label(),
            rates: profile.rates(),
        })
        .collect::<Vec<_>>();
    json_response(StatusCode::OK, profiles)
}

async fn projection_get_handler(Query(payload): Query<ProjectionPayload>) -> Response {
    projection_handler_impl(payload).await
}

async fn projection_post_handler(Json(payload): Json<ProjectionPayload>) -> Response {
    projection_handler_impl(payload).await
}

async fn projection_handler_impl(payload: ProjectionPayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => {
            log::warn!("rejected projection request: {msg}");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    json_response(StatusCode::OK, build_projection_response(&request))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, String> {
    let payload = serde_json::from_str::<ProjectionPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload)
}

fn api_request_from_payload(payload: ProjectionPayload) -> Result<ApiRequest, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.start_amount {
        cli.start_amount = v;
    }
    if let Some(v) = payload.monthly_deposit {
        cli.monthly_deposit = v;
    }
    if let Some(v) = payload.deposit_years {
        cli.deposit_years = v;
    }
    if let Some(v) = payload.investment_horizon {
        cli.investment_horizon = v;
    }
    if let Some(v) = payload.chart_width {
        cli.chart_width = v;
    }
    if let Some(v) = payload.chart_height {
        cli.chart_height = v;
    }

    let profile = match payload.profile.as_deref() {
        Some(name) => name.parse::<RiskProfile>().map_err(|e| e.to_string())?,
        None => cli.profile.into(),
    };

    let plan = build_plan(&cli)?;
    let hover = payload
        .hovered_index
        .and_then(|idx| usize::try_from(idx).ok())
        .map(|index| HoverRequest {
            index,
            layout: ChartLayout::standard(cli.chart_width, cli.chart_height),
        });

    Ok(ApiRequest {
        plan,
        profile,
        hover,
    })
}

fn default_cli_for_api() -> Cli {
    Cli {
        start_amount: 25_000.0,
        monthly_deposit: 1_000.0,
        deposit_years: 10.0,
        investment_horizon: 25.0,
        profile: CliRiskProfile::Balanced,
        hovered_year: None,
        chart_width: 800.0,
        chart_height: 450.0,
        json: false,
    }
}

fn build_projection_response(request: &ApiRequest) -> ProjectionResponse {
    let plan = &request.plan;
    let rates = request.profile.rates();
    let years = project_plan(plan, rates.expected_annual_return);
    let scenarios = evaluate_profile(plan, request.profile);
    let final_balance = years
        .last()
        .map(|record| record.balance)
        .unwrap_or(plan.start_amount());
    let inspection = request
        .hover
        .and_then(|hover| inspect(&years, hover.index, &hover.layout));

    ProjectionResponse {
        profile: request.profile,
        profile_label: request.profile.local_label(),
        rates,
        start_amount: plan.start_amount(),
        monthly_deposit: plan.monthly_deposit(),
        deposit_years: plan.deposit_slider_value(),
        investment_horizon: plan.investment_horizon(),
        final_balance,
        formatted: FormattedSummary {
            final_balance: format_currency(final_balance),
            worst_final_balance: format_currency(scenarios.worst_final_balance),
            best_final_balance: format_currency(scenarios.best_final_balance),
        },
        scenarios,
        years,
        inspection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_cli() -> Cli {
        default_cli_for_api()
    }

    #[test]
    fn build_plan_clamps_deposit_years_to_horizon() {
        let mut cli = sample_cli();
        cli.deposit_years = 40.0;
        cli.investment_horizon = 20.0;

        let plan = build_plan(&cli).expect("valid plan");
        assert_eq!(plan.deposit_years(), 20);
        assert_eq!(plan.investment_horizon(), 20);
    }

    #[test]
    fn build_plan_rejects_negative_amounts() {
        let mut cli = sample_cli();
        cli.start_amount = -1.0;
        let err = build_plan(&cli).expect_err("must reject negative start");
        assert!(err.contains("--start-amount"));

        let mut cli = sample_cli();
        cli.monthly_deposit = f64::NAN;
        let err = build_plan(&cli).expect_err("must reject NaN deposit");
        assert!(err.contains("--monthly-deposit"));
    }

    #[test]
    fn build_plan_rejects_horizon_outside_slider_range() {
        for horizon in [0.0, 51.0, f64::NAN] {
            let mut cli = sample_cli();
            cli.investment_horizon = horizon;
            let err = build_plan(&cli).expect_err("must reject horizon");
            assert!(err.contains("--investment-horizon"));
        }
    }

    #[test]
    fn build_plan_rejects_negative_deposit_years() {
        let mut cli = sample_cli();
        cli.deposit_years = -2.0;
        let err = build_plan(&cli).expect_err("must reject negative years");
        assert!(err.contains("--deposit-years"));
    }

    #[test]
    fn api_request_from_json_parses_web_keys() {
        let json = r#"{
          "startAmount": 50000,
          "monthlyDeposit": 250,
          "depositYears": 12.7,
          "investmentHorizon": 30,
          "profile": "Ambitieus",
          "hoveredIndex": 4,
          "chartWidth": 640,
          "chartHeight": 360
        }"#;
        let request = api_request_from_json(json).expect("json should parse");

        assert_approx(request.plan.start_amount(), 50_000.0);
        assert_approx(request.plan.monthly_deposit(), 250.0);
        assert_eq!(request.plan.deposit_years(), 12);
        assert_eq!(request.plan.investment_horizon(), 30);
        assert_eq!(request.profile, RiskProfile::Ambitious);

        let hover = request.hover.expect("hover requested");
        assert_eq!(hover.index, 4);
        assert_eq!(hover.layout, ChartLayout::standard(640.0, 360.0));
    }

    #[test]
    fn api_request_defaults_match_calculator_start_state() {
        let request = api_request_from_json("{}").expect("empty payload is valid");
        assert_eq!(request.plan, ContributionPlan::default());
        assert_eq!(request.profile, RiskProfile::Balanced);
        assert!(request.hover.is_none());
    }

    #[test]
    fn api_request_rejects_unknown_profile() {
        let err = api_request_from_json(r#"{ "profile": "Yolo" }"#).expect_err("unknown profile");
        assert!(err.contains("Unknown risk profile"));
        assert!(err.contains("Yolo"));
    }

    #[test]
    fn negative_hover_index_means_no_hover() {
        let request =
            api_request_from_json(r#"{ "hoveredIndex": -1 }"#).expect("json should parse");
        assert!(request.hover.is_none());
    }

    #[test]
    fn projection_response_serialization_contains_expected_fields() {
        let request = api_request_from_json(r#"{ "hoveredIndex": 0 }"#).expect("valid");
        let response = build_projection_response(&request);
        let json = serde_json::to_string(&response).expect("response should serialize");

        assert!(json.contains("\"years\""));
        assert!(json.contains("\"cumulativeDeposits\""));
        assert!(json.contains("\"accruedReturn\""));
        assert!(json.contains("\"yearStartBalance\""));
        assert!(json.contains("\"worstFinalBalance\""));
        assert!(json.contains("\"profile\":\"Balanced\""));
        assert!(json.contains("\"profileLabel\":\"Gedreven\""));
        assert!(json.contains("\"inspection\":{"));
        assert!(json.contains("\"ownContribution\""));
    }

    #[test]
    fn projection_response_final_balance_matches_last_year_and_scenarios() {
        let request = api_request_from_json("{}").expect("valid");
        let response = build_projection_response(&request);

        assert_eq!(response.years.len(), 25);
        let last = response.years.last().expect("non-empty");
        assert_eq!(response.final_balance, last.balance);
        assert_eq!(response.scenarios.expected_final_balance, last.balance);
        assert!(response.scenarios.worst_final_balance < response.final_balance);
        assert!(response.scenarios.best_final_balance > response.final_balance);
        assert_eq!(
            response.formatted.final_balance,
            format_currency(response.final_balance)
        );
    }

    #[test]
    fn run_cli_prints_report_with_scenario_range() {
        let output = run_cli([
            "invest-projection",
            "--start-amount",
            "10000",
            "--monthly-deposit",
            "100",
            "--deposit-years",
            "8",
            "--investment-horizon",
            "5",
            "--profile",
            "conservative",
            "--hovered-year",
            "5",
        ])
        .expect("cli should run");

        assert!(output.contains("Profile Conservative (Behouden)"));
        assert!(output.contains("Expected result: €\u{a0}"));
        assert!(output.contains("Deposits run for 5 years"));
        assert!(output.contains("Year 5: own contribution €\u{a0}16.000"));
        assert!(output.ends_with('\n'));
        assert_eq!(output.lines().filter(|l| l.starts_with("   ")).count(), 5);
    }

    #[test]
    fn run_cli_json_mode_emits_parseable_json() {
        let output = run_cli(["invest-projection", "--json", "--profile", "gedreven"])
            .expect("cli should run");
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");
        assert_eq!(value["profile"], "Balanced");
        assert_eq!(value["years"].as_array().map(Vec::len), Some(25));
        assert!(value["inspection"].is_null());
    }

    #[test]
    fn run_cli_rejects_invalid_ranges() {
        let err = run_cli(["invest-projection", "--investment-horizon", "0"])
            .expect_err("horizon must be >= 1");
        assert!(err.contains("--investment-horizon"));
    }
}
