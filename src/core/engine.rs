use super::error::ProjectionResult;
use super::plan::ContributionPlan;
#[cfg(test)]
use super::plan::MAX_INVESTMENT_HORIZON;
use super::profiles::RiskProfile;
use super::types::{ScenarioSummary, YearRecord};

const MONTHS_PER_YEAR: i64 = 12;

#[derive(Debug, Clone, Copy)]
struct Account {
    balance: f64,
    cumulative_deposits: f64,
}

#[derive(Debug, Clone, Copy)]
struct DepositSchedule {
    monthly_deposit: f64,
    last_deposit_month: i64,
}

impl DepositSchedule {
    fn new(monthly_deposit: f64, deposit_years: i32) -> Self {
        Self {
            monthly_deposit,
            last_deposit_month: i64::from(deposit_years) * MONTHS_PER_YEAR,
        }
    }

    fn deposit_for(self, month: i64) -> f64 {
        if month <= self.last_deposit_month {
            self.monthly_deposit
        } else {
            0.0
        }
    }
}

/// Each month compounds the balance first and then adds that month's
/// deposit, so a deposit earns nothing in the month it is made. Deposits
/// stop after month `deposit_years * 12`; compounding runs the whole horizon.
pub fn project(
    start_amount: f64,
    monthly_deposit: f64,
    deposit_years: i32,
    investment_horizon: i32,
    annual_return: f64,
) -> Vec<YearRecord> {
    let mut trace = Vec::new();
    simulate_account(
        start_amount,
        monthly_deposit,
        deposit_years,
        investment_horizon,
        annual_return,
        Some(&mut trace),
    );
    trace
}

pub fn project_plan(plan: &ContributionPlan, annual_return: f64) -> Vec<YearRecord> {
    project(
        plan.start_amount(),
        plan.monthly_deposit(),
        plan.deposit_years(),
        plan.investment_horizon(),
        annual_return,
    )
}

pub fn terminal_balance(plan: &ContributionPlan, annual_return: f64) -> f64 {
    simulate_account(
        plan.start_amount(),
        plan.monthly_deposit(),
        plan.deposit_years(),
        plan.investment_horizon(),
        annual_return,
        None,
    )
    .balance
}

pub fn evaluate_scenarios(
    plan: &ContributionPlan,
    profile: &str,
) -> ProjectionResult<ScenarioSummary> {
    let profile = profile.parse::<RiskProfile>()?;
    Ok(evaluate_profile(plan, profile))
}

pub fn evaluate_profile(plan: &ContributionPlan, profile: RiskProfile) -> ScenarioSummary {
    let rates = profile.rates();
    let summary = ScenarioSummary {
        expected_final_balance: terminal_balance(plan, rates.expected_annual_return),
        worst_final_balance: terminal_balance(plan, rates.worst_annual_return),
        best_final_balance: terminal_balance(plan, rates.best_annual_return),
    };
    log::debug!(
        "scenarios profile={profile} horizon={} deposit_years={}: worst={:.2} expected={:.2} best={:.2}",
        plan.investment_horizon(),
        plan.deposit_years(),
        summary.worst_final_balance,
        summary.expected_final_balance,
        summary.best_final_balance
    );
    summary
}

fn simulate_account(
    start_amount: f64,
    monthly_deposit: f64,
    deposit_years: i32,
    investment_horizon: i32,
    annual_return: f64,
    mut trace: Option<&mut Vec<YearRecord>>,
) -> Account {
    let monthly_return = annual_return / 12.0;
    let schedule = DepositSchedule::new(monthly_deposit, deposit_years);
    let mut account = Account {
        balance: start_amount,
        cumulative_deposits: 0.0,
    };

    for year in 1..=investment_horizon.max(0) {
        let year_start_balance = account.balance;
        let first_month = i64::from(year - 1) * MONTHS_PER_YEAR + 1;

        for month in first_month..first_month + MONTHS_PER_YEAR {
            apply_monthly_growth(&mut account, monthly_return);
            apply_monthly_deposit(&mut account, schedule.deposit_for(month));
        }

        if let Some(trace) = trace.as_deref_mut() {
            trace.push(YearRecord {
                year: year as u32,
                balance: account.balance,
                cumulative_deposits: account.cumulative_deposits,
                accrued_return: account.balance - (start_amount + account.cumulative_deposits),
                initial_balance: start_amount,
                year_start_balance,
            });
        }
    }

    account
}

fn apply_monthly_growth(account: &mut Account, monthly_return: f64) {
    account.balance *= 1.0 + monthly_return;
}

fn apply_monthly_deposit(account: &mut Account, deposit: f64) {
    account.balance += deposit;
    account.cumulative_deposits += deposit;
}
