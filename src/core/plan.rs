/// Longest horizon a plan carries; larger requests are clamped to it.
pub const MAX_INVESTMENT_HORIZON: i32 = 100;

pub fn clamp_deposit_years(deposit_years: i32, investment_horizon: i32) -> i32 {
    deposit_years.min(investment_horizon).max(0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContributionPlan {
    start_amount: f64,
    monthly_deposit: f64,
    deposit_years: i32,
    investment_horizon: i32,
}

impl ContributionPlan {
    pub fn new(
        start_amount: f64,
        monthly_deposit: f64,
        deposit_years: f64,
        investment_horizon: f64,
    ) -> Self {
        let investment_horizon = horizon_years(investment_horizon);
        Self {
            start_amount: non_negative_amount(start_amount),
            monthly_deposit: non_negative_amount(monthly_deposit),
            deposit_years: clamp_deposit_years(whole_years(deposit_years), investment_horizon),
            investment_horizon,
        }
    }

    pub fn start_amount(&self) -> f64 {
        self.start_amount
    }

    pub fn monthly_deposit(&self) -> f64 {
        self.monthly_deposit
    }

    pub fn deposit_years(&self) -> i32 {
        self.deposit_years
    }

    pub fn investment_horizon(&self) -> i32 {
        self.investment_horizon
    }

    pub fn set_start_amount(&mut self, amount: f64) {
        self.start_amount = non_negative_amount(amount);
    }

    pub fn set_monthly_deposit(&mut self, amount: f64) {
        self.monthly_deposit = non_negative_amount(amount);
    }

    pub fn set_deposit_years(&mut self, years: f64) {
        self.deposit_years = clamp_deposit_years(whole_years(years), self.investment_horizon);
    }

    pub fn set_investment_horizon(&mut self, years: f64) {
        self.investment_horizon = horizon_years(years);
        self.deposit_years = clamp_deposit_years(self.deposit_years, self.investment_horizon);
    }

    pub fn deposit_slider_value(&self) -> i32 {
        self.deposit_years.min(self.investment_horizon).max(0)
    }
}

impl Default for ContributionPlan {
    fn default() -> Self {
        Self::new(25_000.0, 1_000.0, 10.0, 25.0)
    }
}

fn non_negative_amount(amount: f64) -> f64 {
    if amount.is_finite() { amount.max(0.0) } else { 0.0 }
}

fn horizon_years(years: f64) -> i32 {
    whole_years(years).min(MAX_INVESTMENT_HORIZON)
}

fn whole_years(years: f64) -> i32 {
    if years.is_nan() {
        return 0;
    }
    // `as` saturates at the i32 bounds and truncates toward zero.
    years.trunc() as i32
}
