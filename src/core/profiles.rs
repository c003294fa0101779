use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::ProjectionError;
use super::types::ScenarioRates;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default, Serialize)]
pub enum RiskProfile {
    Conservative,
    #[default]
    Balanced,
    Ambitious,
}

impl RiskProfile {
    pub const ALL: [RiskProfile; 3] = [
        RiskProfile::Conservative,
        RiskProfile::Balanced,
        RiskProfile::Ambitious,
    ];

    pub fn rates(self) -> ScenarioRates {
        match self {
            RiskProfile::Conservative => ScenarioRates {
                expected_annual_return: 0.044,
                worst_annual_return: 0.024,
                best_annual_return: 0.054,
            },
            RiskProfile::Balanced => ScenarioRates {
                expected_annual_return: 0.057,
                worst_annual_return: 0.032,
                best_annual_return: 0.072,
            },
            RiskProfile::Ambitious => ScenarioRates {
                expected_annual_return: 0.069,
                worst_annual_return: 0.039,
                best_annual_return: 0.084,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RiskProfile::Conservative => "Conservative",
            RiskProfile::Balanced => "Balanced",
            RiskProfile::Ambitious => "Ambitious",
        }
    }

    /// Label used by the Dutch calculator front end.
    pub fn local_label(self) -> &'static str {
        match self {
            RiskProfile::Conservative => "Behouden",
            RiskProfile::Balanced => "Gedreven",
            RiskProfile::Ambitious => "Ambitieus",
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RiskProfile {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        RiskProfile::ALL
            .into_iter()
            .find(|profile| {
                trimmed.eq_ignore_ascii_case(profile.name())
                    || trimmed.eq_ignore_ascii_case(profile.local_label())
            })
            .ok_or_else(|| ProjectionError::UnknownProfile {
                name: s.to_string(),
            })
    }
}
