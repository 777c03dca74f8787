// src/engine/config.rs

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::strategy::implementations::{FixedCoverPolicy, LeadTimeCoverPolicy};
use crate::strategy::traits::SafetyStockPolicy;

/// Shape of the generated demand projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub trend_amplitude: f64,
    /// Radians advanced per day by the oscillating trend.
    pub angular_step: f64,
    /// Full width of the uniform noise band, centred on zero.
    pub noise_amplitude: f64,
    pub confidence_floor: f64,
    pub confidence_spread: f64,
}

impl ForecastConfig {
    pub fn validate(&self) -> EngineResult<()> {
        non_negative("forecast.trend_amplitude", self.trend_amplitude)?;
        non_negative("forecast.noise_amplitude", self.noise_amplitude)?;
        non_negative("forecast.confidence_floor", self.confidence_floor)?;
        non_negative("forecast.confidence_spread", self.confidence_spread)?;
        if !self.angular_step.is_finite() {
            return Err(EngineError::InvalidConfig(
                "forecast.angular_step must be finite".to_string(),
            ));
        }
        let ceiling = self.confidence_floor + self.confidence_spread;
        if ceiling > 100.0 {
            return Err(EngineError::InvalidConfig(format!(
                "confidence band [{}, {}] exceeds 100",
                self.confidence_floor, ceiling
            )));
        }
        Ok(())
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            trend_amplitude: 20.0,
            angular_step: 0.2,
            noise_amplitude: 30.0,
            confidence_floor: 85.0,
            confidence_spread: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Fraction of the reorder level below which stock is CRITICAL.
    pub critical_ratio: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { critical_ratio: 0.5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyStockConfig {
    pub lead_time_cover_ratio: f64,
    pub min_days_of_cover: f64,
    /// When set, replaces the lead-time derived days of cover.
    pub fixed_days_of_cover: Option<f64>,
}

impl Default for SafetyStockConfig {
    fn default() -> Self {
        Self {
            lead_time_cover_ratio: 0.4,
            min_days_of_cover: 1.0,
            fixed_days_of_cover: None,
        }
    }
}

impl SafetyStockConfig {
    pub fn policy(&self) -> Box<dyn SafetyStockPolicy> {
        match self.fixed_days_of_cover {
            Some(days) => Box::new(FixedCoverPolicy::new(days)),
            None => Box::new(LeadTimeCoverPolicy::new(
                self.lead_time_cover_ratio,
                self.min_days_of_cover,
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub forecast: ForecastConfig,
    pub classifier: ClassifierConfig,
    pub safety_stock: SafetyStockConfig,
    /// Relative divergence between configured and implied reorder points
    /// above which a recommendation is flagged.
    pub mismatch_tolerance: f64,
    /// Seeds every per-record random source when set.
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            forecast: ForecastConfig::default(),
            classifier: ClassifierConfig::default(),
            safety_stock: SafetyStockConfig::default(),
            mismatch_tolerance: 0.5,
            seed: None,
            parallel: true,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> EngineResult<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> EngineResult<()> {
        self.forecast.validate()?;

        non_negative("classifier.critical_ratio", self.classifier.critical_ratio)?;

        let s = &self.safety_stock;
        non_negative("safety_stock.lead_time_cover_ratio", s.lead_time_cover_ratio)?;
        non_negative("safety_stock.min_days_of_cover", s.min_days_of_cover)?;
        if let Some(days) = s.fixed_days_of_cover {
            non_negative("safety_stock.fixed_days_of_cover", days)?;
        }

        non_negative("mismatch_tolerance", self.mismatch_tolerance)
    }
}

fn non_negative(field: &str, value: f64) -> EngineResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!(
            "{} must be a non-negative number (got {})",
            field, value
        )))
    }
}
