// src/engine/forecaster.rs

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

use crate::engine::config::ForecastConfig;
use crate::error::{EngineError, EngineResult};
use crate::model::forecast::{ForecastPoint, ForecastSeries};

/// Generates day-indexed demand projections.
///
/// Each day combines the base demand, an oscillating trend
/// `amplitude * sin(day * angular_step)` and uniform noise in
/// `[-noise/2, +noise/2]`. The sum is clamped at zero and rounded.
/// Confidence is drawn independently from
/// `[confidence_floor, confidence_floor + confidence_spread]`.
#[derive(Debug, Clone)]
pub struct TimeSeriesForecaster {
    config: ForecastConfig,
}

impl TimeSeriesForecaster {
    pub fn new(config: ForecastConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Projects `horizon_days` days starting at `start`, drawing from `rng`.
    ///
    /// # Arguments
    /// * `base_demand` - Expected units per day before trend and noise.
    /// * `horizon_days` - Number of points to produce, at least 1.
    /// * `start` - Date of day 0.
    /// * `rng` - Random source; pass a seeded generator for reproducible output.
    pub fn forecast<R: Rng + ?Sized>(
        &self,
        base_demand: f64,
        horizon_days: i64,
        start: NaiveDate,
        rng: &mut R,
    ) -> EngineResult<ForecastSeries> {
        let horizon = validate_horizon(horizon_days)?;
        if !base_demand.is_finite() || base_demand < 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "base demand must be a non-negative number (got {})",
                base_demand
            )));
        }

        let half_noise = self.config.noise_amplitude / 2.0;
        let noise = Uniform::new_inclusive(-half_noise, half_noise);
        let confidence = Uniform::new_inclusive(
            self.config.confidence_floor,
            self.config.confidence_floor + self.config.confidence_spread,
        );

        let mut points = Vec::with_capacity(horizon.min(366) as usize);
        for day in 0..horizon {
            // The whole horizon has to fit on the calendar.
            let date = start
                .checked_add_days(Days::new(day as u64))
                .ok_or(EngineError::InvalidHorizon(horizon_days))?;

            let trend = self.config.trend_amplitude * (day as f64 * self.config.angular_step).sin();
            let raw = base_demand + trend + noise.sample(rng);

            // Demand cannot be negative.
            let predicted_units = raw.max(0.0).round() as u32;
            let confidence_percent = confidence.sample(rng).round().clamp(0.0, 100.0) as u32;

            points.push(ForecastPoint {
                day_index: day,
                date,
                predicted_units,
                confidence_percent,
            });
        }

        Ok(ForecastSeries::new(points))
    }

    /// Reproducible projection: identical arguments give identical output.
    pub fn forecast_seeded(
        &self,
        base_demand: f64,
        horizon_days: i64,
        start: NaiveDate,
        seed: u64,
    ) -> EngineResult<ForecastSeries> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.forecast(base_demand, horizon_days, start, &mut rng)
    }

    /// Projection from the thread-local generator; bounded but not reproducible.
    pub fn forecast_unseeded(
        &self,
        base_demand: f64,
        horizon_days: i64,
        start: NaiveDate,
    ) -> EngineResult<ForecastSeries> {
        let mut rng = thread_rng();
        self.forecast(base_demand, horizon_days, start, &mut rng)
    }
}

impl Default for TimeSeriesForecaster {
    fn default() -> Self {
        Self {
            config: ForecastConfig::default(),
        }
    }
}

/// Checks a requested horizon and narrows it to a day count.
pub fn validate_horizon(horizon_days: i64) -> EngineResult<u32> {
    if horizon_days < 1 {
        return Err(EngineError::InvalidHorizon(horizon_days));
    }
    u32::try_from(horizon_days).map_err(|_| EngineError::InvalidHorizon(horizon_days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn length_matches_horizon_for_common_periods() {
        let forecaster = TimeSeriesForecaster::default();
        for horizon in [1, 7, 14, 30, 60, 90, 365] {
            let series = forecaster.forecast_seeded(100.0, horizon, start(), 7).unwrap();
            assert_eq!(series.len(), horizon as usize);
            for (i, point) in series.points.iter().enumerate() {
                assert_eq!(point.day_index, i as u32);
                assert_eq!(point.date, start() + Duration::days(i as i64));
            }
        }
    }

    #[test]
    fn values_stay_in_bounds() {
        let forecaster = TimeSeriesForecaster::default();
        for seed in 0..20 {
            let series = forecaster.forecast_seeded(100.0, 90, start(), seed).unwrap();
            for point in &series.points {
                assert!((85..=95).contains(&point.confidence_percent));
                // base 100 +/- 20 trend +/- 15 noise
                assert!((65..=135).contains(&point.predicted_units));
            }
        }
    }

    #[test]
    fn zero_base_demand_clamps_at_zero() {
        let forecaster = TimeSeriesForecaster::default();
        let series = forecaster.forecast_unseeded(0.0, 60, start()).unwrap();
        assert_eq!(series.len(), 60);
        assert!(series.points.iter().all(|p| p.predicted_units <= 35));
        assert!(series.points.iter().all(|p| p.confidence_percent <= 100));
    }

    #[test]
    fn same_seed_same_series() {
        let forecaster = TimeSeriesForecaster::default();
        let a = forecaster.forecast_seeded(42.0, 30, start(), 1234).unwrap();
        let b = forecaster.forecast_seeded(42.0, 30, start(), 1234).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn without_noise_the_trend_is_exact() {
        let config = ForecastConfig {
            noise_amplitude: 0.0,
            confidence_spread: 0.0,
            ..ForecastConfig::default()
        };
        let forecaster = TimeSeriesForecaster::new(config).unwrap();
        let series = forecaster.forecast_seeded(50.0, 10, start(), 0).unwrap();

        for point in &series.points {
            let expected = (50.0 + 20.0 * (point.day_index as f64 * 0.2).sin()).round() as u32;
            assert_eq!(point.predicted_units, expected);
            assert_eq!(point.confidence_percent, 85);
        }
        assert_eq!(series.points[0].predicted_units, 50);
    }

    #[test]
    fn non_positive_horizon_is_rejected() {
        let forecaster = TimeSeriesForecaster::default();
        for horizon in [0, -1, -30] {
            let err = forecaster.forecast_seeded(10.0, horizon, start(), 1).unwrap_err();
            assert!(matches!(err, EngineError::InvalidHorizon(h) if h == horizon));
        }
    }

    #[test]
    fn horizon_past_calendar_end_is_rejected() {
        let forecaster = TimeSeriesForecaster::default();
        let near_end = NaiveDate::MAX - Days::new(3);
        assert_eq!(forecaster.forecast_seeded(10.0, 4, near_end, 1).unwrap().len(), 4);
        let err = forecaster.forecast_seeded(10.0, 5, near_end, 1).unwrap_err();
        assert!(matches!(err, EngineError::InvalidHorizon(5)));
    }

    #[test]
    fn negative_base_demand_is_rejected() {
        let forecaster = TimeSeriesForecaster::default();
        let err = forecaster.forecast_seeded(-5.0, 7, start(), 1).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ForecastConfig {
            confidence_floor: 98.0,
            ..ForecastConfig::default()
        };
        assert!(TimeSeriesForecaster::new(config).is_err());
    }
}
