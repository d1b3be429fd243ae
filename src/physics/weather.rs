//! Weather window and the weather-delay estimator contract

use crate::types::*;

/// Wind observations covering the construction period
#[derive(Debug, Clone)]
pub struct WeatherWindow {
    /// Mean wind speed per period, at `measurement_height`
    speeds: Vec<Velocity>,
    measurement_height: Length,
    /// Length of one observation period
    period: Time,
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Weather window contains no observations")]
    Empty,

    #[error("Observation period must be positive, got {0}")]
    InvalidPeriod(DisplayTime),

    #[error("Measurement height must be positive, got {0}")]
    InvalidMeasurementHeight(DisplayLength),

    #[error("Observation {index} has an invalid wind speed: {speed}")]
    InvalidSpeed { index: usize, speed: DisplayVelocity },
}

impl WeatherWindow {
    pub fn new(
        speeds: Vec<Velocity>,
        measurement_height: Length,
        period: Time,
    ) -> Result<Self, WeatherError> {
        if speeds.is_empty() {
            return Err(WeatherError::Empty);
        }
        if !(period.get::<hour>() > 0.0) {
            return Err(WeatherError::InvalidPeriod(DisplayTime(period)));
        }
        if !(measurement_height.get::<meter>() > 0.0) {
            return Err(WeatherError::InvalidMeasurementHeight(DisplayLength(
                measurement_height,
            )));
        }
        if let Some(index) = speeds.iter().position(|v| {
            let mps = v.get::<meter_per_second>();
            !mps.is_finite() || mps < 0.0
        }) {
            return Err(WeatherError::InvalidSpeed {
                index,
                speed: DisplayVelocity(speeds[index]),
            });
        }

        Ok(Self {
            speeds,
            measurement_height,
            period,
        })
    }

    pub fn len(&self) -> usize {
        self.speeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speeds.is_empty()
    }

    pub fn period(&self) -> Time {
        self.period
    }

    pub fn measurement_height(&self) -> Length {
        self.measurement_height
    }

    /// Total span of the window
    pub fn duration(&self) -> Time {
        self.period * self.speeds.len() as f64
    }

    pub fn speeds(&self) -> &[Velocity] {
        &self.speeds
    }

    /// Wind speed of one period extrapolated to `height` with the power law
    ///
    /// v(h) = v_ref * (h / h_ref)^alpha
    pub fn speed_at(&self, index: usize, height: Length, shear_exponent: f64) -> Option<Velocity> {
        let reference = *self.speeds.get(index)?;
        let ratio = height.get::<meter>() / self.measurement_height.get::<meter>();
        Some(reference * ratio.powf(shear_exponent))
    }
}

/// Length of one delay bucket returned by `ExceedanceDelayEstimator`
pub const DELAY_BUCKET_HOURS: f64 = 24.0;

/// Estimates how long wind keeps a lift on hold
///
/// Implementations are pure: given the window and a lift's critical wind
/// speed they return one delay value per time unit of
/// `[start, start + mission_periods)`, in order from `start`.
pub trait WeatherDelayEstimator {
    fn delays(
        &self,
        window: &WeatherWindow,
        start: usize,
        mission_periods: usize,
        critical_wind_speed: Velocity,
        height: Length,
        shear_exponent: f64,
    ) -> Vec<Time>;
}

/// Reference estimator: hours per day during which the extrapolated speed
/// exceeds the critical speed
///
/// Days are counted from `start`; a trailing partial day gets its own value.
/// A value never decreases when more periods exceed the limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExceedanceDelayEstimator;

impl ExceedanceDelayEstimator {
    /// Observation periods per delay bucket, at least one
    pub fn periods_per_bucket(window: &WeatherWindow) -> usize {
        let periods = (DELAY_BUCKET_HOURS / window.period().get::<hour>()).round();
        if periods.is_finite() && periods >= 1.0 {
            periods as usize
        } else {
            1
        }
    }
}

impl WeatherDelayEstimator for ExceedanceDelayEstimator {
    fn delays(
        &self,
        window: &WeatherWindow,
        start: usize,
        mission_periods: usize,
        critical_wind_speed: Velocity,
        height: Length,
        shear_exponent: f64,
    ) -> Vec<Time> {
        let end = start.saturating_add(mission_periods).min(window.len());
        if start >= end {
            return Vec::new();
        }

        let per_bucket = Self::periods_per_bucket(window);
        let buckets = (end - start).div_ceil(per_bucket);
        let mut delays = vec![Time::new::<hour>(0.0); buckets];

        for index in start..end {
            let exceeded = window
                .speed_at(index, height, shear_exponent)
                .is_some_and(|v| v > critical_wind_speed);
            if exceeded {
                delays[(index - start) / per_bucket] += window.period();
            }
        }

        delays
    }
}
