//! # Simulation clock
//!
//! [`SimulationClock`] maps real elapsed time to accelerated simulation time:
//!
//! ```text
//! simulation_time_ms += real_delta_ms × acceleration_factor
//! ```
//!
//! It is advanced once per frame by the host's render loop and read by everything that
//! asks "what time is it" in the simulation. Simulation time never decreases: negative
//! or NaN deltas are treated as zero.
//!
//! ## Single writer, many readers
//!
//! [`SimulationClock::advance`] takes `&mut self`, so exactly one owner can step the clock.
//! Every advance publishes the new time to an atomic cell; [`ClockReader`] handles obtained
//! with [`SimulationClock::reader`] can be cloned and sent to other threads, and read a
//! consistent snapshot without locking.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use hifitime::{Duration, Epoch};

use crate::{
    constants::UnixMillis,
    orrery_errors::OrreryError,
    params::{validate_acceleration, EngineParams},
    time::{unix_ms_to_epoch, wall_clock_unix_ms},
};

#[derive(Debug)]
pub struct SimulationClock {
    simulation_time_ms: UnixMillis,
    acceleration_factor: f64,
    published: Arc<AtomicU64>,
}

/// Read-only, thread-safe view of a [`SimulationClock`].
#[derive(Debug, Clone)]
pub struct ClockReader {
    published: Arc<AtomicU64>,
}

impl ClockReader {
    /// Latest simulation time published by the clock, Unix milliseconds.
    pub fn current_time(&self) -> UnixMillis {
        f64::from_bits(self.published.load(Ordering::Acquire))
    }

    pub fn current_epoch(&self) -> Epoch {
        unix_ms_to_epoch(self.current_time())
    }
}

impl SimulationClock {
    /// Start a clock at the current wall time.
    ///
    /// Return
    /// ------
    /// * a clock whose simulation time equals the host's wall clock, or
    ///   [`OrreryError::ClockError`] / [`OrreryError::InvalidParameter`]
    pub fn new(acceleration_factor: f64) -> Result<Self, OrreryError> {
        Self::starting_at(wall_clock_unix_ms()?, acceleration_factor)
    }

    /// Start a clock at the current wall time with the acceleration from `params`.
    pub fn from_params(params: &EngineParams) -> Result<Self, OrreryError> {
        Self::new(params.acceleration_factor)
    }

    /// Start a clock at an explicit simulation time.
    pub fn starting_at(
        start_ms: UnixMillis,
        acceleration_factor: f64,
    ) -> Result<Self, OrreryError> {
        validate_acceleration(acceleration_factor)?;
        if !start_ms.is_finite() {
            return Err(OrreryError::InvalidParameter(format!(
                "clock start time must be finite, got {start_ms}"
            )));
        }
        Ok(SimulationClock {
            simulation_time_ms: start_ms,
            acceleration_factor,
            published: Arc::new(AtomicU64::new(start_ms.to_bits())),
        })
    }

    /// Advance by a real elapsed time in milliseconds.
    ///
    /// Arguments
    /// ---------
    /// * `real_delta_ms`: real time since the previous frame; negative or NaN counts as 0.
    ///
    /// Return
    /// ------
    /// * the updated simulation time, Unix milliseconds
    pub fn advance(&mut self, real_delta_ms: f64) -> UnixMillis {
        let real_delta_ms = if real_delta_ms > 0.0 {
            real_delta_ms
        } else {
            0.0
        };
        let step = real_delta_ms * self.acceleration_factor;
        if step.is_finite() {
            self.simulation_time_ms += step;
        }
        self.published
            .store(self.simulation_time_ms.to_bits(), Ordering::Release);
        self.simulation_time_ms
    }

    /// Advance by a real elapsed [`Duration`].
    pub fn advance_by(&mut self, real_delta: Duration) -> UnixMillis {
        self.advance(real_delta.to_seconds() * 1000.0)
    }

    pub fn current_time(&self) -> UnixMillis {
        self.simulation_time_ms
    }

    pub fn current_epoch(&self) -> Epoch {
        unix_ms_to_epoch(self.simulation_time_ms)
    }

    pub fn acceleration_factor(&self) -> f64 {
        self.acceleration_factor
    }

    /// Change the acceleration factor for subsequent advances.
    pub fn set_acceleration_factor(&mut self, factor: f64) -> Result<(), OrreryError> {
        validate_acceleration(factor)?;
        log::debug!(
            "simulation clock acceleration {} -> {}",
            self.acceleration_factor,
            factor
        );
        self.acceleration_factor = factor;
        Ok(())
    }

    /// A cloneable read-only handle observing this clock.
    pub fn reader(&self) -> ClockReader {
        ClockReader {
            published: Arc::clone(&self.published),
        }
    }
}
