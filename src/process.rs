// Step-test measurements and the process dynamics derived from them
// Copyright © 2025 Hs293Go
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES
// OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE
// OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use num_traits::Float;

use crate::correlation::cast;

/// Timestamps read off a step response, in seconds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepTimes<F: Float> {
    /// When the manipulated variable was stepped.
    pub t0: F,
    /// When the process variable completed 25% of its total change.
    pub t25: F,
    /// When the process variable completed 75% of its total change.
    pub t75: F,
}

impl<F: Float> StepTimes<F> {
    /// Bundles the three timestamps.
    pub fn new(t0: F, t25: F, t75: F) -> Self {
        Self { t0, t25, t75 }
    }

    /// Returns true if every timestamp is finite and `t0 < t25 < t75`.
    pub fn is_ordered(&self) -> bool {
        self.t0.is_finite()
            && self.t25.is_finite()
            && self.t75.is_finite()
            && self.t0 < self.t25
            && self.t25 < self.t75
    }
}

/// The scalars an open-loop step test yields.
///
/// Constructing one with [`StepTestMeasurement::new`] performs no validation; the tuning
/// computation only guards the arithmetic failures that bad inputs lead to. Use
/// [`StepTestBuilder`] to reject malformed measurements up front.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepTestMeasurement<F: Float> {
    /// Sampling period of the recorded trace, in seconds.
    pub scan_time: F,
    /// Magnitude of the process-variable change.
    pub delta_pv: F,
    /// Size of the manipulated-variable step.
    pub delta_mv: F,
    /// Deadband estimate. Reported alongside the results, not used by the gain formulas.
    pub hysteresis: F,
    /// Step-response timestamps.
    pub times: StepTimes<F>,
}

impl<F: Float> StepTestMeasurement<F> {
    /// Creates a measurement without checking any of its values.
    pub fn new(
        scan_time: F,
        delta_pv: F,
        delta_mv: F,
        hysteresis: F,
        times: StepTimes<F>,
    ) -> Self {
        Self {
            scan_time,
            delta_pv,
            delta_mv,
            hysteresis,
            times,
        }
    }

    /// Derives the process dynamics of this measurement.
    pub fn dynamics(&self) -> ProcessDynamics<F> {
        ProcessDynamics::from_measurement(self)
    }
}

/// Errors raised while building a [`StepTestMeasurement`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum MeasurementError {
    /// A required value was never supplied. Holds the field name.
    #[cfg_attr(feature = "std", error("step test is missing `{0}`"))]
    Missing(&'static str),

    /// Scan time must be finite and positive.
    #[cfg_attr(feature = "std", error("scan time must be finite and positive"))]
    InvalidScanTime,

    /// The process-variable change must be finite and positive.
    #[cfg_attr(feature = "std", error("process-variable change must be finite and positive"))]
    InvalidPvDelta,

    /// The manipulated-variable step must be finite and nonzero.
    #[cfg_attr(feature = "std", error("manipulated-variable step must be finite and nonzero"))]
    InvalidMvDelta,

    /// Hysteresis must be finite and non-negative.
    #[cfg_attr(feature = "std", error("hysteresis must be finite and non-negative"))]
    InvalidHysteresis,

    /// Timestamps must be finite and satisfy `t0 < t25 < t75`.
    #[cfg_attr(feature = "std", error("step-response timestamps must satisfy t0 < t25 < t75"))]
    UnorderedTimes,
}

/// Builder for a validated [`StepTestMeasurement`].
///
/// Every value except `hysteresis` (default zero) must be supplied before calling `build`.
#[derive(Copy, Clone, Debug)]
pub struct StepTestBuilder<F: Float> {
    scan_time: Option<F>,
    delta_pv: Option<F>,
    delta_mv: Option<F>,
    hysteresis: F,
    t0: Option<F>,
    t25: Option<F>,
    t75: Option<F>,
}

impl<F: Float> Default for StepTestBuilder<F> {
    fn default() -> Self {
        Self {
            scan_time: None,
            delta_pv: None,
            delta_mv: None,
            hysteresis: F::zero(),
            t0: None,
            t25: None,
            t75: None,
        }
    }
}

impl<F: Float> StepTestBuilder<F> {
    /// Sets the sampling period in seconds.
    pub fn scan_time(mut self, scan_time: F) -> Self {
        self.scan_time = Some(scan_time);
        self
    }

    /// Sets the observed process-variable change.
    pub fn delta_pv(mut self, delta_pv: F) -> Self {
        self.delta_pv = Some(delta_pv);
        self
    }

    /// Sets the manipulated-variable step.
    pub fn delta_mv(mut self, delta_mv: F) -> Self {
        self.delta_mv = Some(delta_mv);
        self
    }

    /// Sets the deadband estimate.
    pub fn hysteresis(mut self, hysteresis: F) -> Self {
        self.hysteresis = hysteresis;
        self
    }

    /// Sets all three step-response timestamps.
    pub fn times(mut self, times: StepTimes<F>) -> Self {
        self.t0 = Some(times.t0);
        self.t25 = Some(times.t25);
        self.t75 = Some(times.t75);
        self
    }

    /// Sets the time of the step.
    pub fn t0(mut self, t0: F) -> Self {
        self.t0 = Some(t0);
        self
    }

    /// Sets the time at 25% of the response.
    pub fn t25(mut self, t25: F) -> Self {
        self.t25 = Some(t25);
        self
    }

    /// Sets the time at 75% of the response.
    pub fn t75(mut self, t75: F) -> Self {
        self.t75 = Some(t75);
        self
    }

    /// Validates the collected values and builds the measurement.
    pub fn build(self) -> Result<StepTestMeasurement<F>, MeasurementError> {
        let scan_time = self.scan_time.ok_or(MeasurementError::Missing("scan_time"))?;
        let delta_pv = self.delta_pv.ok_or(MeasurementError::Missing("delta_pv"))?;
        let delta_mv = self.delta_mv.ok_or(MeasurementError::Missing("delta_mv"))?;
        let times = StepTimes {
            t0: self.t0.ok_or(MeasurementError::Missing("t0"))?,
            t25: self.t25.ok_or(MeasurementError::Missing("t25"))?,
            t75: self.t75.ok_or(MeasurementError::Missing("t75"))?,
        };

        if !scan_time.is_finite() || scan_time <= F::zero() {
            return Err(MeasurementError::InvalidScanTime);
        }
        if !delta_pv.is_finite() || delta_pv <= F::zero() {
            return Err(MeasurementError::InvalidPvDelta);
        }
        if !delta_mv.is_finite() || delta_mv == F::zero() {
            return Err(MeasurementError::InvalidMvDelta);
        }
        if !self.hysteresis.is_finite() || self.hysteresis < F::zero() {
            return Err(MeasurementError::InvalidHysteresis);
        }
        if !times.is_ordered() {
            return Err(MeasurementError::UnorderedTimes);
        }

        Ok(StepTestMeasurement::new(
            scan_time,
            delta_pv,
            delta_mv,
            self.hysteresis,
            times,
        ))
    }
}

/// First-order-plus-dead-time parameters estimated from a step test.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProcessDynamics<F: Float> {
    /// `delta_pv / delta_mv`.
    pub process_gain: F,
    /// `0.9 * (t75 - t25)`, in seconds.
    pub time_constant: F,
    /// `(t75 - t0) - 1.4 * time_constant + scan_time`, in seconds.
    pub dead_time: F,
}

impl<F: Float> ProcessDynamics<F> {
    /// Applies the 25%/75% two-point estimate. Malformed inputs yield nonsensical (negative,
    /// infinite or NaN) values rather than an error.
    pub fn from_measurement(measurement: &StepTestMeasurement<F>) -> Self {
        let StepTimes { t0, t25, t75 } = measurement.times;

        let process_gain = measurement.delta_pv / measurement.delta_mv;
        let time_constant = cast::<F>(0.9) * (t75 - t25);
        let dead_time = (t75 - t0) - cast::<F>(1.4) * time_constant + measurement.scan_time;

        Self {
            process_gain,
            time_constant,
            dead_time,
        }
    }

    /// The dimensionless `dead_time / time_constant` ratio the correlations are expressed in.
    pub fn ratio(&self) -> F {
        self.dead_time / self.time_constant
    }
}
