// Gain computation from step-test dynamics and correlation coefficients
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

use core::fmt;

use num_traits::Float;

use crate::correlation::{self, cast, ControllerStructure, Correlation, TuningObjective};
use crate::process::{ProcessDynamics, StepTestMeasurement};

/// One of the three controller terms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GainTerm {
    /// Proportional gain.
    Proportional,
    /// Integral time.
    Integral,
    /// Derivative time.
    Derivative,
}

impl fmt::Display for GainTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GainTerm::Proportional => f.write_str("proportional"),
            GainTerm::Integral => f.write_str("integral"),
            GainTerm::Derivative => f.write_str("derivative"),
        }
    }
}

/// Why a set of process dynamics cannot be turned into gains.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DynamicsFault {
    /// `delta_pv / delta_mv` is zero.
    ZeroProcessGain,
    /// `delta_pv / delta_mv` is infinite or NaN, usually from a zero MV step.
    NonFiniteProcessGain,
    /// `t25 == t75`, so the dead-time ratio divides by zero.
    ZeroTimeConstant,
    /// The dead-time ratio is infinite or NaN.
    UndefinedRatio,
    /// A negative ratio raised to a non-integral exponent has no real value.
    NonRealPower {
        /// Term whose exponent was applied.
        term: GainTerm,
    },
    /// The integral formula's denominator is zero. The tabulated integral exponents are all
    /// negative, so this guards coefficient pairs with a zero multiplier.
    ZeroDenominator {
        /// Term whose denominator vanished.
        term: GainTerm,
    },
    /// The gain came out infinite or NaN.
    NonFiniteGain {
        /// Offending term.
        term: GainTerm,
    },
}

impl fmt::Display for DynamicsFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamicsFault::ZeroProcessGain => f.write_str("process gain is zero"),
            DynamicsFault::NonFiniteProcessGain => f.write_str("process gain is not finite"),
            DynamicsFault::ZeroTimeConstant => f.write_str("time constant is zero"),
            DynamicsFault::UndefinedRatio => {
                f.write_str("dead time to time constant ratio is not finite")
            }
            DynamicsFault::NonRealPower { term } => write!(
                f,
                "{term} term raises a negative dead time ratio to a fractional power"
            ),
            DynamicsFault::ZeroDenominator { term } => {
                write!(f, "{term} term divides by zero")
            }
            DynamicsFault::NonFiniteGain { term } => write!(f, "{term} gain is not finite"),
        }
    }
}

/// Errors returned by [`compute`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum TuningError {
    /// No correlation is defined for the requested objective and structure.
    #[cfg_attr(
        feature = "std",
        error("cannot tune a {structure} loop for {objective}: no correlation is defined")
    )]
    UnsupportedConfiguration {
        /// Requested objective.
        objective: TuningObjective,
        /// Requested structure.
        structure: ControllerStructure,
    },

    /// The derived dynamics make a gain formula undefined.
    #[cfg_attr(feature = "std", error("invalid process dynamics: {reason}"))]
    InvalidDynamics {
        /// What went wrong.
        reason: DynamicsFault,
    },
}

impl From<DynamicsFault> for TuningError {
    fn from(reason: DynamicsFault) -> Self {
        TuningError::InvalidDynamics { reason }
    }
}

/// Unit convention for the integral and derivative times.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GainUnits {
    /// Seconds per repeat and seconds.
    Standard,
    /// Minutes per repeat and minutes, as Rockwell controllers expect.
    Rockwell,
}

impl GainUnits {
    /// Label of the integral time unit.
    pub fn integral_unit(&self) -> &'static str {
        match self {
            GainUnits::Standard => "sec/repeat",
            GainUnits::Rockwell => "min/repeat",
        }
    }

    /// Label of the derivative time unit.
    pub fn derivative_unit(&self) -> &'static str {
        match self {
            GainUnits::Standard => "sec",
            GainUnits::Rockwell => "min",
        }
    }
}

/// Proportional gain, integral time and derivative time. Terms the controller structure does
/// not have are zero.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PidGains<F: Float> {
    /// Proportional gain.
    pub p_gain: F,
    /// Integral time.
    pub i_gain: F,
    /// Derivative time.
    pub d_gain: F,
}

impl<F: Float> PidGains<F> {
    /// Converts standard-unit gains to Rockwell units (times from seconds to minutes).
    pub fn to_rockwell(&self) -> Self {
        let seconds_per_minute = cast::<F>(60.0);
        Self {
            p_gain: self.p_gain,
            i_gain: self.i_gain / seconds_per_minute,
            d_gain: self.d_gain / seconds_per_minute,
        }
    }
}

/// Outcome of a successful tuning computation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TuningResult<F: Float> {
    objective: TuningObjective,
    structure: ControllerStructure,
    dynamics: ProcessDynamics<F>,
    standard: PidGains<F>,
}

impl<F: Float> TuningResult<F> {
    /// Returns the objective the gains were tuned for.
    pub fn objective(&self) -> TuningObjective {
        self.objective
    }

    /// Returns the controller structure the gains were tuned for.
    pub fn structure(&self) -> ControllerStructure {
        self.structure
    }

    /// Returns the process dynamics the gains were computed from.
    pub fn dynamics(&self) -> &ProcessDynamics<F> {
        &self.dynamics
    }

    /// Returns the gains in standard units.
    pub fn standard(&self) -> PidGains<F> {
        self.standard
    }

    /// Returns the gains in Rockwell units.
    pub fn rockwell(&self) -> PidGains<F> {
        self.standard.to_rockwell()
    }

    /// Returns the gains in the requested units.
    pub fn gains(&self, units: GainUnits) -> PidGains<F> {
        match units {
            GainUnits::Standard => self.standard(),
            GainUnits::Rockwell => self.rockwell(),
        }
    }
}

/// Computes controller gains for a step test.
///
/// The computation is pure. It either populates every term the structure has or fails:
/// - [`TuningError::UnsupportedConfiguration`] if the correlation table has no coefficients for
///   `(objective, structure)`. This is checked before the measurement is looked at.
/// - [`TuningError::InvalidDynamics`] if the derived dynamics make any formula undefined or any
///   gain non-finite.
pub fn compute<F: Float>(
    objective: TuningObjective,
    structure: ControllerStructure,
    measurement: &StepTestMeasurement<F>,
) -> Result<TuningResult<F>, TuningError> {
    let dynamics = ProcessDynamics::from_measurement(measurement);

    let terms =
        correlation::lookup(objective, structure).ok_or(TuningError::UnsupportedConfiguration {
            objective,
            structure,
        })?;

    if dynamics.process_gain == F::zero() {
        return Err(DynamicsFault::ZeroProcessGain.into());
    }
    if !dynamics.process_gain.is_finite() {
        return Err(DynamicsFault::NonFiniteProcessGain.into());
    }
    if dynamics.time_constant == F::zero() {
        return Err(DynamicsFault::ZeroTimeConstant.into());
    }

    let ratio = dynamics.ratio();
    if !ratio.is_finite() {
        return Err(DynamicsFault::UndefinedRatio.into());
    }

    let mut gains = PidGains {
        p_gain: F::zero(),
        i_gain: F::zero(),
        d_gain: F::zero(),
    };

    let proportional = terms.proportional;
    gains.p_gain = finite(
        proportional.a::<F>() * power(ratio, &proportional, GainTerm::Proportional)?
            / dynamics.process_gain,
        GainTerm::Proportional,
    )?;

    if let Some(integral) = terms.integral {
        gains.i_gain = integral_time(ratio, &integral, dynamics.time_constant)?;
    }

    if let Some(derivative) = terms.derivative {
        gains.d_gain = finite(
            derivative.a::<F>()
                * power(ratio, &derivative, GainTerm::Derivative)?
                * dynamics.time_constant,
            GainTerm::Derivative,
        )?;
    }

    Ok(TuningResult {
        objective,
        structure,
        dynamics,
        standard: gains,
    })
}

// ratio^b, refusing results that are not real.
fn power<F: Float>(ratio: F, pair: &Correlation, term: GainTerm) -> Result<F, DynamicsFault> {
    let exponent = pair.b::<F>();
    if ratio < F::zero() && exponent.fract() != F::zero() {
        return Err(DynamicsFault::NonRealPower { term });
    }
    Ok(ratio.powf(exponent))
}

// time_constant / (a * ratio^b)
fn integral_time<F: Float>(
    ratio: F,
    pair: &Correlation,
    time_constant: F,
) -> Result<F, DynamicsFault> {
    let denominator = pair.a::<F>() * power(ratio, pair, GainTerm::Integral)?;
    if denominator == F::zero() {
        return Err(DynamicsFault::ZeroDenominator {
            term: GainTerm::Integral,
        });
    }
    finite(time_constant / denominator, GainTerm::Integral)
}

fn finite<F: Float>(value: F, term: GainTerm) -> Result<F, DynamicsFault> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DynamicsFault::NonFiniteGain { term })
    }
}
