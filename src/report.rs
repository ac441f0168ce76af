// Text rendering of tuning results
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

use crate::process::StepTestMeasurement;
use crate::tuning::{GainUnits, TuningResult};

const RULE: &str = "==================";

/// Renders a measurement and its tuning result as a plain-text report.
///
/// The report lists the calculation parameters, then the gains in standard and in Rockwell
/// units. Terms the controller structure lacks are left out.
pub struct TuningReport<'a, F: Float> {
    measurement: &'a StepTestMeasurement<F>,
    result: &'a TuningResult<F>,
}

impl<'a, F: Float> TuningReport<'a, F> {
    /// Pairs a result with the measurement it was computed from.
    pub fn new(measurement: &'a StepTestMeasurement<F>, result: &'a TuningResult<F>) -> Self {
        Self {
            measurement,
            result,
        }
    }

    fn write_gains(&self, f: &mut fmt::Formatter<'_>, units: GainUnits) -> fmt::Result
    where
        F: fmt::Display,
    {
        let gains = self.result.gains(units);
        let structure = self.result.structure();

        writeln!(f, "P: {}", gains.p_gain)?;
        if structure.has_integral() {
            writeln!(f, "I: {} {}", gains.i_gain, units.integral_unit())?;
        }
        if structure.has_derivative() {
            writeln!(f, "D: {} {}", gains.d_gain, units.derivative_unit())?;
        }
        Ok(())
    }
}

impl<F: Float + fmt::Display> fmt::Display for TuningReport<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dynamics = self.result.dynamics();

        writeln!(
            f,
            "{} tuning for {}",
            self.result.structure(),
            self.result.objective()
        )?;
        writeln!(f)?;
        writeln!(f, "CALCULATION PARAMETERS")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Process Gain: {}", dynamics.process_gain)?;
        writeln!(f, "Time Constant: {}", dynamics.time_constant)?;
        writeln!(f, "Dead Time: {}", dynamics.dead_time)?;
        writeln!(f, "Hysteresis: {}", self.measurement.hysteresis)?;

        writeln!(f)?;
        writeln!(f, "Standard PID Units")?;
        writeln!(f, "{RULE}")?;
        self.write_gains(f, GainUnits::Standard)?;

        writeln!(f)?;
        writeln!(f, "Rockwell PID Units")?;
        writeln!(f, "{RULE}")?;
        self.write_gains(f, GainUnits::Rockwell)
    }
}
