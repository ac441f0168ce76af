// Reduces a sampled step response to the timestamps the tuning rules need
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
use crate::process::StepTimes;

/// Timestamps and PV change extracted from a step-response trace.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ReducedStep<F: Float> {
    /// Step time and the 25%/75% crossing times.
    pub times: StepTimes<F>,
    /// Magnitude of the total PV change.
    pub delta_pv: F,
}

/// Errors raised while reducing a trace.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum TraceError {
    /// At least two samples are needed.
    #[cfg_attr(feature = "std", error("trace needs at least two samples"))]
    TooFewSamples,

    /// The step time is not finite.
    #[cfg_attr(feature = "std", error("step time must be finite"))]
    InvalidStepTime,

    /// Sample times must be finite and strictly increasing.
    #[cfg_attr(feature = "std", error("sample times must be finite and strictly increasing"))]
    UnsortedTimestamps,

    /// The PV ends where it started, or its samples are not finite.
    #[cfg_attr(feature = "std", error("process variable shows no usable change"))]
    NoResponse,
}

/// Reduces `(time, pv)` samples of an open-loop step test.
///
/// The baseline is the last sample at or before `step_time` (the first sample if the trace starts
/// later) and the final value is the last sample. Crossing times are interpolated linearly
/// between the two samples that straddle each level. The response is not checked for
/// monotonicity; the first crossing after the step wins.
pub fn reduce<F: Float>(step_time: F, samples: &[(F, F)]) -> Result<ReducedStep<F>, TraceError> {
    if samples.len() < 2 {
        return Err(TraceError::TooFewSamples);
    }
    if !step_time.is_finite() {
        return Err(TraceError::InvalidStepTime);
    }
    if samples.iter().any(|(t, _)| !t.is_finite())
        || samples.windows(2).any(|w| w[1].0 <= w[0].0)
    {
        return Err(TraceError::UnsortedTimestamps);
    }
    if samples.iter().any(|(_, pv)| !pv.is_finite()) {
        return Err(TraceError::NoResponse);
    }

    let start = samples
        .iter()
        .rposition(|(t, _)| *t <= step_time)
        .unwrap_or(0);
    let baseline = samples[start].1;
    let change = samples[samples.len() - 1].1 - baseline;
    if change == F::zero() {
        return Err(TraceError::NoResponse);
    }

    let after_step = &samples[start..];
    // The trace runs from zero to full progress, so both levels are crossed unless the
    // normalized response is not finite.
    let t25 = crossing(after_step, baseline, change, 25).ok_or(TraceError::NoResponse)?;
    let t75 = crossing(after_step, baseline, change, 75).ok_or(TraceError::NoResponse)?;
    log::debug!(
        "step at {:?}: 25% crossing at {:?}, 75% crossing at {:?}",
        step_time.to_f64(),
        t25.to_f64(),
        t75.to_f64()
    );

    Ok(ReducedStep {
        times: StepTimes::new(step_time, t25, t75),
        delta_pv: change.abs(),
    })
}

// First time the normalized response reaches `percent`, interpolated between samples.
fn crossing<F: Float>(
    samples: &[(F, F)],
    baseline: F,
    change: F,
    percent: u8,
) -> Option<F> {
    let level = cast::<F>(f64::from(percent) / 100.0);
    let progress = |pv: F| (pv - baseline) / change;

    for pair in samples.windows(2) {
        let (t_prev, pv_prev) = pair[0];
        let (t_next, pv_next) = pair[1];
        let (p_prev, p_next) = (progress(pv_prev), progress(pv_next));
        if p_prev < level && p_next >= level {
            let fraction = (level - p_prev) / (p_next - p_prev);
            return Some(t_prev + fraction * (t_next - t_prev));
        }
    }

    log::trace!("no {}% crossing in {} samples", percent, samples.len());
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossing_interpolates_between_samples() {
        let samples = [(0.0, 0.0), (1.0, 0.0), (2.0, 1.0)];
        assert_eq!(crossing(&samples, 0.0, 1.0, 25), Some(1.25));
        assert_eq!(crossing(&samples, 0.0, 1.0, 75), Some(1.75));
    }

    #[test]
    fn test_crossing_handles_falling_response() {
        let samples = [(0.0, 4.0), (1.0, 2.0), (2.0, 0.0)];
        assert_eq!(crossing(&samples, 4.0, -4.0, 25), Some(0.5));
    }

    #[test]
    fn test_crossing_reports_missing_level() {
        let samples = [(0.0, 0.0), (1.0, 0.5)];
        assert_eq!(crossing(&samples, 0.0, 1.0, 75), None);
    }
}
