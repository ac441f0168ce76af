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

use approx::assert_relative_eq;
use step_tune::correlation::{ControllerStructure, TuningObjective};
use step_tune::process::{StepTestBuilder, StepTimes};
use step_tune::trace::{self, TraceError};
use step_tune::tuning::compute;

const GAIN: f64 = 2.0;
const TIME_CONSTANT: f64 = 2.0;
const DEAD_TIME: f64 = 0.5;
const STEP_TIME: f64 = 1.0;
const MV_STEP: f64 = 0.5;
const SCAN_TIME: f64 = 0.01;

/// Samples the analytic response of K e^(-θs) / (τs + 1) to a step at `STEP_TIME`.
fn first_order_trace() -> Vec<(f64, f64)> {
    (0..3000)
        .map(|k| {
            let t = k as f64 * SCAN_TIME;
            let elapsed = t - STEP_TIME - DEAD_TIME;
            let pv = if elapsed > 0.0 {
                GAIN * MV_STEP * (1.0 - (-elapsed / TIME_CONSTANT).exp())
            } else {
                0.0
            };
            (t, pv)
        })
        .collect()
}

#[test]
fn test_crossings_of_first_order_response() {
    let reduced = trace::reduce(STEP_TIME, &first_order_trace()).unwrap();

    // y(t) reaches fraction p at t = t0 + θ - τ ln(1 - p)
    let t25 = STEP_TIME + DEAD_TIME + TIME_CONSTANT * (4.0_f64 / 3.0).ln();
    let t75 = STEP_TIME + DEAD_TIME + TIME_CONSTANT * 4.0_f64.ln();

    assert_eq!(reduced.times.t0, STEP_TIME);
    assert_relative_eq!(reduced.times.t25, t25, epsilon = 1e-3);
    assert_relative_eq!(reduced.times.t75, t75, epsilon = 1e-3);
    assert_relative_eq!(reduced.delta_pv, GAIN * MV_STEP, epsilon = 1e-5);
}

/// The two-point estimate recovers the first-order model it was designed for.
#[test]
fn test_first_order_dynamics_are_recovered() {
    let reduced = trace::reduce(STEP_TIME, &first_order_trace()).unwrap();
    let measurement = StepTestBuilder::default()
        .scan_time(SCAN_TIME)
        .delta_pv(reduced.delta_pv)
        .delta_mv(MV_STEP)
        .times(reduced.times)
        .build()
        .unwrap();
    let dynamics = measurement.dynamics();

    assert_relative_eq!(dynamics.process_gain, GAIN, max_relative = 1e-4);
    assert_relative_eq!(dynamics.time_constant, TIME_CONSTANT, max_relative = 0.02);
    assert_relative_eq!(dynamics.dead_time, DEAD_TIME, epsilon = 0.03);

    let result = compute(
        TuningObjective::LoadChange,
        ControllerStructure::PID,
        &measurement,
    );
    assert!(result.is_ok());
}

#[test]
fn test_falling_response() {
    let samples: Vec<(f64, f64)> = first_order_trace()
        .into_iter()
        .map(|(t, pv)| (t, 10.0 - pv))
        .collect();
    let rising = trace::reduce(STEP_TIME, &first_order_trace()).unwrap();
    let falling = trace::reduce(STEP_TIME, &samples).unwrap();

    assert_relative_eq!(falling.times.t25, rising.times.t25, epsilon = 1e-9);
    assert_relative_eq!(falling.times.t75, rising.times.t75, epsilon = 1e-9);
    assert_relative_eq!(falling.delta_pv, rising.delta_pv, epsilon = 1e-9);
}

#[test]
fn test_baseline_before_trace_start() {
    // Step recorded before the first sample: the first sample is the baseline
    let samples = [(1.0, 0.0), (2.0, 0.5), (3.0, 1.0)];
    let reduced = trace::reduce(0.0, &samples).unwrap();

    assert_eq!(reduced.times.t0, 0.0);
    assert_eq!(reduced.times.t25, 1.5);
    assert_eq!(reduced.times.t75, 2.5);
}

#[test]
fn test_unusable_traces() {
    assert_eq!(
        trace::reduce(0.0, &[(0.0, 1.0)]),
        Err(TraceError::TooFewSamples)
    );
    assert_eq!(
        trace::reduce(0.0, &[(0.0, 0.0), (2.0, 1.0), (1.0, 1.0)]),
        Err(TraceError::UnsortedTimestamps)
    );
    assert_eq!(
        trace::reduce(0.0, &[(0.0, 0.0), (f64::NAN, 1.0)]),
        Err(TraceError::UnsortedTimestamps)
    );
    assert_eq!(
        trace::reduce(f64::NAN, &[(0.0, 0.0), (1.0, 1.0)]),
        Err(TraceError::InvalidStepTime)
    );
    assert_eq!(
        trace::reduce(f64::INFINITY, &[(0.0, 0.0), (1.0, 1.0)]),
        Err(TraceError::InvalidStepTime)
    );
    assert_eq!(
        trace::reduce(0.0, &[(0.0, 1.0), (1.0, 2.0), (2.0, 1.0)]),
        Err(TraceError::NoResponse)
    );
    assert_eq!(
        trace::reduce(0.0, &[(0.0, 0.0), (1.0, f64::NAN), (2.0, 1.0)]),
        Err(TraceError::NoResponse)
    );
}

#[test]
fn test_levels_reached_before_step_are_ignored() {
    // The PV passes through both levels before the step, then settles at its final value
    let samples = [(0.0, 0.9), (1.0, 0.0), (2.0, 0.1), (3.0, 0.2)];
    assert_eq!(
        trace::reduce(1.0, &samples).map(|r| r.times),
        Ok(StepTimes::new(1.0, 1.5, 2.5))
    );
}

#[test]
fn test_first_crossing_wins_on_overshoot() {
    let samples = [(0.0, 0.0), (1.0, 0.0), (2.0, 2.0), (3.0, 1.0)];
    let reduced = trace::reduce(1.0, &samples).unwrap();

    assert_eq!(reduced.times.t25, 1.125);
    assert_eq!(reduced.times.t75, 1.375);
    assert_eq!(reduced.delta_pv, 1.0);
}

#[cfg(feature = "std")]
#[test]
fn test_error_message() {
    assert_eq!(
        TraceError::InvalidStepTime.to_string(),
        "step time must be finite"
    );
    assert_eq!(
        TraceError::NoResponse.to_string(),
        "process variable shows no usable change"
    );
}
