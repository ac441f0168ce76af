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

use fixtures::test_tuning::reference_measurement;

use step_tune::correlation::{ControllerStructure, TuningObjective};
use step_tune::report::TuningReport;
use step_tune::tuning::compute;

#[test]
fn test_pid_report_layout() {
    let measurement = reference_measurement();
    let result = compute(
        TuningObjective::SetpointChange,
        ControllerStructure::PID,
        &measurement,
    )
    .unwrap();
    let dynamics = result.dynamics();
    let standard = result.standard();
    let rockwell = result.rockwell();

    let expected = format!(
        "PID tuning for setpoint change\n\
         \n\
         CALCULATION PARAMETERS\n\
         ==================\n\
         Process Gain: {}\n\
         Time Constant: {}\n\
         Dead Time: {}\n\
         Hysteresis: 0.0447\n\
         \n\
         Standard PID Units\n\
         ==================\n\
         P: {}\n\
         I: {} sec/repeat\n\
         D: {} sec\n\
         \n\
         Rockwell PID Units\n\
         ==================\n\
         P: {}\n\
         I: {} min/repeat\n\
         D: {} min\n",
        dynamics.process_gain,
        dynamics.time_constant,
        dynamics.dead_time,
        standard.p_gain,
        standard.i_gain,
        standard.d_gain,
        rockwell.p_gain,
        rockwell.i_gain,
        rockwell.d_gain,
    );

    assert_eq!(TuningReport::new(&measurement, &result).to_string(), expected);
}

#[test]
fn test_report_omits_inactive_terms() {
    let measurement = reference_measurement();

    let pi = compute(
        TuningObjective::LoadChange,
        ControllerStructure::PI,
        &measurement,
    )
    .unwrap();
    let text = TuningReport::new(&measurement, &pi).to_string();
    assert!(text.starts_with("PI tuning for load change\n"));
    assert!(text.contains("sec/repeat"));
    assert!(!text.contains("D: "));

    let p = compute(
        TuningObjective::LoadChange,
        ControllerStructure::P,
        &measurement,
    )
    .unwrap();
    let text = TuningReport::new(&measurement, &p).to_string();
    assert_eq!(text.matches("P: ").count(), 2);
    assert!(!text.contains("I: "));
    assert!(!text.contains("D: "));
}
