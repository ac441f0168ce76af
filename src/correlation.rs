// Tuning objectives, controller structures and the correlation coefficient table
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
use core::str::FromStr;

use num_traits::{Float, NumCast};

/// What the tuned loop should respond to best.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TuningObjective {
    /// Reject disturbances entering the process (load changes).
    LoadChange,
    /// Track changes of the setpoint.
    SetpointChange,
}

impl TuningObjective {
    /// Both objectives, in table order.
    pub const ALL: [TuningObjective; 2] = [
        TuningObjective::LoadChange,
        TuningObjective::SetpointChange,
    ];
}

impl fmt::Display for TuningObjective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningObjective::LoadChange => f.write_str("load change"),
            TuningObjective::SetpointChange => f.write_str("setpoint change"),
        }
    }
}

/// Which terms the controller has.
///
/// The populated gain terms nest: `PID` has every term of `PI`, which has every term of `P`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ControllerStructure {
    /// Proportional only.
    P,
    /// Proportional plus integral.
    PI,
    /// Proportional, integral and derivative.
    PID,
}

impl ControllerStructure {
    /// All structures, from the fewest terms to the most.
    pub const ALL: [ControllerStructure; 3] = [
        ControllerStructure::P,
        ControllerStructure::PI,
        ControllerStructure::PID,
    ];

    /// Number of gain terms, and thus of correlation pairs, this structure needs.
    pub fn term_count(&self) -> usize {
        match self {
            ControllerStructure::P => 1,
            ControllerStructure::PI => 2,
            ControllerStructure::PID => 3,
        }
    }

    /// Returns true if the structure has an integral term.
    pub fn has_integral(&self) -> bool {
        self.term_count() >= 2
    }

    /// Returns true if the structure has a derivative term.
    pub fn has_derivative(&self) -> bool {
        self.term_count() >= 3
    }
}

impl fmt::Display for ControllerStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerStructure::P => f.write_str("P"),
            ControllerStructure::PI => f.write_str("PI"),
            ControllerStructure::PID => f.write_str("PID"),
        }
    }
}

/// Error returned when a selector string names no known objective or structure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum ParseSelectorError {
    /// Expected `load_change` or `setpoint_change`.
    #[cfg_attr(
        feature = "std",
        error("unknown tuning objective, expected `load_change` or `setpoint_change`")
    )]
    UnknownObjective,

    /// Expected `P`, `PI` or `PID`.
    #[cfg_attr(
        feature = "std",
        error("unknown controller structure, expected `P`, `PI` or `PID`")
    )]
    UnknownStructure,
}

impl FromStr for TuningObjective {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("load_change") || s.eq_ignore_ascii_case("load") {
            Ok(TuningObjective::LoadChange)
        } else if s.eq_ignore_ascii_case("setpoint_change") || s.eq_ignore_ascii_case("setpoint")
        {
            Ok(TuningObjective::SetpointChange)
        } else {
            Err(ParseSelectorError::UnknownObjective)
        }
    }
}

impl FromStr for ControllerStructure {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ControllerStructure::ALL
            .iter()
            .copied()
            .find(|structure| {
                let name = match structure {
                    ControllerStructure::P => "P",
                    ControllerStructure::PI => "PI",
                    ControllerStructure::PID => "PID",
                };
                s.trim().eq_ignore_ascii_case(name)
            })
            .ok_or(ParseSelectorError::UnknownStructure)
    }
}

/// One empirical `(a, b)` pair; the gain term it belongs to scales `a * ratio^b`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Correlation {
    /// Multiplier.
    pub a: f64,
    /// Exponent applied to the dead-time to time-constant ratio.
    pub b: f64,
}

impl Correlation {
    /// Creates a coefficient pair.
    pub const fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// The multiplier converted to the caller's float type.
    pub fn a<F: Float>(&self) -> F {
        cast(self.a)
    }

    /// The exponent converted to the caller's float type.
    pub fn b<F: Float>(&self) -> F {
        cast(self.b)
    }
}

/// Converts a table constant; yields NaN if the target type cannot hold it, which the gain
/// formulas then reject as non-finite.
pub(crate) fn cast<F: Float>(x: f64) -> F {
    <F as NumCast>::from(x).unwrap_or_else(F::nan)
}

const LOAD_CHANGE_P: &[Correlation] = &[Correlation::new(0.902, -0.985)];

const LOAD_CHANGE_PI: &[Correlation] = &[
    Correlation::new(0.984, -0.986),
    Correlation::new(0.608, -0.707),
];

const LOAD_CHANGE_PID: &[Correlation] = &[
    Correlation::new(1.435, -0.921),
    Correlation::new(0.8787, -0.749),
    Correlation::new(0.482, 1.137),
];

// No setpoint-change correlation exists for proportional-only control.
const SETPOINT_CHANGE_P: &[Correlation] = &[];

const SETPOINT_CHANGE_PI: &[Correlation] = &[
    Correlation::new(0.758, -0.861),
    // Recorded as `01020` in the table this was transcribed from. Verify against the published
    // correlation before relying on setpoint-change PI integral times.
    Correlation::new(1.020, -0.323),
];

const SETPOINT_CHANGE_PID: &[Correlation] = &[
    Correlation::new(1.086, -0.869),
    Correlation::new(0.740, -0.130),
    Correlation::new(0.348, 0.914),
];

/// Returns the raw table row for a configuration: one pair per gain term, in P, I, D order.
///
/// The row may hold fewer pairs than `structure` needs; use [`lookup`] to get a checked view.
pub fn coefficients(
    objective: TuningObjective,
    structure: ControllerStructure,
) -> &'static [Correlation] {
    match (objective, structure) {
        (TuningObjective::LoadChange, ControllerStructure::P) => LOAD_CHANGE_P,
        (TuningObjective::LoadChange, ControllerStructure::PI) => LOAD_CHANGE_PI,
        (TuningObjective::LoadChange, ControllerStructure::PID) => LOAD_CHANGE_PID,
        (TuningObjective::SetpointChange, ControllerStructure::P) => SETPOINT_CHANGE_P,
        (TuningObjective::SetpointChange, ControllerStructure::PI) => SETPOINT_CHANGE_PI,
        (TuningObjective::SetpointChange, ControllerStructure::PID) => SETPOINT_CHANGE_PID,
    }
}

/// The coefficient pairs of every active term of one configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TermCoefficients {
    /// Proportional pair, always present.
    pub proportional: Correlation,
    /// Integral pair, present for `PI` and `PID`.
    pub integral: Option<Correlation>,
    /// Derivative pair, present for `PID` only.
    pub derivative: Option<Correlation>,
}

/// Looks up the coefficients of a configuration.
///
/// Returns `None` if the table row holds fewer pairs than the structure needs, which is the case
/// for `(SetpointChange, P)`.
pub fn lookup(
    objective: TuningObjective,
    structure: ControllerStructure,
) -> Option<TermCoefficients> {
    let row = coefficients(objective, structure);
    if row.len() < structure.term_count() {
        return None;
    }

    Some(TermCoefficients {
        proportional: row[0],
        integral: structure.has_integral().then(|| row[1]),
        derivative: structure.has_derivative().then(|| row[2]),
    })
}
