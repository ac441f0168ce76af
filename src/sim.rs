use std::vec::Vec;

use nalgebra as na;

/// A lag process driven through a pure transport delay.
pub trait LagProcess {
    /// Internal state of the lag dynamics.
    type State: Copy;

    /// State at rest, with zero output.
    fn initial_state(&self) -> Self::State;

    /// Advances the state by `dt` seconds with `input` held constant.
    fn advance(&self, state: Self::State, input: f64, dt: f64) -> Self::State;

    /// Process variable for a state.
    fn output(&self, state: &Self::State) -> f64;

    /// Transport delay in seconds.
    fn dead_time(&self) -> f64;
}

/// First-order lag plus dead time: τy' + y = K·u(t - θ).
pub struct FirstOrderDeadTime {
    pub gain: f64,
    pub time_constant: f64,
    pub dead_time: f64,
}

impl LagProcess for FirstOrderDeadTime {
    type State = f64;

    fn initial_state(&self) -> f64 {
        0.0
    }

    /// Exact zero-order-hold discretization.
    fn advance(&self, state: f64, input: f64, dt: f64) -> f64 {
        let decay = (-dt / self.time_constant).exp();
        decay * state + (1.0 - decay) * self.gain * input
    }

    fn output(&self, state: &f64) -> f64 {
        *state
    }

    fn dead_time(&self) -> f64 {
        self.dead_time
    }
}

/// Two first-order lags in series plus dead time.
pub struct TwoLagDeadTime {
    pub gain: f64,
    pub lag_1: f64,
    pub lag_2: f64,
    pub dead_time: f64,
}

impl TwoLagDeadTime {
    /// Implements the state-space realization of the two-lag process:
    /// ┌     ┐   ┌              ┐┌    ┐   ┌      ┐
    /// │ x₁' │ = │ -1/τ₁   0    ││ x₁ │ + │ K/τ₁ │ u
    /// │ x₂' │   │  1/τ₂  -1/τ₂ ││ x₂ │   │ 0    │
    /// └     ┘   └              ┘└    ┘   └      ┘
    ///     ┌      ┐┌    ┐
    /// y = │ 0  1 ││ x₁ │
    ///     └      ┘│ x₂ │
    ///             └    ┘
    pub fn f(&self, x: na::Vector2<f64>, u: f64) -> na::Vector2<f64> {
        let mat_a = na::Matrix2::new(
            -1.0 / self.lag_1,
            0.0,
            1.0 / self.lag_2,
            -1.0 / self.lag_2,
        );
        let mat_b = na::Vector2::new(self.gain / self.lag_1, 0.0);

        mat_a * x + mat_b * u
    }

    pub fn h(&self, x: na::Vector2<f64>) -> f64 {
        x[1]
    }
}

impl LagProcess for TwoLagDeadTime {
    type State = na::Vector2<f64>;

    fn initial_state(&self) -> Self::State {
        na::Vector2::zeros()
    }

    fn advance(&self, state: Self::State, input: f64, dt: f64) -> Self::State {
        rk4_step(|x| self.f(x, input), state, dt)
    }

    fn output(&self, state: &Self::State) -> f64 {
        self.h(*state)
    }

    fn dead_time(&self) -> f64 {
        self.dead_time
    }
}

/// One classical Runge-Kutta step of x' = f(x).
pub fn rk4_step<Func>(f: Func, x: na::Vector2<f64>, dt: f64) -> na::Vector2<f64>
where
    Func: Fn(na::Vector2<f64>) -> na::Vector2<f64>,
{
    let k1 = f(x);
    let k2 = f(x + k1 * (0.5 * dt));
    let k3 = f(x + k2 * (0.5 * dt));
    let k4 = f(x + k3 * dt);
    x + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
}

/// An open-loop step test: the MV jumps from zero to `mv_step` at `step_time` and the PV is
/// sampled every `scan_time` seconds for `duration` seconds.
pub struct StepTest {
    pub step_time: f64,
    pub mv_step: f64,
    pub scan_time: f64,
    pub duration: f64,
}

impl StepTest {
    /// Manipulated variable at time `t`.
    pub fn input(&self, t: f64) -> f64 {
        if t >= self.step_time {
            self.mv_step
        } else {
            0.0
        }
    }

    /// Runs the test against `process` and returns the `(time, pv)` samples.
    pub fn record<P: LagProcess>(&self, process: &P) -> Vec<(f64, f64)> {
        let steps = (self.duration / self.scan_time).round() as usize;
        let mut state = process.initial_state();
        let mut samples = Vec::with_capacity(steps + 1);

        for k in 0..=steps {
            let t = k as f64 * self.scan_time;
            samples.push((t, process.output(&state)));
            let delayed_input = self.input(t - process.dead_time());
            state = process.advance(state, delayed_input, self.scan_time);
        }
        samples
    }
}
