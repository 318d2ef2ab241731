//! Fixed-timestep simulation with variable-rate rendering.
//!
//! The scheduler accumulates real elapsed time and drains it in fixed
//! `time_step` increments, each paid to the simulation callback; whatever
//! fraction remains is handed to the renderer as an interpolation alpha.
//! If the process stalls, several simulation steps run back to back before
//! the next render, so simulated time advances in deterministic increments
//! no matter how real frame times jitter.
//!
//! Everything is single-threaded and cooperative: [`Scheduler::start`]
//! blocks until a callback returns `false` or [`Scheduler::stop`] is called
//! from within one, observed at the top of the next loop iteration.

use std::time::Duration;

use super::clock::{Clock, StdClock};

/// Fixed-step simulation callback: receives accumulated simulated time and
/// the step size. Returning `false` requests a stop.
pub type Simulation<'a> = Box<dyn FnMut(Duration, Duration) -> bool + 'a>;

/// Render callback: receives the sub-step interpolation fraction in
/// `[0, 1)`, meant for motion interpolation between simulated states.
/// Returning `false` requests a stop.
pub type Renderer<'a> = Box<dyn FnMut(f32) -> bool + 'a>;

/// Scheduler lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Not running; `start` may be called.
    Stopped,
    /// A stop was requested; the loop exits at its next top-of-iteration
    /// check.
    Stopping,
    /// The loop is executing.
    Running,
}

/// Scheduler behaviour flags.
#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    /// Sleep 1 ms per loop iteration to cap CPU usage.
    pub preserve_cpu: bool,
}

/// Drives a simulation callback at fixed simulated-time intervals and a
/// render callback once per loop iteration.
pub struct Scheduler<'a, C: Clock = StdClock> {
    state: State,
    time_step: Duration,
    simulation: Simulation<'a>,
    renderer: Renderer<'a>,
    options: Options,
    clock: C,
}

impl<'a> Scheduler<'a, StdClock> {
    /// Creates a scheduler on the real monotonic clock.
    pub fn new(
        time_step: Duration,
        simulation: Simulation<'a>,
        renderer: Renderer<'a>,
        options: Options,
    ) -> Self {
        Self::with_clock(StdClock::new(), time_step, simulation, renderer, options)
    }
}

impl<'a, C: Clock> Scheduler<'a, C> {
    /// Creates a scheduler on an explicit time source.
    pub fn with_clock(
        clock: C,
        time_step: Duration,
        simulation: Simulation<'a>,
        renderer: Renderer<'a>,
        options: Options,
    ) -> Self {
        Scheduler {
            state: State::Stopped,
            time_step,
            simulation,
            renderer,
            options,
            clock,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Runs the loop until stopped. Returns `false` without running if the
    /// scheduler is not in the `Stopped` state; `true` once a completed run
    /// has wound down to `Stopped` again.
    pub fn start(&mut self) -> bool {
        if self.state != State::Stopped {
            return false;
        }
        self.state = State::Running;

        let mut time_sim = Duration::ZERO;
        let mut time_prev = self.clock.now();
        let mut dur_acc = Duration::ZERO;

        while self.state == State::Running {
            let time_now = self.clock.now();
            dur_acc += time_now.saturating_sub(time_prev);
            time_prev = time_now;

            while dur_acc >= self.time_step {
                if !(self.simulation)(time_sim, self.time_step) {
                    self.stop();
                }
                time_sim += self.time_step;
                dur_acc -= self.time_step;
            }

            let alpha = dur_acc.as_secs_f32() / self.time_step.as_secs_f32();
            if !(self.renderer)(alpha) {
                self.stop();
            }

            if self.options.preserve_cpu {
                self.clock.sleep(Duration::from_millis(1));
            }
        }
        self.state = State::Stopped;
        true
    }

    /// Requests a cooperative stop. Takes effect at the loop's next
    /// top-of-iteration check; a no-op unless running.
    pub fn stop(&mut self) {
        if self.state == State::Running {
            self.state = State::Stopping;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// A scripted clock: `now` replays a fixed sequence of readings and
    /// holds the last one forever; `sleep` is a no-op so tests never block.
    struct ManualClock {
        times: Vec<Duration>,
        index: usize,
    }

    impl ManualClock {
        fn new(times_ms: &[u64]) -> Self {
            ManualClock {
                times: times_ms.iter().map(|&ms| Duration::from_millis(ms)).collect(),
                index: 0,
            }
        }
    }

    impl Clock for ManualClock {
        fn now(&mut self) -> Duration {
            let t = self.times[self.index.min(self.times.len() - 1)];
            self.index += 1;
            t
        }

        fn sleep(&mut self, _duration: Duration) {}
    }

    #[test]
    fn fixed_step_law() {
        // 105 ms arrive in one burst at a 10 ms step: exactly 10 simulation
        // steps run, sim time advances 10 ms per call, and the leftover
        // 5 ms render as alpha 0.5.
        let sim_times = RefCell::new(Vec::new());
        let alphas = RefCell::new(Vec::new());

        let mut scheduler = Scheduler::with_clock(
            ManualClock::new(&[0, 105]),
            Duration::from_millis(10),
            Box::new(|time, step| {
                assert_eq!(step, Duration::from_millis(10));
                sim_times.borrow_mut().push(time);
                true
            }),
            Box::new(|alpha| {
                alphas.borrow_mut().push(alpha);
                false
            }),
            Options::default(),
        );

        assert!(scheduler.start());
        assert_eq!(scheduler.state(), State::Stopped);
        // The boxed callbacks borrow the cells until the scheduler dies.
        drop(scheduler);

        let sim_times = sim_times.into_inner();
        assert_eq!(sim_times.len(), 10);
        for (i, &t) in sim_times.iter().enumerate() {
            assert_eq!(t, Duration::from_millis(10 * i as u64));
        }
        let alphas = alphas.into_inner();
        assert_eq!(alphas.len(), 1);
        assert!((alphas[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn simulation_false_stops_after_one_render() {
        let sims = RefCell::new(0);
        let renders_after_stop = RefCell::new(0);

        let mut scheduler = Scheduler::with_clock(
            ManualClock::new(&[0, 10, 20, 30, 40, 50, 60]),
            Duration::from_millis(10),
            Box::new(|_, _| {
                *sims.borrow_mut() += 1;
                *sims.borrow() < 3
            }),
            Box::new(|_| {
                if *sims.borrow() >= 3 {
                    *renders_after_stop.borrow_mut() += 1;
                }
                true
            }),
            Options::default(),
        );

        assert!(scheduler.start());
        assert_eq!(scheduler.state(), State::Stopped);
        assert_eq!(*sims.borrow(), 3);
        assert_eq!(*renders_after_stop.borrow(), 1);
    }

    #[test]
    fn stall_runs_catch_up_batch_before_render() {
        // One 50 ms stall at a 10 ms step: five back-to-back simulation
        // steps run before the single render.
        let sims_at_render = RefCell::new(Vec::new());
        let sims = RefCell::new(0);

        let mut scheduler = Scheduler::with_clock(
            ManualClock::new(&[0, 50]),
            Duration::from_millis(10),
            Box::new(|_, _| {
                *sims.borrow_mut() += 1;
                true
            }),
            Box::new(|_| {
                sims_at_render.borrow_mut().push(*sims.borrow());
                false
            }),
            Options::default(),
        );

        assert!(scheduler.start());
        drop(scheduler);
        assert_eq!(sims_at_render.into_inner(), vec![5]);
    }

    #[test]
    fn start_rejects_non_stopped_state() {
        let mut scheduler = Scheduler::with_clock(
            ManualClock::new(&[0, 5]),
            Duration::from_millis(10),
            Box::new(|_, _| true),
            Box::new(|_| false),
            Options::default(),
        );

        assert!(scheduler.start());
        // Running a second time from Stopped is fine.
        assert!(scheduler.start());
    }

    #[test]
    fn preserve_cpu_terminates_with_scripted_sleep() {
        let mut scheduler = Scheduler::with_clock(
            ManualClock::new(&[0, 5]),
            Duration::from_millis(10),
            Box::new(|_, _| true),
            Box::new(|_| false),
            Options { preserve_cpu: true },
        );
        assert!(scheduler.start());
    }
}
