//! Tick scheduling
//!
//! Portable tick pacing without async/await or platform-specific timers.
//! The caller sleeps between ticks for the returned duration.

use embassy_time::{Duration, Instant};
use rand_core::RngCore;

use crate::OutputSink;
use crate::bank::PatternBank;
use crate::control::ControlReceiver;

/// Default tick rate (16 Hz).
pub const DEFAULT_TICK_HZ: u64 = 16;

/// Default tick duration based on the tick rate.
pub const DEFAULT_TICK_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_TICK_HZ);

/// Result of a tick.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (zero if behind schedule).
    pub sleep_duration: Duration,
    /// Number of control intents applied before this tick.
    pub applied_intents: usize,
}

/// Drives a [`PatternBank`] at a fixed cadence.
///
/// Each tick applies the queued control intents, evaluates the bank and
/// forwards the updated levels to the output sink.
///
/// # Usage
///
/// ```ignore
/// static CONTROLS: ControlChannel<16> = ControlChannel::new();
///
/// let bank = PatternBank::<_, 9>::new(9, rng);
/// let mut scheduler = TickScheduler::new(bank, pwm, CONTROLS.receiver());
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct TickScheduler<'a, O, R, const MAX_LEDS: usize, const CONTROL_SIZE: usize>
where
    O: OutputSink,
    R: RngCore,
{
    output: O,
    bank: PatternBank<R, MAX_LEDS>,
    controls: ControlReceiver<'a, CONTROL_SIZE>,
    next_tick: Instant,
    tick_duration: Duration,
}

impl<'a, O, R, const MAX_LEDS: usize, const CONTROL_SIZE: usize>
    TickScheduler<'a, O, R, MAX_LEDS, CONTROL_SIZE>
where
    O: OutputSink,
    R: RngCore,
{
    /// Create a scheduler ticking at [`DEFAULT_TICK_HZ`].
    pub fn new(
        bank: PatternBank<R, MAX_LEDS>,
        output: O,
        controls: ControlReceiver<'a, CONTROL_SIZE>,
    ) -> Self {
        Self::with_tick_duration(bank, output, controls, DEFAULT_TICK_DURATION)
    }

    /// Create a scheduler with a custom tick duration.
    pub fn with_tick_duration(
        bank: PatternBank<R, MAX_LEDS>,
        output: O,
        controls: ControlReceiver<'a, CONTROL_SIZE>,
        tick_duration: Duration,
    ) -> Self {
        Self {
            output,
            bank,
            controls,
            next_tick: Instant::from_millis(0),
            tick_duration,
        }
    }

    /// Run one tick and return timing information.
    ///
    /// If the caller has fallen more than two ticks behind, the schedule is
    /// reset to `now` instead of bursting through the backlog.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        let max_drift = self.tick_duration * 2;
        if now > self.next_tick + max_drift {
            self.next_tick = now;
        }

        let applied_intents = self.controls.drain_into(&mut self.bank);
        self.bank.tick_into(&mut self.output);

        self.next_tick += self.tick_duration;

        let sleep_duration = self
            .next_tick
            .checked_duration_since(now)
            .unwrap_or(Duration::from_ticks(0));

        TickResult {
            next_deadline: self.next_tick,
            sleep_duration,
            applied_intents,
        }
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    pub fn bank(&self) -> &PatternBank<R, MAX_LEDS> {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut PatternBank<R, MAX_LEDS> {
        &mut self.bank
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}
