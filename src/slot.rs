//! Per-LED pattern state
//!
//! A slot owns everything one LED needs between ticks: its configured
//! program, the three control values and the runtime cycle state. The
//! bank drives every slot through [`LedSlot::resolve_gate`],
//! [`LedSlot::advance`] and [`LedSlot::render`] in that order.

use rand_core::RngCore;

use crate::program::PatternProgram;
use crate::shape::{PatternShape, TriggerMode};
use crate::waveform::{CYCLE_LENGTH, Sample};

/// Trigger input level at which a gate opens or a one-shot fires
pub const TRIGGER_THRESHOLD: u16 = 512;

/// Lowest level emitted while a LED is not forced off
const FLOOR_LEVEL: u8 = 1;

/// Runtime state of one LED
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedSlot {
    shape: PatternShape,
    phase: u16,
    counter: u16,
    rate: u16,
    scale: u8,
    trigger_input: u16,
    prev_trigger_input: u16,
    /// Cycles elapsed since the last lit cycle (non-zero means dark)
    cycle: u8,
    change_enabled: bool,
    /// Counter crossed the end of the cycle during the current tick
    wrapped: bool,
}

impl LedSlot {
    pub const fn shape(&self) -> PatternShape {
        self.shape
    }

    pub const fn phase(&self) -> u16 {
        self.phase
    }

    /// Current position within the cycle (0-2047)
    pub const fn counter(&self) -> u16 {
        self.counter
    }

    /// Counter increment per tick
    pub const fn rate(&self) -> u16 {
        self.rate
    }

    /// Brightness ceiling (0-255)
    pub const fn scale(&self) -> u8 {
        self.scale
    }

    pub const fn trigger_input(&self) -> u16 {
        self.trigger_input
    }

    /// Miss-cycle position, 0 while the waveform is lit
    pub const fn cycle(&self) -> u8 {
        self.cycle
    }

    /// Whether the counter may advance (and, for one-shots, whether the shot is live)
    pub const fn is_change_enabled(&self) -> bool {
        self.change_enabled
    }

    pub const fn program(&self) -> PatternProgram {
        PatternProgram::new(self.shape, self.phase)
    }

    pub(crate) fn set_rate(&mut self, value: u16) {
        self.rate = value >> 2;
    }

    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn set_scale(&mut self, value: u16) {
        self.scale = (value >> 2).min(u16::from(u8::MAX)) as u8;
    }

    pub(crate) fn set_trigger_input(&mut self, value: u16) {
        self.trigger_input = value;
    }

    /// Restart the waveform from `phase` with a new shape
    pub(crate) fn set_pattern(&mut self, shape: PatternShape, phase: u16) {
        let phase = phase % CYCLE_LENGTH;
        self.shape = shape;
        self.phase = phase;
        self.counter = phase;
        self.cycle = 0;
        self.change_enabled = false;
    }

    /// Gate and trigger resolution.
    ///
    /// One-shots latch on a rising edge across the threshold, gates follow
    /// the input level on every tick.
    pub(crate) fn resolve_gate(&mut self) {
        let open = self.trigger_input >= TRIGGER_THRESHOLD;
        match self.shape.trigger() {
            TriggerMode::OneShot => {
                let rising = open && self.prev_trigger_input < TRIGGER_THRESHOLD;
                self.change_enabled |= rising;
                self.prev_trigger_input = self.trigger_input;
            }
            TriggerMode::GateChange | TriggerMode::GateOut => {
                self.change_enabled = open;
            }
        }
    }

    /// Counter advance and cycle accounting
    pub(crate) fn advance(&mut self) {
        self.wrapped = false;
        if !self.change_enabled {
            return;
        }

        let next = self.counter.saturating_add(self.rate);
        if next < CYCLE_LENGTH {
            self.counter = next;
            return;
        }

        // Keep the overshoot so the cycle length stays exact
        self.counter = next % CYCLE_LENGTH;
        self.wrapped = true;
        self.complete_cycle();
    }

    fn complete_cycle(&mut self) {
        let miss_cycles = self.shape.miss_cycles();
        if miss_cycles > 0 && self.cycle != miss_cycles {
            self.cycle += 1;
            return;
        }

        self.cycle = 0;
        if self.shape.is_one_shot() {
            // Shot ends after the lit cycle and its miss cycles
            self.change_enabled = false;
        }
    }

    /// Output is held at zero regardless of the waveform
    pub const fn is_forced_off(&self) -> bool {
        let closed = match self.shape.trigger() {
            TriggerMode::OneShot | TriggerMode::GateOut => !self.change_enabled,
            TriggerMode::GateChange => false,
        };
        closed || self.cycle != 0
    }

    /// Compute the level to emit this tick.
    ///
    /// Returns `None` when the LED should keep its previous output.
    pub(crate) fn render<R: RngCore>(&self, rng: &mut R) -> Option<u8> {
        if self.is_forced_off() {
            return Some(0);
        }

        let base = match self.shape.waveform().sample(self.counter, self.wrapped) {
            Sample::Level(level) => level,
            Sample::Draw => random_level(rng),
            Sample::Hold => return None,
        };

        let mut level = scale_level(base, self.scale);
        if self.shape.is_inverted() {
            level = u8::MAX - level;
        }
        // True zero is reserved for the forced-off cases
        Some(level.max(FLOOR_LEVEL))
    }
}

/// 8-bit fixed-point scaling (`base * scale / 256`)
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale_level(base: u8, scale: u8) -> u8 {
    ((base as u16 * scale as u16) >> 8) as u8
}

/// Uniform draw in `[0, 255)`
#[allow(clippy::cast_possible_truncation)]
fn random_level<R: RngCore>(rng: &mut R) -> u8 {
    (rng.next_u32() % u32::from(u8::MAX)) as u8
}
