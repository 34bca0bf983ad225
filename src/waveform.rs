//! Waveform kinds
//!
//! Each waveform maps the 0-2047 cycle counter of a LED to a base
//! brightness sample (0-255) before scaling and inversion.

use crate::shape::WAVEFORM_MASK;

/// Length of one waveform cycle in counter units
pub const CYCLE_LENGTH: u16 = 2048;

const HALF_CYCLE: u16 = CYCLE_LENGTH / 2;
const LAST_STEP: u16 = CYCLE_LENGTH - 1;

/// End of the mark part of the pulse wave (~20% of the cycle)
const PULSE_MARK: u16 = 410;

/// Spike is built from 32 coarse steps of 64 counter units
const SPIKE_STEP_SHIFT: u16 = 6;
const SPIKE_LAST_STEP: u16 = (CYCLE_LENGTH >> SPIKE_STEP_SHIFT) - 1;

const WAVEFORM_ID_OFF: u8 = 0;
const WAVEFORM_ID_SAW: u8 = 1;
const WAVEFORM_ID_TRIANGLE: u8 = 2;
const WAVEFORM_ID_SQUARE: u8 = 3;
const WAVEFORM_ID_PULSE: u8 = 4;
const WAVEFORM_ID_SPIKE: u8 = 5;
const WAVEFORM_ID_RANDOM: u8 = 6;
const WAVEFORM_ID_ON: u8 = 7;

/// Waveform selector stored in the three low bits of a shape byte
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Waveform {
    /// Always off
    #[default]
    Off = WAVEFORM_ID_OFF,
    /// Ramp from 0 to 255 over the whole cycle
    Saw = WAVEFORM_ID_SAW,
    /// Rise over the first half of the cycle, fall over the second
    Triangle = WAVEFORM_ID_TRIANGLE,
    /// 50/50 mark/space
    Square = WAVEFORM_ID_SQUARE,
    /// 20/80 mark/space
    Pulse = WAVEFORM_ID_PULSE,
    /// Quadratic rise and fall, spikier than the triangle
    Spike = WAVEFORM_ID_SPIKE,
    /// New random level once per cycle.
    ///
    /// Documented in older shape tables as "hump"; the evaluated behaviour
    /// has always been random sampling.
    Random = WAVEFORM_ID_RANDOM,
    /// Always fully on
    On = WAVEFORM_ID_ON,
}

/// Base sample produced by a waveform for one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sample {
    /// Deterministic level (0-255)
    Level(u8),
    /// A fresh random level must be drawn
    Draw,
    /// Keep whatever the LED is currently showing
    Hold,
}

impl Waveform {
    /// Decode the waveform from the low bits of a shape byte
    pub const fn from_bits(bits: u8) -> Self {
        match bits & WAVEFORM_MASK {
            WAVEFORM_ID_OFF => Self::Off,
            WAVEFORM_ID_SAW => Self::Saw,
            WAVEFORM_ID_TRIANGLE => Self::Triangle,
            WAVEFORM_ID_SQUARE => Self::Square,
            WAVEFORM_ID_PULSE => Self::Pulse,
            WAVEFORM_ID_SPIKE => Self::Spike,
            WAVEFORM_ID_RANDOM => Self::Random,
            _ => Self::On,
        }
    }

    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Deterministic level at `counter`.
    ///
    /// Returns `None` for [`Waveform::Random`], whose level depends on the
    /// cycle boundary rather than the counter.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn level(self, counter: u16) -> Option<u8> {
        let level = match self {
            Self::Off => 0,
            Self::On => 255,
            Self::Saw => counter >> 3,
            Self::Triangle => {
                if counter < HALF_CYCLE {
                    counter >> 2
                } else {
                    LAST_STEP.saturating_sub(counter) >> 2
                }
            }
            Self::Square => {
                if counter < HALF_CYCLE {
                    255
                } else {
                    0
                }
            }
            Self::Pulse => {
                if counter < PULSE_MARK {
                    255
                } else {
                    0
                }
            }
            Self::Spike => {
                let step = counter >> SPIKE_STEP_SHIFT;
                let step = if counter < HALF_CYCLE {
                    step
                } else {
                    SPIKE_LAST_STEP.saturating_sub(step)
                };
                let squared = step * step;
                if squared > 255 { 255 } else { squared }
            }
            Self::Random => return None,
        };
        Some(if level > 255 { 255 } else { level as u8 })
    }

    /// Sample for one tick given whether the counter wrapped during it
    pub const fn sample(self, counter: u16, wrapped: bool) -> Sample {
        match self.level(counter) {
            Some(level) => Sample::Level(level),
            None if wrapped => Sample::Draw,
            None => Sample::Hold,
        }
    }
}
