//! Pattern shape decoding
//!
//! A shape is configured as a single byte: the waveform selector in the
//! three low bits plus independent modifier and trigger flags. The byte is
//! decoded once when a pattern is set so the tick path works with plain
//! fields instead of bit tests.

use crate::waveform::Waveform;

/// Bits holding the waveform selector
pub const WAVEFORM_MASK: u8 = 0x07;
/// Output is flipped (`255 - level`)
pub const INVERT: u8 = 8;
/// After each cycle, spend one cycle dark
pub const MISS1: u8 = 16;
/// After each cycle, spend two cycles dark
pub const MISS2: u8 = 32;
/// Trigger input gates counter advance only (default)
pub const GATE_CHANGE: u8 = 0;
/// Trigger input gates counter advance and forces the output off
pub const GATE_OUT: u8 = 64;
/// Rising edge of the trigger input fires a single cycle.
///
/// Takes priority over [`GATE_OUT`] when both are set.
pub const ONE_SHOT: u8 = 128;

/// How the trigger input controls a LED
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TriggerMode {
    /// Input level enables counter advance, output keeps its last level
    #[default]
    GateChange,
    /// Input level enables counter advance, output is off while closed
    GateOut,
    /// Rising edge latches one cycle (plus miss cycles)
    OneShot,
}

impl TriggerMode {
    pub const fn from_bits(bits: u8) -> Self {
        if bits & ONE_SHOT != 0 {
            Self::OneShot
        } else if bits & GATE_OUT != 0 {
            Self::GateOut
        } else {
            Self::GateChange
        }
    }

    pub const fn bits(self) -> u8 {
        match self {
            Self::GateChange => GATE_CHANGE,
            Self::GateOut => GATE_OUT,
            Self::OneShot => ONE_SHOT,
        }
    }
}

/// Decoded shape of a LED pattern
///
/// The raw byte is kept next to the decoded fields so a pattern can be
/// written back exactly as it was configured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatternShape {
    bits: u8,
    waveform: Waveform,
    invert: bool,
    miss_cycles: u8,
    trigger: TriggerMode,
}

impl PatternShape {
    /// Decode a shape byte
    pub const fn from_bits(bits: u8) -> Self {
        let miss2 = if bits & MISS2 != 0 { 2 } else { 0 };
        let miss1 = if bits & MISS1 != 0 { 1 } else { 0 };
        Self {
            bits,
            waveform: Waveform::from_bits(bits),
            invert: bits & INVERT != 0,
            miss_cycles: miss2 + miss1,
            trigger: TriggerMode::from_bits(bits),
        }
    }

    /// Compose a shape from its parts
    ///
    /// `miss_cycles` is limited to the two miss bits (0-3).
    pub const fn new(waveform: Waveform, invert: bool, miss_cycles: u8, trigger: TriggerMode) -> Self {
        let mut bits = waveform.bits() | trigger.bits();
        if invert {
            bits |= INVERT;
        }
        if miss_cycles & 0b01 != 0 {
            bits |= MISS1;
        }
        if miss_cycles & 0b10 != 0 {
            bits |= MISS2;
        }
        Self::from_bits(bits)
    }

    /// Raw shape byte, exactly as configured
    pub const fn bits(self) -> u8 {
        self.bits
    }

    pub const fn waveform(self) -> Waveform {
        self.waveform
    }

    pub const fn is_inverted(self) -> bool {
        self.invert
    }

    /// Number of dark cycles that follow each lit cycle (0-3)
    pub const fn miss_cycles(self) -> u8 {
        self.miss_cycles
    }

    pub const fn trigger(self) -> TriggerMode {
        self.trigger
    }

    pub const fn is_one_shot(self) -> bool {
        matches!(self.trigger, TriggerMode::OneShot)
    }
}

impl From<u8> for PatternShape {
    fn from(bits: u8) -> Self {
        Self::from_bits(bits)
    }
}

impl From<Waveform> for PatternShape {
    fn from(waveform: Waveform) -> Self {
        Self::from_bits(waveform.bits())
    }
}

impl From<PatternShape> for u8 {
    fn from(shape: PatternShape) -> Self {
        shape.bits()
    }
}
