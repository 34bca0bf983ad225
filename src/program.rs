//! Byte encoding of pattern programs
//!
//! A program is stored as `[shape, reserved, phase_hi, phase_lo]`. The
//! reserved byte is always written as 0 and ignored when reading.

use crate::shape::PatternShape;

/// Encoded size of one program
pub const PROGRAM_LEN: usize = 4;

/// Pattern configuration of a single LED
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatternProgram {
    pub shape: PatternShape,
    /// Starting value of the cycle counter
    pub phase: u16,
}

impl PatternProgram {
    pub const fn new(shape: PatternShape, phase: u16) -> Self {
        Self { shape, phase }
    }

    pub const fn to_bytes(self) -> [u8; PROGRAM_LEN] {
        let [phase_hi, phase_lo] = self.phase.to_be_bytes();
        [self.shape.bits(), 0, phase_hi, phase_lo]
    }

    /// Decode a program. The phase is taken as stored; reducing it into
    /// the cycle range happens when the program is applied to a LED.
    pub const fn from_bytes(bytes: [u8; PROGRAM_LEN]) -> Self {
        Self {
            shape: PatternShape::from_bits(bytes[0]),
            phase: u16::from_be_bytes([bytes[2], bytes[3]]),
        }
    }
}

impl From<[u8; PROGRAM_LEN]> for PatternProgram {
    fn from(bytes: [u8; PROGRAM_LEN]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<PatternProgram> for [u8; PROGRAM_LEN] {
    fn from(program: PatternProgram) -> Self {
        program.to_bytes()
    }
}
