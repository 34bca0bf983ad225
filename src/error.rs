use thiserror::Error;

/// Largest control value the analog inputs produce (10-bit)
pub const MAX_CONTROL_VALUE: u16 = 1023;

/// Largest phase a pattern can start from
pub const MAX_PHASE: u16 = 2047;

/// Rejection reasons of the checked configuration setters.
///
/// The plain setters never fail: they wrap LED indices and let arithmetic
/// degrade out-of-range values. These errors are only produced by the
/// `try_*` variants for callers that want to catch bad input early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("led {led} is out of range ({count} leds configured)")]
    LedOutOfRange { led: u8, count: u8 },
    #[error("control value {value} is above 1023")]
    ControlOutOfRange { value: u16 },
    #[error("phase {phase} is above 2047")]
    PhaseOutOfRange { phase: u16 },
}
