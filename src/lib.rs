#![no_std]

pub mod bank;
pub mod control;
pub mod error;
pub mod program;
pub mod pwm;
pub mod scheduler;
pub mod shape;
pub mod slot;
pub mod waveform;

pub use bank::{DEFAULT_MAX_LEDS, PatternBank};
pub use control::{ControlChannel, ControlIntent, ControlReceiver, ControlSender};
pub use error::ControlError;
pub use program::{PROGRAM_LEN, PatternProgram};
pub use pwm::PwmOutputs;
pub use scheduler::{TickResult, TickScheduler};
pub use shape::{PatternShape, TriggerMode};
pub use slot::LedSlot;
pub use waveform::{CYCLE_LENGTH, Sample, Waveform};

pub use embassy_time::{Duration, Instant};

/// Brightness output device
///
/// Implement this trait to drive different PWM hardware.
/// The pattern bank and tick scheduler are generic over this trait.
pub trait OutputSink {
    /// Set the brightness of one output channel
    fn set_brightness(&mut self, channel: u8, level: u8);
}
