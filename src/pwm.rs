//! PWM output sink
//!
//! Maps 8-bit brightness levels onto `embedded-hal` PWM channels.

use embedded_hal::pwm::SetDutyCycle;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputSink;

/// One PWM channel per LED, indexed by LED number
pub struct PwmOutputs<P, const N: usize> {
    channels: [P; N],
}

impl<P: SetDutyCycle, const N: usize> PwmOutputs<P, N> {
    pub const fn new(channels: [P; N]) -> Self {
        Self { channels }
    }

    pub fn channels(&self) -> &[P; N] {
        &self.channels
    }

    pub fn into_channels(self) -> [P; N] {
        self.channels
    }
}

impl<P: SetDutyCycle, const N: usize> OutputSink for PwmOutputs<P, N> {
    /// Writes `level / 255` of the channel's full duty cycle.
    ///
    /// Unknown channels and rejected writes are ignored.
    fn set_brightness(&mut self, channel: u8, level: u8) {
        let Some(pwm) = self.channels.get_mut(usize::from(channel)) else {
            return;
        };
        if let Err(_err) = pwm.set_duty_cycle_fraction(u16::from(level), u16::from(u8::MAX)) {
            #[cfg(feature = "esp32-log")]
            println!(
                "[PwmOutputs.set_brightness] channel {} rejected level {}: {:?}",
                channel,
                level,
                embedded_hal::pwm::Error::kind(&_err)
            );
        }
    }
}
