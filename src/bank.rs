//! Pattern bank - the per-tick evaluator for all LEDs
//!
//! The bank owns one [`LedSlot`] per configured LED and evaluates them
//! together once per tick. Configuration setters are plain field writes
//! that take effect on the next tick.

use heapless::Vec;
use rand_core::RngCore;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputSink;
use crate::control::ControlIntent;
use crate::error::{ControlError, MAX_CONTROL_VALUE, MAX_PHASE};
use crate::program::{PROGRAM_LEN, PatternProgram};
use crate::shape::PatternShape;
use crate::slot::LedSlot;

/// Default slot capacity of a bank
pub const DEFAULT_MAX_LEDS: usize = 9;

/// Fixed-capacity collection of LED pattern slots
///
/// `MAX_LEDS` bounds the number of LEDs at compile time; the actual count
/// is chosen at construction and never changes afterwards. LED indices
/// passed to the setters wrap around the configured count.
pub struct PatternBank<R: RngCore, const MAX_LEDS: usize = DEFAULT_MAX_LEDS> {
    slots: Vec<LedSlot, MAX_LEDS>,
    frame: [Option<u8>; MAX_LEDS],
    rng: R,
}

impl<R: RngCore, const MAX_LEDS: usize> PatternBank<R, MAX_LEDS> {
    /// Create a bank of `led_count` LEDs, all off.
    ///
    /// The count is clamped to `1..=MAX_LEDS`. `rng` feeds the random
    /// waveform.
    pub fn new(led_count: u8, rng: R) -> Self {
        const { assert!(MAX_LEDS > 0, "a pattern bank needs at least one slot") };

        let count = usize::from(led_count).clamp(1, MAX_LEDS);
        let mut slots = Vec::new();
        for _ in 0..count {
            let _ = slots.push(LedSlot::default());
        }

        Self {
            slots,
            frame: [None; MAX_LEDS],
            rng,
        }
    }

    /// Number of configured LEDs
    #[allow(clippy::cast_possible_truncation)]
    pub fn led_count(&self) -> u8 {
        self.slots.len() as u8
    }

    /// State of a LED (index wraps around the LED count)
    pub fn slot(&self, led: u8) -> &LedSlot {
        &self.slots[self.index(led)]
    }

    pub fn slots(&self) -> &[LedSlot] {
        &self.slots
    }

    /// Levels computed by the last tick; `None` means no update
    pub fn frame(&self) -> &[Option<u8>] {
        &self.frame[..self.slots.len()]
    }

    /// Set the counter increment per tick from a 0-1023 control value
    pub fn set_rate(&mut self, led: u8, value: u16) {
        let index = self.index(led);
        self.slots[index].set_rate(value);
    }

    /// Set the brightness ceiling from a 0-1023 control value
    pub fn set_scale(&mut self, led: u8, value: u16) {
        let index = self.index(led);
        self.slots[index].set_scale(value);
    }

    /// Set the trigger/gate input. Values >= 512 open the gate or fire a
    /// one-shot.
    pub fn set_trigger_input(&mut self, led: u8, value: u16) {
        let index = self.index(led);
        self.slots[index].set_trigger_input(value);
    }

    /// Set the pattern of a LED and restart it from `phase`.
    ///
    /// `phase` is reduced into the 0-2047 cycle range. Any running
    /// one-shot or miss cycle is cancelled.
    pub fn set_pattern(&mut self, led: u8, shape: impl Into<PatternShape>, phase: u16) {
        let index = self.index(led);
        let shape = shape.into();
        #[cfg(feature = "esp32-log")]
        println!(
            "[PatternBank.set_pattern] led {} shape {:#04x} phase {}",
            index,
            shape.bits(),
            phase
        );
        self.slots[index].set_pattern(shape, phase);
    }

    /// Current program of a LED
    pub fn program(&self, led: u8) -> PatternProgram {
        self.slot(led).program()
    }

    /// Encode the program of a LED as `[shape, 0, phase_hi, phase_lo]`
    pub fn encode_pattern(&self, led: u8) -> [u8; PROGRAM_LEN] {
        self.program(led).to_bytes()
    }

    /// Apply a program previously produced by [`PatternBank::encode_pattern`]
    pub fn decode_pattern(&mut self, led: u8, bytes: [u8; PROGRAM_LEN]) {
        let program = PatternProgram::from_bytes(bytes);
        self.set_pattern(led, program.shape, program.phase);
    }

    /// Write the programs of all LEDs into `out`, 4 bytes each.
    ///
    /// Stops at the end of the buffer. Returns the number of LEDs written.
    pub fn save_programs(&self, out: &mut [u8]) -> usize {
        let mut written = 0;
        for (slot, chunk) in self.slots.iter().zip(out.chunks_exact_mut(PROGRAM_LEN)) {
            chunk.copy_from_slice(&slot.program().to_bytes());
            written += 1;
        }
        written
    }

    /// Load programs written by [`PatternBank::save_programs`].
    ///
    /// LED `i` reads record `i`; a trailing partial record is ignored.
    /// Returns the number of LEDs configured.
    pub fn load_programs(&mut self, bytes: &[u8]) -> usize {
        let mut read = 0;
        for (slot, chunk) in self.slots.iter_mut().zip(bytes.chunks_exact(PROGRAM_LEN)) {
            let mut record = [0; PROGRAM_LEN];
            record.copy_from_slice(chunk);
            let program = PatternProgram::from_bytes(record);
            slot.set_pattern(program.shape, program.phase);
            read += 1;
        }
        read
    }

    /// Checked variant of [`PatternBank::set_rate`]
    pub fn try_set_rate(&mut self, led: u8, value: u16) -> Result<(), ControlError> {
        self.check_led(led)?;
        check_control(value)?;
        self.set_rate(led, value);
        Ok(())
    }

    /// Checked variant of [`PatternBank::set_scale`]
    pub fn try_set_scale(&mut self, led: u8, value: u16) -> Result<(), ControlError> {
        self.check_led(led)?;
        check_control(value)?;
        self.set_scale(led, value);
        Ok(())
    }

    /// Checked variant of [`PatternBank::set_trigger_input`]
    pub fn try_set_trigger_input(&mut self, led: u8, value: u16) -> Result<(), ControlError> {
        self.check_led(led)?;
        check_control(value)?;
        self.set_trigger_input(led, value);
        Ok(())
    }

    /// Checked variant of [`PatternBank::set_pattern`]
    pub fn try_set_pattern(
        &mut self,
        led: u8,
        shape: impl Into<PatternShape>,
        phase: u16,
    ) -> Result<(), ControlError> {
        self.check_led(led)?;
        if phase > MAX_PHASE {
            return Err(ControlError::PhaseOutOfRange { phase });
        }
        self.set_pattern(led, shape, phase);
        Ok(())
    }

    /// Apply a queued configuration change
    pub fn apply(&mut self, intent: ControlIntent) {
        match intent {
            ControlIntent::Rate { led, value } => self.set_rate(led, value),
            ControlIntent::Scale { led, value } => self.set_scale(led, value),
            ControlIntent::TriggerInput { led, value } => self.set_trigger_input(led, value),
            ControlIntent::Pattern { led, shape, phase } => self.set_pattern(led, shape, phase),
            ControlIntent::Program { led, bytes } => self.decode_pattern(led, bytes),
        }
    }

    /// Evaluate one tick for all LEDs.
    ///
    /// Every LED is gated first, then advanced, then rendered. Returns the
    /// level each LED should show; `None` leaves its previous output in place.
    pub fn tick(&mut self) -> &[Option<u8>] {
        for (_led, slot) in self.slots.iter_mut().enumerate() {
            #[cfg(feature = "esp32-log")]
            let was_live = slot.is_change_enabled();
            slot.resolve_gate();
            #[cfg(feature = "esp32-log")]
            if slot.shape().is_one_shot() && !was_live && slot.is_change_enabled() {
                println!("[PatternBank.tick] one-shot fired on led {}", _led);
            }
        }

        for (_led, slot) in self.slots.iter_mut().enumerate() {
            #[cfg(feature = "esp32-log")]
            let was_live = slot.is_change_enabled();
            slot.advance();
            #[cfg(feature = "esp32-log")]
            if slot.shape().is_one_shot() && was_live && !slot.is_change_enabled() {
                println!("[PatternBank.tick] one-shot ended on led {}", _led);
            }
        }

        for (slot, level) in self.slots.iter().zip(self.frame.iter_mut()) {
            *level = slot.render(&mut self.rng);
        }

        self.frame()
    }

    /// Evaluate one tick and forward the updated levels to `output`
    #[allow(clippy::cast_possible_truncation)]
    pub fn tick_into<O: OutputSink>(&mut self, output: &mut O) {
        for (channel, level) in self.tick().iter().enumerate() {
            if let Some(level) = *level {
                output.set_brightness(channel as u8, level);
            }
        }
    }

    fn index(&self, led: u8) -> usize {
        usize::from(led) % self.slots.len()
    }

    fn check_led(&self, led: u8) -> Result<(), ControlError> {
        if usize::from(led) >= self.slots.len() {
            return Err(ControlError::LedOutOfRange {
                led,
                count: self.led_count(),
            });
        }
        Ok(())
    }
}

fn check_control(value: u16) -> Result<(), ControlError> {
    if value > MAX_CONTROL_VALUE {
        return Err(ControlError::ControlOutOfRange { value });
    }
    Ok(())
}
