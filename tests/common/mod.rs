#![allow(dead_code)]

use myrtio_led_shaper::OutputSink;
use rand_core::RngCore;

/// Deterministic generator cycling through a fixed list of values
pub struct SequenceRng {
    values: &'static [u32],
    next: usize,
}

impl SequenceRng {
    pub fn new(values: &'static [u32]) -> Self {
        Self { values, next: 0 }
    }

    pub fn zeros() -> Self {
        Self::new(&[0])
    }
}

impl RngCore for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for byte in dst {
            *byte = self.next_u32() as u8;
        }
    }
}

/// Output sink remembering every write
#[derive(Default)]
pub struct RecordingSink {
    pub writes: Vec<(u8, u8)>,
}

impl OutputSink for RecordingSink {
    fn set_brightness(&mut self, channel: u8, level: u8) {
        self.writes.push((channel, level));
    }
}
