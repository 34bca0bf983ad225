//! Control channel for configuration changes
//!
//! Input polling (pots, sound level, light sensors) usually runs in a
//! different context than the tick. The channel queues configuration
//! writes under a critical section; the tick driver drains it right before
//! evaluating, so the last write queued before a tick wins.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;
use rand_core::RngCore;

use crate::bank::PatternBank;
use crate::program::PROGRAM_LEN;
use crate::shape::PatternShape;

/// A queued configuration change for one LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlIntent {
    /// Counter rate control value (0-1023)
    Rate { led: u8, value: u16 },
    /// Brightness ceiling control value (0-1023)
    Scale { led: u8, value: u16 },
    /// Trigger/gate control value (0-1023)
    TriggerInput { led: u8, value: u16 },
    /// New pattern, restarting from `phase`
    Pattern { led: u8, shape: PatternShape, phase: u16 },
    /// Encoded pattern program, as read back from storage
    Program { led: u8, bytes: [u8; PROGRAM_LEN] },
}

/// Bounded queue of [`ControlIntent`]s, safe to share between contexts
pub struct ControlChannel<const SIZE: usize> {
    queue: Mutex<RefCell<Deque<ControlIntent, SIZE>>>,
}

impl<const SIZE: usize> ControlChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    pub const fn sender(&self) -> ControlSender<'_, SIZE> {
        ControlSender { channel: self }
    }

    pub const fn receiver(&self) -> ControlReceiver<'_, SIZE> {
        ControlReceiver { channel: self }
    }

    /// Queue an intent.
    ///
    /// Returns the intent back if the queue is full.
    pub fn try_send(&self, intent: ControlIntent) -> Result<(), ControlIntent> {
        critical_section::with(|cs| self.queue.borrow(cs).borrow_mut().push_back(intent))
    }

    /// Take the oldest queued intent
    pub fn try_receive(&self) -> Option<ControlIntent> {
        critical_section::with(|cs| self.queue.borrow(cs).borrow_mut().pop_front())
    }

    /// Number of queued intents
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.queue.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for ControlChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle, used by input polling code
#[derive(Clone, Copy)]
pub struct ControlSender<'a, const SIZE: usize> {
    channel: &'a ControlChannel<SIZE>,
}

impl<const SIZE: usize> ControlSender<'_, SIZE> {
    pub fn try_send(&self, intent: ControlIntent) -> Result<(), ControlIntent> {
        self.channel.try_send(intent)
    }

    pub fn set_rate(&self, led: u8, value: u16) -> Result<(), ControlIntent> {
        self.try_send(ControlIntent::Rate { led, value })
    }

    pub fn set_scale(&self, led: u8, value: u16) -> Result<(), ControlIntent> {
        self.try_send(ControlIntent::Scale { led, value })
    }

    pub fn set_trigger_input(&self, led: u8, value: u16) -> Result<(), ControlIntent> {
        self.try_send(ControlIntent::TriggerInput { led, value })
    }

    pub fn set_pattern(
        &self,
        led: u8,
        shape: impl Into<PatternShape>,
        phase: u16,
    ) -> Result<(), ControlIntent> {
        self.try_send(ControlIntent::Pattern {
            led,
            shape: shape.into(),
            phase,
        })
    }
}

/// Consumer handle, owned by the tick driver
#[derive(Clone, Copy)]
pub struct ControlReceiver<'a, const SIZE: usize> {
    channel: &'a ControlChannel<SIZE>,
}

impl<const SIZE: usize> ControlReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Option<ControlIntent> {
        self.channel.try_receive()
    }

    /// Apply every queued intent to `bank`, oldest first.
    ///
    /// Returns the number of intents applied.
    pub fn drain_into<R: RngCore, const MAX_LEDS: usize>(
        &self,
        bank: &mut PatternBank<R, MAX_LEDS>,
    ) -> usize {
        let mut applied = 0;
        while let Some(intent) = self.try_receive() {
            bank.apply(intent);
            applied += 1;
        }
        applied
    }
}
