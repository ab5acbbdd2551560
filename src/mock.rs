//! Recording interface shared by the unit tests

use alloc::vec::Vec;
use embedded_hal::delay::DelayNs;

use crate::interface::DisplayInterface;

/// One call made on the interface
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    Reset,
    Command(u8),
    Data(Vec<u8>),
    Words(Vec<u16>),
    Backlight(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MockError;

#[derive(Debug, Default)]
pub(crate) struct MockInterface {
    pub events: Vec<Event>,
    pub has_backlight: bool,
    /// Fail every transfer once this many transfers have succeeded
    pub fail_after: Option<usize>,
    /// Yield the thread on every transfer to shake out interleaving
    pub yield_on_write: bool,
    transfers: usize,
}

impl MockInterface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backlight() -> Self {
        Self {
            has_backlight: true,
            ..Self::default()
        }
    }

    pub fn failing_after(transfers: usize) -> Self {
        Self {
            fail_after: Some(transfers),
            ..Self::default()
        }
    }

    /// Opcodes sent, in order
    pub fn commands(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Command(command) => Some(*command),
                _ => None,
            })
            .collect()
    }

    /// Every word sent, flattened
    pub fn words(&self) -> Vec<u16> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Words(words) => Some(words.iter().copied()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    fn record(&mut self, event: Event) -> Result<(), MockError> {
        if self.fail_after.is_some_and(|limit| self.transfers >= limit) {
            return Err(MockError);
        }
        if self.yield_on_write {
            std::thread::yield_now();
        }
        self.transfers += 1;
        self.events.push(event);
        Ok(())
    }
}

impl DisplayInterface for MockInterface {
    type Error = MockError;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.record(Event::Command(command))
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.record(Event::Data(data.to_vec()))
    }

    fn send_data_words(&mut self, words: &[u16]) -> Result<(), Self::Error> {
        self.record(Event::Words(words.to_vec()))
    }

    fn reset<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
        self.record(Event::Reset)
    }

    fn set_backlight(&mut self, on: bool) -> Result<bool, Self::Error> {
        if !self.has_backlight {
            return Ok(false);
        }
        self.record(Event::Backlight(on))?;
        Ok(true)
    }
}

/// Delay that records requested milliseconds
#[derive(Debug, Default)]
pub(crate) struct MockDelay {
    pub delays_ms: Vec<u32>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
    }
}
