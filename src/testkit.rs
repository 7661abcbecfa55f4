// Instrumented stand-ins for the board: every line write, delay and conversion lands in one log.

use core::convert::Infallible;
use std::cell::RefCell;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::analog::AnalogSource;
use crate::bitops::comp4;
use crate::SELECT_LINES;

pub const REF_PIN: u8 = 0xA0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Line { line: usize, high: bool },
    DelayMs(u32),
    DelayNs(u32),
    Sample { input: u8, address: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcFault;

#[derive(Default)]
pub struct BenchState {
    pub lines: [bool; SELECT_LINES],
    pub log: Vec<Event>,
    pub fail_address: Option<u8>,
    pub offset: u16,
}

#[derive(Clone, Default)]
pub struct Bench(pub Rc<RefCell<BenchState>>);

impl Bench {
    pub fn lines(&self) -> [FakeLine; SELECT_LINES] {
        [0, 1, 2, 3].map(|line| FakeLine { line, bench: self.clone() })
    }

    pub fn delay(&self) -> FakeDelay {
        FakeDelay(self.clone())
    }

    pub fn adc(&self) -> FakeAdc {
        FakeAdc(self.clone())
    }

    pub fn address(&self) -> u8 {
        comp4(self.0.borrow().lines)
    }

    pub fn log(&self) -> Vec<Event> {
        self.0.borrow().log.clone()
    }

    pub fn fail_on(&self, address: Option<u8>) {
        self.0.borrow_mut().fail_address = address;
    }

    pub fn set_offset(&self, offset: u16) {
        self.0.borrow_mut().offset = offset;
    }
}

pub struct FakeLine {
    line: usize,
    bench: Bench,
}

impl ErrorType for FakeLine {
    type Error = Infallible;
}

impl OutputPin for FakeLine {
    fn set_low(&mut self) -> Result<(), Infallible> {
        let mut st = self.bench.0.borrow_mut();
        st.lines[self.line] = false;
        st.log.push(Event::Line { line: self.line, high: false });
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        let mut st = self.bench.0.borrow_mut();
        st.lines[self.line] = true;
        st.log.push(Event::Line { line: self.line, high: true });
        Ok(())
    }
}

pub struct FakeDelay(Bench);

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0 .0.borrow_mut().log.push(Event::DelayNs(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0 .0.borrow_mut().log.push(Event::DelayMs(ms));
    }
}

// Reference pin reads 100 + address, every other pin 200 + address (plus any bench offset).
pub struct FakeAdc(Bench);

impl AnalogSource<u8> for FakeAdc {
    type Error = AdcFault;

    fn read(&mut self, input: &u8) -> nb::Result<u16, AdcFault> {
        let address = self.0.address();
        let mut st = self.0 .0.borrow_mut();
        st.log.push(Event::Sample { input: *input, address });

        if st.fail_address == Some(address) {
            return Err(nb::Error::Other(AdcFault));
        }

        let base = if *input == REF_PIN { 100 } else { 200 };
        Ok(base + address as u16 + st.offset)
    }
}

/// Serial sink that keeps everything written to it.
#[derive(Default)]
pub struct Transcript {
    pub text: String,
}

impl Transcript {
    pub fn lines(&self) -> Vec<&str> {
        self.text.lines().map(|l| l.trim_end_matches('\r')).collect()
    }
}

impl ufmt::uWrite for Transcript {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        self.text.push_str(s);
        Ok(())
    }
}

/// Sink that accepts `budget` writes and then fails every one after.
pub struct ShortSink {
    pub budget: usize,
    pub text: String,
}

impl ShortSink {
    pub fn new(budget: usize) -> Self {
        Self { budget, text: String::new() }
    }
}

impl ufmt::uWrite for ShortSink {
    type Error = ();

    fn write_str(&mut self, s: &str) -> Result<(), ()> {
        if self.budget == 0 {
            return Err(());
        }
        self.budget -= 1;
        self.text.push_str(s);
        Ok(())
    }
}
