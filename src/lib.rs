#![cfg_attr(not(test), no_std)]

//! Time-multiplexed analog scanner for a 16-way mux (or two 8-way muxes on shared select lines).
//!
//! Each cycle walks the populated mux addresses, waits for the analog path to settle, samples the
//! shared reference input plus the input wired to that channel, then dumps both banks as text.

pub mod analog;
pub mod bitops;
pub mod channel;
pub mod error;
pub mod grid;
pub mod report;
pub mod scanner;

#[cfg(test)]
mod testkit;

pub use analog::AnalogSource;
pub use channel::{LogicalChannel, StorageIndex};
pub use error::ScanError;
pub use scanner::{Scanner, Timing};

// Select line → amplifier output needs this long before a sample is trustworthy.
pub const SETTLE_MS: u32 = 50;

// Pause after each report before the next sweep
pub const IDLE_MS: u32 = 100;

// Host reader opens the port at this rate
pub const SERIAL_BAUD: u32 = 9600;

pub const SELECT_LINES: usize = 4;
pub const CHANNEL_COUNT: usize = 1 << SELECT_LINES;
pub const SLOT_COUNT: usize = 8;
