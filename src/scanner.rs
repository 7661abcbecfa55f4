use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use ufmt::uWrite;

use crate::analog::AnalogSource;
use crate::channel::{self, LogicalChannel, StorageIndex};
use crate::error::ScanError;
use crate::report;
use crate::{IDLE_MS, SELECT_LINES, SETTLE_MS, SLOT_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub settle_ms: u32,
    pub idle_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self { settle_ms: SETTLE_MS, idle_ms: IDLE_MS }
    }
}

/// Owns the select lines, the ADC, the input wiring and both reading banks.
///
/// * `S` - select line pin (4 of them, line 0 = address bit 0)
/// * `D` - blocking delay
/// * `A` - ADC, sampling inputs named by `I`
pub struct Scanner<S, D, A, I> {
    select: [S; SELECT_LINES],
    delay: D,
    adc: A,
    reference: I,
    inputs: [I; SLOT_COUNT], // fixed at startup; slot n reads inputs[n]
    timing: Timing,
    ref_readings: [u16; SLOT_COUNT],
    ch_readings: [u16; SLOT_COUNT],
    stale: u8, // bit n set ⇒ slot n missed its last sample
}

impl<S, D, A, I> Scanner<S, D, A, I>
where
    S: OutputPin,
    D: DelayNs,
    A: AnalogSource<I>,
{
    pub fn new(select: [S; SELECT_LINES], delay: D, adc: A, reference: I, inputs: [I; SLOT_COUNT]) -> Self {
        Self {
            select,
            delay,
            adc,
            reference,
            inputs,
            timing: Timing::default(),
            ref_readings: [0; SLOT_COUNT],
            ch_readings: [0; SLOT_COUNT],
            stale: 0,
        }
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn reference_readings(&self) -> &[u16; SLOT_COUNT] {
        &self.ref_readings
    }

    pub fn channel_readings(&self) -> &[u16; SLOT_COUNT] {
        &self.ch_readings
    }

    pub fn is_stale(&self, slot: StorageIndex) -> bool {
        slot < SLOT_COUNT && self.stale >> slot & 0x1 == 1
    }

    /// Drive the select lines to `channel`'s address. Caller owes the mux a settle delay afterwards.
    pub fn select_channel(&mut self, channel: LogicalChannel) -> Result<(), S::Error> {
        for (line, level) in self.select.iter_mut().zip(channel.select_levels()) {
            line.set_state(level)?;
        }

        Ok(())
    }

    /// Select, settle, then read the shared reference input followed by the channel's own input.
    pub fn sample_channel(&mut self, channel: LogicalChannel) -> Result<(u16, u16), ScanError<S::Error, A::Error>> {
        let slot = channel.storage_index().ok_or(ScanError::Unmapped(channel))?;

        self.select_channel(channel)
            .map_err(|error| ScanError::Select { channel, error })?;
        self.delay.delay_ms(self.timing.settle_ms);

        let ref_value = self.adc.read_blocking(&self.reference)
            .map_err(|error| ScanError::Sample { channel, error })?;
        let ch_value = self.adc.read_blocking(&self.inputs[slot])
            .map_err(|error| ScanError::Sample { channel, error })?;

        Ok((ref_value, ch_value))
    }

    /// One sweep over every populated address. A failed slot keeps its old pair and goes stale;
    /// the sweep always finishes and the first failure is handed back.
    pub fn scan_cycle(&mut self) -> Result<(), ScanError<S::Error, A::Error>> {
        let mut first_err = None;

        for (ch, slot) in channel::sweep() {
            match self.sample_channel(ch) {
                Ok((ref_value, ch_value)) => {
                    self.ref_readings[slot] = ref_value;
                    self.ch_readings[slot] = ch_value;
                    self.stale &= !(1 << slot);
                }
                Err(e) => {
                    self.stale |= 1 << slot;
                    if first_err.is_none() {
                        first_err = Some(e);
                    }
                }
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn report<W: uWrite + ?Sized>(&self, out: &mut W) -> Result<(), W::Error> {
        report::write_report(out, &self.ref_readings, &self.ch_readings)
    }

    pub fn idle(&mut self) {
        self.delay.delay_ms(self.timing.idle_ms);
    }

    /// One pass of the main loop: scan, `WARN:` on a failed cycle, report, idle.
    ///
    /// Always runs to the idle pause. If the sink rejects a write, the rest of that report is
    /// dropped and the first sink error is handed back.
    pub fn step<W: uWrite + ?Sized>(&mut self, out: &mut W) -> Result<(), W::Error> {
        let warned = match self.scan_cycle() {
            Ok(()) => Ok(()),
            Err(e) => ufmt::uwriteln!(out, "WARN: {}\r", e),
        };
        let reported = self.report(out);
        self.idle();

        warned.and(reported)
    }

    /// `step` forever. Sink errors are not fatal.
    pub fn run<W: uWrite + ?Sized>(&mut self, out: &mut W) -> ! {
        loop {
            let _ = self.step(out);
        }
    }
}
