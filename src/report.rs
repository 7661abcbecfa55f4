//! Serial text format for one scan, and the reader side the host uses to pick it apart.
//!
//! ```text
//! Sensors 0-7 Readings:
//! A0 Value[0] = 512
//! ...
//! Sensors 8-15 Readings:
//! Analog Value[0] = 498
//! ...
//! ```

use ufmt::uWrite;

use crate::channel::StorageIndex;
use crate::SLOT_COUNT;

pub const REFERENCE_HEADER: &str = "Sensors 0-7 Readings:";
pub const CHANNEL_HEADER: &str = "Sensors 8-15 Readings:";
pub const REFERENCE_LABEL: &str = "A0 Value";
pub const CHANNEL_LABEL: &str = "Analog Value";

/// Lines per report: a header plus one line per slot, for each bank.
pub const REPORT_LINES: usize = 2 * (1 + SLOT_COUNT);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bank {
    Reference,
    Channel,
}

impl Bank {
    pub const fn label(self) -> &'static str {
        match self {
            Bank::Reference => REFERENCE_LABEL,
            Bank::Channel => CHANNEL_LABEL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub bank: Bank,
    pub index: StorageIndex,
    pub value: u16,
}

pub fn write_report<W: uWrite + ?Sized>(
    out: &mut W,
    reference: &[u16; SLOT_COUNT],
    channel: &[u16; SLOT_COUNT],
) -> Result<(), W::Error> {
    write_bank(out, REFERENCE_HEADER, Bank::Reference, reference)?;
    write_bank(out, CHANNEL_HEADER, Bank::Channel, channel)
}

fn write_bank<W: uWrite + ?Sized>(out: &mut W, header: &str, bank: Bank, values: &[u16; SLOT_COUNT]) -> Result<(), W::Error> {
    ufmt::uwriteln!(out, "{}\r", header)?;
    for (i, &v) in values.iter().enumerate() {
        ufmt::uwriteln!(out, "{}[{}] = {}\r", bank.label(), i, v)?;
    }

    Ok(())
}

/// Find a `<label>[<index>] = <value>` reading anywhere in `line`, the way the host's
/// `re.search` does: leading and trailing noise is ignored, the index and value must be plain
/// ASCII digits. Headers, status lines and anything else give `None`.
pub fn parse_line(line: &str) -> Option<Reading> {
    [Bank::Reference, Bank::Channel].into_iter().find_map(|bank| {
        let label = bank.label();
        line.match_indices(label)
            .find_map(|(at, _)| parse_after_label(&line[at + label.len()..], bank))
    })
}

fn parse_after_label(rest: &str, bank: Bank) -> Option<Reading> {
    let (index, rest) = digits(rest.strip_prefix('[')?)?;
    let (value, _) = digits(rest.strip_prefix("] = ")?)?;

    let index: StorageIndex = index.parse().ok()?;
    if index >= SLOT_COUNT {
        return None;
    }

    Some(Reading { bank, index, value: value.parse().ok()? })
}

// Leading run of ASCII digits and whatever follows it; `None` if there are no digits.
fn digits(s: &str) -> Option<(&str, &str)> {
    let n = s.bytes().take_while(u8::is_ascii_digit).count();
    if n == 0 {
        return None;
    }

    Some(s.split_at(n))
}
