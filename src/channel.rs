use embedded_hal::digital::PinState;

use crate::bitops::bits4;
use crate::{CHANNEL_COUNT, SELECT_LINES};

/// Slot in the reading buffers, always in `0..SLOT_COUNT`.
pub type StorageIndex = usize;

// Mux address → buffer slot. Only 0-3 and 8-11 are wired up on the board; the rest are dead
// addresses and never get selected. Open question whether that is deliberate wiring.
const STORAGE_MAP: [Option<StorageIndex>; CHANNEL_COUNT] = [
    Some(0), Some(1), Some(2), Some(3), None, None, None, None,
    Some(4), Some(5), Some(6), Some(7), None, None, None, None,
];

/// A mux address in `0..16`. The value is written verbatim onto the select lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogicalChannel(u8);

impl LogicalChannel {
    pub const fn new(address: u8) -> Option<Self> {
        if (address as usize) < CHANNEL_COUNT {
            Some(Self(address))
        } else {
            None
        }
    }

    pub const fn address(self) -> u8 {
        self.0
    }

    pub const fn storage_index(self) -> Option<StorageIndex> {
        STORAGE_MAP[self.0 as usize]
    }

    /// Line levels for this address, line 0 carrying bit 0.
    pub fn select_levels(self) -> [PinState; SELECT_LINES] {
        bits4(self.0).map(PinState::from)
    }

    pub fn all() -> impl Iterator<Item = LogicalChannel> {
        (0..CHANNEL_COUNT as u8).map(LogicalChannel)
    }
}

impl ufmt::uDisplay for LogicalChannel {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        ufmt::uDisplay::fmt(&self.0, f)
    }
}

/// Visit order for one cycle: every populated address, ascending, paired with its slot.
pub fn sweep() -> impl Iterator<Item = (LogicalChannel, StorageIndex)> {
    LogicalChannel::all().filter_map(|ch| ch.storage_index().map(|slot| (ch, slot)))
}
