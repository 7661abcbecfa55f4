use crate::SELECT_LINES;

pub fn bits4(nibble: u8) -> [bool; SELECT_LINES] { // little-endian (0-3), i.e. [line 0, line 1, line 2, line 3]
    [nibble & 0x1 == 1, nibble >> 1 & 0x1 == 1, nibble >> 2 & 0x1 == 1, nibble >> 3 & 0x1 == 1]
}

pub fn comp4(bits: [bool; SELECT_LINES]) -> u8 {
    (bits[3] as u8) << 3 | (bits[2] as u8) << 2 | (bits[1] as u8) << 1 | bits[0] as u8
}
