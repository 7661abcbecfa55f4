use crate::channel::LogicalChannel;

/// Why a channel produced no fresh reading this cycle.
///
/// `P` is the select-line pin error, `A` the ADC error. On the Mega both are `Infallible`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError<P, A> {
    /// Driving a select line failed; the mux may be sitting on the wrong address.
    Select { channel: LogicalChannel, error: P },
    /// The reference or per-channel conversion failed.
    Sample { channel: LogicalChannel, error: A },
    /// The address has no slot (dead range 4-7 / 12-15).
    Unmapped(LogicalChannel),
}

impl<P, A> ScanError<P, A> {
    pub fn channel(&self) -> LogicalChannel {
        match self {
            ScanError::Select { channel, .. } | ScanError::Sample { channel, .. } => *channel,
            ScanError::Unmapped(channel) => *channel,
        }
    }
}

impl<P, A> ufmt::uDisplay for ScanError<P, A> {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        match self {
            ScanError::Select { channel, .. } => ufmt::uwrite!(f, "select lines failed on channel {}", channel),
            ScanError::Sample { channel, .. } => ufmt::uwrite!(f, "sample failed on channel {}", channel),
            ScanError::Unmapped(channel) => ufmt::uwrite!(f, "channel {} has no storage slot", channel),
        }
    }
}
