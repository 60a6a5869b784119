/// Contract between a record type and the table that persists it.
///
/// Implementations encode into exactly `ENCODED_LEN` bytes using the
/// `codec` field helpers; the table hands `decode` buffers of that same
/// length, never shorter.
pub trait Record: Sized {
    /// Table name used in diagnostics and log fields.
    const NAME: &'static str;
    /// On-disk width of one encoded record.
    const ENCODED_LEN: usize;

    fn encode(&self, buf: &mut [u8]);
    fn decode(buf: &[u8]) -> Result<Self, DecodeError>;
}

/// A stored field byte that no longer maps to its domain type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} byte {value:#04x}")]
pub struct DecodeError {
    pub field: &'static str,
    pub value: u8,
}
