//! Flash record key abstraction
//!
//! Flash-backed key-value stores address each record with a two-byte
//! key: a bucket byte and a field byte. The meaning of the bytes belongs
//! to the application; this crate only fixes the wire shape so chip HALs
//! can hand it to `sequential-storage`.

/// Two-byte record key (bucket, field)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RecordKey {
    /// Logical bucket (namespace)
    pub bucket: u8,
    /// Field identifier inside the bucket
    pub field: u8,
}

impl RecordKey {
    /// Create a key from its parts
    pub const fn new(bucket: u8, field: u8) -> Self {
        Self { bucket, field }
    }

    /// Encode as two bytes
    pub fn to_bytes(self) -> [u8; 2] {
        [self.bucket, self.field]
    }

    /// Decode from the first two bytes of `bytes`
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [bucket, field, ..] => Some(Self::new(*bucket, *field)),
            _ => None,
        }
    }
}

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Flash operation failed
    Flash,
    /// Storage operation failed
    Storage,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Data corrupted or invalid
    Corrupted,
    /// Storage is full
    Full,
}

/// Byte encodings for record values
///
/// Every value is stored as a plain byte slice. An empty slice marks a
/// removed record.
pub mod value {
    use super::FlashError;

    pub fn encode_bool(value: bool) -> [u8; 1] {
        [value as u8]
    }

    pub fn decode_bool(bytes: &[u8]) -> Result<bool, FlashError> {
        match bytes {
            [0] => Ok(false),
            [1] => Ok(true),
            _ => Err(FlashError::Corrupted),
        }
    }

    pub fn decode_u8(bytes: &[u8]) -> Result<u8, FlashError> {
        match bytes {
            [value] => Ok(*value),
            _ => Err(FlashError::Corrupted),
        }
    }

    pub fn encode_u32(value: u32) -> [u8; 4] {
        value.to_le_bytes()
    }

    pub fn decode_u32(bytes: &[u8]) -> Result<u32, FlashError> {
        let raw: [u8; 4] = bytes.try_into().map_err(|_| FlashError::Corrupted)?;
        Ok(u32::from_le_bytes(raw))
    }

    pub fn decode_str(bytes: &[u8]) -> Result<&str, FlashError> {
        core::str::from_utf8(bytes).map_err(|_| FlashError::Corrupted)
    }
}

#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for RecordKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        if buffer.len() < 2 {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[..2].copy_from_slice(&self.to_bytes());
        Ok(2)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        if buffer.len() < 2 {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        RecordKey::from_bytes(buffer)
            .map(|key| (key, 2))
            .ok_or(sequential_storage::map::SerializationError::InvalidFormat)
    }
}
