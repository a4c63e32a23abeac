//! Persistent key-value store abstraction
//!
//! Two logical buckets are used: system settings and motor profiles.
//! Writes are synchronous and take effect before the call returns; there
//! is no batching or versioning.

use heapless::String;

/// Longest string value a store must be able to hold
pub const MAX_STORED_STRING: usize = 24;

/// String value returned by [`KeyValueStore::get_str`]
pub type StoredString = String<MAX_STORED_STRING>;

/// Logical bucket a key lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Namespace {
    /// Telemetry flag and UI language
    System = 0,
    /// Profile count, active index and per-slot records
    Profiles = 1,
}

/// Per-slot profile fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ProfileField {
    Name = 0,
    HasBrake = 1,
    HasFg = 2,
    HasLd = 3,
    LdActiveLow = 4,
    HasStop = 5,
    StopActiveHigh = 6,
    HasEnable = 7,
    EnableActiveHigh = 8,
    Ppr = 9,
    MaxClockHz = 10,
}

impl ProfileField {
    /// Every field of a slot, in storage order
    pub const ALL: [ProfileField; 11] = [
        ProfileField::Name,
        ProfileField::HasBrake,
        ProfileField::HasFg,
        ProfileField::HasLd,
        ProfileField::LdActiveLow,
        ProfileField::HasStop,
        ProfileField::StopActiveHigh,
        ProfileField::HasEnable,
        ProfileField::EnableActiveHigh,
        ProfileField::Ppr,
        ProfileField::MaxClockHz,
    ];

    /// Short key suffix (`m{slot}_{suffix}`)
    pub fn suffix(self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::HasBrake => "br",
            ProfileField::HasFg => "fg",
            ProfileField::HasLd => "ld",
            ProfileField::LdActiveLow => "lda",
            ProfileField::HasStop => "st",
            ProfileField::StopActiveHigh => "sta",
            ProfileField::HasEnable => "en",
            ProfileField::EnableActiveHigh => "ena",
            ProfileField::Ppr => "ppr",
            ProfileField::MaxClockHz => "max",
        }
    }

    fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }
}

/// Every key the firmware persists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageKey {
    /// `tele`: telemetry enabled (bool)
    Telemetry,
    /// `lang`: UI language (u8)
    Language,
    /// `count`: number of stored profiles (u8)
    ProfileCount,
    /// `active`: active profile index, 255 = none (u8)
    ActiveProfile,
    /// `m{slot}_{field}`: one field of a profile slot
    Profile { slot: u8, field: ProfileField },
}

const CODE_COUNT: u8 = 0xF0;
const CODE_ACTIVE: u8 = 0xF1;
const SLOT_STRIDE: u8 = 16;

impl StorageKey {
    /// Key for one field of a profile slot
    pub fn profile(slot: usize, field: ProfileField) -> Self {
        StorageKey::Profile {
            slot: slot as u8,
            field,
        }
    }

    /// Bucket this key belongs to
    pub fn namespace(self) -> Namespace {
        match self {
            StorageKey::Telemetry | StorageKey::Language => Namespace::System,
            _ => Namespace::Profiles,
        }
    }

    /// Compact (bucket, field) code for flash record keys
    pub fn code(self) -> (u8, u8) {
        let field = match self {
            StorageKey::Telemetry => 0,
            StorageKey::Language => 1,
            StorageKey::ProfileCount => CODE_COUNT,
            StorageKey::ActiveProfile => CODE_ACTIVE,
            StorageKey::Profile { slot, field } => slot * SLOT_STRIDE + field as u8,
        };
        (self.namespace() as u8, field)
    }

    /// Inverse of [`StorageKey::code`]
    pub fn from_code(bucket: u8, field: u8) -> Option<Self> {
        match (bucket, field) {
            (0, 0) => Some(StorageKey::Telemetry),
            (0, 1) => Some(StorageKey::Language),
            (1, CODE_COUNT) => Some(StorageKey::ProfileCount),
            (1, CODE_ACTIVE) => Some(StorageKey::ActiveProfile),
            (1, code) if code < CODE_COUNT => Some(StorageKey::Profile {
                slot: code / SLOT_STRIDE,
                field: ProfileField::from_u8(code % SLOT_STRIDE)?,
            }),
            _ => None,
        }
    }
}

/// Errors from key-value store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Backend read/write failed
    Storage,
    /// Stored value has the wrong shape for the requested type
    Corrupted,
    /// Value does not fit the buffer
    BufferTooSmall,
    /// No space left for the record
    Full,
}

/// Persistent key-value store
///
/// `get_*` returns `Ok(None)` when the key has never been written.
pub trait KeyValueStore {
    fn get_bool(&mut self, key: StorageKey) -> Result<Option<bool>, StoreError>;
    fn put_bool(&mut self, key: StorageKey, value: bool) -> Result<(), StoreError>;

    fn get_u8(&mut self, key: StorageKey) -> Result<Option<u8>, StoreError>;
    fn put_u8(&mut self, key: StorageKey, value: u8) -> Result<(), StoreError>;

    fn get_u32(&mut self, key: StorageKey) -> Result<Option<u32>, StoreError>;
    fn put_u32(&mut self, key: StorageKey, value: u32) -> Result<(), StoreError>;

    fn get_str(&mut self, key: StorageKey) -> Result<Option<StoredString>, StoreError>;
    fn put_str(&mut self, key: StorageKey, value: &str) -> Result<(), StoreError>;

    /// Delete a key. Removing a missing key is not an error.
    fn remove(&mut self, key: StorageKey) -> Result<(), StoreError>;
}

/// Read helpers with fallback defaults
pub trait KeyValueStoreExt: KeyValueStore {
    fn bool_or(&mut self, key: StorageKey, default: bool) -> Result<bool, StoreError> {
        Ok(self.get_bool(key)?.unwrap_or(default))
    }

    fn u8_or(&mut self, key: StorageKey, default: u8) -> Result<u8, StoreError> {
        Ok(self.get_u8(key)?.unwrap_or(default))
    }

    fn u32_or(&mut self, key: StorageKey, default: u32) -> Result<u32, StoreError> {
        Ok(self.get_u32(key)?.unwrap_or(default))
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStoreExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip_for_every_slot_field() {
        for slot in 0..8 {
            for field in ProfileField::ALL {
                let key = StorageKey::profile(slot, field);
                let (bucket, code) = key.code();
                assert_eq!(bucket, Namespace::Profiles as u8);
                assert_eq!(StorageKey::from_code(bucket, code), Some(key));
            }
        }
    }

    #[test]
    fn test_system_keys_live_in_system_bucket() {
        assert_eq!(StorageKey::Telemetry.namespace(), Namespace::System);
        assert_eq!(StorageKey::Language.code(), (0, 1));
        assert_eq!(StorageKey::ActiveProfile.namespace(), Namespace::Profiles);
    }

    #[test]
    fn test_unknown_codes_rejected() {
        assert_eq!(StorageKey::from_code(2, 0), None);
        assert_eq!(StorageKey::from_code(1, 0x0B), None); // field 11 does not exist
        assert_eq!(StorageKey::from_code(0, 7), None);
    }
}
