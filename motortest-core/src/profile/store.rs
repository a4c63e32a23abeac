//! Fixed-capacity profile store
//!
//! Up to [`MAX_PROFILES`] profiles live in numbered slots of the key-value
//! store, in insertion order, alongside a `count` and an `active` index.
//! Every mutating call writes through immediately.
//!
//! Invariant: `active < count` whenever `count > 0`. An empty store has
//! no active profile ([`NO_ACTIVE`]).

use crate::config::MAX_PROFILES;
use crate::traits::{KeyValueStore, KeyValueStoreExt, ProfileField, StorageKey, StoreError};

use super::types::{
    name_from, MotorProfile, ProfileName, DEFAULT_MAX_CLOCK_HZ, DEFAULT_NAME, DEFAULT_PPR,
};

/// Persisted value of `active` when no profile exists
pub const NO_ACTIVE: u8 = 255;

/// Profile store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProfileError {
    /// All slots are in use, or the index is past the last slot
    StoreFull,
    /// Index is not an existing profile
    NotFound,
    /// No profile is active (store is empty)
    Empty,
    /// Underlying key-value store failed
    Storage(StoreError),
}

impl From<StoreError> for ProfileError {
    fn from(e: StoreError) -> Self {
        ProfileError::Storage(e)
    }
}

/// Persisted list of motor profiles
pub struct ProfileStore<S> {
    kv: S,
    count: u8,
    active: u8,
}

impl<S: KeyValueStore> ProfileStore<S> {
    /// Open the store, validating the persisted count and active index
    ///
    /// Never fails: an unreadable store is treated as empty.
    pub fn open(mut kv: S) -> Self {
        let mut count = match kv.u8_or(StorageKey::ProfileCount, 0) {
            Ok(count) => count,
            Err(e) => {
                warn!("Profile count unreadable: {:?}", e);
                0
            }
        };

        if count as usize > MAX_PROFILES {
            warn!("Stored profile count {} out of range, resetting", count);
            count = 0;
            if let Err(e) = kv.put_u8(StorageKey::ProfileCount, 0) {
                warn!("Failed to reset profile count: {:?}", e);
            }
        }

        let mut active = kv.u8_or(StorageKey::ActiveProfile, 0).unwrap_or(0);
        if count == 0 {
            active = NO_ACTIVE;
        } else if active >= count {
            active = 0;
            if let Err(e) = kv.put_u8(StorageKey::ActiveProfile, 0) {
                warn!("Failed to reset active profile: {:?}", e);
            }
        }

        info!("Profile store opened: {} profiles", count);
        Self { kv, count, active }
    }

    /// Number of stored profiles (0-8)
    pub fn count(&self) -> usize {
        self.count as usize
    }

    /// Index of the active profile, `None` when the store is empty
    pub fn active_index(&self) -> Option<usize> {
        if self.active < self.count {
            Some(self.active as usize)
        } else {
            None
        }
    }

    /// Whether all slots are in use
    pub fn is_full(&self) -> bool {
        self.count() >= MAX_PROFILES
    }

    /// Read profile `idx`; missing fields take their defaults
    pub fn load(&mut self, idx: usize) -> Result<MotorProfile, ProfileError> {
        if idx >= self.count() {
            return Err(ProfileError::NotFound);
        }

        let key = |field| StorageKey::profile(idx, field);
        let kv = &mut self.kv;

        let name = match kv.get_str(key(ProfileField::Name))? {
            Some(stored) => name_from(&stored),
            None => name_from(DEFAULT_NAME),
        };

        Ok(MotorProfile {
            name,
            has_brake: kv.bool_or(key(ProfileField::HasBrake), false)?,
            has_fg: kv.bool_or(key(ProfileField::HasFg), false)?,
            has_ld: kv.bool_or(key(ProfileField::HasLd), false)?,
            ld_active_low: kv.bool_or(key(ProfileField::LdActiveLow), true)?,
            has_stop: kv.bool_or(key(ProfileField::HasStop), false)?,
            stop_active_high: kv.bool_or(key(ProfileField::StopActiveHigh), true)?,
            has_enable: kv.bool_or(key(ProfileField::HasEnable), false)?,
            enable_active_high: kv.bool_or(key(ProfileField::EnableActiveHigh), true)?,
            pulses_per_rev: kv.u8_or(key(ProfileField::Ppr), DEFAULT_PPR)?,
            max_clock_hz: kv.u32_or(key(ProfileField::MaxClockHz), DEFAULT_MAX_CLOCK_HZ)?,
        })
    }

    /// Write profile `idx`
    ///
    /// `idx < count` overwrites, `idx == count` appends. Anything past the
    /// end is rejected so slots stay dense.
    pub fn save(&mut self, idx: usize, profile: &MotorProfile) -> Result<(), ProfileError> {
        if idx >= MAX_PROFILES {
            return Err(ProfileError::StoreFull);
        }
        if idx > self.count() {
            return Err(ProfileError::NotFound);
        }

        self.write_slot(idx, profile)?;

        if idx == self.count() {
            self.count += 1;
            self.kv.put_u8(StorageKey::ProfileCount, self.count)?;
            if self.active == NO_ACTIVE || self.active >= self.count {
                self.active = 0;
                self.kv.put_u8(StorageKey::ActiveProfile, 0)?;
            }
        }

        Ok(())
    }

    /// Append a profile, returning its index
    pub fn append(&mut self, profile: &MotorProfile) -> Result<usize, ProfileError> {
        if self.is_full() {
            return Err(ProfileError::StoreFull);
        }
        let idx = self.count();
        self.save(idx, profile)?;
        Ok(idx)
    }

    /// Delete profile `idx`, shifting later profiles down
    ///
    /// Out-of-range indices are ignored.
    pub fn remove(&mut self, idx: usize) -> Result<(), ProfileError> {
        if idx >= self.count() {
            debug!("Ignoring remove of missing profile {}", idx);
            return Ok(());
        }

        let last = self.count() - 1;
        for i in idx..last {
            let next = self.load(i + 1)?;
            self.write_slot(i, &next)?;
        }

        for field in ProfileField::ALL {
            self.kv.remove(StorageKey::profile(last, field))?;
        }

        self.count -= 1;
        self.kv.put_u8(StorageKey::ProfileCount, self.count)?;

        if self.active >= self.count {
            self.active = if self.count > 0 { 0 } else { NO_ACTIVE };
            self.kv.put_u8(StorageKey::ActiveProfile, self.active)?;
        }

        info!("Removed profile {}, {} left", idx, self.count);
        Ok(())
    }

    /// Mark profile `idx` active; out-of-range indices are ignored
    pub fn set_active(&mut self, idx: usize) -> Result<(), ProfileError> {
        if idx >= self.count() {
            return Ok(());
        }
        self.active = idx as u8;
        self.kv.put_u8(StorageKey::ActiveProfile, self.active)?;
        Ok(())
    }

    /// Read the active profile
    pub fn load_active(&mut self) -> Result<MotorProfile, ProfileError> {
        match self.active_index() {
            Some(idx) => self.load(idx),
            None => Err(ProfileError::Empty),
        }
    }

    /// Display name of profile `idx`, `"-"` when out of range
    pub fn name_of(&mut self, idx: usize) -> ProfileName {
        if idx >= self.count() {
            return name_from("-");
        }
        match self.kv.get_str(StorageKey::profile(idx, ProfileField::Name)) {
            Ok(Some(stored)) => name_from(&stored),
            _ => name_from(DEFAULT_NAME),
        }
    }

    /// Underlying key-value store (shared with system settings)
    pub fn kv_mut(&mut self) -> &mut S {
        &mut self.kv
    }

    fn write_slot(&mut self, idx: usize, p: &MotorProfile) -> Result<(), StoreError> {
        let key = |field| StorageKey::profile(idx, field);
        let kv = &mut self.kv;

        kv.put_str(key(ProfileField::Name), p.name.as_str())?;
        kv.put_bool(key(ProfileField::HasBrake), p.has_brake)?;
        kv.put_bool(key(ProfileField::HasFg), p.has_fg)?;
        kv.put_bool(key(ProfileField::HasLd), p.has_ld)?;
        kv.put_bool(key(ProfileField::LdActiveLow), p.ld_active_low)?;
        kv.put_bool(key(ProfileField::HasStop), p.has_stop)?;
        kv.put_bool(key(ProfileField::StopActiveHigh), p.stop_active_high)?;
        kv.put_bool(key(ProfileField::HasEnable), p.has_enable)?;
        kv.put_bool(key(ProfileField::EnableActiveHigh), p.enable_active_high)?;
        kv.put_u8(key(ProfileField::Ppr), p.pulses_per_rev)?;
        kv.put_u32(key(ProfileField::MaxClockHz), p.max_clock_hz)?;
        Ok(())
    }
}
