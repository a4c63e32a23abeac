//! Persisted system settings

use crate::i18n::Language;
use crate::traits::{KeyValueStore, KeyValueStoreExt, StorageKey, StoreError};

/// Telemetry flag and UI language
///
/// Read once at start-up; every change is written through immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SystemSettings {
    pub telemetry: bool,
    pub language: Language,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            telemetry: false,
            language: Language::Spanish,
        }
    }
}

impl SystemSettings {
    /// Load settings, falling back to defaults for anything unreadable
    pub fn load(kv: &mut impl KeyValueStore) -> Self {
        let defaults = Self::default();

        let telemetry = kv
            .bool_or(StorageKey::Telemetry, defaults.telemetry)
            .unwrap_or_else(|e| {
                warn!("Telemetry setting unreadable: {:?}", e);
                defaults.telemetry
            });

        let language = match kv.get_u8(StorageKey::Language) {
            Ok(Some(code)) => Language::from_code(code).unwrap_or(defaults.language),
            Ok(None) => defaults.language,
            Err(e) => {
                warn!("Language setting unreadable: {:?}", e);
                defaults.language
            }
        };

        Self {
            telemetry,
            language,
        }
    }

    pub fn set_telemetry(
        &mut self,
        kv: &mut impl KeyValueStore,
        enabled: bool,
    ) -> Result<(), StoreError> {
        self.telemetry = enabled;
        info!("Telemetry {}", if enabled { "on" } else { "off" });
        kv.put_bool(StorageKey::Telemetry, enabled)
    }

    pub fn set_language(
        &mut self,
        kv: &mut impl KeyValueStore,
        language: Language,
    ) -> Result<(), StoreError> {
        self.language = language;
        info!("Language set to {:?}", language);
        kv.put_u8(StorageKey::Language, language.code())
    }
}
