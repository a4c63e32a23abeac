//! Flash-backed key-value store for RP2040
//!
//! Uses sequential-storage for wear-levelled records in the last 64KB of
//! flash. Each [`StorageKey`] maps to a two-byte [`RecordKey`]; values are
//! stored as a presence byte followed by the encoded value (see
//! [`motortest_hal::flash::value`]). Removing a key writes an empty record.
//!
//! The core's store contract is synchronous. The async sequential-storage
//! calls are driven to completion with `block_on`; RP2040 flash writes
//! stall the bus anyway, and the records are a handful of bytes.

use embassy_futures::block_on;
use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use motortest_core::traits::{KeyValueStore, StorageKey, StoreError, StoredString};
use motortest_hal::flash::value;
use motortest_hal::{FlashError, RecordKey};
use sequential_storage::cache::NoCache;
use sequential_storage::map;

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;
pub const STORE_PARTITION_SIZE: usize = 64 * 1024;
pub const STORE_PARTITION_START: usize = FLASH_SIZE - STORE_PARTITION_SIZE;

pub const STORE_RANGE: core::ops::Range<u32> =
    (STORE_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Scratch space for one record (header, key and value)
const RECORD_BUFFER: usize = 64;

/// First byte of every live value; a removed key holds an empty record
const PRESENT: u8 = 0x01;

/// Wear-levelled store in the top 64KB of flash
pub struct FlashKvStore<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> FlashKvStore<'d> {
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }

    /// Read a record into `out`; `Ok(None)` if absent or removed
    pub async fn fetch_raw(
        &mut self,
        key: RecordKey,
        out: &mut [u8],
    ) -> Result<Option<usize>, FlashError> {
        let mut data_buffer = [0u8; RECORD_BUFFER];

        let result = map::fetch_item::<RecordKey, &[u8], _>(
            &mut self.flash,
            STORE_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
        )
        .await;

        match result {
            Ok(Some([])) | Ok(None) => Ok(None),
            Ok(Some(data)) => {
                let len = data.len();
                if out.len() < len {
                    return Err(FlashError::BufferTooSmall);
                }
                out[..len].copy_from_slice(data);
                Ok(Some(len))
            }
            Err(e) => Err(flash_error(e)),
        }
    }

    pub async fn store_raw(&mut self, key: RecordKey, data: &[u8]) -> Result<(), FlashError> {
        let mut data_buffer = [0u8; RECORD_BUFFER];

        map::store_item(
            &mut self.flash,
            STORE_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
            &data,
        )
        .await
        .map_err(flash_error)
    }

    fn write_record(&mut self, key: StorageKey, record: &[u8]) -> Result<(), StoreError> {
        block_on(self.store_raw(record_key(key), record)).map_err(|e| {
            warn!("Flash write failed: {:?}", e);
            store_error(e)
        })
    }

    fn write(&mut self, key: StorageKey, payload: &[u8]) -> Result<(), StoreError> {
        let mut record = [0u8; RECORD_BUFFER];
        let len = payload.len() + 1;
        if len > record.len() {
            return Err(StoreError::BufferTooSmall);
        }
        record[0] = PRESENT;
        record[1..len].copy_from_slice(payload);
        self.write_record(key, &record[..len])
    }

    fn get_with<T>(
        &mut self,
        key: StorageKey,
        decode: impl FnOnce(&[u8]) -> Result<T, FlashError>,
    ) -> Result<Option<T>, StoreError> {
        let mut buf = [0u8; RECORD_BUFFER];
        let len = match block_on(self.fetch_raw(record_key(key), &mut buf)) {
            Ok(Some(len)) => len,
            Ok(None) => return Ok(None),
            Err(e) => return Err(store_error(e)),
        };
        match &buf[..len] {
            [PRESENT, payload @ ..] => decode(payload).map(Some).map_err(store_error),
            _ => Err(StoreError::Corrupted),
        }
    }
}

impl KeyValueStore for FlashKvStore<'_> {
    fn get_bool(&mut self, key: StorageKey) -> Result<Option<bool>, StoreError> {
        self.get_with(key, value::decode_bool)
    }

    fn put_bool(&mut self, key: StorageKey, v: bool) -> Result<(), StoreError> {
        self.write(key, &value::encode_bool(v))
    }

    fn get_u8(&mut self, key: StorageKey) -> Result<Option<u8>, StoreError> {
        self.get_with(key, value::decode_u8)
    }

    fn put_u8(&mut self, key: StorageKey, v: u8) -> Result<(), StoreError> {
        self.write(key, &[v])
    }

    fn get_u32(&mut self, key: StorageKey) -> Result<Option<u32>, StoreError> {
        self.get_with(key, value::decode_u32)
    }

    fn put_u32(&mut self, key: StorageKey, v: u32) -> Result<(), StoreError> {
        self.write(key, &value::encode_u32(v))
    }

    fn get_str(&mut self, key: StorageKey) -> Result<Option<StoredString>, StoreError> {
        self.get_with(key, |bytes| {
            let text = value::decode_str(bytes)?;
            let mut out = StoredString::new();
            out.push_str(text).map_err(|_| FlashError::BufferTooSmall)?;
            Ok(out)
        })
    }

    fn put_str(&mut self, key: StorageKey, v: &str) -> Result<(), StoreError> {
        self.write(key, v.as_bytes())
    }

    fn remove(&mut self, key: StorageKey) -> Result<(), StoreError> {
        self.write_record(key, &[])
    }
}

fn record_key(key: StorageKey) -> RecordKey {
    let (bucket, field) = key.code();
    RecordKey::new(bucket, field)
}

fn flash_error<E>(e: sequential_storage::Error<E>) -> FlashError {
    match e {
        sequential_storage::Error::FullStorage => FlashError::Full,
        sequential_storage::Error::Corrupted { .. } => FlashError::Corrupted,
        sequential_storage::Error::BufferTooSmall(_) => FlashError::BufferTooSmall,
        _ => FlashError::Storage,
    }
}

fn store_error(e: FlashError) -> StoreError {
    match e {
        FlashError::Full => StoreError::Full,
        FlashError::Corrupted => StoreError::Corrupted,
        FlashError::BufferTooSmall => StoreError::BufferTooSmall,
        FlashError::Flash | FlashError::Storage | FlashError::NotFound => StoreError::Storage,
    }
}
