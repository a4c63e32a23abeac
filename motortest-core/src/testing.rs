//! Host-side fakes for unit tests

use std::collections::HashMap;

use crate::traits::{
    Button, InputLine, KeyValueStore, MotorPort, OutputLine, RawButtons, RenderSink, StorageKey,
    StoreError, StoredString,
};

/// Raw buttons controlled by the test
#[derive(Debug, Default, Clone)]
pub struct ScriptedButtons {
    low: [bool; 4],
}

impl ScriptedButtons {
    pub fn press(&mut self, button: Button) {
        self.low[button.index()] = true;
    }

    pub fn release(&mut self, button: Button) {
        self.low[button.index()] = false;
    }
}

impl RawButtons for ScriptedButtons {
    fn is_low(&mut self, button: Button) -> bool {
        self.low[button.index()]
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Bool(bool),
    U8(u8),
    U32(u32),
    Str(StoredString),
}

/// In-memory key-value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<(u8, u8), Value>,
    /// Number of successful writes (puts and removes)
    pub writes: usize,
    /// Fail every operation with `StoreError::Storage`
    pub broken: bool,
}

impl MemoryStore {
    pub fn contains(&self, key: StorageKey) -> bool {
        self.values.contains_key(&key.code())
    }

    fn get(&self, key: StorageKey) -> Result<Option<&Value>, StoreError> {
        if self.broken {
            return Err(StoreError::Storage);
        }
        Ok(self.values.get(&key.code()))
    }

    fn put(&mut self, key: StorageKey, value: Value) -> Result<(), StoreError> {
        if self.broken {
            return Err(StoreError::Storage);
        }
        self.values.insert(key.code(), value);
        self.writes += 1;
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get_bool(&mut self, key: StorageKey) -> Result<Option<bool>, StoreError> {
        match self.get(key)? {
            None => Ok(None),
            Some(Value::Bool(v)) => Ok(Some(*v)),
            Some(_) => Err(StoreError::Corrupted),
        }
    }

    fn put_bool(&mut self, key: StorageKey, value: bool) -> Result<(), StoreError> {
        self.put(key, Value::Bool(value))
    }

    fn get_u8(&mut self, key: StorageKey) -> Result<Option<u8>, StoreError> {
        match self.get(key)? {
            None => Ok(None),
            Some(Value::U8(v)) => Ok(Some(*v)),
            Some(_) => Err(StoreError::Corrupted),
        }
    }

    fn put_u8(&mut self, key: StorageKey, value: u8) -> Result<(), StoreError> {
        self.put(key, Value::U8(value))
    }

    fn get_u32(&mut self, key: StorageKey) -> Result<Option<u32>, StoreError> {
        match self.get(key)? {
            None => Ok(None),
            Some(Value::U32(v)) => Ok(Some(*v)),
            Some(_) => Err(StoreError::Corrupted),
        }
    }

    fn put_u32(&mut self, key: StorageKey, value: u32) -> Result<(), StoreError> {
        self.put(key, Value::U32(value))
    }

    fn get_str(&mut self, key: StorageKey) -> Result<Option<StoredString>, StoreError> {
        match self.get(key)? {
            None => Ok(None),
            Some(Value::Str(v)) => Ok(Some(v.clone())),
            Some(_) => Err(StoreError::Corrupted),
        }
    }

    fn put_str(&mut self, key: StorageKey, value: &str) -> Result<(), StoreError> {
        let mut s = StoredString::new();
        s.push_str(value).map_err(|_| StoreError::BufferTooSmall)?;
        self.put(key, Value::Str(s))
    }

    fn remove(&mut self, key: StorageKey) -> Result<(), StoreError> {
        if self.broken {
            return Err(StoreError::Storage);
        }
        self.values.remove(&key.code());
        self.writes += 1;
        Ok(())
    }
}

/// Motor port that records what the runtime drives
#[derive(Debug, Default, Clone)]
pub struct RecordingPort {
    /// Last clock frequency requested
    pub clock_hz: u32,
    /// Number of clock reconfigurations
    pub clock_writes: usize,
    /// Last level written per output line (None = never written)
    pub outputs: [Option<bool>; 4],
    /// Raw input levels presented to the runtime
    pub fault_high: bool,
    pub enable_in_high: bool,
    /// Requests below this run no clock at all
    pub floor_hz: u32,
}

impl RecordingPort {
    pub fn output(&self, line: OutputLine) -> Option<bool> {
        self.outputs[line as usize]
    }
}

impl MotorPort for RecordingPort {
    fn set_clock(&mut self, hz: u32) -> u32 {
        self.clock_hz = if hz < self.floor_hz { 0 } else { hz };
        self.clock_writes += 1;
        self.clock_hz
    }

    fn write_line(&mut self, line: OutputLine, high: bool) {
        self.outputs[line as usize] = Some(high);
    }

    fn read_line(&mut self, line: InputLine) -> bool {
        match line {
            InputLine::Fault => self.fault_high,
            InputLine::Enable => self.enable_in_high,
        }
    }
}

/// Render sink that keeps the last frame as text
#[derive(Debug, Default, Clone)]
pub struct FrameLog {
    pub header: std::string::String,
    pub items: std::vec::Vec<std::string::String>,
    pub highlighted: usize,
    pub scroll_offset: usize,
    pub prompt: Option<(std::string::String, std::string::String)>,
    pub status: std::vec::Vec<std::string::String>,
    pub footer: std::string::String,
    pub frames: usize,
}

impl FrameLog {
    pub fn has_status(&self, needle: &str) -> bool {
        self.status.iter().any(|l| l.contains(needle))
    }
}

impl RenderSink for FrameLog {
    fn begin(&mut self) {
        let frames = self.frames;
        *self = FrameLog {
            frames,
            ..Default::default()
        };
    }

    fn header(&mut self, text: &str) {
        self.header = text.into();
    }

    fn list(&mut self, items: &[&str], highlighted: usize, scroll_offset: usize) {
        self.items = items.iter().map(|s| (*s).into()).collect();
        self.highlighted = highlighted;
        self.scroll_offset = scroll_offset;
    }

    fn prompt(&mut self, prompt: &str, value: &str) {
        self.prompt = Some((prompt.into(), value.into()));
    }

    fn status(&mut self, line: &str) {
        self.status.push(line.into());
    }

    fn footer(&mut self, hint: &str) {
        self.footer = hint.into();
    }

    fn finish(&mut self) {
        self.frames += 1;
    }
}
