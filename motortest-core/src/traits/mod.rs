//! Hardware and boundary abstraction traits
//!
//! These traits define the interfaces between the core logic and the
//! outside world. Board crates implement them; tests use fakes.

pub mod input;
pub mod port;
pub mod render;
pub mod store;

pub use input::{Button, RawButtons};
pub use port::{InputLine, MotorPort, OutputLine};
pub use render::RenderSink;
pub use store::{
    KeyValueStore, KeyValueStoreExt, Namespace, ProfileField, StorageKey, StoreError,
    StoredString, MAX_STORED_STRING,
};
