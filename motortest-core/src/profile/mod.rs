//! Motor profiles and their persisted store

pub mod store;
pub mod types;

pub use store::{ProfileError, ProfileStore, NO_ACTIVE};
pub use types::{name_from, MotorProfile, ProfileName};
