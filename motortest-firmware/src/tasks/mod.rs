//! Embassy async tasks
//!
//! The tachometer task only counts edges; everything else happens in the
//! control task's synchronous tick.

pub mod control;
pub mod tach;

pub use control::control_task;
pub use tach::tach_task;
