pub mod draw;
pub mod export;
pub mod partition;
pub mod roster;

pub use crate::domain::model::{DrawSettings, Group, Participant};
pub use crate::domain::ports::{GroupNamer, Storage};
pub use crate::utils::error::Result;
