pub mod config;
pub mod core;
pub mod domain;
pub mod naming;
pub mod utils;

pub use crate::config::{AppConfig, LocalStorage, NamingConfig};
pub use crate::core::draw::{DrawEngine, DrawState};
pub use crate::core::partition::Grouping;
pub use crate::core::roster::Roster;
pub use crate::domain::model::{DrawSettings, Group, Participant};
pub use crate::domain::ports::{GroupNamer, Storage};
pub use crate::naming::GeminiNamer;
pub use crate::utils::error::{Result, TeamError};
