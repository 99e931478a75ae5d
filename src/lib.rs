pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{AirtableStore, S3LogoStore};
pub use config::{AppConfig, Capabilities, LogoInputMode};
pub use core::panel::{PanelPhase, SponsorPanel};
pub use core::repository::SponsorRepository;
pub use utils::error::{DeskError, Result};
