pub mod mapper;
pub mod panel;
pub mod repository;

pub use crate::domain::model::{Category, Logo, Sponsor, SponsorForm, SponsorPatch};
pub use crate::domain::ports::{LogoStore, RawRecord, RecordStore};
pub use crate::utils::error::Result;
