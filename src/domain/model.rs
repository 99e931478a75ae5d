use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Untyped backend field map, keyed by the backend's column names.
pub type FieldMap = HashMap<String, serde_json::Value>;

/// Sponsor logo at the form/repository boundary. A persisted logo is always
/// a URL reference; `Pending` only exists between form submission and the
/// upload completing, and must never be written to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Logo {
    Remote(String),
    Pending {
        bytes: Vec<u8>,
        file_name: String,
        content_type: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sponsor {
    /// Opaque identifier assigned by the backend at creation.
    pub id: String,
    pub name: String,
    pub industry: Option<String>,
    pub contact_person: String,
    pub contact_email: String,
    pub contact_phone: String,
    /// Sponsorship level; matches a category name by convention only, the
    /// backend does not enforce it.
    pub level: String,
    /// Calendar date, stored by the backend as a plain string.
    pub contract_end: String,
    pub logo_url: Option<String>,
}

/// Partial update payload. Fields left as `None` are not sent, so two
/// patches for one logical edit (scalars first, logo after upload) apply
/// independently.
#[derive(Debug, Clone, Default)]
pub struct SponsorPatch {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub level: Option<String>,
    pub contract_end: Option<String>,
    pub logo: Option<Logo>,
}

impl SponsorPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.industry.is_none()
            && self.contact_person.is_none()
            && self.contact_email.is_none()
            && self.contact_phone.is_none()
            && self.level.is_none()
            && self.contract_end.is_none()
            && self.logo.is_none()
    }
}

/// A new-sponsor form submission. The backend assigns the id.
#[derive(Debug, Clone)]
pub struct SponsorForm {
    pub name: String,
    pub industry: Option<String>,
    pub contact_person: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub level: String,
    pub contract_end: String,
    pub logo: Option<Logo>,
}

/// A sponsorship category is not a backend entity of its own; it is the
/// distinct set of non-empty `level` values across sponsor records.
pub type Category = String;
