// Adapters layer: concrete clients for the external services (tabular
// record backend, object storage).

pub mod airtable;
pub mod s3;

pub use airtable::AirtableStore;
pub use s3::S3LogoStore;
