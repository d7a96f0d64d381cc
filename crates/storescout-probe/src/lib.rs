//! Candidate page verification: fetch with protocol downgrade, platform
//! fingerprinting, and contact email extraction.

mod classify;
mod client;
mod emails;
mod error;
mod types;

pub use classify::{classify_page, PageClassification};
pub use client::ProbeClient;
pub use emails::extract_emails;
pub use error::ProbeError;
pub use types::StoreRecord;
