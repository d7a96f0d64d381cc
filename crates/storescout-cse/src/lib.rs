//! Client for the Google Custom Search JSON API.

mod client;
mod error;
mod types;

pub use client::{CseClient, MAX_START, PAGE_SIZE};
pub use error::SearchError;
pub use types::{CseItem, CsePage};
