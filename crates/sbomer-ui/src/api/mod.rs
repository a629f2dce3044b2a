mod client;
mod envelope;
mod error;

pub use client::{PageRequest, SbomerClient, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
pub use envelope::{normalize_page, Page};
pub use error::{ApiError, Result};
