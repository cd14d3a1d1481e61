//! Remote data access: fetching the schedule bin and decoding it.
//!
//! The data provider serves a single JSON document holding every series,
//! circuit, and event. Requests carry a static access key header.

pub mod client;
pub mod decode;
pub mod error;

pub use client::{data_headers, parse_url, ApiClient, Fetcher, ACCESS_KEY_HEADER, BIN_META_HEADER};
pub use decode::decode;
pub use error::{DecodeError, FetchError, RefreshError};
