//! Track detail, search, and streaming URL APIs.
//!
//! # Endpoints
//!
//! ## `track`: `GET track/get`
//!
//! Request: `track_id=5966783`
//!
//! Response: a single track object
//! ```json
//! {
//!   "id": 5966783, "title": "So What", "duration": 562,
//!   "track_number": 1, "media_number": 1,
//!   "performer": { "id": 38575, "name": "Miles Davis" },
//!   "album": { "id": "0060253780968", "title": "Kind Of Blue", ... },
//!   "maximum_bit_depth": 24, "maximum_sampling_rate": 192
//! }
//! ```
//!
//! ## `search_tracks`: `GET track/search`
//!
//! Request: `query`, `limit`, `offset`. Response: `{ "tracks": { "items": [...], "total": n } }`.
//!
//! ## `track_file_url`: `GET track/getFileUrl` (signed)
//!
//! Request: `track_id`, `format_id`, `intent` plus `request_ts` / `request_sig`.
//!
//! Response:
//! ```json
//! {
//!   "track_id": 5966783, "duration": 562, "format_id": 27,
//!   "mime_type": "audio/flac", "sampling_rate": 192, "bit_depth": 24,
//!   "url": "https://streaming-qobuz-std.akamaized.net/file?..."
//! }
//! ```

use crate::client::QobuzClient;
use crate::error::Result;
use crate::signer::{Params, params};
use crate::transport::Transport;
use crate::types::{AudioFormat, FileUrl, Intent, Page, Track};

impl<T: Transport> QobuzClient<T> {
    /// Get track metadata by id.
    pub fn track(&self, id: u64) -> Result<Track> {
        self.fetch("track/get", params([("track_id", id.to_string())]))
    }

    /// Search the catalog for tracks.
    pub fn search_tracks(&self, query: &str, limit: u64, offset: u64) -> Result<Page<Track>> {
        self.fetch_page("track/search", "tracks", search_params(query, limit, offset))
    }

    /// Get a streaming URL for a track.
    ///
    /// The server may return a lower format than requested, or no `url` at
    /// all for tracks the user cannot stream; inspect
    /// [`FileUrl::restrictions`] in that case.
    ///
    /// # Errors
    ///
    /// [`QobuzError::Configuration`](crate::QobuzError::Configuration) if no
    /// app secret is registered; this endpoint is always signed.
    pub fn track_file_url(&self, id: u64, format: AudioFormat, intent: Intent) -> Result<FileUrl> {
        self.fetch(
            "track/getFileUrl",
            params([
                ("track_id", id.to_string()),
                ("format_id", format.id().to_string()),
                ("intent", intent.as_str().to_owned()),
            ]),
        )
    }
}

pub(crate) fn search_params(query: &str, limit: u64, offset: u64) -> Params {
    params([
        ("query", query.to_owned()),
        ("limit", limit.to_string()),
        ("offset", offset.to_string()),
    ])
}
