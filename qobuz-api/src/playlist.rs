//! Playlist APIs.
//!
//! Read endpoints work without login for public playlists. Creating,
//! deleting and editing playlists, and listing the user's own playlists,
//! need a user session.
//!
//! `playlist/addTracks` and `playlist/deleteTracks` take comma-separated id
//! lists in the query string. Long lists are split into requests of at most
//! [`MAX_IDS_PER_REQUEST`] ids to keep the URL short.
//!
//! Response of `playlist/get` with `extra=tracks`:
//! ```json
//! {
//!   "id": 1234, "name": "Late night", "tracks_count": 2,
//!   "is_public": false, "is_collaborative": false,
//!   "owner": { "id": 42, "name": "me" },
//!   "tracks": { "total": 2, "items": [ { "id": 1, "playlist_track_id": 900, ... } ] }
//! }
//! ```

use crate::client::{QobuzClient, is_success, page_at};
use crate::error::Result;
use crate::signer::params;
use crate::track::search_params;
use crate::transport::Transport;
use crate::types::{Page, Playlist, PlaylistFilter, Track};
use tracing::debug;

/// Upper bound on ids sent in one add/delete request.
pub const MAX_IDS_PER_REQUEST: usize = 50;

impl<T: Transport> QobuzClient<T> {
    /// Get playlist metadata (without tracks).
    pub fn playlist(&self, id: u64) -> Result<Playlist> {
        self.fetch("playlist/get", params([("playlist_id", id.to_string())]))
    }

    /// Tracks of a playlist, `limit` per page starting at `offset`.
    pub fn playlist_tracks(&self, id: u64, limit: u64, offset: u64) -> Result<Page<Track>> {
        let mut resp = self.request(
            "playlist/get",
            params([
                ("playlist_id", id.to_string()),
                ("extra", "tracks".to_owned()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ]),
        )?;
        page_at(&mut resp, "tracks")
    }

    /// Search public playlists.
    pub fn search_playlists(&self, query: &str, limit: u64, offset: u64) -> Result<Page<Playlist>> {
        self.fetch_page("playlist/search", "playlists", search_params(query, limit, offset))
    }

    /// Playlists owned by (or subscribed to by) the logged-in user.
    pub fn user_playlists(
        &self,
        filter: PlaylistFilter,
        limit: u64,
        offset: u64,
    ) -> Result<Page<Playlist>> {
        self.require_session()?;
        self.fetch_page(
            "playlist/getUserPlaylists",
            "playlists",
            params([
                ("filter", filter.as_str().to_owned()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ]),
        )
    }

    /// Create a playlist owned by the logged-in user.
    pub fn create_playlist(
        &self,
        name: &str,
        description: Option<&str>,
        is_public: bool,
        is_collaborative: bool,
    ) -> Result<Playlist> {
        self.require_session()?;
        let mut p = params([
            ("name", name.to_owned()),
            ("is_public", flag(is_public).to_owned()),
            ("is_collaborative", flag(is_collaborative).to_owned()),
        ]);
        if let Some(description) = description {
            p.insert("description".into(), description.to_owned());
        }
        self.fetch("playlist/create", p)
    }

    /// Delete a playlist. Returns whether the server acknowledged it.
    pub fn delete_playlist(&self, id: u64) -> Result<bool> {
        self.require_session()?;
        let resp = self.request("playlist/delete", params([("playlist_id", id.to_string())]))?;
        Ok(is_success(&resp))
    }

    /// Append tracks (by track id) to a playlist.
    pub fn add_playlist_tracks(&self, id: u64, track_ids: &[u64]) -> Result<()> {
        self.edit_playlist_tracks("playlist/addTracks", "track_ids", id, track_ids)
    }

    /// Remove entries from a playlist.
    ///
    /// Takes `playlist_track_id`s as returned by
    /// [`playlist_tracks`](Self::playlist_tracks), not track ids.
    pub fn delete_playlist_tracks(&self, id: u64, playlist_track_ids: &[u64]) -> Result<()> {
        self.edit_playlist_tracks(
            "playlist/deleteTracks",
            "playlist_track_ids",
            id,
            playlist_track_ids,
        )
    }

    fn edit_playlist_tracks(
        &self,
        endpoint: &str,
        key: &str,
        id: u64,
        ids: &[u64],
    ) -> Result<()> {
        self.require_session()?;
        for chunk in ids.chunks(MAX_IDS_PER_REQUEST) {
            debug!(endpoint, playlist_id = id, count = chunk.len(), "editing playlist");
            self.request(
                endpoint,
                params([
                    ("playlist_id", id.to_string()),
                    (key, join_ids(chunk)),
                ]),
            )?;
        }
        Ok(())
    }
}

fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

pub(crate) fn join_ids<I: ToString>(ids: &[I]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use crate::QobuzError;
    use crate::client::test_support::{client, logged_in};
    use serde_json::json;

    #[test]
    fn add_tracks_is_chunked() {
        let ids: Vec<u64> = (1..=120).collect();
        let client = logged_in([Ok(json!({})), Ok(json!({})), Ok(json!({}))]);

        client.add_playlist_tracks(7, &ids).unwrap();

        let sent = client.transport().requests();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].parameters["track_ids"].split(',').count(), 50);
        assert_eq!(sent[1].parameters["track_ids"].split(',').count(), 50);
        assert_eq!(sent[2].parameters["track_ids"], "101,102,103,104,105,106,107,108,109,110,111,112,113,114,115,116,117,118,119,120");
        assert!(sent.iter().all(|r| r.parameters["playlist_id"] == "7"));
        assert!(sent.iter().all(|r| r.parameters["user_auth_token"] == "tok"));
    }

    #[test]
    fn delete_tracks_uses_playlist_track_ids() {
        let client = logged_in([Ok(json!({}))]);
        client.delete_playlist_tracks(7, &[900, 901]).unwrap();
        let sent = &client.transport().requests()[0];
        assert_eq!(sent.endpoint, "playlist/deleteTracks");
        assert_eq!(sent.parameters["playlist_track_ids"], "900,901");
    }

    #[test]
    fn mutation_needs_login() {
        let client = client([]);
        let err = client.create_playlist("x", None, false, false).unwrap_err();
        assert!(matches!(err, QobuzError::NotLoggedIn));
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn create_playlist_flags() {
        let client = logged_in([Ok(json!({ "id": 55, "name": "new", "is_public": true }))]);
        let playlist = client
            .create_playlist("new", Some("desc"), true, false)
            .unwrap();
        assert_eq!(playlist.id, 55);
        let sent = &client.transport().requests()[0];
        assert_eq!(sent.parameters["is_public"], "1");
        assert_eq!(sent.parameters["is_collaborative"], "0");
        assert_eq!(sent.parameters["description"], "desc");
    }

    #[test]
    fn delete_playlist_reports_status() {
        let client = logged_in([
            Ok(json!({ "status": "success" })),
            Ok(json!({ "status": "failed" })),
        ]);
        assert!(client.delete_playlist(1).unwrap());
        assert!(!client.delete_playlist(2).unwrap());
    }

    #[test]
    fn playlist_tracks_page() {
        let client = client([Ok(json!({
            "id": 1234,
            "name": "Late night",
            "tracks": { "total": 1, "items": [{ "id": 1, "playlist_track_id": 900, "title": "a" }] }
        }))]);
        let page = client.playlist_tracks(1234, 50, 0).unwrap();
        assert_eq!(page.items[0].playlist_track_id, Some(900));
        assert_eq!(client.transport().requests()[0].parameters["extra"], "tracks");
    }
}
