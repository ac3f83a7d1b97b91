//! Artist APIs.
//!
//! `artist/get` returns the artist object; with `extra=albums` or
//! `extra=tracks` it also embeds a paged list under that key:
//!
//! ```json
//! {
//!   "id": 38575, "name": "Miles Davis", "albums_count": 812,
//!   "biography": { "summary": "..." },
//!   "albums": { "total": 812, "limit": 50, "offset": 0, "items": [...] }
//! }
//! ```

use crate::client::{QobuzClient, page_at};
use crate::error::Result;
use crate::signer::params;
use crate::track::search_params;
use crate::transport::Transport;
use crate::types::{Album, Artist, Page, Track};

impl<T: Transport> QobuzClient<T> {
    /// Get artist metadata and biography.
    pub fn artist(&self, id: u64) -> Result<Artist> {
        self.fetch("artist/get", params([("artist_id", id.to_string())]))
    }

    /// Search the catalog for artists.
    pub fn search_artists(&self, query: &str, limit: u64, offset: u64) -> Result<Page<Artist>> {
        self.fetch_page("artist/search", "artists", search_params(query, limit, offset))
    }

    /// Albums of an artist, `limit` per page starting at `offset`.
    pub fn artist_albums(&self, id: u64, limit: u64, offset: u64) -> Result<Page<Album>> {
        self.artist_extra(id, "albums", limit, offset)
    }

    /// Tracks of an artist, `limit` per page starting at `offset`.
    pub fn artist_tracks(&self, id: u64, limit: u64, offset: u64) -> Result<Page<Track>> {
        self.artist_extra(id, "tracks", limit, offset)
    }

    fn artist_extra<D: serde::de::DeserializeOwned>(
        &self,
        id: u64,
        extra: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Page<D>> {
        let mut resp = self.request(
            "artist/get",
            params([
                ("artist_id", id.to_string()),
                ("extra", extra.to_owned()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ]),
        )?;
        page_at(&mut resp, extra)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::client;
    use serde_json::json;

    #[test]
    fn artist_albums_uses_extra() {
        let client = client([Ok(json!({
            "id": 38_575,
            "name": "Miles Davis",
            "albums": { "total": 812, "limit": 1, "offset": 5, "items": [
                { "id": "0060253780968", "title": "Kind Of Blue" }
            ]}
        }))]);

        let page = client.artist_albums(38_575, 1, 5).unwrap();
        assert_eq!(page.total, 812);
        assert_eq!(page.items[0].title, "Kind Of Blue");

        let sent = &client.transport().requests()[0];
        assert_eq!(sent.endpoint, "artist/get");
        assert_eq!(sent.parameters["extra"], "albums");
        assert_eq!(sent.parameters["offset"], "5");
    }

    #[test]
    fn artist_biography() {
        let client = client([Ok(json!({
            "id": 38_575,
            "name": "Miles Davis",
            "slug": "miles-davis",
            "biography": { "summary": "Trumpeter." }
        }))]);
        let artist = client.artist(38_575).unwrap();
        assert_eq!(
            artist.biography.and_then(|b| b.summary).as_deref(),
            Some("Trumpeter.")
        );
        assert!(artist.albums.is_none());
    }
}
