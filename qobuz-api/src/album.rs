//! Album APIs.
//!
//! - `album/get`: `album_id`; album object with `tracks.items`
//! - `album/search`: `query`, `limit`, `offset`; `{ "albums": { "items": [...] } }`
//! - `album/getFeatured`: `type` (see [`FeaturedType`]), `limit`, `offset`

use crate::client::QobuzClient;
use crate::error::Result;
use crate::signer::params;
use crate::track::search_params;
use crate::transport::Transport;
use crate::types::{Album, FeaturedType, Page};

impl<T: Transport> QobuzClient<T> {
    /// Get an album with its track list.
    pub fn album(&self, id: &str) -> Result<Album> {
        self.fetch("album/get", params([("album_id", id)]))
    }

    /// Search the catalog for albums.
    pub fn search_albums(&self, query: &str, limit: u64, offset: u64) -> Result<Page<Album>> {
        self.fetch_page("album/search", "albums", search_params(query, limit, offset))
    }

    /// Get one of the editorial album lists.
    pub fn featured_albums(
        &self,
        kind: FeaturedType,
        limit: u64,
        offset: u64,
    ) -> Result<Page<Album>> {
        self.fetch_page(
            "album/getFeatured",
            "albums",
            params([
                ("type", kind.as_str().to_owned()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ]),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::client;
    use crate::types::FeaturedType;
    use serde_json::json;

    #[test]
    fn album_with_tracks() {
        let client = client([Ok(json!({
            "id": "0060253780968",
            "title": "Kind Of Blue",
            "artist": { "id": 38_575, "name": "Miles Davis" },
            "tracks": { "total": 1, "items": [{ "id": 5_966_783, "title": "So What" }] }
        }))]);
        let album = client.album("0060253780968").unwrap();
        assert_eq!(album.title, "Kind Of Blue");
        assert_eq!(album.tracks.unwrap().items[0].id, 5_966_783);
        assert_eq!(
            client.transport().requests()[0].parameters["album_id"],
            "0060253780968"
        );
    }

    #[test]
    fn featured_sends_type() {
        let client = client([Ok(json!({ "albums": { "total": 0, "items": [] } }))]);
        let page = client
            .featured_albums(FeaturedType::PressAwards, 10, 20)
            .unwrap();
        assert!(page.items.is_empty());
        let sent = &client.transport().requests()[0];
        assert_eq!(sent.parameters["type"], "press-awards");
        assert_eq!(sent.parameters["offset"], "20");
    }
}
