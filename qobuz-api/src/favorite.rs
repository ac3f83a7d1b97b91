//! Favorites of the logged-in user.
//!
//! `favorite/create` and `favorite/delete` accept `artist_ids`, `album_ids`
//! and `track_ids` (comma-separated) in one request. At most
//! [`MAX_IDS_PER_REQUEST`] ids are sent per request, filled with artists
//! first, then albums, then tracks.

use crate::client::{QobuzClient, is_success};
use crate::error::Result;
use crate::playlist::{MAX_IDS_PER_REQUEST, join_ids};
use crate::signer::{Params, params};
use crate::transport::Transport;
use crate::types::{FavoriteIds, FavoriteKind, Favorites};

impl<T: Transport> QobuzClient<T> {
    /// Add artists, albums and tracks to the favorites.
    ///
    /// Returns `false` as soon as one request is not acknowledged; later
    /// chunks are not sent.
    pub fn add_favorites(&self, ids: &FavoriteIds) -> Result<bool> {
        self.edit_favorites("favorite/create", ids)
    }

    /// Remove artists, albums and tracks from the favorites.
    pub fn remove_favorites(&self, ids: &FavoriteIds) -> Result<bool> {
        self.edit_favorites("favorite/delete", ids)
    }

    /// Whether an object is among the favorites.
    pub fn favorite_status(&self, id: &str, kind: FavoriteKind) -> Result<bool> {
        self.require_session()?;
        let resp = self.request(
            "favorite/status",
            params([("item", id), ("type", kind.item_type())]),
        )?;
        // The API answers with the string "true" / "false".
        Ok(match &resp["status"] {
            serde_json::Value::Bool(b) => *b,
            v => v.as_str() == Some("true"),
        })
    }

    /// List favorites. `None` returns every kind.
    pub fn favorites(
        &self,
        kind: Option<FavoriteKind>,
        limit: u64,
        offset: u64,
    ) -> Result<Favorites> {
        self.require_session()?;
        let mut p = params([("limit", limit.to_string()), ("offset", offset.to_string())]);
        if let Some(kind) = kind {
            p.insert("type".into(), kind.collection().to_owned());
        }
        self.fetch("favorite/getUserFavorites", p)
    }

    fn edit_favorites(&self, endpoint: &str, ids: &FavoriteIds) -> Result<bool> {
        self.require_session()?;
        if ids.is_empty() {
            return Ok(true);
        }
        for chunk in favorite_chunks(ids, MAX_IDS_PER_REQUEST) {
            let resp = self.request(endpoint, chunk)?;
            if !is_success(&resp) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Split ids into parameter sets of at most `chunk_size` ids in total.
fn favorite_chunks(ids: &FavoriteIds, chunk_size: usize) -> Vec<Params> {
    let flat: Vec<(&str, String)> = ids
        .artists
        .iter()
        .map(|id| ("artist_ids", id.to_string()))
        .chain(ids.albums.iter().map(|id| ("album_ids", id.clone())))
        .chain(ids.tracks.iter().map(|id| ("track_ids", id.to_string())))
        .collect();

    flat.chunks(chunk_size)
        .map(|chunk| {
            let mut grouped: Vec<(&str, Vec<&str>)> = Vec::new();
            for (key, id) in chunk {
                match grouped.iter_mut().find(|(k, _)| *k == *key) {
                    Some((_, list)) => list.push(id.as_str()),
                    None => grouped.push((*key, vec![id.as_str()])),
                }
            }
            grouped
                .into_iter()
                .map(|(key, list)| (key.to_owned(), join_ids(&list)))
                .collect()
        })
        .collect()
}
