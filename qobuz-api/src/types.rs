//! Data types for Qobuz API responses.
//!
//! Qobuz already uses `snake_case` JSON keys, so most types deserialize
//! directly. Fields that some endpoints omit are `Option` or `#[serde(default)]`.

use serde::{Deserialize, Serialize};

/// A paged list: `{"items": [...], "total": 120, "limit": 50, "offset": 0}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            limit: 0,
            offset: 0,
        }
    }
}

/// A music artist.
///
/// API JSON fields: `id`, `name`, `picture`, `slug`, `albums_count`,
/// `biography.summary`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub picture: Option<String>,
    pub slug: Option<String>,
    pub albums_count: Option<u64>,
    pub biography: Option<Biography>,
    /// Present on `artist/get` with `extra=albums`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub albums: Option<Page<Album>>,
    /// Present on `artist/get` with `extra=tracks`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Page<Track>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Biography {
    pub summary: Option<String>,
    pub content: Option<String>,
}

/// Cover art URLs in three sizes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Images {
    pub small: Option<String>,
    pub thumbnail: Option<String>,
    pub large: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
}

/// An album.
///
/// Album ids are strings (usually the UPC, e.g. `"0060253780968"`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Album {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub version: Option<String>,
    #[serde(rename = "image")]
    pub images: Option<Images>,
    pub tracks_count: Option<u64>,
    pub media_count: Option<u64>,
    /// Release date, unix seconds.
    pub released_at: Option<i64>,
    pub artist: Option<Artist>,
    pub genre: Option<Genre>,
    /// Present on `album/get`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Page<Track>>,
}

/// A track.
///
/// `album` is absent when the track is listed inside its own album.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    pub id: u64,
    /// Position-specific id inside a playlist (used by `playlist/deleteTracks`).
    pub playlist_track_id: Option<u64>,
    #[serde(default)]
    pub title: String,
    pub album: Option<Album>,
    pub performer: Option<Performer>,
    /// Raw credits, e.g. `"Miles Davis, MainArtist - Teo Macero, Producer"`.
    pub performers: Option<String>,
    /// Seconds.
    #[serde(default)]
    pub duration: u64,
    pub media_number: Option<u32>,
    pub track_number: Option<u32>,
    #[serde(default)]
    pub maximum_bit_depth: u32,
    /// kHz, e.g. `44.1` or `192.0`.
    #[serde(default)]
    pub maximum_sampling_rate: f64,
}

impl Track {
    /// Best [`AudioFormat`] this track is available in.
    pub fn maximum_format(&self) -> AudioFormat {
        if self.maximum_bit_depth < 24 {
            AudioFormat::Flac
        } else if self.maximum_sampling_rate <= 96.0 {
            AudioFormat::HiRes
        } else {
            AudioFormat::HiResHsr
        }
    }

    /// `performers` split into one credit per entry, line breaks removed.
    pub fn performer_credits(&self) -> Vec<String> {
        let Some(raw) = self.performers.as_deref() else {
            return vec![];
        };
        raw.replace(['\r', '\n'], "")
            .split(" - ")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Main performer reference embedded in a [`Track`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Performer {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// A playlist.
///
/// `tracks` is only populated by `playlist/get` with `extra=tracks`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Playlist {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    /// Total duration in seconds.
    pub duration: Option<u64>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub is_collaborative: bool,
    pub tracks_count: Option<u64>,
    /// Unix seconds.
    pub updated_at: Option<i64>,
    pub owner: Option<Owner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Page<Track>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Owner {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// Response of `track/getFileUrl`.
///
/// `url` is a temporary CDN link. It is absent when the track cannot be
/// streamed in the requested format; `restrictions` then says why (e.g.
/// `FormatRestrictedByFormatAvailability`, `UserUncredentialed`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileUrl {
    pub track_id: u64,
    pub url: Option<String>,
    pub format_id: Option<u32>,
    pub mime_type: Option<String>,
    pub sampling_rate: Option<f64>,
    pub bit_depth: Option<u32>,
    pub duration: Option<f64>,
    #[serde(default)]
    pub restrictions: Vec<Restriction>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Restriction {
    pub code: String,
}

/// Streaming format, sent as `format_id`.
///
/// | Variant    | `format_id` | Quality                               |
/// |------------|-------------|---------------------------------------|
/// | `Mp3`      | 5           | MP3 320 kbps                          |
/// | `Flac`     | 6           | FLAC 16 bit / 44.1 kHz                |
/// | `HiRes`    | 7           | FLAC 24 bit, up to 96 kHz             |
/// | `HiResHsr` | 27          | FLAC 24 bit, above 96 kHz up to 192   |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Flac,
    HiRes,
    HiResHsr,
}

impl AudioFormat {
    /// `format_id` sent to `track/getFileUrl`.
    pub fn id(self) -> u32 {
        match self {
            Self::Mp3 => 5,
            Self::Flac => 6,
            Self::HiRes => 7,
            Self::HiResHsr => 27,
        }
    }

    /// Format for a `format_id`, `None` if unknown.
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            5 => Some(Self::Mp3),
            6 => Some(Self::Flac),
            7 => Some(Self::HiRes),
            27 => Some(Self::HiResHsr),
            _ => None,
        }
    }
}

/// How the application will use a file URL, sent as `intent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intent {
    #[default]
    Stream,
    Import,
    Download,
}

impl Intent {
    /// `intent` parameter value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stream => "stream",
            Self::Import => "import",
            Self::Download => "download",
        }
    }
}

/// Featured album lists for `album/getFeatured`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeaturedType {
    MostStreamed,
    BestSellers,
    #[default]
    NewReleases,
    PressAwards,
    EditorPicks,
    MostFeatured,
    NewReleasesFull,
    RecentReleases,
    IdealDiscography,
    Qobuzissims,
    AlbumOfTheWeek,
    ReReleaseOfTheWeek,
}

impl FeaturedType {
    /// `type` parameter value for `album/getFeatured`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MostStreamed => "most-streamed",
            Self::BestSellers => "best-sellers",
            Self::NewReleases => "new-releases",
            Self::PressAwards => "press-awards",
            Self::EditorPicks => "editor-picks",
            Self::MostFeatured => "most-featured",
            Self::NewReleasesFull => "new-releases-full",
            Self::RecentReleases => "recent-releases",
            Self::IdealDiscography => "ideal-discography",
            Self::Qobuzissims => "qobuzissims",
            Self::AlbumOfTheWeek => "album-of-the-week",
            Self::ReReleaseOfTheWeek => "re-release-of-the-week",
        }
    }
}

/// Which playlists `playlist/getUserPlaylists` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaylistFilter {
    #[default]
    Owner,
    Subscriber,
}

impl PlaylistFilter {
    /// `filter` parameter value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Subscriber => "subscriber",
        }
    }
}

/// Kind of favorite object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteKind {
    Artist,
    Album,
    Track,
}

impl FavoriteKind {
    /// `type` value for `favorite/status`.
    pub fn item_type(self) -> &'static str {
        match self {
            Self::Artist => "artist",
            Self::Album => "album",
            Self::Track => "track",
        }
    }

    /// `type` value for `favorite/getUserFavorites`.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Artist => "artists",
            Self::Album => "albums",
            Self::Track => "tracks",
        }
    }
}

/// Ids to add to or remove from the user's favorites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteIds {
    pub artists: Vec<u64>,
    pub albums: Vec<String>,
    pub tracks: Vec<u64>,
}

impl FavoriteIds {
    /// Whether no id of any kind is set.
    pub fn is_empty(&self) -> bool {
        self.artists.is_empty() && self.albums.is_empty() && self.tracks.is_empty()
    }
}

/// Response of `favorite/getUserFavorites`. Only the requested kinds are set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Favorites {
    pub artists: Option<Page<Artist>>,
    pub albums: Option<Page<Album>>,
    pub tracks: Option<Page<Track>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn track(bit_depth: u32, sampling_rate: f64) -> Track {
        serde_json::from_value(json!({
            "id": 1,
            "title": "t",
            "maximum_bit_depth": bit_depth,
            "maximum_sampling_rate": sampling_rate,
        }))
        .unwrap()
    }

    #[test]
    fn maximum_format_from_quality() {
        assert_eq!(track(16, 44.1).maximum_format(), AudioFormat::Flac);
        assert_eq!(track(24, 96.0).maximum_format(), AudioFormat::HiRes);
        assert_eq!(track(24, 192.0).maximum_format(), AudioFormat::HiResHsr);
    }

    #[test]
    fn performer_credits_are_split() {
        let mut t = track(16, 44.1);
        t.performers = Some("Miles Davis, MainArtist - Teo Macero,\r\n Producer".into());
        assert_eq!(
            t.performer_credits(),
            vec!["Miles Davis, MainArtist", "Teo Macero, Producer"]
        );
        t.performers = None;
        assert!(t.performer_credits().is_empty());
    }

    #[test]
    fn album_from_api_json() {
        let album: Album = serde_json::from_value(json!({
            "id": "0060253780968",
            "title": "Kind Of Blue",
            "image": { "small": "s.jpg", "thumbnail": "t.jpg", "large": "l.jpg" },
            "tracks_count": 5,
            "media_count": 1,
            "released_at": -336_614_400,
            "artist": { "id": 38_575, "name": "Miles Davis" },
            "genre": { "id": 80, "name": "Jazz" },
            "tracks": {
                "offset": 0, "limit": 50, "total": 1,
                "items": [{ "id": 5_966_783, "title": "So What", "duration": 562 }]
            }
        }))
        .unwrap();

        assert_eq!(album.artist.as_ref().unwrap().name, "Miles Davis");
        assert_eq!(album.genre.as_ref().unwrap().name, "Jazz");
        assert_eq!(album.images.unwrap().large.as_deref(), Some("l.jpg"));
        let tracks = album.tracks.unwrap();
        assert_eq!(tracks.total, 1);
        assert_eq!(tracks.items[0].title, "So What");
        assert!(tracks.items[0].album.is_none());
    }

    #[test]
    fn audio_format_ids() {
        for f in [
            AudioFormat::Mp3,
            AudioFormat::Flac,
            AudioFormat::HiRes,
            AudioFormat::HiResHsr,
        ] {
            assert_eq!(AudioFormat::from_id(f.id()), Some(f));
        }
        assert_eq!(AudioFormat::from_id(8), None);
    }
}
