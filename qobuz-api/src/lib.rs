//! Qobuz API client library.
//!
//! Provides signed access to the Qobuz JSON API
//! (`https://www.qobuz.com/api.json/0.2/`): catalog lookup and search,
//! streaming URLs, playlists, and favorites.
//!
//! # Authentication
//!
//! Every call needs an app id. Streaming URLs and login also need the app
//! secret, which is used to sign the request (see [`signer`]). User-scoped
//! calls need a session from [`QobuzClient::login`]. Credentials are kept in
//! a [`CredentialRegistry`] in memory only.
//!
//! ```no_run
//! use qobuz_api::QobuzClient;
//! use qobuz_api::types::{AudioFormat, Intent};
//!
//! let client = QobuzClient::new("YOUR_APP_ID", Some("YOUR_APP_SECRET")).unwrap();
//! client.login("me@example.com", "password").unwrap();
//! let file = client
//!     .track_file_url(5966783, AudioFormat::Flac, Intent::Stream)
//!     .unwrap();
//! println!("{:?}", file.url);
//! ```
//!
//! # API endpoint mapping
//!
//! | Method                                  | Endpoint                     | Login | Signed |
//! |-----------------------------------------|------------------------------|-------|--------|
//! | [`QobuzClient::login`]                  | `user/login`                 |       | yes    |
//! | [`QobuzClient::reset_password`]         | `user/resetPassword`         |       |        |
//! | [`QobuzClient::track`]                  | `track/get`                  |       |        |
//! | [`QobuzClient::search_tracks`]          | `track/search`               |       |        |
//! | [`QobuzClient::track_file_url`]         | `track/getFileUrl`           |       | yes    |
//! | [`QobuzClient::album`]                  | `album/get`                  |       |        |
//! | [`QobuzClient::search_albums`]          | `album/search`               |       |        |
//! | [`QobuzClient::featured_albums`]        | `album/getFeatured`          |       |        |
//! | [`QobuzClient::artist`]                 | `artist/get`                 |       |        |
//! | [`QobuzClient::artist_albums`]          | `artist/get?extra=albums`    |       |        |
//! | [`QobuzClient::artist_tracks`]          | `artist/get?extra=tracks`    |       |        |
//! | [`QobuzClient::search_artists`]         | `artist/search`              |       |        |
//! | [`QobuzClient::playlist`]               | `playlist/get`               |       |        |
//! | [`QobuzClient::playlist_tracks`]        | `playlist/get?extra=tracks`  |       |        |
//! | [`QobuzClient::search_playlists`]       | `playlist/search`            |       |        |
//! | [`QobuzClient::user_playlists`]         | `playlist/getUserPlaylists`  | yes   |        |
//! | [`QobuzClient::create_playlist`]        | `playlist/create`            | yes   |        |
//! | [`QobuzClient::delete_playlist`]        | `playlist/delete`            | yes   |        |
//! | [`QobuzClient::add_playlist_tracks`]    | `playlist/addTracks`         | yes   |        |
//! | [`QobuzClient::delete_playlist_tracks`] | `playlist/deleteTracks`      | yes   |        |
//! | [`QobuzClient::add_favorites`]          | `favorite/create`            | yes   |        |
//! | [`QobuzClient::remove_favorites`]       | `favorite/delete`            | yes   |        |
//! | [`QobuzClient::favorite_status`]        | `favorite/status`            | yes   |        |
//! | [`QobuzClient::favorites`]              | `favorite/getUserFavorites`  | yes   |        |
//!
//! Any other endpoint can be reached with [`QobuzClient::request`], which
//! returns the raw JSON body.
//!
//! # Logging
//!
//! The crate emits `tracing` events and installs no subscriber. Secrets,
//! passwords and tokens are never logged.

mod album;
mod artist;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
mod favorite;
pub mod playlist;
pub mod signer;
mod track;
pub mod transport;
pub mod types;
mod user;

pub use client::QobuzClient;
pub use config::ClientConfig;
pub use credentials::{AppCredentials, CredentialRegistry, UserSession};
pub use error::{QobuzError, Result};
pub use signer::{Params, RequestSigner, SignedRequest};
pub use transport::{HttpTransport, Transport};
