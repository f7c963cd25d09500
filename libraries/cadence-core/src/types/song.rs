/// Song domain type
use crate::types::SongId;
use serde::{Deserialize, Serialize};

/// A song from the CMS catalog
///
/// Fields the CMS sends but playback does not need (`status`, `sort`,
/// `user_created`, `date_created`, ...) are ignored on deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Unique song identifier
    pub id: SongId,

    /// Song title
    pub name: String,

    /// Artist name
    pub artist: String,

    /// URL of the audio file
    pub url: String,

    /// CMS asset id of the cover image
    #[serde(default)]
    pub cover: String,

    /// Accent color as `#RRGGBB`
    #[serde(default)]
    pub accent: String,

    /// Whether the backend lists this song under "Top Tracks"
    #[serde(default)]
    pub top_track: bool,
}

impl Song {
    /// Create a song with no cover, no accent, and not flagged as a top track
    pub fn new(
        id: impl Into<SongId>,
        name: impl Into<String>,
        artist: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist: artist.into(),
            url: url.into(),
            cover: String::new(),
            accent: String::new(),
            top_track: false,
        }
    }

    /// Set the cover asset id
    #[must_use]
    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = cover.into();
        self
    }

    /// Set the accent color
    #[must_use]
    pub fn with_accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = accent.into();
        self
    }

    /// Set the top-track flag
    #[must_use]
    pub fn with_top_track(mut self, top_track: bool) -> Self {
        self.top_track = top_track;
        self
    }

    /// URL of the cover image under the given CMS base URL
    pub fn cover_url(&self, base_url: &str) -> String {
        format!("{}/assets/{}", base_url.trim_end_matches('/'), self.cover)
    }
}

/// Response envelope of the CMS `items/songs` endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongResponse {
    /// Songs in catalog order
    pub data: Vec<Song>,
}
