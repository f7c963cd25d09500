/// Song list (tab) selection
use crate::types::Song;
use serde::{Deserialize, Serialize};

/// Which list of songs a tab shows and next/previous navigate in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SongList {
    /// Every song in the catalog
    #[default]
    ForYou,

    /// Only songs flagged as top tracks
    TopTracks,
}

impl SongList {
    /// All lists in tab order
    pub const ALL: [SongList; 2] = [SongList::ForYou, SongList::TopTracks];

    /// List shown on the given tab page
    pub fn from_page(page: usize) -> Option<Self> {
        Self::ALL.get(page).copied()
    }

    /// Tab page index of this list
    pub fn page(self) -> usize {
        match self {
            SongList::ForYou => 0,
            SongList::TopTracks => 1,
        }
    }

    /// Tab title
    pub fn title(self) -> &'static str {
        match self {
            SongList::ForYou => "For You",
            SongList::TopTracks => "Top Tracks",
        }
    }

    /// The other tab
    pub fn toggled(self) -> Self {
        match self {
            SongList::ForYou => SongList::TopTracks,
            SongList::TopTracks => SongList::ForYou,
        }
    }

    /// Songs belonging to this list, in catalog order
    pub fn filter(self, songs: &[Song]) -> Vec<Song> {
        match self {
            SongList::ForYou => songs.to_vec(),
            SongList::TopTracks => songs.iter().filter(|s| s.top_track).cloned().collect(),
        }
    }
}
