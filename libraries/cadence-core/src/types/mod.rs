mod accent;
mod ids;
mod song;
mod song_list;

pub use accent::AccentColor;
pub use ids::SongId;
pub use song::{Song, SongResponse};
pub use song_list::SongList;
