pub mod track;

pub use track::{PlaylistInfo, Track, TrackBatch, TrackSet};
