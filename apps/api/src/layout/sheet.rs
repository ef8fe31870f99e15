//! Duplex sheet layout.
//!
//! Tracks are split into groups of `tiles_per_page`. Each group becomes a
//! front page of info tiles followed by a back page of scan-code tiles. The
//! sheet is flipped around its vertical axis when printed, so every row of
//! the back page is the mirror of the matching front row.

use thiserror::Error;
use tracing::debug;

use crate::models::{Track, TrackSet};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid sheet configuration: {0}")]
    InvalidConfig(String),
}

pub const DEFAULT_ROW_WIDTH: usize = 4;
pub const DEFAULT_TILES_PER_PAGE: usize = 20;

/// Grid shape of one page. `tiles_per_page` is always a positive multiple of `row_width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetConfig {
    row_width: usize,
    tiles_per_page: usize,
}

impl SheetConfig {
    pub fn new(row_width: usize, tiles_per_page: usize) -> Result<Self, LayoutError> {
        if row_width == 0 {
            return Err(LayoutError::InvalidConfig(
                "row width must be positive".to_string(),
            ));
        }
        if tiles_per_page == 0 || tiles_per_page % row_width != 0 {
            return Err(LayoutError::InvalidConfig(format!(
                "tiles per page ({tiles_per_page}) must be a positive multiple of the row width ({row_width})"
            )));
        }
        Ok(Self {
            row_width,
            tiles_per_page,
        })
    }

    pub fn row_width(&self) -> usize {
        self.row_width
    }

    pub fn tiles_per_page(&self) -> usize {
        self.tiles_per_page
    }

    pub fn rows_per_page(&self) -> usize {
        self.tiles_per_page / self.row_width
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            row_width: DEFAULT_ROW_WIDTH,
            tiles_per_page: DEFAULT_TILES_PER_PAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Tile {
    /// Name, year and artists.
    Info(Track),
    /// Scan code for the track identifier.
    Code(Track),
    /// Padding at the end of a short group.
    Empty,
}

impl Tile {
    pub fn track(&self) -> Option<&Track> {
        match self {
            Tile::Info(track) | Tile::Code(track) => Some(track),
            Tile::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Tile::Empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
}

/// One physical page. `tiles` are in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub side: Side,
    /// Index of the content group this page belongs to.
    pub group: usize,
    pub tiles: Vec<Tile>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub config: SheetConfig,
    pub pages: Vec<Page>,
}

impl Sheet {
    /// Number of content groups, i.e. front pages.
    pub fn content_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.side == Side::Front).count()
    }

    pub fn tile_count(&self) -> usize {
        self.pages.iter().map(|p| p.tiles.len()).sum()
    }
}

/// Position on the back page that lies behind front position `front_index`.
pub fn back_index(front_index: usize, row_width: usize) -> usize {
    let column = front_index % row_width;
    (front_index - column) + (row_width - 1 - column)
}

/// Reverses each consecutive run of `run` items in place, keeping the runs in order.
/// A trailing partial run is reversed on its own.
pub fn reverse_runs<T>(items: &mut [T], run: usize) {
    if run == 0 {
        return;
    }
    for chunk in items.chunks_mut(run) {
        chunk.reverse();
    }
}

/// Builds the duplex sheet for `tracks`. An empty set yields a sheet with no pages.
pub fn build_sheet(tracks: &TrackSet, config: SheetConfig) -> Sheet {
    if tracks.is_empty() {
        debug!("no tracks, sheet has no pages");
        return Sheet {
            config,
            pages: Vec::new(),
        };
    }
    let per_page = config.tiles_per_page();
    let mut pages = Vec::with_capacity(2 * tracks.len().div_ceil(per_page));

    for (group, chunk) in tracks.as_slice().chunks(per_page).enumerate() {
        let mut front: Vec<Tile> = chunk.iter().cloned().map(Tile::Info).collect();
        let mut back: Vec<Tile> = chunk.iter().cloned().map(Tile::Code).collect();
        front.resize(per_page, Tile::Empty);
        back.resize(per_page, Tile::Empty);
        reverse_runs(&mut back, config.row_width());

        debug!(group, tracks = chunk.len(), "laid out content group");
        pages.push(Page {
            side: Side::Front,
            group,
            tiles: front,
        });
        pages.push(Page {
            side: Side::Back,
            group,
            tiles: back,
        });
    }

    Sheet { config, pages }
}
