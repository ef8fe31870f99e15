//! Info-card text layout: which lines go where inside one tile.

use super::font_metrics::{get_metrics, FontFace};
use super::text::{clamp_lines, wrap_text};
use crate::models::Track;

/// Fixed tile geometry in PDF points.
pub struct CardGeometry;

impl CardGeometry {
    /// Side of one square tile.
    pub const TILE: f32 = 145.0;
    /// Side of the square the scan code is fitted into.
    pub const CODE: f32 = 120.0;
    /// Inner padding between the tile edge and its text.
    pub const PADDING: f32 = 8.0;
    /// Usable text width.
    pub const TEXT_WIDTH: f32 = Self::TILE - 2.0 * Self::PADDING;
}

/// One block of text on an info card.
struct TextStyle {
    face: FontFace,
    size_pt: f32,
    max_lines: usize,
}

const NAME_STYLE: TextStyle = TextStyle {
    face: FontFace::HelveticaBold,
    size_pt: 11.0,
    max_lines: 4,
};
const YEAR_STYLE: TextStyle = TextStyle {
    face: FontFace::HelveticaBold,
    size_pt: 16.0,
    max_lines: 1,
};
const ARTIST_STYLE: TextStyle = TextStyle {
    face: FontFace::Helvetica,
    size_pt: 9.0,
    max_lines: 3,
};

const BLOCK_GAP: f32 = 6.0;
const LINE_HEIGHT: f32 = 1.2;

/// A line of text positioned relative to the tile's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub face: FontFace,
    pub size_pt: f32,
    /// Distance from the tile's left edge to the start of the line.
    pub x_offset: f32,
    /// Distance from the tile's top edge down to the baseline.
    pub baseline_from_top: f32,
}

/// Text printed for a release year; unknown years print as `?`.
pub fn year_label(release_year: i32) -> String {
    if release_year == 0 {
        "?".to_string()
    } else {
        release_year.to_string()
    }
}

/// Lays out the name, year and artists of `track`, vertically centred in the
/// tile with each line centred horizontally.
pub fn layout_info_card(track: &Track) -> Vec<PlacedLine> {
    let blocks: Vec<(&TextStyle, Vec<String>)> = [
        (&NAME_STYLE, track.name.clone()),
        (&YEAR_STYLE, year_label(track.release_year)),
        (&ARTIST_STYLE, track.joined_artists()),
    ]
    .into_iter()
    .map(|(style, text)| {
        let metrics = get_metrics(style.face);
        let lines = wrap_text(&text, metrics, style.size_pt, CardGeometry::TEXT_WIDTH);
        let lines = clamp_lines(
            lines,
            style.max_lines,
            metrics,
            style.size_pt,
            CardGeometry::TEXT_WIDTH,
        );
        (style, lines)
    })
    .filter(|(_, lines)| !lines.is_empty())
    .collect();

    let block_height = |style: &TextStyle, count: usize| count as f32 * style.size_pt * LINE_HEIGHT;
    let content_height: f32 = blocks
        .iter()
        .map(|(style, lines)| block_height(style, lines.len()))
        .sum::<f32>()
        + BLOCK_GAP * blocks.len().saturating_sub(1) as f32;

    let mut line_top = ((CardGeometry::TILE - content_height) / 2.0).max(CardGeometry::PADDING);
    let mut placed = Vec::new();
    for (i, (style, lines)) in blocks.into_iter().enumerate() {
        if i > 0 {
            line_top += BLOCK_GAP;
        }
        let metrics = get_metrics(style.face);
        for text in lines {
            let width = metrics.measure_pt(&text, style.size_pt);
            placed.push(PlacedLine {
                x_offset: ((CardGeometry::TILE - width) / 2.0).max(CardGeometry::PADDING),
                baseline_from_top: line_top + style.size_pt,
                face: style.face,
                size_pt: style.size_pt,
                text,
            });
            line_top += style.size_pt * LINE_HEIGHT;
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_track;

    #[test]
    fn test_basic_card_has_three_centred_lines() {
        let lines = layout_info_card(&sample_track(1));
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Song 1", "1991", "Artist 1"]);
        assert_eq!(lines[1].face, FontFace::HelveticaBold);
        assert_eq!(lines[1].size_pt, 16.0);
        assert_eq!(lines[2].face, FontFace::Helvetica);

        for line in &lines {
            let width = get_metrics(line.face).measure_pt(&line.text, line.size_pt);
            let right = CardGeometry::TILE - line.x_offset - width;
            assert!((line.x_offset - right).abs() < 1e-3, "{} not centred", line.text);
        }
    }

    #[test]
    fn test_block_vertically_centred() {
        let lines = layout_info_card(&sample_track(2));
        // name 11*1.2 + gap + year 16*1.2 + gap + artist 9*1.2 = 55.2
        let top = (CardGeometry::TILE - 55.2) / 2.0;
        assert!((lines[0].baseline_from_top - (top + 11.0)).abs() < 1e-3);
        let bottom = lines[2].baseline_from_top - 9.0 + 9.0 * 1.2;
        assert!((CardGeometry::TILE - bottom - top).abs() < 1e-3);
    }

    #[test]
    fn test_unknown_year_prints_question_mark() {
        let track = Track::new("Untitled", 0, vec!["Nobody".into()], "spotify:track:x");
        let lines = layout_info_card(&track);
        assert_eq!(lines[1].text, "?");
        assert_eq!(year_label(2003), "2003");
    }

    #[test]
    fn test_no_artists_skips_block() {
        let track = Track::new("Solo", 1999, vec![], "spotify:track:x");
        let lines = layout_info_card(&track);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_long_name_clamped_to_four_lines() {
        let name = "A very long track name that keeps going ".repeat(8);
        let track = Track::new(name, 2010, vec!["Someone".into()], "spotify:track:x");
        let lines = layout_info_card(&track);
        let name_lines: Vec<_> = lines.iter().filter(|l| l.size_pt == 11.0).collect();
        assert_eq!(name_lines.len(), 4);
        assert!(name_lines[3].text.ends_with("..."));
        for line in &lines {
            let width = get_metrics(line.face).measure_pt(&line.text, line.size_pt);
            assert!(width <= CardGeometry::TEXT_WIDTH + 1e-3);
            assert!(line.baseline_from_top <= CardGeometry::TILE);
        }
    }

    #[test]
    fn test_many_artists_clamped_to_three_lines() {
        let artists = (0..30).map(|i| format!("Featured Artist {i}")).collect();
        let track = Track::new("Posse Cut", 1996, artists, "spotify:track:x");
        let lines = layout_info_card(&track);
        let artist_lines: Vec<_> = lines.iter().filter(|l| l.face == FontFace::Helvetica).collect();
        assert_eq!(artist_lines.len(), 3);
        assert!(artist_lines[2].text.ends_with("..."));
    }
}
