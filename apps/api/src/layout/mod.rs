//! Card sheet layout: font metrics, text wrapping, info-card placement and
//! the duplex page engine.

pub mod card;
pub mod font_metrics;
pub mod glyphs;
pub mod sheet;
pub mod text;

pub use card::{layout_info_card, CardGeometry, PlacedLine};
pub use font_metrics::{get_metrics, FontFace};
pub use sheet::{build_sheet, Page, Sheet, SheetConfig, Tile};
