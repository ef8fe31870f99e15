use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, StringFormat, Stream};
use tracing::{debug, info, warn};

use super::encoding::GlyphEncoding;
use super::RenderError;
use crate::layout::{
    get_metrics, layout_info_card, CardGeometry, FontFace, Page, PlacedLine, Sheet, SheetConfig,
    Tile,
};
use crate::scan::{Bitmap, ScanEncoder};

/// A4 in points.
pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
const TOP_MARGIN: f32 = 10.0;
const FRAME_WIDTH: f32 = 0.5;

const PRODUCER: &str = "cardsheet";
const ERROR_LABEL: &str = "QR Error";
const ERROR_LABEL_SIZE: f32 = 10.0;

#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    /// Code tiles drawn as an error placeholder.
    pub encoding_failures: usize,
}

/// Whether a grid of `config` fits an A4 page.
pub fn grid_fits_page(config: &SheetConfig) -> bool {
    config.row_width() as f32 * CardGeometry::TILE <= PAGE_WIDTH
        && TOP_MARGIN + config.rows_per_page() as f32 * CardGeometry::TILE <= PAGE_HEIGHT
}

/// Bottom-left corner of tile `index` in page coordinates.
///
/// The grid is centred horizontally, so column `c` and column `row_width - 1 - c`
/// swap places exactly when the sheet is flipped around its vertical axis.
pub fn tile_origin(config: &SheetConfig, index: usize) -> (f32, f32) {
    let row = index / config.row_width();
    let column = index % config.row_width();
    let left = (PAGE_WIDTH - config.row_width() as f32 * CardGeometry::TILE) / 2.0;
    let x = left + column as f32 * CardGeometry::TILE;
    let y = PAGE_HEIGHT - TOP_MARGIN - (row + 1) as f32 * CardGeometry::TILE;
    (x, y)
}

/// Renders every page of `sheet` into a single PDF buffer.
///
/// A tile whose identifier cannot be encoded gets a placeholder and is counted
/// in `encoding_failures`; it does not fail the document.
pub fn render_sheet(
    sheet: &Sheet,
    encoder: &dyn ScanEncoder,
) -> Result<RenderedDocument, RenderError> {
    if !grid_fits_page(&sheet.config) {
        return Err(RenderError::Layout(format!(
            "{} rows of {} tiles",
            sheet.config.rows_per_page(),
            sheet.config.row_width()
        )));
    }

    // Lay out all card text up front so the font encoding covers every character.
    let card_lines: Vec<Vec<Vec<PlacedLine>>> = sheet
        .pages
        .iter()
        .map(|page| {
            page.tiles
                .iter()
                .map(|tile| match tile {
                    Tile::Info(track) => layout_info_card(track),
                    _ => Vec::new(),
                })
                .collect()
        })
        .collect();
    let encoding = GlyphEncoding::for_texts(
        card_lines
            .iter()
            .flatten()
            .flatten()
            .map(|line| line.text.as_str())
            .chain(std::iter::once(ERROR_LABEL)),
    );

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for plane in 0..encoding.plane_count() {
        let encoding_id = doc.add_object(encoding.to_dictionary(plane));
        for face in FontFace::ALL {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => encoding_id,
            });
            fonts.set(font_resource(face, plane), font_id);
        }
    }
    let fonts_id = doc.add_object(fonts);

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(sheet.pages.len());
    let mut encoding_failures = 0;
    for (page, lines) in sheet.pages.iter().zip(&card_lines) {
        let mut canvas = PageCanvas::new(&sheet.config, &encoding);
        canvas.draw_page(&mut doc, page, lines, encoder);
        encoding_failures += canvas.failures;

        let content = canvas.content.encode()?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => fonts_id,
                "XObject" => canvas.images,
            },
        });
        debug!(group = page.group, side = ?page.side, "rendered page");
        page_ids.push(page_id);
    }

    let page_count = page_ids.len();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.into_iter().map(Object::Reference).collect::<Vec<_>>(),
            "Count" => page_count as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let creation_date = Utc::now().format("D:%Y%m%d%H%M%SZ").to_string();
    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal(PRODUCER),
        "CreationDate" => Object::string_literal(creation_date),
    });
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;

    info!(
        page_count,
        encoding_failures,
        extra_glyphs = encoding.extra_glyphs(),
        font_planes = encoding.plane_count(),
        size_bytes = bytes.len(),
        "sheet rendered"
    );
    Ok(RenderedDocument {
        bytes,
        page_count,
        encoding_failures,
    })
}

/// Font resource name for `face` drawn through encoding `plane`.
fn font_resource(face: FontFace, plane: usize) -> String {
    match plane {
        0 => face.resource_name().to_string(),
        n => format!("{}_{n}", face.resource_name()),
    }
}

/// Drawing state for one page: its content operations and image resources.
struct PageCanvas<'a> {
    config: &'a SheetConfig,
    encoding: &'a GlyphEncoding,
    content: Content,
    images: Dictionary,
    failures: usize,
}

impl<'a> PageCanvas<'a> {
    fn new(config: &'a SheetConfig, encoding: &'a GlyphEncoding) -> Self {
        Self {
            config,
            encoding,
            content: Content { operations: vec![] },
            images: Dictionary::new(),
            failures: 0,
        }
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn draw_page(
        &mut self,
        doc: &mut Document,
        page: &Page,
        lines: &[Vec<PlacedLine>],
        encoder: &dyn ScanEncoder,
    ) {
        for (index, (tile, tile_lines)) in page.tiles.iter().zip(lines).enumerate() {
            let (x, y) = tile_origin(self.config, index);
            match tile {
                Tile::Empty => {}
                Tile::Info(_) => {
                    self.draw_frame(x, y);
                    self.draw_info(x, y, tile_lines);
                }
                Tile::Code(track) => {
                    self.draw_frame(x, y);
                    match encoder.encode(&track.identifier) {
                        Ok(bitmap) => self.draw_code(doc, x, y, &bitmap),
                        Err(e) => {
                            warn!(
                                identifier = %track.identifier,
                                track = %track.name,
                                error = %e,
                                "scan code encoding failed, drawing placeholder"
                            );
                            self.failures += 1;
                            self.draw_error_placeholder(x, y);
                        }
                    }
                }
            }
        }
    }

    fn draw_frame(&mut self, x: f32, y: f32) {
        self.push("q", vec![]);
        self.push("w", vec![FRAME_WIDTH.into()]);
        self.push("G", vec![0.into()]);
        self.push(
            "re",
            vec![x.into(), y.into(), CardGeometry::TILE.into(), CardGeometry::TILE.into()],
        );
        self.push("S", vec![]);
        self.push("Q", vec![]);
    }

    fn draw_text(&mut self, face: FontFace, size_pt: f32, x: f32, baseline: f32, text: &str) {
        self.push("BT", vec![]);
        self.push("Td", vec![x.into(), baseline.into()]);
        for run in self.encoding.encode_runs(text) {
            let font = Object::Name(font_resource(face, run.plane).into_bytes());
            self.push("Tf", vec![font, size_pt.into()]);
            self.push("Tj", vec![Object::String(run.bytes, StringFormat::Literal)]);
        }
        self.push("ET", vec![]);
    }

    fn draw_info(&mut self, x: f32, y: f32, lines: &[PlacedLine]) {
        let top = y + CardGeometry::TILE;
        self.push("g", vec![0.into()]);
        for line in lines {
            self.draw_text(
                line.face,
                line.size_pt,
                x + line.x_offset,
                top - line.baseline_from_top,
                &line.text,
            );
        }
    }

    fn draw_code(&mut self, doc: &mut Document, x: f32, y: f32, bitmap: &Bitmap) {
        let image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => bitmap.width as i64,
                "Height" => bitmap.height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
                "Interpolate" => false,
            },
            bitmap.to_gray_samples(),
        );
        let image_id = doc.add_object(image);
        let name = format!("Im{}", self.images.len());
        self.images.set(name.as_bytes().to_vec(), image_id);

        let scale = CardGeometry::CODE / bitmap.width.max(bitmap.height).max(1) as f32;
        let (w, h) = (bitmap.width as f32 * scale, bitmap.height as f32 * scale);
        let left = x + (CardGeometry::TILE - w) / 2.0;
        let bottom = y + (CardGeometry::TILE - h) / 2.0;

        self.push("q", vec![]);
        self.push(
            "cm",
            vec![w.into(), 0.into(), 0.into(), h.into(), left.into(), bottom.into()],
        );
        self.push("Do", vec![Object::Name(name.into_bytes())]);
        self.push("Q", vec![]);
    }

    fn draw_error_placeholder(&mut self, x: f32, y: f32) {
        let inset = (CardGeometry::TILE - CardGeometry::CODE) / 2.0;
        self.push("q", vec![]);
        self.push("RG", vec![1.into(), 0.into(), 0.into()]);
        self.push("w", vec![1.into()]);
        self.push(
            "re",
            vec![
                (x + inset).into(),
                (y + inset).into(),
                CardGeometry::CODE.into(),
                CardGeometry::CODE.into(),
            ],
        );
        self.push("S", vec![]);
        self.push("rg", vec![1.into(), 0.into(), 0.into()]);
        let width = get_metrics(FontFace::HelveticaBold).measure_pt(ERROR_LABEL, ERROR_LABEL_SIZE);
        self.draw_text(
            FontFace::HelveticaBold,
            ERROR_LABEL_SIZE,
            x + (CardGeometry::TILE - width) / 2.0,
            y + (CardGeometry::TILE - ERROR_LABEL_SIZE) / 2.0,
            ERROR_LABEL,
        );
        self.push("Q", vec![]);
    }
}
