/// PDF rendering: walks the planned blocks with a layout cursor and
/// produces the paginated document bytes via printpdf.
///
/// Page format is fixed (US letter, constant margins, constant raster
/// DPI). Figures keep their image and caption together: if the pair does
/// not fit in the remaining space the cursor breaks to a new page first.
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference,
};

use super::plan::Block;
use super::ExportError;

/// US letter
pub const PAGE_WIDTH_MM: f64 = 215.9;
pub const PAGE_HEIGHT_MM: f64 = 279.4;
pub const MARGIN_MM: f64 = 18.0;

/// Raster quality for embedded images
const EXPORT_DPI: f64 = 150.0;

const TITLE_SIZE: f64 = 24.0;
const SUBTITLE_SIZE: f64 = 13.0;
const HEADING_SIZE: f64 = 16.0;
const BODY_SIZE: f64 = 11.0;
const CAPTION_SIZE: f64 = 9.5;

/// Points to millimeters
const PT_TO_MM: f64 = 0.352_778;

const CONTENT_WIDTH_MM: f64 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub pages: usize,
    /// Figures whose asset failed to load and were omitted
    pub skipped_images: usize,
}

/// Render the planned blocks into PDF bytes
pub fn render(blocks: &[Block], doc_title: &str) -> Result<RenderedDocument, ExportError> {
    let mut cursor = Cursor::new(doc_title)?;
    let mut skipped_images = 0;

    for block in blocks {
        match block {
            Block::Cover {
                title,
                generated_on,
            } => {
                cursor.y = PAGE_HEIGHT_MM * 0.38;
                cursor.write_wrapped(title, 30.0, true);
                cursor.advance(6.0);
                cursor.write_wrapped(&format!("Generated {generated_on}"), BODY_SIZE, false);
            }
            Block::PageBreak => cursor.break_page(),
            Block::Title(title) => {
                cursor.write_wrapped(title, TITLE_SIZE, true);
                cursor.advance(2.0);
            }
            Block::Subtitle(subtitle) => {
                cursor.write_wrapped(subtitle, SUBTITLE_SIZE, false);
                cursor.advance(4.0);
            }
            Block::SectionHeading(heading) => {
                cursor.ensure_room(line_height(HEADING_SIZE) + 10.0);
                cursor.advance(4.0);
                cursor.write_wrapped(heading, HEADING_SIZE, true);
                cursor.advance(2.0);
            }
            Block::Paragraph(text) => {
                cursor.write_wrapped(text, BODY_SIZE, false);
                cursor.advance(3.0);
            }
            Block::Figure { path, caption } => {
                if !cursor.place_figure(path, caption) {
                    skipped_images += 1;
                    eprintln!("⚠️  Skipping unreadable export image: {path}");
                }
            }
        }
    }

    let pages = cursor.pages;
    let bytes = cursor
        .doc
        .save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    Ok(RenderedDocument {
        bytes,
        pages,
        skipped_images,
    })
}

fn line_height(font_size: f64) -> f64 {
    font_size * PT_TO_MM * 1.45
}

/// Greedy word wrap against an average-glyph-width estimate for the
/// built-in Helvetica faces. Good enough for a report layout; long
/// unbreakable tokens get a line of their own.
pub(crate) fn wrap_text(text: &str, font_size: f64, width_mm: f64) -> Vec<String> {
    let avg_char_mm = font_size * PT_TO_MM * 0.5;
    let max_chars = ((width_mm / avg_char_mm).floor() as usize).max(1);

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Layout cursor over a growing document. `y` is measured from the top
/// of the page in millimeters; printpdf places from the bottom-left, so
/// placement converts at the last moment.
struct Cursor {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f64,
    pages: usize,
}

impl Cursor {
    fn new(doc_title: &str) -> Result<Self, ExportError> {
        let (doc, page, layer) =
            PdfDocument::new(
                doc_title,
                Mm(PAGE_WIDTH_MM as f32),
                Mm(PAGE_HEIGHT_MM as f32),
                "Content",
            );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Cursor {
            doc,
            layer,
            regular,
            bold,
            y: MARGIN_MM,
            pages: 1,
        })
    }

    fn break_page(&mut self) {
        let (page, layer) =
            self.doc
                .add_page(Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "Content");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = MARGIN_MM;
        self.pages += 1;
    }

    /// Break to a fresh page unless `needed` millimeters still fit
    fn ensure_room(&mut self, needed: f64) {
        if self.y + needed > PAGE_HEIGHT_MM - MARGIN_MM {
            self.break_page();
        }
    }

    fn advance(&mut self, mm: f64) {
        self.y += mm;
    }

    /// Write wrapped text, breaking pages between lines as needed
    fn write_wrapped(&mut self, text: &str, font_size: f64, bold: bool) {
        let height = line_height(font_size);
        for line in wrap_text(text, font_size, CONTENT_WIDTH_MM) {
            self.ensure_room(height);
            self.y += height;
            let baseline = Mm((PAGE_HEIGHT_MM - self.y) as f32);
            let font = if bold { &self.bold } else { &self.regular };
            self.layer
                .use_text(line, font_size as f32, Mm(MARGIN_MM as f32), baseline, font);
        }
    }

    /// Place one figure, keeping image and caption together across page
    /// breaks. Returns false if the asset could not be loaded; the export
    /// continues without it.
    fn place_figure(&mut self, path: &str, caption: &str) -> bool {
        let Ok(dynamic) = printpdf::image_crate::open(path) else {
            return false;
        };
        let image = Image::from_dynamic_image(&dynamic);

        let px_w = image.image.width.0 as f64;
        let px_h = image.image.height.0 as f64;
        let natural_w_mm = px_w * 25.4 / EXPORT_DPI;
        let natural_h_mm = px_h * 25.4 / EXPORT_DPI;

        // Constrain to the content width
        let scale = (CONTENT_WIDTH_MM / natural_w_mm).min(1.0);
        let w_mm = natural_w_mm * scale;
        let h_mm = natural_h_mm * scale;

        let caption_lines = wrap_text(caption, CAPTION_SIZE, CONTENT_WIDTH_MM);
        let caption_height = caption_lines.len() as f64 * line_height(CAPTION_SIZE);

        // Image + caption are atomic across page breaks
        self.ensure_room(h_mm + caption_height + 6.0);

        self.y += h_mm;
        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                // Centered within the content column
                translate_x: Some(Mm((MARGIN_MM + (CONTENT_WIDTH_MM - w_mm) / 2.0) as f32)),
                translate_y: Some(Mm((PAGE_HEIGHT_MM - self.y) as f32)),
                scale_x: Some(scale as f32),
                scale_y: Some(scale as f32),
                dpi: Some(EXPORT_DPI as f32),
                ..ImageTransform::default()
            },
        );

        self.advance(2.0);
        self.write_wrapped(caption, CAPTION_SIZE, false);
        self.advance(4.0);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap_text(
            "the quick brown fox jumps over the lazy dog near the launch pad",
            BODY_SIZE,
            40.0,
        );
        assert!(lines.len() > 1, "narrow column must wrap");
        // Re-joining loses nothing
        assert_eq!(
            lines.join(" "),
            "the quick brown fox jumps over the lazy dog near the launch pad"
        );
    }

    #[test]
    fn test_wrap_single_short_line() {
        assert_eq!(
            wrap_text("short", BODY_SIZE, CONTENT_WIDTH_MM),
            vec!["short".to_string()]
        );
        assert!(wrap_text("   ", BODY_SIZE, CONTENT_WIDTH_MM).is_empty());
    }

    #[test]
    fn test_render_counts_pages() {
        let blocks = vec![
            Block::Title("One".into()),
            Block::Paragraph("Body.".into()),
            Block::PageBreak,
            Block::Title("Two".into()),
        ];
        let doc = render(&blocks, "test").unwrap();
        assert_eq!(doc.pages, 2);
        assert!(!doc.bytes.is_empty());
        assert_eq!(doc.skipped_images, 0);
    }

    #[test]
    fn test_missing_image_is_skipped_not_fatal() {
        let blocks = vec![
            Block::Title("Figures".into()),
            Block::Figure {
                path: "does/not/exist.png".into(),
                caption: "Gone".into(),
            },
        ];
        let doc = render(&blocks, "test").unwrap();
        assert_eq!(doc.skipped_images, 1);
        assert!(!doc.bytes.is_empty(), "export still produces a document");
    }
}
