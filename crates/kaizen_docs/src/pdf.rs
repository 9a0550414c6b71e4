//! PDF document generation.
//!
//! Builds multi-page A4 PDF 1.4 files from raw PDF objects using the
//! built-in Helvetica fonts, so no font files are required. Layout is a
//! single top-down cursor: every block measures itself, asks for space and
//! breaks the page when it runs out.

use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::RgbaImage;
use kaizen_core::ExportError;
use std::io::Write;
use tracing::warn;

use crate::rasterizer::Bitmap;
use crate::text::{Font, win_ansi_byte, wrap_text};

/// A4 in points.
pub const PAGE_WIDTH: f64 = 595.28;
pub const PAGE_HEIGHT: f64 = 841.89;

/// Points per millimetre.
pub const MM: f64 = 72.0 / 25.4;

pub const MARGIN: f64 = 15.0 * MM;

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    font: Font,
    size: f64,
    line_height: f64,
    gap: f64,
}

const COVER: TextStyle = TextStyle {
    font: Font::Bold,
    size: 24.0,
    line_height: 10.0 * MM,
    gap: 8.0 * MM,
};
const TITLE: TextStyle = TextStyle {
    font: Font::Bold,
    size: 18.0,
    line_height: 7.0 * MM,
    gap: 5.0 * MM,
};
const SUBTITLE: TextStyle = TextStyle {
    font: Font::Bold,
    size: 14.0,
    line_height: 6.0 * MM,
    gap: 4.0 * MM,
};
const LABEL: TextStyle = TextStyle {
    font: Font::Bold,
    size: 12.0,
    line_height: 5.5 * MM,
    gap: 2.0 * MM,
};
const BODY: TextStyle = TextStyle {
    font: Font::Regular,
    size: 11.0,
    line_height: 5.0 * MM,
    gap: 5.0 * MM,
};

const BULLET_INDENT: f64 = 5.0 * MM;
const CELL_PADDING: f64 = 3.0;
const EPSILON: f64 = 1e-6;

/// An embedded image XObject: RGB samples, Flate-compressed.
struct PdfImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// Incremental PDF layout engine. One builder per document.
pub struct PdfDocumentBuilder {
    finished_pages: Vec<String>,
    current: String,
    /// Distance of the cursor from the top edge of the page, in points.
    y: f64,
    images: Vec<PdfImage>,
}

impl Default for PdfDocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocumentBuilder {
    pub fn new() -> Self {
        Self {
            finished_pages: Vec::new(),
            current: String::new(),
            y: MARGIN,
            images: Vec::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.finished_pages.len() + 1
    }

    pub fn cursor_y(&self) -> f64 {
        self.y
    }

    pub fn content_width(&self) -> f64 {
        PAGE_WIDTH - 2.0 * MARGIN
    }

    fn bottom(&self) -> f64 {
        PAGE_HEIGHT - MARGIN
    }

    fn usable_height(&self) -> f64 {
        PAGE_HEIGHT - 2.0 * MARGIN
    }

    fn at_page_top(&self) -> bool {
        (self.y - MARGIN).abs() < EPSILON
    }

    pub fn new_page(&mut self) {
        self.finished_pages.push(std::mem::take(&mut self.current));
        self.y = MARGIN;
    }

    /// Break the page if fewer than `needed` points remain below the cursor.
    /// Returns `true` when a new page was started. A fresh page is never
    /// broken again, so oversized blocks flow from the top.
    pub fn ensure_page_space(&mut self, needed: f64) -> bool {
        if self.y + needed > self.bottom() + EPSILON && !self.at_page_top() {
            self.new_page();
            true
        } else {
            false
        }
    }

    // -----------------------------------------------------------------------
    // Text blocks
    // -----------------------------------------------------------------------

    pub fn add_cover_title(&mut self, text: &str) -> Result<(), ExportError> {
        self.write_block(text, COVER)
    }

    pub fn add_title(&mut self, text: &str) -> Result<(), ExportError> {
        self.write_block(text, TITLE)
    }

    pub fn add_subtitle(&mut self, text: &str) -> Result<(), ExportError> {
        self.write_block(text, SUBTITLE)
    }

    /// Bold category heading, e.g. a fishbone category above its causes.
    pub fn add_label(&mut self, text: &str) -> Result<(), ExportError> {
        self.write_block(text, LABEL)
    }

    pub fn add_paragraph(&mut self, text: &str) -> Result<(), ExportError> {
        self.write_block(text, BODY)
    }

    /// Bulleted list; wrapped lines hang under the item text.
    pub fn add_bullets<S: AsRef<str>>(&mut self, items: &[S]) -> Result<(), ExportError> {
        let width = self.content_width() - BULLET_INDENT;
        for item in items {
            let lines = wrap_text(item.as_ref(), BODY.font, BODY.size, width)?;
            self.ensure_page_space(lines.len() as f64 * BODY.line_height);
            for (i, line) in lines.iter().enumerate() {
                self.ensure_page_space(BODY.line_height);
                let baseline = self.y + BODY.size;
                if i == 0 {
                    self.draw_text("\u{2022}", BODY.font, BODY.size, MARGIN + 1.5 * MM, baseline);
                }
                self.draw_text(line, BODY.font, BODY.size, MARGIN + BULLET_INDENT, baseline);
                self.y += BODY.line_height;
            }
            self.y += 1.0 * MM;
        }
        self.y += BODY.gap - 1.0 * MM;
        Ok(())
    }

    fn write_block(&mut self, text: &str, style: TextStyle) -> Result<(), ExportError> {
        let lines = wrap_text(text, style.font, style.size, self.content_width())?;
        self.ensure_page_space(lines.len() as f64 * style.line_height);
        for line in &lines {
            self.ensure_page_space(style.line_height);
            let baseline = self.y + style.size;
            self.draw_text(line, style.font, style.size, MARGIN, baseline);
            self.y += style.line_height;
        }
        self.y += style.gap;
        Ok(())
    }

    /// Emit one text run. `baseline` is measured from the page top.
    fn draw_text(&mut self, text: &str, font: Font, size: f64, x: f64, baseline: f64) {
        if text.is_empty() {
            return;
        }
        let y = PAGE_HEIGHT - baseline;
        self.current.push_str("BT\n");
        self.current.push_str(&format!("/{} {size:.1} Tf\n", font.resource()));
        self.current.push_str(&format!("{x:.2} {y:.2} Td\n"));
        self.current.push_str(&format!("({}) Tj\n", pdf_escape(text)));
        self.current.push_str("ET\n");
    }

    // -----------------------------------------------------------------------
    // Sections
    // -----------------------------------------------------------------------

    /// Start a section on a fresh page and draw its title.
    pub fn start_section(&mut self, title: &str) -> Result<(), ExportError> {
        if !self.current.is_empty() {
            self.new_page();
        }
        self.add_title(title)
    }

    /// Start a section and run `body` against the builder.
    pub fn add_section<F>(&mut self, title: &str, body: F) -> Result<(), ExportError>
    where
        F: FnOnce(&mut Self) -> Result<(), ExportError>,
    {
        self.start_section(title)?;
        body(self)
    }

    // -----------------------------------------------------------------------
    // Tables
    // -----------------------------------------------------------------------

    /// Grid table with evenly distributed columns.
    ///
    /// The header row repeats on every page the table spans. A row is moved
    /// whole to the next page when it fits there; only rows taller than a
    /// page are split between lines.
    pub fn add_table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> Result<(), ExportError> {
        let cols = headers.len();
        if cols == 0 {
            return Err(ExportError::Table("table has no columns".into()));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(ExportError::Table(format!(
                "row {} has {} cells, expected {cols}",
                i + 1,
                row.len()
            )));
        }

        let size = if cols >= 6 { 8.0 } else { 10.0 };
        let line_h = size * 1.25;
        let col_w = self.content_width() / cols as f64;
        let cell_w = col_w - 2.0 * CELL_PADDING;

        let header_cells = headers
            .iter()
            .map(|h| wrap_text(h, Font::Bold, size, cell_w))
            .collect::<Result<Vec<_>, _>>()?;
        let header_h = max_lines(&header_cells) as f64 * line_h + 2.0 * CELL_PADDING;
        let layout = TableLayout {
            col_w,
            size,
            line_h,
            header_h,
        };

        let fresh_lines = layout.lines_fitting(self.usable_height() - header_h);
        if fresh_lines == 0 {
            return Err(ExportError::Table(
                "table header leaves no room for a row on a page".into(),
            ));
        }

        let body = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| wrap_text(c, Font::Regular, size, cell_w))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let first_lines = body.first().map(|r| max_lines(r).min(fresh_lines)).unwrap_or(0);
        self.ensure_page_space(header_h + layout.chunk_height(first_lines.max(1)));
        self.draw_table_header(&header_cells, &layout);

        for cells in &body {
            let total = max_lines(cells);
            let mut start = 0;
            loop {
                let remaining = total - start;
                let available = layout.lines_fitting(self.bottom() - self.y);
                if remaining <= available {
                    self.draw_table_row(cells, start, remaining, &layout);
                    break;
                }
                if start == 0 && total <= fresh_lines {
                    self.table_page_break(&header_cells, &layout);
                    continue;
                }
                if available == 0 {
                    self.table_page_break(&header_cells, &layout);
                    continue;
                }
                self.draw_table_row(cells, start, available, &layout);
                start += available;
                self.table_page_break(&header_cells, &layout);
            }
        }

        self.y += BODY.gap;
        Ok(())
    }

    fn table_page_break(&mut self, header_cells: &[Vec<String>], layout: &TableLayout) {
        self.new_page();
        self.draw_table_header(header_cells, layout);
    }

    fn draw_table_header(&mut self, cells: &[Vec<String>], layout: &TableLayout) {
        let top = self.y;
        let h = layout.header_h;
        let pdf_y = PAGE_HEIGHT - (top + h);
        self.current.push_str("0.9 0.9 0.9 rg\n");
        self.current.push_str(&format!(
            "{MARGIN:.2} {pdf_y:.2} {:.2} {h:.2} re f\n",
            self.content_width()
        ));
        self.current.push_str("0 0 0 rg\n");
        self.draw_cells(cells, 0, max_lines(cells), Font::Bold, layout, h);
        self.y += h;
    }

    fn draw_table_row(&mut self, cells: &[Vec<String>], start: usize, count: usize, layout: &TableLayout) {
        let h = layout.chunk_height(count);
        self.draw_cells(cells, start, count, Font::Regular, layout, h);
        self.y += h;
    }

    /// Draw lines `start..start+count` of every cell plus cell borders.
    fn draw_cells(
        &mut self,
        cells: &[Vec<String>],
        start: usize,
        count: usize,
        font: Font,
        layout: &TableLayout,
        height: f64,
    ) {
        let top = self.y;
        self.current.push_str("0.6 0.6 0.6 RG\n0.5 w\n");
        for (col, lines) in cells.iter().enumerate() {
            let x = MARGIN + col as f64 * layout.col_w;
            let pdf_y = PAGE_HEIGHT - (top + height);
            self.current.push_str(&format!(
                "{x:.2} {pdf_y:.2} {:.2} {height:.2} re S\n",
                layout.col_w
            ));
            for (i, line) in lines.iter().skip(start).take(count).enumerate() {
                let baseline = top + CELL_PADDING + i as f64 * layout.line_h + layout.size;
                self.draw_text(line, font, layout.size, x + CELL_PADDING, baseline);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Images
    // -----------------------------------------------------------------------

    /// Place a bitmap contain-fitted into a `width_mm` x `height_mm` box,
    /// centred horizontally. Images are never split across pages. Returns
    /// `false` when the bitmap could not be embedded.
    pub fn add_image(&mut self, bitmap: &Bitmap, width_mm: f64, height_mm: f64) -> bool {
        let image = match embed_bitmap(bitmap) {
            Ok(image) => image,
            Err(e) => {
                warn!(error = %e, "Skipping image that could not be embedded");
                return false;
            }
        };

        let box_w = (width_mm * MM).min(self.content_width());
        let box_h = (height_mm * MM).min(self.usable_height());
        let scale = (box_w / f64::from(image.width)).min(box_h / f64::from(image.height));
        let draw_w = f64::from(image.width) * scale;
        let draw_h = f64::from(image.height) * scale;

        self.ensure_page_space(draw_h);
        let index = self.images.len() + 1;
        self.images.push(image);

        let x = MARGIN + (self.content_width() - draw_w) / 2.0;
        let pdf_y = PAGE_HEIGHT - (self.y + draw_h);
        self.current.push_str(&format!(
            "q\n{draw_w:.2} 0 0 {draw_h:.2} {x:.2} {pdf_y:.2} cm\n/Im{index} Do\nQ\n"
        ));
        self.y += draw_h + BODY.gap;
        true
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Serialize the document. The output carries no timestamps, so the
    /// same layout always yields the same bytes.
    pub fn finish(mut self, title: &str) -> Vec<u8> {
        self.finished_pages.push(std::mem::take(&mut self.current));
        let pages = self.finished_pages;

        // 1 catalog, 2 pages, 3-4 fonts, 5 resources, 6 info,
        // then images, then a (page, content) pair per page.
        let first_image = 7;
        let first_page = first_image + self.images.len();
        let page_obj = |i: usize| first_page + 2 * i;

        let mut pdf: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = Vec::new();
        pdf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        offsets.push(pdf.len());
        pdf.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

        offsets.push(pdf.len());
        let kids = (0..pages.len())
            .map(|i| format!("{} 0 R", page_obj(i)))
            .collect::<Vec<_>>()
            .join(" ");
        pdf.extend_from_slice(
            format!(
                "2 0 obj\n<< /Type /Pages /Kids [{kids}] /Count {} >>\nendobj\n",
                pages.len()
            )
            .as_bytes(),
        );

        for (num, font) in [(3, Font::Bold), (4, Font::Regular)] {
            offsets.push(pdf.len());
            pdf.extend_from_slice(
                format!(
                    "{num} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>\nendobj\n",
                    font.base_font()
                )
                .as_bytes(),
            );
        }

        offsets.push(pdf.len());
        let xobjects = (0..self.images.len())
            .map(|i| format!("/Im{} {} 0 R", i + 1, first_image + i))
            .collect::<Vec<_>>()
            .join(" ");
        pdf.extend_from_slice(
            format!(
                "5 0 obj\n<< /Font << /F1 3 0 R /F2 4 0 R >> /XObject << {xobjects} >> >>\nendobj\n"
            )
            .as_bytes(),
        );

        offsets.push(pdf.len());
        pdf.extend_from_slice(
            format!(
                "6 0 obj\n<< /Title ({}) /Producer (Kaizen Export) >>\nendobj\n",
                pdf_escape(title)
            )
            .as_bytes(),
        );

        for (i, image) in self.images.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(
                format!(
                    "{} 0 obj\n<< /Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /FlateDecode /Length {} >>\nstream\n",
                    first_image + i,
                    image.width,
                    image.height,
                    image.data.len()
                )
                .as_bytes(),
            );
            pdf.extend_from_slice(&image.data);
            pdf.extend_from_slice(b"\nendstream\nendobj\n");
        }

        for (i, content) in pages.iter().enumerate() {
            let page = page_obj(i);
            offsets.push(pdf.len());
            pdf.extend_from_slice(
                format!(
                    "{page} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] /Resources 5 0 R /Contents {} 0 R >>\nendobj\n",
                    page + 1
                )
                .as_bytes(),
            );
            offsets.push(pdf.len());
            pdf.extend_from_slice(
                format!(
                    "{} 0 obj\n<< /Length {} >>\nstream\n{content}\nendstream\nendobj\n",
                    page + 1,
                    content.len()
                )
                .as_bytes(),
            );
        }

        let xref_offset = pdf.len();
        let num_objects = offsets.len() + 1;
        let mut tail = format!("xref\n0 {num_objects}\n0000000000 65535 f \n");
        for offset in &offsets {
            tail.push_str(&format!("{offset:010} 00000 n \n"));
        }
        tail.push_str(&format!(
            "trailer\n<< /Size {num_objects} /Root 1 0 R /Info 6 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        ));
        pdf.extend_from_slice(tail.as_bytes());
        pdf
    }
}

#[derive(Debug, Clone, Copy)]
struct TableLayout {
    col_w: f64,
    size: f64,
    line_h: f64,
    header_h: f64,
}

impl TableLayout {
    fn chunk_height(&self, lines: usize) -> f64 {
        lines as f64 * self.line_h + 2.0 * CELL_PADDING
    }

    /// Whole lines of a row that fit into `space` points.
    fn lines_fitting(&self, space: f64) -> usize {
        let n = ((space - 2.0 * CELL_PADDING) / self.line_h + EPSILON).floor();
        if n.is_finite() && n > 0.0 { n as usize } else { 0 }
    }
}

fn max_lines(cells: &[Vec<String>]) -> usize {
    cells.iter().map(Vec::len).max().unwrap_or(1).max(1)
}

/// Decode a bitmap into Flate-compressed RGB, flattening alpha onto white.
fn embed_bitmap(bitmap: &Bitmap) -> Result<PdfImage, ExportError> {
    let decoded = image::load_from_memory(bitmap.png())
        .map_err(|e| ExportError::Layout(format!("undecodable image: {e}")))?;
    let rgba: RgbaImage = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ExportError::Layout("empty image".into()));
    }

    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for px in rgba.pixels() {
        let [r, g, b, a] = px.0;
        let alpha = u16::from(a);
        for channel in [r, g, b] {
            let blended = (u16::from(channel) * alpha + 255 * (255 - alpha)) / 255;
            rgb.push(blended as u8);
        }
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&rgb)
        .map_err(|e| ExportError::Package(format!("image compression failed: {e}")))?;
    let data = encoder
        .finish()
        .map_err(|e| ExportError::Package(format!("image compression failed: {e}")))?;
    Ok(PdfImage {
        width,
        height,
        data,
    })
}

/// Escape text for a PDF string literal in WinAnsiEncoding. Non-ASCII bytes
/// are written as octal escapes so content streams stay 7-bit.
pub fn pdf_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        let byte = win_ansi_byte(ch);
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            32..=126 => out.push(byte as char),
            _ => out.push_str(&format!("\\{byte:03o}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn page_count(bytes: &[u8]) -> usize {
        let text = String::from_utf8_lossy(bytes);
        text.matches("/Type /Page /Parent").count()
    }

    fn red_bitmap(w: u32, h: u32) -> Bitmap {
        Bitmap::from_rgba(RgbaImage::from_pixel(w, h, Rgba([255, 0, 0, 128]))).unwrap()
    }

    #[test]
    fn test_empty_document_is_valid() {
        let bytes = PdfDocumentBuilder::new().finish("Kosong");
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn test_content_length_excludes_end_of_line() {
        let mut b = PdfDocumentBuilder::new();
        b.add_title("Langkah 1").unwrap();
        let bytes = b.finish("Panjang");
        let text = String::from_utf8_lossy(&bytes);
        let start = text.find("<< /Length ").unwrap() + "<< /Length ".len();
        let declared: usize = text[start..].split(' ').next().unwrap().parse().unwrap();
        let body = text[start..].find("stream\n").unwrap() + start + "stream\n".len();
        let end = text[body..].find("\nendstream").unwrap();
        assert_eq!(declared, end);
    }

    #[test]
    fn test_text_blocks_advance_cursor() {
        let mut b = PdfDocumentBuilder::new();
        let start = b.cursor_y();
        b.add_title("Langkah 1: Menetapkan Tema").unwrap();
        let after_title = b.cursor_y();
        assert!((after_title - start - (7.0 + 5.0) * MM).abs() < 1e-6);
        b.add_paragraph("Latar belakang singkat.").unwrap();
        assert!((b.cursor_y() - after_title - (5.0 + 5.0) * MM).abs() < 1e-6);
    }

    #[test]
    fn test_long_paragraph_spans_pages() {
        let mut b = PdfDocumentBuilder::new();
        let text = "Kalimat panjang tentang perbaikan proses produksi. ".repeat(400);
        b.add_paragraph(&text).unwrap();
        assert!(b.page_count() > 1);
        assert!(b.cursor_y() <= PAGE_HEIGHT - MARGIN + BODY.gap + EPSILON);
    }

    #[test]
    fn test_ensure_page_space_breaks_only_when_needed() {
        let mut b = PdfDocumentBuilder::new();
        assert!(!b.ensure_page_space(10_000.0), "fresh page never breaks");
        b.add_paragraph("isi").unwrap();
        assert!(!b.ensure_page_space(50.0));
        assert!(b.ensure_page_space(10_000.0));
        assert_eq!(b.page_count(), 2);
        assert!((b.cursor_y() - MARGIN).abs() < EPSILON);
    }

    #[test]
    fn test_sections_start_new_pages() {
        let mut b = PdfDocumentBuilder::new();
        b.add_cover_title("Laporan").unwrap();
        b.add_section("Langkah 1", |b| b.add_paragraph("a")).unwrap();
        b.add_section("Langkah 2", |b| b.add_paragraph("b")).unwrap();
        assert_eq!(b.page_count(), 3);
        assert_eq!(page_count(&b.finish("Laporan")), 3);
    }

    #[test]
    fn test_first_section_reuses_blank_page() {
        let mut b = PdfDocumentBuilder::new();
        b.start_section("Jadwal").unwrap();
        assert_eq!(b.page_count(), 1);
    }

    #[test]
    fn test_table_rejects_ragged_rows() {
        let mut b = PdfDocumentBuilder::new();
        let err = b
            .add_table(&["A", "B"], &[vec!["1".into()]])
            .unwrap_err();
        assert!(matches!(err, ExportError::Table(_)));
        assert!(matches!(
            b.add_table(&[], &[]).unwrap_err(),
            ExportError::Table(_)
        ));
    }

    #[test]
    fn test_table_repeats_header_on_each_page() {
        let mut b = PdfDocumentBuilder::new();
        let rows: Vec<Vec<String>> = (0..200)
            .map(|i| vec![format!("Tugas {i}"), "2025-01-01".into(), "3".into()])
            .collect();
        b.add_table(&["Tugas", "Mulai", "Durasi"], &rows).unwrap();
        let pages = b.page_count();
        assert!(pages > 1);
        let bytes = b.finish("T");
        let text = String::from_utf8_lossy(&bytes);
        assert_eq!(text.matches("(Mulai) Tj").count(), pages);
        assert!(text.contains("(Tugas 199) Tj"));
    }

    #[test]
    fn test_table_splits_row_taller_than_page() {
        let mut b = PdfDocumentBuilder::new();
        let huge = "kata ".repeat(3000);
        b.add_table(&["Isi", "Catatan"], &[vec![huge, "ok".into()]]).unwrap();
        assert!(b.page_count() > 1);
    }

    #[test]
    fn test_row_moves_whole_to_next_page() {
        let mut b = PdfDocumentBuilder::new();
        // Fill most of the first page.
        while b.cursor_y() < PAGE_HEIGHT - MARGIN - 40.0 {
            b.add_paragraph("pengisi").unwrap();
            if b.page_count() > 1 {
                break;
            }
        }
        let pages_before = b.page_count();
        let cell = "baris ".repeat(60);
        b.add_table(&["A", "B"], &[vec![cell.clone(), cell]]).unwrap();
        assert_eq!(b.page_count(), pages_before + 1);
        let bytes = b.finish("x");
        let text = String::from_utf8_lossy(&bytes);
        // Header drawn exactly once: the row was not split.
        assert_eq!(text.matches("(A) Tj").count(), 1);
    }

    #[test]
    fn test_add_image_embeds_xobject() {
        let mut b = PdfDocumentBuilder::new();
        assert!(b.add_image(&red_bitmap(40, 20), 100.0, 100.0));
        let bytes = b.finish("img");
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Subtype /Image /Width 40 /Height 20"));
        assert!(text.contains("/Im1 Do"));
        assert!(text.contains("/XObject << /Im1 7 0 R >>"));
    }

    #[test]
    fn test_image_contain_fit_keeps_aspect() {
        let mut b = PdfDocumentBuilder::new();
        let before = b.cursor_y();
        b.add_image(&red_bitmap(400, 100), 120.0, 80.0);
        let drawn_h = b.cursor_y() - before - BODY.gap;
        // 4:1 image in a 120x80 mm box is width-bound: 30 mm tall.
        assert!((drawn_h - 30.0 * MM).abs() < 1e-6);
    }

    #[test]
    fn test_finish_is_deterministic() {
        let build = || {
            let mut b = PdfDocumentBuilder::new();
            b.add_cover_title("Sama").unwrap();
            b.add_bullets(&["satu", "dua"]).unwrap();
            b.add_image(&red_bitmap(8, 8), 50.0, 50.0);
            b.finish("Sama")
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut b = PdfDocumentBuilder::new();
        b.add_paragraph("Halo").unwrap();
        b.new_page();
        b.add_paragraph("Dunia").unwrap();
        let bytes = b.finish("x");
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let xref_at = text.rfind("xref\n").unwrap();
        for (idx, line) in text[xref_at..].lines().skip(3).take_while(|l| l.ends_with(" n ")).enumerate() {
            let offset: usize = line[..10].parse().unwrap();
            assert!(bytes[offset..].starts_with(format!("{} 0 obj", idx + 1).as_bytes()));
        }
    }

    #[test]
    fn test_pdf_escape() {
        assert_eq!(pdf_escape("hello"), "hello");
        assert_eq!(pdf_escape("(test)"), "\\(test\\)");
        assert_eq!(pdf_escape("a\\b"), "a\\\\b");
        assert_eq!(pdf_escape("café"), "caf\\351");
        assert_eq!(pdf_escape("•"), "\\225");
    }
}
