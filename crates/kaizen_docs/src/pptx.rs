//! PPTX (PowerPoint) package writer.
//!
//! A [`SlideDeck`] is a theme plus a list of slides made of positioned
//! elements. [`generate_pptx`] turns it into a valid 16:9 OOXML
//! presentation using the `zip` crate. Element geometry is in inches;
//! colours are theme roles resolved while writing.

use anyhow::{Context, Result};
use std::io::{Cursor, Write};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::rasterizer::Bitmap;
use crate::theme::{SlideColor, SlideTheme};

pub const EMU_PER_INCH: f64 = 914_400.0;
pub const SLIDE_WIDTH_EMU: i64 = 12_192_000;
pub const SLIDE_HEIGHT_EMU: i64 = 6_858_000;

/// Slide size in inches (13.333 x 7.5).
pub const SLIDE_WIDTH_IN: f64 = SLIDE_WIDTH_EMU as f64 / EMU_PER_INCH;
pub const SLIDE_HEIGHT_IN: f64 = SLIDE_HEIGHT_EMU as f64 / EMU_PER_INCH;

// ---------------------------------------------------------------------------
// Deck model
// ---------------------------------------------------------------------------

/// Position and size in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Largest rect with the given aspect ratio that fits inside `self`,
    /// centred.
    pub fn contain(&self, aspect_ratio: f64) -> Rect {
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return *self;
        }
        let (w, h) = if self.w / self.h > aspect_ratio {
            (self.h * aspect_ratio, self.h)
        } else {
            (self.w, self.w / aspect_ratio)
        };
        Rect::new(self.x + (self.w - w) / 2.0, self.y + (self.h - h) / 2.0, w, h)
    }
}

fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// One paragraph of a text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextParagraph {
    pub text: String,
    pub size: f64,
    pub bold: bool,
    pub color: SlideColor,
    pub bullet: bool,
}

impl TextParagraph {
    pub fn new(text: impl Into<String>, size: f64, color: SlideColor) -> Self {
        Self {
            text: text.into(),
            size,
            bold: false,
            color,
            bullet: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn bulleted(mut self) -> Self {
        self.bullet = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlideElement {
    Text {
        rect: Rect,
        align: TextAlign,
        paragraphs: Vec<TextParagraph>,
    },
    Table {
        rect: Rect,
        font_size: f64,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Picture {
        rect: Rect,
        image: Bitmap,
    },
    /// Horizontal separator line.
    Rule {
        rect: Rect,
        color: SlideColor,
    },
}

impl SlideElement {
    /// Picture contain-fitted into `frame`.
    pub fn picture_in(frame: Rect, image: Bitmap) -> Self {
        Self::Picture {
            rect: frame.contain(image.aspect_ratio()),
            image,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slide {
    pub elements: Vec<SlideElement>,
}

impl Slide {
    pub fn push(&mut self, element: SlideElement) {
        self.elements.push(element);
    }

    fn pictures(&self) -> impl Iterator<Item = &Bitmap> {
        self.elements.iter().filter_map(|e| match e {
            SlideElement::Picture { image, .. } => Some(image),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlideDeck {
    pub theme: SlideTheme,
    pub slides: Vec<Slide>,
}

// ---------------------------------------------------------------------------
// Table pagination
// ---------------------------------------------------------------------------

const CELL_PADDING_IN: f64 = 0.1;

/// Estimated rendered height of a table row in inches, from its text alone.
pub fn estimate_row_height(cells: &[String], col_width_in: f64, font_size: f64) -> f64 {
    // Average glyph advance is about half an em.
    let chars_per_line = ((col_width_in - 2.0 * CELL_PADDING_IN) * 72.0 / (font_size * 0.5))
        .floor()
        .max(1.0) as usize;
    let lines = cells
        .iter()
        .map(|cell| {
            cell.split('\n')
                .map(|l| l.chars().count().div_ceil(chars_per_line).max(1))
                .sum::<usize>()
        })
        .max()
        .unwrap_or(1)
        .max(1);
    lines as f64 * font_size * 1.2 / 72.0 + 2.0 * CELL_PADDING_IN
}

/// Split `rows` into pages that each fit `available_h` inches under the
/// header. Every page holds at least one row; an empty table yields one
/// empty page so its header is still shown.
pub fn paginate_table(
    headers: &[String],
    rows: &[Vec<String>],
    width_in: f64,
    font_size: f64,
    available_h: f64,
) -> Vec<Vec<Vec<String>>> {
    let cols = headers.len().max(1);
    let col_w = width_in / cols as f64;
    let header_h = estimate_row_height(headers, col_w, font_size);

    let mut pages: Vec<Vec<Vec<String>>> = Vec::new();
    let mut current: Vec<Vec<String>> = Vec::new();
    let mut used = header_h;
    for row in rows {
        let h = estimate_row_height(row, col_w, font_size);
        if !current.is_empty() && used + h > available_h {
            pages.push(std::mem::take(&mut current));
            used = header_h;
        }
        used += h;
        current.push(row.clone());
    }
    if !current.is_empty() || pages.is_empty() {
        pages.push(current);
    }
    pages
}

// ---------------------------------------------------------------------------
// Package writer
// ---------------------------------------------------------------------------

/// Generate a PPTX file from a deck.
///
/// Zip entries carry a fixed timestamp, so identical decks produce
/// identical bytes.
pub fn generate_pptx(deck: &SlideDeck) -> Result<Vec<u8>> {
    let buf = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(buf);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    let slide_count = deck.slides.len();
    let has_images = deck.slides.iter().any(|s| s.pictures().next().is_some());

    let write = |zip: &mut ZipWriter<Cursor<Vec<u8>>>, path: &str, data: &[u8]| -> Result<()> {
        zip.start_file(path, options)
            .with_context(|| format!("Failed to create {path}"))?;
        zip.write_all(data)
            .with_context(|| format!("Failed to write {path}"))?;
        Ok(())
    };

    write(&mut zip, "[Content_Types].xml", content_types_xml(slide_count, has_images).as_bytes())?;
    write(&mut zip, "_rels/.rels", root_rels_xml().as_bytes())?;
    write(&mut zip, "ppt/presentation.xml", presentation_xml(slide_count).as_bytes())?;
    write(
        &mut zip,
        "ppt/_rels/presentation.xml.rels",
        presentation_rels_xml(slide_count).as_bytes(),
    )?;
    write(&mut zip, "ppt/slideMasters/slideMaster1.xml", slide_master_xml().as_bytes())?;
    write(
        &mut zip,
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        slide_master_rels_xml().as_bytes(),
    )?;
    write(&mut zip, "ppt/slideLayouts/slideLayout1.xml", slide_layout_xml().as_bytes())?;
    write(
        &mut zip,
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        slide_layout_rels_xml().as_bytes(),
    )?;
    write(&mut zip, "ppt/theme/theme1.xml", theme_xml(&deck.theme).as_bytes())?;

    let mut media_index = 0usize;
    for (i, slide) in deck.slides.iter().enumerate() {
        let slide_num = i + 1;

        // Media first so the slide XML can reference rId2.. in order.
        let mut media_targets = Vec::new();
        for image in slide.pictures() {
            media_index += 1;
            let path = format!("ppt/media/image{media_index}.png");
            write(&mut zip, &path, image.png())?;
            media_targets.push(format!("../media/image{media_index}.png"));
        }

        write(
            &mut zip,
            &format!("ppt/slides/slide{slide_num}.xml"),
            slide_xml(slide, &deck.theme).as_bytes(),
        )?;
        write(
            &mut zip,
            &format!("ppt/slides/_rels/slide{slide_num}.xml.rels"),
            slide_rels_xml(&media_targets).as_bytes(),
        )?;
    }

    let cursor = zip.finish().context("Failed to finalize PPTX zip")?;
    Ok(cursor.into_inner())
}

// ---------------------------------------------------------------------------
// XML template functions
// ---------------------------------------------------------------------------

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
  xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"
  xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

fn content_types_xml(slide_count: usize, has_images: bool) -> String {
    let mut overrides = String::new();
    for i in 1..=slide_count {
        overrides.push_str(&format!(
            r#"  <Override PartName="/ppt/slides/slide{i}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#
        ));
        overrides.push('\n');
    }
    let png = if has_images {
        "  <Default Extension=\"png\" ContentType=\"image/png\"/>\n"
    } else {
        ""
    };
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
{png}  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
  <Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
  <Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
  <Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
{overrides}</Types>"#
    )
}

fn root_rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
</Relationships>"#
}

fn presentation_xml(slide_count: usize) -> String {
    let mut slide_list = String::new();
    for i in 1..=slide_count {
        slide_list.push_str(&format!(
            r#"    <p:sldId id="{}" r:id="rId{}"/>"#,
            255 + i,
            i + 2 // rId1=slideMaster, rId2=theme, slides start at rId3
        ));
        slide_list.push('\n');
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation {NS}>
  <p:sldMasterIdLst>
    <p:sldMasterId id="2147483648" r:id="rId1"/>
  </p:sldMasterIdLst>
  <p:sldIdLst>
{slide_list}  </p:sldIdLst>
  <p:sldSz cx="{SLIDE_WIDTH_EMU}" cy="{SLIDE_HEIGHT_EMU}"/>
  <p:notesSz cx="{SLIDE_HEIGHT_EMU}" cy="{SLIDE_WIDTH_EMU}"/>
</p:presentation>"#
    )
}

fn presentation_rels_xml(slide_count: usize) -> String {
    let mut rels = String::new();
    rels.push_str(
        r#"  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#,
    );
    rels.push('\n');
    rels.push_str(
        r#"  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>"#,
    );
    rels.push('\n');
    for i in 1..=slide_count {
        rels.push_str(&format!(
            r#"  <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{i}.xml"/>"#,
            i + 2
        ));
        rels.push('\n');
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
{rels}</Relationships>"#
    )
}

const EMPTY_SP_TREE: &str = r#"  <p:cSld>
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>"#;

fn slide_master_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster {NS}>
{EMPTY_SP_TREE}
  <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
  <p:sldLayoutIdLst>
    <p:sldLayoutId id="2147483649" r:id="rId1"/>
  </p:sldLayoutIdLst>
</p:sldMaster>"#
    )
}

fn slide_master_rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>
</Relationships>"#
}

fn slide_layout_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout {NS} type="blank">
{EMPTY_SP_TREE}
</p:sldLayout>"#
    )
}

fn slide_layout_rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#
}

/// Office theme part carrying the deck palette and typeface.
fn theme_xml(theme: &SlideTheme) -> String {
    let SlideTheme {
        background,
        text,
        title,
        accent,
        font,
    } = theme;
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Kaizen">
  <a:themeElements>
    <a:clrScheme name="Kaizen">
      <a:dk1><a:srgbClr val="{text}"/></a:dk1>
      <a:lt1><a:srgbClr val="{background}"/></a:lt1>
      <a:dk2><a:srgbClr val="{title}"/></a:dk2>
      <a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>
      <a:accent1><a:srgbClr val="{accent}"/></a:accent1>
      <a:accent2><a:srgbClr val="ED7D31"/></a:accent2>
      <a:accent3><a:srgbClr val="A5A5A5"/></a:accent3>
      <a:accent4><a:srgbClr val="FFC000"/></a:accent4>
      <a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>
      <a:accent6><a:srgbClr val="70AD47"/></a:accent6>
      <a:hlink><a:srgbClr val="0563C1"/></a:hlink>
      <a:folHlink><a:srgbClr val="954F72"/></a:folHlink>
    </a:clrScheme>
    <a:fontScheme name="Kaizen">
      <a:majorFont><a:latin typeface="{font}"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>
      <a:minorFont><a:latin typeface="{font}"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>
    </a:fontScheme>
    <a:fmtScheme name="Default">
      <a:fillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:fillStyleLst>
      <a:lnStyleLst>
        <a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
      </a:lnStyleLst>
      <a:effectStyleLst>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
      </a:effectStyleLst>
      <a:bgFillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:bgFillStyleLst>
    </a:fmtScheme>
  </a:themeElements>
</a:theme>"#
    )
}

fn slide_xml(slide: &Slide, theme: &SlideTheme) -> String {
    let mut shapes = String::new();
    let mut shape_id = 2usize;
    let mut image_rel = 2usize;

    for element in &slide.elements {
        match element {
            SlideElement::Text {
                rect,
                align,
                paragraphs,
            } => shapes.push_str(&text_shape_xml(shape_id, rect, *align, paragraphs, theme)),
            SlideElement::Table {
                rect,
                font_size,
                headers,
                rows,
            } => shapes.push_str(&table_xml(shape_id, rect, *font_size, headers, rows, theme)),
            SlideElement::Picture { rect, .. } => {
                shapes.push_str(&picture_xml(shape_id, rect, image_rel));
                image_rel += 1;
            }
            SlideElement::Rule { rect, color } => {
                shapes.push_str(&rule_xml(shape_id, rect, theme.color(*color)))
            }
        }
        shape_id += 1;
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld {NS}>
  <p:cSld>
    <p:bg>
      <p:bgPr><a:solidFill><a:srgbClr val="{background}"/></a:solidFill><a:effectLst/></p:bgPr>
    </p:bg>
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
{shapes}    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>"#,
        background = theme.background,
    )
}

fn xfrm_xml(rect: &Rect, tag: &str) -> String {
    format!(
        r#"<{tag}><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></{tag}>"#,
        emu(rect.x),
        emu(rect.y),
        emu(rect.w),
        emu(rect.h)
    )
}

fn run_props_xml(size: f64, bold: bool, color: &str, font: &str) -> String {
    let sz = (size * 100.0).round() as i64;
    let b = if bold { r#" b="1""# } else { "" };
    format!(
        r#"<a:rPr lang="id-ID" sz="{sz}"{b} dirty="0"><a:solidFill><a:srgbClr val="{color}"/></a:solidFill><a:latin typeface="{font}"/></a:rPr>"#
    )
}

/// Paragraph XML; embedded newlines become `<a:br/>`.
fn paragraph_xml(p: &TextParagraph, align: TextAlign, theme: &SlideTheme) -> String {
    let rpr = run_props_xml(p.size, p.bold, theme.color(p.color), theme.font);
    let algn = match align {
        TextAlign::Left => "l",
        TextAlign::Center => "ctr",
    };
    let ppr = if p.bullet {
        format!(r#"<a:pPr marL="285750" indent="-285750" algn="{algn}"><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/></a:pPr>"#)
    } else {
        format!(r#"<a:pPr algn="{algn}"><a:buNone/></a:pPr>"#)
    };

    let line_break = format!("<a:br>{rpr}</a:br>");
    let runs = p
        .text
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(|line| format!("<a:r>{rpr}<a:t>{}</a:t></a:r>", xml_escape(line)))
        .collect::<Vec<_>>()
        .join(line_break.as_str());

    let sz = (p.size * 100.0).round() as i64;
    format!(r#"<a:p>{ppr}{runs}<a:endParaRPr lang="id-ID" sz="{sz}" dirty="0"/></a:p>"#)
}

fn text_shape_xml(
    id: usize,
    rect: &Rect,
    align: TextAlign,
    paragraphs: &[TextParagraph],
    theme: &SlideTheme,
) -> String {
    let mut body = String::new();
    for p in paragraphs {
        body.push_str(&paragraph_xml(p, align, theme));
    }
    if paragraphs.is_empty() {
        body.push_str(r#"<a:p><a:endParaRPr lang="id-ID"/></a:p>"#);
    }
    format!(
        r#"      <p:sp>
        <p:nvSpPr><p:cNvPr id="{id}" name="Text {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>
        <p:spPr>{xfrm}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>
        <p:txBody><a:bodyPr wrap="square" rtlCol="0"><a:normAutofit/></a:bodyPr><a:lstStyle/>{body}</p:txBody>
      </p:sp>
"#,
        xfrm = xfrm_xml(rect, "a:xfrm"),
    )
}

fn cell_borders_xml(color: &str) -> String {
    ["a:lnL", "a:lnR", "a:lnT", "a:lnB"]
        .iter()
        .map(|tag| {
            format!(r#"<{tag} w="12700"><a:solidFill><a:srgbClr val="{color}"/></a:solidFill></{tag}>"#)
        })
        .collect()
}

fn table_cell_xml(text: &str, size: f64, header: bool, theme: &SlideTheme) -> String {
    let color = if header {
        theme.color(SlideColor::OnAccent)
    } else {
        theme.color(SlideColor::Text)
    };
    let rpr = run_props_xml(size, header, color, theme.font);
    let runs = text
        .split('\n')
        .map(|line| format!("<a:p><a:r>{rpr}<a:t>{}</a:t></a:r></a:p>", xml_escape(line)))
        .collect::<String>();
    let fill = if header {
        format!(r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, theme.accent)
    } else {
        String::new()
    };
    format!(
        r#"<a:tc><a:txBody><a:bodyPr/><a:lstStyle/>{runs}</a:txBody><a:tcPr marL="91440" marR="91440" marT="45720" marB="45720">{borders}{fill}</a:tcPr></a:tc>"#,
        borders = cell_borders_xml(theme.accent),
    )
}

fn table_xml(
    id: usize,
    rect: &Rect,
    font_size: f64,
    headers: &[String],
    rows: &[Vec<String>],
    theme: &SlideTheme,
) -> String {
    let cols = headers.len().max(1);
    let col_w = rect.w / cols as f64;
    let grid = (0..cols)
        .map(|_| format!(r#"<a:gridCol w="{}"/>"#, emu(col_w)))
        .collect::<String>();

    let mut trs = String::new();
    let header_h = estimate_row_height(headers, col_w, font_size);
    trs.push_str(&format!(r#"<a:tr h="{}">"#, emu(header_h)));
    for h in headers {
        trs.push_str(&table_cell_xml(h, font_size, true, theme));
    }
    trs.push_str("</a:tr>");
    for row in rows {
        let h = estimate_row_height(row, col_w, font_size);
        trs.push_str(&format!(r#"<a:tr h="{}">"#, emu(h)));
        for cell in row {
            trs.push_str(&table_cell_xml(cell, font_size, false, theme));
        }
        trs.push_str("</a:tr>");
    }

    format!(
        r#"      <p:graphicFrame>
        <p:nvGraphicFramePr><p:cNvPr id="{id}" name="Table {id}"/><p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/></p:nvGraphicFramePr>
        {xfrm}
        <a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl><a:tblPr firstRow="1" bandRow="1"/><a:tblGrid>{grid}</a:tblGrid>{trs}</a:tbl></a:graphicData></a:graphic>
      </p:graphicFrame>
"#,
        xfrm = xfrm_xml(rect, "p:xfrm"),
    )
}

fn picture_xml(id: usize, rect: &Rect, rel: usize) -> String {
    format!(
        r#"      <p:pic>
        <p:nvPicPr><p:cNvPr id="{id}" name="Picture {id}"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>
        <p:blipFill><a:blip r:embed="rId{rel}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>
        <p:spPr>{xfrm}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>
      </p:pic>
"#,
        xfrm = xfrm_xml(rect, "a:xfrm"),
    )
}

fn rule_xml(id: usize, rect: &Rect, color: &str) -> String {
    let line = Rect::new(rect.x, rect.y, rect.w, 0.0);
    format!(
        r#"      <p:cxnSp>
        <p:nvCxnSpPr><p:cNvPr id="{id}" name="Line {id}"/><p:cNvCxnSpPr/><p:nvPr/></p:nvCxnSpPr>
        <p:spPr>{xfrm}<a:prstGeom prst="line"><a:avLst/></a:prstGeom><a:ln w="12700"><a:solidFill><a:srgbClr val="{color}"/></a:solidFill></a:ln></p:spPr>
      </p:cxnSp>
"#,
        xfrm = xfrm_xml(&line, "a:xfrm"),
    )
}

fn slide_rels_xml(media_targets: &[String]) -> String {
    let mut rels = String::from(
        r#"  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#,
    );
    rels.push('\n');
    for (i, target) in media_targets.iter().enumerate() {
        rels.push_str(&format!(
            r#"  <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="{target}"/>"#,
            i + 2
        ));
        rels.push('\n');
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
{rels}</Relationships>"#
    )
}
