//! Report-to-slides projection. Each report family has a fixed slide policy;
//! table sections paginate onto "(lanjutan)" slides with the header repeated.
//!
//! Elements only carry colour roles, so the chosen [`SlideStyle`] affects
//! colours and fonts and never the slide count or text.

use kaizen_core::{ExportError, SlideStyle};
use kaizen_report::{Fishbone, IP_STEPS, IpReport, QCC_STEPS, QccReport};
use tracing::debug;

use crate::pptx::{
    Rect, SLIDE_WIDTH_IN, Slide, SlideDeck, SlideElement, TextAlign,
    TextParagraph, generate_pptx, paginate_table,
};
use crate::rasterizer::{Bitmap, Rasterizer, regions};
use crate::tables::{self, TableData};
use crate::theme::{SlideColor, SlideTheme};

const MARGIN: f64 = 0.5;
const CONTENT_W: f64 = SLIDE_WIDTH_IN - 2.0 * MARGIN;
const BODY_TOP: f64 = 1.2;
const BODY_BOTTOM: f64 = 7.0;
const BODY_H: f64 = BODY_BOTTOM - BODY_TOP;

const TITLE_SIZE: f64 = 24.0;
const BODY_SIZE: f64 = 14.0;
const LABEL_SIZE: f64 = 16.0;

pub async fn render_qcc_slides(
    report: &QccReport,
    style: SlideStyle,
    rasterizer: &dyn Rasterizer,
) -> Result<Vec<u8>, ExportError> {
    let mut deck = DeckBuilder::new();
    let title = |i: usize| format!("Langkah {}: {}", i + 1, QCC_STEPS[i]);

    let mut meta = Vec::new();
    for (label, value) in [
        ("Tim", &report.team),
        ("Lokasi", &report.location),
        ("Tanggal", &report.date),
    ] {
        if !value.trim().is_empty() {
            meta.push(format!("{label}: {value}"));
        }
    }
    deck.title_slide(
        &report.title,
        "Laporan Quality Control Circle (QCC)",
        Some(meta.join(" | ").as_str()),
    );

    let s = &report.step1;
    let mut body = Body::default();
    body.heading(&s.heading);
    body.field("Latar Belakang", &s.background);
    body.field("Kondisi Awal", &s.initial_condition);
    deck.text_slide(&title(0), body);

    deck.table_slides(&title(1), &tables::target_table(&report.step2.quantitative));

    let s = &report.step3;
    let mut body = Body::default();
    body.heading(&s.heading);
    body.fishbone(&s.fishbone);
    body.field("Akar Masalah", &s.root_cause);
    let capture = rasterizer.capture_region(regions::FISHBONE_DIAGRAM).await;
    deck.split_slide(&title(2), capture, body);

    deck.table_slides(&title(3), &tables::ideas_table(&report.step4.ideas));
    deck.table_slides(
        &format!("{} - Jadwal", title(3)),
        &tables::schedule_table(&report.step4.schedule),
    );
    let gantt = rasterizer.capture_region(regions::GANTT_CHART).await;
    deck.capture_slide(&format!("{} - Gantt Chart", title(3)), gantt);

    let s = &report.step5;
    let mut body = Body::default();
    body.heading(&s.heading);
    body.text(&s.implementation);
    deck.photo_slide(&title(4), body, rasterizer, report.photo_urls())
        .await;

    let s = &report.step6;
    let mut body = Body::default();
    body.heading(&s.heading);
    body.text(&s.evaluation);
    let chart = rasterizer.capture_region(regions::BEFORE_AFTER_CHART).await;
    deck.chart_slide(&title(5), body, chart);
    deck.table_slides(
        &format!("{} - Data Perbandingan", title(5)),
        &tables::comparison_table(&s.comparison),
    );

    let s = &report.step7;
    let mut body = Body::default();
    body.heading(&s.heading);
    body.label("Standardisasi");
    for entry in &s.standards {
        body.bullet(&format!("{}: {}", entry.document, entry.description));
    }
    body.field("Rencana Pencegahan", &s.prevention);
    body.field("Horizontal Development", &s.horizontal_development);
    deck.text_slide(&title(6), body);

    let s = &report.step8;
    let mut body = Body::default();
    body.heading(&s.heading);
    body.text(&s.next_plan);
    deck.text_slide(&title(7), body);

    deck.title_slide("Terima Kasih", &report.title, None);

    deck.finish(style, "QCC")
}

pub async fn render_ip_slides(
    report: &IpReport,
    style: SlideStyle,
    rasterizer: &dyn Rasterizer,
) -> Result<Vec<u8>, ExportError> {
    let mut deck = DeckBuilder::new();
    let title = |i: usize| format!("{}. {}", i + 1, IP_STEPS[i]);

    deck.title_slide(&report.title, "Laporan Individual Project", None);

    deck.table_slides(&title(0), &tables::schedule_table(&report.schedule));
    let gantt = rasterizer.capture_region(regions::IP_GANTT_CHART).await;
    deck.capture_slide(&format!("{} - Gantt Chart", title(0)), gantt);

    let theme = &report.theme;
    let mut body = Body::default();
    body.field("Data Penentuan Tema", &theme.data);
    body.field("Analisa Situasi", &theme.situation_analysis);
    body.field("Target", &theme.target);
    deck.text_slide(&title(1), body);

    let analysis = &report.problem_analysis;
    let mut body = Body::default();
    body.fishbone(&analysis.fishbone);
    deck.text_slide(&format!("{} - Fishbone", title(2)), body);
    deck.table_slides(
        &format!("{} - Verifikasi", title(2)),
        &tables::root_cause_table(&analysis.root_cause_checks),
    );

    deck.table_slides(&title(3), &tables::alternatives_table(&report.alternatives));

    let design = &report.design_plan;
    let mut body = Body::default();
    for d in &design.designs {
        body.field(&d.title, &d.description);
    }
    deck.text_slide(&title(4), body);
    deck.table_slides(
        &format!("{} - Rencana 5W2H", title(4)),
        &tables::plan_table(&design.plan),
    );

    let mut body = Body::default();
    for stage in &report.implementation.stages {
        body.label(&stage.title);
        body.bullet(&format!("Study & Final Design: {}", stage.study_and_final_design));
        body.bullet(&format!("Persiapan Perbaikan: {}", stage.preparation));
        body.bullet(&format!("Proses Perbaikan: {}", stage.process));
        body.bullet(&format!("Trial & Evaluasi: {}", stage.trial_and_evaluation));
    }
    deck.text_slide(&title(5), body);

    deck.photo_slide(&title(6), Body::default(), rasterizer, report.photo_urls())
        .await;
    deck.table_slides(
        &format!("{} - QCDSM", title(6)),
        &tables::qcdsm_table(&report.evaluation.qcdsm),
    );

    let standard = &report.standardization;
    let mut body = Body::default();
    body.field("Standarisasi", &standard.description);
    body.field("Horizontal Development", &standard.horizontal_development);
    deck.text_slide(&title(7), body);

    deck.finish(style, "IP")
}

// ---------------------------------------------------------------------------
// Text body
// ---------------------------------------------------------------------------

/// Paragraphs of a slide's text area.
#[derive(Default)]
struct Body {
    paragraphs: Vec<TextParagraph>,
}

impl Body {
    fn heading(&mut self, text: &str) {
        if !text.trim().is_empty() {
            self.paragraphs
                .push(TextParagraph::new(text, LABEL_SIZE + 2.0, SlideColor::Title).bold());
        }
    }

    fn label(&mut self, text: &str) {
        self.paragraphs
            .push(TextParagraph::new(text, LABEL_SIZE, SlideColor::Accent).bold());
    }

    fn text(&mut self, text: &str) {
        self.paragraphs
            .push(TextParagraph::new(text, BODY_SIZE, SlideColor::Text));
    }

    fn bullet(&mut self, text: &str) {
        self.paragraphs
            .push(TextParagraph::new(text, BODY_SIZE, SlideColor::Text).bulleted());
    }

    /// Label followed by its value; a blank value stays as an empty paragraph.
    fn field(&mut self, label: &str, value: &str) {
        self.label(label);
        self.text(value);
    }

    fn fishbone(&mut self, fishbone: &Fishbone) {
        for (category, causes) in fishbone.populated() {
            self.label(category.label());
            for cause in causes {
                self.bullet(cause);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Deck assembly
// ---------------------------------------------------------------------------

struct DeckBuilder {
    slides: Vec<Slide>,
}

impl DeckBuilder {
    fn new() -> Self {
        Self { slides: Vec::new() }
    }

    fn title_slide(&mut self, title: &str, subtitle: &str, meta: Option<&str>) {
        let mut paragraphs = vec![
            TextParagraph::new(title, 40.0, SlideColor::Title).bold(),
            TextParagraph::new(subtitle, 20.0, SlideColor::Text),
        ];
        if let Some(meta) = meta.filter(|m| !m.is_empty()) {
            paragraphs.push(TextParagraph::new(meta, BODY_SIZE, SlideColor::Accent));
        }
        let mut slide = Slide::default();
        slide.push(SlideElement::Text {
            rect: Rect::new(MARGIN, 2.0, CONTENT_W, 3.5),
            align: TextAlign::Center,
            paragraphs,
        });
        slide.push(SlideElement::Rule {
            rect: Rect::new(SLIDE_WIDTH_IN / 2.0 - 2.0, 5.75, 4.0, 0.0),
            color: SlideColor::Accent,
        });
        self.slides.push(slide);
    }

    /// Blank content slide with the title bar and accent rule.
    fn content_slide(title: &str) -> Slide {
        let mut slide = Slide::default();
        slide.push(SlideElement::Text {
            rect: Rect::new(MARGIN, 0.3, CONTENT_W, 0.6),
            align: TextAlign::Left,
            paragraphs: vec![TextParagraph::new(title, TITLE_SIZE, SlideColor::Title).bold()],
        });
        slide.push(SlideElement::Rule {
            rect: Rect::new(MARGIN, 0.95, CONTENT_W, 0.0),
            color: SlideColor::Accent,
        });
        slide
    }

    fn text_slide(&mut self, title: &str, body: Body) {
        let mut slide = Self::content_slide(title);
        slide.push(text_box(Rect::new(MARGIN, BODY_TOP, CONTENT_W, BODY_H), body));
        self.slides.push(slide);
    }

    /// Picture on the left, text on the right. Without a picture the text
    /// takes the full width.
    fn split_slide(&mut self, title: &str, picture: Option<Bitmap>, body: Body) {
        let mut slide = Self::content_slide(title);
        match picture {
            Some(bitmap) => {
                let picture_w = CONTENT_W * 0.58;
                slide.push(SlideElement::picture_in(
                    Rect::new(MARGIN, BODY_TOP, picture_w, BODY_H),
                    bitmap,
                ));
                slide.push(text_box(
                    Rect::new(
                        MARGIN + picture_w + 0.3,
                        BODY_TOP,
                        CONTENT_W - picture_w - 0.3,
                        BODY_H,
                    ),
                    body,
                ));
            }
            None => slide.push(text_box(Rect::new(MARGIN, BODY_TOP, CONTENT_W, BODY_H), body)),
        }
        self.slides.push(slide);
    }

    /// Capture fitted into the whole body area. A missing capture leaves the
    /// slide empty.
    fn capture_slide(&mut self, title: &str, capture: Option<Bitmap>) {
        let mut slide = Self::content_slide(title);
        if let Some(bitmap) = capture {
            slide.push(SlideElement::picture_in(
                Rect::new(MARGIN, BODY_TOP, CONTENT_W, BODY_H),
                bitmap,
            ));
        }
        self.slides.push(slide);
    }

    /// Text above, chart below.
    fn chart_slide(&mut self, title: &str, body: Body, chart: Option<Bitmap>) {
        let mut slide = Self::content_slide(title);
        slide.push(text_box(Rect::new(MARGIN, BODY_TOP, CONTENT_W, 1.5), body));
        if let Some(bitmap) = chart {
            slide.push(SlideElement::picture_in(
                Rect::new(MARGIN, BODY_TOP + 1.6, CONTENT_W, BODY_H - 1.6),
                bitmap,
            ));
        }
        self.slides.push(slide);
    }

    /// Text above, before/after photos side by side. Captions are always
    /// placed; a photo that cannot be fetched leaves its frame empty.
    async fn photo_slide(
        &mut self,
        title: &str,
        body: Body,
        rasterizer: &dyn Rasterizer,
        [before, after]: [&str; 2],
    ) {
        let mut slide = Self::content_slide(title);
        let has_text = !body.paragraphs.is_empty();
        let top = if has_text {
            slide.push(text_box(Rect::new(MARGIN, BODY_TOP, CONTENT_W, 1.3), body));
            BODY_TOP + 1.4
        } else {
            BODY_TOP
        };
        let frame_w = (CONTENT_W - 0.4) / 2.0;
        let frame_h = BODY_BOTTOM - top - 0.5;

        for (i, (caption, url)) in [("Sebelum", before), ("Sesudah", after)].into_iter().enumerate() {
            let x = MARGIN + i as f64 * (frame_w + 0.4);
            if !url.trim().is_empty() {
                if let Some(bitmap) = rasterizer.fetch_remote_image(url).await {
                    slide.push(SlideElement::picture_in(Rect::new(x, top, frame_w, frame_h), bitmap));
                }
            }
            slide.push(SlideElement::Text {
                rect: Rect::new(x, top + frame_h + 0.05, frame_w, 0.4),
                align: TextAlign::Center,
                paragraphs: vec![TextParagraph::new(caption, BODY_SIZE, SlideColor::Accent).bold()],
            });
        }
        self.slides.push(slide);
    }

    /// One slide per page of rows. An empty table still gets one slide so
    /// its header is visible.
    fn table_slides(&mut self, title: &str, table: &TableData) {
        let headers: Vec<String> = table.headers.iter().map(|h| h.to_string()).collect();
        let font_size = if headers.len() >= 5 { 10.0 } else { 12.0 };
        let pages = paginate_table(&headers, &table.rows, CONTENT_W, font_size, BODY_H);
        let page_count = pages.len();

        for (i, rows) in pages.into_iter().enumerate() {
            let slide_title = if i == 0 {
                title.to_string()
            } else {
                format!("{title} (lanjutan)")
            };
            let mut slide = Self::content_slide(&slide_title);
            slide.push(SlideElement::Table {
                rect: Rect::new(MARGIN, BODY_TOP, CONTENT_W, BODY_H),
                font_size,
                headers: headers.clone(),
                rows,
            });
            self.slides.push(slide);
        }
        if page_count > 1 {
            debug!(title, pages = page_count, "Table split across slides");
        }
    }

    fn finish(self, style: SlideStyle, family: &str) -> Result<Vec<u8>, ExportError> {
        debug!(family, slides = self.slides.len(), style = style.as_str(), "Slide deck laid out");
        let deck = SlideDeck {
            theme: SlideTheme::for_style(style),
            slides: self.slides,
        };
        generate_pptx(&deck).map_err(|e| ExportError::Package(format!("{e:#}")))
    }
}

fn text_box(rect: Rect, body: Body) -> SlideElement {
    SlideElement::Text {
        rect,
        align: TextAlign::Left,
        paragraphs: body.paragraphs,
    }
}
