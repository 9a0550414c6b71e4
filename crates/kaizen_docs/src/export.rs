//! Export orchestration: one entry point per report, dispatching on the
//! report family and output format.

use kaizen_core::{ExportConfig, ExportError, SlideStyle};
use kaizen_report::{Report, ReportKind};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::delivery::FileDelivery;
use crate::rasterizer::Rasterizer;
use crate::report_pdf::{render_ip_pdf, render_qcc_pdf};
use crate::report_slides::{render_ip_slides, render_qcc_slides};
use crate::report_word::{render_ip_word, render_qcc_word};

pub const PDF_MIME: &str = "application/pdf";
pub const WORD_MIME: &str = "application/msword";
pub const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";
pub const PNG_MIME: &str = "image/png";

/// Requested output. The slide style only exists for slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Pdf,
    Word,
    Slides(SlideStyle),
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => f.write_str("pdf"),
            Self::Word => f.write_str("word"),
            Self::Slides(style) => write!(f, "slides ({})", style.as_str()),
        }
    }
}

/// A finished export, ready for download or delivery.
#[derive(Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ExportedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportedFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Title with every whitespace character replaced by `_`.
fn file_stem(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

pub fn file_name(kind: ReportKind, title: &str, format: ExportFormat) -> String {
    let stem = file_stem(title);
    match (format, kind) {
        (ExportFormat::Pdf, ReportKind::Qcc) => format!("{stem}.pdf"),
        (ExportFormat::Pdf, ReportKind::Ip) => format!("IP_{stem}.pdf"),
        (ExportFormat::Word, kind) => format!("{}_{stem}.doc", kind.as_str()),
        (ExportFormat::Slides(_), kind) => format!("Presentasi_{}.pptx", kind.as_str()),
    }
}

fn mime_type(format: ExportFormat) -> &'static str {
    match format {
        ExportFormat::Pdf => PDF_MIME,
        ExportFormat::Word => WORD_MIME,
        ExportFormat::Slides(_) => PPTX_MIME,
    }
}

/// Turns reports into downloadable files.
///
/// Holds no per-export state; concurrent calls are independent, but callers
/// are expected to keep one export per report in flight.
pub struct ReportExporter {
    rasterizer: Arc<dyn Rasterizer>,
    config: ExportConfig,
}

impl ReportExporter {
    pub fn new(rasterizer: Arc<dyn Rasterizer>, config: ExportConfig) -> Self {
        Self { rasterizer, config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Slides in the configured default style.
    pub fn default_slides(&self) -> ExportFormat {
        ExportFormat::Slides(self.config.default_slide_style)
    }

    pub async fn export(
        &self,
        report: &Report,
        format: ExportFormat,
    ) -> Result<ExportedFile, ExportError> {
        // The caller may keep editing its copy while we render.
        let snapshot = report.clone();
        info!(
            kind = %snapshot.kind(),
            %format,
            title = snapshot.title(),
            "Export requested"
        );

        match self.render(&snapshot, format).await {
            Ok(bytes) => {
                let file = ExportedFile {
                    file_name: file_name(snapshot.kind(), snapshot.title(), format),
                    mime_type: mime_type(format),
                    bytes,
                };
                info!(file = %file.file_name, bytes = file.bytes.len(), "Export finished");
                Ok(file)
            }
            Err(e) => {
                error!(
                    kind = %snapshot.kind(),
                    %format,
                    category = ?e.category(),
                    error = %e,
                    "Export failed"
                );
                Err(e)
            }
        }
    }

    async fn render(&self, report: &Report, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
        let rasterizer = self.rasterizer.as_ref();
        match (report, format) {
            (Report::Qcc(r), ExportFormat::Pdf) => render_qcc_pdf(r, rasterizer).await,
            (Report::Qcc(r), ExportFormat::Word) => Ok(render_qcc_word(r)),
            (Report::Qcc(r), ExportFormat::Slides(style)) => {
                render_qcc_slides(r, style, rasterizer).await
            }
            (Report::Ip(r), ExportFormat::Pdf) => render_ip_pdf(r, rasterizer).await,
            (Report::Ip(r), ExportFormat::Word) => Ok(render_ip_word(r)),
            (Report::Ip(r), ExportFormat::Slides(style)) => {
                render_ip_slides(r, style, rasterizer).await
            }
        }
    }

    /// Parse a report from JSON and export it. An unknown report type fails
    /// before any rendering happens.
    pub async fn export_json(
        &self,
        json: &str,
        format: ExportFormat,
    ) -> Result<ExportedFile, ExportError> {
        let report = Report::from_json(json).inspect_err(|e| {
            error!(category = ?e.category(), error = %e, "Export rejected");
        })?;
        self.export(&report, format).await
    }

    /// Export and hand the file to `delivery`.
    pub async fn deliver(
        &self,
        report: &Report,
        format: ExportFormat,
        delivery: &dyn FileDelivery,
    ) -> Result<PathBuf, ExportError> {
        let file = self.export(report, format).await?;
        delivery.deliver(&file).inspect_err(|e| {
            error!(file = %file.file_name, error = %e, "Export delivery failed");
        })
    }

    /// Screenshot of a single mounted region as `{name}.png`.
    pub async fn capture_section(&self, region: &str, name: &str) -> Option<ExportedFile> {
        let bitmap = self.rasterizer.capture_region(region).await?;
        debug!(region, name, "Section captured");
        Some(ExportedFile {
            file_name: format!("{}.png", file_stem(name)),
            mime_type: PNG_MIME,
            bytes: bitmap.png().to_vec(),
        })
    }
}
