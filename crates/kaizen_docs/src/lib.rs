// Report export: PDF, Word (.doc) and PPTX renderers plus the orchestrator.

pub mod delivery;
pub mod export;
pub mod html;
pub mod pdf;
pub mod pptx;
pub mod rasterizer;
pub mod report_pdf;
pub mod report_slides;
pub mod report_word;
pub mod tables;
pub mod text;
pub mod theme;

pub use delivery::{DirectoryDelivery, FileDelivery};
pub use export::{ExportFormat, ExportedFile, ReportExporter};
pub use rasterizer::{Bitmap, NoopRasterizer, Rasterizer, RegionRegistry, RegionRenderer, ReportRasterizer};
pub use theme::SlideTheme;
