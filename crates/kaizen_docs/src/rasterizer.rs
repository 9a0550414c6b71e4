//! Bitmap capture for document export.
//!
//! Two sources feed images into the renderers: on-screen regions (charts,
//! diagrams) that the host has mounted in a [`RegionRegistry`], and remote
//! photographs fetched over HTTP. Both are best-effort: every failure path
//! yields `None` and a log line, never an error, so a missing picture cannot
//! abort an export.

use anyhow::{Context, Result};
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, RgbaImage};
use kaizen_core::ExportConfig;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Region ids the report views mount for export.
pub mod regions {
    pub const FISHBONE_DIAGRAM: &str = "fishbone-diagram-export";
    pub const GANTT_CHART: &str = "gantt-chart-export";
    pub const BEFORE_AFTER_CHART: &str = "before-after-chart-export";
    pub const IP_GANTT_CHART: &str = "ip-gantt-chart-export";
}

// ---------------------------------------------------------------------------
// Bitmap
// ---------------------------------------------------------------------------

/// A PNG-encoded raster image with known pixel dimensions.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("png_bytes", &self.png.len())
            .finish()
    }
}

impl Bitmap {
    /// Wrap PNG bytes after checking they decode.
    pub fn from_png(png: Vec<u8>) -> Result<Self> {
        let img = image::load_from_memory_with_format(&png, ImageFormat::Png)
            .context("Invalid PNG data")?;
        Ok(Self {
            width: img.width(),
            height: img.height(),
            png,
        })
    }

    /// Decode any supported format (PNG, JPEG) and re-encode as PNG.
    pub fn from_image_bytes(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes).context("Unsupported or corrupt image")?;
        Self::encode(&img)
    }

    pub fn from_rgba(img: RgbaImage) -> Result<Self> {
        Self::encode(&DynamicImage::ImageRgba8(img))
    }

    fn encode(img: &DynamicImage) -> Result<Self> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png)
            .context("Failed to encode PNG")?;
        Ok(Self {
            png: buf.into_inner(),
            width: img.width(),
            height: img.height(),
        })
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width over height; 1.0 for degenerate images.
    pub fn aspect_ratio(&self) -> f64 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            f64::from(self.width) / f64::from(self.height)
        }
    }
}

// ---------------------------------------------------------------------------
// Regions
// ---------------------------------------------------------------------------

/// Something on screen that can be rendered to a bitmap on demand.
pub trait RegionRenderer: Send + Sync {
    fn render_bitmap(&self) -> Result<Bitmap>;
}

/// A static snapshot acts as its own renderer.
impl RegionRenderer for Bitmap {
    fn render_bitmap(&self) -> Result<Bitmap> {
        Ok(self.clone())
    }
}

/// Regions currently mounted by the host view, keyed by region id.
#[derive(Default)]
pub struct RegionRegistry {
    regions: RwLock<HashMap<String, Arc<dyn RegionRenderer>>>,
}

impl RegionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&self, id: impl Into<String>, renderer: impl RegionRenderer + 'static) {
        self.regions.write().insert(id.into(), Arc::new(renderer));
    }

    /// Returns `true` when a region was actually removed.
    pub fn unmount(&self, id: &str) -> bool {
        self.regions.write().remove(id).is_some()
    }

    pub fn is_mounted(&self, id: &str) -> bool {
        self.regions.read().contains_key(id)
    }

    /// Render the region if it is mounted. The lock is released before
    /// rendering so slow widgets do not block mount/unmount.
    pub fn capture(&self, id: &str) -> Option<Bitmap> {
        let renderer = self.regions.read().get(id).cloned();
        let Some(renderer) = renderer else {
            debug!(region = id, "Region not mounted, skipping capture");
            return None;
        };
        match renderer.render_bitmap() {
            Ok(bitmap) => Some(bitmap),
            Err(e) => {
                warn!(region = id, error = %e, "Region capture failed");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rasterizer
// ---------------------------------------------------------------------------

/// Image capability used by the PDF and slide renderers.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    /// Capture a mounted region. `None` when it is not mounted or fails.
    async fn capture_region(&self, region: &str) -> Option<Bitmap>;

    /// Fetch a photo and convert it to PNG. `None` on any failure.
    async fn fetch_remote_image(&self, url: &str) -> Option<Bitmap>;
}

/// Rasterizer that never produces images.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRasterizer;

#[async_trait]
impl Rasterizer for NoopRasterizer {
    async fn capture_region(&self, _region: &str) -> Option<Bitmap> {
        None
    }

    async fn fetch_remote_image(&self, _url: &str) -> Option<Bitmap> {
        None
    }
}

/// Production rasterizer: mounted regions plus HTTP photo fetches with a
/// bounded per-request deadline.
pub struct ReportRasterizer {
    regions: Arc<RegionRegistry>,
    http_client: reqwest::Client,
    image_proxy: Option<String>,
}

impl ReportRasterizer {
    pub fn new(config: &ExportConfig, regions: Arc<RegionRegistry>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.fetch_timeout())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            regions,
            http_client,
            image_proxy: config.image_proxy.clone().filter(|p| !p.trim().is_empty()),
        })
    }

    pub fn regions(&self) -> &Arc<RegionRegistry> {
        &self.regions
    }

    /// Validate the photo URL and apply the proxy prefix, if any.
    fn resolve_url(&self, url: &str) -> Result<Url> {
        let direct = Url::parse(url.trim()).context("Malformed URL")?;
        if !matches!(direct.scheme(), "http" | "https") {
            anyhow::bail!("Unsupported URL scheme: {}", direct.scheme());
        }
        match &self.image_proxy {
            Some(proxy) => Url::parse(&format!("{proxy}{direct}")).context("Malformed proxy URL"),
            None => Ok(direct),
        }
    }
}

#[async_trait]
impl Rasterizer for ReportRasterizer {
    async fn capture_region(&self, region: &str) -> Option<Bitmap> {
        self.regions.capture(region)
    }

    async fn fetch_remote_image(&self, url: &str) -> Option<Bitmap> {
        if url.trim().is_empty() {
            debug!("No photo URL supplied");
            return None;
        }
        let target = match self.resolve_url(url) {
            Ok(target) => target,
            Err(e) => {
                warn!(url, error = %e, "Skipping photo with invalid URL");
                return None;
            }
        };

        let resp = match self.http_client.get(target).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(url, error = %e, "Photo fetch failed");
                return None;
            }
        };
        if !resp.status().is_success() {
            warn!(url, status = %resp.status(), "Photo fetch returned non-success status");
            return None;
        }
        let body = match resp.bytes().await {
            Ok(body) => body,
            Err(e) => {
                warn!(url, error = %e, "Failed to read photo body");
                return None;
            }
        };

        match Bitmap::from_image_bytes(&body) {
            Ok(bitmap) => {
                debug!(url, width = bitmap.width(), height = bitmap.height(), "Fetched photo");
                Some(bitmap)
            }
            Err(e) => {
                warn!(url, error = %e, "Photo payload is not a usable image");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn tiny_bitmap() -> Bitmap {
        Bitmap::from_rgba(RgbaImage::from_pixel(4, 2, Rgba([200, 30, 30, 255]))).unwrap()
    }

    struct BrokenWidget;

    impl RegionRenderer for BrokenWidget {
        fn render_bitmap(&self) -> Result<Bitmap> {
            anyhow::bail!("canvas is detached")
        }
    }

    fn rasterizer(config: &ExportConfig) -> ReportRasterizer {
        ReportRasterizer::new(config, Arc::new(RegionRegistry::new())).unwrap()
    }

    /// Serve exactly one HTTP response on a local port and return its URL.
    async fn serve_once(status: &'static str, body: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let head = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
        });
        format!("http://{addr}/photo.png")
    }

    #[test]
    fn test_bitmap_from_rgba_dimensions() {
        let bmp = tiny_bitmap();
        assert_eq!(bmp.width(), 4);
        assert_eq!(bmp.height(), 2);
        assert_eq!(bmp.aspect_ratio(), 2.0);
        assert!(bmp.png().starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_bitmap_from_png_validates() {
        assert!(Bitmap::from_png(b"not a png".to_vec()).is_err());
        let bmp = tiny_bitmap();
        let again = Bitmap::from_png(bmp.png().to_vec()).unwrap();
        assert_eq!(again, bmp);
    }

    #[test]
    fn test_bitmap_debug_hides_bytes() {
        let text = format!("{:?}", tiny_bitmap());
        assert!(text.contains("width: 4"));
        assert!(text.contains("png_bytes"));
    }

    #[test]
    fn test_registry_mount_capture_unmount() {
        let registry = RegionRegistry::new();
        assert!(registry.capture(regions::FISHBONE_DIAGRAM).is_none());

        registry.mount(regions::FISHBONE_DIAGRAM, tiny_bitmap());
        assert!(registry.is_mounted(regions::FISHBONE_DIAGRAM));
        assert_eq!(registry.capture(regions::FISHBONE_DIAGRAM), Some(tiny_bitmap()));

        assert!(registry.unmount(regions::FISHBONE_DIAGRAM));
        assert!(!registry.unmount(regions::FISHBONE_DIAGRAM));
        assert!(registry.capture(regions::FISHBONE_DIAGRAM).is_none());
    }

    #[test]
    fn test_registry_renderer_failure_is_none() {
        let registry = RegionRegistry::new();
        registry.mount(regions::GANTT_CHART, BrokenWidget);
        assert!(registry.capture(regions::GANTT_CHART).is_none());
    }

    #[tokio::test]
    async fn test_noop_rasterizer() {
        let r = NoopRasterizer;
        assert!(r.capture_region(regions::GANTT_CHART).await.is_none());
        assert!(r.fetch_remote_image("https://example.com/a.png").await.is_none());
    }

    #[tokio::test]
    async fn test_capture_region_via_rasterizer() {
        let registry = Arc::new(RegionRegistry::new());
        registry.mount(regions::BEFORE_AFTER_CHART, tiny_bitmap());
        let r = ReportRasterizer::new(&ExportConfig::default(), registry.clone()).unwrap();
        assert!(r.capture_region(regions::BEFORE_AFTER_CHART).await.is_some());
        assert!(r.capture_region(regions::IP_GANTT_CHART).await.is_none());
        assert!(Arc::ptr_eq(r.regions(), &registry));
    }

    #[tokio::test]
    async fn test_fetch_empty_and_invalid_urls() {
        let r = rasterizer(&ExportConfig::default());
        assert!(r.fetch_remote_image("").await.is_none());
        assert!(r.fetch_remote_image("   ").await.is_none());
        assert!(r.fetch_remote_image("not a url").await.is_none());
        assert!(r.fetch_remote_image("ftp://files.example/a.png").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_none() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let r = rasterizer(&ExportConfig::default());
        assert!(r.fetch_remote_image(&format!("http://{addr}/x.png")).await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_success_reencodes_png() {
        let url = serve_once("200 OK", tiny_bitmap().png().to_vec()).await;
        let r = rasterizer(&ExportConfig::default());
        let bmp = r.fetch_remote_image(&url).await.expect("photo should load");
        assert_eq!((bmp.width(), bmp.height()), (4, 2));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_none() {
        let url = serve_once("404 Not Found", b"missing".to_vec()).await;
        let r = rasterizer(&ExportConfig::default());
        assert!(r.fetch_remote_image(&url).await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_garbage_payload_is_none() {
        let url = serve_once("200 OK", b"<html>login</html>".to_vec()).await;
        let r = rasterizer(&ExportConfig::default());
        assert!(r.fetch_remote_image(&url).await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        // Accept the connection but never answer.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
        });
        let config = ExportConfig {
            fetch_timeout_secs: 1,
            ..Default::default()
        };
        let r = rasterizer(&config);
        let started = std::time::Instant::now();
        assert!(r.fetch_remote_image(&format!("http://{addr}/slow.png")).await.is_none());
        assert!(started.elapsed() < std::time::Duration::from_secs(10));
    }

    #[test]
    fn test_resolve_url_with_proxy() {
        let config = ExportConfig {
            image_proxy: Some("https://relay.example/".into()),
            ..Default::default()
        };
        let r = rasterizer(&config);
        let url = r.resolve_url("https://img.example/before.jpg").unwrap();
        assert_eq!(
            url.as_str(),
            "https://relay.example/https://img.example/before.jpg"
        );
    }

    #[test]
    fn test_blank_proxy_is_ignored() {
        let config = ExportConfig {
            image_proxy: Some("  ".into()),
            ..Default::default()
        };
        let r = rasterizer(&config);
        let url = r.resolve_url("https://img.example/a.png").unwrap();
        assert_eq!(url.as_str(), "https://img.example/a.png");
    }
}
