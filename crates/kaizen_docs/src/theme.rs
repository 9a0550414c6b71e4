use kaizen_core::SlideStyle;

/// Colour and font palette for a slide deck. Colours are `RRGGBB` hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideTheme {
    pub background: &'static str,
    pub text: &'static str,
    pub title: &'static str,
    pub accent: &'static str,
    pub font: &'static str,
}

/// Colour role a slide element asks for. Roles are resolved against the
/// theme only when XML is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideColor {
    Text,
    Title,
    Accent,
    /// Text drawn on an accent fill, e.g. table headers.
    OnAccent,
}

impl SlideTheme {
    pub const MINIMALIST: Self = Self {
        background: "FFFFFF",
        text: "000000",
        title: "000000",
        accent: "4A4A4A",
        font: "Arial",
    };

    pub const PROFESSIONAL: Self = Self {
        background: "FFFFFF",
        text: "333333",
        title: "003366",
        accent: "005A9C",
        font: "Calibri",
    };

    pub const COLORFUL: Self = Self {
        background: "FFFFFF",
        text: "34495E",
        title: "16A085",
        accent: "E74C3C",
        font: "Helvetica",
    };

    pub fn for_style(style: SlideStyle) -> Self {
        match style {
            SlideStyle::Minimalist => Self::MINIMALIST,
            SlideStyle::Professional => Self::PROFESSIONAL,
            SlideStyle::Colorful => Self::COLORFUL,
        }
    }

    pub fn color(&self, role: SlideColor) -> &'static str {
        match role {
            SlideColor::Text => self.text,
            SlideColor::Title => self.title,
            SlideColor::Accent => self.accent,
            SlideColor::OnAccent => "FFFFFF",
        }
    }
}

impl Default for SlideTheme {
    fn default() -> Self {
        Self::for_style(SlideStyle::default())
    }
}
