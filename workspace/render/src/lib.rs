//! Rendering an [`HourlyProfile`] into an embeddable chart image.
//!
//! The numeric profile is computed elsewhere; this crate only turns it into
//! bytes and a `data:` URI that can be dropped into an `<img>` tag.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use compute::HourlyProfile;
use plotters::prelude::*;
use thiserror::Error;
use tracing::{debug, instrument};

/// MIME type of the charts produced by [`SvgBarChart`].
pub const SVG_MIME_TYPE: &str = "image/svg+xml";

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Error types for chart rendering
#[derive(Error, Debug)]
pub enum RenderError {
    /// The drawing backend rejected an operation
    #[error("Drawing error: {0}")]
    Drawing(String),
}

/// Type alias for Result with RenderError
pub type Result<T> = std::result::Result<T, RenderError>;

fn drawing_error<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Drawing(err.to_string())
}

/// An encoded chart image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    mime_type: &'static str,
    bytes: Vec<u8>,
}

impl RenderedChart {
    pub fn new(mime_type: &'static str, bytes: Vec<u8>) -> Self {
        Self { mime_type, bytes }
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Standard base64 encoding of the image bytes.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// `data:<mime>;base64,<payload>` suitable for an `<img src>` attribute.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

/// Something that can draw an hourly profile.
///
/// Implementations must be deterministic: the same profile always yields the
/// same bytes.
pub trait ChartRenderer: Send + Sync {
    fn render(&self, profile: &HourlyProfile) -> Result<RenderedChart>;
}

/// Bar chart of value per hour, rendered to SVG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgBarChart {
    width: u32,
    height: u32,
    title: String,
    x_label: String,
    y_label: String,
}

impl Default for SvgBarChart {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

impl SvgBarChart {
    /// Creates a chart of the given pixel size with the default labels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            title: "Crime Distribution by Hour".to_string(),
            x_label: "Hour".to_string(),
            y_label: "Predicted Crime Probability".to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw(&self, profile: &HourlyProfile, svg: &mut String) -> Result<()> {
        let root = SVGBackend::with_string(svg, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;

        // An all-zero profile still needs a non-empty value range
        let max = profile.max();
        let y_max = if max > 0.0 { max * 1.1 } else { 1.0 };

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 20).into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d((0u32..24u32).into_segmented(), 0f64..y_max)
            .map_err(drawing_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(24)
            .x_label_formatter(&|value| match value {
                SegmentValue::Exact(hour) | SegmentValue::CenterOf(hour) => hour.to_string(),
                SegmentValue::Last => String::new(),
            })
            .y_label_formatter(&|value| format!("{:.4}", value))
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .draw()
            .map_err(drawing_error)?;

        chart
            .draw_series(profile.iter().enumerate().map(|(hour, value)| {
                let hour = hour as u32;
                let mut bar = Rectangle::new(
                    [(SegmentValue::Exact(hour), 0.0), (SegmentValue::Exact(hour + 1), value)],
                    BAR_COLOR.filled(),
                );
                bar.set_margin(0, 0, 3, 3);
                bar
            }))
            .map_err(drawing_error)?;

        root.present().map_err(drawing_error)?;
        Ok(())
    }
}

impl ChartRenderer for SvgBarChart {
    #[instrument(skip_all, fields(width = self.width, height = self.height))]
    fn render(&self, profile: &HourlyProfile) -> Result<RenderedChart> {
        let mut svg = String::new();
        self.draw(profile, &mut svg)?;
        debug!("Rendered SVG chart of {} bytes", svg.len());
        Ok(RenderedChart::new(SVG_MIME_TYPE, svg.into_bytes()))
    }
}
