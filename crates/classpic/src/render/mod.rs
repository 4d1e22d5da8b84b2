//! Class diagram renderer
//!
//! Scales a computed layout onto a caller-supplied canvas and draws class
//! boxes, member lists and relation arrows into a raster image. The layout
//! is only ever shrunk to fit, never magnified, and the content is centered
//! on the canvas.

mod raster;
mod svg;

use tracing::debug;

use crate::core::DiagramError;
use crate::diagram::Diagram;
use crate::layout::LayoutResult;

/// Inset between a box border and its text, in virtual units
pub const PADDING: f32 = 5.0;
/// Title font size at scale 1
pub const TITLE_FONT_SIZE: f32 = 10.0;
/// Member font size at scale 1
pub const MEMBER_FONT_SIZE: f32 = 9.0;
/// Vertical room reserved for the title above the separator
pub const TITLE_HEIGHT: f32 = 20.0;
/// Vertical advance per member line at scale 1
pub const LINE_SPACING: f32 = 15.0;
/// Box border width at scale 1
pub const BOX_STROKE_WIDTH: f32 = 1.0;
/// Relation lines keep a fixed stroke width regardless of scale
pub const RELATION_STROKE_WIDTH: f32 = 2.0;
/// Arrowhead dimensions in canvas pixels
pub const ARROW_LENGTH: f32 = 12.0;
pub const ARROW_HALF_WIDTH: f32 = 4.0;

/// Scale factor and centering offsets mapping virtual coordinates onto the
/// canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Fit {
    /// Fit a virtual extent into a canvas: shrink-to-fit, clamp the scale
    /// at 1, center the leftover space symmetrically.
    pub fn compute(
        virtual_width: i32,
        virtual_height: i32,
        canvas_width: u32,
        canvas_height: u32,
    ) -> Self {
        let vw = virtual_width.max(1) as f32;
        let vh = virtual_height.max(1) as f32;
        let scale_x = canvas_width as f32 / vw;
        let scale_y = canvas_height as f32 / vh;
        let scale = scale_x.min(scale_y).min(1.0);
        Self {
            scale,
            offset_x: (canvas_width as f32 - vw * scale) / 2.0,
            offset_y: (canvas_height as f32 - vh * scale) / 2.0,
        }
    }

    pub fn scale(&self, v: f32) -> f32 {
        v * self.scale
    }

    pub fn map_x(&self, x: f32) -> f32 {
        x * self.scale + self.offset_x
    }

    pub fn map_y(&self, y: f32) -> f32 {
        y * self.scale + self.offset_y
    }
}

/// The rendered artifact: a width x height RGBA pixel buffer
#[derive(Clone)]
pub struct RasterImage {
    pixmap: tiny_skia::Pixmap,
}

impl std::fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl RasterImage {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Raw premultiplied RGBA8 pixel data, row-major
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Encode the buffer as a PNG file body
    pub fn encode_png(&self) -> Result<Vec<u8>, DiagramError> {
        self.pixmap.encode_png().map_err(|_| DiagramError::PngEncode)
    }
}

/// Render a diagram and its layout onto a canvas of exactly the requested
/// dimensions
///
/// The only hard precondition is a positive canvas: zero dimensions are
/// reported as [`DiagramError::InvalidCanvas`]. Everything else degrades
/// silently — classes without rectangles and relations with unknown
/// endpoints are skipped.
pub fn render(
    diagram: &Diagram,
    layout: &LayoutResult,
    canvas_width: u32,
    canvas_height: u32,
) -> Result<RasterImage, DiagramError> {
    if canvas_width == 0 || canvas_height == 0 {
        return Err(DiagramError::InvalidCanvas {
            width: canvas_width,
            height: canvas_height,
        });
    }

    let fit = Fit::compute(layout.width(), layout.height(), canvas_width, canvas_height);
    debug!(
        scale = fit.scale,
        canvas_width,
        canvas_height,
        virtual_width = layout.width(),
        virtual_height = layout.height(),
        "rendering diagram"
    );

    let svg = svg::document(diagram, layout, canvas_width, canvas_height, fit);
    let pixmap = raster::rasterize(&svg, canvas_width, canvas_height)?;
    Ok(RasterImage { pixmap })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::Class;
    use crate::layout;

    #[test]
    fn test_fit_shrinks_to_smaller_axis() {
        // Virtual 200x100 into canvas 100x100: width is the limiting axis.
        let fit = Fit::compute(200, 100, 100, 100);
        assert_eq!(fit.scale, 0.5);
        assert_eq!(fit.offset_x, 0.0);
        assert_eq!(fit.offset_y, 25.0);
    }

    #[test]
    fn test_fit_never_upscales() {
        let fit = Fit::compute(100, 50, 1000, 1000);
        assert_eq!(fit.scale, 1.0);
        // Centered with equal leftover margin on both axes.
        assert_eq!(fit.offset_x, 450.0);
        assert_eq!(fit.offset_y, 475.0);
    }

    #[test]
    fn test_fit_mapping() {
        let fit = Fit {
            scale: 0.5,
            offset_x: 10.0,
            offset_y: 20.0,
        };
        assert_eq!(fit.map_x(100.0), 60.0);
        assert_eq!(fit.map_y(100.0), 70.0);
        assert_eq!(fit.scale(8.0), 4.0);
    }

    #[test]
    fn test_render_rejects_zero_canvas() {
        let diagram = Diagram::new();
        let layout = layout::layout(&diagram);

        assert!(matches!(
            render(&diagram, &layout, 0, 100),
            Err(DiagramError::InvalidCanvas { width: 0, .. })
        ));
        assert!(matches!(
            render(&diagram, &layout, 100, 0),
            Err(DiagramError::InvalidCanvas { height: 0, .. })
        ));
    }

    #[test]
    fn test_render_exact_canvas_dimensions() {
        let mut diagram = Diagram::new();
        diagram.add_class(Class::new("A"));
        let layout = layout::layout(&diagram);

        let image = render(&diagram, &layout, 321, 123).unwrap();
        assert_eq!(image.width(), 321);
        assert_eq!(image.height(), 123);
        assert_eq!(image.data().len(), 321 * 123 * 4);
    }

    #[test]
    fn test_render_empty_diagram_is_blank_white() {
        let diagram = Diagram::new();
        let layout = layout::layout(&diagram);
        let image = render(&diagram, &layout, 20, 20).unwrap();

        assert!(image.data().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_encode_png_signature() {
        let diagram = Diagram::new();
        let layout = layout::layout(&diagram);
        let image = render(&diagram, &layout, 16, 16).unwrap();

        let png = image.encode_png().unwrap();
        assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
    }
}
