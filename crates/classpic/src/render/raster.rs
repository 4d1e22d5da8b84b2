//! SVG rasterization
//!
//! Renders the emitted SVG document into a fixed-size `tiny-skia` pixmap
//! via `usvg`/`resvg`. The document is already in final pixel coordinates,
//! so the render transform is the identity.

use crate::core::DiagramError;

/// Rasterize an SVG document onto a white pixmap of exactly the given size
pub(crate) fn rasterize(
    svg: &str,
    width: u32,
    height: u32,
) -> Result<tiny_skia::Pixmap, DiagramError> {
    let mut options = usvg::Options::default();
    // Text rendering depends on whatever the host has installed; boxes and
    // edges rasterize even on a fontless machine.
    options.fontdb_mut().load_system_fonts();
    options.font_family = "sans-serif".to_string();

    let tree = usvg::Tree::from_str(svg, &options).map_err(|_| DiagramError::SvgParse)?;

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(DiagramError::PixmapAlloc)?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
    Ok(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rasterize_exact_dimensions() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><rect width="10" height="10" fill="black"/></svg>"#;
        let pixmap = rasterize(svg, 33, 17).unwrap();
        assert_eq!(pixmap.width(), 33);
        assert_eq!(pixmap.height(), 17);
    }

    #[test]
    fn test_rasterize_rejects_malformed_svg() {
        let result = rasterize("<svg", 10, 10);
        assert!(matches!(result, Err(DiagramError::SvgParse)));
    }

    #[test]
    fn test_rasterize_rejects_zero_pixmap() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1 1"/>"#;
        let result = rasterize(svg, 0, 10);
        assert!(matches!(result, Err(DiagramError::PixmapAlloc)));
    }
}
