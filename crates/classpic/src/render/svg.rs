//! SVG document emission
//!
//! Builds the scaled, centered drawing as an SVG string in final pixel
//! coordinates. The raster stage renders it 1:1, so every coordinate here
//! is already multiplied by the fit scale and shifted by the centering
//! offset.

use crate::diagram::{Diagram, Member};
use crate::layout::LayoutResult;
use crate::render::{
    Fit, ARROW_HALF_WIDTH, ARROW_LENGTH, BOX_STROKE_WIDTH, LINE_SPACING, MEMBER_FONT_SIZE,
    PADDING, RELATION_STROKE_WIDTH, TITLE_FONT_SIZE, TITLE_HEIGHT,
};

const FONT_FAMILY: &str = "sans-serif";

/// Member line as drawn inside a class box, e.g. `private bark() : void`
pub(crate) fn member_label(member: &Member) -> String {
    let prefix = match member.visibility {
        Some(v) => format!("{} ", v.keyword()),
        None => String::new(),
    };
    let parens = if member.is_method { "()" } else { "" };
    format!("{prefix}{}{parens} : {}", member.name, member.member_type)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Emit the full document for a diagram under the given fit
pub(crate) fn document(
    diagram: &Diagram,
    layout: &LayoutResult,
    canvas_width: u32,
    canvas_height: u32,
    fit: Fit,
) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{canvas_width}\" \
         height=\"{canvas_height}\" viewBox=\"0 0 {canvas_width} {canvas_height}\">\n"
    ));
    svg.push_str(&format!(
        "<rect width=\"{canvas_width}\" height=\"{canvas_height}\" fill=\"white\"/>\n"
    ));

    for class in diagram.classes() {
        // Defensive: every declared class gets a rectangle, but a missing
        // entry must not abort the rest of the drawing.
        let Some(rect) = layout.position(&class.name) else {
            continue;
        };
        let x = fit.map_x(rect.x as f32);
        let y = fit.map_y(rect.y as f32);
        let w = fit.scale(rect.width as f32);
        let h = fit.scale(rect.height as f32);
        let padding = fit.scale(PADDING);
        let stroke = fit.scale(BOX_STROKE_WIDTH);

        svg.push_str(&format!(
            "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" \
             fill=\"none\" stroke=\"black\" stroke-width=\"{stroke}\"/>\n"
        ));

        // Bold title, then a separator, then one line per member.
        let title_size = fit.scale(TITLE_FONT_SIZE);
        svg.push_str(&format!(
            "<text x=\"{tx}\" y=\"{ty}\" font-family=\"{FONT_FAMILY}\" \
             font-size=\"{title_size}\" font-weight=\"bold\" fill=\"black\">{name}</text>\n",
            tx = x + padding,
            ty = y + padding + title_size,
            name = escape(&class.name),
        ));

        let separator_y = y + padding + fit.scale(TITLE_HEIGHT);
        svg.push_str(&format!(
            "<line x1=\"{x1}\" y1=\"{separator_y}\" x2=\"{x2}\" y2=\"{separator_y}\" \
             stroke=\"black\" stroke-width=\"{stroke}\"/>\n",
            x1 = x + padding,
            x2 = x + w - padding,
        ));

        let member_size = fit.scale(MEMBER_FONT_SIZE);
        let mut line_y = separator_y + padding;
        for member in &class.members {
            svg.push_str(&format!(
                "<text x=\"{tx}\" y=\"{ty}\" font-family=\"{FONT_FAMILY}\" \
                 font-size=\"{member_size}\" fill=\"darkblue\">{label}</text>\n",
                tx = x + padding,
                ty = line_y + member_size,
                label = escape(&member_label(member)),
            ));
            line_y += fit.scale(LINE_SPACING);
        }
    }

    // Relation kinds are not differentiated visually: every edge is a
    // straight arrow from the source's bottom-center to the target's
    // top-center.
    for relation in diagram.relations() {
        let (Some(from), Some(to)) = (
            layout.position(&relation.from),
            layout.position(&relation.to),
        ) else {
            continue;
        };
        let (x1, y1) = from.bottom_center();
        let (x2, y2) = to.top_center();
        let (x1, y1) = (fit.map_x(x1), fit.map_y(y1));
        let (x2, y2) = (fit.map_x(x2), fit.map_y(y2));

        svg.push_str(&format!(
            "<line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" \
             stroke=\"black\" stroke-width=\"{RELATION_STROKE_WIDTH}\"/>\n"
        ));
        if let Some(head) = arrow_head(x1, y1, x2, y2) {
            svg.push_str(&head);
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Filled triangular cap at the destination end of an edge
fn arrow_head(x1: f32, y1: f32, x2: f32, y2: f32) -> Option<String> {
    let dx = x2 - x1;
    let dy = y2 - y1;
    let len = (dx * dx + dy * dy).sqrt();
    if len < f32::EPSILON {
        return None;
    }
    let (ux, uy) = (dx / len, dy / len);
    // Base of the triangle sits back along the line; the normal spreads
    // the two base corners.
    let bx = x2 - ux * ARROW_LENGTH;
    let by = y2 - uy * ARROW_LENGTH;
    let (nx, ny) = (-uy, ux);
    let left = (bx + nx * ARROW_HALF_WIDTH, by + ny * ARROW_HALF_WIDTH);
    let right = (bx - nx * ARROW_HALF_WIDTH, by - ny * ARROW_HALF_WIDTH);
    Some(format!(
        "<path d=\"M{x2},{y2} L{},{} L{},{} Z\" fill=\"black\"/>\n",
        left.0, left.1, right.0, right.1
    ))
}
