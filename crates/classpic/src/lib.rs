//! Classpic - render plain-text class diagrams to raster images
//!
//! A library for parsing a small line-oriented class-diagram notation and
//! rendering it as a raster image. The pipeline is strictly linear:
//! text is parsed into a [`Diagram`], the layout engine assigns a
//! rectangle to every class, and the renderer scales the result onto a
//! caller-supplied canvas.
//!
//! # Notation
//!
//! ```text
//! class Animal
//! class Dog
//! Animal : +name : string
//! Dog : -bark() : void
//! Dog <|-- Animal
//! ```
//!
//! Lines that match no rule are silently ignored; the parser never fails.
//!
//! # Quick Start
//!
//! ```rust
//! let diagram = classpic::parse("class Animal\nAnimal : +name : string");
//! let image = classpic::render(&diagram, 800, 600).unwrap();
//! assert_eq!((image.width(), image.height()), (800, 600));
//! ```
//!
//! # Advanced Usage
//!
//! The stages compose individually when the computed positions are of
//! interest:
//!
//! ```rust
//! use classpic::layout::layout;
//!
//! let diagram = classpic::parse("class Dog\nclass Animal\nDog <|-- Animal");
//! let positions = layout(&diagram);
//! assert!(positions.position("Dog").is_some());
//! let image = classpic::render::render(&diagram, &positions, 640, 480).unwrap();
//! ```

pub mod core;
pub mod diagram;
pub mod layout;
pub mod parser;
pub mod render;

pub use crate::core::DiagramError;
pub use diagram::{Class, Diagram, Member, Relation, RelationKind, Visibility};
pub use layout::{LayoutResult, Rect};
pub use render::RasterImage;

/// Parse class notation into a [`Diagram`]
///
/// Never fails; the worst case is an empty diagram.
pub fn parse(input: &str) -> Diagram {
    parser::parse(input)
}

/// Lay out and render a diagram onto a canvas of the given dimensions
///
/// Both dimensions must be positive; a zero dimension is the one caller
/// contract violation and yields [`DiagramError::InvalidCanvas`].
pub fn render(
    diagram: &Diagram,
    canvas_width: u32,
    canvas_height: u32,
) -> Result<RasterImage, DiagramError> {
    let positions = layout::layout(diagram);
    render::render(diagram, &positions, canvas_width, canvas_height)
}

/// Run the whole pipeline and encode the result as PNG bytes
pub fn render_png(
    input: &str,
    canvas_width: u32,
    canvas_height: u32,
) -> Result<Vec<u8>, DiagramError> {
    let diagram = parse(input);
    render(&diagram, canvas_width, canvas_height)?.encode_png()
}
