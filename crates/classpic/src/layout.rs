//! Class diagram layout engine
//!
//! Assigns a rectangle to every class on a virtual canvas. Generalization
//! relations form a derivation forest: a class that is never the `to`
//! endpoint of a generalization is a root. Roots with children are placed
//! first, each with its direct children centered one tier below; everything
//! else falls back to a grid below the tree output.
//!
//! The engine is deterministic: classes and relations are processed in
//! declaration order, and equal diagrams produce equal layouts.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::diagram::{Class, Diagram, RelationKind};

/// Fixed box width for every class
pub const BOX_WIDTH: i32 = 160;
/// Box height before members are counted
pub const BOX_BASE_HEIGHT: i32 = 60;
/// Height added per member line
pub const MEMBER_HEIGHT: i32 = 20;
/// Vertical gap between tiers and grid rows
pub const VERTICAL_SPACING: i32 = 100;
/// Horizontal gap between root columns and grid cells
pub const HORIZONTAL_SPACING: i32 = 200;
/// Horizontal gap between siblings under one parent
pub const CHILD_SPACING: i32 = 40;
/// Margin at the origin and around the virtual extent
pub const MARGIN: i32 = 50;
/// Grid fallback wraps after this many columns
pub const MAX_COLUMNS: usize = 4;

/// Axis-aligned rectangle with integer coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Anchor for outgoing relation lines
    pub fn bottom_center(&self) -> (f32, f32) {
        (self.x as f32 + self.width as f32 / 2.0, self.bottom() as f32)
    }

    /// Anchor for incoming relation lines
    pub fn top_center(&self) -> (f32, f32) {
        (self.x as f32 + self.width as f32 / 2.0, self.y as f32)
    }
}

/// Positions keyed by class name plus the virtual canvas extent
///
/// Duplicate class names keep the rectangle of the last placed entity.
/// The extent bounds every placed rectangle with [`MARGIN`] on each axis.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    positions: HashMap<String, Rect>,
    width: i32,
    height: i32,
}

impl LayoutResult {
    pub fn position(&self, name: &str) -> Option<Rect> {
        self.positions.get(name).copied()
    }

    pub fn positions(&self) -> &HashMap<String, Rect> {
        &self.positions
    }

    /// Virtual canvas width
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Virtual canvas height
    pub fn height(&self) -> i32 {
        self.height
    }
}

/// Height of a class box: base height plus one increment per member, so
/// stacked member text never outgrows the box.
pub fn box_height(class: &Class) -> i32 {
    BOX_BASE_HEIGHT + class.members.len() as i32 * MEMBER_HEIGHT
}

/// Lay out the diagram on the virtual canvas
pub fn layout(diagram: &Diagram) -> LayoutResult {
    let mut positions: HashMap<String, Rect> = HashMap::new();
    let mut placed: HashSet<&str> = HashSet::new();
    let mut max_x = 0;
    let mut max_y = 0;

    // The forest is implicit in the flat relation list: a set of
    // generalization targets, and per-root scans for direct children.
    let targets: HashSet<&str> = diagram
        .relations()
        .iter()
        .filter(|r| r.kind == RelationKind::Generalization)
        .map(|r| r.to.as_str())
        .collect();

    fn place(
        name: &str,
        rect: Rect,
        positions: &mut HashMap<String, Rect>,
        max_x: &mut i32,
        max_y: &mut i32,
    ) {
        *max_x = (*max_x).max(rect.right());
        *max_y = (*max_y).max(rect.bottom());
        positions.insert(name.to_string(), rect);
    }

    // Pass 1: roots that parent at least one child, with their direct
    // children centered one tier below. Only one generation deep.
    let mut cursor_x = MARGIN;
    for class in diagram.classes() {
        if targets.contains(class.name.as_str()) {
            continue;
        }

        let children: Vec<&Class> = diagram
            .relations()
            .iter()
            .filter(|r| r.kind == RelationKind::Generalization && r.from == class.name)
            .filter_map(|r| diagram.get_class(&r.to))
            .collect();
        if children.is_empty() {
            continue;
        }

        let root_height = box_height(class);
        let root_rect = Rect::new(cursor_x, MARGIN, BOX_WIDTH, root_height);
        place(&class.name, root_rect, &mut positions, &mut max_x, &mut max_y);
        placed.insert(class.name.as_str());

        // Center the child group under the parent
        let group_overhang = (children.len() as i32 - 1) * (BOX_WIDTH + CHILD_SPACING) / 2;
        let mut child_x = cursor_x - group_overhang;
        let child_y = MARGIN + root_height + VERTICAL_SPACING;
        for child in &children {
            let rect = Rect::new(child_x, child_y, BOX_WIDTH, box_height(child));
            place(&child.name, rect, &mut positions, &mut max_x, &mut max_y);
            placed.insert(child.name.as_str());
            child_x += BOX_WIDTH + CHILD_SPACING;
        }

        cursor_x += BOX_WIDTH + HORIZONTAL_SPACING;
    }

    // Pass 2: grid fallback for everything else, below the tree output.
    let mut grid_x = MARGIN;
    let mut grid_y = if max_y > 0 {
        max_y + VERTICAL_SPACING
    } else {
        MARGIN
    };
    let mut row_tallest = 0;
    let mut column = 0;
    for class in diagram.classes() {
        if placed.contains(class.name.as_str()) {
            continue;
        }

        if column >= MAX_COLUMNS {
            grid_x = MARGIN;
            grid_y += row_tallest + VERTICAL_SPACING;
            row_tallest = 0;
            column = 0;
        }

        let height = box_height(class);
        let rect = Rect::new(grid_x, grid_y, BOX_WIDTH, height);
        place(&class.name, rect, &mut positions, &mut max_x, &mut max_y);

        row_tallest = row_tallest.max(height);
        grid_x += BOX_WIDTH + HORIZONTAL_SPACING;
        column += 1;
    }

    let result = LayoutResult {
        positions,
        width: max_x + MARGIN,
        height: max_y + MARGIN,
    };
    debug!(
        classes = diagram.class_count(),
        width = result.width,
        height = result.height,
        "layout computed"
    );
    result
}
