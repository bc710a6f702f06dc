//! Placement data types
//!
//! The output of the placement engine: one `SheetPlan` per physical sheet
//! side, each holding the per-slot placement instructions and auxiliary
//! draw directives handed to the renderer.

use crate::page::LogicalPage;
use crate::types::{Orientation, SheetFace};

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Target box a source page is fitted into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitBox {
    pub width: f32,
    pub height: f32,
}

/// How source content is fitted into its box
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitMode {
    /// Stretch to fill the box exactly
    Entire,
    /// Scale preserving aspect ratio until the box is met, centered
    Meet,
    /// Place at original size anchored at the given box-relative origin,
    /// clipping whatever falls outside
    Clip { x: f32, y: f32 },
    /// Center at original size without scaling
    Center,
}

/// Geometric transform for one placed source page
#[derive(Debug, Clone, PartialEq)]
pub struct ContentFit {
    pub fit: FitMode,
    pub box_size: FitBox,
    /// Quarter/half turn applied to the content
    pub orientate: Option<Orientation>,
    /// Vertical offset of the fit box above the slot origin
    pub y_offset: f32,
    /// Overlay image asset drawn over the fitted content
    pub overlay: Option<&'static str>,
}

/// Renderer font selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontId {
    /// Times-style serif used for identifiers and manifests
    Serif,
    /// Arial-style sans used for charts and merge text
    Sans,
    /// Code-39 barcode font
    Barcode,
}

/// Crop mark set around one trim box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropMark {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub line_width: f32,
    pub length: f32,
    pub start: f32,
    pub bleed: f32,
}

/// Auxiliary draw directive attached to a slot
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Filled rectangle in a named color
    Rect {
        rect: Rect,
        color: String,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        line_width: f32,
    },
    Text {
        text: String,
        font: FontId,
        size: f32,
        x: f32,
        y: f32,
        orientate: Orientation,
        /// Colored box painted behind the text
        background: Option<String>,
    },
    /// Multi-line text flowed into a box around a rotated origin
    TextBox {
        text: String,
        font: FontId,
        size: f32,
        x: f32,
        y: f32,
        rotation: f32,
        rect: Rect,
    },
    /// Publisher logo fitted to the center of a box
    Logo {
        rect: Rect,
        orientate: Orientation,
        version: String,
    },
    /// Per-sheet density chart with its "n of m" label
    Chart {
        x: f32,
        y: f32,
        vertical: bool,
        label: String,
    },
    CropMarks(CropMark),
}

/// Placement of one grid slot on one sheet side
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementInstruction {
    pub row: usize,
    pub col: usize,
    pub page: LogicalPage,
    /// Slot origin on the sheet
    pub x: f32,
    pub y: f32,
    /// Transform for the source content; mark-only pages have none
    pub content: Option<ContentFit>,
    /// Renderer must undo the sheet flip before drawing this slot
    pub unflip: bool,
    pub marks: Vec<Directive>,
}

/// All placements for one sheet side, in emission order
#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan {
    /// Emission index (depth); all slots of sheet k precede sheet k+1
    pub index: usize,
    pub side: SheetFace,
    /// Sheet is rotated 180 degrees for duplex-back alignment
    pub flipped: bool,
    pub width: f32,
    pub height: f32,
    pub slots: Vec<PlacementInstruction>,
    /// Crop marks drawn after every slot of the sheet
    pub crops: Vec<CropMark>,
}
