//! Shared constants for press-sheet layout

/// Maximum printable width of the 864 x 1296 press sheet, in points
pub const DEFAULT_SHEET_WIDTH: f32 = 842.4;

/// Maximum printable height of the 864 x 1296 press sheet, in points
pub const DEFAULT_SHEET_HEIGHT: f32 = 1245.6;

/// Bleed inset applied before crop marks are drawn
pub const BLEED: f32 = 2.25;

/// Default identifier text size in points
pub const ID_TEXT_SIZE: f32 = 10.0;

/// Default Code-39 barcode text size in points
pub const BARCODE_TEXT_SIZE: f32 = 10.0;

/// Default gap between adjacent pages on a sheet
pub const DEFAULT_GAP: f32 = 1.0;

/// Gap reserved on the identifier axis when the id text sits outside the page box
pub const OUTSIDE_ID_GAP: f32 = 57.6;

/// Fallback source page size when a document carries no MediaBox (US Letter)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (612.0, 792.0);

/// Extra vertical allowance above a half-height pocket-book cover box
pub const POCKETBOOK_SPINE_OFFSET: f32 = 18.0;

/// Inset from the spine edge for back-cover logos
pub const SPINE_LOGO_INSET: f32 = 36.0;
