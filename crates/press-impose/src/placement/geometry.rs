//! Slot geometry
//!
//! Computes where each grid slot sits on the press sheet and how source
//! content is fitted and rotated into it. Duplex backs mirror horizontally
//! so pages stay aligned through the 180 degree sheet flip.

use crate::constants::POCKETBOOK_SPINE_OFFSET;
use crate::metadata::ProductMetadata;
use crate::types::Orientation;

use super::{ContentFit, FitBox, FitMode};

/// Asset name for the pocket-book cover overlay image
pub const POCKETBOOK_OVERLAY: &str = "pocketbook_cover";

/// Resolved sheet geometry for one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SheetGeometry {
    pub sheet_width: f32,
    pub sheet_height: f32,
    /// Page cell size after any west-orientation swap
    pub page_width: f32,
    pub page_height: f32,
    /// Gap between adjacent columns
    pub wgap: f32,
    /// Gap between adjacent rows
    pub hgap: f32,
    /// Margin between the sheet edge and the outer columns
    pub gutter_width: f32,
    /// Margin between the sheet edge and the outer rows
    pub gutter_height: f32,
}

impl SheetGeometry {
    pub fn new(metadata: &ProductMetadata) -> Self {
        let (sheet_width, sheet_height) = metadata.sheet_size;
        let (mut page_width, mut page_height) = match metadata.media_box {
            Some(media) => (media.width, media.height),
            None => metadata.page_size,
        };
        let id_gap = metadata.effective_id_gap();
        let gap = metadata.gap;

        // the identifier gap sits on the axis the id text occupies
        let (wgap, hgap);
        if metadata.orientation == Orientation::West && page_width > page_height {
            std::mem::swap(&mut page_width, &mut page_height);
            hgap = id_gap;
            wgap = if metadata.spaced { id_gap } else { gap };
        } else {
            wgap = id_gap;
            hgap = if metadata.spaced { id_gap } else { gap };
        }

        let cols = metadata.cols as f32;
        let rows = metadata.rows as f32;
        let gutter_width = (sheet_width - page_width * cols - wgap * (cols - 1.0)) / 2.0;
        let gutter_height = (sheet_height - page_height * rows - hgap * (rows - 1.0)) / 2.0;

        Self {
            sheet_width,
            sheet_height,
            page_width,
            page_height,
            wgap,
            hgap,
            gutter_width,
            gutter_height,
        }
    }

    /// Bottom-left origin of a grid slot. Mirrored slots count columns from
    /// the opposite edge so duplex backs line up after the sheet flip.
    pub fn origin(&self, row: usize, col: usize, mirrored: bool) -> (f32, f32) {
        let y = self.sheet_height
            - self.gutter_height
            - (self.page_height + self.hgap) * (row + 1) as f32
            + self.hgap;
        let x = if mirrored {
            self.sheet_width
                - self.gutter_width
                - (self.page_width + self.wgap) * (col + 1) as f32
                + self.wgap
        } else {
            self.gutter_width + col as f32 * (self.page_width + self.wgap)
        };
        (x, y)
    }
}

/// Choose the fit transform for a source page.
///
/// Legacy pocket-book covers (squarish source into a tall narrow cell) meet
/// a half-height box above a spine allowance; die-cut products center or
/// clip against the media box; everything else fills the cell.
pub(crate) fn choose_fit(
    metadata: &ProductMetadata,
    source_width: f32,
    source_height: f32,
    geometry: &SheetGeometry,
) -> ContentFit {
    let width = geometry.page_width;
    let height = geometry.page_height;
    let source_wider = source_width > source_height;
    let in_ratio = minmax(source_width, source_height);
    let in_narrow = in_ratio.1 < 2.0 * in_ratio.0;
    let out_ratio = minmax(width, height);
    let out_wide = out_ratio.1 > 2.0 * out_ratio.0;

    if in_narrow && out_wide {
        // cover image only (old pocket books)
        return ContentFit {
            fit: FitMode::Meet,
            box_size: FitBox {
                width,
                height: height / 2.0,
            },
            orientate: None,
            y_offset: height / 2.0 + POCKETBOOK_SPINE_OFFSET,
            overlay: Some(POCKETBOOK_OVERLAY),
        };
    }

    if let Some(media) = metadata.media_box {
        // account for rotation
        let (source_width, source_height) = if (width < height && source_wider)
            || (width > height && !source_wider)
        {
            (source_height, source_width)
        } else {
            (source_width, source_height)
        };
        // die-cut only? center in the media box
        let fit = if source_width < width && source_height < height {
            FitMode::Center
        } else {
            FitMode::Clip {
                x: media.x,
                y: media.y,
            }
        };
        return ContentFit {
            fit,
            box_size: FitBox { width, height },
            orientate: None,
            y_offset: 0.0,
            overlay: None,
        };
    }

    ContentFit {
        fit: FitMode::Entire,
        box_size: FitBox { width, height },
        orientate: None,
        y_offset: 0.0,
        overlay: None,
    }
}

/// Choose the content rotation for a placed page.
///
/// The long axis of the source follows the sheet orientation; west-oriented
/// content on a duplex back rotates the other way so it stays upright
/// relative to the binding, and reverse-columns products alternate odd
/// columns instead.
pub(crate) fn choose_rotation(
    metadata: &ProductMetadata,
    content_orientation: Orientation,
    source_wider: bool,
    is_back: bool,
    col: usize,
) -> Option<Orientation> {
    let mut orientate = None;
    if metadata.orientation == Orientation::West && source_wider {
        orientate = Some(Orientation::West);
    } else if metadata.orientation == Orientation::North && !source_wider {
        orientate = Some(Orientation::East);
    }

    // undo the flip for west-oriented content
    if metadata.orientation == Orientation::West
        && content_orientation == Orientation::West
        && is_back
        && !metadata.no_flip
        && !metadata.no_flip_last
    {
        if !metadata.reverse_cols || col % 2 == 0 {
            orientate = Some(Orientation::East);
        }
    } else if metadata.reverse_cols && col % 2 == 1 {
        orientate = Some(Orientation::East);
    }
    orientate
}

fn minmax(a: f32, b: f32) -> (f32, f32) {
    if a < b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MediaBox;

    fn metadata() -> ProductMetadata {
        let mut meta = ProductMetadata::new(2, 2, (400.0, 600.0));
        meta.sheet_size = (842.4, 1245.6);
        meta
    }

    #[test]
    fn test_gutters_center_the_grid() {
        let geometry = SheetGeometry::new(&metadata());
        // 2 cols of 400pt pages with a 1pt id gap
        assert!((geometry.gutter_width - (842.4 - 800.0 - 1.0) / 2.0).abs() < 0.01);
        assert!((geometry.gutter_height - (1245.6 - 1200.0 - 1.0) / 2.0).abs() < 0.01);
    }

    #[test]
    fn test_west_sheet_swaps_landscape_pages() {
        let mut meta = metadata();
        meta.orientation = Orientation::West;
        meta.page_size = (600.0, 400.0);
        let geometry = SheetGeometry::new(&meta);
        assert_eq!(geometry.page_width, 400.0);
        assert_eq!(geometry.page_height, 600.0);
        // the id gap moves to the row axis
        assert_eq!(geometry.hgap, 1.0);
        assert_eq!(geometry.wgap, 1.0);
    }

    #[test]
    fn test_origin_rows_descend_from_top() {
        let geometry = SheetGeometry::new(&metadata());
        let (x0, y0) = geometry.origin(0, 0, false);
        let (x1, y1) = geometry.origin(1, 0, false);
        assert_eq!(x0, x1);
        assert!((y0 - y1 - (geometry.page_height + geometry.hgap)).abs() < 0.01);
        assert!((x0 - geometry.gutter_width).abs() < 0.01);
    }

    #[test]
    fn test_mirrored_origin_counts_from_far_edge() {
        let geometry = SheetGeometry::new(&metadata());
        let (front, _) = geometry.origin(0, 0, false);
        let (back, _) = geometry.origin(0, 1, true);
        // col 1 mirrored lands where col 0 sits from the right edge
        let expected = geometry.sheet_width
            - geometry.gutter_width
            - 2.0 * (geometry.page_width + geometry.wgap)
            + geometry.wgap;
        assert!((back - expected).abs() < 0.01);
        assert!(back < front + geometry.page_width);
    }

    #[test]
    fn test_entire_fit_for_ordinary_pages() {
        let geometry = SheetGeometry::new(&metadata());
        let fit = choose_fit(&metadata(), 400.0, 600.0, &geometry);
        assert_eq!(fit.fit, FitMode::Entire);
        assert_eq!(fit.y_offset, 0.0);
        assert!(fit.overlay.is_none());
    }

    #[test]
    fn test_pocketbook_cover_heuristic() {
        // squarish source into a tall narrow cell
        let mut meta = metadata();
        meta.page_size = (300.0, 900.0);
        let geometry = SheetGeometry::new(&meta);
        let fit = choose_fit(&meta, 500.0, 700.0, &geometry);
        assert_eq!(fit.fit, FitMode::Meet);
        assert_eq!(fit.box_size.height, 450.0);
        assert!((fit.y_offset - (450.0 + POCKETBOOK_SPINE_OFFSET)).abs() < 0.01);
        assert_eq!(fit.overlay, Some(POCKETBOOK_OVERLAY));
    }

    #[test]
    fn test_media_box_centers_smaller_content() {
        let mut meta = metadata();
        meta.media_box = Some(MediaBox {
            x: 10.0,
            y: 20.0,
            width: 400.0,
            height: 600.0,
        });
        let geometry = SheetGeometry::new(&meta);
        let fit = choose_fit(&meta, 300.0, 500.0, &geometry);
        assert_eq!(fit.fit, FitMode::Center);
    }

    #[test]
    fn test_media_box_clips_larger_content() {
        let mut meta = metadata();
        meta.media_box = Some(MediaBox {
            x: 10.0,
            y: 20.0,
            width: 400.0,
            height: 600.0,
        });
        let geometry = SheetGeometry::new(&meta);
        let fit = choose_fit(&meta, 450.0, 650.0, &geometry);
        assert_eq!(fit.fit, FitMode::Clip { x: 10.0, y: 20.0 });
    }

    #[test]
    fn test_rotation_follows_sheet_orientation() {
        let mut meta = metadata();
        meta.orientation = Orientation::West;
        assert_eq!(
            choose_rotation(&meta, Orientation::North, true, false, 0),
            Some(Orientation::West)
        );
        meta.orientation = Orientation::North;
        assert_eq!(
            choose_rotation(&meta, Orientation::North, false, false, 0),
            Some(Orientation::East)
        );
        // matching axes need no rotation
        assert_eq!(choose_rotation(&meta, Orientation::North, true, false, 0), None);
    }

    #[test]
    fn test_west_content_unrotates_on_backs() {
        let mut meta = metadata();
        meta.orientation = Orientation::West;
        assert_eq!(
            choose_rotation(&meta, Orientation::West, true, true, 0),
            Some(Orientation::East)
        );
        // fronts keep the west rotation
        assert_eq!(
            choose_rotation(&meta, Orientation::West, true, false, 0),
            Some(Orientation::West)
        );
    }

    #[test]
    fn test_reverse_cols_rotates_odd_columns() {
        let mut meta = metadata();
        meta.orientation = Orientation::West;
        meta.reverse_cols = true;
        assert_eq!(
            choose_rotation(&meta, Orientation::North, true, false, 1),
            Some(Orientation::East)
        );
        assert_eq!(
            choose_rotation(&meta, Orientation::North, true, false, 0),
            Some(Orientation::West)
        );
        // odd columns on a west/west back keep their west rotation
        assert_eq!(
            choose_rotation(&meta, Orientation::West, true, true, 1),
            Some(Orientation::West)
        );
    }
}
