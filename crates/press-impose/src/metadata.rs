//! Product layout metadata
//!
//! Each product code maps to a `ProductMetadata` record describing how its
//! pages are laid out on the press sheet: the cell grid, sheet and page
//! sizes, orientations, gaps, and the mark/identifier configuration. The
//! table is supplied by the plant configuration and is read-only during an
//! imposition run.

use crate::constants::*;
use crate::job::JobDescriptor;
use crate::types::*;
use std::collections::HashMap;

/// Crop mark stroke geometry
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CropSpec {
    pub line_width: f32,
    /// Length of each mark stroke
    pub length: f32,
    /// Gap between the trim corner and the start of the stroke
    pub start: f32,
    pub bleed: f32,
}

impl Default for CropSpec {
    fn default() -> Self {
        Self {
            line_width: 0.3,
            length: 4.0,
            start: 2.0,
            bleed: BLEED,
        }
    }
}

/// Die-cut media box: content is clipped or centered against this box
/// instead of the page cell.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Where product-level barcodes are sited on cover/card faces
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarcodeSite {
    /// Which face of the product carries the barcode
    pub face: SheetFace,
    /// Rotate the barcode a quarter turn against the sheet orientation
    #[cfg_attr(feature = "serde", serde(default))]
    pub vertical: bool,
    /// Explicit offset from the page origin, overriding the default siting
    #[cfg_attr(feature = "serde", serde(default))]
    pub pos: Option<(f32, f32)>,
}

/// Which faces carry the publisher logo
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogoSite {
    pub front: bool,
    pub back: bool,
}

/// Which edge of the page box the identifier text hugs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IdSide {
    /// Inside the page box along the binding edge
    #[default]
    Binding,
    /// Outside the page box; the layout reserves a wider gap for it
    Outside,
}

/// Orientation of the per-sheet color chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChartOrientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Layout configuration for one product code.
///
/// Field defaults match the plant configuration fallbacks, so a record only
/// needs the grid, page size, and whatever marks the product uses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProductMetadata {
    /// Grid rows of pages per sheet
    pub rows: usize,
    /// Grid columns of pages per sheet
    pub cols: usize,
    /// Page cell size (width, height) in points
    pub page_size: (f32, f32),
    /// Press sheet size in points
    pub sheet_size: (f32, f32),
    /// Die-cut media box; also overrides the page cell size when present
    pub media_box: Option<MediaBox>,
    /// Sheet orientation
    pub orientation: Orientation,
    /// Content orientation when it differs from the sheet
    pub content_orientation: Option<Orientation>,
    /// Single-sided product: no duplex parity, no sheet flips
    pub simplex: bool,
    /// Name of the dedicated cover component's metadata entry, when the
    /// cover is imposed separately from the content run
    pub cover: Option<String>,
    /// First copy of each job emits a work-order page
    pub work_order: bool,
    /// Gap between adjacent page cells
    pub gap: f32,
    /// Gap on the identifier axis; defaults from `id_side`
    pub id_gap: Option<f32>,
    /// Use the identifier gap on both axes
    pub spaced: bool,
    pub id_side: IdSide,
    /// Identifier template; `<order_item_id>`, `<page>`, `<pages>`, `<qty>`
    /// and `<cover>` are substituted per page
    pub id_text: Option<String>,
    pub id_size: f32,
    /// Absolute identifier position override
    pub id_pos: Option<(f32, f32)>,
    /// Identifier rotation used with `id_pos`
    pub id_orient: Option<Orientation>,
    pub crop: CropSpec,
    pub no_crops: bool,
    /// Second, expanded crop set drawn this far outside the trim box
    pub pre_trim_crops: Option<(f32, f32)>,
    /// Never mirror duplex backs
    pub no_flip: bool,
    /// Un-flip the trailing logo/barcode page (calendar backs)
    pub no_flip_last: bool,
    /// Odd columns mirror instead of the whole back sheet
    pub reverse_cols: bool,
    /// Product-level barcode siting for cover/card faces
    pub barcode: Option<BarcodeSite>,
    pub barcode_size: f32,
    /// Product-level logo siting
    pub logo: Option<LogoSite>,
    pub logo_version: String,
    /// Separator fill color name
    pub color: String,
    pub no_chart: bool,
    pub chart_orientation: ChartOrientation,
    /// Offset applied to the chart corner position
    pub sheet_offset: Option<(f32, f32)>,
    /// Draw separator backs at exactly the page size
    pub no_extend_separator: bool,
    /// Supported content page-count range for full-content runs
    pub page_bounds: Option<(u32, u32)>,
}

impl Default for ProductMetadata {
    fn default() -> Self {
        Self {
            rows: 1,
            cols: 1,
            page_size: DEFAULT_PAGE_DIMENSIONS,
            sheet_size: (DEFAULT_SHEET_WIDTH, DEFAULT_SHEET_HEIGHT),
            media_box: None,
            orientation: Orientation::North,
            content_orientation: None,
            simplex: false,
            cover: None,
            work_order: false,
            gap: DEFAULT_GAP,
            id_gap: None,
            spaced: false,
            id_side: IdSide::Binding,
            id_text: None,
            id_size: ID_TEXT_SIZE,
            id_pos: None,
            id_orient: None,
            crop: CropSpec::default(),
            no_crops: false,
            pre_trim_crops: None,
            no_flip: false,
            no_flip_last: false,
            reverse_cols: false,
            barcode: None,
            barcode_size: BARCODE_TEXT_SIZE,
            logo: None,
            logo_version: "stacked".to_string(),
            color: "blue".to_string(),
            no_chart: false,
            chart_orientation: ChartOrientation::Vertical,
            sheet_offset: None,
            no_extend_separator: false,
            page_bounds: None,
        }
    }
}

impl ProductMetadata {
    /// Create a record for a rows x cols grid of pages of the given size
    pub fn new(rows: usize, cols: usize, page_size: (f32, f32)) -> Self {
        Self {
            rows,
            cols,
            page_size,
            ..Self::default()
        }
    }

    pub fn duplex(&self) -> bool {
        !self.simplex
    }

    pub fn pages_per_side(&self) -> usize {
        self.rows * self.cols
    }

    /// Effective content orientation before per-job overrides
    pub fn content_orientation(&self) -> Orientation {
        self.content_orientation.unwrap_or(self.orientation)
    }

    pub fn binding_side_id(&self) -> bool {
        self.id_side == IdSide::Binding
    }

    /// Gap on the identifier axis
    pub fn effective_id_gap(&self) -> f32 {
        self.id_gap.unwrap_or(match self.id_side {
            IdSide::Binding => DEFAULT_GAP,
            IdSide::Outside => OUTSIDE_ID_GAP,
        })
    }

    /// Validate the record
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ImposeError::Config(
                "layout grid must have at least one row and column".to_string(),
            ));
        }
        if self.page_size.0 <= 0.0 || self.page_size.1 <= 0.0 {
            return Err(ImposeError::Config("page size must be positive".to_string()));
        }
        if self.sheet_size.0 <= 0.0 || self.sheet_size.1 <= 0.0 {
            return Err(ImposeError::Config(
                "sheet size must be positive".to_string(),
            ));
        }
        if let Some((min, max)) = self.page_bounds {
            if min > max {
                return Err(ImposeError::Config(format!(
                    "page bounds {min}..{max} are inverted"
                )));
            }
        }
        Ok(())
    }
}

/// Registry of product metadata keyed by product code
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MetadataTable {
    entries: HashMap<String, ProductMetadata>,
}

impl MetadataTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, metadata: ProductMetadata) {
        self.entries.insert(code.into(), metadata);
    }

    /// Look up a product code. Unknown codes are fatal: without a layout
    /// record nothing about the job can be imposed.
    pub fn get(&self, code: &ProductCode) -> Result<&ProductMetadata> {
        self.entries
            .get(code.as_str())
            .ok_or_else(|| ImposeError::UnknownProduct(code.as_str().to_string()))
    }

    /// Resolve the metadata for a run, inferring the product type from the
    /// first job when no explicit code is given.
    pub fn for_jobs<'a>(
        &'a self,
        jobs: &[JobDescriptor],
        type_code: Option<&ProductCode>,
    ) -> Result<&'a ProductMetadata> {
        let code = match type_code {
            Some(code) => code,
            None => {
                let first = jobs.first().ok_or(ImposeError::NoPages)?;
                if first.code.is_empty() {
                    return Err(ImposeError::Config(
                        "unable to identify product type".to_string(),
                    ));
                }
                &first.code
            }
        };
        self.get(code)
    }

    /// Load a metadata table from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let table: Self = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse metadata: {}", e)))?;
        for (code, metadata) in &table.entries {
            metadata
                .validate()
                .map_err(|e| ImposeError::Config(format!("metadata '{}': {}", code, e)))?;
        }
        Ok(table)
    }

    /// Save the metadata table to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize metadata: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}
