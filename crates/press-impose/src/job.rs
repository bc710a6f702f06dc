//! Per-job imposition input
//!
//! A `JobDescriptor` is the resolved, immutable description of one print job
//! handed to the engine by the order/metadata resolver. The engine never
//! reads the order database itself.

use crate::metadata::ProductMetadata;
use crate::types::*;
use std::path::PathBuf;

/// One entry of an explicit page-subset request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PageRequest {
    /// Content page number (1-based; the cover is PDF page 1, content page
    /// `n` is PDF page `n + 1`)
    Page(u32),
    Cover,
    Jacket,
    /// Ask for the trailing barcode/logo combination explicitly
    Barcode,
    Blank,
}

impl PageRequest {
    pub fn is_cover(self) -> bool {
        matches!(self, PageRequest::Cover | PageRequest::Jacket)
    }
}

/// Resolved description of one print job.
///
/// Read-only to the engine; built by the caller from order and product
/// metadata before an imposition run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JobDescriptor {
    pub order_item_id: i64,
    pub code: ProductCode,
    /// Content PDF for this job
    pub source: PathBuf,
    /// PDF page count: the cover page plus the content pages
    pub pages: u32,
    /// Ordered quantity; batched cover runs expand to this many copies
    pub qty: u32,
    pub page_siding: PageSiding,
    /// Content orientation override from the order item
    pub orientation: Option<ContentOrientation>,
    /// Appended to the order id in product-level barcodes
    pub barcode_suffix: String,
    /// Cover description used by identifier templates
    pub cover: String,
    pub batched: bool,
    pub no_manifest: bool,
    pub manifest_title: Option<String>,
    /// Mail-merge codes, one consumed per placed slot
    pub mail_merge: Option<Vec<String>>,
    /// Explicit page subset instead of the full content run
    pub page_list: Option<Vec<PageRequest>>,
    /// Pre-generated work-order PDF; required when the product metadata
    /// requests a work-order page
    pub work_order_source: Option<PathBuf>,
}

impl Default for JobDescriptor {
    fn default() -> Self {
        Self {
            order_item_id: 0,
            code: ProductCode::default(),
            source: PathBuf::new(),
            pages: 0,
            qty: 1,
            page_siding: PageSiding::Duplex,
            orientation: None,
            barcode_suffix: String::new(),
            cover: String::new(),
            batched: false,
            no_manifest: false,
            manifest_title: None,
            mail_merge: None,
            page_list: None,
            work_order_source: None,
        }
    }
}

impl JobDescriptor {
    pub fn new(
        order_item_id: i64,
        code: impl Into<ProductCode>,
        source: impl Into<PathBuf>,
        pages: u32,
        qty: u32,
    ) -> Self {
        Self {
            order_item_id,
            code: code.into(),
            source: source.into(),
            pages,
            qty,
            ..Self::default()
        }
    }

    /// Book content printed single-sided into a duplex-bound product:
    /// every content page needs an explicit back.
    pub fn pseudo_simplex(&self, metadata: &ProductMetadata) -> bool {
        self.page_siding == PageSiding::Simplex && metadata.cover.is_some()
    }

    /// Explicit page list with cover/jacket requests moved to the front
    pub(crate) fn normalized_page_list(&self) -> Option<Vec<PageRequest>> {
        let list = self.page_list.as_ref()?;
        let mut covers = Vec::new();
        let mut rest = Vec::new();
        for &request in list {
            if request.is_cover() {
                covers.insert(0, request);
            } else {
                rest.push(request);
            }
        }
        covers.extend(rest);
        Some(covers)
    }

    /// Text encoded in this job's product-level barcodes
    pub(crate) fn barcode_text(&self) -> String {
        format!("{}{}", self.order_item_id, self.barcode_suffix)
    }
}
