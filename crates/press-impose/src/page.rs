//! Logical pages
//!
//! A `LogicalPage` is one entry of the ordered page list built for an
//! imposition run: a piece of job content, a cover face, or one of the
//! administrative/filler pages the press workflow needs. All downstream
//! branching is on the `PageKind` tag; the label only feeds identifier
//! text and debugging output.

use crate::job::JobDescriptor;
use crate::types::*;
use std::path::PathBuf;
use std::sync::Arc;

/// Reference to one page of a source document
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceRef {
    pub path: PathBuf,
    /// 1-based page number within the document
    pub page: u32,
}

impl SourceRef {
    pub fn new(path: impl Into<PathBuf>, page: u32) -> Self {
        Self {
            path: path.into(),
            page,
        }
    }
}

/// What a logical page is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    /// Content page `index` of its job; index 0 is the in-run cover page.
    /// `face` is set for two-page card products whose front/back faces
    /// drive product-level barcode and logo siting.
    Content { index: u32, face: Option<SheetFace> },
    /// A cover or jacket component face imposed from an explicit request
    Cover { kind: CoverKind, side: SheetFace },
    Blank,
    /// Trailing page carrying the order barcode
    Barcode,
    /// Trailing page carrying the publisher logo
    Logo,
    /// Trailing page carrying both logo and barcode
    LogoBarcode,
    /// Color separator; an empty label means the cell number is drawn
    Separator { label: String },
    /// Cyan-filled back of a separator or work-order sheet
    Cyan,
    Manifest,
    WorkOrder,
}

impl PageKind {
    pub fn is_cyan(&self) -> bool {
        matches!(self, PageKind::Cyan)
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, PageKind::Separator { .. })
    }

    pub fn is_manifest(&self) -> bool {
        matches!(self, PageKind::Manifest)
    }

    /// Pages drawn with the order barcode in the page corner
    pub fn has_barcode_mark(&self) -> bool {
        matches!(self, PageKind::Barcode | PageKind::LogoBarcode)
    }

    /// Pages drawn with the centered publisher logo
    pub fn has_logo_mark(&self) -> bool {
        matches!(self, PageKind::Logo | PageKind::LogoBarcode)
    }

    /// Cover/card fronts that participate in product-level siting
    pub fn is_front_face(&self) -> bool {
        matches!(
            self,
            PageKind::Cover {
                side: SheetFace::Front,
                ..
            } | PageKind::Content {
                face: Some(SheetFace::Front),
                ..
            }
        )
    }

    /// Cover backs that participate in product-level siting
    pub fn is_back_face(&self) -> bool {
        matches!(
            self,
            PageKind::Cover {
                side: SheetFace::Back,
                ..
            }
        )
    }

    /// Pages that never receive crop marks
    pub fn crop_exempt(&self) -> bool {
        matches!(self, PageKind::Blank | PageKind::Cyan)
            || matches!(
                self,
                PageKind::Cover {
                    side: SheetFace::Back,
                    ..
                }
            )
    }

    /// Pages that never receive identifier text
    pub fn identifier_exempt(&self) -> bool {
        matches!(
            self,
            PageKind::Blank
                | PageKind::WorkOrder
                | PageKind::Manifest
                | PageKind::Separator { .. }
                | PageKind::Cyan
        )
    }

    /// Pages eligible for the product-level back logo (postcards)
    pub fn back_logo_eligible(&self) -> bool {
        match self {
            PageKind::Content { face, .. } => *face != Some(SheetFace::Front),
            PageKind::Barcode | PageKind::Logo | PageKind::LogoBarcode => true,
            _ => false,
        }
    }
}

/// One entry of the imposition page list
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalPage {
    pub kind: PageKind,
    /// Document page backing this entry; administrative and filler pages
    /// have none
    pub source: Option<SourceRef>,
    /// Owning job, kept for barcode and identifier text
    pub job: Option<Arc<JobDescriptor>>,
    /// Display label consumed by identifier templates
    pub label: String,
}

/// Ordered page sequence for one imposition run
pub type PageList = Vec<LogicalPage>;

impl LogicalPage {
    /// Content page `index`, sourced from PDF page `index + 1`
    pub(crate) fn content(job: &Arc<JobDescriptor>, index: u32) -> Self {
        let label = if index == 0 {
            "cover".to_string()
        } else {
            index.to_string()
        };
        Self {
            kind: PageKind::Content { index, face: None },
            source: Some(SourceRef::new(job.source.clone(), index + 1)),
            job: Some(Arc::clone(job)),
            label,
        }
    }

    pub(crate) fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Card face for two-page products; the copy number labels the face
    pub(crate) fn card_face(job: &Arc<JobDescriptor>, copy: u32, side: SheetFace) -> Self {
        let (index, label) = match side {
            SheetFace::Front => (0, format!("{copy} front")),
            SheetFace::Back => (1, copy.to_string()),
        };
        Self {
            kind: PageKind::Content {
                index,
                face: Some(side),
            },
            source: Some(SourceRef::new(job.source.clone(), index + 1)),
            job: Some(Arc::clone(job)),
            label,
        }
    }

    pub(crate) fn cover_front(job: &Arc<JobDescriptor>, kind: CoverKind) -> Self {
        Self {
            kind: PageKind::Cover {
                kind,
                side: SheetFace::Front,
            },
            source: Some(SourceRef::new(job.source.clone(), 1)),
            job: Some(Arc::clone(job)),
            label: format!("{} front", kind.label()),
        }
    }

    pub(crate) fn cover_back(job: &Arc<JobDescriptor>, kind: CoverKind) -> Self {
        Self {
            kind: PageKind::Cover {
                kind,
                side: SheetFace::Back,
            },
            source: None,
            job: Some(Arc::clone(job)),
            label: format!("{} back", kind.label()),
        }
    }

    pub(crate) fn blank(job: &Arc<JobDescriptor>) -> Self {
        Self {
            kind: PageKind::Blank,
            source: None,
            job: Some(Arc::clone(job)),
            label: "blank".to_string(),
        }
    }

    pub(crate) fn barcode(job: &Arc<JobDescriptor>) -> Self {
        Self {
            kind: PageKind::Barcode,
            source: None,
            job: Some(Arc::clone(job)),
            label: "barcode".to_string(),
        }
    }

    pub(crate) fn logo(job: &Arc<JobDescriptor>) -> Self {
        Self {
            kind: PageKind::Logo,
            source: None,
            job: Some(Arc::clone(job)),
            label: "logo".to_string(),
        }
    }

    pub(crate) fn logo_barcode(job: &Arc<JobDescriptor>) -> Self {
        Self {
            kind: PageKind::LogoBarcode,
            source: None,
            job: Some(Arc::clone(job)),
            label: "logo/barcode".to_string(),
        }
    }

    pub(crate) fn separator(label: impl Into<String>, job: Option<&Arc<JobDescriptor>>) -> Self {
        let label = label.into();
        Self {
            label: if label.is_empty() {
                "color".to_string()
            } else {
                format!("color {label}")
            },
            kind: PageKind::Separator { label },
            source: None,
            job: job.map(Arc::clone),
        }
    }

    /// Depth-padding filler
    pub(crate) fn filler() -> Self {
        Self::separator("X", None)
    }

    pub(crate) fn cyan() -> Self {
        Self {
            kind: PageKind::Cyan,
            source: None,
            job: None,
            label: "cyan".to_string(),
        }
    }

    pub(crate) fn manifest() -> Self {
        Self {
            kind: PageKind::Manifest,
            source: None,
            job: None,
            label: "manifest".to_string(),
        }
    }

    pub(crate) fn work_order(job: &Arc<JobDescriptor>, source: SourceRef) -> Self {
        Self {
            kind: PageKind::WorkOrder,
            source: Some(source),
            job: Some(Arc::clone(job)),
            label: "work-order".to_string(),
        }
    }
}
