use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown product code '{0}'")]
    UnknownProduct(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("job {job}: {reason}")]
    Content { job: i64, reason: String },
    #[error("source page not found: {path}:{page}")]
    MissingSource { path: String, page: u32 },
    #[error("sheet map invariant violated: {0}")]
    Allocation(String),
    #[error("render error: {0}")]
    Render(String),
    #[error("task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("no pages to impose")]
    NoPages,
}

pub type Result<T> = std::result::Result<T, ImposeError>;

/// Compass orientation used for sheet layout and text rotation.
///
/// North is upright; west/east rotate a quarter turn either way and
/// south turns the content upside down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    #[default]
    North,
    West,
    East,
    South,
}

impl Orientation {
    /// Rotation in degrees, counter-clockwise positive
    pub fn degrees(self) -> f32 {
        match self {
            Orientation::North => 0.0,
            Orientation::West => 90.0,
            Orientation::East => -90.0,
            Orientation::South => 180.0,
        }
    }
}

/// Which physical side of a duplex sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SheetFace {
    Front,
    Back,
}

/// How many sides of each leaf carry content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PageSiding {
    Simplex,
    #[default]
    Duplex,
}

/// Per-job content orientation override carried on the order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ContentOrientation {
    Vertical,
    Horizontal,
}

impl ContentOrientation {
    pub fn orientation(self) -> Orientation {
        match self {
            ContentOrientation::Vertical => Orientation::North,
            ContentOrientation::Horizontal => Orientation::West,
        }
    }
}

/// Cover component flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CoverKind {
    Cover,
    Jacket,
}

impl CoverKind {
    pub fn label(self) -> &'static str {
        match self {
            CoverKind::Cover => "cover",
            CoverKind::Jacket => "jacket",
        }
    }
}

/// Press-routing product code.
///
/// Codes are short strings assigned by the routing tables; the single-letter
/// codes carry class semantics that drive the trailing-page policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductCode(String);

impl ProductCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Membership in a single-letter class set; multi-letter codes never match
    fn in_class(&self, set: &str) -> bool {
        let mut chars = self.0.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => set.contains(c),
            _ => false,
        }
    }

    /// Products whose content run prints covers only
    pub fn covers_only(&self) -> bool {
        self.in_class("CDKLSU")
    }

    /// Deluxe classes that never put a logo on the trailing page
    pub fn is_deluxe(&self) -> bool {
        self.in_class("EFIJ")
    }

    /// Classes whose odd-count backfill page carries a bare barcode
    pub fn no_trailer_logo(&self) -> bool {
        self.in_class("FJ")
    }

    /// Products whose cover back is printed from content page 1
    pub fn printed_cover_back(&self) -> bool {
        self.0 == "M"
    }
}

impl std::fmt::Display for ProductCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}
