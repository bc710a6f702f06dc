//! Source document introspection
//!
//! The placement engine needs page counts and page dimensions from the
//! job's source PDFs; actual content extraction stays on the renderer side
//! of the boundary. Resolution failures are fatal for the run.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::page::SourceRef;
use crate::types::*;
use lopdf::{Document, Object};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Page-count and dimension lookup for job sources
pub trait SourceResolver {
    fn page_count(&mut self, path: &Path) -> Result<u32>;

    /// (width, height) of one source page in points
    fn page_dimensions(&mut self, source: &SourceRef) -> Result<(f32, f32)>;
}

/// lopdf-backed resolver with a per-document handle cache
#[derive(Debug, Default)]
pub struct PdfSourceResolver {
    documents: HashMap<PathBuf, Document>,
}

impl PdfSourceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn document(&mut self, path: &Path) -> Result<&Document> {
        if !self.documents.contains_key(path) {
            let document = Document::load(path)?;
            self.documents.insert(path.to_owned(), document);
        }
        Ok(&self.documents[path])
    }
}

impl SourceResolver for PdfSourceResolver {
    fn page_count(&mut self, path: &Path) -> Result<u32> {
        Ok(self.document(path)?.get_pages().len() as u32)
    }

    fn page_dimensions(&mut self, source: &SourceRef) -> Result<(f32, f32)> {
        let document = self.document(&source.path)?;
        let pages = document.get_pages();
        let page_id = pages
            .get(&source.page)
            .copied()
            .ok_or_else(|| ImposeError::MissingSource {
                path: source.path.display().to_string(),
                page: source.page,
            })?;
        let page_dict = document.get_dictionary(page_id)?;
        if let Ok(media_box) = page_dict.get(b"MediaBox").and_then(|obj| obj.as_array()) {
            let width = media_box
                .get(2)
                .and_then(extract_number)
                .unwrap_or(DEFAULT_PAGE_DIMENSIONS.0);
            let height = media_box
                .get(3)
                .and_then(extract_number)
                .unwrap_or(DEFAULT_PAGE_DIMENSIONS.1);
            Ok((width, height))
        } else {
            Ok(DEFAULT_PAGE_DIMENSIONS)
        }
    }
}

/// Extract a numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Fixed-dimension resolver for dry runs and tests
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    sources: HashMap<PathBuf, (u32, (f32, f32))>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document with its page count and uniform page size
    pub fn insert(&mut self, path: impl Into<PathBuf>, pages: u32, dimensions: (f32, f32)) {
        self.sources.insert(path.into(), (pages, dimensions));
    }
}

impl SourceResolver for StaticResolver {
    fn page_count(&mut self, path: &Path) -> Result<u32> {
        self.sources
            .get(path)
            .map(|(pages, _)| *pages)
            .ok_or_else(|| ImposeError::MissingSource {
                path: path.display().to_string(),
                page: 0,
            })
    }

    fn page_dimensions(&mut self, source: &SourceRef) -> Result<(f32, f32)> {
        let (pages, dimensions) =
            self.sources
                .get(&source.path)
                .ok_or_else(|| ImposeError::MissingSource {
                    path: source.path.display().to_string(),
                    page: source.page,
                })?;
        if source.page == 0 || source.page > *pages {
            return Err(ImposeError::MissingSource {
                path: source.path.display().to_string(),
                page: source.page,
            });
        }
        Ok(*dimensions)
    }
}
