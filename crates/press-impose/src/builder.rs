//! Page list construction
//!
//! Expands a set of job descriptors into the ordered logical page list for
//! one imposition run: cover faces, duplex back-pairing, pseudo-simplex
//! blank padding, copy separators, work-order/manifest pages, and the
//! trailing barcode/logo combination.

use crate::job::{JobDescriptor, PageRequest};
use crate::metadata::ProductMetadata;
use crate::page::{LogicalPage, PageList, SourceRef};
use crate::policy::{PageParity, TrailerPage, trailing_pages};
use crate::types::*;
use log::debug;
use std::sync::Arc;

/// Result of page list construction
#[derive(Debug, Clone)]
pub struct BuiltPages {
    pub pages: PageList,
    /// Manifest or work-order page destined for cell [0][0]
    pub front_sheet: Option<LogicalPage>,
    /// Jobs whose work-order PDFs must exist before rendering
    pub work_orders: Vec<Arc<JobDescriptor>>,
}

/// Intermediate expansion of an explicit page-subset request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expanded {
    Page(u32),
    Cover(CoverKind),
    Barcode,
    Blank,
}

/// Build the ordered logical page list for one run.
///
/// Jobs are expanded in order; batched jobs repeat per copy. The returned
/// front sheet (batched manifest, or the first work order when no manifest
/// was requested) is handed to the allocator separately so it lands on
/// cell [0][0].
pub fn build_page_list(
    jobs: &[Arc<JobDescriptor>],
    metadata: &ProductMetadata,
) -> Result<BuiltPages> {
    let first = jobs.first().ok_or(ImposeError::NoPages)?;

    let mut pages: PageList = Vec::new();
    let mut work_orders: Vec<Arc<JobDescriptor>> = Vec::new();
    let mut front_sheet = (first.batched && !first.no_manifest).then(LogicalPage::manifest);

    let duplex = metadata.duplex();
    let pages_per_side = metadata.pages_per_side() as u32;
    let total_qty: u32 = jobs.iter().map(|j| j.qty).sum();

    for job in jobs {
        validate_page_bounds(job, metadata)?;
        let pseudo_simplex = job.pseudo_simplex(metadata);

        let explicit = job
            .normalized_page_list()
            .filter(|list| !list.is_empty());
        // only batched cover runs repeat per copy
        let explicit_non_cover = explicit
            .as_ref()
            .is_some_and(|list| !list[0].is_cover());
        let copies = if !job.batched || explicit_non_cover {
            1
        } else {
            job.qty
        };

        for copy in 1..=copies {
            match &explicit {
                Some(list) => {
                    expand_subset(&mut pages, job, list, duplex, pseudo_simplex);
                }
                None => {
                    expand_all_pages(AllPages {
                        pages: &mut pages,
                        front_sheet: &mut front_sheet,
                        work_orders: &mut work_orders,
                        job,
                        metadata,
                        copy,
                        duplex,
                        pseudo_simplex,
                        total_qty,
                        pages_per_side,
                    })?;
                }
            }
        }
    }

    debug!(
        "built page list: {} pages across {} jobs",
        pages.len(),
        jobs.len()
    );
    Ok(BuiltPages {
        pages,
        front_sheet,
        work_orders,
    })
}

fn validate_page_bounds(job: &JobDescriptor, metadata: &ProductMetadata) -> Result<()> {
    if job.page_list.is_some() {
        return Ok(());
    }
    if let Some((min, max)) = metadata.page_bounds {
        if job.pages < min {
            return Err(ImposeError::Content {
                job: job.order_item_id,
                reason: format!("content PDF has too few pages ({} < {})", job.pages, min),
            });
        }
        if job.pages > max {
            return Err(ImposeError::Content {
                job: job.order_item_id,
                reason: format!("content PDF has too many pages ({} > {})", job.pages, max),
            });
        }
    }
    Ok(())
}

/// Expand an explicit page subset, pairing duplex backs
fn expand_subset(
    pages: &mut PageList,
    job: &Arc<JobDescriptor>,
    list: &[PageRequest],
    duplex: bool,
    pseudo_simplex: bool,
) {
    let mut with_backs: Vec<Expanded> = Vec::new();
    for request in list {
        match *request {
            PageRequest::Cover => with_backs.push(Expanded::Cover(CoverKind::Cover)),
            PageRequest::Jacket => with_backs.push(Expanded::Cover(CoverKind::Jacket)),
            PageRequest::Barcode => with_backs.push(Expanded::Barcode),
            PageRequest::Blank => with_backs.push(Expanded::Blank),
            PageRequest::Page(p) => {
                if duplex && !pseudo_simplex {
                    // attach the adjacent page
                    if p % 2 == 1 {
                        with_backs.push(Expanded::Page(p));
                        if p + 1 == job.pages {
                            // went too far - the back is the barcode page
                            with_backs.push(Expanded::Barcode);
                        } else {
                            with_backs.push(Expanded::Page(p + 1));
                        }
                    } else {
                        with_backs.push(Expanded::Page(p - 1));
                        with_backs.push(Expanded::Page(p));
                    }
                } else if pseudo_simplex {
                    // explicitly add blank backs
                    with_backs.push(Expanded::Page(p));
                    if p == job.pages.saturating_sub(1) {
                        with_backs.push(Expanded::Barcode);
                    } else {
                        with_backs.push(Expanded::Blank);
                    }
                } else {
                    with_backs.push(Expanded::Page(p));
                }
            }
        }
    }

    for entry in &with_backs {
        match *entry {
            Expanded::Cover(kind) => {
                pages.push(LogicalPage::cover_front(job, kind));
                if job.code.printed_cover_back() {
                    pages.push(LogicalPage::content(job, 1));
                } else if duplex {
                    pages.push(LogicalPage::cover_back(job, kind));
                }
            }
            Expanded::Barcode => {
                let trailer = trailing_pages(&job.code, pseudo_simplex, PageParity::of(job.pages));
                let last = job.pages.saturating_sub(1);
                if trailer.len() == 1 && !with_backs.contains(&Expanded::Page(last)) {
                    // a lone trailer means the final content page was not
                    // pulled in by back-pairing; re-add it so the barcode
                    // lands on its back
                    pages.push(LogicalPage::content(job, last));
                }
                pages.extend(trailer.iter().map(|t| trailer_page(job, *t)));
            }
            Expanded::Blank => pages.push(LogicalPage::blank(job)),
            Expanded::Page(p) => pages.push(LogicalPage::content(job, p)),
        }
    }
}

struct AllPages<'a> {
    pages: &'a mut PageList,
    front_sheet: &'a mut Option<LogicalPage>,
    work_orders: &'a mut Vec<Arc<JobDescriptor>>,
    job: &'a Arc<JobDescriptor>,
    metadata: &'a ProductMetadata,
    copy: u32,
    duplex: bool,
    pseudo_simplex: bool,
    total_qty: u32,
    pages_per_side: u32,
}

/// Expand a full content run for one copy of a job
fn expand_all_pages(ctx: AllPages<'_>) -> Result<()> {
    let AllPages {
        pages,
        front_sheet,
        work_orders,
        job,
        metadata,
        copy,
        duplex,
        pseudo_simplex,
        total_qty,
        pages_per_side,
    } = ctx;

    if copy == 1 && metadata.work_order {
        let path = job.work_order_source.clone().ok_or(ImposeError::Content {
            job: job.order_item_id,
            reason: "work-order page requested but no work-order source supplied".to_string(),
        })?;
        let work_order = LogicalPage::work_order(job, SourceRef::new(path, 1));
        work_orders.push(Arc::clone(job));
        if front_sheet.is_some() {
            pages.push(work_order);
            if duplex {
                pages.push(LogicalPage::cyan());
            }
        } else {
            // the work order itself anchors cell [0][0]
            *front_sheet = Some(work_order);
        }
    } else if job.batched && job.pages > 2 && total_qty > pages_per_side {
        // copy separator keeps multi-copy runs visually separable
        pages.push(LogicalPage::separator(
            format!("{} - Copy {}", job.order_item_id, copy),
            Some(job),
        ));
        if duplex {
            pages.push(LogicalPage::cyan());
        }
    }

    if job.pages > 2 {
        if metadata.cover.is_none() {
            pages.push(LogicalPage::content(job, 0));
        }
        for p in 1..job.pages {
            let mut page = LogicalPage::content(job, p);
            if job.batched {
                page = page.with_label(format!(
                    "Copy {}/{} Page {}/{}",
                    copy, job.qty, p, job.pages
                ));
            }
            pages.push(page);
            if pseudo_simplex && p < job.pages - 1 {
                pages.push(LogicalPage::blank(job));
            }
        }
        let trailer = trailing_pages(&job.code, pseudo_simplex, PageParity::of(job.pages));
        pages.extend(trailer.iter().map(|t| trailer_page(job, *t)));
    } else {
        // cards are labeled by copy number
        pages.push(LogicalPage::card_face(job, copy, SheetFace::Front));
        if job.pages == 2 {
            pages.push(LogicalPage::card_face(job, copy, SheetFace::Back));
        }
    }
    Ok(())
}

fn trailer_page(job: &Arc<JobDescriptor>, trailer: TrailerPage) -> LogicalPage {
    match trailer {
        TrailerPage::Blank => LogicalPage::blank(job),
        TrailerPage::Barcode => LogicalPage::barcode(job),
        TrailerPage::Logo => LogicalPage::logo(job),
        TrailerPage::LogoBarcode => LogicalPage::logo_barcode(job),
    }
}
