//! Placement engine
//!
//! Walks an allocated sheet map and computes, for every (row, col, depth)
//! slot, the on-sheet transform and the auxiliary marks to hand to the
//! renderer. Sheets are emitted depth-outermost: every slot of physical
//! sheet k precedes sheet k+1.

mod geometry;
mod identifier;
mod marks;
mod types;

pub use geometry::POCKETBOOK_OVERLAY;
pub use types::*;

use crate::metadata::ProductMetadata;
use crate::page::PageKind;
use crate::render::TextMetrics;
use crate::sheetmap::SheetMap;
use crate::source::SourceResolver;
use crate::types::*;
use geometry::{SheetGeometry, choose_fit, choose_rotation};
use log::{debug, info};

/// Compute placement instructions for every sheet side of a run.
///
/// `manifest_title` and `mail_merge` come from the run's first job; the
/// merge codes are consumed one per placed slot until exhausted. Any source
/// reference that cannot be resolved aborts the run - no partial plan is
/// returned.
pub fn plan_sheets(
    map: &SheetMap,
    metadata: &ProductMetadata,
    resolver: &mut dyn SourceResolver,
    metrics: &dyn TextMetrics,
    manifest_title: Option<&str>,
    mail_merge: &[String],
) -> Result<Vec<SheetPlan>> {
    metadata.validate()?;
    let geometry = SheetGeometry::new(metadata);
    let duplex = metadata.duplex();
    let depth = map.depth();
    let mut merge_codes = mail_merge.iter();
    let mut plans = Vec::with_capacity(depth);

    for sheet in 0..depth {
        let is_back = duplex && sheet % 2 == 1;
        let flipped = is_back && !metadata.no_flip;
        let mut slots: Vec<PlacementInstruction> = Vec::new();
        let mut crops: Vec<CropMark> = Vec::new();
        let mut chart_drawn = metadata.no_chart;

        for row in 0..map.rows() {
            for col in 0..map.cols() {
                let Some(page) = map.cell(row, col).get(sheet) else {
                    continue;
                };
                let content_orientation = page
                    .job
                    .as_ref()
                    .and_then(|job| job.orientation)
                    .map(ContentOrientation::orientation)
                    .unwrap_or_else(|| metadata.content_orientation());

                // calendars keep their trailing logo page unflipped
                let unflip = metadata.no_flip_last && page.kind.has_logo_mark() && flipped;
                let (x, y) = geometry.origin(row, col, flipped && !unflip);
                let width = geometry.page_width;
                let height = geometry.page_height;

                let mut content = None;
                if let Some(source) = &page.source {
                    let (source_width, source_height) =
                        resolver.page_dimensions(source).map_err(|e| {
                            ImposeError::Content {
                                job: page.job.as_ref().map_or(0, |j| j.order_item_id),
                                reason: format!(
                                    "unresolved source {}:{}: {}",
                                    source.path.display(),
                                    source.page,
                                    e
                                ),
                            }
                        })?;
                    let mut fit = choose_fit(metadata, source_width, source_height, &geometry);
                    fit.orientate = choose_rotation(
                        metadata,
                        content_orientation,
                        source_width > source_height,
                        is_back,
                        col,
                    );
                    content = Some(fit);
                }

                let mut directives: Vec<Directive> = Vec::new();
                if !chart_drawn && !page.kind.is_cyan() {
                    directives.push(marks::chart_mark(metadata, sheet, depth));
                    chart_drawn = true;
                }

                if let PageKind::Separator { label } = &page.kind {
                    directives.extend(marks::separator_marks(
                        label, metadata, metrics, x, y, width, height, row, col,
                    ));
                }

                if !page.kind.crop_exempt() {
                    if !metadata.no_crops {
                        crops.push(CropMark::around(x, y, width, height, &metadata.crop));
                    }
                    if let Some((off_x, off_y)) = metadata.pre_trim_crops {
                        crops.push(CropMark::around(
                            x - off_x,
                            y - off_y,
                            width + 2.0 * off_x,
                            height + 2.0 * off_y,
                            &metadata.crop,
                        ));
                    }
                }

                if let Some(job) = &page.job {
                    if page.kind.has_barcode_mark() {
                        directives.push(marks::barcode_page_mark(
                            job,
                            metadata,
                            content_orientation,
                            x,
                            y,
                            width,
                        ));
                    }
                }
                if page.kind.has_logo_mark() {
                    directives.push(marks::logo_page_mark(
                        metadata,
                        content_orientation,
                        x,
                        y,
                        width,
                        height,
                    ));
                }

                if let (Some(site), Some(job)) = (&metadata.barcode, &page.job) {
                    match site.face {
                        SheetFace::Front if page.kind.is_front_face() => {
                            directives.push(marks::product_barcode_front(
                                site,
                                job,
                                metadata,
                                content_orientation,
                                x,
                                y,
                                width,
                                height,
                            ));
                        }
                        SheetFace::Back if page.kind.is_back_face() => {
                            directives.extend(marks::product_barcode_back(
                                site,
                                job,
                                metadata,
                                content_orientation,
                                x,
                                y,
                                width,
                                height,
                                col,
                            ));
                        }
                        _ => {}
                    }
                }

                if let Some(code) = merge_codes.next() {
                    directives.push(marks::mail_merge_mark(code, x, y, width, height));
                }

                if let Some(logo) = metadata.logo {
                    if logo.front && page.kind.is_front_face() {
                        directives.push(marks::greeting_front_logo(
                            metadata,
                            content_orientation,
                            x,
                            y,
                            width,
                            height,
                        ));
                    }
                    if logo.back && page.kind.back_logo_eligible() {
                        directives.push(marks::postcard_back_logo(
                            metadata,
                            content_orientation,
                            x,
                            y,
                            width,
                            height,
                        ));
                    }
                }

                if page.kind.is_manifest() {
                    directives.extend(marks::manifest_marks(
                        map,
                        metrics,
                        x,
                        y,
                        width,
                        height,
                        manifest_title,
                    ));
                } else if page.kind.is_cyan() {
                    directives.push(marks::cyan_mark(metadata, x, y, width, height));
                }

                if !page.kind.identifier_exempt() {
                    if let Some(mark) = identifier::identifier_mark(
                        page, metadata, metrics, x, y, width, height, is_back, col,
                    ) {
                        directives.push(mark);
                    }
                }

                slots.push(PlacementInstruction {
                    row,
                    col,
                    page: page.clone(),
                    x,
                    y,
                    content,
                    unflip,
                    marks: directives,
                });
            }
        }

        debug!(
            "planned sheet {} ({:?}): {} slots, {} crop sets",
            sheet,
            if is_back { SheetFace::Back } else { SheetFace::Front },
            slots.len(),
            crops.len()
        );
        plans.push(SheetPlan {
            index: sheet,
            side: if is_back {
                SheetFace::Back
            } else {
                SheetFace::Front
            },
            flipped,
            width: geometry.sheet_width,
            height: geometry.sheet_height,
            slots,
            crops,
        });
    }

    info!(
        "placement complete: {} sheet sides ({} physical sheets)",
        plans.len(),
        map.physical_sheets()
    );
    Ok(plans)
}
