//! Imposition orchestration
//!
//! Ties the stages together: page list construction, sheet map allocation,
//! and placement planning. Each run is synchronous start-to-finish and owns
//! its data exclusively; independent runs may execute in parallel. Any
//! error aborts the whole run - callers never receive partial output.

use crate::builder::build_page_list;
use crate::job::JobDescriptor;
use crate::metadata::ProductMetadata;
use crate::placement::{self, SheetPlan};
use crate::policy::{PageParity, trailing_pages};
use crate::render::TextMetrics;
use crate::sheetmap::SheetMap;
use crate::source::SourceResolver;
use crate::types::*;
use log::info;
use std::sync::Arc;

/// Result of the build stage: the allocated sheet map plus everything the
/// caller needs before rendering.
#[derive(Debug, Clone)]
pub struct ImpositionPlan {
    pub jobs: Vec<Arc<JobDescriptor>>,
    pub sheet_map: SheetMap,
    /// Jobs whose work-order PDFs must exist before rendering
    pub work_orders: Vec<Arc<JobDescriptor>>,
    /// Physical press sheets; reported back for filename templating
    pub sheet_count: usize,
    pub manifest_title: Option<String>,
    pub mail_merge: Vec<String>,
}

impl ImpositionPlan {
    /// Run the placement engine over this plan
    pub fn plan_sheets(
        &self,
        metadata: &ProductMetadata,
        resolver: &mut dyn SourceResolver,
        metrics: &dyn TextMetrics,
    ) -> Result<Vec<SheetPlan>> {
        placement::plan_sheets(
            &self.sheet_map,
            metadata,
            resolver,
            metrics,
            self.manifest_title.as_deref(),
            &self.mail_merge,
        )
    }
}

/// Build the page list and sheet map for a set of jobs.
///
/// Pure layout: no source documents are consulted, so this also serves
/// sheet-count queries for batch planning.
pub fn build(jobs: Vec<JobDescriptor>, metadata: &ProductMetadata) -> Result<ImpositionPlan> {
    metadata.validate()?;
    if jobs.is_empty() {
        return Err(ImposeError::NoPages);
    }
    let jobs: Vec<Arc<JobDescriptor>> = jobs.into_iter().map(Arc::new).collect();
    let manifest_title = jobs[0].manifest_title.clone();
    let mail_merge = jobs[0].mail_merge.clone().unwrap_or_default();

    let built = build_page_list(&jobs, metadata)?;
    let sheet_map = SheetMap::allocate(
        built.pages,
        metadata.rows,
        metadata.cols,
        metadata.duplex(),
        built.front_sheet,
    )?;
    let sheet_count = sheet_map.physical_sheets();
    info!(
        "imposed {} job(s) onto {} press sheet(s)",
        jobs.len(),
        sheet_count
    );
    Ok(ImpositionPlan {
        jobs,
        sheet_map,
        work_orders: built.work_orders,
        sheet_count,
        manifest_title,
        mail_merge,
    })
}

/// Build and place a run off the async executor.
///
/// The whole pipeline runs on a blocking worker; the caller keeps ownership
/// of the returned plan and sheet plans and drives its renderer session
/// with them.
pub async fn impose<R, M>(
    jobs: Vec<JobDescriptor>,
    metadata: ProductMetadata,
    mut resolver: R,
    metrics: M,
) -> Result<(ImpositionPlan, Vec<SheetPlan>)>
where
    R: SourceResolver + Send + 'static,
    M: TextMetrics + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let plan = build(jobs, &metadata)?;
        let sheets = plan.plan_sheets(&metadata, &mut resolver, &metrics)?;
        Ok((plan, sheets))
    })
    .await?
}

/// Physical press sheets a set of jobs would occupy
pub fn press_sheet_count(jobs: Vec<JobDescriptor>, metadata: &ProductMetadata) -> Result<usize> {
    Ok(build(jobs, metadata)?.sheet_count)
}

/// Does this job's trailer include a separate barcode page?
pub fn has_barcode_page(job: &JobDescriptor, metadata: &ProductMetadata) -> bool {
    let pseudo_simplex = job.pseudo_simplex(metadata);
    trailing_pages(&job.code, pseudo_simplex, PageParity::of(job.pages)).len() == 2
}
