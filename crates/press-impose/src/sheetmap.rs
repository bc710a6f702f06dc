//! Sheet map allocation
//!
//! Distributes the logical page list into a rows x cols grid of equal-depth
//! sheet stacks. Cell [0][0] is filled first: a cell receives consecutive
//! pages until it holds one page per target sheet, then the cursor advances
//! row-major. After the optional front-sheet prepend and filler padding,
//! every cell must hold exactly the same number of pages, an even number
//! under duplex.

use crate::job::JobDescriptor;
use crate::page::{LogicalPage, PageList};
use crate::types::*;
use log::debug;
use std::sync::Arc;

/// rows x cols matrix of sheet stacks
#[derive(Debug, Clone)]
pub struct SheetMap {
    rows: usize,
    cols: usize,
    duplex: bool,
    depth: usize,
    cells: Vec<Vec<LogicalPage>>,
}

impl SheetMap {
    /// Allocate a page list onto the grid.
    ///
    /// `front_sheet` (a manifest or work-order page) is prepended to cell
    /// [0][0] only; every other cell gets a color separator at the same
    /// depth, so the stacks stay aligned. Under duplex each prepended page
    /// is backed by a cyan separator.
    pub fn allocate(
        pages: PageList,
        rows: usize,
        cols: usize,
        duplex: bool,
        front_sheet: Option<LogicalPage>,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ImposeError::Config(
                "sheet map needs at least one row and column".to_string(),
            ));
        }
        let pages_per_sheet = rows * cols;
        let mut sheets = pages.len().div_ceil(pages_per_sheet);
        if duplex && sheets % 2 == 1 {
            sheets += 1;
        }

        let mut cells: Vec<Vec<LogicalPage>> = vec![Vec::new(); pages_per_sheet];
        let mut cursor = 0;
        for page in pages {
            while cursor < cells.len() && cells[cursor].len() >= sheets {
                cursor += 1;
            }
            let Some(cell) = cells.get_mut(cursor) else {
                return Err(ImposeError::Allocation(format!(
                    "page overflow: {} cells of depth {} exhausted",
                    pages_per_sheet, sheets
                )));
            };
            cell.push(page);
        }

        let mut prefix = 0;
        if let Some(front) = front_sheet {
            prefix = if duplex { 2 } else { 1 };
            for (i, cell) in cells.iter_mut().enumerate() {
                if duplex {
                    cell.insert(0, LogicalPage::cyan());
                }
                let head = if i == 0 {
                    front.clone()
                } else {
                    LogicalPage::separator("", None)
                };
                cell.insert(0, head);
            }
        }

        // pad to the precomputed depth with colored filler
        let depth = sheets + prefix;
        for cell in &mut cells {
            while cell.len() < depth {
                cell.push(LogicalPage::filler());
            }
        }

        let map = Self {
            rows,
            cols,
            duplex,
            depth,
            cells,
        };
        map.verify()?;
        debug!(
            "allocated {}x{} sheet map, depth {} ({} physical sheets)",
            rows,
            cols,
            depth,
            map.physical_sheets()
        );
        Ok(map)
    }

    /// Equal-depth and duplex-parity invariant. A violation is a defect in
    /// the allocator, never a user error.
    fn verify(&self) -> Result<()> {
        for (i, cell) in self.cells.iter().enumerate() {
            if cell.len() != self.depth {
                return Err(ImposeError::Allocation(format!(
                    "cell [{}][{}] holds {} pages, expected {}",
                    i / self.cols,
                    i % self.cols,
                    cell.len(),
                    self.depth
                )));
            }
        }
        if self.duplex && self.depth % 2 != 0 {
            return Err(ImposeError::Allocation(format!(
                "duplex depth {} is odd",
                self.depth
            )));
        }
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn duplex(&self) -> bool {
        self.duplex
    }

    /// Pages stacked on every cell (sheet sides, not physical sheets)
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Physical sheet count; duplex sides share a sheet
    pub fn physical_sheets(&self) -> usize {
        if self.duplex {
            self.depth / 2
        } else {
            self.depth
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> &[LogicalPage] {
        &self.cells[row * self.cols + col]
    }

    /// Unique owning jobs in id order, for the manifest sweep
    pub fn jobs(&self) -> Vec<Arc<JobDescriptor>> {
        let mut jobs: Vec<Arc<JobDescriptor>> = Vec::new();
        for cell in &self.cells {
            for page in cell {
                if let Some(job) = &page.job {
                    if !jobs.iter().any(|j| j.order_item_id == job.order_item_id) {
                        jobs.push(Arc::clone(job));
                    }
                }
            }
        }
        jobs.sort_by_key(|j| j.order_item_id);
        jobs
    }
}
