//! Report rendering for the console and for pull request comments
//!
//! Both renderers produce a summary table of the most significant diffs
//! followed by the full diff table. [`ReportKind`] decides whether program
//! diffs are shown as circuit (ACIR) or Brillig tables.

pub mod markdown;
pub mod shell;

pub use markdown::MarkdownContext;

use crate::diff::{DiffBrillig, DiffCell, DiffCircuit, SummaryQuantile, WorkspaceDiff};
use crate::report::WorkspaceReport;
use serde::Serialize;

/// Which program metrics a report is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Constrained circuits: ACIR opcodes and circuit size
    Circuit,
    /// Workspaces compiled entirely to Brillig: unconstrained opcodes
    Brillig,
}

impl ReportKind {
    /// Detect the report kind from the reference snapshot
    ///
    /// A workspace compiled with forced Brillig reports a single unconstrained
    /// `main` for its programs; the first program decides.
    ///
    /// # Examples
    ///
    /// ```
    /// use gates_diff::render::ReportKind;
    /// use gates_diff::report::WorkspaceReport;
    ///
    /// assert_eq!(ReportKind::detect(&WorkspaceReport::default()), ReportKind::Circuit);
    /// ```
    pub fn detect(reference: &WorkspaceReport) -> Self {
        match reference.programs.first() {
            Some(program)
                if program.unconstrained_functions.len() == 1
                    && program.unconstrained_functions[0].name == "main" =>
            {
                ReportKind::Brillig
            }
            _ => ReportKind::Circuit,
        }
    }
}

/// A diff record rendered as one table row
pub trait MetricRow {
    /// Column titles of the metrics, in [`MetricRow::cells`] order
    const HEADERS: &'static [&'static str];

    /// Row label
    fn label(&self) -> &str;

    /// Metric cells, one per header
    fn cells(&self) -> Vec<DiffCell>;
}

impl MetricRow for DiffCircuit {
    const HEADERS: &'static [&'static str] = &["ACIR opcodes (+/-)", "Circuit size (+/-)"];

    fn label(&self) -> &str {
        &self.name
    }

    fn cells(&self) -> Vec<DiffCell> {
        vec![self.opcodes, self.circuit_size]
    }
}

impl MetricRow for DiffBrillig {
    const HEADERS: &'static [&'static str] = &["Brillig opcodes (+/-)"];

    fn label(&self) -> &str {
        &self.name
    }

    fn cells(&self) -> Vec<DiffCell> {
        vec![self.opcodes]
    }
}

/// Cells grouped by metric across several rows
///
/// Element `i` holds the `i`-th metric of every row, in row order.
pub(crate) fn metric_columns<'a, T, I>(rows: I) -> Vec<Vec<DiffCell>>
where
    T: MetricRow + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut columns = vec![Vec::new(); T::HEADERS.len()];
    for row in rows {
        for (column, cell) in columns.iter_mut().zip(row.cells()) {
            column.push(cell);
        }
    }
    columns
}

/// Console and Markdown renderings of one workspace diff
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReport {
    /// Kind of program metrics shown
    pub kind: ReportKind,
    /// Console rendering
    pub shell: String,
    /// Markdown rendering
    pub markdown: String,
    /// Number of rows in the full report
    pub rows: usize,
}

/// Render a workspace diff for the console and as Markdown
///
/// `contracts` selects the contract tables instead of the program tables.
pub fn render_workspace(
    diff: &WorkspaceDiff,
    kind: ReportKind,
    context: &MarkdownContext<'_>,
    contracts: bool,
) -> RenderedReport {
    let quantile: SummaryQuantile = context.quantile;

    let (shell, markdown, rows) = if contracts {
        (
            shell::render_contracts(&diff.contracts, quantile),
            markdown::render_contracts(&diff.contracts, context),
            diff.contracts.len(),
        )
    } else {
        match kind {
            ReportKind::Circuit => (
                shell::render_programs(&diff.programs, quantile),
                markdown::render_programs(&diff.programs, context),
                diff.programs.len(),
            ),
            ReportKind::Brillig => (
                shell::render_programs(&diff.unconstrained_functions, quantile),
                markdown::render_programs(&diff.unconstrained_functions, context),
                diff.unconstrained_functions.len(),
            ),
        }
    };

    RenderedReport {
        kind,
        shell,
        markdown,
        rows,
    }
}
