//! Markdown tables for pull request comments
//!
//! The summary table marks increases with ❌ and decreases with ✅; the full
//! report sits in a collapsible `<details>` block.

use super::{metric_columns, MetricRow};
use crate::diff::{summarize, summarize_contracts, DiffCell, DiffCircuit, DiffContract};
use crate::diff::{Significance, SummaryQuantile, Trend};
use crate::fmt::{format_count, format_delta, format_percentage, TextAlign};

const NO_CHANGES: &str = "### There are no changes in circuit sizes";
const CELL_BREAK: &str = "<br />";

/// Everything the Markdown report needs beyond the diffs themselves
#[derive(Debug, Clone, Copy)]
pub struct MarkdownContext<'a> {
    /// Title line placed at the top of the report
    pub header: &'a str,
    /// GitHub `owner/name` used for commit links
    pub repository: Option<&'a str>,
    /// Commit the current report was generated at
    pub commit_hash: Option<&'a str>,
    /// Commit of the reference report, when known
    pub ref_commit_hash: Option<&'a str>,
    /// Summary quantile
    pub quantile: SummaryQuantile,
}

fn commit_link(repository: Option<&str>, commit: &str) -> String {
    match repository {
        Some(repository) => format!(
            "[{}](https://github.com/{}/commit/{})",
            commit, repository, commit
        ),
        None => format!("`{}`", commit),
    }
}

/// Line stating which commits were compared
///
/// # Examples
///
/// ```
/// use gates_diff::render::markdown::commit_info;
///
/// assert_eq!(
///     commit_info(Some("noir-lang/noir"), Some("abc"), None),
///     "Generated at commit: [abc](https://github.com/noir-lang/noir/commit/abc)"
/// );
/// assert_eq!(
///     commit_info(None, Some("abc"), Some("def")),
///     "Generated at commit: `abc`, compared to commit: `def`"
/// );
/// ```
pub fn commit_info(
    repository: Option<&str>,
    commit_hash: Option<&str>,
    ref_commit_hash: Option<&str>,
) -> String {
    let mut info = match commit_hash {
        Some(commit) => format!("Generated at commit: {}", commit_link(repository, commit)),
        None => "Generated at an unknown commit".to_string(),
    };

    if let Some(reference) = ref_commit_hash {
        info.push_str(&format!(
            ", compared to commit: {}",
            commit_link(repository, reference)
        ));
    }
    info
}

struct Column {
    title: &'static str,
    align: TextAlign,
}

fn left(title: &'static str) -> Column {
    Column {
        title,
        align: TextAlign::Left,
    }
}

fn right(title: &'static str) -> Column {
    Column {
        title,
        align: TextAlign::Right,
    }
}

/// Metric columns each followed by a `%` column
fn metric_headers<'a>(headers: &'a [&'static str]) -> impl Iterator<Item = Column> + 'a {
    headers.iter().flat_map(|&h| [right(h), right("%")])
}

fn table_line(cells: impl Iterator<Item = String>, separator: &str) -> String {
    std::iter::once(String::new())
        .chain(cells)
        .chain(std::iter::once(String::new()))
        .collect::<Vec<_>>()
        .join(separator)
        .trim()
        .to_string()
}

fn header_lines(columns: &[Column]) -> [String; 2] {
    [
        table_line(columns.iter().map(|c| c.title.to_string()), " | "),
        table_line(columns.iter().map(|c| c.align.pattern().to_string()), "|"),
    ]
}

fn percentage_cell(cells: &[DiffCell]) -> String {
    cells
        .iter()
        .map(|cell| format!("**{}**", format_percentage(cell.percentage)))
        .collect::<Vec<_>>()
        .join(CELL_BREAK)
}

fn marker(trend: Trend) -> &'static str {
    match trend {
        Trend::Increase => "❌",
        Trend::Decrease => "✅",
        Trend::Unchanged => "➖",
    }
}

/// `±delta ❌` and `**±percentage%**` cells, stacked with `<br />`
fn summary_cells(cells: &[DiffCell]) -> [String; 2] {
    [
        cells
            .iter()
            .map(|cell| format!("{} {}", format_delta(cell.delta), marker(cell.trend())))
            .collect::<Vec<_>>()
            .join(CELL_BREAK),
        percentage_cell(cells),
    ]
}

/// `current&nbsp;(±delta)` and `**±percentage%**` cells, stacked with `<br />`
fn full_cells(cells: &[DiffCell]) -> [String; 2] {
    [
        cells
            .iter()
            .map(|cell| {
                format!(
                    "{}&nbsp;({})",
                    format_count(cell.current),
                    format_delta(cell.delta)
                )
            })
            .collect::<Vec<_>>()
            .join(CELL_BREAK),
        percentage_cell(cells),
    ]
}

type CellFormat = fn(&[DiffCell]) -> [String; 2];

fn program_row<T: MetricRow>(diff: &T, cells: CellFormat) -> String {
    let labels = std::iter::once(format!("**{}**", diff.label()));
    let metrics = metric_columns(std::iter::once(diff));

    table_line(
        labels.chain(metrics.iter().flat_map(|column| cells(column))),
        " | ",
    )
}

fn contract_row(diff: &DiffContract, cells: CellFormat) -> String {
    let methods = diff
        .functions
        .iter()
        .map(|f| format!("_{}_", f.name))
        .collect::<Vec<_>>()
        .join(CELL_BREAK);
    let labels = [format!("**{}**", diff.name), methods];
    let metrics = metric_columns::<DiffCircuit, _>(&diff.functions);

    table_line(
        labels
            .into_iter()
            .chain(metrics.iter().flat_map(|column| cells(column))),
        " | ",
    )
}

fn document(
    context: &MarkdownContext<'_>,
    columns: &[Column],
    summary_rows: Vec<String>,
    full_rows: Vec<String>,
) -> String {
    let mut lines = vec![
        context.header.to_string(),
        String::new(),
        commit_info(
            context.repository,
            context.commit_hash,
            context.ref_commit_hash,
        ),
    ];

    if full_rows.is_empty() {
        lines.extend([String::new(), NO_CHANGES.to_string()]);
        return lines.join("\n").trim().to_string();
    }

    let [header, separator] = header_lines(columns);

    lines.extend([
        String::new(),
        format!(
            "### 🧾 Summary ({}% most significant diffs)",
            context.quantile.significant_percent()
        ),
        String::new(),
        header.clone(),
        separator.clone(),
    ]);
    lines.extend(summary_rows);
    lines.extend(
        [
            "---",
            "",
            "<details>",
            "<summary><strong>Full diff report</strong> 👇</summary>",
            "<br />",
            "",
        ]
        .map(String::from),
    );
    lines.extend([header, separator]);
    lines.extend(full_rows);
    lines.extend(["</details>".to_string(), String::new()]);

    lines.join("\n").trim().to_string()
}

/// Render program diffs (circuit or Brillig) as a Markdown report
pub fn render_programs<T: MetricRow + Significance>(
    diffs: &[T],
    context: &MarkdownContext<'_>,
) -> String {
    let columns: Vec<Column> = std::iter::once(left("Program"))
        .chain(metric_headers(T::HEADERS))
        .collect();

    let view = summarize(diffs, context.quantile);
    let summary_rows = view
        .summary
        .iter()
        .map(|diff| program_row(*diff, summary_cells))
        .collect();
    let full_rows = view
        .full
        .iter()
        .map(|diff| program_row(diff, full_cells))
        .collect();

    document(context, &columns, summary_rows, full_rows)
}

/// Render contract diffs as a Markdown report, one row per contract
pub fn render_contracts(diffs: &[DiffContract], context: &MarkdownContext<'_>) -> String {
    let columns: Vec<Column> = [left("Contract"), left("Method")]
        .into_iter()
        .chain(metric_headers(DiffCircuit::HEADERS))
        .collect();

    let summary_rows = summarize_contracts(diffs, context.quantile)
        .iter()
        .map(|diff| contract_row(diff, summary_cells))
        .collect();
    let full_rows = diffs
        .iter()
        .map(|diff| contract_row(diff, full_cells))
        .collect();

    document(context, &columns, summary_rows, full_rows)
}
