//! Fixed-width console tables
//!
//! Increases are red, decreases green. Styling is dropped automatically when
//! stdout is not a terminal.

use super::MetricRow;
use crate::diff::{summarize, summarize_contracts, DiffCell, DiffContract, Significance};
use crate::diff::{SummaryQuantile, Trend};
use crate::fmt::{center, format_count, format_delta, format_percentage, parenthesized};
use crate::fmt::{POINT_DOWN, RECEIPT};
use console::{style, StyledObject};

const NAME_MIN_WIDTH: usize = 8;
const METHOD_MIN_WIDTH: usize = 7;
const METRIC_WIDTH: usize = 33;
const VALUE_WIDTH: usize = 10;
const PERCENT_WIDTH: usize = 9;

struct Column {
    title: &'static str,
    width: usize,
}

impl Column {
    fn new(title: &'static str, width: usize) -> Self {
        Self { title, width }
    }
}

fn header_line(columns: &[Column]) -> String {
    let titles = columns
        .iter()
        .map(|c| style(center(c.title, c.width)).bold().to_string());

    table_line(titles, " | ")
}

fn separator_line(columns: &[Column]) -> String {
    let dashes = columns.iter().map(|c| "-".repeat(c.width + 2));

    table_line(dashes, "|")
}

/// Join cells with an empty leading and trailing cell, then trim
fn table_line(cells: impl Iterator<Item = String>, separator: &str) -> String {
    std::iter::once(String::new())
        .chain(cells)
        .chain(std::iter::once(String::new()))
        .collect::<Vec<_>>()
        .join(separator)
        .trim()
        .to_string()
}

fn paint(text: String, trend: Trend) -> StyledObject<String> {
    match trend {
        Trend::Increase => style(text).red(),
        Trend::Decrease => style(text).green(),
        Trend::Unchanged => style(text),
    }
}

/// `current (±delta)` and `±percentage%` cells
fn metric_cells(cell: &DiffCell) -> [String; 2] {
    let trend = cell.trend();
    let delta = format!(
        "{:<width$}",
        parenthesized(&format_delta(cell.delta)),
        width = VALUE_WIDTH
    );
    let percentage = format!(
        "{:>width$}",
        format_percentage(cell.percentage),
        width = PERCENT_WIDTH
    );

    [
        format!(
            "{:>width$} {}",
            format_count(cell.current),
            paint(delta, trend),
            width = VALUE_WIDTH
        ),
        paint(percentage, trend).bold().to_string(),
    ]
}

fn name_cell(name: &str, width: usize) -> String {
    style(format!("{:<width$}", name, width = width))
        .bold()
        .black()
        .bright()
        .to_string()
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>, min: usize) -> usize {
    names.map(|n| n.chars().count()).fold(min, usize::max)
}

fn program_row<T: MetricRow>(diff: &T, width: usize) -> String {
    let metrics = diff.cells();
    let cells = std::iter::once(name_cell(diff.label(), width))
        .chain(metrics.iter().flat_map(metric_cells));

    table_line(cells, " | ")
}

fn contract_rows(diff: &DiffContract, contract_width: usize, method_width: usize) -> String {
    diff.functions
        .iter()
        .enumerate()
        .map(|(index, function)| {
            let contract = if index == 0 { diff.name.as_str() } else { "" };
            let method = style(format!("{:<width$}", function.name, width = method_width))
                .italic()
                .to_string();

            let metrics = function.cells();
            let cells = [name_cell(contract, contract_width), method]
                .into_iter()
                .chain(metrics.iter().flat_map(metric_cells));
            table_line(cells, " | ")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn table(columns: &[Column], rows: Vec<String>) -> String {
    let header = header_line(columns);
    let separator = format!("\n{}\n", separator_line(columns));

    std::iter::once(String::new())
        .chain(std::iter::once(header))
        .chain(rows)
        .chain(std::iter::once(String::new()))
        .collect::<Vec<_>>()
        .join(&separator)
        .trim()
        .to_string()
}

fn title(text: String) -> String {
    style(text).yellow().bold().underlined().to_string()
}

fn document(
    quantile: SummaryQuantile,
    columns: &[Column],
    summary_rows: Vec<String>,
    full_rows: Vec<String>,
) -> String {
    format!(
        "{}{}{}{}",
        title(format!(
            "{}Summary ({}% most significant diffs)\n\n",
            RECEIPT,
            quantile.significant_percent()
        )),
        table(columns, summary_rows),
        title(format!("\n\nFull diff report{}\n\n", POINT_DOWN)),
        table(columns, full_rows)
    )
}

/// Render program diffs (circuit or Brillig) as summary and full tables
pub fn render_programs<T: MetricRow + Significance>(
    diffs: &[T],
    quantile: SummaryQuantile,
) -> String {
    let width = name_width(diffs.iter().map(MetricRow::label), NAME_MIN_WIDTH);

    let columns: Vec<Column> = std::iter::once(Column::new("Program", width))
        .chain(T::HEADERS.iter().map(|&h| Column::new(h, METRIC_WIDTH)))
        .collect();

    let view = summarize(diffs, quantile);
    let summary_rows = view
        .summary
        .iter()
        .map(|diff| program_row(*diff, width))
        .collect();
    let full_rows = view.full.iter().map(|diff| program_row(diff, width)).collect();

    document(quantile, &columns, summary_rows, full_rows)
}

/// Render contract diffs with one line per changed method
pub fn render_contracts(diffs: &[DiffContract], quantile: SummaryQuantile) -> String {
    let contract_width = name_width(diffs.iter().map(|d| d.name.as_str()), NAME_MIN_WIDTH);
    let method_width = name_width(
        diffs
            .iter()
            .flat_map(|d| d.functions.iter().map(|f| f.name.as_str())),
        METHOD_MIN_WIDTH,
    );

    let columns = [
        Column::new("Contract", contract_width),
        Column::new("Method", method_width),
        Column::new("ACIR opcodes (+/-)", METRIC_WIDTH),
        Column::new("Circuit size (+/-)", METRIC_WIDTH),
    ];

    let summary_rows = summarize_contracts(diffs, quantile)
        .iter()
        .map(|diff| contract_rows(diff, contract_width, method_width))
        .collect();
    let full_rows = diffs
        .iter()
        .map(|diff| contract_rows(diff, contract_width, method_width))
        .collect();

    document(quantile, &columns, summary_rows, full_rows)
}
