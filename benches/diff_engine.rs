//! Diff Engine Benchmarks
//!
//! **Purpose:** Measure diffing and rendering of large workspace reports
//!
//! **How to Run:**
//! ```bash
//! cargo bench --bench diff_engine
//! ```
//!
//! **What's Being Measured:**
//! 1. `compute workspace diff` - Name matching, cell arithmetic and sorting
//! 2. `summarize` - Quantile threshold over the circuit diffs
//! 3. `render workspace` - Shell and Markdown tables
//!
//! **Performance Notes:**
//! - Matching builds one name index per side, so it stays linear in the
//!   number of programs
//! - Rendering dominates for reports with thousands of rows

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gates_diff::diff::{compute_workspace_diff, summarize, SummaryQuantile};
use gates_diff::render::{render_workspace, MarkdownContext, ReportKind};
use gates_diff::report::{CircuitReport, ContractReport, ProgramReport, WorkspaceReport};
use std::hint::black_box;

fn workspace(size: usize, scale: u64) -> WorkspaceReport {
    let programs = (0..size)
        .map(|i| ProgramReport {
            package_name: format!("program_{i}"),
            functions: vec![CircuitReport {
                name: "main".to_string(),
                opcodes: (i as u64 + 1) * scale,
                circuit_size: (i as u64 + 1) * scale * 7,
            }],
            unconstrained_functions: vec![],
        })
        .collect();

    let contracts = (0..size / 10)
        .map(|i| ContractReport {
            name: format!("Contract{i}"),
            functions: (0..5)
                .map(|f| CircuitReport {
                    name: format!("method_{f}"),
                    opcodes: (f + 1) * scale,
                    circuit_size: (i as u64 + f + 1) * scale,
                })
                .collect(),
        })
        .collect();

    WorkspaceReport {
        programs,
        contracts,
    }
}

fn bench_compute_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute workspace diff");
    for size in [10, 100, 1000] {
        let reference = workspace(size, 10);
        let current = workspace(size, 11);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| compute_workspace_diff(black_box(&reference), black_box(&current)))
        });
    }
    group.finish();
}

fn bench_summarize(c: &mut Criterion) {
    let diff = compute_workspace_diff(&workspace(1000, 10), &workspace(1000, 13));
    c.bench_function("summarize", |b| {
        b.iter(|| summarize(black_box(&diff.programs), SummaryQuantile::default()).summary.len())
    });
}

fn bench_render(c: &mut Criterion) {
    let diff = compute_workspace_diff(&workspace(500, 10), &workspace(500, 12));
    let context = MarkdownContext {
        header: "# Changes to circuit sizes",
        repository: Some("owner/repo"),
        commit_hash: Some("abc"),
        ref_commit_hash: Some("def"),
        quantile: SummaryQuantile::default(),
    };

    c.bench_function("render workspace", |b| {
        b.iter(|| render_workspace(black_box(&diff), ReportKind::Circuit, &context, false))
    });
}

criterion_group!(benches, bench_compute_diff, bench_summarize, bench_render);
criterion_main!(benches);
