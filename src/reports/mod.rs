use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::path::{Path, PathBuf};
use textgram::api::ModeReport;
use textgram::report::LoadedReport;

pub fn print_run_summary(reports: &[ModeReport], paths: &[PathBuf]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Mode").add_attribute(Attribute::Bold),
        Cell::new("N"),
        Cell::new("Rows").fg(Color::Cyan),
        Cell::new("Top"),
        Cell::new("Count").fg(Color::Green),
        Cell::new("Output"),
    ]);

    for i in 1..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (report, path) in reports.iter().zip(paths) {
        let (top_key, top_count) = report
            .rows
            .first()
            .map(|r| (r.key.clone(), r.count.to_string()))
            .unwrap_or_else(|| ("-".to_string(), "-".to_string()));

        table.add_row(vec![
            Cell::new(report.mode.to_string()).add_attribute(Attribute::Bold),
            Cell::new(report.n.map(|n| n.to_string()).unwrap_or_else(|| "-".into())),
            Cell::new(report.rows.len()).fg(Color::Cyan),
            Cell::new(top_key),
            Cell::new(top_count).fg(Color::Green),
            Cell::new(path.display()),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_report(path: &Path, report: &LoadedReport, top: usize) {
    println!(
        "\n📊 {} ({} rows, showing {})",
        path.display(),
        report.rows.len(),
        top.min(report.rows.len())
    );

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#"),
        Cell::new(&report.key_column).add_attribute(Attribute::Bold),
        Cell::new("Count").fg(Color::Cyan),
        Cell::new("Share"),
        Cell::new("Common Words"),
    ]);

    for i in [0, 2, 3] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let total: u64 = report.rows.iter().map(|r| r.count).sum();
    let denom = if total > 0 { total as f64 } else { 1.0 };

    for (rank, row) in report.rows.iter().take(top).enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&row.key).add_attribute(Attribute::Bold),
            Cell::new(row.count).fg(Color::Cyan),
            Cell::new(format!("{:.2}%", row.count as f64 / denom * 100.0)),
            Cell::new(&row.sample),
        ]);
    }
    println!("{}", table);
}
