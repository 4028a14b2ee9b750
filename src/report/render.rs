//! Text renderings of a result table.

use crate::record::SolveRecord;

/// Renders records as comma-delimited text: the mode's fixed header, then
/// one row per record, each line terminated by `\n`.
///
/// ```
/// use std::time::Duration;
/// use u_knapsack::record::ExactResult;
/// use u_knapsack::report::render_csv;
///
/// let r = ExactResult {
///     problem_number: 1,
///     first_solution_time: None,
///     all_solutions_time: Duration::from_millis(2),
///     solutions_count: 0,
/// };
/// assert_eq!(
///     render_csv(&[r]),
///     "Problem Number,First Solution Time (s),All Solutions Time (s),Number of Solutions\n\
///      1,N/A,0.002000,0\n"
/// );
/// ```
pub fn render_csv<T: SolveRecord>(records: &[T]) -> String {
    let mut out = String::with_capacity(T::CSV_HEADER.len() + 1 + records.len() * 48);
    out.push_str(T::CSV_HEADER);
    out.push('\n');
    for r in records {
        out.push_str(&r.csv_row());
        out.push('\n');
    }
    out
}

/// Renders records as a right-aligned fixed-width table for the console.
pub fn render_table<T: SolveRecord>(records: &[T]) -> String {
    let header: Vec<&str> = T::CSV_HEADER.split(',').collect();
    let rows: Vec<String> = records.iter().map(T::csv_row).collect();
    let cells: Vec<Vec<&str>> = rows.iter().map(|r| r.split(',').collect()).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    push_row(&mut out, &rule, &widths);
    for row in &cells {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[&str], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:>w$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
