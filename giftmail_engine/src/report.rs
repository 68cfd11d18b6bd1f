//! Fixed-width table of delivery results.
//!
//! Formatting only; the distributor has already done all the work by the time
//! results get here.

use std::fmt::{self, Write};

use log::info;

use crate::distributor::GiftResult;

/// Widths of the From, To, Gift, Reaction and Pts columns.
pub const COLUMN_WIDTHS: [usize; 5] = [12, 12, 20, 14, 5];

const HEADERS: [&str; 5] = ["From", "To", "Gift", "Reaction", "Pts"];
const TITLE: &str = "Gift shipment results:";

/// Writes the results table into `out`.
///
/// # Errors
/// - only if the writer itself fails
pub fn render<W: Write>(results: &[GiftResult], out: &mut W) -> fmt::Result {
    writeln!(out, "{TITLE}")?;
    write_border(out)?;
    write_row(out, &HEADERS.map(str::to_string), false)?;
    write_border(out)?;
    for result in results {
        let cells = [
            result.from.clone(),
            result.to.clone(),
            result.gift.tagged_name(),
            result.outcome.to_string(),
            result.points.to_string(),
        ];
        write_row(out, &cells, true)?;
    }
    write_border(out)
}

/// Renders the results table to a string.
pub fn render_to_string(results: &[GiftResult]) -> String {
    let mut out = String::new();
    // writing into a String can't fail
    let _ = render(results, &mut out);
    out
}

/// Sends the results table to the log at info level.
pub fn log_report(results: &[GiftResult]) {
    info!("{}", render_to_string(results));
}

fn write_border<W: Write>(out: &mut W) -> fmt::Result {
    out.write_char('+')?;
    for width in COLUMN_WIDTHS {
        out.write_str(&"-".repeat(width + 2))?;
        out.write_char('+')?;
    }
    out.write_char('\n')
}

/// Writes one row. In body rows the last (points) column is right aligned.
fn write_row<W: Write>(out: &mut W, cells: &[String; 5], numeric_last: bool) -> fmt::Result {
    out.write_char('|')?;
    for (idx, (cell, width)) in cells.iter().zip(COLUMN_WIDTHS).enumerate() {
        let text = fit(cell, width);
        if numeric_last && idx == COLUMN_WIDTHS.len() - 1 {
            write!(out, " {text:>width$} |")?;
        } else {
            write!(out, " {text:<width$} |")?;
        }
    }
    out.write_char('\n')
}

/// Truncates a cell to the column width, counting chars rather than bytes.
fn fit(cell: &str, width: usize) -> String {
    cell.chars().take(width).collect()
}
