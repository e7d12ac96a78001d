use std::io::Write;

use tabwriter::TabWriter;

use crate::payload::PlotPayload;
use crate::series::Series;

/// Write a tab-aligned summary of named series: point counts, finite value
/// ranges, and the reduction `threshold` would apply.
pub fn report_text(
    series: &[(String, Series)],
    threshold: usize,
    w: &mut dyn Write,
) -> eyre::Result<()> {
    let mut tw = TabWriter::new(w);

    writeln!(tw, "Series\tPoints\tX range\tY range\tAt {} points", threshold)?;

    for (name, s) in series {
        let reduced = s.downsample(threshold)?;
        let ratio = if reduced.is_empty() {
            1.0
        } else {
            s.len() as f64 / reduced.len() as f64
        };
        writeln!(
            tw,
            "{}\t{}\t{}\t{}\t{} ({:.1}x)",
            name,
            s.len(),
            range_str(s.x_range()),
            range_str(s.y_range()),
            reduced.len(),
            ratio,
        )?;
    }

    tw.flush()?;
    Ok(())
}

/// Write a payload as a single JSON document followed by a newline.
pub fn report_json(payload: &PlotPayload, w: &mut dyn Write) -> eyre::Result<()> {
    serde_json::to_writer(&mut *w, payload)?;
    writeln!(w)?;
    Ok(())
}

fn range_str(range: Option<(f64, f64)>) -> String {
    match range {
        Some((lo, hi)) => format!("[{}, {}]", lo, hi),
        None => "-".to_string(),
    }
}
