use serde_json::Value;

const BAR_WIDTH: u32 = 40;

/// Horizontal bar chart of percentage weights, one line per row.
///
/// Bars are scaled so that 100% fills [`BAR_WIDTH`] cells.
pub fn render_bar_chart(rows: &[(String, u32)]) -> String {
    let label_width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for (label, weight) in rows {
        let cells = ((*weight).min(100) * BAR_WIDTH / 100) as usize;
        out.push_str(&format!(
            "{:<width$}  {:<bar$} {:>3}%\n",
            label,
            "█".repeat(cells),
            weight,
            width = label_width,
            bar = BAR_WIDTH as usize,
        ));
    }
    out
}

/// Chart rows from serialized composition entries.
pub fn composition_rows(entries: &[Value]) -> Vec<(String, u32)> {
    entries
        .iter()
        .filter_map(|entry| {
            let label = entry.get("asset_class")?.as_str()?;
            let weight = entry.get("weight")?.as_u64()?;
            Some((label.to_string(), u32::try_from(weight).unwrap_or(u32::MAX)))
        })
        .collect()
}
