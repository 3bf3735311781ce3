//! Plain ASCII table rendering for the `all` command.

/// Renders `rows` under `header` as a bordered table with centered
/// cells, headers uppercased. Lines are joined with `\n` and carry no
/// trailing newline. Cells missing from a row render empty.
pub fn render(header: &[&str], rows: &[Vec<String>]) -> String {
    let columns = header.len();
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().take(columns).enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut border = String::from("+");
    for w in &widths {
        border.push_str(&"-".repeat(w + 2));
        border.push('+');
    }

    let header_cells: Vec<String> = header.iter().map(|h| h.to_uppercase()).collect();

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(border.clone());
    lines.push(format_row(&header_cells, &widths));
    lines.push(border.clone());
    for row in rows {
        lines.push(format_row(row, &widths));
    }
    if !rows.is_empty() {
        lines.push(border);
    }
    lines.join("\n")
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (i, w) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        line.push(' ');
        line.push_str(&center(cell, *w));
        line.push_str(" |");
    }
    line
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_owned();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}
