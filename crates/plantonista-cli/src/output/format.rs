use serde_json::Value;

const INDENT: &str = "  ";
const COLUMN_GAP: &str = "  ";
const DEFAULT_WIDTH: usize = 120;
const MIN_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

pub fn left(name: &str) -> Column<'_> {
    Column {
        name,
        align: Align::Left,
    }
}

pub fn right(name: &str) -> Column<'_> {
    Column {
        name,
        align: Align::Right,
    }
}

/// Width from `COLUMNS`, never below 40.
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(DEFAULT_WIDTH)
        .max(MIN_WIDTH)
}

/// String field of a JSON object, or `-` when absent or null.
pub fn field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("-")
        .to_string()
}

pub fn rows_at<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| display_width(label))
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{}  {value}", pad(label, label_width, Align::Left)))
        .collect()
}

/// Lays rows out under a header line. When the table is wider than
/// `max_width`, each row becomes a labelled block instead.
pub fn render_table(
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    max_width: usize,
    block_label: &str,
) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let widths = column_widths(columns, rows);
    let table_width = INDENT.len()
        + widths.iter().sum::<usize>()
        + COLUMN_GAP.len() * widths.len().saturating_sub(1);
    if table_width > max_width {
        return render_blocks(columns, rows, block_label);
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    std::iter::once(&header)
        .chain(rows)
        .map(|cells| format_row(columns, cells, &widths))
        .collect()
}

fn column_widths(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_width(cell))
                .fold(display_width(column.name), usize::max)
        })
        .collect()
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (column, width))| {
            let cell = cells.get(index).map(String::as_str).unwrap_or("");
            pad(cell, *width, column.align)
        })
        .collect::<Vec<String>>();
    format!("{INDENT}{}", pieces.join(COLUMN_GAP).trim_end())
}

fn render_blocks(columns: &[Column<'_>], rows: &[Vec<String>], block_label: &str) -> Vec<String> {
    let labels = columns
        .iter()
        .map(|column| format!("{}:", column.name))
        .collect::<Vec<String>>();
    let label_width = labels.iter().map(|label| display_width(label)).max().unwrap_or(0);

    let mut output = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        if row_index > 0 {
            output.push(String::new());
        }
        output.push(format!("{INDENT}{block_label} {}:", row_index + 1));
        for (column_index, label) in labels.iter().enumerate() {
            let value = row.get(column_index).map(String::as_str).unwrap_or("");
            output.push(format!(
                "{INDENT}{INDENT}{}  {value}",
                pad(label, label_width, Align::Left)
            ));
        }
    }
    output
}

/// Hospital and category names often carry accents, so widths count chars.
fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn pad(value: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(value)));
    match align {
        Align::Left => format!("{value}{fill}"),
        Align::Right => format!("{fill}{value}"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{field, key_value_rows, left, render_table, right, rows_at};

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Opening:", "100.00".to_string()),
                ("Closing balance:", "120.00".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Opening:          100.00");
        assert_eq!(rows[1], "  Closing balance:  120.00");
    }

    #[test]
    fn field_and_rows_default_when_missing() {
        let value = json!({"hospital": "Norte", "tag": null, "rows": [{"id": "shf_1"}]});
        assert_eq!(field(&value, "hospital"), "Norte");
        assert_eq!(field(&value, "tag"), "-");
        assert_eq!(rows_at(&value, "rows").len(), 1);
        assert!(rows_at(&value, "lines").is_empty());
    }

    #[test]
    fn amounts_right_align_under_their_header() {
        let rows = vec![
            vec!["Hospital Norte".to_string(), "1500.00".to_string()],
            vec!["UPA".to_string(), "80.00".to_string()],
        ];
        let rendered = render_table(&[left("Hospital"), right("Amount")], &rows, 80, "Shift");
        assert_eq!(
            rendered,
            vec![
                "  Hospital         Amount",
                "  Hospital Norte  1500.00",
                "  UPA               80.00",
            ]
        );
    }

    #[test]
    fn accented_names_keep_columns_aligned() {
        let rows = vec![
            vec!["São Lucas".to_string(), "1.00".to_string()],
            vec!["Sao Lucas".to_string(), "2.00".to_string()],
        ];
        let rendered = render_table(&[left("Hospital"), right("Amount")], &rows, 80, "Shift");
        assert_eq!(rendered[1].chars().count(), rendered[2].chars().count());
    }

    #[test]
    fn wide_table_falls_back_to_blocks() {
        let columns = [left("Date"), right("Amount"), left("Status")];
        let rows = vec![
            vec![
                "2026-03-02".to_string(),
                "1500.00".to_string(),
                "overdue".to_string(),
            ],
            vec![
                "2026-03-09".to_string(),
                "900.00".to_string(),
                "pending".to_string(),
            ],
        ];

        let rendered = render_table(&columns, &rows, 20, "Shift");
        assert_eq!(rendered[0], "  Shift 1:");
        assert_eq!(rendered[1], "    Date:    2026-03-02");
        assert_eq!(rendered[2], "    Amount:  1500.00");
        assert_eq!(rendered[4], "");
        assert_eq!(rendered[5], "  Shift 2:");
    }
}
