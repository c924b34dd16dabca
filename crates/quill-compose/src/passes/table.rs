//! Pipe tables.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

/// How many leading lines of a block may hold the separator row.
const SEPARATOR_SEARCH_LINES: usize = 3;

static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+\-]?[¥$€£]?\d[\d,]*(?:\.\d+)?(?:%|円|[kKmM][bB]?)?$").unwrap()
});

const AFFIRMATIVE_MARKS: &[&str] = &["○", "◯", "◎", "✓", "✔", "✅"];
const NEGATIVE_MARKS: &[&str] = &["×", "✕", "✗", "✘", "❌"];

/// Column alignment from the separator row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Alignment {
    None,
    Left,
    Center,
    Right,
}

impl Alignment {
    fn from_separator(cell: &str) -> Self {
        match (cell.starts_with(':'), cell.ends_with(':')) {
            (true, true) => Self::Center,
            (true, false) => Self::Left,
            (false, true) => Self::Right,
            (false, false) => Self::None,
        }
    }

    fn style(self) -> &'static str {
        match self {
            Self::Left => r#" style="text-align:left""#,
            Self::Center => r#" style="text-align:center""#,
            Self::Right => r#" style="text-align:right""#,
            Self::None => "",
        }
    }
}

/// Presentation class of a body cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CellKind {
    Numeric,
    Affirmative,
    Negative,
    Plain,
}

impl CellKind {
    fn classify(cell: &str) -> Self {
        if NUMERIC_RE.is_match(cell) {
            Self::Numeric
        } else if AFFIRMATIVE_MARKS.contains(&cell) {
            Self::Affirmative
        } else if NEGATIVE_MARKS.contains(&cell) {
            Self::Negative
        } else {
            Self::Plain
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::Numeric => "cell-numeric",
            Self::Affirmative => "cell-yes",
            Self::Negative => "cell-no",
            Self::Plain => "cell-plain",
        }
    }
}

/// Rewrite every valid table block; leave the rest untouched.
pub(super) fn apply(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        if !is_table_line(lines[i]) {
            out.push(lines[i].to_owned());
            i += 1;
            continue;
        }

        let end = lines[i..]
            .iter()
            .position(|l| !is_table_line(l))
            .map_or(lines.len(), |n| i + n);
        let block = &lines[i..end];

        match render(block) {
            Some(html) => out.push(html),
            None => out.extend(block.iter().map(|l| (*l).to_owned())),
        }
        i = end;
    }

    out.join("\n")
}

fn is_table_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

fn split_row(line: &str) -> Vec<&str> {
    let trimmed = line.trim();
    trimmed[1..trimmed.len() - 1].split('|').map(str::trim).collect()
}

fn is_separator(cells: &[&str]) -> bool {
    cells.iter().all(|cell| {
        let inner = cell.trim_start_matches(':').trim_end_matches(':');
        !inner.is_empty() && inner.chars().all(|c| c == '-')
    })
}

/// Render a table block, or `None` if it has no separator row.
fn render(block: &[&str]) -> Option<String> {
    let rows: Vec<Vec<&str>> = block.iter().map(|line| split_row(line)).collect();
    let separator = rows
        .iter()
        .take(SEPARATOR_SEARCH_LINES)
        .position(|row| is_separator(row))?;
    let alignments: Vec<Alignment> = rows[separator]
        .iter()
        .map(|cell| Alignment::from_separator(cell))
        .collect();
    let align = |col: usize| alignments.get(col).copied().unwrap_or(Alignment::None);

    let mut html = String::from(r#"<div class="table-wrap"><table class="table">"#);

    if separator > 0 {
        html.push_str("<thead>");
        for row in &rows[..separator] {
            html.push_str("<tr>");
            for (col, cell) in row.iter().enumerate() {
                let _ = write!(html, "<th{}>{cell}</th>", align(col).style());
            }
            html.push_str("</tr>");
        }
        html.push_str("</thead>");
    }

    html.push_str("<tbody>");
    for row in &rows[separator + 1..] {
        html.push_str("<tr>");
        for (col, cell) in row.iter().enumerate() {
            let kind = CellKind::classify(cell);
            let _ = write!(
                html,
                r#"<td class="{}"{}>{cell}</td>"#,
                kind.class(),
                align(col).style()
            );
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></div>");

    Some(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_simple_table() {
        let out = apply("| A | B |\n|---|---|\n| 1 | x |");
        assert_eq!(
            out,
            r#"<div class="table-wrap"><table class="table"><thead><tr><th>A</th><th>B</th></tr></thead><tbody><tr><td class="cell-numeric">1</td><td class="cell-plain">x</td></tr></tbody></table></div>"#
        );
    }

    #[test]
    fn test_table_without_separator_is_literal() {
        let input = "| not | a table |\n| just | pipes |";
        assert_eq!(apply(input), input);
    }

    #[test]
    fn test_separator_must_be_near_top() {
        let input = "| a |\n| b |\n| c |\n| d |\n|---|";
        assert_eq!(apply(input), input);
    }

    #[test]
    fn test_alignment_from_separator() {
        let out = apply("| L | C | R |\n|:--|:-:|--:|\n| a | b | c |");
        assert!(out.contains(r#"<th style="text-align:left">L</th>"#));
        assert!(out.contains(r#"<th style="text-align:center">C</th>"#));
        assert!(out.contains(r#"<td class="cell-plain" style="text-align:right">c</td>"#));
    }

    #[test]
    fn test_cell_classification() {
        assert_eq!(CellKind::classify("1,200"), CellKind::Numeric);
        assert_eq!(CellKind::classify("-3.5%"), CellKind::Numeric);
        assert_eq!(CellKind::classify("¥980"), CellKind::Numeric);
        assert_eq!(CellKind::classify("○"), CellKind::Affirmative);
        assert_eq!(CellKind::classify("✅"), CellKind::Affirmative);
        assert_eq!(CellKind::classify("×"), CellKind::Negative);
        assert_eq!(CellKind::classify("maybe"), CellKind::Plain);
        assert_eq!(CellKind::classify(""), CellKind::Plain);
    }

    #[test]
    fn test_table_between_paragraphs() {
        let out = apply("intro\n| A |\n|---|\n| 1 |\noutro");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "intro");
        assert!(lines[1].starts_with("<div class=\"table-wrap\">"));
        assert_eq!(lines[2], "outro");
    }

    #[test]
    fn test_headerless_table() {
        let out = apply("|---|---|\n| 1 | 2 |");
        assert!(!out.contains("<thead>"));
        assert!(out.contains("<tbody><tr>"));
    }
}
