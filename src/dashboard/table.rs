//! Outlet summary table

use serde::Serialize;

use super::dataset::OutletTypeRow;

pub const OUTLET_TABLE_HEADERS: [&str; 6] = [
    "Outlet Type",
    "Total Sales",
    "No. of Items",
    "Avg Sales",
    "Avg Rating",
    "Item Visibility",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub text: String,
    /// Right-aligned figure (`class="num"`)
    pub numeric: bool,
}

impl Cell {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            numeric: false,
        }
    }

    fn number(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            numeric: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSpec {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableSpec {
    pub fn outlet_types(rows: &[OutletTypeRow]) -> Self {
        Self {
            headers: OUTLET_TABLE_HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| {
                    vec![
                        Cell::text(r.outlet_type),
                        Cell::number(r.sales),
                        Cell::number(group_thousands(r.items)),
                        Cell::number(r.avg_sales),
                        Cell::number(r.rating.to_string()),
                        Cell::number(r.visibility),
                    ]
                })
                .collect(),
        }
    }

    /// `<thead>` and `<tbody>` markup for the inside of a `<table>`
    pub fn to_html(&self) -> String {
        let mut html = String::from("<thead><tr>");
        for header in &self.headers {
            html.push_str("<th>");
            html.push_str(&escape_html(header));
            html.push_str("</th>");
        }
        html.push_str("</tr></thead><tbody>");

        for row in &self.rows {
            html.push_str("<tr>");
            for cell in row {
                html.push_str(if cell.numeric { "<td class=\"num\">" } else { "<td>" });
                html.push_str(&escape_html(&cell.text));
                html.push_str("</td>");
            }
            html.push_str("</tr>");
        }

        html.push_str("</tbody>");
        html
    }
}

/// `5577` -> `5,577`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
