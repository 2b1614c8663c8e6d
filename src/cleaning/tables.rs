//! Table classification: data tables stay, layout tables are unwrapped.

use dom_query::{NodeRef, Selection};

use crate::dom;
use crate::patterns::{BLOCK_TAGS, MEDIA_SELECTOR};

/// Rows a table needs before the row/column shape counts as data.
const MIN_DATA_ROWS: usize = 3;
/// Cells per row for the same test.
const MIN_DATA_COLUMNS: usize = 3;
/// Average cell text length above which cells look like data.
const DATA_AVERAGE_CELL_TEXT: f64 = 20.0;
/// Share of non-empty cells that must be numeric for a data table.
const DATA_NUMERIC_SHARE: f64 = 0.3;

/// Descendants matching `selector` whose nearest enclosing table is `table`.
fn own_descendants<'a>(table: &NodeRef<'a>, selector: &str) -> Vec<NodeRef<'a>> {
    Selection::from(*table)
        .select(selector)
        .nodes()
        .iter()
        .filter(|node| dom::closest_ancestor(node, "table").is_some_and(|t| t.id == table.id))
        .copied()
        .collect()
}

fn is_numeric_cell(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_numeric() || c.is_ascii_punctuation() || c.is_whitespace() || matches!(c, '€' | '£' | '¥' | '±' | '−'))
}

/// A table is data when any single data signal fires.
///
/// The text statistics only apply to tables with at least two rows; a
/// one-row table is a wrapper unless it is explicitly marked up as data.
#[must_use]
pub fn is_data_table(table: &NodeRef) -> bool {
    let sel = Selection::from(*table);

    if !own_descendants(table, "th, caption").is_empty() {
        return true;
    }
    if dom::get_attribute(&sel, "role").is_some_and(|role| {
        let role = role.trim().to_ascii_lowercase();
        role == "grid" || role == "table"
    }) {
        return true;
    }

    let rows = own_descendants(table, "tr");
    let cells = own_descendants(table, "td, th");

    let wide_row = rows.iter().any(|row| {
        dom::element_children(row)
            .iter()
            .filter(|cell| dom::node_is(cell, &["td", "th"]))
            .count()
            >= MIN_DATA_COLUMNS
    });
    if rows.len() >= MIN_DATA_ROWS && wide_row {
        return true;
    }

    if rows.len() < 2 || cells.is_empty() {
        return false;
    }

    let texts: Vec<String> = cells.iter().map(|cell| dom::normalized_text(&Selection::from(*cell))).collect();
    let total: usize = texts.iter().map(|t| t.chars().count()).sum();
    if total as f64 / texts.len() as f64 > DATA_AVERAGE_CELL_TEXT {
        return true;
    }

    let non_empty: Vec<&String> = texts.iter().filter(|t| !t.is_empty()).collect();
    if non_empty.is_empty() {
        return false;
    }
    let numeric = non_empty.iter().filter(|t| is_numeric_cell(t)).count();
    numeric as f64 / non_empty.len() as f64 > DATA_NUMERIC_SHARE
}

/// Markup kept for one layout cell. Cells holding only inline content
/// become paragraphs so neighbouring cells do not run together.
fn cell_markup(cell: &Selection) -> String {
    let inner = dom::inner_html(cell).to_string();
    if cell.select(&BLOCK_TAGS.join(", ")).exists() {
        inner
    } else {
        format!("<p>{inner}</p>")
    }
}

/// Replace every layout table under `root` with a `<div>` holding the
/// contents of its non-empty cells. Nested tables are handled first.
pub fn unwrap_layout_tables(root: &Selection) {
    let tables: Vec<NodeRef> = root.select("table").nodes().to_vec();
    let mut unwrapped = 0;

    for table in tables.iter().rev() {
        if is_data_table(table) {
            continue;
        }

        let mut html = String::from("<div>");
        for cell in own_descendants(table, "td, th") {
            let cell = Selection::from(cell);
            if !cell.text().trim().is_empty() || cell.select(MEDIA_SELECTOR).exists() {
                html.push_str(&cell_markup(&cell));
            }
        }
        html.push_str("</div>");

        Selection::from(*table).replace_with_html(html);
        unwrapped += 1;
    }
    tracing::trace!(tables = tables.len(), unwrapped, "classified tables");
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_query::Document;

    fn classify(html: &str) -> bool {
        let doc = Document::from(html);
        let table = *doc.select("table").nodes().first().expect("table");
        is_data_table(&table)
    }

    #[test]
    fn header_cells_make_data() {
        assert!(classify("<table><tr><th>A</th></tr><tr><td>1</td></tr></table>"));
    }

    #[test]
    fn caption_and_role_make_data() {
        assert!(classify("<table><caption>Totals</caption><tr><td>x</td></tr></table>"));
        assert!(classify(r#"<table role="grid"><tr><td>x</td></tr></table>"#));
    }

    #[test]
    fn three_by_three_is_data() {
        let row = "<tr><td>a</td><td>b</td><td>c</td></tr>";
        assert!(classify(&format!("<table>{row}{row}{row}</table>")));
    }

    #[test]
    fn numeric_cells_make_data() {
        assert!(classify("<table><tr><td>Year</td><td>2021</td></tr><tr><td>Cost</td><td>$4.50</td></tr></table>"));
    }

    #[test]
    fn single_cell_wrapper_is_layout() {
        assert!(!classify(
            r#"<table role="presentation"><tr><td><p>Prose in a layout cell.</p></td></tr></table>"#
        ));
    }

    #[test]
    fn nested_header_does_not_count_for_outer() {
        let doc = Document::from(
            "<table id=\"outer\"><tr><td><table id=\"inner\"><tr><th>H</th></tr></table></td></tr></table>",
        );
        let outer = *doc.select("#outer").nodes().first().expect("outer");
        assert!(!is_data_table(&outer));
    }

    #[test]
    fn layout_table_replaced_by_cell_contents() {
        let doc = Document::from(
            r#"<div id="root"><table role="presentation"><tr><td><p>Prose in a layout cell.</p></td><td> </td><td><img src="/a.jpg"></td></tr></table></div>"#,
        );
        unwrap_layout_tables(&doc.select("#root"));

        assert!(doc.select("table").is_empty());
        assert_eq!(doc.select("#root > div > p").text(), "Prose in a layout cell.".into());
        assert!(doc.select("#root > div > img").exists());
    }

    #[test]
    fn inline_cells_become_separate_paragraphs() {
        let doc = Document::from(
            r#"<div id="root"><table><tr><td>Left cell text</td><td><b>Right</b> cell text</td></tr></table></div>"#,
        );
        unwrap_layout_tables(&doc.select("#root"));

        let paragraphs = doc.select("#root > div > p");
        assert_eq!(paragraphs.length(), 2);
        assert_eq!(dom::flatten_text(&doc.select("#root")), "Left cell text\nRight cell text");
    }

    #[test]
    fn inner_data_table_survives_outer_unwrap() {
        let doc = Document::from(
            r#"<div id="root"><table><tr><td><table id="data"><tr><th>Name</th></tr><tr><td>Ada</td></tr></table></td></tr></table></div>"#,
        );
        unwrap_layout_tables(&doc.select("#root"));

        assert_eq!(doc.select("table").length(), 1);
        assert!(doc.select("#data th").exists());
    }
}
