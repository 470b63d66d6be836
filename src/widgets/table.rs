//! Per-milestone issue tables and the milestone total.
//!
//! Not on the default render path; enabled through `Features::tables`.

use crate::dom::{ALL_TABLES, Node, Page, TOTAL_MILESTONES};
use crate::errors::DashboardError;
use crate::models::{Stats, TableData, Tables, display_text};

pub const BUG_URL: &str = "https://bugzilla.mozilla.org/show_bug.cgi?id=";

/// Page-side header alignment. Layout only exists in the browser, so each
/// scrolling body is measured there after the tables are inserted, and its
/// header shrinks by `offsetWidth - clientWidth + 1` pixels.
pub const ALIGN_HEADERS_JS: &str = r#"const alignHeaders = () => {
      document.querySelectorAll('.table table').forEach((table) => {
        const head = table.querySelector('thead');
        const body = table.querySelector('tbody');
        if (!head || !body) {
          return;
        }
        const scrollbar = body.offsetWidth - body.clientWidth + 1;
        head.style.width = `calc(100% - ${scrollbar}px)`;
      });
    };"#;

/// Milestones shown, in on-page order.
pub const TABLE_MILESTONES: [&str; 4] = ["M3", "?", "Future", "M2"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableParts {
    pub container: Node,
    pub header: Node,
    pub body: Node,
}

impl TableParts {
    /// Reassembles the container with the header and body.
    pub fn into_container(self) -> Node {
        let TableParts {
            mut container,
            header,
            body,
        } = self;
        let table = Node::new("table").with_child(header).with_child(body);
        container.replace_child(1, table);
        container
    }
}

fn title(milestone: &str) -> Node {
    Node::new("div")
        .with_attr("class", "title")
        .with_child(Node::new("span").with_text(format!("{milestone} Breakdown")))
}

fn cell(text: impl Into<String>) -> Node {
    Node::new("td").with_text(text)
}

pub fn bug_link(bug_id: u64) -> Node {
    Node::new("a")
        .with_attr("href", format!("{BUG_URL}{bug_id}"))
        .with_attr("target", format!("_blank{bug_id}"))
        .with_text(bug_id.to_string())
}

/// Builds the titled table for one milestone.
pub fn render_table(milestone: &str, data: &TableData) -> TableParts {
    let mut head_row = Node::new("tr");
    for column in &data.header {
        head_row.append_child(Node::new("th").with_text(column.clone()));
    }
    let header = Node::new("thead").with_child(head_row);

    let mut body = Node::new("tbody");
    for row in &data.data {
        body.append_child(
            Node::new("tr")
                .with_child(cell(row.priority()))
                .with_child(cell(row.summary()))
                .with_child(cell(row.resolution()))
                .with_child(cell(row.assignee()))
                .with_child(Node::new("td").with_child(bug_link(row.bug_id())))
                .with_child(cell(row.milestone()))
                .with_child(cell(row.status())),
        );
    }

    let container = Node::new("div")
        .with_attr("class", "table")
        .with_child(title(milestone))
        .with_child(Node::new("table"));

    TableParts {
        container,
        header,
        body,
    }
}

/// Appends every table on the first run, replaces them by position afterwards.
pub fn update_tables(page: &mut Page, tables: &Tables) -> Result<(), DashboardError> {
    let all = page.element_mut(ALL_TABLES)?;
    let add = all.children.is_empty();
    let empty = TableData::default();
    for (i, milestone) in TABLE_MILESTONES.iter().enumerate() {
        let data = tables.milestones.get(*milestone).unwrap_or(&empty);
        let table = render_table(milestone, data).into_container();
        if add {
            all.append_child(table);
        } else {
            all.replace_child(i, table);
        }
    }
    Ok(())
}

pub fn update_milestones_total(page: &mut Page, stats: &Stats) -> Result<(), DashboardError> {
    let span = page.element_mut(TOTAL_MILESTONES)?;
    let total = stats
        .total_milestones
        .as_ref()
        .map(display_text)
        .unwrap_or_default();
    span.set_text(total);
    Ok(())
}
