use crate::chart::{ChartConfig, ChartId, ChartInstance};
use crate::errors::DashboardError;
use maud::{Markup, PreEscaped, Render, html};
use std::collections::BTreeMap;

pub const TOTAL_MILESTONES: &str = "total-milestones";
pub const ALL_TABLES: &str = "all-tables";

pub fn canvas_id(widget_id: &str) -> String {
    format!("canvas_{widget_id}")
}

/// A canvas element; owns at most one chart instance.
#[derive(Debug, Default)]
pub struct Canvas {
    pub chart: Option<ChartInstance>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn append_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Swaps the child at `index`; appends when there is none.
    pub fn replace_child(&mut self, index: usize, child: Node) {
        match self.children.get_mut(index) {
            Some(slot) => *slot = child,
            None => self.children.push(child),
        }
    }

    pub fn to_html(&self) -> String {
        self.render().into_string()
    }
}

/// Tag names are ours; attribute values and text are escaped.
impl Render for Node {
    fn render(&self) -> Markup {
        html! {
            (PreEscaped(format!("<{}", self.tag)))
            @for (name, value) in &self.attrs {
                (PreEscaped(format!(" {name}=\"")))
                (value)
                (PreEscaped("\""))
            }
            (PreEscaped(">"))
            @if let Some(text) = &self.text {
                (text)
            }
            @for child in &self.children {
                (child)
            }
            (PreEscaped(format!("</{}>", self.tag)))
        }
    }
}

/// The dashboard document: canvases keyed by element id plus plain elements.
#[derive(Debug, Default)]
pub struct Page {
    canvases: BTreeMap<String, Canvas>,
    elements: BTreeMap<String, Node>,
    next_chart_id: u64,
    constructions: u64,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page with every element the dashboard layout declares.
    pub fn dashboard() -> Self {
        let mut page = Self::new();
        for widget in crate::widgets::WIDGETS.iter() {
            page.add_canvas(widget.id);
        }
        page.add_element(TOTAL_MILESTONES, Node::new("span"));
        page.add_element(ALL_TABLES, Node::new("div"));
        page
    }

    pub fn add_canvas(&mut self, widget_id: &str) {
        self.canvases.entry(canvas_id(widget_id)).or_default();
    }

    pub fn add_element(&mut self, id: &str, node: Node) {
        self.elements.insert(id.to_string(), node.with_attr("id", id));
    }

    pub fn canvas(&self, widget_id: &str) -> Result<&Canvas, DashboardError> {
        let id = canvas_id(widget_id);
        self.canvases
            .get(&id)
            .ok_or(DashboardError::MissingElement(id))
    }

    pub fn canvas_mut(&mut self, widget_id: &str) -> Result<&mut Canvas, DashboardError> {
        let id = canvas_id(widget_id);
        self.canvases
            .get_mut(&id)
            .ok_or(DashboardError::MissingElement(id))
    }

    pub fn chart(&self, widget_id: &str) -> Option<&ChartInstance> {
        self.canvas(widget_id).ok()?.chart.as_ref()
    }

    pub fn element(&self, id: &str) -> Result<&Node, DashboardError> {
        self.elements
            .get(id)
            .ok_or_else(|| DashboardError::MissingElement(id.to_string()))
    }

    pub fn element_mut(&mut self, id: &str) -> Result<&mut Node, DashboardError> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| DashboardError::MissingElement(id.to_string()))
    }

    /// Builds a chart on the widget's canvas, replacing nothing.
    pub fn construct_chart(
        &mut self,
        widget_id: &str,
        config: ChartConfig,
    ) -> Result<ChartId, DashboardError> {
        let id = ChartId(self.next_chart_id + 1);
        let canvas = self.canvas_mut(widget_id)?;
        canvas.chart = Some(ChartInstance::new(id, config));
        self.next_chart_id += 1;
        self.constructions += 1;
        Ok(id)
    }

    /// Number of chart constructions performed on this page.
    pub fn constructions(&self) -> u64 {
        self.constructions
    }
}
