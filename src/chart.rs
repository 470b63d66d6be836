//! Chart instances and their Chart.js-shaped configuration.
//!
//! A [`ChartConfig`] serializes to the object the plotting library is
//! constructed with; the browser page hands it over verbatim. Everything the
//! library cannot express as data (click routing, tooltip text) lives next to
//! it on the Rust side.

use crate::models::percent_of;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
    #[serde(skip)]
    pub click: ClickRouting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    Single(String),
    PerPoint(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<Option<f64>>,
    /// Per-slice targets, index-aligned with `data`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    /// Target for the whole series.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub background_color: Paint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_tension: Option<f64>,
}

impl Dataset {
    pub fn values(&self) -> Vec<f64> {
        self.data.iter().map(|v| v.unwrap_or(0.0)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub legend: Legend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintain_aspect_ratio: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Plugins>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            display: true,
            position: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub labels: ValueLabels,
}

/// Always-visible label drawn on each slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueLabels {
    pub render: String,
    pub font_size: u32,
    pub font_color: String,
    pub font_family: String,
}

impl Default for ValueLabels {
    fn default() -> Self {
        Self {
            render: "value".into(),
            font_size: 14,
            font_color: "black".into(),
            font_family: "sans-serif".into(),
        }
    }
}

/// How a click on an element resolves to an outbound link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClickRouting {
    #[default]
    None,
    /// `datasets[0].links[index]`
    SliceLinks,
    /// `datasets[dataset].link` for datasets up to and including `last`.
    SeriesLinks { last: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ChartId(pub u64);

#[derive(Debug, Clone)]
pub struct ChartInstance {
    pub id: ChartId,
    pub config: ChartConfig,
    pub revision: u64,
}

impl ChartInstance {
    pub fn new(id: ChartId, config: ChartConfig) -> Self {
        Self {
            id,
            config,
            revision: 0,
        }
    }

    /// Marks the instance for a redraw.
    pub fn refresh(&mut self) {
        self.revision += 1;
    }

    /// Link to open in a new browsing context for a click on `index` of
    /// `dataset`, if any.
    pub fn link_at(&self, dataset: usize, index: usize) -> Option<&str> {
        let link = match self.config.click {
            ClickRouting::None => None,
            ClickRouting::SliceLinks => self
                .config
                .data
                .datasets
                .first()
                .and_then(|ds| ds.links.as_ref())
                .and_then(|links| links.get(index)),
            ClickRouting::SeriesLinks { last } if dataset <= last => self
                .config
                .data
                .datasets
                .get(dataset)
                .and_then(|ds| ds.link.as_ref()),
            ClickRouting::SeriesLinks { .. } => None,
        };
        link.map(String::as_str).filter(|link| !link.is_empty())
    }

    /// Hover text per slice, `"<label>: <percent>%"`.
    pub fn tooltips(&self) -> Vec<String> {
        if self.config.kind != ChartKind::Doughnut {
            return Vec::new();
        }
        let Some(dataset) = self.config.data.datasets.first() else {
            return Vec::new();
        };
        let values = dataset.values();
        self.config
            .data
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| format!("{label}: {}%", percent_of(&values, i).unwrap_or(0)))
            .collect()
    }
}
