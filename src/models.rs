use crate::errors::DashboardError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One poll cycle's document from the data endpoint.
///
/// The raw JSON is kept next to the typed view: change detection runs on the
/// document as received (numbers in canonical form), rendering runs on the
/// typed fields. `tables` stays undecoded until the table path asks for it.
#[derive(Debug, Clone)]
pub struct Payload {
    pub raw: Value,
    pub stats: Stats,
}

#[derive(Debug, Deserialize)]
struct PayloadShape {
    #[serde(default)]
    stats: Stats,
}

impl Payload {
    pub fn from_value(mut raw: Value) -> Result<Self, DashboardError> {
        canonicalize_numbers(&mut raw);
        let shape: PayloadShape = serde_json::from_value(raw.clone())?;
        Ok(Self {
            raw,
            stats: shape.stats,
        })
    }

    /// Decodes the `tables` block. Absent or `null` yields `None`.
    pub fn tables(&self) -> Result<Option<Tables>, DashboardError> {
        match self.raw.get("tables") {
            None | Some(Value::Null) => Ok(None),
            Some(tables) => Ok(Some(Tables::deserialize(tables)?)),
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, DashboardError> {
        let raw: Value = serde_json::from_slice(bytes)?;
        Self::from_value(raw)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    #[serde(rename = "statusM4", default)]
    pub status_m4: Option<Breakdown>,
    #[serde(rename = "statusM5", default)]
    pub status_m5: Option<Breakdown>,
    #[serde(rename = "componentsM4", default)]
    pub components_m4: Option<Breakdown>,
    #[serde(rename = "componentsM5", default)]
    pub components_m5: Option<Breakdown>,
    #[serde(rename = "assigneesM4", default)]
    pub assignees_m4: Option<Breakdown>,
    #[serde(rename = "assigneesM5", default)]
    pub assignees_m5: Option<Breakdown>,
    #[serde(rename = "totalMilestones", default)]
    pub total_milestones: Option<Value>,
    #[serde(default)]
    pub burndown: Option<Burndown>,
}

/// Parallel label/value/link sequences feeding one doughnut.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    #[serde(default)]
    pub links: Vec<String>,
}

impl Breakdown {
    /// Share of slice `index` in percent, rounded half away from zero.
    pub fn percent(&self, index: usize) -> Option<i64> {
        percent_of(&self.data, index)
    }
}

/// Rewrites integral floats as integers, so `5.0` and `5` serialize alike.
pub fn canonicalize_numbers(value: &mut Value) {
    const EXACT: f64 = 9_007_199_254_740_992.0;
    let integral = match value {
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < EXACT),
        _ => None,
    };
    if let Some(f) = integral {
        *value = Value::from(f as i64);
        return;
    }
    match value {
        Value::Array(items) => items.iter_mut().for_each(canonicalize_numbers),
        Value::Object(map) => map.values_mut().for_each(canonicalize_numbers),
        _ => {}
    }
}

pub fn percent_of(values: &[f64], index: usize) -> Option<i64> {
    let value = *values.get(index)?;
    let total: f64 = values.iter().sum();
    if total == 0.0 {
        return Some(0);
    }
    Some((100.0 * (value / total)).round() as i64)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Burndown {
    pub labels: Vec<String>,
    pub totals: Vec<Option<f64>>,
    pub unresolved: Vec<Option<f64>>,
    pub forecasted: Vec<Option<f64>>,
    #[serde(default)]
    pub total_link: String,
    #[serde(default)]
    pub unresolved_link: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tables {
    #[serde(default)]
    pub milestones: BTreeMap<String, TableData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub header: Vec<String>,
    pub data: Vec<TableRow>,
}

/// Text shown for a scalar cell: strings verbatim, `null` empty, anything else as JSON.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// (priority, summary, resolution, assignee, bug id, milestone, status)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow(
    pub Value,
    pub Value,
    pub Value,
    pub Value,
    pub u64,
    pub Value,
    pub Value,
);

impl TableRow {
    pub fn priority(&self) -> String {
        display_text(&self.0)
    }

    pub fn summary(&self) -> String {
        display_text(&self.1)
    }

    pub fn resolution(&self) -> String {
        display_text(&self.2)
    }

    pub fn assignee(&self) -> String {
        display_text(&self.3)
    }

    pub fn bug_id(&self) -> u64 {
        self.4
    }

    pub fn milestone(&self) -> String {
        display_text(&self.5)
    }

    pub fn status(&self) -> String {
        display_text(&self.6)
    }
}

#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    pub widget: String,
    #[serde(default)]
    pub dataset: usize,
    pub index: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClickResponse {
    pub open: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WidgetView {
    pub id: String,
    pub chart_id: u64,
    pub revision: u64,
    pub config: crate::chart::ChartConfig,
    pub tooltips: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ChartsResponse {
    pub render_passes: u64,
    pub rendered_at: Option<chrono::DateTime<chrono::Local>>,
    pub widgets: Vec<WidgetView>,
}

#[derive(Debug, Serialize)]
pub struct TablesResponse {
    pub total_milestones: String,
    pub html: String,
}
