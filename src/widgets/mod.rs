//! On-screen widgets bound to page elements.

pub mod burndown;
pub mod doughnut;
pub mod table;

pub use burndown::BurndownWidget;
pub use doughnut::DoughnutWidget;

use crate::chart::ChartConfig;
use crate::dom::Page;
use crate::errors::DashboardError;
use crate::models::{Breakdown, Burndown, Stats};
use tracing::debug;

/// A chart that is built once and then mutated in place.
pub trait ChartWidget {
    fn construct(&self) -> ChartConfig;

    /// Writes fresh values into an existing chart; `true` if anything changed.
    fn update(&self, config: &mut ChartConfig) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Constructed,
    Updated,
    Unchanged,
}

/// Constructs the widget's chart on first use, updates it afterwards.
pub fn render(
    page: &mut Page,
    widget_id: &str,
    widget: &impl ChartWidget,
) -> Result<RenderOutcome, DashboardError> {
    if page.canvas(widget_id)?.chart.is_none() {
        page.construct_chart(widget_id, widget.construct())?;
        return Ok(RenderOutcome::Constructed);
    }

    let canvas = page.canvas_mut(widget_id)?;
    let Some(chart) = canvas.chart.as_mut() else {
        return Ok(RenderOutcome::Unchanged);
    };
    if widget.update(&mut chart.config) {
        chart.refresh();
        Ok(RenderOutcome::Updated)
    } else {
        Ok(RenderOutcome::Unchanged)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownKey {
    StatusM4,
    StatusM5,
    ComponentsM4,
    ComponentsM5,
    AssigneesM4,
    AssigneesM5,
}

impl BreakdownKey {
    pub fn select(self, stats: &Stats) -> Option<&Breakdown> {
        match self {
            Self::StatusM4 => stats.status_m4.as_ref(),
            Self::StatusM5 => stats.status_m5.as_ref(),
            Self::ComponentsM4 => stats.components_m4.as_ref(),
            Self::ComponentsM5 => stats.components_m5.as_ref(),
            Self::AssigneesM4 => stats.assignees_m4.as_ref(),
            Self::AssigneesM5 => stats.assignees_m5.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetSource {
    Doughnut(BreakdownKey),
    Burndown,
}

#[derive(Debug, Clone, Copy)]
pub struct WidgetSpec {
    pub id: &'static str,
    pub source: WidgetSource,
}

/// Render order of one cycle.
pub static WIDGETS: [WidgetSpec; 7] = [
    WidgetSpec {
        id: "m4_milestones",
        source: WidgetSource::Doughnut(BreakdownKey::StatusM4),
    },
    WidgetSpec {
        id: "m5_milestones",
        source: WidgetSource::Doughnut(BreakdownKey::StatusM5),
    },
    WidgetSpec {
        id: "m4_components",
        source: WidgetSource::Doughnut(BreakdownKey::ComponentsM4),
    },
    WidgetSpec {
        id: "m5_components",
        source: WidgetSource::Doughnut(BreakdownKey::ComponentsM5),
    },
    WidgetSpec {
        id: "m4_assignees",
        source: WidgetSource::Doughnut(BreakdownKey::AssigneesM4),
    },
    WidgetSpec {
        id: "m5_assignees",
        source: WidgetSource::Doughnut(BreakdownKey::AssigneesM5),
    },
    WidgetSpec {
        id: "burndown",
        source: WidgetSource::Burndown,
    },
];

/// Renders every chart widget in table order. A section missing from the
/// payload renders as an empty chart.
pub fn render_charts(
    page: &mut Page,
    stats: &Stats,
) -> Result<Vec<(&'static str, RenderOutcome)>, DashboardError> {
    let no_breakdown = Breakdown::default();
    let no_series = Burndown::default();
    let mut outcomes = Vec::with_capacity(WIDGETS.len());
    for spec in &WIDGETS {
        let outcome = match spec.source {
            WidgetSource::Doughnut(key) => {
                let breakdown = key.select(stats).unwrap_or_else(|| {
                    debug!(widget = spec.id, "no breakdown in payload");
                    &no_breakdown
                });
                render(page, spec.id, &DoughnutWidget::new(breakdown))?
            }
            WidgetSource::Burndown => {
                let series = stats.burndown.as_ref().unwrap_or_else(|| {
                    debug!(widget = spec.id, "no burndown in payload");
                    &no_series
                });
                render(page, spec.id, &BurndownWidget::new(series))?
            }
        };
        outcomes.push((spec.id, outcome));
    }
    Ok(outcomes)
}

pub fn spec(widget_id: &str) -> Option<&'static WidgetSpec> {
    WIDGETS.iter().find(|spec| spec.id == widget_id)
}
