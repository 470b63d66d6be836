use crate::compare::snapshots_equal;
use crate::config::Features;
use crate::dom::{ALL_TABLES, Page, TOTAL_MILESTONES};
use crate::errors::DashboardError;
use crate::models::{ChartsResponse, Payload, TablesResponse, WidgetView};
use crate::widgets::{self, RenderOutcome, table};
use chrono::{DateTime, Local};
use tracing::debug;

/// Owns the baseline payload and the page its charts live on.
#[derive(Debug)]
pub struct Dashboard {
    baseline: Option<Payload>,
    page: Page,
    features: Features,
    render_passes: u64,
    rendered_at: Option<DateTime<Local>>,
}

impl Dashboard {
    pub fn new(page: Page, features: Features) -> Self {
        Self {
            baseline: None,
            page,
            features,
            render_passes: 0,
            rendered_at: None,
        }
    }

    pub fn baseline(&self) -> Option<&Payload> {
        self.baseline.as_ref()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn features(&self) -> Features {
        self.features
    }

    pub fn render_passes(&self) -> u64 {
        self.render_passes
    }

    /// First payload: becomes the baseline without comparison, then renders.
    pub fn apply_initial(&mut self, payload: Payload) -> Result<(), DashboardError> {
        self.baseline = Some(payload);
        self.render_baseline()
    }

    /// Re-renders when `payload` differs from the baseline. Returns whether it did.
    pub fn apply(&mut self, payload: Payload) -> Result<bool, DashboardError> {
        if snapshots_equal(&payload, self.baseline.as_ref()) {
            return Ok(false);
        }
        self.baseline = Some(payload);
        self.render_baseline()?;
        Ok(true)
    }

    fn render_baseline(&mut self) -> Result<(), DashboardError> {
        let Some(payload) = self.baseline.as_ref() else {
            return Ok(());
        };
        self.render_passes += 1;
        self.rendered_at = Some(Local::now());

        let outcomes = widgets::render_charts(&mut self.page, &payload.stats)?;
        let changed = outcomes
            .iter()
            .filter(|(_, outcome)| *outcome != RenderOutcome::Unchanged)
            .count();
        debug!(pass = self.render_passes, changed, "rendered charts");

        if self.features.tables {
            table::update_milestones_total(&mut self.page, &payload.stats)?;
            if let Some(tables) = payload.tables()? {
                table::update_tables(&mut self.page, &tables)?;
            }
        }
        Ok(())
    }

    /// Outbound link for a click on one chart element.
    pub fn click(
        &self,
        widget_id: &str,
        dataset: usize,
        index: usize,
    ) -> Result<Option<String>, DashboardError> {
        let canvas = self.page.canvas(widget_id)?;
        Ok(canvas
            .chart
            .as_ref()
            .and_then(|chart| chart.link_at(dataset, index))
            .map(str::to_string))
    }

    pub fn charts(&self) -> ChartsResponse {
        let widgets = widgets::WIDGETS
            .iter()
            .filter_map(|spec| {
                let chart = self.page.chart(spec.id)?;
                Some(WidgetView {
                    id: spec.id.to_string(),
                    chart_id: chart.id.0,
                    revision: chart.revision,
                    config: chart.config.clone(),
                    tooltips: chart.tooltips(),
                })
            })
            .collect();
        ChartsResponse {
            render_passes: self.render_passes,
            rendered_at: self.rendered_at,
            widgets,
        }
    }

    /// Table markup, or `None` while the table path is disabled.
    pub fn tables(&self) -> Result<Option<TablesResponse>, DashboardError> {
        if !self.features.tables {
            return Ok(None);
        }
        let total = self.page.element(TOTAL_MILESTONES)?;
        let all = self.page.element(ALL_TABLES)?;
        Ok(Some(TablesResponse {
            total_milestones: total.text.clone().unwrap_or_default(),
            html: all.to_html(),
        }))
    }
}
