use super::ChartWidget;
use crate::chart::{
    ChartConfig, ChartData, ChartKind, ChartOptions, ClickRouting, Dataset, Legend, Paint,
};
use crate::models::Burndown;

pub struct BurndownWidget<'a> {
    series: &'a Burndown,
}

impl<'a> BurndownWidget<'a> {
    pub fn new(series: &'a Burndown) -> Self {
        Self { series }
    }
}

fn line(label: &str, color: &str, data: &[Option<f64>], link: Option<&str>) -> Dataset {
    Dataset {
        label: Some(label.into()),
        data: data.to_vec(),
        links: None,
        link: link.map(str::to_string),
        background_color: Paint::Single(color.into()),
        border_color: Some(color.into()),
        fill: Some(false),
        line_tension: Some(0.0),
    }
}

impl ChartWidget for BurndownWidget<'_> {
    fn construct(&self) -> ChartConfig {
        let s = self.series;
        ChartConfig {
            kind: ChartKind::Line,
            data: ChartData {
                labels: s.labels.clone(),
                datasets: vec![
                    line("Total", "blue", &s.totals, Some(&s.total_link)),
                    line("Unresolved", "red", &s.unresolved, Some(&s.unresolved_link)),
                    line("Forecasted", "green", &s.forecasted, None),
                ],
            },
            options: ChartOptions {
                legend: Legend {
                    display: true,
                    position: None,
                },
                responsive: Some(false),
                maintain_aspect_ratio: Some(false),
                plugins: None,
            },
            click: ClickRouting::SeriesLinks { last: 1 },
        }
    }

    // Forecast and links stay as constructed.
    fn update(&self, config: &mut ChartConfig) -> bool {
        let s = self.series;
        let data = &mut config.data;
        if data.datasets.len() < 2 {
            return false;
        }
        if data.datasets[0].data == s.totals
            && data.datasets[1].data == s.unresolved
            && data.labels == s.labels
        {
            return false;
        }
        data.datasets[0].data = s.totals.clone();
        data.datasets[1].data = s.unresolved.clone();
        data.labels = s.labels.clone();
        true
    }
}
