use super::ChartWidget;
use crate::chart::{
    ChartConfig, ChartData, ChartKind, ChartOptions, ClickRouting, Dataset, Legend, Paint,
    Plugins, ValueLabels,
};
use crate::models::Breakdown;
use crate::palette;

/// Ring chart over one breakdown.
///
/// Colors and slice links are fixed at construction; later updates only
/// replace values and labels.
pub struct DoughnutWidget<'a> {
    breakdown: &'a Breakdown,
}

impl<'a> DoughnutWidget<'a> {
    pub fn new(breakdown: &'a Breakdown) -> Self {
        Self { breakdown }
    }

    fn values(&self) -> Vec<Option<f64>> {
        self.breakdown.data.iter().copied().map(Some).collect()
    }
}

impl ChartWidget for DoughnutWidget<'_> {
    fn construct(&self) -> ChartConfig {
        let colors = palette::mpn65(self.breakdown.labels.len());
        ChartConfig {
            kind: ChartKind::Doughnut,
            data: ChartData {
                labels: self.breakdown.labels.clone(),
                datasets: vec![Dataset {
                    label: None,
                    data: self.values(),
                    links: Some(self.breakdown.links.clone()),
                    link: None,
                    background_color: Paint::PerPoint(colors),
                    border_color: None,
                    fill: None,
                    line_tension: None,
                }],
            },
            options: ChartOptions {
                legend: Legend {
                    display: true,
                    position: Some("right".into()),
                },
                plugins: Some(Plugins {
                    labels: ValueLabels::default(),
                }),
                ..ChartOptions::default()
            },
            click: ClickRouting::SliceLinks,
        }
    }

    fn update(&self, config: &mut ChartConfig) -> bool {
        let values = self.values();
        let Some(dataset) = config.data.datasets.first_mut() else {
            return false;
        };
        if dataset.data == values && config.data.labels == self.breakdown.labels {
            return false;
        }
        dataset.data = values;
        config.data.labels = self.breakdown.labels.clone();
        true
    }
}
