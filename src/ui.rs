use crate::config::Features;
use crate::widgets::table::ALIGN_HEADERS_JS;

pub fn render_index(features: Features) -> String {
    let tables = if features.tables { TABLES_HTML } else { "" };
    INDEX_HTML
        .replace("{{TABLES}}", tables)
        .replace("{{ALIGN_HEADERS}}", ALIGN_HEADERS_JS)
        .replace("{{TABLES_ENABLED}}", if features.tables { "true" } else { "false" })
}

const TABLES_HTML: &str = r#"<section class="tables">
    <h2>Bugs with a milestone: <span id="total-milestones"></span></h2>
    <div id="all-tables"></div>
  </section>"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Fission Report</title>
  <script src="https://cdn.jsdelivr.net/npm/chart.js@2.9.4/dist/Chart.min.js"></script>
  <script src="https://cdn.jsdelivr.net/gh/emn178/chartjs-plugin-labels/src/chartjs-plugin-labels.js"></script>
  <style>
    body {
      margin: 0;
      padding: 24px;
      font-family: sans-serif;
      color: #222;
      background: #fafafa;
    }

    h1 {
      margin: 0 0 18px;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(2, minmax(320px, 1fr));
      gap: 24px;
    }

    .card {
      background: white;
      border: 1px solid #ddd;
      border-radius: 8px;
      padding: 12px;
    }

    .card h2 {
      font-size: 1rem;
      margin: 0 0 8px;
    }

    .table table {
      width: 100%;
      border-collapse: collapse;
    }

    .table tbody {
      display: block;
      max-height: 360px;
      overflow-y: auto;
    }

    .table thead,
    .table tbody tr {
      display: table;
      table-layout: fixed;
      width: 100%;
    }
  </style>
</head>
<body>
  <h1>Fission Report</h1>
  <div class="grid">
    <div class="card"><h2>M4 status</h2><canvas id="canvas_m4_milestones"></canvas></div>
    <div class="card"><h2>M5 status</h2><canvas id="canvas_m5_milestones"></canvas></div>
    <div class="card"><h2>M4 components</h2><canvas id="canvas_m4_components"></canvas></div>
    <div class="card"><h2>M5 components</h2><canvas id="canvas_m5_components"></canvas></div>
    <div class="card"><h2>M4 assignees</h2><canvas id="canvas_m4_assignees"></canvas></div>
    <div class="card"><h2>M5 assignees</h2><canvas id="canvas_m5_assignees"></canvas></div>
  </div>
  <div class="card">
    <h2>Burndown</h2>
    <canvas id="canvas_burndown" width="900" height="400"></canvas>
  </div>
  {{TABLES}}

  <script>
    const tablesEnabled = {{TABLES_ENABLED}};
    const charts = {};

    {{ALIGN_HEADERS}}

    const openLink = async (widget, dataset, index) => {
      const res = await fetch('/api/click', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ widget, dataset, index })
      });
      if (!res.ok) {
        return;
      }
      const { open } = await res.json();
      if (open) {
        window.open(open, '_blank');
      }
    };

    const construct = (view) => {
      const canvas = document.getElementById('canvas_' + view.id);
      const config = view.config;
      config.options.onClick = function (e) {
        const active = this.getElementAtEvent(e)[0];
        if (active) {
          openLink(view.id, active._datasetIndex, active._index);
        }
      };
      if (config.type === 'doughnut') {
        config.options.tooltips = {
          callbacks: {
            label: (item) => (charts[view.id].tooltips || [])[item.index] || ''
          }
        };
      }
      const chart = new Chart(canvas.getContext('2d'), config);
      charts[view.id] = { chart, chartId: view.chart_id, revision: view.revision, tooltips: view.tooltips };
    };

    const update = (view) => {
      const entry = charts[view.id];
      entry.tooltips = view.tooltips;
      if (entry.revision === view.revision) {
        return;
      }
      entry.revision = view.revision;
      entry.chart.data.labels = view.config.data.labels;
      view.config.data.datasets.forEach((dataset, i) => {
        entry.chart.data.datasets[i].data = dataset.data;
      });
      entry.chart.update();
    };

    const loadTables = async () => {
      const res = await fetch('/api/tables');
      if (!res.ok) {
        return;
      }
      const tables = await res.json();
      document.getElementById('total-milestones').innerText = tables.total_milestones;
      document.getElementById('all-tables').outerHTML = tables.html;
      alignHeaders();
    };

    const refresh = async () => {
      const res = await fetch('/api/charts');
      if (!res.ok) {
        return;
      }
      const data = await res.json();
      for (const view of data.widgets) {
        const entry = charts[view.id];
        if (entry === undefined || entry.chartId !== view.chart_id) {
          construct(view);
        } else {
          update(view);
        }
      }
      if (tablesEnabled) {
        await loadTables();
      }
    };

    window.addEventListener('DOMContentLoaded', () => {
      refresh().catch(() => {});
      window.setInterval(() => refresh().catch(() => {}), 30000);
      if (tablesEnabled) {
        window.addEventListener('resize', alignHeaders);
      }
    });
  </script>
</body>
</html>
"#;
