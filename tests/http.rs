use axum::{Json, Router, extract::State, routing::get};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct ChartsResponse {
    render_passes: u64,
    widgets: Vec<WidgetView>,
}

#[derive(Debug, Deserialize)]
struct WidgetView {
    id: String,
    chart_id: u64,
    revision: u64,
    config: Value,
    tooltips: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ClickResponse {
    open: Option<String>,
}

type Doc = Arc<std::sync::Mutex<Value>>;

/// `/data` endpoint the dashboard polls, served from its own thread.
struct DataServer {
    base_url: String,
    doc: Doc,
}

impl DataServer {
    fn set(&self, doc: Value) {
        *self.doc.lock().unwrap() = doc;
    }
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static DATA: Lazy<DataServer> = Lazy::new(start_data_server);
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn base_doc() -> Value {
    json!({
        "stats": {
            "statusM4": {"labels": ["A", "B"], "data": [3, 7], "links": ["", "http://x"]},
            "statusM5": {"labels": ["Open", "Closed"], "data": [5, 10], "links": ["", ""]},
            "totalMilestones": 2,
            "burndown": {
                "labels": ["W1", "W2"],
                "totals": [20, 18],
                "unresolved": [20, 15],
                "forecasted": [20, 10],
                "total_link": "http://total",
                "unresolved_link": "http://unresolved"
            }
        },
        "tables": {"milestones": {
            "M3": {
                "header": ["Priority", "Summary", "Resolution", "Assignee", "Bug Number", "Fission Milestone", "Status"],
                "data": [["P1", "Crash on load", "---", "nobody@mozilla.org", 1525023, "M3", "NEW"]]
            }
        }}
    })
}

fn start_data_server() -> DataServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind data server");
    listener.set_nonblocking(true).unwrap();
    let port = listener.local_addr().unwrap().port();
    let doc: Doc = Arc::new(std::sync::Mutex::new(base_doc()));

    let shared = Arc::clone(&doc);
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            let router = Router::new()
                .route(
                    "/report/data",
                    get(|State(doc): State<Doc>| async move { Json(doc.lock().unwrap().clone()) }),
                )
                .with_state(shared);
            axum::serve(listener, router).await.unwrap();
        });
    });

    DataServer {
        base_url: format!("http://127.0.0.1:{port}/report/"),
        doc,
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn fetch_charts(client: &Client, base_url: &str) -> Option<ChartsResponse> {
    let resp = client.get(format!("{base_url}/api/charts")).send().await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json().await.ok()
}

async fn wait_for_charts(
    base_url: &str,
    ready: impl Fn(&ChartsResponse) -> bool,
) -> ChartsResponse {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Some(charts) = fetch_charts(&client, base_url).await {
            if ready(&charts) {
                return charts;
            }
        }
        if Instant::now() > deadline {
            panic!("dashboard did not reach the expected state");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_fission_dashboard"))
        .env("PORT", port.to_string())
        .env("DASHBOARD_BASE_URL", &DATA.base_url)
        .env("POLL_INTERVAL_SECS", "1")
        .env("DASHBOARD_TABLES", "1")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_for_charts(&base_url, |charts| charts.widgets.len() == 7).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn click(server: &TestServer, body: Value) -> reqwest::Response {
    Client::new()
        .post(format!("{}/api/click", server.base_url))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_initial_render_exposes_every_widget() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let resp = Client::new()
        .get(format!("{}/api/charts", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(
        resp.headers()["cache-control"].to_str().unwrap(),
        "no-cache, no-store, must-revalidate"
    );
    let charts: ChartsResponse = resp.json().await.unwrap();

    assert!(charts.render_passes >= 1);
    let ids: Vec<_> = charts.widgets.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "m4_milestones",
            "m5_milestones",
            "m4_components",
            "m5_components",
            "m4_assignees",
            "m5_assignees",
            "burndown"
        ]
    );
    assert_eq!(charts.widgets[0].config["type"], "doughnut");
    assert_eq!(charts.widgets[0].tooltips.len(), 2);
    assert_eq!(charts.widgets[6].config["type"], "line");
    assert!(charts.widgets[2].tooltips.is_empty());
}

#[tokio::test]
async fn http_click_routes_links() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let slice: ClickResponse = click(&server, json!({"widget": "m4_milestones", "index": 1}))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(slice.open.as_deref(), Some("http://x"));

    let empty: ClickResponse = click(&server, json!({"widget": "m4_milestones", "index": 0}))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(empty.open, None);

    let total: ClickResponse = click(&server, json!({"widget": "burndown", "dataset": 0, "index": 1}))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(total.open.as_deref(), Some("http://total"));

    let forecast: ClickResponse = click(&server, json!({"widget": "burndown", "dataset": 2, "index": 1}))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(forecast.open, None);

    let unknown = click(&server, json!({"widget": "nope", "index": 0})).await;
    assert_eq!(unknown.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_changed_data_updates_chart_in_place() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let before = wait_for_charts(&server.base_url, |_| true).await;
    let m5_before = before
        .widgets
        .iter()
        .find(|w| w.id == "m5_milestones")
        .map(|w| (w.chart_id, w.revision))
        .unwrap();
    let burndown_before = before.widgets[6].revision;

    let mut doc = base_doc();
    doc["stats"]["statusM5"]["data"] = json!([6, 9]);
    DATA.set(doc);

    let after = wait_for_charts(&server.base_url, |charts| {
        charts
            .widgets
            .iter()
            .any(|w| w.id == "m5_milestones" && w.revision > m5_before.1)
    })
    .await;
    let m5 = after.widgets.iter().find(|w| w.id == "m5_milestones").unwrap();
    assert_eq!(m5.chart_id, m5_before.0);
    assert_eq!(after.widgets[6].revision, burndown_before);
    assert!(after.render_passes > before.render_passes);
}

#[tokio::test]
async fn http_tables_render_behind_flag() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let tables: Value = Client::new()
        .get(format!("{}/api/tables", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(tables["total_milestones"], "2");
    let html = tables["html"].as_str().unwrap();
    assert!(html.contains("https://bugzilla.mozilla.org/show_bug.cgi?id=1525023"));
    assert!(html.contains("M3 Breakdown"));
}
