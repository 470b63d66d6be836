use crate::errors::DashboardError;
use crate::source::DataSource;
use crate::state::SharedDashboard;
use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{error, info, warn};

/// Fetches while waiting for `ready`, then renders the first payload as the baseline.
pub async fn init<S: DataSource>(
    dashboard: &SharedDashboard,
    source: &S,
    ready: impl Future<Output = ()>,
) -> Result<(), DashboardError> {
    let (fetched, ()) = tokio::join!(source.fetch(), ready);
    let payload = fetched?;
    dashboard.lock().await.apply_initial(payload)
}

/// One poll cycle. Returns whether the page was re-rendered.
pub async fn update<S: DataSource>(
    dashboard: &SharedDashboard,
    source: &S,
) -> Result<bool, DashboardError> {
    let payload = source.fetch().await?;
    dashboard.lock().await.apply(payload)
}

/// Initializes, then polls every `period` for the life of the process.
///
/// Cycles run back to back on one task, so fetches never overlap. A failed
/// cycle is logged and the next tick tries again; a failed initialization
/// never starts the timer.
pub async fn run<S: DataSource>(
    dashboard: SharedDashboard,
    source: S,
    ready: impl Future<Output = ()>,
    period: Duration,
) {
    if let Err(err) = init(&dashboard, &source, ready).await {
        error!("initial load failed, polling not started: {err}");
        return;
    }
    info!(period_secs = period.as_secs(), "dashboard rendered, polling");

    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        match update(&dashboard, &source).await {
            Ok(true) => info!("data changed, dashboard re-rendered"),
            Ok(false) => {}
            Err(err) => warn!("poll failed: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Features;
    use crate::source::testing::ScriptedSource;
    use crate::state::AppState;
    use serde_json::{Value, json};
    use tokio::sync::oneshot;
    use tokio::time::sleep;

    const PERIOD: Duration = Duration::from_secs(300);

    fn doc(open: u64) -> Value {
        json!({"stats": {"statusM4": {"labels": ["Open", "Closed"], "data": [open, 10], "links": ["", ""]}}})
    }

    #[tokio::test]
    async fn init_waits_for_page_ready() {
        let state = AppState::new(Features::default());
        let source = ScriptedSource::new([doc(1)]);
        let (tx, rx) = oneshot::channel::<()>();

        let dashboard = state.dashboard.clone();
        let task = tokio::spawn(async move {
            init(&dashboard, &source, async move {
                let _ = rx.await;
            })
            .await
        });
        tokio::task::yield_now().await;
        assert_eq!(state.dashboard.lock().await.render_passes(), 0);

        tx.send(()).unwrap();
        task.await.unwrap().unwrap();
        assert_eq!(state.dashboard.lock().await.render_passes(), 1);
    }

    #[tokio::test]
    async fn update_skips_identical_payloads() {
        let state = AppState::new(Features::default());
        let source = ScriptedSource::new([doc(1), doc(1), doc(2)]);
        init(&state.dashboard, &source, async {}).await.unwrap();

        assert!(!update(&state.dashboard, &source).await.unwrap());
        assert!(update(&state.dashboard, &source).await.unwrap());
        let dash = state.dashboard.lock().await;
        assert_eq!(dash.render_passes(), 2);
        assert_eq!(dash.page().constructions(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn polls_on_every_interval() {
        let state = AppState::new(Features::default());
        let source = ScriptedSource::new([doc(1), doc(1), doc(2), doc(3)]);
        tokio::spawn(run(state.dashboard.clone(), source.clone(), async {}, PERIOD));

        sleep(Duration::from_secs(1)).await;
        assert_eq!(source.calls(), 1);

        sleep(PERIOD * 3).await;
        assert_eq!(source.calls(), 4);
        let dash = state.dashboard.lock().await;
        assert_eq!(dash.render_passes(), 3);
        assert_eq!(dash.page().constructions(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_poll_does_not_stop_the_timer() {
        let state = AppState::new(Features::default());
        let source = ScriptedSource::new([doc(1)]);
        source.push_failure();
        source.push(doc(2));
        tokio::spawn(run(state.dashboard.clone(), source.clone(), async {}, PERIOD));

        sleep(PERIOD * 2 + Duration::from_secs(1)).await;
        assert_eq!(source.calls(), 3);
        assert_eq!(state.dashboard.lock().await.render_passes(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_init_never_starts_polling() {
        let state = AppState::new(Features::default());
        let source = ScriptedSource::default();
        source.push_failure();
        source.push(doc(1));
        tokio::spawn(run(state.dashboard.clone(), source.clone(), async {}, PERIOD));

        sleep(PERIOD * 3).await;
        assert_eq!(source.calls(), 1);
        assert_eq!(state.dashboard.lock().await.render_passes(), 0);
    }
}
