//! AI Arena Dashboard
//!
//! Terminal status loop for the AI trading arena. Polls the decision schedule
//! once per interval, logs the countdown to the next decision and phase
//! changes, and periodically reports the arena leaderboard and sector rotation.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use session_core::{ArenaOverview, FixtureSet, MarketPhase, StatusBoard};

mod config;

use config::DashboardConfig;

type SharedBoard<Tz> = Arc<Mutex<StatusBoard<Tz>>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting AI arena dashboard");

    let config = DashboardConfig::from_env().context("Invalid dashboard configuration")?;
    info!(
        schedule = %config.schedule,
        poll_ms = config.poll_interval.as_millis() as u64,
        summary_secs = config.summary_interval.as_secs(),
        "Configuration loaded"
    );

    let overview = match &config.fixtures_path {
        Some(path) => {
            let fixtures = FixtureSet::from_path(path)
                .with_context(|| format!("Failed to load fixtures from {}", path.display()))?;
            ArenaOverview::from_fixtures(&fixtures)
        }
        None => {
            info!("No fixture file configured, arena summaries disabled");
            None
        }
    };

    let board: SharedBoard<Local> = Arc::new(Mutex::new(StatusBoard::new(
        config.schedule.clone(),
        config.session_hours.clone(),
        &Local::now(),
    )));
    info!(
        next_decision = %board.lock().tracker().next_decision().naive_local(),
        "Decision tracker armed"
    );

    let status_task = tokio::spawn(run_status_loop(
        board.clone(),
        config.poll_interval,
        Local::now,
        None,
    ));
    let summary_task = tokio::spawn(run_summary_loop(
        overview,
        board.clone(),
        config.summary_interval,
    ));

    let max_runtime = async {
        match config.max_runtime {
            Some(limit) => tokio::time::sleep(limit).await,
            None => std::future::pending::<()>().await,
        }
    };
    let stop = async {
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received...");
            }
            _ = max_runtime => {
                info!("Max runtime reached...");
            }
        }
    };

    info!("Dashboard is running. Press Ctrl+C to stop.");

    supervise(status_task, summary_task, stop).await;

    let board = board.lock();
    info!(
        next_decision = %board.tracker().next_decision().naive_local(),
        decisions_seen = board.tracker().recomputations(),
        "Dashboard shutdown complete"
    );

    Ok(())
}

/// Wait for `stop` or an early exit of the status loop, then abort both loops
/// and wait until they are gone.
async fn supervise<F>(mut status_task: JoinHandle<u64>, summary_task: JoinHandle<()>, stop: F)
where
    F: Future<Output = ()>,
{
    let status_finished = tokio::select! {
        _ = stop => false,
        result = &mut status_task => {
            warn!(?result, "Status loop exited unexpectedly");
            true
        }
    };

    status_task.abort();
    summary_task.abort();

    // A finished handle must not be polled again
    if !status_finished {
        let _ = status_task.await;
    }
    let _ = summary_task.await;
}

/// Poll the board every `period` with the time from `clock`.
///
/// Runs forever unless `max_ticks` is given; returns the number of decision
/// slots reached while polling.
async fn run_status_loop<Tz, C>(
    board: SharedBoard<Tz>,
    period: Duration,
    clock: C,
    max_ticks: Option<u64>,
) -> u64
where
    Tz: TimeZone,
    C: Fn() -> DateTime<Tz>,
{
    let mut interval = tokio::time::interval(period);
    let mut last_phase: Option<MarketPhase> = None;
    let mut decisions = 0;
    let mut ticks = 0;

    loop {
        interval.tick().await;

        let now = clock();
        let snapshot = board.lock().tick(&now);

        if last_phase != Some(snapshot.phase) {
            info!(
                phase = %snapshot.phase,
                at = %snapshot.at.naive_local(),
                "Market phase changed"
            );
            last_phase = Some(snapshot.phase);
        }

        if snapshot.rolled_over {
            decisions += 1;
            info!(
                slot = ?snapshot.slot_index,
                next_decision = %snapshot.next_decision.naive_local(),
                "Decision slot reached"
            );
        }

        debug!(
            countdown = %snapshot.countdown,
            next_decision = %snapshot.next_decision.naive_local(),
            "Status"
        );

        ticks += 1;
        if max_ticks.is_some_and(|max| ticks >= max) {
            return decisions;
        }
    }
}

async fn run_summary_loop<Tz: TimeZone>(
    overview: Option<ArenaOverview>,
    board: SharedBoard<Tz>,
    period: Duration,
) {
    let mut interval = tokio::time::interval(period);

    loop {
        interval.tick().await;

        let (next_decision, schedule) = {
            let board = board.lock();
            let tracker = board.tracker();
            (tracker.next_decision().naive_local(), tracker.schedule().to_string())
        };
        info!(next_decision = %next_decision, schedule = %schedule, "Decision schedule");

        let Some(overview) = &overview else {
            continue;
        };
        log_overview(overview);
    }
}

fn log_overview(overview: &ArenaOverview) {
    let arena = &overview.arena;
    info!(
        models = arena.model_count,
        active = arena.active_count,
        avg_return_pct = %format!("{:.2}", arena.average_return),
        best = %arena.best_model_name,
        positions = arena.total_positions,
        "Arena summary"
    );
    info!(
        advancers = overview.breadth.advancers,
        decliners = overview.breadth.decliners,
        unchanged = overview.breadth.unchanged,
        "Market breadth"
    );

    for sector in &overview.sectors {
        let leaders: Vec<&str> = sector.leaders.iter().map(|s| s.code.as_str()).collect();
        info!(
            sector = %sector.sector,
            stocks = sector.stock_count,
            avg_change_pct = %format!("{:.2}", sector.avg_change_percent),
            volume = sector.total_volume,
            leaders = ?leaders,
            "Sector rotation"
        );
    }

    let positions = &overview.positions;
    info!(
        positions = positions.position_count,
        total_pnl = %format!("{:.2}", positions.total_pnl),
        total_value = %format!("{:.2}", positions.total_value),
        "Open positions"
    );
    info!(
        buy = overview.decisions.buy,
        sell = overview.decisions.sell,
        hold = overview.decisions.hold,
        "Decision feed"
    );

    match serde_json::to_string(overview) {
        Ok(json) => debug!(overview = %json, "Arena overview"),
        Err(e) => warn!("Failed to serialize arena overview: {}", e),
    }
}
