//! Real-time session driven by a tokio interval
//!
//! Each tick advances the simulated output, reports the new position to the
//! engine, handles track ends and lets the engine heartbeat its snapshot.

use crate::commands::settle;
use crate::error::{CliError, Result};
use crate::session::Session;
use harmony_playback::AudioOutput;
use std::future::Future;
use tokio::time::MissedTickBehavior;

/// Why a simulation returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The requested duration elapsed
    Elapsed,
    /// Playback stopped on its own (end of a sequence, pause, error)
    PlaybackStopped,
    /// The shutdown future completed
    Interrupted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub ticks: u64,
    pub simulated_seconds: f64,
    pub tracks_finished: usize,
    pub heartbeats: usize,
    pub reason: StopReason,
}

/// Play for `seconds` of simulated time, or until `shutdown` resolves
///
/// A snapshot is saved on the way out whatever the reason.
pub async fn simulate<F>(session: &Session, seconds: f64, shutdown: F) -> Result<SimulationReport>
where
    F: Future<Output = ()>,
{
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(CliError::InvalidArgument(format!(
            "simulation length must be positive, got {}",
            seconds
        )));
    }

    let tick = session.config().tick_interval();
    let step = tick.as_secs_f64() * session.config().simulation.speed;
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    interval.tick().await;

    let mut report = SimulationReport {
        ticks: 0,
        simulated_seconds: 0.0,
        tracks_finished: 0,
        heartbeats: 0,
        reason: StopReason::Elapsed,
    };

    tokio::pin!(shutdown);
    loop {
        if report.simulated_seconds >= seconds {
            report.reason = StopReason::Elapsed;
            break;
        }
        if !session.engine().lock().is_playing() {
            report.reason = StopReason::PlaybackStopped;
            break;
        }

        tokio::select! {
            () = &mut shutdown => {
                report.reason = StopReason::Interrupted;
                break;
            }
            _ = interval.tick() => {
                advance(session, step, &mut report);
            }
        }
    }

    session.engine().lock().save_now();
    tracing::info!(
        "Simulation stopped ({:?}) after {:.1}s, {} track(s) finished",
        report.reason,
        report.simulated_seconds,
        report.tracks_finished
    );
    Ok(report)
}

fn advance(session: &Session, step: f64, report: &mut SimulationReport) {
    let output = session.output();
    let mut engine = session.engine().lock();

    report.ticks += 1;
    report.simulated_seconds += step;

    let ended = output.advance(step);
    engine.on_time_update(output.position());
    if ended {
        report.tracks_finished += 1;
        if let Err(e) = engine.on_track_ended() {
            tracing::warn!("Failed to continue after track end: {}", e);
        }
        settle(&mut engine);
    }
    if engine.heartbeat() {
        report.heartbeats += 1;
    }
}
