//! Async driver: animation loop + production timer.
//!
//! Two repeating tasks per simulator, sharing only the watched config:
//! the animation loop ticks the particle field once per frame, and the
//! production timer invokes the node's production callback at the period
//! derived from the configured rate. Both select on one cancellation
//! token; dropping the [`Simulator`] handle cancels them on every exit
//! path, so no timer can outlive its node.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval, interval_at};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, trace};

use crate::config::{SimConfig, Viewport};
use crate::field::ParticleField;
use crate::particle::Particle;

/// Frame cadence of the animation loop.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Zero-argument production callback, supplied by the surrounding workflow.
///
/// Invoked once per derived period while the node is enabled with a positive
/// rate. The workflow decides what producing one event means (typically
/// materializing a new case record). Expected to hand off promptly rather
/// than block the timer task.
pub type ProduceFn = Arc<dyn Fn() + Send + Sync>;

/// Builder for [`Simulator`].
pub struct SimulatorBuilder {
    config: SimConfig,
    on_produce: Option<ProduceFn>,
}

impl SimulatorBuilder {
    /// Attach the production callback.
    #[must_use]
    pub fn on_produce(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_produce = Some(Arc::new(callback));
        self
    }

    /// Spawn both tasks and return the owning handle.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(self) -> Simulator {
        let (config_tx, config_rx) = watch::channel(self.config);
        let field = Arc::new(Mutex::new(ParticleField::new()));
        let cancel = CancellationToken::new();

        let animation = tokio::spawn(run_animation(
            Arc::clone(&field),
            config_rx.clone(),
            cancel.clone(),
        ));
        let production = tokio::spawn(run_production(config_rx, cancel.clone(), self.on_produce));

        debug!("simulator started");

        Simulator {
            config_tx,
            field,
            animation,
            production,
            _guard: cancel.drop_guard(),
        }
    }
}

/// Handle owning one node's simulation tasks.
///
/// The handle is the scope of both repeating tasks: dropping it (node
/// removed from the canvas) cancels them; [`Simulator::shutdown`] cancels
/// and awaits them.
pub struct Simulator {
    config_tx: watch::Sender<SimConfig>,
    field: Arc<Mutex<ParticleField>>,
    animation: JoinHandle<()>,
    production: JoinHandle<()>,
    _guard: DropGuard,
}

impl Simulator {
    /// Start building a simulator with the given configuration.
    #[must_use]
    pub fn builder(config: SimConfig) -> SimulatorBuilder {
        SimulatorBuilder {
            config,
            on_produce: None,
        }
    }

    /// Current configuration snapshot.
    #[must_use]
    pub fn config(&self) -> SimConfig {
        self.config_tx.borrow().clone()
    }

    /// Replace the whole configuration.
    pub fn update_config(&self, config: SimConfig) {
        let disabling = !config.enabled;
        self.config_tx.send_replace(config);
        if disabling {
            self.clear_particles();
        }
    }

    /// Change the configured rate. Takes effect at the next spawn decision
    /// and re-arms the production timer; in-flight particles are untouched.
    pub fn set_rate(&self, events_per_minute: f64) {
        self.config_tx
            .send_modify(|c| c.events_per_minute = events_per_minute);
    }

    /// Enable or disable the node. Disabling clears all live particles
    /// immediately and parks both loops; no further production callback
    /// fires, even if one was due.
    pub fn set_enabled(&self, enabled: bool) {
        self.config_tx.send_modify(|c| c.enabled = enabled);
        if !enabled {
            self.clear_particles();
        }
    }

    /// Re-derive pixel dimensions after a host resize. Particle state is
    /// not restarted.
    pub fn resize(&self, viewport: Viewport) {
        self.config_tx.send_modify(|c| c.viewport = viewport);
    }

    /// Snapshot of the live particles for rendering.
    #[must_use]
    pub fn particles(&self) -> Vec<Particle> {
        self.field
            .lock()
            .map(|f| f.particles().to_vec())
            .unwrap_or_default()
    }

    /// Live particle count.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.field.lock().map(|f| f.len()).unwrap_or_default()
    }

    /// Cancel both tasks and wait for them to finish.
    pub async fn shutdown(self) {
        self._guard.disarm().cancel();
        let _ = self.animation.await;
        let _ = self.production.await;
        debug!("simulator shut down");
    }

    fn clear_particles(&self) {
        if let Ok(mut field) = self.field.lock() {
            field.clear();
        }
    }
}

/// One tick per frame: read the config snapshot, advance the field.
///
/// While disabled the field stays cleared and the loop parks until the
/// config changes again.
async fn run_animation(
    field: Arc<Mutex<ParticleField>>,
    mut config_rx: watch::Receiver<SimConfig>,
    cancel: CancellationToken,
) {
    let mut rng = StdRng::from_entropy();
    let start = Instant::now();
    let mut frames = interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let config = config_rx.borrow_and_update().clone();
        if config.enabled {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                changed = config_rx.changed() => {
                    // Re-read the snapshot before the next frame so a
                    // disable never spawns into a cleared field.
                    if changed.is_err() {
                        break;
                    }
                },
                _ = frames.tick() => {
                    let now_ms = start.elapsed().as_secs_f64() * 1000.0;
                    if let Ok(mut f) = field.lock() {
                        f.tick(now_ms, &config, &mut rng);
                    }
                },
            }
        } else {
            if let Ok(mut f) = field.lock() {
                f.clear();
            }
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                changed = config_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                },
            }
        }
    }
    trace!("animation loop stopped");
}

/// Fixed-period production timer, re-armed on every config change.
///
/// The first fire comes one full period after arming, never immediately,
/// and a due-but-unfired tick is discarded when the timer is disarmed.
async fn run_production(
    mut config_rx: watch::Receiver<SimConfig>,
    cancel: CancellationToken,
    on_produce: Option<ProduceFn>,
) {
    let Some(produce) = on_produce else {
        return;
    };

    loop {
        let (enabled, period) = {
            let config = config_rx.borrow_and_update();
            (config.enabled, config.production_period())
        };

        match period {
            Some(period) if enabled => {
                let first = Instant::now()
                    .checked_add(period)
                    .unwrap_or_else(Instant::now);
                let mut ticks = interval_at(first, period);
                loop {
                    tokio::select! {
                        biased;
                        () = cancel.cancelled() => {
                            trace!("production timer cancelled");
                            return;
                        },
                        changed = config_rx.changed() => {
                            if changed.is_err() {
                                return;
                            }
                            // Rate or enabled flag changed: re-derive.
                            break;
                        },
                        _ = ticks.tick() => {
                            trace!(period_ms = period.as_millis() as u64, "production tick");
                            produce();
                        },
                    }
                }
            },
            _ => {
                // Disabled or non-positive rate: timer is not armed.
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => return,
                    changed = config_rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                    },
                }
            },
        }
    }
}
