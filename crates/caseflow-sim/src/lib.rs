//! Caseflow Sim - rate-controlled particle simulator for stream nodes.
//!
//! Each stream-producing node on the canvas owns one [`Simulator`]. The
//! simulator runs two independent repeating tasks that share only the node's
//! configuration:
//!
//! 1. **Animation loop**: one tick per frame; spawns, advances, and retires
//!    bounded-lifetime particles so the node can render in-flight traffic.
//!    The visual stream is illustrative: its spawn timing is randomized and
//!    never drives workflow state.
//! 2. **Production timer**: fires the node's production callback at a fixed
//!    period derived from the same configured rate. This timer is the source
//!    of truth for actual case/event creation.
//!
//! Both tasks are armed and torn down together with the node's enabled
//! state, and are fully cancelled when the owning [`Simulator`] handle is
//! dropped; a repeating timer that outlives its node is a correctness bug,
//! not a resource-pressure detail.
//!
//! # Example
//!
//! ```rust
//! use caseflow_sim::{SimConfig, Simulator};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let produced = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&produced);
//!
//! let sim = Simulator::builder(SimConfig::new(120.0))
//!     .on_produce(move || {
//!         counter.fetch_add(1, Ordering::Relaxed);
//!     })
//!     .start();
//!
//! // ... the node renders `sim.particles()` every frame ...
//!
//! sim.shutdown().await;
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod config;
mod engine;
mod field;
mod particle;

pub use config::{
    DEFAULT_EVENTS_PER_MINUTE, DEFAULT_MAX_PARTICLES, MIN_SPAWN_RATE, SimConfig, Viewport,
};
pub use engine::{ProduceFn, Simulator, SimulatorBuilder};
pub use field::ParticleField;
pub use particle::Particle;
