use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use log::debug;

use crate::sprite::GhostMode;

/// Pending Blue -> Normal reversion. Dropping `cancel` wakes the timer
/// thread early and makes it exit without touching the ghosts.
struct Reversion {
    generation: u64,
    cancel: Sender<()>,
}

struct PowerState {
    modes: Vec<GhostMode>,
    timer: Option<Reversion>,
    generation: u64,
    reversions: u64,
}

/// Owns ghost modes and the pill timer.
///
/// Every read or write of the modes, and every arm/disarm of the timer,
/// happens under the one mutex in here. The game loop, the pickup trigger
/// and the timer thread all go through it.
#[derive(Clone)]
pub struct PowerUp {
    state: Arc<Mutex<PowerState>>,
    duration: Duration,
}

impl PowerUp {
    pub fn new(ghosts: usize, duration: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(PowerState {
                modes: vec![GhostMode::Normal; ghosts],
                timer: None,
                generation: 0,
                reversions: 0,
            })),
            duration,
        }
    }

    fn lock(&self) -> MutexGuard<'_, PowerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Turns every ghost Blue and (re)starts the countdown. A reversion
    /// that was already pending is cancelled, so only the latest pill
    /// decides when the ghosts turn back.
    pub fn activate(&self) {
        let mut state = self.lock();
        state.modes.fill(GhostMode::Blue);
        state.timer = None;
        state.generation += 1;

        let generation = state.generation;
        let (cancel, cancelled) = mpsc::channel::<()>();
        state.timer = Some(Reversion { generation, cancel });
        debug!("pill active for {:?} (generation {generation})", self.duration);

        let shared = Arc::clone(&self.state);
        let duration = self.duration;
        thread::spawn(move || match cancelled.recv_timeout(duration) {
            Err(RecvTimeoutError::Timeout) => {
                let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
                // A newer pill may have re-armed between the timeout and the lock.
                if state.timer.as_ref().map(|t| t.generation) == Some(generation) {
                    state.timer = None;
                    state.modes.fill(GhostMode::Normal);
                    state.reversions += 1;
                    debug!("pill expired (generation {generation})");
                }
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
        });
    }

    /// Snapshot of every ghost's mode, in ghost order.
    pub fn modes(&self) -> Vec<GhostMode> {
        self.lock().modes.clone()
    }

    pub fn is_active(&self) -> bool {
        self.lock().timer.is_some()
    }

    /// How many times the ghosts have been turned back to Normal by a timer.
    pub fn reversions(&self) -> u64 {
        self.lock().reversions
    }

    /// Drops any pending reversion without changing the ghost modes.
    pub fn shutdown(&self) {
        if self.lock().timer.take().is_some() {
            debug!("pill timer disarmed");
        }
    }
}
