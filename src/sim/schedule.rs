//! Deferred cues keyed by board epoch
//!
//! Game logic completes synchronously; the scheduler only sequences what the
//! presentation sees afterwards (staggered basket releases, the end of a level
//! transition). Every board teardown bumps the epoch, and cues queued under
//! an older epoch are dropped when they come due.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Presentation release of one basket egg (already scored)
    BasketEggReleased { column: usize, index: u8 },
    /// Level transition finished; start the next timer
    TransitionComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    due_tick: u64,
    epoch: u32,
    seq: u64,
    cue: Cue,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: Vec<Pending>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_tick: u64, epoch: u32, cue: Cue) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due_tick,
            epoch,
            seq,
            cue,
        });
    }

    /// Remove and return cues due at `now` that belong to `epoch`, in order
    pub fn drain_due(&mut self, now: u64, epoch: u32) -> Vec<Cue> {
        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.due_tick <= now {
                due.push(*p);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|p| (p.due_tick, p.seq));

        due.into_iter()
            .filter(|p| {
                let fresh = p.epoch == epoch;
                if !fresh {
                    log::debug!("Dropping stale cue {:?} from epoch {} (now {})", p.cue, p.epoch, epoch);
                }
                fresh
            })
            .map(|p| p.cue)
            .collect()
    }

    /// Drop everything queued before `epoch`
    pub fn discard_before(&mut self, epoch: u32) {
        self.pending.retain(|p| p.epoch >= epoch);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
