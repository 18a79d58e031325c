use std::time::{Duration, Instant};

/// Bookkeeping for the single submission a form may have in flight.
#[derive(Debug, Clone, Default)]
pub struct SubmitRunState {
    in_flight: Option<u64>,
    last_started_at: Option<Instant>,
    last_finished_run_id: Option<u64>,
    last_finished_at: Option<Instant>,
    sequence: u64,
}

impl SubmitRunState {
    pub fn is_running(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    pub fn last_finished_run_id(&self) -> Option<u64> {
        self.last_finished_run_id
    }

    /// How long the latest finished run took.
    pub fn last_duration(&self) -> Option<Duration> {
        match (self.last_started_at, self.last_finished_at) {
            (Some(started), Some(finished)) => Some(finished.saturating_duration_since(started)),
            _ => None,
        }
    }

    /// Claims the slot and returns a fresh run id, or `None` while another
    /// run holds it.
    pub fn try_start(&mut self, now: Instant) -> Option<u64> {
        if self.in_flight.is_some() {
            return None;
        }
        self.sequence = self.sequence.saturating_add(1);
        self.in_flight = Some(self.sequence);
        self.last_started_at = Some(now);
        Some(self.sequence)
    }

    /// Releases the slot if `run_id` is the one holding it.
    pub fn finish(&mut self, run_id: u64, now: Instant) -> bool {
        if self.in_flight != Some(run_id) {
            return false;
        }
        self.in_flight = None;
        self.last_finished_run_id = Some(run_id);
        self.last_finished_at = Some(now);
        true
    }
}
