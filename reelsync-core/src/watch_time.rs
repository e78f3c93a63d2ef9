/// Buckets elapsed playing seconds and hands out bounded flush deltas.
///
/// The caller ticks this once per playback-second while playing and turns
/// every returned delta into exactly one persistence call. Residuals are
/// drained on pause, stop, and unmount, so across any pause/resume sequence
/// the flushed deltas sum to the ticked seconds: no double count, no loss.
#[derive(Debug)]
pub struct WatchTimeAccumulator {
    accumulated: u32,
    flush_threshold: u32,
}

impl WatchTimeAccumulator {
    pub fn new(flush_threshold: u32) -> Self {
        Self {
            accumulated: 0,
            // A zero threshold would starve flushes forever.
            flush_threshold: flush_threshold.max(1),
        }
    }

    /// Record one second of playback. Returns the delta to flush when the
    /// threshold is reached, resetting the counter.
    pub fn on_tick(&mut self) -> Option<u32> {
        self.accumulated += 1;
        if self.accumulated >= self.flush_threshold {
            Some(std::mem::take(&mut self.accumulated))
        } else {
            None
        }
    }

    /// Take any nonzero residual on a stop/unmount edge.
    pub fn drain(&mut self) -> Option<u32> {
        match std::mem::take(&mut self.accumulated) {
            0 => None,
            residual => Some(residual),
        }
    }

    pub fn accumulated(&self) -> u32 {
        self.accumulated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flushes_exactly_at_threshold() {
        let mut acc = WatchTimeAccumulator::new(5);
        for _ in 0..4 {
            assert_eq!(acc.on_tick(), None);
        }
        assert_eq!(acc.on_tick(), Some(5));
        assert_eq!(acc.accumulated(), 0);
    }

    #[test]
    fn drain_returns_residual_once() {
        let mut acc = WatchTimeAccumulator::new(5);
        acc.on_tick();
        acc.on_tick();
        assert_eq!(acc.drain(), Some(2));
        assert_eq!(acc.drain(), None);
    }

    #[test]
    fn flushed_deltas_sum_to_ticks_across_pause_resume() {
        // Arbitrary play/pause schedule: play N ticks, then drain, repeat.
        let schedule = [3u32, 7, 5, 1, 12, 4];
        let mut acc = WatchTimeAccumulator::new(5);
        let mut flushed = 0u32;

        for &burst in &schedule {
            for _ in 0..burst {
                if let Some(delta) = acc.on_tick() {
                    flushed += delta;
                }
            }
            if let Some(residual) = acc.drain() {
                flushed += residual;
            }
        }

        assert_eq!(flushed, schedule.iter().sum::<u32>());
        assert_eq!(acc.accumulated(), 0);
    }

    #[test]
    fn zero_threshold_is_clamped() {
        let mut acc = WatchTimeAccumulator::new(0);
        assert_eq!(acc.on_tick(), Some(1));
    }
}
