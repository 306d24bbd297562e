use hdrhistogram::Histogram;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Tick-timing instrumentation for the control task. Lives off the control
/// path's hot data (the loop only calls `record_tick` once per iteration).
#[derive(Clone)]
pub struct TickMetrics {
    tick_hist: Arc<Mutex<Histogram<u64>>>,
    overruns: Arc<Mutex<u64>>,
}

impl TickMetrics {
    pub fn new() -> Self {
        Self {
            tick_hist: Arc::new(Mutex::new(Histogram::new(3).unwrap())),
            overruns: Arc::new(Mutex::new(0)),
        }
    }

    /// Record one tick's compute duration; a tick that ran longer than the
    /// configured period counts as an overrun.
    pub fn record_tick(&self, duration: Duration, period: Duration) {
        self.tick_hist.lock().record(duration.as_nanos() as u64).ok();
        if duration > period {
            *self.overruns.lock() += 1;
        }
    }

    pub fn report(&self) -> TickReport {
        let hist = self.tick_hist.lock();
        TickReport {
            ticks: hist.len(),
            tick_p50: Duration::from_nanos(hist.value_at_quantile(0.5)),
            tick_p99: Duration::from_nanos(hist.value_at_quantile(0.99)),
            tick_max: Duration::from_nanos(hist.max()),
            overruns: *self.overruns.lock(),
        }
    }
}

#[derive(Debug)]
pub struct TickReport {
    pub ticks: u64,
    pub tick_p50: Duration,
    pub tick_p99: Duration,
    pub tick_max: Duration,
    pub overruns: u64,
}
