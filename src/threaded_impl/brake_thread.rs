use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::benchmark::metrics::TickMetrics;
use crate::control::brake::BrakeLoop;
use crate::ipc::shared_state::{BrakeStatus, SharedConfig};
use crate::motor::driver::{MotorDriver, Watchdog};

/// Floor on the end-of-tick sleep so other threads are never starved when the
/// configured rate outruns the scheduler resolution.
const MIN_TICK_SLEEP: Duration = Duration::from_micros(100);

/// Spawn the periodic control task. It ticks at the configured rate whether or
/// not the controller is enabled (so an `on` takes effect within one tick),
/// feeds the watchdog every iteration, and exits cooperatively when
/// `status.shutdown` is set, finishing the in-progress tick first.
pub fn spawn_brake_thread<D, W>(
    driver: Arc<D>,
    watchdog: Arc<W>,
    config: Arc<SharedConfig>,
    status: Arc<BrakeStatus>,
    metrics: TickMetrics,
) -> thread::JoinHandle<()>
where
    D: MotorDriver + 'static,
    W: Watchdog + 'static,
{
    thread::spawn(move || {
        status.running.store(true, Ordering::Relaxed);
        let mut brake = BrakeLoop::new(driver, config.clone(), status.clone());

        loop {
            let tick_start = Instant::now();
            brake.tick();

            // Rate is re-read each iteration so terminal changes apply on the
            // next tick boundary.
            let period = Duration::from_secs_f32(config.tick_period_secs());
            let elapsed = tick_start.elapsed();
            metrics.record_tick(elapsed, period);

            let sleep_time = period.saturating_sub(elapsed);
            thread::sleep(sleep_time.max(MIN_TICK_SLEEP));

            if status.shutdown.load(Ordering::Relaxed) {
                status.running.store(false, Ordering::Relaxed);
                return;
            }

            watchdog.reset();
        }
    })
}
