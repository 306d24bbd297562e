use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use brake_controller::{
    spawn_brake_thread, BrakeStatus, BrakeTerminal, MotorDriver, SharedConfig, SimulatedMotor,
    SoftWatchdog, TickMetrics,
};

fn main() {
    println!("===========================================");
    println!("Starting RPM Brake Controller (simulated)");
    println!("===========================================\n");

    let motor = Arc::new(SimulatedMotor::new(2500.0, 42));
    let watchdog = Arc::new(SoftWatchdog::new());
    let config = SharedConfig::new();
    let status = BrakeStatus::new();
    let metrics = TickMetrics::new();

    let handle = spawn_brake_thread(
        motor.clone(),
        watchdog.clone(),
        config.clone(),
        status.clone(),
        metrics.clone(),
    );

    let terminal = BrakeTerminal::new(config.clone(), status.clone(), motor.clone());
    for line in terminal.handle("") {
        println!("{}", line);
    }

    println!("Enabling brake, target {:.0} rpm\n", config.target_rpm.load());
    terminal.handle("on");

    for _ in 0..10 {
        std::thread::sleep(Duration::from_millis(300));
        println!(
            "rpm {:8.1} | regime {:>9} | command {:7.3} A | integral {:9.3}",
            motor.read_rpm(),
            status.regime().label(),
            status.command.load(),
            status.integral.load(),
        );
    }

    terminal.handle("off");

    println!("\n===========================================");
    println!("Demo run complete - initiating shutdown");
    status.shutdown.store(true, Ordering::Relaxed);
    let _ = handle.join();

    let report = metrics.report();
    println!("Ticks executed: {} ({} overruns)", report.ticks, report.overruns);
    println!(
        "Tick compute p50: {:?}, p99: {:?}, max: {:?}",
        report.tick_p50, report.tick_p99, report.tick_max
    );
    println!("Watchdog feeds: {}", watchdog.feeds());
    println!("Packed status: 0b{:08b}", status.packed());
    println!();
    for line in terminal.handle("") {
        println!("{}", line);
    }
}
