use multitimer::{RecvError, RegistryBuilder, TimerEvent};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()))
        .with_target(false)
        .init();

    println!("🚀 Starting multitimer with config...\n");
    println!("📝 Configuration (demos/config/multitimer.yaml):");
    println!("   - timer.interval: starting global interval");
    println!("   - timer.tick: wall-clock length of one interval unit");
    println!("   - override with APP_TIMER__INTERVAL / APP_TIMER__TICK\n");

    let registry = RegistryBuilder::with_yaml("demos/config/multitimer.yaml")?
        .initial_interval("${timer.interval:1}")
        .tick_unit("${timer.tick:1s}")
        .event_capacity("${timer.event_capacity:64}")
        .build()?;

    let mut events = registry.subscribe();

    println!("✅ Started with {:?}. Press Ctrl+C to stop.\n", registry.list_timers());

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(TimerEvent::Ticked { id, elapsed }) if elapsed % 10 == 0 => {
                    println!("  {} reached {}, adding another timer", id, elapsed);
                    registry.adjust_global_interval(1);
                    registry.create_timer();
                }
                Ok(_) => {}
                Err(RecvError::Lagged(missed)) => println!("  ⚠️  missed {} events", missed),
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    println!("\n👋 Shutting down...");
    registry.shutdown();
    Ok(())
}
