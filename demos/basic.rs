use chrono::Local;
use multitimer::{RecvError, TimerEvent, TimerRegistry};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .with_target(false)
        .init();

    println!("🚀 Starting multitimer demo...\n");

    let registry = TimerRegistry::builder()
        .initial_interval("2")
        .spawn_initial("false")
        .build()?;

    let mut events = registry.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            let event = events.recv().await;
            let now = Local::now().format("%H:%M:%S%.3f");
            match event {
                Ok(TimerEvent::Ticked { id, elapsed }) => {
                    println!("[{}] ⏱️  {} = {}", now, id, elapsed)
                }
                Ok(other) => println!("[{}] 📣 {:?}", now, other),
                Err(RecvError::Lagged(missed)) => {
                    println!("[{}] ⚠️  missed {} events", now, missed)
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let a = registry.create_timer();
    tokio::time::sleep(Duration::from_millis(6_500)).await;

    registry.adjust_global_interval(3);
    let b = registry.create_timer();
    println!("\n📊 Timers: {:?}\n", registry.list_timers());

    tokio::time::sleep(Duration::from_millis(5_500)).await;
    registry.stop(&b);
    registry.remove_timer(&a);
    registry.adjust_global_interval(-10);

    println!("\n📊 Final state:");
    for snapshot in registry.snapshots() {
        println!("   {:?}", snapshot);
    }
    println!("   Global interval: {}", registry.global_interval());

    registry.shutdown();
    drop(registry);
    printer.await?;

    println!("\n👋 Done.");
    Ok(())
}
