//! Connect to a speaker, print its state, and follow push updates.
//!
//! Usage: cargo run --example basic_usage -- 192.168.1.1

use std::time::Duration;

use soundtouch_sdk::{discover_devices, SoundTouchDevice};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let device = match std::env::args().nth(1) {
        Some(host) => SoundTouchDevice::connect(&host)?,
        None => {
            println!("no host given, discovering...");
            let mut devices = discover_devices(Duration::from_secs(3))?;
            if devices.is_empty() {
                eprintln!("no SoundTouch devices found");
                return Ok(());
            }
            devices.remove(0)
        }
    };

    let config = device.config(false)?;
    println!(
        "{} ({}) at {}",
        config.name.as_deref().unwrap_or("unknown"),
        config.device_type.as_deref().unwrap_or("unknown"),
        device.host()
    );

    let status = device.status(true)?;
    println!("source: {}", status.source);
    if let Some(track) = &status.track {
        println!("track: {track}");
    }
    let volume = device.volume(true)?;
    println!("volume: {} (muted: {})", volume.actual, volume.muted);

    for preset in device.presets(true)? {
        println!(
            "preset {}: {}",
            preset.preset_id.unwrap_or(0),
            preset.name.as_deref().unwrap_or("-")
        );
    }

    device.add_volume_listener(|volume| println!("volume -> {}", volume.actual));
    device.add_status_listener(|status| {
        println!(
            "now playing -> {} {}",
            status.source,
            status.track.as_deref().unwrap_or("")
        )
    });
    device.start_notifications()?;
    println!("listening for updates, ctrl-c to quit");
    loop {
        std::thread::sleep(Duration::from_secs(60));
    }
}
