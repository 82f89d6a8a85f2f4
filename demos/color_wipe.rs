//! Color wipe demo
//!
//! Run with: cargo run --example color_wipe [BIND_ADDR]
//!
//! Examples:
//!   cargo run --example color_wipe                   # binds to 0.0.0.0:8080
//!   cargo run --example color_wipe localhost         # binds to 127.0.0.1:8080
//!   cargo run --example color_wipe 127.0.0.1:3030    # binds to 127.0.0.1:3030
//!
//! Serves the WebSocket endpoint at /ws and runs an endless color wipe
//! across a 16-LED strip. Point a ws2811 browser simulator at
//! ws://localhost:8080/ws to watch it.

use std::net::SocketAddr;

use ws2811_sim::{DeviceOptions, Hub, ServerConfig, Ws2811};

const COLORS: [u32; 3] = [0xFF0000, 0x00FF00, 0x0000FF];

/// Parse bind address from command line argument.
///
/// Accepts formats:
/// - "localhost" -> 127.0.0.1:8080
/// - "127.0.0.1" -> 127.0.0.1:8080
/// - "127.0.0.1:3030" -> 127.0.0.1:3030
fn parse_bind_addr(arg: &str) -> Result<SocketAddr, String> {
    const DEFAULT_PORT: u16 = 8080;

    let normalized = arg.replace("localhost", "127.0.0.1");

    if let Ok(addr) = normalized.parse::<SocketAddr>() {
        return Ok(addr);
    }

    if let Ok(ip) = normalized.parse::<std::net::IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    Err(format!(
        "Invalid bind address: '{}'. Expected format: IP:PORT or IP or 'localhost'",
        arg
    ))
}

fn print_usage() {
    eprintln!("Usage: color_wipe [BIND_ADDR]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  BIND_ADDR    Address to bind to (default: 0.0.0.0:8080)");
}

async fn color_wipe(device: &mut Ws2811) -> ws2811_sim::Result<()> {
    let led_count = device.options().channels[0].led_count;
    let mut frame = vec![0u32; led_count];

    loop {
        for color in COLORS {
            for i in 0..led_count {
                frame[i] = color;
                device.set_leds_sync(0, &frame[..=i]).await?;
                device.render().await?;
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let bind_addr = match args.get(1) {
        Some(addr_str) => match parse_bind_addr(addr_str) {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        },
        None => "0.0.0.0:8080".parse().unwrap(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ws2811_sim=debug".parse()?),
        )
        .init();

    let hub = Hub::spawn();
    let config = ServerConfig::with_addr(bind_addr);
    println!("Serving LED frames on ws://{}{}", bind_addr, config.endpoint);

    let server_hub = hub.clone();
    tokio::spawn(async move {
        if let Err(e) = ws2811_sim::serve(config, server_hub).await {
            eprintln!("Server error: {}", e);
        }
    });

    let mut device = Ws2811::new(&DeviceOptions::default(), hub.clone());
    device.init()?;

    tokio::select! {
        result = color_wipe(&mut device) => {
            if let Err(e) = result {
                eprintln!("Animation error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\nShutting down...");
        }
    }

    device.fini();
    hub.shutdown();
    Ok(())
}
