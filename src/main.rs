// src/main.rs - Arm command server
use clap::Parser;
use tokio_util::sync::CancellationToken;

use robo_arm_rs::communication::UdpServer;
use robo_arm_rs::config::{self, Config};

/// Simulated multi-joint robot arm controller speaking a text protocol over UDP.
#[derive(Parser, Debug)]
#[command(name = "arm-server", version, about)]
struct Cli {
    /// Path to a TOML config file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<String>,

    /// Bind address (overrides the config file)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Number of joints (overrides the config file)
    #[arg(short, long)]
    joints: Option<usize>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,

    /// Log example netcat commands for poking the server by hand
    #[arg(long)]
    hints: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .init();

    tracing::info!("Starting robot arm command server");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = match cli.config.as_deref() {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            config::load_config(path).map_err(|e| {
                tracing::error!("Failed to load config from '{}': {}", path, e);
                Box::new(e) as Box<dyn std::error::Error + Send + Sync + 'static>
            })?
        }
        None => Config::default(),
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(joints) = cli.joints {
        config.arm.joints = joints;
    }
    if let Err(e) = config.validate() {
        tracing::error!("{}", e);
        return Err(e.into());
    }

    tracing::info!("Joints: {} (0..{}°)", config.arm.joints, config.arm.max_angle);
    tracing::info!("Animation rate: {} Hz", config.motion.update_rate_hz);

    if cli.hints {
        log_hints(&config);
    }

    let server = UdpServer::bind(&config).await?;

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Interrupt received"),
            Err(e) => tracing::error!("Failed to listen for Ctrl-C: {}", e),
        }
        signal.cancel();
    });

    server.run(shutdown).await?;
    tracing::info!("Server stopped");
    Ok(())
}

fn log_hints(config: &Config) {
    let target = format!("{} {}", config.server.host, config.server.port);
    tracing::info!("Try these from another terminal:");
    tracing::info!("  echo -n 'CONNECT' | nc -u {}", target);
    tracing::info!("  echo -n 'GET_JOINT_ANGLES' | nc -u {}", target);
    tracing::info!("  echo -n 'SET_JOINT_ANGLE,0,45.0,30.0' | nc -u {}", target);
    tracing::info!("  echo -n 'SET_ALL_JOINT_ANGLES,10,-10,20,-20,30,-30,40.0' | nc -u {}", target);
}
