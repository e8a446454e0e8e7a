//! CLI test tool for the arm command server: one-shot commands, an
//! interactive prompt, and a scripted demo sequence.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use robo_arm_rs::communication::client::{ArmClient, DEFAULT_TIMEOUT};

/// Arm client CLI
#[derive(Parser, Debug)]
#[command(name = "arm-client", about = "Send commands to a simulated robot arm over UDP.")]
pub struct Cli {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:4210")]
    server: SocketAddr,

    /// Reply timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_millis() as u64)]
    timeout_ms: u64,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a raw command line
    Send { line: String },
    /// Print current joint angles
    Angles,
    /// Move one joint
    Set { joint: usize, angle: f64, speed: f64 },
    /// Move all joints at one speed
    SetAll {
        #[arg(required = true, allow_negative_numbers = true)]
        angles: Vec<f64>,
        #[arg(long, default_value_t = 30.0)]
        speed: f64,
    },
    /// Emergency stop
    Stop,
    /// Print the JSON system status
    Status,
    /// Read commands from stdin, one per line, until EOF or `quit`
    Interactive,
    /// Run the scripted connection / motion / stop sequence
    Demo,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .init();

    let client = ArmClient::new(cli.server, Duration::from_millis(cli.timeout_ms)).await?;

    match cli.command {
        Commands::Send { line } => println!("{}", client.send_command(&line).await?),
        Commands::Angles => {
            let angles = client.joint_angles().await?;
            for (joint, angle) in angles.iter().enumerate() {
                println!("joint {}: {:.2}°", joint, angle);
            }
        }
        Commands::Set { joint, angle, speed } => {
            client.set_joint_angle(joint, angle, speed).await?;
            println!("OK");
        }
        Commands::SetAll { angles, speed } => {
            client.set_all_joint_angles(&angles, speed).await?;
            println!("OK");
        }
        Commands::Stop => {
            client.emergency_stop().await?;
            println!("OK");
        }
        Commands::Status => {
            let status = client.system_status().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Commands::Interactive => interactive(&client).await?,
        Commands::Demo => demo(&client).await?,
    }
    Ok(())
}

async fn interactive(client: &ArmClient) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    println!("Connected to {}. Type commands, `quit` to exit.", client.server());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        match client.send_command(line).await {
            Ok(reply) => println!("{}", reply),
            Err(e) => println!("error: {}", e),
        }
    }
    Ok(())
}

async fn demo(client: &ArmClient) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    println!("== connect");
    client.connect().await?;

    println!("== single joint: joint 0 -> 45° at 30°/s");
    client.set_joint_angle(0, 45.0, 30.0).await?;
    tokio::time::sleep(Duration::from_secs(2)).await;
    println!("angles: {:?}", client.joint_angles().await?);

    let joints = client.system_status().await?.joints.len();
    let angles: Vec<f64> = (0..joints).map(|i| 15.0 * (i as f64 + 1.0)).collect();
    println!("== all joints -> {:?} at 40°/s", angles);
    client.set_all_joint_angles(&angles, 40.0).await?;
    tokio::time::sleep(Duration::from_secs(1)).await;

    println!("== emergency stop mid-motion");
    client.emergency_stop().await?;
    let stopped = client.joint_angles().await?;
    tokio::time::sleep(Duration::from_millis(500)).await;
    let later = client.joint_angles().await?;
    println!("angles at stop: {:?}", stopped);
    println!("angles 0.5s later: {:?}", later);

    println!("== status");
    println!("{}", serde_json::to_string_pretty(&client.system_status().await?)?);

    client.disconnect().await?;
    println!("== done");
    Ok(())
}
