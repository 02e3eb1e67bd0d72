//! ECS telemetry node — bench runner
//!
//! Runs the full node core on the host against simulated collaborators:
//! a DS18B20-style probe, a mesh link with one gateway, and an in-memory
//! indicator pin.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SimProbe        SimMesh          PinIndicator    LogEventSink │
//! │  (ProbePort)     (TransportPort)  (IndicatorPort) (EventSink)  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │   Scheduler: GatewayLocator · TemperatureSampler ·     │    │
//! │  │              MessageDispatcher · BlinkScheduler        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use ecs_node::adapters::hardware::NodeHardware;
use ecs_node::adapters::log_sink::LogEventSink;
use ecs_node::adapters::sim::{SimMesh, SimProbe};
use ecs_node::adapters::time::MonotonicClock;
use ecs_node::config::NodeConfig;
use ecs_node::drivers::indicator::{OnLevel, PinIndicator, SimPin};
use ecs_node::link::MacAddress;
use ecs_node::scheduler::Scheduler;

#[derive(Debug, Parser)]
#[command(version, about = "Run the ECS telemetry node against a simulated mesh")]
struct Args {
    /// JSON node configuration; missing fields take their defaults
    #[arg(long, env = "ECS_NODE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the sampling interval (milliseconds)
    #[arg(long)]
    sampling_interval_ms: Option<u32>,

    /// Address of the simulated gateway
    #[arg(long, default_value = "AA:BB:CC:DD:EE:FF")]
    gateway: MacAddress,

    /// Delay before the gateway answers the first discovery probe
    #[arg(long, default_value_t = 1200)]
    reply_after_ms: u32,

    /// Simulate a probe that never finishes a conversion
    #[arg(long)]
    stuck_probe: bool,

    /// Stop after this many seconds
    #[arg(long, default_value_t = 60)]
    run_secs: u64,
}

fn load_config(args: &Args) -> Result<NodeConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => NodeConfig::default(),
    };
    if let Some(ms) = args.sampling_interval_ms {
        config.sampling_interval_ms = ms;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ecs_node=info".into()),
        )
        .init();

    let args = Args::parse();
    info!("ECS node v{} (bench)", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config(&args)?;
    info!(
        "Config: node={} sample={}ms probe={}ms res={}bit",
        config.node_name,
        config.sampling_interval_ms,
        config.probe_interval_ms,
        config.probe_resolution_bits
    );

    // ── 3. Collaborators ──────────────────────────────────────
    let clock = MonotonicClock::new();
    let mut probe = SimProbe::new(clock, 21.0);
    probe.set_stuck(args.stuck_probe);
    let mesh = SimMesh::new(clock, args.gateway, args.reply_after_ms);
    let led = PinIndicator::new(SimPin::new(), OnLevel::High);
    let mut hw = NodeHardware::new(probe, mesh, led);
    let mut sink = LogEventSink::new();

    // ── 4. Node core ──────────────────────────────────────────
    let mut node = Scheduler::new(config)?;
    node.start(&mut hw, &mut sink)?;

    // ── 5. Cooperative loop ───────────────────────────────────
    while clock.uptime_secs() < args.run_secs {
        node.poll(clock.now_ms(), &mut hw, &mut sink);
        // Stand-in for the MCU's idle between iterations.
        std::thread::sleep(Duration::from_millis(1));
    }

    let status = node.status();
    info!(
        "Done: phase={:?} gateway={} probes={} sent={} confirmed={} failed={} gateway_rx={}",
        status.phase,
        status
            .gateway
            .map_or_else(|| "unresolved".to_string(), |g| g.to_string()),
        status.probes_sent,
        status.dispatch.sent,
        status.dispatch.confirmed,
        status.dispatch.failed,
        hw.transport().received(),
    );
    Ok(())
}
