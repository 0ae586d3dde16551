//! Replay a landmark stream through the gesture controller.

use std::path::PathBuf;
use std::sync::atomic::Ordering;

use pinchpoint_common::config::{AppConfig, HandLossPolicy};
use pinchpoint_platform_core::ScreenGeometry;
use pinchpoint_pointer_control::sinks::LogSink;
use pinchpoint_pointer_control::sources::ReplaySource;
use pinchpoint_pointer_control::PointerController;

pub struct RunArgs {
    pub stream: PathBuf,
    pub intents: Option<PathBuf>,
    pub config: AppConfig,
    pub screen: ScreenGeometry,
    pub realtime: bool,
    pub no_mirror: bool,
    pub no_failsafe: bool,
    pub seed: bool,
    pub release_on_hand_loss: bool,
    pub json: bool,
}

pub async fn run(args: RunArgs) -> anyhow::Result<()> {
    let mut config = args.config;

    if args.no_mirror {
        config.runtime.mirror_horizontal = false;
    }
    if args.no_failsafe {
        config.runtime.failsafe = false;
    }
    if args.seed {
        config.controller.seed_from_first_observation = true;
    }
    if args.release_on_hand_loss {
        config.controller.hand_loss = HandLossPolicy::Release;
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let source = ReplaySource::open(&args.stream)
        .map_err(|e| anyhow::anyhow!("Failed to open stream {}: {e}", args.stream.display()))?;
    if let Some(header) = source.header() {
        tracing::info!(
            source = %header.source,
            fps = header.frame_rate_hz,
            schema = %header.schema_version,
            "Loaded stream header"
        );
        if args.realtime && header.frame_rate_hz > 0 {
            config.runtime.frame_rate_hz = header.frame_rate_hz;
        }
    }

    let mut controller = PointerController::new(
        Box::new(source),
        Box::new(LogSink::new()),
        &config.controller,
        config.runtime.clone(),
        args.screen,
    )?
    .realtime(args.realtime);

    if let Some(path) = &args.intents {
        controller = controller.with_intent_log(path)?;
    }

    let stop_flag = controller.stop_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping");
            stop_flag.store(true, Ordering::SeqCst);
        }
    });

    let summary = match controller.run().await {
        Ok(summary) => summary,
        Err(e) if e.is_failsafe() => {
            eprintln!("Stopped by fail-safe: {e}");
            eprintln!("Move your hand away from the top-left corner, or pass --no-failsafe.");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Session summary");
    println!("{}", "=".repeat(40));
    println!("  Frames:          {}", summary.frames);
    println!("  Frames w/ hand:  {}", summary.frames_with_hand);
    if summary.rejected_frames > 0 {
        println!("  Rejected frames: {}", summary.rejected_frames);
    }
    println!("  Moves:           {}", summary.moves);
    println!("  Button downs:    {}", summary.button_downs);
    println!("  Button ups:      {}", summary.button_ups);
    println!(
        "  Final cursor:    ({:.1}, {:.1})",
        summary.final_position.x, summary.final_position.y
    );
    println!("  Final state:     {}", summary.final_state.label());
    if let Some(path) = &args.intents {
        println!("  Intent log:      {}", path.display());
    }

    Ok(())
}
