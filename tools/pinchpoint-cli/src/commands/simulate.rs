//! Generate a synthetic landmark stream.

use std::path::PathBuf;

use pinchpoint_gesture_model::serialize_frames;
use pinchpoint_pointer_control::synthetic::SyntheticGesture;

pub fn run(
    output: PathBuf,
    duration: f64,
    fps: u32,
    cycle: f64,
    jitter: f64,
) -> anyhow::Result<()> {
    if !duration.is_finite() || duration <= 0.0 || !cycle.is_finite() || cycle <= 0.0 {
        anyhow::bail!("--duration and --cycle must be positive");
    }
    if fps == 0 {
        anyhow::bail!("--fps must be at least 1");
    }

    let gesture = SyntheticGesture {
        frame_rate_hz: fps,
        duration_secs: duration,
        cycle_secs: cycle,
        jitter: jitter.abs(),
    };
    let frames = gesture.generate();
    let jsonl = serialize_frames(&gesture.header(), &frames)?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&output, jsonl)?;

    let visible = frames.iter().filter(|f| !f.hands.is_empty()).count();
    println!("Wrote {} frames to {}", frames.len(), output.display());
    println!("  Frames with a hand: {visible}");
    println!("  Pinch cycles:       {}", gesture.full_cycles());

    Ok(())
}
