//! Validate configuration.

use super::LoadedConfig;

pub fn run(loaded: &LoadedConfig) -> anyhow::Result<()> {
    println!("Pinchpoint Configuration Check");
    println!("{}", "=".repeat(50));

    let config = &loaded.config;
    match &loaded.problem {
        Some(problem) => {
            println!("[FAIL] Config file: {}", loaded.path.display());
            println!("       {problem}");
            println!("       Showing defaults below.");
        }
        None if loaded.path.exists() => {
            println!("[OK] Config file: {}", loaded.path.display());
        }
        None => {
            println!(
                "[INFO] No config at {}; using defaults",
                loaded.path.display()
            );
        }
    }

    let c = &config.controller;
    let r = &config.runtime;

    println!();
    println!("Controller:");
    println!("  smoothening_factor: {}", c.smoothening_factor);
    println!("  click_distance:     {}", c.click_distance);
    println!("  release_distance:   {}", c.release_distance);
    println!(
        "  dead zone:          [{}, {}]",
        c.click_distance, c.release_distance
    );
    println!("  seed cursor:        {}", c.seed_from_first_observation);
    println!("  on hand loss:       {:?}", c.hand_loss);
    println!();
    println!("Runtime:");
    println!("  frame_rate_hz:      {}", r.frame_rate_hz);
    println!("  mirror_horizontal:  {}", r.mirror_horizontal);
    println!(
        "  failsafe:           {} (margin {} px)",
        r.failsafe, r.failsafe_margin_px
    );
    println!();

    if let Err(e) = config.validate() {
        println!("[FAIL] {e}");
        anyhow::bail!("configuration is invalid");
    }
    if loaded.problem.is_some() {
        anyhow::bail!("config file {} could not be read", loaded.path.display());
    }
    println!("[OK] Configuration is valid.");
    Ok(())
}
