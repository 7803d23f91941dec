use clap::Parser;

use shopia::{Kiosk, KioskConfig, TickOutcome};

fn main() -> anyhow::Result<()> {
    let config = KioskConfig::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_filter()))
        .init();

    #[cfg(feature = "camera")]
    if config.list_cameras {
        return shopia::camera::native::list_cameras();
    }

    config.validate()?;

    if config.headless {
        return run_headless(&config);
    }

    #[cfg(feature = "gui")]
    {
        shopia::gui::run(config)
    }

    #[cfg(not(feature = "gui"))]
    {
        anyhow::bail!("built without the gui feature; pass --headless")
    }
}

/// Drive the capture loop without a window, printing what each frame contains.
fn run_headless(config: &KioskConfig) -> anyhow::Result<()> {
    let mut kiosk = Kiosk::from_config(config)?;
    kiosk.start()?;

    let interval = config.tick_interval();
    let mut displayed: u64 = 0;

    loop {
        if let TickOutcome::Displayed {
            detections,
            failed_models,
        } = kiosk.tick()
        {
            displayed += 1;
            println!("Frame {}: {} detections", displayed, detections.len());
            for d in &detections {
                println!(
                    "  [{}] {} at ({}, {})-({}, {}) - confidence: {:.2}",
                    d.source, d.label, d.bbox.x1, d.bbox.y1, d.bbox.x2, d.bbox.y2, d.confidence
                );
            }
            for model in failed_models {
                println!("  {} detector failed on this frame", model);
            }

            if config.max_frames.is_some_and(|max| displayed >= max) {
                break;
            }
        }
        std::thread::sleep(interval);
    }

    kiosk.stop();
    Ok(())
}
