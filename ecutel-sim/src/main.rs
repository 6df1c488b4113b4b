// Copyright (C) 2024 Ecutel Project Developers
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use clap::Parser;

mod config;

#[derive(Parser)]
#[command(author = "Copyright (C) 2024 Ecutel Project Developers")]
#[command(version, propagate_version = true)]
#[command(about = "Ecutel Engine Simulator", long_about = None)]
struct Args {
    /// Poll interval of the simulation loop in milliseconds.
    #[arg(long, default_value_t = 100)]
    tick: u64,
    /// Daemonize the service.
    #[arg(long)]
    daemon: bool,
    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let bin_name = env!("CARGO_BIN_NAME");

    let mut config = config::SimConfig {
        tick_interval: args.tick,
        global: ecutel::GlobalConfig::default(),
    };

    config.global.bin_name = bin_name.to_string();
    config.global.daemon = args.daemon;

    log_init(&config, args.verbose)?;

    if args.daemon {
        log::debug!("Running service as daemon");
    }

    log::trace!("{:#?}", config);

    daemonize(&config).await
}

fn log_init(config: &impl ecutel::Configurable, verbose: u8) -> anyhow::Result<()> {
    let daemon = config.global().daemon;

    let mut log_config = simplelog::ConfigBuilder::new();
    if daemon {
        log_config.set_time_level(log::LevelFilter::Off);
        log_config.set_thread_level(log::LevelFilter::Off);
    } else {
        log_config.set_time_offset_to_local().ok();
        log_config.set_time_format_rfc2822();
    }

    log_config.set_target_level(log::LevelFilter::Off);
    log_config.set_location_level(log::LevelFilter::Off);
    log_config.add_filter_ignore_str("mio");

    let log_level = if daemon {
        log::LevelFilter::Info
    } else {
        match verbose {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    let color_choice = if daemon {
        simplelog::ColorChoice::Never
    } else {
        simplelog::ColorChoice::Auto
    };

    simplelog::TermLogger::init(
        log_level,
        log_config.build(),
        simplelog::TerminalMode::Mixed,
        color_choice,
    )?;

    Ok(())
}

async fn daemonize(config: &config::SimConfig) -> anyhow::Result<()> {
    use ecutel::core::EngineStatus;
    use ecutel::sim::EngineSimulator;

    let mut rng = rand::rngs::OsRng;

    let mut simulator = EngineSimulator::new();
    let mut status = EngineStatus::new();

    let start = std::time::Instant::now();

    log::info!("Starting engine simulation");

    loop {
        let now = start.elapsed().as_millis() as u64;

        if simulator.update(&mut status, now, &mut rng) {
            log::info!("Phase: {}; {}", simulator.phase(), status);
        }

        tokio::time::sleep(std::time::Duration::from_millis(config.tick_interval)).await;
    }
}
