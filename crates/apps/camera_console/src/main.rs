use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use display::{CameraDisplay, DisplayConfig, DisplayMode, DrawList, InputPrompt, button_menu};
use host::VesselDirectory;
use host::sim::{Scenario, SimHost};
use runtime::Frame;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Drive a camera display against a simulated host")]
struct Args {
    /// Scenario JSON describing vessels, dock ports and attachment points
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Display config JSON (defaults apply to missing fields)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the button menu
    Menu,

    /// Open a display and replay a key script, one frame per step
    Replay {
        /// Vessel the display opens on (default: first in the scenario)
        #[arg(long)]
        vessel: Option<String>,

        /// Whitespace-separated steps: a key (1-9, 0, B), or @NAME to answer
        /// the vessel prompt
        #[arg(long, default_value = "")]
        script: String,

        #[arg(long, default_value_t = 256)]
        width: u32,

        #[arg(long, default_value_t = 256)]
        height: u32,

        /// Frame delta time (seconds)
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,
    },
}

const DEFAULT_SCENARIO: &str = include_str!("../scenarios/station.json");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    match args.command {
        Command::Menu => {
            for (i, b) in button_menu().iter().enumerate() {
                println!("{i:>2} {:<4} [{}] {}", b.label, b.key, b.description);
            }
            Ok(())
        }
        Command::Replay {
            vessel,
            script,
            width,
            height,
            dt,
        } => {
            let scenario = match &args.scenario {
                Some(path) => Scenario::from_json(&fs::read_to_string(path)?)?,
                None => Scenario::from_json(DEFAULT_SCENARIO)?,
            };
            let config = match &args.config {
                Some(path) => DisplayConfig::load(path)?,
                None => DisplayConfig::default(),
            };
            replay(&scenario, config, vessel.as_deref(), &script, width, height, dt)
        }
    }
}

fn replay(
    scenario: &Scenario,
    config: DisplayConfig,
    vessel: Option<&str>,
    script: &str,
    width: u32,
    height: u32,
    dt: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut host = SimHost::from_scenario(scenario);
    let name = vessel.unwrap_or(&scenario.vessels[0].name);
    let target = host
        .find_vessel_by_name(name)
        .ok_or_else(|| format!("vessel not in scenario: {name}"))?;

    let mut display = CameraDisplay::open(&mut host, config, width, height, target);
    info!(vessel = name, "replaying {} steps", script.split_whitespace().count());

    let mut frame = Frame::new(0, dt);
    print_frame(frame, "open", &display.render(&mut host, frame));

    for step in script.split_whitespace() {
        frame = frame.next();
        let handled = if let Some(answer) = step.strip_prefix('@') {
            display.handle_text_input(&mut host, answer)
        } else {
            let mut chars = step.chars();
            match (chars.next(), chars.next()) {
                (Some(key), None) => display.handle_key(&mut host, key),
                _ => {
                    warn!(step, "not a single key");
                    false
                }
            }
        };
        if let Some(request) = display.take_input_request() {
            println!("      prompt: {} (max {} chars)", request.prompt, request.max_len);
        }
        let label = if handled {
            step.to_string()
        } else {
            format!("{step} (ignored)")
        };
        print_frame(frame, &label, &display.render(&mut host, frame));
    }

    println!("metrics: {}", display.metrics().snapshot());
    for event in display.events().events() {
        println!("event[{}] {}: {}", event.frame_index, event.kind, event.message);
    }
    if display.events().dropped() > 0 {
        println!("({} older events dropped)", display.events().dropped());
    }
    display.close(&mut host);
    println!("live cameras after close: {}", host.live_cameras());
    Ok(())
}

fn print_frame(frame: Frame, step: &str, list: &DrawList) {
    let title = list.title().unwrap_or("-");
    let texts: Vec<&str> = list.texts().collect();
    println!(
        "#{:<4} t={:<7.3} {:<14} {} | {}",
        frame.index,
        frame.time.seconds(),
        step,
        title,
        texts.join(" | ")
    );
}
