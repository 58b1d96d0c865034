use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storewalk_input::InputState;
use storewalk_player::{PlayerController, WalkCamera};
use storewalk_render::{DebugTextRenderer, RenderView, Renderer};
use storewalk_scene::{SceneConfig, SceneGraph};

#[derive(Parser)]
#[command(name = "storewalk-cli", about = "Headless storewalk tools")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene config JSON; defaults to the built-in retail store
    #[arg(long)]
    scene: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the scene config and print a summary
    Validate,
    /// Print the assembled scene as text
    Show,
    /// Simulate held movement keys for a number of ticks
    Walk {
        /// Ticks to simulate
        #[arg(short, long, default_value = "10")]
        ticks: u32,
        /// Comma-separated key codes to hold, e.g. "KeyW,KeyD"
        #[arg(short, long, default_value = "KeyW")]
        keys: String,
    },
}

fn load_config(path: &Option<String>) -> Result<SceneConfig> {
    Ok(match path {
        Some(p) => SceneConfig::load(p)?,
        None => SceneConfig::retail_store(),
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(&cli.scene)?;
    config.validate()?;

    match cli.command {
        Commands::Validate => {
            println!("scene '{}' is valid", config.name);
            println!("  placements: {}", config.placements.len());
            println!("  structures: {}", config.structures.len());
            println!("  lights:     {}", config.lights.len());
            println!(
                "  boundary:   {}",
                if config.boundary.enabled {
                    format!("{} .. {}", config.boundary.min, config.boundary.max)
                } else {
                    "disabled".into()
                }
            );
        }
        Commands::Show => {
            let scene = SceneGraph::assemble(&config);
            let view = RenderView {
                eye: config.camera.spawn,
                forward: (config.camera.look_at - config.camera.spawn).normalize_or_zero(),
                fov_degrees: config.camera.fov_degrees,
            };
            print!("{}", DebugTextRenderer::new().render(&scene, &view));
        }
        Commands::Walk { ticks, keys } => {
            let controller =
                PlayerController::new(config.player.speed, config.player.eye_height);
            let mut camera = WalkCamera {
                fov: config.camera.fov_degrees.to_radians(),
                near: config.camera.near,
                far: config.camera.far,
                ..WalkCamera::default()
            };
            controller.place(&mut camera, config.camera.spawn);
            camera.look_at(config.camera.look_at);

            let boundary = config.boundary.volume()?;
            let mut input = InputState::new();
            for key in keys.split(',').filter(|k| !k.is_empty()) {
                input.set_key(key.trim(), true);
            }

            println!(
                "walking {} ticks at speed {} holding [{}]",
                ticks, config.player.speed, keys
            );
            for tick in 1..=ticks {
                controller.advance(&mut camera, &input, &config.bindings);
                let mut note = "";
                if let Some(b) = &boundary {
                    let clamped = b.clamp(camera.position);
                    if clamped != camera.position {
                        note = "  [clamped]";
                    }
                    camera.position = clamped;
                }
                let p = camera.position;
                println!("  tick {tick:>4}: ({:.1}, {:.1}, {:.1}){note}", p.x, p.y, p.z);
            }
        }
    }

    Ok(())
}
