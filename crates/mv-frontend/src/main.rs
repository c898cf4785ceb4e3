//! Mesh Viewer main entry point

use std::path::PathBuf;

use clap::Parser;
use mv_frontend::{ConfigManager, MeshViewerApp};

/// View OBJ, STL, PLY, OFF and OM meshes
#[derive(Parser, Debug)]
#[command(name = "meshview", version, about)]
struct Args {
    /// Mesh file to open at start-up
    #[arg(long, value_name = "PATH")]
    scene: Option<PathBuf>,

    /// Configuration file to use instead of the default one
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mv_frontend=debug,mv_renderer=debug,mv_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Mesh Viewer");

    let config = match args.config {
        Some(path) => ConfigManager::load_or_default(path),
        None => ConfigManager::load(),
    };
    let window = config.config().window.clone();

    let initial_file = args.scene.filter(|path| {
        let exists = path.exists();
        if !exists {
            tracing::error!("File not found: {}", path.display());
        }
        exists
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([window.width, window.height])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Mesh Viewer")
            .with_drag_and_drop(true),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    let config = config.into_shared();
    eframe::run_native(
        "meshview",
        native_options,
        Box::new(|cc| Ok(Box::new(MeshViewerApp::new(cc, config, initial_file)))),
    )
}
