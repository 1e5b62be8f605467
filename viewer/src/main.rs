use clap::Parser;

use tracing_subscriber::EnvFilter;

mod app;
mod args;
mod intensity;
mod scene;

use app::App;
use args::Args;
use scene::Scene;

fn main() {
    let args = <Args as Parser>::parse();

    initialise_tracing();

    let scene = Scene::from(args.scene).config();

    let app = match App::new(&args, scene) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("initialization failed: {e}");
            std::process::exit(1);
        }
    };

    app.run();
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
