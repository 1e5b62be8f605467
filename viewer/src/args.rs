use clap::{Parser, ValueEnum};

use crate::scene::Scene;

#[derive(Debug, Parser)]
#[command(about = "Renders static triangle scenes in a window")]
pub struct Args {
    /// Scene to display
    #[arg(value_enum, default_value_t = SceneArg::TwoTriangles)]
    pub scene: SceneArg,
    /// Initial window width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,
    /// Initial window height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum SceneArg {
    TwoTriangles,
    ColoredTriangle,
}

impl From<SceneArg> for Scene {
    fn from(s: SceneArg) -> Self {
        match s {
            SceneArg::TwoTriangles => Self::TwoTriangles,
            SceneArg::ColoredTriangle => Self::ColoredTriangle,
        }
    }
}
