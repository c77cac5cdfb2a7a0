#![allow(non_snake_case)]

mod app;
mod components;
pub mod context;
mod pages;
mod theme;

use std::path::PathBuf;
use std::sync::OnceLock;

use clap::Parser;
use dioxus::desktop::{Config, WindowBuilder};
use teachtell_core::config::{resolve_api_base, ApiBaseOptions, DEFAULT_LOCAL_API};

/// Global data directory, set from command line
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Launch settings, set from command line
static LAUNCH: OnceLock<LaunchSettings> = OnceLock::new();

/// Backend and content locations chosen at startup.
#[derive(Debug, Clone)]
pub struct LaunchSettings {
    pub api_base_url: String,
    pub content_dir: PathBuf,
    pub is_local: bool,
}

/// Get the data directory (set from command line or default)
pub fn get_data_dir() -> PathBuf {
    DATA_DIR.get().cloned().unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("teachtell")
    })
}

/// Get the launch settings (set from command line or default)
pub fn get_launch_settings() -> LaunchSettings {
    LAUNCH.get().cloned().unwrap_or_else(|| LaunchSettings {
        api_base_url: DEFAULT_LOCAL_API.to_string(),
        content_dir: PathBuf::from("content"),
        is_local: true,
    })
}

/// Teach & Tell - language course and detective game
#[derive(Parser, Debug)]
#[command(name = "teachtell-desktop")]
#[command(about = "Teach & Tell - language course and detective game")]
struct Args {
    /// Data directory for the local store
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Backend base URL (default: $TEACHTELL_API_URL or http://localhost:8000)
    #[arg(long)]
    api_url: Option<String>,

    /// Directory holding the week markdown files
    #[arg(long, default_value = "content")]
    content_dir: PathBuf,

    /// Run against the production backend
    #[arg(long)]
    production: bool,
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let data_dir = args.data_dir.clone().unwrap_or_else(get_data_dir);
    let _ = DATA_DIR.set(data_dir.clone());

    let mut options = ApiBaseOptions::from_env();
    if args.api_url.is_some() {
        options.override_url = args.api_url.clone();
    }
    let is_local = !args.production;
    let api_base_url =
        resolve_api_base(&options, is_local).unwrap_or_else(|| DEFAULT_LOCAL_API.to_string());

    tracing::info!(
        "Starting Teach & Tell with data dir {:?}, backend {}",
        data_dir,
        api_base_url
    );

    let _ = LAUNCH.set(LaunchSettings {
        api_base_url,
        content_dir: args.content_dir,
        is_local,
    });

    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title("Teach & Tell")
            .with_inner_size(dioxus::desktop::LogicalSize::new(960.0, 900.0))
            .with_resizable(true),
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(app::App);
}
