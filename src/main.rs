mod app;
mod config;
mod error;
mod form;
mod upload;
mod utils;

use app::ClaimSubmitter;
use config::Config;
use eframe::CreationContext;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Webhooks: test={} live={}",
        config.endpoints.test, config.endpoints.live
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([720.0, 820.0])
            .with_min_inner_size([480.0, 560.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Claim Submission",
        options,
        Box::new(move |cc: &CreationContext| -> Box<dyn eframe::App> {
            match ClaimSubmitter::new(cc, config) {
                Ok(app) => Box::new(app),
                Err(e) => {
                    error!("Failed to start: {}", e);
                    std::process::exit(1);
                }
            }
        }),
    );

    if let Err(e) = result {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}
