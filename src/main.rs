use anyhow::Result;
use hubbub::config::AssistantConfig;
use hubbub::ui::AssistantApp;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hubbub=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HireHub assistant companion");

    let config = AssistantConfig::from_env();
    config.validate()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_title("HireHub Assistant"),
        ..Default::default()
    };

    eframe::run_native(
        "hubbub",
        options,
        Box::new(move |cc| Ok(Box::new(AssistantApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to launch UI: {e}"))
}
