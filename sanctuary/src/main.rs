use clap::Parser;
use sanctuary::{
    app_state::AppState, http::setup_http_server, init_telemetry, settings::config::Settings,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "sanctuary")]
#[command(about = "Church management API: public site and admin panel backend")]
#[clap(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser)]
enum Commands {
    /// Show current configuration and exit
    Config,
    /// Start the API server (default)
    Run,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::new()?;

    if let Some(Commands::Config) = cli.command {
        println!("{:#?}", settings);
        return Ok(());
    }

    init_telemetry::init_tracing(settings.debug)?;
    let app_state = AppState::new(settings).await?;

    let handle = setup_http_server(app_state.clone(), &app_state.settings.api.bind_address).await?;
    handle.await??;

    info!("Shut down cleanly");
    Ok(())
}
