mod app;
mod appsettings;
mod console;

use app::App;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let settings = appsettings::load()?;
    log::info!("Starting MedGuide");

    let mut app = App::from_settings(&settings)?;

    let shutdown = CancellationToken::new();
    let ctrl_c_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Received Ctrl-C, shutting down");
            ctrl_c_token.cancel();
        }
    });

    let input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();
    let result = console::run(&mut app, input, &mut output, shutdown).await;

    app.dispose();
    result
}
