// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands};
use grandpy_client::QuestionClient;
use grandpy_core::config::WidgetConfig;
use grandpy_core::models::QuestionForm;
use grandpy_core::widget::{ChatWidget, Submission};
use transcript::TerminalPage;

mod cli;
mod logging;
mod transcript;

fn main() -> Result<()> {
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init()?;

    let args = Cli::parse();

    match &args.command {
        Commands::Ask {
            question,
            server,
            endpoint,
        } => ask(question, server, endpoint)?,
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn ask(question: &str, server: &str, endpoint: &str) -> Result<()> {
    let config = WidgetConfig {
        endpoint: endpoint.to_string(),
        ..Default::default()
    }
    .validated()?;

    let client = QuestionClient::new(server, &config.endpoint)?;
    log::debug!("asking {}", client.endpoint());

    let widget = ChatWidget::new(TerminalPage::new(std::io::stdout()), client, config);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match runtime.block_on(widget.submit(&QuestionForm::with_question(question))) {
        Submission::Failed => Err(Error::Custom("GrandPy did not answer".into())),
        Submission::Positive | Submission::Negative => Ok(()),
    }
}
