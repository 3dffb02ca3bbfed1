//! `contactform` - fill in and submit the contact form from a terminal.

use clap::Parser;
use tokio::io::BufReader;

use contactform_client::{init_logging, ContactFormController, HttpContactApi, Terminal, Verbosity};
use contactform_shared::constants::DEFAULT_SERVER_URL;

/// Fill in and submit the contact form
#[derive(Debug, Parser)]
#[command(name = "contactform")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the submission service
    #[arg(long, env = "CONTACTFORM_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));

    let api = HttpContactApi::new(&cli.server_url);
    tracing::debug!(endpoint = api.endpoint(), "Submitting to");

    let controller = ContactFormController::new(api);
    let mut terminal = Terminal::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    terminal.run(&controller).await?;

    Ok(())
}
