use authors_report::{fetch_authors_with_posts, print_report, Config, Error};
use std::{io, process::ExitCode};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,authors_report=info")),
        )
        .with_writer(io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "report failed");
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;
    let client = config.connection_builder().build()?.into_client();

    let authors = fetch_authors_with_posts(&client).await?;
    print_report(&authors, &mut io::stdout().lock())?;
    Ok(())
}
