mod cli;

use crate::cli::{Command, LogFormatArg, CLI};
use anyhow::{bail, Context};
use clap::Parser;
use pinhole_core::{base62, LinkRecord, Repository, ShortCode};
use pinhole_shortener::{Allocation, IdAllocator, ShortenParams, Shortener, ShortenerService};
use pinhole_storage::InMemoryRepository;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Target stored for codes passed with `--taken`.
const TAKEN_PLACEHOLDER_URL: &str = "about:blank";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(&config.log_filter, config.log_format)?;

    match config.command {
        Command::Encode { identifier } => {
            println!("{}", base62::encode_decimal(&identifier)?);
        }
        Command::Decode { token } => {
            let id = base62::decode(&token).with_context(|| format!("cannot decode '{token}'"))?;
            println!("{id}");
        }
        Command::Check { token, taken } => {
            let repository = seeded_repository(&taken).await?;
            match IdAllocator::new(repository).allocate(&token).await {
                Ok(Allocation::Auto) => println!("no custom code requested"),
                Ok(Allocation::Custom(id)) => {
                    println!("{} is available (id {id})", id.short_code())
                }
                Err(rejection) => bail!(rejection),
            }
        }
        Command::Shorten {
            url,
            alias,
            base_url,
            taken,
        } => {
            let repository = seeded_repository(&taken).await?;
            let service = ShortenerService::from_shared(repository);
            let link = service
                .shorten(ShortenParams {
                    original_url: url,
                    custom_alias: alias,
                })
                .await?;
            println!("{}", link.short_url(&base_url));
        }
    }

    Ok(())
}

fn init_tracing(filter: &str, format: LogFormatArg) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(filter).with_context(|| format!("invalid log filter '{filter}'"))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormatArg::Text => builder.init(),
        LogFormatArg::Json => builder.json().init(),
    }

    Ok(())
}

async fn seeded_repository(taken: &[String]) -> anyhow::Result<Arc<InMemoryRepository>> {
    let repository = Arc::new(InMemoryRepository::new());

    for token in taken {
        let code: ShortCode = token.parse()?;
        repository
            .insert(code.id(), LinkRecord::new(TAKEN_PLACEHOLDER_URL))
            .await
            .with_context(|| format!("cannot mark '{token}' as taken"))?;
    }

    debug!(count = taken.len(), "seeded in-memory store");
    Ok(repository)
}
