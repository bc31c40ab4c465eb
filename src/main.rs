use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shiori::app::AppContext;
use shiori::cli::{commands, Cli, Commands};
use shiori::config::Config;
use shiori::domain::BookmarkDraft;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Add {
            id,
            title,
            poster,
            score,
            media_type,
            status,
        } => {
            let draft = BookmarkDraft {
                id,
                title,
                poster,
                score,
                media_type,
                status,
            };
            commands::add_bookmark(&ctx, draft)?;
        }
        Commands::Toggle {
            id,
            title,
            poster,
            score,
            media_type,
            status,
        } => {
            let draft = BookmarkDraft {
                id,
                title,
                poster,
                score,
                media_type,
                status,
            };
            commands::toggle_bookmark(&ctx, draft)?;
        }
        Commands::Remove { id } => {
            commands::remove_bookmark(&ctx, &id)?;
        }
        Commands::Check { id } => {
            commands::check_bookmark(&ctx, &id)?;
        }
        Commands::List => {
            commands::list_bookmarks(&ctx)?;
        }
        Commands::Sort { order } => {
            commands::sort_bookmarks(&ctx, &order)?;
        }
        Commands::Clear { yes } => {
            commands::clear_bookmarks(&ctx, yes)?;
        }
        Commands::Watch => {
            commands::watch(&ctx).await?;
        }
        Commands::Tui => {
            shiori::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}
