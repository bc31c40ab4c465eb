pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shiori")]
#[command(about = "A bookmark manager for your media collection", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Bookmark a media item
    Add {
        /// Identifier of the item to bookmark
        id: String,

        /// Display title
        #[arg(short, long)]
        title: Option<String>,

        /// Poster image URL
        #[arg(short, long)]
        poster: Option<String>,

        /// Display score (kept as-is, not validated)
        #[arg(short, long)]
        score: Option<String>,

        /// Media category, e.g. "TV" or "Movie"
        #[arg(long = "type")]
        media_type: Option<String>,

        /// Lifecycle status, e.g. "Ongoing" or "Completed"
        #[arg(long)]
        status: Option<String>,
    },
    /// Bookmark an item, or un-bookmark it if it already is
    Toggle {
        /// Identifier of the item
        id: String,

        /// Display title (used when the toggle adds)
        #[arg(short, long)]
        title: Option<String>,

        /// Poster image URL
        #[arg(short, long)]
        poster: Option<String>,

        /// Display score (kept as-is, not validated)
        #[arg(short, long)]
        score: Option<String>,

        /// Media category, e.g. "TV" or "Movie"
        #[arg(long = "type")]
        media_type: Option<String>,

        /// Lifecycle status, e.g. "Ongoing" or "Completed"
        #[arg(long)]
        status: Option<String>,
    },
    /// Remove a bookmark
    Remove {
        /// Identifier of the bookmarked item
        id: String,
    },
    /// Check whether an item is bookmarked
    Check {
        /// Identifier of the item
        id: String,
    },
    /// List all bookmarks
    List,
    /// Reorder the collection and persist the new order
    Sort {
        /// One of: newest, oldest, title, title-asc, title-desc
        order: String,
    },
    /// Remove every bookmark
    Clear {
        /// Skip the confirmation requirement
        #[arg(long)]
        yes: bool,
    },
    /// Watch for changes made by other running instances
    Watch,
    /// Launch the TUI
    Tui,
}
