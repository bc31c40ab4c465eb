use chrono::{TimeZone, Utc};

use crate::app::{AppContext, Result};
use crate::domain::{BookmarkDraft, SortOrder};
use crate::store::{AddOutcome, RemoveOutcome, ToggleOutcome};

pub fn add_bookmark(ctx: &AppContext, draft: BookmarkDraft) -> Result<()> {
    let id = draft.id.clone();
    match ctx.store.add(draft) {
        Ok(AddOutcome::Added) => println!("Added to bookmarks: {}", id),
        Ok(AddOutcome::AlreadyPresent) => println!("Already in bookmarks: {}", id),
        Ok(AddOutcome::Invalid) => println!("Cannot bookmark: invalid id"),
        Err(e) => eprintln!("Could not save bookmark: {}", e),
    }
    Ok(())
}

pub fn toggle_bookmark(ctx: &AppContext, draft: BookmarkDraft) -> Result<()> {
    let id = draft.id.clone();
    match ctx.store.toggle(draft) {
        Ok(ToggleOutcome::Added) => println!("Added to bookmarks: {}", id),
        Ok(ToggleOutcome::Removed) => println!("Removed from bookmarks: {}", id),
        Ok(ToggleOutcome::Invalid) => println!("Cannot bookmark: invalid id"),
        Err(e) => eprintln!("Could not save bookmarks: {}", e),
    }
    Ok(())
}

pub fn remove_bookmark(ctx: &AppContext, id: &str) -> Result<()> {
    match ctx.store.remove(id) {
        Ok(RemoveOutcome::Removed) => println!("Removed from bookmarks: {}", id),
        Ok(RemoveOutcome::NotFound) => println!("Not in bookmarks: {}", id),
        Err(e) => eprintln!("Could not save bookmarks: {}", e),
    }
    Ok(())
}

pub fn check_bookmark(ctx: &AppContext, id: &str) -> Result<()> {
    if ctx.store.is_bookmarked(id) {
        println!("{} is bookmarked", id);
    } else {
        println!("{} is not bookmarked", id);
    }
    Ok(())
}

pub fn list_bookmarks(ctx: &AppContext) -> Result<()> {
    let bookmarks = ctx.store.load();

    if bookmarks.is_empty() {
        println!("No bookmarks");
        return Ok(());
    }

    println!("{} bookmarks", bookmarks.len());
    for bookmark in bookmarks {
        let date = if bookmark.added_at > 0 {
            Utc.timestamp_millis_opt(bookmark.added_at)
                .single()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "          ".to_string())
        } else {
            "          ".to_string()
        };

        let mut meta = Vec::new();
        if !bookmark.score.is_empty() {
            meta.push(bookmark.score.clone());
        }
        if !bookmark.media_type.is_empty() {
            meta.push(bookmark.media_type.clone());
        }
        if !bookmark.status.is_empty() {
            meta.push(bookmark.status.clone());
        }

        if meta.is_empty() {
            println!("{} {} [{}]", date, bookmark.title, bookmark.id);
        } else {
            println!(
                "{} {} ({}) [{}]",
                date,
                bookmark.title,
                meta.join(", "),
                bookmark.id
            );
        }
    }

    Ok(())
}

pub fn sort_bookmarks(ctx: &AppContext, order: &str) -> Result<()> {
    // Unknown criteria never reach the store; the collection stays as-is.
    let Some(order) = SortOrder::parse(order) else {
        println!("Unknown sort order (expected: newest, oldest, title, title-desc)");
        return Ok(());
    };

    match ctx.store.sort(order) {
        Ok(sorted) => println!("Sorted {} bookmarks", sorted.len()),
        Err(e) => eprintln!("Could not save bookmarks: {}", e),
    }
    Ok(())
}

pub fn clear_bookmarks(ctx: &AppContext, yes: bool) -> Result<()> {
    if !yes {
        println!("This removes every bookmark and cannot be undone. Pass --yes to confirm.");
        return Ok(());
    }

    let count = ctx.store.load().len();
    ctx.store.clear()?;
    println!("Cleared {} bookmarks", count);
    Ok(())
}

pub async fn watch(ctx: &AppContext) -> Result<()> {
    println!(
        "Watching '{}' for changes from other instances (Ctrl+C to stop)",
        ctx.store.key()
    );

    let store = ctx.store.clone();
    let watcher = ctx.watcher.clone();

    tokio::select! {
        _ = watcher.run(move |notice| {
            let count = store.load().len();
            println!("Collection changed under '{}' ({} bookmarks)", notice.key, count);
        }) => {}
        _ = tokio::signal::ctrl_c() => {
            watcher.stop();
        }
    }

    Ok(())
}
