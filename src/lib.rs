//! # Shiori
//!
//! A bookmark manager for personal media collections.
//!
//! ## Architecture
//!
//! ```text
//! CLI / TUI → BookmarkStore → Backend (shared slot)
//!                  ↑               ↓
//!            ChangeWatcher ← fingerprint
//! ```
//!
//! The whole collection is persisted as one serialized blob under a fixed
//! key in a key-value backend. Every running instance (CLI invocation,
//! TUI, watcher) works against the same slot: mutations re-read, validate,
//! and write back the full collection, and a fingerprint watcher tells
//! each instance when another one changed the slot.
//!
//! ## Quick Start
//!
//! ```bash
//! # Bookmark an item
//! shiori add frieren --title "Frieren" --status Completed
//!
//! # List bookmarks
//! shiori list
//!
//! # Launch the TUI
//! shiori tui
//! ```
//!
//! ## Modules
//!
//! - [`app`]: Application context and error types
//! - [`backend`]: Key-value persistence primitive and implementations
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: Configuration file handling
//! - [`domain`]: Core domain models (Bookmark, SortOrder)
//! - [`store`]: The bookmark collection and its persistence protocol
//! - [`sync`]: Cross-instance change detection
//! - [`tui`]: Terminal user interface

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the backend,
/// the store over it, and the change watcher.
pub mod app;

/// Key-value persistence primitive.
///
/// - [`Backend`](backend::Backend): get/set/remove of one string blob per key
/// - [`FileBackend`](backend::FileBackend): one JSON file per key, atomic replace
/// - [`MemoryBackend`](backend::MemoryBackend): in-memory slots for tests
pub mod backend;

/// Command-line interface using clap.
///
/// Subcommands: `add`, `remove`, `check`, `list`, `sort`, `clear`,
/// `watch`, `tui`.
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/shiori/config.toml`: storage directory and key,
/// watcher poll interval.
pub mod config;

/// Core domain models.
///
/// - [`Bookmark`](domain::Bookmark): one collection entry, camelCase on disk
/// - [`BookmarkDraft`](domain::BookmarkDraft): candidate data, normalized once
/// - [`SortOrder`](domain::SortOrder): durable sort criteria
pub mod domain;

/// The bookmark collection.
///
/// [`BookmarkStore`](store::BookmarkStore) owns the read-validate-write
/// protocol over the backend slot and notifies listeners after every
/// persisted mutation.
pub mod store;

/// Cross-instance change detection.
///
/// [`ChangeWatcher`](sync::ChangeWatcher) fingerprints the backend slot
/// and reports when another instance changed it.
pub mod sync;

/// Terminal user interface.
///
/// Bookmark list with status badges and relative dates, a display-only
/// text filter, durable sort cycling, and confirmation prompts for
/// remove/clear. Keybindings: j/k navigate, / filters, s sorts, d
/// removes, C clears, o opens the poster, R refreshes, q quits.
pub mod tui;
