pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use crossterm::event::KeyCode;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};
use crate::domain::SortOrder;
use crate::store::RemoveOutcome;

use self::app::{Mode, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let mut tui_app = TuiApp::new();
    let event_handler = EventHandler::new(Duration::from_millis(100));

    refresh(&mut tui_app, &ctx);

    loop {
        terminal.draw(|frame| layout::render(frame, &tui_app))?;

        match event_handler.next()? {
            AppEvent::Key(key) => match tui_app.mode {
                Mode::Browse => handle_browse_key(&mut tui_app, &ctx, key.into()),
                Mode::Filter => match key.code {
                    KeyCode::Esc => {
                        tui_app.clear_filter();
                        tui_app.mode = Mode::Browse;
                    }
                    KeyCode::Enter => {
                        tui_app.mode = Mode::Browse;
                    }
                    KeyCode::Backspace => tui_app.pop_filter_char(),
                    KeyCode::Char(c) => tui_app.push_filter_char(c),
                    _ => {}
                },
                Mode::ConfirmRemove => match key.code {
                    KeyCode::Char('y') | KeyCode::Enter => {
                        remove_selected(&mut tui_app, &ctx);
                        tui_app.mode = Mode::Browse;
                    }
                    KeyCode::Char('n') | KeyCode::Esc => {
                        tui_app.mode = Mode::Browse;
                    }
                    _ => {}
                },
                Mode::ConfirmClear => match key.code {
                    KeyCode::Char('y') | KeyCode::Enter => {
                        clear_all(&mut tui_app, &ctx);
                        tui_app.mode = Mode::Browse;
                    }
                    KeyCode::Char('n') | KeyCode::Esc => {
                        tui_app.mode = Mode::Browse;
                    }
                    _ => {}
                },
            },
            AppEvent::Tick => {
                // A change made by another context shows up as a slot
                // change; the notice content is never trusted, we just
                // reload from the backend.
                if ctx.watcher.poll().is_some() {
                    tui_app.set_bookmarks(ctx.store.load());
                    tui_app.set_status("Collection changed in another window".to_string());
                }
            }
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_browse_key(tui_app: &mut TuiApp, ctx: &AppContext, action: Action) {
    match action {
        Action::Quit => {
            tui_app.should_quit = true;
        }
        Action::MoveUp => tui_app.move_up(),
        Action::MoveDown => tui_app.move_down(),
        Action::StartFilter => {
            tui_app.clear_status();
            tui_app.mode = Mode::Filter;
        }
        Action::Remove => {
            if tui_app.selected_bookmark().is_some() {
                tui_app.mode = Mode::ConfirmRemove;
            }
        }
        Action::ClearAll => {
            if !tui_app.bookmarks.is_empty() {
                tui_app.mode = Mode::ConfirmClear;
            }
        }
        Action::CycleSort => {
            let order = tui_app.next_sort_order();
            match ctx.store.sort(order) {
                Ok(sorted) => {
                    tui_app.set_bookmarks(sorted);
                    ctx.watcher.mark_seen();
                    tui_app.set_status(format!("Sorted by {}", sort_label(order)));
                }
                Err(e) => tui_app.set_status(format!("Could not save bookmarks: {}", e)),
            }
        }
        Action::OpenPoster => {
            let poster = tui_app.selected_bookmark().map(|b| b.poster.clone());
            match poster {
                Some(poster) if poster.is_empty() => {
                    tui_app.set_status("No poster for this bookmark".to_string());
                }
                Some(poster) => {
                    if let Err(e) = open::that(&poster) {
                        tui_app.set_status(format!("Failed to open browser: {}", e));
                    }
                }
                None => {}
            }
        }
        Action::Refresh => {
            refresh(tui_app, ctx);
            tui_app.set_status("Refreshed".to_string());
        }
        Action::None => {}
    }
}

fn refresh(tui_app: &mut TuiApp, ctx: &AppContext) {
    tui_app.set_bookmarks(ctx.store.load());
    ctx.watcher.mark_seen();
}

fn remove_selected(tui_app: &mut TuiApp, ctx: &AppContext) {
    let Some(id) = tui_app.selected_bookmark().map(|b| b.id.clone()) else {
        return;
    };
    match ctx.store.remove(&id) {
        Ok(RemoveOutcome::Removed) => {
            tui_app.set_bookmarks(ctx.store.load());
            ctx.watcher.mark_seen();
            tui_app.set_status("Removed from bookmarks".to_string());
        }
        Ok(RemoveOutcome::NotFound) => {
            // Another context removed it first; just resync.
            tui_app.set_bookmarks(ctx.store.load());
            ctx.watcher.mark_seen();
        }
        Err(e) => tui_app.set_status(format!("Could not save bookmarks: {}", e)),
    }
}

fn clear_all(tui_app: &mut TuiApp, ctx: &AppContext) {
    match ctx.store.clear() {
        Ok(()) => {
            tui_app.set_bookmarks(Vec::new());
            ctx.watcher.mark_seen();
            tui_app.set_status("All bookmarks removed".to_string());
        }
        Err(e) => tui_app.set_status(format!("Could not clear bookmarks: {}", e)),
    }
}

fn sort_label(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Newest => "newest",
        SortOrder::Oldest => "oldest",
        SortOrder::TitleAsc => "title",
        SortOrder::TitleDesc => "title (desc)",
    }
}
