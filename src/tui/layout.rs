use chrono::{TimeZone, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::domain::StatusKind;
use crate::tui::app::{Mode, TuiApp};

pub fn render(frame: &mut Frame, app: &TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Bookmark list
            Constraint::Length(7), // Detail pane
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_list(frame, app, chunks[0]);
    render_detail(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    match app.mode {
        Mode::ConfirmRemove => {
            let title = app
                .selected_bookmark()
                .map(|b| b.title.clone())
                .unwrap_or_default();
            render_confirm(
                frame,
                "Remove bookmark?",
                &format!("Remove \"{}\" from bookmarks? (y/n)", title),
            );
        }
        Mode::ConfirmClear => {
            render_confirm(
                frame,
                "Clear all bookmarks?",
                "Every bookmark will be removed. This cannot be undone. (y/n)",
            );
        }
        _ => {}
    }
}

fn render_list(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let visible = app.visible();
    let now_ms = Utc::now().timestamp_millis();

    let title = if app.filter.is_empty() {
        format!(" Bookmarks ({}) ", app.bookmarks.len())
    } else {
        format!(
            " Bookmarks ({}/{}) /{} ",
            visible.len(),
            app.bookmarks.len(),
            app.filter
        )
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.bookmarks.is_empty() {
        let empty = Paragraph::new("No bookmarks yet")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    if visible.is_empty() {
        let no_results = Paragraph::new(format!("No bookmarks match \"{}\"", app.filter))
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(no_results, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, bookmark)| {
            let mut spans = vec![Span::raw(bookmark.title.clone())];

            if !bookmark.status.is_empty() {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    format!("[{}]", bookmark.status),
                    Style::default().fg(badge_color(bookmark.status_kind())),
                ));
            }
            if !bookmark.score.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", bookmark.score),
                    Style::default().fg(Color::Yellow),
                ));
            }
            if !bookmark.media_type.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", bookmark.media_type),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let added = format_relative_date(bookmark.added_at, now_ms);
            if !added.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", added),
                    Style::default().fg(Color::DarkGray),
                ));
            }

            let style = if i == app.selected {
                Style::default()
                    .bg(Color::Cyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

fn render_detail(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let (title, content) = if let Some(bookmark) = app.selected_bookmark() {
        let mut lines = Vec::new();

        lines.push(Line::from(Span::styled(
            bookmark.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));

        let mut meta = Vec::new();
        if !bookmark.score.is_empty() {
            meta.push(format!("Score: {}", bookmark.score));
        }
        if !bookmark.media_type.is_empty() {
            meta.push(format!("Type: {}", bookmark.media_type));
        }
        if !bookmark.status.is_empty() {
            meta.push(format!("Status: {}", bookmark.status));
        }
        if !meta.is_empty() {
            lines.push(Line::from(Span::styled(
                meta.join("  "),
                Style::default().fg(Color::Yellow),
            )));
        }

        if !bookmark.poster.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("Poster: {}", bookmark.poster),
                Style::default().fg(Color::Blue),
            )));
        }

        let added = format_relative_date(bookmark.added_at, Utc::now().timestamp_millis());
        if !added.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("Added: {}", added),
                Style::default().fg(Color::DarkGray),
            )));
        }

        (format!(" {} ", bookmark.id), Text::from(lines))
    } else {
        (" Detail ".to_string(), Text::from("No bookmark selected"))
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let status = match app.mode {
        Mode::Filter => format!("/{}", app.filter),
        _ => {
            if let Some(ref msg) = app.status_message {
                msg.clone()
            } else {
                "j/k:Navigate  /:Filter  s:Sort  d:Remove  C:Clear  o:Poster  R:Refresh  q:Quit"
                    .to_string()
            }
        }
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

fn render_confirm(frame: &mut Frame, title: &str, message: &str) {
    let area = centered_rect(50, 5, frame.area());
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let paragraph = Paragraph::new(message)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    // Widen before multiplying; width * percent overflows u16 for wide
    // terminals (65535 / 50 is only 1310 columns).
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height: height.min(area.height),
    }
}

fn badge_color(kind: StatusKind) -> Color {
    match kind {
        StatusKind::Ongoing => Color::Blue,
        StatusKind::Completed => Color::Green,
        StatusKind::Other => Color::Red,
    }
}

const DAY_MS: i64 = 86_400_000;

/// Relative added-date for display: "today", "yesterday", then days,
/// weeks, and months, falling back to an absolute date after a year.
/// Entries with no recorded timestamp render nothing.
pub fn format_relative_date(added_at_ms: i64, now_ms: i64) -> String {
    if added_at_ms <= 0 {
        return String::new();
    }

    let days = (now_ms - added_at_ms).max(0) / DAY_MS;
    if days == 0 {
        "today".to_string()
    } else if days == 1 {
        "yesterday".to_string()
    } else if days < 7 {
        format!("{} days ago", days)
    } else if days < 30 {
        format!("{} weeks ago", days / 7)
    } else if days < 365 {
        format!("{} months ago", days / 30)
    } else {
        Utc.timestamp_millis_opt(added_at_ms)
            .single()
            .map(|d| d.format("%b %e, %Y").to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_date_buckets() {
        let now = 1_700_000_000_000;
        assert_eq!(format_relative_date(now, now), "today");
        assert_eq!(format_relative_date(now - DAY_MS, now), "yesterday");
        assert_eq!(format_relative_date(now - 3 * DAY_MS, now), "3 days ago");
        assert_eq!(format_relative_date(now - 14 * DAY_MS, now), "2 weeks ago");
        assert_eq!(format_relative_date(now - 90 * DAY_MS, now), "3 months ago");
    }

    #[test]
    fn test_relative_date_falls_back_to_absolute() {
        let now = 1_700_000_000_000;
        let formatted = format_relative_date(now - 400 * DAY_MS, now);
        assert!(formatted.contains("2022"), "got: {}", formatted);
    }

    #[test]
    fn test_missing_timestamp_renders_nothing() {
        assert_eq!(format_relative_date(0, 1_700_000_000_000), "");
    }

    #[test]
    fn test_centered_rect_handles_wide_terminals() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 2000,
            height: 50,
        };
        let rect = centered_rect(50, 5, area);
        assert_eq!(rect.width, 1000);
        assert_eq!(rect.x, 500);
        assert_eq!(rect.height, 5);
    }

    #[test]
    fn test_centered_rect_clamps_to_short_areas() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 3,
        };
        let rect = centered_rect(50, 5, area);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 3);
    }
}
