use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

use super::state::{AppScreen, AppState, SettingsItem};
use crate::Category;

/// Main render function that dispatches to the appropriate screen renderer.
pub fn render<S>(f: &mut Frame, state: &AppState<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(f.area());

    render_tabs(f, chunks[0], state);

    match state.screen {
        AppScreen::Home => render_home(f, chunks[1], state),
        AppScreen::Settings => render_settings(f, chunks[1], state),
        AppScreen::Notifications => render_notifications(f, chunks[1], state),
        AppScreen::Favorites => render_favorites(f, chunks[1], state),
    }

    let help = Paragraph::new(help_text(state))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);

    render_status_bar(f, chunks[3], state);

    if state.picker_open {
        render_category_picker(f, state);
    }
    if let Some(text) = &state.share_text {
        render_share_popup(f, text);
    }
}

fn render_tabs<S>(f: &mut Frame, area: Rect, state: &AppState<S>) {
    let titles: Vec<Line> = AppScreen::TABS
        .iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("{} {}", i + 1, s.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(state.screen.tab_index())
        .block(Block::default().borders(Borders::ALL).title(" Quotely "))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

/// Render the current quote.
fn render_home<S>(f: &mut Frame, area: Rect, state: &AppState<S>) {
    let mut quote_style = Style::default();
    if state.prefs.larger_font {
        quote_style = quote_style.add_modifier(Modifier::BOLD);
    }
    if state.prefs.custom_font_color {
        let (r, g, b) = state.prefs.font_color.to_rgb8();
        quote_style = quote_style.fg(Color::Rgb(r, g, b));
    }

    let mut lines = Vec::new();
    if state.current.is_empty() {
        let msg = if state.fetcher.is_pending() {
            "Loading quote..."
        } else {
            "No quote yet. Press r to fetch one."
        };
        lines.push(Line::from(Span::styled(msg, Style::default().fg(Color::Yellow))));
    } else {
        if state.prefs.larger_font {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            format!("\"{}\"", state.current.quote),
            quote_style,
        )));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("- {}", state.current.author),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }

    let category = state
        .prefs
        .category()
        .map(Category::label)
        .unwrap_or("Any");
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {category} "));
    let inner_height = area.height.saturating_sub(2);
    let content_height = lines.len() as u16 + 2;
    let top_pad = inner_height.saturating_sub(content_height) / 2;
    let mut padded: Vec<Line> = (0..top_pad).map(|_| Line::default()).collect();
    padded.extend(lines);

    let quote = Paragraph::new(Text::from(padded))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(quote, area);

    if state.info_bubble_visible(Instant::now()) {
        let bubble_area = bottom_rect(34, 3, area);
        f.render_widget(Clear, bubble_area);
        let bubble = Paragraph::new("Added Quote to Favorites")
            .style(Style::default().fg(Color::Black).bg(Color::White))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(bubble, bubble_area);
    }
}

/// Render the settings form.
fn render_settings<S>(f: &mut Frame, area: Rect, state: &AppState<S>) {
    let prefs = &state.prefs;
    let rows: Vec<Row> = SettingsItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let (label, value) = match item {
                SettingsItem::QuoteType => (
                    "Quote Type",
                    format!(
                        "< {} >",
                        prefs.category().map(Category::label).unwrap_or("None")
                    ),
                ),
                SettingsItem::LargerFont => ("Larger Quote Font", checkbox(prefs.larger_font)),
                SettingsItem::CustomFontColor => {
                    ("Custom Font Color", checkbox(prefs.custom_font_color))
                }
                SettingsItem::Red => ("  Red", channel_bar(prefs.font_color.r)),
                SettingsItem::Green => ("  Green", channel_bar(prefs.font_color.g)),
                SettingsItem::Blue => ("  Blue", channel_bar(prefs.font_color.b)),
                SettingsItem::Notifications => ("Notifications", ">".to_string()),
            };
            let style = if i == state.settings_selection {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if matches!(
                item,
                SettingsItem::Red | SettingsItem::Green | SettingsItem::Blue
            ) && !prefs.custom_font_color
            {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            Row::new(vec![Cell::from(label), Cell::from(value)]).style(style)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(22), Constraint::Min(10)])
        .block(Block::default().borders(Borders::ALL).title(" Settings "));
    f.render_widget(table, area);
}

fn render_notifications<S>(f: &mut Frame, area: Rect, state: &AppState<S>) {
    let row = Row::new(vec![
        Cell::from("Show Notifications"),
        Cell::from(checkbox(state.prefs.notifs)),
    ])
    .style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let table = Table::new(vec![row], [Constraint::Length(22), Constraint::Min(5)])
        .block(Block::default().borders(Borders::ALL).title(" Notifications "));
    f.render_widget(table, area);
}

/// Render the favorites list.
fn render_favorites<S>(f: &mut Frame, area: Rect, state: &AppState<S>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Favorites ({}) ", state.favorites.len()));

    if state.favorites.is_empty() {
        let empty = Paragraph::new("No favorites yet. Press f on the home screen to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .favorites
        .iter()
        .map(|fav| {
            ListItem::new(Text::from(vec![
                Line::from(Span::styled(
                    format!("\"{}\"", fav.text),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("  - {}", fav.author)),
                Line::default(),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    let mut list_state = ListState::default().with_selected(Some(state.selected_favorite));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_category_picker<S>(f: &mut Frame, state: &AppState<S>) {
    let area = centered_rect(40, Category::ALL.len() as u16 + 2, f.area());
    f.render_widget(Clear, area);

    let items: Vec<ListItem> = Category::ALL
        .iter()
        .map(|c| {
            let marker = if state.prefs.category() == Some(*c) {
                "* "
            } else {
                "  "
            };
            ListItem::new(format!("{marker}{}", c.label()))
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Quote Type "),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    let mut list_state = ListState::default().with_selected(Some(state.picker_selection));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_share_popup(f: &mut Frame, text: &str) {
    let area = centered_rect(70, 7, f.area());
    f.render_widget(Clear, area);
    let popup = Paragraph::new(vec![
        Line::from(text.to_string()),
        Line::default(),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: false })
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Share Quote "),
    );
    f.render_widget(popup, area);
}

fn render_status_bar<S>(f: &mut Frame, area: Rect, state: &AppState<S>) {
    let (status_text, style) = match &state.status {
        Some((level, msg)) if *level <= log::Level::Warn => {
            (format!(" Error: {msg}"), Style::default().fg(Color::Red))
        }
        Some((_, msg)) => (format!(" Status: {msg}"), Style::default().fg(Color::Green)),
        None if state.fetcher.is_pending() => (
            " Fetching quote...".to_string(),
            Style::default().fg(Color::Yellow),
        ),
        None => (String::new(), Style::default()),
    };

    let status = Paragraph::new(status_text)
        .style(style)
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}

fn help_text<S>(state: &AppState<S>) -> &'static str {
    if state.picker_open {
        return "Up/Down: Move | Enter: Select | Esc: Cancel";
    }
    match state.screen {
        AppScreen::Home => "r: New Quote | f: Favorite | s: Share | Tab: Next | q: Quit",
        AppScreen::Settings => "Up/Down: Move | Enter: Toggle | Left/Right: Change | q: Quit",
        AppScreen::Notifications => "Enter: Toggle | Esc: Back | q: Quit",
        AppScreen::Favorites => "Up/Down: Move | s: Share | d: Delete | q: Quit",
    }
}

fn checkbox(on: bool) -> String {
    let mark = if on { "[x]" } else { "[ ]" };
    mark.to_string()
}

fn channel_bar(value: f64) -> String {
    let filled = (value.clamp(0.0, 1.0) * 20.0).round() as usize;
    format!("{}{} {value:.2}", "#".repeat(filled), "-".repeat(20 - filled))
}

fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_percent.min(100)) / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

fn bottom_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    }
}
