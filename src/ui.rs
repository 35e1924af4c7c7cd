//! UI rendering for the terminal user interface.
//!
//! This module draws the `ViewState` with `ratatui`: header, metadata panel,
//! progress bar with time labels, playlist and the controls bar.

mod format;
mod theme;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{InputMode, ViewState};
use crate::audio::PlaybackState;
use crate::config::{ControlsSettings, UiSettings};

use format::format_clock;
use theme::Palette;

/// Icon of the play/pause control for the current state.
fn play_icon(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Playing => "⏸",
        PlaybackState::Paused | PlaybackState::Stopped => "▶",
    }
}

/// Text of the controls bar.
fn controls_text(view: &ViewState, controls: &ControlsSettings) -> String {
    [
        "[h] ⏮".to_string(),
        format!("[space] {}", play_icon(view.playback)),
        "[l] ⏭".to_string(),
        format!("[H/L] ∓{}s", controls.scrub_seconds),
        format!("[-/+] 🔊 {}%", view.volume),
        format!("[t] {}", view.theme.toggle_label()),
        "[a] Add Files".to_string(),
        "[q] quit".to_string(),
    ]
    .join("  ")
}

fn bordered<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(title)
        .style(Style::default().fg(palette.text).bg(palette.panel))
}

/// Render the whole player into `frame`.
pub fn draw(frame: &mut Frame, view: &ViewState, ui: &UiSettings, controls: &ControlsSettings) {
    let palette = Palette::for_theme(view.theme);
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().fg(palette.text).bg(palette.background)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Paragraph::new(ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(bordered(" cadence ", &palette).title_alignment(Alignment::Center));
    frame.render_widget(header, chunks[0]);

    let metadata = Paragraph::new(view.metadata_text.as_str())
        .alignment(Alignment::Center)
        .block(bordered(" now playing ", &palette))
        .wrap(Wrap { trim: true });
    frame.render_widget(metadata, chunks[1]);

    draw_progress(frame, view, &palette, chunks[2]);
    draw_playlist(frame, view, &palette, chunks[3]);
    draw_controls(frame, view, controls, &palette, chunks[4]);
    draw_status_line(frame, view, &palette, chunks[5]);
}

fn draw_progress(frame: &mut Frame, view: &ViewState, palette: &Palette, area: Rect) {
    let block = bordered(" progress ", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    // Greyed out until the engine reports a duration; seeking is off until then.
    let bar_style = if view.progress_enabled() {
        Style::default().fg(palette.accent).bg(palette.border)
    } else {
        Style::default().fg(palette.border).bg(palette.border)
    };
    let gauge = Gauge::default()
        .gauge_style(bar_style)
        .ratio(view.progress_ratio())
        .label("");
    frame.render_widget(gauge, rows[0]);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    let total = view.duration.unwrap_or_default();
    frame.render_widget(Paragraph::new(format_clock(view.position)), halves[0]);
    frame.render_widget(
        Paragraph::new(format_clock(total)).alignment(Alignment::Right),
        halves[1],
    );
}

fn draw_playlist(frame: &mut Frame, view: &ViewState, palette: &Palette, area: Rect) {
    // Only build ListItems for the visible window, centered on the cursor when possible.
    let total = view.labels.len();
    let height = area.height.saturating_sub(2) as usize;
    let (start, end) = if total <= height || height == 0 {
        (0, total)
    } else {
        let half = height / 2;
        let start = view.highlighted.saturating_sub(half).min(total - height);
        (start, start + height)
    };

    let items: Vec<ListItem> = view.labels[start..end]
        .iter()
        .enumerate()
        .map(|(offset, label)| {
            let item = ListItem::new(label.as_str());
            if view.now_playing == Some(start + offset) {
                item.style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items)
        .block(bordered(" playlist ", palette))
        .highlight_style(Style::default().fg(palette.on_accent).bg(palette.accent))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(view.highlighted.saturating_sub(start)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_controls(
    frame: &mut Frame,
    view: &ViewState,
    controls: &ControlsSettings,
    palette: &Palette,
    area: Rect,
) {
    let bar = Paragraph::new(controls_text(view, controls)).block(
        bordered(" controls ", palette).padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        }),
    );
    frame.render_widget(bar, area);
}

/// The add prompt while typing a path, otherwise the last status message.
fn draw_status_line(frame: &mut Frame, view: &ViewState, palette: &Palette, area: Rect) {
    let line = match view.input_mode {
        InputMode::AddPath => Line::from(vec![
            Span::styled("Add file or folder: ", Style::default().fg(palette.accent)),
            Span::raw(view.input.as_str()),
            Span::raw("▏"),
        ]),
        InputMode::Normal => match view.status.as_deref() {
            Some(msg) => Line::from(Span::styled(
                format!(" {msg}"),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            None => Line::default(),
        },
    };
    frame.render_widget(Paragraph::new(line), area);
}
