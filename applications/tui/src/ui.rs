//! Screen rendering
//!
//! Pure functions of the view model's `UiState` plus the bits of local
//! interaction state the app keeps (list selection, drag offset).

use cadence_core::{format_time, AccentColor, Song, SongList};
use cadence_playback::{PlayerView, Progress, UiState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

/// Placeholder rows shown while the catalog loads
const LOADING_ROWS: usize = 6;

/// Local state the renderer needs besides `UiState`
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Selection and scroll offset of the song list
    pub list: ListState,
    /// Rows the full-screen player is pushed down by an in-progress drag
    pub dismiss_offset: u16,
    /// CMS base URL cover links are built from; empty hides them
    pub asset_base: String,
}

/// Screen regions the app uses for mouse hit testing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Regions {
    pub list: Rect,
    pub mini_player: Option<Rect>,
}

/// Draw the whole screen
pub fn draw(frame: &mut Frame, state: &UiState, view: &mut ViewState) -> Regions {
    let area = frame.area();
    let mini_height = if state.current_song.is_some() { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(mini_height),
            Constraint::Length(1),
        ])
        .split(area);

    draw_tabs(frame, chunks[0], state.selected_tab);
    draw_list(frame, chunks[1], state, &mut view.list);

    let mini_player = state.current_song.as_ref().map(|song| {
        draw_mini_player(frame, chunks[2], song, state);
        chunks[2]
    });

    draw_hints(frame, chunks[3], PlayerView::Mini);

    if state.player_view == PlayerView::FullScreen {
        if let Some(song) = &state.current_song {
            let cover = (!view.asset_base.is_empty() && !song.cover.is_empty())
                .then(|| song.cover_url(&view.asset_base));
            draw_full_screen(frame, area, song, state, cover.as_deref(), view.dismiss_offset);
        }
    }

    Regions {
        list: chunks[1],
        mini_player,
    }
}

fn draw_tabs(frame: &mut Frame, area: Rect, selected: SongList) {
    let titles: Vec<Line> = SongList::ALL.iter().map(|list| Line::from(list.title())).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Cadence "),
        )
        .select(selected.page())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD | Modifier::UNDERLINED));
    frame.render_widget(tabs, area);
}

fn draw_list(frame: &mut Frame, area: Rect, state: &UiState, list_state: &mut ListState) {
    let block = Block::default().borders(Borders::ALL).border_type(BorderType::Rounded);

    if let Some(error) = &state.error {
        let message = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    if state.is_loading {
        let rows: Vec<ListItem> = (0..LOADING_ROWS)
            .map(|_| ListItem::new(vec![Line::from("░░░░░░░░░░░░░░"), Line::from("░░░░░░░░").dark_gray()]))
            .collect();
        frame.render_widget(List::new(rows).block(block.title(" Loading… ")).dark_gray(), area);
        return;
    }

    let current_id = state.current_song.as_ref().map(|s| &s.id);
    let songs = state.visible_songs();
    let items: Vec<ListItem> = songs
        .iter()
        .map(|song| {
            let marker = if current_id == Some(&song.id) { "♪ " } else { "  " };
            ListItem::new(vec![
                Line::from(vec![Span::raw(marker), Span::styled(song.name.clone(), Style::default().bold())]),
                Line::from(vec![Span::raw("  "), Span::styled(song.artist.clone(), Style::default().fg(Color::Gray))]),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▌");

    if songs.is_empty() {
        list_state.select(None);
    } else {
        let selected = list_state.selected().unwrap_or(0).min(songs.len() - 1);
        list_state.select(Some(selected));
    }
    frame.render_stateful_widget(list, area, list_state);
}

fn draw_mini_player(frame: &mut Frame, area: Rect, song: &Song, state: &UiState) {
    let (bg, fg) = accent_colors(&song.accent);
    let icon = if state.is_playing { "⏸" } else { "▶" };

    let mut spans = vec![
        Span::styled(format!(" {} ", icon), Style::default().bold()),
        Span::styled(song.name.clone(), Style::default().bold()),
        Span::raw("  "),
        Span::raw(song.artist.clone()),
    ];
    if let Some(error) = &state.playback_error {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(error.clone(), Style::default().fg(Color::Red)));
    }

    let bar = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(bg).fg(fg))
        .block(Block::default().borders(Borders::TOP | Borders::BOTTOM).border_style(Style::default().fg(fg)));
    frame.render_widget(bar, area);
}

fn draw_full_screen(frame: &mut Frame, area: Rect, song: &Song, state: &UiState, cover: Option<&str>, offset: u16) {
    let offset = offset.min(area.height);
    let area = Rect {
        y: area.y + offset,
        height: area.height - offset,
        ..area
    };
    if area.height == 0 {
        return;
    }

    let (bg, fg) = accent_colors(&song.accent);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(bg).fg(fg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    let mut title = vec![Line::from(song.name.clone()).bold(), Line::from(song.artist.clone())];
    if let Some(cover) = cover {
        title.push(Line::from(cover.to_string()).dark_gray());
    }
    let title = Paragraph::new(title).alignment(Alignment::Center).wrap(Wrap { trim: true });
    frame.render_widget(title, chunks[1]);

    let progress = Progress {
        position: state.position,
        duration: state.duration,
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(fg).bg(Color::Black))
        .ratio(f64::from(progress.fraction()))
        .label("");
    frame.render_widget(gauge, horizontal_margin(chunks[2], 4));

    let times = Line::from(vec![
        Span::raw(format_time(state.position)),
        Span::raw(" / "),
        Span::raw(format_time(state.duration)),
    ]);
    frame.render_widget(Paragraph::new(times).alignment(Alignment::Center), chunks[3]);

    let icon = if state.is_playing { "⏸" } else { "▶" };
    let controls = Line::from(format!("⏮   {}   ⏭", icon)).bold();
    frame.render_widget(Paragraph::new(controls).alignment(Alignment::Center), chunks[4]);

    if let Some(error) = &state.playback_error {
        frame.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)).alignment(Alignment::Center),
            chunks[5],
        );
    }

    let hints_area = Rect {
        y: area.y + area.height.saturating_sub(2),
        height: 1,
        ..inner
    };
    draw_hints(frame, hints_area, PlayerView::FullScreen);
}

fn draw_hints(frame: &mut Frame, area: Rect, view: PlayerView) {
    let text = match view {
        PlayerView::Mini => "↑↓ select  ⏎ play  ␣ pause  ←→ tab  n/p next/prev  f expand  q quit",
        PlayerView::FullScreen => "←→ swipe  ↓ close  ␣ pause  n/p next/prev  esc back  q quit",
    };
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)).alignment(Alignment::Center),
        area,
    );
}

fn horizontal_margin(area: Rect, margin: u16) -> Rect {
    let margin = margin.min(area.width / 2);
    Rect {
        x: area.x + margin,
        width: area.width - margin * 2,
        ..area
    }
}

/// Accent background plus a readable foreground for it
pub fn accent_colors(accent: &str) -> (Color, Color) {
    let AccentColor { r, g, b } = AccentColor::parse_or_black(accent);
    let luminance = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
    let fg = if luminance > 150.0 { Color::Black } else { Color::White };
    (Color::Rgb(r, g, b), fg)
}
