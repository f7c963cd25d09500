//! Interactive player
//!
//! Event loop:
//! - a blocking thread reads terminal events into a `tokio::mpsc` channel
//! - the loop redraws, then waits for an input event, a view model change or
//!   the next tick
//! - keys and mouse drags are translated into `MusicViewModel` calls

use crate::config::UiSettings;
use crate::ui::{self, Regions, ViewState};
use cadence_core::SongList;
use cadence_playback::{DragTracker, HorizontalSwipe, MusicViewModel, PlayerView, SwipeAction};
use ratatui::crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;
use ratatui::{DefaultTerminal, Frame};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error};

/// Surface a mouse drag started on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragSurface {
    MiniPlayer,
    FullScreen,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    surface: DragSurface,
    last: (u16, u16),
    moved: bool,
}

pub struct App {
    view_model: MusicViewModel,
    view: ViewState,
    full_screen_drag: DragTracker,
    mini_swipe: HorizontalSwipe,
    drag: Option<Drag>,
    regions: Regions,
    cell_px: f32,
    tick: Duration,
    should_quit: bool,
}

impl App {
    pub fn new(view_model: MusicViewModel, settings: &UiSettings) -> Self {
        Self {
            view_model,
            view: ViewState::default(),
            full_screen_drag: DragTracker::new(settings.swipe_threshold),
            mini_swipe: HorizontalSwipe::new(settings.swipe_threshold),
            drag: None,
            regions: Regions::default(),
            cell_px: settings.cell_px,
            tick: settings.tick(),
            should_quit: false,
        }
    }

    /// Run until the user quits
    ///
    /// The view model is shut down when the app is dropped, whichever way
    /// the loop ends.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        let mut events = spawn_event_reader();
        let mut state_rx = self.view_model.subscribe();
        let mut tick = tokio::time::interval(self.tick);

        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            tokio::select! {
                maybe_event = events.recv() => match maybe_event {
                    Some(event) => self.handle_event(event),
                    None => break,
                },
                changed = state_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = tick.tick() => {}
            }
        }

        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let state = self.view_model.state();
        self.view.dismiss_offset = (self.full_screen_drag.offset_y() / self.cell_px) as u16;
        self.regions = ui::draw(frame, &state, &mut self.view);
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let state = self.view_model.state();
        let full_screen = state.player_view == PlayerView::FullScreen;

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.should_quit = true,
            KeyCode::Esc => {
                if !self.view_model.back() {
                    self.should_quit = true;
                }
            }
            KeyCode::Char(' ') => self.view_model.toggle_play_pause(),
            KeyCode::Char('n') => self.view_model.play_next(),
            KeyCode::Char('p') => self.view_model.play_previous(),

            KeyCode::Left if full_screen => self.view_model.swipe_full_screen(SwipeAction::Previous),
            KeyCode::Right if full_screen => self.view_model.swipe_full_screen(SwipeAction::Next),
            KeyCode::Down if full_screen => self.view_model.swipe_full_screen(SwipeAction::Dismiss),
            _ if full_screen => {}

            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.view_model.select_tab(state.selected_tab.toggled());
                self.view.list.select(Some(0));
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Enter => self.play_selected(state.selected_tab),
            KeyCode::Char('f') => self.view_model.expand_player(),
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.view_model.state().visible_songs().len();
        if len == 0 {
            return;
        }
        let next = self.selected().saturating_add_signed(delta).min(len - 1);
        self.view.list.select(Some(next));
    }

    fn play_selected(&self, tab: SongList) {
        let songs = self.view_model.state().visible_songs();
        if let Some(song) = songs.get(self.selected()) {
            self.view_model.play_song(song, tab);
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let surface = if self.view_model.state().player_view == PlayerView::FullScreen {
                    Some(DragSurface::FullScreen)
                } else if self
                    .regions
                    .mini_player
                    .is_some_and(|bar| bar.contains(Position::new(mouse.column, mouse.row)))
                {
                    Some(DragSurface::MiniPlayer)
                } else {
                    None
                };

                self.drag = surface.map(|surface| Drag {
                    surface,
                    last: position,
                    moved: false,
                });

                if surface.is_none() {
                    self.click_list(mouse.column, mouse.row);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(drag) = self.drag.as_mut() else {
                    return;
                };
                let dx = (f32::from(position.0) - f32::from(drag.last.0)) * self.cell_px;
                let dy = (f32::from(position.1) - f32::from(drag.last.1)) * self.cell_px;
                drag.last = position;
                drag.moved = true;

                match drag.surface {
                    DragSurface::FullScreen => self.full_screen_drag.drag(dx, dy),
                    DragSurface::MiniPlayer => self.mini_swipe.drag(dx),
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(drag) = self.drag.take() else {
                    return;
                };
                match drag.surface {
                    DragSurface::FullScreen => {
                        if let Some(action) = self.full_screen_drag.end() {
                            debug!(?action, "Full-screen swipe");
                            self.view_model.swipe_full_screen(action);
                        }
                    }
                    DragSurface::MiniPlayer => match self.mini_swipe.end() {
                        Some(action) => {
                            debug!(?action, "Mini player swipe");
                            self.view_model.swipe_mini(action);
                        }
                        // A tap on the mini player opens the full-screen player
                        None if !drag.moved => self.view_model.expand_player(),
                        None => {}
                    },
                }
            }
            MouseEventKind::ScrollUp => self.move_selection(-1),
            MouseEventKind::ScrollDown => self.move_selection(1),
            _ => {}
        }
    }

    /// Clicking a row in the list plays it; each song takes two rows
    fn click_list(&mut self, column: u16, row: u16) {
        let list = self.regions.list;
        if !list.contains(Position::new(column, row)) || row <= list.y {
            return;
        }
        let index = self.view.list.offset() + usize::from(row - list.y - 1) / 2;
        let state = self.view_model.state();
        if index < state.visible_songs().len() {
            self.view.list.select(Some(index));
            self.play_selected(state.selected_tab);
        }
    }

    /// Show cover links built from the CMS at `base_url`
    #[must_use]
    pub fn with_asset_base(mut self, base_url: impl Into<String>) -> Self {
        self.view.asset_base = base_url.into();
        self
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn selected(&self) -> usize {
        self.view.list.selected().unwrap_or(0)
    }

    pub fn view_model(&self) -> &MusicViewModel {
        &self.view_model
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.view_model.shutdown();
    }
}

fn spawn_event_reader() -> mpsc::UnboundedReceiver<Event> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(event) => {
                if tx.send(event).is_err() {
                    break;
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to read terminal input");
                break;
            }
        }
    });
    rx
}
