//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Pointer Mapping
//!
//! Mouse columns become pixel coordinates (`column * pixels_per_column`)
//! before they reach the gesture tracker, so the swipe threshold means the
//! same distance it would in a browser. A press only starts a drag when it
//! lands on the top card.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (fetching, dragging, card in motion, image still
//!   loading): draws every ~16ms.
//! - **Idle**: sleeps up to 250ms and only redraws on events.
//!
//! ## Background Work
//!
//! Fetches and delayed advances run as tokio tasks and report back through
//! an mpsc channel of Actions. The pending advance is aborted on restart;
//! the deck's generation check catches any that slip through.

mod animation;
mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::layout::{Position, Rect};
use tui_scrollview::ScrollViewState;

use crate::catalog::{BatchRequest, CacheStatus, CataasProvider, Item, ItemProvider, ResourceCache};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::deck::{CardVisual, DeckPhase, FetchToken, PendingAdvance};
use crate::core::gesture::{InputSample, PointerPhase};
use crate::core::state::App;
use crate::tui::animation::CardMotion;
use crate::tui::component::EventHandler;
use crate::tui::components::{Control, ControlBarState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const IDLE_INTERVAL: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub controls: ControlBarState,
    pub summary_scroll: ScrollViewState,
    // Animation state
    pub motion: Option<CardMotion>,
    /// Where the resting top card was drawn last frame (empty when none).
    pub card_area: Rect,
    pub tag: String,
    pub pixels_per_column: f32,
    pub cache: ResourceCache,
}

impl TuiState {
    pub fn new(tag: String, pixels_per_column: f32, cache: ResourceCache) -> Self {
        Self {
            controls: ControlBarState::new(),
            summary_scroll: ScrollViewState::default(),
            motion: None,
            card_area: Rect::default(),
            tag,
            pixels_per_column,
            cache,
        }
    }

    fn pointer(&self, phase: PointerPhase, column: u16) -> Action {
        Action::Input(InputSample::pointer(
            phase,
            column as f32 * self.pixels_per_column,
        ))
    }
}

/// Handles for work running outside the event loop.
struct Tasks {
    provider: Arc<dyn ItemProvider>,
    tx: mpsc::Sender<Action>,
    advance: Option<tokio::task::AbortHandle>,
}

impl Tasks {
    fn cancel_advance(&mut self) {
        if let Some(handle) = self.advance.take() {
            handle.abort();
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn ItemProvider> {
    Arc::new(CataasProvider::new(
        config.base_url.clone(),
        config.tag.clone(),
        config.image_width,
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config);
    info!("Using provider '{}' for tag '{}'", provider.name(), config.tag);

    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(
        config.tag.clone(),
        config.pixels_per_column,
        ResourceCache::new(),
    );

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut tasks = Tasks {
        provider,
        tx,
        advance: None,
    };

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut should_quit = dispatch(Action::StartFetch, &mut app, &mut tui, &mut tasks);

    while !should_quit {
        let now = Instant::now();
        let animating = is_animating(&app, &tui, now);
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            warm_visible(&app, &tui.cache);
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, now, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating { FRAME_INTERVAL } else { IDLE_INTERVAL };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&event, &mut tui)
                && dispatch(action, &mut app, &mut tui, &mut tasks)
            {
                should_quit = true;
                break;
            }
        }

        // Handle background task actions (batches, advances)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(action, &mut app, &mut tui, &mut tasks) {
                should_quit = true;
            }
        }
    }

    tasks.cancel_advance();
    ratatui::restore();
    Ok(())
}

/// Turns a terminal event into the action it stands for, if any.
/// Presentation-only events (scrolling) are handled here directly.
fn route_event(event: &TuiEvent, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::Resize => None,
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::ScrollUp => {
            tui.summary_scroll.scroll_up();
            None
        }
        TuiEvent::ScrollDown => {
            tui.summary_scroll.scroll_down();
            None
        }
        TuiEvent::PointerDown(column, row)
            if tui.card_area.contains(Position::new(*column, *row)) =>
        {
            Some(tui.pointer(PointerPhase::Down, *column))
        }
        TuiEvent::PointerDrag(column, _) => Some(tui.pointer(PointerPhase::Move, *column)),
        TuiEvent::PointerUp(column, _) => Some(tui.pointer(PointerPhase::Up, *column)),
        _ => tui.controls.handle_event(event).map(Control::action),
    }
}

/// Runs one action through the core and carries out its effect.
/// Returns true when the app should quit.
fn dispatch(action: Action, app: &mut App, tui: &mut TuiState, tasks: &mut Tasks) -> bool {
    // Pose at release, so a committed card flies out from where it was let go.
    let released = app.deck.drag_visual();
    let effect = update(app, action);
    apply_effect(effect, app, tui, tasks, released, Instant::now())
}

fn apply_effect(
    effect: Effect,
    app: &App,
    tui: &mut TuiState,
    tasks: &mut Tasks,
    released: Option<CardVisual>,
    now: Instant,
) -> bool {
    match effect {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::FetchBatch(token) => {
            tasks.cancel_advance();
            tui.motion = None;
            tui.summary_scroll = ScrollViewState::default();
            tui.cache.clear();
            spawn_fetch(
                tasks.provider.clone(),
                app.batch_request(),
                token,
                tasks.tx.clone(),
            );
        }
        Effect::ScheduleAdvance(pending) => {
            if let DeckPhase::Committing(decision) = app.deck.phase() {
                tui.motion = Some(CardMotion::exit(
                    *decision,
                    released,
                    ui::card_owner(app),
                    now,
                ));
            }
            tasks.cancel_advance();
            tasks.advance = Some(spawn_advance(pending, tasks.tx.clone()));
        }
        Effect::SpringBack { from_delta } => {
            tui.motion = Some(CardMotion::spring_back(
                from_delta,
                ui::card_owner(app),
                now,
            ));
        }
        Effect::Preload(items) => {
            tui.cache.warm(&items);
        }
    }
    false
}

fn is_animating(app: &App, tui: &TuiState, now: Instant) -> bool {
    let busy_phase = matches!(
        app.deck.phase(),
        DeckPhase::Loading | DeckPhase::Dragging | DeckPhase::Committing(_)
    );
    let in_motion = tui.motion.is_some_and(|m| !m.is_finished(now));
    let image_loading = app
        .deck
        .current_item()
        .is_some_and(|item| tui.cache.status(&item.resource_url) == CacheStatus::Pending);
    busy_phase || in_motion || image_loading
}

/// The two cards on screen are warmed regardless of the preload window.
fn warm_visible(app: &App, cache: &ResourceCache) {
    let visible: Vec<Item> = app
        .deck
        .current_item()
        .into_iter()
        .chain(app.deck.lookahead_item())
        .cloned()
        .collect();
    cache.warm(&visible);
}

fn spawn_fetch(
    provider: Arc<dyn ItemProvider>,
    request: BatchRequest,
    token: FetchToken,
    tx: mpsc::Sender<Action>,
) {
    info!(
        "Spawning batch fetch: {} items at offset {} (token={})",
        request.count, request.offset_hint, token.0
    );
    tokio::spawn(async move {
        let action = match provider.fetch_batch(request).await {
            Ok(items) => Action::BatchLoaded { token, items },
            Err(e) => {
                warn!("Batch fetch failed: {}", e);
                Action::FetchFailed {
                    token,
                    message: e.to_string(),
                }
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver batch (token={}): receiver dropped", token.0);
        }
    });
}

fn spawn_advance(pending: PendingAdvance, tx: mpsc::Sender<Action>) -> tokio::task::AbortHandle {
    debug!(
        "Advance scheduled in {:?} (generation={})",
        pending.delay, pending.generation
    );
    let handle = tokio::spawn(async move {
        tokio::time::sleep(pending.delay).await;
        if tx
            .send(Action::AdvanceDue {
                generation: pending.generation,
            })
            .is_err()
        {
            warn!("Failed to deliver advance: receiver dropped");
        }
    });
    handle.abort_handle()
}
