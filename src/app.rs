//! Screen state and input handling.
//!
//! `App` owns the raw inputs, the per-element interaction state and the
//! theme resolver. The derived figures are never stored; they are computed
//! from the inputs whenever they are needed.

use std::path::Path;
use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::help::HelpTopic;
use crate::input::RentInput;
use crate::interaction::{PointerState, TooltipModal};
use crate::pricing::{DepositWeeks, DerivedAmounts, Frequency};
use crate::quote::{Quote, QUOTE_FILE};
use crate::theme::{Palette, ThemeResolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Card {
    MonthlyRental,
    PlatformFee,
    DepositTotal,
    YouReceive,
}

impl Card {
    pub const ALL: [Card; 4] = [
        Card::MonthlyRental,
        Card::PlatformFee,
        Card::DepositTotal,
        Card::YouReceive,
    ];

    pub fn index(self) -> usize {
        match self {
            Card::MonthlyRental => 0,
            Card::PlatformFee => 1,
            Card::DepositTotal => 2,
            Card::YouReceive => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Card::MonthlyRental => "Monthly Rental:",
            Card::PlatformFee => "Letly fee:",
            Card::DepositTotal => "Deposit total:",
            Card::YouReceive => "You receive:",
        }
    }

    pub fn topic(self) -> HelpTopic {
        match self {
            Card::MonthlyRental => HelpTopic::MonthlyRental,
            Card::PlatformFee => HelpTopic::PlatformFee,
            Card::DepositTotal => HelpTopic::DepositTotal,
            Card::YouReceive => HelpTopic::YouReceive,
        }
    }

    pub fn value(self, amounts: &DerivedAmounts) -> f64 {
        match self {
            Card::MonthlyRental => amounts.monthly_rent,
            Card::PlatformFee => amounts.fee,
            Card::DepositTotal => amounts.deposit_total,
            Card::YouReceive => amounts.landlord_payout,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Frequency,
    Rent,
    Deposit,
    Card(Card),
    Continue,
    GoBack,
}

const FOCUS_ORDER: [Focus; 9] = [
    Focus::Frequency,
    Focus::Rent,
    Focus::Deposit,
    Focus::Card(Card::MonthlyRental),
    Focus::Card(Card::PlatformFee),
    Focus::Card(Card::DepositTotal),
    Focus::Card(Card::YouReceive),
    Focus::Continue,
    Focus::GoBack,
];

impl Focus {
    fn position(self) -> usize {
        FOCUS_ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        FOCUS_ORDER[(self.position() + 1) % FOCUS_ORDER.len()]
    }

    pub fn prev(self) -> Self {
        FOCUS_ORDER[(self.position() + FOCUS_ORDER.len() - 1) % FOCUS_ORDER.len()]
    }

    pub fn topic(self) -> Option<HelpTopic> {
        match self {
            Focus::Frequency => Some(HelpTopic::Frequency),
            Focus::Deposit => Some(HelpTopic::Deposit),
            Focus::Card(card) => Some(card.topic()),
            Focus::Rent | Focus::Continue | Focus::GoBack => None,
        }
    }
}

/// Screen regions from the last frame, used to route mouse events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    pub title: Rect,
    pub frequency_help: Rect,
    pub weekly: Rect,
    pub monthly: Rect,
    pub rent: Rect,
    pub deposit_help: Rect,
    pub deposit: [Rect; 5],
    pub cards: [Rect; 4],
    pub continue_button: Rect,
    pub go_back: Rect,
    pub modal: Option<Rect>,
    pub modal_button: Option<Rect>,
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

#[derive(Debug)]
pub struct App {
    pub rent: RentInput,
    pub deposit_weeks: DepositWeeks,
    pub focus: Focus,
    pub cards: [PointerState; 4],
    pub deposit_buttons: [PointerState; 5],
    pub modal: Option<TooltipModal>,
    pub theme: ThemeResolver,
    pub status: Option<String>,
    pub hit_map: HitMap,
    pub should_quit: bool,
}

impl App {
    pub fn new(rent: RentInput, deposit_weeks: DepositWeeks, theme: ThemeResolver) -> Self {
        Self {
            rent,
            deposit_weeks,
            focus: Focus::Rent,
            cards: [PointerState::Idle; 4],
            deposit_buttons: [PointerState::Idle; 5],
            modal: None,
            theme,
            status: None,
            hit_map: HitMap::default(),
            should_quit: false,
        }
    }

    pub fn amounts(&self) -> DerivedAmounts {
        self.rent.derive(self.deposit_weeks)
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }

    pub fn quote(&self) -> Quote {
        Quote::new(&self.rent, self.deposit_weeks)
    }

    pub fn set_frequency(&mut self, frequency: Frequency) {
        if self.rent.frequency != frequency {
            debug!(?frequency, "frequency changed");
            self.rent.frequency = frequency;
        }
    }

    pub fn set_deposit_weeks(&mut self, weeks: DepositWeeks) {
        if self.deposit_weeks != weeks {
            debug!(weeks = weeks.get(), "deposit weeks changed");
            self.deposit_weeks = weeks;
        }
    }

    pub fn open_help(&mut self, topic: HelpTopic) {
        debug!(?topic, "help opened");
        self.modal = Some(TooltipModal::open(topic));
    }

    pub fn close_help(&mut self, now: Instant) {
        if let Some(modal) = self.modal.as_mut() {
            modal.close(now);
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme.toggle();
    }

    /// Advance timers: finish a closing modal, follow the system theme.
    pub fn tick(&mut self, now: Instant) {
        if self.modal.as_ref().is_some_and(|modal| modal.tick(now)) {
            self.modal = None;
        }
        if self.theme.refresh() {
            info!(mode = ?self.theme.active(), "system theme changed");
        }
    }

    pub fn export_quote(&mut self, path: &Path) {
        match self.quote().export_csv(path) {
            Ok(()) => {
                info!(path = %path.display(), "quote exported");
                self.status = Some(format!("Exported to {}", path.display()));
            }
            Err(err) => {
                warn!(error = %err, "quote export failed");
                self.status = Some(format!("Error exporting to CSV: {:#}", err));
            }
        }
    }
}

pub fn handle_event(app: &mut App, event: Event, now: Instant) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key, now),
        Event::Mouse(mouse) => handle_mouse(app, mouse, now),
        Event::Paste(text) => {
            if app.modal.is_none() && app.focus == Focus::Rent {
                app.rent.push_str(&text);
            }
        }
        _ => {}
    }
}

pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.modal.is_some() {
        handle_modal_input(app, key, now);
        return;
    }

    app.status = None;

    let consumed = match app.focus {
        Focus::Frequency => handle_frequency_input(app, key),
        Focus::Rent => handle_rent_input(app, key),
        Focus::Deposit => handle_deposit_input(app, key),
        Focus::Card(card) => handle_card_input(app, card, key),
        Focus::Continue | Focus::GoBack => handle_button_input(app, key),
    };
    if consumed {
        return;
    }

    match key.code {
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::BackTab => app.focus = app.focus.prev(),
        KeyCode::Char('?') => {
            if let Some(topic) = app.focus.topic() {
                app.open_help(topic);
            }
        }
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('e') => app.export_quote(Path::new(QUOTE_FILE)),
        KeyCode::Esc | KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_modal_input(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('q') => {
            app.close_help(now)
        }
        _ => {}
    }
}

fn handle_rent_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
            app.rent.push_char(c);
        }
        KeyCode::Backspace => {
            app.rent.backspace();
        }
        KeyCode::Delete => app.rent.clear(),
        KeyCode::Enter => app.focus = app.focus.next(),
        _ => return false,
    }
    true
}

fn handle_frequency_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('h') | KeyCode::Char('l') => {
            app.set_frequency(app.rent.frequency.toggle())
        }
        KeyCode::Char('w') => app.set_frequency(Frequency::Weekly),
        KeyCode::Char('m') => app.set_frequency(Frequency::Monthly),
        KeyCode::Enter => app.focus = app.focus.next(),
        _ => return false,
    }
    true
}

fn handle_deposit_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.set_deposit_weeks(app.deposit_weeks.prev()),
        KeyCode::Right | KeyCode::Char('l') => app.set_deposit_weeks(app.deposit_weeks.next()),
        KeyCode::Char(c @ '1'..='5') => {
            if let Ok(weeks) = DepositWeeks::new(c as u8 - b'0') {
                app.set_deposit_weeks(weeks);
            }
        }
        KeyCode::Enter => app.focus = app.focus.next(),
        _ => return false,
    }
    true
}

fn handle_card_input(app: &mut App, card: Card, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => app.open_help(card.topic()),
        KeyCode::Up | KeyCode::Char('k') => app.focus = app.focus.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.focus = app.focus.next(),
        _ => return false,
    }
    true
}

fn handle_button_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => {
            debug!(focus = ?app.focus, "button pressed; nothing to do");
            true
        }
        KeyCode::Left | KeyCode::Right => {
            app.focus = if app.focus == Focus::Continue {
                Focus::GoBack
            } else {
                Focus::Continue
            };
            true
        }
        _ => false,
    }
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent, now: Instant) {
    let (column, row) = (mouse.column, mouse.row);

    if let Some(modal) = app.modal.as_mut() {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let on_button = app
                    .hit_map
                    .modal_button
                    .is_some_and(|rect| contains(rect, column, row));
                let on_sheet = app.hit_map.modal.is_some_and(|rect| contains(rect, column, row));
                if on_button || !on_sheet {
                    modal.close(now);
                } else {
                    modal.begin_drag(row);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => modal.drag_to(row),
            MouseEventKind::Up(MouseButton::Left) => {
                if modal.drag.is_dragging() {
                    let release = modal.end_drag(now);
                    debug!(?release, "modal drag released");
                }
            }
            _ => {}
        }
        return;
    }

    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => update_hover(app, column, row),
        MouseEventKind::Down(MouseButton::Left) => {
            update_hover(app, column, row);
            handle_click_down(app, column, row);
        }
        MouseEventKind::Up(MouseButton::Left) => handle_click_up(app, column, row),
        _ => {}
    }
}

fn update_hover(app: &mut App, column: u16, row: u16) {
    for (state, rect) in app.cards.iter_mut().zip(app.hit_map.cards) {
        *state = if contains(rect, column, row) {
            state.enter()
        } else {
            state.leave()
        };
    }
    for (state, rect) in app.deposit_buttons.iter_mut().zip(app.hit_map.deposit) {
        *state = if contains(rect, column, row) {
            state.enter()
        } else {
            state.leave()
        };
    }
}

fn handle_click_down(app: &mut App, column: u16, row: u16) {
    app.status = None;
    let hits = app.hit_map.clone();

    if contains(hits.title, column, row) {
        app.toggle_theme();
    } else if contains(hits.frequency_help, column, row) {
        app.focus = Focus::Frequency;
        app.open_help(HelpTopic::Frequency);
    } else if contains(hits.deposit_help, column, row) {
        app.focus = Focus::Deposit;
        app.open_help(HelpTopic::Deposit);
    } else if contains(hits.weekly, column, row) {
        app.focus = Focus::Frequency;
        app.set_frequency(Frequency::Weekly);
    } else if contains(hits.monthly, column, row) {
        app.focus = Focus::Frequency;
        app.set_frequency(Frequency::Monthly);
    } else if contains(hits.rent, column, row) {
        app.focus = Focus::Rent;
    } else if contains(hits.continue_button, column, row) {
        app.focus = Focus::Continue;
    } else if contains(hits.go_back, column, row) {
        app.focus = Focus::GoBack;
    } else if let Some(i) = hits.deposit.iter().position(|r| contains(*r, column, row)) {
        app.focus = Focus::Deposit;
        app.deposit_buttons[i] = app.deposit_buttons[i].press();
        app.set_deposit_weeks(DepositWeeks::ALL[i]);
    } else if let Some(i) = hits.cards.iter().position(|r| contains(*r, column, row)) {
        app.focus = Focus::Card(Card::ALL[i]);
        app.cards[i] = app.cards[i].press();
    }
}

/// A card opens its help when the press is released over it.
fn handle_click_up(app: &mut App, column: u16, row: u16) {
    let mut clicked = None;
    for (i, rect) in app.hit_map.cards.iter().enumerate() {
        if app.cards[i].is_pressed() && contains(*rect, column, row) {
            clicked = Some(Card::ALL[i]);
        }
        app.cards[i] = app.cards[i].release();
    }
    for state in app.deposit_buttons.iter_mut() {
        *state = state.release();
    }
    if let Some(card) = clicked {
        app.open_help(card.topic());
    }
}
