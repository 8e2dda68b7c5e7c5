//! Rendering. Every function takes the resolved [`Palette`] explicitly and
//! records the regions it draws into the app's hit map for mouse routing.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Card, Focus};
use crate::format::{format_currency, is_zero_display, POUND};
use crate::interaction::{PointerState, TooltipModal};
use crate::pricing::{DepositWeeks, Frequency};
use crate::theme::Palette;

const MODAL_WIDTH: u16 = 60;
const MODAL_HEIGHT: u16 = 11;

pub fn ui(f: &mut Frame, app: &mut App) {
    let palette = app.palette();
    let area = f.size();
    f.render_widget(Block::default().style(palette.base()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(8),
                Constraint::Length(3),
                Constraint::Min(1),
            ]
            .as_ref(),
        )
        .split(area);

    render_header(f, app, &palette, chunks[0]);
    render_frequency(f, app, &palette, chunks[1]);
    render_rent(f, app, &palette, chunks[2]);
    render_deposit(f, app, &palette, chunks[3]);

    let heading = Paragraph::new("Calculations").style(palette.title());
    f.render_widget(heading, chunks[4]);

    render_cards(f, app, &palette, chunks[5]);
    render_buttons(f, app, &palette, chunks[6]);
    render_help_line(f, app, &palette, chunks[7]);

    app.hit_map.modal = None;
    app.hit_map.modal_button = None;
    if let Some(modal) = app.modal.clone() {
        render_modal(f, app, &palette, &modal, area);
    }
}

fn render_header(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)].as_ref())
        .split(area);

    let title = Paragraph::new("Set Your Rental Terms")
        .style(palette.title())
        .alignment(Alignment::Center);
    f.render_widget(title, rows[0]);
    app.hit_map.title = rows[0];

    let subtitle = Paragraph::new("Configure terms that work for you")
        .style(palette.secondary())
        .alignment(Alignment::Center);
    f.render_widget(subtitle, rows[1]);
}

fn field_block<'a>(title: &'a str, palette: &Palette, focused: bool, with_help: bool) -> Block<'a> {
    let mut spans = vec![Span::styled(title, Style::default().fg(palette.text_primary))];
    if with_help {
        spans.push(Span::styled(" (?)", palette.muted()));
    }
    Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(focused))
        .style(Style::default().bg(palette.card))
        .title(Line::from(spans))
}

/// Where `field_block` draws its "(?)" marker on the top border.
fn help_marker(area: Rect, title: &str) -> Rect {
    let x = area.x + 2 + title.chars().count() as u16;
    let width = 3.min(area.right().saturating_sub(x + 1));
    Rect::new(x, area.y, width, 1)
}

fn render_frequency(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let focused = app.focus == Focus::Frequency;
    let block = field_block("Frequency", palette, focused, true);
    let inner = block.inner(area);
    f.render_widget(block, area);
    app.hit_map.frequency_help = help_marker(area, "Frequency");

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(inner);

    for (frequency, rect) in [(Frequency::Weekly, halves[0]), (Frequency::Monthly, halves[1])] {
        let style = if app.rent.frequency == frequency {
            palette.selected()
        } else {
            palette.muted()
        };
        let option = Paragraph::new(frequency.label())
            .style(style)
            .alignment(Alignment::Center);
        f.render_widget(option, rect);
    }

    app.hit_map.weekly = halves[0];
    app.hit_map.monthly = halves[1];
}

fn render_rent(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let focused = app.focus == Focus::Rent;
    let label = format!("{} Rent", app.rent.frequency.label());
    let block = field_block(&label, palette, focused, false);
    let inner = block.inner(area);

    let line = if app.rent.is_empty() {
        Line::from(vec![
            Span::styled(POUND, palette.muted()),
            Span::styled(
                format!(" What tenants will pay per {}", app.rent.frequency.period()),
                palette.muted(),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled(POUND, palette.muted()),
            Span::styled(
                format!(" {}", app.rent.amount()),
                Style::default().fg(palette.text_primary),
            ),
        ])
    };
    f.render_widget(Paragraph::new(line).block(block), area);
    app.hit_map.rent = area;

    if focused && app.modal.is_none() {
        let typed = app.rent.amount().chars().count() as u16;
        let x = (inner.x + 2 + typed).min(inner.right().saturating_sub(1));
        f.set_cursor(x, inner.y);
    }
}

fn render_deposit(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let focused = app.focus == Focus::Deposit;
    let block = field_block("Deposit Amount", palette, focused, true);
    let inner = block.inner(area);
    f.render_widget(block, area);
    app.hit_map.deposit_help = help_marker(area, "Deposit Amount");

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5].as_ref())
        .split(inner);

    for (i, weeks) in DepositWeeks::ALL.iter().enumerate() {
        let style = if *weeks == app.deposit_weeks {
            palette.selected()
        } else if app.deposit_buttons[i].is_hovered() || app.deposit_buttons[i].is_pressed() {
            palette.muted().bg(palette.hover)
        } else {
            palette.muted()
        };
        let button = Paragraph::new(weeks.get().to_string())
            .style(style)
            .alignment(Alignment::Center);
        f.render_widget(button, columns[i]);
        app.hit_map.deposit[i] = columns[i];
    }
}

fn render_cards(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(4)].as_ref())
        .split(area);

    let amounts = app.amounts();
    for (row_index, pair) in Card::ALL.chunks(2).enumerate() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
            .split(rows[row_index]);

        for (card, rect) in pair.iter().zip(columns.iter()) {
            let value = format_currency(card.value(&amounts));
            let state = app.cards[card.index()];
            let focused = app.focus == Focus::Card(*card);
            render_card(f, palette, card.label(), &value, state, focused, *rect);
            app.hit_map.cards[card.index()] = *rect;
        }
    }
}

fn render_card(
    f: &mut Frame,
    palette: &Palette,
    label: &str,
    value: &str,
    state: PointerState,
    focused: bool,
    area: Rect,
) {
    let filled = !is_zero_display(value);

    let background = match state {
        PointerState::Pressed => palette.pressed,
        PointerState::Hovered => palette.hover,
        PointerState::Idle if focused => palette.hover,
        PointerState::Idle => palette.card,
    };
    let idle_text = if state.is_pressed() {
        palette.pressed_text
    } else {
        palette.text_muted
    };

    let label_style = Style::default().fg(if filled { palette.filled_label } else { idle_text });
    let price_style = if filled {
        Style::default()
            .fg(palette.filled_price)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(idle_text)
    };

    let text = vec![
        Line::from(Span::styled(label, label_style)),
        Line::from(Span::styled(value, price_style)),
    ];
    let card = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border(focused))
            .style(Style::default().bg(background)),
    );
    f.render_widget(card, area);
}

fn render_buttons(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let continue_style = if app.focus == Focus::Continue {
        palette.selected().add_modifier(Modifier::UNDERLINED)
    } else {
        palette.selected()
    };
    let continue_button = Paragraph::new("Continue")
        .style(continue_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(palette.border(app.focus == Focus::Continue)));
    f.render_widget(continue_button, columns[0]);

    let back_style = if app.focus == Focus::GoBack {
        palette.secondary().add_modifier(Modifier::UNDERLINED)
    } else {
        palette.secondary()
    };
    let go_back = Paragraph::new("Go back")
        .style(back_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(palette.border(app.focus == Focus::GoBack)));
    f.render_widget(go_back, columns[1]);

    app.hit_map.continue_button = columns[0];
    app.hit_map.go_back = columns[1];
}

fn render_help_line(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let line = match &app.status {
        Some(status) => Line::from(Span::styled(status.clone(), Style::default().fg(palette.accent))),
        None => Line::from(Span::styled(
            "Tab: next field | ?: explain | t: theme | e: export CSV | q: quit",
            palette.muted(),
        )),
    };
    let help = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(help, area);
}

fn modal_area(area: Rect, drag_offset: u16) -> Rect {
    let width = MODAL_WIDTH.min(area.width);
    let height = MODAL_HEIGHT.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = (area.bottom() - height + drag_offset).min(area.bottom().saturating_sub(1));
    Rect::new(x, y, width, area.bottom() - y)
}

fn render_modal(f: &mut Frame, app: &mut App, palette: &Palette, modal: &TooltipModal, area: Rect) {
    let sheet = modal_area(area, modal.drag.offset());
    f.render_widget(Clear, sheet);

    let (text_style, handle_style) = if modal.is_closing() {
        (palette.muted(), palette.muted())
    } else if modal.drag.is_dragging() {
        (Style::default().fg(palette.text_primary), Style::default().fg(palette.accent))
    } else {
        (Style::default().fg(palette.text_primary), palette.muted())
    };

    let block = Block::default()
        .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
        .border_style(palette.border(true))
        .style(Style::default().bg(palette.card));
    let inner = block.inner(sheet);
    f.render_widget(block, sheet);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(inner);

    let handle = Paragraph::new("━━━━━━━━━━")
        .style(handle_style)
        .alignment(Alignment::Center);
    f.render_widget(handle, parts[0]);

    let title = Paragraph::new(modal.topic.title())
        .style(text_style.add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(title, parts[1]);

    let body = Paragraph::new(modal.topic.body())
        .style(text_style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(body, parts[2]);

    let button = Paragraph::new("Got it")
        .style(palette.selected())
        .alignment(Alignment::Center);
    f.render_widget(button, parts[3]);

    app.hit_map.modal = Some(sheet);
    app.hit_map.modal_button = Some(parts[3]);
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use super::*;
    use crate::help::HelpTopic;
    use crate::input::RentInput;
    use crate::interaction::ModalDrag;
    use crate::preferences::Preferences;
    use crate::theme::{ThemeMode, ThemeResolver};

    fn app(amount: &str, frequency: Frequency, weeks: u8) -> App {
        let mut rent = RentInput::new(frequency);
        assert!(rent.offer(amount).is_accepted());
        let theme = ThemeResolver::new(Preferences::ephemeral(), Box::new(|| ThemeMode::Light));
        App::new(rent, DepositWeeks::new(weeks).unwrap(), theme)
    }

    fn draw(app: &mut App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(80, 32)).unwrap();
        terminal.draw(|f| ui(f, app)).expect("render should not panic");
        terminal.backend().buffer().clone()
    }

    fn text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn empty_screen_shows_placeholder_and_zeroes() {
        let mut app = app("", Frequency::Weekly, 1);
        let content = text(&draw(&mut app));
        assert!(content.contains("Set Your Rental Terms"));
        assert!(content.contains("What tenants will pay per week"));
        assert!(content.contains("£0.00"));
        assert!(content.contains("Continue"));
    }

    #[test]
    fn weekly_scenario_figures_render() {
        let mut app = app("1000", Frequency::Weekly, 1);
        let content = text(&draw(&mut app));
        assert!(content.contains("Weekly Rent"));
        assert!(content.contains("£4,333.33"));
        assert!(content.contains("£216.67"));
        assert!(content.contains("£4,116.67"));
        assert!(content.contains("£1,000.00"));
    }

    #[test]
    fn monthly_scenario_figures_render() {
        let mut app = app("2000", Frequency::Monthly, 3);
        let content = text(&draw(&mut app));
        assert!(content.contains("Monthly Rent"));
        assert!(content.contains("£2,000.00"));
        assert!(content.contains("£100.00"));
        assert!(content.contains("£1,900.00"));
        assert!(content.contains("£1,384.62"));
    }

    #[test]
    fn render_records_hit_regions() {
        let mut app = app("", Frequency::Weekly, 1);
        draw(&mut app);
        let hits = &app.hit_map;
        assert!(hits.title.width > 0);
        assert!(hits.weekly.width > 0 && hits.monthly.x > hits.weekly.x);
        assert!(hits.deposit.iter().all(|r| r.width > 0));
        assert!(hits.cards.iter().all(|r| r.height == 4));
        assert!(hits.modal.is_none());
    }

    #[test]
    fn help_markers_are_recorded_where_drawn() {
        let mut app = app("", Frequency::Weekly, 1);
        let buffer = draw(&mut app);
        for marker in [app.hit_map.frequency_help, app.hit_map.deposit_help] {
            assert_eq!(marker.width, 3);
            let drawn: String = (marker.x..marker.right())
                .map(|x| buffer.get(x, marker.y).symbol())
                .collect();
            assert_eq!(drawn, "(?)");
        }
    }

    #[test]
    fn modal_renders_topic_and_moves_with_drag() {
        let mut app = app("", Frequency::Weekly, 1);
        app.open_help(HelpTopic::PlatformFee);
        let content = text(&draw(&mut app));
        assert!(content.contains("Monthly Letly Fee"));
        assert!(content.contains("Got it"));
        let resting = app.hit_map.modal.unwrap();

        if let Some(modal) = app.modal.as_mut() {
            modal.drag = ModalDrag::Dragging { start_row: 20, offset: 3 };
        }
        draw(&mut app);
        let dragged = app.hit_map.modal.unwrap();
        assert_eq!(dragged.y, resting.y + 3);
    }

    #[test]
    fn dark_theme_paints_background() {
        let mut app = app("", Frequency::Weekly, 1);
        app.theme.set_preference(ThemeMode::Dark);
        let buffer = draw(&mut app);
        assert_eq!(buffer.get(0, 0).bg, Palette::DARK.background);
    }

    #[test]
    fn status_replaces_help_line() {
        let mut app = app("", Frequency::Weekly, 1);
        app.status = Some("Exported to rental_quote.csv".into());
        let content = text(&draw(&mut app));
        assert!(content.contains("Exported to rental_quote.csv"));
        assert!(!content.contains("Tab: next field"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut app = app("5", Frequency::Weekly, 2);
        app.open_help(HelpTopic::Deposit);
        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        terminal.draw(|f| ui(f, &mut app)).expect("render should not panic");
    }

    #[test]
    fn modal_area_stays_on_screen() {
        let area = Rect::new(0, 0, 80, 30);
        assert_eq!(modal_area(area, 0), Rect::new(10, 19, 60, 11));
        let pushed = modal_area(area, 50);
        assert_eq!(pushed.y, 29);
        assert_eq!(pushed.height, 1);
    }
}
