//! Paper Forker rendering.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::actions::{BUY_UPGRADE_BASE, CANCEL_RESET, FORK_PAPER, RESET_GAME, WRITE_CODE};
use crate::game::PaperForkerGame;
use crate::input::ClickState;
use crate::logic::format_number;
use crate::save::KeyValueStore;
use crate::state::UpgradeKind;
use crate::widgets::ClickableList;

/// Below this many columns the panels stack vertically.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 70
}

pub fn render<S: KeyValueStore>(
    game: &PaperForkerGame<S>,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(area);

    render_title(f, chunks[0]);

    if !game.session.state.is_unlocked() {
        render_locked(game, f, chunks[1], click_state);
    } else if is_narrow_layout(area.width) {
        render_narrow_layout(game, f, chunks[1], click_state);
    } else {
        render_wide_layout(game, f, chunks[1], click_state);
    }

    render_help(game, f, chunks[2], click_state);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "Paper Forker",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(title, area);
}

/// Before the first fork the only thing on screen is the fork button.
fn render_locked<S: KeyValueStore>(
    game: &PaperForkerGame<S>,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            " [F] Fork a paper ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        FORK_PAPER,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(chunks[0], &mut cs, 1, 1);
    }
    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(widget, chunks[0]);

    render_log(game, f, chunks[1]);
}

/// Wide layout: left panel (stats, upgrades, fork, code) | right panel (log)
fn render_wide_layout<S: KeyValueStore>(
    game: &PaperForkerGame<S>,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Min(3),
        ])
        .split(columns[0]);

    render_stats(game, f, left[0]);
    render_upgrades(game, f, left[1], click_state);
    render_fork(game, f, left[2], click_state);
    render_code(game, f, left[3], click_state);
    render_log(game, f, columns[1]);
}

/// Narrow layout: everything stacked, log gets the remaining rows.
fn render_narrow_layout<S: KeyValueStore>(
    game: &PaperForkerGame<S>,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    render_stats(game, f, chunks[0]);
    render_upgrades(game, f, chunks[1], click_state);
    render_fork(game, f, chunks[2], click_state);
    render_code(game, f, chunks[3], click_state);
    render_log(game, f, chunks[4]);
}

fn render_stats<S: KeyValueStore>(game: &PaperForkerGame<S>, f: &mut Frame, area: Rect) {
    let state = &game.session.state;
    let forks_label = if state.forks == 1 { "Paper Fork" } else { "Paper Forks" };
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format_number(state.lines_of_code),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Lines of Code Written"),
        ]),
        Line::from(format!("{} {}", format_number(state.forks), forks_label)),
        Line::from(Span::styled(
            format!(
                "Your friends are currently mashing their keyboard {}x per second",
                format_number(game.session.production_per_tick())
            ),
            Style::default().fg(Color::Gray),
        )),
    ];
    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(" Stats "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_upgrades<S: KeyValueStore>(
    game: &PaperForkerGame<S>,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let state = &game.session.state;
    let mut cl = ClickableList::new();
    for kind in UpgradeKind::all() {
        let affordable = game.session.can_afford(*kind);
        let (key_style, text_style) = if affordable {
            (
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(Color::White),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::DarkGray),
            )
        };
        let level_text = match kind {
            UpgradeKind::Friend => format!("Currently Have {}", kind.level(state)),
            _ => format!("Currently Level {}", kind.level(state)),
        };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" [{}] ", kind.key()), key_style),
                Span::styled(
                    format!(
                        "{} ({}) Cost: {} LoC",
                        kind.name(),
                        level_text,
                        format_number(game.session.cost_of(*kind))
                    ),
                    text_style,
                ),
            ]),
            BUY_UPGRADE_BASE + kind.index() as u16,
        );
    }

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1);
    }
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Upgrades "),
    );
    f.render_widget(widget, area);
}

fn render_fork<S: KeyValueStore>(
    game: &PaperForkerGame<S>,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let requirement = game.session.fork_requirement();
    let ready = game.session.can_fork();

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        format!(
            "After {} lines of code, you can reasonably call this fork finished and begin anew.",
            format_number(requirement)
        ),
        Style::default().fg(Color::Gray),
    )));
    let button_style = if ready {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    cl.push_clickable(
        Line::from(Span::styled(" [F] Finish this fork ", button_style)),
        FORK_PAPER,
    );

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1);
    }
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" Fork "),
    );
    f.render_widget(widget, area);
}

fn render_code<S: KeyValueStore>(
    game: &PaperForkerGame<S>,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    cl.push_clickable(
        Line::from(vec![
            Span::styled(
                " [W] ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "Write code (+{} LoC per key, alternate W and Space)",
                    format_number(game.session.manual_gain())
                ),
                Style::default().fg(Color::White),
            ),
        ]),
        WRITE_CODE,
    );

    {
        // The whole panel is a write button.
        let mut cs = click_state.borrow_mut();
        cs.add_click_target(area, WRITE_CODE);
        cl.register_targets(area, &mut cs, 1, 1);
    }
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Code "),
    );
    f.render_widget(widget, area);
}

fn render_log<S: KeyValueStore>(game: &PaperForkerGame<S>, f: &mut Frame, area: Rect) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let start = game.log.len().saturating_sub(visible_height);

    let log_lines: Vec<Line> = game.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(log_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Log "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_help<S: KeyValueStore>(
    game: &PaperForkerGame<S>,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let (text, style) = if game.confirm_reset {
        (
            "[X] Wipe save    [N] Keep playing",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        ("[X] Reset save", Style::default().fg(Color::DarkGray))
    };
    let help = Paragraph::new(Line::from(Span::styled(text, style)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center);
    f.render_widget(help, area);

    let mut cs = click_state.borrow_mut();
    if game.confirm_reset {
        let half = area.width / 2;
        cs.add_click_target(Rect::new(area.x, area.y, half, area.height), RESET_GAME);
        cs.add_click_target(
            Rect::new(area.x + half, area.y, area.width - half, area.height),
            CANCEL_RESET,
        );
    } else {
        cs.add_click_target(area, RESET_GAME);
    }
}
