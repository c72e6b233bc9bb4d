//! BMC Clicker rendering: stats, click image with particles, upgrade shop and log.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::*;
use super::logic::format_display;
use super::state::{GameState, UiState, UpgradeKind};

/// The coach, 5 lines tall.
const COACH_ART: &[&str] = &[
    r"   .-----.   ",
    r"  ( o   o )  ",
    r"  |  BMC  |  ",
    r"   \ --- /   ",
    r"   /|   |\   ",
];

/// Squashed frame shown while `click_flash` is active.
const COACH_PRESSED_ART: &[&str] = &[
    r"             ",
    r"  .-------.  ",
    r" ( >  BMC < )",
    r"  \  ===  /  ",
    r"  //|   |\\  ",
];

/// Compact art for narrow screens.
const COACH_SMALL_ART: &[&str] = &[r" (o o) ", r" [BMC] "];
const COACH_SMALL_PRESSED_ART: &[&str] = &[r" (> <) ", r"[=BMC=]"];

/// Spinner next to the passive rate while income is flowing.
const SPINNER: &[char] = &['◐', '◓', '◑', '◒'];

/// Spinner frame for the passive rate; blank when there is no income.
fn income_spinner(anim_frame: u32, points_per_second: f64) -> char {
    if points_per_second > 0.0 {
        SPINNER[(anim_frame / 3) as usize % SPINNER.len()]
    } else {
        ' '
    }
}

pub fn render(
    state: &GameState,
    ui: &UiState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let narrow = is_narrow_layout(area.width);

    // Log panel on the right when wide enough (>= 80 cols)
    let (main_area, log_area) = if area.width >= 80 {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (h_chunks[0], Some(h_chunks[1]))
    } else {
        (area, None)
    };

    let image_height: u16 = if narrow { 6 } else { 9 };
    let shop_height = state.upgrades.len() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),            // stats
            Constraint::Length(image_height), // click image
            Constraint::Length(shop_height),  // upgrades
            Constraint::Min(4),               // help / log
        ])
        .split(main_area);

    render_stats(state, ui, f, chunks[0]);
    render_click_image(state, ui, narrow, f, chunks[1], click_state);
    render_upgrades(state, ui, f, chunks[2], click_state);

    match log_area {
        Some(log_area) => {
            render_help(f, chunks[3], click_state);
            render_log(ui, f, log_area);
        }
        None => {
            // Narrow: help on top, log gets what's left.
            let bottom = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(4), Constraint::Min(0)])
                .split(chunks[3]);
            render_help(f, bottom[0], click_state);
            if bottom[1].height >= 3 {
                render_log(ui, f, bottom[1]);
            }
        }
    }

    if ui.confirm_reset {
        render_reset_confirm(f, area, click_state);
    }
}

fn render_stats(state: &GameState, ui: &UiState, f: &mut Frame, area: Rect) {
    let spinner = income_spinner(ui.anim_frame, state.points_per_second);
    let lines = vec![
        Line::from(vec![
            Span::styled(" Score: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_display(state.score.floor()),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   {} +{}/sec", spinner, format_display(state.points_per_second)),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!(" Click power: {}", format_display(state.click_power)),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!("   Clicks: {}", state.total_clicks),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" BMC Brainrot Clicker "),
    );
    f.render_widget(widget, area);
}

fn render_click_image(
    state: &GameState,
    ui: &UiState,
    narrow: bool,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let pressed = ui.click_flash > 0;
    let art = match (narrow, pressed) {
        (false, false) => COACH_ART,
        (false, true) => COACH_PRESSED_ART,
        (true, false) => COACH_SMALL_ART,
        (true, true) => COACH_SMALL_PRESSED_ART,
    };
    let art_color = if pressed { Color::White } else { Color::LightMagenta };

    let mut lines: Vec<Line> = art
        .iter()
        .map(|row| Line::from(Span::styled(*row, Style::default().fg(art_color))))
        .collect();
    let click_label = if state.click_power > 1.0 {
        format!("CLICK! +{}", format_display(state.click_power))
    } else {
        "CLICK!".to_string()
    };
    let label_style = if pressed {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(click_label, label_style)));

    let border_color = if pressed { Color::White } else { Color::Magenta };
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );
    f.render_widget(widget, area);

    render_particles(ui, f, area);

    // The whole image is the click target.
    click_state.borrow_mut().add_click_target(area, CLICK_IMAGE);
}

/// Floating "+N" texts rising from the bottom of the image.
fn render_particles(ui: &UiState, f: &mut Frame, area: Rect) {
    if area.height < 3 || area.width < 3 {
        return;
    }
    let inner_top = area.y + 1;
    let inner_bottom = area.y + area.height - 1; // exclusive
    let inner_left = area.x as i32 + 1;
    let inner_right = (area.x + area.width - 1) as i32; // exclusive
    let center_x = (area.x + area.width / 2) as i32;

    for p in &ui.particles {
        let progress = 1.0 - p.life as f32 / p.max_life.max(1) as f32;
        let span = inner_bottom - inner_top;
        let rise = (progress * span as f32) as u16;
        let y = inner_bottom.saturating_sub(1 + rise).max(inner_top);

        let text_len = p.text.chars().count() as i32;
        let x = (center_x + p.col_offset as i32 - text_len / 2)
            .clamp(inner_left, (inner_right - text_len).max(inner_left));
        let width = (text_len as u16).min((inner_right - x) as u16);
        if width == 0 {
            continue;
        }

        let style = if progress < 0.5 {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let widget = Paragraph::new(Span::styled(p.text.as_str(), style));
        f.render_widget(widget, Rect::new(x as u16, y, width, 1));
    }
}

fn render_upgrades(
    state: &GameState,
    ui: &UiState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();

    for (i, u) in state.upgrades.iter().enumerate() {
        let affordable = state.can_afford(&u.id);
        let flashing = matches!(ui.purchase_flash, Some((idx, _)) if idx == i);

        let key_style = if affordable {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut name_style = if affordable {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if flashing {
            name_style = name_style.add_modifier(Modifier::REVERSED);
        }
        let effect_color = match u.kind {
            UpgradeKind::ClickBonus => Color::Cyan,
            UpgradeKind::PassiveBonus => Color::Green,
            UpgradeKind::ClickMultiplier => Color::Magenta,
        };
        let price_style = if affordable {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Red)
        };

        let line = Line::from(vec![
            Span::styled(format!(" [{}] ", i + 1), key_style),
            Span::styled(u.name.as_str(), name_style),
            Span::styled(
                format!(" {}", u.description),
                Style::default().fg(if affordable { effect_color } else { Color::DarkGray }),
            ),
            Span::styled(format!(" x{}", u.owned), Style::default().fg(Color::Gray)),
            Span::styled(format!("  {}", format_display(u.current_price)), price_style),
        ]);
        cl.push_clickable(line, BUY_UPGRADE_BASE + i as u16);
    }

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1);
    }

    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Upgrades "),
    );
    f.render_widget(widget, area);
}

fn render_help(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let hint = Style::default().fg(Color::DarkGray);
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let mut cl = ClickableList::new();
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" [Space]", key),
            Span::styled(" / ", hint),
            Span::styled("[c]", key),
            Span::styled(" Click", hint),
        ]),
        CLICK_IMAGE,
    );
    cl.push_clickable(
        Line::from(vec![Span::styled(" [r]", key), Span::styled(" Reset progress", hint)]),
        RESET_REQUEST,
    );

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1);
    }

    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(widget, area);
}

fn render_log(ui: &UiState, f: &mut Frame, area: Rect) {
    let visible_height = area.height.saturating_sub(2) as usize;

    // Newest first
    let log_lines: Vec<Line> = ui
        .log
        .iter()
        .rev()
        .take(visible_height)
        .enumerate()
        .map(|(i, entry)| {
            let style = if entry.is_important {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if i == 0 {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
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

/// Modal asking to confirm the reset. Registered last so its targets win.
fn render_reset_confirm(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let width = area.width.min(36);
    let height = area.height.min(7);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        " Reset all progress?",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(Span::styled(
        " The save will be deleted.",
        Style::default().fg(Color::DarkGray),
    )));
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            " [y] Yes, reset",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        RESET_CONFIRM,
    );
    cl.push_clickable(
        Line::from(Span::styled(
            " [n] Cancel",
            Style::default().fg(Color::Green),
        )),
        RESET_CANCEL,
    );

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(popup, &mut cs, 1, 1);
    }

    f.render_widget(Clear, popup);
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Confirm "),
    );
    f.render_widget(widget, popup);
}
