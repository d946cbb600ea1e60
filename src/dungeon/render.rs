//! Dungeon Crawl rendering: single screen per mode.
//!
//! Layout: status bar + room/combat panel with numbered choices + recent log.
//! Character creation and the end screens replace the whole area.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::*;
use super::commands::{choices, MAX_NAME_LEN};
use super::progression::experience_threshold;
use super::state::{Mode, MonsterRank, Session, FINAL_ROOM};
use super::DungeonGame;

pub fn render(
    game: &DungeonGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let session = game.session();
    match session.mode() {
        Mode::CharacterCreation => render_creation(game, f, area, click_state),
        Mode::Exploring | Mode::InCombat => render_main(game, f, area, click_state),
        Mode::Defeated | Mode::Victorious => render_game_over(session, f, area, click_state),
    }
}

// ── Helpers ─────────────────────────────────────────────────

fn hp_bar(current: u32, max: u32, width: usize) -> (String, Color) {
    let ratio = if max > 0 { (current as f64 / max as f64).min(1.0) } else { 0.0 };
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    let bar = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(empty);
    let color = if ratio > 0.5 { Color::Green } else if ratio > 0.25 { Color::Yellow } else { Color::Red };
    (bar, color)
}

fn borders_for(area_width: u16) -> Borders {
    if is_narrow_layout(area_width) { Borders::TOP | Borders::BOTTOM } else { Borders::ALL }
}

fn separator() -> Line<'static> {
    Line::from(Span::styled(
        " \u{2500}".to_string() + &"\u{2500}".repeat(14),
        Style::default().fg(Color::DarkGray),
    ))
}

fn push_choice(cl: &mut ClickableList, index: usize, label: &str) {
    cl.push_clickable(
        Line::from(vec![
            Span::styled(
                format!(" [{}] ", index + 1),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(label.to_string(), Style::default().fg(Color::White)),
        ]),
        CHOICE_BASE + index as u16,
    );
}

/// Still clickable: the rejection message explains why it failed.
fn push_choice_dim(cl: &mut ClickableList, index: usize, label: &str) {
    cl.push_clickable(
        Line::from(vec![
            Span::styled(
                format!(" [{}] ", index + 1),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
            ),
            Span::styled(label.to_string(), Style::default().fg(Color::DarkGray)),
        ]),
        CHOICE_BASE + index as u16,
    );
}

fn push_choices(cl: &mut ClickableList, session: &Session) {
    for (i, choice) in choices(session).iter().enumerate() {
        if choice.available {
            push_choice(cl, i, &choice.label);
        } else {
            push_choice_dim(cl, i, &choice.label);
        }
    }
}

// ── Character Creation ──────────────────────────────────────

fn render_creation(
    game: &DungeonGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let borders = borders_for(area.width);
    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        format!(" {}개의 방 끝에 마왕이 기다린다.", FINAL_ROOM),
        Style::default().fg(Color::White),
    )));
    cl.push(Line::from(Span::styled(
        " 모험가의 이름을 정하라.",
        Style::default().fg(Color::White),
    )));
    cl.push(Line::from(""));
    cl.push(Line::from(vec![
        Span::styled(" 이름: ", Style::default().fg(Color::Gray)),
        Span::styled(
            game.name_input().to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled("_", Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK)),
    ]));
    cl.push(Line::from(Span::styled(
        format!(" (최대 {}자, Backspace로 지우기)", MAX_NAME_LEN),
        Style::default().fg(Color::DarkGray),
    )));
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(vec![
            Span::styled(
                " [Enter] ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled("모험 시작", Style::default().fg(Color::White)),
        ]),
        SUBMIT_NAME,
    );

    // Rejections (blank name) show up here.
    if let Some(msg) = game.session().log().last() {
        cl.push(Line::from(""));
        cl.push(Line::from(Span::styled(format!(" > {}", msg), Style::default().fg(Color::Red))));
    }

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Dungeon Crawl ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(area, &block, &mut cs, 0);
    drop(cs);
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

// ── Main Screen (Exploring + Combat) ────────────────────────

fn render_main(
    game: &DungeonGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let session = game.session();
    let borders = borders_for(area.width);
    let is_narrow = is_narrow_layout(area.width);
    let log_h = game.log_lines() as u16 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(log_h),
        ])
        .split(area);

    render_status_bar(session, f, chunks[0], borders, is_narrow);
    match session.mode() {
        Mode::InCombat => render_combat(session, f, chunks[1], borders, click_state),
        _ => render_room(session, f, chunks[1], borders, click_state),
    }
    render_log(session, game.log_lines(), f, chunks[2], borders);
}

fn render_status_bar(
    session: &Session,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    is_narrow: bool,
) {
    let player = session.player();
    let hp_w = if is_narrow { 8 } else { 14 };
    let (bar, hp_color) = hp_bar(player.hp, player.max_hp, hp_w);

    let top = Line::from(vec![
        Span::styled(
            format!(" Lv.{}", player.level),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" HP", Style::default().fg(Color::Gray)),
        Span::styled(bar, Style::default().fg(hp_color)),
        Span::styled(format!("{}/{}", player.hp, player.max_hp), Style::default().fg(Color::White)),
        Span::styled(
            format!(" EXP {}/{}", player.exp, experience_threshold(player.level)),
            Style::default().fg(Color::Gray),
        ),
    ]);
    let bottom = Line::from(vec![
        Span::styled(
            format!(" 방 {}/{}", session.room(), FINAL_ROOM),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!(" {}G", player.gold), Style::default().fg(Color::Yellow)),
        Span::styled(
            format!(" {} (공격 {})", player.weapon.name(), player.effective_attack()),
            Style::default().fg(Color::White),
        ),
        Span::styled(format!(" 방어 {}", player.defense), Style::default().fg(Color::White)),
    ]);

    let title = if is_narrow { format!(" {} ", player.name) } else { format!(" {}의 모험 ", player.name) };
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(title, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)));
    f.render_widget(Paragraph::new(vec![top, bottom]).block(block), area);
}

fn render_room(
    session: &Session,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();

    if let Some(offer) = session.shop() {
        cl.push(Line::from(Span::styled(
            " \u{300a}떠돌이 상인\u{300b}",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        cl.push(Line::from(Span::styled(
            format!(" 한 번만 거래할 수 있다. 보유 {}G, 물건 {}종", session.player().gold, offer.items.len()),
            Style::default().fg(Color::White),
        )));
    } else if session.is_boss_room_next() {
        cl.push(Line::from(Span::styled(
            format!(" \u{2605} {}번 방 너머로 강한 기운이 느껴진다", session.room()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    } else {
        cl.push(Line::from(Span::styled(
            format!(" {}번 방 앞에 섰다.", session.room()),
            Style::default().fg(Color::White),
        )));
    }

    cl.push(Line::from(""));
    cl.push(separator());
    cl.push(Line::from(""));
    push_choices(&mut cl, session);

    let block = Block::default().borders(borders).border_style(Style::default().fg(Color::DarkGray));
    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(area, &block, &mut cs, 0);
    drop(cs);
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_combat(
    session: &Session,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let Some(monster) = session.monster() else { return };
    let is_narrow = is_narrow_layout(area.width);

    let mut cl = ClickableList::new();

    let badge = match monster.rank {
        MonsterRank::Normal => "",
        MonsterRank::Boss => " \u{2605}BOSS\u{2605}",
        MonsterRank::FinalBoss => " \u{2605}\u{2605}FINAL\u{2605}\u{2605}",
    };
    cl.push(Line::from(Span::styled(
        format!(" \u{300a}전투\u{300b} {}{}", monster.name, badge),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));

    let max_hp = session.encounter_hp().unwrap_or(monster.hp);
    let bar_w = if is_narrow { 10 } else { 16 };
    let (bar, color) = hp_bar(monster.hp, max_hp, bar_w);
    cl.push(Line::from(vec![
        Span::styled(" HP ", Style::default().fg(Color::Gray)),
        Span::styled(bar, Style::default().fg(color)),
        Span::styled(format!(" {}/{}", monster.hp, max_hp), Style::default().fg(Color::White)),
    ]));
    cl.push(Line::from(Span::styled(
        format!(" 공격 {}  방어 {}", monster.attack, monster.defense),
        Style::default().fg(Color::Gray),
    )));
    if session.is_defending() {
        cl.push(Line::from(Span::styled(
            " \u{25c6} 방어 태세",
            Style::default().fg(Color::Blue),
        )));
    }

    cl.push(Line::from(""));
    cl.push(separator());
    cl.push(Line::from(""));
    push_choices(&mut cl, session);

    let block = Block::default().borders(borders).border_style(Style::default().fg(Color::Red));
    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(area, &block, &mut cs, 0);
    drop(cs);
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_log(session: &Session, max_lines: usize, f: &mut Frame, area: Rect, borders: Borders) {
    let lines: Vec<Line> = session
        .recent_log(max_lines)
        .iter()
        .map(|msg| Line::from(Span::styled(format!(" > {}", msg), Style::default().fg(Color::Gray))))
        .collect();
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(" 기록 ", Style::default().fg(Color::DarkGray)));
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

// ── Game Over ───────────────────────────────────────────────

fn render_game_over(
    session: &Session,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let borders = borders_for(area.width);
    let won = session.mode() == Mode::Victorious;
    let player = session.player();
    let stats = session.stats();
    let (title, color) = if won {
        (" \u{2605} DUNGEON CLEAR \u{2605} ", Color::Yellow)
    } else {
        (" GAME OVER ", Color::Red)
    };

    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    let headline = if won {
        format!(" {}이(가) 마왕을 쓰러뜨렸다!", player.name)
    } else {
        format!(" {}은(는) {}번 방에서 쓰러졌다...", player.name, session.room())
    };
    cl.push(Line::from(Span::styled(
        headline,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(""));

    let rows = [
        ("레벨", player.level.to_string()),
        ("무기", player.weapon.name().to_string()),
        ("통과한 방", stats.rooms_cleared.to_string()),
        ("쓰러뜨린 몬스터", stats.monsters_defeated.to_string()),
        ("쓰러뜨린 보스", stats.bosses_defeated.to_string()),
        ("획득한 골드", format!("{}G", stats.gold_earned)),
        ("발견한 아이템", stats.items_found.to_string()),
        ("밟은 함정", stats.traps_triggered.to_string()),
    ];
    for (label, value) in rows {
        cl.push(Line::from(vec![
            Span::styled(format!(" {:<10}", label), Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().fg(Color::White)),
        ]));
    }

    // Last lines of the final room.
    cl.push(Line::from(""));
    for msg in session.recent_log(3) {
        cl.push(Line::from(Span::styled(
            format!(" > {}", msg),
            Style::default().fg(Color::DarkGray),
        )));
    }

    cl.push(Line::from(""));
    push_choices(&mut cl, session);

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(color))
        .title(Span::styled(title, Style::default().fg(color).add_modifier(Modifier::BOLD)));
    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(area, &block, &mut cs, 0);
    drop(cs);
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
