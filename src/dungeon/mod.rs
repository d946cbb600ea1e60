//! Dungeon Crawl: a 250-room text dungeon with turn-based combat, a
//! wandering merchant and weapon upgrades.
//!
//! All choices use [1]-[9]; on the end screens [N] starts a new run.

pub mod actions;
pub mod combat;
pub mod commands;
pub mod error;
pub mod monster;
pub mod progression;
pub mod render;
pub mod rooms;
pub mod shop;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

use actions::*;
use commands::{choices, Command, MAX_NAME_LEN};
use state::{Mode, Session};

pub struct DungeonGame {
    session: Session,
    /// Name typed on the character creation screen.
    name_input: String,
    log_lines: usize,
}

impl DungeonGame {
    pub fn new(seed: u64, log_lines: usize) -> Self {
        log::info!("dungeon seeded with {}", seed);
        Self {
            session: Session::with_seed(seed),
            name_input: String::new(),
            log_lines,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    /// Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        if self.session.mode() == Mode::CharacterCreation {
            return self.handle_name_entry(event);
        }
        match event {
            InputEvent::Key(ch) => self.handle_key(*ch),
            InputEvent::Click(id) => self.handle_click(*id),
            InputEvent::Backspace | InputEvent::Enter => false,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }

    pub(crate) fn log_lines(&self) -> usize {
        self.log_lines
    }

    // ── Character Creation ──────────────────────────────────────

    fn handle_name_entry(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(ch) if !ch.is_control() => {
                if self.name_input.chars().count() >= MAX_NAME_LEN {
                    return false;
                }
                self.name_input.push(*ch);
                true
            }
            InputEvent::Backspace => self.name_input.pop().is_some(),
            InputEvent::Enter => self.submit_name(),
            InputEvent::Click(SUBMIT_NAME) => self.submit_name(),
            _ => false,
        }
    }

    fn submit_name(&mut self) -> bool {
        let name = self.name_input.clone();
        if self.session.dispatch(Command::CreateCharacter(name)).is_ok() {
            self.name_input.clear();
        }
        true
    }

    // ── Choices ────────────────────────────────────────────────

    fn handle_key(&mut self, ch: char) -> bool {
        if let Some(digit) = ch.to_digit(10) {
            if (1..=u32::from(MAX_CHOICES)).contains(&digit) {
                return self.execute_choice(digit as usize - 1);
            }
        }
        match ch {
            'n' | 'N' if self.session.is_over() => {
                self.run(Command::NewGame);
                true
            }
            _ => false,
        }
    }

    fn handle_click(&mut self, id: u16) -> bool {
        if (CHOICE_BASE..CHOICE_BASE + MAX_CHOICES).contains(&id) {
            return self.execute_choice((id - CHOICE_BASE) as usize);
        }
        false
    }

    fn execute_choice(&mut self, index: usize) -> bool {
        let Some(choice) = choices(&self.session).into_iter().nth(index) else {
            return false;
        };
        self.run(choice.command);
        true
    }

    /// Rejections are already in the session log; nothing else to do here.
    fn run(&mut self, command: Command) {
        let _ = self.session.dispatch(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::state::ItemKind;

    fn typed(game: &mut DungeonGame, text: &str) {
        for ch in text.chars() {
            game.handle_input(&InputEvent::Key(ch));
        }
    }

    fn created(seed: u64) -> DungeonGame {
        let mut game = DungeonGame::new(seed, 8);
        typed(&mut game, "용사");
        game.handle_input(&InputEvent::Enter);
        game
    }

    #[test]
    fn name_entry_types_and_submits() {
        let mut game = DungeonGame::new(1, 8);
        typed(&mut game, "abcx");
        assert!(game.handle_input(&InputEvent::Backspace));
        assert_eq!(game.name_input(), "abc");
        game.handle_input(&InputEvent::Enter);
        assert_eq!(game.session().mode(), Mode::Exploring);
        assert_eq!(game.session().player().name, "abc");
        assert!(game.name_input().is_empty());
    }

    #[test]
    fn digits_are_typed_during_name_entry() {
        let mut game = DungeonGame::new(1, 8);
        typed(&mut game, "1");
        assert_eq!(game.name_input(), "1");
        assert_eq!(game.session().mode(), Mode::CharacterCreation);
    }

    #[test]
    fn name_input_capped() {
        let mut game = DungeonGame::new(1, 8);
        typed(&mut game, "abcdefghijklmnop");
        assert_eq!(game.name_input().chars().count(), MAX_NAME_LEN);
        assert!(!game.handle_input(&InputEvent::Key('z')));
    }

    #[test]
    fn blank_name_keeps_creation_screen() {
        let mut game = DungeonGame::new(1, 8);
        typed(&mut game, "  ");
        game.handle_input(&InputEvent::Click(SUBMIT_NAME));
        assert_eq!(game.session().mode(), Mode::CharacterCreation);
        assert_eq!(game.session().log().len(), 1);
    }

    #[test]
    fn key_one_advances_room() {
        let mut game = created(3);
        assert!(game.handle_input(&InputEvent::Key('1')));
        let s = game.session();
        let moved_on = s.room() > 1 || s.mode() == Mode::InCombat || s.is_shop_open();
        assert!(moved_on);
    }

    #[test]
    fn click_choice_matches_key() {
        let mut by_key = created(9);
        let mut by_click = created(9);
        by_key.handle_input(&InputEvent::Key('1'));
        by_click.handle_input(&InputEvent::Click(CHOICE_BASE));
        assert_eq!(by_key.session().room(), by_click.session().room());
        assert_eq!(by_key.session().mode(), by_click.session().mode());
        assert_eq!(by_key.session().log(), by_click.session().log());
    }

    #[test]
    fn out_of_range_choice_ignored() {
        let mut game = created(1);
        assert!(!game.handle_input(&InputEvent::Key('5')));
        assert!(!game.handle_input(&InputEvent::Click(CHOICE_BASE + 4)));
        assert!(!game.handle_input(&InputEvent::Key('0')));
        assert_eq!(game.session().room(), 1);
    }

    #[test]
    fn combat_choices_map_to_actions() {
        let mut game = created(1);
        game.session.mode = Mode::InCombat;
        game.session.monster = Some(crate::dungeon::monster::spawn(1, 1, false, &mut game.session.rng));
        game.session.monster.as_mut().unwrap().hp = 10_000;
        // [3] drinks the starting potion
        game.handle_input(&InputEvent::Key('3'));
        assert_eq!(game.session().player().inventory.count(ItemKind::Potion), 0);
        // [4] with no stone is rejected and changes nothing
        let hp = game.session().player().hp;
        assert!(game.handle_input(&InputEvent::Key('4')));
        assert_eq!(game.session().player().hp, hp);
        assert_eq!(game.session().mode(), Mode::InCombat);
    }

    #[test]
    fn new_game_key_only_on_end_screen() {
        let mut game = created(1);
        assert!(!game.handle_input(&InputEvent::Key('n')));
        game.session.mode = Mode::Defeated;
        assert!(game.handle_input(&InputEvent::Key('N')));
        assert_eq!(game.session().mode(), Mode::CharacterCreation);
    }
}
