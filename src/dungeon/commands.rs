//! Command dispatch: the single way the presentation layer changes a
//! [`Session`].
//!
//! Each command maps to one handler. A successful command returns the log
//! lines it produced; a rejected one leaves the session untouched apart from
//! a diagnostic line in the log.

use super::combat::resolve_turn;
use super::error::Rejection;
use super::rooms::advance_room;
use super::shop::{leave_shop, purchase};
use super::state::{
    shop_item_info, CombatAction, ItemKind, Mode, Player, Session, ShopItem,
};

pub const MAX_NAME_LEN: usize = 12;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    CreateCharacter(String),
    AdvanceRoom,
    Combat(CombatAction),
    Purchase(ShopItem),
    LeaveShop,
    NewGame,
}

impl Session {
    pub fn dispatch(&mut self, command: Command) -> Result<Vec<String>, Rejection> {
        self.emitted.clear();
        let result = match &command {
            Command::CreateCharacter(name) => create_character(self, name),
            Command::AdvanceRoom => advance_room(self),
            Command::Combat(action) => resolve_turn(self, *action),
            Command::Purchase(item) => purchase(self, *item),
            Command::LeaveShop => leave_shop(self),
            Command::NewGame => {
                start_new_game(self);
                Ok(())
            }
        };

        match result {
            Ok(()) => Ok(std::mem::take(&mut self.emitted)),
            Err(rejection) => {
                log::warn!("rejected {:?}: {}", command, rejection);
                self.add_log(rejection.to_string());
                self.emitted.clear();
                Err(rejection)
            }
        }
    }
}

pub fn create_character(session: &mut Session, name: &str) -> Result<(), Rejection> {
    if session.mode != Mode::CharacterCreation {
        return Err(Rejection::WrongMode { command: "캐릭터 생성", mode: session.mode });
    }
    let name = name.trim();
    if name.is_empty() {
        return Err(Rejection::EmptyName);
    }
    let name: String = name.chars().take(MAX_NAME_LEN).collect();

    session.player = Player::new(&name);
    session.room = 1;
    session.mode = Mode::Exploring;
    session.log.clear();
    log::info!("character created: {}", name);
    session.add_log(format!("{}의 모험이 시작된다. 던전 입구에 섰다.", name));
    Ok(())
}

pub fn start_new_game(session: &mut Session) {
    log::info!("new game");
    session.reset();
}

// ── Choices ──────────────────────────────────────────────────

/// One numbered option shown to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub command: Command,
    /// Dim the option when it is known to be rejected (not enough gold, empty slot).
    pub available: bool,
}

impl Choice {
    fn new(label: impl Into<String>, command: Command, available: bool) -> Self {
        Self { label: label.into(), command, available }
    }
}

/// The numbered options for the current mode. Character creation has none;
/// the name is typed instead.
pub fn choices(session: &Session) -> Vec<Choice> {
    let player = &session.player;
    match session.mode {
        Mode::CharacterCreation => Vec::new(),
        Mode::Exploring => match &session.shop {
            Some(offer) => {
                let mut list: Vec<Choice> = offer
                    .items
                    .iter()
                    .map(|&item| {
                        let info = shop_item_info(item);
                        Choice::new(
                            format!("{} ({}) {}G", info.name, info.description, info.cost),
                            Command::Purchase(item),
                            player.gold >= info.cost,
                        )
                    })
                    .collect();
                list.push(Choice::new("상점 떠나기", Command::LeaveShop, true));
                list
            }
            None => vec![Choice::new(
                format!("{}번 방으로 들어간다", session.room),
                Command::AdvanceRoom,
                true,
            )],
        },
        Mode::InCombat => {
            let potions = player.inventory.count(ItemKind::Potion);
            let stones = player.inventory.count(ItemKind::UpgradeStone);
            vec![
                Choice::new("공격", Command::Combat(CombatAction::Attack), true),
                Choice::new("방어", Command::Combat(CombatAction::Defend), true),
                Choice::new(
                    format!("포션 사용 (x{})", potions),
                    Command::Combat(CombatAction::UsePotion),
                    potions > 0,
                ),
                Choice::new(
                    format!("강화석 사용 (x{})", stones),
                    Command::Combat(CombatAction::UseUpgradeStone),
                    stones > 0,
                ),
            ]
        }
        Mode::Defeated | Mode::Victorious => {
            vec![Choice::new("새 게임", Command::NewGame, true)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::state::{Monster, MonsterRank, RunStats};

    fn started(seed: u64) -> Session {
        let mut s = Session::with_seed(seed);
        s.dispatch(Command::CreateCharacter("용사".into())).unwrap();
        s
    }

    #[test]
    fn create_character_trims_and_starts() {
        let mut s = Session::with_seed(1);
        let lines = s.dispatch(Command::CreateCharacter("  모험가  ".into())).unwrap();
        assert_eq!(s.player().name, "모험가");
        assert_eq!(s.mode(), Mode::Exploring);
        assert_eq!(s.room(), 1);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn blank_name_rejected() {
        let mut s = Session::with_seed(1);
        let err = s.dispatch(Command::CreateCharacter("   ".into())).unwrap_err();
        assert_eq!(err, Rejection::EmptyName);
        assert_eq!(s.mode(), Mode::CharacterCreation);
        assert_eq!(s.log().len(), 1);
    }

    #[test]
    fn long_name_truncated() {
        let mut s = Session::with_seed(1);
        s.dispatch(Command::CreateCharacter("가나다라마바사아자차카타파하".into())).unwrap();
        assert_eq!(s.player().name.chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn create_twice_rejected() {
        let mut s = started(1);
        let err = s.dispatch(Command::CreateCharacter("둘째".into())).unwrap_err();
        assert!(matches!(err, Rejection::WrongMode { .. }));
        assert_eq!(s.player().name, "용사");
    }

    #[test]
    fn advance_before_creation_rejected() {
        let mut s = Session::with_seed(1);
        assert!(s.dispatch(Command::AdvanceRoom).is_err());
        assert_eq!(s.room(), 1);
    }

    #[test]
    fn rejection_is_logged_but_not_returned_as_lines() {
        let mut s = started(1);
        s.mode = Mode::InCombat;
        s.monster = Some(Monster {
            name: "허수아비",
            hp: 10,
            attack: 1,
            defense: 0,
            exp: 1,
            gold: 1,
            rank: MonsterRank::Normal,
        });
        s.player.inventory = Default::default();
        let log_len = s.log().len();
        let err = s.dispatch(Command::Combat(CombatAction::UsePotion)).unwrap_err();
        assert_eq!(err, Rejection::MissingItem(ItemKind::Potion));
        assert_eq!(s.log().len(), log_len + 1);
        assert_eq!(s.monster().unwrap().hp, 10);
    }

    #[test]
    fn dispatch_returns_lines_of_this_command_only() {
        let mut s = started(4);
        let lines = s.dispatch(Command::AdvanceRoom).unwrap();
        assert!(!lines.is_empty());
        assert_eq!(lines.as_slice(), s.log());
    }

    #[test]
    fn new_game_resets() {
        let mut s = started(1);
        s.room = 30;
        s.mode = Mode::Defeated;
        s.stats.monsters_defeated = 4;
        s.dispatch(Command::NewGame).unwrap();
        assert_eq!(s.mode(), Mode::CharacterCreation);
        assert_eq!(s.room(), 1);
        assert_eq!(s.stats(), &RunStats::default());
        assert!(s.player().name.is_empty());
    }

    #[test]
    fn choices_per_mode() {
        let mut s = Session::with_seed(1);
        assert!(choices(&s).is_empty());

        s.dispatch(Command::CreateCharacter("용사".into())).unwrap();
        let c = choices(&s);
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].command, Command::AdvanceRoom);

        s.shop = Some(crate::dungeon::state::ShopOffer::standard());
        let c = choices(&s);
        assert_eq!(c.len(), 4);
        assert!(c.iter().take(3).all(|choice| !choice.available)); // 0 gold
        assert_eq!(c[3].command, Command::LeaveShop);

        s.shop = None;
        s.mode = Mode::InCombat;
        let c = choices(&s);
        assert_eq!(c.len(), 4);
        assert!(c[2].available); // one starting potion
        assert!(!c[3].available);

        s.mode = Mode::Victorious;
        assert_eq!(choices(&s)[0].command, Command::NewGame);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let run = |seed| {
            let mut s = started(seed);
            let mut trace = Vec::new();
            for _ in 0..40 {
                let command = match s.mode() {
                    Mode::Exploring if s.is_shop_open() => Command::LeaveShop,
                    Mode::Exploring => Command::AdvanceRoom,
                    Mode::InCombat => Command::Combat(CombatAction::Attack),
                    _ => break,
                };
                let _ = s.dispatch(command);
                trace.push((s.room(), s.player().hp, s.mode()));
            }
            trace
        };
        assert_eq!(run(77), run(77));
    }

    #[test]
    fn room_never_changes_during_combat_or_shop() {
        let mut s = started(21);
        s.player.hp = 1_000_000;
        s.player.max_hp = 1_000_000;
        for _ in 0..300 {
            let room = s.room();
            let (command, holds_room) = match s.mode() {
                Mode::Exploring if s.is_shop_open() => (Command::LeaveShop, true),
                Mode::Exploring => (Command::AdvanceRoom, false),
                Mode::InCombat => (Command::Combat(CombatAction::Defend), true),
                _ => break,
            };
            let _ = s.dispatch(command);
            if holds_room && s.mode() != Mode::Exploring {
                assert_eq!(s.room(), room);
            }
            assert!(s.room() <= room + 1);
        }
    }
}
