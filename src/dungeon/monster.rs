//! Monster stat blocks scaled to player level and room number.

use rand::Rng;

use super::state::{Monster, MonsterRank, BOSS_INTERVAL, FINAL_ROOM};

pub const FINAL_BOSS_NAME: &str = "마왕";
pub const BOSS_NAME: &str = "던전 수호자";

pub const MONSTER_NAMES: &[&str] = &[
    "슬라임", "고블린", "박쥐", "스켈레톤", "오크",
    "늑대", "거대 거미", "좀비", "트롤", "가고일",
];

/// Rooms that always hold a boss, whatever the event roll says.
pub fn is_boss_room(room: u32) -> bool {
    room == FINAL_ROOM || room % BOSS_INTERVAL == 0
}

/// Create the monster for an encounter.
///
/// Bosses are fixed formulas of the player level; `room == FINAL_ROOM`
/// selects the final boss. Normal monsters roll a level within ±3 of the
/// player and randomise every stat around it.
pub fn spawn<R: Rng>(player_level: u32, room: u32, is_boss: bool, rng: &mut R) -> Monster {
    let level = player_level;
    if is_boss && room == FINAL_ROOM {
        return Monster {
            name: FINAL_BOSS_NAME,
            hp: 500 + 25 * level,
            attack: 40 + 5 * level,
            defense: 15 + 2 * level,
            exp: 500,
            gold: 200,
            rank: MonsterRank::FinalBoss,
        };
    }
    if is_boss {
        return Monster {
            name: BOSS_NAME,
            hp: 250 + 15 * level,
            attack: 22 + 3 * level,
            defense: 8 + level,
            exp: 120 + 10 * level,
            gold: 60 + 5 * level,
            rank: MonsterRank::Boss,
        };
    }

    let offset: i64 = rng.gen_range(-3..=3);
    let monster_level = (i64::from(level) + offset).max(1) as u32;
    let name = MONSTER_NAMES[rng.gen_range(0..MONSTER_NAMES.len())];
    let monster = Monster {
        name,
        hp: rng.gen_range(25..=40) + 7 * monster_level,
        attack: rng.gen_range(7..=12) + 3 * monster_level,
        defense: rng.gen_range(2..=5) + monster_level,
        exp: rng.gen_range(20..=35) + 7 * monster_level,
        gold: rng.gen_range(8..=15) + 2 * monster_level,
        rank: MonsterRank::Normal,
    };
    log::debug!("spawned {} (Lv.{}) for player Lv.{}", monster.name, monster_level, level);
    monster
}
