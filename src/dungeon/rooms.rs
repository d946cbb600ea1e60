//! Room advancement and event resolution.

use rand::Rng;

use super::error::Rejection;
use super::monster::{is_boss_room, spawn};
use super::shop::open_shop;
use super::state::{ItemKind, Mode, Monster, Session};

pub const TRAP_DAMAGE_MIN: u32 = 10;
pub const TRAP_DAMAGE_MAX: u32 = 25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoomEvent {
    Monster,
    Item,
    Shop,
    Trap,
    Nothing,
}

/// Event weights out of 100: monster 45, item 15, shop 15, trap 15, nothing 10.
pub fn event_for_roll(roll: u32) -> RoomEvent {
    match roll {
        0..=44 => RoomEvent::Monster,
        45..=59 => RoomEvent::Item,
        60..=74 => RoomEvent::Shop,
        75..=89 => RoomEvent::Trap,
        _ => RoomEvent::Nothing,
    }
}

pub fn roll_event<R: Rng>(rng: &mut R) -> RoomEvent {
    event_for_roll(rng.gen_range(0..100))
}

/// Potions are twice as likely as upgrade stones.
pub fn roll_item<R: Rng>(rng: &mut R) -> ItemKind {
    if rng.gen_range(0..3) < 2 {
        ItemKind::Potion
    } else {
        ItemKind::UpgradeStone
    }
}

pub fn advance_room(session: &mut Session) -> Result<(), Rejection> {
    if session.mode != Mode::Exploring {
        return Err(Rejection::WrongMode { command: "방 이동", mode: session.mode });
    }
    if session.shop.is_some() {
        return Err(Rejection::ShopPending);
    }

    session.log.clear();
    session.encounter_hp = None;

    let room = session.room;
    if is_boss_room(room) {
        let boss = spawn(session.player.level, room, true, &mut session.rng);
        session.add_log(format!("{}번 방. 강력한 기운이 느껴진다...", room));
        enter_combat(session, boss);
        return Ok(());
    }

    let event = roll_event(&mut session.rng);
    log::debug!("room {} event: {:?}", room, event);
    match event {
        RoomEvent::Monster => {
            let monster = spawn(session.player.level, room, false, &mut session.rng);
            session.add_log(format!("{}번 방.", room));
            enter_combat(session, monster);
        }
        RoomEvent::Item => {
            let item = roll_item(&mut session.rng);
            session.player.inventory.add(item, 1);
            session.stats.items_found += 1;
            session.add_log(format!("{}번 방. {}을(를) 발견했다!", room, item.name()));
            session.clear_room();
        }
        RoomEvent::Shop => {
            session.add_log(format!("{}번 방. 떠돌이 상인을 만났다.", room));
            open_shop(session);
        }
        RoomEvent::Trap => spring_trap(session),
        RoomEvent::Nothing => {
            session.add_log(format!("{}번 방. 아무것도 없다. 조용히 지나갔다.", room));
            session.clear_room();
        }
    }
    Ok(())
}

fn enter_combat(session: &mut Session, monster: Monster) {
    log::info!("encounter in room {}: {} ({:?})", session.room, monster.name, monster.rank);
    let intro = if monster.rank.is_boss() {
        format!("보스 {}이(가) 나타났다! (HP {})", monster.name, monster.hp)
    } else {
        format!("{}이(가) 나타났다! (HP {})", monster.name, monster.hp)
    };
    session.encounter_hp = Some(monster.hp);
    session.monster = Some(monster);
    session.defending = false;
    session.mode = Mode::InCombat;
    session.add_log(intro);
}

fn spring_trap(session: &mut Session) {
    let room = session.room;
    let damage = session.rng.gen_range(TRAP_DAMAGE_MIN..=TRAP_DAMAGE_MAX);
    session.player.hp = session.player.hp.saturating_sub(damage);
    session.stats.traps_triggered += 1;
    if !session.player.is_alive() {
        session.mode = Mode::Defeated;
        log::info!("player killed by a trap in room {}", room);
        session.add_log(format!("{}번 방. 함정! {}의 피해를 받고 쓰러졌다... 게임 오버.", room, damage));
        return;
    }
    session.add_log(format!("{}번 방. 함정이다! {}의 피해를 받았다.", room, damage));
    session.clear_room();
}
