//! Combat turn resolution.
//!
//! One call resolves one player action followed, when the monster survives,
//! by its retaliation. A potion or upgrade stone used from an empty slot is
//! turned away before anything happens, so it never hands the monster a free
//! attack.

use super::error::Rejection;
use super::progression::apply_experience;
use super::state::{CombatAction, ItemKind, Mode, MonsterRank, Session};

pub const POTION_HEAL: u32 = 40;

pub fn resolve_turn(session: &mut Session, action: CombatAction) -> Result<(), Rejection> {
    if session.mode != Mode::InCombat || session.monster.is_none() {
        return Err(Rejection::WrongMode { command: "전투 행동", mode: session.mode });
    }

    let required = match action {
        CombatAction::UsePotion => Some(ItemKind::Potion),
        CombatAction::UseUpgradeStone => Some(ItemKind::UpgradeStone),
        CombatAction::Attack | CombatAction::Defend => None,
    };
    if let Some(kind) = required {
        if session.player.inventory.count(kind) == 0 {
            return Err(Rejection::MissingItem(kind));
        }
    }

    session.defending = false;
    match action {
        CombatAction::Attack => player_attack(session),
        CombatAction::Defend => {
            session.defending = true;
            session.add_log("방어 자세를 취했다! 다음 공격의 피해가 절반이 된다.");
        }
        CombatAction::UsePotion => drink_potion(session),
        CombatAction::UseUpgradeStone => use_upgrade_stone(session),
    }

    let monster_down = session.monster.as_ref().map(|m| m.hp == 0).unwrap_or(false);
    if monster_down {
        finish_encounter(session);
        return Ok(());
    }

    monster_attack(session);
    if !session.player.is_alive() {
        session.mode = Mode::Defeated;
        session.monster = None;
        log::info!("player defeated in room {}", session.room);
        session.add_log(format!("{}은(는) 쓰러졌다... 게임 오버.", session.player.name));
    }
    Ok(())
}

fn player_attack(session: &mut Session) {
    let attack = session.player.effective_attack();
    let Some(monster) = session.monster.as_mut() else {
        return;
    };
    let damage = attack.saturating_sub(monster.defense);
    monster.hp = monster.hp.saturating_sub(damage);
    let name = monster.name;
    log::debug!("player hits {} for {}", name, damage);
    session.add_log(format!("{}에게 {}의 피해를 입혔다!", name, damage));
}

fn drink_potion(session: &mut Session) {
    let player = &mut session.player;
    if !player.inventory.take(ItemKind::Potion) {
        return;
    }
    let heal = POTION_HEAL.min(player.max_hp - player.hp);
    player.hp += heal;
    let left = player.inventory.count(ItemKind::Potion);
    session.add_log(format!("포션을 마셨다. HP {} 회복! (남은 포션 {})", heal, left));
}

fn use_upgrade_stone(session: &mut Session) {
    let player = &mut session.player;
    if !player.inventory.take(ItemKind::UpgradeStone) {
        return;
    }
    match player.weapon.next() {
        Some(next) => {
            let old = player.weapon;
            player.weapon = next;
            session.add_log(format!(
                "강화석 사용! {} → {} (공격력 +{})",
                old.name(),
                next.name(),
                next.bonus() - old.bonus()
            ));
        }
        None => {
            session.add_log("무기를 더 이상 강화할 수 없다. 강화석이 부서졌다.");
        }
    }
}

fn monster_attack(session: &mut Session) {
    let Some(monster) = session.monster.as_ref() else {
        return;
    };
    let mut damage = monster.attack.saturating_sub(session.player.defense);
    if session.defending {
        damage /= 2;
    }
    let name = monster.name;
    session.player.hp = session.player.hp.saturating_sub(damage);
    log::debug!("{} hits player for {} (defending: {})", name, damage, session.defending);
    session.add_log(format!("{}의 공격! {}의 피해를 받았다.", name, damage));
}

fn finish_encounter(session: &mut Session) {
    let Some(monster) = session.monster.take() else {
        return;
    };

    if monster.rank == MonsterRank::FinalBoss {
        session.mode = Mode::Victorious;
        session.stats.bosses_defeated += 1;
        log::info!("final boss defeated in room {}", session.room);
        session.add_log(format!("{}을(를) 쓰러뜨렸다! 던전을 정복했다!", monster.name));
        return;
    }

    session.player.gold += monster.gold;
    session.stats.gold_earned += monster.gold;
    session.stats.monsters_defeated += 1;
    if monster.rank == MonsterRank::Boss {
        session.stats.bosses_defeated += 1;
    }
    session.add_log(format!(
        "{}을(를) 쓰러뜨렸다! 경험치 +{}, 골드 +{}",
        monster.name, monster.exp, monster.gold
    ));
    for line in apply_experience(&mut session.player, monster.exp) {
        session.add_log(line);
    }

    session.mode = Mode::Exploring;
    session.clear_room();
}
