//! Experience thresholds and level-up effects.

use super::state::Player;

pub const EXP_PER_LEVEL: u32 = 50;
pub const LEVEL_UP_MAX_HP: u32 = 20;
pub const LEVEL_UP_ATTACK: u32 = 4;
pub const LEVEL_UP_DEFENSE: u32 = 2;

/// Experience needed to leave `level`.
pub fn experience_threshold(level: u32) -> u32 {
    level * EXP_PER_LEVEL
}

/// Grant experience and apply every level-up it pays for.
///
/// Each level-up fully heals. Returns one log line per level gained.
pub fn apply_experience(player: &mut Player, gained: u32) -> Vec<String> {
    player.exp += gained;

    let mut lines = Vec::new();
    while player.exp >= experience_threshold(player.level) {
        player.exp -= experience_threshold(player.level);
        player.level += 1;
        player.max_hp += LEVEL_UP_MAX_HP;
        player.hp = player.max_hp;
        player.base_attack += LEVEL_UP_ATTACK;
        player.defense += LEVEL_UP_DEFENSE;
        log::info!("level up: {} -> Lv.{}", player.name, player.level);
        lines.push(format!(
            "레벨 업! Lv.{} (최대 HP +{}, 공격력 +{}, 방어력 +{})",
            player.level, LEVEL_UP_MAX_HP, LEVEL_UP_ATTACK, LEVEL_UP_DEFENSE
        ));
    }
    lines
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_threshold_strictly_increases(level in 1u32..10_000) {
            prop_assert_eq!(experience_threshold(level), level * 50);
            prop_assert!(experience_threshold(level + 1) > experience_threshold(level));
        }

        #[test]
        fn prop_experience_below_threshold_after_apply(
            start_level in 1u32..50,
            start_exp in 0u32..50,
            gained in 0u32..200_000,
        ) {
            let mut p = Player::new("용사");
            p.level = start_level;
            p.exp = start_exp;
            let lines = apply_experience(&mut p, gained);
            prop_assert!(p.exp < experience_threshold(p.level));
            prop_assert_eq!(lines.len() as u32, p.level - start_level);
        }

        #[test]
        fn prop_level_up_leaves_full_hp(hp in 1u32..100, gained in 50u32..5_000) {
            let mut p = Player::new("용사");
            p.hp = hp;
            apply_experience(&mut p, gained);
            prop_assert!(p.level > 1);
            prop_assert_eq!(p.hp, p.max_hp);
        }
    }
}
