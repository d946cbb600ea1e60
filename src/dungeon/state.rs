//! Dungeon Crawl game state: all data structures and tables, no rules.
//!
//! The rules that mutate a [`Session`] live in the sibling modules
//! (`combat`, `rooms`, `shop`, `progression`) and are reached through
//! [`Session::dispatch`](super::commands).

use std::collections::BTreeMap;
use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ── Dungeon Layout ────────────────────────────────────────────

/// Every room that is a multiple of this number holds a boss.
pub const BOSS_INTERVAL: u32 = 50;
/// The final boss room. Defeating its boss clears the dungeon.
pub const FINAL_ROOM: u32 = 250;

// ── Items ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemKind {
    Potion,
    UpgradeStone,
}

impl ItemKind {
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Potion => "포션",
            ItemKind::UpgradeStone => "강화석",
        }
    }
}

/// Held item counts, keyed by the closed [`ItemKind`] set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    counts: BTreeMap<ItemKind, u32>,
}

impl Inventory {
    pub fn count(&self, kind: ItemKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn add(&mut self, kind: ItemKind, count: u32) {
        *self.counts.entry(kind).or_insert(0) += count;
    }

    /// Remove one item. Returns false (and changes nothing) when none are held.
    pub fn take(&mut self, kind: ItemKind) -> bool {
        match self.counts.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }
}

// ── Weapons ───────────────────────────────────────────────────

/// Weapon tiers in upgrade order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WeaponTier {
    Worn,
    Stone,
    Iron,
    Steel,
    Mithril,
    Legendary,
}

impl WeaponTier {
    pub const ALL: [WeaponTier; 6] = [
        WeaponTier::Worn,
        WeaponTier::Stone,
        WeaponTier::Iron,
        WeaponTier::Steel,
        WeaponTier::Mithril,
        WeaponTier::Legendary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WeaponTier::Worn => "낡은 검",
            WeaponTier::Stone => "돌 검",
            WeaponTier::Iron => "철 검",
            WeaponTier::Steel => "강철 검",
            WeaponTier::Mithril => "미스릴 검",
            WeaponTier::Legendary => "전설의 검",
        }
    }

    /// Attack added on top of the player's base attack.
    pub fn bonus(self) -> u32 {
        match self {
            WeaponTier::Worn => 0,
            WeaponTier::Stone => 5,
            WeaponTier::Iron => 10,
            WeaponTier::Steel => 20,
            WeaponTier::Mithril => 35,
            WeaponTier::Legendary => 50,
        }
    }

    /// The next tier, or `None` at the top.
    pub fn next(self) -> Option<WeaponTier> {
        let idx = Self::ALL.iter().position(|&t| t == self)?;
        Self::ALL.get(idx + 1).copied()
    }
}

// ── Player ────────────────────────────────────────────────────

pub const START_HP: u32 = 100;
pub const START_ATTACK: u32 = 12;
pub const START_DEFENSE: u32 = 4;
pub const START_POTIONS: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub level: u32,
    pub exp: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub base_attack: u32,
    pub defense: u32,
    pub gold: u32,
    pub inventory: Inventory,
    pub weapon: WeaponTier,
}

impl Player {
    /// The placeholder held before character creation.
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            level: 1,
            exp: 0,
            hp: 0,
            max_hp: 0,
            base_attack: 0,
            defense: 0,
            gold: 0,
            inventory: Inventory::default(),
            weapon: WeaponTier::Worn,
        }
    }

    pub fn new(name: &str) -> Self {
        let mut inventory = Inventory::default();
        inventory.add(ItemKind::Potion, START_POTIONS);
        Self {
            name: name.to_string(),
            level: 1,
            exp: 0,
            hp: START_HP,
            max_hp: START_HP,
            base_attack: START_ATTACK,
            defense: START_DEFENSE,
            gold: 0,
            inventory,
            weapon: WeaponTier::Worn,
        }
    }

    pub fn effective_attack(&self) -> u32 {
        self.base_attack + self.weapon.bonus()
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

// ── Monsters ──────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonsterRank {
    Normal,
    Boss,
    FinalBoss,
}

impl MonsterRank {
    pub fn is_boss(self) -> bool {
        self != MonsterRank::Normal
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Monster {
    pub name: &'static str,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub exp: u32,
    pub gold: u32,
    pub rank: MonsterRank,
}

// ── Shop ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShopItem {
    Potion,
    Heal,
    AttackBuff,
}

pub struct ShopItemInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub cost: u32,
    pub value: u32,
}

pub fn shop_item_info(item: ShopItem) -> ShopItemInfo {
    match item {
        ShopItem::Potion => ShopItemInfo {
            name: "포션 구매",
            description: "포션 +1",
            cost: 20,
            value: 1,
        },
        ShopItem::Heal => ShopItemInfo {
            name: "치료",
            description: "HP 50 회복",
            cost: 30,
            value: 50,
        },
        ShopItem::AttackBuff => ShopItemInfo {
            name: "공격력 강화",
            description: "기본 공격력 +3",
            cost: 50,
            value: 3,
        },
    }
}

/// The offer set of one shop visit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopOffer {
    pub items: [ShopItem; 3],
}

impl ShopOffer {
    pub fn standard() -> Self {
        Self {
            items: [ShopItem::Potion, ShopItem::Heal, ShopItem::AttackBuff],
        }
    }

    pub fn contains(&self, item: ShopItem) -> bool {
        self.items.contains(&item)
    }
}

// ── Combat Actions ────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    Defend,
    UsePotion,
    UseUpgradeStone,
}

// ── Mode ──────────────────────────────────────────────────────

/// Top-level state machine mode. An open shop is `Exploring` with
/// [`Session::shop`] set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    CharacterCreation,
    Exploring,
    InCombat,
    Defeated,
    Victorious,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Mode::CharacterCreation => "캐릭터 생성",
            Mode::Exploring => "탐험",
            Mode::InCombat => "전투",
            Mode::Defeated => "패배",
            Mode::Victorious => "승리",
        };
        f.write_str(label)
    }
}

// ── Run Statistics ────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub monsters_defeated: u32,
    pub bosses_defeated: u32,
    pub gold_earned: u32,
    pub rooms_cleared: u32,
    pub traps_triggered: u32,
    pub items_found: u32,
}

// ── Root Session ──────────────────────────────────────────────

pub struct Session {
    pub(crate) player: Player,
    pub(crate) room: u32,
    pub(crate) mode: Mode,
    pub(crate) monster: Option<Monster>,
    pub(crate) shop: Option<ShopOffer>,
    /// Set by `defend`; only the retaliation of that same turn reads it.
    pub(crate) defending: bool,
    /// Monster hp at encounter start, for the progress bar.
    pub(crate) encounter_hp: Option<u32>,
    pub(crate) log: Vec<String>,
    /// Lines appended by the command currently being dispatched.
    pub(crate) emitted: Vec<String>,
    pub(crate) stats: RunStats,
    pub(crate) rng: ChaCha8Rng,
}

impl Session {
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self {
            player: Player::empty(),
            room: 1,
            mode: Mode::CharacterCreation,
            monster: None,
            shop: None,
            defending: false,
            encounter_hp: None,
            log: Vec::new(),
            emitted: Vec::new(),
            stats: RunStats::default(),
            rng,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Back to character creation. The random stream carries on.
    pub(crate) fn reset(&mut self) {
        self.player = Player::empty();
        self.room = 1;
        self.mode = Mode::CharacterCreation;
        self.monster = None;
        self.shop = None;
        self.defending = false;
        self.encounter_hp = None;
        self.log.clear();
        self.stats = RunStats::default();
    }

    pub(crate) fn add_log(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.emitted.push(text.clone());
        self.log.push(text);
    }

    /// Move on to the next room after a resolved event.
    pub(crate) fn clear_room(&mut self) {
        self.room += 1;
        self.stats.rooms_cleared += 1;
    }

    // ── Queries ──

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn room(&self) -> u32 {
        self.room
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn monster(&self) -> Option<&Monster> {
        self.monster.as_ref()
    }

    pub fn shop(&self) -> Option<&ShopOffer> {
        self.shop.as_ref()
    }

    pub fn is_shop_open(&self) -> bool {
        self.shop.is_some()
    }

    pub fn is_defending(&self) -> bool {
        self.defending
    }

    pub fn encounter_hp(&self) -> Option<u32> {
        self.encounter_hp
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// The last `n` log lines, oldest first.
    pub fn recent_log(&self, n: usize) -> &[String] {
        let start = self.log.len().saturating_sub(n);
        &self.log[start..]
    }

    /// Whether the next `advance_room` meets a boss.
    pub fn is_boss_room_next(&self) -> bool {
        self.mode == Mode::Exploring && super::monster::is_boss_room(self.room)
    }

    /// True once the run has ended in defeat or victory.
    pub fn is_over(&self) -> bool {
        matches!(self.mode, Mode::Defeated | Mode::Victorious)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_session() {
        let s = Session::with_seed(1);
        assert_eq!(s.mode(), Mode::CharacterCreation);
        assert_eq!(s.room(), 1);
        assert!(s.player().name.is_empty());
        assert!(s.monster().is_none());
        assert!(!s.is_shop_open());
        assert!(s.log().is_empty());
        assert!(!s.is_boss_room_next());
    }

    #[test]
    fn boss_room_next_only_while_exploring() {
        let mut s = Session::with_seed(1);
        s.mode = Mode::Exploring;
        s.room = 50;
        assert!(s.is_boss_room_next());
        s.room = 51;
        assert!(!s.is_boss_room_next());
    }

    #[test]
    fn new_player_stats() {
        let p = Player::new("용사");
        assert_eq!(p.level, 1);
        assert_eq!(p.hp, 100);
        assert_eq!(p.max_hp, 100);
        assert_eq!(p.effective_attack(), 12);
        assert_eq!(p.defense, 4);
        assert_eq!(p.gold, 0);
        assert_eq!(p.inventory.count(ItemKind::Potion), 1);
        assert_eq!(p.inventory.count(ItemKind::UpgradeStone), 0);
        assert_eq!(p.weapon, WeaponTier::Worn);
    }

    #[test]
    fn upgrading_worn_to_stone_adds_five_attack() {
        let mut p = Player::new("용사");
        let before = p.effective_attack();
        p.weapon = p.weapon.next().unwrap();
        assert_eq!(p.weapon.name(), "돌 검");
        assert_eq!(p.effective_attack(), before + 5);
    }

    #[test]
    fn weapon_tiers_are_ordered_with_increasing_bonus() {
        let bonuses: Vec<u32> = WeaponTier::ALL.iter().map(|t| t.bonus()).collect();
        assert_eq!(bonuses, vec![0, 5, 10, 20, 35, 50]);
        assert_eq!(WeaponTier::Legendary.next(), None);
        assert_eq!(WeaponTier::Worn.next(), Some(WeaponTier::Stone));
    }

    #[test]
    fn inventory_take_on_empty_is_noop() {
        let mut inv = Inventory::default();
        assert!(!inv.take(ItemKind::Potion));
        assert_eq!(inv.count(ItemKind::Potion), 0);
        inv.add(ItemKind::Potion, 2);
        assert!(inv.take(ItemKind::Potion));
        assert_eq!(inv.count(ItemKind::Potion), 1);
    }

    #[test]
    fn recent_log_returns_tail() {
        let mut s = Session::with_seed(1);
        for i in 0..5 {
            s.add_log(format!("msg {}", i));
        }
        assert_eq!(s.recent_log(2), &["msg 3".to_string(), "msg 4".to_string()]);
        assert_eq!(s.recent_log(10).len(), 5);
    }

    #[test]
    fn reset_clears_run() {
        let mut s = Session::with_seed(1);
        s.player = Player::new("용사");
        s.mode = Mode::Defeated;
        s.room = 42;
        s.stats.monsters_defeated = 3;
        s.add_log("끝");
        s.reset();
        assert_eq!(s.mode(), Mode::CharacterCreation);
        assert_eq!(s.room(), 1);
        assert_eq!(s.stats(), &RunStats::default());
        assert!(s.log().is_empty());
    }

    #[test]
    fn shop_prices() {
        assert_eq!(shop_item_info(ShopItem::Potion).cost, 20);
        assert_eq!(shop_item_info(ShopItem::Heal).cost, 30);
        assert_eq!(shop_item_info(ShopItem::AttackBuff).cost, 50);
        assert!(ShopOffer::standard().contains(ShopItem::Heal));
    }
}
