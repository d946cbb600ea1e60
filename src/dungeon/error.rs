//! Command rejections.
//!
//! Nothing in the dungeon is fatal: every invalid request is turned away
//! with one of these, its message lands in the game log, and the session is
//! left as it was.

use thiserror::Error;

use super::state::{ItemKind, Mode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("이름을 입력해 주세요.")]
    EmptyName,

    #[error("지금은 {command}을(를) 할 수 없습니다. (현재: {mode})")]
    WrongMode { command: &'static str, mode: Mode },

    #[error("상점을 먼저 이용하거나 떠나야 합니다.")]
    ShopPending,

    #[error("열려 있는 상점이 없습니다.")]
    NoShopOffer,

    #[error("골드가 부족합니다! (필요 {cost}G / 보유 {gold}G)")]
    InsufficientGold { cost: u32, gold: u32 },

    #[error("{}이(가) 없습니다!", .0.name())]
    MissingItem(ItemKind),
}
