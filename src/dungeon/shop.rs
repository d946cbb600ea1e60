//! Wandering merchant: one offer per visit, one purchase per offer.

use super::error::Rejection;
use super::state::{shop_item_info, ItemKind, Mode, Session, ShopItem, ShopOffer};

pub fn open_shop(session: &mut Session) {
    session.shop = Some(ShopOffer::standard());
    session.add_log("상인: \"필요한 게 있으면 골라 보게. 단, 한 번만 거래하지.\"");
}

pub fn purchase(session: &mut Session, item: ShopItem) -> Result<(), Rejection> {
    let offer = session.shop.as_ref().ok_or(Rejection::NoShopOffer)?;
    if session.mode != Mode::Exploring || !offer.contains(item) {
        return Err(Rejection::NoShopOffer);
    }

    let info = shop_item_info(item);
    let player = &mut session.player;
    if player.gold < info.cost {
        return Err(Rejection::InsufficientGold { cost: info.cost, gold: player.gold });
    }

    player.gold -= info.cost;
    let message = match item {
        ShopItem::Potion => {
            player.inventory.add(ItemKind::Potion, info.value);
            format!("포션을 샀다. (-{}G)", info.cost)
        }
        ShopItem::Heal => {
            let before = player.hp;
            player.hp = (player.hp + info.value).min(player.max_hp);
            format!("치료를 받았다. HP {} 회복 (-{}G)", player.hp - before, info.cost)
        }
        ShopItem::AttackBuff => {
            player.base_attack += info.value;
            format!("공격력이 {} 올랐다. (-{}G)", info.value, info.cost)
        }
    };
    log::debug!("purchased {:?} for {}G", item, info.cost);
    session.shop = None;
    session.add_log(message);
    session.add_log("상인은 짐을 챙겨 떠났다.");
    Ok(())
}

/// Leave without buying. The room number does not change.
pub fn leave_shop(session: &mut Session) -> Result<(), Rejection> {
    if session.shop.take().is_none() {
        return Err(Rejection::NoShopOffer);
    }
    session.add_log("상점을 떠났다.");
    Ok(())
}
