use pb_cards::Card;
use pb_cards::Hand;
use pb_cards::Shoe;
use pb_core::GameRules;
use pb_count::Counter;
use pb_dto::ApiError;

/// Plays the dealer hand to completion in auto mode.
///
/// The hole card is drawn here, not at deal time: it must not touch the
/// count until the dealer flips it. Every draw (hole included) is observed
/// into the counter the moment it becomes visible.
pub(crate) fn play(
    up: Card,
    shoe: &mut Shoe,
    counter: &mut Counter,
    rules: &GameRules,
) -> Result<Hand, ApiError> {
    let mut hand = Hand::from(vec![up]);
    let hole = draw(shoe, counter)?;
    hand.push(hole);
    while must_hit(&hand, rules) {
        hand.push(draw(shoe, counter)?);
    }
    log::debug!("[dealer] played to {}", hand);
    Ok(hand)
}

/// Draw-until-17, hitting soft 17 only under H17.
fn must_hit(hand: &Hand, rules: &GameRules) -> bool {
    let total = hand.total();
    if total > 21 {
        return false;
    }
    if total < 17 {
        return true;
    }
    total == 17 && hand.is_soft() && !rules.dealer_stands_soft_17
}

fn draw(shoe: &mut Shoe, counter: &mut Counter) -> Result<Card, ApiError> {
    let card = shoe.draw().ok_or(ApiError::ShoeExhausted)?;
    counter
        .observe(card)
        .map_err(|_| ApiError::ShoeExhausted)?;
    Ok(card)
}
