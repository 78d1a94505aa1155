use pb_cards::Card;
use pb_cards::Rank;

/// Hi-Lo tag for a rank: +1 for 2-6, 0 for 7-9, -1 for tens and aces.
pub fn tag(rank: Rank) -> i32 {
    match rank.value() {
        2..=6 => 1,
        7..=9 => 0,
        _ => -1,
    }
}

/// Hi-Lo tag for a card.
pub fn card_tag(card: Card) -> i32 {
    tag(card.rank())
}
