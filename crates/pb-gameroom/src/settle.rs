use super::round::HandPlay;
use pb_cards::Hand;
use pb_core::Money;
use pb_dto::Outcome;

/// Grades a contending hand against the finished dealer hand.
///
/// Returns the outcome and the net bankroll delta. Busted and surrendered
/// hands never reach here — their fate was sealed before the dealer acted.
/// A dealer natural pushes a player natural and beats everything else.
pub(crate) fn grade(play: &HandPlay, dealer: &Hand, payout: f64) -> (Outcome, Money) {
    let wager = play.wager;
    let dealer_total = dealer.total();
    if play.is_natural() {
        return if dealer.is_blackjack() {
            (Outcome::Push, 0.0)
        } else {
            (Outcome::Blackjack, wager * payout)
        };
    }
    if dealer.is_blackjack() {
        return (Outcome::Loss, -wager);
    }
    let total = play.hand.total();
    if dealer_total > 21 || total > dealer_total {
        (Outcome::Win, wager)
    } else if total < dealer_total {
        (Outcome::Loss, -wager)
    } else {
        (Outcome::Push, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pb_cards::Card;

    fn play(s: &str, wager: Money) -> HandPlay {
        let cards = Card::parse(s).unwrap();
        let mut play = HandPlay::dealt(cards[0], cards[1], wager);
        for &card in &cards[2..] {
            play.hand.push(card);
        }
        play.stood = true;
        play
    }
    fn dealer(s: &str) -> Hand {
        Hand::from(Card::parse(s).unwrap())
    }

    #[test]
    fn higher_total_wins() {
        let (outcome, net) = grade(&play("Th 9d", 15.0), &dealer("Th 8d"), 1.5);
        assert_eq!(outcome, Outcome::Win);
        assert_eq!(net, 15.0);
    }

    #[test]
    fn lower_total_loses() {
        let (outcome, net) = grade(&play("Th 7d", 15.0), &dealer("Th 8d"), 1.5);
        assert_eq!(outcome, Outcome::Loss);
        assert_eq!(net, -15.0);
    }

    #[test]
    fn equal_totals_push() {
        let (outcome, net) = grade(&play("Th 8d", 15.0), &dealer("9h 9d"), 1.5);
        assert_eq!(outcome, Outcome::Push);
        assert_eq!(net, 0.0);
    }

    #[test]
    fn dealer_bust_pays() {
        let (outcome, net) = grade(&play("Th 2d", 15.0), &dealer("Th 6d 8c"), 1.5);
        assert_eq!(outcome, Outcome::Win);
        assert_eq!(net, 15.0);
    }

    #[test]
    fn natural_pays_the_premium() {
        let (outcome, net) = grade(&play("Ah Kd", 20.0), &dealer("Th 9d"), 1.5);
        assert_eq!(outcome, Outcome::Blackjack);
        assert_eq!(net, 30.0);
        // 6:5 game pays less
        let (_, net) = grade(&play("Ah Kd", 20.0), &dealer("Th 9d"), 1.2);
        assert_eq!(net, 24.0);
    }

    #[test]
    fn dealer_natural_pushes_player_natural() {
        let (outcome, net) = grade(&play("Ah Kd", 15.0), &dealer("As Qs"), 1.5);
        assert_eq!(outcome, Outcome::Push);
        assert_eq!(net, 0.0);
    }

    #[test]
    fn dealer_natural_beats_twenty_one() {
        // three-card 21 is not a natural
        let (outcome, net) = grade(&play("7h 7d 7c", 15.0), &dealer("As Qs"), 1.5);
        assert_eq!(outcome, Outcome::Loss);
        assert_eq!(net, -15.0);
    }

    #[test]
    fn split_twenty_one_is_not_a_natural() {
        let cards = Card::parse("Ah Kd").unwrap();
        let mut split = HandPlay::split(cards[0], cards[1], 15.0, false);
        split.stood = true;
        let (outcome, net) = grade(&split, &dealer("Th 9d"), 1.5);
        assert_eq!(outcome, Outcome::Win);
        assert_eq!(net, 15.0);
    }
}
