use super::dealer;
use super::round::HandPlay;
use super::round::Phase;
use super::settle;
use pb_betting::BetEngine;
use pb_betting::ExitSignal;
use pb_cards::Card;
use pb_cards::Hand;
use pb_cards::Shoe;
use pb_core::GameRules;
use pb_core::Money;
use pb_core::ID;
use pb_core::MIN_CARDS_TO_DEAL;
use pb_count::Counter;
use pb_dto::ApiError;
use pb_dto::Mode;
use pb_dto::Outcome;
use pb_dto::Reply;
use pb_dto::Request;
use pb_dto::StartSession;
use pb_dto::Statistics;
use pb_strategy::Action;
use pb_strategy::Engine;
use pb_strategy::Turn;

/// One advisory session: the counter, decision engine, bet engine, and the
/// auto-mode round in flight.
///
/// A session is exclusively owned by its actor task; every operation runs
/// to completion before the next is looked at, so state transitions are
/// totally ordered. Failed operations leave the session exactly as it was.
#[derive(Debug)]
pub struct Session {
    id: ID<Session>,
    mode: Mode,
    rules: GameRules,
    engine: Engine,
    bets: BetEngine,
    counter: Counter,
    shoe: Option<Shoe>,
    seed: u64,
    phase: Phase,
    hands: Vec<HandPlay>,
    active: usize,
    dealer_up: Option<Card>,
    splits_used: u8,
    hands_dealt_this_shoe: u32,
    bankroll: Money,
    stats: Statistics,
}

/// What an applied action changed, for reply assembly.
struct Applied {
    acted: usize,
    new_card: Option<Card>,
    dealer: Option<Hand>,
}

/// Round state saved before a mutating operation, restored on failure.
struct Checkpoint {
    counter: Counter,
    shoe_dealt: Option<u32>,
    hands: Vec<HandPlay>,
    active: usize,
    phase: Phase,
    splits_used: u8,
    bankroll: Money,
    stats: Statistics,
}

impl Session {
    /// Validates the request and builds a session. Rules and chart
    /// problems surface as `BadRules`, malformed knobs as `BadInput`.
    pub fn start(request: StartSession) -> Result<Self, ApiError> {
        if !request.bankroll.is_finite() || request.bankroll <= 0.0 {
            return Err(ApiError::BadInput(format!(
                "bankroll out of range: {}",
                request.bankroll
            )));
        }
        let rules = request.rules.unwrap_or_default();
        rules
            .validate()
            .map_err(|e| ApiError::BadRules(e.to_string()))?;
        let betting = request.betting.unwrap_or_default();
        betting.validate().map_err(ApiError::BadInput)?;
        let engine = Engine::new(rules, betting.deviation_margin)
            .map_err(|e| ApiError::BadRules(e.to_string()))?;
        let bets = BetEngine::new(betting, &rules);
        let seed = request.seed.unwrap_or_else(rand::random);
        let shoe = match request.mode {
            Mode::Auto => Some(Shoe::new(rules.num_decks, seed)),
            Mode::Manual => None,
        };
        let session = Self {
            id: ID::default(),
            mode: request.mode,
            rules,
            engine,
            bets,
            counter: Counter::new(rules.num_decks),
            shoe,
            seed,
            phase: Phase::Idle,
            hands: Vec::new(),
            active: 0,
            dealer_up: None,
            splits_used: 0,
            hands_dealt_this_shoe: 0,
            bankroll: request.bankroll,
            stats: Statistics::default(),
        };
        log::info!(
            "[session {}] started: {} mode, {} rules, bankroll {:.2}",
            session.id,
            session.mode,
            session.rules,
            session.bankroll
        );
        Ok(session)
    }

    pub fn id(&self) -> ID<Session> {
        self.id
    }
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The `Started` reply echoed to the creating caller.
    pub fn started_reply(&self) -> Reply {
        Reply::Started {
            session_id: self.id.to_string(),
            mode: self.mode,
            bankroll: self.bankroll,
            seed: self.seed,
            status: "created".to_string(),
        }
    }

    /// Dispatches one operation. Strictly sequential per session.
    pub fn handle(&mut self, request: Request) -> Result<Reply, ApiError> {
        match request {
            Request::End => Ok(Reply::Ended),
            Request::Status => Ok(self.status()),
            Request::Shuffle => self.shuffle(),
            Request::Deal => self.deal(),
            Request::Action { action } => self.action(&action),
            Request::Observe { cards } => self.observe(&cards),
            Request::QueryDecision {
                player_cards,
                dealer_up,
            } => self.query_decision(&player_cards, &dealer_up),
            Request::QueryBet => self.query_bet(),
        }
    }

    // ========================================================================
    // SHARED OPERATIONS
    // ========================================================================

    fn status(&self) -> Reply {
        Reply::Status {
            mode: self.mode,
            state: self.phase.to_string(),
            count_snapshot: self.counter.snapshot(),
            bankroll: self.bankroll,
            hands_played: self.stats.hands_played,
            statistics: self.stats,
            seed: self.seed,
        }
    }

    fn shuffle(&mut self) -> Result<Reply, ApiError> {
        if self.phase == Phase::PlayerTurn {
            return Err(ApiError::WrongState("cannot shuffle mid-hand".to_string()));
        }
        self.reshuffle();
        self.clear_round();
        log::debug!("[session {}] shuffled", self.id);
        Ok(Reply::Shuffled {
            count_snapshot: self.counter.snapshot(),
        })
    }

    // ========================================================================
    // AUTO MODE
    // ========================================================================

    fn deal(&mut self) -> Result<Reply, ApiError> {
        self.expect_mode(Mode::Auto, "deal")?;
        match self.phase {
            Phase::Idle | Phase::Settled => {}
            phase => {
                return Err(ApiError::WrongState(format!(
                    "cannot deal during {}",
                    phase
                )))
            }
        }
        if self.counter.is_shuffle_due(self.rules.penetration) {
            log::info!("[session {}] cut card reached, shuffling", self.id);
            self.reshuffle();
        }
        if self.shoe().remaining() < MIN_CARDS_TO_DEAL {
            return Err(ApiError::ShoeExhausted);
        }
        self.clear_round();
        // conventional order: player, dealer up, player. The hole card is
        // drawn lazily when the dealer acts so it cannot leak into the count.
        let first = self.draw()?;
        let up = self.draw()?;
        let second = self.draw()?;
        self.dealer_up = Some(up);
        let snapshot = self.counter.snapshot();
        let wager = self.bets.recommend(&snapshot, self.bankroll);
        let play = HandPlay::dealt(first, second, wager);
        log::debug!("[session {}] dealt {} vs {}", self.id, play.hand, up);
        let player_total = play.hand.total();
        let is_blackjack = play.hand.is_blackjack();
        self.hands = vec![play];
        self.active = 0;
        self.phase = Phase::PlayerTurn;
        self.hands_dealt_this_shoe += 1;
        let exit = self.exit_signal();
        Ok(Reply::Dealt {
            player_cards: vec![first.to_string(), second.to_string()],
            player_total,
            dealer_up: up.to_string(),
            is_blackjack,
            count_snapshot: snapshot,
            recommended_bet: wager,
            should_exit: exit.should_exit,
            exit_reason: exit.reason,
        })
    }

    fn action(&mut self, raw: &str) -> Result<Reply, ApiError> {
        self.expect_mode(Mode::Auto, "action")?;
        if self.phase != Phase::PlayerTurn {
            return Err(ApiError::WrongState(format!(
                "no action expected during {}",
                self.phase
            )));
        }
        let action = Action::try_from(raw).map_err(ApiError::BadInput)?;
        let Some(up) = self.dealer_up else {
            return Err(ApiError::WrongState("round has no dealer card".to_string()));
        };
        let turn = self.turn_for_active();
        let play = &self.hands[self.active];
        if !self.engine.is_legal(action, &play.hand, turn) {
            return Err(ApiError::IllegalAction(format!(
                "{} not legal for {}",
                action, play.hand
            )));
        }
        // grade against what the engine would have played, before playing
        let correct = self
            .engine
            .decide(&play.hand, up, &self.counter.snapshot(), turn);
        let checkpoint = self.checkpoint();
        let applied = match self.apply(action, up) {
            Ok(applied) => applied,
            Err(error) => {
                self.restore(checkpoint);
                return Err(error);
            }
        };
        let play = &self.hands[applied.acted];
        let exit = self.exit_signal();
        log::debug!(
            "[session {}] {} ({}): {}",
            self.id,
            action,
            if action == correct.action { "correct" } else { "off-book" },
            play.hand
        );
        Ok(Reply::Acted {
            action_taken: action,
            correct_action: correct.action,
            is_correct: action == correct.action,
            deviation: correct.deviation.map(String::from),
            new_card: applied.new_card.map(|c| c.to_string()),
            new_total: applied.new_card.map(|_| play.hand.total()),
            outcome: play.outcome,
            dealer_total: applied.dealer.as_ref().map(|d| d.total()),
            round_over: self.phase == Phase::Settled,
            should_exit: exit.should_exit,
            exit_reason: exit.reason,
            count_snapshot: self.counter.snapshot(),
        })
    }

    fn apply(&mut self, action: Action, up: Card) -> Result<Applied, ApiError> {
        let acted = self.active;
        let mut new_card = None;
        match action {
            Action::Hit => {
                let card = self.draw()?;
                new_card = Some(card);
                self.hands[acted].hand.push(card);
                if self.hands[acted].hand.is_bust() {
                    self.settle_early(acted, Outcome::Bust);
                } else if self.hands[acted].hand.total() == 21 {
                    self.hands[acted].stood = true;
                }
            }
            Action::Stand => self.hands[acted].stood = true,
            Action::Double => {
                let card = self.draw()?;
                new_card = Some(card);
                self.hands[acted].wager *= 2.0;
                self.hands[acted].hand.push(card);
                if self.hands[acted].hand.is_bust() {
                    self.settle_early(acted, Outcome::Bust);
                } else {
                    self.hands[acted].stood = true;
                }
            }
            Action::Split => {
                let parent = &self.hands[acted];
                let wager = parent.wager;
                let cards = parent.hand.cards().to_vec();
                let frozen = cards[0].is_ace() && !self.rules.hit_split_aces;
                // one card to the first hand, then one to the second
                let first = HandPlay::split(cards[0], self.draw()?, wager, frozen);
                let second = HandPlay::split(cards[1], self.draw()?, wager, frozen);
                new_card = Some(first.hand.cards()[1]);
                self.splits_used += 1;
                self.hands.splice(acted..=acted, [first, second]);
            }
            Action::Surrender => self.settle_early(acted, Outcome::Surrender),
        }
        let dealer = self.advance(up)?;
        Ok(Applied {
            acted,
            new_card,
            dealer,
        })
    }

    /// Moves past resolved hands; once none remain, plays the dealer if
    /// anyone is still in contention and settles the round.
    fn advance(&mut self, up: Card) -> Result<Option<Hand>, ApiError> {
        while self.active < self.hands.len() && self.hands[self.active].resolved() {
            self.active += 1;
        }
        if self.active < self.hands.len() {
            return Ok(None);
        }
        if !self.hands.iter().any(|h| h.contends()) {
            // everyone busted or surrendered; the hole card stays unseen
            self.phase = Phase::Settled;
            return Ok(None);
        }
        self.phase = Phase::DealerTurn;
        let shoe = self
            .shoe
            .as_mut()
            .expect("auto sessions own a shoe");
        let dealer_hand = dealer::play(up, shoe, &mut self.counter, &self.rules)?;
        self.settle_round(&dealer_hand);
        self.phase = Phase::Settled;
        Ok(Some(dealer_hand))
    }

    fn settle_round(&mut self, dealer_hand: &Hand) {
        for index in 0..self.hands.len() {
            if !self.hands[index].contends() {
                continue;
            }
            let (outcome, net) =
                settle::grade(&self.hands[index], dealer_hand, self.rules.blackjack_payout);
            let wager = self.hands[index].wager;
            self.hands[index].outcome = Some(outcome);
            self.bankroll += net;
            self.stats.record(outcome, wager, net);
        }
        log::debug!(
            "[session {}] round settled vs dealer {}, bankroll {:.2}",
            self.id,
            dealer_hand.total(),
            self.bankroll
        );
    }

    /// Resolves a hand whose fate is independent of the dealer.
    fn settle_early(&mut self, index: usize, outcome: Outcome) {
        let play = &mut self.hands[index];
        let net = match outcome {
            Outcome::Bust => -play.wager,
            Outcome::Surrender => -play.wager / 2.0,
            outcome => unreachable!("{} settles against the dealer", outcome),
        };
        play.outcome = Some(outcome);
        let wager = play.wager;
        self.bankroll += net;
        self.stats.record(outcome, wager, net);
    }

    // ========================================================================
    // SHADOW MODE
    // ========================================================================

    fn observe(&mut self, cards: &[String]) -> Result<Reply, ApiError> {
        self.expect_mode(Mode::Manual, "observe")?;
        if cards.is_empty() {
            return Err(ApiError::BadInput("no cards supplied".to_string()));
        }
        let parsed = cards
            .iter()
            .map(|token| {
                Card::try_from(token.as_str()).map_err(|_| ApiError::BadCard(token.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.counter
            .observe_all(&parsed)
            .map_err(|_| ApiError::ShoeExhausted)?;
        let snapshot = self.counter.snapshot();
        log::debug!(
            "[session {}] observed {} cards: {}",
            self.id,
            parsed.len(),
            snapshot
        );
        Ok(Reply::Observed {
            count_snapshot: snapshot,
            recommended_bet: self.bets.recommend(&snapshot, self.bankroll),
        })
    }

    fn query_decision(&self, player_cards: &[String], dealer_up: &str) -> Result<Reply, ApiError> {
        self.expect_mode(Mode::Manual, "query_decision")?;
        if player_cards.len() < 2 {
            return Err(ApiError::BadInput(
                "need at least two player cards".to_string(),
            ));
        }
        let cards = player_cards
            .iter()
            .map(|token| {
                Card::try_from(token.as_str()).map_err(|_| ApiError::BadCard(token.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let up =
            Card::try_from(dealer_up).map_err(|_| ApiError::BadCard(dealer_up.to_string()))?;
        let hand = Hand::from(cards);
        if hand.is_bust() {
            return Err(ApiError::BadInput(format!("hand is already bust: {}", hand)));
        }
        let turn = Turn {
            first_two: hand.len() == 2,
            after_split: false,
            splits_used: 0,
        };
        let snapshot = self.counter.snapshot();
        let decision = self.engine.decide(&hand, up, &snapshot, turn);
        let exit = self.exit_signal();
        Ok(Reply::Decided {
            recommended_action: decision.action,
            take_insurance: self.engine.take_insurance(&snapshot),
            count_snapshot: snapshot,
            recommended_bet: self.bets.recommend(&snapshot, self.bankroll),
            should_exit: exit.should_exit,
            exit_reason: exit.reason,
        })
    }

    fn query_bet(&self) -> Result<Reply, ApiError> {
        self.expect_mode(Mode::Manual, "query_bet")?;
        let snapshot = self.counter.snapshot();
        Ok(Reply::Bet {
            recommended_bet: self.bets.recommend(&snapshot, self.bankroll),
            count_snapshot: snapshot,
        })
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn expect_mode(&self, wanted: Mode, operation: &str) -> Result<(), ApiError> {
        if self.mode == wanted {
            Ok(())
        } else {
            Err(ApiError::WrongMode(format!(
                "{} requires {} mode",
                operation, wanted
            )))
        }
    }

    /// Exit advisory. Auto mode counts dealt hands for cover; shadow mode
    /// has no hand ledger, so any observed card this shoe counts as play.
    fn exit_signal(&self) -> ExitSignal {
        let cover = match self.mode {
            Mode::Auto => self.hands_dealt_this_shoe,
            Mode::Manual => self.counter.cards_dealt(),
        };
        self.bets.exit_signal(&self.counter.snapshot(), cover)
    }

    fn turn_for_active(&self) -> Turn {
        let play = &self.hands[self.active];
        Turn {
            first_two: play.hand.len() == 2,
            after_split: play.from_split,
            splits_used: self.splits_used,
        }
    }

    fn shoe(&self) -> &Shoe {
        self.shoe.as_ref().expect("auto sessions own a shoe")
    }

    /// Draws from the virtual shoe and observes the card in one step; in
    /// auto mode the counter tracks the shoe exactly.
    fn draw(&mut self) -> Result<Card, ApiError> {
        let shoe = self.shoe.as_mut().expect("auto sessions own a shoe");
        let card = shoe.draw().ok_or(ApiError::ShoeExhausted)?;
        self.counter
            .observe(card)
            .map_err(|_| ApiError::ShoeExhausted)?;
        Ok(card)
    }

    fn reshuffle(&mut self) {
        self.counter.shuffle();
        if let Some(shoe) = self.shoe.as_mut() {
            shoe.shuffle();
        }
        self.hands_dealt_this_shoe = 0;
    }

    fn clear_round(&mut self) {
        self.hands.clear();
        self.active = 0;
        self.dealer_up = None;
        self.splits_used = 0;
        self.phase = Phase::Idle;
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            counter: self.counter.clone(),
            shoe_dealt: self.shoe.as_ref().map(|s| s.dealt()),
            hands: self.hands.clone(),
            active: self.active,
            phase: self.phase,
            splits_used: self.splits_used,
            bankroll: self.bankroll,
            stats: self.stats,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.counter = checkpoint.counter;
        if let (Some(shoe), Some(dealt)) = (self.shoe.as_mut(), checkpoint.shoe_dealt) {
            shoe.rewind(dealt);
        }
        self.hands = checkpoint.hands;
        self.active = checkpoint.active;
        self.phase = checkpoint.phase;
        self.splits_used = checkpoint.splits_used;
        self.bankroll = checkpoint.bankroll;
        self.stats = checkpoint.stats;
    }
}
