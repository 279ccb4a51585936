use tracing::{debug, error, info, warn};

use crate::betting::{is_round_complete, BettingRound};
use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::{GameError, GameResult};
use crate::events::HandEvent;
use crate::game::{GameState, TableConfig};
use crate::hand::{evaluate7, Category};
use crate::logger::{ActionRecord, HandRecord, ShowdownInfo, Street};
use crate::player::{PlayerAction, Seat};
use crate::pot::PotManager;
use crate::rules::{is_full_raise, legalize, min_raise_total, LegalContext, ValidatedAction};

/// Where the current hand stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandPhase {
    /// No hand dealt yet in this match
    Idle,
    /// Waiting on `to_act`
    Betting,
    /// Betting closed; `advance_street` deals on or goes to showdown
    RoundComplete,
    /// Pot awarded; `start_hand` may be called
    Complete,
}

/// What happened when a seat acted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub seat: Seat,
    /// The action as applied
    pub action: PlayerAction,
    /// The original request when it was illegal and had to be coerced
    pub coerced_from: Option<PlayerAction>,
    /// Chips moved from the stack into the pot
    pub amount: u32,
    /// The seat's street contribution afterwards
    pub street_total: u32,
    pub became_all_in: bool,
    /// `Some` for bets and raises: whether the raise reopened betting
    pub full_raise: Option<bool>,
    /// Uncalled chips returned to the acting seat
    pub refund: u32,
    pub round_complete: bool,
    pub hand_over: bool,
    pub next_to_act: Option<Seat>,
    /// Effective pot after everything this call triggered
    pub pot: u32,
    pub events: Vec<HandEvent>,
}

/// Settled outcome of a hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandResult {
    pub winners: Vec<Seat>,
    /// Pot paid out (after uncalled chips were returned)
    pub pot: u32,
    /// Net chip change per seat, indexed by [`Seat::index`]
    pub net: [i64; 2],
    pub showdown: Option<ShowdownResult>,
    pub folded: Option<Seat>,
}

impl HandResult {
    pub fn won_by(&self, seat: Seat) -> bool {
        self.winners.len() == 1 && self.winners[0] == seat
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowdownResult {
    pub player_rank: u16,
    pub opponent_rank: u16,
    pub winners: Vec<Seat>,
}

impl ShowdownResult {
    pub fn rank_of(&self, seat: Seat) -> u16 {
        match seat {
            Seat::Player => self.player_rank,
            Seat::Opponent => self.opponent_rank,
        }
    }

    pub fn category_of(&self, seat: Seat) -> Category {
        Category::from_rank(self.rank_of(seat))
    }
}

/// Read-only snapshot of the table from one seat's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatView {
    pub seat: Seat,
    pub street: Street,
    pub hole: Option<[Card; 2]>,
    pub board: Vec<Card>,
    pub stack: u32,
    pub opponent_stack: u32,
    pub street_bet: u32,
    pub opponent_street_bet: u32,
    pub current_bet: u32,
    pub to_call: u32,
    /// Settled pot plus both street bets
    pub pot: u32,
    pub min_raise_total: u32,
    /// Street total if the whole stack goes in
    pub max_raise_total: u32,
    pub may_raise: bool,
    pub big_blind: u32,
    pub is_button: bool,
    pub opponent_all_in: bool,
}

impl SeatView {
    pub fn facing_bet(&self) -> bool {
        self.to_call > 0
    }

    /// Smaller of the two stacks, counting chips already in this street.
    pub fn effective_stack(&self) -> u32 {
        (self.stack + self.street_bet).min(self.opponent_stack + self.opponent_street_bet)
    }
}

/// Heads-up betting controller.
///
/// Owns the deck, both stacks, the pot and the per-street flags, and is the
/// only writer of chip totals. Every public call either returns the events
/// it produced or an error; after an invariant violation the engine halts
/// and refuses further work.
///
/// # Examples
///
/// ```
/// use tilt_engine::engine::Engine;
/// use tilt_engine::game::TableConfig;
/// use tilt_engine::player::{PlayerAction, Seat};
///
/// let mut engine = Engine::new(TableConfig::default(), Some(7)).unwrap();
/// engine.start_hand().unwrap();
/// engine.apply_action(Seat::Player, PlayerAction::Call).unwrap();
/// let outcome = engine.apply_action(Seat::Opponent, PlayerAction::Check).unwrap();
/// assert!(outcome.round_complete);
/// assert_eq!(engine.board().len(), 3);
/// assert_eq!(engine.pot(), 20);
/// ```
#[derive(Debug)]
pub struct Engine {
    config: TableConfig,
    seed: u64,
    deck: Deck,
    state: GameState,
    pot: PotManager,
    round: BettingRound,
    street: Street,
    board: Vec<Card>,
    phase: HandPhase,
    to_act: Option<Seat>,
    actions: Vec<ActionRecord>,
    stacks_at_start: [u32; 2],
    last_result: Option<HandResult>,
    halted: Option<String>,
}

impl Engine {
    pub fn new(config: TableConfig, seed: Option<u64>) -> GameResult<Self> {
        config.validate().map_err(GameError::InvalidConfig)?;
        let seed = seed.unwrap_or(0xA1A2_A3A4);
        Ok(Self {
            deck: Deck::new_with_seed(seed),
            state: GameState::new(config.buy_in),
            stacks_at_start: [config.buy_in; 2],
            config,
            seed,
            pot: PotManager::new(),
            round: BettingRound::new(),
            street: Street::Preflop,
            board: Vec::with_capacity(5),
            phase: HandPhase::Idle,
            to_act: None,
            actions: Vec::new(),
            last_result: None,
            halted: None,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn phase(&self) -> HandPhase {
        self.phase
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn to_act(&self) -> Option<Seat> {
        self.to_act
    }
    pub fn button(&self) -> Seat {
        self.state.button()
    }
    pub fn hand_no(&self) -> u64 {
        self.state.hands_started()
    }
    pub fn stack(&self, seat: Seat) -> u32 {
        self.state.player(seat).stack()
    }
    pub fn pot_manager(&self) -> &PotManager {
        &self.pot
    }
    /// Effective pot: settled chips plus both street bets.
    pub fn pot(&self) -> u32 {
        self.pot.effective_pot()
    }
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }
    pub fn last_result(&self) -> Option<&HandResult> {
        self.last_result.as_ref()
    }
    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn is_all_in(&self, seat: Seat) -> bool {
        let p = self.state.player(seat);
        !p.is_folded() && p.stack() == 0
    }

    /// Shuffles, rotates the button, posts blinds and deals hole cards.
    pub fn start_hand(&mut self) -> GameResult<Vec<HandEvent>> {
        self.ensure_live()?;
        if matches!(self.phase, HandPhase::Betting | HandPhase::RoundComplete) {
            return Err(GameError::HandInProgress);
        }
        if let Some(broke) = Seat::BOTH.into_iter().find(|&s| self.stack(s) == 0) {
            return Err(GameError::MatchOver(broke));
        }

        self.state.begin_hand();
        self.deck.shuffle();
        self.pot.reset_for_new_hand();
        self.round.reset();
        self.board.clear();
        self.actions.clear();
        self.street = Street::Preflop;
        self.last_result = None;
        self.stacks_at_start = [self.stack(Seat::Player), self.stack(Seat::Opponent)];
        self.phase = HandPhase::Betting;

        info!(
            hand_no = self.hand_no(),
            button = ?self.button(),
            player_stack = self.stacks_at_start[0],
            opponent_stack = self.stacks_at_start[1],
            "hand started"
        );
        let mut events = vec![HandEvent::HandStarted {
            hand_no: self.hand_no(),
            button: self.button(),
            stacks: self.stacks_at_start,
        }];
        events.extend(self.post_blinds()?);
        events.extend(self.deal_hole_cards()?);
        self.to_act = Some(self.button());
        self.check_conservation()?;
        self.after_action(&mut events)?;
        Ok(events)
    }

    fn post_blinds(&mut self) -> GameResult<Vec<HandEvent>> {
        let sb_seat = self.state.button();
        let bb_seat = self.state.big_blind_seat();
        let mut events = Vec::with_capacity(3);
        for (seat, blind) in [
            (sb_seat, self.config.small_blind),
            (bb_seat, self.config.big_blind),
        ] {
            let moved = self.state.player_mut(seat).take_chips(blind);
            self.pot.add_bet(seat, moved);
            events.push(HandEvent::BlindPosted {
                seat,
                amount: moved,
                all_in: self.is_all_in(seat),
            });
        }
        self.return_uncalled_excess(&mut events);
        Ok(events)
    }

    fn deal_hole_cards(&mut self) -> GameResult<Vec<HandEvent>> {
        let order = [self.state.big_blind_seat(), self.state.button()];
        for _ in 0..2 {
            for seat in order {
                let c = self.deck.deal_card()?;
                self.state
                    .player_mut(seat)
                    .give_card(c)
                    .map_err(GameError::InvariantViolation)?;
            }
        }
        Ok(order
            .into_iter()
            .map(|seat| HandEvent::HoleCardsDealt { seat })
            .collect())
    }

    pub fn hole_cards(&self, seat: Seat) -> Option<[Card; 2]> {
        self.state.player(seat).hand()
    }

    fn legal_context(&self, seat: Seat) -> LegalContext {
        let may_raise = self.round.may_raise(seat) && !self.is_all_in(seat.other());
        LegalContext {
            stack: self.stack(seat),
            street_bet: self.pot.street_bet(seat),
            current_bet: self.pot.current_bet(),
            min_raise_total: min_raise_total(
                self.pot.current_bet(),
                self.pot.previous_bet(),
                self.pot.last_raise_amount(),
                self.config.big_blind,
            ),
            may_raise,
        }
    }

    /// Legal bet/raise-to range for `seat`, or `None` if it cannot raise.
    pub fn legal_bet_range(&self, seat: Seat) -> Option<(u32, u32)> {
        if self.phase != HandPhase::Betting || self.to_act != Some(seat) {
            return None;
        }
        let ctx = self.legal_context(seat);
        let max = ctx.max_total();
        if !ctx.may_raise || max <= ctx.current_bet {
            return None;
        }
        Some((ctx.min_raise_total.min(max), max))
    }

    pub fn view(&self, seat: Seat) -> SeatView {
        let ctx = self.legal_context(seat);
        SeatView {
            seat,
            street: self.street,
            hole: self.hole_cards(seat),
            board: self.board.clone(),
            stack: ctx.stack,
            opponent_stack: self.stack(seat.other()),
            street_bet: ctx.street_bet,
            opponent_street_bet: self.pot.street_bet(seat.other()),
            current_bet: ctx.current_bet,
            to_call: ctx.to_call(),
            pot: self.pot.effective_pot(),
            min_raise_total: ctx.min_raise_total.min(ctx.max_total()),
            max_raise_total: ctx.max_total(),
            may_raise: ctx.may_raise && ctx.max_total() > ctx.current_bet,
            big_blind: self.config.big_blind,
            is_button: self.button() == seat,
            opponent_all_in: self.is_all_in(seat.other()),
        }
    }

    /// Applies `action` for `seat`, coercing illegal requests to the nearest
    /// legal action. When the round closes and `auto_advance` is set, the
    /// next street (or the showdown) is produced in the same call.
    pub fn apply_action(&mut self, seat: Seat, action: PlayerAction) -> GameResult<ActionOutcome> {
        self.ensure_live()?;
        match self.phase {
            HandPhase::Betting => {}
            HandPhase::Complete => return Err(GameError::HandAlreadyComplete),
            HandPhase::Idle => return Err(GameError::NoHandInProgress),
            HandPhase::RoundComplete => {
                return Err(GameError::NotSeatsTurn {
                    expected: None,
                    actual: seat,
                })
            }
        }
        if self.to_act != Some(seat) {
            return Err(GameError::NotSeatsTurn {
                expected: self.to_act,
                actual: seat,
            });
        }

        let ctx = self.legal_context(seat);
        let (validated, coerced_from) = legalize(&ctx, action);
        if let Some(requested) = coerced_from {
            warn!(?seat, ?requested, applied = ?validated, to_call = ctx.to_call(), "illegal action coerced");
        }

        let mut events = Vec::new();
        let mut moved = 0;
        let mut full_raise = None;
        let applied = match validated {
            ValidatedAction::Fold => {
                self.state.player_mut(seat).fold();
                self.round.record_passive(seat);
                PlayerAction::Fold
            }
            ValidatedAction::Check => {
                self.round.record_passive(seat);
                PlayerAction::Check
            }
            ValidatedAction::Call(amount) => {
                moved = self.move_to_pot(seat, amount);
                self.round.record_passive(seat);
                PlayerAction::Call
            }
            ValidatedAction::Raise(to) | ValidatedAction::AllIn(to) => {
                let before = ctx.current_bet;
                moved = self.move_to_pot(seat, to - ctx.street_bet);
                let total = ctx.street_bet + moved;
                if total > before {
                    let full = is_full_raise(total - before, ctx.min_raise_total - before);
                    self.round.record_raise(seat, full);
                    full_raise = Some(full);
                } else {
                    self.round.record_passive(seat);
                }
                if matches!(validated, ValidatedAction::AllIn(_)) {
                    PlayerAction::AllIn
                } else {
                    PlayerAction::Raise(total)
                }
            }
        };

        let street_total = self.pot.street_bet(seat);
        let became_all_in = moved > 0 && self.stack(seat) == 0;
        debug!(?seat, action = ?applied, moved, street_total, became_all_in, ?full_raise, "action applied");
        self.actions.push(ActionRecord {
            seat,
            street: self.street,
            action: applied,
            amount: moved,
            pot_after: self.pot.effective_pot(),
            all_in: became_all_in,
        });
        events.push(HandEvent::ActionApplied {
            seat,
            action: applied,
            amount: moved,
            street_total,
            all_in: became_all_in,
        });

        let refund = self
            .return_uncalled_excess(&mut events)
            .filter(|(s, _)| *s == seat)
            .map(|(_, amount)| amount)
            .unwrap_or(0);
        self.check_conservation()?;

        if applied == PlayerAction::Fold {
            self.finish_by_fold(seat, &mut events)?;
        } else {
            self.to_act = Some(seat.other());
            self.after_action(&mut events)?;
        }

        Ok(ActionOutcome {
            seat,
            action: applied,
            coerced_from,
            amount: moved,
            street_total,
            became_all_in,
            full_raise,
            refund,
            round_complete: self.phase != HandPhase::Betting || self.street_changed(&events),
            hand_over: self.phase == HandPhase::Complete,
            next_to_act: self.to_act,
            pot: self.pot.effective_pot(),
            events,
        })
    }

    fn street_changed(&self, events: &[HandEvent]) -> bool {
        events
            .iter()
            .any(|e| matches!(e, HandEvent::RoundComplete { .. }))
    }

    fn move_to_pot(&mut self, seat: Seat, amount: u32) -> u32 {
        let moved = self.state.player_mut(seat).take_chips(amount);
        self.pot.add_bet(seat, moved);
        moved
    }

    /// When the seat with the smaller street bet is all-in, the other
    /// seat's excess can never be called and goes straight back.
    fn return_uncalled_excess(&mut self, events: &mut Vec<HandEvent>) -> Option<(Seat, u32)> {
        let (big, small) = if self.pot.street_bet(Seat::Player) > self.pot.street_bet(Seat::Opponent) {
            (Seat::Player, Seat::Opponent)
        } else {
            (Seat::Opponent, Seat::Player)
        };
        if self.pot.bets_equal() || !self.is_all_in(small) {
            return None;
        }
        let refund = self.pot.refund_street_excess(big);
        if refund.amount == 0 {
            return None;
        }
        self.state.player_mut(big).add_chips(refund.amount);
        debug!(seat = ?big, amount = refund.amount, "uncalled bet returned");
        events.push(HandEvent::UncalledBetReturned {
            seat: big,
            amount: refund.amount,
        });
        Some((big, refund.amount))
    }

    /// Closes the round if the completion predicate holds, otherwise leaves
    /// `to_act` pointing at the seat that still owes a decision.
    fn after_action(&mut self, events: &mut Vec<HandEvent>) -> GameResult<()> {
        let all_in = [self.is_all_in(Seat::Player), self.is_all_in(Seat::Opponent)];
        let status = self.round.status(self.pot.bets_equal(), all_in);
        if !is_round_complete(&status) {
            if let Some(next) = self.to_act {
                if self.is_all_in(next) {
                    self.to_act = Some(next.other());
                }
            }
            return Ok(());
        }

        self.phase = HandPhase::RoundComplete;
        self.to_act = None;
        debug!(street = ?self.street, pot = self.pot.effective_pot(), "betting round complete");
        events.push(HandEvent::RoundComplete {
            street: self.street,
            pot: self.pot.effective_pot(),
        });
        if self.config.auto_advance {
            events.extend(self.advance_street()?);
        }
        Ok(())
    }

    /// Settles the street and deals the next one, or runs the board out and
    /// goes to showdown when a seat is all-in or the river is done.
    pub fn advance_street(&mut self) -> GameResult<Vec<HandEvent>> {
        self.ensure_live()?;
        match self.phase {
            HandPhase::RoundComplete => {}
            HandPhase::Betting => return Err(GameError::RoundNotComplete(self.street)),
            HandPhase::Complete => return Err(GameError::HandAlreadyComplete),
            HandPhase::Idle => return Err(GameError::NoHandInProgress),
        }
        let any_all_in = self.is_all_in(Seat::Player) || self.is_all_in(Seat::Opponent);
        self.assert_bets_settled(any_all_in)?;

        self.pot.settle_street_into_pot();
        self.round.reset();
        let mut events = Vec::new();

        if any_all_in {
            while let Some(next) = self.street.next() {
                let cards = self.deal_street(next)?;
                events.push(HandEvent::StreetDealt {
                    street: next,
                    cards,
                    delay_ms: self.config.runout_delay_ms,
                });
            }
            self.showdown_into(&mut events)?;
            return Ok(events);
        }

        match self.street.next() {
            None => {
                self.showdown_into(&mut events)?;
            }
            Some(next) => {
                let cards = self.deal_street(next)?;
                events.push(HandEvent::StreetDealt {
                    street: next,
                    cards,
                    delay_ms: self.config.street_delay_ms,
                });
                self.phase = HandPhase::Betting;
                self.to_act = Some(self.state.big_blind_seat());
            }
        }
        self.check_conservation()?;
        Ok(events)
    }

    /// Deals `street` on the host's request. Goes through the same closing
    /// path as [`Engine::advance_street`], so the street must be the next
    /// one and its betting round must be closed. Dealing over unmatched
    /// street bets with nobody all-in halts the engine.
    pub fn deal_community_cards(&mut self, street: Street) -> GameResult<Vec<HandEvent>> {
        self.ensure_live()?;
        if self.street.next() != Some(street) {
            return Err(GameError::OutOfSequence(street));
        }
        if self.phase == HandPhase::Betting {
            let any_all_in = self.is_all_in(Seat::Player) || self.is_all_in(Seat::Opponent);
            self.assert_bets_settled(any_all_in)?;
        }
        self.advance_street()
    }

    fn assert_bets_settled(&mut self, any_all_in: bool) -> GameResult<()> {
        if self.pot.bets_equal() || any_all_in {
            return Ok(());
        }
        Err(self.halt(format!(
            "street advanced on {:?} with unequal bets {} vs {}",
            self.street,
            self.pot.street_bet(Seat::Player),
            self.pot.street_bet(Seat::Opponent)
        )))
    }

    /// Burns one card and deals `street`'s community cards.
    fn deal_street(&mut self, street: Street) -> GameResult<Vec<Card>> {
        let expected_before = street.board_len() - street.cards_dealt();
        if street == Street::Preflop || self.board.len() != expected_before {
            return Err(GameError::OutOfSequence(street));
        }
        self.deck.burn_card()?;
        let cards = self.deck.deal_n(street.cards_dealt())?;
        self.board.extend_from_slice(&cards);
        self.street = street;
        debug!(?street, board = ?self.board, "community cards dealt");
        Ok(cards)
    }

    /// Compares both hands and pays the settled pot. Split pots give the odd
    /// chip to the big blind.
    pub fn showdown(&mut self) -> GameResult<ShowdownResult> {
        let mut events = Vec::new();
        self.showdown_into(&mut events)
    }

    fn showdown_into(&mut self, events: &mut Vec<HandEvent>) -> GameResult<ShowdownResult> {
        self.ensure_live()?;
        match self.phase {
            HandPhase::RoundComplete => {}
            HandPhase::Betting => return Err(GameError::RoundNotComplete(self.street)),
            HandPhase::Complete => return Err(GameError::HandAlreadyComplete),
            HandPhase::Idle => return Err(GameError::NoHandInProgress),
        }
        if self.board.len() != 5 {
            return Err(GameError::OutOfSequence(Street::River));
        }
        self.pot.settle_street_into_pot();
        self.process_contribution_refunds(events);
        let pot = self.pot.main_pot();
        if pot == 0 {
            return Err(self.halt("showdown with an empty pot".to_string()));
        }

        let rank_of = |engine: &Self, seat: Seat| -> GameResult<u16> {
            let hole = engine
                .hole_cards(seat)
                .ok_or_else(|| GameError::InvariantViolation(format!("{:?} has no hole cards", seat)))?;
            let b = &engine.board;
            Ok(evaluate7(&[hole[0], hole[1], b[0], b[1], b[2], b[3], b[4]]))
        };
        let player_rank = rank_of(self, Seat::Player)?;
        let opponent_rank = rank_of(self, Seat::Opponent)?;
        let winners = match player_rank.cmp(&opponent_rank) {
            std::cmp::Ordering::Less => vec![Seat::Player],
            std::cmp::Ordering::Greater => vec![Seat::Opponent],
            std::cmp::Ordering::Equal => vec![Seat::Player, Seat::Opponent],
        };
        info!(
            player_rank,
            player_hand = Category::from_rank(player_rank).name(),
            opponent_rank,
            opponent_hand = Category::from_rank(opponent_rank).name(),
            pot,
            "showdown"
        );
        events.push(HandEvent::Showdown {
            player_rank,
            opponent_rank,
            winners: winners.clone(),
        });

        let result = ShowdownResult {
            player_rank,
            opponent_rank,
            winners: winners.clone(),
        };
        self.award_pot(&winners, events)?;
        self.finish_hand(winners, Some(result.clone()), None, pot, events)?;
        Ok(result)
    }

    fn finish_by_fold(&mut self, folder: Seat, events: &mut Vec<HandEvent>) -> GameResult<()> {
        self.pot.settle_street_into_pot();
        self.process_contribution_refunds(events);
        let pot = self.pot.main_pot();
        let winner = folder.other();
        info!(?folder, ?winner, pot, "hand ended by fold");
        self.award_pot(&[winner], events)?;
        self.finish_hand(vec![winner], None, Some(folder), pot, events)
    }

    fn process_contribution_refunds(&mut self, events: &mut Vec<HandEvent>) {
        if let Some((seat, refund)) = self.pot.calculate_and_process_refunds() {
            if refund.amount > 0 {
                self.state.player_mut(seat).add_chips(refund.amount);
                events.push(HandEvent::UncalledBetReturned {
                    seat,
                    amount: refund.amount,
                });
            }
        }
    }

    fn award_pot(&mut self, winners: &[Seat], events: &mut Vec<HandEvent>) -> GameResult<()> {
        let pot = self.pot.take_main_pot();
        let shares: Vec<(Seat, u32)> = match winners {
            [only] => vec![(*only, pot)],
            _ => {
                let half = pot / 2;
                let bb = self.state.big_blind_seat();
                vec![(bb, pot - half), (bb.other(), half)]
            }
        };
        for (seat, amount) in shares {
            self.state.player_mut(seat).add_chips(amount);
            events.push(HandEvent::PotAwarded { seat, amount });
        }
        self.check_conservation()
    }

    fn finish_hand(
        &mut self,
        winners: Vec<Seat>,
        showdown: Option<ShowdownResult>,
        folded: Option<Seat>,
        pot: u32,
        events: &mut Vec<HandEvent>,
    ) -> GameResult<()> {
        let net = [
            self.stack(Seat::Player) as i64 - self.stacks_at_start[0] as i64,
            self.stack(Seat::Opponent) as i64 - self.stacks_at_start[1] as i64,
        ];
        if net[0] + net[1] != 0 {
            return Err(self.halt(format!("hand net deltas do not cancel: {:?}", net)));
        }
        self.phase = HandPhase::Complete;
        self.to_act = None;
        events.push(HandEvent::HandEnded { net });
        info!(hand_no = self.hand_no(), ?winners, pot, player_net = net[0], "hand complete");
        self.last_result = Some(HandResult {
            winners,
            pot,
            net,
            showdown,
            folded,
        });
        Ok(())
    }

    /// Builds the hand-history record for the last completed hand.
    pub fn hand_record(&self, hand_id: String) -> Option<HandRecord> {
        let result = self.last_result.as_ref()?;
        let summary = match (&result.folded, result.winners.as_slice()) {
            (Some(folder), _) => format!("{:?} folded; {:?} wins {}", folder, folder.other(), result.pot),
            (None, [w]) => format!("{:?} wins {}", w, result.pot),
            _ => format!("split pot {}", result.pot),
        };
        Some(HandRecord {
            hand_id,
            seed: Some(self.seed),
            small_blind: self.config.small_blind,
            big_blind: self.config.big_blind,
            button: self.button(),
            actions: self.actions.clone(),
            board: self.board.clone(),
            net: result.net,
            result: Some(summary),
            ts: None,
            showdown: result.showdown.as_ref().map(|s| ShowdownInfo {
                winners: s.winners.clone(),
                player_rank: s.player_rank,
                opponent_rank: s.opponent_rank,
                notes: Some(format!(
                    "{} vs {}",
                    s.category_of(Seat::Player).name(),
                    s.category_of(Seat::Opponent).name()
                )),
            }),
        })
    }

    /// Stacks plus every chip in the pot must equal both buy-ins.
    pub fn check_conservation(&mut self) -> GameResult<()> {
        let total = self.stack(Seat::Player) as u64
            + self.stack(Seat::Opponent) as u64
            + self.pot.effective_pot() as u64;
        let expected = self.config.buy_in as u64 * 2;
        if total != expected {
            return Err(self.halt(format!(
                "chip total {} does not match buy-ins {}",
                total, expected
            )));
        }
        Ok(())
    }

    fn ensure_live(&self) -> GameResult<()> {
        match &self.halted {
            Some(reason) => Err(GameError::Halted(reason.clone())),
            None => Ok(()),
        }
    }

    fn halt(&mut self, reason: String) -> GameError {
        error!(%reason, "engine halted");
        self.halted = Some(reason.clone());
        self.to_act = None;
        GameError::InvariantViolation(reason)
    }
}
