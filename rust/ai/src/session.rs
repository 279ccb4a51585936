//! One match between the human seat and the bot.
//!
//! [`MatchSession`] owns the engine and everything the bot remembers. The
//! host feeds it the human's actions and asks it to play the bot's turns;
//! tilt and the opponent model are updated as hands finish.

use tracing::info;

use tilt_engine::engine::{ActionOutcome, Engine, HandPhase, HandResult};
use tilt_engine::events::HandEvent;
use tilt_engine::game::TableConfig;
use tilt_engine::hand::Category;
use tilt_engine::logger::HandRecord;
use tilt_engine::player::{PlayerAction, Seat};

use crate::config::AiConfig;
use crate::decision::{Decision, DecisionContext, DecisionEngine};
use crate::errors::AiError;
use crate::opponent::{ObservedAction, OpponentModel};
use crate::personality::{EarlyExit, HandFeedback, Personality, PersonalityState};
use crate::AIOpponent;

// keeps the bot's draws independent of the deck's
const BOT_SEED_SALT: u64 = 0x5EED_B07;

/// The bot's turn: what it decided and what the engine made of it.
#[derive(Debug, Clone)]
pub struct BotTurn {
    pub decision: Decision,
    pub outcome: ActionOutcome,
}

pub struct MatchSession {
    engine: Engine,
    bot: Box<dyn AIOpponent>,
    personality: PersonalityState,
    opponent: OpponentModel,
    config: AiConfig,
    bot_seat: Seat,
    early_exit: Option<EarlyExit>,
    settled: bool,
}

impl std::fmt::Debug for MatchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchSession")
            .field("bot", &self.bot.name())
            .field("hand_no", &self.engine.hand_no())
            .field("tilt", &self.personality.tilt_meter())
            .field("early_exit", &self.early_exit)
            .finish()
    }
}

impl MatchSession {
    /// New match with the threshold bot in the opponent seat.
    ///
    /// ```
    /// use tilt_ai::config::AiConfig;
    /// use tilt_ai::personality::preset;
    /// use tilt_ai::session::MatchSession;
    /// use tilt_engine::game::TableConfig;
    /// use tilt_engine::player::PlayerAction;
    ///
    /// let mut session = MatchSession::new(
    ///     TableConfig::default(),
    ///     preset("gto").unwrap(),
    ///     AiConfig::default(),
    ///     Some(3),
    /// )
    /// .unwrap();
    /// session.start_hand().unwrap();
    /// if !session.bot_to_act() {
    ///     session.apply_player_action(PlayerAction::Fold).unwrap();
    /// }
    /// assert_eq!(session.engine().hand_no(), 1);
    /// ```
    pub fn new(
        table: TableConfig,
        personality: Personality,
        config: AiConfig,
        seed: Option<u64>,
    ) -> Result<Self, AiError> {
        config.validate()?;
        let engine = Engine::new(table, seed)?;
        let bot = DecisionEngine::new(config.clone(), engine.seed() ^ BOT_SEED_SALT);
        Ok(Self::assemble(engine, Box::new(bot), personality, config))
    }

    /// New match with a caller-supplied bot.
    pub fn with_bot(
        table: TableConfig,
        personality: Personality,
        config: AiConfig,
        seed: Option<u64>,
        bot: Box<dyn AIOpponent>,
    ) -> Result<Self, AiError> {
        config.validate()?;
        let engine = Engine::new(table, seed)?;
        Ok(Self::assemble(engine, bot, personality, config))
    }

    fn assemble(
        engine: Engine,
        bot: Box<dyn AIOpponent>,
        personality: Personality,
        config: AiConfig,
    ) -> Self {
        let buy_in = engine.config().buy_in;
        let mut personality = PersonalityState::new(personality, buy_in);
        personality.reset_for_match(buy_in);
        info!(
            bot = bot.name(),
            personality = %personality.base().id,
            seed = engine.seed(),
            "match created"
        );
        Self {
            engine,
            bot,
            personality,
            opponent: OpponentModel::new(),
            config,
            bot_seat: Seat::Opponent,
            early_exit: None,
            settled: true,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }
    pub fn personality(&self) -> &PersonalityState {
        &self.personality
    }
    pub fn opponent_model(&self) -> &OpponentModel {
        &self.opponent
    }
    pub fn config(&self) -> &AiConfig {
        &self.config
    }
    pub fn bot_seat(&self) -> Seat {
        self.bot_seat
    }
    pub fn bot_name(&self) -> &str {
        self.bot.name()
    }
    pub fn early_exit(&self) -> Option<EarlyExit> {
        self.early_exit
    }
    pub fn last_result(&self) -> Option<&HandResult> {
        self.engine.last_result()
    }

    /// True once the bot has left or a seat is out of chips.
    pub fn is_over(&self) -> bool {
        self.early_exit.is_some()
            || (self.engine.phase() != HandPhase::Betting
                && self.engine.phase() != HandPhase::RoundComplete
                && Seat::BOTH.iter().any(|&s| self.engine.stack(s) == 0))
    }

    /// Runs the early-exit check, then deals a new hand.
    pub fn start_hand(&mut self) -> Result<Vec<HandEvent>, AiError> {
        if let Some(exit) = self.early_exit {
            return Err(AiError::OpponentLeft(exit));
        }
        let chips = self.engine.stack(self.bot_seat);
        if let Some(exit) = self.personality.early_exit(chips) {
            info!(
                ?exit,
                chips,
                tilt = self.personality.tilt_meter(),
                "opponent left the match"
            );
            self.early_exit = Some(exit);
            return Err(AiError::OpponentLeft(exit));
        }
        let events = self.engine.start_hand()?;
        self.settled = false;
        self.settle_if_over();
        Ok(events)
    }

    pub fn bot_to_act(&self) -> bool {
        self.engine.phase() == HandPhase::Betting && self.engine.to_act() == Some(self.bot_seat)
    }

    /// Applies the human seat's action and records it in the opponent model.
    pub fn apply_player_action(&mut self, action: PlayerAction) -> Result<ActionOutcome, AiError> {
        let seat = self.bot_seat.other();
        let street = self.engine.street();
        let pot = self.engine.pot();
        let outcome = self.engine.apply_action(seat, action)?;
        self.opponent.observe(ObservedAction {
            street,
            action: outcome.action,
            amount: outcome.amount,
            pot,
            all_in: outcome.became_all_in,
        });
        self.settle_if_over();
        Ok(outcome)
    }

    /// Asks the bot for a decision and applies it. The host should wait
    /// `decision.think_delay_ms` before presenting the result.
    pub fn play_bot_turn(&mut self) -> Result<BotTurn, AiError> {
        if !self.bot_to_act() {
            return Err(AiError::NotBotsTurn);
        }
        let view = self.engine.view(self.bot_seat);
        let ctx = DecisionContext {
            opponent: &self.opponent,
            personality: &self.personality,
        };
        let decision = self.bot.decide(&view, &ctx);
        let outcome = self.engine.apply_action(self.bot_seat, decision.action)?;
        self.settle_if_over();
        Ok(BotTurn { decision, outcome })
    }

    /// Manual street advance for tables without `auto_advance`.
    pub fn advance_street(&mut self) -> Result<Vec<HandEvent>, AiError> {
        let events = self.engine.advance_street()?;
        self.settle_if_over();
        Ok(events)
    }

    pub fn hand_record(&self, hand_id: String) -> Option<HandRecord> {
        self.engine.hand_record(hand_id)
    }

    fn settle_if_over(&mut self) {
        if self.settled || self.engine.phase() != HandPhase::Complete {
            return;
        }
        let Some(result) = self.engine.last_result() else {
            return;
        };
        self.settled = true;
        let feedback = feedback_for(result, self.bot_seat, self.engine.config().big_blind);
        self.opponent.end_hand();
        self.personality.record_hand(&feedback);
        info!(
            won = feedback.won,
            bad_beat = feedback.bad_beat,
            tilt = self.personality.tilt_meter(),
            state = ?self.personality.tilt_state(),
            "bot hand settled"
        );
    }
}

/// Turns a hand result into tilt input from `bot`'s side. A bad beat is a
/// showdown loss holding two pair or better.
pub fn feedback_for(result: &HandResult, bot: Seat, big_blind: u32) -> HandFeedback {
    let won = result.won_by(bot);
    let lost = result.won_by(bot.other());
    let bad_beat = lost
        && result
            .showdown
            .as_ref()
            .is_some_and(|s| s.category_of(bot) >= Category::TwoPair);
    HandFeedback {
        won,
        lost,
        pot_bb: result.pot as f64 / big_blind.max(1) as f64,
        bad_beat,
    }
}
