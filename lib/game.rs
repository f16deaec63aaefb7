use crate::chess::{Bitboard, Board, CheckDetector, Color, Move, MoveValidator};
use crate::chess::{Piece, Promotion, Role, Square};
use crate::power::{Energy, Power, PowerState};
use arrayvec::ArrayVec;
use derive_more::Display;
use std::mem;
use tracing::{debug, info, instrument};

mod event;
mod mood;
mod outcome;
mod phase;
mod rejection;
mod settings;
mod stats;

pub use event::*;
pub use mood::*;
pub use outcome::*;
pub use phase::*;
pub use rejection::*;
pub use settings::*;
pub use stats::*;

/// What became of an accepted move.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MoveOutcome {
    #[display(fmt = "applied")]
    Applied,

    /// The pawn on this square must be promoted before the game goes on.
    #[display(fmt = "promotion pending on {_0}")]
    PromotionPending(Square),
}

/// What selecting a square did.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Selection {
    #[display(fmt = "selected {_0}")]
    Selected(Square),

    #[display(fmt = "shielded {_0}")]
    Shielded(Square),

    #[display(fmt = "{_0}")]
    Moved(MoveOutcome),

    #[display(fmt = "cleared")]
    Cleared,
}

/// A game of chess where energy buys temporary rule overrides.
///
/// The game is the sole owner of its state, every command either applies in full
/// or is rejected without any effect.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Game {
    settings: Settings,
    phase: Phase,
    board: Board,
    turn: Color,
    energy: [Energy; 2],
    powers: [PowerState; 2],
    stats: [Stats; 2],
    captured: [ArrayVec<Piece, 64>; 2],
    history: Vec<Move>,
    selected: Option<Square>,
    pending: Option<Move>,
    outcome: Option<Outcome>,
    events: Vec<Event>,
}

impl Default for Game {
    fn default() -> Self {
        Game::new(Settings::default())
    }
}

impl Game {
    /// A game in the [`Phase::Setup`] stage, with pieces on their starting squares.
    pub fn new(settings: Settings) -> Self {
        Game {
            settings,
            phase: Phase::Setup,
            board: Board::default(),
            turn: Color::White,
            energy: [Energy::new(settings.max_energy); 2],
            powers: Default::default(),
            stats: Default::default(),
            captured: Default::default(),
            history: Vec::new(),
            selected: None,
            pending: None,
            outcome: None,
            events: Vec::new(),
        }
    }

    /// A game in progress from an arbitrary position.
    ///
    /// The game ends right away if the side to move is mated or stalemated.
    pub fn from_position(settings: Settings, board: Board, turn: Color) -> Self {
        let mut game = Game {
            phase: Phase::Playing,
            board,
            turn,
            ..Game::new(settings)
        };

        game.evaluate();
        game
    }

    /// This game's [`Settings`].
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The current [`Phase`].
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The current [`Board`].
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The currently selected square.
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Every completed move in the order they were played.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The last completed move.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// A side's [`Energy`].
    pub fn energy(&self, side: Color) -> Energy {
        self.energy[side as usize]
    }

    /// The overrides in effect for a side.
    pub fn powers(&self, side: Color) -> &PowerState {
        &self.powers[side as usize]
    }

    /// A side's [`Stats`].
    pub fn stats(&self, side: Color) -> Stats {
        self.stats[side as usize]
    }

    /// The pieces of this [`Color`] that were captured, in order.
    pub fn captured(&self, side: Color) -> &[Piece] {
        &self.captured[side as usize]
    }

    /// The square of the pawn awaiting promotion.
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending.map(|m| m.whither())
    }

    /// How the game ended, if it did.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Whether the king of this [`Color`] is attacked.
    pub fn is_in_check(&self, side: Color) -> bool {
        CheckDetector::new(self.validator(side)).is_in_check(side)
    }

    /// A side's [`Mood`].
    pub fn mood(&self, side: Color) -> Mood {
        let lost = self.captured[side as usize].len();
        Mood::new(self.is_in_check(side), lost, self.stats[side as usize].moves)
    }

    /// The squares [`Self::attempt_move`] would accept for the piece on `whence`.
    pub fn destinations(&self, whence: Square) -> Bitboard {
        Square::iter()
            .filter(|&whither| self.check_move(whence, whither).is_ok())
            .collect()
    }

    /// Moves from [`Phase::Setup`] to [`Phase::Playing`].
    #[instrument(level = "debug", skip(self), err)]
    pub fn start(&mut self) -> Result<(), Rejection> {
        if self.phase != Phase::Setup {
            return Err(Rejection::WrongPhase(self.phase));
        }

        self.phase = Phase::Playing;
        info!("game started");
        Ok(())
    }

    /// Selects a square on behalf of the side to move.
    ///
    /// While a shield is armed, selecting a friendly piece shields it. Otherwise a
    /// friendly piece becomes the selection, and any other square is the destination
    /// of a move from the current selection, if there is one.
    #[instrument(level = "debug", skip(self), ret, err)]
    pub fn select_square(&mut self, sq: Square) -> Result<Selection, Rejection> {
        self.ensure_playing()?;
        if let Some(m) = self.pending {
            return Err(Rejection::AwaitingPromotion(m.whither()));
        }

        let side = self.turn;
        let friendly = self.board.color_on(sq) == Some(side);

        if self.powers[side as usize].is_shield_armed() {
            if !friendly {
                return Err(Rejection::AwaitingShieldTarget);
            }

            self.shield(sq);
            Ok(Selection::Shielded(sq))
        } else if friendly {
            self.selected = Some(sq);
            Ok(Selection::Selected(sq))
        } else if let Some(whence) = self.selected {
            self.attempt_move(whence, sq).map(Selection::Moved)
        } else {
            Ok(Selection::Cleared)
        }
    }

    /// Moves the piece on `whence` onto `whither`.
    #[instrument(level = "debug", skip(self), ret, err)]
    pub fn attempt_move(&mut self, whence: Square, whither: Square) -> Result<MoveOutcome, Rejection> {
        let victim = match self.check_move(whence, whither) {
            Ok(victim) => victim,
            Err(e) => {
                if let Rejection::BlockedByShield(sq) = e {
                    debug!(%sq, "shield blocked a capture");
                    self.events.push(Event::ShieldBlocked(sq));
                }

                return Err(e);
            }
        };

        let Some(piece) = self.board[whence] else {
            return Err(Rejection::InvalidMove);
        };

        let side = self.turn;
        if let Some(p) = self.board.set(victim, None) {
            self.captured[p.color() as usize].push(p);
            self.stats[side as usize].captures += 1;
            self.energy[side as usize].add(1);
            self.events.push(Event::Captured(side, p));
            debug!(%side, captured = %p, on = %victim);
        }

        let m = Move(whence, whither);
        self.board.relocate(whence, whither);
        self.powers[side as usize].consume();
        self.selected = None;
        self.events.push(Event::Moved(side, m));
        debug!(%side, %m, "move applied");

        if piece.role() == Role::Pawn && whither.row() == side.last_row() {
            self.pending = Some(m);
            return Ok(MoveOutcome::PromotionPending(whither));
        }

        self.complete(m);
        Ok(MoveOutcome::Applied)
    }

    /// Buys a [`Power`] for a side.
    ///
    /// Shields take effect on `target` right away if it holds a friendly piece,
    /// otherwise they wait for the next friendly piece selected.
    #[instrument(level = "debug", skip(self), err)]
    pub fn activate(
        &mut self,
        side: Color,
        power: Power,
        target: Option<Square>,
    ) -> Result<(), Rejection> {
        self.ensure_ready()?;
        if side != self.turn {
            return Err(Rejection::OutOfTurn(side));
        }

        let target = target.filter(|_| power == Power::Shield);
        if target.is_some_and(|sq| self.board.color_on(sq) != Some(side)) {
            return Err(Rejection::InvalidMove);
        }

        let energy = &mut self.energy[side as usize];
        let available = energy.get();
        energy
            .spend(power.cost())
            .ok_or(Rejection::InsufficientEnergy {
                power,
                cost: power.cost(),
                available,
            })?;

        self.stats[side as usize].powers_used += power.uses();
        self.powers[side as usize].apply(power);
        self.events.push(Event::PowerActivated(side, power));
        info!(%side, %power, energy = %self.energy[side as usize], "power activated");

        if let Some(sq) = target {
            self.shield(sq);
        }

        Ok(())
    }

    /// Replaces the pawn awaiting promotion.
    #[instrument(level = "debug", skip(self), err)]
    pub fn promote(&mut self, role: Role) -> Result<(), Rejection> {
        self.ensure_playing()?;
        let Some(m) = self.pending else {
            return Err(Rejection::InvalidPromotionChoice);
        };

        let promotion =
            Promotion::try_from(role).map_err(|_| Rejection::InvalidPromotionChoice)?;

        let piece = Piece(self.turn, promotion.into());
        self.board[m.whither()] = Some(piece);
        self.pending = None;
        self.events.push(Event::Promoted(m.whither(), piece));
        debug!(on = %m.whither(), %piece, "pawn promoted");

        self.complete(m);
        Ok(())
    }

    /// Ends the game because a side ran out of time.
    #[instrument(level = "debug", skip(self), err)]
    pub fn timeout(&mut self, side: Color) -> Result<(), Rejection> {
        self.ensure_playing()?;
        self.end(Outcome::LossOnTime(side));
        Ok(())
    }

    /// Ends the game in favor of the opponent.
    #[instrument(level = "debug", skip(self), err)]
    pub fn resign(&mut self, side: Color) -> Result<(), Rejection> {
        self.ensure_playing()?;
        self.end(Outcome::Resignation(side));
        Ok(())
    }

    /// Starts over after the game ended.
    ///
    /// Undelivered events are kept.
    #[instrument(level = "debug", skip(self), err)]
    pub fn reset(&mut self, mode: Reset) -> Result<(), Rejection> {
        if self.phase != Phase::Ended {
            return Err(Rejection::WrongPhase(self.phase));
        }

        let events = mem::take(&mut self.events);
        *self = Game {
            phase: mode.phase(),
            events,
            ..Game::new(self.settings)
        };

        info!(%mode, "game reset");
        Ok(())
    }

    /// Grants energy to a side, up to the cap.
    pub fn add_energy(&mut self, side: Color, amount: u8) {
        self.energy[side as usize].add(amount);
    }

    /// Hands every queued [`Event`] to an [`Observer`].
    pub fn dispatch<O: Observer + ?Sized>(&mut self, observer: &mut O) {
        for event in self.events.drain(..) {
            observer.notify(&event);
        }
    }

    /// Takes every queued [`Event`].
    pub fn drain_events(&mut self) -> Vec<Event> {
        mem::take(&mut self.events)
    }

    fn ensure_playing(&self) -> Result<(), Rejection> {
        match self.phase {
            Phase::Playing => Ok(()),
            phase => Err(Rejection::WrongPhase(phase)),
        }
    }

    fn ensure_ready(&self) -> Result<(), Rejection> {
        self.ensure_playing()?;
        if let Some(m) = self.pending {
            Err(Rejection::AwaitingPromotion(m.whither()))
        } else if self.powers[self.turn as usize].is_shield_armed() {
            Err(Rejection::AwaitingShieldTarget)
        } else {
            Ok(())
        }
    }

    /// A [`MoveValidator`] that honors the overrides in effect for a side.
    ///
    /// Kings and the opposing pieces that stand on shielded squares are never destinations.
    fn validator(&self, side: Color) -> MoveValidator<'_> {
        let mut protected = self.powers[!side as usize].shielded() & self.board.by_color(!side);
        for king in Color::ALL.into_iter().filter_map(|c| self.board.king(c)) {
            protected.insert(king);
        }

        let validator = MoveValidator::new(&self.board, self.last_move()).with_protected(protected);
        if self.powers[side as usize].is_queen_rush() {
            validator.with_queen_rush(side)
        } else {
            validator
        }
    }

    /// Decides whether the side to move may play `whence` to `whither`.
    ///
    /// Returns the square of the piece that would be captured.
    fn check_move(&self, whence: Square, whither: Square) -> Result<Square, Rejection> {
        self.ensure_ready()?;

        let side = self.turn;
        match self.board.color_on(whence) {
            None => return Err(Rejection::InvalidMove),
            Some(c) if c != side => return Err(Rejection::OutOfTurn(c)),
            Some(_) => {}
        }

        let powers = &self.powers[side as usize];
        let validator = self.validator(side);
        let victim = if powers.is_teleport() {
            whither
        } else {
            validator.en_passant(whence, whither).unwrap_or(whither)
        };

        if self.board.color_on(victim) == Some(!side)
            && self.powers[!side as usize].shielded().contains(victim)
        {
            return Err(Rejection::BlockedByShield(victim));
        }

        if self.board[whither].is_some_and(|p| p.is_king() && p.color() != side) {
            return Err(Rejection::KingCaptureAttempt(whither));
        }

        let legal = if powers.is_teleport() {
            whence != whither && self.board.color_on(whither) != Some(side)
        } else {
            validator.is_legal(whence, whither, true)
        };

        if legal {
            Ok(victim)
        } else {
            Err(Rejection::InvalidMove)
        }
    }

    fn shield(&mut self, sq: Square) {
        let side = self.turn;
        self.powers[side as usize].place_shield(sq);
        self.selected = None;
        self.events.push(Event::ShieldPlaced(side, sq));
        debug!(%side, %sq, "shield placed");
        self.advance();
    }

    fn complete(&mut self, m: Move) {
        self.history.push(m);
        self.stats[self.turn as usize].moves += 1;
        self.advance();
    }

    /// Passes the turn unless a double-turn is in progress.
    fn advance(&mut self) {
        let side = self.turn;
        if self.powers[side as usize].complete_action() {
            self.turn = !side;
        }

        self.evaluate();
    }

    /// Looks for the end of the game from the point of view of the side to move.
    ///
    /// A side can move only if [`Self::attempt_move`] would accept at least one move.
    fn evaluate(&mut self) {
        let side = self.turn;
        let check = self.is_in_check(side);
        let movable = self
            .board
            .by_color(side)
            .into_iter()
            .any(|whence| !self.destinations(whence).is_empty());

        if check {
            self.events.push(Event::Check(side));
        }

        match (check, movable) {
            (true, false) => self.end(Outcome::Checkmate(!side)),
            (false, false) => self.end(Outcome::Stalemate),
            _ => {}
        }
    }

    fn end(&mut self, outcome: Outcome) {
        self.phase = Phase::Ended;
        self.outcome = Some(outcome);
        self.selected = None;
        self.events.push(Event::GameOver(outcome));
        info!(%outcome, "game over");
    }
}
