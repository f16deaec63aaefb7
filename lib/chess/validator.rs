use crate::chess::{Bitboard, Board, CheckDetector, Color, Move, Role, Square};

/// Decides whether pieces may move between two [`Square`]s.
///
/// The validator reads the [`Board`] and the last [`Move`] played, and may be
/// configured with the colors whose pieces currently move like queens and with a set
/// of squares whose occupants cannot be captured.
#[derive(Debug, Copy, Clone)]
pub struct MoveValidator<'a> {
    board: &'a Board,
    last: Option<Move>,
    rushing: [bool; 2],
    protected: Bitboard,
}

impl<'a> MoveValidator<'a> {
    /// Constructs a validator for a [`Board`] given the last [`Move`] played on it.
    pub fn new(board: &'a Board, last: Option<Move>) -> Self {
        MoveValidator {
            board,
            last,
            rushing: [false; 2],
            protected: Bitboard::empty(),
        }
    }

    /// Pieces of this [`Color`] move like queens.
    pub fn with_queen_rush(mut self, c: Color) -> Self {
        self.rushing[c as usize] = true;
        self
    }

    /// Occupants of these squares cannot be captured by [`Self::destinations`],
    /// not even en passant.
    pub fn with_protected(mut self, protected: Bitboard) -> Self {
        self.protected |= protected;
        self
    }

    /// The [`Board`] being validated.
    pub fn board(&self) -> &'a Board {
        self.board
    }

    /// The last [`Move`] played.
    pub fn last_move(&self) -> Option<Move> {
        self.last
    }

    /// Whether pieces of this [`Color`] move like queens.
    pub fn is_rushing(&self, c: Color) -> bool {
        self.rushing[c as usize]
    }

    /// Whether the piece on `whence` may move onto `whither`.
    ///
    /// If `check_safety` is set, moves that leave the mover's own king in check are
    /// rejected as well; attack sets are computed without it.
    pub fn is_legal(&self, whence: Square, whither: Square, check_safety: bool) -> bool {
        let Some(piece) = self.board[whence] else {
            return false;
        };

        if self.board.color_on(whither) == Some(piece.color()) {
            return false;
        }

        let geometric = if self.is_rushing(piece.color()) {
            self.is_queen_move(whence, whither)
        } else {
            match piece.role() {
                Role::Pawn => self.is_pawn_move(whence, whither, piece.color()),
                Role::Knight => self.is_knight_move(whence, whither),
                Role::Bishop => self.is_bishop_move(whence, whither),
                Role::Rook => self.is_rook_move(whence, whither),
                Role::Queen => self.is_queen_move(whence, whither),
                Role::King => self.is_king_move(whence, whither),
            }
        };

        geometric && (!check_safety || !self.exposes_king(whence, whither, piece.color()))
    }

    /// The squares the piece on `whence` may legally move onto.
    pub fn destinations(&self, whence: Square) -> Bitboard {
        Square::iter()
            .filter(|&sq| !self.protected.contains(sq))
            .filter(|&sq| {
                let victim = self.en_passant(whence, sq);
                !victim.is_some_and(|v| self.protected.contains(v))
            })
            .filter(|&sq| self.is_legal(whence, sq, true))
            .collect()
    }

    /// The square of the pawn captured if the piece on `whence` moves onto `whither`
    /// by capturing en passant.
    pub fn en_passant(&self, whence: Square, whither: Square) -> Option<Square> {
        let piece = self.board[whence]?;
        if piece.role() != Role::Pawn || self.is_rushing(piece.color()) {
            return None;
        }

        let (dr, dc) = whence.delta(whither);
        if dr != piece.color().forward() || dc.abs() != 1 || self.board[whither].is_some() {
            return None;
        }

        let last = self.last?;
        let victim = Square::new(whence.row(), whither.col());
        let is_enemy_pawn = self.board[victim]
            .is_some_and(|p| p.role() == Role::Pawn && p.color() != piece.color());

        (last.whither() == victim && last.is_double_step() && is_enemy_pawn).then_some(victim)
    }

    /// Plays the move on a scratch copy of the board and looks for attacks on the king.
    fn exposes_king(&self, whence: Square, whither: Square, side: Color) -> bool {
        let mut scratch = *self.board;
        if let Some(victim) = self.en_passant(whence, whither) {
            scratch.set(victim, None);
        }

        scratch.relocate(whence, whither);

        let validator = MoveValidator {
            board: &scratch,
            last: Some(Move(whence, whither)),
            ..*self
        };

        CheckDetector::new(validator).is_in_check(side)
    }

    fn is_pawn_move(&self, whence: Square, whither: Square, side: Color) -> bool {
        let forward = side.forward();
        let (dr, dc) = whence.delta(whither);
        let vacant = self.board[whither].is_none();

        match (dr, dc.abs()) {
            (dr, 0) if dr == forward => vacant,
            (dr, 0) if dr == 2 * forward => {
                let between = whence.offset(forward, 0);
                whence.row() == side.pawn_row()
                    && vacant
                    && between.is_some_and(|sq| self.board[sq].is_none())
            }
            (dr, 1) if dr == forward => !vacant || self.en_passant(whence, whither).is_some(),
            _ => false,
        }
    }

    fn is_knight_move(&self, whence: Square, whither: Square) -> bool {
        let (dr, dc) = whence.delta(whither);
        matches!((dr.abs(), dc.abs()), (2, 1) | (1, 2))
    }

    fn is_bishop_move(&self, whence: Square, whither: Square) -> bool {
        let (dr, dc) = whence.delta(whither);
        dr != 0 && dr.abs() == dc.abs() && self.is_path_clear(whence, whither)
    }

    fn is_rook_move(&self, whence: Square, whither: Square) -> bool {
        let (dr, dc) = whence.delta(whither);
        (dr == 0) != (dc == 0) && self.is_path_clear(whence, whither)
    }

    fn is_queen_move(&self, whence: Square, whither: Square) -> bool {
        self.is_rook_move(whence, whither) || self.is_bishop_move(whence, whither)
    }

    fn is_king_move(&self, whence: Square, whither: Square) -> bool {
        let (dr, dc) = whence.delta(whither);
        let is_king = self.board[whither].is_some_and(|p| p.is_king());
        !is_king && dr.abs() <= 1 && dc.abs() <= 1 && (dr, dc) != (0, 0)
    }

    /// Whether every square strictly between `whence` and `whither` is empty.
    fn is_path_clear(&self, whence: Square, whither: Square) -> bool {
        let (dr, dc) = whence.delta(whither);
        let (sr, sc) = (dr.signum(), dc.signum());

        let mut sq = whence;
        while let Some(next) = sq.offset(sr, sc) {
            if next == whither {
                return true;
            } else if self.board[next].is_some() {
                return false;
            }

            sq = next;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::Piece;
    use test_strategy::proptest;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn pawns_step_or_double_step_from_their_starting_row() {
        let b = Board::default();
        let v = MoveValidator::new(&b, None);
        assert!(v.is_legal(sq("e2"), sq("e3"), true));
        assert!(v.is_legal(sq("e2"), sq("e4"), true));
        assert!(!v.is_legal(sq("e2"), sq("e5"), true));
        assert!(v.is_legal(sq("d7"), sq("d5"), true));
        assert!(!v.is_legal(sq("d7"), sq("d8"), true));
    }

    #[test]
    fn pawns_cannot_double_step_away_from_their_starting_row() {
        let b = board("4k3/8/8/8/8/4P3/8/4K3");
        let v = MoveValidator::new(&b, None);
        assert!(v.is_legal(sq("e3"), sq("e4"), true));
        assert!(!v.is_legal(sq("e3"), sq("e5"), true));
    }

    #[test]
    fn pawns_cannot_advance_through_or_onto_pieces() {
        let b = board("4k3/8/8/8/8/4n3/4P3/4K3");
        let v = MoveValidator::new(&b, None);
        assert!(!v.is_legal(sq("e2"), sq("e3"), true));
        assert!(!v.is_legal(sq("e2"), sq("e4"), true));
    }

    #[test]
    fn pawns_capture_diagonally_only_onto_enemies() {
        let b = board("4k3/8/8/8/8/3n1N2/4P3/4K3");
        let v = MoveValidator::new(&b, None);
        assert!(v.is_legal(sq("e2"), sq("d3"), true));
        assert!(!v.is_legal(sq("e2"), sq("f3"), true));
        assert!(!v.is_legal(sq("e2"), sq("f1"), true));
    }

    #[test]
    fn pawns_capture_en_passant_right_after_a_double_step() {
        let b = board("4k3/8/8/3pP3/8/8/8/4K3");
        let last = Move(sq("d7"), sq("d5"));
        let v = MoveValidator::new(&b, Some(last));
        assert!(v.is_legal(sq("e5"), sq("d6"), true));
        assert_eq!(v.en_passant(sq("e5"), sq("d6")), Some(sq("d5")));
        assert!(!v.is_legal(sq("e5"), sq("f6"), true));
    }

    #[test]
    fn en_passant_expires_after_any_other_move() {
        let b = board("4k3/8/8/3pP3/8/8/8/4K3");
        let last = Move(sq("d6"), sq("d5"));
        let v = MoveValidator::new(&b, Some(last));
        assert!(!v.is_legal(sq("e5"), sq("d6"), true));
        assert_eq!(v.en_passant(sq("e5"), sq("d6")), None);

        let v = MoveValidator::new(&b, None);
        assert!(!v.is_legal(sq("e5"), sq("d6"), true));
    }

    #[test]
    fn knights_jump_over_pieces() {
        let b = Board::default();
        let v = MoveValidator::new(&b, None);
        assert!(v.is_legal(sq("g1"), sq("f3"), true));
        assert!(v.is_legal(sq("g1"), sq("h3"), true));
        assert!(!v.is_legal(sq("g1"), sq("e2"), true));
        assert!(!v.is_legal(sq("g1"), sq("g3"), true));
    }

    #[test]
    fn sliding_pieces_are_blocked_by_obstructions() {
        let b = Board::default();
        let v = MoveValidator::new(&b, None);
        assert!(!v.is_legal(sq("a1"), sq("a3"), true));
        assert!(!v.is_legal(sq("c1"), sq("e3"), true));
        assert!(!v.is_legal(sq("d1"), sq("d3"), true));
    }

    #[test]
    fn sliding_pieces_move_along_their_lines() {
        let b = board("4k3/8/8/8/3Q4/8/8/R3KB2");
        let v = MoveValidator::new(&b, None);
        assert!(v.is_legal(sq("a1"), sq("a8"), true));
        assert!(v.is_legal(sq("a1"), sq("d1"), true));
        assert!(!v.is_legal(sq("a1"), sq("b2"), true));
        assert!(v.is_legal(sq("f1"), sq("a6"), true));
        assert!(!v.is_legal(sq("f1"), sq("f2"), true));
        assert!(v.is_legal(sq("d4"), sq("h8"), true));
        assert!(v.is_legal(sq("d4"), sq("d8"), true));
        assert!(!v.is_legal(sq("d4"), sq("e6"), true));
    }

    #[test]
    fn kings_step_once_in_any_direction() {
        let b = board("4k3/8/8/8/8/8/8/4K3");
        let v = MoveValidator::new(&b, None);
        assert!(v.is_legal(sq("e1"), sq("d2"), true));
        assert!(v.is_legal(sq("e1"), sq("f1"), true));
        assert!(!v.is_legal(sq("e1"), sq("e3"), true));
    }

    #[test]
    fn kings_never_move_onto_the_opposing_king() {
        let b = board("8/8/8/8/8/8/4k3/4K3");
        let v = MoveValidator::new(&b, None);
        assert!(!v.is_legal(sq("e1"), sq("e2"), false));
        assert!(!v.is_legal(sq("e2"), sq("e1"), false));
    }

    #[test]
    fn moves_that_leave_the_king_in_check_are_rejected() {
        let b = board("4r2k/8/8/8/8/8/4B3/4K3");
        let v = MoveValidator::new(&b, None);
        assert!(!v.is_legal(sq("e2"), sq("d3"), true));
        assert!(v.is_legal(sq("e2"), sq("d3"), false));
        assert!(!v.is_legal(sq("e1"), sq("e2"), true));
    }

    #[test]
    fn kings_cannot_step_into_check() {
        let b = board("3r3k/8/8/8/8/8/8/4K3");
        let v = MoveValidator::new(&b, None);
        assert!(!v.is_legal(sq("e1"), sq("d1"), true));
        assert!(!v.is_legal(sq("e1"), sq("d2"), true));
        assert!(v.is_legal(sq("e1"), sq("f2"), true));
    }

    #[test]
    fn en_passant_cannot_expose_the_king_along_the_row() {
        let b = board("7k/8/8/K2pP2r/8/8/8/8");
        let last = Move(sq("d7"), sq("d5"));
        let v = MoveValidator::new(&b, Some(last));
        assert!(!v.is_legal(sq("e5"), sq("d6"), true));
        assert!(v.is_legal(sq("e5"), sq("e6"), true));
    }

    #[test]
    fn queen_rush_lets_any_piece_move_like_a_queen() {
        let b = Board::default();
        let v = MoveValidator::new(&b, None).with_queen_rush(Color::White);
        assert!(v.is_legal(sq("e2"), sq("e5"), true));
        assert!(v.is_legal(sq("e2"), sq("a6"), true));
        assert!(!v.is_legal(sq("g1"), sq("f3"), true));
        assert!(v.is_legal(sq("d7"), sq("d5"), true));
        assert!(!v.is_legal(sq("d7"), sq("d4"), true));
    }

    #[test]
    fn destinations_exclude_protected_squares() {
        let b = board("4k3/8/8/8/8/3b4/4P3/4K3");
        let v = MoveValidator::new(&b, None);
        assert!(v.destinations(sq("e2")).contains(sq("d3")));

        let v = v.with_protected(sq("d3").bitboard());
        assert!(!v.destinations(sq("e2")).contains(sq("d3")));
        assert!(v.destinations(sq("e2")).contains(sq("e4")));
    }

    #[test]
    fn destinations_exclude_en_passant_captures_of_protected_pawns() {
        let b = board("4k3/8/8/3pP3/8/8/8/4K3");
        let v = MoveValidator::new(&b, Some(Move(sq("d7"), sq("d5"))));
        assert!(v.destinations(sq("e5")).contains(sq("d6")));

        let v = v.with_protected(sq("d5").bitboard());
        assert_eq!(v.destinations(sq("e5")), sq("e6").bitboard());
    }

    #[proptest]
    fn empty_squares_have_no_moves(whence: Square, whither: Square) {
        let b = Board::empty();
        assert!(!MoveValidator::new(&b, None).is_legal(whence, whither, false));
    }

    #[proptest]
    fn pieces_never_capture_their_own_color(b: Board, whence: Square, whither: Square) {
        if let (Some(p), Some(q)) = (b[whence], b[whither]) {
            if p.color() == q.color() {
                assert!(!MoveValidator::new(&b, None).is_legal(whence, whither, false));
            }
        }
    }

    #[proptest]
    fn knights_move_regardless_of_obstructions(
        c: Color,
        whence: Square,
        #[filter({ let (r, f) = #whence.delta(#whither); matches!((r.abs(), f.abs()), (2, 1) | (1, 2)) })]
        whither: Square,
    ) {
        let mut b = Board::empty();
        for sq in Square::iter() {
            b[sq] = Some(Piece(c, Role::Pawn));
        }

        b[whence] = Some(Piece(c, Role::Knight));
        b[whither] = None;
        assert!(MoveValidator::new(&b, None).is_legal(whence, whither, false));
    }

    #[proptest]
    fn legal_moves_never_leave_the_king_in_check(b: Board, whence: Square, whither: Square) {
        let v = MoveValidator::new(&b, None);
        if let Some(p) = b[whence] {
            if b.king(p.color()).is_some() && v.is_legal(whence, whither, true) {
                let mut next = b;
                next.relocate(whence, whither);
                let v = MoveValidator::new(&next, Some(Move(whence, whither)));
                assert!(!CheckDetector::new(v).is_in_check(p.color()));
            }
        }
    }

    #[proptest]
    fn validation_never_mutates_the_board(b: Board, whence: Square, whither: Square) {
        let before = b;
        MoveValidator::new(&b, None).is_legal(whence, whither, true);
        assert_eq!(b, before);
    }
}
