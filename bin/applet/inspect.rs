use anyhow::Error as Anyhow;
use clap::Parser;
use derive_more::Display;
use lib::chess::{Board, CheckDetector, Color, MoveValidator};
use lib::game::Outcome;
use tracing::{info, instrument};

/// Reports check, checkmate and stalemate for a placement of pieces.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Inspect {
    /// The side to move.
    #[clap(short, long, default_value_t = Color::White)]
    turn: Color,

    /// The piece placement in FEN notation.
    placement: Board,
}

#[derive(Debug, Display, Copy, Clone, Eq, PartialEq)]
#[display(fmt = "{side}: check: {check}, checkmate: {checkmate}, stalemate: {stalemate}")]
struct Report {
    side: Color,
    check: bool,
    checkmate: bool,
    stalemate: bool,
}

impl Report {
    fn new(board: &Board, side: Color) -> Self {
        let detector = CheckDetector::new(MoveValidator::new(board, None));
        Report {
            side,
            check: detector.is_in_check(side),
            checkmate: detector.is_checkmate(side),
            stalemate: detector.is_stalemate(side),
        }
    }

    fn outcome(&self) -> Option<Outcome> {
        if self.checkmate {
            Some(Outcome::Checkmate(!self.side))
        } else if self.stalemate {
            Some(Outcome::Stalemate)
        } else {
            None
        }
    }
}

impl Inspect {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        for side in Color::ALL {
            let report = Report::new(&self.placement, side);
            info!(%report);
            println!("{report}");
        }

        match Report::new(&self.placement, self.turn).outcome() {
            Some(outcome) => println!("{outcome}"),
            None => println!("{} to move", self.turn),
        }

        Ok(())
    }
}
