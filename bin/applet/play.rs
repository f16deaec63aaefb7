use crate::{clock::Clock, io::Io};
use anyhow::{bail, Context, Error as Anyhow};
use clap::Parser;
use lib::chess::{Color, Role, Square};
use lib::game::{Event, Game, Phase, Rejection, Reset, Selection, Settings};
use lib::power::Power;
use std::io::{stdin, stdout, Read, Write};
use std::{fmt::Write as _, str::FromStr, time::Instant};
use tracing::{info, instrument, warn};

/// Plays a game between two people sharing the terminal.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// Game settings in RON notation.
    #[clap(short, long, default_value_t)]
    settings: Settings,
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let io = Io::new(stdout(), stdin());
        Session::new(self.settings, io).run()
    }
}

/// A line of user input.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Command {
    Start,
    Select(Square),
    Move(Square, Square),
    Power(Power, Option<Square>),
    Combo,
    Promote(Role),
    Resign,
    Rematch,
    Setup,
    Board,
    Quit,
}

impl FromStr for Command {
    type Err = Anyhow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut args = s.split_whitespace();
        let Some(name) = args.next() else {
            bail!("expected a command");
        };

        let mut square = || -> Result<Square, Anyhow> {
            let arg = args.next().context("expected a square")?;
            Ok(arg.parse::<Square>().with_context(|| format!("invalid square `{arg}`"))?)
        };

        let cmd = match name {
            "start" => Command::Start,
            "select" => Command::Select(square()?),
            "move" => Command::Move(square()?, square()?),
            "combo" => Command::Combo,
            "resign" => Command::Resign,
            "rematch" => Command::Rematch,
            "setup" => Command::Setup,
            "board" => Command::Board,
            "quit" => Command::Quit,

            "power" => {
                let power = args.next().context("expected a power")?.parse()?;
                let target = match args.next() {
                    None => None,
                    Some(arg) => Some(arg.parse::<Square>().with_context(|| format!("invalid square `{arg}`"))?),
                };

                Command::Power(power, target)
            }

            "promote" => {
                let arg = args.next().context("expected a piece")?;
                let role = Role::from_str(arg).with_context(|| format!("invalid piece `{arg}`"))?;
                Command::Promote(role)
            }

            _ => bail!("unknown command `{name}`"),
        };

        match args.next() {
            None => Ok(cmd),
            Some(arg) => bail!("unexpected argument `{arg}`"),
        }
    }
}

/// An interactive game over a terminal.
struct Session<W: Write, R: Read> {
    game: Game,
    clock: Clock,
    io: Io<W, R>,
}

impl<W: Write, R: Read> Session<W, R> {
    fn new(settings: Settings, io: Io<W, R>) -> Self {
        Session {
            game: Game::new(settings),
            clock: Clock::new(settings.time_limit),
            io,
        }
    }

    fn run(&mut self) -> Result<(), Anyhow> {
        self.io.send("type `start` to begin")?;

        loop {
            self.io.prompt(format_args!("{}> ", self.status()))?;
            let Some(line) = self.io.recv()? else {
                break Ok(());
            };

            if line.trim().is_empty() {
                continue;
            }

            let now = Instant::now();
            self.enforce_time(now)?;

            match line.parse() {
                Ok(Command::Quit) => break Ok(()),
                Ok(cmd) => match self.execute(cmd, now) {
                    Ok(reply) => self.io.send(reply)?,
                    Err(rejection) => {
                        warn!(%rejection);
                        self.io.send(format_args!("rejected: {rejection}"))?
                    }
                },

                Err(e) => self.io.send(format_args!("error: {e:#}"))?,
            }

            self.announce()?;
            self.sync_clock(now);
        }
    }

    fn execute(&mut self, cmd: Command, now: Instant) -> Result<String, Rejection> {
        let side = self.game.turn();

        let reply = match cmd {
            Command::Start => {
                self.game.start()?;
                self.clock = Clock::new(self.game.settings().time_limit);
                self.render()
            }

            Command::Select(sq) => match self.game.select_square(sq)? {
                Selection::Selected(sq) => {
                    let targets: Vec<_> =
                        self.game.destinations(sq).into_iter().map(|t| t.to_string()).collect();
                    format!("selected {sq}, destinations: [{}]", targets.join(", "))
                }

                selection => selection.to_string(),
            },

            Command::Move(whence, whither) => self.game.attempt_move(whence, whither)?.to_string(),
            Command::Power(power, target) => {
                self.game.activate(side, power, target)?;
                format!("{power} activated, energy {}", self.game.energy(side))
            }

            Command::Combo => {
                self.game.activate(side, Power::Combo, None)?;
                format!("combo activated, energy {}", self.game.energy(side))
            }

            Command::Promote(role) => {
                self.game.promote(role)?;
                self.render()
            }

            Command::Resign => {
                self.game.resign(side)?;
                "resigned".to_string()
            }

            Command::Rematch | Command::Setup => {
                let mode = match cmd {
                    Command::Rematch => Reset::Rematch,
                    _ => Reset::ToSetup,
                };

                self.game.reset(mode)?;
                self.clock = Clock::new(self.game.settings().time_limit);
                self.render()
            }

            Command::Board => self.render(),
            Command::Quit => String::new(),
        };

        info!(%side, ?cmd, elapsed = ?now.elapsed());
        Ok(reply)
    }

    /// Ends the game if the side to move ran out of time.
    fn enforce_time(&mut self, now: Instant) -> Result<(), Anyhow> {
        if self.game.phase() != Phase::Playing {
            return Ok(());
        }

        if let Some(side) = self.clock.flagged(now) {
            self.game.timeout(side)?;
            self.announce()?;
            self.clock.stop(now);
        }

        Ok(())
    }

    fn sync_clock(&mut self, now: Instant) {
        match self.game.phase() {
            Phase::Playing => self.clock.start(self.game.turn(), now),
            Phase::Setup | Phase::Ended => self.clock.stop(now),
        }
    }

    fn announce(&mut self) -> Result<(), Anyhow> {
        let mut lines = Vec::new();
        self.game.dispatch(&mut |e: &Event| {
            info!(event = %e);
            lines.push(e.to_string());
        });

        for line in lines {
            self.io.send(line)?;
        }

        Ok(())
    }

    fn status(&self) -> String {
        match self.game.phase() {
            Phase::Playing => match self.game.pending_promotion() {
                Some(sq) => format!("{} promotes {sq}", self.game.turn()),
                None => self.game.turn().to_string(),
            },

            phase => phase.to_string(),
        }
    }

    /// Draws the board with white at the bottom, followed by the state of each side.
    fn render(&self) -> String {
        let board = self.game.board();
        let mut out = String::new();

        for row in 0..8 {
            let _ = write!(out, "{} ", 8 - row);
            for col in 0..8 {
                let cell = board[Square::new(row, col)].map_or('.', |p| p.letter());
                let _ = write!(out, " {cell}");
            }

            out.push('\n');
        }

        out.push_str("   a b c d e f g h\n");

        let now = Instant::now();
        for side in Color::ALL {
            let shielded: Vec<_> =
                self.game.powers(side).shielded().into_iter().map(|sq| sq.to_string()).collect();

            let _ = writeln!(
                out,
                "{side}: energy {}, {}, mood {}, clock {:?}, shields [{}]",
                self.game.energy(side),
                self.game.stats(side),
                self.game.mood(side),
                self.clock.remaining(side, now),
                shielded.join(", "),
            );
        }

        if let Some(m) = self.game.last_move() {
            let _ = write!(out, "last move: {m}");
        } else {
            let _ = write!(out, "{} to move", self.game.turn());
        }

        out
    }
}
