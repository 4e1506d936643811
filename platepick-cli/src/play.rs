//! Interactive session: spin once, then swap, ban and vote from stdin.
//!
//! Each line of input is one command. Engine and session errors are printed
//! and the loop carries on; only I/O failures end the session early.

use std::io::{BufRead, Write};
use std::str::FromStr;

use platepick_core::{
    PreferenceStore, ScoredVenue, ScoringContext, Session, SessionError, Slot, SpinId, Venue, Vote,
};
use rand_chacha::ChaCha8Rng;

use crate::CliError;
use crate::candidates::load_candidates;
use crate::config::SpinArgs;
use crate::render::{slot_line, write_spin_text};
use crate::spin::open_preferences;

const HELP: &str = "\
commands:
  spin                 pick three new venues
  swap <slot>          replace a pick with the next venue from its pool
  ban <slot>           never show this venue again and refill the slot
  like <slot>          like the venue's categories
  dislike <slot>       dislike the venue's categories
  show                 print the current picks
  help                 print this message
  quit                 end the session
slots: best, gem, wild";

/// One parsed line of interactive input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlayCommand {
    Spin,
    Swap(Slot),
    Ban(Slot),
    Vote(Slot, Vote),
    Show,
    Help,
    Quit,
}

impl FromStr for PlayCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().unwrap_or_default().to_lowercase();
        let argument = words.next();
        if words.next().is_some() {
            return Err(format!("too many arguments in '{s}'"));
        }
        let slot = || {
            argument
                .ok_or_else(|| format!("'{verb}' needs a slot"))
                .and_then(Slot::from_str)
        };
        match verb.as_str() {
            "spin" => Ok(Self::Spin),
            "swap" => slot().map(Self::Swap),
            "ban" => slot().map(Self::Ban),
            "like" | "dislike" => {
                let vote = verb.parse::<Vote>()?;
                slot().map(|slot| Self::Vote(slot, vote))
            }
            "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(format!("unknown command '{s}'; type 'help'")),
        }
    }
}

struct Play<S> {
    session: Session<S>,
    candidates: Vec<Venue>,
    context: ScoringContext,
    rng: ChaCha8Rng,
    spin: Option<SpinId>,
}

impl<S: PreferenceStore> Play<S> {
    fn apply(&mut self, command: PlayCommand, output: &mut dyn Write) -> Result<(), CliError> {
        match command {
            PlayCommand::Spin => self.spin(output),
            PlayCommand::Swap(slot) => {
                let outcome = self
                    .active()
                    .and_then(|id| self.session.swap(id, slot))
                    .map(|pick| slot_line(slot, pick));
                write_outcome(output, outcome)
            }
            PlayCommand::Ban(slot) => {
                let Some(venue) = self.pick(slot).map(|pick| pick.venue.clone()) else {
                    return write_line(output, &format!("nothing to ban in {slot}"));
                };
                let outcome = self
                    .active()
                    .and_then(|id| self.session.ban(id, &venue.id, slot))
                    .map(|pick| format!("banned {}\n{}", venue.name, slot_line(slot, pick)));
                write_outcome(output, outcome)
            }
            PlayCommand::Vote(slot, vote) => {
                let Some(venue) = self.pick(slot).map(|pick| pick.venue.clone()) else {
                    return write_line(output, &format!("nothing to {vote} in {slot}"));
                };
                self.session.vote(&venue, vote);
                write_line(output, &format!("recorded {vote} for {}", venue.name))
            }
            PlayCommand::Show => match self.session.current() {
                Some(spin) => write_spin_text(output, spin),
                None => write_line(output, &SessionError::NoActiveSpin.to_string()),
            },
            PlayCommand::Help => write_line(output, HELP),
            PlayCommand::Quit => Ok(()),
        }
    }

    fn spin(&mut self, output: &mut dyn Write) -> Result<(), CliError> {
        match self
            .session
            .spin(&self.candidates, &self.context, &mut self.rng)
        {
            Ok(spin) => {
                self.spin = Some(spin.id);
                write_spin_text(output, spin)
            }
            Err(err) => write_line(output, &err.to_string()),
        }
    }

    fn active(&self) -> Result<SpinId, SessionError> {
        self.spin.ok_or(SessionError::NoActiveSpin)
    }

    fn pick(&self, slot: Slot) -> Option<&ScoredVenue> {
        self.session.current().and_then(|spin| spin.picks.get(slot))
    }
}

fn write_line(output: &mut dyn Write, line: &str) -> Result<(), CliError> {
    writeln!(output, "{line}").map_err(CliError::WriteOutput)
}

fn write_outcome(
    output: &mut dyn Write,
    outcome: Result<String, SessionError>,
) -> Result<(), CliError> {
    match outcome {
        Ok(line) => write_line(output, &line),
        Err(err) => write_line(output, &err.to_string()),
    }
}

pub(crate) fn run_play(args: SpinArgs) -> Result<(), CliError> {
    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    run_play_with(args, &mut stdin, &mut stdout)
}

/// Run an interactive session reading commands from `input` until `quit` or
/// end of input.
pub(crate) fn run_play_with(
    args: SpinArgs,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let candidates = config.filter().apply(&load_candidates(&config.candidates)?);
    let mut play = Play {
        session: Session::new(open_preferences(&config)),
        candidates,
        context: config.context,
        rng: config.rng(),
        spin: None,
    };

    play.spin(output)?;
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line).map_err(CliError::ReadInput)? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match trimmed.parse::<PlayCommand>() {
            Ok(PlayCommand::Quit) => break,
            Ok(command) => play.apply(command, output)?,
            Err(message) => write_line(output, &message)?,
        }
    }
    Ok(())
}
