//! Result sinks
//!
//! The engine hands a finished [`TournamentState`] to a [`Reporter`]; how it
//! is rendered or persisted is up to the implementation.

use std::io::Write;

use crate::error::ReportError;
use crate::tournament::{round_robin_pairs, TournamentState};

const TABLE_TITLE: &str = "Each column shows score earned per round against each other player.";

/// Consumer of a completed tournament
pub trait Reporter {
    fn report(&mut self, state: &TournamentState) -> Result<(), ReportError>;
}

/// Full round-by-round report: every match, then the score table
pub struct TextReport<W: Write> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReport<W> {
    fn report(&mut self, state: &TournamentState) -> Result<(), ReportError> {
        let out = &mut self.out;
        for (i, j) in round_robin_pairs(state.player_count()) {
            writeln!(out, "team {} vs. team {}", state.players[i], state.players[j])?;
            writeln!(out, "{} vs. {}", full(state.results[i][j]), full(state.results[j][i]))?;
            writeln!(out, "{} vs. {}", state.names[i], state.names[j])?;
            writeln!(out, "{}", state.moves[i][j])?;
            writeln!(out, "{}", state.moves[j][i])?;
            writeln!(out)?;
        }

        write!(out, "\n\n\n\t{}\n\n\n", TABLE_TITLE)?;
        write_table(out, state, full, |v| format!("{}", v.trunc() as i64))?;

        // Totals are truncated before averaging, as in the table above
        let n = state.player_count() as f64;
        write!(out, "\n\n Average per round, with team strategy names:\n\n")?;
        for position in 0..state.player_count() {
            writeln!(
                out,
                "player {}: {} points: {}",
                state.players[position],
                full(state.totals[position].trunc() / n),
                state.names[position]
            )?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Shortest round-trip form, always with a fractional part ("-250.0")
fn full(v: f64) -> String {
    format!("{:?}", v)
}

/// Console summary: score table and standings
pub struct SummaryTable<W: Write> {
    out: W,
}

impl<W: Write> SummaryTable<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for SummaryTable<W> {
    fn report(&mut self, state: &TournamentState) -> Result<(), ReportError> {
        let out = &mut self.out;
        write!(out, "\n\n\t{}\n\n", TABLE_TITLE)?;
        let fmt = |v: f64| format!("{:.2}", v);
        write_table(out, state, fmt, fmt)?;

        write!(out, "\n\n Standings (seed {}):\n\n", state.seed)?;
        for (rank, row) in state.standings().iter().enumerate() {
            writeln!(
                out,
                "{:>3}. player {}: {:.2} points: {}",
                rank + 1,
                row.player,
                row.average,
                row.name
            )?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Machine-readable dump of the whole state
pub struct JsonReport<W: Write> {
    out: W,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReport<W> {
    fn report(&mut self, state: &TournamentState) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut self.out, state)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Columns are players, rows are opponents, closed by a `Total:` row
fn write_table<W: Write>(
    out: &mut W,
    state: &TournamentState,
    cell: impl Fn(f64) -> String,
    total: impl Fn(f64) -> String,
) -> Result<(), ReportError> {
    let n = state.player_count();
    write!(out, "\t")?;
    for column in 0..n {
        write!(out, "P{}\t", state.players[column])?;
    }
    writeln!(out)?;

    for row in 0..n {
        write!(out, "P{}\t", state.players[row])?;
        for column in 0..n {
            write!(out, "{}\t", cell(state.results[column][row]))?;
        }
        writeln!(out)?;
    }

    write!(out, "Total:\t")?;
    for column in 0..n {
        write!(out, "{}\t", total(state.totals[column]))?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{StrategyBase, StrategySpec};
    use crate::config::TournamentConfig;
    use crate::game::RoundConfig;
    use crate::registry::StrategyRegistry;
    use crate::tournament::run_tournament;

    fn small_tournament() -> TournamentState {
        let specs: Vec<_> = [StrategyBase::Loyal, StrategyBase::Backstabber]
            .into_iter()
            .map(StrategySpec::new)
            .collect();
        let registry = StrategyRegistry::from_specs(&specs);
        let config = TournamentConfig {
            rounds: RoundConfig::fixed(3),
            seed: Some(1),
            ..Default::default()
        };
        run_tournament(&registry, &[0, 1], &config).unwrap()
    }

    #[test]
    fn test_text_report_layout() {
        let mut reporter = TextReport::new(Vec::new());
        reporter.report(&small_tournament()).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();

        let expected_match = "team 1 vs. team 0\n100.0 vs. -500.0\nBackstabber vs. Loyal\nbbb\nccc\n\n";
        assert!(text.starts_with(expected_match), "got:\n{}", text);
        assert!(text.contains(TABLE_TITLE));
        assert!(text.contains("\tP0\tP1\t\n"));
        // column P0 is Loyal: it earned -500 per round against P1
        assert!(text.contains("P0\t0.0\t100.0\t\n"));
        assert!(text.contains("P1\t-500.0\t0.0\t\n"));
        assert!(text.contains("Total:\t-500\t100\t\n"));
        assert!(text.contains("player 0: -250.0 points: Loyal\n"));
        assert!(text.contains("player 1: 50.0 points: Backstabber\n"));
    }

    #[test]
    fn test_text_report_keeps_precision_and_truncates_totals() {
        let mut state = small_tournament();
        state.results[1][0] = 100.0 / 3.0;
        state.totals[1] = 100.0 / 3.0;
        state.totals[0] = -500.75;

        let mut reporter = TextReport::new(Vec::new());
        reporter.report(&state).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();

        assert!(text.contains("33.333333333333336 vs. -500.0\n"), "got:\n{}", text);
        assert!(text.contains("Total:\t-500\t33\t\n"));
        assert!(text.contains("player 0: -250.0 points: Loyal\n"));
        assert!(text.contains("player 1: 16.5 points: Backstabber\n"));
    }

    #[test]
    fn test_summary_lists_winner_first() {
        let mut reporter = SummaryTable::new(Vec::new());
        reporter.report(&small_tournament()).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();

        assert!(text.contains("Total:\t-500.00\t100.00\t\n"));
        let first = text.find("  1. player 1").unwrap();
        let second = text.find("  2. player 0").unwrap();
        assert!(first < second);
        assert!(text.contains("Standings (seed 1)"));
    }

    #[test]
    fn test_json_report_round_trips_state() {
        let state = small_tournament();
        let mut reporter = JsonReport::new(Vec::new());
        reporter.report(&state).unwrap();
        let back: TournamentState = serde_json::from_slice(&reporter.into_inner()).unwrap();
        assert_eq!(back, state);
        assert_eq!(back.moves[0][1].to_string(), "ccc");
    }
}
