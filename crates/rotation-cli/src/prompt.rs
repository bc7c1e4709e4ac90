//! Interactive week choice and the final acknowledgment pause.

use std::io::{self, BufRead, IsTerminal, Write};

use chrono::NaiveDate;
use tracing::warn;

/// Weeks listed at the prompt.
const LISTED_WEEKS: usize = 8;

/// Parses a `dd/mm/yyyy` week start.
pub fn parse_week_input(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%d/%m/%Y").ok()
}

/// `clap` value parser for `--week`.
pub fn parse_week_arg(value: &str) -> Result<NaiveDate, String> {
    parse_week_input(value).ok_or_else(|| format!("expected dd/mm/yyyy, got '{value}'"))
}

/// True when both stdin and stderr are attached to a terminal.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}

/// Lists the available weeks and reads one answer.
///
/// An empty or unreadable answer means "latest week" (`None`).
pub fn prompt_week<R: BufRead, W: Write>(
    weeks: &[NaiveDate],
    mut input: R,
    mut output: W,
) -> io::Result<Option<NaiveDate>> {
    if weeks.is_empty() {
        return Ok(None);
    }
    writeln!(output, "Weeks in the sales extract:")?;
    for week in weeks.iter().take(LISTED_WEEKS) {
        writeln!(output, "  {}", week.format("%d/%m/%Y"))?;
    }
    write!(output, "Week start (dd/mm/yyyy), Enter for the latest: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    if line.trim().is_empty() {
        return Ok(None);
    }
    let parsed = parse_week_input(&line);
    if parsed.is_none() {
        warn!(input = line.trim(), "week not understood; using the latest week");
    }
    Ok(parsed)
}

/// Waits for Enter so a double-clicked console stays open.
pub fn wait_for_ack() {
    eprint!("Press Enter to exit...");
    let _ = io::stderr().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_day_first() {
        assert_eq!(parse_week_input(" 04/03/2024\n"), Some(date(2024, 3, 4)));
        assert_eq!(parse_week_input("2024-03-04"), None);
        assert!(parse_week_arg("31/02/2024").is_err());
    }

    #[test]
    fn prompt_reads_one_answer() {
        let weeks = [date(2024, 3, 4), date(2024, 2, 26)];
        let mut shown = Vec::new();
        let answer = prompt_week(&weeks, "26/02/2024\n".as_bytes(), &mut shown).unwrap();
        assert_eq!(answer, Some(date(2024, 2, 26)));
        let shown = String::from_utf8(shown).unwrap();
        assert!(shown.contains("  04/03/2024\n  26/02/2024\n"));
    }

    #[test]
    fn blank_or_garbage_means_latest() {
        let weeks = [date(2024, 3, 4)];
        assert_eq!(prompt_week(&weeks, "\n".as_bytes(), io::sink()).unwrap(), None);
        assert_eq!(prompt_week(&weeks, "next week\n".as_bytes(), io::sink()).unwrap(), None);
        assert_eq!(prompt_week(&[], "04/03/2024\n".as_bytes(), io::sink()).unwrap(), None);
    }
}
