//! Command loop: an interactive rustyline shell, a script mode driven by
//! stdin, and a one-shot mode for a single command passed as arguments.

use std::io::{self, BufRead};

use chrono::{Local, NaiveDate, NaiveDateTime};
use dialoguer::{theme::ColorfulTheme, Confirm};
use once_cell::sync::Lazy;
use rustyline::{error::ReadlineError, DefaultEditor};
use strsim::levenshtein;
use uuid::Uuid;

use crate::{
    core::UserManager,
    errors::WaterlogError,
    services::SummaryService,
    settings::SettingsManager,
    storage::JsonStorage,
};

use super::{output, CliError};

const SCRIPT_ENV: &str = "WATERLOG_CLI_SCRIPT";
const PROMPT: &str = "waterlog> ";
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Command table used for dispatch, help, and suggestions.
static COMMANDS: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("add", "add <amount> [date or datetime] - log an entry in oz"),
        ("undo", "undo - remove the entry logged last in this session"),
        ("remove", "remove <id> - delete an entry by id"),
        ("today", "today - total logged today against the goal"),
        ("history", "history - day-grouped entries, most recent first"),
        ("week", "week - totals for the current week, Sunday first"),
        ("goal", "goal [value] - show or set the daily goal"),
        ("presets", "presets [a b c] - show or set the preset amounts"),
        ("backups", "backups - list user file backups"),
        ("help", "help - show this list"),
        ("exit", "exit - leave the shell"),
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    manager: UserManager,
    settings: SettingsManager,
    interactive: bool,
}

/// Entry point used by the binary. Command-line arguments select one-shot
/// mode; otherwise the `WATERLOG_CLI_SCRIPT` env var selects script mode
/// over the interactive shell.
pub fn run_cli() -> Result<(), CliError> {
    let storage = JsonStorage::new_default()?;
    let manager = UserManager::new(Box::new(storage));
    let settings = SettingsManager::new()?;
    let mut context = ShellContext {
        manager,
        settings,
        interactive: false,
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return context.dispatch(&args).map(|_| ());
    }

    if std::env::var_os(SCRIPT_ENV).is_some() {
        context.run_script()
    } else {
        context.interactive = true;
        context.run_interactive()
    }
}

impl ShellContext {
    fn run_interactive(&mut self) -> Result<(), CliError> {
        let mut editor = DefaultEditor::new()?;
        output::section("waterlog");
        output::info("Type `help` for commands.");

        loop {
            match editor.readline(PROMPT) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    editor.add_history_entry(trimmed).ok();
                    match self.handle_line(trimmed) {
                        Ok(LoopControl::Continue) => {}
                        Ok(LoopControl::Exit) => break,
                        Err(err) => output::error(err),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    output::info("Exiting shell.");
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    fn run_script(&mut self) -> Result<(), CliError> {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line.map_err(WaterlogError::from)?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match self.handle_line(trimmed) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(err) => output::error(err),
            }
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Result<LoopControl, CliError> {
        let tokens = shell_words::split(line)
            .map_err(|err| WaterlogError::Validation(format!("could not parse line: {err}")))?;
        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }
        self.dispatch(&tokens)
    }

    fn dispatch(&mut self, args: &[String]) -> Result<LoopControl, CliError> {
        let Some((command, rest)) = args.split_first() else {
            return Ok(LoopControl::Continue);
        };
        match command.as_str() {
            "add" => self.cmd_add(rest)?,
            "undo" => self.cmd_undo()?,
            "remove" => self.cmd_remove(rest)?,
            "today" => self.cmd_today()?,
            "history" => self.cmd_history()?,
            "week" => self.cmd_week()?,
            "goal" => self.cmd_goal(rest)?,
            "presets" => self.cmd_presets(rest)?,
            "backups" => self.cmd_backups()?,
            "help" => cmd_help(),
            "exit" | "quit" => return Ok(LoopControl::Exit),
            unknown => report_unknown(unknown),
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_add(&mut self, args: &[String]) -> Result<(), CliError> {
        let Some(raw_amount) = args.first() else {
            return Err(WaterlogError::Validation("usage: add <amount> [date or datetime]".into()).into());
        };
        let amount = parse_amount(raw_amount)?;
        let timestamp = match args.get(1) {
            Some(raw) => Some(parse_timestamp(raw)?),
            None => None,
        };
        let entry = self.manager.add_entry(amount, timestamp)?;
        output::success(format!(
            "Logged {:.1} oz at {} (id {}).",
            entry.amount,
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.id
        ));
        Ok(())
    }

    fn cmd_undo(&mut self) -> Result<(), CliError> {
        let entry = self.manager.undo_last()?;
        output::success(format!("Removed last entry of {:.1} oz.", entry.amount));
        Ok(())
    }

    fn cmd_remove(&mut self, args: &[String]) -> Result<(), CliError> {
        let Some(raw) = args.first() else {
            return Err(WaterlogError::Validation("usage: remove <id>".into()).into());
        };
        let id = Uuid::parse_str(raw)
            .map_err(|_| WaterlogError::Validation(format!("`{raw}` is not an entry id")))?;
        if self.interactive {
            let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("Delete entry {id}?"))
                .default(false)
                .interact()?;
            if !confirmed {
                output::info("Kept the entry.");
                return Ok(());
            }
        }
        let removed = self.manager.remove_entry(id)?;
        output::success(format!("Removed entry of {:.1} oz.", removed.amount));
        Ok(())
    }

    fn cmd_today(&mut self) -> Result<(), CliError> {
        let settings = self.settings.load()?;
        let user = self.manager.user()?;
        let total = SummaryService::today_total(user);
        let progress = SummaryService::today_progress(user, settings.goal);
        output::info(format!(
            "Today: {:.1} oz of {:.1} oz goal ({:.0}%).",
            total,
            settings.goal,
            progress * 100.0
        ));
        Ok(())
    }

    fn cmd_history(&mut self) -> Result<(), CliError> {
        let user = self.manager.user()?;
        let buckets = SummaryService::history(user);
        if buckets.is_empty() {
            output::info("No entries logged yet.");
            return Ok(());
        }
        for bucket in buckets {
            output::section(format!(
                "{} - {:.1} oz",
                bucket.date.format("%Y-%m-%d"),
                bucket.total()
            ));
            for entry in &bucket.entries {
                output::info(format!(
                    "  {}  {:>6.1} oz  {}",
                    entry.timestamp.format("%H:%M"),
                    entry.amount,
                    entry.id
                ));
            }
        }
        Ok(())
    }

    fn cmd_week(&mut self) -> Result<(), CliError> {
        let user = self.manager.user()?;
        let totals = SummaryService::week_totals(user, Local::now().date_naive());
        output::section("This week");
        for (label, total) in WEEKDAYS.iter().zip(totals.iter()) {
            output::info(format!("  {label}  {total:>6.1} oz"));
        }
        Ok(())
    }

    fn cmd_goal(&mut self, args: &[String]) -> Result<(), CliError> {
        match args.first() {
            None => {
                let settings = self.settings.load()?;
                output::info(format!("Daily goal: {:.1} oz.", settings.goal));
            }
            Some(raw) => {
                let settings = self.settings.set_goal(parse_amount(raw)?)?;
                output::success(format!("Daily goal set to {:.1} oz.", settings.goal));
            }
        }
        Ok(())
    }

    fn cmd_presets(&mut self, args: &[String]) -> Result<(), CliError> {
        match args {
            [] => {
                let settings = self.settings.load()?;
                let [small, medium, large] = settings.presets;
                output::info(format!(
                    "Presets: {small:.1} oz / {medium:.1} oz / {large:.1} oz."
                ));
            }
            [a, b, c] => {
                let presets = [parse_amount(a)?, parse_amount(b)?, parse_amount(c)?];
                self.settings.set_presets(presets)?;
                output::success("Presets updated.");
            }
            _ => {
                return Err(WaterlogError::Validation("usage: presets [small medium large]".into()).into())
            }
        }
        Ok(())
    }

    fn cmd_backups(&mut self) -> Result<(), CliError> {
        let backups = self.manager.storage().list_backups()?;
        if backups.is_empty() {
            output::info("No backups yet.");
            return Ok(());
        }
        for name in backups {
            output::info(format!("  {name}"));
        }
        Ok(())
    }
}

fn cmd_help() {
    output::section("Commands");
    for (_, description) in COMMANDS.iter() {
        output::info(format!("  {description}"));
    }
}

fn report_unknown(command: &str) {
    output::warn(format!("Unknown command `{command}`."));
    let suggestion = COMMANDS
        .iter()
        .map(|(name, _)| *name)
        .min_by_key(|name| levenshtein(command, name));
    if let Some(name) = suggestion {
        if levenshtein(command, name) <= 2 {
            output::info(format!("Did you mean `{name}`?"));
        }
    }
}

fn parse_amount(raw: &str) -> Result<f64, WaterlogError> {
    raw.parse::<f64>()
        .map_err(|_| WaterlogError::Validation(format!("`{raw}` is not a number")))
}

/// Accepts `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM`, or a bare date
/// (taken as midnight). Anything else is a validation error, never
/// silently corrected.
fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, WaterlogError> {
    if let Ok(value) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(value);
    }
    if let Ok(value) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M") {
        return Ok(value);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(value) = date.and_hms_opt(0, 0, 0) {
            return Ok(value);
        }
    }
    Err(WaterlogError::Validation(format!(
        "`{raw}` is not a date or datetime"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_parse_in_all_accepted_shapes() {
        assert!(parse_timestamp("2024-03-01T08:30:00").is_ok());
        assert!(parse_timestamp("2024-03-01 08:30").is_ok());
        let midnight = parse_timestamp("2024-03-01").unwrap();
        assert_eq!(midnight.format("%H:%M:%S").to_string(), "00:00:00");
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(WaterlogError::Validation(_))
        ));
    }

    #[test]
    fn amounts_reject_non_numbers() {
        assert_eq!(parse_amount("17.5").unwrap(), 17.5);
        assert!(matches!(
            parse_amount("a-lot"),
            Err(WaterlogError::Validation(_))
        ));
    }
}
