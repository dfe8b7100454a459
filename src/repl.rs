use crate::edgar::quarter::Quarter;
use crate::edgar::query::year_choices;
use crate::edgar::report::ReportType;
use crate::utils::dirs;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config as RustylineConfig, Context, EditMode, Editor, Helper, Result};
use strum::IntoEnumIterator;

pub const COMMANDS: &[&str] = &[
    "ticker", "type", "year", "quarter", "amends", "details", "limit", "show", "fetch", "reset",
    "help", "quit",
];

/// One line typed at the form prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Ticker(String),
    ReportType(ReportType),
    Year(String),
    Quarter(Quarter),
    ToggleAmends,
    ToggleDetails,
    Limit(String),
    Show,
    Fetch,
    Reset,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> std::result::Result<Command, String> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        match name.to_lowercase().as_str() {
            "ticker" => Ok(Command::Ticker(arg.to_string())),
            "type" | "form" => arg.parse().map(Command::ReportType),
            "year" if !arg.is_empty() => Ok(Command::Year(arg.to_string())),
            "year" => Err("Usage: year <YYYY>".to_string()),
            "quarter" => arg.parse().map(Command::Quarter),
            "amends" => Ok(Command::ToggleAmends),
            "details" => Ok(Command::ToggleDetails),
            "limit" => Ok(Command::Limit(arg.to_string())),
            "show" => Ok(Command::Show),
            "fetch" | "submit" => Ok(Command::Fetch),
            "reset" => Ok(Command::Reset),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err("Type 'help' for the list of commands".to_string()),
            other => Err(format!("Unknown command '{}'. Type 'help' for the list of commands", other)),
        }
    }
}

pub fn help_text() -> String {
    format!(
        "Commands:\n  \
         ticker <SYMBOL>   set the ticker (e.g. ticker AAPL)\n  \
         type <FORM>       set the form type ({})\n  \
         year <YYYY>       set the year ({} to {})\n  \
         quarter <Qn>      set the quarter, used for 10-Q only\n  \
         amends            toggle including amendments\n  \
         details           toggle downloading details\n  \
         limit [N]         set the result limit, blank for none\n  \
         show              print the form\n  \
         fetch             submit the search\n  \
         reset             restore the default form\n  \
         quit              leave",
        ReportType::list_types(),
        year_choices().last().cloned().unwrap_or_default(),
        year_choices().first().cloned().unwrap_or_default(),
    )
}

pub struct FormHelper;

impl FormHelper {
    fn candidates(command: &str, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        let options: Vec<String> = match command {
            "" => COMMANDS.iter().map(|c| c.to_string()).collect(),
            "type" | "form" => ReportType::iter().map(|t| t.to_string()).collect(),
            "quarter" => Quarter::iter().map(|q| q.to_string()).collect(),
            "year" => year_choices(),
            _ => Vec::new(),
        };
        options
            .into_iter()
            .filter(|o| o.to_lowercase().starts_with(&prefix))
            .collect()
    }
}

impl Completer for FormHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Result<(usize, Vec<Pair>)> {
        let typed = &line[..pos];
        let (start, command, prefix) = match typed.find(char::is_whitespace) {
            Some(split) => {
                let arg_start = split + (typed[split..].len() - typed[split..].trim_start().len());
                (arg_start, typed[..split].to_lowercase(), &typed[arg_start..])
            }
            None => (0, String::new(), typed),
        };

        let candidates = Self::candidates(&command, prefix)
            .into_iter()
            .map(|c| Pair {
                display: c.clone(),
                replacement: c,
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for FormHelper {
    type Hint = String;
}

impl Highlighter for FormHelper {}

impl Validator for FormHelper {}

impl Helper for FormHelper {}

pub type FormEditor = Editor<FormHelper, FileHistory>;

pub fn create_editor() -> Result<FormEditor> {
    log::debug!("Creating rustyline editor configuration");
    let rustyline_config = RustylineConfig::builder()
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .auto_add_history(true)
        .build();

    let mut rl = FormEditor::with_config(rustyline_config)?;

    if rl.load_history(&dirs::history_path()).is_err() {
        log::debug!("No previous history file found");
    } else {
        log::debug!("History loaded successfully");
    }

    rl.set_helper(Some(FormHelper));
    Ok(rl)
}

pub fn save_history(rl: &mut FormEditor) -> Result<()> {
    rl.save_history(&dirs::history_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_commands() {
        assert_eq!(Command::parse("ticker aapl"), Ok(Command::Ticker("aapl".to_string())));
        assert_eq!(Command::parse("type 10-q"), Ok(Command::ReportType(ReportType::Form10Q)));
        assert_eq!(Command::parse("type SC 13G"), Ok(Command::ReportType(ReportType::FormSC13G)));
        assert_eq!(Command::parse("year 2021"), Ok(Command::Year("2021".to_string())));
        assert_eq!(Command::parse("quarter q3"), Ok(Command::Quarter(Quarter::Q3)));
        assert_eq!(Command::parse("limit"), Ok(Command::Limit(String::new())));
        assert_eq!(Command::parse("  limit 12 "), Ok(Command::Limit("12".to_string())));
        assert_eq!(Command::parse("FETCH"), Ok(Command::Fetch));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Command::parse("year").is_err());
        assert!(Command::parse("type S-1").is_err());
        assert!(Command::parse("quarter Q9").is_err());
        assert!(Command::parse("dance").is_err());
        assert!(Command::parse("").is_err());
    }

    #[test]
    fn completes_commands_and_arguments() {
        assert_eq!(FormHelper::candidates("", "q"), vec!["quarter", "quit"]);
        assert_eq!(FormHelper::candidates("type", "13f"), vec!["13F-NT", "13F-HR"]);
        assert_eq!(FormHelper::candidates("quarter", ""), vec!["Q1", "Q2", "Q3", "Q4"]);
        assert_eq!(FormHelper::candidates("year", "201").len(), 5);
        assert!(FormHelper::candidates("ticker", "A").is_empty());
    }
}
