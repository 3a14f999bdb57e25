use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    history::DefaultHistory,
    Cmd, Context as ReadlineContext, Editor, Helper, Highlighter, Hinter, KeyEvent, Validator,
};
use tracing::debug;

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output::{hint as output_hint, info as output_info};
use crate::config::Config;
use crate::core::filter::ALL_CATEGORIES;

/// Set to read commands from stdin without prompts or line editing.
pub const SCRIPT_ENV: &str = "EXPENSE_TRACKER_CLI_SCRIPT";

const FILTER_KEYS: &[&str] = &["category", "from", "to"];
const DATE_BOUND_VALUES: &[&str] = &["none"];
const CONFIG_ACTIONS: &[&str] = &["show", "set"];

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    debug!(?mode, expenses = context.book.len(), "shell started");

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<ShellHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(ShellHelper::new(context)));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    context.render_dashboard();
    output_hint("Type `help` for commands, `add` to record an expense.");

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line).ok();
                if !execute(context, line)? {
                    break;
                }
                // Adds and deletes change which categories are worth completing.
                if let Some(helper) = editor.helper_mut() {
                    helper.categories = context.known_categories();
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        if !context.running || !execute(context, &line?)? {
            break;
        }
    }
    Ok(())
}

/// Runs one input line; returns `false` once the shell should stop.
fn execute(context: &mut ShellContext, line: &str) -> Result<bool, CliError> {
    match handle_line(context, line) {
        Ok(LoopControl::Continue) => Ok(true),
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(false)
        }
        Err(err) => {
            context.report_error(err)?;
            Ok(true)
        }
    }
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.print_warning(&format!("Could not read command: {err}"));
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };

    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.dispatch(&raw.to_lowercase(), raw, &args)
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, shell_words::ParseError> {
    shell_words::split(input)
}

/// Line-editor helper completing commands, filter keys, categories, and config keys.
#[derive(Helper, Hinter, Highlighter, Validator)]
struct ShellHelper {
    commands: Vec<&'static str>,
    categories: Vec<String>,
}

impl ShellHelper {
    fn new(context: &ShellContext) -> Self {
        Self {
            commands: context.command_names(),
            categories: context.known_categories(),
        }
    }

    /// Returns where the word under the cursor starts and its replacements.
    fn candidates(&self, line: &str) -> (usize, Vec<String>) {
        let start = line
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let word = line[start..].trim_start_matches('"');
        let lowered: Vec<String> = line[..start]
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        let before: Vec<&str> = lowered.iter().map(String::as_str).collect();

        let options: Vec<String> = match before.as_slice() {
            [] | ["help"] => to_owned(&self.commands),
            ["add", _amount] => self.categories.clone(),
            ["config"] => to_owned(CONFIG_ACTIONS),
            ["config", "set"] => to_owned(Config::KEYS),
            ["filter", pairs @ ..] => self.filter_options(pairs),
            _ => Vec::new(),
        };

        let needle = word.to_lowercase();
        let matches = options
            .into_iter()
            .filter(|option| option.to_lowercase().starts_with(&needle))
            .map(|option| quote_if_spaced(&option))
            .collect();
        (start, matches)
    }

    /// `filter` takes key/value pairs: odd positions are keys, even ones values.
    fn filter_options(&self, pairs: &[&str]) -> Vec<String> {
        if pairs.len() % 2 == 0 {
            return to_owned(FILTER_KEYS);
        }
        match pairs.last() {
            Some(&"category") => {
                let mut names = self.categories.clone();
                names.push(ALL_CATEGORIES.to_string());
                names
            }
            Some(&"from") | Some(&"to") => to_owned(DATE_BOUND_VALUES),
            _ => Vec::new(),
        }
    }
}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|replacement| Pair {
                display: replacement.trim_matches('"').to_string(),
                replacement,
            })
            .collect();
        Ok((start, pairs))
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn quote_if_spaced(value: &str) -> String {
    if value.contains(char::is_whitespace) {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> ShellHelper {
        ShellHelper {
            commands: vec!["add", "delete", "filter", "clear-filters", "config", "help"],
            categories: vec!["Food".into(), "Eating Out".into(), "Travel".into()],
        }
    }

    #[test]
    fn first_word_completes_commands() {
        let helper = helper();
        assert_eq!(
            helper.candidates("c"),
            (0, to_owned(&["clear-filters", "config"]))
        );
        assert_eq!(helper.candidates("help de"), (5, to_owned(&["delete"])));
    }

    #[test]
    fn filter_alternates_keys_and_values() {
        let helper = helper();
        assert_eq!(helper.candidates("filter "), (7, to_owned(FILTER_KEYS)));
        assert_eq!(
            helper.candidates("filter category "),
            (16, to_owned(&["Food", "\"Eating Out\"", "Travel", "all"]))
        );
        assert_eq!(
            helper.candidates("filter category fo"),
            (16, to_owned(&["Food"]))
        );
        assert_eq!(helper.candidates("filter from "), (12, to_owned(&["none"])));
        assert_eq!(
            helper.candidates("filter category Food t"),
            (21, to_owned(&["to"]))
        );
    }

    #[test]
    fn add_completes_category_after_amount() {
        let helper = helper();
        assert_eq!(
            helper.candidates("add 12 \"ea"),
            (7, to_owned(&["\"Eating Out\""]))
        );
        assert!(helper.candidates("add 12 Food ").1.is_empty());
        assert!(helper.candidates("delete ").1.is_empty());
    }

    #[test]
    fn config_set_completes_keys() {
        let helper = helper();
        assert_eq!(
            helper.candidates("config s"),
            (7, to_owned(&["show", "set"]))
        );
        assert_eq!(
            helper.candidates("config set cu"),
            (11, to_owned(&["currency"]))
        );
    }

    #[test]
    fn unbalanced_quotes_are_reported() {
        let err = parse_command_line("add 5 \"Food").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
