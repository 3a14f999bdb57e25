//! Core CLI loop, dispatch, and shell context helpers.

use std::{
    io,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::{
    config::ConfigManager,
    core::{
        errors::TrackerError, expense_book::ExpenseBook, filter::ExpenseFilter,
        utils::PathResolver,
    },
    currency::DisplayFormat,
    domain::{Expense, ExpenseDraft},
    presenter::{table::short_id, Dashboard},
    storage::JsonStorage,
};

use super::commands;
use super::forms::ExpenseWizard;
use super::io as cli_io;
use super::output::{current_preferences, section as output_section};
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};
pub use crate::core::errors::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

const PROMPT: &str = "expenses";

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, PathResolver::base_dir())
    }

    /// Opens the book and config stored under `base`.
    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let storage = JsonStorage::new(Some(base.clone()), None)?;
        let config_manager = ConfigManager::with_base_dir(base)?;
        let config = config_manager.load()?;
        cli_io::apply_config(&config);

        let book = ExpenseBook::open(Box::new(storage));
        let dashboard = Dashboard::new(DisplayFormat::from_config(&config));

        let mut app = ShellContext {
            mode,
            registry,
            book,
            filter: ExpenseFilter::default(),
            dashboard,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            running: true,
        };
        app.refresh_view();
        Ok(app)
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub(crate) fn prompt(&self) -> String {
        match &self.filter.category {
            Some(category) => format!("{PROMPT} [{category}]> "),
            None if self.filter.is_active() => format!("{PROMPT} [filtered]> "),
            None => format!("{PROMPT}> "),
        }
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    /// Categories used by stored expenses, then configured suggestions not yet used.
    pub(crate) fn known_categories(&self) -> Vec<String> {
        let mut categories = self.book.categories();
        for preset in &self.config.categories {
            if !categories.contains(preset) {
                categories.push(preset.clone());
            }
        }
        categories
    }

    /// Recomputes the filtered view and regenerates the dashboard from it.
    pub(crate) fn refresh_view(&mut self) {
        let view = self.book.view(&self.filter);
        self.dashboard.refresh(view);
    }

    pub(crate) fn print_table(&self) {
        output_section("Expenses");
        cli_io::print_info(self.dashboard.table().render());
    }

    pub(crate) fn print_stats(&self) {
        output_section("Summary");
        cli_io::print_info(self.dashboard.stats().render());
    }

    pub(crate) fn print_chart(&self) {
        output_section("Chart");
        let plain = current_preferences().is_plain();
        cli_io::print_info(self.dashboard.render_chart(plain));
    }

    /// Refreshes and prints table, stats, and chart.
    pub(crate) fn render_dashboard(&mut self) {
        self.refresh_view();
        if self.filter.is_active() {
            cli_io::print_info(format!("Filter: {}", self.filter));
        }
        self.print_table();
        self.print_stats();
        self.print_chart();
    }

    pub(crate) fn add_expense(&mut self, draft: &ExpenseDraft) -> CommandResult {
        let added = self.book.add(draft)?;
        let message = format!(
            "Added {} for {} on {} (id {}).",
            self.dashboard.format().format_amount(added.amount),
            added.category,
            added.date,
            short_id(&added.id)
        );
        cli_io::print_success(message);
        self.render_dashboard();
        Ok(())
    }

    pub(crate) fn run_add_wizard(&mut self) -> CommandResult {
        let data = {
            let wizard =
                ExpenseWizard::new(&self.theme, &self.config.categories, self.book.today());
            wizard.run()?
        };
        match data {
            Some(data) => self.add_expense(&data.into_draft()),
            None => {
                cli_io::print_info("Add cancelled.");
                Ok(())
            }
        }
    }

    /// Deletes by full id, unique id prefix, or `#n` row of the current table.
    pub(crate) fn delete_expense(&mut self, reference: &str) -> CommandResult {
        let Some(id) = self.resolve_expense_id(reference)? else {
            cli_io::print_info(format!("No expense matches `{reference}`; nothing deleted."));
            return Ok(());
        };
        match self.book.delete(&id)? {
            Some(removed) => {
                cli_io::print_success(format!(
                    "Deleted {} ({} on {}).",
                    removed.category,
                    self.dashboard.format().format_amount(removed.amount),
                    removed.date
                ));
                self.render_dashboard();
            }
            None => {
                cli_io::print_info(format!("No expense matches `{reference}`; nothing deleted."));
            }
        }
        Ok(())
    }

    fn resolve_expense_id(&self, reference: &str) -> Result<Option<String>, CommandError> {
        if reference.trim().is_empty() {
            return Err(CommandError::InvalidArguments(
                "usage: delete <id|#row> (reference cannot be blank)".into(),
            ));
        }
        if let Some(row) = reference.strip_prefix('#') {
            let index: usize = row.parse().map_err(|_| {
                CommandError::InvalidArguments(format!("invalid row `{reference}`"))
            })?;
            return Ok(index
                .checked_sub(1)
                .and_then(|idx| self.dashboard.view().get(idx))
                .map(|expense| expense.id.clone()));
        }

        if self.book.get(reference).is_some() {
            return Ok(Some(reference.to_string()));
        }

        let matches: Vec<&Expense> = self
            .book
            .expenses()
            .iter()
            .filter(|expense| expense.id.starts_with(reference))
            .collect();
        match matches.as_slice() {
            [single] => Ok(Some(single.id.clone())),
            [] => Ok(None),
            _ => Err(CommandError::Message(format!(
                "`{reference}` matches {} expenses; use a longer id",
                matches.len()
            ))),
        }
    }

    /// Applies `category|from|to <value>` pairs; nothing changes if any pair is invalid.
    pub(crate) fn apply_filter_args(&mut self, args: &[&str]) -> CommandResult {
        let mut next = self.filter.clone();
        let mut pairs = args.iter();
        while let Some(key) = pairs.next() {
            let value = pairs.next().ok_or_else(|| {
                CommandError::InvalidArguments(format!("missing value for `{key}`"))
            })?;
            match key.to_lowercase().as_str() {
                "category" => next.set_category(Some(*value)),
                "from" => next.from = parse_optional_date(value)?,
                "to" => next.to = parse_optional_date(value)?,
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "unknown filter `{other}` (use category, from, or to)"
                    )))
                }
            }
        }

        if let (Some(from), Some(to)) = (next.from, next.to) {
            if from > to {
                cli_io::print_warning("`from` is after `to`; nothing will match.");
            }
        }
        debug!(filter = %next, "filter updated");
        self.filter = next;
        self.render_dashboard();
        Ok(())
    }

    pub(crate) fn clear_filters(&mut self) {
        self.filter.clear();
        cli_io::print_success("Filters cleared.");
        self.render_dashboard();
    }

    pub(crate) fn export_view(&mut self, path: Option<&str>) -> CommandResult {
        self.refresh_view();
        let target = PathBuf::from(path.unwrap_or(self.config.export_path.as_str()));
        let written = self.dashboard.export_csv(&target)?;
        cli_io::print_success(format!(
            "Exported {} expense(s) to {}.",
            written,
            target.display()
        ));
        Ok(())
    }

    pub(crate) fn show_config(&self) -> CommandResult {
        let config = &self.config;
        output_section("Configuration");
        cli_io::print_info(format!("  locale             : {}", config.locale));
        cli_io::print_info(format!("  currency           : {}", config.currency));
        cli_io::print_info(format!(
            "  categories         : {}",
            config.categories.join(", ")
        ));
        cli_io::print_info(format!("  plain_mode         : {}", on_off(config.plain_mode)));
        cli_io::print_info(format!(
            "  screen_reader_mode : {}",
            on_off(config.screen_reader_mode)
        ));
        cli_io::print_info(format!(
            "  high_contrast_mode : {}",
            on_off(config.high_contrast_mode)
        ));
        cli_io::print_info(format!("  export_path        : {}", config.export_path));
        cli_io::print_info(format!(
            "  data file          : {}",
            self.book.store().location()
        ));
        Ok(())
    }

    pub(crate) fn set_config_value(&mut self, key: &str, value: &str) -> CommandResult {
        let mut updated = self.config.clone();
        updated.set(key, value)?;
        self.config_manager.save(&updated)?;
        self.config = updated;
        cli_io::apply_config(&self.config);
        self.dashboard.set_format(DisplayFormat::from_config(&self.config));
        cli_io::print_success("Configuration updated.");
        Ok(())
    }

    pub(crate) fn config_path(&self) -> &Path {
        self.config_manager.path()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        let suggestion = match self.registry.matching(input).as_slice() {
            [only] => Some(*only),
            _ => self.registry.closest(input),
        };
        if let Some(best) = suggestion {
            cli_io::print_info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(TrackerError::Validation(report)) => {
                self.print_error("Expense not saved; fix the highlighted fields.");
                for field in report.invalid_fields() {
                    self.print_warning(&format!("{}: {}", field.label(), field.hint()));
                }
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        cli_io::print_hint(message);
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })
}

/// `none` (or `any`) clears a date bound.
pub(crate) fn parse_optional_date(input: &str) -> Result<Option<NaiveDate>, CommandError> {
    if input.eq_ignore_ascii_case("none") || input.eq_ignore_ascii_case("any") {
        return Ok(None);
    }
    parse_date(input).map(Some)
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Core(inner) => CommandError::Core(inner),
            CliError::Input(message) | CliError::Command(message) => {
                CommandError::InvalidArguments(message)
            }
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script(base: &Path, lines: &[&str]) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_base_dir(CliMode::Script, base.to_path_buf())?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err)?,
        }
    }
    Ok(app)
}
