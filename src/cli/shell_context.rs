use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::{expense_book::ExpenseBook, filter::ExpenseFilter},
    presenter::Dashboard,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// State carried across shell commands.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub book: ExpenseBook,
    pub filter: ExpenseFilter,
    pub dashboard: Dashboard,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub running: bool,
}
