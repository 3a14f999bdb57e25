use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "filter",
            "Show or change the category and date filters",
            "filter [category <name|all>] [from <YYYY-MM-DD|none>] [to <YYYY-MM-DD|none>]",
            cmd_filter,
        ),
        CommandEntry::new(
            "clear-filters",
            "Show every expense again",
            "clear-filters",
            cmd_clear_filters,
        ),
    ]
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        io::print_info(format!("Filter: {}", context.filter));
        return Ok(());
    }
    if args.len() % 2 != 0 {
        return Err(CommandError::InvalidArguments(
            "usage: filter [category <name|all>] [from <date|none>] [to <date|none>]".into(),
        ));
    }
    context.apply_filter_args(args)
}

fn cmd_clear_filters(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.clear_filters();
    Ok(())
}
