use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::domain::ExpenseDraft;

const ADD_USAGE: &str = "add [<amount> <category> <YYYY-MM-DD> [description...]]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record a new expense", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "delete",
            "Delete an expense by id or table row",
            "delete <id|#row>",
            cmd_delete,
        ),
        CommandEntry::new(
            "list",
            "Show expenses, summary, and chart for the current filter",
            "list",
            cmd_list,
        ),
        CommandEntry::new("stats", "Show total, count, and top category", "stats", cmd_stats),
        CommandEntry::new("chart", "Show spending by category", "chart", cmd_chart),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        if !context.can_prompt() {
            return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
        }
        return context.run_add_wizard();
    }
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
    }
    let description = args[3..].join(" ");
    let draft = ExpenseDraft::from_input(args[0], args[1], args[2], &description);
    context.add_expense(&draft)
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [reference] => context.delete_expense(reference),
        _ => Err(CommandError::InvalidArguments(
            "usage: delete <id|#row>".into(),
        )),
    }
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.render_dashboard();
    Ok(())
}

fn cmd_stats(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.refresh_view();
    context.print_stats();
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.refresh_view();
    context.print_chart();
    Ok(())
}
