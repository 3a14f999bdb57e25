use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "export",
        "Write the filtered expenses to a CSV file",
        "export [path]",
        cmd_export,
    )]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => context.export_view(None),
        [path] => context.export_view(Some(*path)),
        _ => Err(CommandError::InvalidArguments(
            "usage: export [path] (quote paths containing spaces)".into(),
        )),
    }
}
