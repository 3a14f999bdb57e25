use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::ui::table_renderer::{Alignment, Table, TableColumn};

/// One row per command: name, arguments, description.
pub fn overview_table(registry: &CommandRegistry) -> Table {
    let columns = vec![
        TableColumn::new("Command", Alignment::Left),
        TableColumn::new("Arguments", Alignment::Left).max_width(36),
        TableColumn::new("Description", Alignment::Left),
    ];
    let rows = registry
        .entries()
        .iter()
        .map(|entry| {
            vec![
                entry.name.to_string(),
                entry.arguments().to_string(),
                entry.description.to_string(),
            ]
        })
        .collect();
    Table::new(columns).with_rows(rows)
}

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Commands");
    io::print_info(overview_table(registry).render());
    io::print_hint("`help <command>` shows full usage; Tab completes commands and categories.");
}

/// Detail view; commands taking a category also list the names already in use.
pub fn print_command(entry: &CommandEntry, categories: &[String]) {
    output_section(format!("help {}", entry.name));
    io::print_info(entry.description);
    io::print_info(format!("  usage: {}", entry.usage));
    if entry.usage.contains("category") && !categories.is_empty() {
        io::print_info(format!("  categories: {}", categories.join(", ")));
    }
}
