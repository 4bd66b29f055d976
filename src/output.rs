use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};

use enrollrows::enrollment::{Notifier, ReplayStep};
use enrollrows::models::{role_label, AdditionalEnrollment, RoleOption, RowView};

/// Prints notifications the way the page would alert them.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, message: &str) {
        eprintln!("{} {}", yansi::Paint::new("alert:").yellow().bold(), message);
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

pub fn print_steps(steps: &[ReplayStep]) {
    for step in steps {
        match (&step.row_id, &step.error) {
            (Some(row_id), _) => println!("{} {} -> {}", yansi::Paint::new("ok").green(), step.op, row_id),
            (None, Some(e)) => println!("{} {} -> {}", yansi::Paint::new("failed").red(), step.op, e),
            (None, None) => println!("{} {}", yansi::Paint::new("?").dim(), step.op),
        }
    }
}

pub fn print_rows(rows: &[RowView]) {
    if rows.is_empty() {
        println!("(no rows)");
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["Row", "User field", "Role field"]);
    for row in rows {
        table.add_row(vec![&row.row_id, &row.user_field, &row.role_field]);
    }
    println!("\n{table}\n");
}

pub fn print_enrollments(entries: &[AdditionalEnrollment], roles: &[RoleOption]) {
    if entries.is_empty() {
        println!("(no enrollments)");
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["#", "User", "Role"]);
    for entry in entries {
        let role = match &entry.role {
            Some(code) => format!("{} ({})", role_label(roles, code), code),
            None => "-".to_string(),
        };
        let user = entry.user.clone().unwrap_or_else(|| "-".to_string());
        table.add_row(vec![entry.index.to_string(), user, role]);
    }
    println!("\n{table}\n");
}
