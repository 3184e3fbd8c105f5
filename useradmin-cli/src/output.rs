//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use useradmin_core::services::view::NO_DATA_MESSAGE;
use useradmin_core::services::Toast;
use useradmin_core::{FieldErrors, TableView, ToastKind};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print a toast in its kind's color
pub fn toast(toast: &Toast) {
    match toast.kind {
        ToastKind::Success => success(&toast.message),
        ToastKind::Error => error(&toast.message),
    }
}

/// Print one line per invalid form field
pub fn field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        eprintln!("{} {}", format!("{}:", field.as_str()).red().bold(), message.red());
    }
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Print the user table, or the no-data message when empty
pub fn user_table(view: &TableView) {
    if view.is_empty() {
        println!("{}", NO_DATA_MESSAGE.dimmed());
        return;
    }

    let mut table = create_table();
    table.set_header(vec!["ID", "Name", "Email", "Phone"]);
    for row in view.rows() {
        table.add_row(vec![
            row.id.as_str(),
            row.name.as_str(),
            row.email.as_str(),
            row.phone.as_str(),
        ]);
    }
    println!("{}", table);
}
