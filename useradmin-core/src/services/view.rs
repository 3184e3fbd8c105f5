//! View projection - cache + filter to table rows
//!
//! Rendering is a pure function of the cached users and the search term.
//! Rows carry data only; actions are identified by `data-action`/`data-id`
//! attributes and dispatched through [`UiEvent::from_row_action`].
//!
//! [`UiEvent::from_row_action`]: crate::services::UiEvent::from_row_action

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::result::Error;
use crate::domain::{User, UserId};

/// Message shown in place of an empty table body
pub const NO_DATA_MESSAGE: &str = "No users found";

/// Per-row action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowAction {
    Edit,
    Delete,
}

impl RowAction {
    pub const ALL: [RowAction; 2] = [RowAction::Edit, RowAction::Delete];

    /// Value of the `data-action` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            RowAction::Edit => "edit",
            RowAction::Delete => "delete",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Edit => "Edit",
            RowAction::Delete => "Delete",
        }
    }

    fn css_class(&self) -> &'static str {
        match self {
            RowAction::Edit => "btn btn-edit",
            RowAction::Delete => "btn btn-delete",
        }
    }
}

impl FromStr for RowAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edit" => Ok(RowAction::Edit),
            "delete" => Ok(RowAction::Delete),
            other => Err(Error::Other(format!("Unknown row action '{}'", other))),
        }
    }
}

/// One table row, unescaped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowDescriptor {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub actions: [RowAction; 2],
}

impl RowDescriptor {
    fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone_or_placeholder().to_string(),
            actions: RowAction::ALL,
        }
    }
}

/// Rendered table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "rows")]
pub enum TableView {
    /// Explicit "no data" indicator
    Empty,
    Rows(Vec<RowDescriptor>),
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        matches!(self, TableView::Empty)
    }

    pub fn rows(&self) -> &[RowDescriptor] {
        match self {
            TableView::Empty => &[],
            TableView::Rows(rows) => rows,
        }
    }

    /// Render as a `<tbody>` fragment
    ///
    /// Every user-supplied value is escaped; ids are escaped too since the
    /// server is free to send string ids.
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

/// Renders the `<tbody>` markup
impl fmt::Display for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<tbody>")?;
        match self {
            TableView::Empty => writeln!(
                f,
                "  <tr class=\"no-data\"><td colspan=\"5\">{}</td></tr>",
                NO_DATA_MESSAGE
            )?,
            TableView::Rows(rows) => {
                for row in rows {
                    write_row(f, row)?;
                }
            }
        }
        writeln!(f, "</tbody>")
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &RowDescriptor) -> fmt::Result {
    let id = escape_html(row.id.as_str());
    writeln!(f, "  <tr data-id=\"{}\">", id)?;
    writeln!(f, "    <td>{}</td>", id)?;
    writeln!(f, "    <td>{}</td>", escape_html(&row.name))?;
    writeln!(f, "    <td>{}</td>", escape_html(&row.email))?;
    writeln!(f, "    <td>{}</td>", escape_html(&row.phone))?;
    write!(f, "    <td>")?;
    for action in &row.actions {
        write!(
            f,
            "<button class=\"{}\" data-action=\"{}\" data-id=\"{}\">{}</button>",
            action.css_class(),
            action.as_str(),
            id,
            action.label()
        )?;
    }
    writeln!(f, "</td>\n  </tr>")
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Users matching `query` (case-insensitive, on name or email), cache order kept
pub fn filter_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    let needle = query.trim().to_lowercase();
    users.iter().filter(|u| u.matches(&needle)).collect()
}

/// Project the cache through the current filter
pub fn render(users: &[User], query: &str) -> TableView {
    let rows: Vec<RowDescriptor> = filter_users(users, query)
        .into_iter()
        .map(RowDescriptor::from_user)
        .collect();

    if rows.is_empty() {
        TableView::Empty
    } else {
        TableView::Rows(rows)
    }
}
