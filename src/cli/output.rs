use serde::Serialize;

use crate::model::todo_list::TodoList;
use crate::ops::collection_ops::{ListSummary, ListView, ShareStatus};

pub const HELP: &str = "\
Available commands:

General:
- help
- quit
- save

Sharing:
- load [skylink]            open the list published under a skylink
- share                     display the skylink for the current list

Editing:
- add [entry]
- delete [position]
- insert [position] [entry] add an entry at the given position
- move [src] [dest]         move an entry (dest counts after removal)

Display:
- all                       display all available lists
- list                      display the entire current list
- ls                        alias for 'list'

Lists:
- new [name]                create a new list
- open [name]               open the given list by name
- rename [name]             set a new name for the current list
";

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ListSummaryJson {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skylink: Option<String>,
    pub saved: bool,
    pub entries: usize,
    pub current: bool,
}

#[derive(Serialize)]
pub struct ListJson {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skylink: Option<String>,
    pub saved: bool,
    pub entries: Vec<String>,
}

#[derive(Serialize)]
pub struct ShareJson {
    pub name: String,
    pub skylink: Option<String>,
    /// False when the list was edited after it was last published
    pub current: bool,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

pub fn summary_to_json(summary: &ListSummary) -> ListSummaryJson {
    ListSummaryJson {
        name: summary.name.clone(),
        skylink: non_empty(&summary.skylink),
        saved: summary.saved,
        entries: summary.entries,
        current: summary.current,
    }
}

pub fn list_to_json(list: &TodoList) -> ListJson {
    ListJson {
        name: list.name.clone(),
        skylink: non_empty(&list.skylink),
        saved: list.saved,
        entries: list.entries.iter().map(|e| e.text.clone()).collect(),
    }
}

pub fn share_to_json(name: &str, status: &ShareStatus) -> ShareJson {
    let (skylink, current) = match status {
        ShareStatus::Published(s) => (Some(s.clone()), true),
        ShareStatus::Stale(s) => (Some(s.clone()), false),
        ShareStatus::Unpublished => (None, false),
    };
    ShareJson {
        name: name.to_string(),
        skylink,
        current,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One line per list, unsaved lists marked with `*`
pub fn format_all_lists(summaries: &[ListSummary]) -> Vec<String> {
    summaries
        .iter()
        .map(|s| {
            let marker = if s.saved { "-  " } else { "-* " };
            format!("{}{}", marker, s.name)
        })
        .collect()
}

/// The list name followed by its numbered rows.
///
/// Rows cut off before or after the window are shown as `[...]`, and the
/// position labels are padded to a common width.
pub fn format_list_view(view: &ListView<'_>) -> Vec<String> {
    let mut lines = vec![view.name.to_string()];
    if view.total == 0 {
        lines.push("(The list is empty)".to_string());
        return lines;
    }

    let width = view
        .rows
        .iter()
        .map(|(i, _)| format!("{}:", i).len())
        .max()
        .unwrap_or(0);

    if view.more_before {
        lines.push("[...]".to_string());
    }
    for (i, text) in &view.rows {
        let label = format!("{}:", i);
        lines.push(format!("{:<width$}  {}", label, text, width = width));
    }
    if view.more_after {
        lines.push("[...]".to_string());
    }
    lines
}

pub fn format_share(status: &ShareStatus) -> Vec<String> {
    match status {
        ShareStatus::Published(skylink) => vec![skylink.clone()],
        ShareStatus::Stale(skylink) => vec![
            skylink.clone(),
            "warning: this list has changed since it was last saved".to_string(),
        ],
        ShareStatus::Unpublished => {
            vec!["skylink doesn't exist (try saving first)".to_string()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::Entry;
    use crate::ops::collection_ops::view_list;
    use pretty_assertions::assert_eq;

    fn numbered(n: usize) -> TodoList {
        TodoList::published(
            "Chores",
            "",
            (0..n).map(|i| Entry::new(format!("task {}", i))).collect(),
        )
    }

    #[test]
    fn empty_list() {
        let list = TodoList::new("Nothing");
        assert_eq!(
            format_list_view(&view_list(&list, 0..5)),
            vec!["Nothing", "(The list is empty)"]
        );
    }

    #[test]
    fn labels_align_and_cuts_are_marked() {
        let list = numbered(12);
        assert_eq!(
            format_list_view(&view_list(&list, 8..11)),
            vec![
                "Chores",
                "[...]",
                "8:   task 8",
                "9:   task 9",
                "10:  task 10",
                "[...]",
            ]
        );
    }

    #[test]
    fn whole_list_has_no_markers() {
        let list = numbered(2);
        assert_eq!(
            format_list_view(&view_list(&list, 0..2)),
            vec!["Chores", "0:  task 0", "1:  task 1"]
        );
    }

    #[test]
    fn all_lists_marks_unsaved() {
        let summaries = vec![
            ListSummary {
                name: "Groceries".into(),
                skylink: "s1".into(),
                saved: true,
                entries: 2,
                current: true,
            },
            ListSummary {
                name: "Chores".into(),
                skylink: String::new(),
                saved: false,
                entries: 0,
                current: false,
            },
        ];
        assert_eq!(format_all_lists(&summaries), vec!["-  Groceries", "-* Chores"]);
        let json = serde_json::to_value(summary_to_json(&summaries[1])).unwrap();
        assert!(json.get("skylink").is_none());
    }

    #[test]
    fn share_messages() {
        assert_eq!(format_share(&ShareStatus::Published("abc".into())), vec!["abc"]);
        assert_eq!(format_share(&ShareStatus::Stale("abc".into())).len(), 2);
        let json = share_to_json("Chores", &ShareStatus::Unpublished);
        assert_eq!(json.skylink, None);
        assert!(!json.current);
    }
}
