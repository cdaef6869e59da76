//! Tool set selection.

use std::collections::BTreeSet;

/// Tools registered in minimal mode.
pub const ESSENTIAL_TOOLS: &[&str] = &[
    "get_user_info",
    "get_projects",
    "get_project",
    "create_project",
    "get_sections",
    "get_tasks",
    "get_task",
    "create_task",
    "update_task",
    "delete_task",
    "close_task",
    "reopen_task",
    "move_task",
    "get_tasks_by_filter",
    "get_labels",
    "create_comment",
];

/// Which part of the catalogue a server session exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSetConfig {
    /// Register only the essential tools.
    pub minimal: bool,
    /// Names kept in minimal mode.
    pub essential: BTreeSet<String>,
}

impl Default for ToolSetConfig {
    fn default() -> Self {
        Self {
            minimal: false,
            essential: ESSENTIAL_TOOLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ToolSetConfig {
    /// Every tool in the catalogue.
    pub fn full() -> Self {
        Self::default()
    }

    /// Only the default essential set.
    pub fn minimal() -> Self {
        Self {
            minimal: true,
            ..Self::default()
        }
    }

    pub fn with_minimal(mut self, minimal: bool) -> Self {
        self.minimal = minimal;
        self
    }

    /// Replace the essential set.
    pub fn with_essential<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.essential = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_essential(&self, name: &str) -> bool {
        self.essential.contains(name)
    }
}
