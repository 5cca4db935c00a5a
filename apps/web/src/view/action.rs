/// A user intent raised by a click control in the rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Add the keyword to the active filters, or remove it if already active.
    Toggle(String),
    /// Drop every active filter.
    Clear,
    /// Fetch the job listings again.
    Reload,
}

impl Action {
    /// Route the rendered control posts to.
    pub fn path(&self) -> &'static str {
        match self {
            Action::Toggle(_) => "/actions/toggle",
            Action::Clear => "/actions/clear",
            Action::Reload => "/actions/reload",
        }
    }

    /// Form fields submitted with the control.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            Action::Toggle(keyword) => vec![("keyword", keyword.as_str())],
            Action::Clear | Action::Reload => Vec::new(),
        }
    }
}
