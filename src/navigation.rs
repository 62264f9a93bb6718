use log::debug;

/// Push-based router the screens navigate through
pub trait Navigator: Send {
    /// Push a new location (path plus optional query)
    fn push(&mut self, location: String);
}

/// In-memory navigation history
#[derive(Debug, Default, Clone)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Navigator for History {
    fn push(&mut self, location: String) {
        debug!("Navigating to {}", location);
        self.entries.push(location);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_records_pushes_in_order() {
        let mut history = History::new();
        assert_eq!(history.current(), None);

        history.push("/recipes?country=Thai".to_string());
        history.push("/recipe?id=1".to_string());

        assert_eq!(history.current(), Some("/recipe?id=1"));
        assert_eq!(history.entries().len(), 2);
    }
}
