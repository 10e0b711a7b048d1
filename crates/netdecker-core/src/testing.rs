//! In-memory [`CardReference`] used by the unit tests.

use std::cell::RefCell;

use crate::format::Format;
use crate::reference::CardReference;

/// Every card is legal in every format; aliases start as each name mapped to itself.
#[derive(Debug, Default)]
pub(crate) struct MockReference {
    names: Vec<String>,
    companions: Vec<String>,
    aliases: RefCell<Vec<(String, String)>>,
}

impl MockReference {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn card(mut self, name: &str) -> Self {
        self.names.push(name.to_string());
        self.aliases
            .get_mut()
            .push((name.to_string(), name.to_string()));
        self
    }

    pub(crate) fn companion(mut self, name: &str) -> Self {
        self.companions.push(name.to_string());
        self.card(name)
    }

    pub(crate) fn aliases(&self) -> Vec<(String, String)> {
        self.aliases.borrow().clone()
    }
}

impl CardReference for MockReference {
    fn name_from_alias(&self, alias: &str, _format: Format, truncated: bool) -> Option<String> {
        let needle = alias.to_lowercase();
        let len = needle.chars().count();
        self.aliases
            .borrow()
            .iter()
            .find(|(known, _)| {
                let known = known.to_lowercase();
                if truncated {
                    known.chars().take(len).eq(needle.chars())
                } else {
                    known == needle
                }
            })
            .map(|(_, name)| name.clone())
    }

    fn names_in_range(&self, min_len: usize, max_len: usize, _format: Format) -> Vec<String> {
        self.names
            .iter()
            .filter(|name| (min_len..=max_len).contains(&name.chars().count()))
            .cloned()
            .collect()
    }

    fn is_companion(&self, name: &str) -> bool {
        self.companions.iter().any(|c| c == name)
    }

    fn add_alias(&self, alias: &str, name: &str) {
        let mut aliases = self.aliases.borrow_mut();
        if !aliases.iter().any(|(known, _)| known == alias) {
            aliases.push((alias.to_string(), name.to_string()));
        }
    }
}
