// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Template catalogue helpers
//!
//! Covers the hand-off of a chosen template to the generator (stashed in
//! session storage under [`SELECTED_TEMPLATE_KEY`]) and the search/filter
//! predicate used by the catalogue.

use serde::{Deserialize, Serialize};

use crate::storage::SessionStorage;

/// Session storage key holding the template picked in the catalogue
pub const SELECTED_TEMPLATE_KEY: &str = "selectedTemplate";

/// Template chosen by the user, handed to the generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSelection {
    pub name: String,
    pub language: String,
    #[serde(default)]
    pub framework: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub initial_prompt: Option<String>,
}

impl TemplateSelection {
    /// Create a selection, deriving the initial prompt from the name and
    /// description.
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            framework: None,
            pattern: None,
            category: None,
            description: None,
            initial_prompt: None,
        }
        .with_prompt()
    }

    pub fn with_framework(mut self, framework: impl Into<String>) -> Self {
        self.framework = Some(framework.into());
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self.with_prompt()
    }

    fn with_prompt(mut self) -> Self {
        let description = self.description.as_deref().unwrap_or_default();
        self.initial_prompt = Some(
            format!(
                "The code must use the \"{}\" pattern. {}",
                self.name, description
            )
            .trim_end()
            .to_string(),
        );
        self
    }

    /// Requirement text recorded when the template is used: the initial
    /// prompt, falling back to the description.
    pub fn requirement(&self) -> &str {
        self.initial_prompt
            .as_deref()
            .filter(|p| !p.is_empty())
            .or(self.description.as_deref())
            .unwrap_or_default()
    }
}

/// Store the selection for the generator to pick up. Fails soft.
pub fn stash_selection<S: SessionStorage + ?Sized>(storage: &mut S, selection: &TemplateSelection) {
    let content = match serde_json::to_string(selection) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Failed to serialize template selection: {}", e);
            return;
        }
    };
    if let Err(e) = storage.set_item(SELECTED_TEMPLATE_KEY, &content) {
        tracing::warn!("Error saving template selection to storage: {}", e);
    }
}

/// Take the stashed selection, removing it from storage. Missing or corrupt
/// data yields `None`.
pub fn take_selection<S: SessionStorage + ?Sized>(storage: &mut S) -> Option<TemplateSelection> {
    let stored = match storage.get_item(SELECTED_TEMPLATE_KEY) {
        Ok(stored) => stored?,
        Err(e) => {
            tracing::warn!("Error loading template selection from storage: {}", e);
            return None;
        }
    };

    if let Err(e) = storage.remove_item(SELECTED_TEMPLATE_KEY) {
        tracing::warn!("Error clearing template selection from storage: {}", e);
    }

    match serde_json::from_str(&stored) {
        Ok(selection) => Some(selection),
        Err(e) => {
            tracing::debug!("No usable template selection found: {}", e);
            None
        }
    }
}

/// Catalogue card as seen by the filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateCard {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

/// Search text plus category and language filters. Empty filter lists
/// match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateFilter {
    pub search: String,
    pub categories: Vec<String>,
    pub languages: Vec<String>,
}

impl TemplateFilter {
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..Self::default()
        }
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    /// Whether the card should be visible
    pub fn matches(&self, card: &TemplateCard) -> bool {
        let term = self.search.to_lowercase();
        let matches_search = term.is_empty()
            || card.title.to_lowercase().contains(&term)
            || card.description.to_lowercase().contains(&term);

        let matches_category = self.categories.is_empty()
            || self.categories.iter().any(|c| card.categories.contains(c));

        let matches_language = self.languages.is_empty()
            || self.languages.iter().any(|l| card.languages.contains(l));

        matches_search && matches_category && matches_language
    }

    /// Cards passing the filter, in catalogue order
    pub fn apply<'a>(&self, cards: &'a [TemplateCard]) -> Vec<&'a TemplateCard> {
        cards.iter().filter(|card| self.matches(card)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn card(title: &str, description: &str, categories: &[&str], languages: &[&str]) -> TemplateCard {
        TemplateCard {
            title: title.to_string(),
            description: description.to_string(),
            categories: categories.iter().map(|s| s.to_string()).collect(),
            languages: languages.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn catalogue() -> Vec<TemplateCard> {
        vec![
            card("Singleton", "One instance per process", &["creational"], &["python", "java"]),
            card("Observer", "Publish events to subscribers", &["behavioral"], &["typescript"]),
            card("Adapter", "Wrap an incompatible interface", &["structural"], &["java", "go"]),
        ]
    }

    #[test]
    fn test_selection_builds_initial_prompt() {
        let selection = TemplateSelection::new("Singleton", "python")
            .with_description("One instance per process");
        assert_eq!(
            selection.requirement(),
            "The code must use the \"Singleton\" pattern. One instance per process"
        );
    }

    #[test]
    fn test_requirement_falls_back_to_description() {
        let mut selection = TemplateSelection::new("Adapter", "go").with_description("Wrap it");
        selection.initial_prompt = None;
        assert_eq!(selection.requirement(), "Wrap it");
    }

    #[test]
    fn test_selection_serializes_camel_case() {
        let selection = TemplateSelection::new("Observer", "typescript");
        let value = serde_json::to_value(&selection).unwrap();
        assert!(value.get("initialPrompt").is_some());
    }

    #[test]
    fn test_stash_and_take_selection() {
        let mut storage = MemoryStorage::new();
        let selection = TemplateSelection::new("Observer", "typescript").with_category("behavioral");

        stash_selection(&mut storage, &selection);
        assert_eq!(take_selection(&mut storage), Some(selection));
        // Taking consumes the stash
        assert_eq!(take_selection(&mut storage), None);
    }

    #[test]
    fn test_take_corrupt_selection() {
        let mut storage = MemoryStorage::new();
        storage.set_item(SELECTED_TEMPLATE_KEY, "{not json").unwrap();
        assert_eq!(take_selection(&mut storage), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_filter_empty_matches_all() {
        let cards = catalogue();
        assert_eq!(TemplateFilter::default().apply(&cards).len(), 3);
    }

    #[test]
    fn test_filter_search_is_case_insensitive() {
        let cards = catalogue();
        let found = TemplateFilter::new("EVENTS").apply(&cards);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Observer");
    }

    #[test]
    fn test_filter_by_category_and_language() {
        let cards = catalogue();
        let filter = TemplateFilter::default()
            .with_categories(vec!["creational".into(), "structural".into()])
            .with_languages(vec!["go".into()]);

        let found = filter.apply(&cards);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Adapter");
    }

    #[test]
    fn test_filter_no_match() {
        let cards = catalogue();
        let filter = TemplateFilter::new("singleton").with_languages(vec!["rust".into()]);
        assert!(filter.apply(&cards).is_empty());
    }
}
