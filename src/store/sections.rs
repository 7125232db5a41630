//! Home-page content rows.
//!
//! `content_lookup` maps each content id to the ids of the sections that
//! contain it, in display order. Every mutation keeps it equal to what
//! [`rebuild_lookup`] would compute from `sections`.
//!
//! [`rebuild_lookup`]: ContentSectionState::rebuild_lookup

use crate::models::ContentSection;
use crate::store::{insert_unique, remove_value};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Content rows and the reverse index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSectionState {
    /// Rows in display order.
    pub sections: Vec<ContentSection>,
    /// Content id -> ids of sections containing it.
    #[serde(skip)]
    pub content_lookup: BTreeMap<String, Vec<String>>,
}

impl ContentSectionState {
    /// Build from persisted rows.
    pub fn from_sections(sections: Vec<ContentSection>) -> Self {
        let mut state = Self {
            sections,
            content_lookup: BTreeMap::new(),
        };
        state.normalize();
        state
    }

    /// Add a row unless its id exists. Content beyond `max_items` is dropped.
    pub fn add_section(&mut self, mut section: ContentSection) -> bool {
        if self.section(&section.id).is_some() {
            return false;
        }
        dedup_in_place(&mut section.content_ids);
        section.content_ids.truncate(section.max_items);
        self.sections.push(section);
        self.sort();
        self.reindex();
        true
    }

    /// Remove a row.
    pub fn remove_section(&mut self, section_id: &str) -> bool {
        let Some(pos) = self.sections.iter().position(|s| s.id == section_id) else {
            return false;
        };
        self.sections.remove(pos);
        self.reindex();
        true
    }

    /// Append content to a row; a full row drops its oldest entry.
    pub fn add_content(&mut self, section_id: &str, content_id: &str, now: DateTime<Utc>) -> bool {
        let Some(section) = self.sections.iter_mut().find(|s| s.id == section_id) else {
            return false;
        };
        if section.max_items == 0 || section.content_ids.iter().any(|id| id == content_id) {
            return false;
        }

        section.content_ids.push(content_id.to_string());
        let overflow = section.content_ids.len().saturating_sub(section.max_items);
        section.content_ids.drain(..overflow);
        section.last_updated = now;
        self.reindex();
        true
    }

    /// Remove content from a row.
    pub fn remove_content(&mut self, section_id: &str, content_id: &str, now: DateTime<Utc>) -> bool {
        let Some(section) = self.sections.iter_mut().find(|s| s.id == section_id) else {
            return false;
        };
        if !remove_value(&mut section.content_ids, content_id) {
            return false;
        }
        section.last_updated = now;
        self.reindex();
        true
    }

    /// Replace the content of a row.
    pub fn set_content(&mut self, section_id: &str, content_ids: Vec<String>, now: DateTime<Utc>) -> bool {
        let Some(section) = self.sections.iter_mut().find(|s| s.id == section_id) else {
            return false;
        };

        let mut content_ids = content_ids;
        dedup_in_place(&mut content_ids);
        content_ids.truncate(section.max_items);

        section.content_ids = content_ids;
        section.last_updated = now;
        self.reindex();
        true
    }

    /// Show or hide a row. Returns the new visibility.
    pub fn toggle_visibility(&mut self, section_id: &str) -> Option<bool> {
        let section = self.sections.iter_mut().find(|s| s.id == section_id)?;
        section.is_visible = !section.is_visible;
        Some(section.is_visible)
    }

    /// Reorder rows; ids not listed keep their relative order after the
    /// listed ones.
    pub fn reorder(&mut self, order: &[String]) {
        for section in &mut self.sections {
            section.order = order
                .iter()
                .position(|id| *id == section.id)
                .map(|p| p as u32)
                .unwrap_or(u32::MAX);
        }
        self.sort();
        for (i, section) in self.sections.iter_mut().enumerate() {
            section.order = i as u32;
        }
        self.reindex();
    }

    /// Look up a row.
    pub fn section(&self, section_id: &str) -> Option<&ContentSection> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    /// Ids of rows containing a content id.
    pub fn sections_for(&self, content_id: &str) -> &[String] {
        self.content_lookup
            .get(content_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Visible rows in display order.
    pub fn visible(&self) -> impl Iterator<Item = &ContentSection> {
        self.sections.iter().filter(|s| s.is_visible)
    }

    /// Reverse index computed from scratch.
    pub fn rebuild_lookup(&self) -> BTreeMap<String, Vec<String>> {
        let mut lookup = BTreeMap::new();
        for section in &self.sections {
            for content_id in &section.content_ids {
                index(&mut lookup, content_id, &section.id);
            }
        }
        lookup
    }

    /// Fix up deserialized rows: dedup, truncate, sort and reindex.
    pub fn normalize(&mut self) {
        for section in &mut self.sections {
            dedup_in_place(&mut section.content_ids);
            section.content_ids.truncate(section.max_items);
        }
        self.sort();
        self.reindex();
    }

    fn sort(&mut self) {
        self.sections.sort_by_key(|s| s.order);
    }

    fn reindex(&mut self) {
        self.content_lookup = self.rebuild_lookup();
    }
}

fn index(lookup: &mut BTreeMap<String, Vec<String>>, content_id: &str, section_id: &str) {
    insert_unique(lookup.entry(content_id.to_string()).or_default(), section_id);
}

fn dedup_in_place(ids: &mut Vec<String>) {
    let mut seen = Vec::with_capacity(ids.len());
    ids.retain(|id| {
        if seen.contains(id) {
            false
        } else {
            seen.push(id.clone());
            true
        }
    });
}
