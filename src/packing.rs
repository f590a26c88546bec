use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingItem {
    pub id: String,
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub category_color: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub is_packed: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

impl PackingItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity: default_quantity(),
            category: None,
            category_color: None,
            assigned_to: None,
            is_packed: false,
            notes: None,
        }
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn assigned(mut self, member: impl Into<String>) -> Self {
        self.assigned_to = Some(member.into());
        self
    }

    pub fn packed(mut self) -> Self {
        self.is_packed = true;
        self
    }

    pub fn category_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PackingCategories<'a> {
    pub order: Vec<String>,
    pub items: HashMap<String, Vec<&'a PackingItem>>,
}

impl<'a> PackingCategories<'a> {
    pub fn items_in(&self, category: &str) -> &[&'a PackingItem] {
        self.items.get(category).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a PackingItem])> {
        self.order
            .iter()
            .map(|category| (category.as_str(), self.items_in(category)))
    }
}

pub fn categorize<'a>(items: &'a [PackingItem], fallback_label: &str) -> PackingCategories<'a> {
    let mut categories = PackingCategories::default();
    for item in items {
        let category = item.category_or(fallback_label).to_string();
        if !categories.items.contains_key(&category) {
            categories.order.push(category.clone());
        }
        categories.items.entry(category).or_default().push(item);
    }
    categories
}

/// Applies a previously saved category order to the current categories:
/// saved ones that still exist keep their place, new ones are appended in
/// their current order, vanished ones are dropped.
pub fn reconcile_category_order(saved: &[String], current: &[String]) -> Vec<String> {
    let mut order = saved
        .iter()
        .filter(|category| current.contains(category))
        .cloned()
        .collect::<Vec<_>>();
    for category in current {
        if !order.contains(category) {
            order.push(category.clone());
        }
    }
    order
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackingFilter {
    pub category: Option<String>,
    pub assigned_to: Option<String>,
    pub is_packed: Option<bool>,
}

impl PackingFilter {
    pub fn matches(&self, item: &PackingItem, fallback_label: &str) -> bool {
        if let Some(category) = &self.category {
            if item.category_or(fallback_label) != category {
                return false;
            }
        }

        if let Some(member) = &self.assigned_to {
            if item.assigned_to.as_ref() != Some(member) {
                return false;
            }
        }

        self.is_packed.is_none_or(|packed| item.is_packed == packed)
    }

    pub fn apply<'a>(&self, items: &'a [PackingItem], fallback_label: &str) -> Vec<&'a PackingItem> {
        items
            .iter()
            .filter(|item| self.matches(item, fallback_label))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackingProgress {
    pub packed: usize,
    pub total: usize,
}

impl PackingProgress {
    pub fn of<'a>(items: impl IntoIterator<Item = &'a PackingItem>) -> Self {
        items.into_iter().fold(Self::default(), |progress, item| Self {
            packed: progress.packed + usize::from(item.is_packed),
            total: progress.total + 1,
        })
    }

    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.packed * 100) / self.total) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.packed == self.total
    }
}
