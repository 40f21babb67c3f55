use std::io::{self, Write};
use std::ops::{Deref, DerefMut};
use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::FeedbackError;
use crate::item::Item;
use crate::modifier::{Modifier, ModifierKey};
use crate::serializer::ItemDocument;
use crate::variables::{VarScope, Variables};

/// Root payload of one script-filter invocation.
///
/// Feedback-level variables are never emitted on their own; items and
/// modifiers inherit them and carry them out through their encoded `arg`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    items: Vec<Item>,
    variables: Variables,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new item and returns a handle for configuring it.
    pub fn new_item(&mut self, title: impl Into<String>) -> ItemMut<'_> {
        self.push(Item::new(title))
    }

    pub fn new_file_item(&mut self, path: impl AsRef<Path>, home: Option<&Path>) -> ItemMut<'_> {
        self.push(Item::for_file(path.as_ref(), home))
    }

    pub fn push(&mut self, item: Item) -> ItemMut<'_> {
        let index = self.items.len();
        self.items.push(item);
        ItemMut {
            item: &mut self.items[index],
            inherited: &self.variables,
        }
    }

    pub fn item_mut(&mut self, index: usize) -> Option<ItemMut<'_>> {
        let inherited = &self.variables;
        self.items
            .get_mut(index)
            .map(|item| ItemMut { item, inherited })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.variables.set(key, value);
        self
    }

    pub fn var(&self, key: &str) -> Option<&str> {
        self.variables.get(key)
    }

    pub fn vars(&self) -> &Variables {
        &self.variables
    }

    /// Rejects documents Alfred would not render, before any byte is written.
    pub fn validate(&self) -> Result<(), FeedbackError> {
        match self.items.iter().position(|item| item.title().is_empty()) {
            Some(index) => Err(FeedbackError::EmptyTitle { index }),
            None => Ok(()),
        }
    }

    pub fn to_json(&self) -> Result<String, FeedbackError> {
        self.validate()?;
        Ok(serde_json::to_string(self)?)
    }

    /// Writes the compact document to `writer`. The document is fully
    /// encoded first so a failure never leaves partial output behind.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), FeedbackError> {
        let json = self.to_json()?;
        writer.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Writes the document to stdout for Alfred to pick up.
    pub fn send(&self) -> Result<(), FeedbackError> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_to(&mut handle)?;
        handle.write_all(b"\n")?;
        handle.flush()?;
        debug!(items = self.items.len(), "sent feedback");
        Ok(())
    }
}

impl Serialize for Feedback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let root = VarScope::root(&self.variables);
        let documents = self
            .items
            .iter()
            .map(|item| ItemDocument {
                item,
                scope: root.child(&item.variables),
            })
            .collect::<Vec<_>>();

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("items", &documents)?;
        map.end()
    }
}

/// Mutable handle to an item owned by a [`Feedback`].
///
/// Dereferences to [`Item`] for the plain setters and adds variable lookups
/// that fall back to the feedback's variables.
#[derive(Debug)]
pub struct ItemMut<'a> {
    item: &'a mut Item,
    inherited: &'a Variables,
}

impl ItemMut<'_> {
    /// Returns the modifier for `key`, creating it on first use.
    pub fn modifier(&mut self, key: ModifierKey) -> ModifierMut<'_> {
        let (modifier, item_variables) = self.item.modifier_with_variables(key);
        ModifierMut {
            modifier,
            item_variables,
            feedback_variables: self.inherited,
        }
    }

    pub fn var(&self, key: &str) -> Option<&str> {
        self.scope().get(key)
    }

    pub fn vars(&self) -> Variables {
        self.scope().resolve()
    }

    fn scope(&self) -> VarScope<'_> {
        VarScope::root(self.inherited).child(&self.item.variables)
    }
}

impl Deref for ItemMut<'_> {
    type Target = Item;

    fn deref(&self) -> &Item {
        self.item
    }
}

impl DerefMut for ItemMut<'_> {
    fn deref_mut(&mut self) -> &mut Item {
        self.item
    }
}

/// Mutable handle to a modifier, resolving variables through its item and
/// the feedback.
#[derive(Debug)]
pub struct ModifierMut<'a> {
    modifier: &'a mut Modifier,
    item_variables: &'a Variables,
    feedback_variables: &'a Variables,
}

impl ModifierMut<'_> {
    pub fn var(&self, key: &str) -> Option<&str> {
        self.scope().get(key)
    }

    pub fn vars(&self) -> Variables {
        self.scope().resolve()
    }

    fn scope(&self) -> VarScope<'_> {
        VarScope::root(self.feedback_variables)
            .child(self.item_variables)
            .child(&self.modifier.variables)
    }
}

impl Deref for ModifierMut<'_> {
    type Target = Modifier;

    fn deref(&self) -> &Modifier {
        self.modifier
    }
}

impl DerefMut for ModifierMut<'_> {
    fn deref_mut(&mut self) -> &mut Modifier {
        self.modifier
    }
}
