//! Labels attached to tables and columns.

use serde::{Deserialize, Serialize};

/// A tag on a table or column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    /// True when the label came from an annotation rather than the database.
    #[serde(default, rename = "virtual", skip_serializing_if = "std::ops::Not::not")]
    pub is_virtual: bool,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_virtual: false,
        }
    }

    pub fn annotated(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_virtual: true,
        }
    }
}

/// Ordered set of labels, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(Vec<Label>);

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.0.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|l| l.name == name)
    }

    /// True if any label name is in `requested`.
    pub fn contains_any<S: AsRef<str>>(&self, requested: &[S]) -> bool {
        requested.iter().any(|r| self.contains(r.as_ref()))
    }

    /// Add a label unless one with the same name exists.
    pub fn insert(&mut self, label: Label) -> bool {
        if self.contains(&label.name) {
            return false;
        }
        self.0.push(label);
        true
    }

    /// Add annotated labels by name, skipping names already present.
    pub fn merge<S: AsRef<str>>(&mut self, names: &[S]) {
        for name in names {
            self.insert(Label::annotated(name.as_ref()));
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|l| l.name.as_str())
    }
}

impl FromIterator<Label> for Labels {
    fn from_iter<I: IntoIterator<Item = Label>>(iter: I) -> Self {
        let mut labels = Labels::new();
        for label in iter {
            labels.insert(label);
        }
        labels
    }
}

impl<'a> IntoIterator for &'a Labels {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
