//! Category vocabulary: authored grouped by informal type, consumed flat.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::LoadError;

#[derive(Debug, Deserialize)]
struct Group {
    categories: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VocabularyFile {
    Flat(Vec<String>),
    Grouped(serde_json::Map<String, serde_json::Value>),
}

/// Deduplicated labels in authoring order, each remembering its group.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    labels: Vec<String>,
    groups: HashMap<String, String>,
}

impl Vocabulary {
    /// Flat list; first occurrence of a label wins.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocab = Self::default();
        for label in labels {
            vocab.push(label.into(), None);
        }
        vocab
    }

    pub fn grouped<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<String>)>,
        S: Into<String>,
    {
        let mut vocab = Self::default();
        for (group, labels) in groups {
            let group = group.into();
            for label in labels {
                vocab.push(label, Some(&group));
            }
        }
        vocab
    }

    fn push(&mut self, label: String, group: Option<&str>) {
        if self.labels.contains(&label) {
            return;
        }
        if let Some(group) = group {
            self.groups.insert(label.clone(), group.to_string());
        }
        self.labels.push(label);
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        match serde_json::from_value::<VocabularyFile>(value)? {
            VocabularyFile::Flat(labels) => Ok(Self::new(labels)),
            VocabularyFile::Grouped(map) => {
                // groups arrive in key order
                let mut groups = Vec::with_capacity(map.len());
                for (key, value) in map {
                    let group: Group = serde_json::from_value(value)?;
                    groups.push((key, group.categories));
                }
                Ok(Self::grouped(groups))
            }
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let vocab = Self::from_json(&raw).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), labels = vocab.len(), "loaded vocabulary");
        Ok(vocab)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn group_of(&self, label: &str) -> Option<&str> {
        self.groups.get(label).map(String::as_str)
    }

    /// Labels per group, for reporting.
    pub fn by_group(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut out: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for label in &self.labels {
            let group = self.group_of(label).unwrap_or("ungrouped");
            out.entry(group).or_default().push(label);
        }
        out
    }
}
