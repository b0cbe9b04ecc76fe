//! Playable entities and the read-only roster they live in.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use crate::error::LoadError;

/// One ability slot (passive, q, w, e, r, ...). Flags are kept as raw JSON
/// values so a non-boolean flag can never be mistaken for `true`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ability {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flags: BTreeMap<String, serde_json::Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Null slots carry no flags, so they are dropped.
fn present_abilities<'de, D>(deserializer: D) -> Result<BTreeMap<String, Ability>, D::Error>
where
    D: Deserializer<'de>,
{
    let slots: Option<BTreeMap<String, Option<Ability>>> = Option::deserialize(deserializer)?;
    Ok(slots
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(slot, ability)| ability.map(|a| (slot, a)))
        .collect())
}

impl Ability {
    /// Flag names whose value is exactly `true`.
    pub fn true_flags(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|(_, v)| matches!(v, serde_json::Value::Bool(true)))
            .map(|(k, _)| k.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub primary_damage_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skin_lines: Vec<String>,
    #[serde(default)]
    pub range: Option<f64>,
    #[serde(default)]
    pub model_size: Option<f64>,
    #[serde(default, deserialize_with = "present_abilities")]
    pub abilities: BTreeMap<String, Ability>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The four exact-match attributes, in matcher order.
    pub fn exact_fields(&self) -> [Option<&str>; 4] {
        [
            self.region.as_deref(),
            self.resource.as_deref(),
            self.species.as_deref(),
            self.primary_damage_type.as_deref(),
        ]
    }

    pub fn is_well_formed(&self) -> bool {
        !self.role.is_empty() && !self.abilities.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RosterFile {
    Wrapped { champions: Vec<Entity> },
    Bare(Vec<Entity>),
}

/// Immutable entity collection. Cloning shares the underlying data.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entities: Arc<[Entity]>,
    by_name: Arc<HashMap<String, usize>>,
}

impl Roster {
    pub fn new(entities: Vec<Entity>) -> Self {
        let mut by_name = HashMap::with_capacity(entities.len());
        for (idx, e) in entities.iter().enumerate() {
            // first record wins on duplicate names
            by_name.entry(e.name.clone()).or_insert(idx);
        }
        Self {
            entities: entities.into(),
            by_name: Arc::new(by_name),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: RosterFile = serde_json::from_str(json)?;
        let entities = match file {
            RosterFile::Wrapped { champions } => champions,
            RosterFile::Bare(entities) => entities,
        };
        Ok(Self::new(entities))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let roster = Self::from_json(&raw).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        let malformed = roster.iter().filter(|e| !e.is_well_formed()).count();
        if malformed > 0 {
            tracing::warn!(
                path = %path.display(),
                malformed,
                "entities without roles or abilities loaded; they only match the rules their data supports"
            );
        }
        tracing::info!(path = %path.display(), entities = roster.len(), "loaded entities");
        Ok(roster)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub fn get(&self, idx: usize) -> Option<&Entity> {
        self.entities.get(idx)
    }

    /// Exact, case-sensitive lookup.
    pub fn by_name(&self, name: &str) -> Option<&Entity> {
        self.by_name.get(name).map(|&idx| &self.entities[idx])
    }

    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entities.iter().map(|e| e.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
