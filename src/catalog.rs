//! The vocabulary compiled against the roster: one membership mask per label.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::category::{Category, CategoryKind};
use crate::entity::Roster;
use crate::error::SplitError;
use crate::vocabulary::Vocabulary;

/// Bitset over roster indices in 32-bit limbs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask(Vec<u32>);

impl Mask {
    pub fn empty(len: usize) -> Self {
        Self(vec![0; len.div_ceil(32)])
    }

    pub fn set(&mut self, idx: usize) {
        self.0[idx / 32] |= 1 << (idx % 32);
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).any(|(x, y)| (x & y) != 0)
    }

    pub fn and(&self, other: &Self) -> Self {
        Self(self.0.iter().zip(other.0.iter()).map(|(x, y)| x & y).collect())
    }

    pub fn count(&self) -> usize {
        self.0.iter().map(|x| x.count_ones() as usize).sum()
    }

    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().enumerate().flat_map(|(limb, &bits)| {
            (0..32)
                .filter(move |&b| (bits & (1u32 << b)) != 0)
                .map(move |b| limb * 32 + b)
        })
    }
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub category: Category,
    pub kind: CategoryKind,
    pub group: Option<String>,
    pub mask: Mask,
}

impl Entry {
    pub fn label(&self) -> &str {
        self.category.label()
    }

    pub fn count(&self) -> usize {
        self.mask.count()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCoverage {
    pub label: String,
    pub kind: CategoryKind,
    pub group: Option<String>,
    pub count: usize,
    pub difficulty: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    pub categories: Vec<CategoryCoverage>,
    pub empty: Vec<String>,
    /// Per label index, the other labels it shares at least one entity with.
    pub n1: Vec<Vec<usize>>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    roster: Roster,
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn compile(vocab: &Vocabulary, roster: &Roster) -> Self {
        let mut entries = Vec::with_capacity(vocab.len());
        let mut index = HashMap::with_capacity(vocab.len());
        for label in vocab.labels() {
            let category = Category::new(label.as_str());
            let mut mask = Mask::empty(roster.len());
            for (idx, entity) in roster.iter().enumerate() {
                if category.matches(entity) {
                    mask.set(idx);
                }
            }
            index.insert(label.clone(), entries.len());
            entries.push(Entry {
                kind: category.classify(roster),
                group: vocab.group_of(label).map(str::to_string),
                category,
                mask,
            });
        }
        let catalog = Self {
            roster: roster.clone(),
            entries,
            index,
        };
        tracing::debug!(
            labels = catalog.entries.len(),
            kinds = ?catalog.kind_counts(),
            "compiled category catalog"
        );
        catalog
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&Entry> {
        self.index_of(label).map(|i| &self.entries[i])
    }

    pub fn kind_counts(&self) -> BTreeMap<String, usize> {
        let mut out = BTreeMap::new();
        for e in &self.entries {
            *out.entry(format!("{:?}", e.kind)).or_insert(0) += 1;
        }
        out
    }

    /// Entity names for a cell. Labels outside the vocabulary fall back to
    /// scanning the roster.
    pub fn cell(&self, row: &str, col: &str) -> Vec<&str> {
        match (self.get(row), self.get(col)) {
            (Some(r), Some(c)) => r
                .mask
                .and(&c.mask)
                .ones()
                .filter_map(|idx| self.roster.get(idx))
                .map(|e| e.name.as_str())
                .collect(),
            _ => {
                let (row, col) = (Category::new(row), Category::new(col));
                self.roster
                    .iter()
                    .filter(|e| row.matches(e) && col.matches(e))
                    .map(|e| e.name.as_str())
                    .collect()
            }
        }
    }

    /// Every row×col pair shares at least one entity.
    pub fn feasible(&self, rows: &[usize; 3], cols: &[usize; 3]) -> bool {
        rows.iter().all(|&r| {
            cols.iter()
                .all(|&c| self.entries[r].mask.intersects(&self.entries[c].mask))
        })
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Resolves a proposed split to catalog indices, or says why it is unplayable.
    pub fn check_split(
        &self,
        rows: &[String; 3],
        cols: &[String; 3],
    ) -> Result<([usize; 3], [usize; 3]), SplitError> {
        let mut seen = HashSet::new();
        let mut resolved = [0usize; 6];
        for (slot, label) in rows.iter().chain(cols.iter()).enumerate() {
            let Some(idx) = self.index_of(label) else {
                return Err(SplitError::UnknownCategory(label.clone()));
            };
            if !seen.insert(idx) {
                return Err(SplitError::DuplicateCategory(label.clone()));
            }
            resolved[slot] = idx;
        }
        let r = [resolved[0], resolved[1], resolved[2]];
        let c = [resolved[3], resolved[4], resolved[5]];
        for (ri, row) in r.iter().zip(rows) {
            for (ci, col) in c.iter().zip(cols) {
                if !self.entries[*ri].mask.intersects(&self.entries[*ci].mask) {
                    return Err(SplitError::EmptyCell {
                        row: row.clone(),
                        col: col.clone(),
                    });
                }
            }
        }
        Ok((r, c))
    }

    pub fn coverage(&self) -> Coverage {
        let total = self.roster.len();
        let n = self.entries.len();
        let mut n1: Vec<Vec<usize>> = vec![Vec::new(); n];
        for i in 0..n {
            for j in (i + 1)..n {
                if self.entries[i].mask.intersects(&self.entries[j].mask) {
                    n1[i].push(j);
                    n1[j].push(i);
                }
            }
        }
        let categories: Vec<CategoryCoverage> = self
            .entries
            .iter()
            .map(|e| CategoryCoverage {
                label: e.label().to_string(),
                kind: e.kind,
                group: e.group.clone(),
                count: e.count(),
                difficulty: crate::difficulty::scarcity(e.count(), total),
            })
            .collect();
        let empty = categories
            .iter()
            .filter(|c| c.count == 0)
            .map(|c| c.label.clone())
            .collect();
        Coverage {
            categories,
            empty,
            n1,
        }
    }
}
