//! Category labels, their numeric buckets and their explicit kind.

use serde::Serialize;

use crate::entity::Roster;

/// Lower-case and drop everything that is not an ASCII letter or digit.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RangeBucket {
    Melee,
    Short,
    Long,
}

impl RangeBucket {
    pub const ALL: [Self; 3] = [Self::Melee, Self::Short, Self::Long];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Melee => "Melee (< 250)",
            Self::Short => "Short Range (250-499)",
            Self::Long => "Long Range (500+)",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }

    pub fn contains(self, range: f64) -> bool {
        match self {
            Self::Melee => range < 250.0,
            Self::Short => (250.0..500.0).contains(&range),
            Self::Long => range >= 500.0,
        }
    }
}

/// Model size buckets. Sizes strictly between 64 and 80 have none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SizeBucket {
    Small,
    Large,
}

impl SizeBucket {
    pub const ALL: [Self; 2] = [Self::Small, Self::Large];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "Small (55-64)",
            Self::Large => "Large (80+)",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }

    pub fn contains(self, size: f64) -> bool {
        match self {
            Self::Small => (55.0..=64.0).contains(&size),
            Self::Large => size >= 80.0,
        }
    }
}

/// Which matcher rule a label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CategoryKind {
    ExactField,
    ListMembership,
    RangeBucket,
    SizeBucket,
    AbilityFlag,
}

/// A label with everything the matcher needs precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    label: String,
    range: Option<RangeBucket>,
    size: Option<SizeBucket>,
    key: String,
}

impl Category {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            range: RangeBucket::from_label(&label),
            size: SizeBucket::from_label(&label),
            key: normalize(&label),
            label,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub const fn range_bucket(&self) -> Option<RangeBucket> {
        self.range
    }

    pub const fn size_bucket(&self) -> Option<SizeBucket> {
        self.size
    }

    /// Normalized form used by the ability-flag rule.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Kind of the first rule that fires for any entity of `roster`. Labels
    /// no entity satisfies fall back to their bucket kind, then to
    /// `AbilityFlag`, the only rule free text can still reach.
    pub fn classify(&self, roster: &Roster) -> CategoryKind {
        let mut best: Option<CategoryKind> = None;
        for entity in roster.iter() {
            if let Some(kind) = self.first_rule(entity) {
                if kind == CategoryKind::ExactField {
                    return kind;
                }
                best = Some(best.map_or(kind, |b| b.min_rule(kind)));
            }
        }
        best.unwrap_or(if self.range.is_some() {
            CategoryKind::RangeBucket
        } else if self.size.is_some() {
            CategoryKind::SizeBucket
        } else {
            CategoryKind::AbilityFlag
        })
    }
}

impl CategoryKind {
    const fn rank(self) -> u8 {
        match self {
            Self::ExactField => 0,
            Self::ListMembership => 1,
            Self::RangeBucket => 2,
            Self::SizeBucket => 3,
            Self::AbilityFlag => 4,
        }
    }

    fn min_rule(self, other: Self) -> Self {
        if other.rank() < self.rank() {
            other
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use proptest::prelude::*;

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("Has Auto-Attack Reset"), "hasautoattackreset");
        assert_eq!(normalize("K/DA"), "kda");
        assert_eq!(normalize("isShapeshifter"), "isshapeshifter");
        assert_eq!(normalize("  --  "), "");
    }

    #[test]
    fn range_boundaries() {
        assert!(RangeBucket::Melee.contains(249.0));
        assert!(!RangeBucket::Melee.contains(250.0));
        assert!(RangeBucket::Short.contains(250.0));
        assert!(RangeBucket::Short.contains(499.0));
        assert!(!RangeBucket::Short.contains(500.0));
        assert!(RangeBucket::Long.contains(500.0));
    }

    #[test]
    fn medium_size_has_no_bucket() {
        assert_eq!(SizeBucket::from_label("Medium (65-79)"), None);
        for size in 65..=79 {
            assert!(SizeBucket::ALL.iter().all(|b| !b.contains(f64::from(size))));
        }
    }

    #[test]
    fn bucket_labels_round_trip() {
        for b in RangeBucket::ALL {
            assert_eq!(Category::new(b.label()).range_bucket(), Some(b));
        }
        for b in SizeBucket::ALL {
            assert_eq!(Category::new(b.label()).size_bucket(), Some(b));
        }
        assert_eq!(Category::new("Melee").range_bucket(), None);
    }

    #[test]
    fn classify_follows_rule_priority() {
        let mut zed = Entity::new("Zed");
        zed.region = Some("Ionia".into());
        zed.role = vec!["Assassin".into()];
        zed.range = Some(125.0);
        let roster = Roster::new(vec![zed]);

        assert_eq!(Category::new("Ionia").classify(&roster), CategoryKind::ExactField);
        assert_eq!(Category::new("Assassin").classify(&roster), CategoryKind::ListMembership);
        assert_eq!(Category::new("Melee (< 250)").classify(&roster), CategoryKind::RangeBucket);
        assert_eq!(Category::new("Long Range (500+)").classify(&roster), CategoryKind::RangeBucket);
        assert_eq!(Category::new("Small (55-64)").classify(&roster), CategoryKind::SizeBucket);
        assert_eq!(Category::new("Has Stun").classify(&roster), CategoryKind::AbilityFlag);
    }

    proptest! {
        #[test]
        fn exactly_one_range_bucket_holds(range in 0.0f64..2000.0) {
            let hits = RangeBucket::ALL.iter().filter(|b| b.contains(range)).count();
            prop_assert_eq!(hits, 1);
        }

        #[test]
        fn size_buckets_never_overlap(size in 0.0f64..200.0) {
            let hits = SizeBucket::ALL.iter().filter(|b| b.contains(size)).count();
            prop_assert!(hits <= 1);
        }
    }
}
