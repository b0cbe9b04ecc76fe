//! Log-scaled difficulty: the fewer entities satisfy something, the harder it is.

use crate::catalog::{Catalog, Entry};

/// Drafts are accepted when their grid difficulty lands this close to the target.
pub const TARGET_TOLERANCE: f64 = 0.3;

/// Weight applied to a cell whose two labels come from different groups.
pub const MIXED_GROUP_FACTOR: f64 = 0.9;

/// 0.0 when everything matches, 1.0 when nothing does.
pub fn scarcity(matching: usize, total: usize) -> f64 {
    if matching == 0 || total == 0 {
        return 1.0;
    }
    1.0 - ((matching + 1) as f64).ln() / ((total + 1) as f64).ln()
}

pub fn pair(catalog: &Catalog, row: &Entry, col: &Entry) -> f64 {
    let shared = row.mask.and(&col.mask).count();
    let mut d = scarcity(shared, catalog.roster().len());
    if row.group != col.group {
        d *= MIXED_GROUP_FACTOR;
    }
    d
}

/// Mean of the nine cell difficulties.
pub fn grid(catalog: &Catalog, rows: &[usize; 3], cols: &[usize; 3]) -> f64 {
    let entries = catalog.entries();
    let sum: f64 = rows
        .iter()
        .flat_map(|&r| cols.iter().map(move |&c| (r, c)))
        .map(|(r, c)| pair(catalog, &entries[r], &entries[c]))
        .sum();
    sum / 9.0
}

pub fn within_target(difficulty: f64, target: f64) -> bool {
    (difficulty - target.clamp(0.0, 1.0)).abs() <= TARGET_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, Roster};
    use crate::vocabulary::Vocabulary;

    #[test]
    fn scarcity_scale() {
        assert_eq!(scarcity(0, 10), 1.0);
        assert_eq!(scarcity(3, 0), 1.0);
        assert!(scarcity(10, 10).abs() < 1e-12);
        assert!(scarcity(1, 100) > scarcity(50, 100));
    }

    #[test]
    fn mixed_groups_are_slightly_easier() {
        let mut a = Entity::new("A");
        a.role = vec!["Mage".into(), "Support".into()];
        a.region = Some("Ionia".into());
        let roster = Roster::new(vec![a, Entity::new("B"), Entity::new("C")]);
        let vocab = Vocabulary::grouped([
            ("role", vec!["Mage".to_string(), "Support".to_string()]),
            ("location", vec!["Ionia".to_string()]),
        ]);
        let catalog = Catalog::compile(&vocab, &roster);
        let (mage, support, ionia) = (
            catalog.get("Mage").unwrap(),
            catalog.get("Support").unwrap(),
            catalog.get("Ionia").unwrap(),
        );
        let same = pair(&catalog, mage, support);
        let mixed = pair(&catalog, mage, ionia);
        assert!((mixed - same * MIXED_GROUP_FACTOR).abs() < 1e-12);
    }

    #[test]
    fn target_is_clamped() {
        assert!(within_target(0.8, 1.7));
        assert!(!within_target(0.6, 0.0));
        assert!(within_target(0.3, -2.0));
    }
}
