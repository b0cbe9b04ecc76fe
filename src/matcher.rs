//! The entity/category predicate.
//!
//! Rules are tried in a fixed order and the first one that fires wins:
//! exact fields, list membership, range bucket, size bucket, then a fuzzy
//! match between the normalized label and the entity's `true` ability flags.

use crate::category::{normalize, Category, CategoryKind};
use crate::entity::Entity;

/// Does `entity` satisfy `label`? Never fails; unknown labels are `false`.
pub fn matches(entity: &Entity, label: &str) -> bool {
    Category::new(label).matches(entity)
}

impl Category {
    pub fn matches(&self, entity: &Entity) -> bool {
        self.first_rule(entity).is_some()
    }

    /// The rule that made `entity` match, if any.
    pub fn first_rule(&self, entity: &Entity) -> Option<CategoryKind> {
        if self.matches_exact(entity) {
            Some(CategoryKind::ExactField)
        } else if self.matches_list(entity) {
            Some(CategoryKind::ListMembership)
        } else if self.matches_range(entity) {
            Some(CategoryKind::RangeBucket)
        } else if self.matches_size(entity) {
            Some(CategoryKind::SizeBucket)
        } else if self.matches_flag(entity) {
            Some(CategoryKind::AbilityFlag)
        } else {
            None
        }
    }

    fn matches_exact(&self, entity: &Entity) -> bool {
        entity
            .exact_fields()
            .iter()
            .any(|field| *field == Some(self.label()))
    }

    fn matches_list(&self, entity: &Entity) -> bool {
        let label = self.label();
        entity.role.iter().any(|r| r == label) || entity.skin_lines.iter().any(|s| s == label)
    }

    fn matches_range(&self, entity: &Entity) -> bool {
        match (self.range_bucket(), entity.range) {
            (Some(bucket), Some(range)) => bucket.contains(range),
            _ => false,
        }
    }

    fn matches_size(&self, entity: &Entity) -> bool {
        match (self.size_bucket(), entity.model_size) {
            (Some(bucket), Some(size)) => bucket.contains(size),
            _ => false,
        }
    }

    fn matches_flag(&self, entity: &Entity) -> bool {
        let key = self.key();
        // an empty key is a substring of every flag, so it matches any true flag
        entity
            .abilities
            .values()
            .flat_map(|ability| ability.true_flags())
            .any(|flag| {
                let flag = normalize(flag);
                key.contains(&flag) || flag.contains(key)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Ability;
    use serde_json::json;

    fn with_flags(slot: &str, flags: &[(&str, serde_json::Value)]) -> Entity {
        let mut e = Entity::new("Flagged");
        e.role = vec!["Fighter".into()];
        e.abilities.insert(
            slot.into(),
            Ability {
                flags: flags.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect(),
                ..Ability::default()
            },
        );
        e
    }

    fn ranged(range: f64) -> Entity {
        let mut e = Entity::new("Ranged");
        e.range = Some(range);
        e
    }

    fn sized(size: f64) -> Entity {
        let mut e = Entity::new("Sized");
        e.model_size = Some(size);
        e
    }

    #[test]
    fn exact_fields_match_only_their_own_values() {
        let mut e = Entity::new("Braum");
        e.region = Some("Freljord".into());
        e.resource = Some("Mana".into());
        e.species = Some("Human".into());
        e.primary_damage_type = Some("AP".into());

        for label in ["Freljord", "Mana", "Human", "AP"] {
            assert!(matches(&e, label), "{label}");
        }
        for label in ["freljord", "Noxus", "AD", "Energy", ""] {
            assert!(!matches(&e, label), "{label}");
        }
    }

    #[test]
    fn list_membership_covers_roles_and_skin_lines() {
        let mut e = Entity::new("Lux");
        e.role = vec!["Mage".into(), "Support".into()];
        e.skin_lines = vec!["Star Guardian".into()];
        assert!(matches(&e, "Support"));
        assert!(matches(&e, "Star Guardian"));
        assert!(!matches(&e, "Star"));
        assert!(!matches(&e, "Tank"));
    }

    #[test]
    fn range_bucket_boundaries() {
        let melee = "Melee (< 250)";
        let short = "Short Range (250-499)";
        let long = "Long Range (500+)";

        assert!(matches(&ranged(249.0), melee));
        assert!(!matches(&ranged(249.0), short));

        assert!(!matches(&ranged(250.0), melee));
        assert!(matches(&ranged(250.0), short));

        assert!(matches(&ranged(499.0), short));
        assert!(!matches(&ranged(499.0), long));

        assert!(!matches(&ranged(500.0), short));
        assert!(matches(&ranged(500.0), long));
    }

    #[test]
    fn range_bucket_requires_exact_label() {
        assert!(!matches(&ranged(125.0), "Melee"));
        assert!(!matches(&ranged(125.0), "Melee (<250)"));
    }

    #[test]
    fn size_gap_never_matches() {
        for label in ["Small (55-64)", "Large (80+)", "Medium (65-79)"] {
            assert!(!matches(&sized(70.0), label), "{label}");
        }
        assert!(matches(&sized(55.0), "Small (55-64)"));
        assert!(matches(&sized(64.0), "Small (55-64)"));
        assert!(!matches(&sized(54.0), "Small (55-64)"));
        assert!(matches(&sized(80.0), "Large (80+)"));
        assert!(!matches(&sized(79.0), "Large (80+)"));
    }

    #[test]
    fn flag_contained_in_category() {
        let e = with_flags("passive", &[("isShapeshifter", json!(true))]);
        // "isshapeshiftercharacter" contains "isshapeshifter"
        assert!(matches(&e, "Is Shapeshifter Character"));
    }

    #[test]
    fn category_contained_in_flag() {
        let e = with_flags("r", &[("isShapeshifter", json!(true))]);
        // "isshapeshifter" contains "shapeshifter"
        assert!(matches(&e, "Shapeshifter"));
    }

    #[test]
    fn fuzzy_match_is_lossy_about_plurals() {
        let e = with_flags("r", &[("isShapeshifter", json!(true))]);
        // neither "shapeshifters" nor "isshapeshifter" contains the other
        assert!(!matches(&e, "Shapeshifters"));
    }

    #[test]
    fn false_and_non_boolean_flags_never_match() {
        let e = with_flags(
            "q",
            &[("hasStun", json!(false)), ("hasRoot", json!("true")), ("hasSlow", json!(1))],
        );
        assert!(!matches(&e, "Has Stun"));
        assert!(!matches(&e, "Has Root"));
        assert!(!matches(&e, "Has Slow"));
    }

    #[test]
    fn flag_in_any_slot_matches() {
        let mut e = with_flags("passive", &[("hasStun", json!(false))]);
        e.abilities.insert(
            "e".into(),
            Ability {
                flags: [("hasStun".to_string(), json!(true))].into_iter().collect(),
                ..Ability::default()
            },
        );
        assert!(matches(&e, "Has Stun"));
    }

    #[test]
    fn punctuation_only_label_matches_any_true_flag() {
        let e = with_flags("q", &[("hasStun", json!(true))]);
        assert!(matches(&e, "---"));
        assert!(matches(&e, ""));

        let quiet = with_flags("q", &[("hasStun", json!(false))]);
        assert!(!matches(&quiet, "---"));
    }

    #[test]
    fn empty_flag_name_matches_every_label() {
        let e = with_flags("q", &[("-", json!(true))]);
        assert!(matches(&e, "Anything"));
        assert_eq!(Category::new("Anything").first_rule(&e), Some(CategoryKind::AbilityFlag));
    }

    #[test]
    fn malformed_entity_matches_nothing_it_lacks() {
        let e = Entity::new("Nameless");
        for label in ["Ionia", "Mage", "Melee (< 250)", "Small (55-64)", "Has Stun"] {
            assert!(!matches(&e, label), "{label}");
        }
    }

    #[test]
    fn bucket_label_falls_through_to_flags() {
        let mut e = with_flags("passive", &[("melee", json!(true))]);
        e.range = Some(550.0);
        // not in the bucket, but "melee250" contains "melee"
        assert!(matches(&e, "Melee (< 250)"));
    }

    #[test]
    fn first_rule_reports_earliest_rule() {
        let mut e = with_flags("q", &[("isMage", json!(true))]);
        e.role = vec!["Mage".into()];
        let cat = Category::new("Mage");
        assert_eq!(cat.first_rule(&e), Some(CategoryKind::ListMembership));
        e.role.clear();
        assert_eq!(cat.first_rule(&e), Some(CategoryKind::AbilityFlag));
    }
}
