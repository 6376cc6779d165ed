//! Static achievement definitions.

/// Static definition of an achievement. Mutable unlock state lives in the
/// progress store, never here.
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub points: u32,
    pub secret: bool,
}

/// All achievement definitions in display order.
pub const CATALOG: &[AchievementDef] = &[
    // ═══════════════════════════════════════════════════════════════
    // STOREFRONT ACHIEVEMENTS
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: "first_quote",
        title: "First Quote",
        description: "Request your first paint quote",
        icon: "🧾",
        points: 10,
        secret: false,
    },
    AchievementDef {
        id: "first_simulation",
        title: "Room Visionary",
        description: "Run your first room color simulation",
        icon: "🖼️",
        points: 15,
        secret: false,
    },
    AchievementDef {
        id: "color_explorer",
        title: "Color Explorer",
        description: "Browse 25 colors in the catalog",
        icon: "🌈",
        points: 10,
        secret: false,
    },
    AchievementDef {
        id: "palette_curator",
        title: "Palette Curator",
        description: "Save your first custom palette",
        icon: "🎨",
        points: 15,
        secret: false,
    },
    AchievementDef {
        id: "first_order",
        title: "Fresh Coat",
        description: "Place your first order",
        icon: "🛒",
        points: 20,
        secret: false,
    },
    AchievementDef {
        id: "repeat_customer",
        title: "Repeat Customer",
        description: "Place five orders",
        icon: "🏅",
        points: 30,
        secret: false,
    },
    AchievementDef {
        id: "first_review",
        title: "Critic's Brush",
        description: "Write your first product review",
        icon: "✍️",
        points: 15,
        secret: false,
    },
    AchievementDef {
        id: "finish_connoisseur",
        title: "Finish Connoisseur",
        description: "Order three different paint finishes",
        icon: "✨",
        points: 20,
        secret: false,
    },
    AchievementDef {
        id: "eco_painter",
        title: "Eco Painter",
        description: "Order from a low-VOC paint line",
        icon: "🌿",
        points: 20,
        secret: false,
    },
    AchievementDef {
        id: "weekend_project",
        title: "Weekend Project",
        description: "Run a simulation and request a quote on the same day",
        icon: "🔨",
        points: 25,
        secret: false,
    },
    // ═══════════════════════════════════════════════════════════════
    // SECRET ACHIEVEMENTS
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: "secret_guide_1",
        title: "Store Insider",
        description: "Keep exploring the store...",
        icon: "🗝️",
        points: 50,
        secret: true,
    },
    AchievementDef {
        id: "secret_guide_2",
        title: "Master of Hues",
        description: "Only the most dedicated painters find this",
        icon: "👑",
        points: 100,
        secret: true,
    },
];

/// Unlock requirements for secret achievements: id → number of unlocked
/// ordinary achievements needed. New secret tiers are added here, not in
/// the evaluator.
pub const SECRET_REQUIREMENTS: &[(&str, usize)] =
    &[("secret_guide_1", 3), ("secret_guide_2", 5)];

/// Look up a catalog definition by id.
pub fn find_def(id: &str) -> Option<&'static AchievementDef> {
    CATALOG.iter().find(|def| def.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_shape() {
        assert_eq!(CATALOG.len(), 12);
        assert_eq!(CATALOG.iter().filter(|d| d.secret).count(), 2);
        assert_eq!(CATALOG.iter().filter(|d| !d.secret).count(), 10);
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let ids: HashSet<&str> = CATALOG.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn test_secret_requirements_reference_secret_catalog_entries() {
        for (id, required) in SECRET_REQUIREMENTS {
            let def = find_def(id).expect("requirement id exists in catalog");
            assert!(def.secret, "{id} must be a secret achievement");
            assert!(*required > 0);
        }
    }

    #[test]
    fn test_find_def() {
        assert_eq!(find_def("first_quote").unwrap().points, 10);
        assert!(find_def("no_such_achievement").is_none());
    }
}
