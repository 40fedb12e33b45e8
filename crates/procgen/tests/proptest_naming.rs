//! Property tests for classification and naming.

use procgen::{classify, moon_name, name_prefix, planet_name, resolve, Category, PlanetTheme};
use proptest::prelude::*;

proptest! {
    /// Property: classification depends only on the seed
    #[test]
    fn classification_is_pure(seed in any::<i64>()) {
        let a = classify(seed);
        prop_assert_eq!(a, classify(seed));
        prop_assert_eq!(a.category, a.theme.category());
    }

    /// Property: a category override always yields a theme of that category
    #[test]
    fn category_override_restricts_theme(seed in any::<i64>(), gaseous in any::<bool>()) {
        let category = if gaseous { Category::Gaseous } else { Category::Terran };
        let class = resolve(seed, None, Some(category));
        prop_assert_eq!(class.category, category);
        prop_assert_eq!(class.theme.category(), category);
    }

    /// Property: a theme override wins over everything
    #[test]
    fn theme_override_wins(seed in any::<i64>(), id in 0i32..11) {
        let theme = PlanetTheme::from_id_clamped(id);
        let class = resolve(seed, Some(theme), Some(Category::Terran));
        prop_assert_eq!(class.theme, theme);
    }

    /// Property: moon names start with the parent's first token and a hyphen
    #[test]
    fn moon_names_keep_parent_prefix(
        seed in any::<i64>(),
        world in any::<i64>(),
        x in -1000i32..1000,
        y in -1000i32..1000,
    ) {
        let parent = planet_name(world, x, y);
        let moon = moon_name(seed, &parent);
        let prefix = format!("{}-", name_prefix(&parent));
        prop_assert!(moon.starts_with(&prefix));
        prop_assert!(moon.len() > prefix.len());
    }
}
