//! Syllable-based names for planets, moons and asteroids.
//!
//! Pure string construction from fixed alphabets; the same inputs always give
//! the same name.

use crate::streams;
use gen_core::{grid_seed, Seed, SeededRandom};

const CONSONANTS: [&str; 20] = [
    "b", "c", "d", "f", "g", "h", "j", "k", "l", "m", "n", "p", "r", "s", "t", "v", "x", "z",
    "th", "kr",
];
const VOWELS: [&str; 6] = ["a", "e", "i", "o", "u", "y"];

/// Fallback prefix for moons whose parent has no usable name.
const MOON_FALLBACK_PREFIX: &str = "Moon";

fn syllable(rng: &mut SeededRandom) -> String {
    let c = CONSONANTS[rng.next_index(CONSONANTS.len())];
    let v = VOWELS[rng.next_index(VOWELS.len())];
    format!("{}{}", c, v)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Consonant-vowel-consonant-vowel, capitalized.
fn stem(rng: &mut SeededRandom) -> String {
    let first = syllable(rng);
    let second = syllable(rng);
    capitalize(&format!("{}{}", first, second))
}

/// Planet name for the planet at grid cell `(grid_x, grid_y)` of world `seed`.
///
/// A CV-CV stem with, depending on the seed, no suffix, a hyphenated syllable
/// ("Xylo-Ra") or a number derived from the grid coordinates ("Xylo-7").
pub fn planet_name(seed: Seed, grid_x: i32, grid_y: i32) -> String {
    let mut rng = SeededRandom::derive(grid_seed(seed, grid_x, grid_y), streams::NAME);
    let name = stem(&mut rng);

    match rng.next_int(0, 99) {
        0..=54 => name,
        55..=79 => format!("{}-{}", name, capitalize(&syllable(&mut rng))),
        _ => {
            let number =
                (grid_x.unsigned_abs() as u64 * 31 + grid_y.unsigned_abs() as u64 * 17) % 97 + 1;
            format!("{}-{}", name, number)
        }
    }
}

/// First space/hyphen-delimited token of `parent_name`.
pub fn name_prefix(parent_name: &str) -> &str {
    parent_name
        .split(|c: char| c == ' ' || c == '-')
        .find(|token| !token.is_empty())
        .unwrap_or(MOON_FALLBACK_PREFIX)
}

/// Moon name: the parent's first name token, a hyphen, then the moon's own syllables.
pub fn moon_name(seed: Seed, parent_name: &str) -> String {
    let mut rng = SeededRandom::derive(seed, streams::NAME);
    format!("{}-{}", name_prefix(parent_name), stem(&mut rng))
}

/// Survey designation for an asteroid, e.g. "KX-0417".
pub fn asteroid_designation(seed: Seed) -> String {
    let mut rng = SeededRandom::derive(seed, streams::NAME);
    let letters: String = (0..2)
        .map(|_| (b'A' + rng.next_int(0, 25) as u8) as char)
        .collect();
    format!("{}-{:04}", letters, rng.next_int(0, 9999))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planet_name_deterministic() {
        for seed in [0, 42, -19, 123_456_789] {
            assert_eq!(planet_name(seed, 3, -2), planet_name(seed, 3, -2));
        }
    }

    #[test]
    fn planet_name_is_capitalized_ascii() {
        for seed in 0..200 {
            let name = planet_name(seed, 0, 0);
            assert!(name.chars().next().unwrap().is_ascii_uppercase(), "{}", name);
            assert!(name.len() >= 4);
        }
    }

    #[test]
    fn planet_names_vary() {
        let names: std::collections::HashSet<String> = (0..50).map(|s| planet_name(s, 0, 0)).collect();
        assert!(names.len() > 40);
    }

    #[test]
    fn moon_name_keeps_parent_prefix() {
        for seed in 0..50 {
            assert!(moon_name(seed, "Xylo-7").starts_with("Xylo-"));
            assert!(moon_name(seed, "Xylo Prime").starts_with("Xylo-"));
        }
        assert_eq!(moon_name(9, "Xylo-7"), moon_name(9, "Xylo-7"));
    }

    #[test]
    fn moon_name_without_parent_uses_fallback() {
        assert!(moon_name(1, "").starts_with("Moon-"));
        assert!(moon_name(1, " - ").starts_with("Moon-"));
    }

    #[test]
    fn name_prefix_skips_leading_separators() {
        assert_eq!(name_prefix("-Kara Vos"), "Kara");
        assert_eq!(name_prefix("Tovi"), "Tovi");
    }

    #[test]
    fn asteroid_designation_shape() {
        let d = asteroid_designation(77);
        assert_eq!(d.len(), 7);
        assert_eq!(&d[2..3], "-");
        assert_eq!(d, asteroid_designation(77));
    }
}
