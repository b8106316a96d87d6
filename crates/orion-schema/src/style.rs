//! Utility-class editing for `className` strings.

use regex::Regex;
use std::sync::OnceLock;

/// Width classes: `w-12`, `w-1/2`, `w-full`, `w-auto`, `w-screen`.
pub const WIDTH_FAMILY: &str = r"^w-(\d+(/\d+)?|full|auto|screen)$";

/// Replace every class matching `family` with `new_class`.
///
/// Classes outside the family keep their order and the new class is
/// appended. An empty `new_class` just strips the family.
pub fn replace_class(current: &str, family: &Regex, new_class: &str) -> String {
    let mut classes: Vec<&str> = current
        .split_whitespace()
        .filter(|class| !family.is_match(class))
        .collect();
    if !new_class.is_empty() && !classes.contains(&new_class) {
        classes.push(new_class);
    }
    classes.join(" ")
}

/// Swap the width class of a `className` string.
pub fn set_width_class(current: &str, width: &str) -> String {
    static FAMILY: OnceLock<Regex> = OnceLock::new();
    let family = FAMILY.get_or_init(|| Regex::new(WIDTH_FAMILY).expect("width pattern compiles"));
    replace_class(current, family, width)
}
