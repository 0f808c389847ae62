//! Heuristic parsing of free-text ingredient lines.
//!
//! A line is read as `[count] [unit] ingredient`. Counts may be whole or
//! decimal numbers, fractions (`1/2`), unicode fractions (`¾`), or mixed
//! numbers (`4 1/2`, `1-1/2`, `1½`). Units are matched against a fixed
//! vocabulary and normalized to a short form. Parsing never fails; a line
//! that does not start with a quantity is kept whole as the ingredient text.

use crate::model::Ingredient;

/// Recognized unit spellings and their normalized form
const UNITS: &[(&str, &str)] = &[
    ("tablespoons", "tbsp"),
    ("tablespoon", "tbsp"),
    ("tbsps", "tbsp"),
    ("tbsp", "tbsp"),
    ("tbs", "tbsp"),
    ("teaspoons", "tsp"),
    ("teaspoon", "tsp"),
    ("tsps", "tsp"),
    ("tsp", "tsp"),
    ("cups", "cup"),
    ("cup", "cup"),
    ("ounces", "oz"),
    ("ounce", "oz"),
    ("oz", "oz"),
    ("pounds", "pound"),
    ("pound", "pound"),
    ("lbs", "pound"),
    ("lb", "pound"),
    ("kilograms", "kg"),
    ("kilogram", "kg"),
    ("kg", "kg"),
    ("grams", "g"),
    ("gram", "g"),
    ("g", "g"),
];

const UNICODE_FRACTIONS: &[(char, f64)] = &[
    ('¼', 0.25),
    ('½', 0.5),
    ('¾', 0.75),
    ('⅓', 1.0 / 3.0),
    ('⅔', 2.0 / 3.0),
    ('⅕', 0.2),
    ('⅖', 0.4),
    ('⅗', 0.6),
    ('⅘', 0.8),
    ('⅙', 1.0 / 6.0),
    ('⅚', 5.0 / 6.0),
    ('⅛', 0.125),
    ('⅜', 0.375),
    ('⅝', 0.625),
    ('⅞', 0.875),
];

/// Parse one ingredient line
pub fn parse_ingredient(line: &str) -> Ingredient {
    let line = line.trim();
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let Some((count, consumed)) = parse_count(&tokens) else {
        return Ingredient {
            count: None,
            unit: String::new(),
            ingredient: line.to_string(),
        };
    };

    let rest = &tokens[consumed..];
    let (unit, rest) = match rest.split_first() {
        Some((first, tail)) => match normalize_unit(first) {
            Some(unit) => (unit.to_string(), tail),
            None => (String::new(), rest),
        },
        None => (String::new(), rest),
    };

    Ingredient {
        count: Some(count),
        unit,
        ingredient: rest.join(" "),
    }
}

/// Leading quantity and how many tokens it spans
fn parse_count(tokens: &[&str]) -> Option<(f64, usize)> {
    let first = *tokens.first()?;
    let whole = parse_quantity(first).filter(|n| n.is_finite())?;

    // "4 1/2" reads as a mixed number when the first part is whole
    if whole.fract() == 0.0 {
        if let Some(fraction) = tokens.get(1).and_then(|t| parse_fraction(t)) {
            let mixed = whole + fraction;
            if mixed.is_finite() {
                return Some((mixed, 2));
            }
        }
    }

    Some((whole, 1))
}

/// A single token as a quantity: `2`, `0.5`, `1/2`, `¾`, `1½`, `1-1/2`
fn parse_quantity(token: &str) -> Option<f64> {
    if let Some(value) = parse_fraction(token) {
        return Some(value);
    }

    if let Some((whole, fraction)) = token.split_once('-') {
        return Some(parse_number(whole)? + parse_fraction(fraction)?);
    }

    let mut chars = token.chars();
    if let Some(last) = chars.next_back() {
        if let Some(fraction) = unicode_fraction(last) {
            let whole = chars.as_str();
            if whole.is_empty() {
                return Some(fraction);
            }
            return Some(parse_number(whole)? + fraction);
        }
    }

    parse_number(token)
}

/// A proper fraction: `1/2` or a single unicode fraction character
fn parse_fraction(token: &str) -> Option<f64> {
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(value) = unicode_fraction(c) {
            return Some(value);
        }
    }

    let (numerator, denominator) = token.split_once('/')?;
    let numerator = parse_number(numerator)?;
    let denominator = parse_number(denominator)?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator).filter(|n| n.is_finite())
}

fn parse_number(token: &str) -> Option<f64> {
    let valid = !token.is_empty()
        && token.chars().all(|c| c.is_ascii_digit() || c == '.')
        && token.chars().any(|c| c.is_ascii_digit());
    if !valid {
        return None;
    }
    token.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn unicode_fraction(c: char) -> Option<f64> {
    UNICODE_FRACTIONS
        .iter()
        .find(|(symbol, _)| *symbol == c)
        .map(|(_, value)| *value)
}

fn normalize_unit(token: &str) -> Option<&'static str> {
    let token = token.trim_end_matches(['.', ',']).to_lowercase();
    UNITS
        .iter()
        .find(|(spelling, _)| *spelling == token)
        .map(|(_, unit)| *unit)
}
