//! Slug derivation for generated page paths.
//!
//! Every generated URL segment (realisation pages, category filter pages,
//! service pages) goes through [`slugify`] so the same title always lands at
//! the same path. Content is authored in French, so diacritics are folded to
//! their ASCII base letter before anything else is dropped:
//!
//! - `"Extension Bois"` → `extension-bois`
//! - `"Charpente traditionnelle"` → `charpente-traditionnelle`
//! - `"Aménagement d'intérieur"` → `amenagement-d-interieur`

/// Fold a character to its ASCII base letter, for the accents that actually
/// occur in French content. Unmapped non-ASCII characters are dropped.
fn fold_char(c: char) -> Option<char> {
    let folded = match c {
        'à' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'î' | 'ï' => 'i',
        'ô' | 'ö' => 'o',
        'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'œ' => 'o',
        c if c.is_ascii() => c,
        _ => return None,
    };
    Some(folded)
}

/// Derive a case- and diacritic-insensitive sort key.
///
/// Plain `to_lowercase()` ordering puts accented initials after `z`, so
/// "Étagère" would sort after "Zinc". Folding first keeps French titles in
/// the order a reader expects. Unmapped characters pass through unchanged.
pub fn sort_key(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| fold_char(c).unwrap_or(c))
        .collect()
}

/// Derive a URL slug from a display title.
///
/// Lowercases, folds diacritics, and collapses every run of
/// non-alphanumeric characters into a single dash. Returns an empty string
/// for input with no usable characters; callers must handle that case
/// (see [`unique_slug`]).
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.to_lowercase().chars() {
        match fold_char(c) {
            Some(c) if c.is_ascii_alphanumeric() => {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(c);
            }
            _ => pending_dash = true,
        }
    }
    slug
}

/// Derive a slug that is unique within `taken`, and record it there.
///
/// Duplicate titles get a numeric suffix (`escalier`, `escalier-2`, ...).
/// Titles that slugify to nothing fall back to `page`.
pub fn unique_slug(title: &str, taken: &mut Vec<String>) -> String {
    let base = {
        let s = slugify(title);
        if s.is_empty() { "page".to_string() } else { s }
    };
    let mut candidate = base.clone();
    let mut n = 1;
    while taken.iter().any(|t| t == &candidate) {
        n += 1;
        candidate = format!("{base}-{n}");
    }
    taken.push(candidate.clone());
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_title() {
        assert_eq!(slugify("Extension Bois"), "extension-bois");
    }

    #[test]
    fn accents_folded() {
        assert_eq!(
            slugify("Charpente traditionnelle en chêne"),
            "charpente-traditionnelle-en-chene"
        );
    }

    #[test]
    fn apostrophes_become_dashes() {
        assert_eq!(slugify("Aménagement d'intérieur"), "amenagement-d-interieur");
    }

    #[test]
    fn punctuation_runs_collapse() {
        assert_eq!(slugify("Escalier  --  sur mesure !"), "escalier-sur-mesure");
    }

    #[test]
    fn no_leading_or_trailing_dash() {
        assert_eq!(slugify("  (Rénovation)  "), "renovation");
    }

    #[test]
    fn digits_kept() {
        assert_eq!(slugify("Maison 1930"), "maison-1930");
    }

    #[test]
    fn unusable_input_is_empty() {
        assert_eq!(slugify("—— !!"), "");
    }

    #[test]
    fn sort_key_folds_case_and_accents() {
        assert_eq!(sort_key("Étagère"), "etagere");
        assert!(sort_key("Étagère") < sort_key("Zinc"));
    }

    #[test]
    fn unique_slug_plain() {
        let mut taken = Vec::new();
        assert_eq!(unique_slug("Escalier", &mut taken), "escalier");
    }

    #[test]
    fn unique_slug_suffixes_duplicates() {
        let mut taken = Vec::new();
        assert_eq!(unique_slug("Escalier", &mut taken), "escalier");
        assert_eq!(unique_slug("Escalier", &mut taken), "escalier-2");
        assert_eq!(unique_slug("Escalier", &mut taken), "escalier-3");
    }

    #[test]
    fn unique_slug_empty_falls_back() {
        let mut taken = Vec::new();
        assert_eq!(unique_slug("!!!", &mut taken), "page");
        assert_eq!(unique_slug("???", &mut taken), "page-2");
    }
}
