//! Place name normalization.

/// Canonicalize a free-text place name for exact-name station lookup.
///
/// Leading and trailing whitespace is removed and every internal run of
/// whitespace becomes a single `-`. Case, punctuation and non-ASCII
/// characters are left alone.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::normalize_location;
///
/// assert_eq!(normalize_location("  central   station  "), "central-station");
/// assert_eq!(normalize_location("Aalto-Yliopisto"), "Aalto-Yliopisto");
/// assert_eq!(normalize_location(""), "");
/// ```
pub fn normalize_location(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_internal_whitespace() {
        assert_eq!(normalize_location("central station"), "central-station");
        assert_eq!(normalize_location("central \t\n station"), "central-station");
        assert_eq!(normalize_location("a b  c   d"), "a-b-c-d");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(normalize_location("  central station  "), "central-station");
        assert_eq!(normalize_location("\tKeilaniemi\n"), "Keilaniemi");
    }

    #[test]
    fn empty_and_blank() {
        assert_eq!(normalize_location(""), "");
        assert_eq!(normalize_location("   "), "");
    }

    #[test]
    fn leaves_case_and_punctuation() {
        assert_eq!(normalize_location("Pasila (Itä)"), "Pasila-(Itä)");
        assert_eq!(normalize_location("HELSINKI"), "HELSINKI");
        assert_eq!(normalize_location("St. John's"), "St.-John's");
    }

    #[test]
    fn existing_hyphens_are_kept() {
        assert_eq!(normalize_location("Aalto - Yliopisto"), "Aalto---Yliopisto");
    }
}
