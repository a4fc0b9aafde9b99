/// Canonical node key for a raw identifier: every character outside
/// `[A-Za-z0-9_]` is removed, the rest keep their order.
pub fn normalize_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

pub fn is_normalized(id: &str) -> bool {
    id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation_and_spaces() {
        assert_eq!(normalize_id("Luke Skywalker"), "LukeSkywalker");
        assert_eq!(normalize_id("/wiki/Darth_Vader#Legacy"), "wikiDarth_VaderLegacy");
        assert_eq!(normalize_id("C-3PO"), "C3PO");
    }

    #[test]
    fn test_non_ascii_letters_are_removed() {
        assert_eq!(normalize_id("Padmé Amidala"), "PadmAmidala");
        assert_eq!(normalize_id("Звезда"), "");
    }

    #[test]
    fn test_fully_stripped_input_is_empty() {
        assert_eq!(normalize_id("!!! ---"), "");
        assert_eq!(normalize_id(""), "");
    }

    #[test]
    fn test_idempotent() {
        for raw in ["R2-D2", "a b_c", "___", "x/y/z?q=1", "ÆØÅ 42"] {
            let once = normalize_id(raw);
            assert_eq!(normalize_id(&once), once);
            assert!(is_normalized(&once));
        }
    }
}
