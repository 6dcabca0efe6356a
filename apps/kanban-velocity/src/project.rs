//! Project classification from a card's description prefix.

/// Project codes in match priority. Earlier entries win when a description
/// could match more than one code, so this must stay an ordered table.
pub const PROJECT_CODES: [&str; 9] = ["DCP", "ESnR", "BSnR", "TM", "CT", "C360", "CCM", "EnS", "MAD"];

/// Fallback project for descriptions without a known prefix.
pub const UNKNOWN_PROJECT: &str = "Unknown";

/// Return the first code in `PROJECT_CODES` that prefixes `description`
/// (case-insensitive), or `UNKNOWN_PROJECT`.
pub fn classify(description: &str) -> &'static str {
    PROJECT_CODES
        .iter()
        .copied()
        .find(|code| starts_with_ignore_case(description, code))
        .unwrap_or(UNKNOWN_PROJECT)
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_case_insensitive_prefix() {
        assert_eq!(classify("DCP - onboarding flow"), "DCP");
        assert_eq!(classify("esnr: search tweaks"), "ESnR");
        assert_eq!(classify("mad-101 layout"), "MAD");
    }

    #[test]
    fn test_classify_earlier_code_wins() {
        // "CT" precedes "C360" and "CCM" in the table
        assert_eq!(classify("CT-door-lock issue"), "CT");
        assert_eq!(classify("C360 profile sync"), "C360");
        assert_eq!(classify("CCM billing"), "CCM");
    }

    #[test]
    fn test_classify_unknown_and_short_text() {
        assert_eq!(classify("Refactor logging"), UNKNOWN_PROJECT);
        assert_eq!(classify(""), UNKNOWN_PROJECT);
        assert_eq!(classify("C"), UNKNOWN_PROJECT);
        // prefix only, not substring
        assert_eq!(classify("fix for TM"), UNKNOWN_PROJECT);
    }

    #[test]
    fn test_classify_multibyte_boundary() {
        assert_eq!(classify("é"), UNKNOWN_PROJECT);
        assert_eq!(classify("TMé"), "TM");
    }
}
