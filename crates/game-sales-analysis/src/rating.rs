//! ESRB rating codes and their readable labels.

/// Label for a missing rating or the `RP` code.
pub const RATING_PENDING: &str = "rating pending";

/// ESRB code to label, matched exactly.
pub const ESRB_LABELS: [(&str, &str); 8] = [
    ("E", "everyone"),
    ("K-A", "everyone"),
    ("EC", "everyone"),
    ("E10+", "everyone 10+"),
    ("T", "teen 13+"),
    ("M", "mature 17+"),
    ("AO", "adults only 18+"),
    ("RP", RATING_PENDING),
];

/// Readable label for an ESRB code.
///
/// A missing code is [`RATING_PENDING`]; a code outside [`ESRB_LABELS`] is
/// returned unchanged.
///
/// ```
/// use game_sales_analysis::rating::esrb_label;
///
/// assert_eq!(esrb_label(Some("E10+")), "everyone 10+");
/// assert_eq!(esrb_label(None), "rating pending");
/// assert_eq!(esrb_label(Some("PEGI 3")), "PEGI 3");
/// ```
#[must_use]
pub fn esrb_label(code: Option<&str>) -> &str {
    let Some(code) = code else {
        return RATING_PENDING;
    };
    ESRB_LABELS
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(code, |&(_, label)| label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        let expected = [
            ("E", "everyone"),
            ("K-A", "everyone"),
            ("EC", "everyone"),
            ("E10+", "everyone 10+"),
            ("T", "teen 13+"),
            ("M", "mature 17+"),
            ("AO", "adults only 18+"),
            ("RP", "rating pending"),
        ];
        for (code, label) in expected {
            assert_eq!(esrb_label(Some(code)), label, "code {code}");
        }
    }

    #[test]
    fn test_missing_and_unknown_codes() {
        assert_eq!(esrb_label(None), RATING_PENDING);
        assert_eq!(esrb_label(Some("X")), "X");
        // matching is exact
        assert_eq!(esrb_label(Some("e")), "e");
    }

    #[test]
    fn test_idempotent() {
        let codes = [None, Some("E"), Some("M"), Some("RP"), Some("unrated")];
        for code in codes {
            let once = esrb_label(code);
            assert_eq!(esrb_label(Some(once)), once, "code {code:?}");
        }
    }
}
