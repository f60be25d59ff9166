//! Shape checks for Indian banking and tax identifiers, and calendar dates.

use chrono::NaiveDate;

fn upper(c: char) -> bool {
    c.is_ascii_uppercase()
}

fn upper_or_digit(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit()
}

/// IFSC: four letters, a literal zero, then six letters or digits (`^[A-Z]{4}0[A-Z0-9]{6}$`).
pub fn is_valid_ifsc(code: &str) -> bool {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() != 11 {
        return false;
    }
    chars[..4].iter().all(|&c| upper(c))
        && chars[4] == '0'
        && chars[5..].iter().all(|&c| upper_or_digit(c))
}

/// PAN: five letters, four digits, one letter.
pub fn is_valid_pan(pan: &str) -> bool {
    let chars: Vec<char> = pan.chars().collect();
    if chars.len() != 10 {
        return false;
    }
    chars[..5].iter().all(|&c| upper(c))
        && chars[5..9].iter().all(|c| c.is_ascii_digit())
        && upper(chars[9])
}

/// GSTIN: two-digit state code, the holder's PAN, an entity digit or letter (not zero),
/// a literal `Z`, and a check character.
pub fn is_valid_gstin(gstin: &str) -> bool {
    let chars: Vec<char> = gstin.chars().collect();
    if chars.len() != 15 {
        return false;
    }
    let pan: String = chars[2..12].iter().collect();
    chars[..2].iter().all(|c| c.is_ascii_digit())
        && is_valid_pan(&pan)
        && upper_or_digit(chars[12])
        && chars[12] != '0'
        && chars[13] == 'Z'
        && upper_or_digit(chars[14])
}

/// Strict `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ifsc_accepts_canonical_code() {
        assert!(is_valid_ifsc("HDFC0001234"));
        assert!(is_valid_ifsc("SBIN0ABC123"));
    }

    #[test]
    /// Lowercase letters are not accepted.
    fn ifsc_rejects_lowercase() {
        assert!(!is_valid_ifsc("hdfc0001234"));
    }

    #[test]
    /// Too short, and the fifth character must be zero.
    fn ifsc_rejects_wrong_shape() {
        assert!(!is_valid_ifsc("HDFC123456"));
        assert!(!is_valid_ifsc("HDFC1001234"));
        assert!(!is_valid_ifsc("HDFC00012345"));
    }

    #[test]
    fn pan_shape() {
        assert!(is_valid_pan("ABCDE1234F"));
        assert!(!is_valid_pan("ABCD12345F"));
        assert!(!is_valid_pan("abcde1234f"));
    }

    #[test]
    fn gstin_shape() {
        assert!(is_valid_gstin("27ABCDE1234F1Z5"));
        assert!(!is_valid_gstin("27ABCDE1234F0Z5"));
        assert!(!is_valid_gstin("27ABCDE1234F1Y5"));
        assert!(!is_valid_gstin("ABCDE1234F1Z5"));
    }

    #[test]
    fn dates_must_be_iso() {
        assert!(parse_date("2024-02-29").is_some());
        assert!(parse_date("2023-02-29").is_none());
        assert!(parse_date("2024-2-9").is_none());
        assert!(parse_date("29/02/2024").is_none());
    }
}
