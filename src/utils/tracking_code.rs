use rand::Rng;

pub const TRACKING_CODE_PREFIX: &str = "SW";
pub const TRACKING_CODE_LENGTH: usize = 6;

// No 0/O/1/I, they are too easy to misread on a printed ticket
pub const TRACKING_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Draws a fresh code. Uniqueness is left to the storage constraint.
pub fn generate_tracking_code() -> String {
    let mut rng = rand::thread_rng();
    let mut code = String::with_capacity(TRACKING_CODE_PREFIX.len() + TRACKING_CODE_LENGTH);
    code.push_str(TRACKING_CODE_PREFIX);
    for _ in 0..TRACKING_CODE_LENGTH {
        let idx = rng.gen_range(0..TRACKING_CODE_ALPHABET.len());
        code.push(TRACKING_CODE_ALPHABET[idx] as char);
    }
    code
}

/// Canonical form used for lookups: surrounding whitespace removed, upper case.
pub fn normalize_tracking_code(input: &str) -> String {
    input.trim().to_uppercase()
}

pub fn is_well_formed(code: &str) -> bool {
    code.len() == TRACKING_CODE_PREFIX.len() + TRACKING_CODE_LENGTH
        && code.starts_with(TRACKING_CODE_PREFIX)
        && code[TRACKING_CODE_PREFIX.len()..]
            .bytes()
            .all(|b| TRACKING_CODE_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_well_formed() {
        for _ in 0..500 {
            let code = generate_tracking_code();
            assert!(is_well_formed(&code), "bad code {}", code);
        }
    }

    #[test]
    fn ambiguous_characters_never_appear() {
        for _ in 0..500 {
            let code = generate_tracking_code();
            assert!(!code[2..].contains(['0', 'O', '1', 'I']));
        }
    }

    #[test]
    fn normalize_upper_cases_and_trims() {
        assert_eq!(normalize_tracking_code(" sw1a2b3c "), "SW1A2B3C");
    }

    #[test]
    fn malformed_codes_are_detected() {
        assert!(is_well_formed("SWABC234"));
        assert!(!is_well_formed("SWABC23"));
        assert!(!is_well_formed("XXABC234"));
        assert!(!is_well_formed("SWABC230"));
    }
}
