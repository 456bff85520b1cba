//! CPF handling: cleaning, display formatting and check-digit
//! validation. All pure functions; persisted state never enters here.

/// Strip everything but ASCII digits. Empty input yields an empty string.
pub fn clean_cpf(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Render 11 cleaned digits in the canonical `NNN.NNN.NNN-NN` form.
/// Anything that does not clean to exactly 11 digits comes back as-is.
pub fn format_cpf(raw: &str) -> String {
    let digits = clean_cpf(raw);
    if digits.len() != 11 {
        return raw.to_string();
    }
    format!("{}.{}.{}-{}", &digits[..3], &digits[3..6], &digits[6..9], &digits[9..])
}

/// Check-digit validation of a CPF, punctuated or bare.
///
/// Exactly 11 digits after cleaning, not all identical (repeated
/// sequences satisfy the arithmetic but are not issued), and both
/// verifier digits must match the mod-11 scheme.
pub fn is_valid_cpf(raw: &str) -> bool {
    let cpf = clean_cpf(raw);
    if cpf.len() != 11 {
        return false;
    }

    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    digits[9] == check_digit(&digits[..9]) && digits[10] == check_digit(&digits[..10])
}

/// Mod-11 verifier over a digit prefix: weights descend from
/// `prefix.len() + 1` to 2; remainders below 2 clamp to 0.
fn check_digit(prefix: &[u32]) -> u32 {
    let top = prefix.len() as u32 + 1;
    let sum: u32 = prefix.iter().zip((2..=top).rev()).map(|(d, w)| d * w).sum();
    match sum % 11 {
        0 | 1 => 0,
        r => 11 - r,
    }
}
