//! A1-style cell reference helpers.

/// Converts column letters to a 0-based column index (A = 0, Z = 25, AA = 26).
/// Returns None for an empty or non-alphabetic input.
pub fn col_to_index(letters: &str) -> Option<usize> {
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    letters
        .to_ascii_uppercase()
        .chars()
        .map(|c| c as usize - 'A' as usize + 1)
        .try_fold(0usize, |index, digit| index.checked_mul(26)?.checked_add(digit))
        .map(|column| column - 1)
}

/// Converts a 1-based row number string to a 0-based row index.
/// Returns None for an empty string, zero, or a non-numeric input.
pub fn row_to_index(number: &str) -> Option<usize> {
    number
        .parse::<usize>()
        .ok()
        .filter(|row| *row > 0)
        .map(|row| row - 1)
}

/// Converts a 0-based column index to column letters.
pub fn index_to_col(index: usize) -> String {
    let mut column = index + 1;
    let mut letters = String::new();
    while column > 0 {
        column -= 1;
        let digit = char::from_u32(65 + (column % 26) as u32).expect("Hardcode letters");
        column /= 26;
        letters.insert(0, digit);
    }
    letters
}
