//! Excel-style column letter arithmetic.

use crate::error::XlHelperError;

/// Parses a column letter such as "A" or "AB" into a 0-based column index.
///
/// Letters are case-insensitive. Anything other than ASCII letters is
/// rejected with [`XlHelperError::InvalidColumnReference`].
pub fn column_to_index(column: &str) -> Result<u32, XlHelperError> {
    if column.is_empty() || !column.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(XlHelperError::InvalidColumnReference {
            column: column.to_string(),
        });
    }
    let mut index: u32 = 0;
    for letter in column.chars() {
        let digit = letter.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        index = index
            .checked_mul(26)
            .and_then(|value| value.checked_add(digit))
            .ok_or_else(|| XlHelperError::InvalidColumnReference {
                column: column.to_string(),
            })?;
    }
    Ok(index - 1)
}

/// Converts a 0-based column index to its column letter ("A", "B", ..., "AA").
pub fn index_to_column(index: u32) -> String {
    let mut index = index + 1;
    let mut column = String::new();
    while index > 0 {
        index -= 1;
        let letter = char::from_u32('A' as u32 + index % 26).expect("uppercase letter");
        column.insert(0, letter);
        index /= 26;
    }
    column
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_letters() {
        assert_eq!(column_to_index("A").unwrap(), 0);
        assert_eq!(column_to_index("B").unwrap(), 1);
        assert_eq!(column_to_index("Z").unwrap(), 25);
    }

    #[test]
    fn multi_letters() {
        assert_eq!(column_to_index("AA").unwrap(), 26);
        assert_eq!(column_to_index("AZ").unwrap(), 51);
        assert_eq!(column_to_index("BA").unwrap(), 52);
        assert_eq!(column_to_index("ZZ").unwrap(), 701);
        assert_eq!(column_to_index("AAA").unwrap(), 702);
    }

    #[test]
    fn lowercase_accepted() {
        assert_eq!(column_to_index("c").unwrap(), 2);
        assert_eq!(column_to_index("aa").unwrap(), 26);
    }

    #[test]
    fn invalid_input_rejected() {
        for column in ["", "1", "A1", "A B", "Ä", "ZZZZZZZZZZ"] {
            assert!(matches!(
                column_to_index(column),
                Err(XlHelperError::InvalidColumnReference { .. })
            ));
        }
    }

    #[test]
    fn round_trips() {
        for index in [0, 1, 25, 26, 51, 52, 701, 702, 16_383] {
            assert_eq!(column_to_index(&index_to_column(index)).unwrap(), index);
        }
    }
}
