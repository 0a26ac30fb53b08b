//! Level-order array encoding
//!
//! Text form: `[-10,9,20,null,null,15,7]`
//! Tokens are read left to right; `null` / `nil` mark an absent node and any
//! token that is not an integer is read as absent too.

use tracing::warn;

/// Level-order sequence of optional values
pub type LevelOrder = Vec<Option<i64>>;

/// Reserved tokens for an absent node
const ABSENT_TOKENS: [&str; 2] = ["null", "nil"];

/// Parse the bracketed text form into a level-order sequence
///
/// Never fails: an empty body yields an empty sequence, bad tokens become `None`.
pub fn parse_level_order(text: &str) -> LevelOrder {
    let body = text
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim();

    if body.is_empty() {
        return Vec::new();
    }

    body.split(',').map(parse_token).collect()
}

fn parse_token(raw: &str) -> Option<i64> {
    let token = raw.trim();
    if ABSENT_TOKENS.contains(&token) {
        return None;
    }
    match token.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(token, "unparseable level-order token read as absent");
            None
        }
    }
}

/// Format a level-order sequence back into its text form
pub fn format_level_order(values: &[Option<i64>]) -> String {
    let body: Vec<String> = values
        .iter()
        .map(|v| match v {
            Some(value) => value.to_string(),
            None => "null".to_string(),
        })
        .collect();
    format!("[{}]", body.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_input() {
        assert_eq!(
            parse_level_order("[-10,9,20,null,null,15,7]"),
            vec![Some(-10), Some(9), Some(20), None, None, Some(15), Some(7)]
        );
    }

    #[test]
    fn test_parse_empty_forms() {
        assert!(parse_level_order("[]").is_empty());
        assert!(parse_level_order("").is_empty());
        assert!(parse_level_order("  [  ]  ").is_empty());
    }

    #[test]
    fn test_bad_tokens_become_absent() {
        assert_eq!(
            parse_level_order("[1, x, nil, 2.5, ,3]"),
            vec![Some(1), None, None, None, None, Some(3)]
        );
    }

    #[test]
    fn test_format_matches_input_style() {
        let values = parse_level_order("[ 1 , null , 2 ]");
        assert_eq!(format_level_order(&values), "[1,null,2]");
    }
}
