//! Candidate-list rendering for diagnostic messages.

use std::fmt::Display;

/// Render a list of candidates for an "expected ... but got ..." message.
///
/// `["a"]` → `'a'`, `["a", "b"]` → `'a' or 'b'`,
/// `["a", "b", "c"]` → `'a', 'b' or 'c'`, `[]` → `nothing`.
/// With `quoted = false` the items are rendered bare (used for segment-kind
/// lists like `a key or an index`).
pub fn to_message<T: Display>(items: &[T], quoted: bool, conj: &str) -> String {
    let render = |item: &T| {
        if quoted {
            format!("'{item}'")
        } else {
            item.to_string()
        }
    };
    match items {
        [] => "nothing".to_string(),
        [single] => render(single),
        [init @ .., last] => {
            let init = init.iter().map(render).collect::<Vec<_>>().join(", ");
            format!("{init} {conj} {}", render(last))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_empty_as_nothing() {
        assert_eq!(to_message::<&str>(&[], true, "or"), "nothing");
    }

    #[test]
    fn renders_single_item() {
        assert_eq!(to_message(&["age"], true, "or"), "'age'");
    }

    #[test]
    fn renders_two_items_with_conjunction() {
        assert_eq!(to_message(&["grant", "revoke"], true, "or"), "'grant' or 'revoke'");
    }

    #[test]
    fn renders_many_items_with_commas() {
        assert_eq!(
            to_message(&["a key", "an index"], false, "or"),
            "a key or an index"
        );
        assert_eq!(to_message(&["a", "b", "c"], true, "or"), "'a', 'b' or 'c'");
    }
}
