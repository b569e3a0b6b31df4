//! Keystroke filtering for command arguments

use super::tree::CommandTree;

/// Whether `key` may be inserted into the line
///
/// Only trees with an argument and a key filter ever refuse a key, and only
/// once every fixed stage has been matched (the caret is in the argument
/// slot). The filter is a guard, not a validator.
pub fn accepts_key<A>(tree: &CommandTree<A>, matched_depth: usize, key: char) -> bool {
    if matched_depth < tree.depth() {
        return true;
    }

    match tree.argument().and_then(|argument| argument.key_filter()) {
        Some(filter) => filter(key),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn any(_: &str) -> Result<(), String> {
        Ok(())
    }

    #[test]
    fn test_no_argument_accepts_everything() {
        let tree = CommandTree::builder(()).stage(["quit"]).build().unwrap();
        assert!(accepts_key(&tree, 1, 'x'));
        assert!(accepts_key(&tree, 1, '7'));
    }

    #[test]
    fn test_argument_without_filter_accepts_everything() {
        let tree = CommandTree::builder(())
            .stage(["rename"])
            .with_argument("<name>")
            .validator(any)
            .build()
            .unwrap();
        assert!(tree.accepts_key(1, 'x'));
    }

    #[test]
    fn test_filter_decides_in_argument_slot() {
        let tree = CommandTree::builder(())
            .stage(["due"])
            .stage(["day"])
            .with_argument("<day>")
            .validator(any)
            .key_filter(|c| c.is_ascii_digit())
            .build()
            .unwrap();

        assert!(tree.accepts_key(2, '4'));
        assert!(!tree.accepts_key(2, 'x'));
    }

    #[test]
    fn test_filter_ignored_before_argument_slot() {
        let tree = CommandTree::builder(())
            .stage(["due"])
            .stage(["day"])
            .with_argument("<day>")
            .validator(any)
            .key_filter(|c| c.is_ascii_digit())
            .build()
            .unwrap();

        assert!(tree.accepts_key(0, 'd'));
        assert!(tree.accepts_key(1, 'a'));
    }
}
