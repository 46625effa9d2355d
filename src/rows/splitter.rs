use crate::engine::error::{DiffError, DiffResult};
use regex::Regex;

/// Tokenizes one joined line into the units the inline diff compares.
pub type Splitter = Box<dyn Fn(&str) -> Vec<String> + Send + Sync>;

/// Word boundaries: a whitespace run or a single punctuation/bracket
/// delimiter. Delimiters survive as their own tokens so the rejoined text
/// is byte-identical to the input.
pub const SPLIT_BY_WORD_PATTERN: &str = r"\s+|[,.\[\](){}/\\*+\-#]";

/// One token per character.
pub fn character_splitter() -> Splitter {
    Box::new(|line| line.chars().map(String::from).collect())
}

/// Word-level splitter over [`SPLIT_BY_WORD_PATTERN`].
pub fn word_splitter() -> DiffResult<Splitter> {
    pattern_splitter(SPLIT_BY_WORD_PATTERN)
}

/// Splitter over a caller-supplied delimiter pattern, compiled eagerly so a
/// bad pattern fails at generator build time.
pub fn pattern_splitter(pattern: &str) -> DiffResult<Splitter> {
    let regex = Regex::new(pattern).map_err(|source| DiffError::InvalidConfiguration {
        reason: format!("split pattern {pattern:?} does not compile: {source}"),
    })?;
    Ok(Box::new(move |line| {
        split_preserving_delimiters(line, &regex)
    }))
}

fn split_preserving_delimiters(line: &str, pattern: &Regex) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for matched in pattern.find_iter(line) {
        if matched.start() > last {
            tokens.push(line[last..matched.start()].to_string());
        }
        tokens.push(matched.as_str().to_string());
        last = matched.end();
    }
    if last < line.len() {
        tokens.push(line[last..].to_string());
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("abc", vec!["a", "b", "c"])]
    #[case("", Vec::<&str>::new())]
    #[case("a\nb", vec!["a", "\n", "b"])]
    fn character_splitter_yields_one_token_per_char(
        #[case] line: &str,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(character_splitter()(line), expected);
    }

    #[rstest]
    #[case("hello world", vec!["hello", " ", "world"])]
    #[case("a b\nc d", vec!["a", " ", "b", "\n", "c", " ", "d"])]
    #[case("x.y,z", vec!["x", ".", "y", ",", "z"])]
    #[case("f(a)-b", vec!["f", "(", "a", ")", "-", "b"])]
    #[case("word", vec!["word"])]
    fn word_splitter_keeps_delimiters_as_tokens(#[case] line: &str, #[case] expected: Vec<&str>) {
        assert_eq!(word_splitter().unwrap()(line), expected);
    }

    #[rstest]
    fn rejoined_word_tokens_reproduce_the_input() {
        let line = "some text, with [brackets] and  double  spaces";
        let tokens = word_splitter().unwrap()(line);
        assert_eq!(tokens.concat(), line);
    }

    #[rstest]
    fn invalid_pattern_is_rejected_eagerly() {
        let result = pattern_splitter("[unclosed");
        assert!(matches!(
            result,
            Err(DiffError::InvalidConfiguration { .. })
        ));
    }
}
