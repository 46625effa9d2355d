use crate::engine::{self, Delta, DiffResult};
use crate::rows::splitter::{self, Splitter};
use crate::rows::{DiffRow, RowKind};

/// Maps an `opening` flag to the wrapper text spliced around changed spans.
pub type TagGenerator = Box<dyn Fn(bool) -> String + Send + Sync>;

const NEW_LINE: &str = "\n";
const WRAP_MARKER: &str = "<br/>";

fn default_old_tag() -> TagGenerator {
    Box::new(|opening| {
        if opening {
            r#"<span class="editOldInline">"#.to_string()
        } else {
            "</span>".to_string()
        }
    })
}

fn default_new_tag() -> TagGenerator {
    Box::new(|opening| {
        if opening {
            r#"<span class="editNewInline">"#.to_string()
        } else {
            "</span>".to_string()
        }
    })
}

/// Trims the ends of a line and collapses internal whitespace runs to a
/// single space. Also the whitespace-insensitive line equivalence.
fn normalize(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn wrap_text(line: &str, width: usize) -> String {
    let chars: Vec<char> = line.chars().collect();
    if width == 0 || chars.len() <= width {
        return line.to_string();
    }
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(WRAP_MARKER)
}

/// Brackets the token range `[start, end)` of `sequence` with an open/close
/// tag pair per physical line. The close position sheds trailing newline
/// tokens, the open position stops at the nearest newline boundary, and the
/// bracketing repeats for every newline-delimited segment in the range, so
/// no tag pair ever spans a line break.
fn wrap_in_tag(sequence: &mut Vec<String>, start: usize, end: usize, tag: &TagGenerator) {
    let mut end_pos = end;
    loop {
        while end_pos > start && sequence[end_pos - 1] == NEW_LINE {
            end_pos -= 1;
        }
        if end_pos == start {
            break;
        }
        sequence.insert(end_pos, tag(false));
        end_pos -= 1;
        while end_pos > start && sequence[end_pos - 1] != NEW_LINE {
            end_pos -= 1;
        }
        sequence.insert(end_pos, tag(true));
        if end_pos == start {
            break;
        }
        end_pos -= 1;
    }
}

/// Rejoins spliced tokens and re-splits them into physical lines, shedding
/// the single trailing empty segment a terminal newline leaves behind.
fn split_joined_lines(joined: &str) -> Vec<String> {
    let mut lines: Vec<String> = joined.split('\n').map(str::to_string).collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// Turns an edit script into aligned, presentation-ready diff rows.
///
/// Configuration is fixed at build time and the generator holds no other
/// state, so one instance can serve any number of invocations, from any
/// number of threads.
pub struct DiffRowGenerator {
    show_inline_diffs: bool,
    ignore_white_spaces: bool,
    merge_original_revised: bool,
    report_lines_unchanged: bool,
    column_width: usize,
    old_tag: TagGenerator,
    new_tag: TagGenerator,
    inline_diff_splitter: Splitter,
}

impl DiffRowGenerator {
    pub fn builder() -> DiffRowGeneratorBuilder {
        DiffRowGeneratorBuilder::default()
    }

    /// Diffs the two line sequences and renders the result as rows. The
    /// line equivalence honors `ignore_white_spaces`.
    pub fn generate_diff_rows(
        &self,
        original: &[String],
        revised: &[String],
    ) -> DiffResult<Vec<DiffRow>> {
        let deltas = if self.ignore_white_spaces {
            engine::diff(original, revised, |a, b| normalize(a) == normalize(b))?
        } else {
            engine::diff(original, revised, |a, b| a == b)?
        };
        self.generate_diff_rows_from_deltas(original, &deltas)
    }

    /// Renders rows from a precomputed edit script. The deltas must be
    /// ordered by increasing source position and non-overlapping, as
    /// produced by [`engine::diff`].
    pub fn generate_diff_rows_from_deltas(
        &self,
        original: &[String],
        deltas: &[Delta<String>],
    ) -> DiffResult<Vec<DiffRow>> {
        let mut rows = Vec::new();
        let mut end_pos = 0;

        for delta in deltas {
            let source = delta.source();
            let target = delta.target();

            for line in &original[end_pos..source.position()] {
                rows.push(self.build_diff_row(RowKind::Equal, line, line));
            }

            match delta {
                Delta::Insert { .. } => {
                    for line in target.lines() {
                        rows.push(self.build_diff_row(RowKind::Insert, "", line));
                    }
                }
                Delta::Delete { .. } => {
                    for line in source.lines() {
                        rows.push(self.build_diff_row(RowKind::Delete, line, ""));
                    }
                }
                Delta::Change { .. } => {
                    if self.show_inline_diffs {
                        rows.extend(self.generate_inline_diff_rows(delta)?);
                    } else {
                        for idx in 0..source.size().max(target.size()) {
                            let old = source.lines().get(idx).map(String::as_str).unwrap_or("");
                            let new = target.lines().get(idx).map(String::as_str).unwrap_or("");
                            rows.push(self.build_diff_row(RowKind::Change, old, new));
                        }
                    }
                }
            }
            end_pos = source.end();
        }

        for line in &original[end_pos..] {
            rows.push(self.build_diff_row(RowKind::Equal, line, line));
        }

        Ok(rows)
    }

    fn build_diff_row(&self, kind: RowKind, old: &str, new: &str) -> DiffRow {
        if self.report_lines_unchanged {
            return DiffRow::new(kind, old.to_string(), new.to_string());
        }

        let mut wrap_old = self.preprocess_line(old);
        if kind == RowKind::Delete && (self.merge_original_revised || self.show_inline_diffs) {
            wrap_old = format!(
                "{}{}{}",
                (self.old_tag)(true),
                wrap_old,
                (self.old_tag)(false)
            );
        }

        let mut wrap_new = self.preprocess_line(new);
        if kind == RowKind::Insert {
            if self.merge_original_revised {
                wrap_old = format!(
                    "{}{}{}",
                    (self.new_tag)(true),
                    wrap_new,
                    (self.new_tag)(false)
                );
            } else if self.show_inline_diffs {
                wrap_new = format!(
                    "{}{}{}",
                    (self.new_tag)(true),
                    wrap_new,
                    (self.new_tag)(false)
                );
            }
        }

        DiffRow::new(kind, wrap_old, wrap_new)
    }

    fn preprocess_line(&self, line: &str) -> String {
        if self.column_width == 0 {
            normalize(line)
        } else {
            wrap_text(&normalize(line), self.column_width)
        }
    }

    /// Re-diffs a changed region at token granularity and splices tag
    /// markers into the token lists. Token deltas are walked in reverse
    /// source order so insertions never shift positions that are still
    /// pending.
    fn generate_inline_diff_rows(&self, delta: &Delta<String>) -> DiffResult<Vec<DiffRow>> {
        let joined_orig = delta
            .source()
            .lines()
            .iter()
            .map(|line| normalize(line))
            .collect::<Vec<_>>()
            .join(NEW_LINE);
        let joined_rev = delta
            .target()
            .lines()
            .iter()
            .map(|line| normalize(line))
            .collect::<Vec<_>>()
            .join(NEW_LINE);

        let mut orig_tokens = (self.inline_diff_splitter)(&joined_orig);
        let mut rev_tokens = (self.inline_diff_splitter)(&joined_rev);

        let mut inline_deltas = engine::diff(&orig_tokens, &rev_tokens, |a, b| a == b)?;
        inline_deltas.reverse();

        for inline in &inline_deltas {
            let source = inline.source();
            let target = inline.target();
            match inline {
                Delta::Delete { .. } => {
                    wrap_in_tag(&mut orig_tokens, source.position(), source.end(), &self.old_tag);
                }
                Delta::Insert { .. } => {
                    if self.merge_original_revised {
                        let copied = rev_tokens[target.position()..target.end()].to_vec();
                        let _ = orig_tokens
                            .splice(source.position()..source.position(), copied);
                        wrap_in_tag(
                            &mut orig_tokens,
                            source.position(),
                            source.position() + target.size(),
                            &self.new_tag,
                        );
                    } else {
                        wrap_in_tag(&mut rev_tokens, target.position(), target.end(), &self.new_tag);
                    }
                }
                Delta::Change { .. } => {
                    if self.merge_original_revised {
                        let insert_at = source.end();
                        let copied = rev_tokens[target.position()..target.end()].to_vec();
                        let _ = orig_tokens.splice(insert_at..insert_at, copied);
                        wrap_in_tag(
                            &mut orig_tokens,
                            insert_at,
                            insert_at + target.size(),
                            &self.new_tag,
                        );
                    } else {
                        wrap_in_tag(&mut rev_tokens, target.position(), target.end(), &self.new_tag);
                    }
                    wrap_in_tag(&mut orig_tokens, source.position(), source.end(), &self.old_tag);
                }
            }
        }

        let old_lines = split_joined_lines(&orig_tokens.concat());
        let new_lines = split_joined_lines(&rev_tokens.concat());

        // tokens are finalized text at this point, so the normalization and
        // wrapping pass is bypassed
        let rows = (0..old_lines.len().max(new_lines.len()))
            .map(|idx| {
                DiffRow::new(
                    RowKind::Change,
                    old_lines.get(idx).cloned().unwrap_or_default(),
                    new_lines.get(idx).cloned().unwrap_or_default(),
                )
            })
            .collect();
        Ok(rows)
    }
}

/// Builder for [`DiffRowGenerator`]; every knob is optional with stated
/// defaults. Validation is eager: a custom split pattern that does not
/// compile fails here, not during a later diff.
#[derive(Default)]
pub struct DiffRowGeneratorBuilder {
    show_inline_diffs: bool,
    ignore_white_spaces: bool,
    merge_original_revised: bool,
    report_lines_unchanged: bool,
    inline_diff_by_word: bool,
    column_width: usize,
    split_pattern: Option<String>,
    old_tag: Option<TagGenerator>,
    new_tag: Option<TagGenerator>,
    inline_diff_splitter: Option<Splitter>,
}

impl DiffRowGeneratorBuilder {
    /// Re-diff changed regions at token level and mark the differing spans
    /// with tags. Default `false`.
    pub fn show_inline_diffs(mut self, value: bool) -> Self {
        self.show_inline_diffs = value;
        self
    }

    /// Treat lines differing only in whitespace as equal. Default `false`.
    pub fn ignore_white_spaces(mut self, value: bool) -> Self {
        self.ignore_white_spaces = value;
        self
    }

    /// Fold insertions into the old side, producing a one-column merged
    /// view. Default `false`.
    pub fn merge_original_revised(mut self, value: bool) -> Self {
        self.merge_original_revised = value;
        self
    }

    /// Emit lines verbatim: no normalization, no wrapping, no tags.
    /// Default `false`.
    pub fn report_lines_unchanged(mut self, value: bool) -> Self {
        self.report_lines_unchanged = value;
        self
    }

    /// Tokenize inline diffs by word instead of by character. Default
    /// `false`.
    pub fn inline_diff_by_word(mut self, value: bool) -> Self {
        self.inline_diff_by_word = value;
        self
    }

    /// Hard-wrap rendered lines at this many characters; `0` disables
    /// wrapping and is the default.
    pub fn column_width(mut self, value: usize) -> Self {
        self.column_width = value;
        self
    }

    /// Custom delimiter pattern for word-level inline tokenization.
    pub fn split_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.split_pattern = Some(pattern.into());
        self
    }

    /// Wrapper generator for removed spans. Defaults to
    /// `<span class="editOldInline">` / `</span>`.
    pub fn old_tag(mut self, tag: TagGenerator) -> Self {
        self.old_tag = Some(tag);
        self
    }

    /// Wrapper generator for added spans. Defaults to
    /// `<span class="editNewInline">` / `</span>`.
    pub fn new_tag(mut self, tag: TagGenerator) -> Self {
        self.new_tag = Some(tag);
        self
    }

    /// Fully custom inline tokenizer; overrides `inline_diff_by_word` and
    /// `split_pattern`.
    pub fn inline_diff_splitter(mut self, splitter: Splitter) -> Self {
        self.inline_diff_splitter = Some(splitter);
        self
    }

    pub fn build(self) -> DiffResult<DiffRowGenerator> {
        let inline_diff_splitter = match (self.inline_diff_splitter, self.split_pattern) {
            (Some(custom), _) => custom,
            (None, Some(pattern)) => splitter::pattern_splitter(&pattern)?,
            (None, None) if self.inline_diff_by_word => splitter::word_splitter()?,
            (None, None) => splitter::character_splitter(),
        };

        Ok(DiffRowGenerator {
            show_inline_diffs: self.show_inline_diffs,
            ignore_white_spaces: self.ignore_white_spaces,
            merge_original_revised: self.merge_original_revised,
            report_lines_unchanged: self.report_lines_unchanged,
            column_width: self.column_width,
            old_tag: self.old_tag.unwrap_or_else(default_old_tag),
            new_tag: self.new_tag.unwrap_or_else(default_new_tag),
            inline_diff_splitter,
        })
    }
}
