//! Joins extracted keys against the locale table.

use std::borrow::Cow;

use crate::core::{Annotation, KeyOccurrence, LocaleTable, text::LineIndex};

/// Longest value shown in an overlay, ellipsis included.
pub const MAX_DISPLAY_LEN: usize = 40;

/// Appended to values cut down to [`MAX_DISPLAY_LEN`].
pub const ELLIPSIS: &str = "...";

/// Cut `value` to at most `max_len` characters.
///
/// Values longer than `max_len` keep their first `max_len - 3` characters
/// followed by `...`. Lengths count Unicode scalar values.
pub fn truncate(value: &str, max_len: usize) -> Cow<'_, str> {
    if value.chars().count() <= max_len {
        return Cow::Borrowed(value);
    }
    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = value.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    Cow::Owned(truncated)
}

#[derive(Debug, Clone, Copy)]
pub struct AnnotationPlanner {
    max_len: usize,
}

impl Default for AnnotationPlanner {
    fn default() -> Self {
        Self {
            max_len: MAX_DISPLAY_LEN,
        }
    }
}

impl AnnotationPlanner {
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Build the annotations for one buffer.
    ///
    /// Keys missing from the table, or mapped to an empty string, produce
    /// nothing. Output order follows `occurrences`.
    pub fn plan(
        &self,
        text: &str,
        occurrences: &[KeyOccurrence],
        table: &LocaleTable,
    ) -> Vec<Annotation> {
        let index = LineIndex::new(text);
        occurrences
            .iter()
            .filter_map(|occurrence| {
                let value = table.get(&occurrence.key).filter(|v| !v.is_empty())?;
                Some(Annotation {
                    key: occurrence.key.clone(),
                    offset: occurrence.end,
                    position: index.position(occurrence.end),
                    value: truncate(value, self.max_len).into_owned(),
                })
            })
            .collect()
    }
}
