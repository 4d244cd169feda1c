//! Pseudo-lookbehind: report a captured prefix separately from its token
//!
//! A pattern such as `(?m)(^\s*)(\w+)` needs the leading whitespace to anchor
//! the word, but the whitespace is not part of the token. With group 1 as the
//! leave-behind group the tokenizer emits `[  ][The]` instead of `[  The]`.

use crate::config::GroupRef;
use crate::emission::Sink;
use crate::error::{Result, TokenizerError};
use crate::pattern::{Match, Pattern};
use crate::projector::Projector;

/// Splits the leave-behind group off resolved matches
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LookbehindSplitter {
    group: Option<usize>,
}

impl LookbehindSplitter {
    /// Resolve `group` against the pattern's capture layout
    pub(crate) fn resolve<P: Pattern>(group: Option<&GroupRef>, pattern: &P) -> Result<Self> {
        let Some(group) = group else {
            return Ok(Self::default());
        };

        let count = pattern.group_count();
        let index = match group {
            GroupRef::Index(index) if *index < count => *index,
            GroupRef::Index(_) => {
                return Err(TokenizerError::LookbehindPath {
                    group: group.to_string(),
                    reason: format!("pattern has {} capture groups", count.saturating_sub(1)),
                })
            }
            GroupRef::Name(name) => {
                pattern
                    .group_index(name)
                    .ok_or_else(|| TokenizerError::LookbehindPath {
                        group: group.to_string(),
                        reason: "no group with that name".into(),
                    })?
            }
        };

        Ok(Self { group: Some(index) })
    }

    /// Emit the leave-behind text, if any, and narrow `m` to what follows it
    ///
    /// A group that did not participate or captured nothing leaves the match
    /// untouched.
    pub(crate) fn split<S: Sink>(
        &self,
        m: &mut Match<'_>,
        projector: &mut Projector<'_>,
        sink: &mut S,
    ) {
        let Some(span) = self.group.and_then(|group| m.span(group)) else {
            return;
        };
        if span.is_empty() {
            return;
        }

        projector.skip(m.prefix_until(span.start));
        let behind = Match::text(m.slice(span.clone()), m.offset_of(span.start));
        projector.leave_behind(&behind, sink);
        m.consume_from(span.end);
    }
}
