//! Projection of matches and separator text into emitted units

use crate::config::{Template, TokenizerConfig};
use crate::emission::{Emission, Sink};
use crate::pattern::Match;
use crate::position::{Position, PositionTracker};
use serde_json::{Map, Value};

/// Apply `template` to `m`; `None` means nothing should be pushed
pub fn project(template: &Template, m: &Match<'_>, config: &TokenizerConfig) -> Option<Emission> {
    match template {
        Template::Verbatim => Some(Emission::Text(m.as_str().to_string())),
        Template::Keyed(key) => {
            let mut map = Map::new();
            map.insert(key.clone(), Value::from(m.as_str()));
            Some(Emission::Record(map))
        }
        Template::Custom(f) => Some(Emission::from_value(f(m, config))),
        Template::Suppressed => None,
    }
}

/// Projects units in stream order, keeping the position cursor in step
///
/// Every consumed span goes through the projector, including suppressed ones,
/// so stamped positions always refer to the original text.
pub(crate) struct Projector<'a> {
    config: &'a TokenizerConfig,
    tracker: &'a mut PositionTracker,
}

impl<'a> Projector<'a> {
    pub(crate) fn new(config: &'a TokenizerConfig, tracker: &'a mut PositionTracker) -> Self {
        Self { config, tracker }
    }

    /// Emit a match with the token template
    pub(crate) fn token<S: Sink>(&mut self, m: &Match<'_>, sink: &mut S) {
        let projected = project(&self.config.token, m, self.config);
        self.push(m, projected, sink);
    }

    /// Emit separator text, split per line when configured
    pub(crate) fn separator<S: Sink>(&mut self, text: &str, offset: usize, sink: &mut S) {
        if self.config.line_separators {
            let mut at = offset;
            for line in text.split_inclusive('\n') {
                self.separator_unit(&Match::text(line, at), sink);
                at += line.len();
            }
        } else {
            self.separator_unit(&Match::text(text, offset), sink);
        }
    }

    /// Emit a leave-behind prefix with the separator template
    ///
    /// A suppressed separator template still yields a zero-byte unit here, so
    /// the prefix shows up when zero-byte units are kept.
    pub(crate) fn leave_behind<S: Sink>(&mut self, m: &Match<'_>, sink: &mut S) {
        let projected = project(&self.config.separator, m, self.config)
            .or_else(|| Some(Emission::Text(String::new())));
        self.push(m, projected, sink);
    }

    /// Advance over text that produces no unit
    pub(crate) fn skip(&mut self, text: &str) {
        self.tracker.advance(text);
    }

    fn separator_unit<S: Sink>(&mut self, m: &Match<'_>, sink: &mut S) {
        let projected = project(&self.config.separator, m, self.config);
        self.push(m, projected, sink);
    }

    fn push<S: Sink>(&mut self, m: &Match<'_>, projected: Option<Emission>, sink: &mut S) {
        let at: Position = self.tracker.position();
        self.tracker.advance(m.as_str());

        let Some(mut emission) = projected else {
            return;
        };
        if self.config.exclude_zero_byte_strings && emission.is_zero_byte() {
            return;
        }
        emission.stamp(at, self.config.source.as_deref());
        sink.push(emission);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(token: Template, separator: Template) -> TokenizerConfig {
        TokenizerConfig::builder()
            .token(token)
            .separator(separator)
            .build()
            .unwrap()
    }

    #[test]
    fn test_project_dispatch() {
        let cfg = TokenizerConfig::default();
        let m = Match::text("fox", 0);

        assert_eq!(
            project(&Template::Verbatim, &m, &cfg),
            Some(Emission::from("fox"))
        );
        assert_eq!(
            project(&Template::from("token"), &m, &cfg),
            Some(Emission::from_value(json!({"token": "fox"})))
        );
        assert_eq!(project(&Template::Suppressed, &m, &cfg), None);

        let custom = Template::custom(|m, _| json!({"content": m.as_str(), "match": true}));
        assert_eq!(
            project(&custom, &m, &cfg),
            Some(Emission::from_value(json!({"content": "fox", "match": true})))
        );
    }

    #[test]
    fn test_custom_template_sees_config() {
        let cfg = TokenizerConfig::builder().source("a.txt").build().unwrap();
        let custom = Template::custom(|_, config| Value::from(config.source().unwrap_or("")));
        let projected = project(&custom, &Match::text("x", 0), &cfg);
        assert_eq!(projected, Some(Emission::from("a.txt")));
    }

    #[test]
    fn test_stamp_overwrites_template_keys() {
        let cfg = TokenizerConfig::builder()
            .token(Template::custom(|m, _| {
                json!({"content": m.as_str(), "line": 99, "column": 7, "source": "template"})
            }))
            .source("api.md")
            .build()
            .unwrap();
        let mut tracker = PositionTracker::new();
        let mut out = Vec::new();
        {
            let mut projector = Projector::new(&cfg, &mut tracker);
            projector.skip("ab\n c");
            projector.token(&Match::text("fox", 5), &mut out);
        }

        assert_eq!(
            out,
            vec![Emission::from_value(json!({
                "content": "fox",
                "line": 2,
                "column": 2,
                "source": "api.md"
            }))]
        );
    }

    #[test]
    fn test_records_are_stamped_before_advance() {
        let cfg = config(Template::from("token"), Template::from("separator"));
        let mut tracker = PositionTracker::new();
        let mut out = Vec::new();
        {
            let mut projector = Projector::new(&cfg, &mut tracker);
            projector.separator("# Title\n:", 0, &mut out);
            projector.token(&Match::text("[link](test1.apib)", 9), &mut out);
        }

        assert_eq!(out[0].position(), Some(Position { line: 1, column: 0 }));
        assert_eq!(out[1].position(), Some(Position { line: 2, column: 1 }));
        assert_eq!(tracker.position(), Position { line: 2, column: 19 });
    }

    #[test]
    fn test_plain_text_is_not_stamped() {
        let cfg = TokenizerConfig::default();
        let mut tracker = PositionTracker::new();
        let mut out = Vec::new();
        Projector::new(&cfg, &mut tracker).token(&Match::text("The", 0), &mut out);
        assert_eq!(out, vec![Emission::from("The")]);
    }

    #[test]
    fn test_suppressed_units_still_advance() {
        let cfg = config(Template::from("token"), Template::Suppressed);
        let mut tracker = PositionTracker::new();
        let mut out = Vec::new();
        {
            let mut projector = Projector::new(&cfg, &mut tracker);
            projector.separator("  ", 0, &mut out);
            projector.token(&Match::text("The", 2), &mut out);
        }

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].position(), Some(Position { line: 1, column: 2 }));
    }

    #[test]
    fn test_zero_byte_policy() {
        let custom = Template::custom(|_, _| json!(""));
        let dropping = config(custom.clone(), Template::Suppressed);
        let keeping = TokenizerConfig::builder()
            .token(custom)
            .exclude_zero_byte_strings(false)
            .build()
            .unwrap();

        let mut tracker = PositionTracker::new();
        let mut out = Vec::new();
        Projector::new(&dropping, &mut tracker).token(&Match::text("x", 0), &mut out);
        assert!(out.is_empty());

        Projector::new(&keeping, &mut tracker).token(&Match::text("x", 1), &mut out);
        assert_eq!(out, vec![Emission::from("")]);
    }

    #[test]
    fn test_line_separators() {
        let cfg = TokenizerConfig::builder()
            .separator(true)
            .line_separators(true)
            .build()
            .unwrap();
        let mut tracker = PositionTracker::new();
        let mut out = Vec::new();
        Projector::new(&cfg, &mut tracker).separator("a\r\n\nb", 0, &mut out);

        assert_eq!(
            out,
            vec![
                Emission::from("a\r\n"),
                Emission::from("\n"),
                Emission::from("b"),
            ]
        );
    }

    #[test]
    fn test_suppressed_leave_behind_is_zero_byte() {
        let cfg = TokenizerConfig::builder()
            .exclude_zero_byte_strings(false)
            .build()
            .unwrap();
        let mut tracker = PositionTracker::new();
        let mut out = Vec::new();
        Projector::new(&cfg, &mut tracker).leave_behind(&Match::text("  ", 0), &mut out);

        assert_eq!(out, vec![Emission::from("")]);
        assert_eq!(tracker.position().column, 2);
    }
}
