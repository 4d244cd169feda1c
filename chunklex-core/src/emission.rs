//! Emitted units and the sink they are pushed into

use crate::position::Position;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::VecDeque;

/// One unit of tokenizer output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Emission {
    /// Raw text, produced by a verbatim template
    Text(String),
    /// Structured unit, stamped with `line` and `column`
    Record(Map<String, Value>),
    /// Any other value a custom template returned
    Value(Value),
}

impl Emission {
    /// Classify a value produced by a template
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => Emission::Text(text),
            Value::Object(map) => Emission::Record(map),
            other => Emission::Value(other),
        }
    }

    /// Whether this unit serializes to the empty string
    pub fn is_zero_byte(&self) -> bool {
        matches!(self, Emission::Text(text) if text.is_empty())
    }

    /// Raw text of a verbatim unit
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Emission::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Field of a structured unit
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Emission::Record(map) => map.get(key),
            _ => None,
        }
    }

    /// Position stamped on a structured unit
    pub fn position(&self) -> Option<Position> {
        let line = usize::try_from(self.get("line")?.as_u64()?).ok()?;
        let column = usize::try_from(self.get("column")?.as_u64()?).ok()?;
        Some(Position { line, column })
    }

    pub(crate) fn stamp(&mut self, at: Position, source: Option<&str>) {
        if let Emission::Record(map) = self {
            map.insert("line".into(), Value::from(at.line));
            map.insert("column".into(), Value::from(at.column));
            if let Some(source) = source {
                map.insert("source".into(), Value::from(source));
            }
        }
    }
}

impl From<&str> for Emission {
    fn from(text: &str) -> Self {
        Emission::Text(text.to_string())
    }
}

/// Receiver of emitted units, in emission order
///
/// The sink may block (a bounded channel, for example); the tokenizer does not
/// buffer output on its behalf.
pub trait Sink {
    /// Accept the next unit
    fn push(&mut self, emission: Emission);
}

impl Sink for Vec<Emission> {
    fn push(&mut self, emission: Emission) {
        Vec::push(self, emission);
    }
}

impl Sink for VecDeque<Emission> {
    fn push(&mut self, emission: Emission) {
        self.push_back(emission);
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn push(&mut self, emission: Emission) {
        (**self).push(emission);
    }
}

/// Sink that forwards every unit to a closure
pub struct SinkFn<F>(pub F);

impl<F: FnMut(Emission)> Sink for SinkFn<F> {
    fn push(&mut self, emission: Emission) {
        (self.0)(emission);
    }
}
