use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Answer to a single yes/no/N/A question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Answer {
    Yes,
    No,
    NotApplicable,
    #[default]
    Unset,
}

impl Answer {
    /// Parses the shareable-link form. Anything unrecognised reads as `Unset`.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "1" => Answer::Yes,
            "0" => Answer::No,
            "na" => Answer::NotApplicable,
            _ => Answer::Unset,
        }
    }

    /// Shareable-link form; `None` means the parameter is omitted.
    pub fn to_wire(self) -> Option<&'static str> {
        match self {
            Answer::Yes => Some("1"),
            Answer::No => Some("0"),
            Answer::NotApplicable => Some("na"),
            Answer::Unset => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
            Answer::NotApplicable => "N/A",
            Answer::Unset => "",
        }
    }

    pub fn is_set(self) -> bool {
        self != Answer::Unset
    }

    pub fn is_yes(self) -> bool {
        self == Answer::Yes
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        if value { Answer::Yes } else { Answer::No }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid answer '{0}' (expected yes, no, n/a, 1, 0 or na)")]
pub struct AnswerParseError(pub String);

impl FromStr for Answer {
    type Err = AnswerParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "unset" => Ok(Answer::Unset),
            "1" | "yes" | "y" | "true" => Ok(Answer::Yes),
            "0" | "no" | "n" | "false" => Ok(Answer::No),
            "na" | "n/a" | "not-applicable" => Ok(Answer::NotApplicable),
            _ => Err(AnswerParseError(raw.to_string())),
        }
    }
}

/// Raw value accepted by `AnswerStore::set_answer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerInput {
    Answer(Answer),
    Bool(bool),
    Raw(String),
}

impl AnswerInput {
    pub fn resolve(self) -> Result<Answer, AnswerParseError> {
        match self {
            AnswerInput::Answer(answer) => Ok(answer),
            AnswerInput::Bool(value) => Ok(value.into()),
            AnswerInput::Raw(raw) => raw.parse(),
        }
    }
}

impl From<Answer> for AnswerInput {
    fn from(value: Answer) -> Self {
        AnswerInput::Answer(value)
    }
}

impl From<bool> for AnswerInput {
    fn from(value: bool) -> Self {
        AnswerInput::Bool(value)
    }
}

impl From<&str> for AnswerInput {
    fn from(value: &str) -> Self {
        AnswerInput::Raw(value.to_string())
    }
}

impl From<String> for AnswerInput {
    fn from(value: String) -> Self {
        AnswerInput::Raw(value)
    }
}

// JSON exports use `true` / `false` / `"na"` / `null`.
impl Serialize for Answer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Answer::Yes => serializer.serialize_bool(true),
            Answer::No => serializer.serialize_bool(false),
            Answer::NotApplicable => serializer.serialize_str("na"),
            Answer::Unset => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Answer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AnswerVisitor;

        impl<'de> Visitor<'de> for AnswerVisitor {
            type Value = Answer;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("true, false, \"na\" or null")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Answer, E> {
                Ok(value.into())
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Answer, E> {
                value.parse().map_err(E::custom)
            }

            fn visit_none<E: de::Error>(self) -> Result<Answer, E> {
                Ok(Answer::Unset)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Answer, E> {
                Ok(Answer::Unset)
            }
        }

        deserializer.deserialize_any(AnswerVisitor)
    }
}
