//! Domain models: the three request enumerations, the validated request,
//! and the three generated-question shapes returned to clients.
//!
//! The enumerations are closed sets matching the frontend contract exactly;
//! anything outside them is rejected before we ever talk to the model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol::GenerateIn;

/// School subject the question should be about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subject {
  Chinese,
  English,
  Math,
  Science,
  Social,
}

impl Subject {
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "國文" => Some(Subject::Chinese),
      "英文" => Some(Subject::English),
      "數學" => Some(Subject::Math),
      "自然" => Some(Subject::Science),
      "社會" => Some(Subject::Social),
      _ => None,
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Subject::Chinese => "國文",
      Subject::English => "英文",
      Subject::Math => "數學",
      Subject::Science => "自然",
      Subject::Social => "社會",
    }
  }
}

/// Requested difficulty band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
  Easy,
  Normal,
  Hard,
  Extreme,
}

impl Difficulty {
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "簡單" => Some(Difficulty::Easy),
      "普通" => Some(Difficulty::Normal),
      "困難" => Some(Difficulty::Hard),
      "極難" => Some(Difficulty::Extreme),
      _ => None,
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Difficulty::Easy => "簡單",
      Difficulty::Normal => "普通",
      Difficulty::Hard => "困難",
      Difficulty::Extreme => "極難",
    }
  }
}

/// The seven supported question formats. Template selection and response
/// decoding both dispatch exhaustively on this, so an unknown type cannot
/// slip past validation into the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionType {
  SingleChoice,
  MultipleChoice,
  TrueFalse,
  FillInBlank,
  ShortAnswer,
  Matching,
  ReadingSet,
}

impl QuestionType {
  pub const ALL: [QuestionType; 7] = [
    QuestionType::SingleChoice,
    QuestionType::MultipleChoice,
    QuestionType::TrueFalse,
    QuestionType::FillInBlank,
    QuestionType::ShortAnswer,
    QuestionType::Matching,
    QuestionType::ReadingSet,
  ];

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "單選題" => Some(QuestionType::SingleChoice),
      "多選題" => Some(QuestionType::MultipleChoice),
      "是非題" => Some(QuestionType::TrueFalse),
      "填空題" => Some(QuestionType::FillInBlank),
      "簡答題" => Some(QuestionType::ShortAnswer),
      "配對題" => Some(QuestionType::Matching),
      "閱讀題組" => Some(QuestionType::ReadingSet),
      _ => None,
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      QuestionType::SingleChoice => "單選題",
      QuestionType::MultipleChoice => "多選題",
      QuestionType::TrueFalse => "是非題",
      QuestionType::FillInBlank => "填空題",
      QuestionType::ShortAnswer => "簡答題",
      QuestionType::Matching => "配對題",
      QuestionType::ReadingSet => "閱讀題組",
    }
  }
}

/// A request that passed validation; only this form reaches the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerateRequest {
  pub subject: Subject,
  pub difficulty: Difficulty,
  pub question_type: QuestionType,
}

/// Why a request was rejected. The Display strings are the exact
/// client-facing messages, one per failure category.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
  #[error("缺少必填欄位")]
  MissingField,
  #[error("無效的科目")]
  InvalidSubject,
  #[error("無效的難度")]
  InvalidDifficulty,
  #[error("無效的題型")]
  InvalidQuestionType,
}

/// Check presence and enumeration membership of all three fields.
/// Pure; the caller maps the error to a 400 response.
pub fn validate(body: &GenerateIn) -> Result<GenerateRequest, ValidationError> {
  if body.subject.is_empty() || body.difficulty.is_empty() || body.question_type.is_empty() {
    return Err(ValidationError::MissingField);
  }
  let subject = Subject::parse(&body.subject).ok_or(ValidationError::InvalidSubject)?;
  let difficulty = Difficulty::parse(&body.difficulty).ok_or(ValidationError::InvalidDifficulty)?;
  let question_type =
    QuestionType::parse(&body.question_type).ok_or(ValidationError::InvalidQuestionType)?;
  Ok(GenerateRequest { subject, difficulty, question_type })
}

// ---- Generated question shapes (wire format of the model reply) ----

/// Choice-style and free-answer questions (單選/多選/是非/填空/簡答).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BaseQuestion {
  #[serde(default)]
  pub question_type: String,
  pub question: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub options: Option<BTreeMap<String, String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub correct_answer: Option<Vec<String>>,
  pub explanation: String,
}

/// 配對題: left-to-right pairs instead of labeled options.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchingQuestion {
  #[serde(default)]
  pub question_type: String,
  pub question: String,
  pub pairs: BTreeMap<String, String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub correct_answer: Option<Vec<String>>,
  pub explanation: String,
}

/// One sub-question inside a reading set.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SubQuestion {
  pub question: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub options: Option<BTreeMap<String, String>>,
}

/// 閱讀題組: a passage followed by its sub-questions.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReadingQuestion {
  #[serde(default)]
  pub question_type: String,
  pub passage: String,
  pub questions: Vec<SubQuestion>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub correct_answer: Option<Vec<String>>,
  pub explanation: String,
}

/// The polymorphic response. Untagged: the client sees exactly the inner
/// shape, with `question_type` as the discriminant field. Decoding is done
/// per-variant in the parser (keyed by the validated `QuestionType`), never
/// through this enum.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum GeneratedQuestion {
  Base(BaseQuestion),
  Matching(MatchingQuestion),
  Reading(ReadingQuestion),
}

impl GeneratedQuestion {
  pub fn question_type(&self) -> &str {
    match self {
      GeneratedQuestion::Base(q) => &q.question_type,
      GeneratedQuestion::Matching(q) => &q.question_type,
      GeneratedQuestion::Reading(q) => &q.question_type,
    }
  }

  /// Force the discriminant to the requested type's label. The prompt asks
  /// the model to echo it, but we do not trust the reply for the invariant.
  pub fn set_question_type(&mut self, label: &str) {
    match self {
      GeneratedQuestion::Base(q) => q.question_type = label.to_string(),
      GeneratedQuestion::Matching(q) => q.question_type = label.to_string(),
      GeneratedQuestion::Reading(q) => q.question_type = label.to_string(),
    }
  }
}
