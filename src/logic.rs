//! The generation pipeline: prompt → Gemini → fence strip → typed decode.
//!
//! Every stage failure aborts the request; the handler collapses all of them
//! into one generic 500 while the detail lands in the server log only.

use thiserror::Error;
use tracing::{error, info, instrument};

use crate::domain::{
  BaseQuestion, GenerateRequest, GeneratedQuestion, MatchingQuestion, QuestionType,
  ReadingQuestion,
};
use crate::prompts::build_prompt;
use crate::state::AppState;
use crate::util::trunc_for_log;

/// Pipeline failures. Client-facing responses never carry these messages;
/// they exist for the server log.
#[derive(Debug, Error)]
pub enum GenError {
  #[error("upstream generation failed: {0}")]
  Upstream(String),
  #[error("model reply did not match the expected structure: {0}")]
  Parse(#[from] serde_json::Error),
}

/// Remove the markdown code fence the model tends to wrap JSON in.
/// Deliberately narrow: only the exact leading "```json\n" and the exact
/// trailing "```" are stripped; any other fence variant passes through
/// untouched and will surface as a parse error.
pub fn strip_code_fence(raw: &str) -> &str {
  let s = raw.strip_prefix("```json\n").unwrap_or(raw);
  s.strip_suffix("```").unwrap_or(s)
}

/// Decode the cleaned reply into the variant selected by the question type.
/// The dispatch is exhaustive over `QuestionType`, so there is no
/// unsupported-type branch to reach here. After decoding, the discriminant
/// is forced to the requested type's label; the model's echo is not trusted.
pub fn parse_question(
  question_type: QuestionType,
  clean_json: &str,
) -> Result<GeneratedQuestion, GenError> {
  let mut parsed = match question_type {
    QuestionType::SingleChoice
    | QuestionType::MultipleChoice
    | QuestionType::TrueFalse
    | QuestionType::FillInBlank
    | QuestionType::ShortAnswer => {
      GeneratedQuestion::Base(serde_json::from_str::<BaseQuestion>(clean_json)?)
    }
    QuestionType::Matching => {
      GeneratedQuestion::Matching(serde_json::from_str::<MatchingQuestion>(clean_json)?)
    }
    QuestionType::ReadingSet => {
      GeneratedQuestion::Reading(serde_json::from_str::<ReadingQuestion>(clean_json)?)
    }
  };
  parsed.set_question_type(question_type.label());
  Ok(parsed)
}

/// Run the whole pipeline for one validated request.
#[instrument(
  level = "info",
  skip(state, req),
  fields(subject = %req.subject.label(), difficulty = %req.difficulty.label(), question_type = %req.question_type.label())
)]
pub async fn generate_question(
  state: &AppState,
  req: &GenerateRequest,
) -> Result<GeneratedQuestion, GenError> {
  let Some(gemini) = &state.gemini else {
    return Err(GenError::Upstream("GEMINI_API_KEY not set; generation disabled".into()));
  };

  let prompt = build_prompt(req);
  let raw = gemini.generate_content(&prompt).await.map_err(GenError::Upstream)?;
  let clean = strip_code_fence(&raw);

  match parse_question(req.question_type, clean) {
    Ok(q) => {
      info!(target: "generate", question_type = %q.question_type(), "Question generated");
      Ok(q)
    }
    Err(e) => {
      error!(
        target: "generate",
        error = %e,
        raw_preview = %trunc_for_log(clean, 200),
        "Model reply failed to decode"
      );
      Err(e)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SINGLE_CHOICE_JSON: &str = r#"{
    "question_type": "單選題",
    "question": "下列哪個數是質數？",
    "options": {"A": "4", "B": "7", "C": "9", "D": "15"},
    "correct_answer": ["B"],
    "explanation": "7 只有 1 和它本身兩個因數。"
  }"#;

  #[test]
  fn strips_exact_fence_markers() {
    let fenced = format!("```json\n{}```", SINGLE_CHOICE_JSON);
    assert_eq!(strip_code_fence(&fenced), SINGLE_CHOICE_JSON);
  }

  #[test]
  fn leaves_unfenced_text_unchanged() {
    assert_eq!(strip_code_fence(SINGLE_CHOICE_JSON), SINGLE_CHOICE_JSON);
  }

  #[test]
  fn partial_fences_are_not_normalized() {
    // No trailing newline after the language tag: prefix does not match.
    let odd = "```json{\"a\":1}```";
    assert_eq!(strip_code_fence(odd), "```json{\"a\":1}");
    // Plain fence without a language tag passes through on the front.
    let plain = "```\n{\"a\":1}\n```";
    assert_eq!(strip_code_fence(plain), "```\n{\"a\":1}\n");
  }

  #[test]
  fn one_sided_fences_strip_independently() {
    let lead_only = format!("```json\n{}", "{\"x\":1}");
    assert_eq!(strip_code_fence(&lead_only), "{\"x\":1}");
    let trail_only = "{\"x\":1}```";
    assert_eq!(strip_code_fence(trail_only), "{\"x\":1}");
  }

  #[test]
  fn choice_types_decode_as_base_question() {
    for qt in [
      QuestionType::SingleChoice,
      QuestionType::MultipleChoice,
      QuestionType::TrueFalse,
      QuestionType::FillInBlank,
      QuestionType::ShortAnswer,
    ] {
      let q = parse_question(qt, SINGLE_CHOICE_JSON).expect("decodes");
      assert!(matches!(q, GeneratedQuestion::Base(_)));
      assert_eq!(q.question_type(), qt.label());
    }
  }

  #[test]
  fn matching_decodes_as_matching_question() {
    let json = r#"{
      "question_type": "配對題",
      "question": "請將左側項目與右側項目配對。",
      "pairs": {"唐朝": "李白", "宋朝": "蘇軾", "清朝": "曹雪芹"},
      "correct_answer": ["唐朝", "宋朝", "清朝", "李白", "蘇軾", "曹雪芹"],
      "explanation": "各朝代的代表文人。"
    }"#;
    let q = parse_question(QuestionType::Matching, json).expect("decodes");
    match &q {
      GeneratedQuestion::Matching(m) => assert_eq!(m.pairs.len(), 3),
      other => panic!("expected matching variant, got {:?}", other),
    }
  }

  #[test]
  fn reading_set_decodes_as_reading_question() {
    let json = r#"{
      "question_type": "閱讀題組",
      "passage": "小明每天早上六點起床跑步。",
      "questions": [
        {"question": "小明幾點起床？", "options": {"A": "五點", "B": "六點", "C": "七點", "D": "八點"}},
        {"question": "小明早上做什麼運動？", "options": {"A": "游泳", "B": "跑步", "C": "騎車", "D": "爬山"}}
      ],
      "correct_answer": ["B", "B"],
      "explanation": "兩題的答案都寫在第一句。"
    }"#;
    let q = parse_question(QuestionType::ReadingSet, json).expect("decodes");
    match &q {
      GeneratedQuestion::Reading(r) => assert_eq!(r.questions.len(), 2),
      other => panic!("expected reading variant, got {:?}", other),
    }
  }

  #[test]
  fn malformed_json_is_a_parse_error() {
    let err = parse_question(QuestionType::SingleChoice, "這不是 JSON").unwrap_err();
    assert!(matches!(err, GenError::Parse(_)));
  }

  #[test]
  fn type_mismatch_is_a_parse_error() {
    // `pairs` must be an object for matching questions.
    let json = r#"{"question_type": "配對題", "question": "q", "pairs": [], "explanation": "e"}"#;
    let err = parse_question(QuestionType::Matching, json).unwrap_err();
    assert!(matches!(err, GenError::Parse(_)));
  }

  #[test]
  fn discriminant_is_overwritten_with_requested_type() {
    // Model echoed the wrong type; the requested type wins.
    let json = r#"{"question_type": "多選題", "question": "q", "explanation": "e"}"#;
    let q = parse_question(QuestionType::ShortAnswer, json).expect("decodes");
    assert_eq!(q.question_type(), "簡答題");
  }

  #[test]
  fn missing_discriminant_still_decodes_and_gets_filled() {
    let json = r#"{"question": "q", "explanation": "e"}"#;
    let q = parse_question(QuestionType::FillInBlank, json).expect("decodes");
    assert_eq!(q.question_type(), "填空題");
  }
}
