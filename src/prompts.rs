//! Prompt templates, one per question type, plus the builder that
//! interpolates subject/difficulty into them.
//!
//! The templates are the external contract with the model: each one pins the
//! exact JSON structure the reply must follow, and the parser decodes into
//! the matching variant. Template text is Traditional Chinese by design.

use crate::domain::{GenerateRequest, QuestionType, Subject};
use crate::util::fill_template;

/// Appended for 數學 only: keeps the model away from LaTeX so questions
/// render as plain text on the frontend.
const MATH_NOTATION_GUIDE: &str = r#"
        如果題目包含數學符號，請使用以下格式：
        - 分數：使用 "a/b" 格式，例如 "1/2"
        - 根號：使用 "sqrt(n)" 格式，例如 "sqrt(2)"
        - 指數：使用 "^" 符號，例如 "x^2"
        - 希臘字母：使用英文名稱，例如 "pi" 代替 "π"
        - 函數：使用英文名稱，例如 "cos" 代替 "cos"
        請避免使用 LaTeX 格式或其他特殊符號。"#;

const SINGLE_CHOICE_TEMPLATE: &str = r#"請以{subject}為主題，出一個{difficulty}難度的單選題。{math_guide}
        請使用繁體中文撰寫題目和選項。
        請包含四個選項和正確答案。
        回應格式必須完全符合以下 JSON 結構：
        {
            "question_type": "單選題",
            "question": "題目內容",
            "options": {
                "A": "選項A",
                "B": "選項B",
                "C": "選項C",
                "D": "選項D"
            },
            "correct_answer": ["正確選項"],
            "explanation": "簡單解釋為什麼這個答案是正確的，以及為什麼其他選項是錯誤的"
        }"#;

const MULTIPLE_CHOICE_TEMPLATE: &str = r#"請以{subject}為主題，出一個{difficulty}難度的多選題。{math_guide}
        請使用繁體中文撰寫題目和選項。
        請包含四個選項和正確答案（可能有多個）。
        回應格式必須完全符合以下 JSON 結構：
        {
            "question_type": "多選題",
            "question": "題目內容",
            "options": {
                "A": "選項A",
                "B": "選項B",
                "C": "選項C",
                "D": "選項D"
            },
            "correct_answer": ["正確選項1", "正確選項2"],
            "explanation": "簡單解釋為什麼這些答案是正確的，以及為什麼其他選項是錯誤的"
        }"#;

const TRUE_FALSE_TEMPLATE: &str = r#"請以{subject}為主題，出一個{difficulty}難度的是非題。{math_guide}
        請使用繁體中文撰寫題目和選項。
        請包含正確答案。
        回應格式必須完全符合以下 JSON 結構：
        {
            "question_type": "是非題",
            "question": "題目內容",
            "options": {
                "T": "是",
                "F": "否"
            },
            "correct_answer": ["正確選項"],
            "explanation": "簡單解釋為什麼這個答案是正確的，以及為什麼另一個選項是錯誤的"
        }"#;

const FILL_IN_BLANK_TEMPLATE: &str = r#"請以{subject}為主題，出一個{difficulty}難度的填空題。{math_guide}
        請使用繁體中文撰寫題目和選項。
        請在題目中標示填空位置（使用______）。
        回應格式必須完全符合以下 JSON 結構：
        {
            "question_type": "填空題",
            "question": "題目內容",
            "options": null,
            "correct_answer": ["第一格答案",...,"第n格答案"],
            "explanation": "簡單解釋正確答案的內容和原因"
        }"#;

const SHORT_ANSWER_TEMPLATE: &str = r#"請以{subject}為主題，出一個{difficulty}難度的簡答題。{math_guide}
        請使用繁體中文撰寫題目和選項。
        回應格式必須完全符合以下 JSON 結構：
        {
            "question_type": "簡答題",
            "question": "題目內容",
            "options": null,
            "correct_answer": ["精簡簡答答案+請看詳解提醒"],
            "explanation": "簡單解釋正確答案的內容和原因"
        }"#;

const MATCHING_TEMPLATE: &str = r#"請以{subject}為主題，出一個{difficulty}難度的配對題。{math_guide}
        請使用繁體中文撰寫題目和選項。
        請提供三組配對項目。
        回應格式必須完全符合以下 JSON 結構：
        {
            "question_type": "配對題",
            "question": "請將左側項目與右側項目配對。",
            "pairs": {
                "左側項目1": "右側項目1",
                "左側項目2": "右側項目2",
                "左側項目3": "右側項目3"
            },
            "correct_answer": ["左側項目1", "左側項目2", "左側項目3","右側項目1", "右側項目2", "右側項目3"],
            "explanation": "簡單解釋每個配對的正確關係和原因"
        }"#;

const READING_SET_TEMPLATE: &str = r#"請以{subject}為主題，出一個{difficulty}難度的閱讀題組。{math_guide}
        請使用繁體中文撰寫題目和選項。
        請包含一篇短文和兩個相關問題。
        回應格式必須完全符合以下 JSON 結構：
        {
            "question_type": "閱讀題組",
            "passage": "短文內容",
            "questions": [
                {
                    "question": "問題1",
                    "options": {
                        "A": "選項A",
                        "B": "選項B",
                        "C": "選項C",
                        "D": "選項D"
                    }
                },
                {
                    "question": "問題2",
                    "options": {
                        "A": "選項A",
                        "B": "選項B",
                        "C": "選項C",
                        "D": "選項D"
                    }
                }
            ],
            "correct_answer": ["第一題正確選項", "第二題正確選項"],
            "explanation": "簡單解釋每個問題的正確答案和原因，以及如何從文章中找出答案"
        }"#;

/// Exhaustive: every question type has a template, so there is no silent
/// empty-prompt path for a type that slipped past validation.
fn template_for(question_type: QuestionType) -> &'static str {
  match question_type {
    QuestionType::SingleChoice => SINGLE_CHOICE_TEMPLATE,
    QuestionType::MultipleChoice => MULTIPLE_CHOICE_TEMPLATE,
    QuestionType::TrueFalse => TRUE_FALSE_TEMPLATE,
    QuestionType::FillInBlank => FILL_IN_BLANK_TEMPLATE,
    QuestionType::ShortAnswer => SHORT_ANSWER_TEMPLATE,
    QuestionType::Matching => MATCHING_TEMPLATE,
    QuestionType::ReadingSet => READING_SET_TEMPLATE,
  }
}

/// Build the final prompt for a validated request.
pub fn build_prompt(req: &GenerateRequest) -> String {
  let math_guide = if req.subject == Subject::Math { MATH_NOTATION_GUIDE } else { "" };
  fill_template(
    template_for(req.question_type),
    &[
      ("subject", req.subject.label()),
      ("difficulty", req.difficulty.label()),
      ("math_guide", math_guide),
    ],
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Difficulty, GenerateRequest};

  fn req(subject: Subject, difficulty: Difficulty, question_type: QuestionType) -> GenerateRequest {
    GenerateRequest { subject, difficulty, question_type }
  }

  #[test]
  fn every_type_produces_a_prompt_with_subject_and_difficulty() {
    for qt in QuestionType::ALL {
      let p = build_prompt(&req(Subject::English, Difficulty::Hard, qt));
      assert!(!p.is_empty());
      assert!(p.contains("英文"), "missing subject in {} prompt", qt.label());
      assert!(p.contains("困難"), "missing difficulty in {} prompt", qt.label());
      assert!(p.contains(qt.label()), "missing type label in {} prompt", qt.label());
    }
  }

  #[test]
  fn math_guide_only_for_math() {
    let math = build_prompt(&req(Subject::Math, Difficulty::Easy, QuestionType::SingleChoice));
    assert!(math.contains("sqrt(n)"));
    assert!(math.contains("請避免使用 LaTeX 格式或其他特殊符號。"));

    for subject in [Subject::Chinese, Subject::English, Subject::Science, Subject::Social] {
      let p = build_prompt(&req(subject, Difficulty::Easy, QuestionType::SingleChoice));
      assert!(!p.contains("sqrt(n)"), "math guide leaked into {}", subject.label());
    }
  }

  #[test]
  fn no_unfilled_placeholders_remain() {
    for qt in QuestionType::ALL {
      let p = build_prompt(&req(Subject::Math, Difficulty::Extreme, qt));
      for needle in ["{subject}", "{difficulty}", "{math_guide}"] {
        assert!(!p.contains(needle), "{} left in {} prompt", needle, qt.label());
      }
    }
  }

  #[test]
  fn templates_pin_the_expected_json_shape() {
    let matching = build_prompt(&req(Subject::Social, Difficulty::Normal, QuestionType::Matching));
    assert!(matching.contains("\"pairs\""));

    let reading = build_prompt(&req(Subject::Chinese, Difficulty::Normal, QuestionType::ReadingSet));
    assert!(reading.contains("\"passage\""));
    assert!(reading.contains("\"questions\""));

    let fill = build_prompt(&req(Subject::Science, Difficulty::Normal, QuestionType::FillInBlank));
    assert!(fill.contains("\"options\": null"));
    assert!(fill.contains("______"));
  }
}
