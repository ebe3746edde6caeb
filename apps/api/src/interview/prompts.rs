// All LLM prompt constants for the Interview module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{profile_lines, RESPOND_IN_KOREAN};

/// System prompt for question generation. The reply is plain text, one question per line.
pub const QUESTIONS_SYSTEM: &str = "You are an experienced technical interviewer. \
    Write realistic interview questions for the candidate described by the user. \
    Output one question per line, each line starting with '질문: '. \
    Do NOT number the questions and do NOT add any other text.";

/// System prompt for free-text answer feedback.
pub const FEEDBACK_TEXT_SYSTEM: &str = "You are an interview coach. \
    Evaluate the candidate's answer to the interview question and give concise, \
    actionable feedback.";

/// System prompt for structured answer feedback. JSON only.
pub const FEEDBACK_JSON_SYSTEM: &str = "You are an interview coach. \
    Evaluate the candidate's answer to the interview question. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Number of questions requested per generation call.
pub const QUESTION_COUNT: usize = 5;

pub fn questions_prompt(position: &str, experience: &str, company: Option<&str>) -> String {
    let profile = profile_lines(&[
        ("지원 직무", Some(position)),
        ("경력", Some(experience)),
        ("지원 기업", company),
    ]);
    format!(
        "{profile}\n위 지원자를 위한 면접 질문 {QUESTION_COUNT}개를 작성하세요. \
         각 줄은 '질문: '으로 시작해야 합니다.\n{RESPOND_IN_KOREAN}"
    )
}

pub fn feedback_text_prompt(question: &str, answer: &str) -> String {
    format!("질문: {question}\n답변: {answer}\n\n{RESPOND_IN_KOREAN}")
}

pub fn feedback_json_prompt(question: &str, answer: &str) -> String {
    format!(
        r#"질문: {question}
답변: {answer}

Return a JSON object with this EXACT schema (no extra fields):
{{
  "score": 75,
  "improvements": ["구체적인 경험 사례 추가 필요"],
  "suggestions": ["STAR 기법을 활용해보세요"]
}}

"score" is an integer from 0 to 100.
{RESPOND_IN_KOREAN}"#
    )
}
