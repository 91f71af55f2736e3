//! AI 答题的提示词构造与输出解析
//!
//! 各 AI 题库共用：按题型生成系统提示词，要求模型以
//! `{"Answer": [...]}` 的 JSON 结构输出，并在这里解析该结构。

use regex::Regex;
use serde::Deserialize;
use tracing::error;

use crate::models::{Question, QuestionType};
use crate::utils::text::strip_option_prefix;

/// 模型应答的目标结构
#[derive(Debug, Deserialize)]
struct AnswerPayload {
    #[serde(rename = "Answer")]
    answer: Vec<String>,
}

/// 按题型返回系统提示词
pub(crate) fn system_prompt(kind: QuestionType) -> &'static str {
    match kind {
        QuestionType::Single => "本题为单选题，你只能选择一个选项，请根据题目和选项回答问题，以json格式输出正确的选项内容，示例回答：{\"Answer\": [\"答案\"]}。除此之外不要输出任何多余的内容，也不要使用MD语法。如果你使用了互联网搜索，也请不要返回搜索的结果和参考资料",
        QuestionType::Multiple => "本题为多选题，你必须选择两个或以上选项，请根据题目和选项回答问题，以json格式输出正确的选项内容，示例回答：{\"Answer\": [\"答案1\",\"答案2\",\"答案3\"]}。除此之外不要输出任何多余的内容，也不要使用MD语法。如果你使用了互联网搜索，也请不要返回搜索的结果和参考资料",
        QuestionType::Completion => "本题为填空题，你必须根据语境和相关知识填入合适的内容，请根据题目回答问题，以json格式输出正确的答案，示例回答：{\"Answer\": [\"答案\"]}。除此之外不要输出任何多余的内容，也不要使用MD语法。如果你使用了互联网搜索，也请不要返回搜索的结果和参考资料",
        QuestionType::Judgement => "本题为判断题，你只能回答正确或者错误，请根据题目回答问题，以json格式输出正确的答案，示例回答：{\"Answer\": [\"正确\"]}。除此之外不要输出任何多余的内容，也不要使用MD语法。如果你使用了互联网搜索，也请不要返回搜索的结果和参考资料",
        QuestionType::Other => "本题为简答题，你必须根据语境和相关知识填入合适的内容，请根据题目回答问题，以json格式输出正确的答案，示例回答：{\"Answer\": [\"这是我的答案\"]}。除此之外不要输出任何多余的内容，也不要使用MD语法。如果你使用了互联网搜索，也请不要返回搜索的结果和参考资料",
    }
}

/// 构造用户消息
///
/// 选择题附带选项，且去掉行首字母前缀，防止模型只回字母不回内容。
pub(crate) fn user_prompt(question: &Question) -> String {
    match question.kind {
        QuestionType::Single | QuestionType::Multiple => {
            let options = question
                .options
                .lines()
                .iter()
                .map(|option| strip_option_prefix(option))
                .collect::<Vec<_>>()
                .join("\n");
            format!("题目：{}\n选项：{}", question.title, options)
        }
        _ => format!("题目：{}", question.title),
    }
}

/// 去掉可能包裹模型输出的 Markdown 代码块（``` 或 ```json）
pub(crate) fn strip_code_fence(text: &str) -> String {
    if let Ok(re) = Regex::new(r"(?s)^\s*```(?:json)?\s*(.*?)\s*```\s*$") {
        if let Some(caps) = re.captures(text) {
            if let Some(inner) = caps.get(1) {
                return inner.as_str().trim().to_string();
            }
        }
    }
    text.trim().to_string()
}

/// 解析模型原始输出
///
/// 剥掉可选的代码块包装后按 JSON 解码，`Answer` 数组以换行拼接；
/// 任何解析失败都记录日志并视为无答案，不向上传播。
pub(crate) fn parse_answer(raw: &str) -> Option<String> {
    let cleaned = strip_code_fence(raw);
    match serde_json::from_str::<AnswerPayload>(&cleaned) {
        Ok(payload) => {
            let answer = payload.answer.join("\n").trim().to_string();
            if answer.is_empty() {
                None
            } else {
                Some(answer)
            }
        }
        Err(_) => {
            error!("无法解析大模型输出内容");
            None
        }
    }
}
