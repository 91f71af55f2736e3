//! 答案类型校验
//!
//! 只校验答案的「形状」与题目声明的类型是否相符，不判断答案本身
//! 的对错。校验规则由校验器持有，解析流程保证在接受新获取的答案
//! 前调用一次校验；缓存命中的答案不再重复校验。

use crate::banks::BankSettings;
use crate::models::{Question, QuestionType};

/// 答案形状与题型匹配校验
pub trait AnswerTypeValidator: Send {
    fn matches(&self, answer: &str, question: &Question, settings: &BankSettings) -> bool;
}

/// 默认校验实现
///
/// - 判断题：答案必须是配置的正误标签之一
/// - 单选题：恰好一行非空内容
/// - 多选题：两行及以上非空内容
/// - 填空/其他：非空即可
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValidator;

impl AnswerTypeValidator for DefaultValidator {
    fn matches(&self, answer: &str, question: &Question, settings: &BankSettings) -> bool {
        let answer = answer.trim();
        if answer.is_empty() {
            return false;
        }
        let line_count = answer.lines().filter(|line| !line.trim().is_empty()).count();
        match question.kind {
            QuestionType::Judgement => settings
                .true_list
                .iter()
                .chain(settings.false_list.iter())
                .any(|label| label == answer),
            QuestionType::Single => line_count == 1,
            QuestionType::Multiple => line_count >= 2,
            QuestionType::Completion | QuestionType::Other => true,
        }
    }
}
