//! 题目数据模型

use serde::{Deserialize, Serialize};

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// 单选题
    Single,
    /// 多选题
    Multiple,
    /// 填空题
    Completion,
    /// 判断题
    Judgement,
    /// 其他（简答等）
    Other,
}

impl QuestionType {
    /// tikuAdapter 协议使用的数字类型码
    pub fn adapter_code(self) -> u8 {
        match self {
            QuestionType::Single => 0,
            QuestionType::Multiple => 1,
            QuestionType::Completion => 2,
            QuestionType::Judgement => 3,
            QuestionType::Other => 4,
        }
    }

    /// Like 知识库查询时拼接在题干前的类型标签
    pub fn like_prefix(self) -> &'static str {
        match self {
            QuestionType::Single => "【单选题】",
            QuestionType::Multiple => "【多选题】",
            QuestionType::Completion => "【填空题】",
            QuestionType::Judgement => "【判断题】",
            QuestionType::Other => "【其他类型题目】",
        }
    }

    /// 尝试从字符串解析题目类型（精确匹配）
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "single" => Some(QuestionType::Single),
            "multiple" => Some(QuestionType::Multiple),
            "completion" => Some(QuestionType::Completion),
            "judgement" => Some(QuestionType::Judgement),
            "other" => Some(QuestionType::Other),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Single => "single",
            QuestionType::Multiple => "multiple",
            QuestionType::Completion => "completion",
            QuestionType::Judgement => "judgement",
            QuestionType::Other => "other",
        }
    }
}

/// 选项集合
///
/// 调用方可能传入换行分隔的整块文本，也可能传入有序列表，两种形式
/// 在各题库内按需展开或拼接。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Options {
    Text(String),
    List(Vec<String>),
}

impl Options {
    /// 按行展开为选项列表
    pub fn lines(&self) -> Vec<String> {
        match self {
            Options::Text(s) => s.lines().map(|l| l.to_string()).collect(),
            Options::List(v) => v.clone(),
        }
    }

    /// 使用指定分隔符拼接选项
    pub fn joined(&self, sep: &str) -> String {
        match self {
            Options::Text(s) => s.clone(),
            Options::List(v) => v.join(sep),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Options::Text(s) => s.is_empty(),
            Options::List(v) => v.is_empty(),
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Options::Text(String::new())
    }
}

/// 一次答案解析请求的题目描述
///
/// 在单次解析过程中不可变；题干由调用方预先去除与内容无关的
/// 【单选题】之类字段。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// 题干
    pub title: String,
    /// 题目类型
    #[serde(rename = "type")]
    pub kind: QuestionType,
    /// 选项
    #[serde(default)]
    pub options: Options,
}

impl Question {
    pub fn new(title: impl Into<String>, kind: QuestionType, options: Options) -> Self {
        Self {
            title: title.into(),
            kind,
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_type_roundtrip() {
        for s in ["single", "multiple", "completion", "judgement", "other"] {
            let kind = QuestionType::from_str(s).unwrap();
            assert_eq!(kind.as_str(), s);
        }
        assert!(QuestionType::from_str("选择题").is_none());
    }

    #[test]
    fn test_adapter_code() {
        assert_eq!(QuestionType::Single.adapter_code(), 0);
        assert_eq!(QuestionType::Judgement.adapter_code(), 3);
        assert_eq!(QuestionType::Other.adapter_code(), 4);
    }

    #[test]
    fn test_options_untagged_deserialize() {
        // 字符串与列表两种形式都应可反序列化
        let q: Question = serde_json::from_str(
            r#"{"title": "1+1=?", "type": "single", "options": "A. 1\nB. 2"}"#,
        )
        .unwrap();
        assert_eq!(q.options.lines(), vec!["A. 1", "B. 2"]);

        let q: Question = serde_json::from_str(
            r#"{"title": "1+1=?", "type": "single", "options": ["A. 1", "B. 2"]}"#,
        )
        .unwrap();
        assert_eq!(q.options.joined(", "), "A. 1, B. 2");
    }

    #[test]
    fn test_options_joined_text_passthrough() {
        let options = Options::Text("甲\n乙".to_string());
        // 文本形式按原样返回，不做分隔符替换
        assert_eq!(options.joined(", "), "甲\n乙");
    }
}
