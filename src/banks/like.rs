//! Like 知识库实现
//!
//! 对应官网 API 1.0.8 版（<https://www.datam.site>）。查询时把题型
//! 标签拼在题干前发给服务端，响应按服务端判定的题型码映射回选项
//! 内容；每 10 次查询向余额接口校对一次剩余次数。

use serde_json::{json, Value};
use tracing::{error, info};

use super::{insecure_client, BankSettings, QuestionBank};
use crate::config::TikuSection;
use crate::error::BankResult;
use crate::models::Question;

const LIKE_QUERY_API: &str = "https://api.datam.site/search";
const LIKE_BALANCE_API: &str = "https://api.datam.site/balance";

/// 选项字母 → 选项序号
static OPTION_INDEX: phf::Map<char, usize> = phf::phf_map! {
    'A' => 0, 'B' => 1, 'C' => 2, 'D' => 3, 'E' => 4, 'F' => 5, 'G' => 6, 'H' => 7,
    'a' => 0, 'b' => 1, 'c' => 2, 'd' => 3, 'e' => 4, 'f' => 5, 'g' => 6, 'h' => 7,
};

pub struct TikuLike {
    settings: BankSettings,
    client: reqwest::Client,
    query_api: String,
    balance_api: String,
    token: String,
    model: String,
    search: bool,
    times: i64,
    count: u32,
    disabled: bool,
}

impl TikuLike {
    pub fn new(conf: &TikuSection) -> Self {
        // 多个 token 时取最后一个
        let token = conf
            .get("tokens")
            .map(|raw| {
                raw.split(',')
                    .last()
                    .unwrap_or(raw)
                    .trim()
                    .to_string()
            })
            .unwrap_or_default();

        let disabled = token.is_empty();
        if disabled {
            info!("未配置Like知识库 tokens, 已停用该题库");
        }

        Self {
            settings: BankSettings::from_section(conf),
            client: insecure_client(),
            query_api: LIKE_QUERY_API.to_string(),
            balance_api: LIKE_BALANCE_API.to_string(),
            token,
            model: conf.get_or("likeapi_model", ""),
            search: conf.get_bool("likeapi_search", false),
            times: -1,
            count: 0,
            disabled,
        }
    }

    /// 覆盖默认接口地址（测试环境使用）
    pub fn with_api(mut self, query_api: impl Into<String>, balance_api: impl Into<String>) -> Self {
        self.query_api = query_api.into();
        self.balance_api = balance_api.into();
        self
    }

    /// 向余额接口校对剩余查询次数，失败只记录日志
    async fn update_times(&mut self) {
        let res = self
            .client
            .post(&self.balance_api)
            .json(&json!({ "token": self.token }))
            .send()
            .await;

        match res {
            Ok(res) if res.status().is_success() => {
                if let Ok(body) = res.json::<Value>().await {
                    if let Some(balance) = body.pointer("/data/balance").and_then(Value::as_i64) {
                        self.times = balance;
                        info!("当前LIKE知识库Token剩余查询次数为: {}", self.times);
                    }
                }
            }
            _ => error!("TOKEN出现错误，请检查后再试"),
        }
    }

    /// 把服务端响应按题型码映射回答案文本
    fn map_answer(&self, body: &Value, question: &Question) -> String {
        let q_type = body.pointer("/data/type").and_then(Value::as_i64).unwrap_or(0);
        match q_type {
            1 => {
                // 选择题：服务端返回选项字母，映射回题目选项内容
                let letters = body
                    .pointer("/data/choose")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                let options = question.options.lines();
                let mut answer = String::new();
                for letter in letters.chars() {
                    if let Some(&index) = OPTION_INDEX.get(&letter) {
                        if let Some(option) = options.get(index) {
                            answer.push_str(option);
                            answer.push('\n');
                        }
                    }
                }
                answer
            }
            2 => body
                .pointer("/data/fills")
                .and_then(Value::as_array)
                .map(|fills| {
                    fills
                        .iter()
                        .filter_map(Value::as_str)
                        .map(|fill| format!("{}\n", fill))
                        .collect()
                })
                .unwrap_or_default(),
            3 => {
                if body.pointer("/data/judge").and_then(Value::as_i64) == Some(1) {
                    "正确".to_string()
                } else {
                    "错误".to_string()
                }
            }
            _ => body
                .pointer("/data/others")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

#[async_trait::async_trait]
impl QuestionBank for TikuLike {
    fn name(&self) -> &str {
        "Like知识库"
    }

    fn disabled(&self) -> bool {
        self.disabled
    }

    fn settings(&self) -> &BankSettings {
        &self.settings
    }

    async fn init(&mut self) -> BankResult<()> {
        if !self.disabled {
            self.update_times().await;
        }
        Ok(())
    }

    async fn resolve(&mut self, question: &Question) -> BankResult<Option<String>> {
        if self.disabled {
            return Ok(None);
        }

        let query = format!(
            "{}{}\n{}",
            question.kind.like_prefix(),
            question.title,
            question.options.joined(", ")
        );

        let res = self
            .client
            .post(&self.query_api)
            .json(&json!({
                "query": query,
                "token": self.token,
                "model": self.model,
                "search": self.search,
            }))
            .send()
            .await?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            error!("{}查询失败:\n{}", self.name(), text);
            return Ok(None);
        }

        let body: Value = res.json().await?;
        let answer = self.map_answer(&body, question);

        self.times -= 1;
        self.count = (self.count + 1) % 10;
        if self.count == 0 {
            self.update_times().await;
        }

        let answer = answer.trim().to_string();
        Ok(if answer.is_empty() { None } else { Some(answer) })
    }
}
