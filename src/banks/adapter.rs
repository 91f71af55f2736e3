//! TikuAdapter 题库实现
//!
//! 对接 <https://github.com/DokiDoki1103/tikuAdapter> 协议：选项去掉
//! 字母前缀后随题干与题型码一起提交，响应取 bestAnswer 列表。

use serde_json::{json, Value};
use tracing::{error, info};

use super::{insecure_client, BankSettings, QuestionBank};
use crate::config::TikuSection;
use crate::error::BankResult;
use crate::models::Question;
use crate::utils::text::strip_option_prefix;

pub struct TikuAdapter {
    settings: BankSettings,
    client: reqwest::Client,
    api: String,
    disabled: bool,
}

impl TikuAdapter {
    pub fn new(conf: &TikuSection) -> Self {
        let api = conf.get_or("url", "");
        let disabled = api.is_empty();
        if disabled {
            info!("未配置TikuAdapter题库 url, 已停用该题库");
        }

        Self {
            settings: BankSettings::from_section(conf),
            client: insecure_client(),
            api,
            disabled,
        }
    }
}

#[async_trait::async_trait]
impl QuestionBank for TikuAdapter {
    fn name(&self) -> &str {
        "TikuAdapter题库"
    }

    fn disabled(&self) -> bool {
        self.disabled
    }

    fn settings(&self) -> &BankSettings {
        &self.settings
    }

    async fn resolve(&mut self, question: &Question) -> BankResult<Option<String>> {
        if self.disabled {
            return Ok(None);
        }

        let options: Vec<String> = question
            .options
            .lines()
            .iter()
            .map(|option| strip_option_prefix(option))
            .collect();

        let res = self
            .client
            .post(&self.api)
            .json(&json!({
                "question": question.title,
                "options": options,
                "type": question.kind.adapter_code(),
            }))
            .send()
            .await?;

        if !res.status().is_success() {
            return Ok(None);
        }

        let body: Value = res.json().await?;
        let best: Vec<&str> = body
            .pointer("/answer/bestAnswer")
            .and_then(Value::as_array)
            .map(|answers| answers.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        if best.is_empty() {
            error!("查询失败, 返回：{}", body);
            return Ok(None);
        }

        let answer = best.join("\n").trim().to_string();
        Ok(if answer.is_empty() { None } else { Some(answer) })
    }
}
