//! AI 大模型答题实现
//!
//! 走 OpenAI 兼容的 chat/completions 接口，支持 HTTP 代理与最小
//! 请求间隔限流。提示词按题型要求模型输出 `{"Answer": [...]}`
//! 结构，解析失败一律视为无答案。

use std::time::Duration;

use serde_json::{json, Value};
use tracing::{error, info};

use super::interval::RequestInterval;
use super::{prompt, BankSettings, QuestionBank};
use crate::config::TikuSection;
use crate::error::BankResult;
use crate::models::Question;

pub struct AiBank {
    settings: BankSettings,
    interval: RequestInterval,
    client: reqwest::Client,
    endpoint: String,
    key: String,
    model: String,
    disabled: bool,
}

impl AiBank {
    pub fn new(conf: &TikuSection) -> Self {
        let endpoint = conf.get_or("endpoint", "");
        let key = conf.get_or("key", "");
        let model = conf.get_or("model", "");

        let disabled = endpoint.is_empty() || key.is_empty() || model.is_empty();
        if disabled {
            info!("AI大模型答题配置不完整, 已停用该题库");
        }

        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(30));
        if let Some(proxy_url) = conf.get("http_proxy").filter(|url| !url.is_empty()) {
            match reqwest::Proxy::all(proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => error!("HTTP代理配置无效 {}: {}", proxy_url, e),
            }
        }

        Self {
            settings: BankSettings::from_section(conf),
            interval: RequestInterval::new(conf.get_u64("min_interval_seconds", 3)),
            client: builder.build().unwrap_or_default(),
            endpoint,
            key,
            model,
            disabled,
        }
    }
}

#[async_trait::async_trait]
impl QuestionBank for AiBank {
    fn name(&self) -> &str {
        "AI大模型答题"
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

        self.interval.throttle().await;

        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": prompt::system_prompt(question.kind) },
                { "role": "user", "content": prompt::user_prompt(question) },
            ],
        });

        let url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.key)
            .json(&payload)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            error!("API请求失败：{} {}", status, text);
            return Ok(None);
        }

        let body: Value = res.json().await?;
        let content = body
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .unwrap_or_default();

        Ok(prompt::parse_answer(content))
    }
}
