//! 言溪题库实现
//!
//! 远端搜题接口，支持多 token 轮换：当前 token 查询次数耗尽时换用
//! 下一个并重试同一道题，列表全部耗尽则抛出终止性错误，由使用者
//! 更换 token 后重启。

use serde_json::Value;
use tracing::{error, info};

use super::{insecure_client, BankSettings, QuestionBank};
use crate::config::TikuSection;
use crate::error::{BankError, BankResult};
use crate::models::Question;

const YANXI_API: &str = "https://tk.enncy.cn/query";

pub struct TikuYanxi {
    settings: BankSettings,
    client: reqwest::Client,
    api: String,
    tokens: Vec<String>,
    token_index: usize,
    /// 剩余查询次数，初始化为 100，每次查询后按服务端返回校对
    times: i64,
    disabled: bool,
}

impl TikuYanxi {
    pub fn new(conf: &TikuSection) -> Self {
        let tokens: Vec<String> = conf
            .get("tokens")
            .map(|raw| {
                raw.split(',')
                    .map(|token| token.trim().to_string())
                    .filter(|token| !token.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let disabled = tokens.is_empty();
        if disabled {
            info!("未配置言溪题库 tokens, 已停用该题库");
        }

        Self {
            settings: BankSettings::from_section(conf),
            client: insecure_client(),
            api: YANXI_API.to_string(),
            tokens,
            token_index: 0,
            times: 100,
            disabled,
        }
    }

    /// 覆盖默认接口地址（自建代理或测试环境使用）
    pub fn with_api(mut self, api: impl Into<String>) -> Self {
        self.api = api.into();
        self
    }

    /// 剩余查询次数（服务端上次报告值，仅供参考）
    pub fn remaining_times(&self) -> i64 {
        self.times
    }
}

#[async_trait::async_trait]
impl QuestionBank for TikuYanxi {
    fn name(&self) -> &str {
        "言溪题库"
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

        // 显式遍历 token 列表，而不是按轮换深度递归
        while self.token_index < self.tokens.len() {
            let token = self.tokens[self.token_index].as_str();
            let res = self
                .client
                .get(&self.api)
                .query(&[
                    ("question", question.title.as_str()),
                    ("token", token),
                ])
                .send()
                .await?;

            if !res.status().is_success() {
                let text = res.text().await.unwrap_or_default();
                error!("{}查询失败:\n{}", self.name(), text);
                return Ok(None);
            }

            let body: Value = res.json().await?;
            let code = body.get("code").and_then(Value::as_i64).unwrap_or(0);
            let answer = body
                .pointer("/data/answer")
                .and_then(Value::as_str)
                .unwrap_or_default();

            if code == 0 {
                // code 为 0 表示未查询成功；次数耗尽时轮换 token 重试
                if self.times == 0 || answer.contains("次数不足") {
                    info!("TOKEN查询次数不足, 将会更换并重新搜题");
                    self.token_index += 1;
                    continue;
                }
                let message = body
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                error!(
                    "{}查询失败:\n\t剩余查询数{}:\n\t消息:{}",
                    self.name(),
                    self.times,
                    message
                );
                return Ok(None);
            }

            if let Some(times) = body.pointer("/data/times").and_then(Value::as_i64) {
                self.times = times;
            }
            let answer = answer.trim().to_string();
            return Ok(if answer.is_empty() { None } else { Some(answer) });
        }

        error!("TOKEN用完, 请自行更换再重启脚本");
        Err(BankError::TokensExhausted {
            name: self.name().to_string(),
        })
    }
}
