//! 硅基流动大模型答题实现
//!
//! 通过 `async-openai` 调用硅基流动的 OpenAI 兼容接口，提示词与
//! 输出解析和通用 AI 题库一致。

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{error, info};

use super::interval::RequestInterval;
use super::{prompt, BankSettings, QuestionBank};
use crate::config::TikuSection;
use crate::error::{BankError, BankResult};
use crate::models::Question;

const SILICONFLOW_ENDPOINT: &str = "https://api.siliconflow.cn/v1";
const SILICONFLOW_MODEL: &str = "deepseek-ai/DeepSeek-V3";

pub struct SiliconFlow {
    settings: BankSettings,
    interval: RequestInterval,
    client: Client<OpenAIConfig>,
    model: String,
    disabled: bool,
}

impl SiliconFlow {
    pub fn new(conf: &TikuSection) -> Self {
        let endpoint = conf.get_or("siliconflow_endpoint", SILICONFLOW_ENDPOINT);
        let model = conf.get_or("siliconflow_model", SILICONFLOW_MODEL);
        let key = conf.get_or("siliconflow_key", "");

        let disabled = key.is_empty();
        if disabled {
            info!("未配置 siliconflow_key, 已停用硅基流动题库");
        }

        let openai_config = OpenAIConfig::new()
            .with_api_key(key)
            .with_api_base(endpoint);

        Self {
            settings: BankSettings::from_section(conf),
            interval: RequestInterval::new(conf.get_u64("min_interval_seconds", 3)),
            client: Client::with_config(openai_config),
            model,
            disabled,
        }
    }
}

#[async_trait::async_trait]
impl QuestionBank for SiliconFlow {
    fn name(&self) -> &str {
        "硅基流动大模型"
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

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(prompt::system_prompt(question.kind))
            .build()
            .map_err(|e| BankError::Llm(e.to_string()))?;
        let user_prompt = prompt::user_prompt(question);
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_prompt.as_str())
            .build()
            .map_err(|e| BankError::Llm(e.to_string()))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_msg),
                ChatCompletionRequestMessage::User(user_msg),
            ])
            .temperature(0.7)
            .max_tokens(4096u32)
            .build()
            .map_err(|e| BankError::Llm(e.to_string()))?;

        let response = match self.client.chat().create(request).await {
            Ok(response) => response,
            Err(e) => {
                error!("硅基流动API异常：{}", e);
                return Ok(None);
            }
        };

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        Ok(prompt::parse_answer(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_disables_bank() {
        assert!(SiliconFlow::new(&TikuSection::default()).disabled());
    }

    #[test]
    fn test_defaults() {
        let bank = SiliconFlow::new(&TikuSection::from_pairs([("siliconflow_key", "sk-test")]));
        assert!(!bank.disabled());
        assert_eq!(bank.model, SILICONFLOW_MODEL);
    }

    #[test]
    fn test_model_override() {
        let bank = SiliconFlow::new(&TikuSection::from_pairs([
            ("siliconflow_key", "sk-test"),
            ("siliconflow_model", "Qwen/Qwen2.5-72B-Instruct"),
        ]));
        assert_eq!(bank.model, "Qwen/Qwen2.5-72B-Instruct");
    }
}
