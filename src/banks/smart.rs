//! 智能题库策略：言溪题库优先，AI 大模型备用
//!
//! 主备两个题库独立初始化，任何一个失败只是把对应槽位留空，不影响
//! 另一个。查询时主题库的有效答案直接返回；主题库无结果、答案无效
//! 或查询异常时，按配置转由备用题库兜底。单个题库的故障在这里被
//! 隔离，不会中断整体查询。

use tracing::{error, info};

use super::{AiBank, BankSettings, QuestionBank, TikuYanxi};
use crate::config::TikuSection;
use crate::error::BankResult;
use crate::models::Question;

/// 题库以提示性文本表达的软失败特征，命中任意一条即视为无效答案
const INVALID_PATTERNS: [&str; 10] = [
    "未找到答案",
    "查询失败",
    "次数不足",
    "错误",
    "失败",
    "不知道",
    "不清楚",
    "无法回答",
    "sorry",
    "抱歉",
];

pub struct SmartTiku {
    settings: BankSettings,
    primary: Option<Box<dyn QuestionBank>>,
    fallback: Option<Box<dyn QuestionBank>>,
    fallback_enabled: bool,
    disabled: bool,
}

impl SmartTiku {
    pub fn new(conf: &TikuSection) -> Self {
        let primary = TikuYanxi::new(conf);
        let primary: Option<Box<dyn QuestionBank>> = if primary.disabled() {
            error!("言溪题库初始化失败, 主题库留空");
            None
        } else {
            info!("言溪题库初始化成功");
            Some(Box::new(primary))
        };

        let fallback = AiBank::new(conf);
        let fallback: Option<Box<dyn QuestionBank>> = if fallback.disabled() {
            error!("AI题库初始化失败, 备用题库留空");
            None
        } else {
            info!("AI题库初始化成功");
            Some(Box::new(fallback))
        };

        let disabled = primary.is_none() && fallback.is_none();
        if disabled {
            error!("所有题库初始化失败，智能题库将停用");
        }

        Self {
            settings: BankSettings::from_section(conf),
            primary,
            fallback,
            fallback_enabled: conf.get_bool("fallback_enabled", true),
            disabled,
        }
    }

    /// 以显式的主/备题库组合构建（测试或自定义组合使用）
    pub fn with_banks(
        primary: Option<Box<dyn QuestionBank>>,
        fallback: Option<Box<dyn QuestionBank>>,
        fallback_enabled: bool,
        settings: BankSettings,
    ) -> Self {
        let disabled = primary.is_none() && fallback.is_none();
        Self {
            settings,
            primary,
            fallback,
            fallback_enabled,
            disabled,
        }
    }

    /// 过滤题库以提示性文本表达的软失败
    pub fn is_valid_answer(answer: &str) -> bool {
        let answer = answer.trim();
        if answer.is_empty() {
            return false;
        }
        let lowered = answer.to_lowercase();
        !INVALID_PATTERNS
            .iter()
            .any(|pattern| lowered.contains(pattern))
    }

    async fn try_bank(
        bank: &mut Box<dyn QuestionBank>,
        question: &Question,
    ) -> Option<String> {
        match bank.resolve(question).await {
            Ok(Some(answer)) if Self::is_valid_answer(&answer) => {
                info!("{}找到有效答案", bank.name());
                Some(answer)
            }
            Ok(_) => {
                info!("{}未找到答案或答案无效", bank.name());
                None
            }
            // 单个题库的故障不中断整体查询，终止性错误也一并隔离
            Err(e) => {
                error!("{}查询异常: {}", bank.name(), e);
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl QuestionBank for SmartTiku {
    fn name(&self) -> &str {
        "智能题库(言溪+AI)"
    }

    fn disabled(&self) -> bool {
        self.disabled
    }

    fn settings(&self) -> &BankSettings {
        self.primary
            .as_ref()
            .or(self.fallback.as_ref())
            .map(|bank| bank.settings())
            .unwrap_or(&self.settings)
    }

    async fn init(&mut self) -> BankResult<()> {
        if let Some(primary) = self.primary.as_mut() {
            if let Err(e) = primary.init().await {
                error!("{}初始化失败: {}", primary.name(), e);
                self.primary = None;
            }
        }
        if let Some(fallback) = self.fallback.as_mut() {
            if let Err(e) = fallback.init().await {
                error!("{}初始化失败: {}", fallback.name(), e);
                self.fallback = None;
            }
        }
        self.disabled = self.primary.is_none() && self.fallback.is_none();
        Ok(())
    }

    async fn resolve(&mut self, question: &Question) -> BankResult<Option<String>> {
        if self.disabled {
            return Ok(None);
        }

        if let Some(primary) = self.primary.as_mut() {
            if !primary.disabled() {
                info!("正在使用{}查询...", primary.name());
                if let Some(answer) = Self::try_bank(primary, question).await {
                    return Ok(Some(answer));
                }
            }
        }

        if self.fallback_enabled {
            if let Some(fallback) = self.fallback.as_mut() {
                if !fallback.disabled() {
                    info!("主题库无结果，尝试{}...", fallback.name());
                    if let Some(answer) = Self::try_bank(fallback, question).await {
                        return Ok(Some(answer));
                    }
                }
            }
        }

        error!("所有题库均未找到有效答案");
        Ok(None)
    }
}
