//! 答案解析入口
//!
//! 标准化题干 → 查缓存 → 题库查询 → 类型校验 的完整流程。题库功能
//! 是可选项：没有配置时整个入口停用，所有查询直接返回无答案，调用
//! 方自行兜底（例如随机选择）。

use tracing::{debug, error, info};

use crate::banks::{create_bank, BankSettings, QuestionBank};
use crate::cache::AnswerCache;
use crate::config::TikuSection;
use crate::error::BankResult;
use crate::models::Question;
use crate::utils::text::normalize_title;
use crate::validate::{AnswerTypeValidator, DefaultValidator};

/// 题库功能入口
///
/// 封装所选题库后端（可能是主备组合）、本地答案缓存与类型校验。
pub struct Tiku {
    bank: Option<Box<dyn QuestionBank>>,
    cache: Option<AnswerCache>,
    validator: Box<dyn AnswerTypeValidator>,
}

impl Tiku {
    /// 从配置段构建
    ///
    /// 配置段缺失、provider 缺失或未知、初始化失败，都只会得到一个
    /// 停用的实例，不会向调用方报错。
    pub async fn from_config(conf: Option<TikuSection>) -> Self {
        let Some(conf) = conf else {
            info!("未找到tiku配置, 已忽略题库功能");
            return Self::disabled_instance();
        };

        let provider = conf.get_or("provider", "");
        if provider.is_empty() {
            error!("未找到题库配置, 已忽略题库功能");
            return Self::disabled_instance();
        }

        let Some(mut bank) = create_bank(&provider, &conf) else {
            error!("未知的题库 provider: {}, 已忽略题库功能", provider);
            return Self::disabled_instance();
        };

        if let Err(e) = bank.init().await {
            error!("{}初始化失败: {}, 已忽略题库功能", bank.name(), e);
            return Self::disabled_instance();
        }

        Self {
            bank: Some(bank),
            cache: Some(AnswerCache::default()),
            validator: Box::new(DefaultValidator),
        }
    }

    /// 以显式组件构建（测试或嵌入自定义题库时使用）
    pub fn with_bank(bank: Box<dyn QuestionBank>, cache: AnswerCache) -> Self {
        Self {
            bank: Some(bank),
            cache: Some(cache),
            validator: Box::new(DefaultValidator),
        }
    }

    /// 替换默认的类型校验实现
    pub fn with_validator(mut self, validator: Box<dyn AnswerTypeValidator>) -> Self {
        self.validator = validator;
        self
    }

    fn disabled_instance() -> Self {
        Self {
            bank: None,
            cache: None,
            validator: Box::new(DefaultValidator),
        }
    }

    /// 题库功能是否停用
    pub fn disabled(&self) -> bool {
        self.bank.as_ref().map_or(true, |bank| bank.disabled())
    }

    /// 解析一道题的答案
    ///
    /// 返回 `Ok(None)` 表示没有可用答案；`Err` 只在终止性故障
    /// （token 耗尽）时出现，期望调用方停止流程。
    pub async fn resolve(&mut self, question: &Question) -> BankResult<Option<String>> {
        let (Some(bank), Some(cache)) = (self.bank.as_mut(), self.cache.as_ref()) else {
            return Ok(None);
        };
        if bank.disabled() {
            return Ok(None);
        }

        debug!("原始标题：{}", question.title);
        let title = normalize_title(&question.title);
        debug!("处理后标题：{}", title);

        if let Some(answer) = cache.get(&title) {
            info!("从缓存中获取答案：{} -> {}", title, answer);
            return Ok(Some(answer.trim().to_string()));
        }

        let normalized = Question::new(title.clone(), question.kind, question.options.clone());
        let answer = match bank.resolve(&normalized).await {
            Ok(answer) => answer,
            Err(e) if e.is_terminal() => return Err(e),
            Err(e) => {
                error!("从{}获取答案失败：{} ({})", bank.name(), title, e);
                return Ok(None);
            }
        };

        let Some(answer) = answer else {
            error!("从{}获取答案失败：{}", bank.name(), title);
            return Ok(None);
        };

        let answer = answer.trim().to_string();
        // 先写缓存，后做类型校验
        // TODO: 类型校验失败的答案也会留在缓存里，下次命中会原样回放
        cache.put(&title, &answer);
        info!("从{}获取答案：{} -> {}", bank.name(), title, answer);

        if self.validator.matches(&answer, &normalized, bank.settings()) {
            Ok(Some(answer))
        } else {
            info!("从{}获取到的答案类型与题目类型不符，已舍弃", bank.name());
            Ok(None)
        }
    }

    /// 判断题答案映射；停用时固定返回 false
    pub fn classify_judgement(&self, answer: &str) -> bool {
        match &self.bank {
            Some(bank) if !bank.disabled() => bank.classify_judgement(answer),
            _ => false,
        }
    }

    /// 提交模式参数（""=直接提交, "1"=仅保存）
    pub fn submit_mode(&self) -> &'static str {
        self.bank
            .as_ref()
            .map(|bank| bank.submit_mode())
            .unwrap_or("1")
    }

    /// 自动答题覆盖率阈值
    pub fn cover_rate(&self) -> f64 {
        self.bank
            .as_ref()
            .map(|bank| bank.settings().cover_rate)
            .unwrap_or_else(|| BankSettings::default().cover_rate)
    }
}
