//! 题库后端
//!
//! 所有题库实现共享同一契约：构造时从 `[tiku]` 配置段加载自身所需
//! 的键，缺失则自我停用；`resolve` 把一道题解析为候选答案。上层
//! 通过固定的 provider 注册表选择具体实现。

pub mod adapter;
pub mod ai;
mod interval;
pub mod like;
mod prompt;
pub mod siliconflow;
pub mod smart;
pub mod yanxi;

use async_trait::async_trait;
use tracing::error;

use crate::config::TikuSection;
use crate::error::BankResult;
use crate::models::Question;

pub use adapter::TikuAdapter;
pub use ai::AiBank;
pub use like::TikuLike;
pub use siliconflow::SiliconFlow;
pub use smart::SmartTiku;
pub use yanxi::TikuYanxi;

/// 各题库共享的运行设置，初始化后不再变化
#[derive(Debug, Clone)]
pub struct BankSettings {
    /// 是否直接提交（false 为仅保存不提交）
    pub submit: bool,
    /// 自动答题覆盖率阈值
    pub cover_rate: f64,
    /// 判断题「正确」标签列表
    pub true_list: Vec<String>,
    /// 判断题「错误」标签列表
    pub false_list: Vec<String>,
}

impl Default for BankSettings {
    fn default() -> Self {
        Self {
            submit: false,
            cover_rate: 0.8,
            true_list: Vec::new(),
            false_list: Vec::new(),
        }
    }
}

impl BankSettings {
    /// 从配置段解析运行设置
    pub fn from_section(conf: &TikuSection) -> Self {
        Self {
            submit: conf.get_bool("submit", false),
            cover_rate: conf.get_f64("cover_rate", 0.8),
            true_list: split_list(conf.get("true_list")),
            false_list: split_list(conf.get("false_list")),
        }
    }

    /// 将题库返回的判断题答案映射为布尔值
    ///
    /// 配置维护两份选项列表分别对应「正确」与「错误」，以应对题库对
    /// 判断题答案响应的各种可能情况。两份列表都未命中时记录错误并
    /// 随机选择，该方法对任何输入都有返回值。
    pub fn classify_judgement(&self, answer: &str) -> bool {
        let answer = answer.trim();
        if self.true_list.iter().any(|label| label == answer) {
            true
        } else if self.false_list.iter().any(|label| label == answer) {
            false
        } else {
            error!(
                "无法判断答案 -> {} 对应的是正确还是错误, 请自行判断并加入配置文件重启脚本, 本次将会随机选择选项",
                answer
            );
            rand::random::<bool>()
        }
    }

    /// 答题提交 API 中的 pyFlag 参数：留空直接提交，"1" 保存但不提交
    pub fn submit_mode(&self) -> &'static str {
        if self.submit {
            ""
        } else {
            "1"
        }
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// 题库后端契约
#[async_trait]
pub trait QuestionBank: Send {
    /// 题库名称，用于日志
    fn name(&self) -> &str;

    /// 是否已停用；停用在实例生命周期内不可逆
    fn disabled(&self) -> bool;

    /// 运行设置
    fn settings(&self) -> &BankSettings;

    /// 初始化副作用（获取初始余额等）；缺键导致的停用在构造时已完成
    async fn init(&mut self) -> BankResult<()> {
        Ok(())
    }

    /// 查询一道题的候选答案
    ///
    /// `Ok(None)` 表示本次未取得答案（题库保持可用）；`Err` 只用于
    /// 需要上层感知的故障，终止性与否由 [`crate::BankError::is_terminal`] 区分。
    async fn resolve(&mut self, question: &Question) -> BankResult<Option<String>>;

    /// 判断题答案映射，见 [`BankSettings::classify_judgement`]
    fn classify_judgement(&self, answer: &str) -> bool {
        self.settings().classify_judgement(answer)
    }

    /// 提交模式参数，见 [`BankSettings::submit_mode`]
    fn submit_mode(&self) -> &'static str {
        self.settings().submit_mode()
    }
}

/// 固定的题库注册表：按 provider 名称实例化对应后端
///
/// provider 取值与配置文件保持一致，集合在编译期封闭；未知名称
/// 返回 `None`，由上层停用题库功能。
pub fn create_bank(provider: &str, conf: &TikuSection) -> Option<Box<dyn QuestionBank>> {
    match provider {
        "TikuYanxi" => Some(Box::new(TikuYanxi::new(conf))),
        "TikuLike" => Some(Box::new(TikuLike::new(conf))),
        "TikuAdapter" => Some(Box::new(TikuAdapter::new(conf))),
        "AI" => Some(Box::new(AiBank::new(conf))),
        "SiliconFlow" => Some(Box::new(SiliconFlow::new(conf))),
        "SmartTiku" => Some(Box::new(SmartTiku::new(conf))),
        _ => None,
    }
}

/// 与远端题库通信的 HTTP 客户端，跳过证书校验以兼容自建代理
pub(crate) fn insecure_client() -> reqwest::Client {
    reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .build()
        .unwrap_or_default()
}
