use thiserror::Error;

/// 题库层错误类型
///
/// 绝大多数失败（网络波动、响应异常、模型输出无法解析）在题库内部
/// 记录日志后以 `Ok(None)` 收敛，不会出现在这里；`BankError` 只携带
/// 需要上层感知的失败。
#[derive(Debug, Error)]
pub enum BankError {
    /// 所有轮换 token 均已耗尽，需要人工更换后重启
    #[error("{name} TOKEN 已用完, 请更换")]
    TokensExhausted { name: String },

    /// HTTP 请求失败
    #[error("请求失败: {0}")]
    Http(#[from] reqwest::Error),

    /// LLM 请求构造或调用失败
    #[error("LLM API 调用失败: {0}")]
    Llm(String),
}

impl BankError {
    /// 终止性错误：不应自动重试，期望停止流程并人工介入
    pub fn is_terminal(&self) -> bool {
        matches!(self, BankError::TokensExhausted { .. })
    }
}

/// 题库层结果类型
pub type BankResult<T> = Result<T, BankError>;
