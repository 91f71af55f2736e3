//! # Tiku Answer
//!
//! 自动化答题工具的答案解析层：对接多个可互换的题库后端（远端搜题
//! 接口与 AI 大模型），带本地答案缓存与主备兜底策略。
//!
//! ## 解析流程
//!
//! 调用方提供题目描述 → 标准化题干 → 查本地缓存 → 未命中时交给所选
//! 题库后端查询 → 答案做类型校验 → 通过则返回并缓存。任何一步拿不到
//! 答案都以「无答案」收敛，调用方自行兜底。
//!
//! ## 模块结构
//!
//! - `banks/` - 题库后端实现与共享契约
//! - `cache` - 本地答案缓存
//! - `config` - 配置适配（`[tiku]` 配置段）
//! - `models/` - 题目数据模型
//! - `resolver` - 顶层解析入口
//! - `validate` - 答案类型校验

pub mod banks;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
pub mod utils;
pub mod validate;

// 重新导出常用类型
pub use banks::{create_bank, BankSettings, QuestionBank};
pub use cache::AnswerCache;
pub use config::TikuSection;
pub use error::{BankError, BankResult};
pub use models::{Options, Question, QuestionType};
pub use resolver::Tiku;
pub use validate::{AnswerTypeValidator, DefaultValidator};
