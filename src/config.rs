//! 配置适配层
//!
//! 题库功能的全部配置来自配置文件中的 `[tiku]` 段。配置文件的解析
//! 由这里一次性完成，之后各题库实现只面对一个已解析好的键值对集合，
//! 缺什么键就停用什么功能，绝不因配置问题向上抛错。

use std::collections::HashMap;
use std::path::Path;

use tracing::{error, info};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// `[tiku]` 配置段
///
/// 所有值统一按字符串保存，由各读取方自行做类型转换。
#[derive(Debug, Clone, Default)]
pub struct TikuSection {
    values: HashMap<String, String>,
}

impl TikuSection {
    /// 从 TOML 配置文件读取 `[tiku]` 段
    ///
    /// 文件缺失、解析失败或没有 `[tiku]` 段时返回 `None`，
    /// 由上层停用题库功能。
    pub fn load(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                info!("未找到配置文件 {}, 已忽略题库功能", path.display());
                return None;
            }
        };
        let table: toml::Table = match toml::from_str(&content) {
            Ok(table) => table,
            Err(e) => {
                error!("配置文件解析失败: {}", e);
                return None;
            }
        };
        let section = table.get("tiku")?.as_table()?;

        let mut values = HashMap::new();
        for (key, value) in section {
            let text = match value {
                toml::Value::String(s) => s.clone(),
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => other.to_string(),
            };
            values.insert(key.clone(), text);
        }
        Some(Self { values })
    }

    /// 直接从键值对构建，供测试或自带配置的上层使用
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key)
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_string()
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        self.get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    pub fn get_u64(&self, key: &str, default: u64) -> u64 {
        self.get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}
