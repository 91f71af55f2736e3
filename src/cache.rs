//! 本地答案缓存
//!
//! 以「标准化题干 → 答案」的扁平 JSON 对象落盘，缓存设计参考
//! SocialSisterYi/xuexiaoyi-to-xuexitong-tampermonkey-proxy。
//! 读写都是整文件同步操作，单进程单线程使用，不做并发保护。

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, error};

/// 默认缓存文件
pub const DEFAULT_CACHE_FILE: &str = "cache.json";

/// 答案缓存
///
/// 持久化是尽力而为的：读失败退化为空缓存，写失败记录日志后忽略，
/// 缓存问题永远不阻断答题流程。
#[derive(Debug, Clone)]
pub struct AnswerCache {
    path: PathBuf,
}

impl AnswerCache {
    /// 打开缓存，文件不存在时创建空结构
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let cache = Self { path: path.into() };
        if !cache.path.is_file() {
            cache.write(&BTreeMap::new());
        }
        cache
    }

    /// 查询缓存，返回存储的原始答案
    pub fn get(&self, title: &str) -> Option<String> {
        self.read().get(title).cloned()
    }

    /// 写入缓存，同名条目覆盖，随后立即整文件落盘
    pub fn put(&self, title: &str, answer: &str) {
        let mut data = self.read();
        data.insert(title.to_string(), answer.to_string());
        self.write(&data);
        debug!("缓存已更新: {}", title);
    }

    fn read(&self) -> BTreeMap<String, String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => BTreeMap::new(),
        }
    }

    fn write(&self, data: &BTreeMap<String, String>) {
        match serde_json::to_string_pretty(data) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    error!("缓存写入失败: {}", e);
                }
            }
            Err(e) => error!("缓存序列化失败: {}", e),
        }
    }
}

impl Default for AnswerCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_cache() -> (tempfile::TempDir, AnswerCache) {
        let dir = tempfile::tempdir().unwrap();
        let cache = AnswerCache::new(dir.path().join("cache.json"));
        (dir, cache)
    }

    #[test]
    fn test_round_trip() {
        let (_dir, cache) = temp_cache();
        cache.put("（判断）今天是星期一", "正确");
        assert_eq!(
            cache.get("（判断）今天是星期一").as_deref(),
            Some("正确")
        );
        assert_eq!(cache.get("别的题目"), None);
    }

    #[test]
    fn test_overwrite() {
        let (_dir, cache) = temp_cache();
        cache.put("题目", "答案一");
        cache.put("题目", "答案二");
        assert_eq!(cache.get("题目").as_deref(), Some("答案二"));
    }

    #[test]
    fn test_creates_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        let _cache = AnswerCache::new(&path);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_corrupt_store_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "不是 JSON").unwrap();

        let cache = AnswerCache::new(&path);
        assert_eq!(cache.get("题目"), None);

        // 写入会重建整个存储
        cache.put("题目", "答案");
        assert_eq!(cache.get("题目").as_deref(), Some("答案"));
    }

    #[test]
    fn test_pretty_printed_output() {
        let (_dir, cache) = temp_cache();
        cache.put("题目", "答案");
        let content = fs::read_to_string(cache.path.clone()).unwrap();
        assert!(content.contains("\n"));
        let parsed: BTreeMap<String, String> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.get("题目").map(String::as_str), Some("答案"));
    }
}
