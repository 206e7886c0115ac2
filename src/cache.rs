use std::collections::HashMap;
use std::sync::RwLock;

use bytes::Bytes;
use log::warn;

/// 响应缓存。以请求行中的原始路径为键，保存完整序列化的响应字节。
///
/// 没有容量上限，也没有过期淘汰，条目一旦写入便在进程生命周期内一直有效。
/// 同一路径的并发首次请求可能各自计算并先后写入，以后写者为准。
pub struct ResponseCache {
    entries: RwLock<HashMap<String, Bytes>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    // 查询
    pub fn lookup(&self, raw_path: &str) -> Option<Bytes> {
        let entries = match self.entries.read() {
            Ok(lock) => lock,
            Err(poisoned) => {
                warn!("响应缓存的读锁已中毒，恢复内部数据");
                poisoned.into_inner()
            }
        };
        entries.get(raw_path).cloned()
    }

    // 写入，键已存在时直接覆盖
    pub fn store(&self, raw_path: &str, response: Bytes) {
        let mut entries = match self.entries.write() {
            Ok(lock) => lock,
            Err(poisoned) => {
                warn!("响应缓存的写锁已中毒，恢复内部数据");
                poisoned.into_inner()
            }
        };
        entries.insert(raw_path.to_string(), response);
    }

    // 测试
    #[cfg(test)]
    pub fn len(&self) -> usize {
        match self.entries.read() {
            Ok(lock) => lock.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}
