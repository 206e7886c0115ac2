// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # HTTP 请求处理模块
//!
//! 该模块是文件服务器的核心组件之一，负责把连接字节流的第一行
//! 解析为强类型的 `Request` 结构体。它涵盖了：
//! 1. 请求行（Request-Line）的读取与切分（方法、原始路径）。
//! 2. 后续请求头的读取与丢弃（服务器不解释任何请求头）。
//! 3. 搜索关键词的推导（去掉一个前导斜杠并做百分号解码）。

use crate::{exception::Exception, util};
use log::{debug, error};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// 表示一个完整的下载/搜索请求元数据。
///
/// 该结构体只保留请求行携带的信息，请求头在读取阶段即被丢弃。
#[derive(Debug, Clone)]
pub struct Request {
    /// 去掉行终止符的完整请求行，用于结果日志
    request_line: String,
    /// 请求行的第一个记号，保留客户端发送的原始大小写
    method: String,
    /// 请求行的第二个记号，含前导斜杠与百分号转义，作为响应缓存的键
    raw_path: String,
    /// 原始路径去掉一个前导斜杠并做百分号解码后的结果，
    /// 既是候选文件的相对路径，也是搜索回退时的关键词
    search_key: String,
}

impl Request {
    /// 从连接的缓冲读取端构建 `Request` 实例。
    ///
    /// # 逻辑步骤
    /// 1. 读取请求行：行终止符兼容 CRLF 与裸 LF；流已结束或行为空时视作对端静默断开。
    /// 2. 丢弃请求头：逐行读取直到空行或流结束，内容不做任何解释。
    /// 3. 切分请求行：交给 [`Request::try_from`] 完成。
    ///
    /// # 参数
    /// * `reader` - 连接的缓冲读取端。
    /// * `id` - 全局连接 ID，用于在并发环境下追踪日志。
    ///
    /// # 错误处理
    /// 对端未发送内容时返回 `Exception::EmptyRequest`；请求行无法切分出
    /// 两个记号时返回 `Exception::MalformedRequestLine`；读取失败时返回
    /// `Exception::Io`。
    pub async fn read_from<R>(reader: &mut R, id: u128) -> Result<Self, Exception>
    where
        R: AsyncBufRead + Unpin,
    {
        // 1. 读取请求行
        let mut request_line = String::new();
        let count = reader.read_line(&mut request_line).await?;
        if count == 0 {
            debug!("[ID{}]对端在发送请求前关闭了连接", id);
            return Err(Exception::EmptyRequest);
        }
        let request_line = request_line
            .trim_end_matches('\n')
            .trim_end_matches('\r')
            .to_string();
        if request_line.is_empty() {
            debug!("[ID{}]请求行为空", id);
            return Err(Exception::EmptyRequest);
        }

        // 2. 逐行读取并丢弃请求头，直到空行或流结束
        let mut header = String::new();
        loop {
            header.clear();
            let count = reader.read_line(&mut header).await?;
            if count == 0 || header.trim_end_matches('\n').trim_end_matches('\r').is_empty() {
                break;
            }
        }

        // 3. 切分请求行
        Self::try_from(&request_line, id)
    }

    /// 把一个请求行切分为方法、原始路径和搜索关键词。
    ///
    /// 按单个空格切分，至少要得到两个记号。方法记号不做大小写归一，
    /// 是否受支持由连接处理器判定；第二个记号之后的内容全部忽略。
    pub fn try_from(request_line: &str, id: u128) -> Result<Self, Exception> {
        let tokens: Vec<&str> = request_line.split(' ').collect();

        if tokens.len() < 2 {
            error!("[ID{}]HTTP请求行格式不正确：{}", id, request_line);
            return Err(Exception::MalformedRequestLine(request_line.to_string()));
        }

        let method = tokens[0].to_string();
        let raw_path = tokens[1].to_string();
        // 只去掉一个前导斜杠，之后再解码
        let stripped = raw_path.strip_prefix('/').unwrap_or(&raw_path);
        let search_key = util::decode_percent(stripped);

        Ok(Self {
            request_line: request_line.to_string(),
            method,
            raw_path,
            search_key,
        })
    }
}

// --- Getter 访向器实现 ---

impl Request {
    /// 获取完整请求行（不含行终止符）
    pub fn request_line(&self) -> &str {
        &self.request_line
    }

    /// 获取请求方法记号
    pub fn method(&self) -> &str {
        &self.method
    }

    /// 获取原始路径（缓存键）
    pub fn raw_path(&self) -> &str {
        &self.raw_path
    }

    /// 获取解码后的搜索关键词
    pub fn search_key(&self) -> &str {
        &self.search_key
    }
}
