// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # Exception 模块
//!
//! 该模块定义了文件服务器在连接处理生命周期中可能抛出的各类异常情况。
//!
//! ## 设计意图
//! - **错误分类**：区分对端静默断开、请求行格式错误以及底层 I/O 故障。
//! - **语义映射**：每个变体都对应了特定的处理路径，便于连接处理器决定是静默关闭、
//!   回写 405 还是按 500 记入结果日志。
//! - **用户友好**：通过实现 `std::fmt::Display`，确保错误信息可以被安全地记录到日志。

use std::fmt;
use std::io;

/// 服务器处理连接过程中发生的异常类型。
///
/// 该枚举通常作为 `Result` 的 `Err` 部分返回，用于指示处理失败的具体原因。
#[derive(Debug)]
pub enum Exception {
    /// 对端在发送任何内容之前关闭了连接，或请求行是空行。
    /// 按协议约定静默关闭，不产生响应，也不算作处理失败。
    EmptyRequest,
    /// 请求行无法切分出方法和路径两个记号。
    /// 携带原始请求行以便写入结果日志，处理方式与不支持的方法一致（405）。
    MalformedRequestLine(String),
    /// 底层 I/O 操作失败（读写 Socket、读取文件或目录等）。
    /// 连接处理器将其视为意外错误，按 500 记入结果日志。
    Io(io::Error),
}

use Exception::*;

/// 为 `Exception` 实现 `Display` 特性，使其支持字符串格式化输出。
///
/// 工业实践中，这些描述信息常用于系统日志（Logging）。
impl fmt::Display for Exception {
    /// 根据错误类型写入人类可读的描述文本。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyRequest => write!(f, "Empty request line"),
            MalformedRequestLine(line) => write!(f, "Malformed request line: {}", line),
            Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

/// 允许使用 `?` 将底层 I/O 错误直接上抛为 `Exception`。
impl From<io::Error> for Exception {
    fn from(e: io::Error) -> Self {
        Io(e)
    }
}
