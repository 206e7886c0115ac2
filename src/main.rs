// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 并发文件下载与搜索服务器
//!
//! 该模块实现了基于 Tokio 运行时的并发文件下载与搜索服务器。
//! 核心功能包括：
//! - 对文件根目录下文件的 HTTP 下载服务
//! - 按文件名关键词的目录搜索，结果渲染为 HTML 链接列表
//! - 完整响应字节的进程内缓存
//! - task 与 pool 两种连接分发策略

// --- 模块定义 ---
mod cache;      // 响应缓存实现
mod config;     // 配置解析与管理
mod dispatch;   // 连接分发策略
mod exception;  // 自定义异常与错误处理
mod param;      // 全局常量与静态参数
mod request;    // HTTP 请求报文解析器
mod response;   // HTTP 响应报文构建器
mod search;     // 目录搜索与结果渲染
mod server;     // 监听循环与连接处理
mod util;       // 通用工具函数

use config::Config;
use server::Server;

use log::{error, info, warn, LevelFilter};
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Config as LogConfig, Root},
    encode::pattern::PatternEncoder,
};
use tokio::runtime::Builder;

/// # 程序入口点
///
/// 初始化日志系统、加载配置、构建异步运行时并启动服务器。
fn main() {
    // 1. 初始化日志系统：采用 log4rs 异步日志架构，通过外部 YAML 灵活配置级别与输出目的地。
    //    配置文件缺失或非法时回退到内置的控制台日志。
    if log4rs::init_file("config/log4rs.yaml", Default::default()).is_err() {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(
                "{d(%Y-%m-%d %H:%M:%S)} [{l}] {m}{n}",
            )))
            .build();
        let fallback = LogConfig::builder()
            .appender(Appender::builder().build("stdout", Box::new(stdout)))
            .build(Root::builder().appender("stdout").build(LevelFilter::Info));
        if let Ok(log_config) = fallback {
            let _ = log4rs::init_config(log_config);
        }
        warn!("无法加载config/log4rs.yaml，使用内置控制台日志配置");
    }

    // 2. 环境配置加载：从 TOML 文件读取运行参数
    let config = Config::from_toml("config/development.toml");
    info!("配置文件已载入");
    info!("文件根目录：{}", config.root_dir());
    info!("连接分发策略：{}", config.dispatch());

    // 3. 异步运行时定制：根据配置文件动态分配工作线程数
    let runtime = match Builder::new_multi_thread()
        .worker_threads(config.worker_threads())
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("无法构建Tokio运行时：{}", e);
            panic!("无法构建Tokio运行时：{}", e);
        }
    };

    // 4. 启动服务器主循环
    runtime.block_on(async {
        let server = Server::from_config(config);
        if let Err(e) = server.run().await {
            error!("服务器启动失败：{}", e);
            panic!("服务器启动失败：{}", e);
        }
    });
}
