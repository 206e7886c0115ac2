//! # 监听与连接处理模块
//!
//! 持有主监听循环与单个连接的完整处理流程。每个连接上只读一个请求，
//! 响应写回后连接即关闭，不维护长连接。

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::exception::Exception;
use crate::param::METHOD_GET;
use crate::request::Request;
use crate::response::Response;
use crate::search;

use bytes::Bytes;
use log::{debug, error, info};
use tokio::{
    fs,
    io::{AsyncWrite, AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream},
};

use std::{
    net::{Ipv4Addr, SocketAddrV4},
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};

/// 文件服务器本体，持有全局配置、响应缓存与连接分发器。
pub struct Server {
    config: Arc<Config>,
    cache: Arc<ResponseCache>,
    dispatcher: Dispatcher,
}

impl Server {
    /// 根据配置构建服务器实例。
    ///
    /// pool策略下分发器会在这里启动工作者任务，因此必须在Tokio运行时内调用。
    pub fn from_config(config: Config) -> Self {
        let dispatcher = Dispatcher::from_config(&config);
        Server {
            config: Arc::new(config),
            cache: Arc::new(ResponseCache::new()),
            dispatcher,
        }
    }

    /// 准备文件根目录并绑定监听端口，返回已就绪的监听器。
    pub async fn bind(&self) -> Result<TcpListener, Exception> {
        // 根目录不存在时自动创建，保证服务端总能在空目录上启动
        fs::create_dir_all(self.config.root_dir()).await?;
        info!("文件根目录{}已就绪", self.config.root_dir());

        // 支持全地址监听 (0.0.0.0) 或本地回环监听 (127.0.0.1)
        let address = match self.config.local() {
            true => Ipv4Addr::new(127, 0, 0, 1),
            false => Ipv4Addr::new(0, 0, 0, 0),
        };
        let socket = SocketAddrV4::new(address, self.config.port());
        let listener = match TcpListener::bind(socket).await {
            Ok(listener) => listener,
            Err(e) => {
                error!("无法绑定端口：{}，错误：{}", self.config.port(), e);
                return Err(Exception::from(e));
            }
        };
        info!("服务端将在{}上监听Socket连接", listener.local_addr()?);
        Ok(listener)
    }

    /// 主事件循环 (Accept Loop)
    ///
    /// 持续接收新连接，并按配置的策略将其分发出去异步处理。
    pub async fn serve(&self, listener: TcpListener) {
        let mut id: u128 = 0;

        loop {
            // 等待新的 TCP 连接
            let (stream, addr) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!("接受TCP连接失败：{}", e);
                    continue;
                }
            };
            debug!("[ID{}]新的连接：{}", id, addr);

            // 为每个连接克隆资源句柄（Arc 引用计数增加）
            let config = Arc::clone(&self.config);
            let cache = Arc::clone(&self.cache);

            self.dispatcher
                .dispatch(handle_connection(stream, id, config, cache));
            id += 1; // 增加请求唯一标识序列
        }
    }

    /// 绑定端口并进入主事件循环。
    pub async fn run(&self) -> Result<(), Exception> {
        let listener = self.bind().await?;
        self.serve(listener).await;
        Ok(())
    }
}

/// # 连接处理器
///
/// 负责单个 TCP 流的生命周期：读取解析请求、执行业务处理、写回响应并记录结果。
async fn handle_connection(
    mut stream: TcpStream,
    id: u128,
    config: Arc<Config>,
    cache: Arc<ResponseCache>,
) {
    let start_time = Instant::now();

    let (read_half, write_half) = stream.split();
    let mut reader = BufReader::new(read_half);
    let mut writer = write_half;

    // 1. 协议解析阶段：从字节流中读出请求行
    let request = match Request::read_from(&mut reader, id).await {
        Ok(request) => request,
        Err(Exception::EmptyRequest) => {
            // 对端未发请求即断开，多为探测连接，不计入请求结果日志
            debug!(
                "[ID{}]对端未发送请求，连接关闭，耗时{}ms",
                id,
                start_time.elapsed().as_millis()
            );
            return;
        }
        Err(Exception::MalformedRequestLine(line)) => {
            // 结果状态先按500记，响应成功送达后再改写
            let mut status = 500;
            let response = Response::method_not_allowed();
            match writer.write_all(&response.as_bytes()).await {
                Ok(_) => status = response.status_code(),
                Err(e) => error!("[ID{}]发送405响应失败: {}", id, e),
            }
            let _ = writer.flush().await;
            info!(
                "[ID{}] {} -> {}，耗时{}ms",
                id,
                line,
                status,
                start_time.elapsed().as_millis()
            );
            return;
        }
        Err(Exception::Io(e)) => {
            error!("[ID{}]读取HTTP请求失败: {}", id, e);
            info!(
                "[ID{}] - -> 500，耗时{}ms",
                id,
                start_time.elapsed().as_millis()
            );
            return;
        }
    };
    debug!("[ID{}]收到请求：{}", id, request.request_line());

    // 2. 业务处理阶段：任何未能完成响应的错误都按500记录
    let status = match process(&request, &mut writer, &config, &cache, id).await {
        Ok(code) => code,
        Err(e) => {
            error!("[ID{}]处理请求时发生意外错误: {}", id, e);
            500
        }
    };
    let _ = writer.flush().await;

    // 3. 结构化日志记录：便于后期审计与性能监控
    info!(
        "[ID{}] {} -> {}，耗时{}ms",
        id,
        request.request_line(),
        status,
        start_time.elapsed().as_millis()
    );
}

/// 根据请求生成并写出响应，返回响应送达后的状态码。
///
/// 处理顺序：方法检查、缓存查询、按文件解析、退化为目录搜索。
async fn process<W>(
    request: &Request,
    writer: &mut W,
    config: &Config,
    cache: &ResponseCache,
    id: u128,
) -> Result<u16, Exception>
where
    W: AsyncWrite + Unpin,
{
    // 只接受GET方法，其余一律回送405
    if request.method() != METHOD_GET {
        debug!("[ID{}]不支持的请求方法：{}", id, request.method());
        let response = Response::method_not_allowed();
        writer.write_all(&response.as_bytes()).await?;
        return Ok(response.status_code());
    }

    // 缓存以原始请求路径为键，命中时跳过磁盘读取与目录扫描
    if let Some(cached) = cache.lookup(request.raw_path()) {
        debug!("[ID{}]缓存命中：{}", id, request.raw_path());
        writer.write_all(&cached).await?;
        return Ok(200);
    }

    // 解码后的搜索键先按文件解析，不是普通文件时退化为目录搜索
    let response = match resolve_file(config.root_dir(), request.search_key(), id).await? {
        Some((file_name, content)) => Response::from_file(&file_name, content),
        None => {
            let matches =
                search::find_matches(config.root_dir(), request.search_key(), id).await?;
            Response::from_search(search::render_results(&matches))
        }
    };
    debug!(
        "[ID{}]响应构建完成：{} {}",
        id,
        response.status_code(),
        response.information()
    );

    let response_bytes = Bytes::from(response.as_bytes());
    // 先写缓存再发送
    cache.store(request.raw_path(), response_bytes.clone());
    writer.write_all(&response_bytes).await?;
    Ok(response.status_code())
}

/// 将搜索键映射为文件根目录下的物理路径。
fn resolve_path(root: &str, search_key: &str) -> PathBuf {
    Path::new(root).join(search_key)
}

/// 按文件解析搜索键。路径指向普通文件时读出文件名与完整内容，
/// 否则返回 `None`，由调用方转入目录搜索。
async fn resolve_file(
    root: &str,
    search_key: &str,
    id: u128,
) -> Result<Option<(String, Bytes)>, Exception> {
    let path = resolve_path(root, search_key);
    let metadata = match fs::metadata(&path).await {
        Ok(metadata) => metadata,
        // 路径不存在同样走搜索分支，不视为错误
        Err(_) => return Ok(None),
    };
    if !metadata.is_file() {
        return Ok(None);
    }

    let content = fs::read(&path).await?;
    let file_name = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => return Ok(None),
    };
    debug!(
        "[ID{}]读取文件{}，共{}字节",
        id,
        path.display(),
        content.len()
    );
    Ok(Some((file_name, Bytes::from(content))))
}
