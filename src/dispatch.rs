//! # 连接分发模块
//!
//! 接收循环拿到连接后并不亲自处理，而是移交给分发器。两种策略可通过
//! 配置互换：`task` 为每个连接派生独立任务，`pool` 用固定数量的工作者
//! 从共享队列领取任务。两者对外的协议行为完全一致。

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use log::{debug, error, warn};
use tokio::sync::mpsc;
use tokio::sync::Mutex;

use crate::config::Config;

/// 工作者池中流转的任务单元：一个完整的连接处理过程
type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// 连接分发器。
///
/// `dispatch` 把连接处理工作移交给具体策略后立即返回，
/// 接收循环因此永远不会被某个连接的处理过程阻塞。
pub enum Dispatcher {
    /// 每个连接派生一个独立的 Tokio 任务
    TaskPerConnection,
    /// 固定数量的工作者任务共享一个无界队列
    WorkerPool { sender: mpsc::UnboundedSender<Job> },
}

impl Dispatcher {
    /// 根据配置构造分发器。无法识别的策略名回退为任务分发。
    pub fn from_config(config: &Config) -> Self {
        match config.dispatch() {
            "task" => Self::TaskPerConnection,
            "pool" => Self::worker_pool(config.pool_size()),
            other => {
                warn!("无法识别的分发策略：{}，回退为task策略", other);
                Self::TaskPerConnection
            }
        }
    }

    /// 启动含 `size` 个工作者任务的池分发器。
    ///
    /// 工作者领取任务时短暂锁住接收端，拿到任务后立即放锁再执行，
    /// 执行中的任务不会阻塞其他工作者领取。
    pub fn worker_pool(size: usize) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));

        for worker_id in 0..size {
            let receiver = Arc::clone(&receiver);
            tokio::spawn(async move {
                debug!("工作者{}已启动", worker_id);
                loop {
                    // 锁的生命周期只覆盖recv，语句结束即释放
                    let job = receiver.lock().await.recv().await;
                    match job {
                        Some(job) => job.await,
                        None => {
                            debug!("任务队列已关闭，工作者{}退出", worker_id);
                            break;
                        }
                    }
                }
            });
        }

        Self::WorkerPool { sender }
    }

    /// 移交一个连接处理单元，立即返回。
    pub fn dispatch<F>(&self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match self {
            Self::TaskPerConnection => {
                tokio::spawn(work);
            }
            Self::WorkerPool { sender } => {
                if sender.send(Box::pin(work)).is_err() {
                    error!("工作者池的任务队列已关闭，该连接被丢弃");
                }
            }
        }
    }
}
