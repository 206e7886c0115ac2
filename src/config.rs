use num_cpus;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use log::{error, warn};
use std::fs::File;
use std::io::prelude::*;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_root_dir")]
    root_dir: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default)]
    worker_threads: usize,
    #[serde(default)]
    local: bool,
    #[serde(default = "default_dispatch")]
    dispatch: String,
    #[serde(default)]
    pool_size: usize,
}

fn default_root_dir() -> String {
    "Root".to_string()
}

fn default_port() -> u16 {
    5050
}

fn default_dispatch() -> String {
    "task".to_string()
}

impl Config {
    pub fn new() -> Self {
        Self {
            root_dir: default_root_dir(),
            port: default_port(),
            worker_threads: 0,
            local: false,
            dispatch: default_dispatch(),
            pool_size: 0,
        }
    }

    pub fn from_toml(filename: &str) -> Self {
        let mut file = match File::open(filename) {
            Ok(f) => f,
            Err(e) => {
                warn!("无法打开配置文件{}：{}，使用默认配置", filename, e);
                return Config::new().normalized();
            }
        };
        let mut str_val = String::new();
        if let Err(e) = file.read_to_string(&mut str_val) {
            warn!("无法读取配置文件{}：{}，使用默认配置", filename, e);
            return Config::new().normalized();
        }

        let raw_config = match toml::from_str(&str_val) {
            Ok(t) => t,
            Err(_) => {
                error!("无法成功从配置文件构建配置对象，使用默认配置");
                Config::new()
            }
        };
        raw_config.normalized()
    }

    // 0表示按CPU核心数分配
    fn normalized(mut self) -> Self {
        if self.worker_threads == 0 {
            self.worker_threads = num_cpus::get();
        }
        if self.pool_size == 0 {
            self.pool_size = num_cpus::get();
        }
        self
    }
}

impl Config {
    pub fn root_dir(&self) -> &str {
        &self.root_dir
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn worker_threads(&self) -> usize {
        self.worker_threads
    }

    pub fn local(&self) -> bool {
        self.local
    }

    pub fn dispatch(&self) -> &str {
        &self.dispatch
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }
}
