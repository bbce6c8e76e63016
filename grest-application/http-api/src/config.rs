//! 服务配置
//!
//! 加载顺序（后者覆盖前者）：内置默认值、默认配置文件、自定义配置文件、
//! `GLUSTERREST_` 前缀的环境变量。文件格式按扩展名识别（json/toml）。

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_FILE: &str = "/etc/glusterrest/glusterrest.json";

/// 环境变量前缀
pub const ENV_PREFIX: &str = "GLUSTERREST";

/// 服务配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RestConfig {
    /// 监听地址
    pub listen_addr: String,
    /// 监听端口
    pub port: u16,
    /// gluster 可执行文件
    pub gluster_bin: String,
    /// 日志级别
    pub log_level: String,
}

impl RestConfig {
    /// 加载配置
    ///
    /// # Arguments
    /// * `default_file` - 默认配置文件，必须存在
    /// * `custom_file` - 自定义配置文件，可不存在
    pub fn load(default_file: &Path, custom_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("listen_addr", "0.0.0.0")?
            .set_default("port", 8080_i64)?
            .set_default("gluster_bin", "gluster")?
            .set_default("log_level", "info")?
            .add_source(File::from(default_file));

        if let Some(path) = custom_file {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| format!("加载配置失败: {}", default_file.display()))?
            .try_deserialize()
            .context("配置格式错误")
    }

    /// 监听的套接字地址
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.listen_addr, self.port);
        addr.parse()
            .with_context(|| format!("无效的监听地址: {}", addr))
    }
}
