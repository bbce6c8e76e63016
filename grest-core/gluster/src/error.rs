//! Gluster 错误定义

use grest_executor::ExecutorError;
use thiserror::Error;

/// Gluster 操作结果类型
pub type Result<T> = std::result::Result<T, GlusterError>;

/// Gluster 错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GlusterError {
    /// gluster 命令以非零状态退出，内容为工具原始输出
    #[error("{0}")]
    CommandFailed(String),

    /// XML 输出与预期结构不符
    #[error("解析 gluster 输出失败: {0}")]
    DecodeError(String),

    /// 无法启动 gluster 进程
    #[error("{0}")]
    Spawn(String),
}

impl From<ExecutorError> for GlusterError {
    fn from(err: ExecutorError) -> Self {
        match err {
            ExecutorError::CommandFailed(msg) => GlusterError::CommandFailed(msg),
            spawn @ ExecutorError::Spawn { .. } => GlusterError::Spawn(spawn.to_string()),
        }
    }
}

impl From<quick_xml::de::DeError> for GlusterError {
    fn from(err: quick_xml::de::DeError) -> Self {
        GlusterError::DecodeError(err.to_string())
    }
}
