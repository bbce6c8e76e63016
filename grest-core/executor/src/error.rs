//! 执行器错误定义

use thiserror::Error;

/// 执行器操作结果类型
pub type Result<T> = std::result::Result<T, ExecutorError>;

/// 执行器错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    /// 命令以非零状态退出，内容为工具的合并输出（已去除首尾换行）
    #[error("{0}")]
    CommandFailed(String),

    /// 无法启动外部进程
    #[error("无法启动 {program}: {reason}")]
    Spawn {
        /// 程序路径
        program: String,
        /// 失败原因
        reason: String,
    },
}
