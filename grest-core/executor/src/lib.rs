//! GlusterREST 命令执行器
//!
//! 负责调用外部 gluster 管理工具：
//! - 始终以非交互模式（`--mode=script`）运行
//! - 查询类命令追加 `--xml` 获取结构化输出
//! - 命令失败时原样返回工具输出的诊断信息
//!
//! # 示例
//!
//! ```ignore
//! use grest_executor::{GlusterCli, ProcessRunner};
//!
//! let cli = GlusterCli::new(ProcessRunner::new("gluster"));
//! let xml = cli.invoke_structured(&["pool", "list"]).await?;
//! cli.invoke(&["volume", "start", "gv0"]).await?;
//! ```

mod error;
mod invoker;
mod runner;

pub use error::{ExecutorError, Result};
pub use invoker::{GlusterCli, SCRIPT_MODE_FLAG, XML_FLAG};
pub use runner::{CommandRunner, ProcessRunner};
