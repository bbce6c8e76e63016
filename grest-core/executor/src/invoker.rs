//! gluster 命令调用入口

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::runner::CommandRunner;

/// 非交互执行标志
pub const SCRIPT_MODE_FLAG: &str = "--mode=script";

/// 结构化（XML）输出标志
pub const XML_FLAG: &str = "--xml";

/// gluster 命令行调用器
///
/// 可廉价克隆，多个请求任务共享同一个运行器。
#[derive(Clone)]
pub struct GlusterCli {
    runner: Arc<dyn CommandRunner>,
}

impl GlusterCli {
    /// 使用指定运行器创建调用器
    pub fn new(runner: impl CommandRunner + 'static) -> Self {
        Self {
            runner: Arc::new(runner),
        }
    }

    /// 执行命令（非交互模式）
    pub async fn invoke(&self, args: &[&str]) -> Result<Vec<u8>> {
        self.run_with_prefix(&[SCRIPT_MODE_FLAG], args).await
    }

    /// 执行命令并请求 XML 输出
    pub async fn invoke_structured(&self, args: &[&str]) -> Result<Vec<u8>> {
        self.run_with_prefix(&[SCRIPT_MODE_FLAG, XML_FLAG], args).await
    }

    async fn run_with_prefix(&self, prefix: &[&str], args: &[&str]) -> Result<Vec<u8>> {
        let argv: Vec<String> = prefix
            .iter()
            .chain(args.iter())
            .map(|s| s.to_string())
            .collect();
        debug!("gluster {}", argv.join(" "));
        self.runner.run(&argv).await
    }
}

impl std::fmt::Debug for GlusterCli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlusterCli").finish_non_exhaustive()
    }
}
