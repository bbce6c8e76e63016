//! 外部进程执行
//!
//! 使用 tokio 子进程运行 gluster 命令，等待其退出并收集输出。

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{ExecutorError, Result};

/// 命令运行器
///
/// 每次调用启动并等待恰好一个外部进程。`argv` 不包含程序名。
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// 运行命令，成功时返回标准输出
    async fn run(&self, argv: &[String]) -> Result<Vec<u8>>;
}

/// 基于系统进程的运行器
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: PathBuf,
}

impl ProcessRunner {
    /// 创建运行器
    ///
    /// # Arguments
    /// * `program` - 可执行文件名或路径（如 `gluster`、`/usr/sbin/gluster`）
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, argv: &[String]) -> Result<Vec<u8>> {
        debug!("执行命令: {} {}", self.program.display(), argv.join(" "));

        let mut cmd = Command::new(&self.program);
        cmd.args(argv)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = cmd.spawn().map_err(|e| ExecutorError::Spawn {
            program: self.program.display().to_string(),
            reason: e.to_string(),
        })?;

        // 没有超时：外部工具挂起时调用方一直等待
        let output = child.wait_with_output().await.map_err(|e| ExecutorError::Spawn {
            program: self.program.display().to_string(),
            reason: e.to_string(),
        })?;

        debug!(
            "命令执行完成, 退出码: {:?}, stdout 长度: {}, stderr 长度: {}",
            output.status.code(),
            output.stdout.len(),
            output.stderr.len()
        );

        if !output.status.success() {
            return Err(ExecutorError::CommandFailed(failure_message(
                &output.stdout,
                &output.stderr,
            )));
        }

        if !output.stderr.is_empty() {
            debug!("stderr: {}", String::from_utf8_lossy(&output.stderr).trim());
        }

        Ok(output.stdout)
    }
}

/// 合并 stdout 与 stderr 并去除首尾换行
fn failure_message(stdout: &[u8], stderr: &[u8]) -> String {
    let mut combined = String::from_utf8_lossy(stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(stderr));
    combined.trim_matches('\n').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[test]
    fn test_failure_message_trims_newlines() {
        let msg = failure_message(b"\nvolume start: gv0: failed\n\n", b"");
        assert_eq!(msg, "volume start: gv0: failed");
    }

    #[test]
    fn test_failure_message_keeps_inner_text() {
        let msg = failure_message(b"line one\n", b"  line two  \n");
        assert_eq!(msg, "line one\n  line two  ");
    }

    #[tokio::test]
    async fn test_run_success_returns_stdout() {
        let runner = ProcessRunner::new("sh");
        let out = runner.run(&sh("printf '<cliOutput/>'")).await.unwrap();
        assert_eq!(out, b"<cliOutput/>");
    }

    #[tokio::test]
    async fn test_run_nonzero_exit_is_command_failed() {
        let runner = ProcessRunner::new("sh");
        let err = runner
            .run(&sh("printf 'volume delete: gv0: failed: Volume gv0 does not exist\\n'; exit 1"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ExecutorError::CommandFailed(
                "volume delete: gv0: failed: Volume gv0 does not exist".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_run_failure_includes_stderr() {
        let runner = ProcessRunner::new("sh");
        let err = runner
            .run(&sh("echo 'Connection failed.' 1>&2; exit 2"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Connection failed.");
    }

    #[tokio::test]
    async fn test_run_missing_program() {
        let runner = ProcessRunner::new("/nonexistent/gluster-binary");
        let err = runner.run(&[]).await.unwrap_err();
        assert!(matches!(err, ExecutorError::Spawn { .. }));
    }
}
