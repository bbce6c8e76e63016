//! 卷生命周期与节点管理命令
//!
//! 参数构造为纯函数，执行失败时原样返回 gluster 的诊断输出。

use tracing::{info, warn};

use crate::client::GlusterClient;
use crate::error::Result;
use crate::models::CreateOptions;

/// 构造 `volume create` 参数
///
/// ```text
/// volume create <NEW-VOLNAME> [stripe <COUNT>] [replica <COUNT> [arbiter <COUNT>]]
/// [disperse [<COUNT>]] [disperse-data <COUNT>] [redundancy <COUNT>]
/// [transport <tcp|rdma|tcp,rdma>] <NEW-BRICK>... [force]
/// ```
///
/// 计数为 0 时不出现，`force` 至多出现一次。
pub fn create_volume_args(volume: &str, options: &CreateOptions) -> Vec<String> {
    let mut args = vec!["volume".to_string(), "create".to_string(), volume.to_string()];

    let counts = [
        ("replica", options.replica_count),
        ("stripe", options.stripe_count),
        ("arbiter", options.arbiter_count),
        ("disperse", options.disperse_count),
        ("disperse-data", options.disperse_data_count),
        ("redundancy", options.redundancy_count),
    ];
    for (flag, count) in counts {
        if count != 0 {
            args.push(flag.to_string());
            args.push(count.to_string());
        }
    }

    if !options.transport.is_empty() {
        args.push("transport".to_string());
        args.push(options.transport.clone());
    }

    args.extend(options.bricks.iter().cloned());

    if options.needs_force() {
        args.push("force".to_string());
    }

    args
}

/// 构造 `volume start|stop` 参数
pub fn lifecycle_args(action: &str, volume: &str, force: bool) -> Vec<String> {
    let mut args = vec!["volume".to_string(), action.to_string(), volume.to_string()];
    if force {
        args.push("force".to_string());
    }
    args
}

/// 构造 `volume reset` 参数，`key` 为空时重置全部选项
pub fn option_reset_args(volume: &str, key: Option<&str>, force: bool) -> Vec<String> {
    let mut args = vec!["volume".to_string(), "reset".to_string(), volume.to_string()];
    if let Some(key) = key.filter(|k| !k.is_empty()) {
        args.push(key.to_string());
    }
    if force {
        args.push("force".to_string());
    }
    args
}

/// 构造 `volume delete` 参数
pub fn delete_args(volume: &str) -> Vec<String> {
    vec!["volume".to_string(), "delete".to_string(), volume.to_string()]
}

/// 构造 `volume set <vol> <key> <value>` 参数
pub fn option_set_args(volume: &str, key: &str, value: &str) -> Vec<String> {
    vec![
        "volume".to_string(),
        "set".to_string(),
        volume.to_string(),
        key.to_string(),
        value.to_string(),
    ]
}

/// 构造 `volume barrier <vol> enable|disable` 参数
pub fn barrier_args(volume: &str, enable: bool) -> Vec<String> {
    let action = if enable { "enable" } else { "disable" };
    vec![
        "volume".to_string(),
        "barrier".to_string(),
        volume.to_string(),
        action.to_string(),
    ]
}

/// 构造 `peer probe|detach <host>` 参数
pub fn peer_args(action: &str, host: &str) -> Vec<String> {
    vec!["peer".to_string(), action.to_string(), host.to_string()]
}

/// 构造 `volume log <vol> rotate [brick]` 参数
pub fn log_rotate_args(volume: &str, brick: Option<&str>) -> Vec<String> {
    let mut args = vec![
        "volume".to_string(),
        "log".to_string(),
        volume.to_string(),
        "rotate".to_string(),
    ];
    if let Some(brick) = brick.filter(|b| !b.is_empty()) {
        args.push(brick.to_string());
    }
    args
}

impl GlusterClient {
    async fn run_admin(&self, args: Vec<String>) -> Result<()> {
        let refs: Vec<&str> = args.iter().map(String::as_str).collect();
        self.cli.invoke(&refs).await?;
        Ok(())
    }

    /// 创建卷
    pub async fn volume_create(&self, volume: &str, options: &CreateOptions) -> Result<()> {
        info!("创建卷 {} ({} 个 brick)", volume, options.bricks.len());
        self.run_admin(create_volume_args(volume, options)).await
    }

    /// 启动卷
    pub async fn volume_start(&self, volume: &str, force: bool) -> Result<()> {
        info!("启动卷 {}", volume);
        self.run_admin(lifecycle_args("start", volume, force)).await
    }

    /// 停止卷
    pub async fn volume_stop(&self, volume: &str, force: bool) -> Result<()> {
        info!("停止卷 {}", volume);
        self.run_admin(lifecycle_args("stop", volume, force)).await
    }

    /// 重启卷：先停止再启动，停止失败时不再启动
    pub async fn volume_restart(&self, volume: &str, force: bool) -> Result<()> {
        if let Err(e) = self.volume_stop(volume, force).await {
            warn!("重启卷 {} 时停止失败: {}", volume, e);
            return Err(e);
        }
        self.volume_start(volume, force).await
    }

    /// 删除卷
    pub async fn volume_delete(&self, volume: &str) -> Result<()> {
        info!("删除卷 {}", volume);
        self.run_admin(delete_args(volume)).await
    }

    /// 设置卷选项
    pub async fn volume_option_set(&self, volume: &str, key: &str, value: &str) -> Result<()> {
        info!("设置卷 {} 选项 {}={}", volume, key, value);
        self.run_admin(option_set_args(volume, key, value)).await
    }

    /// 重置卷选项
    ///
    /// # Arguments
    /// * `key` - 选项名，为 `None` 时重置全部
    pub async fn volume_option_reset(&self, volume: &str, key: Option<&str>, force: bool) -> Result<()> {
        info!("重置卷 {} 选项 {}", volume, key.unwrap_or("(全部)"));
        self.run_admin(option_reset_args(volume, key, force)).await
    }

    /// 触发日志轮转
    pub async fn volume_log_rotate(&self, volume: &str, brick: Option<&str>) -> Result<()> {
        self.run_admin(log_rotate_args(volume, brick)).await
    }

    /// 启用 IO barrier
    pub async fn volume_barrier_enable(&self, volume: &str) -> Result<()> {
        self.run_admin(barrier_args(volume, true)).await
    }

    /// 禁用 IO barrier
    pub async fn volume_barrier_disable(&self, volume: &str) -> Result<()> {
        self.run_admin(barrier_args(volume, false)).await
    }

    /// 添加节点到集群
    pub async fn peer_probe(&self, host: &str) -> Result<()> {
        info!("添加节点 {}", host);
        self.run_admin(peer_args("probe", host)).await
    }

    /// 从集群移除节点
    pub async fn peer_detach(&self, host: &str) -> Result<()> {
        info!("移除节点 {}", host);
        self.run_admin(peer_args("detach", host)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_args_omit_zero_counts() {
        let opts = CreateOptions::with_bricks(["n1:/data/b1", "n2:/data/b2"]);
        let args = create_volume_args("gv0", &opts);

        assert_eq!(args, vec!["volume", "create", "gv0", "n1:/data/b1", "n2:/data/b2"]);
        assert!(!args.iter().any(|a| a == "replica" || a == "stripe"));
    }

    #[test]
    fn test_create_args_all_counts() {
        let opts = CreateOptions {
            bricks: vec!["n1:/b".to_string(), "n2:/b".to_string(), "n3:/b".to_string()],
            replica_count: 3,
            stripe_count: 2,
            arbiter_count: 1,
            disperse_count: 6,
            disperse_data_count: 4,
            redundancy_count: 2,
            transport: "tcp,rdma".to_string(),
            ..Default::default()
        };
        let args = create_volume_args("gv1", &opts);

        assert_eq!(
            args,
            vec![
                "volume", "create", "gv1", "replica", "3", "stripe", "2", "arbiter", "1",
                "disperse", "6", "disperse-data", "4", "redundancy", "2", "transport",
                "tcp,rdma", "n1:/b", "n2:/b", "n3:/b",
            ]
        );
    }

    #[test]
    fn test_create_args_single_force() {
        let mut opts = CreateOptions::with_bricks(["n1:/b1"]);
        opts.allow_root_dir = true;
        opts.reuse_bricks = true;
        let args = create_volume_args("gv0", &opts);

        assert_eq!(args.last().map(String::as_str), Some("force"));
        assert_eq!(args.iter().filter(|a| *a == "force").count(), 1);

        opts.allow_root_dir = false;
        assert_eq!(create_volume_args("gv0", &opts).last().map(String::as_str), Some("force"));

        opts.reuse_bricks = false;
        assert!(!create_volume_args("gv0", &opts).contains(&"force".to_string()));
    }

    #[test]
    fn test_lifecycle_args() {
        assert_eq!(lifecycle_args("start", "gv0", false), vec!["volume", "start", "gv0"]);
        assert_eq!(lifecycle_args("stop", "gv0", true), vec!["volume", "stop", "gv0", "force"]);
    }

    #[test]
    fn test_option_reset_args() {
        assert_eq!(option_reset_args("gv0", None, false), vec!["volume", "reset", "gv0"]);
        assert_eq!(option_reset_args("gv0", Some(""), false), vec!["volume", "reset", "gv0"]);
        assert_eq!(
            option_reset_args("gv0", Some("nfs.disable"), true),
            vec!["volume", "reset", "gv0", "nfs.disable", "force"]
        );
    }

    #[test]
    fn test_log_rotate_args() {
        assert_eq!(log_rotate_args("gv0", None), vec!["volume", "log", "gv0", "rotate"]);
        assert_eq!(
            log_rotate_args("gv0", Some("n1:/b1")),
            vec!["volume", "log", "gv0", "rotate", "n1:/b1"]
        );
    }

    #[test]
    fn test_simple_admin_args() {
        assert_eq!(delete_args("gv0"), vec!["volume", "delete", "gv0"]);
        assert_eq!(
            option_set_args("gv0", "nfs.disable", "on"),
            vec!["volume", "set", "gv0", "nfs.disable", "on"]
        );
        assert_eq!(barrier_args("gv0", true), vec!["volume", "barrier", "gv0", "enable"]);
        assert_eq!(barrier_args("gv0", false), vec!["volume", "barrier", "gv0", "disable"]);
        assert_eq!(peer_args("probe", "node3"), vec!["peer", "probe", "node3"]);
        assert_eq!(peer_args("detach", "node3"), vec!["peer", "detach", "node3"]);
    }
}
