//! Gluster 客户端

use grest_executor::{CommandRunner, GlusterCli};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{Peer, Volume, VolumeOption};
use crate::parser::{parse_peers, parse_volume_info, parse_volume_list, parse_volume_status};
use crate::reconcile::reconcile;

/// Gluster 客户端
///
/// 通过本机 gluster 命令行执行查询与管理命令。可廉价克隆。
#[derive(Debug, Clone)]
pub struct GlusterClient {
    pub(crate) cli: GlusterCli,
}

impl GlusterClient {
    /// 使用已有调用器创建客户端
    pub fn new(cli: GlusterCli) -> Self {
        Self { cli }
    }

    /// 使用指定运行器创建客户端
    pub fn with_runner(runner: impl CommandRunner + 'static) -> Self {
        Self::new(GlusterCli::new(runner))
    }

    /// 获取集群节点列表
    ///
    /// 执行 `gluster pool list`，结果包含本机（主机名为 `localhost`）
    pub async fn peer_list(&self) -> Result<Vec<Peer>> {
        debug!("获取集群节点列表");
        let output = self.cli.invoke_structured(&["pool", "list"]).await?;
        parse_peers(&output)
    }

    /// 获取卷名列表
    ///
    /// 执行 `gluster volume list` 命令
    pub async fn volume_list(&self) -> Result<Vec<String>> {
        let output = self.cli.invoke_structured(&["volume", "list"]).await?;
        let names = parse_volume_list(&output)?;
        info!("找到 {} 个卷", names.len());
        Ok(names)
    }

    /// 获取卷配置信息（不含运行时状态）
    ///
    /// # Arguments
    /// * `volume` - 卷名，为 `None` 时查询全部卷
    pub async fn volume_info(&self, volume: Option<&str>) -> Result<Vec<Volume>> {
        let mut args = vec!["volume", "info"];
        if let Some(name) = volume {
            args.push(name);
        }
        let output = self.cli.invoke_structured(&args).await?;
        parse_volume_info(&output)
    }

    /// 获取卷状态：合并 `volume status detail` 与 `volume info`
    ///
    /// 两个查询依次执行，任一失败则整体失败，不返回部分结果。
    /// 状态查询失败时不会再执行 info 查询。
    ///
    /// # Arguments
    /// * `volume` - 卷名，为 `None` 时查询全部卷
    pub async fn volume_status(&self, volume: Option<&str>) -> Result<Vec<Volume>> {
        let target = volume.unwrap_or("all");
        info!("查询卷状态: {}", target);

        let output = self
            .cli
            .invoke_structured(&["volume", "status", target, "detail"])
            .await?;
        let nodes = parse_volume_status(&output)?;

        let volumes = self.volume_info(volume).await?;

        Ok(reconcile(nodes, volumes))
    }

    /// 获取卷的已配置选项
    ///
    /// 取 `volume info <vol>` 中的 options，未返回卷时为空列表
    pub async fn volume_options(&self, volume: &str) -> Result<Vec<VolumeOption>> {
        let volumes = self.volume_info(Some(volume)).await?;
        Ok(volumes
            .into_iter()
            .next()
            .map(|v| v.options)
            .unwrap_or_default())
    }
}
