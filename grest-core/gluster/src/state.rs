//! 进程级集群状态
//!
//! 保存最近一次成功加载的节点列表和本机节点 UUID。读多写少：请求处理
//! 任务读取快照，唯一的写者是后台重载任务，每次整体替换快照。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{mpsc, watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::client::GlusterClient;
use crate::error::Result;
use crate::models::Peer;

/// 节点列表快照
#[derive(Debug, Clone, Serialize)]
pub struct PeerSnapshot {
    pub peers: Vec<Peer>,
    /// 本机节点 UUID（节点列表中主机名为 `localhost` 的条目）
    pub local_id: Option<String>,
    /// 每次成功刷新加一，初次加载为 1
    pub version: u64,
    pub loaded_at: DateTime<Utc>,
}

impl PeerSnapshot {
    fn new(peers: Vec<Peer>, version: u64) -> Self {
        let local_id = peers.iter().find(|p| p.is_local()).map(|p| p.id.clone());
        Self {
            peers,
            local_id,
            version,
            loaded_at: Utc::now(),
        }
    }
}

/// 进程级集群状态
pub struct ClusterState {
    client: GlusterClient,
    current: RwLock<Arc<PeerSnapshot>>,
}

impl ClusterState {
    /// 首次加载节点列表
    ///
    /// 失败时返回错误，由调用方决定是否退出进程。
    pub async fn load(client: GlusterClient) -> Result<Self> {
        let peers = client.peer_list().await?;
        let snapshot = PeerSnapshot::new(peers, 1);
        info!(
            "已加载 {} 个集群节点, 本机: {}",
            snapshot.peers.len(),
            snapshot.local_id.as_deref().unwrap_or("未知")
        );
        Ok(Self {
            client,
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// 获取当前快照
    pub async fn snapshot(&self) -> Arc<PeerSnapshot> {
        self.current.read().await.clone()
    }

    /// 获取本机节点 UUID
    pub async fn local_id(&self) -> Option<String> {
        self.snapshot().await.local_id.clone()
    }

    /// 获取客户端
    pub fn client(&self) -> &GlusterClient {
        &self.client
    }

    /// 重新加载节点列表
    ///
    /// 失败时保留原快照并返回错误。
    pub async fn refresh(&self) -> Result<Arc<PeerSnapshot>> {
        let peers = self.client.peer_list().await?;

        let mut current = self.current.write().await;
        let snapshot = Arc::new(PeerSnapshot::new(peers, current.version + 1));
        *current = snapshot.clone();

        debug!("节点列表已更新到版本 {}", snapshot.version);
        Ok(snapshot)
    }

    /// 启动后台重载任务
    ///
    /// 每收到一次重载请求刷新一次；刷新失败只记录日志。收到停止信号或
    /// 请求通道关闭时退出。
    pub fn spawn_reload_listener(
        self: Arc<Self>,
        mut reload_rx: mpsc::Receiver<()>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    request = reload_rx.recv() => {
                        if request.is_none() {
                            debug!("重载通道已关闭");
                            break;
                        }
                        match self.refresh().await {
                            Ok(snapshot) => info!(
                                "已重新加载节点列表: {} 个节点 (版本 {})",
                                snapshot.peers.len(),
                                snapshot.version
                            ),
                            Err(e) => warn!("重新加载节点列表失败, 保留原列表: {}", e),
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            debug!("重载任务停止");
                            break;
                        }
                    }
                }
            }
        })
    }
}

impl std::fmt::Debug for ClusterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterState").finish_non_exhaustive()
    }
}
