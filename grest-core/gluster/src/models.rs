//! Gluster 数据模型

use serde::{Deserialize, Serialize};

/// 无法获取运行时信息时使用的占位值
pub const NOT_AVAILABLE: &str = "N/A";

/// 集群节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    /// 集群分配的节点 UUID
    pub id: String,
    /// 主机名
    pub hostname: String,
    /// 是否已连接
    pub connected: bool,
}

impl Peer {
    /// 创建节点信息
    pub fn new(id: impl Into<String>, hostname: impl Into<String>, connected: bool) -> Self {
        Self {
            id: id.into(),
            hostname: hostname.into(),
            connected,
        }
    }

    /// 是否为本机节点（gluster 用 `localhost` 标识本机）
    pub fn is_local(&self) -> bool {
        self.hostname == "localhost"
    }
}

/// 卷选项
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeOption {
    pub name: String,
    pub value: String,
}

impl VolumeOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Brick 传输端口
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ports {
    pub tcp: String,
    pub rdma: String,
}

impl Ports {
    /// 两个端口均未知
    pub fn unknown() -> Self {
        Self {
            tcp: NOT_AVAILABLE.to_string(),
            rdma: NOT_AVAILABLE.to_string(),
        }
    }
}

/// `volume status detail` 中的单个 brick 节点记录
///
/// 只有可达主机上的 brick 才会出现在状态输出中。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrickNode {
    pub hostname: String,
    pub path: String,
    /// 所属节点 UUID
    pub peer_id: String,
    /// 数值状态码，0 表示离线
    pub status: i32,
    pub ports: Ports,
    pub pid: String,
    pub size_total: String,
    pub size_free: String,
    pub device: String,
    pub block_size: String,
    pub mnt_options: String,
    pub fs_name: String,
}

impl BrickNode {
    /// 获取 brick 标识（host:path 格式）
    pub fn key(&self) -> String {
        brick_key(&self.hostname, &self.path)
    }
}

/// Brick 信息
///
/// 合并后的 brick 记录：标识与配置来自 `volume info`，运行时信息来自
/// `volume status detail`，主机不可达时运行时字段为 [`NOT_AVAILABLE`]。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brick {
    /// brick 标识（host:path）
    pub name: String,
    /// 所属节点 UUID
    #[serde(default)]
    pub host_id: String,
    pub hostname: String,
    pub path: String,
    #[serde(default)]
    pub online: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<Ports>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pid: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub size_total: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub size_free: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub device: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub block_size: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mnt_options: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fs_name: String,
}

impl Brick {
    /// 创建仅包含标识信息的 brick
    pub fn new(hostname: impl Into<String>, path: impl Into<String>) -> Self {
        let hostname = hostname.into();
        let path = path.into();
        Self {
            name: brick_key(&hostname, &path),
            hostname,
            path,
            ..Default::default()
        }
    }

    /// 获取 brick 标识（host:path 格式）
    ///
    /// 主机名或路径缺失时退回到 `name`。
    pub fn key(&self) -> String {
        if self.hostname.is_empty() || self.path.is_empty() {
            self.name.clone()
        } else {
            brick_key(&self.hostname, &self.path)
        }
    }

    /// 将主机视为不可达：离线，全部运行时字段置为占位值
    pub fn mark_unreachable(&mut self) {
        self.online = false;
        self.ports = Some(Ports::unknown());
        self.pid = NOT_AVAILABLE.to_string();
        self.size_total = NOT_AVAILABLE.to_string();
        self.size_free = NOT_AVAILABLE.to_string();
        self.device = NOT_AVAILABLE.to_string();
        self.block_size = NOT_AVAILABLE.to_string();
        self.mnt_options = NOT_AVAILABLE.to_string();
        self.fs_name = NOT_AVAILABLE.to_string();
    }
}

impl From<BrickNode> for Brick {
    fn from(node: BrickNode) -> Self {
        Self {
            name: node.key(),
            online: node.status != 0,
            host_id: node.peer_id,
            hostname: node.hostname,
            path: node.path,
            ports: Some(node.ports),
            pid: node.pid,
            size_total: node.size_total,
            size_free: node.size_free,
            device: node.device,
            block_size: node.block_size,
            mnt_options: node.mnt_options,
            fs_name: node.fs_name,
        }
    }
}

/// Gluster 卷信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    pub name: String,
    pub id: String,
    /// 状态（Started/Stopped/Created）
    pub status: String,
    /// 卷类型（Replicate/Distribute/Disperse 等）
    #[serde(rename = "type")]
    pub volume_type: String,
    pub bricks: Vec<Brick>,
    pub num_bricks: u32,
    pub dist_count: u32,
    pub replica_count: u32,
    pub stripe_count: u32,
    pub arbiter_count: u32,
    pub disperse_count: u32,
    pub redundancy_count: u32,
    pub transport: String,
    pub options: Vec<VolumeOption>,
}

/// 创建卷参数
///
/// JSON 字段名与 REST 接口保持一致。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOptions {
    /// brick 列表（host:path），顺序即 gluster 的放置顺序
    #[serde(default)]
    pub bricks: Vec<String>,
    #[serde(default, rename = "replica")]
    pub replica_count: u32,
    #[serde(default, rename = "stripe")]
    pub stripe_count: u32,
    #[serde(default, rename = "arbiter")]
    pub arbiter_count: u32,
    #[serde(default, rename = "disperse")]
    pub disperse_count: u32,
    #[serde(default, rename = "disperse-data")]
    pub disperse_data_count: u32,
    #[serde(default, rename = "disperse-redundancy")]
    pub redundancy_count: u32,
    /// tcp / rdma / tcp,rdma
    #[serde(default)]
    pub transport: String,
    /// 允许在挂载点根目录创建 brick
    #[serde(default)]
    pub allow_root_dir: bool,
    /// 复用已有数据的 brick
    #[serde(default)]
    pub reuse_bricks: bool,
}

impl CreateOptions {
    /// 使用 brick 列表创建参数
    pub fn with_bricks<I, S>(bricks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            bricks: bricks.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// gluster 只有一个 `force` 标志，两种意图都映射到它
    pub fn needs_force(&self) -> bool {
        self.allow_root_dir || self.reuse_bricks
    }
}

/// 组合 brick 标识
pub fn brick_key(hostname: &str, path: &str) -> String {
    format!("{}:{}", hostname, path)
}
