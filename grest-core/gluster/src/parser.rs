//! gluster `--xml` 输出解析
//!
//! 只做结构映射，不赋予业务含义。缺失的元素保留类型默认值，
//! 由调用方（拓扑合并）决定如何解释。
//!
//! # 输出格式示例
//!
//! ```text
//! <cliOutput>
//!   <opRet>0</opRet>
//!   <volStatus><volumes><volume>
//!     <volName>gv0</volName>
//!     <node>
//!       <hostname>node1</hostname>
//!       <path>/data/brick1</path>
//!       <peerid>8f1f...</peerid>
//!       <status>1</status>
//!       <ports><tcp>49152</tcp><rdma>N/A</rdma></ports>
//!       <pid>2710</pid>
//!       ...
//!     </node>
//!   </volume></volumes></volStatus>
//! </cliOutput>
//! ```

use serde::Deserialize;
use tracing::debug;

use crate::error::{GlusterError, Result};
use crate::models::{Brick, BrickNode, Peer, Ports, Volume, VolumeOption};

/// 解码后的记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliRecords {
    Peers(Vec<Peer>),
    Volumes(Vec<Volume>),
    BrickNodes(Vec<BrickNode>),
    VolumeNames(Vec<String>),
    /// 不支持的查询结构
    Empty,
}

/// 按输出中出现的段落解码
pub fn decode(output: &[u8]) -> Result<CliRecords> {
    let root = parse_root(output)?;

    let records = if let Some(status) = root.vol_status {
        CliRecords::BrickNodes(status.into_nodes())
    } else if let Some(info) = root.vol_info {
        CliRecords::Volumes(info.into_volumes())
    } else if let Some(peers) = root.peer_status {
        CliRecords::Peers(peers.into_peers())
    } else if let Some(list) = root.vol_list {
        CliRecords::VolumeNames(list.names)
    } else {
        CliRecords::Empty
    };

    Ok(records)
}

/// 解析 `pool list` 输出
pub fn parse_peers(output: &[u8]) -> Result<Vec<Peer>> {
    let root = parse_root(output)?;
    let peers = root.peer_status.map(PeerStatusXml::into_peers).unwrap_or_default();
    debug!("解析到 {} 个节点", peers.len());
    Ok(peers)
}

/// 解析 `volume info` 输出
pub fn parse_volume_info(output: &[u8]) -> Result<Vec<Volume>> {
    let root = parse_root(output)?;
    let volumes = root.vol_info.map(VolInfoXml::into_volumes).unwrap_or_default();
    debug!("解析到 {} 个卷", volumes.len());
    Ok(volumes)
}

/// 解析 `volume status <vol|all> detail` 输出
///
/// 所有卷的 brick 节点被展开为一个列表。
pub fn parse_volume_status(output: &[u8]) -> Result<Vec<BrickNode>> {
    let root = parse_root(output)?;
    let nodes = root.vol_status.map(VolStatusXml::into_nodes).unwrap_or_default();
    debug!("解析到 {} 个 brick 状态记录", nodes.len());
    Ok(nodes)
}

/// 解析 `volume list` 输出
pub fn parse_volume_list(output: &[u8]) -> Result<Vec<String>> {
    let root = parse_root(output)?;
    Ok(root.vol_list.map(|l| l.names).unwrap_or_default())
}

fn parse_root(output: &[u8]) -> Result<CliOutputXml> {
    let text = std::str::from_utf8(output)
        .map_err(|e| GlusterError::DecodeError(format!("输出不是有效的 UTF-8: {}", e)))?;
    Ok(quick_xml::de::from_str(text)?)
}

#[derive(Debug, Deserialize)]
struct CliOutputXml {
    #[serde(rename = "peerStatus")]
    peer_status: Option<PeerStatusXml>,
    #[serde(rename = "volInfo")]
    vol_info: Option<VolInfoXml>,
    #[serde(rename = "volStatus")]
    vol_status: Option<VolStatusXml>,
    #[serde(rename = "volList")]
    vol_list: Option<VolListXml>,
}

#[derive(Debug, Default, Deserialize)]
struct PeerStatusXml {
    #[serde(rename = "peer", default)]
    peers: Vec<PeerXml>,
}

impl PeerStatusXml {
    fn into_peers(self) -> Vec<Peer> {
        self.peers
            .into_iter()
            .map(|p| Peer {
                id: p.uuid,
                hostname: p.hostname,
                connected: p.connected != 0,
            })
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PeerXml {
    uuid: String,
    hostname: String,
    connected: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VolInfoXml {
    volumes: VolumeListXml<VolumeXml>,
}

impl VolInfoXml {
    fn into_volumes(self) -> Vec<Volume> {
        self.volumes.volume.into_iter().map(Volume::from).collect()
    }
}

#[derive(Debug, Deserialize)]
struct VolumeListXml<T> {
    #[serde(default = "Vec::new")]
    volume: Vec<T>,
}

impl<T> Default for VolumeListXml<T> {
    fn default() -> Self {
        Self { volume: Vec::new() }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct VolumeXml {
    name: String,
    id: String,
    status_str: String,
    type_str: String,
    brick_count: u32,
    dist_count: u32,
    replica_count: u32,
    stripe_count: u32,
    arbiter_count: u32,
    disperse_count: u32,
    redundancy_count: u32,
    transport: String,
    bricks: BricksXml,
    options: OptionsXml,
}

impl From<VolumeXml> for Volume {
    fn from(v: VolumeXml) -> Self {
        Volume {
            name: v.name,
            id: v.id,
            status: v.status_str,
            volume_type: v.type_str,
            bricks: v.bricks.brick.into_iter().map(Brick::from).collect(),
            num_bricks: v.brick_count,
            dist_count: v.dist_count,
            replica_count: v.replica_count,
            stripe_count: v.stripe_count,
            arbiter_count: v.arbiter_count,
            disperse_count: v.disperse_count,
            redundancy_count: v.redundancy_count,
            transport: v.transport,
            options: v
                .options
                .option
                .into_iter()
                .map(|o| VolumeOption::new(o.name, o.value))
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BricksXml {
    brick: Vec<BrickXml>,
}

/// `volume info` 中的 brick，标识主要在 `name`（host:path）里
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BrickXml {
    name: String,
    host_uuid: String,
    hostname: String,
    path: String,
}

impl From<BrickXml> for Brick {
    fn from(b: BrickXml) -> Self {
        let (hostname, path) = if b.hostname.is_empty() || b.path.is_empty() {
            // 主机名可能是 IPv6 地址，按最后一个冒号切分
            match b.name.rsplit_once(':') {
                Some((host, path)) => (host.to_string(), path.to_string()),
                None => (b.hostname, b.path),
            }
        } else {
            (b.hostname, b.path)
        };

        Brick {
            name: b.name,
            host_id: b.host_uuid,
            hostname,
            path,
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OptionsXml {
    option: Vec<OptionXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OptionXml {
    name: String,
    value: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VolStatusXml {
    volumes: VolumeListXml<StatusVolumeXml>,
}

impl VolStatusXml {
    fn into_nodes(self) -> Vec<BrickNode> {
        self.volumes
            .volume
            .into_iter()
            .flat_map(|v| v.node)
            .map(BrickNode::from)
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StatusVolumeXml {
    node: Vec<NodeXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct NodeXml {
    hostname: String,
    path: String,
    #[serde(rename = "peerid")]
    peer_id: String,
    status: i32,
    ports: PortsXml,
    pid: String,
    size_total: String,
    size_free: String,
    device: String,
    block_size: String,
    mnt_options: String,
    fs_name: String,
}

impl From<NodeXml> for BrickNode {
    fn from(n: NodeXml) -> Self {
        BrickNode {
            hostname: n.hostname,
            path: n.path,
            peer_id: n.peer_id,
            status: n.status,
            ports: Ports {
                tcp: n.ports.tcp,
                rdma: n.ports.rdma,
            },
            pid: n.pid,
            size_total: n.size_total,
            size_free: n.size_free,
            device: n.device,
            block_size: n.block_size,
            mnt_options: n.mnt_options,
            fs_name: n.fs_name,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PortsXml {
    tcp: String,
    rdma: String,
}

#[derive(Debug, Default, Deserialize)]
struct VolListXml {
    #[serde(rename = "volume", default)]
    names: Vec<String>,
}
