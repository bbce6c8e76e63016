//! GlusterREST Gluster 工具库
//!
//! 在 gluster 命令行之上提供类型化的集群管理能力：
//! - 解析 `--xml` 输出（节点、卷信息、卷状态、卷名列表）
//! - 合并 `volume status detail` 与 `volume info`，给出包含离线 brick 的完整拓扑
//! - 卷生命周期与选项管理命令
//! - 进程级节点列表快照及后台重载
//!
//! # 示例
//!
//! ```ignore
//! use grest_executor::ProcessRunner;
//! use grest_gluster::GlusterClient;
//!
//! let client = GlusterClient::with_runner(ProcessRunner::new("gluster"));
//! for volume in client.volume_status(None).await? {
//!     for brick in &volume.bricks {
//!         println!("{} online={}", brick.name, brick.online);
//!     }
//! }
//! ```

mod admin;
mod client;
mod error;
mod models;
pub mod parser;
pub mod reconcile;
mod state;

pub use admin::{
    barrier_args, create_volume_args, delete_args, lifecycle_args, log_rotate_args,
    option_reset_args, option_set_args, peer_args,
};
pub use client::GlusterClient;
pub use error::{GlusterError, Result};
pub use models::{
    brick_key, Brick, BrickNode, CreateOptions, Peer, Ports, Volume, VolumeOption, NOT_AVAILABLE,
};
pub use state::{ClusterState, PeerSnapshot};
