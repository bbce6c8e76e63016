//! GlusterREST HTTP API
//!
//! 将 gluster 管理命令暴露为 REST 接口：
//! - 卷的创建、删除、启停、选项与 barrier 管理
//! - 卷状态查询（合并运行时状态与配置，离线 brick 以 `N/A` 占位）
//! - 集群节点的查询、添加与移除
//!
//! 所有错误以 `{"message": "..."}` 返回，gluster 的诊断信息原样透传。
//!
//! # 示例
//!
//! ```ignore
//! use std::sync::Arc;
//! use grest_gluster::{ClusterState, GlusterClient};
//! use grest_http_api::{build_router, AppState};
//!
//! let cluster = Arc::new(ClusterState::load(client).await?);
//! let app = build_router(AppState::new(cluster));
//! axum::serve(listener, app).await?;
//! ```

mod config;
mod error;
mod routes;

pub use config::{RestConfig, DEFAULT_CONFIG_FILE, ENV_PREFIX};
pub use error::{ApiError, ApiResult};
pub use routes::{build_router, AppState};
