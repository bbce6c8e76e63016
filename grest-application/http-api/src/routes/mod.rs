//! REST 路由

mod peers;
mod volumes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use grest_gluster::{ClusterState, GlusterClient};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;

/// 共享的处理函数状态
#[derive(Clone)]
pub struct AppState {
    pub cluster: Arc<ClusterState>,
    /// 节点变更后请求重载节点列表
    pub reload: Option<mpsc::Sender<()>>,
}

impl AppState {
    pub fn new(cluster: Arc<ClusterState>) -> Self {
        Self {
            cluster,
            reload: None,
        }
    }

    pub fn with_reload(mut self, reload: mpsc::Sender<()>) -> Self {
        self.reload = Some(reload);
        self
    }

    pub(crate) fn client(&self) -> &GlusterClient {
        self.cluster.client()
    }
}

/// 构建路由
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/volumes", get(volumes::list))
        .route(
            "/v1/volumes/:volume",
            get(volumes::info)
                .put(volumes::create)
                .delete(volumes::delete),
        )
        .route("/v1/volumes/:volume/status", get(volumes::status))
        .route("/v1/volumes/:volume/start", post(volumes::start))
        .route("/v1/volumes/:volume/stop", post(volumes::stop))
        .route("/v1/volumes/:volume/restart", post(volumes::restart))
        .route(
            "/v1/volumes/:volume/options",
            get(volumes::options)
                .post(volumes::set_options)
                .delete(volumes::reset_options),
        )
        .route("/v1/volumes/:volume/logrotate", post(volumes::log_rotate))
        .route("/v1/volumes/:volume/barrier/enable", post(volumes::barrier_enable))
        .route("/v1/volumes/:volume/barrier/disable", post(volumes::barrier_disable))
        .route("/v1/volnames", get(volumes::names))
        .route(
            "/v1/peers",
            get(peers::list).post(peers::probe).delete(peers::detach),
        )
        .route("/v1/cluster", get(peers::cluster))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 查询参数中的开关（`status`、`force`、`all`）
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Flags {
    status: Option<String>,
    force: Option<String>,
    all: Option<String>,
}

impl Flags {
    fn is_set(value: &Option<String>) -> bool {
        matches!(value.as_deref(), Some("1" | "true" | "yes"))
    }

    pub(crate) fn status(&self) -> bool {
        Self::is_set(&self.status)
    }

    pub(crate) fn force(&self) -> bool {
        Self::is_set(&self.force)
    }

    pub(crate) fn all(&self) -> bool {
        Self::is_set(&self.all)
    }
}

/// 变更类请求的成功响应
pub(crate) fn ok() -> Json<Value> {
    Json(json!({ "ok": true }))
}
