//! 节点相关接口

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use grest_gluster::{Peer, PeerSnapshot};
use serde_json::Value;
use tracing::debug;

use super::{ok, AppState};
use crate::error::{ApiError, ApiResult};

fn hosts_from(body: Result<Json<Vec<String>>, JsonRejection>) -> ApiResult<Vec<String>> {
    let Json(hosts) = body?;
    if hosts.is_empty() {
        return Err(ApiError::BadRequest("未指定节点".to_string()));
    }
    Ok(hosts)
}

/// 节点变更后通知后台任务刷新快照
fn request_reload(state: &AppState) {
    if let Some(reload) = &state.reload {
        if reload.try_send(()).is_err() {
            debug!("重载请求已在队列中");
        }
    }
}

/// GET /v1/peers
pub(crate) async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Peer>>> {
    Ok(Json(state.client().peer_list().await?))
}

/// POST /v1/peers
pub(crate) async fn probe(
    State(state): State<AppState>,
    body: Result<Json<Vec<String>>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let hosts = hosts_from(body)?;
    let result = async {
        for host in &hosts {
            state.client().peer_probe(host).await?;
        }
        Ok::<_, ApiError>(())
    }
    .await;
    request_reload(&state);
    result?;
    Ok(ok())
}

/// DELETE /v1/peers
pub(crate) async fn detach(
    State(state): State<AppState>,
    body: Result<Json<Vec<String>>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let hosts = hosts_from(body)?;
    let result = async {
        for host in &hosts {
            state.client().peer_detach(host).await?;
        }
        Ok::<_, ApiError>(())
    }
    .await;
    request_reload(&state);
    result?;
    Ok(ok())
}

/// GET /v1/cluster
pub(crate) async fn cluster(State(state): State<AppState>) -> Json<PeerSnapshot> {
    let snapshot = state.cluster.snapshot().await;
    Json(PeerSnapshot::clone(&snapshot))
}
