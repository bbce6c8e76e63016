//! 卷相关接口

use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use grest_gluster::{CreateOptions, Volume, VolumeOption};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{ok, AppState, Flags};
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Default, Deserialize)]
struct LogRotateRequest {
    #[serde(default)]
    brick: Option<String>,
}

/// GET /v1/volumes
pub(crate) async fn list(
    State(state): State<AppState>,
    Query(flags): Query<Flags>,
) -> ApiResult<Json<Vec<Volume>>> {
    let volumes = if flags.status() {
        state.client().volume_status(None).await?
    } else {
        state.client().volume_info(None).await?
    };
    Ok(Json(volumes))
}

/// GET /v1/volumes/:volume
pub(crate) async fn info(
    State(state): State<AppState>,
    Path(volume): Path<String>,
    Query(flags): Query<Flags>,
) -> ApiResult<Json<Vec<Volume>>> {
    let volumes = if flags.status() {
        state.client().volume_status(Some(&volume)).await?
    } else {
        state.client().volume_info(Some(&volume)).await?
    };
    Ok(Json(volumes))
}

/// GET /v1/volumes/:volume/status
pub(crate) async fn status(
    State(state): State<AppState>,
    Path(volume): Path<String>,
) -> ApiResult<Json<Vec<Volume>>> {
    Ok(Json(state.client().volume_status(Some(&volume)).await?))
}

/// PUT /v1/volumes/:volume
pub(crate) async fn create(
    State(state): State<AppState>,
    Path(volume): Path<String>,
    body: Result<Json<CreateOptions>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(options) = body?;
    state.client().volume_create(&volume, &options).await?;
    Ok(ok())
}

/// DELETE /v1/volumes/:volume
pub(crate) async fn delete(
    State(state): State<AppState>,
    Path(volume): Path<String>,
) -> ApiResult<Json<Value>> {
    state.client().volume_delete(&volume).await?;
    Ok(ok())
}

/// POST /v1/volumes/:volume/start
pub(crate) async fn start(
    State(state): State<AppState>,
    Path(volume): Path<String>,
    Query(flags): Query<Flags>,
) -> ApiResult<Json<Value>> {
    state.client().volume_start(&volume, flags.force()).await?;
    Ok(ok())
}

/// POST /v1/volumes/:volume/stop
pub(crate) async fn stop(
    State(state): State<AppState>,
    Path(volume): Path<String>,
    Query(flags): Query<Flags>,
) -> ApiResult<Json<Value>> {
    state.client().volume_stop(&volume, flags.force()).await?;
    Ok(ok())
}

/// POST /v1/volumes/:volume/restart
pub(crate) async fn restart(
    State(state): State<AppState>,
    Path(volume): Path<String>,
    Query(flags): Query<Flags>,
) -> ApiResult<Json<Value>> {
    state.client().volume_restart(&volume, flags.force()).await?;
    Ok(ok())
}

/// GET /v1/volumes/:volume/options
pub(crate) async fn options(
    State(state): State<AppState>,
    Path(volume): Path<String>,
) -> ApiResult<Json<Vec<VolumeOption>>> {
    Ok(Json(state.client().volume_options(&volume).await?))
}

/// POST /v1/volumes/:volume/options
///
/// 按键名顺序逐个设置，遇到第一个失败即返回。
pub(crate) async fn set_options(
    State(state): State<AppState>,
    Path(volume): Path<String>,
    body: Result<Json<BTreeMap<String, String>>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(options) = body?;
    if options.is_empty() {
        return Err(ApiError::BadRequest("未指定任何选项".to_string()));
    }
    for (key, value) in &options {
        state.client().volume_option_set(&volume, key, value).await?;
    }
    Ok(ok())
}

/// DELETE /v1/volumes/:volume/options
///
/// `?all=1` 重置全部选项，否则重置请求体（JSON 数组）中列出的选项。
pub(crate) async fn reset_options(
    State(state): State<AppState>,
    Path(volume): Path<String>,
    Query(flags): Query<Flags>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    if flags.all() {
        state
            .client()
            .volume_option_reset(&volume, None, flags.force())
            .await?;
        return Ok(ok());
    }

    let keys: Vec<String> = if body.is_empty() {
        Vec::new()
    } else {
        serde_json::from_slice(&body)?
    };
    if keys.is_empty() {
        return Err(ApiError::BadRequest(
            "未指定要重置的选项，重置全部请使用 ?all=1".to_string(),
        ));
    }

    for key in &keys {
        state
            .client()
            .volume_option_reset(&volume, Some(key), flags.force())
            .await?;
    }
    Ok(ok())
}

/// POST /v1/volumes/:volume/logrotate
pub(crate) async fn log_rotate(
    State(state): State<AppState>,
    Path(volume): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let request: LogRotateRequest = if body.is_empty() {
        LogRotateRequest::default()
    } else {
        serde_json::from_slice(&body)?
    };
    debug!("日志轮转: {} {:?}", volume, request.brick);
    state
        .client()
        .volume_log_rotate(&volume, request.brick.as_deref())
        .await?;
    Ok(ok())
}

/// POST /v1/volumes/:volume/barrier/enable
pub(crate) async fn barrier_enable(
    State(state): State<AppState>,
    Path(volume): Path<String>,
) -> ApiResult<Json<Value>> {
    state.client().volume_barrier_enable(&volume).await?;
    Ok(ok())
}

/// POST /v1/volumes/:volume/barrier/disable
pub(crate) async fn barrier_disable(
    State(state): State<AppState>,
    Path(volume): Path<String>,
) -> ApiResult<Json<Value>> {
    state.client().volume_barrier_disable(&volume).await?;
    Ok(ok())
}

/// GET /v1/volnames
pub(crate) async fn names(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.client().volume_list().await?))
}
