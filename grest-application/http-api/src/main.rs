//! glusterrestd - GlusterREST 守护进程

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use grest_executor::ProcessRunner;
use grest_gluster::{ClusterState, GlusterClient};
use grest_http_api::{build_router, AppState, RestConfig, DEFAULT_CONFIG_FILE};
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glusterrestd")]
#[command(about = "GlusterREST - gluster 管理命令的 REST 服务", long_about = None)]
#[command(version)]
struct Cli {
    /// 默认配置文件
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// 自定义配置文件，覆盖默认配置
    #[arg(long)]
    custom_config: Option<PathBuf>,

    /// 日志级别（覆盖配置文件）
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = RestConfig::load(&cli.config, cli.custom_config.as_deref())?;

    // 初始化日志，RUST_LOG 优先
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("glusterrestd 启动, gluster: {}", config.gluster_bin);

    let client = GlusterClient::with_runner(ProcessRunner::new(&config.gluster_bin));
    let cluster = match ClusterState::load(client).await {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("无法获取集群节点列表: {}", e);
            std::process::exit(1);
        }
    };

    let (reload_tx, reload_rx) = mpsc::channel(4);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let reloader = cluster.clone().spawn_reload_listener(reload_rx, shutdown_rx);

    #[cfg(unix)]
    forward_reload_signal(reload_tx.clone())?;

    let app = build_router(AppState::new(cluster).with_reload(reload_tx));

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法监听 {}", addr))?;
    info!("HTTP API 监听于 {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP 服务异常退出")?;

    let _ = shutdown_tx.send(true);
    if let Err(e) = reloader.await {
        warn!("重载任务异常退出: {}", e);
    }
    info!("glusterrestd 已停止");
    Ok(())
}

/// 将 SIGUSR2 转发到重载通道
#[cfg(unix)]
fn forward_reload_signal(reload: mpsc::Sender<()>) -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut usr2 = signal(SignalKind::user_defined2()).context("无法注册 SIGUSR2 处理")?;
    tokio::spawn(async move {
        while usr2.recv().await.is_some() {
            info!("收到 SIGUSR2, 重新加载节点列表");
            if reload.send(()).await.is_err() {
                break;
            }
        }
    });
    Ok(())
}

/// 等待 Ctrl+C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("无法监听 Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("无法监听 SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("收到 Ctrl+C"),
        _ = terminate => info!("收到 SIGTERM"),
    }
}
