use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use sankhya_bridge::{
    AppState,
    cache::{CacheStore, MemoryCacheStore, RedisCacheStore},
    config::Config,
    router::create_router,
    sankhya::Endpoints,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    // 设置缓存存储，没有 Redis 时使用进程内缓存
    let store: Arc<dyn CacheStore> = match config.redis_url.as_deref() {
        Some(url) => {
            tracing::info!("Using Redis directory cache");
            Arc::new(RedisCacheStore::open(url).expect("Failed to create Redis client"))
        }
        None => {
            tracing::warn!("REDIS_URL not set, using in-process directory cache");
            Arc::new(MemoryCacheStore::new())
        }
    };

    // 设置应用状态
    let state = AppState::new(config.clone(), store, Endpoints::default());
    let router = create_router(state);

    // 根据编译模式决定是否添加CORS
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    // 启动服务器
    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        router,
    )
    .await
    .expect("Failed to start server");
}
