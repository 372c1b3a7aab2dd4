//! 待办事项服务主入口
//! 加载配置、初始化日志、连接数据库、启动 HTTP 服务

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;

use todo_service::{
    auth::JwtService,
    config::AppConfig,
    db,
    handlers::health,
    middleware::AppState,
    routes,
    services::{AuthService, TodoService},
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ===== CLI 参数处理 =====
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("todo-service {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("未知参数: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // 加载 .env 文件（开发环境）
    // 按优先级加载：.env.local > .env.development > .env
    // 生产环境应该直接设置环境变量，不依赖 .env 文件
    if let Ok(path) = std::env::var("TODO_ENV") {
        dotenv::from_filename(format!(".env.{}", path)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::from_filename(".env.development").ok();
        dotenv::dotenv().ok();
    }

    // 设置应用启动时间
    health::set_start_time();

    // 1. 加载配置
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // 2. 初始化日志
    telemetry::init_telemetry(&config.logging);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Todo service starting...");

    // 3. 数据库连接池 + 迁移
    let db_pool = db::create_pool(&config.database)
        .await
        .context("Failed to create database pool")?;
    db::run_migrations(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database initialized");

    // 4. 构建应用状态
    let jwt_service = Arc::new(JwtService::from_config(&config.security)?);
    let auth_service = Arc::new(AuthService::new(db_pool.clone(), jwt_service.clone())?);
    let todo_service = Arc::new(TodoService::new(db_pool.clone()));

    let app_state = Arc::new(AppState {
        db: db_pool,
        jwt_service,
        auth_service,
        todo_service,
    });

    // 5. 构建路由
    let app = routes::create_router(app_state);

    // 6. 启动服务器
    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        addr = %addr,
        "Server listening"
    );

    // 7. 优雅关闭
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.graceful_shutdown_timeout_secs))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 优雅关闭信号处理
///
/// 返回后 axum 停止接收新连接并等待在途请求结束；同时启动一个
/// 强制退出计时器，超过优雅关闭窗口仍未结束时直接退出进程。
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }

    // 超时后强制关闭
    tokio::spawn(async move {
        tokio::time::sleep(tokio::time::Duration::from_secs(timeout_secs)).await;
        tracing::warn!("Graceful shutdown timeout reached, forcing exit");
        std::process::exit(1);
    });
}

/// 打印帮助信息
fn print_help() {
    println!("todo-service {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("用法: todo-service [选项]");
    println!();
    println!("选项:");
    println!("  --version     打印版本信息并退出");
    println!("  --help        打印此帮助信息并退出");
    println!();
    println!("环境变量:");
    println!("  所有配置通过 TODO_ 前缀的环境变量完成");
    println!("  可用选项请参考 .env.example");
}
