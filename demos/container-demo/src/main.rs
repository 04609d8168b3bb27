//! # 容器演示程序
//!
//! 演示如何声明组件、绑定到上下文并解析依赖图

use anyhow::Context as _;
use clap::Parser;
use component_macros::Injectable;
use di_abstractions::{implements, Annotation, AnnotationKind, Lazy, Named};
use di_common::{init_logging, ContainerOptions, LoggingConfig};
use di_impl::{Context, ContextConfig};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "container-demo")]
#[command(about = "依赖注入容器演示")]
struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 日志过滤指令
    #[arg(long, default_value = "info")]
    log_filter: String,

    /// 使用 JSON 日志格式
    #[arg(long)]
    json: bool,

    /// 下单次数
    #[arg(long, default_value_t = 3)]
    orders: usize,
}

/// 池化作用域标记
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Pooled;

impl Annotation for Pooled {
    const KIND: AnnotationKind = AnnotationKind::Scope;
}

trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

trait OrderRepository: Send + Sync {
    fn save(&self, order: u64) -> usize;
    fn count(&self) -> usize;
}

trait Notifier: Send + Sync {
    fn notify(&self, order: u64);
}

struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_secs())
    }
}

implements!(SystemClock: dyn Clock);

#[derive(Injectable)]
#[component(singleton)]
struct MemoryRepository {
    saved: Arc<AtomicUsize>,
}

impl OrderRepository for MemoryRepository {
    fn save(&self, order: u64) -> usize {
        info!("保存订单 {}", order);
        self.saved.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn count(&self) -> usize {
        self.saved.load(Ordering::SeqCst)
    }
}

implements!(MemoryRepository: dyn OrderRepository);

#[derive(Injectable)]
#[component(scope = Pooled)]
struct MailNotifier {
    #[named("primary")]
    repository: Lazy<dyn OrderRepository>,
}

impl Notifier for MailNotifier {
    fn notify(&self, order: u64) {
        match self.repository.get() {
            Ok(repository) => info!("通知订单 {}，已保存 {} 笔", order, repository.count()),
            Err(e) => info!("通知订单 {} 失败: {}", order, e),
        }
    }
}

implements!(MailNotifier: dyn Notifier);

#[derive(Injectable)]
struct OrderService {
    clock: Arc<dyn Clock>,
    #[named("primary")]
    repository: Arc<dyn OrderRepository>,
    notifier: Arc<dyn Notifier>,
}

impl OrderService {
    fn place(&self) -> usize {
        let order = self.clock.now();
        let count = self.repository.save(order);
        self.notifier.notify(order);
        count
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(
        &LoggingConfig::default()
            .with_filter(args.log_filter.as_str())
            .with_json(args.json),
    )?;

    let options = ContainerOptions::load(args.config.as_deref()).context("加载容器配置失败")?;
    info!("容器配置: {:?}", options);

    let context = build_context(options)?;
    info!("已绑定组件: {:?}", context);

    // 每次解析都是新的 OrderService，但仓储是单例、通知器来自池
    for _ in 0..args.orders {
        let service = context
            .get::<Arc<OrderService>>()?
            .context("OrderService 未绑定")?;
        info!("累计订单 {}", service.place());
    }

    Ok(())
}

fn build_context(options: ContainerOptions) -> anyhow::Result<Context> {
    let mut config = ContextConfig::with_options(options);
    config.pooled_scope::<Pooled>();

    config.bind_instance::<dyn Clock>(Arc::new(SystemClock), &[])?;
    config.bind_instance(Arc::new(AtomicUsize::new(0)), &[])?;
    config.bind_injectable::<dyn OrderRepository, MemoryRepository>(&[Named::new("primary").into()])?;
    config.bind_injectable::<dyn Notifier, MailNotifier>(&[])?;
    config.bind_injectable::<OrderService, OrderService>(&[])?;

    Ok(config.build()?)
}
