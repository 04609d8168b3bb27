//! 作用域装饰器
//!
//! 作用域装饰器包装内部提供者、控制实例的缓存方式，依赖列表原样转发。
//! 未标注作用域的绑定不做包装，每次解析都构造新实例。

use di_abstractions::{
    ComponentProvider, ComponentRef, ComponentResolver, DependencyResult, Instance, ScopeFactory,
};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// 单例作用域：第一次解析时构造并缓存
///
/// 并发的首次解析可能各自构造一次，只有第一个写入的实例会被保留并返回给所有调用方。
pub struct SingletonProvider {
    inner: Arc<dyn ComponentProvider>,
    instance: OnceCell<Instance>,
}

impl SingletonProvider {
    /// 包装提供者
    pub fn new(inner: Arc<dyn ComponentProvider>) -> Self {
        Self {
            inner,
            instance: OnceCell::new(),
        }
    }

    /// 单例作用域工厂
    pub fn factory() -> ScopeFactory {
        Arc::new(|inner: Arc<dyn ComponentProvider>| {
            Arc::new(Self::new(inner)) as Arc<dyn ComponentProvider>
        })
    }
}

impl ComponentProvider for SingletonProvider {
    fn get(&self, context: &dyn ComponentResolver) -> DependencyResult<Instance> {
        if let Some(instance) = self.instance.get() {
            debug!("命中单例缓存");
            return Ok(instance.clone());
        }

        let created = self.inner.get(context)?;
        match self.instance.try_insert(created) {
            Ok(instance) => Ok(instance.clone()),
            Err((existing, _)) => Ok(existing.clone()),
        }
    }

    fn dependencies(&self) -> &[ComponentRef] {
        self.inner.dependencies()
    }
}

impl fmt::Debug for SingletonProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonProvider")
            .field("initialized", &self.instance.get().is_some())
            .finish()
    }
}

#[derive(Default)]
struct Pool {
    instances: Vec<Instance>,
    cursor: usize,
}

/// 池化作用域：最多缓存 `capacity` 个实例，按需创建，满后轮流返回
pub struct PooledProvider {
    inner: Arc<dyn ComponentProvider>,
    capacity: usize,
    pool: Mutex<Pool>,
}

impl PooledProvider {
    /// 包装提供者，容量至少为 1
    pub fn new(inner: Arc<dyn ComponentProvider>, capacity: usize) -> Self {
        Self {
            inner,
            capacity: capacity.max(1),
            pool: Mutex::new(Pool::default()),
        }
    }

    /// 池化作用域工厂
    pub fn factory(capacity: usize) -> ScopeFactory {
        Arc::new(move |inner: Arc<dyn ComponentProvider>| {
            Arc::new(Self::new(inner, capacity)) as Arc<dyn ComponentProvider>
        })
    }

    /// 池容量
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 已创建的实例数
    pub fn size(&self) -> usize {
        self.pool.lock().instances.len()
    }
}

impl ComponentProvider for PooledProvider {
    fn get(&self, context: &dyn ComponentResolver) -> DependencyResult<Instance> {
        {
            let mut pool = self.pool.lock();
            if pool.instances.len() >= self.capacity {
                let index = pool.cursor % self.capacity;
                pool.cursor += 1;
                debug!("复用池中实例: {}/{}", index, self.capacity);
                return Ok(pool.instances[index].clone());
            }
        }

        // 构造期间不持有锁，依赖解析可能重入同一个池
        let created = self.inner.get(context)?;
        let mut pool = self.pool.lock();
        if pool.instances.len() < self.capacity {
            pool.instances.push(created.clone());
            pool.cursor += 1;
            return Ok(created);
        }
        let index = pool.cursor % self.capacity;
        pool.cursor += 1;
        Ok(pool.instances[index].clone())
    }

    fn dependencies(&self) -> &[ComponentRef] {
        self.inner.dependencies()
    }
}

impl fmt::Debug for PooledProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledProvider")
            .field("capacity", &self.capacity)
            .field("size", &self.size())
            .finish()
    }
}
