//! 组件提供者实现

use di_abstractions::{
    erase, ComponentClass, ComponentProvider, ComponentRef, ComponentResolver, DependencyError,
    DependencyResult, Instance, Resolved, TypeDescriptor, Upcast,
};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// 常量提供者：总是返回同一个实例
pub struct InstanceProvider {
    instance: Instance,
}

impl InstanceProvider {
    /// 创建常量提供者
    pub fn new<T: ?Sized + Send + Sync + 'static>(instance: Arc<T>) -> Self {
        Self {
            instance: erase(instance),
        }
    }
}

impl ComponentProvider for InstanceProvider {
    fn get(&self, _context: &dyn ComponentResolver) -> DependencyResult<Instance> {
        Ok(self.instance.clone())
    }
}

impl fmt::Debug for InstanceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceProvider").finish_non_exhaustive()
    }
}

/// 注入提供者
///
/// 按类型描述构造实现类型 `I`：先解析构造参数并实例化，再依次注入字段、调用注入方法，
/// 最后把实例转换为绑定类型 `T`。
pub struct InjectionProvider<T: ?Sized, I> {
    descriptor: TypeDescriptor<I>,
    _marker: PhantomData<fn() -> Arc<T>>,
}

impl<T, I> InjectionProvider<T, I>
where
    T: ?Sized + Send + Sync + 'static,
    I: Upcast<T>,
{
    /// 由类型描述创建
    pub fn new(descriptor: TypeDescriptor<I>) -> Self {
        Self {
            descriptor,
            _marker: PhantomData,
        }
    }

    /// 校验组件类声明并创建
    pub fn from_class(class: ComponentClass<I>) -> DependencyResult<Self> {
        TypeDescriptor::of(class).map(Self::new)
    }

    /// 类型描述
    pub fn descriptor(&self) -> &TypeDescriptor<I> {
        &self.descriptor
    }

    fn creation_failed(&self, error: anyhow::Error) -> DependencyError {
        DependencyError::ComponentCreationFailed {
            type_name: self.descriptor.name().to_string(),
            source: error.into(),
        }
    }
}

fn resolve_one(context: &dyn ComponentResolver, component: &ComponentRef) -> DependencyResult<Resolved> {
    context
        .resolve(component)?
        .ok_or_else(|| DependencyError::ComponentNotBound {
            key: component.key().clone(),
        })
}

fn resolve_all(
    context: &dyn ComponentResolver,
    components: &[ComponentRef],
) -> DependencyResult<Vec<Resolved>> {
    components
        .iter()
        .map(|component| resolve_one(context, component))
        .collect()
}

impl<T, I> ComponentProvider for InjectionProvider<T, I>
where
    T: ?Sized + Send + Sync + 'static,
    I: Upcast<T>,
{
    fn get(&self, context: &dyn ComponentResolver) -> DependencyResult<Instance> {
        debug!("构造组件: {}", self.descriptor.name());

        let construction = self.descriptor.construction_point();
        let arguments = resolve_all(context, construction.refs())?;
        let mut component = construction
            .instantiate(arguments)
            .map_err(|e| self.creation_failed(e))?;

        for field in self.descriptor.injectable_fields() {
            let value = resolve_one(context, field.component_ref())?;
            field.assign(&mut component, value)?;
        }

        for method in self.descriptor.injectable_methods() {
            let arguments = resolve_all(context, method.refs())?;
            method
                .invoke(&mut component, arguments)
                .map_err(|e| self.creation_failed(e))?;
        }

        Ok(erase(Upcast::<T>::upcast(Arc::new(component))))
    }

    fn dependencies(&self) -> &[ComponentRef] {
        self.descriptor.dependencies()
    }
}

impl<T: ?Sized, I> fmt::Debug for InjectionProvider<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectionProvider")
            .field("bound", &std::any::type_name::<T>())
            .field("descriptor", &self.descriptor)
            .finish()
    }
}
