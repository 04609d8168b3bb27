//! 类型描述
//!
//! [`TypeDescriptor`] 是校验过的组件类声明：选定的构造点、注入字段、
//! 排好序的注入方法以及类型上声明的作用域。

use crate::class::{
    Arguments, AssignFn, ClassLayer, ComponentClass, CreateFn, InvokeFn, MethodSignature,
    Parameter,
};
use crate::resolver::Resolved;
use di_common::{
    AnnotationValue, ComponentRef, DependencyError, DependencyResult, IllegalComponentReason,
    Qualifier,
};
use std::collections::HashSet;
use std::fmt;

/// 解析注入点上的限定符，多于一个时报错
pub fn qualifier_of(component: &str, annotations: &[AnnotationValue]) -> DependencyResult<Qualifier> {
    let mut qualifiers = annotations.iter().filter(|a| a.is_qualifier());
    match (qualifiers.next(), qualifiers.next()) {
        (None, _) => Ok(Qualifier::Default),
        (Some(qualifier), None) => Ok(Qualifier::Annotated(qualifier.clone())),
        (Some(_), Some(_)) => Err(DependencyError::illegal_component(
            component,
            IllegalComponentReason::MultipleQualifiers,
        )),
    }
}

fn parameter_refs(component: &str, parameters: &[Parameter]) -> DependencyResult<Vec<ComponentRef>> {
    parameters
        .iter()
        .map(|p| Ok(p.component_ref(qualifier_of(component, p.annotations())?)))
        .collect()
}

/// 构造点
pub struct ConstructionPoint<T> {
    refs: Vec<ComponentRef>,
    create: CreateFn<T>,
}

impl<T> ConstructionPoint<T> {
    /// 参数对应的组件引用
    pub fn refs(&self) -> &[ComponentRef] {
        &self.refs
    }

    /// 用已解析的参数创建实例
    pub fn instantiate(&self, arguments: Vec<Resolved>) -> anyhow::Result<T> {
        (self.create)(&mut Arguments::new(arguments))
    }
}

/// 字段注入点
pub struct FieldPoint<T> {
    name: &'static str,
    reference: ComponentRef,
    assign: AssignFn<T>,
}

impl<T> FieldPoint<T> {
    /// 字段名
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 字段对应的组件引用
    pub fn component_ref(&self) -> &ComponentRef {
        &self.reference
    }

    /// 把依赖写入实例
    pub fn assign(&self, target: &mut T, value: Resolved) -> DependencyResult<()> {
        (self.assign)(target, value)
    }
}

/// 方法注入点
pub struct MethodPoint<T> {
    signature: MethodSignature,
    refs: Vec<ComponentRef>,
    invoke: InvokeFn<T>,
}

impl<T> MethodPoint<T> {
    /// 方法签名
    pub fn signature(&self) -> &MethodSignature {
        &self.signature
    }

    /// 参数对应的组件引用
    pub fn refs(&self) -> &[ComponentRef] {
        &self.refs
    }

    /// 用已解析的参数调用方法
    pub fn invoke(&self, target: &mut T, arguments: Vec<Resolved>) -> anyhow::Result<()> {
        (self.invoke)(target, &mut Arguments::new(arguments))
    }
}

/// 类型描述
pub struct TypeDescriptor<T> {
    name: &'static str,
    construction: ConstructionPoint<T>,
    fields: Vec<FieldPoint<T>>,
    methods: Vec<MethodPoint<T>>,
    scope: Option<AnnotationValue>,
    dependencies: Vec<ComponentRef>,
}

impl<T: 'static> TypeDescriptor<T> {
    /// 校验组件类声明并生成类型描述
    pub fn of(class: ComponentClass<T>) -> DependencyResult<Self> {
        let parts = class.into_parts();
        let name = parts.name;
        let illegal = |reason| DependencyError::illegal_component(name, reason);

        if parts.is_abstract {
            return Err(illegal(IllegalComponentReason::AbstractComponent));
        }

        let scope = declared_scope(name, &parts.annotations)?;
        let construction = select_constructor(name, parts.constructors)?;

        let mut layers = parts.hierarchy;
        let collected = collect_methods(&layers);

        // 字段按祖先优先的顺序排列
        let mut fields = Vec::new();
        let mut methods = Vec::new();
        for (depth, layer) in layers.drain(..).enumerate().rev() {
            let (layer_fields, layer_methods) = layer.into_parts();
            for field in layer_fields.into_iter().filter(|f| f.is_injected()) {
                if field.is_immutable() {
                    return Err(illegal(IllegalComponentReason::ImmutableField));
                }
                let qualifier = qualifier_of(name, field.annotations())?;
                let field_name = field.name();
                let (reference, assign) = field.into_parts();
                fields.push(FieldPoint {
                    name: field_name,
                    reference: reference(qualifier),
                    assign,
                });
            }
            for (index, method) in layer_methods.into_iter().enumerate() {
                if !collected.contains(&(depth, index)) {
                    continue;
                }
                if method.type_parameters() != 0 {
                    return Err(illegal(IllegalComponentReason::GenericMethod));
                }
                let signature = method.signature();
                let refs = parameter_refs(name, method.parameters())?;
                let (_, invoke) = method.into_parts();
                methods.push(MethodPoint {
                    signature,
                    refs,
                    invoke,
                });
            }
        }

        let dependencies = construction
            .refs
            .iter()
            .chain(fields.iter().map(|f| &f.reference))
            .chain(methods.iter().flat_map(|m| m.refs.iter()))
            .cloned()
            .collect();

        Ok(Self {
            name,
            construction,
            fields,
            methods,
            scope,
            dependencies,
        })
    }

    /// 组件类型名
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 选定的构造点
    pub fn construction_point(&self) -> &ConstructionPoint<T> {
        &self.construction
    }

    /// 注入字段，祖先优先
    pub fn injectable_fields(&self) -> &[FieldPoint<T>] {
        &self.fields
    }

    /// 注入方法，按调用顺序排列
    pub fn injectable_methods(&self) -> &[MethodPoint<T>] {
        &self.methods
    }

    /// 类型上声明的作用域
    pub fn declared_scope(&self) -> Option<&AnnotationValue> {
        self.scope.as_ref()
    }

    /// 全部依赖：构造参数、字段、方法参数
    pub fn dependencies(&self) -> &[ComponentRef] {
        &self.dependencies
    }
}

impl<T> fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let methods: Vec<String> = self.methods.iter().map(|m| m.signature.to_string()).collect();
        let fields: Vec<&str> = self.fields.iter().map(|f| f.name).collect();
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("fields", &fields)
            .field("methods", &methods)
            .field("scope", &self.scope)
            .field("dependencies", &self.dependencies)
            .finish()
    }
}

fn declared_scope(
    component: &str,
    annotations: &[AnnotationValue],
) -> DependencyResult<Option<AnnotationValue>> {
    let mut scopes = annotations.iter().filter(|a| a.is_scope());
    match (scopes.next(), scopes.next()) {
        (None, _) => Ok(None),
        (Some(scope), None) => Ok(Some(scope.clone())),
        (Some(_), Some(_)) => Err(DependencyError::illegal_component(
            component,
            IllegalComponentReason::MultipleScopes,
        )),
    }
}

fn select_constructor<T: 'static>(
    component: &str,
    constructors: Vec<crate::class::Constructor<T>>,
) -> DependencyResult<ConstructionPoint<T>> {
    let injected = constructors.iter().filter(|c| c.is_injected()).count();
    if injected > 1 {
        return Err(DependencyError::illegal_component(
            component,
            IllegalComponentReason::AmbiguousConstructor,
        ));
    }

    let selected = if injected == 1 {
        constructors.into_iter().find(|c| c.is_injected())
    } else {
        constructors.into_iter().find(|c| c.parameters().is_empty())
    }
    .ok_or_else(|| {
        DependencyError::illegal_component(component, IllegalComponentReason::NoUsableConstructor)
    })?;

    let refs = parameter_refs(component, selected.parameters())?;
    let (_, create) = selected.into_parts();
    Ok(ConstructionPoint { refs, create })
}

/// 选出需要调用的注入方法，返回 `(层深度, 层内下标)`
///
/// 从具体类型向祖先遍历：被更下层（无论是否标记注入）以相同签名重新声明的方法不会被收集。
fn collect_methods<T: 'static>(layers: &[ClassLayer<T>]) -> HashSet<(usize, usize)> {
    let mut seen: HashSet<MethodSignature> = HashSet::new();
    let mut collected = HashSet::new();

    for (depth, layer) in layers.iter().enumerate() {
        let signatures: Vec<MethodSignature> =
            layer.methods().iter().map(|m| m.signature()).collect();
        for (index, method) in layer.methods().iter().enumerate() {
            if method.is_injected() && !seen.contains(&signatures[index]) {
                collected.insert((depth, index));
            }
        }
        seen.extend(signatures);
    }

    collected
}
