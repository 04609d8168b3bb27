//! 组件类声明
//!
//! Rust 没有运行时反射，也没有实现继承。组件的构造方式通过显式的声明模型给出：
//! [`ComponentClass`] 描述一个具体类型，[`ClassLayer`] 描述它的一层"祖先"
//! （具体类型内嵌祖先的状态，祖先成员直接作用于 `&mut T`）。
//! 声明可以手写，也可以由 `#[derive(Injectable)]` 生成。

use crate::resolvable::Resolvable;
use crate::resolver::Resolved;
use di_common::{
    AnnotationValue, ComponentRef, DependencyError, DependencyResult, Qualifier, TypeInfo,
};
use std::fmt;

pub(crate) type CreateFn<T> = Box<dyn Fn(&mut Arguments) -> anyhow::Result<T> + Send + Sync>;
pub(crate) type AssignFn<T> = Box<dyn Fn(&mut T, Resolved) -> DependencyResult<()> + Send + Sync>;
pub(crate) type InvokeFn<T> = Box<dyn Fn(&mut T, &mut Arguments) -> anyhow::Result<()> + Send + Sync>;

/// 按声明顺序依次取出的已解析参数
#[derive(Debug)]
pub struct Arguments {
    values: std::vec::IntoIter<Resolved>,
}

impl Arguments {
    /// 创建参数列表
    pub fn new(values: Vec<Resolved>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }

    /// 取出下一个参数
    pub fn take<R: Resolvable>(&mut self) -> DependencyResult<R> {
        let resolved = self
            .values
            .next()
            .ok_or_else(|| DependencyError::TypeMismatch {
                expected: std::any::type_name::<R>().to_string(),
            })?;
        R::from_resolved(resolved)
    }

    /// 剩余参数个数
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

/// 构造器或方法的参数声明
#[derive(Clone)]
pub struct Parameter {
    type_info: TypeInfo,
    reference: fn(Qualifier) -> ComponentRef,
    annotations: Vec<AnnotationValue>,
}

impl Parameter {
    /// 声明类型为 `R` 的参数
    pub fn of<R: Resolvable>() -> Self {
        Self {
            type_info: TypeInfo::of::<R>(),
            reference: R::component_ref,
            annotations: Vec::new(),
        }
    }

    /// 添加注解
    pub fn with_annotation(mut self, annotation: impl Into<AnnotationValue>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    /// 声明的参数类型
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 参数上的注解
    pub fn annotations(&self) -> &[AnnotationValue] {
        &self.annotations
    }

    /// 按限定符生成组件引用
    pub fn component_ref(&self, qualifier: Qualifier) -> ComponentRef {
        (self.reference)(qualifier)
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("type", &self.type_info.name())
            .field("annotations", &self.annotations)
            .finish()
    }
}

/// 构造器声明
pub struct Constructor<T> {
    injected: bool,
    parameters: Vec<Parameter>,
    create: CreateFn<T>,
}

impl<T: 'static> Constructor<T> {
    /// 创建构造器声明，`create` 按参数声明顺序从 [`Arguments`] 取值
    pub fn new<F>(create: F) -> Self
    where
        F: Fn(&mut Arguments) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        Self {
            injected: false,
            parameters: Vec::new(),
            create: Box::new(create),
        }
    }

    /// 标记为注入构造器
    pub fn injected(mut self) -> Self {
        self.injected = true;
        self
    }

    /// 添加参数
    pub fn with_param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// 是否为注入构造器
    pub fn is_injected(&self) -> bool {
        self.injected
    }

    /// 参数声明
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub(crate) fn into_parts(self) -> (Vec<Parameter>, CreateFn<T>) {
        (self.parameters, self.create)
    }
}

impl<T> fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("injected", &self.injected)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// 字段声明
pub struct Field<T> {
    name: &'static str,
    injected: bool,
    immutable: bool,
    annotations: Vec<AnnotationValue>,
    reference: fn(Qualifier) -> ComponentRef,
    assign: AssignFn<T>,
}

impl<T: 'static> Field<T> {
    /// 创建字段声明，`setter` 把解析出的依赖写入实例
    pub fn new<R, F>(name: &'static str, setter: F) -> Self
    where
        R: Resolvable,
        F: Fn(&mut T, R) + Send + Sync + 'static,
    {
        Self {
            name,
            injected: false,
            immutable: false,
            annotations: Vec::new(),
            reference: R::component_ref,
            assign: Box::new(move |target, resolved| {
                setter(target, R::from_resolved(resolved)?);
                Ok(())
            }),
        }
    }

    /// 标记为注入字段
    pub fn injected(mut self) -> Self {
        self.injected = true;
        self
    }

    /// 标记为不可变字段
    pub fn immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    /// 添加注解
    pub fn with_annotation(mut self, annotation: impl Into<AnnotationValue>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    /// 字段名
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 是否为注入字段
    pub fn is_injected(&self) -> bool {
        self.injected
    }

    /// 是否不可变
    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    /// 字段上的注解
    pub fn annotations(&self) -> &[AnnotationValue] {
        &self.annotations
    }

    pub(crate) fn into_parts(self) -> (fn(Qualifier) -> ComponentRef, AssignFn<T>) {
        (self.reference, self.assign)
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("injected", &self.injected)
            .field("immutable", &self.immutable)
            .field("annotations", &self.annotations)
            .finish_non_exhaustive()
    }
}

/// 方法签名：名称加参数类型，用于判断覆写
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    /// 方法名
    pub name: &'static str,
    /// 参数类型
    pub parameter_types: Vec<TypeInfo>,
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types: Vec<String> = self
            .parameter_types
            .iter()
            .map(TypeInfo::short_name)
            .collect();
        write!(f, "{}({})", self.name, types.join(", "))
    }
}

/// 方法声明
pub struct Method<T> {
    name: &'static str,
    injected: bool,
    type_parameters: usize,
    parameters: Vec<Parameter>,
    invoke: InvokeFn<T>,
}

impl<T: 'static> Method<T> {
    /// 创建方法声明，`invoke` 按参数声明顺序从 [`Arguments`] 取值
    pub fn new<F>(name: &'static str, invoke: F) -> Self
    where
        F: Fn(&mut T, &mut Arguments) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            name,
            injected: false,
            type_parameters: 0,
            parameters: Vec::new(),
            invoke: Box::new(invoke),
        }
    }

    /// 标记为注入方法
    pub fn injected(mut self) -> Self {
        self.injected = true;
        self
    }

    /// 声明类型参数个数
    pub fn with_type_parameters(mut self, count: usize) -> Self {
        self.type_parameters = count;
        self
    }

    /// 添加参数
    pub fn with_param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// 方法名
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 是否为注入方法
    pub fn is_injected(&self) -> bool {
        self.injected
    }

    /// 类型参数个数
    pub fn type_parameters(&self) -> usize {
        self.type_parameters
    }

    /// 参数声明
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// 方法签名
    pub fn signature(&self) -> MethodSignature {
        MethodSignature {
            name: self.name,
            parameter_types: self.parameters.iter().map(|p| *p.type_info()).collect(),
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<Parameter>, InvokeFn<T>) {
        (self.parameters, self.invoke)
    }
}

impl<T> fmt::Debug for Method<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("injected", &self.injected)
            .field("type_parameters", &self.type_parameters)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// 类层级中的一层：某个类型自身声明的字段与方法
pub struct ClassLayer<T> {
    name: &'static str,
    fields: Vec<Field<T>>,
    methods: Vec<Method<T>>,
}

impl<T: 'static> ClassLayer<T> {
    /// 创建类层
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// 声明字段
    pub fn field(mut self, field: Field<T>) -> Self {
        self.fields.push(field);
        self
    }

    /// 声明方法
    pub fn method(mut self, method: Method<T>) -> Self {
        self.methods.push(method);
        self
    }

    /// 类层名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 声明的字段
    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    /// 声明的方法
    pub fn methods(&self) -> &[Method<T>] {
        &self.methods
    }

    pub(crate) fn into_parts(self) -> (Vec<Field<T>>, Vec<Method<T>>) {
        (self.fields, self.methods)
    }
}

impl<T> fmt::Debug for ClassLayer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassLayer")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("methods", &self.methods)
            .finish()
    }
}

/// 组件类声明
///
/// # 示例
///
/// ```rust
/// use di_abstractions::{ComponentClass, Constructor, Parameter};
/// use std::sync::Arc;
///
/// struct Repository;
/// struct Service {
///     repository: Arc<Repository>,
/// }
///
/// let class = ComponentClass::<Service>::new("Service").constructor(
///     Constructor::new(|args| Ok(Service { repository: args.take()? }))
///         .with_param(Parameter::of::<Arc<Repository>>())
///         .injected(),
/// );
/// assert_eq!(class.name(), "Service");
/// ```
pub struct ComponentClass<T> {
    is_abstract: bool,
    annotations: Vec<AnnotationValue>,
    constructors: Vec<Constructor<T>>,
    own: ClassLayer<T>,
    ancestors: Vec<ClassLayer<T>>,
}

impl<T: 'static> ComponentClass<T> {
    /// 创建组件类声明
    pub fn new(name: &'static str) -> Self {
        Self {
            is_abstract: false,
            annotations: Vec::new(),
            constructors: Vec::new(),
            own: ClassLayer::new(name),
            ancestors: Vec::new(),
        }
    }

    /// 使用类型名创建组件类声明
    pub fn of() -> Self {
        Self::new(TypeInfo::of::<T>().ident())
    }

    /// 声明为抽象类型
    pub fn declared_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// 在类型上添加注解（作用域标记）
    pub fn annotated(mut self, annotation: impl Into<AnnotationValue>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    /// 声明构造器
    pub fn constructor(mut self, constructor: Constructor<T>) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// 在自身层声明字段
    pub fn field(mut self, field: Field<T>) -> Self {
        self.own.fields.push(field);
        self
    }

    /// 在自身层声明方法
    pub fn method(mut self, method: Method<T>) -> Self {
        self.own.methods.push(method);
        self
    }

    /// 追加更上一层的祖先：第一次调用为直接父类，第二次为祖父类，依此类推
    pub fn extends(mut self, ancestor: ClassLayer<T>) -> Self {
        self.ancestors.push(ancestor);
        self
    }

    /// 类型名
    pub fn name(&self) -> &'static str {
        self.own.name
    }

    /// 是否为抽象类型
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// 类型上的注解
    pub fn annotations(&self) -> &[AnnotationValue] {
        &self.annotations
    }

    /// 构造器声明
    pub fn constructors(&self) -> &[Constructor<T>] {
        &self.constructors
    }

    /// 从自身开始向上的类层级
    pub fn hierarchy(&self) -> impl Iterator<Item = &ClassLayer<T>> {
        std::iter::once(&self.own).chain(self.ancestors.iter())
    }

    pub(crate) fn into_parts(self) -> ClassParts<T> {
        ClassParts {
            name: self.own.name,
            is_abstract: self.is_abstract,
            annotations: self.annotations,
            constructors: self.constructors,
            hierarchy: std::iter::once(self.own).chain(self.ancestors).collect(),
        }
    }
}

impl<T> fmt::Debug for ComponentClass<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentClass")
            .field("name", &self.own.name)
            .field("is_abstract", &self.is_abstract)
            .field("annotations", &self.annotations)
            .field("constructors", &self.constructors)
            .field("own", &self.own)
            .field("ancestors", &self.ancestors)
            .finish()
    }
}

pub(crate) struct ClassParts<T> {
    pub(crate) name: &'static str,
    pub(crate) is_abstract: bool,
    pub(crate) annotations: Vec<AnnotationValue>,
    pub(crate) constructors: Vec<Constructor<T>>,
    /// 从自身开始向上
    pub(crate) hierarchy: Vec<ClassLayer<T>>,
}

/// 可由声明自动生成组件类的类型，通常由 `#[derive(Injectable)]` 实现
pub trait Injectable: Sized + Send + Sync + 'static {
    /// 组件类声明
    fn component_class() -> ComponentClass<Self>;
}
