//! `#[derive(Injectable)]` 与容器的集成测试

use component_macros::Injectable;
use di_abstractions::{
    implements, AnnotationKind, AnnotationValue, ComponentKey, DependencyError, Injectable as _,
    Lazy, Named,
};
use di_impl::ContextConfig;
use std::sync::Arc;

pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

pub trait Repository: Send + Sync {
    fn name(&self) -> &str;
}

struct FixedClock(u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

implements!(FixedClock: dyn Clock);

struct NamedRepository(&'static str);

impl Repository for NamedRepository {
    fn name(&self) -> &str {
        self.0
    }
}

implements!(NamedRepository: dyn Repository);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Region {
    West,
}

impl di_abstractions::Annotation for Region {
    const KIND: AnnotationKind = AnnotationKind::Qualifier;
}

#[derive(Injectable)]
struct ReportService {
    #[named("primary")]
    primary: Arc<dyn Repository>,
    #[qualifier(Region::West)]
    regional: Arc<dyn Repository>,
    clock: Lazy<dyn Clock>,
}

#[derive(Injectable)]
#[component(singleton, name = "audit")]
struct AuditTrail(Arc<dyn Clock>);

#[derive(Injectable)]
struct Heartbeat;

fn base_config() -> ContextConfig {
    let mut config = ContextConfig::new();
    config
        .bind_instance::<dyn Clock>(Arc::new(FixedClock(42)), &[])
        .unwrap();
    config
        .bind_instance::<dyn Repository>(
            Arc::new(NamedRepository("primary")),
            &[Named::new("primary").into()],
        )
        .unwrap();
    config
        .bind_instance::<dyn Repository>(Arc::new(NamedRepository("west")), &[Region::West.into()])
        .unwrap();
    config
}

#[test]
fn test_fields_are_injected_with_qualifiers() {
    let mut config = base_config();
    config.bind_injectable::<ReportService, ReportService>(&[]).unwrap();

    let context = config.build().unwrap();
    let service = context.get::<Arc<ReportService>>().unwrap().unwrap();

    assert_eq!(service.primary.name(), "primary");
    assert_eq!(service.regional.name(), "west");
    assert_eq!(service.clock.get().unwrap().now(), 42);
}

#[test]
fn test_generated_class_lists_dependencies() {
    let class = ReportService::component_class();

    assert_eq!(class.name(), "ReportService");
    assert_eq!(class.constructors().len(), 1);
    assert!(class.constructors()[0].is_injected());
    assert_eq!(class.constructors()[0].parameters().len(), 3);
    assert_eq!(
        class.constructors()[0].parameters()[1].annotations(),
        &[AnnotationValue::from(Region::West)]
    );
}

#[test]
fn test_missing_qualified_dependency_is_reported() {
    let mut config = ContextConfig::new();
    config
        .bind_instance::<dyn Clock>(Arc::new(FixedClock(1)), &[])
        .unwrap();
    config.bind_injectable::<ReportService, ReportService>(&[]).unwrap();

    assert!(matches!(
        config.build(),
        Err(DependencyError::DependencyNotFound { dependency, .. })
            if dependency == ComponentKey::qualified::<dyn Repository>(Named::new("primary"))
    ));
}

#[test]
fn test_component_attribute_declares_singleton_scope() {
    let mut config = base_config();
    config.bind_injectable::<AuditTrail, AuditTrail>(&[]).unwrap();

    let context = config.build().unwrap();
    let first = context.get::<Arc<AuditTrail>>().unwrap().unwrap();
    let second = context.get::<Arc<AuditTrail>>().unwrap().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.0.now(), 42);
    assert_eq!(AuditTrail::component_class().name(), "audit");
}

#[test]
fn test_unit_struct_has_default_constructor() {
    let mut config = ContextConfig::new();
    config.bind_injectable::<Heartbeat, Heartbeat>(&[]).unwrap();

    let context = config.build().unwrap();

    assert!(context.get::<Arc<Heartbeat>>().unwrap().is_some());
    assert!(!Heartbeat::component_class().constructors()[0].is_injected());
}
