//! 缓存层
//!
//! 提供统一的 ObjectCache 抽象，具体后端（Moka/Redis）通过
//! `declare_object_cache_plugin!` 宏在启动时注册到插件表。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 注册一个对象缓存插件
///
/// 在编译单元加载时（ctor）将构造函数注册到全局插件表，
/// 运行时根据配置中的 `cache.type` 选择后端。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $cache:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $cache:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            let cache = $cache::new().map_err(|e| {
                                $crate::errors::HackSystemError::cache_connection(e)
                            })?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        })
                            as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
