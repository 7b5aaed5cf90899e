//! CodeFirst 策略面
//!
//! 提供者构造后可被多线程并发读取和修改，开关使用原子布尔

use std::sync::atomic::{AtomicBool, Ordering};

use crate::types::CodeFirstOptions;

/// 提供者自己持有的策略开关
///
/// 结构同步引擎与延时加载代理读取这里的值。大小写转换的两个开关同时打开时，
/// 优先级由结构同步引擎决定。
#[derive(Debug, Default)]
pub struct CodeFirst {
    auto_sync_structure: AtomicBool,
    sync_structure_to_lower: AtomicBool,
    sync_structure_to_upper: AtomicBool,
    config_entity_from_db_first: AtomicBool,
    none_command_parameter: AtomicBool,
    lazy_loading: AtomicBool,
}

impl CodeFirst {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按选项整体写入
    pub fn apply(&self, options: &CodeFirstOptions) {
        self.set_auto_sync_structure(options.auto_sync_structure);
        self.set_sync_structure_to_lower(options.sync_structure_to_lower);
        self.set_sync_structure_to_upper(options.sync_structure_to_upper);
        self.set_config_entity_from_db_first(options.config_entity_from_db_first);
        self.set_none_command_parameter(options.none_command_parameter);
        self.set_lazy_loading(options.lazy_loading);
    }

    /// 当前值快照
    pub fn snapshot(&self) -> CodeFirstOptions {
        CodeFirstOptions {
            auto_sync_structure: self.is_auto_sync_structure(),
            sync_structure_to_lower: self.is_sync_structure_to_lower(),
            sync_structure_to_upper: self.is_sync_structure_to_upper(),
            config_entity_from_db_first: self.is_config_entity_from_db_first(),
            none_command_parameter: self.is_none_command_parameter(),
            lazy_loading: self.is_lazy_loading(),
        }
    }

    pub fn is_auto_sync_structure(&self) -> bool {
        self.auto_sync_structure.load(Ordering::Acquire)
    }

    pub fn set_auto_sync_structure(&self, value: bool) {
        self.auto_sync_structure.store(value, Ordering::Release);
    }

    pub fn is_sync_structure_to_lower(&self) -> bool {
        self.sync_structure_to_lower.load(Ordering::Acquire)
    }

    pub fn set_sync_structure_to_lower(&self, value: bool) {
        self.sync_structure_to_lower.store(value, Ordering::Release);
    }

    pub fn is_sync_structure_to_upper(&self) -> bool {
        self.sync_structure_to_upper.load(Ordering::Acquire)
    }

    pub fn set_sync_structure_to_upper(&self, value: bool) {
        self.sync_structure_to_upper.store(value, Ordering::Release);
    }

    pub fn is_config_entity_from_db_first(&self) -> bool {
        self.config_entity_from_db_first.load(Ordering::Acquire)
    }

    pub fn set_config_entity_from_db_first(&self, value: bool) {
        self.config_entity_from_db_first.store(value, Ordering::Release);
    }

    pub fn is_none_command_parameter(&self) -> bool {
        self.none_command_parameter.load(Ordering::Acquire)
    }

    pub fn set_none_command_parameter(&self, value: bool) {
        self.none_command_parameter.store(value, Ordering::Release);
    }

    pub fn is_lazy_loading(&self) -> bool {
        self.lazy_loading.load(Ordering::Acquire)
    }

    pub fn set_lazy_loading(&self, value: bool) {
        self.lazy_loading.store(value, Ordering::Release);
    }
}
