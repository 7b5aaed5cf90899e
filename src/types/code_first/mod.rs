use serde::{Deserialize, Serialize};

/// CodeFirst 策略开关
///
/// 构建器在 `build` 时把这组值复制到提供者自己的 [`CodeFirst`](crate::provider::CodeFirst) 上，
/// 之后二者互不影响。所有开关默认关闭。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeFirstOptions {
    /// 运行时检查实体表是否存在，然后创建或修改（开发环境必备）
    pub auto_sync_structure: bool,
    /// 同步结构时转小写
    pub sync_structure_to_lower: bool,
    /// 同步结构时转大写
    pub sync_structure_to_upper: bool,
    /// 使用数据库的主键和自增（DbFirst 模式）
    pub config_entity_from_db_first: bool,
    /// 不使用命令参数化执行，针对 Insert/Update
    pub none_command_parameter: bool,
    /// 延时加载导航属性
    pub lazy_loading: bool,
}

impl CodeFirstOptions {
    /// 大小写转换开关是否同时打开
    ///
    /// 两者同时打开时由结构同步引擎决定优先级，这里只做检测
    pub fn has_case_conflict(&self) -> bool {
        self.sync_structure_to_lower && self.sync_structure_to_upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_all_false() {
        let options = CodeFirstOptions::default();
        assert!(!options.auto_sync_structure);
        assert!(!options.sync_structure_to_lower);
        assert!(!options.sync_structure_to_upper);
        assert!(!options.config_entity_from_db_first);
        assert!(!options.none_command_parameter);
        assert!(!options.lazy_loading);
        assert!(!options.has_case_conflict());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let options: CodeFirstOptions = toml::from_str("lazy_loading = true").unwrap();
        assert!(options.lazy_loading);
        assert!(!options.auto_sync_structure);
    }
}
