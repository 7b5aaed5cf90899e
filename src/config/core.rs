//! # 配置管理模块 - 核心配置类型
//!
//! 构建器的全部可序列化配置，支持从 TOML/JSON 文件加载。
//! 缓存、日志和监视器属于运行时能力，只能通过构建器注入。

use serde::{Deserialize, Serialize};
use std::path::Path;
use rat_logger::info;

use crate::config::builders::QuickSqlBuilder;
use crate::error::QuickSqlResult;
use crate::types::{CodeFirstOptions, DatabaseType};

/// 可持久化的构建配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickSqlConfig {
    /// 数据库类型
    pub db_type: DatabaseType,
    /// 主库连接串
    pub connection_string: String,
    /// 从库连接串
    #[serde(default)]
    pub slave_connection_strings: Vec<String>,
    /// CodeFirst 策略开关
    #[serde(default)]
    pub code_first: CodeFirstOptions,
}

impl QuickSqlConfig {
    pub fn new<S: Into<String>>(db_type: DatabaseType, connection_string: S) -> Self {
        Self {
            db_type,
            connection_string: connection_string.into(),
            slave_connection_strings: Vec::new(),
            code_first: CodeFirstOptions::default(),
        }
    }

    /// 从配置文件加载配置
    ///
    /// 扩展名为 `toml` 时按 TOML 解析，其余按 JSON 解析
    ///
    /// # 参数
    ///
    /// * `config_path` - 配置文件路径
    pub fn from_file<P: AsRef<Path>>(config_path: P) -> QuickSqlResult<Self> {
        let content = std::fs::read_to_string(config_path.as_ref())?;

        let config = if is_toml(config_path.as_ref()) {
            Self::from_toml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };

        info!("从文件加载配置: {:?}", config_path.as_ref());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> QuickSqlResult<Self> {
        toml::from_str(content)
            .map_err(|e| crate::quick_error!(config, format!("解析TOML配置失败: {}", e)))
    }

    pub fn from_json_str(content: &str) -> QuickSqlResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| crate::quick_error!(config, format!("解析JSON配置失败: {}", e)))
    }

    /// 保存配置到文件
    ///
    /// # 参数
    ///
    /// * `config_path` - 配置文件路径
    pub fn save_to_file<P: AsRef<Path>>(&self, config_path: P) -> QuickSqlResult<()> {
        let content = if is_toml(config_path.as_ref()) {
            toml::to_string_pretty(self)
                .map_err(|e| crate::quick_error!(serialization, format!("序列化TOML配置失败: {}", e)))?
        } else {
            serde_json::to_string_pretty(self)
                .map_err(|e| crate::quick_error!(serialization, format!("序列化JSON配置失败: {}", e)))?
        };

        std::fs::write(config_path.as_ref(), content)?;
        info!("保存配置到文件: {:?}", config_path.as_ref());
        Ok(())
    }

    /// 以此配置创建构建器
    pub fn builder(&self) -> QuickSqlBuilder {
        QuickSqlBuilder::from_config(self)
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("toml")
}
