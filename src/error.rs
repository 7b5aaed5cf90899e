//! 错误类型定义
//!
//! 统一的错误枚举与便捷构造宏，错误消息通过 i18n 模块本地化

use thiserror::Error;

/// rat_quicksql 错误类型
#[derive(Error, Debug)]
pub enum QuickSqlError {
    /// 配置错误（未设置连接、配置文件非法等）
    #[error("{message}")]
    ConfigError { message: String },

    /// 不支持或未注册的数据库类型
    #[error("{}", unsupported_message(.db_type))]
    UnsupportedDatabase { db_type: String },

    /// 连接错误（连接串非法、未绑定驱动）
    #[error("{message}")]
    ConnectionError { message: String },

    /// 命令执行错误，由驱动返回
    #[error("{message}")]
    CommandError { message: String },

    /// 缓存错误
    #[error("{message}")]
    CacheError { message: String },

    /// 序列化错误
    #[error("{message}")]
    SerializationError { message: String },

    /// IO 错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

fn unsupported_message(db_type: &str) -> String {
    crate::i18n::tf("error.unsupported_database", &[("db_type", db_type)])
}

/// 结果类型别名
pub type QuickSqlResult<T> = Result<T, QuickSqlError>;

/// 便捷错误构造宏
///
/// ```ignore
/// quick_error!(config, "未指定 use_connection_string");
/// quick_error!(unsupported_db, "oracle");
/// ```
#[macro_export]
macro_rules! quick_error {
    (config, $msg:expr) => {
        $crate::error::QuickSqlError::ConfigError {
            message: $crate::i18n::tf("error.config", &[("message", &$msg.to_string())]),
        }
    };
    (unsupported_db, $db_type:expr) => {
        $crate::error::QuickSqlError::UnsupportedDatabase {
            db_type: $db_type.to_string(),
        }
    };
    (connection, $msg:expr) => {
        $crate::error::QuickSqlError::ConnectionError {
            message: $crate::i18n::tf("error.connection", &[("message", &$msg.to_string())]),
        }
    };
    (command, $msg:expr) => {
        $crate::error::QuickSqlError::CommandError {
            message: $crate::i18n::tf("error.command", &[("message", &$msg.to_string())]),
        }
    };
    (cache, $msg:expr) => {
        $crate::error::QuickSqlError::CacheError {
            message: $crate::i18n::tf("error.cache", &[("message", &$msg.to_string())]),
        }
    };
    (serialization, $msg:expr) => {
        $crate::error::QuickSqlError::SerializationError {
            message: $crate::i18n::tf("error.serialization", &[("message", &$msg.to_string())]),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_error_variants() {
        crate::init();

        let err = crate::quick_error!(config, "缺少连接");
        assert!(matches!(err, QuickSqlError::ConfigError { .. }));

        let err = crate::quick_error!(unsupported_db, "db2");
        match &err {
            QuickSqlError::UnsupportedDatabase { db_type } => assert_eq!(db_type, "db2"),
            other => panic!("意外的错误类型: {:?}", other),
        }

        let io: QuickSqlError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(io, QuickSqlError::IoError(_)));
    }
}
