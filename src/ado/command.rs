//! 数据库命令对象

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// 命令文本类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandType {
    /// 普通 SQL 文本
    Text,
    /// 存储过程名
    StoredProcedure,
}

/// 命令读写类别，决定走主库还是从库
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandKind {
    /// 只读查询，有从库时轮询从库
    Query,
    /// 写操作，总是走主库
    NonQuery,
}

/// 命令参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbParameter {
    pub name: String,
    pub value: serde_json::Value,
}

/// 数据库命令
///
/// 执行前监视器拿到可变引用，可以改写文本或参数；执行后监视器只读。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbCommand {
    id: Uuid,
    kind: CommandKind,
    created_at: DateTime<Utc>,
    /// 命令文本
    pub command_text: String,
    /// 命令文本类型
    pub command_type: CommandType,
    /// 有序命名参数
    pub parameters: Vec<DbParameter>,
    /// 执行超时，由驱动解释
    pub timeout: Option<Duration>,
}

impl DbCommand {
    /// 创建命令，每个命令拥有唯一标识
    pub fn new<S: Into<String>>(kind: CommandKind, command_text: S) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            created_at: Utc::now(),
            command_text: command_text.into(),
            command_type: CommandType::Text,
            parameters: Vec::new(),
            timeout: None,
        }
    }

    /// 只读查询命令
    pub fn query<S: Into<String>>(command_text: S) -> Self {
        Self::new(CommandKind::Query, command_text)
    }

    /// 写命令
    pub fn non_query<S: Into<String>>(command_text: S) -> Self {
        Self::new(CommandKind::NonQuery, command_text)
    }

    /// 追加命名参数
    pub fn with_parameter<N, V>(mut self, name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.parameters.push(DbParameter {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// 标记为存储过程调用
    pub fn stored_procedure(mut self) -> Self {
        self.command_type = CommandType::StoredProcedure;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 按名称查找参数
    pub fn parameter(&self, name: &str) -> Option<&serde_json::Value> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_construction() {
        let command = DbCommand::non_query("update users set name = @name where id = @id")
            .with_parameter("name", "bob")
            .with_parameter("id", 7)
            .with_timeout(Duration::from_secs(5));

        assert_eq!(command.kind(), CommandKind::NonQuery);
        assert_eq!(command.command_type, CommandType::Text);
        assert_eq!(command.parameter("name"), Some(&serde_json::json!("bob")));
        assert_eq!(command.parameter("id"), Some(&serde_json::json!(7)));
        assert_eq!(command.parameter("missing"), None);
        assert_eq!(command.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_command_ids_are_unique() {
        let a = DbCommand::query("select 1");
        let b = DbCommand::query("select 1");
        assert_ne!(a.id(), b.id());
        assert_eq!(DbCommand::query("p_report").stored_procedure().command_type, CommandType::StoredProcedure);
    }
}
