//! 多语言错误消息模块
//!
//! 使用rat_embed_lang框架提供统一的错误消息多语言支持

use std::collections::HashMap;
use std::sync::Once;
use rat_embed_lang::register_translations;

static INIT: Once = Once::new();

/// 错误消息翻译注册器
pub struct ErrorMessageI18n;

impl ErrorMessageI18n {
    /// 注册所有错误消息翻译
    pub fn register_all_translations() {
        let mut translations = HashMap::new();

        // 配置错误
        let mut config_errors = HashMap::new();
        config_errors.insert("zh-CN".to_string(), "配置错误: {message}".to_string());
        config_errors.insert("en-US".to_string(), "Configuration error: {message}".to_string());
        config_errors.insert("ja-JP".to_string(), "設定エラー: {message}".to_string());
        translations.insert("error.config".to_string(), config_errors);

        // 未调用 use_connection_string
        let mut no_connection = HashMap::new();
        no_connection.insert("zh-CN".to_string(), "未指定 use_connection_string".to_string());
        no_connection.insert("en-US".to_string(), "No connection configured, call use_connection_string first".to_string());
        no_connection.insert("ja-JP".to_string(), "use_connection_string が指定されていません".to_string());
        translations.insert("error.no_connection".to_string(), no_connection);

        // 不支持的数据库类型
        let mut unsupported_db_errors = HashMap::new();
        unsupported_db_errors.insert("zh-CN".to_string(), "不支持的数据库类型: {db_type}".to_string());
        unsupported_db_errors.insert("en-US".to_string(), "Unsupported database type: {db_type}".to_string());
        unsupported_db_errors.insert("ja-JP".to_string(), "サポートされていないデータベースタイプ: {db_type}".to_string());
        translations.insert("error.unsupported_database".to_string(), unsupported_db_errors);

        // 数据库连接错误
        let mut connection_errors = HashMap::new();
        connection_errors.insert("zh-CN".to_string(), "数据库连接失败: {message}".to_string());
        connection_errors.insert("en-US".to_string(), "Database connection failed: {message}".to_string());
        connection_errors.insert("ja-JP".to_string(), "データベース接続に失敗しました: {message}".to_string());
        translations.insert("error.connection".to_string(), connection_errors);

        // 连接串为空
        let mut empty_connection_string = HashMap::new();
        empty_connection_string.insert("zh-CN".to_string(), "{db_type} 连接串不能为空".to_string());
        empty_connection_string.insert("en-US".to_string(), "{db_type} connection string must not be empty".to_string());
        empty_connection_string.insert("ja-JP".to_string(), "{db_type} の接続文字列は空にできません".to_string());
        translations.insert("error.connection_string_empty".to_string(), empty_connection_string);

        // 连接串片段格式错误
        let mut malformed_connection_string = HashMap::new();
        malformed_connection_string.insert("zh-CN".to_string(), "{db_type} 连接串第 {position} 段格式错误".to_string());
        malformed_connection_string.insert("en-US".to_string(), "Malformed {db_type} connection string at segment {position}".to_string());
        malformed_connection_string.insert("ja-JP".to_string(), "{db_type} 接続文字列の第 {position} 区間の形式が不正です".to_string());
        translations.insert("error.connection_string_malformed".to_string(), malformed_connection_string);

        // 连接串缺少主机
        let mut missing_host = HashMap::new();
        missing_host.insert("zh-CN".to_string(), "{db_type} 连接串缺少服务器地址".to_string());
        missing_host.insert("en-US".to_string(), "{db_type} connection string has no server/host".to_string());
        missing_host.insert("ja-JP".to_string(), "{db_type} 接続文字列にサーバーアドレスがありません".to_string());
        translations.insert("error.connection_string_missing_host".to_string(), missing_host);

        // 端口非法
        let mut invalid_port = HashMap::new();
        invalid_port.insert("zh-CN".to_string(), "{db_type} 连接串端口非法".to_string());
        invalid_port.insert("en-US".to_string(), "Invalid {db_type} connection string port".to_string());
        invalid_port.insert("ja-JP".to_string(), "{db_type} 接続文字列のポートが不正です".to_string());
        translations.insert("error.connection_string_port".to_string(), invalid_port);

        // URL 协议与方言不匹配
        let mut scheme_mismatch = HashMap::new();
        scheme_mismatch.insert("zh-CN".to_string(), "连接串协议 '{scheme}' 与数据库类型 {db_type} 不匹配".to_string());
        scheme_mismatch.insert("en-US".to_string(), "Connection string scheme '{scheme}' does not match database type {db_type}".to_string());
        scheme_mismatch.insert("ja-JP".to_string(), "接続文字列のスキーム '{scheme}' がデータベースタイプ {db_type} と一致しません".to_string());
        translations.insert("error.connection_string_scheme".to_string(), scheme_mismatch);

        // 未绑定驱动
        let mut driver_not_attached = HashMap::new();
        driver_not_attached.insert("zh-CN".to_string(), "{db_type} 提供者尚未绑定驱动".to_string());
        driver_not_attached.insert("en-US".to_string(), "No driver attached for {db_type} provider".to_string());
        driver_not_attached.insert("ja-JP".to_string(), "{db_type} プロバイダーにドライバーが接続されていません".to_string());
        translations.insert("error.driver_not_attached".to_string(), driver_not_attached);

        // 命令执行错误
        let mut command_errors = HashMap::new();
        command_errors.insert("zh-CN".to_string(), "命令执行失败: {message}".to_string());
        command_errors.insert("en-US".to_string(), "Command execution failed: {message}".to_string());
        command_errors.insert("ja-JP".to_string(), "コマンド実行が失敗しました: {message}".to_string());
        translations.insert("error.command".to_string(), command_errors);

        // 缓存错误
        let mut cache_errors = HashMap::new();
        cache_errors.insert("zh-CN".to_string(), "缓存操作失败: {message}".to_string());
        cache_errors.insert("en-US".to_string(), "Cache operation failed: {message}".to_string());
        cache_errors.insert("ja-JP".to_string(), "キャッシュ操作が失敗しました: {message}".to_string());
        translations.insert("error.cache".to_string(), cache_errors);

        // 序列化错误
        let mut serialization_errors = HashMap::new();
        serialization_errors.insert("zh-CN".to_string(), "数据序列化失败: {message}".to_string());
        serialization_errors.insert("en-US".to_string(), "Data serialization failed: {message}".to_string());
        serialization_errors.insert("ja-JP".to_string(), "データシリアライズが失敗しました: {message}".to_string());
        translations.insert("error.serialization".to_string(), serialization_errors);

        // 注册所有翻译
        register_translations(translations);
    }

    /// 初始化错误消息多语言支持
    ///
    /// 多次调用只会注册一次
    pub fn init() {
        INIT.call_once(|| {
            Self::register_all_translations();

            // 从环境变量获取语言设置，默认为zh-CN
            let lang = std::env::var("RAT_LANG")
                .or_else(|_| std::env::var("LANG"))
                .unwrap_or_else(|_| "zh-CN".to_string());

            // 标准化语言代码
            use rat_embed_lang::normalize_language_code;
            let normalized_lang = normalize_language_code(&lang);
            set_language(&normalized_lang);
        });
    }
}

/// 重新导出rat_embed_lang的核心函数
pub use rat_embed_lang::{t, tf, set_language, current_language};
