//! 日志能力
//!
//! 提供者通过 [`SqlLogger`] 输出日志，调用方可注入任意实现；
//! 未注入时使用转发到 rat_logger 的 [`RatLoggerSink`]。
//!
//! 注意：rat_logger 的初始化由调用者负责，本库不会自动初始化日志

use serde::{Deserialize, Serialize};

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    /// 错误级别
    Error,
    /// 警告级别
    Warn,
    /// 信息级别
    Info,
    /// 调试级别
    Debug,
    /// 跟踪级别
    Trace,
}

/// 分级日志能力
pub trait SqlLogger: Send + Sync {
    /// 输出一条日志
    fn log(&self, level: LogLevel, message: &str);

    /// 该级别是否会被输出，用于跳过昂贵的日志拼接
    fn is_enabled(&self, _level: LogLevel) -> bool {
        true
    }

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// 转发到 rat_logger 全局日志器
#[derive(Debug, Clone, Copy, Default)]
pub struct RatLoggerSink;

impl SqlLogger for RatLoggerSink {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => {
                rat_logger::error!("{}", message);
            }
            LogLevel::Warn => {
                rat_logger::warn!("{}", message);
            }
            LogLevel::Info => {
                rat_logger::info!("{}", message);
            }
            // trace 与 debug 共用输出
            LogLevel::Debug | LogLevel::Trace => {
                rat_logger::debug!("{}", message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Collecting {
        lines: Mutex<Vec<(LogLevel, String)>>,
    }

    impl SqlLogger for Collecting {
        fn log(&self, level: LogLevel, message: &str) {
            self.lines.lock().push((level, message.to_string()));
        }
    }

    #[test]
    fn test_default_helpers_route_levels() {
        let logger = Collecting::default();
        logger.debug("a");
        logger.info("b");
        logger.warn("c");
        logger.error("d");

        let lines = logger.lines.lock();
        let levels: Vec<LogLevel> = lines.iter().map(|(level, _)| *level).collect();
        assert_eq!(levels, vec![LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error]);
        assert!(logger.is_enabled(LogLevel::Trace));
    }

    #[test]
    fn test_rat_logger_sink_does_not_panic_without_init() {
        RatLoggerSink.log(LogLevel::Info, "未初始化时也应安全");
    }
}
