use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum GinywowError {
    Validation(String),
    NotFound(String),
    Conflict(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Serialization(String),
    FileOperation(String),
}

impl GinywowError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            GinywowError::Validation(_) => "E001",
            GinywowError::NotFound(_) => "E002",
            GinywowError::Conflict(_) => "E003",
            GinywowError::DatabaseConfig(_) => "E004",
            GinywowError::DatabaseConnection(_) => "E005",
            GinywowError::DatabaseOperation(_) => "E006",
            GinywowError::Serialization(_) => "E007",
            GinywowError::FileOperation(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            GinywowError::Validation(_) => "Validation Error",
            GinywowError::NotFound(_) => "Resource Not Found",
            GinywowError::Conflict(_) => "Conflict",
            GinywowError::DatabaseConfig(_) => "Database Configuration Error",
            GinywowError::DatabaseConnection(_) => "Database Connection Error",
            GinywowError::DatabaseOperation(_) => "Database Operation Error",
            GinywowError::Serialization(_) => "Serialization Error",
            GinywowError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            GinywowError::Validation(msg)
            | GinywowError::NotFound(msg)
            | GinywowError::Conflict(msg)
            | GinywowError::DatabaseConfig(msg)
            | GinywowError::DatabaseConnection(msg)
            | GinywowError::DatabaseOperation(msg)
            | GinywowError::Serialization(msg)
            | GinywowError::FileOperation(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            GinywowError::Validation(_) => StatusCode::BAD_REQUEST,
            GinywowError::NotFound(_) => StatusCode::NOT_FOUND,
            GinywowError::Conflict(_) => StatusCode::CONFLICT,
            GinywowError::DatabaseConnection(_) => StatusCode::SERVICE_UNAVAILABLE,
            GinywowError::DatabaseConfig(_)
            | GinywowError::DatabaseOperation(_)
            | GinywowError::Serialization(_)
            | GinywowError::FileOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 是否为调用方输入导致的错误（4xx）
    pub fn is_client_error(&self) -> bool {
        self.http_status().is_client_error()
    }

    /// 格式化为彩色输出（用于 Server 模式）
    #[cfg(feature = "server")]
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for GinywowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GinywowError {}

// 便捷的构造函数
impl GinywowError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        GinywowError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        GinywowError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        GinywowError::Conflict(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        GinywowError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        GinywowError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        GinywowError::DatabaseOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        GinywowError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        GinywowError::FileOperation(msg.into())
    }
}

impl From<sea_orm::DbErr> for GinywowError {
    fn from(err: sea_orm::DbErr) -> Self {
        GinywowError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for GinywowError {
    fn from(err: std::io::Error) -> Self {
        GinywowError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for GinywowError {
    fn from(err: serde_json::Error) -> Self {
        GinywowError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GinywowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = GinywowError::validation("Please enter a valid email address");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "E001");
        assert_eq!(err.message(), "Please enter a valid email address");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_database_errors_are_server_errors() {
        let err = GinywowError::database_operation("boom");
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_client_error());

        let err = GinywowError::database_connection("down");
        assert_eq!(err.http_status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = GinywowError::conflict("This email is already subscribed");
        assert_eq!(
            err.to_string(),
            "Conflict: This email is already subscribed"
        );
    }

    #[test]
    fn test_from_db_err() {
        let err: GinywowError = sea_orm::DbErr::Custom("bad".to_string()).into();
        assert!(matches!(err, GinywowError::DatabaseOperation(_)));
    }
}
