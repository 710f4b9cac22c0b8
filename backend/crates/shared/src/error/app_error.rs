//! Application Error - Unified error type for the workspace
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// アプリケーション統一エラー型
///
/// ワークスペース全体で使用する標準エラー型です。
/// ビルダーパターンを使用してエラーを構築できます。
///
/// ## Fields
/// * `kind` - エラーの分類（終了コードにマッピング）
/// * `message` - ユーザー向けのエラーメッセージ
/// * `hint` - ユーザーが取るべき対処（オプション）
/// * `source` - 元のエラー（オプション、デバッグ用）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// // シンプルなエラー
/// let err = AppError::new(ErrorKind::InvalidInput, "key must not be empty");
///
/// // 詳細なエラー
/// let err = AppError::invalid_length("l must be a multiple of 16")
///     .with_hint("try -l 64");
/// ```
pub struct AppError {
    /// エラー種別
    kind: ErrorKind,
    /// ユーザー向けメッセージ
    message: Cow<'static, str>,
    /// ユーザーが取るべき対処
    hint: Option<Cow<'static, str>>,
    /// 元のエラー（デバッグ用）
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// アプリケーション結果型エイリアス
///
/// `Result<T, AppError>` の省略形です。
///
/// ## Examples
/// ```rust
/// use kernel::error::app_error::{AppError, AppResult};
///
/// fn subpuzzles(k: u8) -> AppResult<u8> {
///     if k == 0 {
///         return Err(AppError::invalid_input("k must be positive"));
///     }
///     Ok(k)
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 新しいエラーを作成
    ///
    /// ## Arguments
    /// * `kind` - エラー種別
    /// * `message` - ユーザー向けメッセージ
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            hint: None,
            source: None,
        }
    }

    // ========================================================================
    // Convenience constructors
    // ========================================================================

    /// 入力不正エラー
    #[inline]
    pub fn invalid_input(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    /// 難易度不正エラー
    #[inline]
    pub fn invalid_difficulty(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidDifficulty, message)
    }

    /// 長さ不正エラー
    #[inline]
    pub fn invalid_length(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidLength, message)
    }

    /// 解が見つからないエラー
    #[inline]
    pub fn solution_not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::SolutionNotFound, message)
    }

    /// 内部エラー
    #[inline]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// ユーザー向けの対処を設定
    #[inline]
    pub fn with_hint(mut self, hint: impl Into<Cow<'static, str>>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// 元のエラーを設定（デバッグ用）
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::app_error::{AppError, AppResult};
    ///
    /// fn read_key() -> AppResult<String> {
    ///     std::fs::read_to_string("server.key")
    ///         .map_err(|e| AppError::internal("Failed to read key").with_source(e))
    /// }
    /// ```
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// エラー種別を取得
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 終了コードを取得
    #[inline]
    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }

    /// メッセージを取得
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 対処を取得
    #[inline]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// 障害かどうか
    #[inline]
    pub fn is_fault(&self) -> bool {
        self.kind.is_fault()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if let Some(hint) = &self.hint {
            builder.field("hint", hint);
        }
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (Hint: {})", hint)?;
        }
        Ok(())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

// ============================================================================
// Result extension traits
// ============================================================================

/// `Result<T, E>` を `AppResult<T>` に変換するための拡張トレイト
pub trait ResultExt<T, E> {
    /// エラーを `AppError` に変換し、指定した種別とメッセージでラップ
    fn map_app_err(self, kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> AppResult<T>
    where
        E: Error + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn map_app_err(self, kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> AppResult<T>
    where
        E: Error + Send + Sync + 'static,
    {
        self.map_err(|e| AppError::new(kind, message).with_source(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::InvalidInput, "data must not be empty");
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.exit_code(), 64);
        assert_eq!(err.message(), "data must not be empty");
        assert!(err.hint().is_none());
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(AppError::invalid_input("test").kind(), ErrorKind::InvalidInput);
        assert_eq!(
            AppError::invalid_difficulty("test").kind(),
            ErrorKind::InvalidDifficulty
        );
        assert_eq!(AppError::invalid_length("test").kind(), ErrorKind::InvalidLength);
        assert_eq!(AppError::solution_not_found("test").exit_code(), 65);
        assert_eq!(AppError::internal("test").exit_code(), 70);
    }

    #[test]
    fn test_with_hint() {
        let err = AppError::invalid_length("bad l").with_hint("use a multiple of 16");
        assert_eq!(err.hint(), Some("use a multiple of 16"));
    }

    #[test]
    fn test_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = AppError::internal("Failed to write solution").with_source(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display() {
        let err = AppError::invalid_input("key must not be empty");
        assert_eq!(err.to_string(), "[Invalid Input] key must not be empty");

        let err_with_hint = AppError::invalid_difficulty("m = 17").with_hint("use m <= 16");
        assert!(err_with_hint.to_string().contains("Hint:"));
    }

    #[test]
    fn test_is_fault() {
        assert!(!AppError::invalid_input("test").is_fault());
        assert!(AppError::solution_not_found("test").is_fault());
    }

    #[test]
    fn test_result_ext() {
        let result: Result<u8, std::num::ParseIntError> = "300".parse::<u8>();
        let app_result = result.map_app_err(ErrorKind::InvalidInput, "k must fit in a byte");
        let err = app_result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.source().is_some());
    }
}
