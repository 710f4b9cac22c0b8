//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that maps puzzle failures to process exit codes.

use serde::Serialize;

/// エラー種別の列挙体
///
/// パズルの生成・求解・検証で発生するエラー分類を定義します。
/// 各バリアントは sysexits(3) に準拠した終了コードにマッピングされます。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
/// * 検証失敗はエラーではなく `bool` の結果として扱うため、ここには含まれない
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::InvalidDifficulty;
/// assert_eq!(kind.exit_code(), 64);
/// assert_eq!(kind.as_str(), "Invalid Difficulty");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 64 - 空の data / key など、呼び出し側の入力が不正
    InvalidInput,
    /// 64 - 難易度ビット数がサポート範囲外
    InvalidDifficulty,
    /// 64 - 長さ `l` がバイト境界に揃っていない、または範囲外
    InvalidLength,
    /// 65 - 全探索を尽くしても解が見つからない（生成側との不整合）
    SolutionNotFound,
    /// 70 - 内部エラー（I/O、シリアライズなど）
    Internal,
}

impl ErrorKind {
    /// プロセス終了コードを取得
    ///
    /// ## Returns
    /// sysexits(3) に準拠した終了コード
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::InvalidInput.exit_code(), 64);
    /// assert_eq!(ErrorKind::SolutionNotFound.exit_code(), 65);
    /// ```
    #[inline]
    pub const fn exit_code(&self) -> u8 {
        match self {
            ErrorKind::InvalidInput | ErrorKind::InvalidDifficulty | ErrorKind::InvalidLength => 64,
            ErrorKind::SolutionNotFound => 65,
            ErrorKind::Internal => 70,
        }
    }

    /// ユーザー向けの文字列表現を取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::InvalidLength.as_str(), "Invalid Length");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "Invalid Input",
            ErrorKind::InvalidDifficulty => "Invalid Difficulty",
            ErrorKind::InvalidLength => "Invalid Length",
            ErrorKind::SolutionNotFound => "Solution Not Found",
            ErrorKind::Internal => "Internal Error",
        }
    }

    /// 呼び出し側の誤りかどうかを判定
    ///
    /// 入力パラメータの検証エラーは `true` を返します。
    #[inline]
    pub const fn is_caller_error(&self) -> bool {
        self.exit_code() == 64
    }

    /// 障害（生成側との不整合や内部エラー）かどうかを判定
    ///
    /// これらのエラーはログに記録すべきです。
    #[inline]
    pub const fn is_fault(&self) -> bool {
        !self.is_caller_error()
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
