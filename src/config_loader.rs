use crate::indicator::macd::MACDParams;
use chrono::NaiveDate;
use log::{debug, error, warn};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 설정 로드 오류
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 오류
    FileError(String),
    /// 파싱 오류
    ParseError(String),
    /// 유효성 검사 오류
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileError(msg) => write!(f, "설정 파일 오류: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "설정 파싱 오류: {}", msg),
            ConfigError::ValidationError(msg) => write!(f, "설정 유효성 검사 오류: {}", msg),
        }
    }
}

/// String으로 ConfigError 변환
impl From<ConfigError> for String {
    fn from(err: ConfigError) -> Self {
        err.to_string()
    }
}

/// 설정 로드 결과
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 설정 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON 형식
    Json,
    /// TOML 형식
    Toml,
    /// 자동 감지 (파일 확장자로부터)
    Auto,
}

/// 설정 유효성 검사 트레이트
pub trait ConfigValidation {
    /// 설정 유효성 검사
    fn validate(&self) -> ConfigResult<()>;
}

/// 설정 파일 로더
#[derive(Debug)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// 파일에서 설정 로드
    ///
    /// # Arguments
    /// * `path` - 설정 파일 경로
    /// * `format` - 설정 파일 형식 (기본값: Auto)
    ///
    /// # Returns
    /// * `ConfigResult<T>` - 설정 객체 또는 오류
    pub fn load_from_file<T>(path: &Path, format: ConfigFormat) -> ConfigResult<T>
    where
        T: DeserializeOwned + ConfigValidation,
    {
        debug!("설정 파일 로드 시작: {}", path.display());

        let format = if format == ConfigFormat::Auto {
            Self::detect_format(path)?
        } else {
            format
        };

        let mut file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                error!("설정 파일 열기 실패: {} - {}", path.display(), e);
                return Err(ConfigError::FileError(format!("파일 열기 실패: {}", e)));
            }
        };

        let mut content = String::new();
        if let Err(e) = file.read_to_string(&mut content) {
            error!("설정 파일 읽기 실패: {} - {}", path.display(), e);
            return Err(ConfigError::FileError(format!("파일 읽기 실패: {}", e)));
        }

        let config: T = match format {
            ConfigFormat::Json => serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("JSON 파싱 실패: {}", e)))?,
            ConfigFormat::Toml => toml::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("TOML 파싱 실패: {}", e)))?,
            ConfigFormat::Auto => unreachable!("형식은 위에서 확정됨"),
        };

        config.validate()?;
        debug!("설정 파일 로드 완료: {}", path.display());

        Ok(config)
    }

    /// 파일 확장자로부터 설정 형식 감지
    ///
    /// # Arguments
    /// * `path` - 설정 파일 경로
    ///
    /// # Returns
    /// * `ConfigResult<ConfigFormat>` - 감지된 형식 또는 오류
    fn detect_format(path: &Path) -> ConfigResult<ConfigFormat> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => Err(ConfigError::FileError(format!(
                "지원되지 않는 설정 파일 확장자: {}",
                path.display()
            ))),
        }
    }
}

/// 기본 분석 설정
///
/// 설정 파일이 없을 때 사용하는 프로세스 전역 기본값입니다.
pub static DEFAULT_ANALYSIS_CONFIG: Lazy<AnalysisConfig> = Lazy::new(AnalysisConfig::default);

/// 종목 분석 설정
///
/// 분석 대상 종목과 조회 기간, 각 지표의 윈도우 매개변수를 담습니다.
/// 생략된 필드는 기본값으로 채워집니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// 분석 대상 종목 식별자 목록
    pub tickers: Vec<String>,
    /// 조회 시작일
    pub start_date: NaiveDate,
    /// 조회 종료일
    pub end_date: NaiveDate,
    /// 볼린저 밴드 계산 기간
    pub bollinger_period: usize,
    /// 볼린저 밴드 표준편차 승수
    pub bollinger_multiplier: f64,
    /// MACD 계산 매개변수
    pub macd: MACDParams,
    /// RSI 계산 기간
    pub rsi_period: usize,
    /// ATR 계산 기간
    pub atr_period: usize,
    /// 연환산 변동성 롤링 윈도우
    pub volatility_window: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            tickers: [
                "AAPL", "GOOGL", "MSFT", "AMZN", "DIS", "JPM", "TSLA", "NFLX", "NVDA", "WMT",
                "IBM", "GE", "CSCO",
            ]
            .iter()
            .map(|ticker| ticker.to_string())
            .collect(),
            start_date: NaiveDate::from_ymd_opt(2000, 1, 1).expect("유효한 기본 시작일"),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 9).expect("유효한 기본 종료일"),
            bollinger_period: 20,
            bollinger_multiplier: 2.0,
            macd: MACDParams::default(),
            rsi_period: 14,
            atr_period: 14,
            volatility_window: 252,
        }
    }
}

impl AnalysisConfig {
    /// 파일에서 분석 설정 로드 (형식 자동 감지)
    ///
    /// # Arguments
    /// * `path` - 설정 파일 경로
    ///
    /// # Returns
    /// * `ConfigResult<AnalysisConfig>` - 설정 객체 또는 오류
    pub fn load(path: &Path) -> ConfigResult<AnalysisConfig> {
        ConfigLoader::load_from_file(path, ConfigFormat::Auto)
    }

    /// 파일에서 분석 설정 로드, 실패 시 기본 설정 사용
    pub fn load_or_default(path: &Path) -> AnalysisConfig {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("설정 로드 실패, 기본 설정 사용: {}", e);
                DEFAULT_ANALYSIS_CONFIG.clone()
            }
        }
    }
}

impl ConfigValidation for AnalysisConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.tickers.is_empty() {
            return Err(ConfigError::ValidationError(
                "종목 목록이 비어 있습니다".to_string(),
            ));
        }

        if self.start_date >= self.end_date {
            return Err(ConfigError::ValidationError(format!(
                "시작일은 종료일보다 빨라야 합니다: {} >= {}",
                self.start_date, self.end_date
            )));
        }

        if self.bollinger_period == 0
            || self.macd.fast_period == 0
            || self.macd.slow_period == 0
            || self.macd.signal_period == 0
            || self.rsi_period == 0
            || self.atr_period == 0
            || self.volatility_window == 0
        {
            return Err(ConfigError::ValidationError(
                "모든 지표 기간은 0보다 커야 합니다".to_string(),
            ));
        }

        if self.bollinger_multiplier <= 0.0 {
            return Err(ConfigError::ValidationError(
                "볼린저 밴드 승수는 0보다 커야 합니다".to_string(),
            ));
        }

        if self.macd.fast_period >= self.macd.slow_period {
            return Err(ConfigError::ValidationError(format!(
                "MACD 빠른 기간은 느린 기간보다 작아야 합니다: {} >= {}",
                self.macd.fast_period, self.macd.slow_period
            )));
        }

        Ok(())
    }
}
