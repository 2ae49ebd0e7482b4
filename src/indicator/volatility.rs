use crate::indicator::utils::rolling;
use crate::series::TimeSeries;
use serde::Serialize;
use std::fmt::Display;

/// 연간 거래일 수 (연환산 계수의 기준)
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// 연환산 변동성 계산을 위한 빌더
///
/// 일일 수익률의 롤링 표본 표준편차에 √252를 곱해 연환산합니다.
#[derive(Debug)]
pub struct VolatilityBuilder {
    /// 롤링 윈도우 크기
    window: usize,
}

/// 연환산 변동성 기술적 지표
#[derive(Clone, Debug, Serialize)]
pub struct Volatility {
    /// 롤링 윈도우 크기
    window: usize,
    /// 입력 수익률 시계열과 날짜 인덱스를 공유하는 변동성 시계열
    pub values: TimeSeries,
}

impl Volatility {
    /// 롤링 윈도우 크기 반환
    pub fn window(&self) -> usize {
        self.window
    }

    /// 마지막으로 정의된 변동성 값 반환
    pub fn latest(&self) -> Option<f64> {
        self.values.last_defined()
    }
}

impl Display for Volatility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.latest() {
            Some(value) => write!(f, "VOL({}: {:.4})", self.window, value),
            None => write!(f, "VOL({}: -)", self.window),
        }
    }
}

impl VolatilityBuilder {
    /// 새 변동성 빌더 생성
    ///
    /// # Arguments
    /// * `window` - 롤링 윈도우 크기 (일반적으로 252)
    ///
    /// # Returns
    /// * `VolatilityBuilder` - 새 빌더 인스턴스
    ///
    /// # Panics
    /// * 유효하지 않은 윈도우가 제공되면 패닉 발생
    pub fn new(window: usize) -> Self {
        if window == 0 {
            panic!("변동성 윈도우는 0보다 커야 합니다");
        }

        Self { window }
    }

    /// 일일 수익률 시계열에서 연환산 변동성 지표 생성
    ///
    /// # Arguments
    /// * `returns` - 일일 수익률 시계열
    ///
    /// # Returns
    /// * `Volatility` - 계산된 연환산 변동성 지표
    pub fn build(&self, returns: &TimeSeries) -> Volatility {
        let std = rolling::rolling_std(returns, self.window);
        let annualization = TRADING_DAYS_PER_YEAR.sqrt();

        let values = std
            .values()
            .iter()
            .map(|value| value.map(|v| v * annualization))
            .collect();

        Volatility {
            window: self.window,
            values: TimeSeries::new(std.dates().to_vec(), values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn return_series(values: &[f64]) -> TimeSeries {
        let dates = (0..values.len())
            .map(|i| {
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap() + chrono::Duration::days(i as i64)
            })
            .collect();
        TimeSeries::from_values(dates, values.to_vec())
    }

    #[test]
    fn test_volatility_scales_rolling_std_by_sqrt_252() {
        let returns = return_series(&[0.01, -0.02, 0.03, 0.005, -0.01, 0.02]);
        let volatility = VolatilityBuilder::new(3).build(&returns);
        let std = rolling::rolling_std(&returns, 3);

        for i in 0..returns.len() {
            match (volatility.values.get(i), std.get(i)) {
                (Some(vol), Some(s)) => {
                    assert!((vol - s * TRADING_DAYS_PER_YEAR.sqrt()).abs() < 1e-9);
                }
                (None, None) => {}
                _ => panic!("변동성과 표준편차의 정의 구간이 일치해야 합니다"),
            }
        }
    }

    #[test]
    fn test_volatility_warm_up_is_undefined() {
        let returns = return_series(&[0.01, -0.02, 0.03, 0.005]);
        let volatility = VolatilityBuilder::new(3).build(&returns);

        assert_eq!(volatility.values.get(0), None);
        assert_eq!(volatility.values.get(1), None);
        assert!(volatility.values.get(2).is_some());
        assert_eq!(volatility.values.len(), returns.len());
    }

    #[test]
    fn test_volatility_short_history_is_all_undefined() {
        // 기본 윈도우 252 대비 이력이 부족하면 모든 위치가 미정의
        let returns = return_series(&[0.01, -0.02, 0.03]);
        let volatility = VolatilityBuilder::new(252).build(&returns);

        assert_eq!(volatility.latest(), None);
        assert_eq!(volatility.values.len(), returns.len());
    }

    #[test]
    #[should_panic(expected = "변동성 윈도우는 0보다 커야 합니다")]
    fn test_volatility_zero_window_panics() {
        VolatilityBuilder::new(0);
    }
}
