use crate::indicator::utils::rolling;
use crate::series::{PriceSeries, TimeSeries};
use serde::Serialize;
use std::fmt::Display;

/// 볼린저 밴드 계산 빌더
///
/// 볼린저 밴드는 가격의 변동성을 측정하는 기술적 지표로,
/// 이동평균선 주변의 표준편차 기반 상단/하단 밴드로 구성됩니다.
#[derive(Debug)]
pub struct BollingerBandsBuilder {
    /// 계산 기간
    period: usize,
    /// 표준편차 승수
    multiplier: f64,
}

/// 볼린저 밴드 기술적 지표
///
/// 상단 밴드와 하단 밴드는 입력 가격 시계열의 날짜 인덱스를 공유하며,
/// `period`개의 이력이 쌓이기 전 위치는 미정의입니다.
#[derive(Clone, Debug, Serialize)]
pub struct BollingerBands {
    /// 계산 기간
    period: usize,
    /// 표준편차 승수
    multiplier: f64,
    /// 상단 밴드 (이동평균 + 승수 × 표준편차)
    pub upper: TimeSeries,
    /// 하단 밴드 (이동평균 - 승수 × 표준편차)
    pub lower: TimeSeries,
}

impl BollingerBands {
    /// 계산 기간 반환
    pub fn period(&self) -> usize {
        self.period
    }

    /// 표준편차 승수 반환
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }
}

impl Display for BollingerBands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.upper.last_defined(), self.lower.last_defined()) {
            (Some(upper), Some(lower)) => write!(
                f,
                "BB({},{}: {:.2}, {:.2})",
                self.period, self.multiplier, upper, lower
            ),
            _ => write!(f, "BB({},{}: -)", self.period, self.multiplier),
        }
    }
}

impl BollingerBandsBuilder {
    /// 새 볼린저 밴드 빌더 생성
    ///
    /// # Arguments
    /// * `period` - 계산 기간 (일반적으로 20)
    /// * `multiplier` - 표준편차 승수 (일반적으로 2.0)
    ///
    /// # Returns
    /// * `BollingerBandsBuilder` - 새 빌더 인스턴스
    ///
    /// # Panics
    /// * 유효하지 않은 매개변수가 제공되면 패닉 발생
    pub fn new(period: usize, multiplier: f64) -> Self {
        if period == 0 {
            panic!("볼린저 밴드 기간은 0보다 커야 합니다");
        }

        if multiplier <= 0.0 {
            panic!("볼린저 밴드 승수는 0보다 커야 합니다");
        }

        Self { period, multiplier }
    }

    /// 가격 시계열에서 볼린저 밴드 지표 생성
    ///
    /// # Arguments
    /// * `prices` - 가격 시계열
    ///
    /// # Returns
    /// * `BollingerBands` - 계산된 볼린저 밴드 지표
    pub fn build(&self, prices: &PriceSeries) -> BollingerBands {
        let series = prices.to_series();
        let mean = rolling::rolling_mean(&series, self.period);
        let std = rolling::rolling_std(&series, self.period);

        let mut upper = Vec::with_capacity(series.len());
        let mut lower = Vec::with_capacity(series.len());

        for i in 0..series.len() {
            match (mean.get(i), std.get(i)) {
                (Some(m), Some(s)) => {
                    upper.push(Some(m + s * self.multiplier));
                    lower.push(Some(m - s * self.multiplier));
                }
                _ => {
                    upper.push(None);
                    lower.push(None);
                }
            }
        }

        BollingerBands {
            period: self.period,
            multiplier: self.multiplier,
            upper: TimeSeries::new(series.dates().to_vec(), upper),
            lower: TimeSeries::new(series.dates().to_vec(), lower),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn price_series(closes: &[f64]) -> PriceSeries {
        let dates = (0..closes.len())
            .map(|i| {
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(i as i64)
            })
            .collect();
        PriceSeries::new(dates, closes.to_vec())
    }

    #[test]
    fn test_bollinger_bands_known_values() {
        let prices = price_series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let bands = BollingerBandsBuilder::new(3, 2.0).build(&prices);

        // 인덱스 2: 평균 2, 표본 표준편차 1 → 상단 4, 하단 0
        assert!((bands.upper.get(2).unwrap() - 4.0).abs() < 1e-12);
        assert!((bands.lower.get(2).unwrap() - 0.0).abs() < 1e-12);
        assert!((bands.upper.get(4).unwrap() - 6.0).abs() < 1e-12);
        assert!((bands.lower.get(4).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_bollinger_bands_warm_up_is_undefined() {
        let prices = price_series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let bands = BollingerBandsBuilder::new(3, 2.0).build(&prices);

        assert_eq!(bands.upper.get(0), None);
        assert_eq!(bands.upper.get(1), None);
        assert_eq!(bands.lower.get(1), None);
        assert_eq!(bands.upper.len(), prices.len());
        assert_eq!(bands.lower.len(), prices.len());
    }

    #[test]
    fn test_bollinger_band_width_is_twice_multiplier_times_std() {
        let prices = price_series(&[10.0, 12.0, 11.0, 14.0, 13.0, 15.0]);
        let builder = BollingerBandsBuilder::new(4, 2.0);
        let bands = builder.build(&prices);
        let std = rolling::rolling_std(&prices.to_series(), 4);

        for i in 0..prices.len() {
            match (bands.upper.get(i), bands.lower.get(i), std.get(i)) {
                (Some(upper), Some(lower), Some(s)) => {
                    assert!((upper - lower - 2.0 * 2.0 * s).abs() < 1e-12);
                }
                (None, None, None) => {}
                _ => panic!("밴드와 표준편차의 정의 구간이 일치해야 합니다"),
            }
        }
    }

    #[test]
    fn test_bollinger_bands_empty_input() {
        let bands = BollingerBandsBuilder::new(20, 2.0).build(&price_series(&[]));
        assert!(bands.upper.is_empty());
        assert!(bands.lower.is_empty());
    }

    #[test]
    #[should_panic(expected = "볼린저 밴드 기간은 0보다 커야 합니다")]
    fn test_bollinger_bands_zero_period_panics() {
        BollingerBandsBuilder::new(0, 2.0);
    }
}
