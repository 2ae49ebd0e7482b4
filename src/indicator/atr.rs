use crate::indicator::utils::rolling;
use crate::model::OhlcBar;
use crate::series::{OhlcSeries, TimeSeries};
use serde::Serialize;
use std::fmt::Display;

/// True Range 계산
///
/// 당일 고가-저가, 전일 종가 대비 고가/저가 이동폭 중 가장 큰 값입니다.
/// 첫 거래일은 전일 종가가 없으므로 당일 고가-저가만 사용합니다.
fn true_range(bar: &OhlcBar, previous_close: Option<f64>) -> f64 {
    let high_low = bar.high - bar.low;

    match previous_close {
        Some(close) => {
            let high_close = (bar.high - close).abs();
            let low_close = (bar.low - close).abs();
            high_low.max(high_close).max(low_close)
        }
        None => high_low,
    }
}

/// 평균 진폭(ATR) 계산을 위한 빌더
///
/// ATR은 True Range의 롤링 평균으로, 가격 갭을 포함한 변동폭을
/// 측정합니다. 고가/저가/종가가 모두 필요하므로 OHLC 시계열만
/// 입력으로 받습니다.
#[derive(Debug)]
pub struct ATRBuilder {
    /// ATR 계산 기간
    period: usize,
}

/// 평균 진폭(ATR) 기술적 지표
#[derive(Clone, Debug, Serialize)]
pub struct ATR {
    /// ATR 계산 기간
    period: usize,
    /// 입력 OHLC 시계열과 날짜 인덱스를 공유하는 ATR 값 시계열
    pub values: TimeSeries,
}

impl ATR {
    /// ATR 계산 기간 반환
    pub fn period(&self) -> usize {
        self.period
    }

    /// 마지막으로 정의된 ATR 값 반환
    pub fn latest(&self) -> Option<f64> {
        self.values.last_defined()
    }
}

impl Display for ATR {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.latest() {
            Some(value) => write!(f, "ATR({}: {:.2})", self.period, value),
            None => write!(f, "ATR({}: -)", self.period),
        }
    }
}

impl ATRBuilder {
    /// 새 ATR 빌더 생성
    ///
    /// # Arguments
    /// * `period` - ATR 계산 기간 (일반적으로 14)
    ///
    /// # Returns
    /// * `ATRBuilder` - 새 빌더 인스턴스
    ///
    /// # Panics
    /// * 유효하지 않은 기간이 제공되면 패닉 발생
    pub fn new(period: usize) -> Self {
        if period == 0 {
            panic!("ATR 기간은 0보다 커야 합니다");
        }

        Self { period }
    }

    /// OHLC 시계열에서 ATR 지표 생성
    ///
    /// # Arguments
    /// * `ohlc` - OHLC 시계열
    ///
    /// # Returns
    /// * `ATR` - 계산된 ATR 지표
    pub fn build(&self, ohlc: &OhlcSeries) -> ATR {
        let bars = ohlc.bars();
        let mut tr_values = Vec::with_capacity(bars.len());

        for i in 0..bars.len() {
            let previous_close = if i == 0 { None } else { Some(bars[i - 1].close) };
            tr_values.push(true_range(&bars[i], previous_close));
        }

        let tr_series = TimeSeries::from_values(ohlc.dates().to_vec(), tr_values);

        ATR {
            period: self.period,
            values: rolling::rolling_mean(&tr_series, self.period),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ohlc_series(bars: &[(f64, f64, f64)]) -> OhlcSeries {
        let observations = bars
            .iter()
            .enumerate()
            .map(|(i, &(high, low, close))| {
                let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64);
                (date, OhlcBar::new(high, low, close))
            })
            .collect();
        OhlcSeries::from_observations(observations)
    }

    #[test]
    fn test_true_range_first_day_uses_high_low_only() {
        let bar = OhlcBar::new(10.0, 8.0, 9.0);
        assert_eq!(true_range(&bar, None), 2.0);
    }

    #[test]
    fn test_true_range_includes_gap_from_previous_close() {
        // 전일 종가 9에서 갭 상승: |12 - 9| = 3이 당일 범위 1보다 큼
        let bar = OhlcBar::new(12.0, 11.0, 11.5);
        assert_eq!(true_range(&bar, Some(9.0)), 3.0);
    }

    #[test]
    fn test_atr_known_values() {
        let ohlc = ohlc_series(&[(10.0, 8.0, 9.0), (11.0, 9.0, 10.0), (12.0, 10.0, 11.0)]);
        let atr = ATRBuilder::new(2).build(&ohlc);

        // TR = [2, 2, 2] → 윈도우 2 평균은 인덱스 1부터 2
        assert_eq!(atr.values.get(0), None);
        assert_eq!(atr.values.get(1), Some(2.0));
        assert_eq!(atr.values.get(2), Some(2.0));
        assert_eq!(atr.values.len(), ohlc.len());
    }

    #[test]
    fn test_atr_is_non_negative() {
        let ohlc = ohlc_series(&[
            (105.0, 95.0, 100.0),
            (103.0, 99.0, 101.0),
            (110.0, 100.0, 108.0),
            (109.0, 104.0, 105.0),
            (107.0, 103.0, 104.0),
        ]);
        let atr = ATRBuilder::new(3).build(&ohlc);

        for i in 0..ohlc.len() {
            if let Some(value) = atr.values.get(i) {
                assert!(value >= 0.0);
            }
        }
    }

    #[test]
    fn test_atr_empty_input() {
        let atr = ATRBuilder::new(14).build(&OhlcSeries::default());
        assert!(atr.values.is_empty());
        assert_eq!(atr.latest(), None);
    }

    #[test]
    #[should_panic(expected = "ATR 기간은 0보다 커야 합니다")]
    fn test_atr_zero_period_panics() {
        ATRBuilder::new(0);
    }
}
