use crate::indicator::utils::ewm;
use crate::series::{PriceSeries, TimeSeries};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// MACD 계산 매개변수
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MACDParams {
    /// 빠른 EMA 기간 (일반적으로 12)
    pub fast_period: usize,
    /// 느린 EMA 기간 (일반적으로 26)
    pub slow_period: usize,
    /// 시그널 라인 기간 (일반적으로 9)
    pub signal_period: usize,
}

impl Default for MACDParams {
    fn default() -> Self {
        MACDParams {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// MACD(Moving Average Convergence Divergence) 계산을 위한 빌더
///
/// MACD는 두 개의 지수이동평균(빠른 EMA와 느린 EMA)의 차이를 계산하고,
/// 이 값에 대한 시그널 라인(MACD의 EMA)을 제공하는 기술적 지표입니다.
#[derive(Debug)]
pub struct MACDBuilder {
    params: MACDParams,
}

/// MACD 기술적 지표
///
/// EMA는 워밍업 구간 없이 첫 위치부터 정의되므로, MACD 라인과
/// 시그널 라인 모두 입력 시계열의 모든 위치에서 정의됩니다.
#[derive(Clone, Debug, Serialize)]
pub struct MACD {
    /// 계산 매개변수
    params: MACDParams,
    /// MACD 라인 (빠른 EMA - 느린 EMA)
    pub macd_line: TimeSeries,
    /// 시그널 라인 (MACD 라인의 EMA)
    pub signal_line: TimeSeries,
}

impl MACD {
    /// 계산 매개변수 반환
    pub fn params(&self) -> MACDParams {
        self.params
    }
}

impl Display for MACD {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.macd_line.last_defined(), self.signal_line.last_defined()) {
            (Some(macd), Some(signal)) => write!(
                f,
                "MACD({},{},{}: {:.2}, {:.2})",
                self.params.fast_period,
                self.params.slow_period,
                self.params.signal_period,
                macd,
                signal
            ),
            _ => write!(
                f,
                "MACD({},{},{}: -)",
                self.params.fast_period, self.params.slow_period, self.params.signal_period
            ),
        }
    }
}

impl MACDBuilder {
    /// 새 MACD 빌더 생성
    ///
    /// # Arguments
    /// * `params` - MACD 계산 매개변수
    ///
    /// # Returns
    /// * `MACDBuilder` - 새 빌더 인스턴스
    ///
    /// # Panics
    /// * 유효하지 않은 기간이 제공되면 패닉 발생
    pub fn new(params: MACDParams) -> Self {
        if params.fast_period == 0 || params.slow_period == 0 || params.signal_period == 0 {
            panic!("MACD 기간은 0보다 커야 합니다");
        }

        Self { params }
    }

    /// 가격 시계열에서 MACD 지표 생성
    ///
    /// # Arguments
    /// * `prices` - 가격 시계열
    ///
    /// # Returns
    /// * `MACD` - 계산된 MACD 지표
    pub fn build(&self, prices: &PriceSeries) -> MACD {
        let series = prices.to_series();
        let fast_ema = ewm::ewm_mean(&series, self.params.fast_period);
        let slow_ema = ewm::ewm_mean(&series, self.params.slow_period);

        let mut macd_values = Vec::with_capacity(series.len());
        for i in 0..series.len() {
            match (fast_ema.get(i), slow_ema.get(i)) {
                (Some(fast), Some(slow)) => macd_values.push(Some(fast - slow)),
                _ => macd_values.push(None),
            }
        }

        let macd_line = TimeSeries::new(series.dates().to_vec(), macd_values);
        let signal_line = ewm::ewm_mean(&macd_line, self.params.signal_period);

        MACD {
            params: self.params,
            macd_line,
            signal_line,
        }
    }
}
