use crate::indicator::utils::rolling;
use crate::series::TimeSeries;
use serde::Serialize;
use std::fmt::Display;

/// 상대강도지수(RSI) 계산을 위한 빌더
///
/// 일일 수익률 시계열의 1차 차분에서 상승분과 하락분을 분리하고,
/// 부분 윈도우(min_periods = 1)를 허용하는 롤링 평균으로 평균
/// 상승분/하락분을 구해 RSI를 계산합니다.
#[derive(Debug)]
pub struct RSIBuilder {
    /// RSI 계산 기간
    period: usize,
}

/// 상대강도지수(RSI) 기술적 지표
///
/// RSI는 변화량의 상대적 강도를 측정하여 과매수/과매도 상태를 판단합니다.
/// 값은 항상 [0, 100] 범위 안에 있습니다.
#[derive(Clone, Debug, Serialize)]
pub struct RSI {
    /// RSI 계산 기간
    period: usize,
    /// 입력 시계열과 날짜 인덱스를 공유하는 RSI 값 시계열
    pub values: TimeSeries,
}

impl RSI {
    /// RSI 계산 기간 반환
    pub fn period(&self) -> usize {
        self.period
    }

    /// 마지막으로 정의된 RSI 값 반환
    pub fn latest(&self) -> Option<f64> {
        self.values.last_defined()
    }

    /// 최신 RSI가 과매수 상태인지 확인 (일반적으로 70 이상)
    ///
    /// # Arguments
    /// * `threshold` - 과매수 기준값 (기본값 70.0)
    ///
    /// # Returns
    /// * `bool` - 과매수 여부
    pub fn is_overbought(&self, threshold: Option<f64>) -> bool {
        let threshold_value = threshold.unwrap_or(70.0);
        self.latest().is_some_and(|value| value >= threshold_value)
    }

    /// 최신 RSI가 과매도 상태인지 확인 (일반적으로 30 이하)
    ///
    /// # Arguments
    /// * `threshold` - 과매도 기준값 (기본값 30.0)
    ///
    /// # Returns
    /// * `bool` - 과매도 여부
    pub fn is_oversold(&self, threshold: Option<f64>) -> bool {
        let threshold_value = threshold.unwrap_or(30.0);
        self.latest().is_some_and(|value| value <= threshold_value)
    }
}

impl Display for RSI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.latest() {
            Some(value) => write!(f, "RSI({}: {:.2})", self.period, value),
            None => write!(f, "RSI({}: -)", self.period),
        }
    }
}

impl RSIBuilder {
    /// 새 RSI 빌더 생성
    ///
    /// # Arguments
    /// * `period` - RSI 계산 기간 (일반적으로 14)
    ///
    /// # Returns
    /// * `RSIBuilder` - 새 빌더 인스턴스
    ///
    /// # Panics
    /// * 유효하지 않은 기간이 제공되면 패닉 발생
    pub fn new(period: usize) -> Self {
        if period == 0 {
            panic!("RSI 기간은 0보다 커야 합니다");
        }

        Self { period }
    }

    /// 일일 수익률 시계열에서 RSI 지표 생성
    ///
    /// 차분이 정의되지 않는 첫 위치는 상승분과 하락분을 모두 0으로
    /// 취급합니다. 평균 하락분이 0이면 나눗셈 대신 100으로 포화시키고,
    /// 평균 상승분까지 0이면(변화 없음) 해당 위치는 미정의입니다.
    ///
    /// # Arguments
    /// * `returns` - 일일 수익률 시계열
    ///
    /// # Returns
    /// * `RSI` - 계산된 RSI 지표
    pub fn build(&self, returns: &TimeSeries) -> RSI {
        let values = returns.values();
        let mut gains = Vec::with_capacity(values.len());
        let mut losses = Vec::with_capacity(values.len());

        for i in 0..values.len() {
            let delta = if i == 0 {
                None
            } else {
                match (values[i], values[i - 1]) {
                    (Some(current), Some(previous)) => Some(current - previous),
                    _ => None,
                }
            };

            match delta {
                Some(change) if change > 0.0 => {
                    gains.push(Some(change));
                    losses.push(Some(0.0));
                }
                Some(change) if change < 0.0 => {
                    gains.push(Some(0.0));
                    losses.push(Some(-change));
                }
                // 변화가 없거나 차분이 정의되지 않는 위치는 양쪽 모두 0
                _ => {
                    gains.push(Some(0.0));
                    losses.push(Some(0.0));
                }
            }
        }

        let dates = returns.dates().to_vec();
        let gain_series = TimeSeries::new(dates.clone(), gains);
        let loss_series = TimeSeries::new(dates.clone(), losses);

        let avg_gain = rolling::rolling_mean_min_periods(&gain_series, self.period, 1);
        let avg_loss = rolling::rolling_mean_min_periods(&loss_series, self.period, 1);

        let mut rsi_values = Vec::with_capacity(values.len());
        for i in 0..values.len() {
            let rsi = match (avg_gain.get(i), avg_loss.get(i)) {
                (Some(gain), Some(loss)) => {
                    if loss == 0.0 {
                        // 평균 하락분이 0이면 RS가 발산하므로 100으로 포화
                        if gain > 0.0 { Some(100.0) } else { None }
                    } else {
                        let rs = gain / loss;
                        Some(100.0 - (100.0 / (1.0 + rs)))
                    }
                }
                _ => None,
            };
            rsi_values.push(rsi);
        }

        RSI {
            period: self.period,
            values: TimeSeries::new(dates, rsi_values),
        }
    }
}
