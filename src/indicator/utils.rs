use crate::series::TimeSeries;

/// 공통 롤링 통계 계산 함수들
///
/// 모든 윈도우 지표(볼린저 밴드, ATR, 변동성)가 공유하는 기본 연산입니다.
/// 출력 시계열은 입력의 날짜 인덱스를 그대로 물려받으며, 윈도우 조건을
/// 충족하지 못한 워밍업 위치는 명시적으로 미정의(`None`)가 됩니다.
pub mod rolling {
    use super::*;

    /// 후행 윈도우 평균 계산
    ///
    /// 각 인덱스에서 해당 인덱스를 포함한 직전 `window`개 위치의 평균을
    /// 계산합니다. 윈도우 안에 정의된 값이 `window`개 미만이면 미정의입니다.
    ///
    /// # Arguments
    /// * `series` - 입력 시계열
    /// * `window` - 윈도우 크기
    ///
    /// # Returns
    /// * `TimeSeries` - 입력과 같은 길이의 평균 시계열
    pub fn rolling_mean(series: &TimeSeries, window: usize) -> TimeSeries {
        rolling_mean_min_periods(series, window, window)
    }

    /// 최소 관측 개수를 지정한 후행 윈도우 평균 계산
    ///
    /// 윈도우 안에 정의된 값이 `min_periods`개 이상이면 정의된 값들만으로
    /// 평균을 계산합니다. `min_periods = 1`이면 첫 위치부터 부분 윈도우가
    /// 허용됩니다 (RSI가 사용하는 방식).
    ///
    /// # Arguments
    /// * `series` - 입력 시계열
    /// * `window` - 윈도우 크기
    /// * `min_periods` - 값이 정의되기 위한 최소 관측 개수
    ///
    /// # Returns
    /// * `TimeSeries` - 입력과 같은 길이의 평균 시계열
    ///
    /// # Panics
    /// * 윈도우나 최소 관측 개수가 0이면 패닉 발생
    pub fn rolling_mean_min_periods(
        series: &TimeSeries,
        window: usize,
        min_periods: usize,
    ) -> TimeSeries {
        assert!(window > 0, "롤링 윈도우는 0보다 커야 합니다");
        assert!(min_periods > 0, "최소 관측 개수는 0보다 커야 합니다");

        let values = series.values();
        let mut result = Vec::with_capacity(values.len());

        for i in 0..values.len() {
            let start = (i + 1).saturating_sub(window);
            let defined: Vec<f64> = values[start..=i].iter().filter_map(|v| *v).collect();

            if defined.len() >= min_periods {
                result.push(Some(defined.iter().sum::<f64>() / defined.len() as f64));
            } else {
                result.push(None);
            }
        }

        TimeSeries::new(series.dates().to_vec(), result)
    }

    /// 후행 윈도우 표본 표준편차 계산 (n-1 분모)
    ///
    /// # Arguments
    /// * `series` - 입력 시계열
    /// * `window` - 윈도우 크기
    ///
    /// # Returns
    /// * `TimeSeries` - 입력과 같은 길이의 표준편차 시계열
    pub fn rolling_std(series: &TimeSeries, window: usize) -> TimeSeries {
        rolling_std_min_periods(series, window, window)
    }

    /// 최소 관측 개수를 지정한 후행 윈도우 표본 표준편차 계산
    ///
    /// 표본 분산은 관측값이 2개 이상일 때만 정의되므로, `min_periods`와
    /// 무관하게 정의된 값이 1개뿐인 위치는 미정의입니다.
    ///
    /// # Panics
    /// * 윈도우나 최소 관측 개수가 0이면 패닉 발생
    pub fn rolling_std_min_periods(
        series: &TimeSeries,
        window: usize,
        min_periods: usize,
    ) -> TimeSeries {
        assert!(window > 0, "롤링 윈도우는 0보다 커야 합니다");
        assert!(min_periods > 0, "최소 관측 개수는 0보다 커야 합니다");

        let values = series.values();
        let mut result = Vec::with_capacity(values.len());

        for i in 0..values.len() {
            let start = (i + 1).saturating_sub(window);
            let defined: Vec<f64> = values[start..=i].iter().filter_map(|v| *v).collect();

            if defined.len() >= min_periods && defined.len() >= 2 {
                let mean = defined.iter().sum::<f64>() / defined.len() as f64;
                let variance = defined
                    .iter()
                    .map(|x| {
                        let diff = x - mean;
                        diff * diff
                    })
                    .sum::<f64>()
                    / (defined.len() as f64 - 1.0);
                result.push(Some(variance.sqrt()));
            } else {
                result.push(None);
            }
        }

        TimeSeries::new(series.dates().to_vec(), result)
    }
}

/// 지수 가중 이동평균 계산 함수들
pub mod ewm {
    use super::*;

    /// 지수이동평균(EMA) 계산을 위한 알파값 계산
    ///
    /// # Arguments
    /// * `span` - EMA 스팬
    ///
    /// # Returns
    /// * `f64` - 알파값 (평활화 계수), 2 / (span + 1)
    pub fn calculate_alpha(span: usize) -> f64 {
        2.0 / (span + 1) as f64
    }

    /// 지수이동평균(EMA) 한 스텝 계산
    ///
    /// # Arguments
    /// * `current` - 현재 값
    /// * `previous_ema` - 이전 EMA 값
    /// * `alpha` - 평활화 계수
    ///
    /// # Returns
    /// * `f64` - 계산된 EMA 값
    pub fn calculate_step(current: f64, previous_ema: f64, alpha: f64) -> f64 {
        alpha * current + (1.0 - alpha) * previous_ema
    }

    /// 시계열 전체의 지수 가중 이동평균 계산
    ///
    /// 점화식 y[0] = x[0], y[t] = α·x[t] + (1-α)·y[t-1]을 사용합니다.
    /// 편향 보정 없이 첫 번째 정의된 값부터 모든 위치가 정의되며,
    /// 워밍업 구간이 없습니다. 미정의 입력 위치는 상태를 바꾸지 않고
    /// 그대로 미정의로 출력됩니다.
    ///
    /// # Arguments
    /// * `series` - 입력 시계열
    /// * `span` - EMA 스팬 (span = 1이면 항등 변환)
    ///
    /// # Returns
    /// * `TimeSeries` - 입력과 같은 길이의 EMA 시계열
    ///
    /// # Panics
    /// * 스팬이 0이면 패닉 발생
    pub fn ewm_mean(series: &TimeSeries, span: usize) -> TimeSeries {
        assert!(span > 0, "EMA 스팬은 0보다 커야 합니다");

        let alpha = calculate_alpha(span);
        let mut state: Option<f64> = None;
        let mut result = Vec::with_capacity(series.len());

        for value in series.values() {
            match *value {
                Some(current) => {
                    let next = match state {
                        Some(previous) => calculate_step(current, previous, alpha),
                        None => current,
                    };
                    state = Some(next);
                    result.push(Some(next));
                }
                None => result.push(None),
            }
        }

        TimeSeries::new(series.dates().to_vec(), result)
    }
}
