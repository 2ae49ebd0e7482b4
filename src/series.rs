use crate::model::OhlcBar;
use chrono::NaiveDate;
use serde::Serialize;

/// 날짜 인덱스를 공유하는 시계열
///
/// 거래일 날짜 오름차순으로 정렬된 (날짜, 값) 쌍의 시퀀스입니다.
/// 값은 명시적으로 미정의일 수 있으며(`None`), 롤링 윈도우 계산의
/// 워밍업 구간처럼 이력이 부족한 위치를 나타냅니다. 미정의 위치는
/// 제거되지 않고 인덱스 정렬을 유지한 채 그대로 전파됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    dates: Vec<NaiveDate>,
    values: Vec<Option<f64>>,
}

impl TimeSeries {
    /// 새 시계열 생성
    ///
    /// 날짜 정렬은 호출자가 보장합니다. 이 크레이트 안에서는 모든 출력
    /// 시계열이 입력 시계열의 날짜 인덱스를 그대로 물려받습니다.
    ///
    /// # Arguments
    /// * `dates` - 날짜 목록
    /// * `values` - 날짜별 값 (미정의 위치는 `None`)
    ///
    /// # Panics
    /// * 날짜와 값의 길이가 다르면 패닉 발생
    pub fn new(dates: Vec<NaiveDate>, values: Vec<Option<f64>>) -> TimeSeries {
        assert_eq!(
            dates.len(),
            values.len(),
            "날짜와 값의 길이가 일치해야 합니다"
        );
        TimeSeries { dates, values }
    }

    /// 모든 위치가 정의된 값 목록에서 시계열 생성
    ///
    /// 유한하지 않은 값(무한대, NaN)은 미정의로 정규화됩니다.
    /// 소비자 입장에서 "정의됨"과 "유한함"이 항상 같은 뜻이 되도록 합니다.
    pub fn from_values(dates: Vec<NaiveDate>, values: Vec<f64>) -> TimeSeries {
        let values = values
            .into_iter()
            .map(|v| if v.is_finite() { Some(v) } else { None })
            .collect();
        TimeSeries::new(dates, values)
    }

    /// 빈 시계열 생성
    pub fn empty() -> TimeSeries {
        TimeSeries::default()
    }

    /// 시계열 길이 반환
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 시계열이 비어 있는지 확인
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 날짜 목록 반환
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// 값 목록 반환 (미정의 위치 포함)
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// 지정된 인덱스의 값 반환
    ///
    /// # Returns
    /// * `Option<f64>` - 값. 인덱스가 범위를 벗어나거나 미정의면 None
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// 정의된 값의 개수 반환
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// 마지막으로 정의된 값 반환
    pub fn last_defined(&self) -> Option<f64> {
        self.values.iter().rev().find_map(|v| *v)
    }

    /// 정의된 값들의 평균 반환
    ///
    /// # Returns
    /// * `Option<f64>` - 평균. 정의된 값이 없으면 None
    pub fn mean(&self) -> Option<f64> {
        let defined: Vec<f64> = self.values.iter().filter_map(|v| *v).collect();
        if defined.is_empty() {
            return None;
        }
        Some(defined.iter().sum::<f64>() / defined.len() as f64)
    }

    /// 정의된 값들의 표본 표준편차 반환 (n-1 분모)
    ///
    /// # Returns
    /// * `Option<f64>` - 표준편차. 정의된 값이 2개 미만이면 None
    pub fn std_dev(&self) -> Option<f64> {
        let defined: Vec<f64> = self.values.iter().filter_map(|v| *v).collect();
        if defined.len() < 2 {
            return None;
        }
        let mean = defined.iter().sum::<f64>() / defined.len() as f64;
        let variance = defined
            .iter()
            .map(|x| {
                let diff = x - mean;
                diff * diff
            })
            .sum::<f64>()
            / (defined.len() as f64 - 1.0);
        Some(variance.sqrt())
    }
}

/// 단일 가격 필드(예: 수정 종가)의 일별 시계열
///
/// 모든 위치가 정의된 비음수 가격 값을 가지며, 날짜 오름차순으로
/// 정렬되어 저장됩니다. 지표 계산의 기본 입력 타입입니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    dates: Vec<NaiveDate>,
    closes: Vec<f64>,
}

impl PriceSeries {
    /// 정렬된 날짜와 가격 목록에서 새 가격 시계열 생성
    ///
    /// # Arguments
    /// * `dates` - 날짜 목록 (엄격한 오름차순)
    /// * `closes` - 날짜별 가격
    ///
    /// # Panics
    /// * 길이가 다르거나 날짜가 엄격한 오름차순이 아니면 패닉 발생
    pub fn new(dates: Vec<NaiveDate>, closes: Vec<f64>) -> PriceSeries {
        assert_eq!(
            dates.len(),
            closes.len(),
            "날짜와 가격의 길이가 일치해야 합니다"
        );
        for pair in dates.windows(2) {
            assert!(pair[0] < pair[1], "날짜는 엄격한 오름차순이어야 합니다");
        }
        PriceSeries { dates, closes }
    }

    /// 정렬되지 않은 관측값 목록에서 가격 시계열 생성
    ///
    /// 날짜 기준 오름차순으로 정렬하고, 중복된 날짜는 먼저 나온
    /// 관측값만 유지합니다.
    ///
    /// # Arguments
    /// * `observations` - (날짜, 가격) 관측값 목록
    ///
    /// # Returns
    /// * `PriceSeries` - 정렬된 가격 시계열
    pub fn from_observations(mut observations: Vec<(NaiveDate, f64)>) -> PriceSeries {
        observations.sort_by_key(|(date, _)| *date);
        observations.dedup_by_key(|(date, _)| *date);

        let (dates, closes) = observations.into_iter().unzip();
        PriceSeries { dates, closes }
    }

    /// 시계열 길이 반환
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    /// 시계열이 비어 있는지 확인
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// 날짜 목록 반환
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// 가격 목록 반환
    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    /// 첫 번째 가격 반환
    pub fn first_close(&self) -> Option<f64> {
        self.closes.first().copied()
    }

    /// 마지막 가격 반환
    pub fn last_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    /// 모든 위치가 정의된 일반 시계열로 변환
    pub fn to_series(&self) -> TimeSeries {
        TimeSeries::from_values(self.dates.clone(), self.closes.clone())
    }
}

/// 일별 OHLC 시계열
///
/// 날짜마다 고가/저가/종가 레코드를 가지는 시계열입니다. ATR처럼
/// 고가/저가 정보가 필요한 지표는 이 타입만 입력으로 받으므로,
/// 필수 필드 누락이 타입 수준에서 차단됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OhlcSeries {
    dates: Vec<NaiveDate>,
    bars: Vec<OhlcBar>,
}

impl OhlcSeries {
    /// 정렬된 날짜와 OHLC 레코드 목록에서 새 시계열 생성
    ///
    /// # Panics
    /// * 길이가 다르거나 날짜가 엄격한 오름차순이 아니면 패닉 발생
    pub fn new(dates: Vec<NaiveDate>, bars: Vec<OhlcBar>) -> OhlcSeries {
        assert_eq!(
            dates.len(),
            bars.len(),
            "날짜와 레코드의 길이가 일치해야 합니다"
        );
        for pair in dates.windows(2) {
            assert!(pair[0] < pair[1], "날짜는 엄격한 오름차순이어야 합니다");
        }
        OhlcSeries { dates, bars }
    }

    /// 정렬되지 않은 관측값 목록에서 OHLC 시계열 생성
    ///
    /// 날짜 기준 오름차순으로 정렬하고, 중복된 날짜는 먼저 나온
    /// 관측값만 유지합니다.
    pub fn from_observations(mut observations: Vec<(NaiveDate, OhlcBar)>) -> OhlcSeries {
        observations.sort_by_key(|(date, _)| *date);
        observations.dedup_by_key(|(date, _)| *date);

        let (dates, bars) = observations.into_iter().unzip();
        OhlcSeries { dates, bars }
    }

    /// 시계열 길이 반환
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// 시계열이 비어 있는지 확인
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// 날짜 목록 반환
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// OHLC 레코드 목록 반환
    pub fn bars(&self) -> &[OhlcBar] {
        &self.bars
    }

    /// 종가만 추출한 가격 시계열 반환
    pub fn close_series(&self) -> PriceSeries {
        PriceSeries {
            dates: self.dates.clone(),
            closes: self.bars.iter().map(|bar| bar.close).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_from_observations_sorts_by_date() {
        let series = PriceSeries::from_observations(vec![
            (date(3), 103.0),
            (date(1), 101.0),
            (date(2), 102.0),
        ]);

        assert_eq!(series.dates(), &[date(1), date(2), date(3)]);
        assert_eq!(series.closes(), &[101.0, 102.0, 103.0]);
    }

    #[test]
    fn test_from_observations_filters_duplicates() {
        // 중복된 날짜는 먼저 나온 관측값만 유지
        let series = PriceSeries::from_observations(vec![
            (date(1), 101.0),
            (date(2), 102.0),
            (date(2), 999.0),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), &[101.0, 102.0]);
    }

    #[test]
    fn test_time_series_mean_ignores_undefined() {
        let series = TimeSeries::new(
            vec![date(1), date(2), date(3)],
            vec![None, Some(2.0), Some(4.0)],
        );

        assert_eq!(series.mean(), Some(3.0));
        assert_eq!(series.defined_count(), 2);
        assert_eq!(series.last_defined(), Some(4.0));
    }

    #[test]
    fn test_time_series_std_dev_uses_sample_denominator() {
        let series = TimeSeries::from_values(
            vec![date(1), date(2), date(3)],
            vec![1.0, 2.0, 3.0],
        );

        // 표본 표준편차 (n-1 분모): std([1,2,3]) = 1
        assert!((series.std_dev().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_time_series_std_dev_needs_two_values() {
        let series = TimeSeries::from_values(vec![date(1)], vec![1.0]);
        assert_eq!(series.std_dev(), None);

        let empty = TimeSeries::empty();
        assert_eq!(empty.mean(), None);
        assert_eq!(empty.std_dev(), None);
    }

    #[test]
    fn test_from_values_normalizes_non_finite() {
        let series = TimeSeries::from_values(
            vec![date(1), date(2), date(3)],
            vec![1.0, f64::INFINITY, f64::NAN],
        );

        assert_eq!(series.get(0), Some(1.0));
        assert_eq!(series.get(1), None);
        assert_eq!(series.get(2), None);
    }

    #[test]
    fn test_ohlc_close_series() {
        let series = OhlcSeries::from_observations(vec![
            (date(2), OhlcBar::new(12.0, 10.0, 11.0)),
            (date(1), OhlcBar::new(11.0, 9.0, 10.0)),
        ]);

        let closes = series.close_series();
        assert_eq!(closes.closes(), &[10.0, 11.0]);
        assert_eq!(closes.dates(), &[date(1), date(2)]);
    }

    #[test]
    #[should_panic(expected = "날짜와 값의 길이가 일치해야 합니다")]
    fn test_time_series_length_mismatch_panics() {
        TimeSeries::new(vec![date(1)], vec![Some(1.0), Some(2.0)]);
    }
}
