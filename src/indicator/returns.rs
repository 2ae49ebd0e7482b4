use crate::series::{PriceSeries, TimeSeries};

/// 일일 수익률 시계열 계산
///
/// 각 위치의 값은 (오늘 가격 - 전일 가격) / 전일 가격 입니다.
/// 첫 번째 거래일은 전일 가격이 없으므로 결과에서 제외되며,
/// 출력 길이는 입력 길이보다 1 작습니다. 입력이 2개 미만이면
/// 빈 시계열을 반환합니다.
///
/// # Arguments
/// * `prices` - 가격 시계열
///
/// # Returns
/// * `TimeSeries` - 두 번째 거래일부터 시작하는 일일 수익률 시계열
pub fn daily_returns(prices: &PriceSeries) -> TimeSeries {
    if prices.len() < 2 {
        return TimeSeries::empty();
    }

    let closes = prices.closes();
    let dates = prices.dates()[1..].to_vec();
    let mut values = Vec::with_capacity(closes.len() - 1);

    for i in 1..closes.len() {
        values.push((closes[i] - closes[i - 1]) / closes[i - 1]);
    }

    // 전일 가격이 0인 퇴화 케이스는 from_values에서 미정의로 정규화됨
    TimeSeries::from_values(dates, values)
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
    fn test_daily_returns_length_and_values() {
        let prices = price_series(&[100.0, 102.0, 101.0]);
        let returns = daily_returns(&prices);

        assert_eq!(returns.len(), 2);
        assert!((returns.get(0).unwrap() - 0.02).abs() < 1e-12);
        assert!((returns.get(1).unwrap() - (-1.0 / 102.0)).abs() < 1e-12);
    }

    #[test]
    fn test_daily_returns_drops_first_date() {
        let prices = price_series(&[100.0, 102.0]);
        let returns = daily_returns(&prices);

        assert_eq!(returns.dates(), &prices.dates()[1..]);
    }

    #[test]
    fn test_daily_returns_needs_two_points() {
        assert!(daily_returns(&price_series(&[100.0])).is_empty());
        assert!(daily_returns(&price_series(&[])).is_empty());
    }

    #[test]
    fn test_daily_returns_zero_close_is_undefined() {
        // 전일 가격이 0이면 수익률이 정의되지 않음
        let prices = price_series(&[0.0, 100.0, 101.0]);
        let returns = daily_returns(&prices);

        assert_eq!(returns.get(0), None);
        assert!(returns.get(1).is_some());
    }
}
