use chrono::NaiveDate;
use stock_analysis::model::OhlcBar;
use stock_analysis::series::{OhlcSeries, PriceSeries};

/// 순차적인 거래일 날짜 생성
pub fn trading_date(offset: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(offset as i64)
}

/// 종가 목록에서 가격 시계열 생성
pub fn create_price_series(closes: &[f64]) -> PriceSeries {
    let dates = (0..closes.len()).map(trading_date).collect();
    PriceSeries::new(dates, closes.to_vec())
}

/// (고가, 저가, 종가) 목록에서 OHLC 시계열 생성
pub fn create_ohlc_series(bars: &[(f64, f64, f64)]) -> OhlcSeries {
    let observations = bars
        .iter()
        .enumerate()
        .map(|(i, &(high, low, close))| (trading_date(i), OhlcBar::new(high, low, close)))
        .collect();
    OhlcSeries::from_observations(observations)
}

/// 종가 목록에서 고가/저가를 덧붙인 OHLC 시계열 생성
pub fn create_ohlc_from_closes(closes: &[f64], spread: f64) -> OhlcSeries {
    let bars: Vec<(f64, f64, f64)> = closes
        .iter()
        .map(|&close| (close + spread, close - spread, close))
        .collect();
    create_ohlc_series(&bars)
}
