use crate::analyzer::StockAnalysis;
use crate::series::PriceSeries;
use log::debug;

/// 미정의 값을 "-"로 표시
fn format_value(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}

/// 분석 결과를 사람이 읽을 수 있는 보고서 텍스트로 렌더링
///
/// 계산은 하지 않고 분석 결과와 가격 시계열을 읽어 형식만 입힙니다.
/// 이력이 부족해 미정의인 값은 "-"로 표시됩니다.
///
/// # Arguments
/// * `analysis` - 분석 결과
/// * `prices` - 분석에 사용된 가격 시계열
///
/// # Returns
/// * `String` - 보고서 텍스트
pub fn render(analysis: &StockAnalysis, prices: &PriceSeries) -> String {
    debug!("보고서 렌더링: {}", analysis.market);

    let mut lines = Vec::new();
    lines.push(format!("=== {} 분석 보고서 ===", analysis.market));

    match (prices.dates().first(), prices.dates().last()) {
        (Some(start), Some(end)) => {
            lines.push(format!("기간: {} ~ {} ({}개 거래일)", start, end, prices.len()));
        }
        _ => lines.push("기간: 데이터 없음".to_string()),
    }

    let initial = prices.first_close();
    let current = prices.last_close();
    lines.push(format!(
        "초기 가격: {} / 현재 가격: {}",
        format_value(initial, 2),
        format_value(current, 2)
    ));

    // 기간 전체 변동률 (%)
    if let (Some(initial), Some(current)) = (initial, current)
        && initial != 0.0
    {
        let percentage_change = (current - initial) / initial * 100.0;
        lines.push(format!("기간 변동률: {:+.2}%", percentage_change));
    }

    lines.push(format!(
        "평균 일일 수익률: {}",
        format_value(analysis.average_daily_return, 4)
    ));
    lines.push(format!(
        "일일 변동성: {}",
        format_value(analysis.volatility, 4)
    ));

    lines.push("최신 지표:".to_string());
    lines.push(format!("  {}", analysis.bollinger));
    lines.push(format!("  {}", analysis.macd));
    lines.push(format!("  {}", analysis.rsi));
    match &analysis.atr {
        Some(atr) => lines.push(format!("  {}", atr)),
        None => lines.push("  ATR: OHLC 데이터 없음".to_string()),
    }
    lines.push(format!("  {}", analysis.annualized_volatility));

    lines.push(format!("추천: {}", analysis.recommendation));

    lines.join("\n")
}
