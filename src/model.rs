use serde::Serialize;

/// 하루치 OHLC(고가/저가/종가) 가격 레코드
///
/// ATR 등 고가/저가 정보가 필요한 지표의 입력 단위입니다.
/// 고가 >= 저가 불변식은 데이터 소스가 보장한다고 가정하며,
/// 위반 시 음수 True Range 성분이 발생할 수 있습니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OhlcBar {
    /// 고가
    pub high: f64,
    /// 저가
    pub low: f64,
    /// 종가
    pub close: f64,
}

impl OhlcBar {
    /// 새 OHLC 레코드 생성
    ///
    /// # Arguments
    /// * `high` - 고가
    /// * `low` - 저가
    /// * `close` - 종가
    ///
    /// # Returns
    /// * `OhlcBar` - 생성된 레코드
    pub fn new(high: f64, low: f64, close: f64) -> Self {
        OhlcBar { high, low, close }
    }

    /// 당일 가격 범위 (고가 - 저가)
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// 분석 결과로 산출되는 투자 추천 등급
///
/// 평균 일일 수익률과 변동성 두 개의 요약 통계로부터 결정됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    /// 적극 매수
    StrongBuy,
    /// 매수
    Buy,
    /// 보유
    Hold,
    /// 매도
    Sell,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Recommendation::StrongBuy => "Strong Buy",
            Recommendation::Buy => "Buy",
            Recommendation::Hold => "Hold",
            Recommendation::Sell => "Sell",
        };
        write!(f, "{}", label)
    }
}
