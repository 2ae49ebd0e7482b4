use crate::config_loader::AnalysisConfig;
use crate::indicator::atr::{ATR, ATRBuilder};
use crate::indicator::bband::{BollingerBands, BollingerBandsBuilder};
use crate::indicator::macd::{MACD, MACDBuilder};
use crate::indicator::returns::daily_returns;
use crate::indicator::rsi::{RSI, RSIBuilder};
use crate::indicator::volatility::{Volatility, VolatilityBuilder};
use crate::model::Recommendation;
use crate::series::{OhlcSeries, PriceSeries, TimeSeries};
use log::{debug, info, warn};
use serde::Serialize;
use std::fmt::Display;

pub mod recommendation;

/// 한 종목에 대한 전체 분석 결과
///
/// 일일 수익률과 두 요약 통계, 다섯 개 지표의 출력, 추천 등급을
/// 담습니다. 모든 시계열은 입력 시계열의 날짜 인덱스를 공유합니다.
#[derive(Clone, Debug, Serialize)]
pub struct StockAnalysis {
    /// 종목 식별자
    pub market: String,
    /// 일일 수익률 시계열
    pub daily_returns: TimeSeries,
    /// 평균 일일 수익률 (수익률이 없으면 미정의)
    pub average_daily_return: Option<f64>,
    /// 일일 변동성 (수익률의 표본 표준편차, 2개 미만이면 미정의)
    pub volatility: Option<f64>,
    /// 볼린저 밴드
    pub bollinger: BollingerBands,
    /// MACD
    pub macd: MACD,
    /// RSI
    pub rsi: RSI,
    /// ATR (OHLC 데이터가 없으면 미계산)
    pub atr: Option<ATR>,
    /// 연환산 변동성
    pub annualized_volatility: Volatility,
    /// 투자 추천 등급
    pub recommendation: Recommendation,
}

impl Display for StockAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.market, self.recommendation)
    }
}

/// 종목 분석기
///
/// 설정된 윈도우 매개변수로 전체 지표 집합을 일괄 계산합니다.
/// 호출 사이에 상태를 공유하지 않으며, 매 호출마다 입력 시계열
/// 전체에서 처음부터 다시 계산합니다.
#[derive(Debug)]
pub struct StockAnalyzer {
    config: AnalysisConfig,
}

impl StockAnalyzer {
    /// 새 분석기 생성
    ///
    /// # Arguments
    /// * `config` - 분석 설정 (지표 윈도우 매개변수)
    ///
    /// # Returns
    /// * `StockAnalyzer` - 새 분석기 인스턴스
    pub fn new(config: AnalysisConfig) -> Self {
        StockAnalyzer { config }
    }

    /// 분석 설정 참조 반환
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// 가격 시계열만으로 종목 분석
    ///
    /// OHLC 데이터가 없으므로 ATR은 계산되지 않습니다.
    ///
    /// # Arguments
    /// * `market` - 종목 식별자
    /// * `prices` - 가격 시계열
    ///
    /// # Returns
    /// * `StockAnalysis` - 분석 결과
    pub fn analyze(&self, market: &str, prices: &PriceSeries) -> StockAnalysis {
        self.run(market, prices, None)
    }

    /// OHLC 시계열로 종목 분석
    ///
    /// 종가 기반 지표는 종가 시계열로, ATR은 고가/저가/종가로 계산합니다.
    ///
    /// # Arguments
    /// * `market` - 종목 식별자
    /// * `ohlc` - OHLC 시계열
    ///
    /// # Returns
    /// * `StockAnalysis` - 분석 결과
    pub fn analyze_ohlc(&self, market: &str, ohlc: &OhlcSeries) -> StockAnalysis {
        let prices = ohlc.close_series();
        self.run(market, &prices, Some(ohlc))
    }

    fn run(&self, market: &str, prices: &PriceSeries, ohlc: Option<&OhlcSeries>) -> StockAnalysis {
        debug!("분석 시작: {} ({}개 거래일)", market, prices.len());

        if prices.is_empty() {
            debug!("가격 데이터가 비어 있습니다: {}", market);
        }

        let returns = daily_returns(prices);
        let average_daily_return = returns.mean();
        let volatility = returns.std_dev();

        let bollinger =
            BollingerBandsBuilder::new(self.config.bollinger_period, self.config.bollinger_multiplier)
                .build(prices);
        let macd = MACDBuilder::new(self.config.macd).build(prices);
        let rsi = RSIBuilder::new(self.config.rsi_period).build(&returns);
        let annualized_volatility =
            VolatilityBuilder::new(self.config.volatility_window).build(&returns);

        let atr = match ohlc {
            Some(series) => Some(ATRBuilder::new(self.config.atr_period).build(series)),
            None => {
                warn!("OHLC 데이터가 없어 ATR 계산을 건너뜁니다: {}", market);
                None
            }
        };

        // 요약 통계가 미정의면 NaN으로 전달되어 분기 순서에 의해 Sell
        let recommendation = recommendation::recommend(
            average_daily_return.unwrap_or(f64::NAN),
            volatility.unwrap_or(f64::NAN),
        );

        info!("분석 완료: {} → {}", market, recommendation);

        StockAnalysis {
            market: market.to_string(),
            daily_returns: returns,
            average_daily_return,
            volatility,
            bollinger,
            macd,
            rsi,
            atr,
            annualized_volatility,
            recommendation,
        }
    }
}

impl Default for StockAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
