use log::{debug, error, info};
use std::env;
use std::path::PathBuf;
use stock_analysis::analyzer::StockAnalyzer;
use stock_analysis::config_loader::{AnalysisConfig, DEFAULT_ANALYSIS_CONFIG};
use stock_analysis::report;
use stock_analysis::series::PriceSeries;

fn main() {
    // 로그 초기화
    env_logger::init();

    info!("분석 설정 로더 시작");

    // 커맨드 라인 인수 파싱
    let args: Vec<String> = env::args().collect();
    debug!("커맨드 라인 인수: {:?}", args);

    // 설정 파일 경로 (지정되지 않은 경우 기본 경로 사용)
    let config_path = if args.len() >= 2 {
        debug!("사용자 지정 설정 파일 사용: {}", args[1]);
        PathBuf::from(&args[1])
    } else {
        debug!("기본 설정 파일 경로 사용");
        PathBuf::from("config/analysis.toml")
    };

    if !config_path.exists() {
        println!(
            "경고: 설정 파일이 존재하지 않습니다: {}",
            config_path.display()
        );
        println!("기본 설정으로 로드됩니다.");
    }

    // 설정 파일 로드
    let config = match AnalysisConfig::load(&config_path) {
        Ok(config) => {
            info!("설정 로드 성공: {}", config_path.display());
            config
        }
        Err(err) => {
            let error_msg = format!("설정 로드 실패: {}", err);
            error!("{}", error_msg);
            println!("{}", error_msg);

            // 에러 종류에 따라 추가 정보 제공
            if err.to_string().contains("파일") {
                println!("해결 방법: 설정 파일 경로를 확인하거나 기본 설정을 사용하세요.");
            } else if err.to_string().contains("파싱") {
                println!("해결 방법: 설정 파일 형식이 올바른지 확인하세요.");
            } else if err.to_string().contains("유효성 검사") {
                println!("해결 방법: 설정 값이 유효 범위 내에 있는지 확인하세요.");
            }

            DEFAULT_ANALYSIS_CONFIG.clone()
        }
    };

    println!("설정 파일: {}", config_path.display());
    println!("분석 대상 종목: {:?}", config.tickers);
    println!(
        "조회 기간: {} ~ {}",
        config.start_date, config.end_date
    );
    println!(
        "지표 매개변수: 볼린저({}, {}), MACD({},{},{}), RSI({}), ATR({}), 변동성({})",
        config.bollinger_period,
        config.bollinger_multiplier,
        config.macd.fast_period,
        config.macd.slow_period,
        config.macd.signal_period,
        config.rsi_period,
        config.atr_period,
        config.volatility_window
    );

    // 빈 가격 시계열로 분석기 동작 확인 (예제용으로만 사용)
    debug!("빈 가격 시계열로 분석기 확인");
    let analyzer = StockAnalyzer::new(config);
    let empty = PriceSeries::default();
    let analysis = analyzer.analyze("EXAMPLE", &empty);

    println!();
    println!("{}", report::render(&analysis, &empty));

    info!("분석 설정 로더 종료");
}
