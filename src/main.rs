//! hansearch - 검색어 교정/순위 명령줄 도구

use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use hansearch::config::{config_path, load_config};
use hansearch::correction::instrument::{Instrument, InstrumentCorrector, MemoryInstrumentIndex};
use hansearch::{Document, MemoryCorpus, Result, SearchConfig, Searcher};

#[derive(Parser, Debug)]
#[command(name = "hansearch")]
#[command(about = "한국어 검색어 교정과 TF-IDF 문서 순위")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// 설정 파일 (기본: $HANSEARCH_CONFIG 또는 ~/.config/hansearch/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 영문 자판 입력을 한글로 변환
    Convert { text: String },

    /// 질의 유형 (pure_chosung, mixed, full)
    Classify { text: String },

    /// 검색어 교정
    Correct {
        term: String,
        #[arg(long, value_name = "TERMS_JSON")]
        corpus: PathBuf,
    },

    /// 문서 순위 (용어 파일이 있으면 질의를 먼저 교정)
    Rank {
        query: String,
        #[arg(long, value_name = "DOCS_JSON")]
        docs: PathBuf,
        #[arg(long, value_name = "TERMS_JSON")]
        corpus: Option<PathBuf>,
    },

    /// 빈도 상위 용어
    Top {
        #[arg(long, value_name = "TERMS_JSON")]
        corpus: PathBuf,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// 종목 검색 (초성, 영문 자판 입력 지원)
    Instrument {
        query: String,
        #[arg(long, value_name = "INSTRUMENTS_JSON")]
        instruments: PathBuf,
    },
}

fn main() {
    // 로깅 초기화 (error/warn만 출력)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config(&cli.config.clone().unwrap_or_else(config_path));

    if let Err(e) = run(cli.command, config) {
        log::error!("{}", e);
        eprintln!("오류: {}", e);
        process::exit(1);
    }
}

fn run(command: Command, config: SearchConfig) -> Result<()> {
    match command {
        Command::Convert { text } => print_json(&hansearch::transliterate(&text)),
        Command::Classify { text } => print_json(&hansearch::classify(&text)),
        Command::Correct { term, corpus } => {
            let searcher = Searcher::new(Arc::new(MemoryCorpus::load(&corpus)?), config);
            print_json(&searcher.correct_query(&term)?)
        }
        Command::Rank {
            query,
            docs,
            corpus,
        } => {
            let documents: Vec<Document> = serde_json::from_str(&fs::read_to_string(&docs)?)?;
            match corpus {
                Some(path) => {
                    let searcher = Searcher::new(Arc::new(MemoryCorpus::load(&path)?), config);
                    print_json(&searcher.rank_corrected(&query, &documents)?)
                }
                None => {
                    let searcher = Searcher::new(Arc::new(MemoryCorpus::new()), config);
                    print_json(&searcher.rank(&query, &documents))
                }
            }
        }
        Command::Top { corpus, limit } => print_json(&MemoryCorpus::load(&corpus)?.top_terms(limit)),
        Command::Instrument { query, instruments } => {
            let list: Vec<Instrument> = serde_json::from_str(&fs::read_to_string(&instruments)?)?;
            let corrector = InstrumentCorrector::new(
                vec![Arc::new(MemoryInstrumentIndex::new(list))],
                config.instrument_limit,
            );
            let searcher = Searcher::new(Arc::new(MemoryCorpus::new()), config).with_instruments(corrector);
            print_json(&searcher.lookup_instrument(&query)?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
