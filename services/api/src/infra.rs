use matchmaker::error::AppError;
use matchmaker::workflows::catalog::{CandidateCatalog, CatalogError, CsvCatalog, StaticCatalog};
use matchmaker::workflows::matchmaking::{
    Candidate, EngineError, MatchmakingEngine, QuestionBank, SeededPhrases,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) bank: Arc<QuestionBank>,
    pub(crate) catalog: Arc<QuizCatalog>,
    pub(crate) phrase_seed: Option<u64>,
}

impl AppState {
    /// Fresh engine over the shared bank and catalog. Each request gets its own.
    pub(crate) fn engine(
        &self,
    ) -> Result<MatchmakingEngine<&QuizCatalog, SeededPhrases>, EngineError> {
        MatchmakingEngine::new(
            self.bank.clone(),
            self.catalog.as_ref(),
            SeededPhrases::from_optional_seed(self.phrase_seed),
        )
    }
}

/// Candidate source picked at startup: a CSV export when configured, the built-in sample otherwise.
#[derive(Debug, Clone)]
pub(crate) enum QuizCatalog {
    Csv(CsvCatalog),
    Demo(StaticCatalog),
}

impl QuizCatalog {
    pub(crate) fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Self::Csv(CsvCatalog::new(path)),
            None => Self::Demo(StaticCatalog::demo()),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Csv(catalog) => catalog.path().display().to_string(),
            Self::Demo(_) => "built-in demo catalog".to_string(),
        }
    }
}

impl CandidateCatalog for QuizCatalog {
    fn eligible_candidates(&self) -> Result<Vec<Candidate>, CatalogError> {
        match self {
            Self::Csv(catalog) => catalog.eligible_candidates(),
            Self::Demo(catalog) => catalog.eligible_candidates(),
        }
    }
}

/// Load a JSON question bank when a path is configured, falling back to the standard bank.
pub(crate) fn load_bank(path: Option<&Path>) -> Result<Arc<QuestionBank>, AppError> {
    let Some(path) = path else {
        return Ok(Arc::new(QuestionBank::standard()));
    };

    let file = std::fs::File::open(path)?;
    let bank = QuestionBank::from_json_reader(std::io::BufReader::new(file))?;
    tracing::info!(path = %path.display(), version = bank.version(), "question bank loaded");
    Ok(Arc::new(bank))
}
