use crate::infra::{load_bank, QuizCatalog};
use clap::Args;
use matchmaker::config::AppConfig;
use matchmaker::error::AppError;
use matchmaker::telemetry;
use matchmaker::workflows::catalog::CandidateCatalog;
use matchmaker::workflows::matchmaking::{
    MatchmakingEngine, Phase, PhraseProvider, Question, Reveal, SeededPhrases, ThinkingPause,
};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Args, Debug, Default)]
pub(crate) struct QuizArgs {
    /// CSV export of candidates (id,name,indications,technology,eligible). Defaults to the built-in catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Seed for the thinking phrases, for reproducible runs
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

struct QuizSetup {
    engine: MatchmakingEngine<QuizCatalog, SeededPhrases>,
    pause: ThinkingPause,
}

fn prepare(args: QuizArgs) -> Result<QuizSetup, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, config.environment)?;

    let catalog = QuizCatalog::from_path(args.catalog.or(config.engine.catalog_path));
    tracing::info!(source = %catalog.describe(), "loading candidate catalog");
    let seed = args.seed.or(config.engine.phrase_seed);
    let engine = MatchmakingEngine::new(
        load_bank(config.engine.bank_path.as_deref())?,
        catalog,
        SeededPhrases::from_optional_seed(seed),
    )?;

    Ok(QuizSetup {
        engine,
        pause: ThinkingPause::new(config.engine.thinking_delay),
    })
}

/// Interactive terminal quiz: numbered options are read from stdin.
pub(crate) async fn run_play(args: QuizArgs) -> Result<(), AppError> {
    let QuizSetup { mut engine, pause } = prepare(args)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!(
        "Answer with the option number. {} candidates are in play.\n",
        engine.remaining_candidates().len()
    );

    while let Some(question) = engine.current_question().cloned() {
        let number = engine.session().asked_question_ids().len() + 1;
        print_question(&mut std::io::stdout(), &question, number)?;

        let value = loop {
            print!("> ");
            std::io::stdout().flush()?;
            let Some(line) = lines.next_line().await? else {
                println!("\nInput closed, leaving the quiz.");
                return Ok(());
            };
            match pick_option(&question, &line) {
                Some(value) => break value,
                None => println!("Please pick a number between 1 and {}.", question.options.len()),
            }
        };

        println!("{}", engine.thinking_phrase());
        pause.wait().await;
        engine.answer(&question.id, &value)?;
        println!(
            "{} candidates left, confidence {:.0}%\n",
            engine.remaining_candidates().len(),
            engine.confidence()
        );
    }

    let reveal = engine.attempt_reveal()?;
    print_reveal(&mut std::io::stdout(), &reveal)?;
    Ok(())
}

/// Scripted run that always takes the first option.
pub(crate) fn run_demo(args: QuizArgs) -> Result<(), AppError> {
    let QuizSetup { mut engine, .. } = prepare(args)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    play_scripted(&mut engine, &mut out)?;
    Ok(())
}

fn play_scripted<C, P, W>(
    engine: &mut MatchmakingEngine<C, P>,
    out: &mut W,
) -> Result<Reveal, AppError>
where
    C: CandidateCatalog,
    P: PhraseProvider,
    W: Write,
{
    writeln!(
        out,
        "Matchmaking demo over {} candidates (bank {})",
        engine.remaining_candidates().len(),
        engine.bank().version()
    )?;

    while let Some(question) = engine.current_question().cloned() {
        print_question(out, &question, engine.session().asked_question_ids().len() + 1)?;
        let value = question.options[0].clone();
        writeln!(out, "> {value}")?;
        writeln!(out, "{}", engine.thinking_phrase())?;

        let phase = engine.answer(&question.id, &value)?;
        writeln!(
            out,
            "  [{phase}] {} candidates left, confidence {:.0}%",
            engine.remaining_candidates().len(),
            engine.confidence()
        )?;
        if phase == Phase::Attempting {
            break;
        }
    }

    let reveal = engine.attempt_reveal()?;
    print_reveal(out, &reveal)?;
    Ok(reveal)
}

fn print_question<W: Write>(out: &mut W, question: &Question, number: usize) -> std::io::Result<()> {
    writeln!(out, "\n{number}. {} ({})", question.text, question.kind.label())?;
    for (index, option) in question.options.iter().enumerate() {
        writeln!(out, "   {}) {option}", index + 1)?;
    }
    Ok(())
}

fn print_reveal<W: Write>(out: &mut W, reveal: &Reveal) -> std::io::Result<()> {
    writeln!(out, "\nYour match: {}", reveal.candidate.name)?;
    writeln!(out, "  Technology: {}", reveal.candidate.technology)?;
    writeln!(out, "  Indications: {}", reveal.candidate.indications)?;
    writeln!(out, "  Confidence: {:.0}%", reveal.confidence)?;
    if !reveal.insights.is_empty() {
        writeln!(out, "  Traits: {}", reveal.insights.join(", "))?;
    }
    writeln!(out, "\n{}", reveal.explanation)?;
    Ok(())
}

fn pick_option(question: &Question, input: &str) -> Option<String> {
    let index: usize = input.trim().parse().ok()?;
    index
        .checked_sub(1)
        .and_then(|index| question.options.get(index))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchmaker::workflows::catalog::StaticCatalog;
    use matchmaker::workflows::matchmaking::QuestionBank;
    use std::sync::Arc;

    #[test]
    fn scripted_demo_prints_every_turn_and_the_reveal() {
        let mut engine = MatchmakingEngine::new(
            Arc::new(QuestionBank::standard()),
            StaticCatalog::demo(),
            SeededPhrases::from_seed(9),
        )
        .expect("engine starts");
        let mut out = Vec::new();

        let reveal = play_scripted(&mut engine, &mut out).expect("demo completes");

        let transcript = String::from_utf8(out).expect("utf8 transcript");
        assert!(transcript.contains("1. "));
        assert!(transcript.contains("> professional"));
        assert!(transcript.contains(&format!("Your match: {}", reveal.candidate.name)));
        assert!(transcript.contains(&reveal.explanation));
        assert_eq!(engine.phase(), Phase::Revealing);
    }

    #[test]
    fn option_numbers_are_one_based() {
        let question = QuestionBank::standard()
            .profiling_question()
            .cloned()
            .expect("profiling question");

        assert_eq!(pick_option(&question, " 1 ").as_deref(), Some("professional"));
        assert_eq!(pick_option(&question, "2").as_deref(), Some("hobbyist"));
        assert_eq!(pick_option(&question, "0"), None);
        assert_eq!(pick_option(&question, "3"), None);
        assert_eq!(pick_option(&question, "yes"), None);
    }
}
