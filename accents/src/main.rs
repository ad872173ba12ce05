use std::path::PathBuf;

use clap::Parser;
use lexicon::{Lexicon, SuggestionIndex, WordEntry};
use tracing_subscriber::EnvFilter;

use config::Config;
use contents_api::ContentsApi;
use history::SearchHistory;
use questions::Question;
use session::{Phase, QuizSession, Score, SessionError};
use storage::{LeaderboardStore, ScoreRecord};
use utilities::{input, match_option, str_to_bool};

mod config;
mod contents_api;
mod history;
mod questions;
mod retry;
mod session;
mod storage;
mod utilities;

type Leaderboard = LeaderboardStore<ContentsApi>;

const LEADERBOARD_ROWS: usize = 20;

/// Monosíl·labs amb accent diacrític (valencià)
#[derive(Parser)]
#[command(version)]
struct Args {
    /// JSON lexicon to use instead of the built-in word table
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Questions per quiz
    #[arg(long)]
    questions: Option<usize>,

    /// Only find words typed with their exact accents
    #[arg(long)]
    strict_accents: bool,
}

enum Reply {
    Answer(String),
    Skip,
    Stop,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = Config::new();
    if let Some(path) = args.lexicon {
        config.lexicon_path = Some(path);
    }
    if let Some(count) = args.questions {
        config.quiz_size = count.max(1);
    }
    if args.strict_accents {
        config.fold_accents = false;
    }

    let lexicon = match &config.lexicon_path {
        Some(path) => Lexicon::load(path)?,
        None => Lexicon::builtin(),
    };
    let index = SuggestionIndex::new(&lexicon);
    let leaderboard = match &config.leaderboard {
        Some(settings) => Some(LeaderboardStore::new(
            ContentsApi::new(settings)?,
            settings.cache_ttl,
            settings.retry,
        )),
        None => None,
    };

    let mut fold_accents = config.fold_accents;
    let mut history = SearchHistory::default();
    let mut session = QuizSession::new();

    println!("Monosíl·labs amb accent diacrític (valencià). Escriu `help` per a veure les ordres.");
    loop {
        let line = input(">> ")?;
        if line.is_empty() {
            // end of input
            break;
        }
        let mut command_parts = line.split_whitespace();
        if let Some(command) = command_parts.next() {
            let argument = command_parts.collect::<Vec<&str>>().join(" ");
            match command {
                "exit" | "quit" | "eixir" | "q" => {
                    break;
                }
                "help" | "ajuda" => print_help(),
                "define" | "find" | "cerca" => {
                    define_word(&lexicon, &index, &mut history, fold_accents, &argument);
                }
                "list" | "llista" => list_pairs(&lexicon),
                "details" | "detalls" => list_details(&lexicon),
                "history" | "historial" => show_history(&mut history, &argument),
                "accents" => match str_to_bool(argument) {
                    Some(enabled) => {
                        fold_accents = enabled;
                        print_accent_mode(fold_accents);
                    }
                    None => print_accent_mode(fold_accents),
                },
                "quiz" => {
                    let count = argument.parse::<usize>().unwrap_or(config.quiz_size).max(1);
                    practice(&lexicon, leaderboard.as_ref(), &mut session, count).await?;
                }
                "resume" | "continua" => {
                    resume(&lexicon, leaderboard.as_ref(), &mut session).await?;
                }
                "repeat" | "repetir" => {
                    repeat(&lexicon, leaderboard.as_ref(), &mut session).await?;
                }
                "review" | "repas" => review(&lexicon, &session),
                "reset" | "descarta" => {
                    session.reset();
                    println!("Quiz descartat.");
                }
                "leaderboard" | "top" | "classificacio" => {
                    show_leaderboard(leaderboard.as_ref()).await;
                }
                _ => {
                    println!("Ordre desconeguda {command}. Escriu `help` per a veure les ordres.");
                }
            }
        }
    }
    Ok(())
}

fn print_help() {
    println!("Ordres:");
    println!("  define <paraula>     definició, exemples i paraula en contrast");
    println!("  list                 parelles disponibles");
    println!("  details              parelles amb definicions i exemples");
    println!("  history [clear]      historial de cerques");
    println!("  accents on|off       buscar amb o sense accents");
    println!("  quiz [n]             nou quiz de n preguntes");
    println!("  resume               contestar les preguntes que falten");
    println!("  repeat               repetir el quiz corregit");
    println!("  review               repàs d'errors");
    println!("  reset                descartar el quiz");
    println!("  leaderboard          classificació");
    println!("  exit                 eixir");
}

fn print_accent_mode(fold_accents: bool) {
    if fold_accents {
        println!("Cerca sense accents activada. Ex.: escriu «mes» i trobarà també «més».");
    } else {
        println!("Cerca exacta: cal escriure els accents.");
    }
}

fn define_word(
    lexicon: &Lexicon,
    index: &SuggestionIndex,
    history: &mut SearchHistory,
    fold_accents: bool,
    word: &str,
) {
    if word.trim().is_empty() {
        println!("Escriu el monosíl·lab (amb o sense accent). Ex.: define més");
        return;
    }
    match index.resolve(word, fold_accents).and_then(|found| lexicon.get(found)) {
        Some(entry) => {
            history.push(&entry.word);
            print_definition(entry, false);
            if let Some(other) = lexicon.contrast(&entry.word) {
                print_definition(other, true);
            }
        }
        None => {
            println!("No està en la base de dades. Revisa l'accent.");
            let suggestions = index.suggest(word, fold_accents);
            if suggestions.is_empty() {
                println!("Paraules disponibles: {}", lexicon.words_sorted().join(", "));
            } else {
                println!("Pistes (mateixa lletra inicial): {}", suggestions.join(", "));
            }
        }
    }
}

fn print_definition(entry: &WordEntry, contrast: bool) {
    if contrast {
        println!("— {} — (contrast)", entry.word);
    } else {
        println!("— {} —", entry.word);
    }
    println!("    Categoria: {}", entry.category.as_deref().unwrap_or("—"));
    println!("    Definició: {}", entry.definition);
    println!("    Exemples:");
    for example in &entry.examples {
        println!("      - {example}");
    }
}

fn list_pairs(lexicon: &Lexicon) {
    println!("Monosíl·labs disponibles (en parelles):");
    for (accented, plain) in lexicon.pairs() {
        println!("  - {accented} / {plain}");
    }
}

fn list_details(lexicon: &Lexicon) {
    for (accented, plain) in lexicon.pairs() {
        for word in [accented, plain] {
            if let Some(entry) = lexicon.get(word) {
                print_definition(entry, false);
            }
        }
    }
}

fn show_history(history: &mut SearchHistory, argument: &str) {
    if matches!(argument, "clear" | "netejar") {
        history.clear();
        println!("Historial netejat.");
    } else if history.is_empty() {
        println!("Encara no hi ha cerques.");
    } else {
        for word in history.entries() {
            println!("  - {word}");
        }
    }
}

async fn practice(
    lexicon: &Lexicon,
    leaderboard: Option<&Leaderboard>,
    session: &mut QuizSession,
    count: usize,
) -> anyhow::Result<()> {
    if let Err(error) = session.new_quiz(lexicon, count, &mut rand::thread_rng()) {
        println!("{error}");
        return Ok(());
    }
    let generated = session.questions().len();
    if generated < count {
        println!("Només hi ha material per a {generated} preguntes.");
    }
    answer_questions(session, false)?;
    finish_quiz(lexicon, leaderboard, session).await
}

async fn resume(
    lexicon: &Lexicon,
    leaderboard: Option<&Leaderboard>,
    session: &mut QuizSession,
) -> anyhow::Result<()> {
    match session.phase() {
        Phase::Empty => println!("{}", SessionError::NoActiveQuiz),
        Phase::Corrected => println!("{}", SessionError::AlreadyCorrected),
        Phase::InProgress => {
            answer_questions(session, true)?;
            finish_quiz(lexicon, leaderboard, session).await?;
        }
    }
    Ok(())
}

async fn repeat(
    lexicon: &Lexicon,
    leaderboard: Option<&Leaderboard>,
    session: &mut QuizSession,
) -> anyhow::Result<()> {
    if let Err(error) = session.repeat() {
        println!("{error}");
        return Ok(());
    }
    answer_questions(session, false)?;
    finish_quiz(lexicon, leaderboard, session).await
}

fn answer_questions(session: &mut QuizSession, only_unanswered: bool) -> anyhow::Result<()> {
    let total = session.questions().len();
    for index in 0..total {
        if only_unanswered && session.answer(index).is_some() {
            continue;
        }
        println!("----------------------------------------");
        let question = session.questions()[index].clone();
        match ask_question(index, total, &question, session.answer(index))? {
            Reply::Answer(choice) => {
                if let Err(error) = session.set_answer(index, Some(&choice)) {
                    println!("{error}");
                }
            }
            Reply::Skip => {}
            Reply::Stop => break,
        }
    }
    Ok(())
}

fn ask_question(
    index: usize,
    total: usize,
    question: &Question,
    current: Option<&str>,
) -> anyhow::Result<Reply> {
    println!("{}/{}. {}", index + 1, total, question.prompt);
    for (number, option) in question.options.iter().enumerate() {
        println!("[{}]: {}", number + 1, option);
    }
    if let Some(current) = current {
        println!("Resposta actual: {current} (Enter per a mantindre-la)");
    }
    loop {
        let chosen = input("Tria la forma correcta (:s per a saltar, :q per a parar): ")?;
        if chosen.is_empty() {
            return Ok(Reply::Stop);
        }
        let chosen = chosen.trim();
        if chosen.is_empty() && current.is_some() {
            return Ok(Reply::Skip);
        }
        match chosen.parse::<usize>() {
            Ok(number) => {
                if let Some(option) = question.options.get(number.wrapping_sub(1)) {
                    return Ok(Reply::Answer(option.clone()));
                }
            }
            Err(_) => match &chosen.to_lowercase()[..] {
                ":s" | ":skip" => return Ok(Reply::Skip),
                ":q" | ":quit" => return Ok(Reply::Stop),
                other => {
                    if let Some(option) = match_option(other, &question.options) {
                        return Ok(Reply::Answer(option.to_owned()));
                    }
                }
            },
        }
        println!("No he entés la resposta, torna-ho a provar.");
    }
}

async fn finish_quiz(
    lexicon: &Lexicon,
    leaderboard: Option<&Leaderboard>,
    session: &mut QuizSession,
) -> anyhow::Result<()> {
    let score = match session.correct() {
        Ok(score) => score,
        Err(error) => {
            println!("{error} Escriu `resume` per a contestar-les.");
            return Ok(());
        }
    };
    review(lexicon, session);
    if let Some(leaderboard) = leaderboard {
        save_score(leaderboard, score).await?;
    }
    Ok(())
}

fn review(lexicon: &Lexicon, session: &QuizSession) {
    let mistakes = match session.mistakes() {
        Ok(mistakes) => mistakes,
        Err(error) => {
            println!("{error}");
            return;
        }
    };
    if let Some(score) = session.score() {
        println!("Puntuació: {score}");
    }
    if mistakes.is_empty() {
        println!("Cap error. Enhorabona!");
        return;
    }
    println!("Repàs d'errors:");
    for mistake in mistakes {
        let question = mistake.question;
        println!("  {}. {}", mistake.index + 1, question.solution());
        println!(
            "     Resposta triada: {}  |  Correcta: {}",
            mistake.chosen.unwrap_or("—"),
            question.answer
        );
        for word in [&question.answer, &question.pair] {
            if let Some(entry) = lexicon.get(word) {
                println!("     · {}: {}", entry.word, entry.definition);
            }
        }
    }
}

async fn save_score(leaderboard: &Leaderboard, score: Score) -> anyhow::Result<()> {
    let save = input("Vols guardar la puntuació en la classificació? (S/n): ")?;
    if !str_to_bool(save).unwrap_or(true) {
        return Ok(());
    }
    let name = input("Nom (opcional): ")?;
    let record = match ScoreRecord::now(&name, score) {
        Ok(record) => record,
        Err(error) => {
            println!("No es pot guardar la puntuació: {error}");
            return Ok(());
        }
    };
    if leaderboard.append(record).await {
        println!("Puntuació guardada.");
    } else {
        println!("No s'ha pogut guardar la puntuació. Es conserva mentre dure la sessió.");
    }
    Ok(())
}

async fn show_leaderboard(leaderboard: Option<&Leaderboard>) {
    let Some(leaderboard) = leaderboard else {
        println!("La classificació no està configurada (LEADERBOARD_REPO i LEADERBOARD_TOKEN).");
        return;
    };
    let standings = leaderboard.standings().await;
    if standings.is_empty() {
        println!("Encara no hi ha puntuacions.");
        return;
    }
    for (position, record) in standings.iter().take(LEADERBOARD_ROWS).enumerate() {
        let name = if record.name.is_empty() {
            "anònim"
        } else {
            &record.name[..]
        };
        println!(
            "{:>3}. {:<24} {:>3}/{:<3} {:>5.1}%  {}",
            position + 1,
            name,
            record.correct,
            record.total,
            record.percent(),
            record.timestamp
        );
    }
    let unsaved = leaderboard.unsaved().await.len();
    if unsaved > 0 {
        println!("({unsaved} puntuacions d'aquesta sessió encara no s'han pogut guardar)");
    }
}
