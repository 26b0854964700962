use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;

use konspekt_core::{
    ConceptKey, Course, FileStore, MasteryTracker, QuizAttempt, QuizState, due_for_review,
    format_seconds, progress, rank,
};

#[derive(Parser)]
#[command(name = "konspekt")]
#[command(about = "Track progress, rank videos, and take quizzes for AI-generated video courses")]
struct Cli {
    /// Path to a generated course payload (JSON)
    course: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show course overview, learning progress, and the recommended viewing order
    Show,
    /// Mark a concept complete (by module and concept index)
    Complete { module: usize, concept: usize },
    /// Clear saved progress for this course
    Reset,
    /// Take the quiz for a concept
    Quiz { module: usize, concept: usize },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let course = load_course(&cli.course).await?;
    let store = FileStore::new();
    let mut tracker = MasteryTracker::load(store, &course.course_title);

    match cli.command {
        Command::Show => show(&course, &tracker),
        Command::Complete { module, concept } => {
            let key = concept_key(&course, module, concept)?;
            if tracker.is_complete(key) {
                println!("{} already complete", style("✓").green().bold());
            } else {
                tracker.mark_complete(key);
                let concept = course.concept(key).expect("validated above");
                println!(
                    "{} Completed: {}",
                    style("✓").green().bold(),
                    style(&concept.name).bold()
                );
            }
        }
        Command::Reset => {
            tracker.reset();
            println!("{} Progress cleared", style("✓").green().bold());
        }
        Command::Quiz { module, concept } => {
            let key = concept_key(&course, module, concept)?;
            let concept = course.concept(key).expect("validated above");
            if concept.quiz.is_empty() {
                bail!("no quiz questions for concept '{}'", concept.name);
            }
            let passed = run_quiz(&concept.name, QuizAttempt::new(concept.quiz.clone()))?;
            if passed && !tracker.is_complete(key) {
                tracker.mark_complete(key);
                println!(
                    "{} Concept marked complete",
                    style("✓").green().bold()
                );
            }
        }
    }

    Ok(())
}

async fn load_course(path: &Path) -> Result<Course> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("could not read course file {}", path.display()))?;
    serde_json::from_str(&raw).context("course payload is not valid JSON")
}

fn concept_key(course: &Course, module: usize, concept: usize) -> Result<ConceptKey> {
    let key = ConceptKey::new(module, concept);
    if course.concept(key).is_none() {
        bail!("no concept at module {module}, concept {concept}");
    }
    Ok(key)
}

fn show(course: &Course, tracker: &MasteryTracker<FileStore>) {
    println!(
        "\n{}  {}\n",
        style(&course.course_title).cyan().bold(),
        style("Course Overview").dim()
    );
    println!(
        "  {} videos · {} concepts · {}",
        course.videos.len(),
        course.total_concepts,
        course
            .estimated_duration
            .as_deref()
            .unwrap_or("duration unknown")
    );

    if course.total_concepts > 0 {
        let done = tracker.completed_count();
        let pct = progress(course.total_concepts, done);
        let bar = ProgressBar::new(course.total_concepts as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("  {bar:40.cyan/blue} {pos}/{len} concepts")
                .expect("static template"),
        );
        bar.set_position(done as u64);
        bar.abandon();
        println!("  {:.0}% complete", pct);

        let due = due_for_review(course.total_concepts, done);
        if due > 0 {
            println!(
                "  {} {} concept{} due for review",
                style("🔁").bold(),
                due,
                if due == 1 { "" } else { "s" }
            );
        }
    }

    if !course.videos.is_empty() {
        println!("\n{}", style("Recommended sequence").bold());
        for entry in rank(&course.videos) {
            let transcript = if entry.video.has_transcript {
                style("transcript").green()
            } else {
                style("no transcript").yellow()
            };
            println!(
                "  {} {} · {} · {} · {}",
                style(format!("#{}", entry.rank)).cyan().bold(),
                entry.video.title,
                entry.video.channel,
                format_seconds(entry.seconds),
                transcript
            );
        }
    }

    if course.modules.is_empty() {
        println!("\n{}", style("No course modules were generated.").dim());
        return;
    }

    for (m, module) in course.modules.iter().enumerate() {
        println!("\n{}", style(&module.module_name).bold());
        for (c, concept) in module.concepts.iter().enumerate() {
            let mark = if tracker.is_complete(ConceptKey::new(m, c)) {
                style("✓").green().bold()
            } else {
                style("·").dim()
            };
            println!(
                "  {} [{m}-{c}] {} ({})",
                mark,
                concept.name,
                format_seconds(Some(concept.start_seconds()))
            );
        }
    }
    println!();
}

fn run_quiz(concept_name: &str, mut quiz: QuizAttempt) -> Result<bool> {
    println!(
        "\n{}  {}\n",
        style("Quiz").cyan().bold(),
        style(concept_name).bold()
    );

    let total = quiz.len();
    loop {
        let QuizState::InProgress { index } = quiz.current_state() else {
            break;
        };
        let question = quiz.current_question().expect("in-progress index is valid");
        println!(
            "{} {}",
            style(format!("Question {}/{}", index + 1, total)).dim(),
            question.question
        );
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}) {}", i + 1, option);
        }

        loop {
            print!("{} ", style("answer:").bold());
            std::io::stdout().flush()?;
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            match line.trim().parse::<usize>() {
                Ok(n) if (1..=question.options.len()).contains(&n) => {
                    quiz.select_answer(index, n - 1);
                    break;
                }
                _ => println!("enter a number between 1 and {}", question.options.len()),
            }
        }
        quiz.advance();
        println!();
    }

    let QuizState::Scored(result) = quiz.current_state() else {
        unreachable!("quiz loop exits only once scored");
    };

    println!(
        "{} {}/{} ({:.0}%)\n",
        style("Score:").bold(),
        result.score,
        result.total,
        result.percentage
    );
    for review in &result.questions {
        let mark = if review.is_correct {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };
        println!("{} {}", mark, review.question);
        if !review.is_correct {
            println!(
                "    your answer: {}",
                review.chosen.as_deref().unwrap_or("(not answered)")
            );
            println!("    correct answer: {}", review.correct_answer);
        }
        if !review.explanation.is_empty() {
            println!("    {}", style(&review.explanation).dim());
        }
    }

    Ok(result.score == result.total)
}
