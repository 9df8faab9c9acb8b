//! Terminal shell for the quiz funnel.
//!
//! Prints each screen, reads answers from stdin and drives the controller.
//! Type an answer and press enter to move on, `b` to go back, `q` to quit
//! (progress is saved). Logs go to stderr.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

use quiz_funnel::adapters::{FileQuizStorage, InMemoryQuizStorage, LogNavigator, LogNotifier};
use quiz_funnel::application::{QuizController, QuizSettings, SessionOrigin};
use quiz_funnel::config::{AppConfig, StorageBackend, TelemetryConfig};
use quiz_funnel::domain::quiz::{FlowPhase, STAGE_DURATION};
use quiz_funnel::ports::QuizStateStorage;

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.telemetry);

    let storage: Arc<dyn QuizStateStorage> = match config.storage.backend {
        StorageBackend::File => Arc::new(FileQuizStorage::new(&config.storage.data_dir)),
        StorageBackend::Memory => Arc::new(InMemoryQuizStorage::new()),
    };

    let mut controller = QuizController::start(
        QuizSettings::from_config(&config),
        storage,
        Arc::new(LogNotifier),
        Arc::new(LogNavigator),
    )
    .await;

    if controller.origin() == SessionOrigin::Resumed {
        println!("Welcome back! Picking up where you left off.");
    }

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let keep_going = match controller.phase() {
            FlowPhase::Question(_) => ask_question(&mut controller, &mut input).await?,
            FlowPhase::Analyzing => {
                show_analysis(&mut controller).await?;
                true
            }
            FlowPhase::Completed => break,
            _ => show_results_screen(&mut controller, &mut input).await?,
        };
        if !keep_going {
            println!("Progress saved. See you soon!");
            break;
        }
    }

    Ok(())
}

fn init_tracing(telemetry: &TelemetryConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&telemetry.log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if telemetry.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Reads one trimmed line; `None` on end of input or `q`.
async fn read_command(input: &mut Input) -> std::io::Result<Option<String>> {
    match input.next_line().await? {
        Some(line) if line.trim().eq_ignore_ascii_case("q") => Ok(None),
        Some(line) => Ok(Some(line.trim().to_string())),
        None => Ok(None),
    }
}

async fn ask_question(
    controller: &mut QuizController,
    input: &mut Input,
) -> std::io::Result<bool> {
    let Some(step) = controller.current_step() else {
        return Ok(false);
    };
    let FlowPhase::Question(n) = controller.phase() else {
        return Ok(false);
    };

    println!();
    println!(
        "[{}] Step {} of {}: {}",
        controller.progress(),
        n,
        controller.settings().definition.total_steps(),
        step.prompt_key
    );
    if !step.options.is_empty() {
        println!("  options: {}", step.options.join(", "));
    }
    if controller.record().is_present(step.field) {
        println!("  (answered; press enter to keep)");
    }

    let Some(line) = read_command(input).await? else {
        return Ok(false);
    };

    if line.eq_ignore_ascii_case("b") {
        if let Err(e) = controller.back().await {
            println!("  {}", e.message);
        }
        return Ok(true);
    }

    if !line.is_empty() {
        if let Err(e) = controller.answer_raw(step.field, &line).await {
            println!("  {}", e.message);
            return Ok(true);
        }
    }

    if let Err(e) = controller.advance().await {
        println!("  {}", e.message);
    }
    Ok(true)
}

async fn show_analysis(controller: &mut QuizController) -> Result<(), Box<dyn std::error::Error>> {
    println!();
    let mut last_stage = None;
    while let Some(progress) = controller.analysis_progress() {
        if progress.is_complete() {
            break;
        }
        if last_stage != Some(progress.stage_index) {
            println!("  [{:>3}%] {}", progress.percent.value(), progress.stage_key);
            last_stage = Some(progress.stage_index);
        }
        tokio::time::sleep(STAGE_DURATION / 4).await;
    }
    controller.run_analysis().await?;
    Ok(())
}

async fn show_results_screen(
    controller: &mut QuizController,
    input: &mut Input,
) -> Result<bool, Box<dyn std::error::Error>> {
    println!();
    match controller.phase() {
        FlowPhase::Results => {
            let summary = controller.results_summary()?;
            println!("Your plan");
            println!(
                "  BMI {:.1} ({}), ideal weight {:.0}-{:.0} kg",
                summary.bmi, summary.bmi_label, summary.ideal_weight.min, summary.ideal_weight.max
            );
            println!(
                "  Lose {:.1} kg in about {} months ({} weeks)",
                summary.weight_to_lose, summary.months, summary.estimated_weeks
            );
            println!(
                "  Daily target {} kcal (TDEE {} - deficit {})",
                summary.daily_calorie_target, summary.tdee, summary.calorie_deficit
            );
            for point in summary.projection.iter().step_by(4) {
                println!("    week {:>3}: {:.1} kg", point.week, point.weight);
            }
        }
        FlowPhase::Comparison => {
            let view = controller.comparison()?;
            println!("The cost of waiting");
            println!(
                "  Start today: {:.1} kg by {} ({} months)",
                view.start_today.weight_shown,
                view.start_today.date_label,
                view.start_today.months_until_goal
            );
            println!(
                "  Start in 6 months: still {:.1} kg in {} ({} months)",
                view.start_later.weight_shown,
                view.start_later.date_label,
                view.start_later.months_until_goal
            );
        }
        FlowPhase::Gallery => {
            println!("Real transformations");
            for story in controller.gallery() {
                println!(
                    "  {} ({}): -{} kg in {} months. \"{}\"",
                    story.name, story.age, story.weight_lost_kg, story.months, story.quote
                );
            }
        }
        FlowPhase::Checkout => {
            let summary = controller.checkout_summary();
            println!("Your personalised plan is ready");
            println!(
                "  Lose {:.1} kg in {} months. Offer ends in {}",
                summary.weight_to_lose, summary.months, summary.countdown
            );
        }
        _ => {}
    }

    println!("(press enter to continue)");
    if read_command(input).await?.is_none() {
        return Ok(false);
    }
    controller.advance().await?;
    Ok(true)
}
