//! Terminal front end for the task-list demo.
//!
//! Each stdin line is a key chord (`Tab`, `Shift+Tab`, `Enter`, `Escape`,
//! `1`..`4`) or a command (`click`, `save`, `toggle`, `update`, `tasks`,
//! `quit`). Pending shortcuts fire once their quiet window elapses.

use std::time::Instant;

use a11y_consumer::{App, DemoConfig, Flow, TaskService, app::HELP};
use anyhow::Context;
use smol::io::{AsyncBufReadExt, BufReader};
use smol::stream::StreamExt;
use smol::{LocalExecutor, Timer, Unblock, future};
use tracing_subscriber::EnvFilter;

enum Step {
    Line(Option<std::io::Result<String>>),
    Deadline,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = DemoConfig::from_env();
    let ex = LocalExecutor::new();
    smol::block_on(ex.run(run(&ex, config)))
}

async fn run(ex: &LocalExecutor<'_>, config: DemoConfig) -> anyhow::Result<()> {
    let service = TaskService::new(&config.api_url)
        .with_context(|| format!("invalid API URL {:?}", config.api_url))?;
    let app = App::build(&config).context("building demo page")?;
    app.tasks().start_message_refresh(ex, config.message_refresh);

    match service.get_all_tasks().await {
        Ok(categories) => app.tasks().set_categories(categories)?,
        Err(err) => tracing::warn!(%err, url = %config.api_url, "could not load tasks"),
    }

    println!("a11y-consumer v{}", a11y_consumer::VERSION);
    println!("{HELP}");
    println!("{}", app.status_line());

    let mut lines = BufReader::new(Unblock::new(std::io::stdin())).lines();
    loop {
        let deadline = app.next_deadline();
        let input = async { Step::Line(lines.next().await) };
        let timer = async {
            match deadline {
                Some(at) => {
                    Timer::at(at).await;
                    Step::Deadline
                }
                None => future::pending().await,
            }
        };

        match future::or(input, timer).await {
            Step::Line(None) => break,
            Step::Line(Some(line)) => {
                let line = line.context("reading stdin")?;
                if app.handle_input(&line, Instant::now())? == Flow::Quit {
                    break;
                }
            }
            Step::Deadline => {
                app.poll(Instant::now())?;
            }
        }
        println!("{}", app.status_line());
    }

    app.tasks().stop_message_refresh();
    tracing::info!("bye");
    Ok(())
}
