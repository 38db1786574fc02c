use anyhow::Context;
use chat_client::{
    ChatController, DEFAULT_RELAY_URL, RelayClient, render, session::EXAMPLE_QUESTIONS,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const SCROLL_STEP: usize = 5;

enum Command<'a> {
    Ask(&'a str),
    Topics,
    Topic(Option<&'a str>),
    Examples,
    Example(&'a str),
    Clear,
    Up,
    Down,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse(line: &str) -> Command<'_> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Ask(line);
    };
    let (cmd, arg) = rest.split_once(' ').unwrap_or((rest, ""));
    let arg = arg.trim();
    match cmd {
        "topics" => Command::Topics,
        "topic" if arg.is_empty() || arg == "none" => Command::Topic(None),
        "topic" => Command::Topic(Some(arg)),
        "examples" => Command::Examples,
        "example" => Command::Example(arg),
        "clear" => Command::Clear,
        "up" => Command::Up,
        "down" => Command::Down,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(cmd),
    }
}

/// 1-based index into `len` items.
fn pick(arg: &str, len: usize) -> Option<usize> {
    arg.parse::<usize>().ok().filter(|n| (1..=len).contains(n)).map(|n| n - 1)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // stdout belongs to the conversation; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let base = std::env::var("RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string());
    let client = RelayClient::new(&base).with_context(|| format!("bad RELAY_URL {base:?}"))?;

    let mut ctl = ChatController::new(client);
    ctl.mount().await;
    println!("{}\n", render::screen(ctl.session()));
    println!("Type a question, or /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else { break };
                let redraw = match parse(&line) {
                    Command::Ask("") => false,
                    Command::Ask(q) => {
                        ctl.session_mut().set_input(q);
                        ctl.submit();
                        true
                    }
                    Command::Topics => {
                        println!("{}", render::topics(ctl.session()));
                        false
                    }
                    Command::Topic(None) => {
                        ctl.session_mut().select_topic(None);
                        true
                    }
                    Command::Topic(Some(arg)) => {
                        let name = pick(arg, ctl.session().topics().len())
                            .map(|i| ctl.session().topics()[i].name.clone())
                            .unwrap_or_else(|| arg.to_string());
                        ctl.session_mut().select_topic(Some(&name));
                        true
                    }
                    Command::Examples => {
                        println!("{}", render::examples());
                        false
                    }
                    Command::Example(arg) => match pick(arg, EXAMPLE_QUESTIONS.len()) {
                        Some(i) => {
                            let (q, topic) = EXAMPLE_QUESTIONS[i];
                            ctl.session_mut().ask_example(q, Some(topic));
                            ctl.submit();
                            true
                        }
                        None => {
                            println!("{}", render::examples());
                            false
                        }
                    },
                    Command::Clear => {
                        ctl.session_mut().clear();
                        true
                    }
                    Command::Up => {
                        ctl.session_mut().scroll_up(SCROLL_STEP);
                        true
                    }
                    Command::Down => {
                        ctl.session_mut().scroll_down(SCROLL_STEP);
                        true
                    }
                    Command::Help => {
                        println!("{}", render::HELP);
                        false
                    }
                    Command::Quit => break,
                    Command::Unknown(cmd) => {
                        println!("unknown command /{cmd}, try /help");
                        false
                    }
                };
                if redraw {
                    println!("{}\n", render::screen(ctl.session()));
                }
            }
            _ = ctl.next_completion() => {
                println!("{}\n", render::screen(ctl.session()));
            }
        }
    }

    Ok(())
}
