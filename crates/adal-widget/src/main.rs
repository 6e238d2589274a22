//! adal-chat – terminal front-end for the assistant widget.
//!
//! Reads lines from stdin and drives a [`ChatWidget`] against a running
//! `adal-server`. Besides plain text, these commands are understood:
//!
//! - `/1` … `/4` – ask one of the quick questions (only before the first turn)
//! - `/open`, `/close` – toggle the widget
//! - `/quit` – exit

use adal_types::Role;
use adal_widget::{ChatWidget, DEFAULT_ENDPOINT, HttpTransport};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Parser)]
#[command(name = "adal-chat", version, about = "Chat with the Adal assistant from a terminal")]
struct Args {
    /// Base URL of the adal-server instance.
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    server: String,

    /// Path of the chat route.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Start with the widget closed.
    #[arg(long)]
    closed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let transport = HttpTransport::new(&args.server, &args.endpoint)?;
    println!("connected to {}", transport.url());

    let mut widget = ChatWidget::new(transport);
    if !args.closed {
        widget.open();
    }
    let mut shown = 0;
    render(&widget, &mut shown);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();
        match line {
            "/quit" => break,
            "/open" => {
                widget.open();
                shown = 0;
            }
            "/close" => {
                widget.close();
                println!("(assistant hidden, /open to show)");
                continue;
            }
            cmd if is_quick_pick(cmd) => {
                let index = cmd[1..].parse::<usize>().ok().and_then(|n| n.checked_sub(1));
                let asked = match index {
                    Some(i) if widget.is_open() => widget.ask_quick_question(i).await,
                    _ => false,
                };
                if !asked {
                    println!("(no quick question {})", &cmd[1..]);
                }
            }
            text => {
                if !widget.is_open() {
                    widget.open();
                }
                widget.set_input(text);
                if widget.can_submit() {
                    println!("…");
                    widget.send().await;
                }
            }
        }
        render(&widget, &mut shown);
    }

    Ok(())
}

fn is_quick_pick(cmd: &str) -> bool {
    cmd.len() == 2 && cmd.starts_with('/') && cmd[1..].chars().all(|c| c.is_ascii_digit())
}

/// Print transcript entries that have not been shown yet.
fn render<T: adal_widget::ChatTransport>(widget: &ChatWidget<T>, shown: &mut usize) {
    if !widget.is_open() {
        return;
    }
    for message in &widget.messages()[*shown..] {
        let who = match message.role {
            Role::User => "you",
            Role::Assistant => "adal",
        };
        println!("{who}> {}\n", message.content);
    }
    *shown = widget.messages().len();

    let quick = widget.quick_questions();
    if !quick.is_empty() {
        println!("Quick questions:");
        for (i, q) in quick.iter().enumerate() {
            println!("  /{} {q}", i + 1);
        }
    }
}
