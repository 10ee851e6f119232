use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Terminal,
};
use statement_core::{Conversation, Sender, StatementSnapshot, SUGGESTIONS};
use std::io::{self, BufRead, Stdout, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::chat_worker::{self, ChatEvent, ChatRequest};
use crate::config::ChatSection;

/// Daily Markdown transcript under ~/.statement/chat/
struct ChatLog {
    path: Option<PathBuf>,
}

impl ChatLog {
    fn open_today(enabled: bool) -> Result<Self> {
        if !enabled {
            return Ok(Self { path: None });
        }
        let home = crate::state::ensure_statement_home()?;
        let dir = home.join("chat");
        std::fs::create_dir_all(&dir)?;
        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        Ok(Self {
            path: Some(dir.join(format!("{today}.md"))),
        })
    }

    fn append_system(&mut self, msg: &str) -> Result<()> {
        self.append("system", msg)
    }

    fn append_user(&mut self, msg: &str) -> Result<()> {
        self.append("user", msg)
    }

    fn append_bot(&mut self, msg: &str) -> Result<()> {
        self.append("bot", msg)
    }

    fn append(&mut self, role: &str, msg: &str) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let mut f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        writeln!(
            f,
            "- {} [{}] {}",
            chrono::Utc::now().to_rfc3339(),
            role,
            msg.replace('\n', " ")
        )?;
        Ok(())
    }
}

fn help_text() -> String {
    let mut s = String::from("Commands:\n- /help\n- /suggest\n\nSuggested questions (F1-F3):\n");
    for (i, q) in SUGGESTIONS.iter().enumerate() {
        s.push_str(&format!("- F{}: {}\n", i + 1, q));
    }
    s.push_str("\nShortcuts: Enter=send, Esc=quit, ?=toggle help (on an empty line)");
    s
}

fn handle_slash(input: &str) -> Option<String> {
    let s = input.trim();
    if !s.starts_with('/') {
        return None;
    }
    match s {
        "/help" => Some(help_text()),
        "/suggest" => Some(format!("Try asking:\n- {}", SUGGESTIONS.join("\n- "))),
        _ => Some("Unknown command. Try /help".to_string()),
    }
}

/// Line-oriented chat on stdin/stdout, for pipes and non-TTY use.
pub async fn run_plain(data: StatementSnapshot, cfg: &ChatSection) -> Result<()> {
    let mut convo = Conversation::new();
    let mut log = ChatLog::open_today(cfg.transcript)?;
    log.append_system("session_start")?;

    println!("{}", convo.turns()[0].text);
    let delay = Duration::from_millis(cfg.thinking_delay_ms);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        log.append_user(trimmed)?;

        let reply = match handle_slash(trimmed) {
            Some(r) => r,
            None => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                match convo.ask(trimmed, &data) {
                    Some(turn) => turn.text.clone(),
                    None => continue,
                }
            }
        };
        println!("{reply}\n");
        io::stdout().flush().ok();
        log.append_bot(&reply)?;
    }
    Ok(())
}

pub fn run_chat(data: StatementSnapshot, cfg: &ChatSection) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = chat_loop(&mut terminal, data, cfg);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

fn chat_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    data: StatementSnapshot,
    cfg: &ChatSection,
) -> Result<()> {
    let header_title = format!(
        "{} **** {}",
        data.card_provider, data.last_four_digits
    );

    let (req_tx, req_rx) = mpsc::unbounded_channel::<ChatRequest>();
    let (ev_tx, ev_rx) = std::sync::mpsc::channel::<ChatEvent>();
    let worker = tokio::spawn(chat_worker::run_worker(
        req_rx,
        ev_tx,
        Arc::new(data),
        Duration::from_millis(cfg.thinking_delay_ms),
    ));

    let mut convo = Conversation::new();
    let mut input = String::new();
    let mut show_help = true;
    let mut next_id: u64 = 0;
    let mut pending: usize = 0;

    let mut log = ChatLog::open_today(cfg.transcript)?;
    log.append_system("session_start")?;

    loop {
        while let Ok(ev) = ev_rx.try_recv() {
            if let ChatEvent::Reply { text, .. } = ev {
                log.append_bot(&text)?;
                convo.push_bot(text);
                pending = pending.saturating_sub(1);
            }
        }

        terminal.draw(|f| {
            let size = f.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(4),
                    Constraint::Min(5),
                    Constraint::Length(3),
                ])
                .split(size);

            let splash = Paragraph::new(Text::from(vec![
                Line::from(Span::styled(
                    "Statement Assistant",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    header_title.clone(),
                    Style::default().fg(Color::Cyan),
                )),
            ]))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(splash, chunks[0]);

            let mut lines: Vec<Line> = Vec::new();
            if show_help {
                lines.push(Line::from(Span::styled(
                    "Enter=send, Esc=quit, ?=help, F1-F3=suggested questions",
                    Style::default().fg(Color::Gray),
                )));
                for (i, q) in SUGGESTIONS.iter().enumerate() {
                    lines.push(Line::from(Span::styled(
                        format!("  F{}: {}", i + 1, q),
                        Style::default().fg(Color::Gray),
                    )));
                }
                lines.push(Line::raw(""));
            }

            for turn in convo.turns() {
                let (tag, color) = match turn.sender {
                    Sender::User => ("you", Color::Cyan),
                    Sender::Bot => ("assistant", Color::Magenta),
                };
                let mut body = turn.text.lines();
                let first = body.next().unwrap_or("").to_string();
                lines.push(Line::from(vec![
                    Span::styled(format!("{}: ", tag), Style::default().fg(color)),
                    Span::raw(first),
                ]));
                for rest in body {
                    lines.push(Line::raw(rest.to_string()));
                }
                lines.push(Line::raw(""));
            }

            if pending > 0 {
                lines.push(Line::from(Span::styled(
                    "assistant is thinking…",
                    Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
                )));
            }

            // Keep the newest turns in view
            let visible = chunks[1].height.saturating_sub(2) as usize;
            let scroll = lines.len().saturating_sub(visible) as u16;

            let history = Paragraph::new(Text::from(lines))
                .block(Block::default().borders(Borders::ALL).title("conversation"))
                .wrap(Wrap { trim: false })
                .scroll((scroll, 0));
            f.render_widget(history, chunks[1]);

            let input_widget = Paragraph::new(input.as_str())
                .block(Block::default().borders(Borders::ALL).title("message"))
                .style(Style::default().fg(Color::White));
            f.render_widget(input_widget, chunks[2]);
        })?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let submitted = match key.code {
            KeyCode::Esc => break,
            KeyCode::Char('?') if input.is_empty() => {
                show_help = !show_help;
                None
            }
            KeyCode::F(n @ 1..=3) => Some(SUGGESTIONS[(n - 1) as usize].to_string()),
            KeyCode::Enter => {
                let text = input.trim().to_string();
                input.clear();
                (!text.is_empty()).then_some(text)
            }
            KeyCode::Backspace => {
                input.pop();
                None
            }
            KeyCode::Char(c) => {
                input.push(c);
                None
            }
            _ => None,
        };

        let Some(text) = submitted else {
            continue;
        };
        log.append_user(&text)?;

        let preset = handle_slash(&text);
        if preset.is_none() {
            convo.push_user(text.clone());
        }
        if req_tx
            .send(ChatRequest {
                request_id: next_id,
                query: text,
                preset,
            })
            .is_ok()
        {
            next_id += 1;
            pending += 1;
        }
    }

    drop(req_tx);
    worker.abort();
    Ok(())
}
