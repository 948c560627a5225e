// Terminal front end: frame rendering and the async event loop.
//
// The loop redraws at ~30 fps, turns key presses into `Action`s for the
// `App` state machine, and carries out any `Effect` it hands back.

pub mod input;
pub mod layout;
pub mod pages;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tracing::{info, warn};

use coach_collect::{collect_season, StatSource};

use crate::app::{App, Effect, Page};
use layout::{build_layout, AppLayout};

pub const APP_NAME: &str = "Coaching Assistant";

/// Render the complete frame for the current page.
pub fn render_frame(frame: &mut Frame, app: &App) {
    let layout = build_layout(frame.area());

    render_title_bar(frame, &layout, app);
    match &app.page {
        Page::Welcome => pages::welcome::render(frame, layout.body, app.data().season()),
        Page::PositionSelect(state) => pages::position_select::render(frame, layout.body, state),
        Page::DataInput(state) => pages::data_input::render(frame, layout.body, state),
        Page::Result(state) => pages::result::render(frame, layout.body, state),
        Page::Recommendations(state) => pages::recommendations::render(frame, layout.body, state),
    }
    render_status_line(frame, &layout, app);
    render_help_bar(frame, &layout, &app.page);
}

fn render_title_bar(frame: &mut Frame, layout: &AppLayout, app: &App) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {APP_NAME} "),
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {} | {}", app.data().season(), app.page.title())),
    ]);
    let paragraph = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.title_bar);
}

fn render_status_line(frame: &mut Frame, layout: &AppLayout, app: &App) {
    let text = app.status.as_deref().unwrap_or("");
    let paragraph = Paragraph::new(Span::styled(
        format!(" {text}"),
        Style::default().fg(Color::Yellow),
    ));
    frame.render_widget(paragraph, layout.status_line);
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, page: &Page) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        input::help_text(page),
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

/// Carry out `effect` for `app`.
///
/// A collection writes the position's stat file, drops the stale baseline
/// and replays the action that needed it. Failures end up in the status line.
pub async fn apply_effect(app: &mut App, effect: Effect, source: &dyn StatSource, limit: usize) {
    let Effect::Collect { position, retry } = effect else {
        return;
    };

    let season = app.data().season();
    let data_dir = app.data().data_dir().to_path_buf();
    match collect_season(source, &data_dir, season, &[position], limit).await {
        Ok(_) => {
            info!("collected {position} stats for {season}, retrying");
            app.data_mut().invalidate(position);
            if let Effect::Collect { .. } = app.handle(retry) {
                warn!("{position} stats for {season} still missing after collection");
                app.set_status(format!("No {position} stats for {season} after collecting"));
            }
        }
        Err(e) => {
            warn!("collecting {position} stats failed: {e}");
            app.set_status(format!("Collecting {position} stats failed: {e}"));
        }
    }
}

/// Run the TUI event loop until the user quits.
///
/// Stats missing for a chosen position are collected from `source`,
/// `limit` players at a time.
pub async fn run(mut app: App, source: &dyn StatSource, limit: usize) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    while !app.should_quit {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        let Some(action) = input::handle_key(key_event, &app.page) else {
                            continue;
                        };
                        let effect = app.handle(action);
                        if effect != Effect::None {
                            // Show the "collecting" notice before blocking on the network.
                            terminal.draw(|frame| render_frame(frame, &app))?;
                            apply_effect(&mut app, effect, source, limit).await;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("terminal input error: {e}");
                        break;
                    }
                    None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &app))?;
            }
        }
    }

    ratatui::restore();
    info!("coach exiting");
    Ok(())
}
