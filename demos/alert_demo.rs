//! Interactive demo: alerts and sheets driven by optional/enum state.
//!
//! Keys: `d` requests deletion of the next movie (optional-driven alert),
//! `f` fails the fake request (case-path-driven alert), `l` flips the same
//! state to loading while the failure alert is up (watch it collapse),
//! `s` opens the library sheet, `q` quits.
//!
//! Run with `RUST_LOG=debug cargo run --example alert_demo` to see the
//! presentation lifecycle in the log output.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use tui_navigation::LayoutConstraint::{Fill, Length};
use tui_navigation::{
    Alert, AlertButton, AlertPresenter, Element, Layer, SheetPresenter, StateCell, Theme,
    case_path, col, render_layers,
};

#[derive(Clone, Debug, PartialEq)]
struct Movie {
    title: String,
}

#[derive(Clone, Debug, PartialEq)]
enum Status {
    Loading,
    Failed(String),
}

#[derive(Clone)]
struct Model {
    library: Vec<Movie>,
    delete_request: Option<Movie>,
    request: Option<Status>,
    sheet_open: Option<()>,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            library: ["Alien", "Stalker", "Heat"]
                .into_iter()
                .map(|title| Movie {
                    title: title.to_string(),
                })
                .collect(),
            delete_request: None,
            request: None,
            sheet_open: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Msg {
    DeleteConfirmed(Movie),
    RetryRequested,
}

fn delete_alert() -> Alert<Movie, Msg> {
    Alert::titled(|movie: &Movie| format!("Delete \"{}\"?", movie.title))
        .message(|_| "This cannot be undone.".to_string())
        .actions(|movie| {
            vec![
                AlertButton::cancel("Keep"),
                AlertButton::destructive("Delete").on_select(Msg::DeleteConfirmed(movie.clone())),
            ]
        })
}

fn failure_alert() -> Alert<String, Msg> {
    Alert::titled(|_: &String| "Request failed".to_string())
        .message(|error: &String| error.clone())
        .actions(|_| {
            vec![
                AlertButton::cancel("Dismiss"),
                AlertButton::new("Retry").on_select(Msg::RetryRequested),
            ]
        })
}

fn base_view(model: &Model, events: &[String], theme: &Theme) -> Element<Msg> {
    let heading = Element::styled_text(Line::from(vec![Span::styled(
        "tui-navigation demo",
        Style::default()
            .fg(theme.accent_title)
            .add_modifier(Modifier::BOLD),
    )]));
    let help = Element::styled_text(Line::from(vec![Span::styled(
        "d: delete next movie   f: fail request   l: start loading   s: library sheet   q: quit",
        Style::default().fg(theme.text_secondary),
    )]));
    let library = Element::text(format!(
        "Library: {}",
        model
            .library
            .iter()
            .map(|movie| movie.title.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    ));
    let request = Element::text(format!("Request state: {:?}", model.request));

    let mut log = tui_navigation::element::ColumnBuilder::new();
    for line in events.iter().rev().take(8) {
        log = log.add(Element::text(line.clone()), Length(1));
    }

    col![
        heading => Length(1),
        help => Length(1),
        Element::text("") => Length(1),
        library => Length(1),
        request => Length(1),
        Element::text("") => Length(1),
        Element::panel(log.spacing(0).build()).title("Events").build() => Fill(1),
    ]
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    let theme = Theme::default();
    let model = StateCell::new(Model::default());
    let mut events: Vec<String> = Vec::new();

    let mut delete = AlertPresenter::new(
        model
            .binding()
            .map(|m| m.delete_request.clone(), |m, v| m.delete_request = v),
        delete_alert(),
    );
    let mut failure = AlertPresenter::new(
        model
            .binding()
            .map(|m| m.request.clone(), |m, v| m.request = v)
            .case(case_path!(Status::Failed(_))),
        failure_alert(),
    );
    let mut sheet = SheetPresenter::<(), Msg>::new(
        model
            .binding()
            .map(|m| m.sheet_open.clone(), |m, v| m.sheet_open = v),
        {
            let model = model.clone();
            move |_, _ctx| {
                let titles = model.with(|m| {
                    m.library
                        .iter()
                        .map(|movie| movie.title.clone())
                        .collect::<Vec<_>>()
                });
                let mut column = tui_navigation::element::ColumnBuilder::new();
                for title in titles {
                    column = column.add(Element::text(title), Length(1));
                }
                column = column.add(Element::text(""), Length(1));
                column = column.add(Element::text("Esc closes"), Length(1));
                column.spacing(0).build()
            }
        },
    )
    .title("Library");

    loop {
        for (name, event) in [
            ("delete", delete.sync()),
            ("failure", failure.sync()),
            ("sheet", sheet.sync()),
        ] {
            if let Some(event) = event {
                events.push(format!("{name}: {event:?}"));
            }
        }

        terminal.draw(|frame| {
            let area = frame.area();
            let mut layers = vec![Layer::new(base_view(&model.get(), &events, &theme))];
            if let Some(panel) = sheet.view(&theme) {
                layers.push(Layer::new(panel).center().dim(true));
            }
            if let Some(panel) = delete.view(&theme) {
                layers.push(Layer::new(panel).center().dim(true));
            }
            if let Some(panel) = failure.view(&theme) {
                layers.push(Layer::new(panel).center().dim(true));
            }
            render_layers(frame, area, &layers, &theme);
        })?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // Modal-first routing, topmost presentation wins.
        if failure.is_presenting() {
            if let Some(msg) = failure.handle_key(key) {
                apply(&model, msg, &mut events);
            }
        } else if delete.is_presenting() {
            if let Some(msg) = delete.handle_key(key) {
                apply(&model, msg, &mut events);
            }
        } else if sheet.is_presenting() {
            sheet.handle_key(key);
        } else {
            match key.code {
                KeyCode::Char('d') => {
                    let next = model.with(|m| m.library.first().cloned());
                    if let Some(movie) = next {
                        model.update(|m| m.delete_request = Some(movie.clone()));
                    } else {
                        events.push("library is empty".to_string());
                    }
                }
                KeyCode::Char('f') => {
                    model.update(|m| {
                        m.request = Some(Status::Failed("connection reset".to_string()));
                    });
                }
                KeyCode::Char('l') => {
                    model.update(|m| m.request = Some(Status::Loading));
                }
                KeyCode::Char('s') => {
                    model.update(|m| m.sheet_open = Some(()));
                }
                KeyCode::Char('q') => break,
                _ => {}
            }
        }
    }

    Ok(())
}

fn apply(model: &StateCell<Model>, msg: Msg, events: &mut Vec<String>) {
    match msg {
        Msg::DeleteConfirmed(movie) => {
            model.update(|m| m.library.retain(|candidate| candidate.title != movie.title));
            events.push(format!("deleted \"{}\"", movie.title));
        }
        Msg::RetryRequested => {
            model.update(|m| m.request = Some(Status::Loading));
            events.push("retrying".to_string());
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env().init();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}
