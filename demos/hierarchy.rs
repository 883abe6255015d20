use crossterm::event::{Event, KeyCode, MouseEventKind};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Scrollbar, ScrollbarOrientation};
use ratatui::Terminal;

use tui_view_hierarchy::{snapshot, Element, Frame, Hierarchy, HierarchyState, Snapshot};

fn cell(label: &str, y: f64) -> Element {
    Element::new("UITableViewCell", Frame::new(0.0, y, 390.0, 44.0)).with_children(vec![
        Element::new("UITableViewCellContentView", Frame::new(0.0, 0.0, 390.0, 44.0))
            .with_children(vec![Element::new(
                label,
                Frame::new(16.0, 11.0, 200.0, 22.0),
            )]),
    ])
}

fn example_snapshot() -> Snapshot {
    let cells = (0..12)
        .map(|index| cell("UILabel", f64::from(index) * 44.0))
        .collect();
    let root = Element::new("UIWindow", Frame::new(0.0, 0.0, 390.0, 844.0)).with_children(vec![
        Element::new("UILayoutContainerView", Frame::new(0.0, 0.0, 390.0, 844.0)).with_children(
            vec![
                Element::new("UINavigationBar", Frame::new(0.0, 47.0, 390.0, 44.0))
                    .with_children(vec![
                        Element::new("UILabel", Frame::new(150.0, 12.0, 90.0, 20.0)),
                        Element::new("UIButton", Frame::new(340.0, 8.0, 34.0, 28.0)),
                    ]),
                Element::new("UITableView", Frame::new(0.0, 91.0, 390.0, 753.0))
                    .with_children(cells),
            ],
        ),
    ]);
    Snapshot::new(root)
}

fn main() -> std::io::Result<()> {
    // Terminal initialization
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    // App
    let snapshot = example_snapshot();
    let res = run_app(&mut terminal, &snapshot);

    // restore terminal
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::event::DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, snapshot: &Snapshot) -> std::io::Result<()> {
    let mut source = snapshot.data_source();
    let mut state = HierarchyState::default();
    state.select_first(&source);

    loop {
        terminal.draw(|frame| {
            let area = frame.size();
            let widget = Hierarchy::new(&source, snapshot::row)
                .block(
                    Block::bordered()
                        .title("Hierarchy")
                        .title_bottom(format!(
                            "{} of {} elements visible",
                            source.row_count(),
                            source.node_count()
                        )),
                )
                .scrollbar(Some(
                    Scrollbar::new(ScrollbarOrientation::VerticalRight)
                        .begin_symbol(None)
                        .track_symbol(None)
                        .end_symbol(None),
                ))
                .highlight_style(
                    Style::new()
                        .fg(Color::Black)
                        .bg(Color::LightGreen)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol(">> ");
            frame.render_stateful_widget(widget, area, &mut state);
        })?;

        match crossterm::event::read()? {
            Event::Key(key) => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('\n' | ' ') | KeyCode::Enter => {
                    state.toggle_selected(&mut source);
                }
                KeyCode::Char('c') => {
                    source.collapse_all();
                }
                KeyCode::Char('e') => {
                    source.expand_all();
                }
                KeyCode::Left => {
                    state.key_left(&mut source);
                }
                KeyCode::Right => {
                    state.key_right(&mut source);
                }
                KeyCode::Down => {
                    state.key_down(&source);
                }
                KeyCode::Up => {
                    state.key_up(&source);
                }
                KeyCode::Home => {
                    state.select_first(&source);
                }
                KeyCode::End => {
                    state.select_last(&source);
                }
                KeyCode::PageDown => {
                    state.scroll_down(3);
                }
                KeyCode::PageUp => {
                    state.scroll_up(3);
                }
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => {
                    state.scroll_down(1);
                }
                MouseEventKind::ScrollUp => {
                    state.scroll_up(1);
                }
                _ => {}
            },
            _ => {}
        }
    }
}
