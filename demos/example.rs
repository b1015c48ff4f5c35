use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{Event, KeyCode, MouseEventKind};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Scrollbar, ScrollbarOrientation};
use ratatui::Terminal;

use tui_index_tree::{IndexTreeModel, Tree, TreeElement, TreeRow, TreeState, Visibility};

struct App {
    state: TreeState,
    model: IndexTreeModel<&'static str, Vec<TreeRow<&'static str>>>,
    query: Rc<RefCell<String>>,
}

fn items() -> Vec<TreeElement<&'static str>> {
    vec![TreeElement::new(
        "vscode",
        vec![
            TreeElement::new_leaf(".build"),
            TreeElement::new_leaf("git"),
            TreeElement::new(
                "github",
                vec![
                    TreeElement::new_leaf("calendar.yml"),
                    TreeElement::new_leaf("endgame"),
                    TreeElement::new_leaf("build.js"),
                ],
            ),
            TreeElement::new(
                "build",
                vec![
                    TreeElement::new_leaf("lib"),
                    TreeElement::new_leaf("gulpfile.js"),
                ],
            ),
            TreeElement::new(
                "src",
                vec![
                    TreeElement::new_leaf("main.rs"),
                    TreeElement::new_leaf("lib.rs"),
                    TreeElement::new(
                        "model",
                        vec![
                            TreeElement::new_leaf("node.rs"),
                            TreeElement::new_leaf("location.rs"),
                        ],
                    )
                    .collapsed(true),
                ],
            ),
            TreeElement::new_leaf("Cargo.toml"),
            TreeElement::new_leaf("README.md"),
        ],
    )]
}

impl App {
    fn new() -> Self {
        let query = Rc::new(RefCell::new(String::new()));
        let filter = {
            let query = Rc::clone(&query);
            move |element: &&'static str| {
                if element.contains(query.borrow().as_str()) {
                    Visibility::Visible
                } else {
                    Visibility::Recurse
                }
            }
        };
        let mut model = IndexTreeModel::with_filter(Vec::new(), filter);
        model
            .splice(&[0], 0, items())
            .expect("the empty model has a top level");
        Self {
            state: TreeState::default(),
            model,
            query,
        }
    }

    fn set_query(&mut self, change: impl FnOnce(&mut String)) {
        change(&mut self.query.borrow_mut());
        self.model.refilter();
        self.state.select_first(self.model.sink());
    }
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
    let app = App::new();
    let res = run_app(&mut terminal, app);

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

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let mut update = true;
    loop {
        if update {
            terminal.draw(|frame| {
                let area = frame.size();
                let widget = Tree::new(app.model.sink())
                    .block(
                        Block::bordered()
                            .title("Tree Model")
                            .title_bottom(format!("filter: {}", app.query.borrow())),
                    )
                    .experimental_scrollbar(Some(
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
                frame.render_stateful_widget(widget, area, &mut app.state);
            })?;
        }

        update = match crossterm::event::read()? {
            Event::Key(key) => match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.state.toggle_selected(&mut app.model),
                KeyCode::Left => app.state.key_left(&mut app.model),
                KeyCode::Right => app.state.key_right(&mut app.model),
                KeyCode::Down => app.state.key_down(app.model.sink()),
                KeyCode::Up => app.state.key_up(app.model.sink()),
                KeyCode::Home => app.state.select_first(app.model.sink()),
                KeyCode::End => app.state.select_last(app.model.sink()),
                KeyCode::PageDown => app.state.scroll_down(3),
                KeyCode::PageUp => app.state.scroll_up(3),
                KeyCode::Backspace => {
                    app.set_query(|query| {
                        query.pop();
                    });
                    true
                }
                KeyCode::Char(char) => {
                    app.set_query(|query| query.push(char));
                    true
                }
                _ => false,
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => app.state.scroll_down(1),
                MouseEventKind::ScrollUp => app.state.scroll_up(1),
                _ => false,
            },
            Event::Resize(_, _) => true,
            _ => false,
        };
    }
}
