use crate::core::{Actuator, Direction, GameMetadata, Grid, Position, UserAction};
use crate::models::{GameMessage, GameRenderState, TileAppearance};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use log::error;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;

const CELL_WIDTH: usize = 6;

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, Box<dyn std::error::Error>>
{
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(
        io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> Result<(), Box<dyn std::error::Error>> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        io::stdout(),
        DisableMouseCapture,
        crossterm::terminal::LeaveAlternateScreen
    )?;
    Ok(())
}

pub fn render_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &GameRenderState,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3), Constraint::Length(3)])
            .split(f.area());

        let board_paragraph = Paragraph::new(board_lines(&state.grid))
            .block(Block::default().borders(Borders::ALL).title("2048"))
            .alignment(Alignment::Center);
        f.render_widget(board_paragraph, chunks[0]);

        let score = match state.score_addition {
            Some(addition) => format!("Score: {} (+{})", state.metadata.score, addition),
            None => format!("Score: {}", state.metadata.score),
        };
        let score = match state.message {
            Some(message) => format!("{} | {}", score, message.text()),
            None => score,
        };
        let score_style = match state.message {
            Some(GameMessage::Won) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Some(GameMessage::Over) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            None => Style::default().fg(Color::White),
        };
        let score_paragraph = Paragraph::new(score)
            .block(Block::default().borders(Borders::ALL).title("Score"))
            .style(score_style)
            .alignment(Alignment::Center);
        f.render_widget(score_paragraph, chunks[1]);

        let instructions = if state.metadata.end {
            "Press R to play again, Q to quit"
        } else {
            "Controls: WASD, arrow keys or mouse drag to move, R to restart, Q to quit"
        };
        let instruction_paragraph = Paragraph::new(instructions)
            .block(Block::default().borders(Borders::ALL).title("Instructions"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(instruction_paragraph, chunks[2]);
    })?;
    Ok(())
}

fn board_lines(grid: &Grid) -> Vec<Line<'static>> {
    let size = grid.size() as i32;
    let mut lines = Vec::new();
    for y in 0..size {
        let spans: Vec<Span<'static>> = (0..size)
            .map(|x| match grid.cell_content(&Position { x, y }) {
                Some(tile) => Span::styled(
                    format!("{:^width$}", tile.value, width = CELL_WIDTH),
                    tile_style(tile.value, TileAppearance::of(tile)),
                ),
                None => Span::styled(
                    format!("{:^width$}", "·", width = CELL_WIDTH),
                    Style::default().fg(Color::DarkGray),
                ),
            })
            .collect();
        lines.push(Line::from(spans));
        lines.push(Line::default());
    }
    lines
}

fn tile_style(value: u32, appearance: TileAppearance) -> Style {
    let background = match value {
        2 => Color::Gray,
        4 => Color::LightYellow,
        8 => Color::Yellow,
        16 => Color::LightRed,
        32 => Color::Red,
        64 => Color::Magenta,
        128 => Color::LightGreen,
        256 => Color::Green,
        512 => Color::LightCyan,
        1024 => Color::Cyan,
        _ => Color::LightBlue,
    };
    let style = Style::default().fg(Color::Black).bg(background);
    match appearance {
        TileAppearance::Merged => style.add_modifier(Modifier::BOLD),
        TileAppearance::New => style.add_modifier(Modifier::ITALIC),
        TileAppearance::Moved => style,
    }
}

/// Draws every frame to the terminal. Tracks the last score so the score
/// line can show what the latest move earned.
pub struct ConsoleActuator {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    score: u64,
    message: Option<GameMessage>,
}

impl ConsoleActuator {
    pub fn new(terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Self {
        ConsoleActuator {
            terminal,
            score: 0,
            message: None,
        }
    }
}

impl Actuator for ConsoleActuator {
    fn actuate(&mut self, grid: &Grid, metadata: &GameMetadata) {
        let score_addition = metadata.score.checked_sub(self.score).filter(|&diff| diff > 0);
        self.score = metadata.score;
        if let Some(message) = GameMessage::from_metadata(metadata) {
            self.message = Some(message);
        }

        let state = GameRenderState {
            grid: grid.clone(),
            metadata: *metadata,
            score_addition,
            message: self.message,
        };
        if let Err(err) = render_game(&mut self.terminal, &state) {
            error!("failed to draw frame: {}", err);
        }
    }

    fn continue_game(&mut self) {
        self.message = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleInput {
    UserAction(UserAction),
    Quit,
    Timeout,
    Unknown,
}

/// Turns terminal key presses and mouse drags into game actions.
pub struct InputManager {
    swipe_threshold: i32,
    swipe_start: Option<(u16, u16)>,
}

impl InputManager {
    pub fn new(swipe_threshold: u16) -> Self {
        InputManager {
            swipe_threshold: swipe_threshold as i32,
            swipe_start: None,
        }
    }

    pub fn poll(&mut self) -> Result<ConsoleInput, Box<dyn std::error::Error>> {
        if event::poll(std::time::Duration::from_millis(50))? {
            return Ok(match event::read()? {
                Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind: KeyEventKind::Press,
                    ..
                }) => input_for_key(code, modifiers),
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => self.track_swipe(kind, column, row),
                _ => ConsoleInput::Unknown,
            });
        }
        Ok(ConsoleInput::Timeout)
    }

    fn track_swipe(&mut self, kind: MouseEventKind, column: u16, row: u16) -> ConsoleInput {
        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.swipe_start = Some((column, row));
                ConsoleInput::Unknown
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some((start_column, start_row)) = self.swipe_start.take() else {
                    return ConsoleInput::Unknown;
                };
                let dx = column as i32 - start_column as i32;
                let dy = row as i32 - start_row as i32;
                match Direction::from_swipe(dx, dy, self.swipe_threshold) {
                    Some(direction) => ConsoleInput::UserAction(UserAction::Move(direction)),
                    None => ConsoleInput::Unknown,
                }
            }
            _ => ConsoleInput::Unknown,
        }
    }
}

pub fn input_for_key(code: KeyCode, modifiers: KeyModifiers) -> ConsoleInput {
    if modifiers.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c') | KeyCode::Char('C')) {
        return ConsoleInput::Quit;
    }
    let chorded = modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER | KeyModifiers::META);
    if chorded {
        return ConsoleInput::Unknown;
    }
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ConsoleInput::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => ConsoleInput::UserAction(UserAction::Restart),
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Up))
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Right))
        }
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Down))
        }
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Left))
        }
        _ => ConsoleInput::Unknown,
    }
}
