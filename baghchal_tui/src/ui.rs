use baghchal::{
    Cell, Chooser, GameState, Outcome, Position, Side, Stage, WinReason, CAPTURES_TO_WIN,
    GRID_SIZE, TOTAL_GOATS,
};
use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Screen};

const CELL_WIDTH: u16 = 6;
const CELL_HEIGHT: u16 = 3;

const BOARD_WIDGET_WIDTH: u16 = CELL_WIDTH * GRID_SIZE as u16;
const BOARD_WIDGET_HEIGHT: u16 = CELL_HEIGHT * GRID_SIZE as u16;

/// Draws the grid, with the cursor, the selected piece and its destinations
/// highlighted.
struct BoardWidget<'a> {
    state: &'a GameState,
    cursor: Position,
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = centered(area, BOARD_WIDGET_WIDTH, BOARD_WIDGET_HEIGHT);
        let destinations: Vec<Position> = self
            .state
            .selected_moves()
            .into_iter()
            .map(|mv| mv.to)
            .collect();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let pos = Position::new(row, col);
                let rect = Rect {
                    x: area.x + col as u16 * CELL_WIDTH,
                    y: area.y + row as u16 * CELL_HEIGHT,
                    width: CELL_WIDTH,
                    height: CELL_HEIGHT,
                };
                let mut border_style = Style::new().fg(Color::DarkGray);
                if destinations.contains(&pos) {
                    border_style = Style::new().fg(Color::Green);
                }
                if self.state.selected() == Some(pos) {
                    border_style = Style::new().fg(Color::Yellow).bold();
                }
                if self.cursor == pos {
                    border_style = Style::new().fg(Color::Cyan).bold();
                }
                Block::new()
                    .border_type(BorderType::Rounded)
                    .borders(Borders::all())
                    .border_style(border_style)
                    .render(rect, buf);
                let (symbol, style) = match self.state.board().get(pos) {
                    Cell::Empty => (" ", Style::new()),
                    Cell::Goat => ("G", Style::new().fg(Color::White).bold()),
                    Cell::Tiger => ("T", Style::new().fg(Color::LightRed).bold()),
                };
                buf.set_string(rect.x + CELL_WIDTH / 2 - 1, rect.y + 1, symbol, style);
            }
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let area = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width),
        Constraint::Min(0),
    ])
    .split(area)[1];
    Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .split(area)[1]
}

pub fn status_text(state: &GameState, human: Side) -> String {
    match state.stage() {
        Stage::GameOver(outcome) => outcome_text(state, outcome),
        stage => {
            let whose = if state.turn() == human {
                format!("Your turn as {}. ", state.turn())
            } else {
                format!("AI's turn as {}. ", state.turn())
            };
            let prompt = match stage {
                Stage::AwaitingPlacement => format!(
                    "Place a goat ({}/{} placed).",
                    state.goats_placed(),
                    TOTAL_GOATS
                ),
                _ => match state.turn() {
                    Side::Goat => "Select and move a goat.".to_string(),
                    Side::Tiger => "Select and move a tiger.".to_string(),
                },
            };
            whose + &prompt
        }
    }
}

fn outcome_text(state: &GameState, outcome: Outcome) -> String {
    match outcome.reason {
        WinReason::GoatsCaptured => {
            format!("Tigers win! (Captured {} goats)", state.goats_captured())
        }
        WinReason::TigersTrapped => "Goats win! Tigers are trapped!".to_string(),
    }
}

pub fn captured_text(state: &GameState) -> String {
    format!(
        "Goats captured: {}/{}",
        state.goats_captured(),
        CAPTURES_TO_WIN
    )
}

fn help_text(state: &GameState) -> &'static str {
    if state.is_game_over() {
        "r: play again  n: change side  q: quit"
    } else {
        "arrows/hjkl: move cursor  enter: act  n: change side  q: quit"
    }
}

pub fn draw<C: Chooser>(frame: &mut Frame, app: &App<C>) {
    let area = frame.size();
    if area.width < BOARD_WIDGET_WIDTH || area.height < BOARD_WIDGET_HEIGHT + 4 {
        frame.render_widget(
            Paragraph::new("Terminal too small").alignment(Alignment::Center),
            area,
        );
        return;
    }
    match app.screen {
        Screen::RoleSelection => draw_role_selection(frame, area),
        Screen::Playing => draw_game(frame, area, app),
    }
}

fn draw_role_selection(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("Bagh-Chal".bold()),
        Line::from(""),
        Line::from("Which side do you want to play?"),
        Line::from(""),
        Line::from(vec!["g".bold(), ": goats (you place first)".into()]),
        Line::from(vec!["t".bold(), ": tigers".into()]),
        Line::from(""),
        Line::from("q: quit".dark_gray()),
    ];
    let area = centered(area, 40, lines.len() as u16);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_game<C: Chooser>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let state = app.game.state();
    let main_layout = Layout::new(
        Direction::Vertical,
        [
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(BOARD_WIDGET_HEIGHT),
            Constraint::Length(1),
        ],
    )
    .split(area);
    let status_style = if state.is_game_over() {
        Style::new().bold().fg(Color::Yellow)
    } else {
        Style::new()
    };
    frame.render_widget(
        Paragraph::new(status_text(state, app.game.human()))
            .style(status_style)
            .alignment(Alignment::Center),
        main_layout[0],
    );
    frame.render_widget(
        Paragraph::new(captured_text(state)).alignment(Alignment::Center),
        main_layout[1],
    );
    frame.render_widget(
        BoardWidget {
            state,
            cursor: app.cursor,
        },
        main_layout[2],
    );
    frame.render_widget(
        Paragraph::new(help_text(state).dark_gray()).alignment(Alignment::Center),
        main_layout[3],
    );
}

#[cfg(test)]
mod tests {
    use baghchal::Board;

    use super::*;

    #[test]
    fn placement_status() {
        let mut state = GameState::new();
        assert_eq!(
            status_text(&state, Side::Goat),
            "Your turn as Goat. Place a goat (0/20 placed)."
        );
        state.place_at(Position::new(2, 2));
        assert_eq!(
            status_text(&state, Side::Goat),
            "AI's turn as Tiger. Select and move a tiger."
        );
    }

    #[test]
    fn movement_status() {
        let board: Board = "T G G G T
                            G G G G G
                            G G . G G
                            G G G G G
                            T G G . T"
            .parse()
            .unwrap();
        let state = GameState::from_position(board, Side::Goat, TOTAL_GOATS, 1);
        assert_eq!(
            status_text(&state, Side::Tiger),
            "AI's turn as Goat. Select and move a goat."
        );
    }

    #[test]
    fn game_over_status() {
        let board: Board = "T G G G T
                            G . . G G
                            G G G G G
                            G G G G G
                            T G G G T"
            .parse()
            .unwrap();
        let mut state = GameState::from_position(board, Side::Goat, 19, 0);
        state.place_at(Position::new(1, 1));
        assert_eq!(
            status_text(&state, Side::Goat),
            "Goats win! Tigers are trapped!"
        );

        let board: Board = ". . . . T
                            . . . . .
                            T G . . .
                            . . . G .
                            T . . . T"
            .parse()
            .unwrap();
        let mut state = GameState::from_position(board, Side::Tiger, 6, 4);
        state.select_piece(Position::new(2, 0));
        state.move_to(Position::new(2, 2));
        assert_eq!(
            status_text(&state, Side::Goat),
            "Tigers win! (Captured 5 goats)"
        );
    }

    #[test]
    fn captured_counter() {
        let state = GameState::new();
        assert_eq!(captured_text(&state), "Goats captured: 0/5");
    }
}
