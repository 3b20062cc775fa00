use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Grid, MatchResult, Phase, Player, Position, Snapshot};
use crate::metrics::SessionStats;

/// Terminal columns used per grid cell
const CELL_WIDTH: u16 = 2;
/// Bonus starts blinking with this many seconds left
const BONUS_BLINK_SECS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Empty,
    Food,
    Bonus { fading: bool },
    Head(Player, bool),
    Body(Player),
}

fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Green,
        Player::Two => Color::Blue,
    }
}

fn head_color(player: Player) -> Color {
    match player {
        Player::One => Color::LightGreen,
        Player::Two => Color::LightBlue,
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, stats: &SessionStats) {
        if snapshot.phase == Phase::Start {
            self.render_start(frame, snapshot);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let hud = self.render_hud(snapshot, stats);
        frame.render_widget(hud, chunks[0]);

        let grid_area = centered(
            chunks[1],
            Grid::WIDTH as u16 * CELL_WIDTH + 2,
            Grid::HEIGHT as u16 + 2,
        );
        let grid = self.render_grid(snapshot);
        frame.render_widget(grid, grid_area);

        if snapshot.phase == Phase::GameOver {
            let lines = self.game_over_lines(snapshot, stats);
            let panel_area = centered(chunks[1], 44, lines.len() as u16 + 2);
            let panel = Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            );
            frame.render_widget(Clear, panel_area);
            frame.render_widget(panel, panel_area);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_start(&self, frame: &mut Frame, snapshot: &Snapshot) {
        let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled("S N A K E", bold(Color::Green))),
            Line::from(Span::styled("2 Player", bold(Color::Blue))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Player 1 (Green): ", Style::default().fg(Color::Green)),
                Span::raw("WASD"),
            ]),
            Line::from(vec![
                Span::styled("Player 2 (Blue):  ", Style::default().fg(Color::Blue)),
                Span::raw("Arrow Keys"),
            ]),
            Line::from("ESC - Quit"),
            Line::from(""),
        ];
        lines.extend(high_score_lines(snapshot.high_scores));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press SPACE to start",
            bold(Color::White).add_modifier(Modifier::SLOW_BLINK),
        )));

        let area = centered(frame.area(), 44, lines.len() as u16 + 2);
        let start = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White)),
        );
        frame.render_widget(start, area);
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let tiles = tiles(snapshot);
        let mut lines = Vec::with_capacity(Grid::HEIGHT as usize);

        for row in tiles.chunks(Grid::WIDTH as usize) {
            let spans: Vec<Span> = row.iter().map(|&tile| tile_span(tile)).collect();
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_hud(&self, snapshot: &Snapshot, stats: &SessionStats) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled(
                format!("P1: {}", snapshot.score(Player::One)),
                Style::default()
                    .fg(player_color(Player::One))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Level: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.level.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled(
                format!("P2: {}", snapshot.score(Player::Two)),
                Style::default()
                    .fg(player_color(Player::Two))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(stats.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn game_over_lines(&self, snapshot: &Snapshot, stats: &SessionStats) -> Vec<Line<'static>> {
        let (message, color) = match snapshot.winner {
            Some(MatchResult::Won(player)) => {
                (format!("{} Wins!", player.label()), player_color(player))
            }
            Some(MatchResult::Draw) | None => ("It's a Draw!".to_string(), Color::White),
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(Span::styled(
                message,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "P1: {}  |  P2: {}",
                snapshot.score(Player::One),
                snapshot.score(Player::Two)
            )),
            Line::from(Span::styled(
                stats.format_tally(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
        ];
        text.extend(high_score_lines(snapshot.high_scores));
        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled(
                "SPACE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart | ", Style::default().fg(Color::Gray)),
            Span::styled(
                "ESC",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        text
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("WASD", Style::default().fg(player_color(Player::One))),
            Span::raw(" player 1 | "),
            Span::styled("↑↓←→", Style::default().fg(player_color(Player::Two))),
            Span::raw(" player 2 | "),
            Span::styled("ESC", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Paint the field row by row; later layers win
fn tiles(snapshot: &Snapshot) -> Vec<Tile> {
    let mut tiles = vec![Tile::Empty; Grid::cell_count()];
    let mut paint = |pos: Position, tile: Tile| {
        if Grid::contains(pos) {
            tiles[(pos.y * Grid::WIDTH + pos.x) as usize] = tile;
        }
    };

    if let Some(food) = snapshot.food {
        paint(food, Tile::Food);
    }
    if let Some(bonus) = snapshot.bonus {
        let fading = bonus.remaining <= BONUS_BLINK_SECS * snapshot.tick_rate
            && bonus.remaining % 2 == 1;
        paint(bonus.position, Tile::Bonus { fading });
    }
    for player in Player::ALL {
        let snake = snapshot.snake(player);
        for &segment in snake.body.iter().skip(1).rev() {
            paint(segment, Tile::Body(player));
        }
        if let Some(&head) = snake.body.first() {
            paint(head, Tile::Head(player, snake.alive));
        }
    }

    tiles
}

fn tile_span(tile: Tile) -> Span<'static> {
    match tile {
        Tile::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        Tile::Food => Span::styled(
            "O ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Tile::Bonus { fading: false } => Span::styled(
            "★ ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Tile::Bonus { fading: true } => Span::styled("★ ", Style::default().fg(Color::DarkGray)),
        Tile::Head(player, true) => Span::styled(
            "■ ",
            Style::default()
                .fg(head_color(player))
                .add_modifier(Modifier::BOLD),
        ),
        Tile::Head(player, false) => Span::styled(
            "X ",
            Style::default()
                .fg(player_color(player))
                .add_modifier(Modifier::BOLD),
        ),
        Tile::Body(player) => Span::styled("□ ", Style::default().fg(player_color(player))),
    }
}

fn high_score_lines(scores: &[u32]) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        "High Scores",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))];

    if scores.is_empty() {
        lines.push(Line::from(Span::styled(
            "No scores yet",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for (rank, score) in scores.iter().enumerate() {
            lines.push(Line::from(format!("{}. {}", rank + 1, score)));
        }
    }

    lines
}

/// A `width` x `height` rectangle centred in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
