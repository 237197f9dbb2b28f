mod canvas;
mod effects;
mod settings;
mod steering;
use self::canvas::Canvas;
use self::effects::Effects;
use self::settings::{PanelChoice, SettingsPanel};
use self::steering::Steering;
use crate::app::Screen;
use crate::appearance::Appearance;
use crate::command::Command;
use crate::config::Config;
use crate::consts;
use crate::engine::{Direction, Ending, GameState, GrowthMode, RunState, Tick};
use crate::util::{center_rect, get_display_area};
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{poll, read, Event};
use rand::{rngs::StdRng, Rng};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::io;
use std::time::Instant;

/// The game screen: drives the tick engine from the clock and the keyboard
/// and draws the result.
///
/// `R` is used for placing food; a separate generator of the same type
/// drives the cosmetic effects so that they never perturb food placement.
#[derive(Clone, Debug)]
pub(crate) struct Game<R = StdRng> {
    rng: R,
    fx_rng: R,
    state: GameState,
    steering: Steering,
    effects: Effects,
    appearance: Appearance,
    config: Config,
    panel: Option<SettingsPanel>,
    warning: Option<Warning>,
    next_tick: Option<Instant>,
}

impl<R: Rng> Game<R> {
    pub(crate) fn new(config: Config, appearance: Appearance, mut rng: R, fx_rng: R) -> Game<R> {
        let state = GameState::reset(appearance.growth_mode(), &mut rng);
        log::info!(
            "Starting new game; food is at {:?}",
            state.food().map(|p| (p.x, p.y))
        );
        Game {
            rng,
            fx_rng,
            state,
            steering: Steering::new(),
            effects: Effects::new(config.game.tick_period()),
            appearance,
            config,
            panel: None,
            warning: None,
            next_tick: None,
        }
    }

    /// Show `warning` over the game.  The clock is stopped until it is
    /// dismissed.
    pub(crate) fn with_warning(mut self, warning: Warning) -> Game<R> {
        self.warning = Some(warning);
        self
    }

    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        if self.warning.is_none() && self.state.running() {
            if self.next_tick.is_none() {
                self.next_tick = Some(Instant::now() + self.config.game.tick_period());
            }
            let when = self.next_tick.expect("next_tick should be Some");
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.tick();
                self.next_tick = None;
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    fn tick(&mut self) {
        let direction = self.steering.commit();
        let Tick { state, ate } = self.state.advance(direction, &mut self.rng);
        self.state = state;
        if ate {
            log::debug!(
                "Snake ate; score is now {}, next food at {:?}",
                self.state.score(),
                self.state.food().map(|p| (p.x, p.y))
            );
        }
        match self.state.run_state() {
            RunState::Running => {
                if self.effects.tick(ate, &mut self.fx_rng).hiss {
                    log::debug!("Hiss");
                }
            }
            RunState::Terminated(ending) => {
                if ending != Ending::BoardFull {
                    log::debug!("Bump: {ending:?}");
                }
                log::info!(
                    "Game over ({ending:?}) with score {} and length {}",
                    self.state.score(),
                    self.state.snake().len()
                );
                self.effects.clear();
                self.panel = Some(SettingsPanel::new(
                    self.appearance,
                    self.state.score(),
                    ending,
                ));
            }
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        if let Some(ref warning) = self.warning {
            match warning.handle_event(event)? {
                WarningOutcome::Dismissed => self.warning = None,
                WarningOutcome::Quit => return Some(Screen::Quit),
            }
            return None;
        }
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        if let Some(ref mut panel) = self.panel {
            match panel.handle_command(cmd)? {
                PanelChoice::PlayAgain(appearance) => self.play_again(appearance),
                PanelChoice::Quit => return Some(Screen::Quit),
            }
            return None;
        }
        let direction = match cmd {
            Command::Quit | Command::Q => return Some(Screen::Quit),
            Command::Up => Direction::Up,
            Command::Down => Direction::Down,
            Command::Left => Direction::Left,
            Command::Right => Direction::Right,
            _ => return None,
        };
        if !self.steering.request(direction) {
            log::trace!("Ignoring reversal to {direction:?}");
        }
        None
    }

    fn play_again(&mut self, appearance: Appearance) {
        if appearance != self.appearance {
            log::info!("Appearance changed to {appearance:?}");
            self.appearance = appearance;
        }
        if let Err(e) = self.config.save_appearance(appearance) {
            log::warn!("{e}: {e:?}");
            self.warning = Some(Warning::from(e));
        }
        self.state = GameState::reset(appearance.growth_mode(), &mut self.rng);
        self.steering = Steering::new();
        self.effects.clear();
        self.panel = None;
        self.next_tick = None;
        log::info!(
            "Starting new game; food is at {:?}",
            self.state.food().map(|p| (p.x, p.y))
        );
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn render_snake(&self, canvas: &mut Canvas<'_>) {
        let snake = self.state.snake();
        let color = self.appearance.color;
        for (i, seg) in snake.segments().enumerate() {
            canvas.draw_cell(
                seg.pos,
                consts::SNAKE_BODY_SYMBOL,
                Style::new().fg(color.segment_color(i)),
            );
        }
        let eyes = self.appearance.eyes.symbol();
        // The trailing end is a second head that moves into the vacated cell
        if self.state.mode() == GrowthMode::TwoHead && snake.len() > 1 {
            let style = Style::new()
                .fg(color.eye_color())
                .bg(color.segment_color(snake.len() - 1));
            canvas.draw_cell(snake.tail().pos, eyes, style);
        }
        let head = snake.head();
        // Draw the head last so that a collision marker is always visible
        match self.state.run_state() {
            RunState::Terminated(Ending::Wall | Ending::SelfCollision) => {
                canvas.draw_cell(head.pos, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
            }
            RunState::Running | RunState::Terminated(Ending::BoardFull) => {
                let bg = if self.effects.mouth_open() {
                    consts::MOUTH_COLOR
                } else {
                    color.segment_color(0)
                };
                canvas.draw_cell(
                    head.pos,
                    eyes,
                    Style::new().fg(color.eye_color()).bg(bg),
                );
            }
        }
        if self.state.running() && self.effects.tongue_out() {
            if let Some(pos) = head
                .facing
                .advance(head.pos, consts::GRID_SIZE)
                .filter(|&p| !snake.occupies(p) && self.state.food() != Some(p))
            {
                canvas.draw_cell(pos, consts::TONGUE_SYMBOL, consts::TONGUE_STYLE);
            }
        }
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, block_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(" Score: {}", self.state.score()),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let block_size = Size {
            width: consts::GRID_SIZE
                .width
                .saturating_mul(consts::CELL_WIDTH)
                .saturating_add(2),
            height: consts::GRID_SIZE.height.saturating_add(2),
        };
        let block_area = center_rect(block_area, block_size);
        Block::bordered().render(block_area, buf);
        let field_area = block_area.inner(Margin::new(1, 1));
        buf.set_style(field_area, consts::FIELD_STYLE);

        let mut canvas = Canvas {
            area: field_area,
            buf,
        };
        if let Some(food) = self.state.food() {
            let kind = self.appearance.food;
            let style = Style::new()
                .fg(kind.color())
                .bg(consts::FOOD_HIGHLIGHT_COLOR);
            canvas.draw_cell(food, kind.symbol(), style);
        }
        self.render_snake(&mut canvas);

        if self.state.running() {
            Line::from_iter([
                Span::raw(" Move ("),
                Span::styled("←↑↓→", consts::KEY_STYLE),
                Span::raw(" / "),
                Span::styled("wasd", consts::KEY_STYLE),
                Span::raw(" / "),
                Span::styled("hjkl", consts::KEY_STYLE),
                Span::raw(") — Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ])
            .render(status_area, buf);
        } else {
            Span::from(" — GAME OVER —").render(status_area, buf);
        }

        if let Some(ref panel) = self.panel {
            let panel_area = center_rect(
                display,
                Size {
                    width: SettingsPanel::WIDTH,
                    height: SettingsPanel::HEIGHT,
                },
            );
            panel.render(panel_area, buf);
        }
        if let Some(ref warning) = self.warning {
            warning.render(display, buf);
        }
    }
}
