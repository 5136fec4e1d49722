/// Animated star-field background.
///
/// Stars are generated deterministically from a seed, drift slowly across
/// the canvas, and twinkle on independent phases. The field carries an
/// explicit `running` stop token: the app pauses it while the lightbox is
/// open and the frame subscription shuts off with it.
use cgmath::Vector2;
use iced::mouse::Cursor;
use iced::widget::canvas::{self, Geometry, Path};
use iced::{Color, Point, Rectangle, Renderer, Theme};
use std::time::Instant;

use crate::ui::theme;

const STAR_COUNT: usize = 220;

struct Star {
    /// Normalized position in [0, 1) x [0, 1)
    pos: Vector2<f32>,
    /// Normalized drift per second
    drift: Vector2<f32>,
    radius: f32,
    /// Twinkle phase offset in radians
    phase: f32,
}

pub struct StarField {
    stars: Vec<Star>,
    elapsed: f32,
    last_tick: Option<Instant>,
    running: bool,
    cache: canvas::Cache,
}

impl StarField {
    pub fn new(seed: u64) -> Self {
        let mut rng = Lcg::new(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| {
                // Deeper stars are smaller and drift slower
                let depth = 0.3 + 0.7 * rng.next_f32();
                Star {
                    pos: Vector2::new(rng.next_f32(), rng.next_f32()),
                    drift: Vector2::new(-0.004 - 0.012 * depth, 0.002 * depth),
                    radius: 0.6 + 1.3 * depth,
                    phase: rng.next_f32() * std::f32::consts::TAU,
                }
            })
            .collect();

        StarField {
            stars,
            elapsed: 0.0,
            last_tick: None,
            running: true,
            cache: canvas::Cache::new(),
        }
    }

    /// Advance the animation to `now`. No-op while paused.
    pub fn tick(&mut self, now: Instant) {
        if !self.running {
            self.last_tick = Some(now);
            return;
        }
        if let Some(last) = self.last_tick {
            // Clamp so a long stall doesn't jump the field
            self.elapsed += now.duration_since(last).as_secs_f32().min(0.1);
        }
        self.last_tick = Some(now);
        self.cache.clear();
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
        self.last_tick = None;
    }
}

impl<Message> canvas::Program<Message> for StarField {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<Geometry> {
        let field = self.cache.draw(renderer, bounds.size(), |frame| {
            frame.fill_rectangle(Point::ORIGIN, frame.size(), theme::backdrop());

            for star in &self.stars {
                let x = (star.pos.x + star.drift.x * self.elapsed).rem_euclid(1.0)
                    * frame.width();
                let y = (star.pos.y + star.drift.y * self.elapsed).rem_euclid(1.0)
                    * frame.height();

                let twinkle =
                    0.5 + 0.5 * (star.phase + self.elapsed * 1.7).sin();
                let alpha = 0.25 + 0.65 * twinkle;

                frame.fill(
                    &Path::circle(Point::new(x, y), star.radius),
                    Color {
                        a: alpha,
                        ..Color::from_rgb(0.85, 0.90, 1.0)
                    },
                );
            }
        });

        vec![field]
    }
}

/// Small deterministic generator so the field needs no RNG dependency
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg(seed.wrapping_mul(0x9e3779b97f4a7c15).max(1))
    }

    fn next_f32(&mut self) -> f32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) as f32) / ((1u64 << 31) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_field_is_deterministic_for_a_seed() {
        let a = StarField::new(7);
        let b = StarField::new(7);
        for (sa, sb) in a.stars.iter().zip(&b.stars) {
            assert_eq!(sa.pos, sb.pos);
            assert_eq!(sa.radius, sb.radius);
        }
    }

    #[test]
    fn test_pause_token_stops_advancement() {
        let mut field = StarField::new(1);
        let t0 = Instant::now();
        field.tick(t0);
        field.tick(t0 + Duration::from_millis(50));
        let advanced = field.elapsed;
        assert!(advanced > 0.0);

        field.pause();
        field.tick(t0 + Duration::from_millis(150));
        assert_eq!(field.elapsed, advanced, "paused field does not advance");

        field.resume();
        field.tick(t0 + Duration::from_millis(200));
        field.tick(t0 + Duration::from_millis(250));
        assert!(field.elapsed > advanced, "resume picks the drift back up");
    }
}
