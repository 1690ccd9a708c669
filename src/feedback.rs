//! Feedback markers

use rand::Rng;

/// Upward movement per tick, in pixels.
const RISE_PER_TICK: i32 = 3;

/// Opacity lost per tick.
const FADE_PER_TICK: u8 = 5;

/// Horizontal margin kept free of spawns at both edges.
const SPAWN_MARGIN: i32 = 50;

/// Vertical offset of the spawn row above the bottom edge.
const SPAWN_OFFSET: i32 = 50;

/// Whether a marker celebrates an addition or a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Something was added to the cart.
    Addition,

    /// Something left the cart.
    Removal,
}

/// A transient add/remove indicator drifting up the screen.
#[derive(Debug, Clone, Copy)]
pub struct FloatingMarker {
    x: i32,
    y: i32,
    opacity: u8,
    polarity: Polarity,
}

impl FloatingMarker {
    /// Horizontal position.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Vertical position.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Remaining opacity, 255 at spawn.
    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    /// Addition or removal.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    fn update(&mut self) {
        self.y -= RISE_PER_TICK;
        self.opacity = self.opacity.saturating_sub(FADE_PER_TICK);
    }

    fn is_done(&self) -> bool {
        self.opacity == 0 || self.y < 0
    }
}

/// Purely cosmetic collection of floating markers, advanced on a fixed tick.
///
/// Nothing here reads or writes cart, loyalty or navigation state; dropping
/// the whole queue changes no business outcome.
#[derive(Debug)]
pub struct FeedbackQueue {
    markers: Vec<FloatingMarker>,
    width: i32,
    height: i32,
}

impl FeedbackQueue {
    /// Create a queue sized to the visible area.
    pub fn new(width: i32, height: i32) -> Self {
        FeedbackQueue {
            markers: Vec::new(),
            width,
            height,
        }
    }

    /// Spawn a marker at a random spot along the bottom edge.
    pub fn spawn(&mut self, polarity: Polarity, rng: &mut impl Rng) {
        let x = if self.width > 2 * SPAWN_MARGIN {
            rng.gen_range(SPAWN_MARGIN..self.width - SPAWN_MARGIN)
        } else {
            self.width / 2
        };

        self.markers.push(FloatingMarker {
            x,
            y: self.height - SPAWN_OFFSET,
            opacity: u8::MAX,
            polarity,
        });
    }

    /// Advance every marker one tick, dropping markers that have fully
    /// faded or floated above the visible area.
    pub fn tick(&mut self) {
        for marker in &mut self.markers {
            marker.update();
        }

        self.markers.retain(|marker| !marker.is_done());
    }

    /// Live markers, oldest first.
    pub fn markers(&self) -> &[FloatingMarker] {
        &self.markers
    }

    /// Number of live markers.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Check if no markers are live.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn spawn_lands_on_the_bottom_row_inside_margins() {
        let mut queue = FeedbackQueue::new(1920, 1080);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..32 {
            queue.spawn(Polarity::Addition, &mut rng);
        }

        for marker in queue.markers() {
            assert!(marker.x() >= SPAWN_MARGIN, "x {} under margin", marker.x());
            assert!(marker.x() < 1920 - SPAWN_MARGIN, "x {} over margin", marker.x());
            assert_eq!(marker.y(), 1030);
            assert_eq!(marker.opacity(), 255);
        }
    }

    #[test]
    fn tick_moves_markers_up_and_fades_them() {
        let mut queue = FeedbackQueue::new(800, 600);
        let mut rng = StdRng::seed_from_u64(11);
        queue.spawn(Polarity::Removal, &mut rng);

        queue.tick();

        let marker = queue.markers().first().copied();
        let marker = marker.map(|m| (m.y(), m.opacity(), m.polarity()));

        assert_eq!(marker, Some((547, 250, Polarity::Removal)));
    }

    #[test]
    fn marker_is_dropped_once_fully_faded() {
        let mut queue = FeedbackQueue::new(800, 600);
        let mut rng = StdRng::seed_from_u64(11);
        queue.spawn(Polarity::Addition, &mut rng);

        // 255 / 5 = 51 ticks to reach zero opacity.
        for _ in 0..50 {
            queue.tick();
        }
        assert_eq!(queue.len(), 1);

        queue.tick();
        assert!(queue.is_empty());
    }

    #[test]
    fn marker_is_dropped_when_it_leaves_the_top_edge() {
        // Short viewport: the marker exits at the top well before fading.
        let mut queue = FeedbackQueue::new(800, 80);
        let mut rng = StdRng::seed_from_u64(11);
        queue.spawn(Polarity::Addition, &mut rng);

        // Spawn row is y = 30; 11 ticks put it below zero.
        for _ in 0..11 {
            queue.tick();
        }

        assert!(queue.is_empty());
    }

    #[test]
    fn narrow_viewport_spawns_at_center() {
        let mut queue = FeedbackQueue::new(60, 600);
        let mut rng = StdRng::seed_from_u64(11);

        queue.spawn(Polarity::Addition, &mut rng);

        assert_eq!(queue.markers().first().map(FloatingMarker::x), Some(30));
    }
}
