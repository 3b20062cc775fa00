use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use super::config::BONUS_LIFETIME_SECS;
use super::state::{Grid, Position};

/// Random draws before falling back to a scan of the free cells
pub const MAX_PLACEMENT_ATTEMPTS: usize = 64;

/// The timed high-value item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bonus {
    pub position: Position,
    /// Ticks left before it disappears
    pub remaining: u32,
}

/// Places the regular food and the optional bonus
pub struct FoodManager<R: Rng> {
    rng: R,
    food: Option<Position>,
    bonus: Option<Bonus>,
}

impl<R: Rng> FoodManager<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            food: None,
            bonus: None,
        }
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn bonus(&self) -> Option<Bonus> {
        self.bonus
    }

    /// Move the food to a random free cell.
    ///
    /// `occupied` holds the snake cells; the bonus cell is excluded here.
    /// Returns `None` and leaves the food absent when every cell is taken.
    pub fn spawn_food(&mut self, occupied: &HashSet<Position>) -> Option<Position> {
        let bonus = self.bonus.map(|b| b.position);
        self.food = None;
        self.food = self.pick_free_cell(|pos| occupied.contains(&pos) || Some(pos) == bonus);

        match self.food {
            Some(pos) => debug!(x = pos.x, y = pos.y, "food placed"),
            None => warn!("no free cell for food, placement deferred"),
        }
        self.food
    }

    /// Place a bonus that lives for five seconds at `tick_rate`.
    ///
    /// `occupied` holds the snake cells; the food cell is excluded here.
    pub fn spawn_bonus(&mut self, occupied: &HashSet<Position>, tick_rate: u32) -> Option<Bonus> {
        let food = self.food;
        let position = self.pick_free_cell(|pos| occupied.contains(&pos) || Some(pos) == food)?;

        let bonus = Bonus {
            position,
            remaining: BONUS_LIFETIME_SECS * tick_rate,
        };
        debug!(x = position.x, y = position.y, ticks = bonus.remaining, "bonus placed");
        self.bonus = Some(bonus);
        self.bonus
    }

    /// Count the bonus down by one tick, dropping it when it runs out
    pub fn tick_bonus(&mut self) {
        if let Some(bonus) = self.bonus.as_mut() {
            bonus.remaining = bonus.remaining.saturating_sub(1);
            if bonus.remaining == 0 {
                debug!("bonus expired");
                self.bonus = None;
            }
        }
    }

    pub fn clear_bonus(&mut self) {
        self.bonus = None;
    }

    fn pick_free_cell(&mut self, taken: impl Fn(Position) -> bool) -> Option<Position> {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let x = self.rng.gen_range(0..Grid::WIDTH);
            let y = self.rng.gen_range(0..Grid::HEIGHT);
            let pos = Position::new(x, y);

            if !taken(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = Grid::cells().filter(|&pos| !taken(pos)).collect();
        free.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn manager(seed: u64) -> FoodManager<StdRng> {
        FoodManager::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_food_avoids_occupied_cells() {
        let occupied: HashSet<Position> = (0..Grid::WIDTH)
            .flat_map(|x| (0..10).map(move |y| Position::new(x, y)))
            .collect();

        for seed in 0..50 {
            let mut food = manager(seed);
            let pos = food.spawn_food(&occupied).unwrap();
            assert!(Grid::contains(pos));
            assert!(!occupied.contains(&pos));
        }
    }

    #[test]
    fn test_food_avoids_bonus() {
        let mut food = manager(1);
        let mut occupied: HashSet<Position> = Grid::cells().collect();
        let open_a = Position::new(3, 3);
        let open_b = Position::new(4, 4);
        occupied.remove(&open_a);
        occupied.remove(&open_b);

        let bonus = food.spawn_bonus(&occupied, 10).unwrap();
        for _ in 0..20 {
            let pos = food.spawn_food(&occupied).unwrap();
            assert_ne!(pos, bonus.position);
        }
    }

    #[test]
    fn test_bonus_avoids_food() {
        let mut food = manager(2);
        let mut occupied: HashSet<Position> = Grid::cells().collect();
        occupied.remove(&Position::new(0, 0));
        occupied.remove(&Position::new(29, 19));

        let food_pos = food.spawn_food(&occupied).unwrap();
        let bonus = food.spawn_bonus(&occupied, 10).unwrap();
        assert_ne!(bonus.position, food_pos);
    }

    #[test]
    fn test_crowded_grid_falls_back_to_scan() {
        let mut occupied: HashSet<Position> = Grid::cells().collect();
        let last_free = Position::new(17, 13);
        occupied.remove(&last_free);

        let mut food = manager(3);
        assert_eq!(food.spawn_food(&occupied), Some(last_free));
    }

    #[test]
    fn test_full_grid_defers_placement() {
        let occupied: HashSet<Position> = Grid::cells().collect();
        let mut food = manager(4);

        assert_eq!(food.spawn_food(&occupied), None);
        assert_eq!(food.food(), None);
        assert_eq!(food.spawn_bonus(&occupied, 10), None);
        assert_eq!(food.bonus(), None);
    }

    #[test]
    fn test_bonus_lifetime_scales_with_rate() {
        let mut food = manager(5);
        let bonus = food.spawn_bonus(&HashSet::new(), 12).unwrap();
        assert_eq!(bonus.remaining, 60);
    }

    #[test]
    fn test_bonus_expires() {
        let mut food = manager(6);
        food.spawn_bonus(&HashSet::new(), 1).unwrap();

        for left in (1..5).rev() {
            food.tick_bonus();
            assert_eq!(food.bonus().map(|b| b.remaining), Some(left));
        }
        food.tick_bonus();
        assert_eq!(food.bonus(), None);

        // Ticking without a bonus is harmless
        food.tick_bonus();
        assert_eq!(food.bonus(), None);
    }

    #[test]
    fn test_clear_bonus() {
        let mut food = manager(7);
        food.spawn_bonus(&HashSet::new(), 10);
        assert!(food.bonus().is_some());
        food.clear_bonus();
        assert!(food.bonus().is_none());
    }
}
