//! Animation scheduler
//!
//! Owns every live spring and tween and advances them each frame.

use crate::spring::Spring;
use crate::tween::Tween;
use slotmap::{new_key_type, SlotMap};
use std::time::Instant;

new_key_type! {
    pub struct SpringId;
    pub struct TweenId;
}

/// The animation scheduler that ticks all active animations
pub struct AnimationScheduler {
    springs: SlotMap<SpringId, Spring>,
    tweens: SlotMap<TweenId, Tween>,
    last_frame: Instant,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            springs: SlotMap::with_key(),
            tweens: SlotMap::with_key(),
            last_frame: Instant::now(),
        }
    }

    pub fn add_spring(&mut self, spring: Spring) -> SpringId {
        self.springs.insert(spring)
    }

    pub fn get_spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    pub fn get_spring_mut(&mut self, id: SpringId) -> Option<&mut Spring> {
        self.springs.get_mut(id)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> Option<Spring> {
        self.springs.remove(id)
    }

    pub fn add_tween(&mut self, tween: Tween) -> TweenId {
        self.tweens.insert(tween)
    }

    pub fn get_tween(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(id)
    }

    pub fn remove_tween(&mut self, id: TweenId) -> Option<Tween> {
        self.tweens.remove(id)
    }

    /// Tick all animations using wall-clock time since the previous tick
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.tick_by(dt);
    }

    /// Tick all animations by an explicit `dt` in seconds
    pub fn tick_by(&mut self, dt: f32) {
        self.last_frame = Instant::now();
        tracing::trace!(
            dt,
            springs = self.springs.len(),
            tweens = self.tweens.len(),
            "animation tick"
        );

        for (_, spring) in self.springs.iter_mut() {
            spring.step(dt);
        }
        for (_, tween) in self.tweens.iter_mut() {
            tween.step(dt);
        }
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        self.springs.values().any(|s| !s.is_settled())
            || self.tweens.values().any(|t| !t.is_finished())
    }

    /// Get the number of springs in the scheduler
    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnimationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationScheduler")
            .field("springs", &self.springs.len())
            .field("tweens", &self.tweens.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::spring::SpringConfig;

    #[test]
    fn test_tick_by_advances_everything() {
        let mut scheduler = AnimationScheduler::new();

        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(100.0);
        let spring_id = scheduler.add_spring(spring);
        let tween_id = scheduler.add_tween(Tween::new(0.0, 10.0, 0.1, Easing::Linear));

        assert!(scheduler.has_active_animations());
        for _ in 0..120 {
            scheduler.tick_by(1.0 / 60.0);
        }

        assert_eq!(scheduler.get_spring(spring_id).unwrap().value(), 100.0);
        assert_eq!(scheduler.get_tween(tween_id).unwrap().value(), 10.0);
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_remove() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.add_spring(Spring::new(SpringConfig::gentle(), 5.0));
        assert_eq!(scheduler.spring_count(), 1);
        assert!(scheduler.remove_spring(id).is_some());
        assert!(scheduler.remove_spring(id).is_none());
        assert_eq!(scheduler.spring_count(), 0);
        assert_eq!(scheduler.tween_count(), 0);
    }
}
