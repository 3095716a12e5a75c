//! Settle animators backed by the Partial animation engine

use partial_animation::{AnimationScheduler, Easing, Spring, SpringConfig, SpringId, Tween, TweenId};

use crate::collaborators::{AnimationFrame, SettleAnimator, SettleRequest};

/// Spring-driven settle.
///
/// The release velocity seeds the spring, so a flick carries its momentum
/// into the settle.
#[derive(Debug)]
pub struct SpringAnimator {
    scheduler: AnimationScheduler,
    config: SpringConfig,
}

impl SpringAnimator {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            scheduler: AnimationScheduler::new(),
            config,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }
}

impl SettleAnimator for SpringAnimator {
    type Handle = SpringId;

    fn start(&mut self, request: SettleRequest) -> SpringId {
        let mut spring = Spring::new(self.config, request.from);
        // points/ms -> points/s
        spring.set_velocity(request.velocity_hint * 1000.0);
        spring.set_target(request.to);
        tracing::debug!(
            from = request.from,
            to = request.to,
            velocity = request.velocity_hint,
            "spring settle started"
        );
        self.scheduler.add_spring(spring)
    }

    fn advance(&mut self, handle: SpringId, dt: f32) -> Option<AnimationFrame> {
        self.scheduler.get_spring_mut(handle)?.step(dt);
        let spring = self.scheduler.get_spring(handle)?;

        if spring.is_settled() {
            let value = spring.target();
            self.scheduler.remove_spring(handle);
            return Some(AnimationFrame {
                value,
                finished: true,
            });
        }

        Some(AnimationFrame {
            value: spring.value(),
            finished: false,
        })
    }

    fn cancel(&mut self, handle: SpringId) -> Option<f32> {
        self.scheduler.remove_spring(handle).map(|s| s.value())
    }
}

/// Fixed-duration settle along an easing curve; honors the duration hint
/// and ignores the velocity hint.
#[derive(Debug)]
pub struct EasedAnimator {
    scheduler: AnimationScheduler,
    easing: Easing,
}

impl EasedAnimator {
    pub fn new(easing: Easing) -> Self {
        Self {
            scheduler: AnimationScheduler::new(),
            easing,
        }
    }
}

impl Default for EasedAnimator {
    fn default() -> Self {
        Self::new(Easing::standard())
    }
}

impl SettleAnimator for EasedAnimator {
    type Handle = TweenId;

    fn start(&mut self, request: SettleRequest) -> TweenId {
        self.scheduler.add_tween(Tween::new(
            request.from,
            request.to,
            request.duration_hint,
            self.easing,
        ))
    }

    fn advance(&mut self, handle: TweenId, dt: f32) -> Option<AnimationFrame> {
        self.scheduler.get_tween(handle)?;
        // Only one settle is ever live per animator
        self.scheduler.tick_by(dt);
        let tween = self.scheduler.get_tween(handle)?;

        if tween.is_finished() {
            let value = tween.target();
            self.scheduler.remove_tween(handle);
            return Some(AnimationFrame {
                value,
                finished: true,
            });
        }

        Some(AnimationFrame {
            value: tween.value(),
            finished: false,
        })
    }

    fn cancel(&mut self, handle: TweenId) -> Option<f32> {
        self.scheduler.remove_tween(handle).map(|t| t.value())
    }
}
