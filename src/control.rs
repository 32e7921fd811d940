//! Player control layer
//!
//! Turns polled jump/duck/grounded flags into a jump impulse and a pose the
//! host renders. Gravity and ground contact belong to the host physics.

use serde::{Deserialize, Serialize};

use crate::engine::InputSource;

/// What the player sprite shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerPose {
    #[default]
    Running,
    Jumping,
    Ducking,
}

/// Input flags for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlInput {
    pub jump: bool,
    pub duck: bool,
    /// Player body is resting on the ground
    pub grounded: bool,
}

impl ControlInput {
    pub fn poll<I: InputSource + ?Sized>(input: &I) -> Self {
        Self {
            jump: input.is_jump_pressed(),
            duck: input.is_duck_pressed(),
            grounded: input.is_grounded(),
        }
    }
}

/// Commands for the host produced by one control update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlOutput {
    /// New vertical velocity for the player body
    pub velocity_y: Option<f32>,
    /// Pose changed this frame
    pub pose: Option<PlayerPose>,
}

#[derive(Debug, Clone)]
pub struct PlayerControl {
    pose: PlayerPose,
    jump_velocity: f32,
}

impl PlayerControl {
    pub fn new(jump_velocity: f32) -> Self {
        Self {
            pose: PlayerPose::Running,
            jump_velocity,
        }
    }

    pub fn pose(&self) -> PlayerPose {
        self.pose
    }

    /// Jumping only starts from the ground; the pose is held while airborne
    pub fn update(&mut self, input: ControlInput) -> ControlOutput {
        let mut out = ControlOutput::default();

        let next = if !input.grounded {
            self.pose
        } else if input.jump {
            out.velocity_y = Some(self.jump_velocity);
            PlayerPose::Jumping
        } else if input.duck {
            PlayerPose::Ducking
        } else {
            PlayerPose::Running
        };

        if next != self.pose {
            self.pose = next;
            out.pose = Some(next);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grounded(jump: bool, duck: bool) -> ControlInput {
        ControlInput {
            jump,
            duck,
            grounded: true,
        }
    }

    #[test]
    fn test_jump_from_ground() {
        let mut control = PlayerControl::new(-600.0);
        let out = control.update(grounded(true, false));
        assert_eq!(out.velocity_y, Some(-600.0));
        assert_eq!(out.pose, Some(PlayerPose::Jumping));
    }

    #[test]
    fn test_no_double_jump() {
        let mut control = PlayerControl::new(-600.0);
        control.update(grounded(true, false));
        let out = control.update(ControlInput {
            jump: true,
            ..Default::default()
        });
        assert_eq!(out, ControlOutput::default());
        assert_eq!(control.pose(), PlayerPose::Jumping);
    }

    #[test]
    fn test_landing_and_ducking() {
        let mut control = PlayerControl::new(-600.0);
        control.update(grounded(true, false));
        // Land
        let out = control.update(grounded(false, false));
        assert_eq!(out.pose, Some(PlayerPose::Running));
        // Duck, then hold duck without a new pose command
        assert_eq!(control.update(grounded(false, true)).pose, Some(PlayerPose::Ducking));
        assert_eq!(control.update(grounded(false, true)).pose, None);
        // Stand up
        assert_eq!(control.update(grounded(false, false)).pose, Some(PlayerPose::Running));
    }
}
