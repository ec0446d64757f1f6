//! Follow camera for the player ball

use glam::Vec3;

use crate::sim::Side;

#[derive(Debug, Clone)]
pub struct FollowCamera {
    pub position: Vec3,
    offset: Vec3,
    subject: Option<Side>,
}

impl FollowCamera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            offset: Vec3::ZERO,
            subject: None,
        }
    }

    /// Line up on the ball's x and keep the resulting offset from then on
    pub fn bind(&mut self, side: Side, ball: Vec3) {
        self.position.x = ball.x;
        self.offset = self.position - ball;
        self.subject = Some(side);
    }

    pub fn unbind(&mut self) {
        self.subject = None;
    }

    pub fn subject(&self) -> Option<Side> {
        self.subject
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn follow(&mut self, side: Side, ball: Vec3) {
        if self.subject == Some(side) {
            self.position = ball + self.offset;
        }
    }
}
