use bevy::prelude::*;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Pointer sources a recognizer accepts input from.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PointerSources: u8 {
        /// The primary pointing device (mouse).
        const PRIMARY = 1 << 0;
        const TOUCH = 1 << 1;
        const OTHER = 1 << 2;
    }
}

/// Which pointer sources count toward a gesture.
///
/// Defaults to primary-only. Touch platforms deliver misclassified
/// pointer events on some hosts, which historically forced accepting
/// everything there; [`PointerPolicy::accept_all`] keeps that workaround
/// available as configuration. Compatibility debt, not a design choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPolicy {
    pub accepted: PointerSources,
}

impl Default for PointerPolicy {
    fn default() -> Self {
        Self {
            accepted: PointerSources::PRIMARY,
        }
    }
}

impl PointerPolicy {
    pub fn accept_all() -> Self {
        Self {
            accepted: PointerSources::all(),
        }
    }

    pub fn accepts(&self, source: PointerSources) -> bool {
        self.accepted.intersects(source)
    }
}

/// Ephemeral per-gesture state, alive between pointer-down and
/// pointer-up/cancel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub start_position: Vec2,
    pub last_position: Vec2,
    /// Latched by the first move after the down; distinguishes a drag
    /// from a plain click.
    pub free_moving: bool,
}

impl DragSession {
    pub fn delta(&self) -> Vec2 {
        self.last_position - self.start_position
    }
}

/// How a gesture resolved on pointer-up/cancel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEnd {
    /// Press and release with no move in between; carries the press
    /// position.
    Click { position: Vec2 },
    DragEnd,
    Cancelled,
}

/// Pointer-gesture state machine: `Idle → Pressed → (Dragging | Idle)`.
#[derive(Debug, Default)]
pub struct DragRecognizer {
    policy: PointerPolicy,
    session: Option<DragSession>,
}

impl DragRecognizer {
    pub fn new(policy: PointerPolicy) -> Self {
        Self {
            policy,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Opens a session at `position`. Returns false when the pointer
    /// source is filtered out by the policy.
    pub fn pointer_down(&mut self, source: PointerSources, position: Vec2) -> bool {
        if !self.policy.accepts(source) {
            return false;
        }
        self.session = Some(DragSession {
            start_position: position,
            last_position: position,
            free_moving: false,
        });
        true
    }

    /// Feeds a move. Every accepted move during a session marks it
    /// free-moving and yields the accumulated delta from the press
    /// position.
    pub fn pointer_move(&mut self, source: PointerSources, position: Vec2) -> Option<Vec2> {
        if !self.policy.accepts(source) {
            return None;
        }
        let session = self.session.as_mut()?;
        session.free_moving = true;
        session.last_position = position;
        Some(session.delta())
    }

    /// Closes the session: a click if no move was seen, a drag end
    /// otherwise.
    pub fn pointer_up(&mut self, source: PointerSources) -> Option<GestureEnd> {
        if !self.policy.accepts(source) {
            return None;
        }
        let session = self.session.take()?;
        Some(if session.free_moving {
            GestureEnd::DragEnd
        } else {
            GestureEnd::Click {
                position: session.start_position,
            }
        })
    }

    /// Host-side cancellation (window defocus, touch interruption).
    pub fn pointer_cancel(&mut self) -> Option<GestureEnd> {
        self.session.take().map(|_| GestureEnd::Cancelled)
    }
}
