// ── Behavior state contract ─────────────────────────────────────────────────

/// One behavior a state machine can be in.
///
/// `T` is the owning entity; state methods take it as an explicit `&mut`
/// parameter rather than holding a reference, so the owner can keep the
/// machine as a plain field without self-borrow gymnastics.
pub trait BehaviorState<T> {
    /// Called once when the machine switches into this state.
    fn enter(&mut self, _owner: &mut T) {}

    /// Called every tick while active. Returning `Some(next)` requests a
    /// transition; `None` means remain in the current state.
    fn update(&mut self, owner: &mut T, dt: f32) -> Option<Box<dyn BehaviorState<T>>>;

    /// Called once when the machine switches away from this state.
    fn exit(&mut self, _owner: &mut T) {}

    /// Stable kind identifier. Two states with the same name are the same
    /// kind: requesting a transition to the active kind is a no-op.
    fn name(&self) -> &'static str;
}

// ── Transition record ───────────────────────────────────────────────────────

/// Emitted by [`StateMachine::update`] when a state change actually happened.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: &'static str,
    pub to: &'static str,
}

// ── StateMachine ────────────────────────────────────────────────────────────

/// Minimal synchronous state machine over an owning entity `T`.
///
/// Exactly one state is active at all times. Transitions requested by
/// `update` take effect before the call returns: the old state's `exit`
/// and the new state's `enter` both run inside the same tick.
pub struct StateMachine<T> {
    current: Box<dyn BehaviorState<T>>,
}

impl<T> StateMachine<T> {
    /// Create a machine and immediately run the initial state's `enter`.
    pub fn new(mut initial: Box<dyn BehaviorState<T>>, owner: &mut T) -> Self {
        initial.enter(owner);
        Self { current: initial }
    }

    /// Kind name of the active state.
    pub fn current_name(&self) -> &'static str {
        self.current.name()
    }

    /// Drive the active state for one tick.
    ///
    /// A requested next state of the same kind is dropped without running
    /// exit/enter and without reporting a transition. A `None` request
    /// leaves the machine where it is.
    pub fn update(&mut self, owner: &mut T, dt: f32) -> Option<Transition> {
        let next = self.current.update(owner, dt)?;
        if next.name() == self.current.name() {
            return None;
        }
        let from = self.current.name();
        self.current.exit(owner);
        self.current = next;
        self.current.enter(owner);
        Some(Transition { from, to: self.current.name() })
    }

    /// Force a transition from outside the state's own update (character
    /// switch, teleport). Same-kind requests are still a no-op.
    pub fn force(&mut self, next: Box<dyn BehaviorState<T>>, owner: &mut T) -> Option<Transition> {
        if next.name() == self.current.name() {
            return None;
        }
        let from = self.current.name();
        self.current.exit(owner);
        self.current = next;
        self.current.enter(owner);
        Some(Transition { from, to: self.current.name() })
    }
}
