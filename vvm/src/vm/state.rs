/// VM execution states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmState {
    Ready,
    Running,
    /// Stopped by a `halt` instruction
    Halted,
    /// Ran past the last instruction
    Finished,
    Error(String),
}

impl VmState {
    pub fn is_stopped(&self) -> bool {
        matches!(self, VmState::Halted | VmState::Finished | VmState::Error(_))
    }
}
