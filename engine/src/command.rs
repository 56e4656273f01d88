use crate::math::Axis;

/// Discrete command understood by a figure.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Command {
    NextComponent,
    PrevComponent,
    IncreaseSelected,
    DecreaseSelected,
    RotateSelectedPositive,
    RotateSelectedNegative,
}

impl Command {
    /// All commands in the order they are applied from a snapshot.
    pub const ALL: [Command; 6] = [
        Command::NextComponent,
        Command::PrevComponent,
        Command::IncreaseSelected,
        Command::DecreaseSelected,
        Command::RotateSelectedPositive,
        Command::RotateSelectedNegative,
    ];

    fn flag(self) -> InputSnapshot {
        match self {
            Command::NextComponent => InputSnapshot::NEXT_COMPONENT,
            Command::PrevComponent => InputSnapshot::PREV_COMPONENT,
            Command::IncreaseSelected => InputSnapshot::INCREASE_SELECTED,
            Command::DecreaseSelected => InputSnapshot::DECREASE_SELECTED,
            Command::RotateSelectedPositive => InputSnapshot::ROTATE_POSITIVE,
            Command::RotateSelectedNegative => InputSnapshot::ROTATE_NEGATIVE,
        }
    }
}

bitflags::bitflags! {
    /// Commands active during one frame.
    #[derive(Default)]
    pub struct InputSnapshot: u8 {
        const NEXT_COMPONENT = 0b000001;
        const PREV_COMPONENT = 0b000010;
        const INCREASE_SELECTED = 0b000100;
        const DECREASE_SELECTED = 0b001000;
        const ROTATE_POSITIVE = 0b010000;
        const ROTATE_NEGATIVE = 0b100000;
    }
}

impl InputSnapshot {
    pub fn press(&mut self, command: Command) {
        self.insert(command.flag());
    }

    pub fn is_active(&self, command: Command) -> bool {
        self.contains(command.flag())
    }

    /// Active commands in application order.
    pub fn commands(self) -> impl Iterator<Item = Command> {
        Command::ALL
            .iter()
            .copied()
            .filter(move |command| self.is_active(*command))
    }
}

impl std::iter::FromIterator<Command> for InputSnapshot {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        let mut snapshot = InputSnapshot::empty();
        for command in iter {
            snapshot.press(command);
        }
        snapshot
    }
}

/// Pose engine operation driven by a command.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Motion {
    /// Move the whole figure along its heading.
    Walk,

    /// Turn the whole figure about the vertical axis.
    Yaw,

    /// Rotate the selected joint about its pivot.
    Rotate(Axis),
}

/// Motions bound to the selected component.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Controls {
    /// Driven by `IncreaseSelected` and `DecreaseSelected`.
    pub increase: Motion,

    /// Driven by `RotateSelectedPositive` and `RotateSelectedNegative`.
    pub rotate: Motion,
}

impl Controls {
    pub fn new(increase: Motion, rotate: Motion) -> Self {
        Controls { increase, rotate }
    }

    /// Motion and sign for a command, `None` for selection commands.
    pub fn resolve(&self, command: Command) -> Option<(Motion, f32)> {
        match command {
            Command::IncreaseSelected => Some((self.increase, 1.0)),
            Command::DecreaseSelected => Some((self.increase, -1.0)),
            Command::RotateSelectedPositive => Some((self.rotate, 1.0)),
            Command::RotateSelectedNegative => Some((self.rotate, -1.0)),
            Command::NextComponent | Command::PrevComponent => None,
        }
    }
}

/// Cyclic cursor over a fixed list of components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    index: usize,
    len: usize,
}

impl Selection {
    pub fn new(len: usize) -> Self {
        debug_assert_ne!(len, 0, "Nothing to select");
        Selection { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.len;
    }

    pub fn prev(&mut self) {
        self.index = (self.index + self.len - 1) % self.len;
    }
}
