use {
    marionette::{Command, InputSnapshot},
    std::collections::HashMap,
};

/// Maps keys to figure commands.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ActionMap {
    map: HashMap<char, Command>,
}

impl ActionMap {
    pub fn get(&self, key: char) -> Option<Command> {
        self.map.get(&key).copied()
    }
}

impl Default for ActionMap {
    fn default() -> Self {
        let mut map = HashMap::new();

        map.insert('e', Command::NextComponent);
        map.insert('q', Command::PrevComponent);
        map.insert('w', Command::IncreaseSelected);
        map.insert('s', Command::DecreaseSelected);
        map.insert('a', Command::RotateSelectedPositive);
        map.insert('d', Command::RotateSelectedNegative);

        ActionMap { map }
    }
}

/// Player controller.
/// Turns terminal lines into per-frame input snapshots.
///
/// A line lists keys held during a frame,
/// optionally prefixed with the number of frames to hold them for:
/// `"12 w"` walks for twelve frames.
pub struct Player {
    action_map: ActionMap,
}

impl Player {
    pub fn new(action_map: ActionMap) -> Self {
        Player { action_map }
    }

    /// Returns how many frames the snapshot lasts and the snapshot itself.
    pub fn translate_line(&self, line: &str) -> (usize, InputSnapshot) {
        let line = line.trim();
        let digits = line
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(line.len());

        let repeat = line[..digits].parse().unwrap_or(1);

        let mut snapshot = InputSnapshot::empty();
        for key in line[digits..].chars().filter(|c| !c.is_whitespace()) {
            match self.action_map.get(key) {
                Some(command) => snapshot.press(command),
                None => tracing::trace!(%key, "Unbound key"),
            }
        }

        (repeat, snapshot)
    }
}
