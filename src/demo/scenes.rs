//! Scene scripts and the wrap-around cycle that walks them.
use std::collections::BTreeMap;

use serde::Serialize;

use super::DemoError;

/// A flag raised when the cycle reaches scene `raised_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneFlag {
    pub name: &'static str,
    pub raised_at: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoScript {
    pub name: &'static str,
    pub scenes: &'static [&'static str],
    pub flags: &'static [SceneFlag],
}

pub const SCHEDULING: DemoScript = DemoScript {
    name: "scheduling",
    scenes: &[
        "incoming-call",
        "request",
        "scheduling",
        "confirmation",
        "reminder",
    ],
    flags: &[SceneFlag {
        name: "appointment_booked",
        raised_at: 3,
    }],
};

pub const SCRIBE: DemoScript = DemoScript {
    name: "scribe",
    scenes: &[
        "listening",
        "transcribing",
        "structuring",
        "note-generated",
        "review",
    ],
    flags: &[
        SceneFlag {
            name: "is_recording",
            raised_at: 0,
        },
        SceneFlag {
            name: "note_generated",
            raised_at: 3,
        },
    ],
};

pub const CODING: DemoScript = DemoScript {
    name: "coding",
    scenes: &["note-received", "extracting", "code-suggestion", "validation"],
    flags: &[SceneFlag {
        name: "codes_suggested",
        raised_at: 2,
    }],
};

pub const ALL_DEMOS: [DemoScript; 3] = [SCHEDULING, SCRIBE, CODING];

pub fn find_demo(name: &str) -> Result<DemoScript, DemoError> {
    ALL_DEMOS
        .into_iter()
        .find(|d| d.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| DemoError::UnknownDemo(name.to_string()))
}

/// Observable state of a cycle after a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneSnapshot {
    pub demo: &'static str,
    pub index: usize,
    pub scene: &'static str,
    /// Completed passes through the whole script.
    pub cycles: u64,
    pub flags: BTreeMap<&'static str, bool>,
}

/// Current position in a script. Wraps modulo the scene count; returning
/// to scene 0 clears every flag before scene 0's own flags are raised.
#[derive(Debug, Clone)]
pub struct SceneCycle {
    script: DemoScript,
    index: usize,
    cycles: u64,
    flags: BTreeMap<&'static str, bool>,
}

impl SceneCycle {
    pub fn new(script: DemoScript) -> Result<Self, DemoError> {
        if script.scenes.is_empty() {
            return Err(DemoError::NoScenes(script.name));
        }
        let mut cycle = Self {
            script,
            index: 0,
            cycles: 0,
            flags: script.flags.iter().map(|f| (f.name, false)).collect(),
        };
        cycle.raise_flags();
        Ok(cycle)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn scene(&self) -> &'static str {
        self.script.scenes[self.index]
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Move to the next scene.
    pub fn advance(&mut self) -> &'static str {
        self.index = (self.index + 1) % self.script.scenes.len();
        if self.index == 0 {
            self.cycles += 1;
            self.flags.values_mut().for_each(|v| *v = false);
        }
        self.raise_flags();
        self.scene()
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            demo: self.script.name,
            index: self.index,
            scene: self.scene(),
            cycles: self.cycles,
            flags: self.flags.clone(),
        }
    }

    fn raise_flags(&mut self) {
        for flag in self.script.flags {
            if flag.raised_at == self.index {
                self.flags.insert(flag.name, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduling_books_at_confirmation() {
        let mut cycle = SceneCycle::new(SCHEDULING).unwrap();
        assert_eq!(cycle.scene(), "incoming-call");
        assert!(!cycle.flag("appointment_booked"));

        cycle.advance();
        cycle.advance();
        assert!(!cycle.flag("appointment_booked"));
        assert_eq!(cycle.advance(), "confirmation");
        assert!(cycle.flag("appointment_booked"));
        assert_eq!(cycle.advance(), "reminder");
        assert!(cycle.flag("appointment_booked"));
    }

    #[test]
    fn test_wrap_clears_flags() {
        let mut cycle = SceneCycle::new(CODING).unwrap();
        for _ in 0..3 {
            cycle.advance();
        }
        assert!(cycle.flag("codes_suggested"));

        assert_eq!(cycle.advance(), "note-received");
        assert_eq!(cycle.index(), 0);
        assert!(!cycle.flag("codes_suggested"));
        assert_eq!(cycle.snapshot().cycles, 1);
    }

    #[test]
    fn test_scribe_records_from_first_scene() {
        let mut cycle = SceneCycle::new(SCRIBE).unwrap();
        assert!(cycle.flag("is_recording"));
        assert!(!cycle.flag("note_generated"));

        for _ in 0..3 {
            cycle.advance();
        }
        assert_eq!(cycle.scene(), "note-generated");
        assert!(cycle.flag("note_generated"));

        cycle.advance();
        cycle.advance();
        // Back at "listening": note flag cleared, recording raised again
        assert!(cycle.flag("is_recording"));
        assert!(!cycle.flag("note_generated"));
    }

    #[test]
    fn test_index_stays_in_range() {
        for script in ALL_DEMOS {
            let mut cycle = SceneCycle::new(script).unwrap();
            for _ in 0..(script.scenes.len() * 3 + 1) {
                cycle.advance();
                assert!(cycle.index() < script.scenes.len());
            }
        }
    }

    #[test]
    fn test_empty_script_is_rejected() {
        let empty = DemoScript {
            name: "empty",
            scenes: &[],
            flags: &[],
        };
        assert_eq!(SceneCycle::new(empty).unwrap_err(), DemoError::NoScenes("empty"));
    }

    #[test]
    fn test_find_demo() {
        assert_eq!(find_demo("Scribe").unwrap().name, "scribe");
        assert!(matches!(find_demo("billing"), Err(DemoError::UnknownDemo(_))));
    }
}
