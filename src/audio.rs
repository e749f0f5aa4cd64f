//! Interaction sounds.

use std::fmt;
use std::rc::Rc;

/// Handle to a sound asset owned by whoever implements [`AudioOut`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SoundClip(Rc<str>);

impl SoundClip {
    pub fn new(name: &str) -> Self {
        SoundClip(Rc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SoundClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SoundClip({})", self.0)
    }
}

pub trait AudioOut {
    /// Start playing `clip` once. Unknown clips are skipped silently.
    fn play(&mut self, clip: &SoundClip);
}

/// Output that plays nothing, for scenes without sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioOut for Silent {
    fn play(&mut self, _clip: &SoundClip) {}
}

/// Remembers every clip it was asked to play.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub played: Vec<SoundClip>,
}

impl AudioOut for Recorder {
    fn play(&mut self, clip: &SoundClip) {
        self.played.push(clip.clone());
    }
}
