use super::arrow::{Arrow, FaceZones, GoldsType};
use crate::error::{ArgumentError, Result, ScorerError};
use std::fmt;

pub const DEFAULT_END_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndState {
    Empty,
    PartiallyFilled,
    Full,
}

/// A batch of arrows shot together before scoring.
///
/// `End` is a value: every change returns a new end and leaves the original untouched.
/// Arrows are checked against the face the end is shot on, so a five-zone end never holds a 10.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct End {
    size: usize,
    zones: FaceZones,
    arrows: Vec<Arrow>,
    size_locked: bool,
}

impl Default for End {
    fn default() -> Self {
        Self {
            size: DEFAULT_END_SIZE,
            zones: FaceZones::TenZone,
            arrows: Vec::new(),
            size_locked: false,
        }
    }
}

impl End {
    /// An empty end for live entry on a ten-zone face
    pub fn new(size: usize) -> Result<Self> {
        Self::for_face(size, FaceZones::TenZone)
    }

    pub fn for_face(size: usize, zones: FaceZones) -> Result<Self> {
        if size == 0 {
            return Err(ArgumentError::NonPositiveEndSize.into());
        }
        Ok(Self {
            size,
            zones,
            ..Self::default()
        })
    }

    /// An end that has already been recorded on a ten-zone face. Its size can no longer change.
    pub fn recorded(arrows: Vec<Arrow>, size: usize) -> Result<Self> {
        Self::recorded_on_face(arrows, size, FaceZones::TenZone)
    }

    pub fn recorded_on_face(arrows: Vec<Arrow>, size: usize, zones: FaceZones) -> Result<Self> {
        if size == 0 {
            return Err(ArgumentError::NonPositiveEndSize.into());
        }
        if arrows.len() > size {
            return Err(ScorerError::EndFull { size });
        }
        for arrow in &arrows {
            zones.validate(arrow)?;
        }
        Ok(Self {
            size,
            zones,
            arrows,
            size_locked: true,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn zones(&self) -> FaceZones {
        self.zones
    }

    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    pub fn len(&self) -> usize {
        self.arrows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrows.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.arrows.len() >= self.size
    }

    pub fn state(&self) -> EndState {
        if self.is_empty() {
            EndState::Empty
        } else if self.is_full() {
            EndState::Full
        } else {
            EndState::PartiallyFilled
        }
    }

    pub fn add_arrow(&self, arrow: Arrow) -> Result<Self> {
        if self.is_full() {
            return Err(ScorerError::EndFull { size: self.size });
        }
        self.zones.validate(&arrow)?;
        let mut next = self.clone();
        next.arrows.push(arrow);
        Ok(next)
    }

    pub fn remove_last(&self) -> Result<Self> {
        if self.is_empty() {
            return Err(ScorerError::EndEmpty);
        }
        let mut next = self.clone();
        next.arrows.pop();
        Ok(next)
    }

    pub fn clear(&self) -> Self {
        Self {
            arrows: Vec::new(),
            ..self.clone()
        }
    }

    /// Change the configured size of an end still being entered
    pub fn resized(&self, size: usize) -> Result<Self> {
        if self.size_locked {
            return Err(ScorerError::EndSizeLocked);
        }
        if size == 0 {
            return Err(ArgumentError::NonPositiveEndSize.into());
        }
        if self.arrows.len() > size {
            return Err(ArgumentError::EndTooSmall {
                size,
                arrows: self.arrows.len(),
            }
            .into());
        }
        Ok(Self {
            size,
            ..self.clone()
        })
    }

    /// Copy of this end with the best arrow first (X ahead of 10)
    pub fn sorted_for_display(&self) -> Self {
        let mut sorted = self.clone();
        sorted.arrows.sort_by(|a, b| b.cmp(a));
        sorted
    }

    pub fn score(&self) -> u32 {
        self.arrows.iter().map(|a| a.score as u32).sum()
    }

    pub fn hits(&self) -> u32 {
        self.arrows.iter().filter(|a| a.is_hit()).count() as u32
    }

    pub fn golds(&self, golds_type: GoldsType) -> u32 {
        self.arrows.iter().filter(|a| golds_type.is_gold(a)).count() as u32
    }

    pub fn x_count(&self) -> u32 {
        self.arrows.iter().filter(|a| a.is_x).count() as u32
    }

    /// Arrow symbols for every slot of the end, with `placeholder` for unfilled slots
    pub fn slots<'a>(&'a self, placeholder: &'a str) -> impl Iterator<Item = String> + Clone + 'a {
        (0..self.size).map(move |i| match self.arrows.get(i) {
            Some(arrow) => arrow.symbol(),
            None => placeholder.to_string(),
        })
    }

    pub fn display<'a>(&'a self, placeholder: &'a str, delimiter: &'a str) -> EndDisplay<'a> {
        EndDisplay {
            end: self,
            placeholder,
            delimiter,
        }
    }

    pub fn to_display_string(&self, placeholder: &str, delimiter: &str) -> String {
        self.display(placeholder, delimiter).to_string()
    }
}

/// Renders an end on demand; formatting it twice gives the same text
#[derive(Debug, Clone, Copy)]
pub struct EndDisplay<'a> {
    end: &'a End,
    placeholder: &'a str,
    delimiter: &'a str,
}

impl fmt::Display for EndDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.end.slots(self.placeholder).enumerate() {
            if i > 0 {
                f.write_str(self.delimiter)?;
            }
            f.write_str(&slot)?;
        }
        Ok(())
    }
}
