//! Named roll call at the assembly point.

use muster_types::Person;
use tracing::debug;

/// Presence tracking for a fixed roster.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RollCall {
    people: Vec<Person>,
}

impl RollCall {
    /// Start a roll call from a roster.
    pub const fn new(people: Vec<Person>) -> Self {
        Self { people }
    }

    /// Everyone on the roster, in roster order.
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Flip a person's presence and return the new state, or `None` if no
    /// one has that id.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let person = self.people.iter_mut().find(|p| p.id == id)?;
        person.present = !person.present;
        debug!(id, present = person.present, "presence toggled");
        Some(person.present)
    }

    /// Mark everyone present or absent.
    pub fn mark_all(&mut self, present: bool) {
        for person in &mut self.people {
            person.present = present;
        }
    }

    /// Number of people checked in.
    pub fn present_count(&self) -> usize {
        self.people.iter().filter(|p| p.present).count()
    }

    /// Roster size.
    pub const fn len(&self) -> usize {
        self.people.len()
    }

    /// Whether the roster is empty.
    pub const fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// People not yet checked in.
    pub fn missing(&self) -> impl Iterator<Item = &Person> {
        self.people.iter().filter(|p| !p.present)
    }

    /// `present/total`, as shown on the headcount banner.
    pub fn summary(&self) -> String {
        format!("{}/{}", self.present_count(), self.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::builtin;

    use super::*;

    #[test]
    fn toggle_flips_presence() {
        let mut roll = RollCall::new(builtin::roster());
        assert_eq!(roll.summary(), "0/6");
        assert_eq!(roll.toggle("p2"), Some(true));
        assert_eq!(roll.present_count(), 1);
        assert_eq!(roll.toggle("p2"), Some(false));
        assert_eq!(roll.present_count(), 0);
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut roll = RollCall::new(builtin::roster());
        assert_eq!(roll.toggle("p99"), None);
        assert_eq!(roll.summary(), "0/6");
    }

    #[test]
    fn mark_all_and_missing() {
        let mut roll = RollCall::new(builtin::roster());
        roll.mark_all(true);
        assert_eq!(roll.summary(), "6/6");
        let _ = roll.toggle("p5");
        let missing: Vec<&str> = roll.missing().map(|p| p.name.as_str()).collect();
        assert_eq!(missing, vec!["Charlie Brown"]);
    }
}
