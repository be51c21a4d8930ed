//! Built-in catalogs used when the configuration file does not override
//! them.

use muster_types::{EmergencyChecklist, Person, ProcedureCard, ProcedureKind};

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn checklist(id: &str, category: &str, title: &str, dos: &[&str], donts: &[&str]) -> EmergencyChecklist {
    EmergencyChecklist {
        id: id.to_owned(),
        category: category.to_owned(),
        title: title.to_owned(),
        dos: lines(dos),
        donts: lines(donts),
    }
}

/// Default site location printed on incident reports.
pub const DEFAULT_LOCATION: &str = "[A] Office Building A, 4th Floor";

/// Evacuation procedure cards.
pub fn procedures() -> Vec<ProcedureCard> {
    vec![
        ProcedureCard {
            id: "1".to_owned(),
            title: "High-Rise Office Evacuation".to_owned(),
            kind: ProcedureKind::Office,
            steps: lines(&[
                "Stop work immediately.",
                "Check for smoke or heat before opening any door.",
                "Use the nearest stairwell; NEVER use elevators.",
                "Close doors behind you to contain fire.",
                "Proceed to Assembly Point A (South Plaza).",
            ]),
        },
        ProcedureCard {
            id: "2".to_owned(),
            title: "Warehouse Protocol".to_owned(),
            kind: ProcedureKind::Warehouse,
            steps: lines(&[
                "Power down heavy machinery if safe.",
                "Leave all bulky personal items.",
                "Assist any floor visitors to exits.",
                "Follow yellow ground lines to nearest exit.",
                "Assemble at the Loading Dock B perimeter.",
            ]),
        },
    ]
}

/// Emergency do/don't checklists.
#[allow(clippy::too_many_lines)]
pub fn checklists() -> Vec<EmergencyChecklist> {
    vec![
        checklist(
            "e1",
            "Fire",
            "Immediate Fire Response",
            &[
                "Pull the manual fire alarm.",
                "Alert colleagues verbally while exiting.",
                "Stay low to the floor if there is smoke.",
                "Check doors for heat with the back of your hand.",
            ],
            &[
                "Do not go back for personal belongings.",
                "Do not hide in restrooms or storage closets.",
                "Do not use elevators under any circumstances.",
            ],
        ),
        checklist(
            "e2",
            "Intruder",
            "Active Intruder Response",
            &[
                "Run if there is a safe path.",
                "Hide in a locked room if you cannot run.",
                "Silence your phone completely.",
                "Fight as a last resort only.",
            ],
            &[
                "Do not huddle together.",
                "Do not scream or make unnecessary noise.",
                "Do not open the door once locked.",
            ],
        ),
        checklist(
            "e3",
            "Storm / Flood",
            "Severe Weather Protocol",
            &[
                "Move to higher ground or upper floors immediately.",
                "Disconnect electrical appliances to prevent surges.",
                "Follow all official evacuation orders without delay.",
                "Keep emergency kits and important documents ready.",
            ],
            &[
                "Do not walk, swim, or drive through flood waters.",
                "Do not touch electrical equipment if you are wet or standing in water.",
                "Do not stay in low-lying areas or basements during heavy rain.",
            ],
        ),
        checklist(
            "e4",
            "Earthquake",
            "Seismic Safety Response",
            &[
                "Drop, Cover, and Hold on under a sturdy table or desk.",
                "Stay away from windows, glass, and heavy furniture.",
                "Stay inside until the shaking stops and it is safe to exit.",
                "Expect aftershocks and stay prepared.",
            ],
            &[
                "Do not run outside while the ground is shaking.",
                "Do not use elevators; they may get stuck.",
                "Do not stand in doorways; they are not safer than under furniture.",
            ],
        ),
        checklist(
            "e5",
            "Terror Attack",
            "Terror Incident Protocol",
            &[
                "Run: Escape if there is a safe route.",
                "Hide: If escape is impossible, find a secure location and silence devices.",
                "Tell: Contact emergency services as soon as it is safe to do so.",
                "Stay alert to your surroundings and any secondary threats.",
            ],
            &[
                "Do not stop to take photos or videos of the incident.",
                "Do not spread unverified information or rumors.",
                "Do not congregate in large groups after escaping.",
            ],
        ),
        checklist(
            "e6",
            "Bomb Threat",
            "Threat Call or Mail Handling",
            &[
                "Keep the caller on the line as long as possible (if by phone).",
                "Record the exact wording and characteristics of the threat.",
                "Notify Security or ERT immediately using a landline if possible.",
                "Isolate the area around a suspicious package or letter.",
            ],
            &[
                "Do not hang up the phone, even after the caller disconnects.",
                "Do not touch, move, or open any suspicious objects or mail.",
                "Do not use two-way radios or mobile phones near a suspected device.",
            ],
        ),
        checklist(
            "e7",
            "Sabotage",
            "Facility Tampering Response",
            &[
                "Report any suspicious behavior or unauthorized access immediately.",
                "Document and photograph observed damage or tampering.",
                "Isolate affected systems or areas to prevent further damage.",
                "Wait for official clearance before attempting repairs.",
            ],
            &[
                "Do not attempt to fix critical infrastructure without authorization.",
                "Do not ignore \"minor\" signs of tampering or unusual system errors.",
                "Do not touch evidence that may be needed for investigation.",
            ],
        ),
        checklist(
            "e8",
            "Hostage",
            "Hostage Situation Conduct",
            &[
                "Remain as calm and patient as possible.",
                "Follow the captor's instructions without argument.",
                "Observe everything carefully (number of people, weapons, exits).",
                "Be prepared for a long wait and stay mentally resilient.",
            ],
            &[
                "Do not make sudden movements or maintain aggressive eye contact.",
                "Do not try to be a hero or overpower armed captors.",
                "Do not speak unless spoken to or draw unnecessary attention to yourself.",
            ],
        ),
    ]
}

/// Named roll call, everyone initially absent.
pub fn roster() -> Vec<Person> {
    [
        ("p1", "John Doe"),
        ("p2", "Jane Smith"),
        ("p3", "Alice Johnson"),
        ("p4", "Bob Williams"),
        ("p5", "Charlie Brown"),
        ("p6", "Diana Prince"),
    ]
    .iter()
    .map(|(id, name)| Person {
        id: (*id).to_owned(),
        name: (*name).to_owned(),
        present: false,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_sizes() {
        assert_eq!(procedures().len(), 2);
        assert_eq!(checklists().len(), 8);
        assert_eq!(roster().len(), 6);
    }

    #[test]
    fn every_checklist_has_guidance() {
        assert!(
            checklists()
                .iter()
                .all(|c| !c.dos.is_empty() && !c.donts.is_empty())
        );
    }
}
