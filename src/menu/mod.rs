use clap::ValueEnum;
use std::fmt;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewId {
    Dashboard,
    Outline,
    Characters,
    Storyboard,
    Locations,
    Voice,
    Marketing,
}

impl ViewId {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewId::Dashboard => "dashboard",
            ViewId::Outline => "outline",
            ViewId::Characters => "characters",
            ViewId::Storyboard => "storyboard",
            ViewId::Locations => "locations",
            ViewId::Voice => "voice",
            ViewId::Marketing => "marketing",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MenuItem {
    pub id: ViewId,
    pub label: &'static str,
    pub blurb: &'static str,
}

pub const MENU: &[MenuItem] = &[
    MenuItem {
        id: ViewId::Dashboard,
        label: "Dashboard",
        blurb: "Your central hub, from the initial spark of an idea to the final marketing push.",
    },
    MenuItem {
        id: ViewId::Outline,
        label: "Story Outline",
        blurb: "Generate a complete story structure from a simple idea.",
    },
    MenuItem {
        id: ViewId::Characters,
        label: "Character Creator",
        blurb: "Design unique characters with detailed descriptions and visual concepts.",
    },
    MenuItem {
        id: ViewId::Storyboard,
        label: "Storyboard",
        blurb: "Visualize your scenes with AI-generated storyboard panels.",
    },
    MenuItem {
        id: ViewId::Locations,
        label: "Location Designer",
        blurb: "Create breathtaking worlds and environments for your story.",
    },
    MenuItem {
        id: ViewId::Voice,
        label: "Voice Studio",
        blurb: "Develop character voices and generate sample dialogue scripts.",
    },
    MenuItem {
        id: ViewId::Marketing,
        label: "Marketing Co-pilot",
        blurb: "Craft compelling taglines and marketing copy to promote your creation.",
    },
];

/// Entry matching `id`, or the first entry when it is missing or unknown.
pub fn resolve(id: Option<&str>) -> &'static MenuItem {
    id.map(str::trim)
        .and_then(|wanted| MENU.iter().find(|m| m.id.as_str().eq_ignore_ascii_case(wanted)))
        .unwrap_or(&MENU[0])
}

/// Everything the dashboard links to.
pub fn features() -> impl Iterator<Item = &'static MenuItem> {
    MENU.iter().filter(|m| m.id != ViewId::Dashboard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_matches_identifier() {
        assert_eq!(resolve(Some("storyboard")).id, ViewId::Storyboard);
        assert_eq!(resolve(Some(" Voice ")).id, ViewId::Voice);
    }

    #[test]
    fn resolve_defaults_to_first_entry() {
        assert_eq!(resolve(None).id, MENU[0].id);
        assert_eq!(resolve(Some("settings")).id, ViewId::Dashboard);
        assert_eq!(resolve(Some("")).id, ViewId::Dashboard);
    }

    #[test]
    fn ids_are_unique_and_features_skip_dashboard() {
        let mut ids: Vec<_> = MENU.iter().map(|m| m.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), MENU.len());
        assert_eq!(features().count(), MENU.len() - 1);
        assert!(features().all(|m| m.id != ViewId::Dashboard));
    }
}
