//! Fixed game data: characters, case materials, menu and tutorial.

use rand::seq::IndexedRandom;

/// A chat partner in the characters drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Character {
    pub emoji: &'static str,
    pub name: &'static str,
    pub status: &'static str,
    /// Action sent when the character is picked
    pub action: &'static str,
    /// Portrait file served by the backend image endpoint
    pub image: Option<&'static str>,
}

impl Character {
    /// Whether this is the public "Everyone" channel.
    pub fn is_public(&self) -> bool {
        self.action == PUBLIC_MODE_ACTION
    }
}

pub const PUBLIC_MODE_ACTION: &str = "mode_public";

pub static CHARACTERS: [Character; 5] = [
    Character {
        emoji: "💬",
        name: "Everyone",
        status: "Public Chat",
        action: PUBLIC_MODE_ACTION,
        image: None,
    },
    Character {
        emoji: "📚",
        name: "Tim Kane",
        status: "Private Chat",
        action: "talk_tim",
        image: Some("tim.png"),
    },
    Character {
        emoji: "😎",
        name: "Ronnie Snapper",
        status: "Private Chat",
        action: "talk_ronnie",
        image: Some("ronnie.png"),
    },
    Character {
        emoji: "💔",
        name: "Fiona McAllister",
        status: "Private Chat",
        action: "talk_fiona",
        image: Some("fiona.png"),
    },
    Character {
        emoji: "💼",
        name: "Pauline Thompson",
        status: "Private Chat",
        action: "talk_pauline",
        image: Some("pauline.png"),
    },
];

/// The suspects, without the public channel.
pub fn suspects() -> &'static [Character] {
    &CHARACTERS[1..]
}

pub fn character_by_action(action: &str) -> Option<&'static Character> {
    CHARACTERS.iter().find(|c| c.action == action)
}

/// Who "is typing" while waiting for a reply.
///
/// In a private chat it is that character; in public chat a random suspect.
pub fn typing_character(current: Option<&'static Character>) -> Option<&'static Character> {
    match current {
        Some(character) if !character.is_public() => Some(character),
        _ => suspects().choose(&mut rand::rng()),
    }
}

/// An item in the case materials drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseMaterial {
    pub emoji: &'static str,
    pub name: &'static str,
    pub action: &'static str,
}

pub static CASE_MATERIALS: [CaseMaterial; 4] = [
    CaseMaterial {
        emoji: "🔍",
        name: "Med Report & Personal Items",
        action: "examine_clue_1",
    },
    CaseMaterial {
        emoji: "🔍",
        name: "The Weapon",
        action: "examine_clue_2",
    },
    CaseMaterial {
        emoji: "🔍",
        name: "The Note",
        action: "examine_clue_3",
    },
    CaseMaterial {
        emoji: "🔍",
        name: "The Apartment",
        action: "examine_clue_4",
    },
];

/// Header menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub action: &'static str,
}

/// Menu action that reopens the tutorial rather than calling the backend.
pub const HELP_ACTION: &str = "help";

pub static MENU_ITEMS: [MenuItem; 3] = [
    MenuItem {
        label: "📊 Language Level",
        action: "language_menu_difficulty",
    },
    MenuItem {
        label: "📈 My Progress",
        action: "language_menu_progress",
    },
    MenuItem {
        label: "❓ Help",
        action: HELP_ACTION,
    },
];

/// A tutorial tooltip anchored to a UI element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TutorialStep {
    /// DOM id of the element the step points at
    pub target: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

pub static TUTORIAL_STEPS: [TutorialStep; 5] = [
    TutorialStep {
        target: "nav-suspects",
        title: "👥 Suspects",
        text: "Here you can open the suspects panel. Click this button to talk to individual characters privately.",
    },
    TutorialStep {
        target: "nav-materials",
        title: "📄 Case Materials",
        text: "This button opens the case materials drawer where you can examine clues and evidence.",
    },
    TutorialStep {
        target: "burger-button",
        title: "📚 Menu",
        text: "Click the menu button in the header to access language learning tools: adjust difficulty level, view your progress report, and get help.",
    },
    TutorialStep {
        target: "chat-area",
        title: "💬 Chat Area",
        text: "This is where all conversations take place. You'll see messages from characters and system notifications here. Highlight any unfamiliar word and click it to get its definition.",
    },
    TutorialStep {
        target: "message-input",
        title: "✍️ Type Your Messages",
        text: "Type your questions and messages here, then click Send or press Enter. You can chat with everyone or choose a private conversation.",
    },
];
