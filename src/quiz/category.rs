//! Result categories and the quiz kinds that own them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::QuizError;

/// Which quiz is being taken. Selects the category family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizKind {
    Major,
    Animal,
}

impl QuizKind {
    /// All quiz kinds in catalog order.
    pub const ALL: [QuizKind; 2] = [QuizKind::Major, QuizKind::Animal];

    /// The categories a quiz of this kind can produce.
    pub fn categories(self) -> [Category; 4] {
        match self {
            QuizKind::Major => Major::ALL.map(Category::Major),
            QuizKind::Animal => Animal::ALL.map(Category::Animal),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuizKind::Major => "major",
            QuizKind::Animal => "animal",
        }
    }
}

impl fmt::Display for QuizKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizKind {
    type Err = QuizError;

    /// Accepts the short kind name (`major`) or the quiz identifier (`major-quiz`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" | "major-quiz" => Ok(QuizKind::Major),
            "animal" | "animal-quiz" => Ok(QuizKind::Animal),
            _ => Err(QuizError::UnknownQuiz(s.to_string())),
        }
    }
}

/// College-major archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Major {
    Business,
    Engineering,
    Arts,
    Science,
}

impl Major {
    pub const ALL: [Major; 4] = [Major::Business, Major::Engineering, Major::Arts, Major::Science];
}

/// Animal archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Animal {
    Lion,
    Cat,
    Rabbit,
    Turtle,
}

impl Animal {
    pub const ALL: [Animal; 4] = [Animal::Lion, Animal::Cat, Animal::Rabbit, Animal::Turtle];
}

/// A personality outcome, tagged by family.
///
/// Serialized as its lowercase tag (`"business"`, `"lion"`, ...). Tags are
/// unique across both families, so no family marker is needed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Category {
    Major(Major),
    Animal(Animal),
}

impl Category {
    /// The quiz kind whose family this category belongs to.
    pub fn kind(self) -> QuizKind {
        match self {
            Category::Major(_) => QuizKind::Major,
            Category::Animal(_) => QuizKind::Animal,
        }
    }

    pub fn belongs_to(self, kind: QuizKind) -> bool {
        self.kind() == kind
    }

    /// Stable lowercase tag, also the wire form.
    pub fn tag(self) -> &'static str {
        match self {
            Category::Major(Major::Business) => "business",
            Category::Major(Major::Engineering) => "engineering",
            Category::Major(Major::Arts) => "arts",
            Category::Major(Major::Science) => "science",
            Category::Animal(Animal::Lion) => "lion",
            Category::Animal(Animal::Cat) => "cat",
            Category::Animal(Animal::Rabbit) => "rabbit",
            Category::Animal(Animal::Turtle) => "turtle",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Category::Major(Major::Business) => "💼",
            Category::Major(Major::Engineering) => "⚙️",
            Category::Major(Major::Arts) => "🎨",
            Category::Major(Major::Science) => "🔬",
            Category::Animal(Animal::Lion) => "🦁",
            Category::Animal(Animal::Cat) => "🐱",
            Category::Animal(Animal::Rabbit) => "🐰",
            Category::Animal(Animal::Turtle) => "🐢",
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Category::Major(Major::Business) => "Business & Management",
            Category::Major(Major::Engineering) => "Engineering & Technology",
            Category::Major(Major::Arts) => "Arts & Humanities",
            Category::Major(Major::Science) => "Science & Research",
            Category::Animal(Animal::Lion) => "Lion",
            Category::Animal(Animal::Cat) => "Cat",
            Category::Animal(Animal::Rabbit) => "Rabbit",
            Category::Animal(Animal::Turtle) => "Turtle",
        }
    }

    /// Long-form description shown under the result.
    pub fn definition(self) -> &'static str {
        match self {
            Category::Major(Major::Business) => {
                "You have strong leadership skills and enjoy working with people. You're goal-oriented and thrive in dynamic environments where you can make strategic decisions."
            }
            Category::Major(Major::Engineering) => {
                "You're analytical and love solving complex problems. You enjoy understanding how things work and creating practical solutions to real-world challenges."
            }
            Category::Major(Major::Arts) => {
                "You're creative and expressive, with a passion for storytelling and design. You see the world through a unique lens and enjoy bringing ideas to life."
            }
            Category::Major(Major::Science) => {
                "You're curious and methodical, driven by a desire to understand the natural world. You excel at research and discovery, always asking 'why' and 'how'."
            }
            Category::Animal(Animal::Lion) => {
                "You are incredibly outgoing. You surround yourself with the people you love and enjoy activities with your friends."
            }
            Category::Animal(Animal::Cat) => {
                "Mischievous, yet mild-tempered, you enjoy doing things on your own terms."
            }
            Category::Animal(Animal::Rabbit) => {
                "You love everything that's soft. You are healthy and full of energy."
            }
            Category::Animal(Animal::Turtle) => {
                "You are wise beyond your years, and you focus on the details. Slow and steady wins the race."
            }
        }
    }

    /// One-line verdict, e.g. "You should study Business!" or "You are a Lion!".
    pub fn headline(self) -> String {
        match self {
            Category::Major(_) => {
                let short = self.name().split(" & ").next().unwrap_or_default();
                format!("You should study {}!", short)
            }
            Category::Animal(_) => format!("You are a {}!", self.name()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Category {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        QuizKind::ALL
            .iter()
            .flat_map(|kind| kind.categories())
            .find(|c| c.tag() == wanted)
            .ok_or_else(|| QuizError::UnknownCategory(s.to_string()))
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.tag().to_string()
    }
}

impl TryFrom<String> for Category {
    type Error = QuizError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
